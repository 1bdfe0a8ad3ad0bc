// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level attribute parsing.
//!
//! # Architecture
//!
//! ```text
//! field.rs (coordinator)
//! ├── storage.rs   - Marker flags (id, tenant, logic_delete, updated_by, transient)
//! ├── column.rs    - Column name / kind override
//! └── reference.rs - Foreign view declaration
//! ```

mod column;
mod reference;
mod storage;

pub use column::ColumnConfig;
pub use reference::ReferenceConfig;
pub use storage::StorageConfig;
use syn::{Field, Ident, Type};

use super::{PropertyKind, RenameRule, kind::option_inner};

/// Field definition with all parsed attributes.
#[derive(Debug)]
pub struct FieldDef {
    /// Field identifier.
    pub ident: Ident,

    /// Field type.
    pub ty: Type,

    /// Marker flags.
    pub storage: StorageConfig,

    /// Column overrides.
    pub column: ColumnConfig,

    /// Foreign view, if declared.
    pub reference: Option<ReferenceConfig>
}

impl FieldDef {
    /// Parse field definition from syn Field.
    ///
    /// # Errors
    ///
    /// Returns error if the field has no name, an attribute is malformed, or
    /// `#[transient]` is combined with any other attribute.
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let ident = field.ident.clone().ok_or_else(|| {
            darling::Error::custom("Entity fields must be named").with_span(field)
        })?;
        let ty = field.ty.clone();

        let mut storage = StorageConfig::default();
        let mut column = ColumnConfig::default();
        let mut reference = None;
        let mut errors = darling::Error::accumulator();

        for attr in &field.attrs {
            if attr.path().is_ident("id") {
                storage.is_id = true;
            } else if attr.path().is_ident("tenant") {
                storage.is_tenant = true;
            } else if attr.path().is_ident("logic_delete") {
                storage.is_logic_delete = true;
            } else if attr.path().is_ident("updated_by") {
                storage.is_updated_by = true;
            } else if attr.path().is_ident("transient") {
                storage.is_transient = true;
            } else if attr.path().is_ident("column") {
                if let Some(parsed) = errors.handle(ColumnConfig::from_attr(attr)) {
                    column = parsed;
                }
            } else if attr.path().is_ident("reference") {
                reference = errors.handle(ReferenceConfig::from_attr(attr));
            }
        }

        if storage.is_transient
            && (storage.has_flags() || reference.is_some() || column.name.is_some())
        {
            errors.push(
                darling::Error::custom("#[transient] cannot be combined with other attributes")
                    .with_span(&ident)
            );
        }

        errors.finish()?;

        Ok(Self {
            ident,
            ty,
            storage,
            column,
            reference
        })
    }

    /// Get the field name as a String.
    #[must_use]
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Check if the field type is `Option<T>`.
    #[must_use]
    pub fn is_option(&self) -> bool {
        option_inner(&self.ty).is_some()
    }

    /// Property kind: the `#[column(kind)]` override or the inferred one.
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.column
            .kind
            .unwrap_or_else(|| PropertyKind::infer(&self.ty))
    }

    /// Column override to emit, if the column differs from the field name.
    ///
    /// An explicit `#[column(name)]` wins; otherwise the entity rename rule
    /// is applied.
    #[must_use]
    pub fn column_override(&self, rename: Option<RenameRule>) -> Option<String> {
        let name = self.name_str();
        let column = match (&self.column.name, rename) {
            (Some(explicit), _) => explicit.clone(),
            (None, Some(rule)) => rule.apply(&name),
            (None, None) => return None
        };
        (column != name).then_some(column)
    }

    /// Declared type text in compact form, e.g. `Option<String>`.
    ///
    /// Spaces survive only between two identifier characters
    /// (`&'static str`, `dyn Display`).
    #[must_use]
    pub fn type_text(&self) -> String {
        let ty = &self.ty;
        let raw = quote::quote!(#ty).to_string();
        let chars: Vec<char> = raw.chars().collect();
        let is_ident = |c: char| c.is_alphanumeric() || c == '_';

        chars
            .iter()
            .enumerate()
            .filter(|&(i, &c)| {
                c != ' '
                    || (i > 0
                        && i + 1 < chars.len()
                        && is_ident(chars[i - 1])
                        && is_ident(chars[i + 1]))
            })
            .map(|(_, &c)| c)
            .collect()
    }

    /// Check if this field is excluded from the schema.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.storage.is_transient
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn field(f: Field) -> darling::Result<FieldDef> {
        FieldDef::from_field(&f)
    }

    #[test]
    fn plain_field() {
        let def = field(parse_quote!(pub name: String)).unwrap();
        assert_eq!(def.name_str(), "name");
        assert_eq!(def.kind(), PropertyKind::Text);
        assert!(!def.is_option());
        assert!(!def.storage.has_flags());
        assert!(def.column_override(None).is_none());
        assert_eq!(def.type_text(), "String");
    }

    #[test]
    fn markers() {
        let def = field(parse_quote! {
            #[tenant]
            #[column(name = "org")]
            pub tenant: Option<String>
        })
        .unwrap();
        assert!(def.storage.is_tenant);
        assert!(def.is_option());
        assert_eq!(def.column_override(None).as_deref(), Some("org"));
        assert_eq!(def.type_text(), "Option<String>");
    }

    #[test]
    fn type_text_keeps_word_spacing() {
        let def = field(parse_quote!(pub label: &'static str)).unwrap();
        assert_eq!(def.type_text(), "&'static str");
        let def = field(parse_quote!(pub created: chrono::DateTime<chrono::Utc>)).unwrap();
        assert_eq!(def.type_text(), "chrono::DateTime<chrono::Utc>");
    }

    #[test]
    fn kind_override_wins() {
        let def = field(parse_quote! {
            #[logic_delete]
            #[column(kind = "integer")]
            pub deleted: Flag
        })
        .unwrap();
        assert!(def.storage.is_logic_delete);
        assert_eq!(def.kind(), PropertyKind::Integer);
    }

    #[test]
    fn rename_rule_applies_without_explicit_name() {
        let def = field(parse_quote!(pub first_name: String)).unwrap();
        assert_eq!(
            def.column_override(Some(RenameRule::Camel)).as_deref(),
            Some("firstName")
        );
        assert!(def.column_override(Some(RenameRule::Snake)).is_none());
    }

    #[test]
    fn explicit_name_beats_rename_rule() {
        let def = field(parse_quote! {
            #[column(name = "fname")]
            pub first_name: String
        })
        .unwrap();
        assert_eq!(
            def.column_override(Some(RenameRule::Camel)).as_deref(),
            Some("fname")
        );
    }

    #[test]
    fn reference_field() {
        let def = field(parse_quote! {
            #[reference(Department, fields(id, title))]
            pub department: Option<Department>
        })
        .unwrap();
        let reference = def.reference.unwrap();
        assert_eq!(reference.field_names(), vec!["id", "title"]);
    }

    #[test]
    fn transient_with_marker_is_rejected() {
        let result = field(parse_quote! {
            #[transient]
            #[id]
            pub id: i64
        });
        assert!(result.is_err());
    }

    #[test]
    fn malformed_column_is_rejected() {
        let result = field(parse_quote! {
            #[column(name = 5)]
            pub id: i64
        });
        assert!(result.is_err());
    }

    #[test]
    fn unrelated_attributes_are_ignored() {
        let def = field(parse_quote! {
            #[serde(rename = "x")]
            #[doc = "docs"]
            pub x: i32
        })
        .unwrap();
        assert!(!def.storage.has_flags());
        assert_eq!(def.kind(), PropertyKind::Integer);
    }
}
