// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Static entity descriptors.
//!
//! An [`EntitySchema`] is the registration-time description of a domain type.
//! `#[derive(Entity)]` emits one as a `static`; it can also be written by
//! hand with the `const` builders on [`PropertyDef`]:
//!
//! ```rust
//! use sqlmeta_core::{EntitySchema, Persistent, PropertyDef, PropertyFlags, PropertyKind};
//!
//! pub struct Person;
//!
//! impl Persistent for Person {
//!     fn schema() -> &'static EntitySchema {
//!         static SCHEMA: EntitySchema = EntitySchema {
//!             name:       "Person",
//!             table:      "person",
//!             schema:     None,
//!             properties: &[
//!                 PropertyDef::new("id", PropertyKind::Integer).flags(PropertyFlags::PRIMARY_KEY),
//!                 PropertyDef::new("name", PropertyKind::Text),
//!                 PropertyDef::new("age", PropertyKind::Integer),
//!             ]
//!         };
//!         &SCHEMA
//!     }
//! }
//! ```

use std::fmt;

/// Types registered as persistent entities.
pub trait Persistent: 'static {
    /// The static descriptor of this type.
    fn schema() -> &'static EntitySchema;
}

/// Registration-time description of an entity type.
#[derive(Debug)]
pub struct EntitySchema {
    /// Rust type name (e.g., `"Person"`).
    pub name:       &'static str,
    /// Table name.
    pub table:      &'static str,
    /// Optional database schema; the table is qualified with it.
    pub schema:     Option<&'static str>,
    /// Mapped properties in declaration order.
    pub properties: &'static [PropertyDef]
}

impl EntitySchema {
    /// Look up a property descriptor by name.
    pub fn property(&self, name: &str) -> Option<&'static PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Table name qualified with the schema, if any.
    pub fn qualified_table(&self) -> String {
        match self.schema {
            Some(schema) => format!("{schema}.{}", self.table),
            None => self.table.to_owned()
        }
    }
}

/// Broad value category of a property.
///
/// Drives tenant value coercion and the shape of logic-delete predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyKind {
    /// Strings.
    Text,
    /// Signed or unsigned integers.
    Integer,
    /// Floating point numbers.
    Float,
    /// Booleans.
    Boolean,
    /// UUIDs.
    Uuid,
    /// Dates and timestamps.
    Timestamp,
    /// Anything else.
    #[default]
    Other
}

impl PropertyKind {
    /// Lowercase kind name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Uuid => "uuid",
            Self::Timestamp => "timestamp",
            Self::Other => "other"
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marker flags of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PropertyFlags(u8);

impl PropertyFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// Primary key.
    pub const PRIMARY_KEY: Self = Self(1);
    /// Tenant discriminator column.
    pub const TENANT: Self = Self(1 << 1);
    /// Logic-delete marker column.
    pub const LOGIC_DELETE: Self = Self(1 << 2);
    /// Column recording the last modifying user.
    pub const UPDATED_BY: Self = Self(1 << 3);

    /// Combine two flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check if all flags of `other` are set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for PropertyFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Foreign view declaration on a property.
///
/// `properties` names the subset of the target entity's properties carried
/// by the reference (typically the id and a display name).
#[derive(Debug, Clone, Copy)]
pub struct ReferenceDef {
    /// Descriptor accessor of the referenced entity.
    pub target:     fn() -> &'static EntitySchema,
    /// Names of the target properties to carry.
    pub properties: &'static [&'static str]
}

/// Registration-time description of one mapped property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDef {
    /// Property name.
    pub name:      &'static str,
    /// Declared Rust type, as written.
    pub type_name: &'static str,
    /// Value category.
    pub kind:      PropertyKind,
    /// Declared as `Option<T>`.
    pub nullable:  bool,
    /// Explicit column override.
    pub column:    Option<&'static str>,
    /// Marker flags.
    pub flags:     PropertyFlags,
    /// Foreign view declaration.
    pub reference: Option<ReferenceDef>
}

impl PropertyDef {
    /// Property with no flags, no override and no reference.
    pub const fn new(name: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            type_name: "",
            kind,
            nullable: false,
            column: None,
            flags: PropertyFlags::NONE,
            reference: None
        }
    }

    /// Set the declared type text.
    #[must_use]
    pub const fn typed(mut self, type_name: &'static str) -> Self {
        self.type_name = type_name;
        self
    }

    /// Override the column name.
    #[must_use]
    pub const fn column(mut self, column: &'static str) -> Self {
        self.column = Some(column);
        self
    }

    /// Set marker flags.
    #[must_use]
    pub const fn flags(mut self, flags: PropertyFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark as nullable.
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Attach a foreign view declaration.
    #[must_use]
    pub const fn reference(
        mut self,
        target: fn() -> &'static EntitySchema,
        properties: &'static [&'static str]
    ) -> Self {
        self.reference = Some(ReferenceDef {
            target,
            properties
        });
        self
    }

    /// Column declared for this property: the override, or the name.
    pub const fn declared_column(&self) -> &'static str {
        match self.column {
            Some(column) => column,
            None => self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_combine() {
        let flags = PropertyFlags::PRIMARY_KEY | PropertyFlags::TENANT;
        assert!(flags.contains(PropertyFlags::PRIMARY_KEY));
        assert!(flags.contains(PropertyFlags::TENANT));
        assert!(!flags.contains(PropertyFlags::LOGIC_DELETE));
        assert!(flags.contains(PropertyFlags::NONE));
    }

    #[test]
    fn declared_column_prefers_override() {
        const PLAIN: PropertyDef = PropertyDef::new("name", PropertyKind::Text);
        const RENAMED: PropertyDef = PropertyDef::new("name", PropertyKind::Text).column("full_name");
        assert_eq!(PLAIN.declared_column(), "name");
        assert_eq!(RENAMED.declared_column(), "full_name");
    }

    #[test]
    fn qualified_table() {
        let bare = EntitySchema {
            name:       "A",
            table:      "a",
            schema:     None,
            properties: &[]
        };
        let scoped = EntitySchema {
            name:       "B",
            table:      "b",
            schema:     Some("core"),
            properties: &[]
        };
        assert_eq!(bare.qualified_table(), "a");
        assert_eq!(scoped.qualified_table(), "core.b");
    }
}
