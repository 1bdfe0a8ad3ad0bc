// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Marker attributes controlling how a field is persisted.
//!
//! ```rust,ignore
//! #[id]
//! pub id: i64,
//!
//! #[tenant]
//! pub org: String,
//!
//! #[logic_delete]
//! pub deleted: bool,
//!
//! #[updated_by]
//! pub updated_by: Option<String>,
//!
//! #[transient]
//! pub cached_label: String,
//! ```

use proc_macro2::TokenStream;
use quote::quote;

/// Marker flags of a single field.
#[derive(Debug, Default, Clone)]
pub struct StorageConfig {
    /// Primary key (`#[id]`).
    pub is_id: bool,

    /// Tenant discriminator (`#[tenant]`).
    ///
    /// The column may be replaced at runtime by the `tenant.column.name`
    /// configuration key.
    pub is_tenant: bool,

    /// Soft-delete marker (`#[logic_delete]`).
    pub is_logic_delete: bool,

    /// Audit column written by updates (`#[updated_by]`).
    pub is_updated_by: bool,

    /// Excluded from the schema (`#[transient]`).
    pub is_transient: bool
}

impl StorageConfig {
    /// Whether any runtime flag is set.
    #[must_use]
    pub fn has_flags(&self) -> bool {
        self.is_id || self.is_tenant || self.is_logic_delete || self.is_updated_by
    }

    /// `PropertyFlags` expression for the generated descriptor.
    ///
    /// Returns `None` when no flag is set so the builder call can be skipped.
    #[must_use]
    pub fn flags_tokens(&self) -> Option<TokenStream> {
        if !self.has_flags() {
            return None;
        }

        let flags = [
            (self.is_id, quote!(PRIMARY_KEY)),
            (self.is_tenant, quote!(TENANT)),
            (self.is_logic_delete, quote!(LOGIC_DELETE)),
            (self.is_updated_by, quote!(UPDATED_BY))
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .map(|(_, flag)| quote!(.union(::sqlmeta::PropertyFlags::#flag)));

        Some(quote!(::sqlmeta::PropertyFlags::NONE #(#flags)*))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_flags() {
        let config = StorageConfig::default();
        assert!(!config.has_flags());
        assert!(config.flags_tokens().is_none());
    }

    #[test]
    fn transient_is_not_a_flag() {
        let config = StorageConfig {
            is_transient: true,
            ..StorageConfig::default()
        };
        assert!(!config.has_flags());
    }

    #[test]
    fn flags_are_unioned() {
        let config = StorageConfig {
            is_id:           true,
            is_tenant:       false,
            is_logic_delete: true,
            is_updated_by:   false,
            is_transient:    false
        };
        let tokens = config.flags_tokens().unwrap().to_string();
        assert!(tokens.contains("PRIMARY_KEY"));
        assert!(tokens.contains("LOGIC_DELETE"));
        assert!(!tokens.contains("TENANT"));
        assert!(tokens.contains("union"));
    }
}
