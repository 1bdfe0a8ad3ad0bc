// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level attribute parsing with darling.
//!
//! # Supported Attributes
//!
//! | Attribute | Required | Default | Description |
//! |-----------|----------|---------|-------------|
//! | `table` | No | snake_case struct name | Database table name |
//! | `schema` | No | none | Schema qualifier |
//! | `rename_all` | No | none | Column rename rule |
//!
//! The whole `#[entity(...)]` attribute is optional.

use darling::FromDeriveInput;
use syn::{Generics, Ident};

use crate::entity::parse::RenameRule;

/// Entity-level attributes parsed from `#[entity(...)]`.
///
/// ```rust,ignore
/// #[entity(table = "department", schema = "hr", rename_all = "camelCase")]
/// ```
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), supports(struct_named))]
pub struct EntityAttrs {
    /// Struct identifier (e.g., `Person`).
    pub ident: Ident,

    /// Struct generics; entities must not have any.
    pub generics: Generics,

    /// Database table name.
    #[darling(default)]
    pub table: Option<String>,

    /// Optional schema qualifier.
    #[darling(default)]
    pub schema: Option<String>,

    /// Rename rule for columns without an explicit name.
    #[darling(default)]
    pub rename_all: Option<RenameRule>
}
