// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity derive macro implementation.
//!
//! # Architecture
//!
//! ```text
//! entity.rs (orchestrator)
//! │
//! ├── parse/     → Attribute parsing (EntityDef, FieldDef)
//! └── schema.rs  → `impl Persistent` with the static `EntitySchema`
//! ```
//!
//! # Generated Code
//!
//! For an entity like:
//!
//! ```rust,ignore
//! #[derive(Entity)]
//! #[entity(table = "people")]
//! pub struct Person {
//!     #[id]
//!     pub id:   i64,
//!     pub name: String,
//! }
//! ```
//!
//! The macro generates:
//!
//! ```rust,ignore
//! impl ::sqlmeta::Persistent for Person {
//!     fn schema() -> &'static ::sqlmeta::EntitySchema {
//!         static SCHEMA: ::sqlmeta::EntitySchema = ::sqlmeta::EntitySchema {
//!             name:       "Person",
//!             table:      "people",
//!             schema:     None,
//!             properties: &[
//!                 ::sqlmeta::PropertyDef::new("id", ::sqlmeta::PropertyKind::Integer)
//!                     .typed("i64")
//!                     .flags(::sqlmeta::PropertyFlags::PRIMARY_KEY),
//!                 ::sqlmeta::PropertyDef::new("name", ::sqlmeta::PropertyKind::Text)
//!                     .typed("String"),
//!             ],
//!         };
//!         &SCHEMA
//!     }
//! }
//! ```

pub mod parse;
mod schema;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use self::parse::EntityDef;

/// Main entry point for the Entity derive macro.
pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match EntityDef::from_derive_input(&input) {
        Ok(entity) => schema::generate(&entity).into(),
        Err(err) => err.write_errors().into()
    }
}
