// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # Quick Navigation
//!
//! - **Entity registration**: [`Entity`](macro@Entity) emits a static
//!   `EntitySchema` and implements `Persistent`
//! - **Query objects**: [`Query`](macro@Query) emits a static
//!   `[QueryField]` table and implements `QuerySource`
//!
//! # Entity Attributes
//!
//! | Attribute | Level | Description |
//! |-----------|-------|-------------|
//! | `#[entity(table = "..")]` | struct | Table name (default: snake_case struct name) |
//! | `#[entity(schema = "..")]` | struct | Schema qualifier |
//! | `#[entity(rename_all = "..")]` | struct | Column naming rule for undecorated fields |
//! | `#[id]` | field | Primary key |
//! | `#[tenant]` | field | Tenant discriminator column |
//! | `#[logic_delete]` | field | Soft-delete marker |
//! | `#[updated_by]` | field | Audit column written on updates |
//! | `#[column(name = "..", kind = "..")]` | field | Column and kind override |
//! | `#[reference(Target, fields(a, b))]` | field | Subset view of another entity |
//! | `#[transient]` | field | Not persisted |
//!
//! # Query Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[predicate(eq)]` | `column = value`; also `ne`, `lt`, `le`, `gt`, `ge` |
//! | `#[predicate(like)]` | `column LIKE '%value%'` with escaping |
//! | `#[predicate(in)]` | `column IN (..)` |
//! | `#[predicate(is_null)]` | `column IS [NOT] NULL` from a boolean |
//! | `#[predicate(eq, property = "..")]` | Target a differently named property |
//! | `#[order(precedence = 1)]` | ORDER BY term, sorted by precedence |
//! | `#[limit]` / `#[offset]` | Row window |
//!
//! ```rust,ignore
//! use sqlmeta::{Direction, Entity, Query};
//!
//! #[derive(Entity)]
//! pub struct Person {
//!     #[id]
//!     pub id:   i64,
//!     pub name: String,
//!     pub age:  i32
//! }
//!
//! #[derive(Query)]
//! pub struct PersonQuery {
//!     #[predicate(eq)]
//!     pub name:          Option<String>,
//!     #[order(precedence = 1, property = "name")]
//!     pub order_by_name: Option<Direction>,
//!     #[limit]
//!     pub limit:         Option<u64>
//! }
//! ```

mod entity;
mod query;

use proc_macro::TokenStream;

/// Derive macro registering a struct as a persistent entity.
///
/// Generates `impl sqlmeta::Persistent` returning a `'static` schema built
/// at compile time. See the crate documentation for the attribute table.
#[proc_macro_derive(
    Entity,
    attributes(entity, id, tenant, column, reference, logic_delete, updated_by, transient)
)]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive(input)
}

/// Derive macro turning an annotated struct into a query object.
///
/// Generates `query_fields()` and `impl sqlmeta::QuerySource`. Fields
/// without a query attribute are ignored.
#[proc_macro_derive(Query, attributes(predicate, order, limit, offset))]
pub fn derive_query(input: TokenStream) -> TokenStream {
    query::derive(input)
}
