// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Core runtime for sqlmeta.
//!
//! This crate holds everything the `sqlmeta` derive macros generate code
//! against. It can also be used standalone with hand-written descriptors.
//!
//! # Overview
//!
//! - [`EntitySchema`] / [`Persistent`] - static registration of a domain type
//! - [`Entity`] / [`Property`] - resolved metadata with column names fixed
//! - [`EntityFactory`] - process-wide metadata cache
//! - [`PropertyTokenizer`] - `a.b[0].c` property path parsing
//! - [`QueryProvider`] - WHERE / ORDER BY / LIMIT fragment generation
//! - [`TenantResolver`] - tenant predicate injection
//! - [`UpdateFunction`] / [`DeleteFunction`] - id- or query-scoped writes
//! - [`prelude`] - Convenient re-exports
//!
//! # Usage
//!
//! ```rust
//! use sqlmeta_core::{prelude::*, config::MapConfig};
//!
//! struct Person;
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
//!             ]
//!         };
//!         &SCHEMA
//!     }
//! }
//!
//! let factory = EntityFactory::new(MapConfig::new());
//! let person = factory.get::<Person>().unwrap();
//! let query = StructuredQuery::new().eq("name", "x").limit(1);
//! let fragments = QueryProvider::default().build(&person, &query).unwrap();
//! assert_eq!(fragments.render_inline(), "WHERE name = 'x' LIMIT 1");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod factory;
pub mod metadata;
pub mod path;
pub mod prelude;
pub mod query;
pub mod tenant;
pub mod update;
pub mod value;

pub use config::{ConfigSource, EnvConfig, LayeredConfig, MapConfig};
pub use error::{Error, MissingMetadata, PathError, Result};
pub use factory::EntityFactory;
pub use metadata::{
    Entity, EntitySchema, Persistent, Property, PropertyDef, PropertyFlags, PropertyKind, Reference,
    ReferenceDef
};
pub use path::{PropertyToken, PropertyTokenizer};
pub use query::{
    Comparator, Criterion, Direction, FieldValue, Order, OrderTerm, ParamStyle, QueryField,
    QueryFieldKind, QueryProvider, QueryShape, QuerySource, SqlFragments, Statement,
    StructuredQuery
};
pub use tenant::{FixedTenant, TenantResolver, TenantSupplier, TenantTableRegistry, TenantTables};
pub use update::{DeleteFunction, Executor, UpdateFunction, UpdateParam};
pub use value::{ToValue, Value};
