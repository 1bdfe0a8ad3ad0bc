// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity and property metadata.
//!
//! Two layers:
//!
//! - [`schema`]: static, registration-time descriptors emitted by
//!   `#[derive(Entity)]` or written by hand
//! - [`Entity`] / [`Property`]: the resolved, immutable graph with column
//!   names fixed against configuration
//!
//! Resolution is normally done through [`EntityFactory`](crate::EntityFactory),
//! which caches one [`Entity`] per type.

mod entity;
mod property;
pub mod schema;


pub use entity::Entity;
pub use property::{Property, Reference};
pub use schema::{EntitySchema, Persistent, PropertyDef, PropertyFlags, PropertyKind, ReferenceDef};
