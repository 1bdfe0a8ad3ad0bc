// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute parsing for the Entity derive macro.
//!
//! Entity-level attributes (`#[entity(...)]`) are parsed with [`darling`];
//! field-level markers (`#[id]`, `#[tenant]`, ...) are parsed by hand since
//! they carry no values.
//!
//! # Architecture
//!
//! ```text
//! parse.rs (coordinator)
//! ├── entity.rs        - Entity-level parsing (EntityDef)
//! │   └── attrs.rs     - darling attribute struct
//! ├── field.rs         - Field-level parsing (FieldDef)
//! │   ├── storage.rs   - Marker flags (id, tenant, logic_delete, ...)
//! │   ├── column.rs    - Column name / kind override
//! │   └── reference.rs - Foreign view declaration
//! ├── kind.rs          - Property kind inference from Rust types
//! └── rename.rs        - Column rename rules
//! ```

mod entity;
mod field;
mod kind;
mod rename;

pub use entity::EntityDef;
pub use field::FieldDef;
pub use kind::PropertyKind;
pub use rename::RenameRule;
