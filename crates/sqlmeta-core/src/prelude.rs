// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust
//! use sqlmeta_core::prelude::*;
//! ```

pub use crate::{
    Direction, Entity, EntityFactory, EntitySchema, Executor, Persistent, PropertyDef, PropertyFlags,
    PropertyKind, QueryProvider, QuerySource, StructuredQuery, TenantResolver, ToValue, UpdateParam,
    Value
};
