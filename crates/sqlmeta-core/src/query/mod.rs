// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query objects and SQL fragment generation.
//!
//! # Overview
//!
//! - [`QueryField`] - declarative description of an annotated query field
//! - [`QuerySource`] - anything the provider can read criteria from
//! - [`StructuredQuery`] - composite query carrying its own criteria
//! - [`QueryProvider`] - builds [`SqlFragments`] and [`Statement`]s

mod direction;
mod field;
mod fragments;
mod provider;
mod structured;

pub use direction::Direction;
pub use field::{Comparator, FieldValue, QueryField, QueryFieldKind, QueryShape, QuerySource};
pub(crate) use fragments::Binder;
pub use fragments::{OrderTerm, ParamStyle, SqlFragments, Statement};
pub use provider::QueryProvider;
pub(crate) use provider::Scope;
pub use structured::{Criterion, Order, StructuredQuery};
