// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structured composite queries.
//!
//! A [`StructuredQuery`] carries its own criteria, orders and paging instead
//! of being described by annotated fields. Criteria name entity properties,
//! not columns; the provider resolves them against the entity.
//!
//! ```rust
//! use sqlmeta_core::{Direction, StructuredQuery};
//!
//! let query = StructuredQuery::new()
//!     .eq("status", "active")
//!     .ge("age", 18)
//!     .order_by("created_at", Direction::Desc)
//!     .limit(20);
//! assert_eq!(query.criteria.len(), 2);
//! ```

use super::{Comparator, Direction};
use crate::value::Value;

/// One filter of a structured query.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Criterion {
    /// Entity property name.
    pub property:   String,
    /// Comparison operator.
    pub comparator: Comparator,
    /// Compared value; [`Value::Null`] disables the criterion.
    pub value:      Value
}

/// One ordering term of a structured query.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    /// Entity property name.
    pub property:  String,
    /// Sort direction.
    #[cfg_attr(feature = "serde", serde(default))]
    pub direction: Direction
}

/// Query carrying its own criteria, orders and paging.
///
/// Criteria are ANDed in insertion order and orders are emitted in insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StructuredQuery {
    /// Filters.
    pub criteria: Vec<Criterion>,
    /// Ordering terms.
    pub orders:   Vec<Order>,
    /// Row limit.
    pub limit:    Option<u64>,
    /// Rows to skip.
    pub offset:   Option<u64>
}

impl StructuredQuery {
    /// Empty query: no filter, no order, no paging.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a criterion.
    #[must_use]
    pub fn filter(
        mut self,
        property: impl Into<String>,
        comparator: Comparator,
        value: impl Into<Value>
    ) -> Self {
        self.criteria.push(Criterion {
            property: property.into(),
            comparator,
            value: value.into()
        });
        self
    }

    /// `property = value`
    #[must_use]
    pub fn eq(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(property, Comparator::Eq, value)
    }

    /// `property <> value`
    #[must_use]
    pub fn ne(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(property, Comparator::Ne, value)
    }

    /// `property < value`
    #[must_use]
    pub fn lt(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(property, Comparator::Lt, value)
    }

    /// `property <= value`
    #[must_use]
    pub fn le(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(property, Comparator::Le, value)
    }

    /// `property > value`
    #[must_use]
    pub fn gt(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(property, Comparator::Gt, value)
    }

    /// `property >= value`
    #[must_use]
    pub fn ge(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(property, Comparator::Ge, value)
    }

    /// Substring match on `property`.
    #[must_use]
    pub fn like(self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(property, Comparator::Like, value)
    }

    /// `property IN (values...)`
    #[must_use]
    pub fn is_in<V, I>(self, property: impl Into<String>, values: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>
    {
        let list = Value::List(values.into_iter().map(Into::into).collect());
        self.filter(property, Comparator::In, list)
    }

    /// `property IS NULL` when `null`, `property IS NOT NULL` otherwise.
    #[must_use]
    pub fn is_null(self, property: impl Into<String>, null: bool) -> Self {
        self.filter(property, Comparator::IsNull, null)
    }

    /// Append an ordering term.
    #[must_use]
    pub fn order_by(mut self, property: impl Into<String>, direction: Direction) -> Self {
        self.orders.push(Order {
            property: property.into(),
            direction
        });
        self
    }

    /// Set the row limit.
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of rows to skip.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Check if the query has no criteria.
    pub fn is_unfiltered(&self) -> bool {
        self.criteria.iter().all(|c| c.value.is_null())
    }
}
