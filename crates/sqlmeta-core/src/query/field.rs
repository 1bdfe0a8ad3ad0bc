// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declarative query field schema.
//!
//! A flat query object is described once, at registration, by a
//! `&'static [QueryField]`. `#[derive(Query)]` emits the table; at build time
//! the provider walks it generically together with the current field values.
//!
//! | Attribute | Field kind |
//! |-----------|------------|
//! | `#[predicate(eq)]` ... `#[predicate(is_null)]` | [`QueryFieldKind::Predicate`] |
//! | `#[order(precedence = N)]` | [`QueryFieldKind::Order`] |
//! | `#[limit]` | [`QueryFieldKind::Limit`] |
//! | `#[offset]` | [`QueryFieldKind::Offset`] |

use crate::{query::StructuredQuery, value::Value};

/// Comparison operator of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Comparator {
    /// `column = value`
    Eq,
    /// `column <> value`
    Ne,
    /// `column < value`
    Lt,
    /// `column <= value`
    Le,
    /// `column > value`
    Gt,
    /// `column >= value`
    Ge,
    /// `column LIKE '%value%' ESCAPE '\'` with wildcards in the value escaped.
    Like,
    /// `column IN (values...)`
    In,
    /// `column IS NULL` for `true`, `column IS NOT NULL` for `false`.
    IsNull
}

impl Comparator {
    /// SQL operator for binary comparators.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Like => "LIKE",
            Self::In => "IN",
            Self::IsNull => "IS NULL"
        }
    }
}

/// Role of a query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryFieldKind {
    /// Filter predicate.
    Predicate(Comparator),
    /// `ORDER BY` term, ranked by ascending precedence.
    Order {
        /// Position of the term among all order fields.
        precedence: u32
    },
    /// Row limit.
    Limit,
    /// Rows to skip.
    Offset
}

/// Registration-time description of one annotated query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryField {
    /// Field name on the query type.
    pub name:     &'static str,
    /// Field role.
    pub kind:     QueryFieldKind,
    /// Entity property targeted, when it differs from the field name.
    pub property: Option<&'static str>
}

impl QueryField {
    /// Predicate field.
    pub const fn predicate(name: &'static str, comparator: Comparator) -> Self {
        Self {
            name,
            kind: QueryFieldKind::Predicate(comparator),
            property: None
        }
    }

    /// Order field.
    pub const fn order(name: &'static str, precedence: u32) -> Self {
        Self {
            name,
            kind: QueryFieldKind::Order {
                precedence
            },
            property: None
        }
    }

    /// Limit field.
    pub const fn limit(name: &'static str) -> Self {
        Self {
            name,
            kind: QueryFieldKind::Limit,
            property: None
        }
    }

    /// Offset field.
    pub const fn offset(name: &'static str) -> Self {
        Self {
            name,
            kind: QueryFieldKind::Offset,
            property: None
        }
    }

    /// Target another entity property than the one named like the field.
    #[must_use]
    pub const fn on(mut self, property: &'static str) -> Self {
        self.property = Some(property);
        self
    }

    /// Entity property this field applies to.
    pub const fn target(&self) -> &'static str {
        match self.property {
            Some(property) => property,
            None => self.name
        }
    }
}

/// Current value of one query field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    /// Field descriptor.
    pub field: &'static QueryField,
    /// Value held by the query object.
    pub value: Value
}

impl FieldValue {
    /// Pair a descriptor with its value.
    pub fn new(field: &'static QueryField, value: impl Into<Value>) -> Self {
        Self {
            field,
            value: value.into()
        }
    }
}

/// What a query object looks like to the provider.
#[derive(Debug)]
pub enum QueryShape<'a> {
    /// Annotated flat object: field values in declaration order.
    Flat(Vec<FieldValue>),
    /// Structured composite query carrying its own criteria.
    Structured(&'a StructuredQuery)
}

/// Objects the provider can turn into SQL fragments.
///
/// Implemented by `#[derive(Query)]` for flat annotated structs and by
/// [`StructuredQuery`].
pub trait QuerySource {
    /// Expose the query in one of the supported shapes.
    fn shape(&self) -> QueryShape<'_>;
}

impl QuerySource for StructuredQuery {
    fn shape(&self) -> QueryShape<'_> {
        QueryShape::Structured(self)
    }
}

impl<Q: QuerySource + ?Sized> QuerySource for &Q {
    fn shape(&self) -> QueryShape<'_> {
        (**self).shape()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_defaults_to_field_name() {
        const PLAIN: QueryField = QueryField::predicate("name", Comparator::Eq);
        const RETARGETED: QueryField = QueryField::order("order_by_name", 1).on("name");
        assert_eq!(PLAIN.target(), "name");
        assert_eq!(RETARGETED.target(), "name");
        assert_eq!(RETARGETED.kind, QueryFieldKind::Order { precedence: 1 });
    }

    #[test]
    fn comparator_operators() {
        assert_eq!(Comparator::Ne.as_sql(), "<>");
        assert_eq!(Comparator::Ge.as_sql(), ">=");
        assert_eq!(Comparator::Like.as_sql(), "LIKE");
    }

    #[test]
    fn structured_query_is_its_own_shape() {
        let query = StructuredQuery::new().eq("name", "x");
        assert!(matches!(query.shape(), QueryShape::Structured(q) if q.criteria.len() == 1));
    }
}
