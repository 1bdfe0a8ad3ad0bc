// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query provider.
//!
//! Turns a [`QuerySource`] into [`SqlFragments`] for an [`Entity`]:
//!
//! ```text
//! QuerySource::shape()
//!     ├── Flat(field values) ──► predicates in declaration order
//!     │                          orders sorted by precedence
//!     │                          first non-null limit/offset
//!     └── Structured(query) ───► its own criteria, orders, limit, offset
//!                 │
//!                 ▼
//!   + live-rows predicate (logic delete)
//!   + tenant predicate (tenant resolver)
//!                 │
//!                 ▼
//!           SqlFragments
//! ```
//!
//! User predicates come first, then the logic-delete predicate, then the
//! tenant predicate.

use tracing::{trace, warn};

use super::{
    Comparator, Direction, FieldValue, OrderTerm, ParamStyle, QueryFieldKind, QueryShape,
    QuerySource, SqlFragments, Statement, StructuredQuery,
    fragments::Binder
};
use crate::{
    error::Result,
    metadata::{Entity, Property, PropertyKind},
    tenant::TenantResolver,
    value::Value
};

/// Target of the scope predicates added after the user predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    /// Reads and updates: live rows only, tenant scoped.
    Live,
    /// Physical deletes: tenant scoped, deleted rows included.
    All
}

/// User-supplied part of a query: conditions, orders and paging.
struct Parts {
    conditions: Vec<String>,
    orders:     Vec<OrderTerm>,
    limit:      Option<u64>,
    offset:     Option<u64>
}

/// SQL fragment builder.
///
/// Cheap to clone; one provider is usually shared by every repository of an
/// application.
#[derive(Debug, Clone, Default)]
pub struct QueryProvider {
    style:           ParamStyle,
    tenant:          Option<TenantResolver>,
    include_deleted: bool
}

impl QueryProvider {
    /// Provider emitting placeholders in `style`, without tenant scoping.
    pub fn new(style: ParamStyle) -> Self {
        Self {
            style,
            tenant: None,
            include_deleted: false
        }
    }

    /// Scope tenant tables with `resolver`.
    #[must_use]
    pub fn with_tenant(mut self, resolver: TenantResolver) -> Self {
        self.tenant = Some(resolver);
        self
    }

    /// Stop filtering out logically deleted rows.
    #[must_use]
    pub const fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    /// Placeholder style.
    pub const fn style(&self) -> ParamStyle {
        self.style
    }

    /// Tenant resolver, if configured.
    pub const fn tenant(&self) -> Option<&TenantResolver> {
        self.tenant.as_ref()
    }

    /// Build WHERE/ORDER BY/LIMIT fragments of `source` against `entity`.
    ///
    /// # Errors
    ///
    /// - [`MissingMetadata::Property`](crate::MissingMetadata::Property) when
    ///   a field targets an unknown property
    /// - [`Error::InvalidDirection`](crate::Error::InvalidDirection) for
    ///   unparseable order values
    /// - tenant errors from [`TenantResolver::tenant_value`]
    pub fn build<Q>(&self, entity: &Entity, source: &Q) -> Result<SqlFragments>
    where
        Q: QuerySource + ?Sized
    {
        let mut binder = Binder::new(self.style);
        let mut parts = match source.shape() {
            QueryShape::Flat(values) => flat(entity, &values, &mut binder)?,
            QueryShape::Structured(query) => structured(entity, query, &mut binder)?
        };
        self.scope_conditions(entity, Scope::Live, &mut binder, &mut parts.conditions)?;

        let fragments =
            SqlFragments::new(parts.conditions, parts.orders, parts.limit, parts.offset, binder);
        trace!(
            entity = %entity.name(),
            fragments = %fragments.render(),
            params = fragments.params.len(),
            "built query fragments"
        );
        Ok(fragments)
    }

    /// `SELECT` of all mapped columns, filtered, ordered and paged by
    /// `source`.
    ///
    /// # Errors
    ///
    /// See [`QueryProvider::build`].
    pub fn select<Q>(&self, entity: &Entity, source: &Q) -> Result<Statement>
    where
        Q: QuerySource + ?Sized
    {
        let fragments = self.build(entity, source)?;
        let mut sql = format!("SELECT {} FROM {}", entity.select_columns(), entity.table());
        append(&mut sql, &fragments.render());
        Ok(statement(sql, fragments))
    }

    /// `SELECT COUNT(*)` filtered by `source`; orders and paging are ignored.
    ///
    /// # Errors
    ///
    /// See [`QueryProvider::build`].
    pub fn count<Q>(&self, entity: &Entity, source: &Q) -> Result<Statement>
    where
        Q: QuerySource + ?Sized
    {
        let fragments = self.build(entity, source)?;
        let mut sql = format!("SELECT COUNT(*) FROM {}", entity.table());
        if let Some(clause) = fragments.where_clause() {
            append(&mut sql, &format!("WHERE {clause}"));
        }
        Ok(statement(sql, fragments))
    }

    /// Conditions of a structured query, for update and delete scoping.
    pub(crate) fn structured_conditions(
        &self,
        entity: &Entity,
        query: &StructuredQuery,
        binder: &mut Binder
    ) -> Result<Vec<String>> {
        Ok(structured(entity, query, binder)?.conditions)
    }

    /// Append the logic-delete and tenant predicates that apply to `entity`.
    pub(crate) fn scope_conditions(
        &self,
        entity: &Entity,
        scope: Scope,
        binder: &mut Binder,
        conditions: &mut Vec<String>
    ) -> Result<()> {
        if scope == Scope::Live
            && !self.include_deleted
            && let Some(marker) = entity.logic_delete_property()
        {
            conditions.push(live_rows(marker));
        }

        if let Some(resolver) = &self.tenant
            && let Some(value) = resolver.tenant_value(entity)?
            && let Some(tenant) = entity.tenant_property()
        {
            let placeholder = binder.bind(value);
            conditions.push(format!("{} = {placeholder}", tenant.column()));
        }

        Ok(())
    }
}

fn append(sql: &mut String, clause: &str) {
    if !clause.is_empty() {
        sql.push(' ');
        sql.push_str(clause);
    }
}

fn statement(sql: String, fragments: SqlFragments) -> Statement {
    let mut binder = Binder::new(fragments.style());
    for value in fragments.params {
        binder.bind(value);
    }
    Statement::new(sql, binder)
}

/// Predicate selecting rows that are not logically deleted.
pub(crate) fn live_rows(marker: &Property) -> String {
    match marker.kind() {
        PropertyKind::Boolean => format!("{} = FALSE", marker.column()),
        PropertyKind::Integer => format!("{} = 0", marker.column()),
        _ => format!("{} IS NULL", marker.column())
    }
}

fn flat(entity: &Entity, values: &[FieldValue], binder: &mut Binder) -> Result<Parts> {
    let mut conditions = Vec::new();
    let mut ranked: Vec<(u32, OrderTerm)> = Vec::new();
    let mut limit = None;
    let mut offset = None;

    for FieldValue {
        field,
        value
    } in values
    {
        match field.kind {
            QueryFieldKind::Predicate(comparator) => {
                let property = entity.required_property(field.target())?;
                if let Some(condition) = predicate(property.column(), comparator, value, binder) {
                    conditions.push(condition);
                }
            }
            QueryFieldKind::Order {
                precedence
            } => {
                let property = entity.required_property(field.target())?;
                if let Some(direction) = Direction::from_value(value)? {
                    ranked.push((
                        precedence,
                        OrderTerm {
                            column: property.column().to_owned(),
                            direction
                        }
                    ));
                }
            }
            QueryFieldKind::Limit => {
                if limit.is_none() {
                    limit = row_count(field.name, value);
                }
            }
            QueryFieldKind::Offset => {
                if offset.is_none() {
                    offset = row_count(field.name, value);
                }
            }
        }
    }

    ranked.sort_by_key(|(precedence, _)| *precedence);

    Ok(Parts {
        conditions,
        orders: ranked.into_iter().map(|(_, term)| term).collect(),
        limit,
        offset
    })
}

fn structured(entity: &Entity, query: &StructuredQuery, binder: &mut Binder) -> Result<Parts> {
    let mut conditions = Vec::with_capacity(query.criteria.len());
    for criterion in &query.criteria {
        let property = entity.required_property(&criterion.property)?;
        let column = property.column();
        if let Some(condition) = predicate(column, criterion.comparator, &criterion.value, binder) {
            conditions.push(condition);
        }
    }

    let orders = query
        .orders
        .iter()
        .map(|order| {
            Ok(OrderTerm {
                column:    entity.required_property(&order.property)?.column().to_owned(),
                direction: order.direction
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Parts {
        conditions,
        orders,
        limit: query.limit,
        offset: query.offset
    })
}

/// Render one comparison; [`Value::Null`] yields no condition.
fn predicate(
    column: &str,
    comparator: Comparator,
    value: &Value,
    binder: &mut Binder
) -> Option<String> {
    if value.is_null() {
        return None;
    }

    let condition = match comparator {
        Comparator::Like => {
            let text = match value {
                Value::Text(s) => s.clone(),
                other => other.to_string()
            };
            let placeholder = binder.bind(Value::Text(format!("%{}%", escape_like(&text))));
            format!("{column} LIKE {placeholder} ESCAPE '\\'")
        }
        Comparator::In => {
            let items = match value {
                Value::List(items) => items.clone(),
                single => vec![single.clone()]
            };
            if items.is_empty() {
                "1 = 0".to_owned()
            } else {
                let placeholders: Vec<String> = items.into_iter().map(|v| binder.bind(v)).collect();
                format!("{column} IN ({})", placeholders.join(", "))
            }
        }
        Comparator::IsNull => match value {
            Value::Bool(false) => format!("{column} IS NOT NULL"),
            _ => format!("{column} IS NULL")
        },
        binary => {
            let placeholder = binder.bind(value.clone());
            format!("{column} {} {placeholder}", binary.as_sql())
        }
    };

    Some(condition)
}

/// Escape LIKE wildcards so the value matches literally.
pub(crate) fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn row_count(field: &str, value: &Value) -> Option<u64> {
    let count = match value {
        Value::Null => return None,
        Value::Int(n) => u64::try_from(*n).ok(),
        Value::Text(s) => s.trim().parse().ok(),
        _ => None
    };
    if count.is_none() {
        warn!(field, value = %value, "ignoring paging value that is not a row count");
    }
    count
}
