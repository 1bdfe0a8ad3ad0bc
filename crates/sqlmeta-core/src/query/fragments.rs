// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL fragments and statements with bound parameters.
//!
//! Fragment text never contains values: every value is bound and referenced
//! through a placeholder in the configured [`ParamStyle`]. Limit and offset
//! are rendered as literals.
//!
//! ```text
//! conditions: ["name = $1", "tenant_id = $2"]
//! orders:     [name DESC, age ASC]
//! limit:      Some(1)
//!
//! render()        -> "WHERE name = $1 AND tenant_id = $2 ORDER BY name DESC, age ASC LIMIT 1"
//! render_inline() -> "WHERE name = 'x' AND tenant_id = 'acme' ORDER BY name DESC, age ASC LIMIT 1"
//! ```

use std::collections::BTreeMap;

use super::Direction;
use crate::value::Value;

/// Placeholder syntax of bound parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamStyle {
    /// PostgreSQL: `$1`, `$2`, ...
    #[default]
    Dollar,
    /// MySQL/SQLite: `?`
    Question,
    /// Named mapper parameters: `#{p1}`, `#{p2}`, ...
    Named
}

impl ParamStyle {
    /// Placeholder for the `n`th parameter (1-based).
    pub fn placeholder(&self, n: usize) -> String {
        match self {
            Self::Dollar => format!("${n}"),
            Self::Question => "?".to_owned(),
            Self::Named => format!("#{{p{n}}}")
        }
    }

    /// Replace every placeholder in `sql` with the literal of its parameter.
    fn inline(&self, sql: &str, params: &[Value]) -> String {
        let mut out = String::with_capacity(sql.len());
        let mut rest = sql;
        let mut next = 0;

        while let Some((start, len, index)) = self.find(rest, next) {
            out.push_str(&rest[..start]);
            match params.get(index) {
                Some(value) => out.push_str(&value.to_sql_literal()),
                None => out.push_str(&rest[start..start + len])
            }
            next = index + 1;
            rest = &rest[start + len..];
        }

        out.push_str(rest);
        out
    }

    /// Locate the next placeholder: byte offset, length and parameter index.
    fn find(&self, sql: &str, next: usize) -> Option<(usize, usize, usize)> {
        match self {
            Self::Question => sql.find('?').map(|pos| (pos, 1, next)),
            Self::Dollar => numbered(sql, "$", ""),
            Self::Named => numbered(sql, "#{p", "}")
        }
    }
}

fn numbered(sql: &str, open: &str, close: &str) -> Option<(usize, usize, usize)> {
    let mut from = 0;
    while let Some(found) = sql[from..].find(open) {
        let start = from + found;
        let digits_at = start + open.len();
        let digits = sql[digits_at..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count();
        let end = digits_at + digits;
        if digits > 0
            && sql[end..].starts_with(close)
            && let Ok(n) = sql[digits_at..end].parse::<usize>()
            && n > 0
        {
            return Some((start, end + close.len() - start, n - 1));
        }
        from = digits_at;
    }
    None
}

/// Parameter collector handing out placeholders in binding order.
#[derive(Debug, Clone)]
pub(crate) struct Binder {
    style:  ParamStyle,
    params: Vec<Value>
}

impl Binder {
    pub(crate) const fn new(style: ParamStyle) -> Self {
        Self {
            style,
            params: Vec::new()
        }
    }

    /// Bind a value and return its placeholder.
    pub(crate) fn bind(&mut self, value: Value) -> String {
        self.params.push(value);
        self.style.placeholder(self.params.len())
    }

    pub(crate) const fn style(&self) -> ParamStyle {
        self.style
    }

    pub(crate) fn into_params(self) -> Vec<Value> {
        self.params
    }
}

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    /// Resolved column name.
    pub column:    String,
    /// Sort direction.
    pub direction: Direction
}

impl OrderTerm {
    /// Render as `column DIRECTION`.
    pub fn to_sql(&self) -> String {
        format!("{} {}", self.column, self.direction.as_sql())
    }
}

/// Generated WHERE/ORDER BY/LIMIT fragments for one query.
///
/// Each part is optional; an empty part renders nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragments {
    /// Conditions ANDed into the `WHERE` clause.
    pub conditions: Vec<String>,
    /// Ordering terms, already sorted.
    pub orders:     Vec<OrderTerm>,
    /// Row limit.
    pub limit:      Option<u64>,
    /// Rows to skip.
    pub offset:     Option<u64>,
    /// Bound parameters, in placeholder order.
    pub params:     Vec<Value>,
    style:          ParamStyle
}

impl SqlFragments {
    pub(crate) fn new(
        conditions: Vec<String>,
        orders: Vec<OrderTerm>,
        limit: Option<u64>,
        offset: Option<u64>,
        binder: Binder
    ) -> Self {
        let style = binder.style();
        Self {
            conditions,
            orders,
            limit,
            offset,
            params: binder.into_params(),
            style
        }
    }

    /// Placeholder style of the fragments.
    pub const fn style(&self) -> ParamStyle {
        self.style
    }

    /// Conditions joined with `AND`, without the `WHERE` keyword.
    pub fn where_clause(&self) -> Option<String> {
        (!self.conditions.is_empty()).then(|| self.conditions.join(" AND "))
    }

    /// Ordering terms joined with `,`, without the `ORDER BY` keywords.
    pub fn order_by_clause(&self) -> Option<String> {
        if self.orders.is_empty() {
            return None;
        }
        let terms: Vec<String> = self.orders.iter().map(OrderTerm::to_sql).collect();
        Some(terms.join(", "))
    }

    /// Paging clause: `LIMIT n`, `LIMIT n OFFSET m` or `OFFSET m`.
    pub fn limit_clause(&self) -> Option<String> {
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => Some(format!("LIMIT {limit} OFFSET {offset}")),
            (Some(limit), None) => Some(format!("LIMIT {limit}")),
            (None, Some(offset)) => Some(format!("OFFSET {offset}")),
            (None, None) => None
        }
    }

    /// Check if nothing would be rendered.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
            && self.orders.is_empty()
            && self.limit.is_none()
            && self.offset.is_none()
    }

    /// Full fragment text with placeholders.
    pub fn render(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(clause) = self.where_clause() {
            parts.push(format!("WHERE {clause}"));
        }
        if let Some(clause) = self.order_by_clause() {
            parts.push(format!("ORDER BY {clause}"));
        }
        if let Some(clause) = self.limit_clause() {
            parts.push(clause);
        }
        parts.join(" ")
    }

    /// Fragment text with parameters inlined as literals.
    ///
    /// For logging and debugging only.
    pub fn render_inline(&self) -> String {
        self.style.inline(&self.render(), &self.params)
    }

    /// Parameters keyed `p1`, `p2`, ... for named mapper templates.
    pub fn param_map(&self) -> BTreeMap<String, Value> {
        param_map(&self.params)
    }
}

fn param_map(params: &[Value]) -> BTreeMap<String, Value> {
    params
        .iter()
        .enumerate()
        .map(|(i, v)| (format!("p{}", i + 1), v.clone()))
        .collect()
}

/// Complete SQL statement with bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql:    String,
    params: Vec<Value>,
    style:  ParamStyle
}

impl Statement {
    pub(crate) fn new(sql: String, binder: Binder) -> Self {
        let style = binder.style();
        Self {
            sql,
            params: binder.into_params(),
            style
        }
    }

    /// SQL text with placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound parameters, in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Placeholder style.
    pub const fn style(&self) -> ParamStyle {
        self.style
    }

    /// SQL text with parameters inlined as literals.
    ///
    /// For logging and debugging only.
    pub fn render_inline(&self) -> String {
        self.style.inline(&self.sql, &self.params)
    }

    /// Parameters keyed `p1`, `p2`, ... for named mapper templates.
    pub fn param_map(&self) -> BTreeMap<String, Value> {
        param_map(&self.params)
    }
}
