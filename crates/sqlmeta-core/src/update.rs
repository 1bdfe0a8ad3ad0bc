// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Update and delete dispatch.
//!
//! [`UpdateFunction`] and [`DeleteFunction`] build a statement scoped by an
//! [`UpdateParam`] and hand it to an [`Executor`]:
//!
//! ```text
//! UpdateParam::Id(value)      ──► WHERE id = $n
//! UpdateParam::Query(query)   ──► WHERE <query criteria>
//!                                   + live rows (updates only)
//!                                   + tenant predicate
//! ```
//!
//! The core never talks to a database; the executor is the persistence
//! runtime's side of the contract.

use std::{any::Any, sync::Arc};

use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{Error, MissingMetadata, Result},
    metadata::{Entity, PropertyKind},
    query::{Binder, QueryProvider, Scope, Statement, StructuredQuery},
    value::Value
};

/// Scope of an update or delete.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateParam {
    /// Single row, by primary key value.
    Id(Value),
    /// Rows matching a structured query.
    Query(StructuredQuery)
}

impl UpdateParam {
    /// Classify an arbitrary parameter.
    ///
    /// Accepts [`StructuredQuery`], [`UpdateParam`], [`Value`], integers of
    /// any width (out of `i64` range they are kept as text),
    /// `String`, `&'static str` and [`Uuid`]; every other type is rejected.
    ///
    /// # Errors
    ///
    /// [`Error::AmbiguousQueryParam`] naming the rejected type.
    pub fn from_dynamic<T: Any>(param: &T) -> Result<Self> {
        let any: &dyn Any = param;

        if let Some(query) = any.downcast_ref::<StructuredQuery>() {
            return Ok(Self::Query(query.clone()));
        }
        if let Some(param) = any.downcast_ref::<Self>() {
            return Ok(param.clone());
        }
        if let Some(value) = any.downcast_ref::<Value>() {
            return Ok(Self::Id(value.clone()));
        }

        identifier(any).map(Self::Id).ok_or_else(|| Error::AmbiguousQueryParam {
            type_name: std::any::type_name::<T>().to_owned()
        })
    }

    /// Scope name used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Id(_) => "id",
            Self::Query(_) => "query"
        }
    }
}

fn identifier(any: &dyn Any) -> Option<Value> {
    macro_rules! try_int {
        ($($ty:ty),*) => {
            $(
                if let Some(n) = any.downcast_ref::<$ty>() {
                    return Some(Value::Int(i64::from(*n)));
                }
            )*
        };
    }

    macro_rules! try_wide {
        ($($ty:ty),*) => {
            $(
                if let Some(n) = any.downcast_ref::<$ty>() {
                    return Some(
                        i64::try_from(*n).map_or_else(|_| Value::Text(n.to_string()), Value::Int)
                    );
                }
            )*
        };
    }

    try_int!(i8, i16, i32, i64, u8, u16, u32);
    try_wide!(u64, usize, isize, i128, u128);
    if let Some(s) = any.downcast_ref::<String>() {
        return Some(Value::Text(s.clone()));
    }
    if let Some(s) = any.downcast_ref::<&'static str>() {
        return Some(Value::Text((*s).to_owned()));
    }
    any.downcast_ref::<Uuid>().map(|u| Value::Uuid(*u))
}

impl From<StructuredQuery> for UpdateParam {
    fn from(query: StructuredQuery) -> Self {
        Self::Query(query)
    }
}

impl From<Value> for UpdateParam {
    fn from(id: Value) -> Self {
        Self::Id(id)
    }
}

/// Persistence runtime executing generated statements.
pub trait Executor {
    /// Runtime error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute `statement`, returning the number of affected rows.
    fn execute(&self, statement: &Statement) -> Result<u64, Self::Error>;
}

impl<E: Executor + ?Sized> Executor for &E {
    type Error = E::Error;

    fn execute(&self, statement: &Statement) -> Result<u64, Self::Error> {
        (**self).execute(statement)
    }
}

/// Value written when no explicit value is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    None,
    Literal(&'static str)
}

/// Single-column update scoped by an [`UpdateParam`].
#[derive(Debug, Clone)]
pub struct UpdateFunction {
    entity:   Arc<Entity>,
    column:   String,
    marker:   Marker,
    provider: QueryProvider
}

impl UpdateFunction {
    /// Update of `property`.
    ///
    /// # Errors
    ///
    /// [`MissingMetadata::Property`] when the entity has no such property.
    pub fn field(entity: Arc<Entity>, property: &str) -> Result<Self> {
        let column = entity.required_property(property)?.column().to_owned();
        Ok(Self {
            entity,
            column,
            marker: Marker::None,
            provider: QueryProvider::default()
        })
    }

    /// Logical delete: sets the logic-delete marker.
    ///
    /// With a null value, the marker is set to `TRUE`, `1` or
    /// `CURRENT_TIMESTAMP` depending on the marker kind.
    ///
    /// # Errors
    ///
    /// [`MissingMetadata::LogicDelete`] when the entity has no logic-delete
    /// property.
    pub fn logic_delete(entity: Arc<Entity>) -> Result<Self> {
        let marker = entity
            .logic_delete_property()
            .ok_or_else(|| Error::missing(entity.name(), MissingMetadata::LogicDelete))?;
        let literal = match marker.kind() {
            PropertyKind::Boolean => "TRUE",
            PropertyKind::Integer => "1",
            _ => "CURRENT_TIMESTAMP"
        };
        let column = marker.column().to_owned();
        Ok(Self {
            entity,
            column,
            marker: Marker::Literal(literal),
            provider: QueryProvider::default()
        })
    }

    /// Use `provider` for placeholders and tenant scoping.
    #[must_use]
    pub fn with_provider(mut self, provider: QueryProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Entity being updated.
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Build the `UPDATE` statement.
    ///
    /// `user` is written to the updated-by property, when the entity has one
    /// and the user is not null.
    ///
    /// # Errors
    ///
    /// - [`MissingMetadata::PrimaryKey`] for [`UpdateParam::Id`] on an entity
    ///   without primary key
    /// - [`Error::UnscopedWrite`] for [`UpdateParam::Query`] yielding no
    ///   condition
    /// - query and tenant errors from [`QueryProvider`]
    pub fn statement(
        &self,
        param: &UpdateParam,
        value: Value,
        user: Option<Value>
    ) -> Result<Statement> {
        let mut binder = Binder::new(self.provider.style());

        let set_value = match (self.marker, value.is_null()) {
            (Marker::Literal(literal), true) => literal.to_owned(),
            _ => binder.bind(value)
        };
        let mut assignments = vec![format!("{} = {set_value}", self.column)];

        if let Some(updated_by) = self.entity.updated_by_property()
            && let Some(user) = user.filter(|u| !u.is_null())
        {
            assignments.push(format!("{} = {}", updated_by.column(), binder.bind(user)));
        }

        let conditions = scope(&self.provider, &self.entity, param, Scope::Live, &mut binder)?;
        let sql = format!(
            "UPDATE {} SET {}{}",
            self.entity.table(),
            assignments.join(", "),
            where_clause(&conditions)
        );

        Ok(Statement::new(sql, binder))
    }

    /// Build and execute the update.
    ///
    /// # Errors
    ///
    /// Errors from [`UpdateFunction::statement`], and executor failures
    /// wrapped in [`Error::Executor`].
    pub fn apply<E: Executor + ?Sized>(
        &self,
        executor: &E,
        param: &UpdateParam,
        value: Value,
        user: Option<Value>
    ) -> Result<u64> {
        let statement = self.statement(param, value, user)?;
        debug!(
            entity = %self.entity.name(),
            column = %self.column,
            scope = param.kind(),
            sql = %statement.sql(),
            "dispatching update"
        );
        executor.execute(&statement).map_err(Error::executor)
    }
}

/// Physical delete scoped by an [`UpdateParam`].
///
/// The logic-delete marker is not consulted: matching rows are removed
/// whether or not they are logically deleted.
#[derive(Debug, Clone)]
pub struct DeleteFunction {
    entity:   Arc<Entity>,
    provider: QueryProvider
}

impl DeleteFunction {
    /// Delete rows of `entity`.
    pub fn new(entity: Arc<Entity>) -> Self {
        Self {
            entity,
            provider: QueryProvider::default()
        }
    }

    /// Use `provider` for placeholders and tenant scoping.
    #[must_use]
    pub fn with_provider(mut self, provider: QueryProvider) -> Self {
        self.provider = provider;
        self
    }

    /// Build the `DELETE` statement.
    ///
    /// # Errors
    ///
    /// See [`UpdateFunction::statement`].
    pub fn statement(&self, param: &UpdateParam) -> Result<Statement> {
        let mut binder = Binder::new(self.provider.style());
        let conditions = scope(&self.provider, &self.entity, param, Scope::All, &mut binder)?;
        let sql = format!("DELETE FROM {}{}", self.entity.table(), where_clause(&conditions));
        Ok(Statement::new(sql, binder))
    }

    /// Build and execute the delete.
    ///
    /// # Errors
    ///
    /// Errors from [`DeleteFunction::statement`], and executor failures
    /// wrapped in [`Error::Executor`].
    pub fn apply<E: Executor + ?Sized>(&self, executor: &E, param: &UpdateParam) -> Result<u64> {
        let statement = self.statement(param)?;
        debug!(
            entity = %self.entity.name(),
            scope = param.kind(),
            sql = %statement.sql(),
            "dispatching delete"
        );
        executor.execute(&statement).map_err(Error::executor)
    }
}

fn scope(
    provider: &QueryProvider,
    entity: &Entity,
    param: &UpdateParam,
    scope: Scope,
    binder: &mut Binder
) -> Result<Vec<String>> {
    let mut conditions = match param {
        UpdateParam::Id(id) => {
            let column = entity.required_id_property()?.column().to_owned();
            vec![format!("{column} = {}", binder.bind(id.clone()))]
        }
        UpdateParam::Query(query) => {
            let conditions = provider.structured_conditions(entity, query, binder)?;
            if conditions.is_empty() {
                return Err(Error::UnscopedWrite {
                    entity: entity.name().to_owned()
                });
            }
            conditions
        }
    };
    provider.scope_conditions(entity, scope, binder, &mut conditions)?;
    Ok(conditions)
}

fn where_clause(conditions: &[String]) -> String {
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}
