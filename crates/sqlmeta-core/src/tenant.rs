// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tenant resolution.
//!
//! A [`TenantResolver`] combines two collaborators:
//!
//! - a [`TenantSupplier`] returning the current tenant value of the calling
//!   request thread
//! - a [`TenantTableRegistry`] deciding which tables are tenant scoped
//!
//! The query provider asks the resolver whether an entity is tenant scoped
//! and, if so, for the value to compare the tenant column with. The value is
//! coerced to the kind of the tenant property.
//!
//! ```rust
//! use sqlmeta_core::{TenantResolver, TenantTables, Value};
//!
//! let resolver = TenantResolver::new(
//!     || Some(Value::from("acme")),
//!     TenantTables::ignoring(["audit_log"])
//! );
//! # let _ = resolver;
//! ```

use std::{fmt, sync::Arc};

use tracing::warn;
use uuid::Uuid;

use crate::{
    config::{ConfigSource, TENANT_IGNORE_TABLES_KEY},
    error::{Error, Result},
    metadata::{Entity, PropertyKind},
    value::Value
};

/// Source of the current tenant value.
///
/// Called once per query build, from any request thread.
pub trait TenantSupplier: Send + Sync {
    /// Tenant of the current call, if any.
    fn current_tenant(&self) -> Option<Value>;
}

impl<F> TenantSupplier for F
where
    F: Fn() -> Option<Value> + Send + Sync
{
    fn current_tenant(&self) -> Option<Value> {
        self()
    }
}

/// Supplier returning the same tenant for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTenant(pub Value);

impl TenantSupplier for FixedTenant {
    fn current_tenant(&self) -> Option<Value> {
        (!self.0.is_null()).then(|| self.0.clone())
    }
}

/// Decides which tables are tenant scoped.
pub trait TenantTableRegistry: Send + Sync {
    /// Check if `table` requires a tenant predicate.
    fn is_tenant_table(&self, table: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    All,
    Ignoring(Vec<String>),
    Only(Vec<String>)
}

/// Table registry backed by an allow or deny list.
///
/// Names match case-insensitively, against either the schema-qualified table
/// or its bare name: an entry `orders` matches `sales.orders`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantTables {
    scope: Scope
}

impl TenantTables {
    /// Every table is tenant scoped.
    pub const fn all() -> Self {
        Self {
            scope: Scope::All
        }
    }

    /// Every table except the listed ones is tenant scoped.
    pub fn ignoring<S: Into<String>>(tables: impl IntoIterator<Item = S>) -> Self {
        Self {
            scope: Scope::Ignoring(normalize(tables))
        }
    }

    /// Only the listed tables are tenant scoped.
    pub fn only<S: Into<String>>(tables: impl IntoIterator<Item = S>) -> Self {
        Self {
            scope: Scope::Only(normalize(tables))
        }
    }

    /// Read exemptions from the comma-separated `tenant.ignore-tables` key.
    pub fn from_config(config: &dyn ConfigSource) -> Self {
        match config.get(TENANT_IGNORE_TABLES_KEY) {
            Some(list) => Self::ignoring(list.split(',').map(str::trim).filter(|t| !t.is_empty())),
            None => Self::all()
        }
    }
}

impl Default for TenantTables {
    fn default() -> Self {
        Self::all()
    }
}

fn normalize<S: Into<String>>(tables: impl IntoIterator<Item = S>) -> Vec<String> {
    tables
        .into_iter()
        .map(|t| t.into().trim().to_ascii_lowercase())
        .collect()
}

fn listed(list: &[String], table: &str) -> bool {
    let table = table.to_ascii_lowercase();
    let bare = table.rsplit('.').next().unwrap_or(&table);
    list.iter().any(|entry| *entry == table || entry == bare)
}

impl TenantTableRegistry for TenantTables {
    fn is_tenant_table(&self, table: &str) -> bool {
        match &self.scope {
            Scope::All => true,
            Scope::Ignoring(list) => !listed(list, table),
            Scope::Only(list) => listed(list, table)
        }
    }
}

/// Tenant collaborators used by the query provider.
#[derive(Clone)]
pub struct TenantResolver {
    supplier: Arc<dyn TenantSupplier>,
    registry: Arc<dyn TenantTableRegistry>
}

impl TenantResolver {
    /// Combine a supplier with a table registry.
    pub fn new(
        supplier: impl TenantSupplier + 'static,
        registry: impl TenantTableRegistry + 'static
    ) -> Self {
        Self {
            supplier: Arc::new(supplier),
            registry: Arc::new(registry)
        }
    }

    /// Fixed tenant applied to every table.
    pub fn fixed(tenant: impl Into<Value>) -> Self {
        Self::new(FixedTenant(tenant.into()), TenantTables::all())
    }

    /// Check if reads and writes of `entity` must be tenant scoped.
    pub fn applies_to(&self, entity: &Entity) -> bool {
        entity.tenant_property().is_some() && self.registry.is_tenant_table(entity.table())
    }

    /// Tenant value to compare the tenant column of `entity` with.
    ///
    /// Returns `Ok(None)` when the entity is not tenant scoped.
    ///
    /// # Errors
    ///
    /// - [`Error::TenantUnavailable`] when the entity is tenant scoped but the
    ///   supplier has no tenant
    /// - [`Error::TenantTypeMismatch`] when the value does not fit the tenant
    ///   property kind
    pub fn tenant_value(&self, entity: &Entity) -> Result<Option<Value>> {
        let Some(property) = entity.tenant_property().filter(|_| self.applies_to(entity)) else {
            return Ok(None);
        };

        match self.supplier.current_tenant().filter(|v| !v.is_null()) {
            Some(value) => coerce(value, property.kind()).map(Some),
            None => {
                warn!(table = %entity.table(), "tenant table queried without a tenant value");
                Err(Error::TenantUnavailable {
                    table: entity.table().to_owned()
                })
            }
        }
    }
}

impl fmt::Debug for TenantResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TenantResolver").finish_non_exhaustive()
    }
}

/// Coerce a tenant value to the kind of the tenant column.
///
/// | Kind | Accepted |
/// |------|----------|
/// | `Text` | any scalar, rendered as text |
/// | `Integer` | integers, numeric text |
/// | `Float` | numbers, numeric text |
/// | `Boolean` | booleans, `true`/`false` text, `0`/`1` |
/// | `Uuid` | UUIDs, UUID text |
/// | other | any scalar, unchanged |
///
/// # Errors
///
/// [`Error::TenantTypeMismatch`] naming the value when it cannot be coerced.
pub fn coerce(value: Value, kind: PropertyKind) -> Result<Value> {
    let mismatch = |value: &Value| Error::TenantTypeMismatch {
        value:    value.to_string(),
        expected: kind
    };

    if matches!(value, Value::List(_) | Value::Map(_)) {
        return Err(mismatch(&value));
    }

    let coerced = match (kind, &value) {
        (PropertyKind::Text, Value::Text(_)) => Some(value.clone()),
        (PropertyKind::Text, other) => Some(Value::Text(other.to_string())),

        (PropertyKind::Integer, Value::Int(_)) => Some(value.clone()),
        (PropertyKind::Integer, Value::Text(s)) => s.trim().parse().ok().map(Value::Int),

        (PropertyKind::Float, Value::Float(_)) => Some(value.clone()),
        (PropertyKind::Float, Value::Int(n)) => Some(Value::Float(*n as f64)),
        (PropertyKind::Float, Value::Text(s)) => s.trim().parse().ok().map(Value::Float),

        (PropertyKind::Boolean, Value::Bool(_)) => Some(value.clone()),
        (PropertyKind::Boolean, Value::Int(0)) => Some(Value::Bool(false)),
        (PropertyKind::Boolean, Value::Int(1)) => Some(Value::Bool(true)),
        (PropertyKind::Boolean, Value::Text(s)) => parse_bool(s).map(Value::Bool),

        (PropertyKind::Uuid, Value::Uuid(_)) => Some(value.clone()),
        (PropertyKind::Uuid, Value::Text(s)) => Uuid::parse_str(s.trim()).ok().map(Value::Uuid),

        (PropertyKind::Timestamp | PropertyKind::Other, _) => Some(value.clone()),
        _ => None
    };

    coerced.ok_or_else(|| mismatch(&value))
}

fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") || s == "1" {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") || s == "0" {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::MapConfig,
        metadata::{EntitySchema, PropertyDef, PropertyFlags}
    };

    static ORDERS: EntitySchema = EntitySchema {
        name:       "Order",
        table:      "orders",
        schema:     Some("sales"),
        properties: &[
            PropertyDef::new("id", PropertyKind::Integer).flags(PropertyFlags::PRIMARY_KEY),
            PropertyDef::new("tenant", PropertyKind::Integer).flags(PropertyFlags::TENANT),
        ]
    };

    static COUNTRY: EntitySchema = EntitySchema {
        name:       "Country",
        table:      "country",
        schema:     None,
        properties: &[PropertyDef::new("code", PropertyKind::Text).flags(PropertyFlags::PRIMARY_KEY)]
    };

    fn orders() -> Entity {
        Entity::resolve(&ORDERS, &MapConfig::new()).unwrap()
    }

    #[test]
    fn tables_match_bare_and_qualified_names() {
        let ignoring = TenantTables::ignoring(["ORDERS"]);
        assert!(!ignoring.is_tenant_table("sales.orders"));
        assert!(!ignoring.is_tenant_table("orders"));
        assert!(ignoring.is_tenant_table("customers"));

        let only = TenantTables::only(["sales.orders"]);
        assert!(only.is_tenant_table("sales.orders"));
        assert!(!only.is_tenant_table("orders_archive"));
    }

    #[test]
    fn ignore_list_from_config() {
        let config = MapConfig::new().with(TENANT_IGNORE_TABLES_KEY, "audit_log, country ,");
        let tables = TenantTables::from_config(&config);
        assert!(!tables.is_tenant_table("country"));
        assert!(!tables.is_tenant_table("audit_log"));
        assert!(tables.is_tenant_table("orders"));

        assert_eq!(TenantTables::from_config(&MapConfig::new()), TenantTables::all());
    }

    #[test]
    fn value_is_coerced_to_property_kind() {
        let resolver = TenantResolver::fixed("42");
        assert_eq!(resolver.tenant_value(&orders()).unwrap(), Some(Value::Int(42)));
    }

    #[test]
    fn mismatch_names_the_value() {
        let resolver = TenantResolver::fixed("acme");
        let err = resolver.tenant_value(&orders()).unwrap_err();
        assert!(matches!(
            err,
            Error::TenantTypeMismatch { ref value, expected: PropertyKind::Integer } if value == "acme"
        ));
    }

    #[test]
    fn missing_tenant_is_an_error_for_tenant_tables() {
        let resolver = TenantResolver::new(|| -> Option<Value> { None }, TenantTables::all());
        let err = resolver.tenant_value(&orders()).unwrap_err();
        assert!(matches!(err, Error::TenantUnavailable { ref table } if table == "sales.orders"));
    }

    #[test]
    fn exempt_and_untenanted_entities_resolve_to_none() {
        let exempt = TenantResolver::new(|| -> Option<Value> { None }, TenantTables::ignoring(["orders"]));
        assert!(!exempt.applies_to(&orders()));
        assert_eq!(exempt.tenant_value(&orders()).unwrap(), None);

        let country = Entity::resolve(&COUNTRY, &MapConfig::new()).unwrap();
        let resolver = TenantResolver::fixed("acme");
        assert!(!resolver.applies_to(&country));
        assert_eq!(resolver.tenant_value(&country).unwrap(), None);
    }

    #[test]
    fn coercion_table() {
        let id = Uuid::nil();
        assert_eq!(coerce(Value::Int(7), PropertyKind::Text).unwrap(), Value::from("7"));
        assert_eq!(coerce(Value::Int(7), PropertyKind::Float).unwrap(), Value::Float(7.0));
        assert_eq!(coerce(Value::from("TRUE"), PropertyKind::Boolean).unwrap(), Value::Bool(true));
        assert_eq!(coerce(Value::Int(0), PropertyKind::Boolean).unwrap(), Value::Bool(false));
        assert_eq!(
            coerce(Value::from(id.to_string()), PropertyKind::Uuid).unwrap(),
            Value::Uuid(id)
        );
        assert!(coerce(Value::from("x"), PropertyKind::Uuid).is_err());
        assert!(coerce(Value::List(vec![]), PropertyKind::Other).is_err());
        assert_eq!(coerce(Value::from("x"), PropertyKind::Other).unwrap(), Value::from("x"));
    }
}
