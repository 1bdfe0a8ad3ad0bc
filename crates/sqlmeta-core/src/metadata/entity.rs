// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resolved entity metadata.
//!
//! [`Entity::resolve`] turns a static [`EntitySchema`] plus configuration into
//! an immutable property graph:
//!
//! ```text
//! EntitySchema ──┬── PropertyDef ──► Property (column resolved)
//!   (static)     ├── PropertyDef ──► Property ── Reference (subset of target)
//!                └── ...
//!                        │
//!          ConfigSource ─┘ (tenant.column.name)
//! ```
//!
//! Resolution is a pure function of the schema and the configuration, which
//! is what lets [`EntityFactory`](crate::EntityFactory) build it under a
//! cache lock.

use tracing::debug;

use super::{
    property::{Property, Reference},
    schema::{EntitySchema, Persistent, PropertyDef, PropertyFlags}
};
use crate::{
    config::{self, ConfigSource},
    error::{Error, MissingMetadata, Result}
};

/// Metadata graph of one domain type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    name:         String,
    table:        String,
    properties:   Vec<Property>,
    id:           Option<usize>,
    tenant:       Option<usize>,
    logic_delete: Option<usize>,
    updated_by:   Option<usize>
}

impl Entity {
    /// Resolve the metadata of a registered type.
    ///
    /// # Errors
    ///
    /// See [`Entity::resolve`].
    pub fn of<T: Persistent>(config: &dyn ConfigSource) -> Result<Self> {
        Self::resolve(T::schema(), config)
    }

    /// Resolve an entity from its static descriptor.
    ///
    /// Column names default to the property name or its explicit override.
    /// The tenant-flagged property takes the configured
    /// [`tenant.column.name`](config::TENANT_COLUMN_KEY) when it is set to
    /// something other than [`config::DEFAULT_TENANT_COLUMN`].
    ///
    /// # Errors
    ///
    /// - [`MissingMetadata::AmbiguousPrimaryKey`] when more than one property
    ///   is marked as primary key
    /// - [`MissingMetadata::AmbiguousMarker`] when more than one property
    ///   carries the tenant, logic-delete or updated-by marker
    /// - [`MissingMetadata::Property`] when a reference names a property the
    ///   target entity does not have
    pub fn resolve(schema: &EntitySchema, config: &dyn ConfigSource) -> Result<Self> {
        let tenant_column = config::tenant_column_override(config);

        let properties = schema
            .properties
            .iter()
            .map(|def| {
                let reference = def
                    .reference
                    .map(|r| {
                        resolve_reference((r.target)(), r.properties, tenant_column.as_deref())
                    })
                    .transpose()?;
                Ok(Property::from_def(
                    def,
                    column_for(def, tenant_column.as_deref()),
                    reference
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let ids: Vec<&Property> = properties.iter().filter(|p| p.is_primary_key()).collect();
        if ids.len() > 1 {
            let names = ids.iter().map(|p| p.name().to_owned()).collect();
            return Err(Error::missing(
                schema.name,
                MissingMetadata::AmbiguousPrimaryKey(names)
            ));
        }

        for (flag, marker) in [
            (PropertyFlags::TENANT, "tenant"),
            (PropertyFlags::LOGIC_DELETE, "logic-delete"),
            (PropertyFlags::UPDATED_BY, "updated-by")
        ] {
            let marked: Vec<String> = properties
                .iter()
                .filter(|p| p.flags().contains(flag))
                .map(|p| p.name().to_owned())
                .collect();
            if marked.len() > 1 {
                return Err(Error::missing(
                    schema.name,
                    MissingMetadata::AmbiguousMarker {
                        marker,
                        properties: marked
                    }
                ));
            }
        }

        let position =
            |flag: PropertyFlags| properties.iter().position(|p| p.flags().contains(flag));
        let entity = Self {
            name: schema.name.to_owned(),
            table: schema.qualified_table(),
            id: position(PropertyFlags::PRIMARY_KEY),
            tenant: position(PropertyFlags::TENANT),
            logic_delete: position(PropertyFlags::LOGIC_DELETE),
            updated_by: position(PropertyFlags::UPDATED_BY),
            properties
        };

        debug!(
            entity = %entity.name,
            table = %entity.table,
            properties = entity.properties.len(),
            tenant = entity.tenant_property().map(Property::column),
            "resolved entity metadata"
        );

        Ok(entity)
    }

    /// Entity type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Table name, schema-qualified when declared with a schema.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// All properties in declaration order.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Look up a property that must exist.
    ///
    /// # Errors
    ///
    /// [`MissingMetadata::Property`] when no property has this name.
    pub fn required_property(&self, name: &str) -> Result<&Property> {
        self.property(name)
            .ok_or_else(|| Error::missing(&self.name, MissingMetadata::Property(name.to_owned())))
    }

    /// Primary key property, if declared.
    pub fn id_property(&self) -> Option<&Property> {
        self.id.map(|i| &self.properties[i])
    }

    /// Primary key property for identifier-based operations.
    ///
    /// # Errors
    ///
    /// [`MissingMetadata::PrimaryKey`] when the entity declares none.
    pub fn required_id_property(&self) -> Result<&Property> {
        self.id_property()
            .ok_or_else(|| Error::missing(&self.name, MissingMetadata::PrimaryKey))
    }

    /// Tenant discriminator property, if declared.
    pub fn tenant_property(&self) -> Option<&Property> {
        self.tenant.map(|i| &self.properties[i])
    }

    /// Logic-delete marker property, if declared.
    pub fn logic_delete_property(&self) -> Option<&Property> {
        self.logic_delete.map(|i| &self.properties[i])
    }

    /// Last-modifying-user property, if declared.
    pub fn updated_by_property(&self) -> Option<&Property> {
        self.updated_by.map(|i| &self.properties[i])
    }

    /// Properties carrying a foreign view.
    pub fn references(&self) -> impl Iterator<Item = (&Property, &Reference)> {
        self.properties
            .iter()
            .filter_map(|p| p.reference().map(|r| (p, r)))
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> Vec<&str> {
        self.properties.iter().map(Property::column).collect()
    }

    /// Comma-separated column list for `SELECT`.
    ///
    /// ```text
    /// ["id", "name", "age"] -> "id, name, age"
    /// ```
    pub fn select_columns(&self) -> String {
        self.columns().join(", ")
    }
}

fn column_for(def: &PropertyDef, tenant_column: Option<&str>) -> String {
    match tenant_column {
        Some(column) if def.flags.contains(PropertyFlags::TENANT) => column.to_owned(),
        _ => def.declared_column().to_owned()
    }
}

fn resolve_reference(
    target: &EntitySchema,
    names: &[&str],
    tenant_column: Option<&str>
) -> Result<Reference> {
    let properties = names
        .iter()
        .map(|name| {
            let def = target.property(name).ok_or_else(|| {
                Error::missing(target.name, MissingMetadata::Property((*name).to_owned()))
            })?;
            Ok(Property::from_def(def, column_for(def, tenant_column), None))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Reference::new(
        target.name.to_owned(),
        target.qualified_table(),
        properties
    ))
}
