// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resolved property metadata.

use super::schema::{PropertyDef, PropertyFlags, PropertyKind};

/// One mapped property of a resolved [`Entity`](super::Entity).
///
/// Owned by its entity and immutable; all fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name:      String,
    type_name: String,
    kind:      PropertyKind,
    nullable:  bool,
    column:    String,
    flags:     PropertyFlags,
    reference: Option<Reference>
}

impl Property {
    pub(crate) fn from_def(
        def: &PropertyDef,
        column: String,
        reference: Option<Reference>
    ) -> Self {
        Self {
            name: def.name.to_owned(),
            type_name: def.type_name.to_owned(),
            kind: def.kind,
            nullable: def.nullable,
            column,
            flags: def.flags,
            reference
        }
    }

    /// Property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared Rust type text.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Value category.
    pub const fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Declared as `Option<T>`.
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Resolved column name.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Marker flags.
    pub const fn flags(&self) -> PropertyFlags {
        self.flags
    }

    /// Primary key property.
    pub const fn is_primary_key(&self) -> bool {
        self.flags.contains(PropertyFlags::PRIMARY_KEY)
    }

    /// Tenant discriminator property.
    pub const fn is_tenant(&self) -> bool {
        self.flags.contains(PropertyFlags::TENANT)
    }

    /// Logic-delete marker property.
    pub const fn is_logic_delete(&self) -> bool {
        self.flags.contains(PropertyFlags::LOGIC_DELETE)
    }

    /// Last-modifying-user property.
    pub const fn is_updated_by(&self) -> bool {
        self.flags.contains(PropertyFlags::UPDATED_BY)
    }

    /// Foreign view, if this property references another entity.
    pub const fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }
}

/// Lightweight foreign view of a referenced entity.
///
/// Holds only the target properties listed at registration time, fixed when
/// the owning entity is resolved. The carried properties are shallow: their
/// own references are not followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    entity:     String,
    table:      String,
    properties: Vec<Property>
}

impl Reference {
    pub(crate) const fn new(entity: String, table: String, properties: Vec<Property>) -> Self {
        Self {
            entity,
            table,
            properties
        }
    }

    /// Referenced entity type name.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Referenced table, schema-qualified when declared with a schema.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Carried target properties, in declaration order of the reference.
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Look up a carried property by name.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Columns of the carried properties.
    pub fn columns(&self) -> Vec<&str> {
        self.properties.iter().map(Property::column).collect()
    }
}
