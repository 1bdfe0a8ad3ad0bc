// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for metadata resolution and SQL fragment generation.
//!
//! Every variant describes a programming or configuration error. None of them
//! is transient, so nothing in this crate retries: errors are surfaced to the
//! caller as soon as they are detected.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`Error::MissingMetadata`] | entity resolution, required property lookups |
//! | [`Error::InvalidPath`] | property path traversal |
//! | [`Error::TenantTypeMismatch`] | tenant value coercion |
//! | [`Error::TenantUnavailable`] | tenant tables queried without a tenant |
//! | [`Error::AmbiguousQueryParam`] | update/delete dispatch |
//! | [`Error::UnscopedWrite`] | update/delete with a query that filters nothing |
//! | [`Error::InvalidDirection`] | order direction parsing |
//! | [`Error::Executor`] | the persistence runtime behind [`Executor`](crate::Executor) |

use thiserror::Error;

use crate::metadata::PropertyKind;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by sqlmeta.
#[derive(Debug, Error)]
pub enum Error {
    /// Required metadata is absent from an entity.
    #[error("entity `{entity}`: {kind}")]
    MissingMetadata {
        /// Entity type name.
        entity: String,
        /// What exactly is missing.
        kind:   MissingMetadata
    },

    /// A property path could not be traversed.
    #[error("invalid property path `{path}`: {reason}")]
    InvalidPath {
        /// The path (or path remainder) being traversed.
        path:   String,
        /// Why traversal failed.
        reason: PathError
    },

    /// The tenant supplier returned a value that does not fit the tenant
    /// column.
    #[error("tenant value `{value}` cannot be used as {expected}")]
    TenantTypeMismatch {
        /// Rendered offending value.
        value:    String,
        /// Kind declared by the tenant property.
        expected: PropertyKind
    },

    /// A tenant table was queried while no tenant value was available.
    #[error("no tenant value available for tenant table `{table}`")]
    TenantUnavailable {
        /// Table that required a tenant predicate.
        table: String
    },

    /// Update/delete dispatch received neither an identifier nor a structured
    /// query.
    #[error("parameter of type `{type_name}` is neither an identifier nor a structured query")]
    AmbiguousQueryParam {
        /// Rust type name of the rejected parameter.
        type_name: String
    },

    /// An update or delete scoped by a query whose criteria are all null.
    #[error("entity `{entity}`: refusing to write every row, the query has no criteria")]
    UnscopedWrite {
        /// Entity type name.
        entity: String
    },

    /// An order direction string named neither `ASC` nor `DESC`.
    #[error("unknown order direction `{0}`, expected ASC or DESC")]
    InvalidDirection(String),

    /// The persistence runtime failed to execute a statement.
    #[error("statement execution failed: {0}")]
    Executor(#[source] Box<dyn std::error::Error + Send + Sync>)
}

impl Error {
    /// Build a [`Error::MissingMetadata`] for the given entity.
    pub fn missing(entity: impl Into<String>, kind: MissingMetadata) -> Self {
        Self::MissingMetadata {
            entity: entity.into(),
            kind
        }
    }

    /// Wrap a persistence runtime error.
    pub fn executor<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static
    {
        Self::Executor(Box::new(err))
    }

    /// Check if this error reports missing metadata.
    pub const fn is_missing_metadata(&self) -> bool {
        matches!(self, Self::MissingMetadata { .. })
    }
}

/// Kinds of missing entity metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MissingMetadata {
    /// The entity declares no primary key property.
    #[error("no primary key property")]
    PrimaryKey,

    /// More than one property is marked as primary key.
    #[error("more than one primary key property: {}", .0.join(", "))]
    AmbiguousPrimaryKey(Vec<String>),

    /// More than one property carries a marker that allows at most one.
    #[error("more than one {marker} property: {}", .properties.join(", "))]
    AmbiguousMarker {
        /// Marker name, e.g. `tenant`.
        marker:     &'static str,
        /// Properties carrying it.
        properties: Vec<String>
    },

    /// A required property does not exist.
    #[error("required property `{0}` is missing")]
    Property(String),

    /// The entity declares no logic-delete property.
    #[error("no logic-delete property")]
    LogicDelete
}

/// Reasons a property path cannot be traversed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Advanced past a terminal token.
    #[error("no segment after the terminal token")]
    Exhausted,

    /// An index into a list is not a list position.
    #[error("index `{0}` is not a list position")]
    InvalidIndex(String),

    /// A scalar value was asked for a nested segment.
    #[error("segment `{0}` is not traversable")]
    NotTraversable(String)
}
