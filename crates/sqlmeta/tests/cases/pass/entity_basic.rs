// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Minimal entity with defaults only.

use sqlmeta::{Entity, Persistent, PropertyFlags, PropertyKind};

#[derive(Debug, Clone, Entity)]
pub struct Person {
    #[id]
    pub id: i64,

    pub name: String,

    pub age: Option<i32>
}

fn main() {
    let schema = Person::schema();
    assert_eq!(schema.name, "Person");
    assert_eq!(schema.table, "person");
    assert!(schema.schema.is_none());
    assert_eq!(schema.properties.len(), 3);

    let id = schema.property("id").unwrap();
    assert!(id.flags.contains(PropertyFlags::PRIMARY_KEY));
    assert_eq!(id.kind, PropertyKind::Integer);
    assert_eq!(id.type_name, "i64");

    let age = schema.property("age").unwrap();
    assert!(age.nullable);
    assert_eq!(age.type_name, "Option<i32>");
}
