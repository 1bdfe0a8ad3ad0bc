// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity factory caching of derived entities.

use std::{
    sync::{Arc, Barrier},
    thread
};

use sqlmeta::{Entity, EntityFactory, MapConfig, MissingMetadata, PropertyKind};
use uuid::Uuid;

#[derive(Debug, Clone, Entity)]
#[entity(table = "department", schema = "hr")]
pub struct Department {
    #[id]
    pub id: Uuid,

    #[column(name = "dept_title")]
    pub title: String,

    #[tenant]
    pub org: String
}

#[derive(Debug, Clone, Entity)]
pub struct Employee {
    #[id]
    pub id: i64,

    pub name: String,

    #[reference(Department, fields(id, title, org))]
    pub department: Option<Department>
}

#[derive(Debug, Clone, Entity)]
pub struct Broken {
    #[id]
    pub id: i64,

    #[reference(Department, fields(id, budget))]
    pub department: Option<Department>
}

#[test]
fn concurrent_callers_share_one_entity() {
    let factory = Arc::new(EntityFactory::new(MapConfig::new()));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let factory = Arc::clone(&factory);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                factory.get::<Employee>().unwrap()
            })
        })
        .collect();

    let entities: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(entities.iter().all(|e| Arc::ptr_eq(e, &entities[0])));
    assert!(factory.contains::<Employee>());
    assert_eq!(factory.len(), 1);
}

#[test]
fn derived_metadata_resolves() {
    let factory = EntityFactory::new(MapConfig::new());
    let department = factory.get::<Department>().unwrap();

    assert_eq!(department.name(), "Department");
    assert_eq!(department.table(), "hr.department");
    assert_eq!(department.select_columns(), "id, dept_title, org");
    assert_eq!(department.required_id_property().unwrap().kind(), PropertyKind::Uuid);
    assert_eq!(department.tenant_property().unwrap().column(), "org");
}

#[test]
fn reference_carries_listed_subset() {
    let factory = EntityFactory::new(MapConfig::new().with("tenant.column.name", "org_id"));
    let employee = factory.get::<Employee>().unwrap();

    let (property, reference) = employee.references().next().unwrap();
    assert_eq!(property.name(), "department");
    assert_eq!(reference.table(), "hr.department");
    assert_eq!(reference.columns(), vec!["id", "dept_title", "org_id"]);
}

#[test]
fn unknown_reference_property_fails() {
    let factory = EntityFactory::new(MapConfig::new());
    let err = factory.get::<Broken>().unwrap_err();
    assert!(matches!(
        err,
        sqlmeta::Error::MissingMetadata {
            kind: MissingMetadata::Property(ref name),
            ..
        } if name == "budget"
    ));
    assert!(!factory.contains::<Broken>());
}

#[test]
fn required_property_lookup() {
    let factory = EntityFactory::new(MapConfig::new());
    let employee = factory.get::<Employee>().unwrap();

    assert!(employee.property("salary").is_none());
    let err = employee.required_property("salary").unwrap_err();
    assert_eq!(
        err.to_string(),
        "entity `Employee`: required property `salary` is missing"
    );
}
