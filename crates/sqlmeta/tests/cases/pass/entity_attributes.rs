// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity with every field attribute, including a reference.

use sqlmeta::{Entity, Persistent, PropertyFlags, PropertyKind};
use uuid::Uuid;

#[derive(Debug, Clone, Entity)]
#[entity(table = "department", schema = "hr")]
pub struct Department {
    #[id]
    pub id: Uuid,

    #[column(name = "dept_title")]
    pub title: String,

    #[tenant]
    #[column(name = "org")]
    pub org: String
}

#[derive(Debug, Clone, Entity)]
#[entity(table = "employees", rename_all = "camelCase")]
pub struct Employee {
    #[id]
    pub id: i64,

    pub full_name: String,

    #[reference(Department, fields(id, title))]
    pub department: Option<Department>,

    #[logic_delete]
    #[column(kind = "integer")]
    pub deleted_flag: u8,

    #[updated_by]
    pub updated_by: Option<String>,

    #[transient]
    pub display_label: String
}

fn main() {
    let department = Department::schema();
    assert_eq!(department.qualified_table(), "hr.department");
    assert_eq!(department.property("title").unwrap().declared_column(), "dept_title");
    assert!(department.property("org").unwrap().flags.contains(PropertyFlags::TENANT));
    assert_eq!(department.property("id").unwrap().kind, PropertyKind::Uuid);

    let employee = Employee::schema();
    assert_eq!(employee.table, "employees");
    assert_eq!(employee.properties.len(), 5);
    assert!(employee.property("display_label").is_none());
    assert_eq!(employee.property("full_name").unwrap().declared_column(), "fullName");

    let deleted = employee.property("deleted_flag").unwrap();
    assert!(deleted.flags.contains(PropertyFlags::LOGIC_DELETE));
    assert_eq!(deleted.kind, PropertyKind::Integer);

    let reference = employee.property("department").unwrap().reference.unwrap();
    assert_eq!((reference.target)().name, "Department");
    assert_eq!(reference.properties, &["id", "title"]);
}
