// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Tests for entity parsing.
//!
//! Tests use `syn::parse_quote!` to build struct definitions with attributes,
//! then check the parsed `EntityDef` or the rejection.

use syn::DeriveInput;

use super::EntityDef;
use crate::entity::parse::RenameRule;

fn parse(input: DeriveInput) -> darling::Result<EntityDef> {
    EntityDef::from_derive_input(&input)
}

#[test]
fn table_defaults_to_snake_case_name() {
    let entity = parse(syn::parse_quote! {
        pub struct OrderLine {
            #[id]
            pub id: i64,
        }
    })
    .unwrap();
    assert_eq!(entity.name_str(), "OrderLine");
    assert_eq!(entity.table, "order_line");
    assert!(entity.schema.is_none());
    assert!(entity.rename_all.is_none());
}

#[test]
fn explicit_table_schema_and_rename() {
    let entity = parse(syn::parse_quote! {
        #[entity(table = "departments", schema = "hr", rename_all = "camelCase")]
        pub struct Department {
            #[id]
            pub id: i64,
            pub dept_title: String,
        }
    })
    .unwrap();
    assert_eq!(entity.table, "departments");
    assert_eq!(entity.schema.as_deref(), Some("hr"));
    assert_eq!(entity.rename_all, Some(RenameRule::Camel));
}

#[test]
fn entity_without_id_is_accepted() {
    let entity = parse(syn::parse_quote! {
        pub struct AuditLog {
            pub message: String,
        }
    })
    .unwrap();
    assert!(entity.fields.iter().all(|f| !f.storage.is_id));
}

#[test]
fn transient_fields_are_not_persistent() {
    let entity = parse(syn::parse_quote! {
        pub struct Person {
            #[id]
            pub id: i64,
            #[transient]
            pub display: String,
            pub name: String,
        }
    })
    .unwrap();
    let names: Vec<_> = entity.persistent_fields().map(|f| f.name_str()).collect();
    assert_eq!(names, vec!["id", "name"]);
    assert_eq!(entity.fields.len(), 3);
}

#[test]
fn id_marker_is_recorded_on_its_field() {
    let entity = parse(syn::parse_quote! {
        pub struct Person {
            pub name: String,
            #[id]
            pub person_id: i64,
        }
    })
    .unwrap();
    let ids: Vec<_> = entity
        .fields
        .iter()
        .filter(|f| f.storage.is_id)
        .map(|f| f.name_str())
        .collect();
    assert_eq!(ids, vec!["person_id"]);
}

#[test]
fn duplicate_id_is_rejected() {
    let result = parse(syn::parse_quote! {
        pub struct Person {
            #[id]
            pub id: i64,
            #[id]
            pub code: String,
        }
    });
    let message = result.unwrap_err().to_string();
    assert!(message.contains("#[id]"));
}

#[test]
fn duplicate_tenant_is_rejected() {
    let result = parse(syn::parse_quote! {
        pub struct Person {
            #[tenant]
            pub org: String,
            #[tenant]
            pub company: String,
        }
    });
    assert!(result.is_err());
}

#[test]
fn tuple_struct_is_rejected() {
    let result = parse(syn::parse_quote! {
        pub struct Person(i64, String);
    });
    assert!(result.is_err());
}

#[test]
fn enum_is_rejected() {
    let result = parse(syn::parse_quote! {
        pub enum Person {
            A,
            B,
        }
    });
    assert!(result.is_err());
}

#[test]
fn generic_struct_is_rejected() {
    let result = parse(syn::parse_quote! {
        pub struct Wrapper<T> {
            #[id]
            pub id: i64,
            pub inner: T,
        }
    });
    assert!(result.is_err());
}

#[test]
fn unknown_entity_option_is_rejected() {
    let result = parse(syn::parse_quote! {
        #[entity(table = "people", dialect = "postgres")]
        pub struct Person {
            #[id]
            pub id: i64,
        }
    });
    assert!(result.is_err());
}

#[test]
fn unknown_rename_rule_is_rejected() {
    let result = parse(syn::parse_quote! {
        #[entity(rename_all = "sideways")]
        pub struct Person {
            #[id]
            pub id: i64,
        }
    });
    assert!(result.is_err());
}
