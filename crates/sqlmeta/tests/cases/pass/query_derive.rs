// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query objects covering every field attribute, plus a generic one.

use sqlmeta::{Comparator, Direction, Query, QueryFieldKind, QueryShape, QuerySource, ToValue};

#[derive(Debug, Default, Query)]
pub struct PersonQuery {
    #[predicate(eq)]
    pub name: Option<String>,

    #[predicate(ge, property = "age")]
    pub min_age: Option<i32>,

    #[predicate(like, property = "name")]
    pub name_contains: Option<String>,

    #[predicate(in, property = "id")]
    pub ids: Option<Vec<i64>>,

    #[predicate(is_null, property = "age")]
    pub age_missing: Option<bool>,

    #[order(precedence = 1, property = "name")]
    pub order_by_name: Option<Direction>,

    #[order(precedence = 2, property = "age")]
    pub order_by_age: Option<String>,

    #[limit]
    pub limit: Option<u64>,

    #[offset]
    pub offset: Option<u64>,

    pub note: String
}

#[derive(Query)]
pub struct ByValue<T: ToValue> {
    #[predicate(eq, property = "id")]
    pub value: T
}

fn main() {
    let fields = PersonQuery::query_fields();
    assert_eq!(fields.len(), 9);
    assert_eq!(fields[1].kind, QueryFieldKind::Predicate(Comparator::Ge));
    assert_eq!(fields[1].target(), "age");
    assert_eq!(fields[6].kind, QueryFieldKind::Order { precedence: 2 });

    let query = PersonQuery::default();
    match query.shape() {
        QueryShape::Flat(values) => {
            assert_eq!(values.len(), 9);
            assert!(values.iter().all(|v| v.value.is_null()));
        }
        QueryShape::Structured(_) => panic!("derived queries are flat")
    }

    let by_id = ByValue { value: 7_i64 };
    match by_id.shape() {
        QueryShape::Flat(values) => assert_eq!(values[0].value.as_i64(), Some(7)),
        QueryShape::Structured(_) => panic!("derived queries are flat")
    }
}
