// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structured queries received as JSON.
//!
//! Run with: `cargo test --features serde -p sqlmeta --test serde`

#![cfg(feature = "serde")]

use sqlmeta::{Entity, EntityFactory, MapConfig, ParamStyle, QueryProvider, StructuredQuery};

#[derive(Debug, Clone, Entity)]
pub struct Person {
    #[id]
    pub id: i64,

    pub name: String,

    pub age: i32
}

#[test]
fn json_query_builds_fragments() {
    let query: StructuredQuery = serde_json::from_str(
        r#"{
            "criteria": [
                {"property": "age", "comparator": "ge", "value": 18},
                {"property": "id", "comparator": "in", "value": [1, 2, 3]}
            ],
            "orders": [{"property": "name"}],
            "limit": 20,
            "offset": 40
        }"#
    )
    .expect("deserialize");

    let person = EntityFactory::new(MapConfig::new()).get::<Person>().unwrap();
    let fragments = QueryProvider::new(ParamStyle::Named)
        .build(&person, &query)
        .unwrap();

    assert_eq!(
        fragments.render(),
        "WHERE age >= #{p1} AND id IN (#{p2}, #{p3}, #{p4}) ORDER BY name ASC LIMIT 20 OFFSET 40"
    );
    assert_eq!(fragments.param_map().len(), 4);
}

#[test]
fn query_round_trips_through_json() {
    let query = StructuredQuery::new().eq("name", "x").limit(1);
    let json = serde_json::to_string(&query).expect("serialize");
    let parsed: StructuredQuery = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(parsed, query);
}
