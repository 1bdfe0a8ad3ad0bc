// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Update and delete dispatch through a recording executor.

use std::{convert::Infallible, sync::Mutex};

use sqlmeta::{
    DeleteFunction, Entity, EntityFactory, Executor, MapConfig, MissingMetadata, QueryProvider,
    Statement, StructuredQuery, TenantResolver, UpdateFunction, UpdateParam, Value
};

#[derive(Debug, Clone, Entity)]
#[entity(table = "task")]
pub struct Task {
    #[id]
    pub id: i64,

    pub status: String,

    #[tenant]
    #[column(name = "org")]
    pub org: String,

    #[logic_delete]
    pub deleted_at: Option<String>,

    #[updated_by]
    pub updated_by: Option<String>
}

#[derive(Debug, Clone, Entity)]
pub struct Note {
    pub body: String
}

#[derive(Default)]
struct Recorder {
    statements: Mutex<Vec<(String, Vec<Value>)>>
}

impl Recorder {
    fn last(&self) -> (String, Vec<Value>) {
        self.statements.lock().unwrap().last().cloned().unwrap()
    }
}

impl Executor for Recorder {
    type Error = Infallible;

    fn execute(&self, statement: &Statement) -> Result<u64, Self::Error> {
        self.statements
            .lock()
            .unwrap()
            .push((statement.sql().to_owned(), statement.params().to_vec()));
        Ok(1)
    }
}

fn task() -> std::sync::Arc<sqlmeta::Entity> {
    EntityFactory::new(MapConfig::new()).get::<Task>().unwrap()
}

#[test]
fn update_by_identifier() {
    let recorder = Recorder::default();
    let update = UpdateFunction::field(task(), "status").unwrap();

    let param = UpdateParam::from_dynamic(&42_i64).unwrap();
    let affected = update
        .apply(&recorder, &param, Value::from("done"), Some(Value::from("alice")))
        .unwrap();

    assert_eq!(affected, 1);
    let (sql, params) = recorder.last();
    assert_eq!(
        sql,
        "UPDATE task SET status = $1, updated_by = $2 WHERE id = $3 AND deleted_at IS NULL"
    );
    assert_eq!(
        params,
        vec![Value::from("done"), Value::from("alice"), Value::Int(42)]
    );
}

#[test]
fn update_by_query_is_tenant_scoped() {
    let recorder = Recorder::default();
    let update = UpdateFunction::field(task(), "status")
        .unwrap()
        .with_provider(QueryProvider::default().with_tenant(TenantResolver::fixed("acme")));

    let query = StructuredQuery::new().eq("status", "open");
    let param = UpdateParam::from_dynamic(&query).unwrap();
    update
        .apply(&recorder, &param, Value::from("closed"), None)
        .unwrap();

    let (sql, params) = recorder.last();
    assert_eq!(
        sql,
        "UPDATE task SET status = $1 WHERE status = $2 AND deleted_at IS NULL AND org = $3"
    );
    assert_eq!(params[2], Value::from("acme"));
}

#[test]
fn ambiguous_parameter_is_rejected() {
    let err = UpdateParam::from_dynamic(&3.5_f64).unwrap_err();
    assert!(matches!(err, sqlmeta::Error::AmbiguousQueryParam { .. }));
    assert!(err.to_string().contains("f64"));
}

#[test]
fn logic_delete_marks_rows() {
    let recorder = Recorder::default();
    let update = UpdateFunction::logic_delete(task()).unwrap();
    update
        .apply(&recorder, &UpdateParam::Id(Value::Int(7)), Value::Null, None)
        .unwrap();

    let (sql, _) = recorder.last();
    assert_eq!(
        sql,
        "UPDATE task SET deleted_at = CURRENT_TIMESTAMP WHERE id = $1 AND deleted_at IS NULL"
    );
}

#[test]
fn physical_delete() {
    let recorder = Recorder::default();
    let delete = DeleteFunction::new(task())
        .with_provider(QueryProvider::default().with_tenant(TenantResolver::fixed("acme")));
    delete
        .apply(&recorder, &UpdateParam::Id(Value::Int(7)))
        .unwrap();

    let (sql, params) = recorder.last();
    assert_eq!(sql, "DELETE FROM task WHERE id = $1 AND org = $2");
    assert_eq!(params, vec![Value::Int(7), Value::from("acme")]);
}

#[test]
fn identifier_scope_needs_a_primary_key() {
    let note = EntityFactory::new(MapConfig::new()).get::<Note>().unwrap();
    let update = UpdateFunction::field(note, "body").unwrap();
    let err = update
        .statement(&UpdateParam::Id(Value::Int(1)), Value::from("x"), None)
        .unwrap_err();
    assert!(matches!(
        err,
        sqlmeta::Error::MissingMetadata {
            kind: MissingMetadata::PrimaryKey,
            ..
        }
    ));
}

#[test]
fn null_filter_never_reaches_the_executor() {
    let recorder = Recorder::default();
    let note = EntityFactory::new(MapConfig::new()).get::<Note>().unwrap();
    let param = UpdateParam::Query(StructuredQuery::new().eq("body", &None::<String>));

    let err = DeleteFunction::new(note.clone())
        .apply(&recorder, &param)
        .unwrap_err();
    assert!(matches!(err, sqlmeta::Error::UnscopedWrite { .. }));

    let err = UpdateFunction::field(note, "body")
        .unwrap()
        .apply(&recorder, &param, Value::from("x"), None)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "entity `Note`: refusing to write every row, the query has no criteria"
    );
    assert!(recorder.statements.lock().unwrap().is_empty());
}

#[test]
fn logic_delete_needs_a_marker() {
    let note = EntityFactory::new(MapConfig::new()).get::<Note>().unwrap();
    let err = UpdateFunction::logic_delete(note).unwrap_err();
    assert!(err.is_missing_metadata());
}
