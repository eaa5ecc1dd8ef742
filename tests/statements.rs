//! End-to-end statement scenarios across the built-in dialects.

use pretty_assertions::assert_eq;

use sqlforge::ast::col;
use sqlforge::convert::SqlValue;
use sqlforge::dialect::{PostgresDialect, SqliteDialect, registry};
use sqlforge::schema::{ColumnDefinition, TableDefinition, TypeTag};
use sqlforge::transpiler::{
    DeleteStatement, InsertStatement, ParamSql, SelectStatement, UpdateStatement,
    build_create_table, build_drop_table, translate,
};

fn users() -> TableDefinition {
    TableDefinition::new("users")
        .column(ColumnDefinition::new("id", TypeTag::Int).auto_increment())
        .column(ColumnDefinition::new("email", TypeTag::Text).not_null())
        .column(ColumnDefinition::new("age", TypeTag::Int))
}

/// Count placeholders in the emitted text, so every test can assert the
/// cardinality invariant directly.
fn placeholder_count(stmt: &ParamSql) -> usize {
    let question_marks = stmt.text.matches('?').count();
    if question_marks > 0 {
        return question_marks;
    }
    stmt.text.matches('$').count()
}

fn assert_cardinality(stmt: &ParamSql) {
    assert_eq!(placeholder_count(stmt), stmt.params.len());
}

#[test]
fn test_create_table_scenario() {
    let ddl = build_create_table(&users(), &SqliteDialect::new());
    assert_eq!(
        ddl.text,
        "CREATE TABLE \"users\" (\
         \"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \
         \"email\" TEXT NOT NULL, \
         \"age\" INTEGER)"
    );

    // Ordering: table name, then the identity column, then email.
    let table_at = ddl.text.find("\"users\"").unwrap();
    let id_at = ddl.text.find("\"id\"").unwrap();
    let email_at = ddl.text.find("\"email\"").unwrap();
    assert!(table_at < id_at && id_at < email_at);
    assert_cardinality(&ddl);
}

#[test]
fn test_insert_scenario_skips_identity() {
    let table = users();
    let stmt = InsertStatement::new(&table)
        .value("email", "a@example.com")
        .build(&SqliteDialect::new())
        .unwrap();

    assert_eq!(stmt.text, "INSERT INTO \"users\" (\"email\") VALUES (?)");
    assert_eq!(stmt.params, vec![SqlValue::Text("a@example.com".into())]);
    assert!(!stmt.text.contains("\"id\""));
    assert_cardinality(&stmt);
}

#[test]
fn test_select_scenario_single_placeholder() {
    let table = users();
    let stmt = SelectStatement::new(&table)
        .filter(col("email").eq("a@example.com"))
        .build(&PostgresDialect::new())
        .unwrap();

    assert_eq!(
        stmt.text,
        "SELECT \"id\", \"email\", \"age\" FROM \"users\" WHERE \"email\" = $1"
    );
    assert_eq!(stmt.params, vec![SqlValue::Text("a@example.com".into())]);
    assert_cardinality(&stmt);
}

#[test]
fn test_in_scenario_three_placeholders_in_order() {
    let table = users();
    let stmt = SelectStatement::new(&table)
        .filter(col("age").in_list([1, 2, 3]))
        .build(&PostgresDialect::new())
        .unwrap();

    assert!(stmt.text.ends_with("WHERE \"age\" IN ($1, $2, $3)"));
    assert_eq!(
        stmt.params,
        vec![
            SqlValue::Integer(1),
            SqlValue::Integer(2),
            SqlValue::Integer(3)
        ]
    );
    assert_cardinality(&stmt);
}

#[test]
fn test_full_crud_round_on_one_table() {
    let table = users();
    let dialect = SqliteDialect::new();

    let create = build_create_table(&table, &dialect);
    assert_cardinality(&create);

    let insert = InsertStatement::new(&table)
        .value("email", "a@example.com")
        .value("age", 30)
        .build(&dialect)
        .unwrap();
    assert_eq!(
        insert.text,
        "INSERT INTO \"users\" (\"email\", \"age\") VALUES (?, ?)"
    );
    assert_cardinality(&insert);

    let update = UpdateStatement::new(&table)
        .set("age", 31)
        .filter(col("email").eq("a@example.com"))
        .build(&dialect)
        .unwrap();
    assert_eq!(
        update.text,
        "UPDATE \"users\" SET \"age\" = ? WHERE \"email\" = ?"
    );
    assert_eq!(
        update.params,
        vec![
            SqlValue::Integer(31),
            SqlValue::Text("a@example.com".into())
        ]
    );
    assert_cardinality(&update);

    let delete = DeleteStatement::new(&table)
        .filter(col("age").lt(18))
        .build(&dialect)
        .unwrap();
    assert_eq!(delete.text, "DELETE FROM \"users\" WHERE \"age\" < ?");
    assert_cardinality(&delete);

    let drop = build_drop_table(&table.name, &dialect);
    assert_eq!(drop.text, "DROP TABLE \"users\"");
}

#[test]
fn test_null_and_empty_in_edges_have_zero_params() {
    let dialect = PostgresDialect::new();

    let null_eq = translate(&dialect, &col("deleted_at").eq(sqlforge::Value::Null)).unwrap();
    assert_eq!(null_eq.text, "\"deleted_at\" IS NULL");
    assert!(null_eq.params.is_empty());

    let empty_in = translate(&dialect, &col("id").in_list(Vec::<i64>::new())).unwrap();
    assert_eq!(empty_in.text, "1 = 0");
    assert!(empty_in.params.is_empty());
}

#[test]
fn test_registry_driven_translation() {
    registry::install_defaults();

    let dialect = registry::lookup("mysql").unwrap();
    let table = users();
    let stmt = SelectStatement::new(&table)
        .columns(["email"])
        .filter(col("age").gte(21))
        .build(dialect.as_ref())
        .unwrap();

    assert_eq!(
        stmt.text,
        "SELECT `email` FROM `users` WHERE `age` >= ?"
    );
    assert_cardinality(&stmt);

    assert!(registry::lookup("oracle").is_err());
}

#[test]
fn test_hostile_identifiers_stay_quoted() {
    // A table name trying to break out of its quotes stays inert.
    let table = TableDefinition::new("users\"; DROP TABLE students; --")
        .column(ColumnDefinition::new("id", TypeTag::Int).primary_key());

    let stmt = SelectStatement::new(&table)
        .build(&PostgresDialect::new())
        .unwrap();
    assert_eq!(
        stmt.text,
        "SELECT \"id\" FROM \"users\"\"; DROP TABLE students; --\""
    );

    // Hostile values never reach the text at all.
    let probe = translate(
        &PostgresDialect::new(),
        &col("name").eq("'; DROP TABLE users; --"),
    )
    .unwrap();
    assert_eq!(probe.text, "\"name\" = $1");
    assert_eq!(
        probe.params,
        vec![SqlValue::Text("'; DROP TABLE users; --".into())]
    );
}
