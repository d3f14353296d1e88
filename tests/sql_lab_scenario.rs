use std::sync::Arc;

use design_patterns_lab::sql::{DatabaseHandle, Record, SqlCommand, Value};
use design_patterns_lab::{Command, CommandQueue};
use tempfile::NamedTempFile;

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

#[test]
fn test_full_users_scenario_on_disk() {
    let file = NamedTempFile::new().unwrap();
    let db = Arc::new(DatabaseHandle::open(file.path()).unwrap());
    let mut invoker = CommandQueue::new();

    SqlCommand::drop_table_if_exists(&db, "users").execute().unwrap();
    SqlCommand::create_table(
        &db,
        "users",
        [("id", "INTEGER PRIMARY KEY"), ("name", "TEXT")],
    )
    .execute()
    .unwrap();

    invoker.enqueue(SqlCommand::insert(
        &db,
        "users",
        vec![
            Record::new().with("name", "Md Maniruzzaman"),
            Record::new().with("name", "Atik"),
            Record::new().with("name", "Suman"),
        ],
    ));
    invoker.enqueue(SqlCommand::select(&db, "users", ""));
    let outputs = invoker.run().unwrap();
    assert_eq!(outputs[1].len(), 3);

    invoker.enqueue(SqlCommand::update(
        &db,
        "users",
        vec![Record::new().with("name", "Suman Das")],
        "name = 'Suman'",
    ));
    invoker.enqueue(SqlCommand::delete(&db, "users", "name = 'Atik'"));
    invoker.enqueue(SqlCommand::select(&db, "users", ""));
    let outputs = invoker.run().unwrap();
    assert!(invoker.is_empty());

    assert_eq!(
        outputs[2],
        vec![
            vec![Value::Integer(1), text("Md Maniruzzaman")],
            vec![Value::Integer(3), text("Suman Das")],
        ]
    );

    let before = db.statements_executed();
    invoker.run().unwrap();
    assert_eq!(db.statements_executed(), before);

    db.close().unwrap();

    // State persisted to the file survives the handle.
    let reopened = DatabaseHandle::open(file.path()).unwrap();
    let rows = reopened
        .execute("SELECT name FROM users WHERE id = ?", &[Value::Integer(3)])
        .unwrap();
    assert_eq!(rows, vec![vec![text("Suman Das")]]);
}

#[test]
fn test_handle_shared_across_threads() {
    let db = Arc::new(DatabaseHandle::open_in_memory().unwrap());
    SqlCommand::create_table(&db, "hits", [("n", "INTEGER")])
        .execute()
        .unwrap();

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let db = Arc::clone(&db);
            std::thread::spawn(move || {
                SqlCommand::insert(&db, "hits", vec![Record::new().with("n", i)])
                    .execute()
                    .unwrap();
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let rows = db.execute("SELECT COUNT(*) FROM hits", &[]).unwrap();
    assert_eq!(rows, vec![vec![Value::Integer(4)]]);
}
