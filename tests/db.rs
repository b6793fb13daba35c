mod common;

use diesel::RunQueryDsl;
use diesel::sql_types::Integer;

#[derive(diesel::QueryableByName)]
struct Pragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[test]
fn test_pool_hands_out_migrated_connections() {
    let test_db = common::TestDb::new("test_pool_connection.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced_on_every_connection() {
    let test_db = common::TestDb::new("test_foreign_keys.db");
    let pool = test_db.pool();

    // Hold one connection so the pool hands out a fresh one.
    let _first = pool.get().unwrap();
    let mut second = pool.get().unwrap();

    let pragma = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<Pragma>(&mut second)
        .unwrap();
    assert_eq!(pragma.foreign_keys, 1);
}
