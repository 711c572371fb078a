//! Seed procedure against a real database.
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p invoicectl-server -- --ignored

use chrono::NaiveDate;
use invoicectl_server::models::InvoiceStatus;
use invoicectl_server::seed::{seed_database, FixtureInvoice, Fixtures, SeedStage};
use sqlx::PgPool;
use uuid::Uuid;

async fn row_counts(pool: &PgPool) -> (i64, i64, i64, i64) {
    sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(*) FROM users),
            (SELECT COUNT(*) FROM customers),
            (SELECT COUNT(*) FROM invoices),
            (SELECT COUNT(*) FROM revenue)
        "#,
    )
    .fetch_one(pool)
    .await
    .expect("count query failed")
}

async fn table_exists(pool: &PgPool, table: &str) -> bool {
    sqlx::query_scalar::<_, bool>("SELECT to_regclass($1) IS NOT NULL")
        .bind(format!("public.{table}"))
        .fetch_one(pool)
        .await
        .expect("regclass query failed")
}

#[sqlx::test]
#[ignore = "requires database"]
async fn seeding_twice_leaves_row_counts_unchanged(pool: PgPool) {
    let fixtures = Fixtures::placeholder().unwrap();

    let first = seed_database(&pool, &fixtures).await.expect("first seed failed");
    assert_eq!(
        (first.users, first.customers, first.invoices, first.revenue),
        (1, 6, 13, 12)
    );
    let after_first = row_counts(&pool).await;

    let second = seed_database(&pool, &fixtures).await.expect("second seed failed");
    assert_eq!(
        (second.users, second.customers, second.invoices, second.revenue),
        (0, 0, 0, 0)
    );
    assert_eq!(row_counts(&pool).await, after_first);
    assert_eq!(after_first, (1, 6, 13, 12));
}

#[sqlx::test]
#[ignore = "requires database"]
async fn passwords_are_stored_as_bcrypt_hashes(pool: PgPool) {
    let fixtures = Fixtures::placeholder().unwrap();
    seed_database(&pool, &fixtures).await.unwrap();

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE email = $1")
        .bind("user@nextmail.com")
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_ne!(stored, "123456");
    assert!(bcrypt::verify("123456", &stored).unwrap());
}

#[sqlx::test]
#[ignore = "requires database"]
async fn failed_insert_rolls_back_the_whole_run(pool: PgPool) {
    let mut fixtures = Fixtures::placeholder().unwrap();
    fixtures.invoices.push(FixtureInvoice {
        id: None,
        customer_id: Uuid::new_v4(),
        amount: 100,
        status: InvoiceStatus::Paid,
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    });

    let err = seed_database(&pool, &fixtures).await.unwrap_err();
    assert_eq!(err.stage, SeedStage::Insert("invoices"));

    for table in ["users", "customers", "invoices", "revenue"] {
        assert!(!table_exists(&pool, table).await, "{table} survived rollback");
    }
}

#[sqlx::test]
#[ignore = "requires database"]
async fn rollback_keeps_rows_from_earlier_runs(pool: PgPool) {
    let fixtures = Fixtures::placeholder().unwrap();
    seed_database(&pool, &fixtures).await.unwrap();
    let before = row_counts(&pool).await;

    let mut broken = Fixtures::placeholder().unwrap();
    broken.revenue.push(invoicectl_server::models::Revenue {
        month: "Jan".into(),
        revenue: 1,
    });
    broken.revenue.push(invoicectl_server::models::Revenue {
        month: "Smarch".into(),
        revenue: 1,
    });
    broken.customers.push(invoicectl_server::seed::FixtureCustomer {
        id: Uuid::new_v4(),
        name: "New Customer".into(),
        email: "new@customer.com".into(),
        image_url: "/customers/new.png".into(),
    });

    let err = seed_database(&pool, &broken).await.unwrap_err();
    assert_eq!(err.stage, SeedStage::Insert("revenue"));
    assert_eq!(row_counts(&pool).await, before);
}
