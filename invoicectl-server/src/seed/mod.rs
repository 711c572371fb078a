//! Database seeding
//!
//! Creates the dashboard tables and inserts fixture rows inside a single
//! transaction. Safe to re-run: DDL uses `IF NOT EXISTS` and every insert
//! is `ON CONFLICT DO NOTHING`. Either every statement of a run commits or
//! none does.

pub mod fixtures;
pub mod schema;

use std::fmt;

use serde::Serialize;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

pub use fixtures::{FixtureCustomer, FixtureError, FixtureInvoice, FixtureUser, Fixtures};

/// bcrypt work factor for fixture passwords
pub const BCRYPT_COST: u32 = 10;

/// Message returned to clients after a successful run
pub const SEED_SUCCESS_MESSAGE: &str = "Database seeded successfully";

/// Advisory lock key held for the duration of a seed transaction, so two
/// concurrent runs don't race on CREATE TABLE.
const SEED_LOCK_KEY: i64 = 0x696e_766f_6963_6573;

/// Rows per INSERT statement; keeps bind parameters well under Postgres' limit.
const INSERT_CHUNK: usize = 1000;

/// Step of the seed procedure, reported on failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStage {
    HashPasswords,
    Begin,
    Lock,
    Extension,
    CreateTable(&'static str),
    Insert(&'static str),
    Commit,
}

impl fmt::Display for SeedStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HashPasswords => f.write_str("hash passwords"),
            Self::Begin => f.write_str("begin transaction"),
            Self::Lock => f.write_str("acquire seed lock"),
            Self::Extension => f.write_str("enable uuid-ossp"),
            Self::CreateTable(table) => write!(f, "create table {table}"),
            Self::Insert(table) => write!(f, "insert {table}"),
            Self::Commit => f.write_str("commit"),
        }
    }
}

/// Lifecycle of a seed run: not-started -> running -> committed | rolled-back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedPhase {
    NotStarted,
    Running,
    Committed,
    RolledBack,
}

impl SeedPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::Running => "running",
            Self::Committed => "committed",
            Self::RolledBack => "rolled-back",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SeedFailure {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A failed seed run. Nothing from the run was committed.
#[derive(Debug, thiserror::Error)]
#[error("seed failed at {stage}: {source}")]
pub struct SeedError {
    pub stage: SeedStage,
    #[source]
    pub source: SeedFailure,
}

trait AtStage<T> {
    fn at(self, stage: SeedStage) -> Result<T, SeedError>;
}

impl<T, E: Into<SeedFailure>> AtStage<T> for Result<T, E> {
    fn at(self, stage: SeedStage) -> Result<T, SeedError> {
        self.map_err(|e| SeedError {
            stage,
            source: e.into(),
        })
    }
}

/// Rows inserted per table by one run. Zero means every fixture row
/// already existed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: u64,
    pub customers: u64,
    pub invoices: u64,
    pub revenue: u64,
}

/// Create the schema and insert `fixtures`, all in one transaction.
pub async fn seed_database(pool: &PgPool, fixtures: &Fixtures) -> Result<SeedReport, SeedError> {
    tracing::info!(phase = SeedPhase::NotStarted.as_str(), "Seeding database");

    // Hashing is CPU-bound; do it before the transaction opens.
    let hashes = hash_passwords(&fixtures.users)
        .await
        .at(SeedStage::HashPasswords)?;

    let mut tx = pool.begin().await.at(SeedStage::Begin)?;
    tracing::debug!(phase = SeedPhase::Running.as_str(), "Seed transaction open");

    match run_steps(&mut tx, fixtures, hashes).await {
        Ok(report) => {
            if let Err(err) = tx.commit().await.at(SeedStage::Commit) {
                tracing::error!(phase = SeedPhase::RolledBack.as_str(), error = %err, "Seed commit failed");
                return Err(err);
            }
            tracing::info!(
                phase = SeedPhase::Committed.as_str(),
                users = report.users,
                customers = report.customers,
                invoices = report.invoices,
                revenue = report.revenue,
                "Database seeded"
            );
            Ok(report)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                // Dropping the connection still aborts the transaction server-side.
                tracing::warn!(error = %rollback_err, "Explicit rollback failed");
            }
            tracing::error!(
                phase = SeedPhase::RolledBack.as_str(),
                stage = %err.stage,
                error = %err.source,
                "Seed rolled back"
            );
            Err(err)
        }
    }
}

async fn run_steps(
    conn: &mut PgConnection,
    fixtures: &Fixtures,
    password_hashes: Vec<String>,
) -> Result<SeedReport, SeedError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SEED_LOCK_KEY)
        .execute(&mut *conn)
        .await
        .at(SeedStage::Lock)?;

    sqlx::query(schema::UUID_EXTENSION)
        .execute(&mut *conn)
        .await
        .at(SeedStage::Extension)?;

    for (stage, ddl) in schema::TABLES {
        sqlx::query(ddl).execute(&mut *conn).await.at(stage)?;
    }

    let users = insert_users(conn, &fixtures.users, password_hashes)
        .await
        .at(SeedStage::Insert("users"))?;
    let customers = insert_customers(conn, &fixtures.customers)
        .await
        .at(SeedStage::Insert("customers"))?;
    let invoices = insert_invoices(conn, &fixtures.invoices)
        .await
        .at(SeedStage::Insert("invoices"))?;
    let revenue = insert_revenue(conn, &fixtures.revenue)
        .await
        .at(SeedStage::Insert("revenue"))?;

    Ok(SeedReport {
        users,
        customers,
        invoices,
        revenue,
    })
}

/// Hash every fixture password on the blocking pool, concurrently.
/// Re-done on every run, even when the user row already exists.
async fn hash_passwords(users: &[FixtureUser]) -> Result<Vec<String>, SeedFailure> {
    futures::future::try_join_all(users.iter().map(|user| {
        let password = user.password.clone();
        async move {
            let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST)).await??;
            Ok::<_, SeedFailure>(hashed)
        }
    }))
    .await
}

async fn insert_users(
    conn: &mut PgConnection,
    users: &[FixtureUser],
    password_hashes: Vec<String>,
) -> Result<u64, sqlx::Error> {
    let rows: Vec<_> = users.iter().zip(password_hashes).collect();
    let mut inserted = 0;
    for chunk in rows.chunks(INSERT_CHUNK) {
        let mut qb = QueryBuilder::<Postgres>::new("INSERT INTO users (id, name, email, password) ");
        qb.push_values(chunk, |mut b, (user, hash)| {
            b.push_bind(user.id)
                .push_bind(user.name.as_str())
                .push_bind(user.email.as_str())
                .push_bind(hash.as_str());
        });
        qb.push(" ON CONFLICT (id) DO NOTHING");
        inserted += qb.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(inserted)
}

async fn insert_customers(
    conn: &mut PgConnection,
    customers: &[FixtureCustomer],
) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for chunk in customers.chunks(INSERT_CHUNK) {
        let mut qb = QueryBuilder::<Postgres>::new("INSERT INTO customers (id, name, email, image_url) ");
        qb.push_values(chunk, |mut b, customer| {
            b.push_bind(customer.id)
                .push_bind(customer.name.as_str())
                .push_bind(customer.email.as_str())
                .push_bind(customer.image_url.as_str());
        });
        qb.push(" ON CONFLICT (id) DO NOTHING");
        inserted += qb.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(inserted)
}

async fn insert_invoices(
    conn: &mut PgConnection,
    invoices: &[FixtureInvoice],
) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for chunk in invoices.chunks(INSERT_CHUNK) {
        let mut qb =
            QueryBuilder::<Postgres>::new("INSERT INTO invoices (id, customer_id, amount, status, date) ");
        qb.push_values(chunk, |mut b, invoice| {
            b.push_bind(invoice.id())
                .push_bind(invoice.customer_id)
                .push_bind(invoice.amount)
                .push_bind(invoice.status.as_str())
                .push_bind(invoice.date);
        });
        qb.push(" ON CONFLICT (id) DO NOTHING");
        inserted += qb.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(inserted)
}

async fn insert_revenue(
    conn: &mut PgConnection,
    revenue: &[crate::models::Revenue],
) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;
    for chunk in revenue.chunks(INSERT_CHUNK) {
        let mut qb = QueryBuilder::<Postgres>::new("INSERT INTO revenue (month, revenue) ");
        qb.push_values(chunk, |mut b, row| {
            b.push_bind(row.month.as_str()).push_bind(row.revenue);
        });
        qb.push(" ON CONFLICT (month) DO NOTHING");
        inserted += qb.build().execute(&mut *conn).await?.rows_affected();
    }
    Ok(inserted)
}
