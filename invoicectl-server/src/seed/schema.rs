//! Dashboard schema
//!
//! Statements run in order: customers must exist before invoices can
//! reference them.

use super::SeedStage;

pub const UUID_EXTENSION: &str = r#"CREATE EXTENSION IF NOT EXISTS "uuid-ossp""#;

pub const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL
    )
"#;

pub const CREATE_CUSTOMERS: &str = r#"
    CREATE TABLE IF NOT EXISTS customers (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        image_url VARCHAR(255) NOT NULL
    )
"#;

pub const CREATE_INVOICES: &str = r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id UUID DEFAULT uuid_generate_v4() PRIMARY KEY,
        customer_id UUID NOT NULL REFERENCES customers(id),
        amount INT NOT NULL,
        status VARCHAR(255) NOT NULL CHECK (status IN ('paid', 'pending')),
        date DATE NOT NULL
    )
"#;

pub const CREATE_REVENUE: &str = r#"
    CREATE TABLE IF NOT EXISTS revenue (
        month VARCHAR(4) NOT NULL UNIQUE,
        revenue INT NOT NULL
    )
"#;

/// Table DDL in dependency order.
pub const TABLES: [(SeedStage, &str); 4] = [
    (SeedStage::CreateTable("users"), CREATE_USERS),
    (SeedStage::CreateTable("customers"), CREATE_CUSTOMERS),
    (SeedStage::CreateTable("invoices"), CREATE_INVOICES),
    (SeedStage::CreateTable("revenue"), CREATE_REVENUE),
];
