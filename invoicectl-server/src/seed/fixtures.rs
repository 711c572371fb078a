//! Seed fixture data
//!
//! The bundled placeholder data is compiled into the binary; a different
//! set can be loaded from a JSON file with the same shape.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{InvoiceStatus, Revenue};

const PLACEHOLDER_DATA: &str = include_str!("../../fixtures/placeholder-data.json");

/// Namespace for fixture invoice ids derived with UUID v5
const INVOICE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2b1e_8a4d_4c3b_9e57_1d2a_3b4c_5d6e);

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("failed to read fixtures {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid fixture data: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Plain text; hashed before insertion
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCustomer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureInvoice {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl FixtureInvoice {
    /// Explicit id, or one derived from the invoice contents so that
    /// re-seeding the same fixture hits the primary key conflict.
    pub fn id(&self) -> Uuid {
        self.id.unwrap_or_else(|| {
            let key = format!(
                "{}|{}|{}|{}",
                self.customer_id, self.amount, self.status, self.date
            );
            Uuid::new_v5(&INVOICE_ID_NAMESPACE, key.as_bytes())
        })
    }
}

/// Rows used to populate a fresh database
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub users: Vec<FixtureUser>,
    #[serde(default)]
    pub customers: Vec<FixtureCustomer>,
    #[serde(default)]
    pub invoices: Vec<FixtureInvoice>,
    #[serde(default)]
    pub revenue: Vec<Revenue>,
}

impl Fixtures {
    /// The bundled demo data set.
    pub fn placeholder() -> Result<Self, FixtureError> {
        Self::from_json(PLACEHOLDER_DATA)
    }

    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let content = fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn placeholder_data_parses() {
        let fixtures = Fixtures::placeholder().unwrap();
        assert_eq!(fixtures.users.len(), 1);
        assert_eq!(fixtures.customers.len(), 6);
        assert_eq!(fixtures.invoices.len(), 13);
        assert_eq!(fixtures.revenue.len(), 12);
    }

    #[test]
    fn placeholder_invoices_reference_known_customers() {
        let fixtures = Fixtures::placeholder().unwrap();
        let customers: HashSet<Uuid> = fixtures.customers.iter().map(|c| c.id).collect();
        assert!(fixtures
            .invoices
            .iter()
            .all(|i| customers.contains(&i.customer_id)));
    }

    #[test]
    fn placeholder_months_fit_the_column() {
        let fixtures = Fixtures::placeholder().unwrap();
        assert!(fixtures.revenue.iter().all(|r| r.month.len() <= 4));
    }

    #[test]
    fn derived_invoice_ids_are_stable_and_distinct() {
        let fixtures = Fixtures::placeholder().unwrap();
        let ids: HashSet<Uuid> = fixtures.invoices.iter().map(FixtureInvoice::id).collect();
        assert_eq!(ids.len(), fixtures.invoices.len());

        let again = Fixtures::placeholder().unwrap();
        assert_eq!(fixtures.invoices[0].id(), again.invoices[0].id());
    }

    #[test]
    fn explicit_invoice_id_wins() {
        let id = Uuid::new_v4();
        let invoice = FixtureInvoice {
            id: Some(id),
            customer_id: Uuid::new_v4(),
            amount: 100,
            status: InvoiceStatus::Paid,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(invoice.id(), id);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let fixtures = Fixtures::from_json(r#"{"revenue": [{"month": "Jan", "revenue": 200}]}"#).unwrap();
        assert!(fixtures.users.is_empty());
        assert_eq!(fixtures.revenue[0].revenue, 200);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"{"invoices": [{"customer_id": "d6e15727-9fe1-4961-8c5b-ea44a9bd81aa",
            "amount": 1, "status": "overdue", "date": "2023-01-01"}]}"#;
        assert!(matches!(Fixtures::from_json(json), Err(FixtureError::Parse(_))));
    }
}
