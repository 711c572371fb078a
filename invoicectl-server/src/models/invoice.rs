//! Invoice view models

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// Maximum search query length
const MAX_QUERY_LEN: usize = 256;

/// Invoice payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Paid,
    Pending,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(Self::Paid),
            "pending" => Ok(Self::Pending),
            other => Err(ValidationError::InvalidVariant {
                field: "status",
                value: other.to_owned(),
            }),
        }
    }
}

/// A row of the "latest invoices" panel. `amount` is the cents value as a
/// string (`"44800"`); formatting is left to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestInvoice {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub email: String,
    pub amount: String,
}

/// A row of the searchable invoice table. `amount` is in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceTableRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub date: NaiveDate,
    pub amount: i32,
    pub status: InvoiceStatus,
}

/// Validated free-text invoice search term.
///
/// Matching is a case-insensitive substring match, so `%` and `_` in the
/// input are escaped and matched literally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        if raw.chars().count() > MAX_QUERY_LEN {
            return Err(ValidationError::TooLong {
                field: "query",
                max: MAX_QUERY_LEN,
            });
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ILIKE pattern: `%term%` with LIKE metacharacters escaped.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        assert_eq!("paid".parse::<InvoiceStatus>().unwrap(), InvoiceStatus::Paid);
        assert_eq!(InvoiceStatus::Pending.to_string(), "pending");
        assert!(matches!(
            "overdue".parse::<InvoiceStatus>(),
            Err(ValidationError::InvalidVariant { field: "status", .. })
        ));
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&InvoiceStatus::Paid).unwrap();
        assert_eq!(json, "\"paid\"");
    }

    #[test]
    fn empty_query_matches_everything() {
        let q = SearchQuery::new("").unwrap();
        assert_eq!(q.like_pattern(), "%%");
    }

    #[test]
    fn like_metacharacters_are_escaped() {
        let q = SearchQuery::new("50%_off\\").unwrap();
        assert_eq!(q.like_pattern(), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn rejects_overlong_query() {
        let long = "a".repeat(MAX_QUERY_LEN + 1);
        assert!(matches!(
            SearchQuery::new(&long),
            Err(ValidationError::TooLong { field: "query", .. })
        ));
        assert!(SearchQuery::new(&"a".repeat(MAX_QUERY_LEN)).is_ok());
    }
}
