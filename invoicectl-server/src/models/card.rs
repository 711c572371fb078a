//! Summary card and overview view models

use serde::Serialize;

use super::{format_currency, LatestInvoice, Revenue};

/// Figures shown on the dashboard summary cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardData {
    pub number_of_customers: i64,
    pub number_of_invoices: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}

impl CardData {
    /// Build card data from raw aggregates. Missing counts and sums
    /// (NULL from the database) are treated as zero.
    pub fn from_aggregates(
        invoice_count: Option<i64>,
        customer_count: Option<i64>,
        paid_cents: Option<i64>,
        pending_cents: Option<i64>,
    ) -> Self {
        Self {
            number_of_customers: customer_count.unwrap_or(0),
            number_of_invoices: invoice_count.unwrap_or(0),
            total_paid_invoices: format_currency(paid_cents.unwrap_or(0)),
            total_pending_invoices: format_currency(pending_cents.unwrap_or(0)),
        }
    }
}

/// Everything the dashboard landing page shows.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub revenue: Vec<Revenue>,
    pub latest_invoices: Vec<LatestInvoice>,
    pub cards: CardData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_default_to_zero() {
        let cards = CardData::from_aggregates(None, None, None, None);
        assert_eq!(cards.number_of_invoices, 0);
        assert_eq!(cards.number_of_customers, 0);
        assert_eq!(cards.total_paid_invoices, "$0.00");
        assert_eq!(cards.total_pending_invoices, "$0.00");
    }

    #[test]
    fn sums_are_formatted() {
        let cards = CardData::from_aggregates(Some(13), Some(6), Some(102_281), Some(129_112));
        assert_eq!(cards.number_of_invoices, 13);
        assert_eq!(cards.number_of_customers, 6);
        assert_eq!(cards.total_paid_invoices, "$1,022.81");
        assert_eq!(cards.total_pending_invoices, "$1,291.12");
    }
}
