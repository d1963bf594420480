use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Currency code stamped on issued invoices.
pub const DEFAULT_CURRENCY: &str = "BRL";

/// Inputs anchoring one charge computation. Amounts are integer minor
/// currency units (centavos); `reference_date` is the only notion of "today"
/// the calculator ever sees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingContext {
    pub monthly_price_minor: i64,
    pub due_day_of_month: u32,
    pub reference_date: NaiveDate,
}

/// Outcome of one charge computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChargeResult {
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub gross_amount_minor: i64,
    pub discount_applied_minor: i64,
    pub final_amount_minor: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FirstInvoiceDto {
    pub invoice_id: Uuid,
    pub due_date: NaiveDate,
    pub days_until_due: i64,
    pub gross_amount_minor: i64,
    pub discount_applied_minor: i64,
    pub final_amount_minor: i64,
}

impl FirstInvoiceDto {
    pub fn from_charge(invoice_id: Uuid, charge: ChargeResult) -> Self {
        Self {
            invoice_id,
            due_date: charge.due_date,
            days_until_due: charge.days_until_due,
            gross_amount_minor: charge.gross_amount_minor,
            discount_applied_minor: charge.discount_applied_minor,
            final_amount_minor: charge.final_amount_minor,
        }
    }
}
