use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Charge record handed to the issuance service for persistence.
/// `amount_minor` is the final amount after discount; `discount_minor`
/// keeps the deducted share visible on the invoice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsertInvoiceEntity {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub plan_id: Uuid,
    pub amount_minor: i64,
    pub discount_minor: i64,
    pub currency: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub due_at: NaiveDate,
    pub status: String,
}
