use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::billing::BillingContext;
use crate::domain::value_objects::discounts::DiscountSpec;

/// Enrollment record as supplied by the surrounding platform: the plan
/// price, the monthly billing due day and whatever discount the enrollment
/// was created with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrollmentEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub plan_id: Uuid,
    pub monthly_price_minor: i64,
    pub due_day_of_month: u32,
    pub discount: DiscountSpec,
    pub started_at: NaiveDate,
}

impl EnrollmentEntity {
    pub fn billing_context(&self, reference_date: NaiveDate) -> BillingContext {
        BillingContext {
            monthly_price_minor: self.monthly_price_minor,
            due_day_of_month: self.due_day_of_month,
            reference_date,
        }
    }
}
