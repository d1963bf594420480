use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Canceled,
}

impl Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Canceled => "canceled",
        };
        write!(f, "{}", status)
    }
}

impl InvoiceStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "paid" => InvoiceStatus::Paid,
            "canceled" => InvoiceStatus::Canceled,
            _ => InvoiceStatus::Pending,
        }
    }
}
