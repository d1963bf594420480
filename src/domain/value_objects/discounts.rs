use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Discount attached to an enrollment. At most one kind applies.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    #[default]
    None,
    Fixed {
        amount_minor: i64,
    },
    Percentage {
        percent: f64,
    },
}

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DiscountSpec {
    pub kind: DiscountKind,
    pub valid_until: Option<NaiveDate>,
}

impl DiscountSpec {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn fixed(amount_minor: i64) -> Self {
        Self {
            kind: DiscountKind::Fixed { amount_minor },
            valid_until: None,
        }
    }

    pub fn percentage(percent: f64) -> Self {
        Self {
            kind: DiscountKind::Percentage { percent },
            valid_until: None,
        }
    }

    pub fn with_valid_until(mut self, valid_until: NaiveDate) -> Self {
        self.valid_until = Some(valid_until);
        self
    }

    /// A discount past its `valid_until` no longer applies. The expiry day
    /// itself still counts as valid.
    pub fn is_expired(&self, reference_date: NaiveDate) -> bool {
        self.valid_until
            .is_some_and(|valid_until| reference_date > valid_until)
    }
}
