use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChargeMode {
    Full,
    Prorated,
}

impl ChargeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeMode::Full => "full",
            ChargeMode::Prorated => "prorated",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "full" => Some(ChargeMode::Full),
            "prorated" => Some(ChargeMode::Prorated),
            _ => None,
        }
    }
}

impl Display for ChargeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
