//! First-invoice billing core for the arena management platform: proration
//! over a 30-day commercial month, discount application, and the invoice
//! issuance boundary the surrounding backend implements.

pub mod domain;
pub mod usecases;
