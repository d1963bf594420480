pub mod charge_modes;
pub mod invoice_statuses;
