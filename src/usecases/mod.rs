pub mod first_invoice;
