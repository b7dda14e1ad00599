//! Membership handlers.
//!
//! ## Commands
//! - Subscribing to the paid tier through the currency's gateway

mod process_payment;

pub use process_payment::{PaymentError, ProcessPaymentCommand, ProcessPaymentHandler};
