//! Session domain module.
//!
//! Who is logged in and which credential to present. The types here are
//! plain values; the stateful store lives in the application layer.
//!
//! - `Identity` - backend-defined user record, round-tripped losslessly
//! - `Session` - identity x credential pairing
//! - `SessionSnapshot` / `SessionTicket` - what observers and in-flight
//!   requests see of the store

mod identity;
mod values;

pub use identity::Identity;
pub use values::{Session, SessionPhase, SessionSnapshot, SessionTicket};
