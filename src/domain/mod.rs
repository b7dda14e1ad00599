//! Domain layer containing client-side business types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (credential, ids, timestamps, errors, state machine)
//! - `session` - Identity and session values published by the session store
//! - `shell` - Gating states and tabs of the application shell
//! - `membership` - Subscription tiers, pricing plans and payments
//! - `decision` - Decision submissions, analysis reports and history
//! - `research` - Chart uploads and vision analysis

pub mod decision;
pub mod foundation;
pub mod membership;
pub mod research;
pub mod session;
pub mod shell;
