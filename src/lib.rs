//! PRISM - Decision Intelligence Client
//!
//! This crate implements the client side of the PRISM product: a persisted
//! session store, a shell gated on it, and the feature flows (decision
//! analysis, history, chart research and pricing) that talk to the backend.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod presentation;
