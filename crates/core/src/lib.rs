//! Core bookkeeping logic for Cartera.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Movement kinds, account classification, balance effects and summary
//! aggregates live here.
//!
//! # Modules
//!
//! - `ledger` - Movements, postings and running balances

pub mod ledger;
