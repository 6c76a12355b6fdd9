//! Common types used across the application.

pub mod money;

pub use money::{format_money, from_minor, round_money, to_minor};
