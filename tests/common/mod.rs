//! Shared test support.

pub mod fake_confluence;
pub mod fixtures;
