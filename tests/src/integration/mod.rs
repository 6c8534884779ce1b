//! Cross-module integration scenarios.

pub mod concurrency;
pub mod restrictions;
pub mod settlement;
