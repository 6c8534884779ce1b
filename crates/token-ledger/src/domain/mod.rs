//! # Domain Module
//!
//! Core domain types for the token ledger: the store, the guard, the
//! transfer engine and the rules tying them together.

pub mod config;
pub mod deployment;
pub mod engine;
pub mod entities;
pub mod errors;
pub mod events;
pub mod guard;
pub mod invariants;
pub mod services;
pub mod value_objects;

pub use config::*;
pub use deployment::*;
pub use engine::*;
pub use entities::*;
pub use errors::*;
pub use events::*;
pub use guard::*;
pub use invariants::*;
pub use services::*;
pub use value_objects::*;
