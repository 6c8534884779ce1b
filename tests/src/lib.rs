//! # Token Ledger Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared accounts, ledger builders, log setup
//! └── integration/      # Cross-module scenarios
//!     ├── scenarios.rs  # Mint / transfer / pause / blacklist walkthroughs
//!     ├── settlement.rs # Bank bridge, precompile encoding, deployment records
//!     ├── restrictions.rs # Bank-side hook against a live ledger
//!     └── concurrency.rs  # Parallel callers on one ledger
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ledger-tests
//! cargo test -p ledger-tests integration::settlement::
//! cargo bench -p ledger-tests
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
