//! GoMarket Core - Shared types library.
//!
//! This crate provides common types used across all GoMarket components:
//! - `cart` - Client-side cart state management and persistence
//! - `integration-tests` - Cross-crate scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus the
//!   cart line item

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
