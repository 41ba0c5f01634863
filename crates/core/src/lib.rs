//! Deepvault Core - Shared types library.
//!
//! This crate provides the common types used by the Deepvault storefront:
//! - type-safe IDs
//! - decimal prices with display formatting
//! - the cart state container
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no session
//! handling. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
