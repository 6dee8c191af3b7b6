//! MediPOS Core - Shared types library.
//!
//! This crate provides common types used across all MediPOS components:
//! - `client` - Backend API client, session store, and POS logic
//! - `cli` - Terminal frontend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money formatting, emails,
//!   and session credentials

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
