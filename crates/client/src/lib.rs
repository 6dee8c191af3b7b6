//! MediPOS client library.
//!
//! Everything the terminal frontend needs to drive the medical-store backend:
//!
//! - [`api`] - Typed REST client for the backend (`/login`, `/products`,
//!   `/sales`, `/dashboard`, ...)
//! - [`session`] - On-disk session store and the per-view auth gate
//! - [`auth`] - Login, registration, and logout flows
//! - [`inventory`] - Stock CRUD plus the client-side search/expiry filter
//! - [`pos`] - Cart engine, checkout, and invoice generation
//! - [`dashboard`] / [`sales`] - Read-only report views
//! - [`error`] - [`AppError`], the frontend-boundary aggregate
//!
//! # Architecture
//!
//! The backend owns all business truth (stock, pricing, tax authority, token
//! issuance). This crate is presentation-side orchestration: it fetches, it
//! validates user input before the network, and it re-fetches after every
//! mutation instead of merging incrementally. The session credential is
//! passed explicitly into each data-access call; [`session::SessionStore`]
//! is the single place tokens are issued and cleared.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod inventory;
pub mod pos;
pub mod sales;
pub mod session;

pub use config::{ClientConfig, ConfigError};
pub use error::AppError;
