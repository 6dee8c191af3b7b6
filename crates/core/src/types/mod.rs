//! Core types for MediPOS.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod money;

pub use credential::{SessionCredential, SessionToken, UserProfile};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::format_inr;
