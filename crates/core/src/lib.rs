//! YourIntunePartner Core - Shared types library.
//!
//! This crate provides common types used across the website components:
//! - `site` - Public marketing site with the gated dashboard
//! - `integration-tests` - In-process HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no session storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, roles and opaque session identifiers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
