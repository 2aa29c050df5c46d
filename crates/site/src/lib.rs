//! YourIntunePartner website library.
//!
//! This crate provides the marketing site, the session store and the
//! authorization gate as a library, allowing them to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::build_router;
