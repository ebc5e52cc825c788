//! Atelier Admin library.
//!
//! Back-office for editing the content files the storefront serves: catalog,
//! homepage, about page, and the order book. Every editor loads the current
//! file, applies the submitted changes, validates, and overwrites the file.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
