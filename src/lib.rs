// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! WebFinger Server - RFC 7033 discovery for `acct:` identifiers
//!
//! This crate answers WebFinger queries with JSON Resource Descriptors built
//! from a read-only author data file, and can render the sole author's
//! descriptor as a static `.well-known/webfinger` file.
//!
//! ## Modules
//!
//! - `webfinger` - Protocol core (acct URIs, query decoding, JRD sanitization, resolution)
//! - `api` - HTTP API handlers (Axum)
//! - `store` - Read-only author data
//! - `config` - Site configuration and environment
//! - `generator` - Static `.well-known/webfinger` file

pub mod api;
pub mod config;
pub mod error;
pub mod generator;
pub mod state;
pub mod store;
pub mod webfinger;
