// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Photo contest client: authenticated access to the contest API.
//!
//! This crate provides the HTTP client with transparent token refresh, the
//! token store it shares with the auth session, typed request builders for
//! every resource, and calendar derivation for contest schedules.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod time_utils;
pub mod transport;

pub use error::{ClientError, Result};
pub use services::{ApiClient, AuthSession};
