// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware wrapping outgoing API calls.

pub mod auth;

pub use auth::{send_authenticated, HomeRedirect, LogNavigator, Navigator, SessionObserver};
