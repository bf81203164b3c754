// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - client logic on top of the transport.

pub mod api_client;
pub mod auth;
pub mod calendar;

pub use api_client::ApiClient;
pub use auth::{AuthSession, AuthSnapshot, AuthState, AuthStatus};
pub use calendar::{derive_events, CalendarEvent, CalendarEventKind};
