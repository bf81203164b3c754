// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request builders for each API resource.
//!
//! These are thin: fixed paths and parameters, no logic of their own. All
//! auth handling happens in the client they borrow.

pub mod auth;
pub mod categories;
pub mod contests;
pub mod criteria;
pub mod entries;
pub mod scores;
pub mod users;
pub mod votes;

pub use auth::{AuthApi, LoginResponse};
pub use categories::CategoriesApi;
pub use contests::{ContestsApi, JudgeChangeResponse};
pub use criteria::CriteriaApi;
pub use entries::{EntriesApi, EntryOrdering, EntryQuery};
pub use scores::{ScoreQuery, ScoresApi};
pub use users::UsersApi;
pub use votes::{VoteQuery, VotesApi};

use std::borrow::Cow;

/// Percent-encode a single path segment (slug, UUID).
pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
