// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the contest API.

pub mod contest;
pub mod entry;
pub mod form;
pub mod judging;
pub mod listing;
pub mod user;

pub use contest::{
    Contest, ContestPhase, ContestStatistics, DailyEntryCount, JudgeSummary, JudgingType,
};
pub use entry::{ContestRef, Entry, EntryImage, Flag};
pub use form::{ContestForm, EntryForm, FormPart, ImageUpload, MultipartForm, ProfileForm};
pub use judging::{
    Category, CreateCategoryRequest, CreateJudgeScoreRequest, CreateJudgingCriteriaRequest,
    CreateVoteRequest, DetailedScore, DetailedScoreInput, JudgeScore, JudgingCriteria, Vote,
};
pub use listing::{Listing, Page};
pub use user::{SocialAccount, User};
