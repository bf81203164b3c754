// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Multipart form bodies for uploads.
//!
//! Parts are kept as owned data rather than as a `reqwest` form so that a
//! request can be rebuilt and sent again after a token refresh.

use super::contest::JudgingType;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};

/// One field of a multipart body.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// Ordered list of multipart fields. Repeated names are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push(FormPart::Text {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, mime: &str, bytes: Vec<u8>) -> Self {
        self.parts.push(FormPart::File {
            name: name.to_string(),
            file_name: file_name.to_string(),
            mime: mime.to_string(),
            bytes,
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Value of the first text field called `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Build a fresh `reqwest` form from the stored parts.
    pub fn to_reqwest(&self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut form = reqwest::multipart::Form::new();
        for part in &self.parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name.clone(), value.clone()),
                FormPart::File {
                    name,
                    file_name,
                    mime,
                    bytes,
                } => {
                    let file = reqwest::multipart::Part::bytes(bytes.clone())
                        .file_name(file_name.clone())
                        .mime_str(mime)?;
                    form.part(name.clone(), file)
                }
            };
        }
        Ok(form)
    }
}

/// An image file to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Guess the MIME type from the file extension.
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        let lower = file_name.to_ascii_lowercase();
        let mime = if lower.ends_with(".png") {
            "image/png"
        } else if lower.ends_with(".webp") {
            "image/webp"
        } else if lower.ends_with(".gif") {
            "image/gif"
        } else {
            "image/jpeg"
        };
        Self {
            file_name: file_name.to_string(),
            mime: mime.to_string(),
            bytes,
        }
    }
}

/// Fields for creating or updating a contest. Unset fields are not sent,
/// which makes the same form usable for `PATCH`.
#[derive(Debug, Clone, Default)]
pub struct ContestForm {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub voting_end_at: Option<DateTime<Utc>>,
    pub is_public: Option<bool>,
    /// 0 means unlimited
    pub max_entries_per_user: Option<u32>,
    /// 0 means unlimited
    pub max_images_per_entry: Option<u32>,
    pub auto_approve_entries: Option<bool>,
    pub judging_type: Option<JudgingType>,
    pub max_votes_per_judge: Option<u32>,
    pub twitter_hashtag: Option<String>,
    pub twitter_auto_fetch: Option<bool>,
    pub twitter_auto_approve: Option<bool>,
    pub require_twitter_account: Option<bool>,
    pub banner_image: Option<ImageUpload>,
}

impl ContestForm {
    pub fn into_multipart(self) -> MultipartForm {
        let mut form = MultipartForm::new();
        let mut put = |name: &str, value: Option<String>| {
            if let Some(value) = value {
                form = std::mem::take(&mut form).text(name, value);
            }
        };

        put("slug", self.slug);
        put("title", self.title);
        put("description", self.description);
        put("start_at", self.start_at.map(format_utc_rfc3339));
        put("end_at", self.end_at.map(format_utc_rfc3339));
        put("voting_end_at", self.voting_end_at.map(format_utc_rfc3339));
        put("is_public", self.is_public.map(|b| b.to_string()));
        put(
            "max_entries_per_user",
            self.max_entries_per_user.map(|n| n.to_string()),
        );
        put(
            "max_images_per_entry",
            self.max_images_per_entry.map(|n| n.to_string()),
        );
        put(
            "auto_approve_entries",
            self.auto_approve_entries.map(|b| b.to_string()),
        );
        put(
            "judging_type",
            self.judging_type.map(|t| match t {
                JudgingType::Vote => "vote".to_string(),
                JudgingType::Score => "score".to_string(),
            }),
        );
        put(
            "max_votes_per_judge",
            self.max_votes_per_judge.map(|n| n.to_string()),
        );
        put(
            "twitter_hashtag",
            self.twitter_hashtag
                .map(|tag| tag.trim_start_matches('#').to_string()),
        );
        put(
            "twitter_auto_fetch",
            self.twitter_auto_fetch.map(|b| b.to_string()),
        );
        put(
            "twitter_auto_approve",
            self.twitter_auto_approve.map(|b| b.to_string()),
        );
        put(
            "require_twitter_account",
            self.require_twitter_account.map(|b| b.to_string()),
        );

        match self.banner_image {
            Some(image) => form.file("banner_image", &image.file_name, &image.mime, image.bytes),
            None => form,
        }
    }
}

/// Fields for submitting an entry.
#[derive(Debug, Clone)]
pub struct EntryForm {
    /// Contest slug
    pub contest: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub images: Vec<ImageUpload>,
}

impl EntryForm {
    pub fn into_multipart(self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("contest", self.contest)
            .text("title", self.title)
            .text("description", self.description)
            .text("tags", self.tags.join(", "));
        for image in self.images {
            form = form.file("images", &image.file_name, &image.mime, image.bytes);
        }
        form
    }
}

/// Profile update. Only set fields are sent.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar: Option<ImageUpload>,
}

impl ProfileForm {
    pub fn into_multipart(self) -> MultipartForm {
        let mut form = MultipartForm::new();
        if let Some(username) = self.username {
            form = form.text("username", username);
        }
        if let Some(first_name) = self.first_name {
            form = form.text("first_name", first_name);
        }
        if let Some(last_name) = self.last_name {
            form = form.text("last_name", last_name);
        }
        if let Some(avatar) = self.avatar {
            form = form.file("avatar", &avatar.file_name, &avatar.mime, avatar.bytes);
        }
        form
    }
}
