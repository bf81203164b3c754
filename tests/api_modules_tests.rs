// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tests that each resource module hits the right endpoint.

use photo_contest_client::api::{EntryOrdering, EntryQuery, ScoreQuery, VoteQuery};
use photo_contest_client::models::{
    ContestForm, CreateCategoryRequest, CreateJudgeScoreRequest, CreateVoteRequest,
    DetailedScoreInput, ProfileForm,
};
use photo_contest_client::transport::{ApiRequest, RequestBody};
use reqwest::{Method, StatusCode};
use serde_json::json;

mod common;
use common::{contest_json, json_response, test_client, user_json, MockTransport};

fn query_of(request: &ApiRequest) -> Vec<(&str, &str)> {
    request
        .query
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

fn entry_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "contest": "winter-2026",
        "title": "Frost",
        "author": user_json(1, "ansel"),
        "tags": "snow, night",
        "images": [],
        "created_at": "2026-02-01T08:00:00Z",
        "vote_count": 3
    })
}

#[tokio::test]
async fn test_contest_list_decodes_paginated_and_plain() {
    let transport = MockTransport::new(|req| {
        let body = match req.path.as_str() {
            "/contests/" => json!({
                "count": 2,
                "next": "http://localhost:8080/api/contests/?page=2",
                "previous": null,
                "results": [contest_json("spring", None)]
            }),
            _ => json!([contest_json("mine", Some("2026-06-20T00:00:00Z"))]),
        };
        Ok(json_response(StatusCode::OK, &body))
    });
    let (client, _) = test_client(transport.clone());

    let page = client.contests().list().await.unwrap();
    assert_eq!(page.total(), 2);
    assert!(page.has_next());
    assert_eq!(page.items()[0].slug, "spring");

    let mine = client.contests().mine().await.unwrap();
    assert_eq!(mine.total(), 1);
    assert!(!mine.has_next());
    assert_eq!(transport.last_request().path, "/contests/my_contests/");

    client.contests().judging().await.unwrap();
    assert_eq!(transport.last_request().path, "/contests/judging_contests/");
}

#[tokio::test]
async fn test_contest_slug_is_escaped() {
    let transport = MockTransport::always(StatusCode::OK, contest_json("a b", None));
    let (client, _) = test_client(transport.clone());

    client.contests().get("a b").await.unwrap();

    assert_eq!(transport.last_request().path, "/contests/a%20b/");
}

#[tokio::test]
async fn test_contest_create_and_update_are_multipart() {
    let transport = MockTransport::always(StatusCode::CREATED, contest_json("night", None));
    let (client, _) = test_client(transport.clone());

    let form = ContestForm {
        slug: Some("night".to_string()),
        title: Some("Night".to_string()),
        ..Default::default()
    };
    client.contests().create(form).await.unwrap();
    let sent = transport.last_request();
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.path, "/contests/");
    match &sent.body {
        RequestBody::Multipart(form) => assert_eq!(form.text_value("slug"), Some("night")),
        other => panic!("expected multipart, got {other:?}"),
    }

    client
        .contests()
        .update(
            "night",
            ContestForm {
                description: Some("Updated".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let sent = transport.last_request();
    assert_eq!(sent.method, Method::PATCH);
    assert_eq!(sent.path, "/contests/night/");
    assert!(sent.is_multipart());
}

#[tokio::test]
async fn test_contest_entries_and_judges() {
    let transport = MockTransport::new(|req| {
        let body = match req.path.as_str() {
            "/contests/spring/entries/" => json!({"count": 1, "results": [entry_json("e1")]}),
            "/contests/spring/judges/" => json!([user_json(5, "judge")]),
            _ => json!({"detail": "ok", "judge": {"id": 5, "username": "judge"}}),
        };
        Ok(json_response(StatusCode::OK, &body))
    });
    let (client, _) = test_client(transport.clone());

    let entries = client
        .contests()
        .entries("spring", Some(EntryOrdering::MostVoted), Some(2))
        .await
        .unwrap();
    assert_eq!(entries.items()[0].vote_count, 3);
    assert_eq!(
        query_of(&transport.last_request()),
        vec![("ordering", "-vote_count"), ("page", "2")]
    );

    let judges = client.contests().judges("spring").await.unwrap();
    assert_eq!(judges[0].username, "judge");

    let changed = client.contests().add_judge("spring", 5).await.unwrap();
    assert_eq!(changed.judge.unwrap().id, 5);
    let sent = transport.last_request();
    assert_eq!(sent.path, "/contests/spring/add_judge/");
    assert_eq!(sent.body, RequestBody::Json(json!({"user_id": 5})));

    client.contests().remove_judge("spring", 5).await.unwrap();
    assert_eq!(transport.last_request().path, "/contests/spring/remove_judge/");
}

#[tokio::test]
async fn test_contest_statistics() {
    let transport = MockTransport::always(
        StatusCode::OK,
        json!({
            "daily_entries": [{"date": "2026-06-02", "count": 4}],
            "total_entries": 4,
            "pending_entries": 1,
            "total_votes": 10,
            "unique_voters": 6
        }),
    );
    let (client, _) = test_client(transport.clone());

    let stats = client.contests().statistics("spring").await.unwrap();

    assert_eq!(stats.daily_entries[0].count, 4);
    assert_eq!(stats.unique_voters, 6);
    assert_eq!(transport.last_request().path, "/contests/spring/statistics/");
}

#[tokio::test]
async fn test_entry_list_query() {
    let transport = MockTransport::always(StatusCode::OK, json!([entry_json("e1")]));
    let (client, _) = test_client(transport.clone());

    let listing = client
        .entries()
        .list(EntryQuery {
            contest: Some("winter-2026".to_string()),
            author: Some(1),
            ordering: Some(EntryOrdering::Newest),
            page: None,
        })
        .await
        .unwrap();

    assert_eq!(listing.items()[0].tag_list(), vec!["snow", "night"]);
    let sent = transport.last_request();
    assert_eq!(sent.path, "/entries/");
    assert_eq!(
        query_of(&sent),
        vec![
            ("contest", "winter-2026"),
            ("author", "1"),
            ("ordering", "-created_at")
        ]
    );
}

#[tokio::test]
async fn test_entry_actions() {
    let transport = MockTransport::new(|req| match req.path.as_str() {
        "/entries/e1/unvote/" => Ok(json_response(StatusCode::NO_CONTENT, &json!(null))),
        "/entries/e1/flag/" => Ok(json_response(
            StatusCode::CREATED,
            &json!({
                "id": 11,
                "entry": "e1",
                "user": user_json(2, "reporter"),
                "reason": "spam",
                "created_at": "2026-02-02T00:00:00Z"
            }),
        )),
        _ => Ok(json_response(StatusCode::OK, &json!({"detail": "ok"}))),
    });
    let (client, _) = test_client(transport.clone());
    let entries = client.entries();

    entries.vote("e1").await.unwrap();
    assert_eq!(transport.last_request().method, Method::POST);
    assert_eq!(transport.last_request().path, "/entries/e1/vote/");

    entries.unvote("e1").await.unwrap();
    assert_eq!(transport.last_request().method, Method::DELETE);

    let flag = entries.flag("e1", "spam").await.unwrap();
    assert_eq!(flag.reason, "spam");
    assert_eq!(
        transport.last_request().body,
        RequestBody::Json(json!({"reason": "spam"}))
    );

    entries.judge_score("e1", 87, "sharp").await.unwrap();
    assert_eq!(
        transport.last_request().body,
        RequestBody::Json(json!({"score": 87, "comment": "sharp"}))
    );

    entries.approve("e1").await.unwrap();
    assert_eq!(transport.last_request().path, "/entries/e1/approve/");
    entries.reject("e1").await.unwrap();
    assert_eq!(transport.last_request().path, "/entries/e1/reject/");
}

#[tokio::test]
async fn test_users_endpoints() {
    let transport = MockTransport::always(StatusCode::OK, user_json(1, "ansel"));
    let (client, _) = test_client(transport.clone());

    client.users().me().await.unwrap();
    assert_eq!(transport.last_request().path, "/users/me/");

    client.users().get(42).await.unwrap();
    assert_eq!(transport.last_request().path, "/users/42/");

    client
        .users()
        .update_me(ProfileForm {
            username: Some("ansel2".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let sent = transport.last_request();
    assert_eq!(sent.method, Method::PATCH);
    assert_eq!(sent.path, "/users/update_me/");
    assert!(sent.is_multipart());

    client.users().set_twitter_icon().await.unwrap();
    assert_eq!(transport.last_request().path, "/users/set_twitter_icon/");
}

#[tokio::test]
async fn test_categories_are_filtered_by_contest() {
    let transport = MockTransport::always(
        StatusCode::OK,
        json!([{
            "id": 3,
            "contest": 7,
            "name": "Landscape",
            "order": 1,
            "created_at": "2026-01-01T00:00:00Z"
        }]),
    );
    let (client, _) = test_client(transport.clone());

    let categories = client.categories().list(7).await.unwrap();

    assert_eq!(categories.items()[0].name, "Landscape");
    assert_eq!(
        query_of(&transport.last_request()),
        vec![("contest", "7"), ("ordering", "order")]
    );
}

#[tokio::test]
async fn test_category_create_sends_null_limit() {
    let transport = MockTransport::always(
        StatusCode::CREATED,
        json!({
            "id": 4,
            "contest": 7,
            "name": "Portrait",
            "created_at": "2026-01-01T00:00:00Z"
        }),
    );
    let (client, _) = test_client(transport.clone());

    client
        .categories()
        .create(&CreateCategoryRequest {
            contest: 7,
            name: "Portrait".to_string(),
            description: None,
            order: None,
            max_votes_per_judge: None,
        })
        .await
        .unwrap();

    assert_eq!(
        transport.last_request().body,
        RequestBody::Json(json!({"contest": 7, "name": "Portrait", "max_votes_per_judge": null}))
    );

    client.categories().delete(4).await.unwrap();
    let sent = transport.last_request();
    assert_eq!(sent.method, Method::DELETE);
    assert_eq!(sent.path, "/categories/4/");
}

#[tokio::test]
async fn test_criteria_list_by_category() {
    let transport = MockTransport::always(StatusCode::OK, json!([]));
    let (client, _) = test_client(transport.clone());

    client.criteria().list(7, Some(3)).await.unwrap();

    let sent = transport.last_request();
    assert_eq!(sent.path, "/judging-criteria/");
    assert_eq!(query_of(&sent), vec![("contest", "7"), ("category", "3")]);
}

#[tokio::test]
async fn test_votes_and_scores() {
    let transport = MockTransport::new(|req| {
        let body = match (req.method.clone(), req.path.as_str()) {
            (Method::POST, "/votes/") => json!({
                "id": 1,
                "entry": "e1",
                "user": 5,
                "created_at": "2026-06-20T00:00:00Z"
            }),
            (Method::POST, "/judge-scores/") => json!({
                "id": 2,
                "entry": "e1",
                "judge": {"id": 5, "username": "judge"},
                "total_score": 17,
                "detailed_scores": [],
                "created_at": "2026-06-20T00:00:00Z",
                "updated_at": "2026-06-20T00:00:00Z"
            }),
            _ => json!([]),
        };
        Ok(json_response(StatusCode::OK, &body))
    });
    let (client, _) = test_client(transport.clone());

    let vote = client
        .votes()
        .create(&CreateVoteRequest {
            entry: "e1".to_string(),
            category: None,
        })
        .await
        .unwrap();
    assert_eq!(vote.user, 5);
    assert_eq!(
        transport.last_request().body,
        RequestBody::Json(json!({"entry": "e1"}))
    );

    client
        .votes()
        .list(VoteQuery {
            category: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(query_of(&transport.last_request()), vec![("category", "3")]);

    client.votes().mine().await.unwrap();
    assert_eq!(transport.last_request().path, "/votes/my_votes/");

    let score = client
        .scores()
        .create(&CreateJudgeScoreRequest {
            entry: "e1".to_string(),
            category: None,
            comment: None,
            detailed_scores: vec![DetailedScoreInput {
                criteria: 1,
                score: 17,
                comment: None,
            }],
        })
        .await
        .unwrap();
    assert_eq!(score.total_score, 17);

    client
        .scores()
        .list(ScoreQuery {
            entry: Some("e1".to_string()),
            ordering: Some("-total_score".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        query_of(&transport.last_request()),
        vec![("entry", "e1"), ("ordering", "-total_score")]
    );

    client.scores().mine().await.unwrap();
    assert_eq!(transport.last_request().path, "/judge-scores/my_scores/");
}

#[tokio::test]
async fn test_server_logout_and_forced_refresh() {
    let transport = MockTransport::new(|req| match req.path.as_str() {
        "/auth/token/refresh/" => Ok(json_response(StatusCode::OK, &json!({"access": "A9"}))),
        _ => Ok(json_response(StatusCode::OK, &json!({"detail": "ok"}))),
    });
    let (client, _) = test_client(transport.clone());

    assert_eq!(client.auth().refresh().await.unwrap(), None);
    assert!(transport.requests().is_empty());

    client.tokens().set_tokens("A1", "R1").unwrap();
    assert_eq!(client.auth().refresh().await.unwrap().as_deref(), Some("A9"));
    assert_eq!(client.tokens().access_token().unwrap().as_deref(), Some("A9"));

    client.auth().logout().await.unwrap();
    assert_eq!(transport.last_request().path, "/auth/logout/");
}
