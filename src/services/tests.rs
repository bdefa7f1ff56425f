//! Tests for the services module

use super::*;
use crate::error::{Error, Result};
use crate::http::{CookieJarTransport, Params, Transport};
use crate::responses::LogInOutcome;
use crate::types::{DeleteItemReason, ItemFlags, UserMark, Vote};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use test_case::test_case;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq)]
struct Call {
    method: &'static str,
    path: String,
    params: Vec<(String, String)>,
    skip_auth: bool,
}

/// Records every call and answers with a fixed body
struct Recorder {
    calls: Mutex<Vec<Call>>,
    response: Value,
}

impl Recorder {
    fn new(response: Value) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            response,
        })
    }

    fn last(&self) -> Call {
        self.calls.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl Transport for Recorder {
    async fn get(&self, path: &str, query: &Params) -> Result<Value> {
        self.calls.lock().unwrap().push(Call {
            method: "GET",
            path: path.to_string(),
            params: query.as_slice().to_vec(),
            skip_auth: false,
        });
        Ok(self.response.clone())
    }

    async fn post(&self, path: &str, body: Params, skip_auth: bool) -> Result<Value> {
        self.calls.lock().unwrap().push(Call {
            method: "POST",
            path: path.to_string(),
            params: body.as_slice().to_vec(),
            skip_auth,
        });
        Ok(self.response.clone())
    }
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn ok() -> Value {
    json!({"ts": 1, "cache": null, "rt": 1, "qc": 1})
}

// ============================================================================
// Items
// ============================================================================

#[test]
fn test_get_items_options_encoding() {
    let options = GetItemsOptions::new(ItemFlags::SFW | ItemFlags::NSFW)
        .promoted(true)
        .tags(["cat", "dog"])
        .user("cha0s");

    assert_eq!(
        options.to_params().as_slice(),
        pairs(&[
            ("flags", "3"),
            ("promoted", "1"),
            ("self", "0"),
            ("tags", "cat,dog"),
            ("user", "cha0s"),
        ])
        .as_slice()
    );
}

#[test]
fn test_get_items_options_defaults() {
    let params = GetItemsOptions::default().to_params();
    assert_eq!(
        params.as_slice(),
        pairs(&[("flags", "1"), ("promoted", "0"), ("self", "0")]).as_slice()
    );
}

#[test_case("older" ; "older")]
#[test_case("newer" ; "newer")]
#[test_case("id" ; "around")]
#[tokio::test]
async fn test_get_items_cursor_param_comes_first(key: &str) {
    let recorder = Recorder::new(json!({"atEnd": false, "atStart": false, "items": []}));
    let items = ItemsService::new(recorder.clone());
    let options = GetItemsOptions::new(ItemFlags::ALL);

    match key {
        "older" => items.get_items_older(42, &options).await.unwrap(),
        "newer" => items.get_items_newer(42, &options).await.unwrap(),
        _ => items.get_items_around(42, &options).await.unwrap(),
    };

    let call = recorder.last();
    assert_eq!(call.method, "GET");
    assert_eq!(call.path, "/items/get");
    assert_eq!(call.params[0], (key.to_string(), "42".to_string()));
    assert_eq!(call.params[1], ("flags".to_string(), "7".to_string()));
}

#[tokio::test]
async fn test_item_vote() {
    let recorder = Recorder::new(ok());
    ItemsService::new(recorder.clone())
        .vote(7, Vote::Down)
        .await
        .unwrap();

    let call = recorder.last();
    assert_eq!(call.path, "/items/vote");
    assert_eq!(call.params, pairs(&[("id", "7"), ("vote", "-1")]));
    assert!(!call.skip_auth);
}

#[tokio::test]
async fn test_item_delete() {
    let recorder = Recorder::new(ok());
    let options = DeleteItemOptions {
        item_id: 5,
        days: 3,
        ban_user: true,
        notify_user: false,
        reason: DeleteItemReason::Repost,
        custom_reason: String::new(),
    };
    ItemsService::new(recorder.clone())
        .delete(&options)
        .await
        .unwrap();

    assert_eq!(
        recorder.last().params,
        pairs(&[
            ("itemId", "5"),
            ("days", "3"),
            ("banUser", "true"),
            ("notifyUser", "false"),
            ("reason", "Repost"),
            ("customReason", ""),
        ])
    );
}

#[tokio::test]
async fn test_get_info_decodes_response() {
    let recorder = Recorder::new(json!({
        "tags": [{"id": 1, "tag": "kadse", "confidence": 0.9}],
        "comments": [],
        "ts": 1, "rt": 2, "qc": 3
    }));
    let info = ItemsService::new(recorder.clone()).get_info(9).await.unwrap();

    assert_eq!(info.tags.len(), 1);
    assert_eq!(info.tags[0].tag, "kadse");
    assert_eq!(recorder.last().params, pairs(&[("itemId", "9")]));
}

#[tokio::test]
async fn test_decode_failure_names_path() {
    let recorder = Recorder::new(json!({"items": "nope"}));
    let err = ItemsService::new(recorder)
        .get_items(&GetItemsOptions::default())
        .await
        .unwrap_err();

    match err {
        Error::Decode { path, .. } => assert_eq!(path, "/items/get"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_walk_stream_older_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items/get"))
        .and(query_param("older", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "atEnd": false, "atStart": true,
            "items": [{"id": 100}, {"id": 99}, {"id": 98}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/items/get"))
        .and(query_param("older", "98"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "atEnd": true, "atStart": false,
            "items": [{"id": 98}, {"id": 97}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = crate::config::ClientConfig::builder()
        .base_url(mock_server.uri())
        .build();
    let transport = Arc::new(CookieJarTransport::new(config).unwrap());
    let items = ItemsService::new(transport);

    let ids: Vec<u64> = items
        .walk_stream_older(100, GetItemsOptions::default())
        .map_ok(|item| item.id)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids, vec![100, 99, 98, 98, 97]);
}

#[tokio::test]
async fn test_walk_stream_newer_stops_at_start() {
    let recorder = Recorder::new(json!({
        "atEnd": false, "atStart": true,
        "items": [{"id": 11}, {"id": 12}]
    }));

    let ids: Vec<u64> = ItemsService::new(recorder.clone())
        .walk_stream_newer(10, GetItemsOptions::default())
        .map_ok(|item| item.id)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids, vec![11, 12]);
    assert_eq!(recorder.calls.lock().unwrap().len(), 1);
    assert_eq!(recorder.last().params[0], ("newer".to_string(), "10".to_string()));
}

// ============================================================================
// Tags & Comments
// ============================================================================

#[tokio::test]
async fn test_tags_add() {
    let recorder = Recorder::new(ok());
    TagsService::new(recorder.clone())
        .add(3, &["a", "b c"])
        .await
        .unwrap();

    let call = recorder.last();
    assert_eq!(call.path, "/tags/add");
    assert_eq!(
        call.params,
        pairs(&[("itemId", "3"), ("tags", "a,b c"), ("submit", "Tags speichern")])
    );
}

#[tokio::test]
async fn test_comment_post_defaults_to_top_level() {
    let recorder = Recorder::new(ok());
    let comments = CommentsService::new(recorder.clone());

    comments.post(8, "hi", None).await.unwrap();
    assert_eq!(
        recorder.last().params,
        pairs(&[("comment", "hi"), ("itemId", "8"), ("parentId", "0")])
    );

    comments.post(8, "re", Some(21)).await.unwrap();
    assert_eq!(recorder.last().params[2], ("parentId".to_string(), "21".to_string()));
}

#[tokio::test]
async fn test_comment_edit() {
    let recorder = Recorder::new(ok());
    CommentsService::new(recorder.clone())
        .edit(4, "fixed")
        .await
        .unwrap();

    let call = recorder.last();
    assert_eq!(call.path, "/comments/edit");
    assert_eq!(call.params, pairs(&[("commentId", "4"), ("comment", "fixed")]));
}

// ============================================================================
// Profile & Messages
// ============================================================================

#[tokio::test]
async fn test_profile_comments_accept_datetime() {
    let recorder = Recorder::new(json!({"comments": [], "hasOlder": false, "hasNewer": false}));
    let profile = ProfileService::new(recorder.clone());
    let before = Utc.timestamp_opt(1_600_000_000, 500_000_000).unwrap();

    profile
        .get_comments_before("cha0s", ItemFlags::SFW, before)
        .await
        .unwrap();
    assert_eq!(
        recorder.last().params,
        pairs(&[("name", "cha0s"), ("flags", "1"), ("before", "1600000000")])
    );

    profile
        .get_comments_after("cha0s", ItemFlags::SFW, 1_500_000_000_i64)
        .await
        .unwrap();
    assert_eq!(recorder.last().params[2], ("after".to_string(), "1500000000".to_string()));
}

#[tokio::test]
async fn test_send_message() {
    let recorder = Recorder::new(json!({"messages": [], "atEnd": true}));
    MessagesService::new(recorder.clone())
        .send_message("cha0s", "hallo")
        .await
        .unwrap();

    let call = recorder.last();
    assert_eq!(call.method, "POST");
    assert_eq!(call.path, "/inbox/post");
    assert_eq!(call.params, pairs(&[("recipientName", "cha0s"), ("comment", "hallo")]));
}

#[tokio::test]
async fn test_get_messages_uses_with() {
    let recorder = Recorder::new(json!({"messages": [], "atEnd": true}));
    MessagesService::new(recorder.clone())
        .get_messages("gamb")
        .await
        .unwrap();

    assert_eq!(recorder.last().params, pairs(&[("with", "gamb")]));
}

// ============================================================================
// User
// ============================================================================

#[tokio::test]
async fn test_login_skips_auth() {
    let recorder = Recorder::new(json!({"success": true, "identifier": "abc", "ban": null}));
    let user = UserService::new(recorder.clone());

    let res = user
        .login(&LoginOptions::new("cha0s", "hunter2"))
        .await
        .unwrap();

    assert_eq!(
        res.outcome(),
        LogInOutcome::Success {
            identifier: Some("abc".to_string())
        }
    );
    let call = recorder.last();
    assert_eq!(call.path, "/user/login");
    assert!(call.skip_auth);
    assert_eq!(call.params, pairs(&[("name", "cha0s"), ("password", "hunter2")]));
}

#[tokio::test]
async fn test_login_with_captcha() {
    let recorder = Recorder::new(json!({"success": false, "ban": null}));
    UserService::new(recorder.clone())
        .login(&LoginOptions::new("cha0s", "pw").with_captcha("tok", "x7k"))
        .await
        .unwrap();

    assert_eq!(
        recorder.last().params,
        pairs(&[("name", "cha0s"), ("password", "pw"), ("token", "tok"), ("captcha", "x7k")])
    );
}

#[test_case("/user/captcha" ; "captcha")]
#[test_case("/user/sendpasswordresetmail" ; "password reset")]
#[test_case("/user/authtoken" ; "auth token")]
#[tokio::test]
async fn test_unsigned_user_endpoints(expected: &str) {
    let recorder = Recorder::new(json!({"token": "t", "captcha": "data:", "accessToken": "a"}));
    let user = UserService::new(recorder.clone());

    match expected {
        "/user/captcha" => drop(user.request_captcha().await.unwrap()),
        "/user/sendpasswordresetmail" => drop(user.send_password_reset_mail("a@b.c").await.unwrap()),
        _ => drop(user.get_auth_token("code", "uid", "cid", "secret").await.unwrap()),
    }

    let call = recorder.last();
    assert_eq!(call.path, expected);
    assert!(call.skip_auth);
}

#[tokio::test]
async fn test_site_settings_user_status() {
    let recorder = Recorder::new(ok());
    UserService::new(recorder.clone())
        .set_site_settings(SiteSettingsOptions {
            likes_are_public: true,
            show_ads: false,
            user_status: UserMark::Altschwuchtel,
        })
        .await
        .unwrap();

    assert_eq!(
        recorder.last().params,
        pairs(&[("likesArePublic", "true"), ("showAds", "false"), ("userStatus", "um2")])
    );
}

#[tokio::test]
async fn test_sync_offset() {
    let recorder = Recorder::new(json!({"inboxCount": 1, "log": "", "logLength": 0, "score": 5}));
    let res = UserService::new(recorder.clone()).sync(12).await.unwrap();

    assert_eq!(res.inbox_count, 1);
    assert_eq!(res.score, 5);
    let call = recorder.last();
    assert_eq!(call.method, "GET");
    assert_eq!(call.params, pairs(&[("offset", "12")]));
}

#[tokio::test]
async fn test_signed_post_without_session_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = crate::config::ClientConfig::builder()
        .base_url(mock_server.uri())
        .build();
    let transport = Arc::new(CookieJarTransport::new(config).unwrap());

    let err = ContactService::new(transport)
        .send("a@b.c", "hi", "text")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotLoggedIn { ref path } if path == "/contact/send"));
}
