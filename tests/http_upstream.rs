//! Drives the reqwest-backed upstream against a local mock of the miyolive API.

use std::collections::HashMap;

use axum::extract::Query;
use axum::http::HeaderMap;
use axum::routing::get;
use axum::{Json, Router};
use gscode::command::{self, Sendable, Trigger};
use gscode::config::{Config, UpstreamConfig};
use gscode::games::Game;
use gscode::global::Global;
use gscode::resolver::OutcomeMessage;
use gscode::upstream::{FetchParams, RequestKind, Upstream};
use serde_json::{json, Value};

const ACT_ID: &str = "ea20240816preview";

fn rejected(reason: &str) -> Json<Value> {
    Json(json!({ "retcode": -1, "message": reason, "data": null }))
}

fn act_id_header(headers: &HeaderMap) -> Option<&str> {
    headers.get("x-rpc-act_id")?.to_str().ok()
}

async fn activity_list(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let expected = [("offset", "0"), ("size", "20"), ("uid", "75276550")];
    if expected
        .iter()
        .any(|(k, v)| query.get(*k).map(String::as_str) != Some(*v))
    {
        return rejected("bad query");
    }

    let body = json!([
        { "insert": "「5.0」版本前瞻特别节目将于8月16日20:00开启直播" },
        {
            "insert": "点击预约直播",
            "attributes": {
                "link": format!("https://webstatic.mihoyo.com/bbs/event/live/index.html?act_id={ACT_ID}&utm_source=bbs")
            }
        }
    ]);

    Json(json!({
        "retcode": 0,
        "message": "OK",
        "data": {
            "list": [
                { "post": { "post": { "subject": "「5.0」版本前瞻特别节目预告", "structured_content": body.to_string() } } }
            ]
        }
    }))
}

async fn live_index(headers: HeaderMap) -> Json<Value> {
    if act_id_header(&headers) != Some(ACT_ID) {
        return rejected("missing act_id");
    }

    let template = json!({
        "kvDesktop": "https://act-webstatic.mihoyo.com/kv.png",
        "liveConfig": [{ "desktop": "https://act-webstatic.mihoyo.com/room.png" }],
        "reviewUrl": { "args": { "post_id": "54017000" } },
    });

    Json(json!({
        "retcode": 0,
        "message": "OK",
        "data": {
            "live": {
                "code_ver": "5.0",
                "title": "「5.0」版本前瞻特别节目",
                "is_end": true,
                "start": "2024-08-16 20:00:00",
            },
            "template": template.to_string(),
        }
    }))
}

async fn refresh_code(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    if act_id_header(&headers) != Some(ACT_ID) {
        return rejected("missing act_id");
    }
    if query.get("version").map(String::as_str) != Some("5.0") {
        return rejected("bad version");
    }
    if query.get("time").and_then(|t| t.parse::<i64>().ok()).is_none() {
        return rejected("bad time");
    }

    Json(json!({
        "retcode": 0,
        "message": "OK",
        "data": {
            "code_list": [
                { "title": "<p>原石×100</p>&nbsp;摩拉×50000", "code": "GENSHINGIFT" },
                { "title": "<p>大英雄的经验×5</p>", "code": "MORACODE" },
            ]
        }
    }))
}

async fn spawn_mock() -> UpstreamConfig {
    let router = Router::new()
        .route("/painter/api/user_instant/list", get(activity_list))
        .route("/event/miyolive/index", get(live_index))
        .route("/event/miyolive/refreshCode", get(refresh_code));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });

    UpstreamConfig {
        activity_list: format!("http://{addr}/painter/api/user_instant/list"),
        live_index: format!("http://{addr}/event/miyolive/index"),
        code_refresh: format!("http://{addr}/event/miyolive/refreshCode"),
    }
}

#[tokio::test]
async fn sends_headers_and_query() {
    let config = Config {
        upstream: spawn_mock().await,
        ..Config::default()
    };
    let global = Global::init(config).unwrap();
    let upstream = global.upstream();

    let index = upstream
        .fetch(RequestKind::LiveIndex, FetchParams::activity(ACT_ID))
        .await
        .unwrap();
    assert_eq!(index["retcode"], 0);

    let codes = upstream
        .fetch(RequestKind::CodeRefresh, FetchParams::codes("5.0", ACT_ID))
        .await
        .unwrap();
    assert_eq!(codes["retcode"], 0);

    let wrong = upstream
        .fetch(RequestKind::LiveIndex, FetchParams::activity("other"))
        .await
        .unwrap();
    assert_eq!(wrong["retcode"], -1);
}

#[tokio::test]
async fn composes_listing_end_to_end() {
    let config = Config {
        upstream: spawn_mock().await,
        ..Config::default()
    };
    let global = Global::init(config).unwrap();

    let msg = global.resolver().compose(Game::Genshin).await;

    let OutcomeMessage::CodeListing {
        codes, replay_link, ..
    } = &msg
    else {
        panic!("expected a code listing, got {msg:?}");
    };
    assert_eq!(codes[0].description, "原石×100 摩拉×50000");
    assert_eq!(codes[1].code, "MORACODE");
    assert_eq!(
        replay_link.as_deref(),
        Some("https://www.miyoushe.com/ys/article/54017000")
    );
}

#[tokio::test]
async fn command_reply_is_forwarded_bundle() {
    let config = Config {
        upstream: spawn_mock().await,
        ..Config::default()
    };
    let global = Global::init(config).unwrap();
    let trigger = Trigger {
        command: "原神兑换码".to_string(),
        argument: String::new(),
        target: (),
    };

    let reply = command::respond(&global.resolver(), &trigger).await;

    let Some(Sendable::Aggregated(segments)) = &reply else {
        panic!("expected an aggregated reply, got {reply:?}");
    };
    assert_eq!(segments.len(), 4);
    assert_eq!(segments[1], "GENSHINGIFT");
    assert!(segments[3].ends_with("/ys/article/54017000"));
}

#[tokio::test]
async fn starrail_author_is_not_served() {
    let config = Config {
        upstream: spawn_mock().await,
        ..Config::default()
    };
    let global = Global::init(config).unwrap();

    let msg = global.resolver().compose(Game::Starrail).await;

    assert_eq!(msg, OutcomeMessage::Unavailable("暂无前瞻直播资讯！".into()));
}
