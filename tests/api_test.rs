//! End-to-end tests for the HTTP API against the in-memory store.

use std::net::SocketAddr;
use std::sync::Arc;

use edutrack::config::AppConfig;
use edutrack::store::MemoryStore;
use edutrack::{routes, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

const ADMIN_EMAIL: &str = "admin@academy.test";
const ADMIN_PASS: &str = "Admin123!Test";

/// Spin up the full Axum app on a random port with a fresh in-memory store.
async fn start_server() -> (String, tokio::task::JoinHandle<()>) {
    let config = AppConfig {
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password: Some(ADMIN_PASS.to_string()),
        shared_user_password: Some("Shared123!".to_string()),
        ..AppConfig::default()
    };
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        config,
    };
    let app = routes::router(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (base_url, handle)
}

/// Helper: extract `data` from the API envelope, panic with message on error.
fn extract_data(body: &Value) -> &Value {
    if let Some(err) = body.get("error").filter(|e| !e.is_null()) {
        panic!(
            "API error: {}: {}",
            err["code"].as_str().unwrap_or("?"),
            err["message"].as_str().unwrap_or("?"),
        );
    }
    body.get("data").expect("missing 'data' field")
}

fn video_body(title: &str, category_id: &str) -> Value {
    json!({
        "title": title,
        "description": "desc",
        "thumbnail": "https://img.example/t.jpg",
        "duration": "10:00",
        "youtubeId": "abc123",
        "match": "97%",
        "difficulty": "Básico",
        "rating": 4.8,
        "views": 0,
        "releaseDate": "2024",
        "categoryId": category_id,
    })
}

async fn post_json(client: &Client, url: String, body: &Value) -> (StatusCode, Value) {
    let resp = client.post(url).json(body).send().await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

async fn get_json(client: &Client, url: String) -> (StatusCode, Value) {
    let resp = client.get(url).send().await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

async fn create_video(client: &Client, base: &str, title: &str, category_id: &str) -> String {
    let (status, body) = post_json(
        client,
        format!("{base}/api/videos"),
        &video_body(title, category_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    extract_data(&body)["id"].as_str().unwrap().to_string()
}

async fn report(
    client: &Client,
    base: &str,
    email: &str,
    video_id: &str,
    watch_time: i64,
    completed: bool,
) {
    let (status, body) = post_json(
        client,
        format!("{base}/api/video-progress"),
        &json!({
            "user_email": email,
            "video_id": video_id,
            "progress_percentage": if completed { 100.0 } else { 40.0 },
            "watch_time": watch_time,
            "completed": completed,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "progress report failed: {body}");
}

#[tokio::test]
async fn health_endpoints() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    let resp = client.get(format!("{base}/health/live")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "OK");

    let (_, body) = get_json(&client, format!("{base}/health/ready")).await;
    assert_eq!(extract_data(&body)["store"], "connected");
}

#[tokio::test]
async fn login_flow() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    let (status, body) = post_json(
        &client,
        format!("{base}/api/auth/login"),
        &json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASS }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(extract_data(&body)["role"], "admin");

    let (status, _) = post_json(
        &client,
        format!("{base}/api/users"),
        &json!({ "email": "agent@x.com", "password": "pw", "name": "Agente" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &client,
        format!("{base}/api/users"),
        &json!({ "email": "agent@x.com", "password": "pw", "name": "Agente" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, body) = post_json(
        &client,
        format!("{base}/api/auth/login"),
        &json!({ "email": "agent@x.com", "password": "pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(extract_data(&body)["role"], "user");

    let (status, body) = post_json(
        &client,
        format!("{base}/api/auth/login"),
        &json!({ "email": "agent@x.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["data"].is_null());

    let (_, body) = get_json(&client, format!("{base}/api/users")).await;
    let users = extract_data(&body).as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn catalog_crud() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    let (_, body) = get_json(&client, format!("{base}/api/categories")).await;
    assert_eq!(extract_data(&body).as_array().unwrap().len(), 9);

    let video_id = create_video(&client, &base, "Prospección", "2").await;

    let (_, body) = get_json(&client, format!("{base}/api/categories")).await;
    let categories = extract_data(&body).as_array().unwrap();
    let marketing = categories.iter().find(|c| c["id"] == "2").unwrap();
    assert_eq!(marketing["videos"][0]["id"], video_id.as_str());

    let resp = client
        .put(format!("{base}/api/videos/{video_id}"))
        .json(&video_body("Prospección avanzada", "2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(extract_data(&body)["title"], "Prospección avanzada");

    let resp = client
        .put(format!("{base}/api/videos/does-not-exist"))
        .json(&video_body("X", "2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let (status, body) = post_json(
        &client,
        format!("{base}/api/videos"),
        &video_body("", "2"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let resp = client
        .delete(format!("{base}/api/categories/2"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // The video survives its category.
    let (status, _) = get_json(&client, format!("{base}/api/videos/{video_id}/detailed")).await;
    assert_eq!(status, StatusCode::OK);

    let resp = client
        .delete(format!("{base}/api/videos/{video_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let (status, _) = get_json(&client, format!("{base}/api/videos/{video_id}/detailed")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn video_stats_and_progress() {
    let (base, _handle) = start_server().await;
    let client = Client::new();
    let video_id = create_video(&client, &base, "Hipotecas", "4").await;

    report(&client, &base, "a@x.com", &video_id, 100, true).await;
    report(&client, &base, "b@x.com", &video_id, 200, false).await;
    report(&client, &base, "c@x.com", &video_id, 300, false).await;

    let (_, body) = get_json(&client, format!("{base}/api/videos/{video_id}/detailed")).await;
    let stats = &extract_data(&body)["stats"];
    assert_eq!(stats["total_views"], 3);
    assert_eq!(stats["total_completions"], 1);
    assert_eq!(stats["average_watch_time"], 200);
    let rate = stats["average_completion_rate"].as_f64().unwrap();
    assert!((rate - 33.33).abs() < 0.01);

    let (status, body) = post_json(
        &client,
        format!("{base}/api/video-progress"),
        &json!({
            "user_email": "d@x.com",
            "video_id": video_id,
            "progress_percentage": 10.0,
            "watch_time": i64::MAX,
            "completed": false,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // A second report for the same pair updates rather than inserts.
    report(&client, &base, "b@x.com", &video_id, 500, true).await;
    let (_, body) = get_json(&client, format!("{base}/api/videos/{video_id}/stats")).await;
    assert_eq!(extract_data(&body)["total_views"], 3);
    assert_eq!(extract_data(&body)["total_completions"], 2);

    let (_, body) = get_json(
        &client,
        format!("{base}/api/video-progress/b@x.com/{video_id}"),
    )
    .await;
    assert_eq!(extract_data(&body)["watch_time"], 500);
    assert_eq!(extract_data(&body)["completed"], true);

    let (_, body) = get_json(&client, format!("{base}/api/video-progress/z@x.com/{video_id}")).await;
    assert_eq!(extract_data(&body)["watch_time"], 0);
    assert!(extract_data(&body)["last_watched"].is_null());

    let (_, body) = get_json(&client, format!("{base}/api/videos/unknown/stats")).await;
    assert_eq!(extract_data(&body)["total_views"], 0);
    assert_eq!(extract_data(&body)["average_completion_rate"], 0.0);
}

#[tokio::test]
async fn dashboard_and_admin_report() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    // Seed the default categories.
    get_json(&client, format!("{base}/api/categories")).await;
    let v1 = create_video(&client, &base, "Prospección", "2").await;
    let v2 = create_video(&client, &base, "Cierre", "6").await;
    let doomed = create_video(&client, &base, "Temporal", "2").await;

    report(&client, &base, "a@x.com", &v1, 1200, false).await;
    report(&client, &base, "a@x.com", &v2, 1800, true).await;
    report(&client, &base, "a@x.com", &doomed, 60, false).await;

    client
        .delete(format!("{base}/api/videos/{doomed}"))
        .send()
        .await
        .unwrap();

    let (_, body) = get_json(&client, format!("{base}/api/dashboard/a@x.com")).await;
    let dashboard = extract_data(&body);
    assert_eq!(dashboard["total_videos_watched"], 3);
    assert_eq!(dashboard["total_videos_completed"], 1);
    assert_eq!(dashboard["total_watch_time"], 3060);

    let recent = dashboard["recent_videos"].as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent.iter().all(|v| v["id"] != doomed.as_str()));
    assert!(recent.iter().all(|v| v["stats"]["total_views"] == 1));

    let by_category = &dashboard["progress_by_category"];
    assert_eq!(by_category["Marketing y Ventas"]["total_videos"], 1);
    assert_eq!(by_category["Marketing y Ventas"]["watched_videos"], 1);
    assert_eq!(by_category["Negociación y Cierre"]["completed_videos"], 1);
    assert_eq!(by_category["Negociación y Cierre"]["completion_rate"], 100.0);
    assert_eq!(by_category["Atención al Cliente"]["watched_videos"], 0);

    let (_, again) = get_json(&client, format!("{base}/api/dashboard/a@x.com")).await;
    assert_eq!(body, again);

    let (_, body) = get_json(&client, format!("{base}/api/dashboard/nobody@x.com")).await;
    let empty = extract_data(&body);
    assert_eq!(empty["total_videos_watched"], 0);
    assert_eq!(empty["completion_rate"], 0.0);
    assert!(empty["recent_videos"].as_array().unwrap().is_empty());

    let (_, body) = get_json(&client, format!("{base}/api/admin/stats")).await;
    let report = extract_data(&body);
    assert_eq!(report["total_categories"], 9);
    assert_eq!(report["total_videos"], 2);
    assert_eq!(report["total_progress_records"], 3);
    assert_eq!(report["active_learners"], 1);
    assert_eq!(report["top_videos"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn settings_and_banner() {
    let (base, _handle) = start_server().await;
    let client = Client::new();

    let (_, body) = get_json(&client, format!("{base}/api/settings")).await;
    assert_eq!(extract_data(&body)["companyName"], "Realty ONE Group Mexico");

    let resp = client
        .put(format!("{base}/api/settings"))
        .json(&json!({ "theme": "light", "logoUrl": "https://img.example/logo.png" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let settings = extract_data(&body);
    assert_eq!(settings["theme"], "light");
    assert_eq!(settings["logoUrl"], "https://img.example/logo.png");
    assert_eq!(settings["companyName"], "Realty ONE Group Mexico");

    let (_, body) = get_json(&client, format!("{base}/api/banner-video")).await;
    assert!(extract_data(&body).is_null());

    let (status, _) = post_json(
        &client,
        format!("{base}/api/banner-video"),
        &json!({ "title": "Bienvenida", "description": "", "thumbnail": "", "youtubeId": "yt1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get_json(&client, format!("{base}/api/banner-video")).await;
    assert_eq!(extract_data(&body)["youtubeId"], "yt1");

    client
        .delete(format!("{base}/api/banner-video"))
        .send()
        .await
        .unwrap();
    let (_, body) = get_json(&client, format!("{base}/api/banner-video")).await;
    assert!(extract_data(&body).is_null());
}
