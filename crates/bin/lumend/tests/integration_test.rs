//! End-to-end smoke tests for the full lumend stack.
//!
//! Each test spins up the complete application (JSON store on a throwaway
//! path, real repos, real services, the virtual adapter) and exercises the
//! HTTP layer via `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use lumen_adapter_http_axum::{router, state::AppState};
use lumen_adapter_hue::HueAdapter;
use lumen_adapter_lifx::LifxAdapter;
use lumen_adapter_storage_json::{
    JsonGroupRepository, JsonLightRepository, JsonScheduleRepository, JsonSettingsStore, JsonStore,
};
use lumen_adapter_virtual::VirtualAdapter;
use lumen_app::event_bus::InProcessEventBus;
use lumen_app::registry::AdapterRegistry;
use lumen_app::services::discovery_service::DiscoveryService;
use lumen_app::services::group_service::GroupService;
use lumen_app::services::light_service::LightService;
use lumen_app::services::schedule_service::ScheduleService;
use lumen_app::services::settings_service::SettingsService;

/// Build a fully-wired router backed by a throwaway JSON store and the
/// virtual adapter.
async fn app() -> axum::Router {
    let path = std::env::temp_dir().join(format!("lumend-test-{}.json", uuid::Uuid::new_v4()));
    let store = JsonStore::open(path).await.expect("store should open");

    let light_repo = JsonLightRepository::new(Arc::clone(&store));
    let group_repo = JsonGroupRepository::new(Arc::clone(&store));
    let schedule_repo = JsonScheduleRepository::new(Arc::clone(&store));
    let settings_store = JsonSettingsStore::new(Arc::clone(&store));

    let gateway = Arc::new(AdapterRegistry::new(
        None::<HueAdapter>,
        None::<LifxAdapter>,
        Some(VirtualAdapter::default()),
    ));

    let bus = InProcessEventBus::new(256);
    let lights = Arc::new(LightService::new(
        light_repo.clone(),
        group_repo.clone(),
        schedule_repo.clone(),
        Arc::clone(&gateway),
        bus.clone(),
    ));
    let groups = Arc::new(GroupService::new(group_repo, Arc::clone(&lights)));
    let schedules = Arc::new(ScheduleService::new(schedule_repo));
    let settings = Arc::new(SettingsService::new(settings_store, bus.clone()));
    let discovery = Arc::new(DiscoveryService::new(light_repo, gateway, bus));

    router::build(AppState::from_arcs(
        lights, groups, schedules, settings, discovery,
    ))
}

async fn request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}

/// Run discovery and return the two virtual lights.
async fn discover(app: &axum::Router) -> Vec<serde_json::Value> {
    let (status, report) = request(app, "POST", "/api/discover", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["discovered"], 2);

    let (status, lights) = request(app, "GET", "/api/lights", None).await;
    assert_eq!(status, StatusCode::OK);
    lights.as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let app = app().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Lights
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_discover_virtual_lights_and_list_them() {
    let app = app().await;
    let lights = discover(&app).await;
    assert_eq!(lights.len(), 2);
    assert!(lights.iter().all(|l| l["protocol"] == "virtual"));
}

#[tokio::test]
async fn should_apply_state_change_to_discovered_light() {
    let app = app().await;
    let lights = discover(&app).await;
    let id = lights[0]["id"].as_str().unwrap();

    let (status, updated) = request(
        &app,
        "PUT",
        &format!("/api/lights/{id}/state"),
        Some(serde_json::json!({"on": true, "brightness": 40})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["state"]["on"], true);
    assert_eq!(updated["state"]["brightness"], 40);
}

#[tokio::test]
async fn should_reject_brightness_above_100() {
    let app = app().await;
    let lights = discover(&app).await;
    let id = lights[0]["id"].as_str().unwrap();

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/api/lights/{id}/state"),
        Some(serde_json::json!({"brightness": 150})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("brightness"));
}

#[tokio::test]
async fn should_rename_light_and_keep_name_across_rediscovery() {
    let app = app().await;
    let lights = discover(&app).await;
    let id = lights[0]["id"].as_str().unwrap().to_string();

    let (status, renamed) = request(
        &app,
        "PUT",
        &format!("/api/lights/{id}"),
        Some(serde_json::json!({"name": "Window Lamp"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Window Lamp");

    // A second discovery pass must not clobber the user's rename.
    let (status, _) = request(&app, "POST", "/api/discover", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, light) = request(&app, "GET", &format!("/api/lights/{id}"), None).await;
    assert_eq!(light["name"], "Window Lamp");
}

#[tokio::test]
async fn should_switch_all_lights_at_once() {
    let app = app().await;
    discover(&app).await;

    let (status, body) = request(
        &app,
        "PUT",
        "/api/lights/state",
        Some(serde_json::json!({"on": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["switched"], 2);

    let (_, lights) = request(&app, "GET", "/api/lights", None).await;
    for light in lights.as_array().unwrap() {
        assert_eq!(light["state"]["on"], false);
    }
}

#[tokio::test]
async fn should_return_not_found_for_unknown_light() {
    let app = app().await;
    let uri = format!("/api/lights/{}", uuid::Uuid::new_v4());
    let (status, _) = request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_create_group_and_fan_out_state_change() {
    let app = app().await;
    let lights = discover(&app).await;
    let ids: Vec<&str> = lights
        .iter()
        .map(|l| l["id"].as_str().unwrap())
        .collect();

    let (status, group) = request(
        &app,
        "POST",
        "/api/groups",
        Some(serde_json::json!({"name": "Everything", "lights": ids})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let group_id = group["id"].as_str().unwrap();

    let (status, outcome) = request(
        &app,
        "PUT",
        &format!("/api/groups/{group_id}/state"),
        Some(serde_json::json!({"on": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["applied"].as_array().unwrap().len(), 2);
    assert!(outcome["failed"].as_array().unwrap().is_empty());

    let (_, lights) = request(&app, "GET", "/api/lights", None).await;
    for light in lights.as_array().unwrap() {
        assert_eq!(light["state"]["on"], true);
    }
}

#[tokio::test]
async fn should_reject_group_with_unknown_member() {
    let app = app().await;
    let (status, _) = request(
        &app,
        "POST",
        "/api/groups",
        Some(serde_json::json!({"name": "Ghosts", "lights": [uuid::Uuid::new_v4()]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_prune_deleted_light_from_group() {
    let app = app().await;
    let lights = discover(&app).await;
    let ids: Vec<&str> = lights
        .iter()
        .map(|l| l["id"].as_str().unwrap())
        .collect();

    let (_, group) = request(
        &app,
        "POST",
        "/api/groups",
        Some(serde_json::json!({"name": "Shrinking", "lights": ids})),
    )
    .await;
    let group_id = group["id"].as_str().unwrap();

    let (status, _) = request(&app, "DELETE", &format!("/api/lights/{}", ids[0]), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, group) = request(&app, "GET", &format!("/api/groups/{group_id}"), None).await;
    let members = group["lights"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0], ids[1]);
}

// ---------------------------------------------------------------------------
// Schedules
// ---------------------------------------------------------------------------

fn monday_schedule(light_id: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Monday morning",
        "at": "07:30",
        "days": ["monday"],
        "actions": [
            {"target": {"type": "light", "id": light_id}, "change": {"on": true}}
        ]
    })
}

#[tokio::test]
async fn should_create_update_and_delete_schedule() {
    let app = app().await;
    let lights = discover(&app).await;
    let light_id = lights[0]["id"].as_str().unwrap();

    let (status, schedule) =
        request(&app, "POST", "/api/schedules", Some(monday_schedule(light_id))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(schedule["at"], "07:30");
    assert_eq!(schedule["enabled"], true);
    let schedule_id = schedule["id"].as_str().unwrap();

    let mut replacement = monday_schedule(light_id);
    replacement["name"] = serde_json::json!("Weekday morning");
    replacement["days"] = serde_json::json!(["monday", "tuesday", "wednesday"]);
    let (status, updated) = request(
        &app,
        "PUT",
        &format!("/api/schedules/{schedule_id}"),
        Some(replacement),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], schedule_id);
    assert_eq!(updated["days"].as_array().unwrap().len(), 3);

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/api/schedules/{schedule_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, schedules) = request(&app, "GET", "/api/schedules", None).await;
    assert!(schedules.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_reject_schedule_without_days() {
    let app = app().await;
    let lights = discover(&app).await;
    let mut body = monday_schedule(lights[0]["id"].as_str().unwrap());
    body["days"] = serde_json::json!([]);

    let (status, _) = request(&app, "POST", "/api/schedules", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_strip_deleted_light_from_schedule_actions() {
    let app = app().await;
    let lights = discover(&app).await;
    let doomed = lights[0]["id"].as_str().unwrap();
    let kept = lights[1]["id"].as_str().unwrap();

    let mut body = monday_schedule(doomed);
    body["actions"]
        .as_array_mut()
        .unwrap()
        .push(serde_json::json!(
            {"target": {"type": "light", "id": kept}, "change": {"on": true}}
        ));
    let (_, schedule) = request(&app, "POST", "/api/schedules", Some(body)).await;
    let schedule_id = schedule["id"].as_str().unwrap();

    request(&app, "DELETE", &format!("/api/lights/{doomed}"), None).await;

    let (_, schedule) = request(&app, "GET", &format!("/api/schedules/{schedule_id}"), None).await;
    let actions = schedule["actions"].as_array().unwrap();
    assert_eq!(actions.len(), 1);
    assert_eq!(actions[0]["target"]["id"], kept);
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_roundtrip_settings() {
    let app = app().await;

    let (status, settings) = request(&app, "GET", "/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["refresh_interval_secs"], 60);

    let (status, updated) = request(
        &app,
        "PUT",
        "/api/settings",
        Some(serde_json::json!({
            "discover_on_startup": false,
            "refresh_interval_secs": 120,
            "theme": "dark"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["theme"], "dark");

    let (_, settings) = request(&app, "GET", "/api/settings", None).await;
    assert_eq!(settings["refresh_interval_secs"], 120);
}

#[tokio::test]
async fn should_reject_out_of_range_refresh_interval() {
    let app = app().await;
    let (status, _) = request(
        &app,
        "PUT",
        "/api/settings",
        Some(serde_json::json!({"refresh_interval_secs": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
