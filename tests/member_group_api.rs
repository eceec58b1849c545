//! End-to-end tests for the member groups API over real HTTP.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use member_groups::config::{SeedGroup, ServiceConfig};
use member_groups::groups::{InMemoryMemberGroupService, MemberGroupRepository};
use member_groups::http::server::AppState;
use member_groups::http::X_REQUEST_ID;
use member_groups::identity::{IdentityError, IdentityRole, RoleStore, RoleStoreError};
use member_groups::lifecycle::build_state;
use member_groups::localization::{TextCatalog, MEMBER_GROUP_SAVED_HEADER};

mod common;

const GOLD_KEY: &str = "7e1f9a4c-2b3d-4e5f-8a9b-0c1d2e3f4a5b";

fn seed(id: i32, name: &str, role: bool, legacy: bool) -> SeedGroup {
    SeedGroup {
        id,
        key: None,
        name: name.into(),
        creator_id: -1,
        role,
        legacy,
    }
}

fn seeded_config() -> ServiceConfig {
    let mut config = ServiceConfig::default();
    let mut gold = seed(1, "Gold", true, true);
    gold.key = Some(GOLD_KEY.parse().unwrap());
    gold.creator_id = 7;
    config.seed.groups = vec![
        gold,
        seed(2, "Silver", true, true),
        seed(3, "Role Only", true, false),
    ];
    config
}

async fn start(config: ServiceConfig) -> common::TestServer {
    let state = build_state(&config).await.unwrap();
    common::start_server(config, state).await
}

async fn json_of(res: reqwest::Response) -> Value {
    res.json().await.unwrap()
}

#[tokio::test]
async fn test_status_reports_role_count() {
    let server = start(seeded_config()).await;
    let res = reqwest::get(server.url("/status")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(X_REQUEST_ID));
    let body = json_of(res).await;
    assert_eq!(body["status"], "operational");
    assert_eq!(body["roles"], 3);

    server.stop().await;
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = start(seeded_config()).await;
    let client = reqwest::Client::new();
    let res = client
        .get(server.groups("/1"))
        .header(X_REQUEST_ID, "trace-me-42")
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers()[X_REQUEST_ID], "trace-me-42");
    server.stop().await;
}

#[tokio::test]
async fn test_lookup_by_every_id_form() {
    let server = start(seeded_config()).await;

    let res = reqwest::get(server.groups("/1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let by_int = json_of(res).await;
    assert_eq!(by_int["name"], "Gold");
    assert_eq!(by_int["key"], GOLD_KEY);
    assert_eq!(by_int["creatorId"], 7);
    assert_eq!(by_int["udi"], "umb://member-group/7e1f9a4c2b3d4e5f8a9b0c1d2e3f4a5b");

    let by_guid = json_of(reqwest::get(server.groups(&format!("/{}", GOLD_KEY))).await.unwrap()).await;
    assert_eq!(by_guid["id"], 1);
    assert_eq!(by_guid["name"], "Gold");

    let udi = "umb%3A%2F%2Fmember-group%2F7e1f9a4c2b3d4e5f8a9b0c1d2e3f4a5b";
    let by_udi = json_of(reqwest::get(server.groups(&format!("/{}", udi))).await.unwrap()).await;
    assert_eq!(by_udi["id"], 1);

    // Integer lookups need both stores; GUID lookups only the role.
    let res = reqwest::get(server.groups("/3")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.headers()["content-type"], "application/problem+json");

    let res = reqwest::get(server.groups(&format!("/{}", Uuid::new_v4()))).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_bulk_lookup_and_listing() {
    let server = start(seeded_config()).await;

    let body = json_of(
        reqwest::get(server.groups("/by-ids?ids=3&ids=40&ids=1"))
            .await
            .unwrap(),
    )
    .await;
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["group"]["name"], "Role Only");
    assert_eq!(entries[1], json!({"status": "not_found", "id": 40}));
    assert_eq!(entries[2]["status"], "found");

    let body = json_of(reqwest::get(server.groups("")).await.unwrap()).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let empty = json_of(reqwest::get(server.groups("/empty")).await.unwrap()).await;
    assert_eq!(empty["id"], 0);
    assert_eq!(empty["parentId"], -1);

    server.stop().await;
}

#[tokio::test]
async fn test_save_rename_and_rejections() {
    let server = start(seeded_config()).await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.groups(""))
        .json(&json!({"id": 2, "name": "Platinum"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let saved = json_of(res).await;
    assert_eq!(saved["name"], "Platinum");
    assert_eq!(saved["notifications"][0]["header"], "Member group saved");

    // Name clash with an existing role is reported with the store's reasons.
    let res = client
        .post(server.groups(""))
        .json(&json!({"id": 2, "name": "gold"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let problem = json_of(res).await;
    assert_eq!(problem["title"], "Issue during save - please see logs");
    assert_eq!(problem["errors"][0]["code"], "DuplicateRoleName");

    let res = client
        .post(server.groups(""))
        .json(&json!({"id": 2, "name": "  "}))
        .send()
        .await
        .unwrap();
    let problem = json_of(res).await;
    assert_eq!(problem["errors"][0]["code"], "InvalidRoleName");

    let res = client
        .post(server.groups(""))
        .json(&json!({"id": 0, "name": "New"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(server.groups(""))
        .json(&json!({"id": "two", "name": "New"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(server.groups(""))
        .json(&json!({"id": 1.5, "name": "New"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.headers()["content-type"], "application/problem+json");

    let res = client
        .post(server.groups(""))
        .json(&json!({"name": "New"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_of(res).await["status"], 400);

    server.stop().await;
}

#[tokio::test]
async fn test_delete_removes_role_only() {
    let server = start(seeded_config()).await;
    let client = reqwest::Client::new();

    let res = client.delete(server.groups("/2")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = reqwest::get(server.groups("/2")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.post(server.groups("/3/delete")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client.delete(server.groups("/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let status = json_of(reqwest::get(server.url("/status")).await.unwrap()).await;
    assert_eq!(status["roles"], 1);

    server.stop().await;
}

#[tokio::test]
async fn test_custom_base_path_and_body_limit() {
    let mut config = seeded_config();
    config.http.base_path = "/umbraco/member-groups".to_string();
    config.security.max_body_size = 256;
    let server = start(config).await;

    let res = reqwest::get(server.url("/umbraco/member-groups/1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = reqwest::get(server.url("/api/member-groups/1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = reqwest::Client::new()
        .post(server.groups(""))
        .json(&json!({"id": 1, "name": "x".repeat(1024)}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);

    server.stop().await;
}

#[tokio::test]
async fn test_config_reload_swaps_texts() {
    let server = start(seeded_config()).await;
    let client = reqwest::Client::new();

    let mut reloaded = seeded_config();
    reloaded.localization.culture = "da-DK".to_string();
    reloaded
        .localization
        .texts
        .insert(MEMBER_GROUP_SAVED_HEADER.to_string(), "Medlemsgruppe gemt".to_string());
    server.config_updates.send(reloaded).unwrap();

    let mut header = Value::Null;
    for _ in 0..20 {
        let saved = json_of(
            client
                .post(server.groups(""))
                .json(&json!({"id": 1, "name": "Gold"}))
                .send()
                .await
                .unwrap(),
        )
        .await;
        header = saved["notifications"][0]["header"].clone();
        if header == "Medlemsgruppe gemt" {
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    assert_eq!(header, "Medlemsgruppe gemt");

    server.stop().await;
}

/// Role store that finds every role but refuses to change any.
struct ReadOnlyRoleStore;

#[async_trait]
impl RoleStore for ReadOnlyRoleStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<IdentityRole>, RoleStoreError> {
        Ok(id
            .parse::<i32>()
            .ok()
            .map(|n| IdentityRole::new(n, Uuid::nil(), format!("Group {}", n))))
    }

    async fn create(&self, _role: IdentityRole) -> Result<(), RoleStoreError> {
        Err(RoleStoreError::Unavailable("read-only".into()))
    }

    async fn update(&self, _role: &IdentityRole) -> Result<(), RoleStoreError> {
        Err(RoleStoreError::Rejected(vec![
            IdentityError::new("ConcurrencyFailure", "Optimistic concurrency failure."),
            IdentityError::new("Locked", "Role is locked."),
        ]))
    }

    async fn delete(&self, _role: &IdentityRole) -> Result<(), RoleStoreError> {
        Err(RoleStoreError::Unavailable("connection reset".into()))
    }

    async fn roles(&self) -> Result<Vec<IdentityRole>, RoleStoreError> {
        Err(RoleStoreError::Unavailable("connection reset".into()))
    }
}

#[tokio::test]
async fn test_store_failures_become_problems() {
    let repository = MemberGroupRepository::new(
        Arc::new(ReadOnlyRoleStore),
        Arc::new(InMemoryMemberGroupService::new()),
    );
    let state = AppState::new(repository, TextCatalog::default());
    let server = common::start_server(ServiceConfig::default(), state).await;
    let client = reqwest::Client::new();

    let res = client.delete(server.groups("/5")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let problem = json_of(res).await;
    assert_eq!(problem["title"], "Issue during deletion - please see logs");
    assert!(problem["detail"].as_str().unwrap().contains("connection reset"));
    assert!(problem.get("errors").is_none());

    let res = client
        .post(server.groups(""))
        .json(&json!({"id": 5, "name": "Renamed"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let problem = json_of(res).await;
    let codes: Vec<&str> = problem["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["ConcurrencyFailure", "Locked"]);

    let res = reqwest::get(server.groups("")).await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Bulk lookup only reads, so it still works.
    let body = json_of(reqwest::get(server.groups("/by-ids?ids=5")).await.unwrap()).await;
    assert_eq!(body[0]["group"]["name"], "Group 5");

    server.stop().await;
}
