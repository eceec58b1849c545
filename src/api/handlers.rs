use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::display::{mapper, MemberGroupDisplay};
use crate::groups::MemberGroup;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::identifier::GroupId;
use crate::localization::MEMBER_GROUP_SAVED_HEADER;
use crate::observability::metrics;

pub const DELETE_FAILED_TITLE: &str = "Issue during deletion - please see logs";
pub const SAVE_FAILED_TITLE: &str = "Issue during save - please see logs";

#[derive(Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub roles: usize,
}

/// Group id as submitted by an editor: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubmittedId {
    Number(i64),
    Text(String),
}

impl SubmittedId {
    fn to_i32(&self) -> Result<i32, ApiError> {
        let parsed = match self {
            SubmittedId::Number(n) => i32::try_from(*n).ok(),
            SubmittedId::Text(s) => s.trim().parse::<i32>().ok(),
        };
        parsed.ok_or_else(|| ApiError::BadRequest(format!("{:?} is not a valid member group id", self)))
    }
}

/// Body of a save request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberGroupSave {
    pub id: SubmittedId,
    #[serde(default)]
    pub name: String,
}

fn finish<T: IntoResponse>(
    operation: &'static str,
    start: Instant,
    result: Result<T, ApiError>,
) -> Response {
    let response = result.into_response();
    metrics::record_request(operation, response.status().as_u16(), start);
    response
}

/// Ids from `ids=1&ids=2`, `ids[]=1` or `ids=1,2`.
fn parse_ids(query: Option<&str>) -> Result<Vec<i32>, ApiError> {
    let Some(query) = query else {
        return Ok(Vec::new());
    };

    let mut ids = Vec::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key != "ids" && key != "ids[]" {
            continue;
        }
        for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let id = part
                .parse::<i32>()
                .map_err(|_| ApiError::BadRequest(format!("'{}' is not an integer id", part)))?;
            ids.push(id);
        }
    }
    Ok(ids)
}

pub async fn get_status(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let result = state.repository.role_count().await.map(|roles| {
        Json(SystemStatus {
            version: env!("CARGO_PKG_VERSION").to_string(),
            status: "operational".to_string(),
            roles,
        })
    });
    finish("status", start, result.map_err(ApiError::from))
}

pub async fn get_by_id(State(state): State<AppState>, Path(raw): Path<String>) -> Response {
    let start = Instant::now();
    let result = async {
        let id: GroupId = raw
            .parse()
            .map_err(|e: crate::identifier::IdentifierError| ApiError::NotFound(e.to_string()))?;
        tracing::debug!(group_id = %id, "Looking up member group");
        let resolved = state.repository.find(&id).await?;
        Ok::<_, ApiError>(Json(resolved.to_display()))
    }
    .await;
    finish("get_by_id", start, result)
}

pub async fn get_by_ids(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let start = Instant::now();
    let result = async {
        let ids = parse_ids(query.as_deref())?;
        let entries = state.repository.find_many(&ids).await?;
        Ok::<_, ApiError>(Json(entries))
    }
    .await;
    finish("get_by_ids", start, result)
}

pub async fn delete_by_id(State(state): State<AppState>, Path(raw): Path<String>) -> Response {
    let start = Instant::now();
    let result = async {
        let id: i32 = raw
            .parse()
            .map_err(|_| ApiError::NotFound(format!("'{}' is not an integer id", raw)))?;
        state
            .repository
            .delete(id)
            .await
            .map_err(|e| ApiError::from_group_error(e, DELETE_FAILED_TITLE))?;
        Ok::<_, ApiError>(StatusCode::OK)
    }
    .await;
    finish("delete", start, result)
}

pub async fn get_all_groups(State(state): State<AppState>) -> Response {
    let start = Instant::now();
    let result = state.repository.all().await.map(|roles| {
        Json(roles.iter().map(mapper::from_role).collect::<Vec<MemberGroupDisplay>>())
    });
    finish("get_all", start, result.map_err(ApiError::from))
}

pub async fn get_empty() -> Response {
    let start = Instant::now();
    let display = mapper::from_group(&MemberGroup::default());
    finish("get_empty", start, Ok::<_, ApiError>(Json(display)))
}

pub async fn post_save(
    State(state): State<AppState>,
    payload: Result<Json<MemberGroupSave>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let result = async {
        let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
        let id = payload.id.to_i32()?;
        let role = state
            .repository
            .rename(id, &payload.name)
            .await
            .map_err(|e| ApiError::from_group_error(e, SAVE_FAILED_TITLE))?;

        let mut display = mapper::from_role(&role);
        display.add_success_notification(state.localize(MEMBER_GROUP_SAVED_HEADER), "");
        Ok::<_, ApiError>(Json(display))
    }
    .await;
    finish("save", start, result)
}
