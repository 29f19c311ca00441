//! 状态目录 REST 控制器

use std::sync::Arc;

use account_behavior::proc::behavior::status_behavior::{
    CreateStatusCmd, GetStatusCmd, PagedStatusListCmd, StatusCmdAny,
};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use base_types::cqrs::cqrs_types::CMetadata;
use base_types::handler::handler::Handler;
use base_types::StatusId;
use serde::Deserialize;
use uuid::Uuid;

use crate::interfaces::common::credentials::Capability;
use crate::interfaces::common::http_handler_util::{json_response, status_error_response};
use crate::interfaces::common::ins_repo::StatusCatalog;

/// GET /api/statuses 查询参数
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_limit() -> u64 {
    20
}

fn default_page() -> u64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CreatePayload {
    pub name: String,
}

fn meta() -> CMetadata {
    CMetadata::with_command_id(Uuid::new_v4().to_string())
}

/// GET /api/statuses
pub async fn list_statuses(
    State(catalog): State<Arc<StatusCatalog>>,
    capability: Capability,
    Query(query): Query<ListQuery>,
) -> Response {
    if let Err(rejection) = capability.require_admin() {
        return rejection.into_response();
    }

    let cmd = StatusCmdAny::PagedList(PagedStatusListCmd {
        metadata: meta(),
        page: query.page,
        limit: query.limit,
    });
    match catalog.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => status_error_response(err),
    }
}

/// POST /api/statuses
pub async fn create_status(
    State(catalog): State<Arc<StatusCatalog>>,
    capability: Capability,
    Json(payload): Json<CreatePayload>,
) -> Response {
    if let Err(rejection) = capability.require_admin() {
        return rejection.into_response();
    }

    let cmd = StatusCmdAny::Create(CreateStatusCmd { metadata: meta(), name: payload.name });
    match catalog.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => status_error_response(err),
    }
}

/// GET /api/statuses/{id}
pub async fn get_status(
    State(catalog): State<Arc<StatusCatalog>>,
    capability: Capability,
    Path(id): Path<String>,
) -> Response {
    if let Err(rejection) = capability.require_admin() {
        return rejection.into_response();
    }

    let cmd = StatusCmdAny::Get(GetStatusCmd { metadata: meta(), status_id: StatusId::new(id) });
    match catalog.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => status_error_response(err),
    }
}
