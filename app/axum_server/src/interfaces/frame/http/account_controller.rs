//! 账户 REST 控制器
//!
//! 每个 handler 做三件事：范围检查、把请求定型为命令、调用服务。
//! "my" 端点的账户ID取自凭证，绝不取自路径

use std::sync::Arc;

use account_behavior::proc::behavior::account_behavior::{
    AccountCmdAny, AddNoteCmd, CreateAccountCmd, DeleteAccountCmd, GetAccountCmd, GetMyCmd,
    LinkUserCmd, NamePayload, PagedListCmd, SetStatusCmd, UnlinkUserCmd, UpdateAccountCmd,
    UpdateMyCmd,
};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use base_types::cqrs::cqrs_types::CMetadata;
use base_types::handler::handler::Handler;
use base_types::{AccountId, StatusId};
use serde::Deserialize;
use uuid::Uuid;

use crate::interfaces::common::credentials::Capability;
use crate::interfaces::common::http_handler_util::{account_error_response, json_response};
use crate::interfaces::common::ins_repo::AccountService;

// ==================== 请求载荷 ====================

/// GET /api/accounts 查询参数
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_sort() -> String {
    "_id".to_string()
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

#[derive(Debug, Deserialize)]
pub struct UpdatePayload {
    pub name: NamePayload,
}

#[derive(Debug, Deserialize)]
pub struct LinkUserPayload {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct NotePayload {
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

fn meta() -> CMetadata {
    CMetadata::with_command_id(Uuid::new_v4().to_string())
}

// ==================== admin 范围 ====================

/// GET /api/accounts
pub async fn list_accounts(
    State(service): State<Arc<AccountService>>,
    capability: Capability,
    Query(query): Query<ListQuery>,
) -> Response {
    if let Err(rejection) = capability.require_admin() {
        return rejection.into_response();
    }

    let cmd = AccountCmdAny::PagedList(PagedListCmd {
        metadata: meta(),
        page: query.page,
        limit: query.limit,
        sort: query.sort,
    });
    match service.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => account_error_response(err),
    }
}

/// POST /api/accounts
pub async fn create_account(
    State(service): State<Arc<AccountService>>,
    capability: Capability,
    Json(payload): Json<CreatePayload>,
) -> Response {
    if let Err(rejection) = capability.require_admin() {
        return rejection.into_response();
    }

    let cmd = AccountCmdAny::Create(CreateAccountCmd { metadata: meta(), name: payload.name });
    match service.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => account_error_response(err),
    }
}

/// GET /api/accounts/{id}
pub async fn get_account(
    State(service): State<Arc<AccountService>>,
    capability: Capability,
    Path(id): Path<u64>,
) -> Response {
    if let Err(rejection) = capability.require_admin() {
        return rejection.into_response();
    }

    let cmd = AccountCmdAny::Get(GetAccountCmd { metadata: meta(), account_id: AccountId(id) });
    match service.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => account_error_response(err),
    }
}

/// PUT /api/accounts/{id}
pub async fn update_account(
    State(service): State<Arc<AccountService>>,
    capability: Capability,
    Path(id): Path<u64>,
    Json(payload): Json<UpdatePayload>,
) -> Response {
    if let Err(rejection) = capability.require_admin() {
        return rejection.into_response();
    }

    let cmd = AccountCmdAny::Update(UpdateAccountCmd {
        metadata: meta(),
        account_id: AccountId(id),
        name: payload.name,
    });
    match service.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => account_error_response(err),
    }
}

/// DELETE /api/accounts/{id}（需要 root 管理组）
pub async fn delete_account(
    State(service): State<Arc<AccountService>>,
    capability: Capability,
    Path(id): Path<u64>,
) -> Response {
    if let Err(rejection) = capability.require_admin_group("root") {
        return rejection.into_response();
    }

    let cmd =
        AccountCmdAny::Delete(DeleteAccountCmd { metadata: meta(), account_id: AccountId(id) });
    match service.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => account_error_response(err),
    }
}

/// PUT /api/accounts/{id}/user
pub async fn link_user(
    State(service): State<Arc<AccountService>>,
    capability: Capability,
    Path(id): Path<u64>,
    Json(payload): Json<LinkUserPayload>,
) -> Response {
    if let Err(rejection) = capability.require_admin() {
        return rejection.into_response();
    }

    let cmd = AccountCmdAny::LinkUser(LinkUserCmd {
        metadata: meta(),
        account_id: AccountId(id),
        username: payload.username,
    });
    match service.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => account_error_response(err),
    }
}

/// DELETE /api/accounts/{id}/user
pub async fn unlink_user(
    State(service): State<Arc<AccountService>>,
    capability: Capability,
    Path(id): Path<u64>,
) -> Response {
    if let Err(rejection) = capability.require_admin() {
        return rejection.into_response();
    }

    let cmd =
        AccountCmdAny::UnlinkUser(UnlinkUserCmd { metadata: meta(), account_id: AccountId(id) });
    match service.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => account_error_response(err),
    }
}

/// POST /api/accounts/{id}/notes
pub async fn add_note(
    State(service): State<Arc<AccountService>>,
    capability: Capability,
    Path(id): Path<u64>,
    Json(payload): Json<NotePayload>,
) -> Response {
    let admin = match capability.require_admin() {
        Ok(actor) => actor.clone(),
        Err(rejection) => return rejection.into_response(),
    };

    let cmd = AccountCmdAny::AddNote(AddNoteCmd {
        metadata: meta(),
        account_id: AccountId(id),
        data: payload.data,
        admin,
    });
    match service.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => account_error_response(err),
    }
}

/// POST /api/accounts/{id}/status
pub async fn set_status(
    State(service): State<Arc<AccountService>>,
    capability: Capability,
    Path(id): Path<u64>,
    Json(payload): Json<StatusPayload>,
) -> Response {
    let admin = match capability.require_admin() {
        Ok(actor) => actor.clone(),
        Err(rejection) => return rejection.into_response(),
    };

    let cmd = AccountCmdAny::SetStatus(SetStatusCmd {
        metadata: meta(),
        account_id: AccountId(id),
        status: StatusId::new(payload.status),
        admin,
    });
    match service.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => account_error_response(err),
    }
}

// ==================== account 范围 ====================

/// GET /api/accounts/my
pub async fn get_my_account(
    State(service): State<Arc<AccountService>>,
    capability: Capability,
) -> Response {
    let account_id = match capability.require_account() {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    let cmd = AccountCmdAny::GetMy(GetMyCmd { metadata: meta(), account_id });
    match service.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => account_error_response(err),
    }
}

/// PUT /api/accounts/my
pub async fn update_my_account(
    State(service): State<Arc<AccountService>>,
    capability: Capability,
    Json(payload): Json<UpdatePayload>,
) -> Response {
    let account_id = match capability.require_account() {
        Ok(id) => id,
        Err(rejection) => return rejection.into_response(),
    };

    let cmd =
        AccountCmdAny::UpdateMy(UpdateMyCmd { metadata: meta(), account_id, name: payload.name });
    match service.handle(cmd).await {
        Ok(resp) => json_response(resp),
        Err(err) => account_error_response(err),
    }
}
