use account_behavior::proc::behavior::account_behavior::{AccountCmdError, ErrorKind};
use account_behavior::proc::behavior::status_behavior::StatusCmdError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base_types::cqrs::cqrs_types::CmdResp;
use serde::Serialize;

// ==================== 通用 JSON 响应创建 ====================

/// 泛型函数统一处理成功响应序列化
#[inline]
pub fn json_response<T: Serialize>(resp: CmdResp<T>) -> Response {
    (StatusCode::OK, Json(resp)).into_response()
}

// ==================== 通用错误处理 ====================

/// 错误响应体 {error, message}，error 为稳定的类别标签
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

fn kind_status(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// 账户命令错误 -> HTTP 响应
pub fn account_error_response(err: AccountCmdError) -> Response {
    let kind = err.kind();
    if kind == ErrorKind::Internal {
        tracing::error!("account command failed: {}", err);
    }
    let body = ErrorBody { error: kind.as_str(), message: err.to_string() };

    (kind_status(kind), Json(body)).into_response()
}

/// 状态目录命令错误 -> HTTP 响应
pub fn status_error_response(err: StatusCmdError) -> Response {
    let kind = err.kind();
    if kind == ErrorKind::Internal {
        tracing::error!("status command failed: {}", err);
    }
    let body = ErrorBody { error: kind.as_str(), message: err.to_string() };

    (kind_status(kind), Json(body)).into_response()
}
