//! 认证凭证解码与能力检查
//!
//! 会话/口令校验由上游认证层完成，本层只负责把它附加在请求上的
//! 身份头解码成类型化的 Capability，并在调用核心服务之前做范围检查。
//! 核心服务的命令只携带检查通过后的操作者信息，不读取任何请求环境
// todo 网关挂载签名凭证头之后，替换这里对明文 header 的信任

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use base_types::account::admin::AdminActor;
use base_types::{AccountId, AdminId};

pub const SCOPE_HEADER: &str = "x-credentials-scope";
pub const ADMIN_ID_HEADER: &str = "x-credentials-admin-id";
pub const ADMIN_NAME_HEADER: &str = "x-credentials-admin-name";
pub const ADMIN_GROUPS_HEADER: &str = "x-credentials-admin-groups";
pub const ACCOUNT_ID_HEADER: &str = "x-credentials-account-id";

/// 调用方能力（类型化的授权范围）
#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    /// admin 范围：携带审计用的管理员身份与其管理组
    Admin { actor: AdminActor, groups: Vec<String> },
    /// account 范围：只能操作自己链接的账户
    Account { account_id: AccountId },
}

impl Capability {
    /// 从上游认证层附加的身份头解码
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, CredentialsError> {
        let scope = headers
            .get(SCOPE_HEADER)
            .ok_or(CredentialsError::Missing)?
            .to_str()
            .map_err(|_| CredentialsError::Malformed("scope"))?;

        match scope {
            "admin" => {
                let id: u64 = header_str(headers, ADMIN_ID_HEADER)?
                    .parse()
                    .map_err(|_| CredentialsError::Malformed("admin id"))?;
                let name = header_str(headers, ADMIN_NAME_HEADER)?.to_string();
                let actor = AdminActor::new(AdminId(id), name);
                actor.validate().map_err(|_| CredentialsError::Malformed("admin identity"))?;

                let groups = headers
                    .get(ADMIN_GROUPS_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .map(|raw| {
                        raw.split(',')
                            .map(str::trim)
                            .filter(|g| !g.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();

                Ok(Capability::Admin { actor, groups })
            }
            "account" => {
                let id: u64 = header_str(headers, ACCOUNT_ID_HEADER)?
                    .parse()
                    .map_err(|_| CredentialsError::Malformed("account id"))?;

                Ok(Capability::Account { account_id: AccountId(id) })
            }
            _ => Err(CredentialsError::Malformed("scope")),
        }
    }

    /// admin 范围检查，返回审计身份
    pub fn require_admin(&self) -> Result<&AdminActor, CredentialsError> {
        match self {
            Capability::Admin { actor, .. } => Ok(actor),
            Capability::Account { .. } => Err(CredentialsError::WrongScope("admin")),
        }
    }

    /// admin 范围 + 指定管理组成员
    pub fn require_admin_group(&self, group: &str) -> Result<&AdminActor, CredentialsError> {
        match self {
            Capability::Admin { actor, groups } => {
                if groups.iter().any(|g| g == group) {
                    Ok(actor)
                } else {
                    Err(CredentialsError::MissingGroup(group.to_string()))
                }
            }
            Capability::Account { .. } => Err(CredentialsError::WrongScope("admin")),
        }
    }

    /// account 范围检查，返回调用者自己链接的账户ID
    pub fn require_account(&self) -> Result<AccountId, CredentialsError> {
        match self {
            Capability::Account { account_id } => Ok(*account_id),
            Capability::Admin { .. } => Err(CredentialsError::WrongScope("account")),
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, CredentialsError> {
    headers
        .get(name)
        .ok_or(CredentialsError::Missing)?
        .to_str()
        .map_err(|_| CredentialsError::Malformed(name))
}

impl<S: Send + Sync> FromRequestParts<S> for Capability {
    type Rejection = CredentialsError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Capability::from_headers(&parts.headers)
    }
}

/// 凭证错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    /// 凭证缺失 -> 401
    Missing,
    /// 凭证存在但无法解码 -> 401
    Malformed(&'static str),
    /// 范围不符 -> 403
    WrongScope(&'static str),
    /// 缺少要求的管理组 -> 403
    MissingGroup(String),
}

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "Missing credentials."),
            Self::Malformed(what) => write!(f, "Malformed credentials: {}.", what),
            Self::WrongScope(scope) => write!(f, "Insufficient scope, '{}' required.", scope),
            Self::MissingGroup(group) => {
                write!(f, "Missing permissions to the '{}' admin group.", group)
            }
        }
    }
}

impl std::error::Error for CredentialsError {}

impl IntoResponse for CredentialsError {
    fn into_response(self) -> Response {
        let status = match &self {
            CredentialsError::Missing | CredentialsError::Malformed(_) => {
                StatusCode::UNAUTHORIZED
            }
            CredentialsError::WrongScope(_) | CredentialsError::MissingGroup(_) => {
                StatusCode::FORBIDDEN
            }
        };
        let body = serde_json::json!({
            "error": "Unauthorized",
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
