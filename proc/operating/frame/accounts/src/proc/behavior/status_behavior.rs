//! 状态目录命令定义

use base_types::account::error::FieldError;
use base_types::account::status::Status;
use base_types::cqrs::cqrs_types::CMetadata;
use base_types::StatusId;
use doc_repo::{PageResult, RepoError};

use crate::proc::behavior::account_behavior::ErrorKind;

/// 状态目录命令枚举
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusCmdAny {
    /// 新建目录行 POST /api/statuses
    Create(CreateStatusCmd),

    /// 目录行详情 GET /api/statuses/{id}
    Get(GetStatusCmd),

    /// 分页列表 GET /api/statuses
    PagedList(PagedStatusListCmd),
}

impl StatusCmdAny {
    /// 获取命令ID（用于响应回显）
    pub fn command_id(&self) -> String {
        match self {
            StatusCmdAny::Create(c) => c.metadata.command_id.clone(),
            StatusCmdAny::Get(c) => c.metadata.command_id.clone(),
            StatusCmdAny::PagedList(c) => c.metadata.command_id.clone(),
        }
    }
}

/// 新建目录行命令；ID 由状态名派生
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateStatusCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub name: String,
}

/// 目录行详情命令
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GetStatusCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub status_id: StatusId,
}

/// 分页列表命令；固定按 `_id` 升序
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagedStatusListCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub page: u64,
    pub limit: u64,
}

/// 状态目录命令响应枚举
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum StatusResAny {
    /// 单个目录行
    Status(Status),

    /// 目录分页
    Page(PageResult<Status>),
}

/// 状态目录命令错误
#[derive(Debug, Clone, PartialEq)]
pub enum StatusCmdError {
    /// 目录行不存在
    StatusNotFound { id: StatusId },
    /// 同名状态已存在（ID 派生冲突）
    DuplicateStatus { id: StatusId },
    /// 请求字段校验失败
    Validation { field: &'static str, message: String },
    /// 存储层错误
    Repo(RepoError),
}

impl StatusCmdError {
    /// 错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatusCmdError::StatusNotFound { .. } => ErrorKind::NotFound,
            StatusCmdError::DuplicateStatus { .. } => ErrorKind::Conflict,
            StatusCmdError::Validation { .. } => ErrorKind::Validation,
            StatusCmdError::Repo(RepoError::InvalidPageRequest { .. }) => ErrorKind::Validation,
            StatusCmdError::Repo(_) => ErrorKind::Internal,
        }
    }
}

impl std::fmt::Display for StatusCmdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StatusNotFound { .. } => write!(f, "Status not found."),
            Self::DuplicateStatus { id } => write!(f, "Status already exists: {}.", id),
            Self::Validation { field, message } => {
                write!(f, "Invalid field '{}': {}", field, message)
            }
            Self::Repo(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for StatusCmdError {}

impl From<RepoError> for StatusCmdError {
    fn from(e: RepoError) -> Self {
        Self::Repo(e)
    }
}

impl From<FieldError> for StatusCmdError {
    fn from(e: FieldError) -> Self {
        let field = match &e {
            FieldError::MissingField { field } => *field,
            FieldError::InvalidField { field, .. } => *field,
        };
        Self::Validation { field, message: e.to_string() }
    }
}
