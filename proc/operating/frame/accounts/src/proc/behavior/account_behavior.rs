//! 账户服务命令定义
//!
//! 每个 REST 端点对应一个命令结构体，入站参数在这里定型；
//! 鉴权范围（admin / account）由外层在构造命令之前裁决，
//! 命令只携带已经通过裁决的操作者信息

use std::cmp::Ordering;

use base_types::account::account::{Account, AccountName, UserLink};
use base_types::account::admin::AdminActor;
use base_types::account::error::FieldError;
use base_types::cqrs::cqrs_types::CMetadata;
use base_types::{AccountId, StatusId, Timestamp, UserId, Username};
use doc_repo::{PageResult, RepoError};

// ============================================================================
// 命令定义
// ============================================================================

/// 账户命令枚举
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccountCmdAny {
    /// 创建账户 POST /api/accounts
    Create(CreateAccountCmd),

    /// 账户详情 GET /api/accounts/{id}
    Get(GetAccountCmd),

    /// 更新姓名 PUT /api/accounts/{id}
    Update(UpdateAccountCmd),

    /// 删除账户 DELETE /api/accounts/{id}（外层要求 root 管理组）
    Delete(DeleteAccountCmd),

    /// 链接用户 PUT /api/accounts/{id}/user
    LinkUser(LinkUserCmd),

    /// 解除用户链接 DELETE /api/accounts/{id}/user
    UnlinkUser(UnlinkUserCmd),

    /// 追加备注 POST /api/accounts/{id}/notes
    AddNote(AddNoteCmd),

    /// 写入状态 POST /api/accounts/{id}/status
    SetStatus(SetStatusCmd),

    /// 分页列表 GET /api/accounts
    PagedList(PagedListCmd),

    /// 本人账户详情 GET /api/accounts/my
    GetMy(GetMyCmd),

    /// 更新本人账户 PUT /api/accounts/my
    UpdateMy(UpdateMyCmd),
}

impl AccountCmdAny {
    /// 获取命令ID（用于响应回显）
    pub fn command_id(&self) -> String {
        match self {
            AccountCmdAny::Create(c) => c.metadata.command_id.clone(),
            AccountCmdAny::Get(c) => c.metadata.command_id.clone(),
            AccountCmdAny::Update(c) => c.metadata.command_id.clone(),
            AccountCmdAny::Delete(c) => c.metadata.command_id.clone(),
            AccountCmdAny::LinkUser(c) => c.metadata.command_id.clone(),
            AccountCmdAny::UnlinkUser(c) => c.metadata.command_id.clone(),
            AccountCmdAny::AddNote(c) => c.metadata.command_id.clone(),
            AccountCmdAny::SetStatus(c) => c.metadata.command_id.clone(),
            AccountCmdAny::PagedList(c) => c.metadata.command_id.clone(),
            AccountCmdAny::GetMy(c) => c.metadata.command_id.clone(),
            AccountCmdAny::UpdateMy(c) => c.metadata.command_id.clone(),
        }
    }
}

/// 姓名载荷 {first, middle?, last}
///
/// 未经校验的原始形状，服务端通过 AccountName::from_parts 定型
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamePayload {
    pub first: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub middle: Option<String>,
    pub last: String,
}

impl NamePayload {
    /// 校验并定型为 AccountName
    pub fn into_name(self) -> Result<AccountName, FieldError> {
        AccountName::from_parts(self.first, self.middle, self.last)
    }
}

/// 创建账户命令；name 为全名字符串，由服务端拆分
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateAccountCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub name: String,
}

/// 账户详情命令
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GetAccountCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub account_id: AccountId,
}

/// 更新姓名命令
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateAccountCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub account_id: AccountId,
    pub name: NamePayload,
}

/// 删除账户命令
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeleteAccountCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub account_id: AccountId,
}

/// 链接用户命令；username 在服务端做小写归一化
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkUserCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub account_id: AccountId,
    pub username: String,
}

/// 解除用户链接命令
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnlinkUserCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub account_id: AccountId,
}

/// 追加备注命令；admin 为操作管理员的审计信息
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddNoteCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub account_id: AccountId,
    pub data: String,
    pub admin: AdminActor,
}

/// 写入状态命令；status 为目录ID
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetStatusCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub account_id: AccountId,
    pub status: StatusId,
    pub admin: AdminActor,
}

/// 分页列表命令
///
/// sort 为原始字符串，在任何查询之前按白名单校验
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagedListCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub page: u64,
    pub limit: u64,
    pub sort: String,
}

/// 本人账户详情命令；account_id 取自认证身份，不来自路径
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GetMyCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub account_id: AccountId,
}

/// 更新本人账户命令
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateMyCmd {
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: CMetadata,
    pub account_id: AccountId,
    pub name: NamePayload,
}

// ============================================================================
// 响应定义
// ============================================================================

/// 账户命令响应枚举
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AccountResAny {
    /// 单个账户文档
    Account(Account),

    /// 账户分页
    Page(PageResult<Account>),

    /// 本人账户投影（缩减字段集）
    My(MyAccountView),

    /// 删除确认
    Deleted(DeletedRes),
}

/// 删除确认消息
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeletedRes {
    pub message: String,
}

impl DeletedRes {
    pub fn success() -> Self {
        Self { message: "Success.".to_string() }
    }
}

/// 本人账户投影 {_id, user, name, timeCreated}
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MyAccountView {
    #[cfg_attr(feature = "serde", serde(rename = "_id"))]
    pub id: AccountId,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub user: Option<UserLink>,
    pub name: AccountName,
    pub time_created: Timestamp,
}

impl From<Account> for MyAccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id(),
            user: account.user().cloned(),
            name: account.name().clone(),
            time_created: account.time_created(),
        }
    }
}

// ============================================================================
// 排序白名单
// ============================================================================

/// 账户列表允许的排序字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountSortField {
    /// 主键 `_id`
    Id,
    /// 展示全名 `name`
    Name,
    /// 创建时间 `timeCreated`
    TimeCreated,
}

/// 已校验的排序说明；前缀 `-` 表示降序
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: AccountSortField,
    pub descending: bool,
}

impl SortSpec {
    /// 解析排序参数，白名单之外的字段直接拒绝（不静默回退默认值）
    pub fn parse(raw: &str) -> Result<Self, AccountCmdError> {
        let (descending, field_name) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let field = match field_name {
            "_id" => AccountSortField::Id,
            "name" => AccountSortField::Name,
            "timeCreated" => AccountSortField::TimeCreated,
            _ => {
                return Err(AccountCmdError::Validation {
                    field: "sort",
                    message: format!("unknown sort field: {}", raw),
                });
            }
        };

        Ok(Self { field, descending })
    }

    /// 生成仓储用的比较器
    pub fn comparator(&self) -> impl Fn(&Account, &Account) -> Ordering {
        let Self { field, descending } = *self;
        move |a, b| {
            let ord = match field {
                AccountSortField::Id => a.id().cmp(&b.id()),
                AccountSortField::Name => a.full_name().cmp(&b.full_name()),
                AccountSortField::TimeCreated => a.time_created().cmp(&b.time_created()),
            };
            if descending { ord.reverse() } else { ord }
        }
    }
}

impl Default for SortSpec {
    /// 默认主键升序
    fn default() -> Self {
        Self { field: AccountSortField::Id, descending: false }
    }
}

// ============================================================================
// 错误类型定义
// ============================================================================

/// 错误类别标签（对外稳定）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Validation,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Validation => "Validation",
            ErrorKind::Internal => "Internal",
        }
    }
}

/// 账户命令错误
#[derive(Debug, Clone, PartialEq)]
pub enum AccountCmdError {
    /// 账户不存在
    AccountNotFound { id: AccountId },
    /// 用户名未命中任何用户
    UserNotFound { username: Username },
    /// 账户侧链接指向已不存在的用户（完整性问题，按 NotFound 暴露）
    LinkedUserMissing { id: UserId },
    /// 状态目录中无此状态
    StatusNotFound { id: StatusId },
    /// 目标用户已链接到其他账户
    UserAlreadyLinked { username: Username },
    /// 目标账户已链接到其他用户
    AccountAlreadyLinked { id: AccountId },
    /// 请求字段校验失败
    Validation { field: &'static str, message: String },
    /// 存储层错误
    Repo(RepoError),
}

impl AccountCmdError {
    /// 错误类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountCmdError::AccountNotFound { .. }
            | AccountCmdError::UserNotFound { .. }
            | AccountCmdError::LinkedUserMissing { .. }
            | AccountCmdError::StatusNotFound { .. } => ErrorKind::NotFound,
            AccountCmdError::UserAlreadyLinked { .. }
            | AccountCmdError::AccountAlreadyLinked { .. } => ErrorKind::Conflict,
            AccountCmdError::Validation { .. } => ErrorKind::Validation,
            AccountCmdError::Repo(RepoError::InvalidPageRequest { .. }) => ErrorKind::Validation,
            AccountCmdError::Repo(_) => ErrorKind::Internal,
        }
    }
}

impl std::fmt::Display for AccountCmdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccountNotFound { .. } => write!(f, "Account not found."),
            Self::UserNotFound { .. } => write!(f, "User not found."),
            Self::LinkedUserMissing { id } => {
                write!(f, "User not found. Account link references missing user {}.", id)
            }
            Self::StatusNotFound { .. } => write!(f, "Status not found."),
            Self::UserAlreadyLinked { .. } => {
                write!(f, "User is linked to an account. Unlink first.")
            }
            Self::AccountAlreadyLinked { .. } => {
                write!(f, "Account is linked to a user. Unlink first.")
            }
            Self::Validation { field, message } => {
                write!(f, "Invalid field '{}': {}", field, message)
            }
            Self::Repo(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AccountCmdError {}

impl From<RepoError> for AccountCmdError {
    fn from(e: RepoError) -> Self {
        Self::Repo(e)
    }
}

impl From<FieldError> for AccountCmdError {
    fn from(e: FieldError) -> Self {
        let field = match &e {
            FieldError::MissingField { field } => *field,
            FieldError::InvalidField { field, .. } => *field,
        };
        Self::Validation { field, message: e.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_spec_parses_whitelisted_fields() {
        let sort = SortSpec::parse("_id").unwrap();
        assert_eq!(sort.field, AccountSortField::Id);
        assert!(!sort.descending);

        let sort = SortSpec::parse("-timeCreated").unwrap();
        assert_eq!(sort.field, AccountSortField::TimeCreated);
        assert!(sort.descending);
    }

    #[test]
    fn sort_spec_rejects_unknown_field() {
        let err = SortSpec::parse("notes").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn error_kinds_are_stable() {
        assert_eq!(AccountCmdError::AccountNotFound { id: AccountId(1) }.kind(), ErrorKind::NotFound);
        assert_eq!(
            AccountCmdError::UserAlreadyLinked { username: Username::new("janed") }.kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            AccountCmdError::Repo(RepoError::Backend { message: "x".into() }).kind(),
            ErrorKind::Internal
        );
    }
}
