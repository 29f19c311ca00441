//! 账户聚合定义

use crate::account::error::FieldError;
use crate::account::note_entry::NoteEntry;
use crate::account::status_entry::StatusEntry;
use crate::{AccountId, Timestamp, UserId, Username};

/// 结构化姓名 {first, middle, last}
///
/// first/last 必填；middle 允许缺失或为空串
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountName {
    pub first: String,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub middle: Option<String>,
    pub last: String,
}

impl AccountName {
    /// 从全名字符串拆分
    ///
    /// 首词 -> first，末词 -> last，中间部分合并为 middle；
    /// 不足两个词视为校验失败（first/last 均为必填）
    pub fn parse(full: &str) -> Result<Self, FieldError> {
        let mut parts: Vec<&str> = full.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(FieldError::InvalidField {
                field: "name",
                reason: "expected at least a first and a last name",
            });
        }

        let last = parts.pop().map(str::to_string).unwrap_or_default();
        let first = parts.remove(0).to_string();
        let middle = if parts.is_empty() { None } else { Some(parts.join(" ")) };

        Ok(Self { first, middle, last })
    }

    /// 从结构化字段构造（更新接口的载荷形状）
    pub fn from_parts(
        first: impl Into<String>,
        middle: Option<String>,
        last: impl Into<String>,
    ) -> Result<Self, FieldError> {
        let first = first.into();
        let last = last.into();
        if first.trim().is_empty() {
            return Err(FieldError::MissingField { field: "name.first" });
        }
        if last.trim().is_empty() {
            return Err(FieldError::MissingField { field: "name.last" });
        }

        Ok(Self { first, middle, last })
    }

    /// 拼接展示全名，空的 middle 不参与
    pub fn full_name(&self) -> String {
        let mut parts = vec![self.first.as_str()];
        if let Some(middle) = self.middle.as_deref() {
            if !middle.is_empty() {
                parts.push(middle);
            }
        }
        parts.push(self.last.as_str());
        parts.join(" ")
    }
}

/// 账户侧的用户链接 {id, username}
///
/// id 建模为 Option：存量数据中存在只剩 username 的残缺链接，
/// 解链接的自愈路径必须能表达这种状态
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserLink {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub id: Option<UserId>,
    pub username: Username,
}

/// 状态日志：当前指针 + 只追加日志
///
/// current 是最新条目的反规范化副本，与 log 的末尾在同一次
/// 文档写入中一起更新
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusLog {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    current: Option<StatusEntry>,
    log: Vec<StatusEntry>,
}

impl StatusLog {
    #[inline]
    pub fn current(&self) -> Option<&StatusEntry> { self.current.as_ref() }

    #[inline]
    pub fn log(&self) -> &[StatusEntry] { &self.log }
}

/// 账户聚合
///
/// 持久化形状：`{_id, name, user?, notes, status, timeCreated}`
/// notes 与 status.log 只追加；已写入的条目不再对外暴露可变引用
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Account {
    #[cfg_attr(feature = "serde", serde(rename = "_id"))]
    id: AccountId,
    name: AccountName,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    user: Option<UserLink>,
    notes: Vec<NoteEntry>,
    status: StatusLog,
    time_created: Timestamp,
}

impl Account {
    /// 创建新账户：空备注、空状态日志、无用户链接
    pub fn new(id: AccountId, name: AccountName, now: Timestamp) -> Self {
        Self {
            id,
            name,
            user: None,
            notes: Vec::new(),
            status: StatusLog::default(),
            time_created: now,
        }
    }

    #[inline]
    pub fn id(&self) -> AccountId { self.id }

    #[inline]
    pub fn name(&self) -> &AccountName { &self.name }

    #[inline]
    pub fn user(&self) -> Option<&UserLink> { self.user.as_ref() }

    #[inline]
    pub fn notes(&self) -> &[NoteEntry] { &self.notes }

    #[inline]
    pub fn status(&self) -> &StatusLog { &self.status }

    #[inline]
    pub fn time_created(&self) -> Timestamp { self.time_created }

    /// 展示全名
    #[inline]
    pub fn full_name(&self) -> String { self.name.full_name() }

    /// 当前链接的用户ID（如有）
    #[inline]
    pub fn linked_user(&self) -> Option<UserId> {
        self.user.as_ref().and_then(|link| link.id)
    }

    /// 更新姓名
    pub fn set_name(&mut self, name: AccountName) {
        self.name = name;
    }

    /// 建立到用户的链接（账户侧写入）
    pub fn link_user(&mut self, user_id: UserId, username: Username) {
        self.user = Some(UserLink { id: Some(user_id), username });
    }

    /// 清除用户链接（账户侧写入）
    ///
    /// 残缺链接（只有 username 没有 id）也会被一并清掉
    pub fn clear_user_link(&mut self) {
        self.user = None;
    }

    /// 追加备注条目
    pub fn push_note(&mut self, note: NoteEntry) {
        self.notes.push(note);
    }

    /// 写入新状态：current 与 log 末尾在同一次调用里一起更新
    pub fn set_status(&mut self, entry: StatusEntry) {
        self.status.current = Some(entry.clone());
        self.status.log.push(entry);
    }

    /// 仅用于适配存量残缺数据的测试和迁移工具
    #[doc(hidden)]
    pub fn set_partial_user_link(&mut self, username: Username) {
        self.user = Some(UserLink { id: None, username });
    }
}

impl doc_repo::Doc for Account {
    type Id = AccountId;

    fn id(&self) -> AccountId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::admin::AdminActor;
    use crate::{AdminId, StatusId};

    fn account() -> Account {
        Account::new(AccountId(1), AccountName::parse("Jane Q Doe").unwrap(), Timestamp(100))
    }

    #[test]
    fn parse_splits_first_middle_last() {
        let name = AccountName::parse("Jane Q Doe").unwrap();
        assert_eq!(name.first, "Jane");
        assert_eq!(name.middle.as_deref(), Some("Q"));
        assert_eq!(name.last, "Doe");
        assert_eq!(name.full_name(), "Jane Q Doe");

        let name = AccountName::parse("Jane Doe").unwrap();
        assert_eq!(name.middle, None);
        assert_eq!(name.full_name(), "Jane Doe");

        let name = AccountName::parse("Jane van der Doe").unwrap();
        assert_eq!(name.middle.as_deref(), Some("van der"));
    }

    #[test]
    fn parse_rejects_single_token() {
        assert!(AccountName::parse("Jane").is_err());
        assert!(AccountName::parse("   ").is_err());
    }

    #[test]
    fn new_account_is_empty() {
        let account = account();
        assert!(account.user().is_none());
        assert!(account.notes().is_empty());
        assert!(account.status().current().is_none());
        assert!(account.status().log().is_empty());
        assert_eq!(account.time_created(), Timestamp(100));
    }

    #[test]
    fn set_status_keeps_current_at_log_tail() {
        let mut account = account();
        let admin = AdminActor::new(AdminId(2), "Ops");

        for name in ["Happy", "On Hold", "Happy"] {
            let entry = StatusEntry::new(
                StatusId::derive(name),
                name,
                admin.clone(),
                Timestamp::now_as_millis(),
            )
            .unwrap();
            account.set_status(entry);

            assert_eq!(account.status().current(), account.status().log().last());
        }
        // 重复状态允许，每次都会生成新的日志条目
        assert_eq!(account.status().log().len(), 3);
    }

    #[test]
    fn link_is_replaced_not_merged() {
        let mut account = account();
        account.link_user(UserId(9), Username::new("janed"));
        assert_eq!(account.linked_user(), Some(UserId(9)));

        account.clear_user_link();
        assert!(account.user().is_none());
    }

    #[test]
    fn partial_link_has_no_user_id() {
        let mut account = account();
        account.set_partial_user_link(Username::new("ghost"));
        assert!(account.user().is_some());
        assert_eq!(account.linked_user(), None);
    }
}
