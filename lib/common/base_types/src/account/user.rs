//! 用户聚合（链接契约）
//!
//! 用户的凭证/会话管理属于外部的认证子系统；本 crate 只承载
//! 账户链接协议所需要的最小形状

use crate::{AccountId, Timestamp, UserId, Username};

/// 用户侧的账户链接 {id, name}
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountLink {
    /// 账户ID
    pub id: AccountId,
    /// 账户全名快照
    pub name: String,
}

/// 用户角色集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserRoles {
    /// account 角色：指回所链接账户的引用
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub account: Option<AccountLink>,
}

/// 用户聚合
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct User {
    #[cfg_attr(feature = "serde", serde(rename = "_id"))]
    id: UserId,
    username: Username,
    roles: UserRoles,
    time_created: Timestamp,
}

impl User {
    pub fn new(id: UserId, username: Username, now: Timestamp) -> Self {
        Self { id, username, roles: UserRoles::default(), time_created: now }
    }

    #[inline]
    pub fn id(&self) -> UserId { self.id }

    #[inline]
    pub fn username(&self) -> &Username { &self.username }

    #[inline]
    pub fn roles(&self) -> &UserRoles { &self.roles }

    /// 当前链接的账户ID（如有）
    #[inline]
    pub fn linked_account(&self) -> Option<AccountId> {
        self.roles.account.as_ref().map(|link| link.id)
    }

    /// 建立到账户的链接（用户侧写入）
    pub fn link_account(&mut self, account_id: AccountId, account_name: impl Into<String>) {
        self.roles.account = Some(AccountLink { id: account_id, name: account_name.into() });
    }

    /// 清除到账户的链接（用户侧写入）
    pub fn unlink_account(&mut self) {
        self.roles.account = None;
    }
}

impl doc_repo::Doc for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}
