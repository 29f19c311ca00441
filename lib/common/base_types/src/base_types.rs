//! 基础标识类型定义
//!
//! 包含时间戳、各类实体ID等核心标识类型

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// 当前时间（Unix 毫秒）
    pub fn now_as_millis() -> Self {
        Self(chrono::Utc::now().timestamp_millis().max(0) as u64)
    }

    #[inline]
    pub fn as_millis(&self) -> u64 { self.0 }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// 账户ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccountId(pub u64);

impl From<u64> for AccountId {
    #[inline]
    fn from(id: u64) -> Self { Self(id) }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// 用户ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    #[inline]
    fn from(id: u64) -> Self { Self(id) }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// 管理员ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdminId(pub u64);

impl From<u64> for AdminId {
    #[inline]
    fn from(id: u64) -> Self { Self(id) }
}

impl fmt::Display for AdminId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// 状态目录ID
///
/// 由状态名派生的 kebab-case 字符串，例如 "On Hold" -> "on-hold"
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusId(String);

impl StatusId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

    /// 从状态名派生ID
    pub fn derive(name: &str) -> Self {
        let id = name
            .trim()
            .split_whitespace()
            .map(|part| part.to_lowercase())
            .collect::<Vec<_>>()
            .join("-");
        Self(id)
    }

    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// 用户名
///
/// 构造时统一做小写归一化，所有按用户名的查找都基于归一化后的值
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Username(String);

impl Username {
    /// 创建用户名（trim + 小写归一化）
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_lowercase())
    }

    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }

    #[inline]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}
