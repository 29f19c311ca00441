//! 状态目录行

use crate::account::error::FieldError;
use crate::StatusId;

/// 状态目录条目
///
/// 账户服务只读引用；目录本身的增删由管理接口维护
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    /// 目录ID（由状态名派生）
    #[cfg_attr(feature = "serde", serde(rename = "_id"))]
    pub id: StatusId,
    /// 状态名
    pub name: String,
}

impl Status {
    /// 创建目录行，ID 由状态名派生
    pub fn new(name: impl Into<String>) -> Result<Self, FieldError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FieldError::MissingField { field: "name" });
        }
        let id = StatusId::derive(&name);

        Ok(Self { id, name })
    }
}

impl doc_repo::Doc for Status {
    type Id = StatusId;

    fn id(&self) -> StatusId {
        self.id.clone()
    }
}
