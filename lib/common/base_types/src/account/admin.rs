//! 审计用的操作管理员标识

use crate::account::error::FieldError;
use crate::AdminId;

/// 操作管理员（写入 NoteEntry / StatusEntry 的审计字段）
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdminActor {
    /// 管理员ID
    pub id: AdminId,
    /// 管理员展示名
    pub name: String,
}

impl AdminActor {
    pub fn new(id: AdminId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }

    /// 校验审计字段完整性
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.id.0 == 0 {
            return Err(FieldError::MissingField { field: "adminCreated.id" });
        }
        if self.name.trim().is_empty() {
            return Err(FieldError::MissingField { field: "adminCreated.name" });
        }
        Ok(())
    }
}
