//! 备注条目

use crate::account::admin::AdminActor;
use crate::account::error::FieldError;
use crate::Timestamp;

/// 账户备注条目 - 不可变值对象
///
/// 只追加、构造后不再修改。时间戳由调用方显式传入，保证构造可测试
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct NoteEntry {
    /// 创建该条目的管理员（审计）
    admin_created: AdminActor,
    /// 备注内容
    data: String,
    /// 创建时间
    time_created: Timestamp,
}

impl NoteEntry {
    /// 构造新条目，所有必填字段在此校验
    pub fn new(
        data: impl Into<String>,
        admin_created: AdminActor,
        now: Timestamp,
    ) -> Result<Self, FieldError> {
        let data = data.into();
        if data.trim().is_empty() {
            return Err(FieldError::MissingField { field: "data" });
        }
        admin_created.validate()?;

        Ok(Self { admin_created, data, time_created: now })
    }

    #[inline]
    pub fn admin_created(&self) -> &AdminActor { &self.admin_created }

    #[inline]
    pub fn data(&self) -> &str { &self.data }

    #[inline]
    pub fn time_created(&self) -> Timestamp { self.time_created }
}
