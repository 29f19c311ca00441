//! 状态条目

use crate::account::admin::AdminActor;
use crate::account::error::FieldError;
use crate::{StatusId, Timestamp};

/// 账户状态条目 - 不可变值对象
///
/// 与 NoteEntry 相同的只追加纪律；id/name 来自状态目录的一次性快照
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StatusEntry {
    /// 状态目录ID
    id: StatusId,
    /// 状态名快照
    name: String,
    /// 创建时间
    time_created: Timestamp,
    /// 创建该条目的管理员（审计）
    admin_created: AdminActor,
}

impl StatusEntry {
    /// 构造新条目，所有必填字段在此校验
    pub fn new(
        id: StatusId,
        name: impl Into<String>,
        admin_created: AdminActor,
        now: Timestamp,
    ) -> Result<Self, FieldError> {
        if id.as_str().is_empty() {
            return Err(FieldError::MissingField { field: "id" });
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FieldError::MissingField { field: "name" });
        }
        admin_created.validate()?;

        Ok(Self { id, name, time_created: now, admin_created })
    }

    #[inline]
    pub fn id(&self) -> &StatusId { &self.id }

    #[inline]
    pub fn name(&self) -> &str { &self.name }

    #[inline]
    pub fn time_created(&self) -> Timestamp { self.time_created }

    #[inline]
    pub fn admin_created(&self) -> &AdminActor { &self.admin_created }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AdminId;

    #[test]
    fn new_snapshots_catalog_row() {
        let entry = StatusEntry::new(
            StatusId::new("on-hold"),
            "On Hold",
            AdminActor::new(AdminId(3), "Ops"),
            Timestamp(42),
        )
        .unwrap();

        assert_eq!(entry.id().as_str(), "on-hold");
        assert_eq!(entry.name(), "On Hold");
        assert_eq!(entry.time_created(), Timestamp(42));
    }

    #[test]
    fn new_rejects_missing_fields() {
        let admin = AdminActor::new(AdminId(3), "Ops");
        let err = StatusEntry::new(StatusId::new(""), "On Hold", admin.clone(), Timestamp(1))
            .unwrap_err();
        assert_eq!(err, FieldError::MissingField { field: "id" });

        let err =
            StatusEntry::new(StatusId::new("on-hold"), " ", admin, Timestamp(1)).unwrap_err();
        assert_eq!(err, FieldError::MissingField { field: "name" });
    }
}
