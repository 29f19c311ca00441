use crate::Timestamp;

/// 命令元数据
///
/// 随每个命令携带，用于追踪与审计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CMetadata {
    /// 命令唯一ID（用于追踪）
    #[cfg_attr(feature = "serde", serde(default))]
    pub command_id: String,
    /// 命令创建时间戳（Unix 毫秒）
    #[cfg_attr(feature = "serde", serde(default))]
    pub timestamp: u64,
    /// 关联ID（用于分布式追踪）
    #[cfg_attr(feature = "serde", serde(default))]
    pub correlation_id: Option<String>,
    /// 用户/系统标识
    #[cfg_attr(feature = "serde", serde(default))]
    pub actor: Option<String>,
}

impl CMetadata {
    /// 以给定命令ID构造元数据，时间戳取当前时间
    pub fn with_command_id(command_id: impl Into<String>) -> Self {
        Self {
            command_id: command_id.into(),
            timestamp: Timestamp::now_as_millis().0,
            ..Self::default()
        }
    }
}

/// 命令执行元数据（响应侧）
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResMetadata {
    /// 回显的命令ID
    pub command_id: String,
    /// 命令接收时间戳
    pub received_at: u64,
}

impl ResMetadata {
    #[inline]
    pub fn new(command_id: impl Into<String>) -> Self {
        Self { command_id: command_id.into(), received_at: Timestamp::now_as_millis().0 }
    }
}

/// 带元数据的命令响应
///
/// 使用 Result<CmdResp<T>, E> 的方式返回
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CmdResp<T> {
    /// 命令元数据
    pub metadata: ResMetadata,
    /// 成功结果
    pub result: T,
}

impl<T> CmdResp<T> {
    /// 创建新响应
    #[inline]
    pub fn new(command_id: impl Into<String>, result: T) -> Self {
        Self { metadata: ResMetadata::new(command_id), result }
    }

    /// 映射结果值
    #[inline]
    pub fn map<U, F>(self, f: F) -> CmdResp<U>
    where
        F: FnOnce(T) -> U,
    {
        CmdResp { metadata: self.metadata, result: f(self.result) }
    }
}
