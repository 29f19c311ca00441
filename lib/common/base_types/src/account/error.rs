//! 账户域字段校验错误

/// 值对象构造阶段的字段校验错误
///
/// 在任何写入发生之前检出，调用方应将其映射为 Validation 一类的业务错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// 必填字段缺失或为空
    MissingField { field: &'static str },
    /// 字段取值不合法
    InvalidField { field: &'static str, reason: &'static str },
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldError::MissingField { field } => {
                write!(f, "Missing required field: {}", field)
            }
            FieldError::InvalidField { field, reason } => {
                write!(f, "Invalid field '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for FieldError {}
