// 错误处理系统
// 统一的错误类型：条码解析、配置与数据表加载、记录校验、渲染输出
// 生成流程本身不会失败，错误只出现在输入校验和IO边界

use std::io;
use thiserror::Error;

// 主要错误类型
#[derive(Debug, Clone, Error)]
pub enum CreatureError {
    #[error("Invalid barcode: {0}")]
    InvalidBarcode(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Generation table error: {0}")]
    TableError(String),
    #[error("Record mismatch on field `{field}` for barcode {barcode}")]
    RecordMismatch { barcode: String, field: String },
    #[error("Render error: {0}")]
    RenderError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// Result类型别名
pub type Result<T> = std::result::Result<T, CreatureError>;

// 错误转换实现
impl From<io::Error> for CreatureError {
    fn from(error: io::Error) -> Self {
        CreatureError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for CreatureError {
    fn from(error: serde_json::Error) -> Self {
        CreatureError::Parse(error.to_string())
    }
}

impl From<toml::de::Error> for CreatureError {
    fn from(error: toml::de::Error) -> Self {
        CreatureError::ConfigError(error.to_string())
    }
}

impl From<toml::ser::Error> for CreatureError {
    fn from(error: toml::ser::Error) -> Self {
        CreatureError::Serialization(error.to_string())
    }
}

// 错误创建辅助宏
#[macro_export]
macro_rules! creature_error {
    ($variant:ident, $msg:expr) => {
        $crate::core::CreatureError::$variant($msg.to_string())
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::core::CreatureError::$variant(format!($fmt, $($arg)*))
    };
}

impl CreatureError {
    // 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CreatureError::RecordMismatch { .. } => ErrorSeverity::Critical,
            CreatureError::TableError(_) | CreatureError::ConfigError(_) => ErrorSeverity::High,
            CreatureError::Io(_) | CreatureError::StorageError(_) => ErrorSeverity::Medium,
            CreatureError::InvalidBarcode(_) => ErrorSeverity::Low,
            _ => ErrorSeverity::Medium,
        }
    }

    /// Invalid input can be re-entered; a record that disagrees with its own
    /// barcode means someone edited generated fields.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CreatureError::RecordMismatch { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}
