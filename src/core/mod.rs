// 核心模块 - 错误类型与引擎配置
// 生成、渲染和收藏模块都从这里取 Result 和配置

pub mod error;
pub mod config;

// 重新导出核心类型
pub use error::{CreatureError, ErrorSeverity, Result};
pub use config::{EngineConfig, RenderSettings};
