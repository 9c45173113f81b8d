// 核心模块 - 错误类型与配置
// 开发心理：核心基础设施保持最小，业务逻辑放在各领域模块中

pub mod config;
pub mod error;

pub use config::{ServerConfig, SpawnConfig, SpawnRegion};
pub use error::{ErrorSeverity, Result, ServerError};
