// 错误处理系统
// 开发心理：统一的服务端错误类型，区分业务拒绝、瞬时冲突和致命数据错误
// 使用Rust的Result类型确保错误处理的安全性和一致性

use crate::pokemon::species::SpeciesId;
use crate::pokemon::PokemonId;
use crate::player::PlayerId;

// 服务端主要错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServerError {
    // 业务规则错误 - 由调用方校验输入，不重试
    #[error("无效的种族编号: {0}")]
    InvalidSpecies(SpeciesId),

    #[error("无效的形态: 种族 {species} 没有形态 \"{form}\"")]
    InvalidForm { species: SpeciesId, form: String },

    #[error("宝可梦已有归属，无法捕捉")]
    AlreadyOwned,

    #[error("玩家不存在: {0}")]
    PlayerNotFound(PlayerId),

    #[error("宝可梦不存在: {0}")]
    PokemonNotFound(PokemonId),

    // 并发冲突 - 整个resolve调用可安全重试（重试前须重新加载背包）
    #[error("持久化冲突，可重试: {0}")]
    TransientPersistence(String),

    // 防御性错误 - 分布再分配未收敛，说明数据或公式有bug，绝不静默吞掉
    #[error("努力值再分配在 {0} 轮内未收敛")]
    DistributionConvergence(u32),

    // 基础设施错误
    #[error("数据库错误: {0}")]
    Database(String),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("序列化错误: {0}")]
    Serialization(String),

    #[error("IO错误: {0}")]
    Io(String),
}

// Result类型别名
pub type Result<T> = std::result::Result<T, ServerError>;

// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    // 业务拒绝 - 请求被拒，系统健康
    Rejected,
    // 瞬时 - 重试即可恢复
    Transient,
    // 致命 - 数据或代码bug，需要人工介入
    Fatal,
}

impl ServerError {
    // 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ServerError::InvalidSpecies(_)
            | ServerError::InvalidForm { .. }
            | ServerError::AlreadyOwned
            | ServerError::PlayerNotFound(_)
            | ServerError::PokemonNotFound(_) => ErrorSeverity::Rejected,

            ServerError::TransientPersistence(_) => ErrorSeverity::Transient,

            ServerError::DistributionConvergence(_)
            | ServerError::Database(_)
            | ServerError::Config(_)
            | ServerError::Serialization(_)
            | ServerError::Io(_) => ErrorSeverity::Fatal,
        }
    }

    // 是否可以安全重试整个调用
    pub fn is_retryable(&self) -> bool {
        matches!(self.severity(), ErrorSeverity::Transient)
    }
}

// 错误转换实现
impl From<std::io::Error> for ServerError {
    fn from(error: std::io::Error) -> Self {
        ServerError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(error: serde_json::Error) -> Self {
        ServerError::Serialization(error.to_string())
    }
}

impl From<toml::de::Error> for ServerError {
    fn from(error: toml::de::Error) -> Self {
        ServerError::Config(error.to_string())
    }
}

impl From<rusqlite::Error> for ServerError {
    fn from(error: rusqlite::Error) -> Self {
        ServerError::Database(error.to_string())
    }
}
