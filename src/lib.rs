// 宝可梦服务端机制库入口
// 开发心理：纯机制核心——属性合成与捕捉判定，不含任何请求层和线路格式
// 架构：模块化设计，随机源与存储均为注入式协作者，便于测试和部署

// 核心模块
pub mod core;
pub mod utils;

// 领域模块
pub mod capture;
pub mod player;
pub mod pokemon;
pub mod storage;
pub mod world;

// 常用类型的便捷再导出
pub use capture::{resolve, CaptureOutcome};
pub use crate::core::config::ServerConfig;
pub use crate::core::error::{ErrorSeverity, Result, ServerError};
pub use player::{Bag, Player, PlayerId};
pub use pokemon::{generator::synthesize, Pokemon, PokemonId};
pub use storage::{MemoryStore, SqliteStore, Storage};
pub use utils::random::{RandomSource, StdRandom};
pub use world::{seed_population, GeoLocation};

// 版本信息 - 使用默认值避免编译时环境变量依赖
pub const VERSION: &str = "0.1.0";
pub const NAME: &str = "pokemongo-server";

// 机制常量
pub mod constants {
    pub const MAX_LEVEL: u8 = 100;
    pub const MIN_LEVEL: u8 = 1;

    // 个体值的压缩编码上限（历史编码，低于正典的31）
    pub const MAX_IV: u8 = 15;

    // 努力值上限
    pub const MAX_EV_PER_STAT: u16 = 255;
    pub const MAX_EV_TOTAL: u16 = 510;
}

// 便利函数：加载配置并初始化日志
pub fn init(config: &ServerConfig) {
    utils::logger::init(&config.general.log_level);
    log::info!("宝可梦服务端机制库初始化完成 v{}", VERSION);
}
