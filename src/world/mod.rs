// 世界模块 - 位置类型与野生种群播种

pub mod location;
pub mod spawn;

pub use location::GeoLocation;
pub use spawn::seed_population;
