// 工具模块
// 开发心理：随机源与日志是横切关注点，与具体玩法解耦

pub mod logger;
pub mod random;

pub use random::{RandomSource, SequenceRandom, StdRandom};
