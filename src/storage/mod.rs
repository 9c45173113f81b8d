// 存储协作者 - 机制层的持久化接口
// 开发心理：机制层只依赖领域语义的存储trait，返回领域错误而不是驱动错误
// 设计原则：捕捉成功路径的双写必须是一个原子单元，绝不暴露部分归属状态

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::core::error::Result;
use crate::player::{Bag, Player, PlayerId};
use crate::pokemon::{Pokemon, PokemonId};
use crate::world::location::GeoLocation;

// 玩家/宝可梦文档存储
//
// `commit_capture` 是捕捉成功路径的原子单元：在"归属当前为空"的
// 乐观前置条件下设置归属与位置，同时落盘扣减后的背包并把宝可梦编号
// 并入玩家收藏。前置条件失败返回 `TransientPersistence`，调用方重新
// 加载背包后可安全重试整个resolve（不会重复扣球）。
pub trait Storage: Send + Sync {
    fn load_player(&self, id: PlayerId) -> Result<Player>;

    fn load_pokemon(&self, id: PokemonId) -> Result<Pokemon>;

    // 插入新玩家，返回分配的编号（记录内id字段被覆盖）
    fn insert_player(&self, player: Player) -> Result<PlayerId>;

    // 插入新宝可梦，返回分配的编号（记录内id字段被覆盖）
    fn insert_pokemon(&self, pokemon: Pokemon) -> Result<PokemonId>;

    // 只持久化玩家背包（捕捉失败路径）
    fn save_player_bag(&self, id: PlayerId, bag: &Bag) -> Result<()>;

    // 捕捉成功路径的原子提交：归属转移 + 背包 + 收藏
    fn commit_capture(
        &self,
        player_id: PlayerId,
        bag: &Bag,
        pokemon_id: PokemonId,
        location: GeoLocation,
    ) -> Result<()>;
}
