// 玩家系统 - 玩家记录与消耗品背包
// 开发心理：背包计数器只会被捕捉和显式丢弃两种操作改动，永不为负
// 设计原则：背包是值对象，捕捉流程拿快照算新值，不原地改共享记录

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pokemon::{PokemonId, StadiumId};
use crate::world::location::GeoLocation;

pub type PlayerId = u64;

// 消耗品背包 - 字段名与持久化文档键一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bag {
    pub pokeball: u32,
    pub greatball: u32,
    pub revive: u32,
    pub lure: u32,
}

// 丢弃请求（各项为希望丢弃的数量）
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BagDrop {
    #[serde(default)]
    pub pokeball: u32,
    #[serde(default)]
    pub greatball: u32,
    #[serde(default)]
    pub revive: u32,
    #[serde(default)]
    pub lure: u32,
}

impl Bag {
    // 两种捕捉球的总数
    pub fn total_balls(&self) -> u32 {
        self.pokeball + self.greatball
    }

    // 丢弃物品：各计数器扣减后钳在0，超量丢弃不报错
    pub fn drop_items(&self, drop: &BagDrop) -> Bag {
        Bag {
            pokeball: self.pokeball.saturating_sub(drop.pokeball),
            greatball: self.greatball.saturating_sub(drop.greatball),
            revive: self.revive.saturating_sub(drop.revive),
            lure: self.lure.saturating_sub(drop.lure),
        }
    }
}

// 玩家记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    // 负载生成器分配的工位号，findOrCreate按它去重
    pub worker_num: u32,
    pub joined_on: DateTime<Utc>,
    pub bag: Bag,
    // 已拥有的宝可梦编号集合
    pub pokemon_ids: Vec<PokemonId>,
    pub stadium_ids: Vec<StadiumId>,
    pub location: GeoLocation,
}

impl Player {
    // 新玩家：背包清零，入场时间为当前时刻
    pub fn new(worker_num: u32, location: GeoLocation) -> Self {
        Self {
            id: 0,
            worker_num,
            joined_on: Utc::now(),
            bag: Bag::default(),
            pokemon_ids: Vec::new(),
            stadium_ids: Vec::new(),
            location,
        }
    }

    pub fn owns(&self, pokemon_id: PokemonId) -> bool {
        self.pokemon_ids.contains(&pokemon_id)
    }
}
