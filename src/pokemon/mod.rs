// 宝可梦领域模块 - 属性合成与记录类型
// 开发心理：个体记录在创建时一次性定型，派生值存储而非读取时重算
// 设计原则：数据驱动的种族目录、可复现的随机合成、记录不可变

pub mod generator;
pub mod natures;
pub mod species;
pub mod stats;

// 重新导出主要类型
pub use generator::{synthesize, synthesize_random};
pub use natures::{Nature, NATURES};
pub use species::{SpeciesForm, SpeciesId};
pub use stats::{calc_stats, BaseStats, EffortValues, IndividualValues, StatKind, StatSet};

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::world::location::GeoLocation;

pub type PokemonId = u64;
pub type StadiumId = u64;

// 归属引用 - 一只宝可梦同一时刻至多属于一个训练家或一个道馆
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Trainer(PlayerId),
    Stadium(StadiumId),
}

// 宝可梦个体记录
//
// 合成后不可变；捕捉是唯一的 无主 -> 有主 状态迁移。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    // 存储层分配，插入前为0
    pub id: PokemonId,
    pub species_id: SpeciesId,
    pub name: String,
    pub form: String,
    pub nature: Nature,
    pub level: u8,
    pub ivs: IndividualValues,
    pub evs: EffortValues,
    // 创建时派生并存储
    pub stats: StatSet,
    pub owner: Option<Owner>,
    pub location: Option<GeoLocation>,
}

impl Pokemon {
    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::random::StdRandom;

    #[test]
    fn test_ownership_flag() {
        let mut rng = StdRandom::with_seed(11);
        let mut pokemon = synthesize(25, Some(10), &mut rng).unwrap();
        assert!(!pokemon.is_owned());

        pokemon.owner = Some(Owner::Trainer(7));
        assert!(pokemon.is_owned());

        pokemon.owner = Some(Owner::Stadium(3));
        assert!(pokemon.is_owned());
    }

    #[test]
    fn test_record_roundtrip_json() {
        // 记录以JSON文档形式持久化，序列化必须无损
        let mut rng = StdRandom::with_seed(42);
        let pokemon = synthesize(6, Some(50), &mut rng).unwrap();

        let doc = serde_json::to_string(&pokemon).unwrap();
        let back: Pokemon = serde_json::from_str(&doc).unwrap();
        assert_eq!(pokemon, back);
    }
}
