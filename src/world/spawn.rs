// 世界播种 - 批量投放野生宝可梦
// 开发心理：播种发生在世界初始化时，合成器先定型属性，再散布到区域内
// 设计原则：投放的个体一律无主，位置在区域内均匀散布

use log::{debug, info};

use crate::core::config::SpawnConfig;
use crate::core::error::Result;
use crate::pokemon::{generator, PokemonId};
use crate::storage::Storage;
use crate::utils::random::RandomSource;

// 按配置向存储投放野生种群，返回插入的宝可梦编号
pub fn seed_population(
    store: &dyn Storage,
    config: &SpawnConfig,
    rng: &mut dyn RandomSource,
) -> Result<Vec<PokemonId>> {
    let mut ids = Vec::with_capacity(config.population as usize);

    for _ in 0..config.population {
        let mut pokemon = generator::synthesize_random(rng)?;
        let location = config.region.point_at(rng.uniform(), rng.uniform());
        pokemon.location = Some(location);

        let id = store.insert_pokemon(pokemon)?;
        debug!("投放野生宝可梦 #{} 于 ({:.4}, {:.4})", id, location.lat, location.lng);
        ids.push(id);
    }

    info!("世界播种完成: 共投放 {} 只野生宝可梦", ids.len());
    Ok(ids)
}
