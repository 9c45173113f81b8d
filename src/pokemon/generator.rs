// 属性合成器 - 野生宝可梦的随机属性生成
// 开发心理：纯函数式生成，随机源显式注入，同一随机序列结果可完全复现
// 设计原则：分布形状沿用原始数据口径（卡方偏斜），编码细节逐位保持

use log::debug;

use crate::core::error::{Result, ServerError};
use crate::pokemon::natures::Nature;
use crate::pokemon::species::{self, SpeciesId};
use crate::pokemon::stats::{calc_stats, EffortValues, IndividualValues, EV_STAT_CAP, EV_TOTAL_CAP};
use crate::pokemon::Pokemon;
use crate::utils::random::RandomSource;

// 努力值再分配的轮数上限，超过视为公式或数据bug
const MAX_EV_ROUNDS: u32 = 1000;

// 等级采样：右偏分布，高等级个体稀少
//
// trunc(chisq(2) * 5)，夹到 [1, 100]。
fn random_level(rng: &mut dyn RandomSource) -> u8 {
    let raw = (rng.chi_squared(2) * 5.0).trunc() as i64;
    raw.clamp(1, 100) as u8
}

// 个体值生成（第二世代压缩编码，值域0-15）
//
// 四个基础抽样 b[i] = trunc(min(chisq(3)*2, 15))；HP由四项低位打包:
// hp = Σ (b[i] & 1) << i。六个槽位的映射固定为
// [HP, 攻=b0, 防=b1, 特攻=b3, 特防=b3, 速=b2] —— 特攻/特防共用b3、
// b2落到速度是历史遗留的对照表，按原样保留，不做"修正"。
fn random_ivs(rng: &mut dyn RandomSource) -> IndividualValues {
    let mut base = [0u8; 4];
    for slot in base.iter_mut() {
        *slot = (rng.chi_squared(3) * 2.0).min(15.0).trunc() as u8;
    }

    let hp = base
        .iter()
        .enumerate()
        .fold(0u8, |acc, (i, &v)| acc | ((v & 1) << i));

    IndividualValues {
        hp,
        attack: base[0],
        defense: base[1],
        sp_attack: base[3],
        sp_defense: base[3],
        speed: base[2],
    }
}

// 超额努力值再分配：每轮从所有正项中均摊扣除 (sum-510)/正项数
//
// 每轮都严格压低正项，必定收敛；轮数超限返回防御性错误而不是死循环。
fn redistribute(mut evs: [u16; 6]) -> Result<[u16; 6]> {
    let mut rounds = 0u32;
    loop {
        let sum: u32 = evs.iter().map(|&v| v as u32).sum();
        if sum <= EV_TOTAL_CAP as u32 {
            return Ok(evs);
        }

        rounds += 1;
        if rounds > MAX_EV_ROUNDS {
            return Err(ServerError::DistributionConvergence(MAX_EV_ROUNDS));
        }

        let positive = evs.iter().filter(|&&v| v > 0).count() as f64;
        let diff = (sum as f64 - EV_TOTAL_CAP as f64) / positive;
        for v in evs.iter_mut() {
            *v = (*v as f64 - diff).max(0.0).trunc() as u16;
        }
    }
}

// 努力值生成：幅度随等级超线性增长（level^1.4），单项封顶255，总和封顶510
fn random_evs(level: u8, rng: &mut dyn RandomSource) -> Result<EffortValues> {
    let mult = rng.chi_squared(1) * (level as f64).powf(1.4);

    let mut candidates = [0u16; 6];
    for slot in candidates.iter_mut() {
        let raw = (rng.chi_squared(5) * 25.0 * mult).sqrt();
        *slot = raw.min(EV_STAT_CAP as f64).trunc() as u16;
    }

    let capped = redistribute(candidates)?;
    Ok(EffortValues::from_array(capped.map(|v| v as u8)))
}

// 合成一只指定种族的野生宝可梦
//
// 等级缺省时按右偏分布抽取；显式等级夹到文档化的 [1, 100] 域。
// 返回的记录无主、无位置，由播种层投放。
pub fn synthesize(
    species_id: SpeciesId,
    level: Option<u8>,
    rng: &mut dyn RandomSource,
) -> Result<Pokemon> {
    let entry = species::get(species_id)?;

    let level = match level {
        Some(l) => l.clamp(1, 100),
        None => random_level(rng),
    };

    let form = &entry.forms[rng.uniform_int(entry.forms.len())];
    let nature = Nature::random(rng);
    let ivs = random_ivs(rng);
    let evs = random_evs(level, rng)?;
    let stats = calc_stats(&form.base, &ivs, &evs, level, nature);

    debug!(
        "合成宝可梦: {} (#{}) 形态={} 性格={:?} 等级={} HP={}",
        entry.name, species_id, form.name, nature, level, stats.hp
    );

    Ok(Pokemon {
        id: 0,
        species_id,
        name: entry.name.to_string(),
        form: form.name.to_string(),
        nature,
        level,
        ivs,
        evs,
        stats,
        owner: None,
        location: None,
    })
}

// 合成一只随机种族的野生宝可梦（种族在图鉴上均匀抽取）
pub fn synthesize_random(rng: &mut dyn RandomSource) -> Result<Pokemon> {
    let species_id = rng.uniform_int(species::count() as usize) as SpeciesId + 1;
    synthesize(species_id, None, rng)
}
