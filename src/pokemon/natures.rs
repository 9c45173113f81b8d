// 性格系统 - 固定的25种能力值加权档案
// 开发心理：性格是不可变目录数据，乘数向量只取{0.9, 1.0, 1.1}
// 设计原则：目录可枚举、均匀抽取、HP永远不受性格影响

use serde::{Deserialize, Serialize};

use crate::pokemon::stats::StatKind;
use crate::utils::random::RandomSource;

// 性格类型 - 25种固定目录
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nature {
    // 中性性格
    Hardy,   // 勤奋
    Docile,  // 温顺
    Serious, // 认真
    Bashful, // 害羞
    Quirky,  // 浮躁

    // 攻击性格
    Lonely,  // 怕寂寞 (+攻击 -防御)
    Brave,   // 勇敢 (+攻击 -速度)
    Adamant, // 固执 (+攻击 -特攻)
    Naughty, // 顽皮 (+攻击 -特防)

    // 防御性格
    Bold,    // 大胆 (+防御 -攻击)
    Relaxed, // 悠闲 (+防御 -速度)
    Impish,  // 淘气 (+防御 -特攻)
    Lax,     // 乐天 (+防御 -特防)

    // 特攻性格
    Modest, // 内敛 (+特攻 -攻击)
    Mild,   // 慢吞吞 (+特攻 -防御)
    Quiet,  // 冷静 (+特攻 -速度)
    Rash,   // 马虎 (+特攻 -特防)

    // 特防性格
    Calm,    // 温和 (+特防 -攻击)
    Gentle,  // 温厚 (+特防 -防御)
    Sassy,   // 自大 (+特防 -速度)
    Careful, // 慎重 (+特防 -特攻)

    // 速度性格
    Timid, // 胆小 (+速度 -攻击)
    Hasty, // 急躁 (+速度 -防御)
    Jolly, // 爽朗 (+速度 -特攻)
    Naive, // 天真 (+速度 -特防)
}

// 完整目录，抽取时按下标均匀选择
pub const NATURES: [Nature; 25] = [
    Nature::Hardy,
    Nature::Docile,
    Nature::Serious,
    Nature::Bashful,
    Nature::Quirky,
    Nature::Lonely,
    Nature::Brave,
    Nature::Adamant,
    Nature::Naughty,
    Nature::Bold,
    Nature::Relaxed,
    Nature::Impish,
    Nature::Lax,
    Nature::Modest,
    Nature::Mild,
    Nature::Quiet,
    Nature::Rash,
    Nature::Calm,
    Nature::Gentle,
    Nature::Sassy,
    Nature::Careful,
    Nature::Timid,
    Nature::Hasty,
    Nature::Jolly,
    Nature::Naive,
];

impl Nature {
    // 被强化的能力值（中性性格为None）
    pub fn boosted(&self) -> Option<StatKind> {
        match self {
            Nature::Lonely | Nature::Brave | Nature::Adamant | Nature::Naughty => {
                Some(StatKind::Attack)
            }
            Nature::Bold | Nature::Relaxed | Nature::Impish | Nature::Lax => {
                Some(StatKind::Defense)
            }
            Nature::Modest | Nature::Mild | Nature::Quiet | Nature::Rash => {
                Some(StatKind::SpAttack)
            }
            Nature::Calm | Nature::Gentle | Nature::Sassy | Nature::Careful => {
                Some(StatKind::SpDefense)
            }
            Nature::Timid | Nature::Hasty | Nature::Jolly | Nature::Naive => {
                Some(StatKind::Speed)
            }
            _ => None,
        }
    }

    // 被削弱的能力值（中性性格为None）
    pub fn hindered(&self) -> Option<StatKind> {
        match self {
            Nature::Bold | Nature::Modest | Nature::Calm | Nature::Timid => {
                Some(StatKind::Attack)
            }
            Nature::Lonely | Nature::Mild | Nature::Gentle | Nature::Hasty => {
                Some(StatKind::Defense)
            }
            Nature::Adamant | Nature::Impish | Nature::Jolly | Nature::Careful => {
                Some(StatKind::SpAttack)
            }
            Nature::Naughty | Nature::Lax | Nature::Rash | Nature::Naive => {
                Some(StatKind::SpDefense)
            }
            Nature::Brave | Nature::Relaxed | Nature::Quiet | Nature::Sassy => {
                Some(StatKind::Speed)
            }
            _ => None,
        }
    }

    // 六项能力值的乘数向量，顺序与StatKind::ALL一致
    pub fn multipliers(&self) -> [f64; 6] {
        let mut mults = [1.0; 6];
        for (i, kind) in StatKind::ALL.iter().enumerate() {
            if self.boosted() == Some(*kind) {
                mults[i] = 1.1;
            } else if self.hindered() == Some(*kind) {
                mults[i] = 0.9;
            }
        }
        mults
    }

    // 从目录中均匀抽取一个性格
    pub fn random(rng: &mut dyn RandomSource) -> Nature {
        NATURES[rng.uniform_int(NATURES.len())]
    }
}
