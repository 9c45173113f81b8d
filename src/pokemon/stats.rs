// 宝可梦能力值系统
// 开发心理：能力值是核心数据，需要精确计算、确定性、单调性
// 设计原则：个体值/努力值/性格修正分离，派生值在创建时算好存储

use serde::{Deserialize, Serialize};

use crate::pokemon::natures::Nature;

// 单项努力值上限
pub const EV_STAT_CAP: u16 = 255;
// 努力值总和上限
pub const EV_TOTAL_CAP: u16 = 510;

// 六项能力值的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    HP,        // 体力
    Attack,    // 攻击
    Defense,   // 防御
    SpAttack,  // 特攻
    SpDefense, // 特防
    Speed,     // 速度
}

impl StatKind {
    // 固定遍历顺序：HP、攻、防、特攻、特防、速
    pub const ALL: [StatKind; 6] = [
        StatKind::HP,
        StatKind::Attack,
        StatKind::Defense,
        StatKind::SpAttack,
        StatKind::SpDefense,
        StatKind::Speed,
    ];
}

// 种族基础能力值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub sp_attack: u16,
    pub sp_defense: u16,
    pub speed: u16,
}

impl BaseStats {
    pub const fn new(hp: u16, attack: u16, defense: u16, sp_attack: u16, sp_defense: u16, speed: u16) -> Self {
        Self {
            hp,
            attack,
            defense,
            sp_attack,
            sp_defense,
            speed,
        }
    }

    pub fn as_array(&self) -> [u16; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }
}

// 个体值 (IV) - 创建时生成一次，之后不再改变
//
// 本系统沿用第二世代的压缩编码，生成值域为0-15（类型上限31）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndividualValues {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl IndividualValues {
    pub fn as_array(&self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }

    pub fn from_array(values: [u8; 6]) -> Self {
        Self {
            hp: values[0],
            attack: values[1],
            defense: values[2],
            sp_attack: values[3],
            sp_defense: values[4],
            speed: values[5],
        }
    }
}

// 努力值 (EV) - 出生时一次性累积的培养投入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EffortValues {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl EffortValues {
    pub fn as_array(&self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }

    pub fn from_array(values: [u8; 6]) -> Self {
        Self {
            hp: values[0],
            attack: values[1],
            defense: values[2],
            sp_attack: values[3],
            sp_defense: values[4],
            speed: values[5],
        }
    }

    pub fn total(&self) -> u16 {
        self.as_array().iter().map(|&v| v as u16).sum()
    }
}

// 最终能力值 - 由种族值/个体值/努力值/等级/性格一次性派生
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSet {
    #[serde(rename = "HP")]
    pub hp: u16,
    #[serde(rename = "Atk")]
    pub attack: u16,
    #[serde(rename = "Def")]
    pub defense: u16,
    #[serde(rename = "SpAtk")]
    pub sp_attack: u16,
    #[serde(rename = "SpDef")]
    pub sp_defense: u16,
    #[serde(rename = "Spd")]
    pub speed: u16,
}

// 公式共通部分: (2*种族值 + 个体值 + 努力值/4) * 等级 / 100（整数向下取整）
fn stat_core(base: u16, iv: u8, ev: u8, level: u8) -> u32 {
    (2 * base as u32 + iv as u32 + ev as u32 / 4) * level as u32 / 100
}

// HP公式: core + 等级 + 10
fn hp_stat(base: u16, iv: u8, ev: u8, level: u8) -> u16 {
    (stat_core(base, iv, ev, level) + level as u32 + 10) as u16
}

// 非HP公式: floor((core + 5) * 性格修正)
fn other_stat(base: u16, iv: u8, ev: u8, level: u8, nature_mult: f64) -> u16 {
    ((stat_core(base, iv, ev, level) + 5) as f64 * nature_mult).trunc() as u16
}

// 计算全部六项最终能力值
//
// 对固定的种族/性格，结果是等级/IV/EV的确定性单调非减函数。
pub fn calc_stats(
    base: &BaseStats,
    ivs: &IndividualValues,
    evs: &EffortValues,
    level: u8,
    nature: Nature,
) -> StatSet {
    let mults = nature.multipliers();
    StatSet {
        hp: hp_stat(base.hp, ivs.hp, evs.hp, level),
        attack: other_stat(base.attack, ivs.attack, evs.attack, level, mults[1]),
        defense: other_stat(base.defense, ivs.defense, evs.defense, level, mults[2]),
        sp_attack: other_stat(base.sp_attack, ivs.sp_attack, evs.sp_attack, level, mults[3]),
        sp_defense: other_stat(base.sp_defense, ivs.sp_defense, evs.sp_defense, level, mults[4]),
        speed: other_stat(base.speed, ivs.speed, evs.speed, level, mults[5]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pikachu_base() -> BaseStats {
        BaseStats::new(35, 55, 40, 50, 50, 90)
    }

    #[test]
    fn test_hp_lower_bound() {
        // 零IV/零EV/种族值为0时的下界: HP >= 等级 + 10
        for level in 1..=100u8 {
            let hp = hp_stat(0, 0, 0, level);
            assert!(hp >= level as u16 + 10);
        }
    }

    #[test]
    fn test_hp_lower_bound_all_levels_real_species() {
        let base = pikachu_base();
        let ivs = IndividualValues::default();
        let evs = EffortValues::default();
        for level in 1..=100u8 {
            let stats = calc_stats(&base, &ivs, &evs, level, Nature::Hardy);
            assert!(
                stats.hp >= level as u16 + 10,
                "level {} hp {}",
                level,
                stats.hp
            );
        }
    }

    #[test]
    fn test_known_stat_values() {
        // 50级满压缩IV(15)、零EV、中性性格的皮卡丘
        let base = pikachu_base();
        let ivs = IndividualValues::from_array([15; 6]);
        let evs = EffortValues::default();
        let stats = calc_stats(&base, &ivs, &evs, 50, Nature::Hardy);

        // HP: (2*35 + 15) * 50 / 100 + 50 + 10 = 42 + 60 = 102
        assert_eq!(stats.hp, 102);
        // 攻击: (2*55 + 15) * 50 / 100 + 5 = 62 + 5 = 67
        assert_eq!(stats.attack, 67);
        // 速度: (2*90 + 15) * 50 / 100 + 5 = 97 + 5 = 102
        assert_eq!(stats.speed, 102);
    }

    #[test]
    fn test_nature_modifier_applied() {
        let base = pikachu_base();
        let ivs = IndividualValues::default();
        let evs = EffortValues::default();

        // 固执: +攻击 -特攻
        let adamant = calc_stats(&base, &ivs, &evs, 50, Nature::Adamant);
        let hardy = calc_stats(&base, &ivs, &evs, 50, Nature::Hardy);

        assert!(adamant.attack > hardy.attack);
        assert!(adamant.sp_attack < hardy.sp_attack);
        // HP不受性格影响
        assert_eq!(adamant.hp, hardy.hp);
    }

    #[test]
    fn test_monotone_in_level() {
        let base = pikachu_base();
        let ivs = IndividualValues::from_array([7; 6]);
        let evs = EffortValues::from_array([40; 6]);

        let mut prev = calc_stats(&base, &ivs, &evs, 1, Nature::Hardy);
        for level in 2..=100u8 {
            let cur = calc_stats(&base, &ivs, &evs, level, Nature::Hardy);
            assert!(cur.hp >= prev.hp);
            assert!(cur.attack >= prev.attack);
            assert!(cur.speed >= prev.speed);
            prev = cur;
        }
    }

    #[test]
    fn test_ev_quarter_rounding() {
        // EV只有每满4点才贡献1点
        let base = pikachu_base();
        let ivs = IndividualValues::default();
        let a = calc_stats(&base, &ivs, &EffortValues::from_array([0; 6]), 100, Nature::Hardy);
        let b = calc_stats(&base, &ivs, &EffortValues::from_array([3; 6]), 100, Nature::Hardy);
        let c = calc_stats(&base, &ivs, &EffortValues::from_array([4; 6]), 100, Nature::Hardy);
        assert_eq!(a.attack, b.attack);
        assert_eq!(c.attack, a.attack + 1);
    }
}
