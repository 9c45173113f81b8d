// 宝可梦种族参考数据
// 开发心理：种族数据是只读引用数据，按编号+形态查询种族值
// 设计原则：数据驱动、不可变、编号连续以便均匀抽取

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::core::error::{Result, ServerError};
use crate::pokemon::stats::BaseStats;

pub type SpeciesId = u32;

// 种族的一个形态（大部分种族只有标准形态）
#[derive(Debug, Clone)]
pub struct SpeciesForm {
    pub name: &'static str,
    pub base: BaseStats,
}

// 种族条目
#[derive(Debug, Clone)]
pub struct Species {
    pub id: SpeciesId,
    pub name: &'static str,
    pub forms: Vec<SpeciesForm>,
}

const DEFAULT_FORM: &str = "Normal";

fn single(id: SpeciesId, name: &'static str, base: BaseStats) -> (SpeciesId, Species) {
    (
        id,
        Species {
            id,
            name,
            forms: vec![SpeciesForm {
                name: DEFAULT_FORM,
                base,
            }],
        },
    )
}

fn multi(
    id: SpeciesId,
    name: &'static str,
    forms: Vec<(&'static str, BaseStats)>,
) -> (SpeciesId, Species) {
    (
        id,
        Species {
            id,
            name,
            forms: forms
                .into_iter()
                .map(|(name, base)| SpeciesForm { name, base })
                .collect(),
        },
    )
}

lazy_static! {
    // 关都图鉴前26号，编号连续，含多形态种族
    static ref DEX: HashMap<SpeciesId, Species> = {
        let b = BaseStats::new;
        HashMap::from([
            single(1, "Bulbasaur", b(45, 49, 49, 65, 65, 45)),
            single(2, "Ivysaur", b(60, 62, 63, 80, 80, 60)),
            multi(3, "Venusaur", vec![
                (DEFAULT_FORM, b(80, 82, 83, 100, 100, 80)),
                ("Mega", b(80, 100, 123, 122, 120, 80)),
            ]),
            single(4, "Charmander", b(39, 52, 43, 60, 50, 65)),
            single(5, "Charmeleon", b(58, 64, 58, 80, 65, 80)),
            multi(6, "Charizard", vec![
                (DEFAULT_FORM, b(78, 84, 78, 109, 85, 100)),
                ("Mega X", b(78, 130, 111, 130, 85, 100)),
                ("Mega Y", b(78, 104, 78, 159, 115, 100)),
            ]),
            single(7, "Squirtle", b(44, 48, 65, 50, 64, 43)),
            single(8, "Wartortle", b(59, 63, 80, 65, 80, 58)),
            multi(9, "Blastoise", vec![
                (DEFAULT_FORM, b(79, 83, 100, 85, 105, 78)),
                ("Mega", b(79, 103, 120, 135, 115, 78)),
            ]),
            single(10, "Caterpie", b(45, 30, 35, 20, 20, 45)),
            single(11, "Metapod", b(50, 20, 55, 25, 25, 30)),
            single(12, "Butterfree", b(60, 45, 50, 90, 80, 70)),
            single(13, "Weedle", b(40, 35, 30, 20, 20, 50)),
            single(14, "Kakuna", b(45, 25, 50, 25, 25, 35)),
            single(15, "Beedrill", b(65, 90, 40, 45, 80, 75)),
            single(16, "Pidgey", b(40, 45, 40, 35, 35, 56)),
            single(17, "Pidgeotto", b(63, 60, 55, 50, 50, 71)),
            single(18, "Pidgeot", b(83, 80, 75, 70, 70, 101)),
            multi(19, "Rattata", vec![
                (DEFAULT_FORM, b(30, 56, 35, 25, 35, 72)),
                ("Alola", b(30, 56, 35, 25, 35, 72)),
            ]),
            single(20, "Raticate", b(55, 81, 60, 50, 70, 97)),
            single(21, "Spearow", b(40, 60, 30, 31, 31, 70)),
            single(22, "Fearow", b(65, 90, 65, 61, 61, 100)),
            single(23, "Ekans", b(35, 60, 44, 40, 54, 55)),
            single(24, "Arbok", b(60, 95, 69, 65, 79, 80)),
            single(25, "Pikachu", b(35, 55, 40, 50, 50, 90)),
            multi(26, "Raichu", vec![
                (DEFAULT_FORM, b(60, 90, 55, 90, 80, 110)),
                ("Alola", b(60, 85, 50, 95, 85, 110)),
            ]),
        ])
    };
}

// 图鉴内种族总数（编号从1开始连续）
pub fn count() -> u32 {
    DEX.len() as u32
}

// 按编号查询种族条目
pub fn get(id: SpeciesId) -> Result<&'static Species> {
    DEX.get(&id).ok_or(ServerError::InvalidSpecies(id))
}

// 种族名称
pub fn name(id: SpeciesId) -> Result<&'static str> {
    Ok(get(id)?.name)
}

// 种族的全部有效形态
pub fn forms(id: SpeciesId) -> Result<&'static [SpeciesForm]> {
    Ok(&get(id)?.forms)
}

// 按种族+形态查询种族值
pub fn base_profile(id: SpeciesId, form: &str) -> Result<BaseStats> {
    let species = get(id)?;
    species
        .forms
        .iter()
        .find(|f| f.name == form)
        .map(|f| f.base)
        .ok_or_else(|| ServerError::InvalidForm {
            species: id,
            form: form.to_string(),
        })
}
