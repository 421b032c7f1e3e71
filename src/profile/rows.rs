use super::stat::CoreStat;
use super::unit::DisplayValue;
use serde::Serialize;

/// 遗器行固定的副属性槽位数
pub const SUBSTAT_SLOTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterRow {
    pub uid: i64,
    pub nickname: Option<String>,
    pub level: Option<i64>,
    pub character_id: Option<String>,
    pub character_name: String,
    pub character_level: Option<i64>,
    pub element: Option<String>,
    pub light_cone: Option<String>,
    pub light_cone_level: Option<i64>,
    #[serde(rename = "HP")]
    pub hp: i64,
    #[serde(rename = "ATK")]
    pub atk: i64,
    #[serde(rename = "DEF")]
    pub def: i64,
    #[serde(rename = "SPD")]
    pub spd: i64,
    #[serde(rename = "CRIT Rate")]
    pub crit_rate: f64,
    #[serde(rename = "CRIT DMG")]
    pub crit_dmg: f64,
}

impl CharacterRow {
    pub const COLUMNS: [&'static str; 15] = [
        "uid",
        "nickname",
        "level",
        "character_id",
        "character_name",
        "character_level",
        "element",
        "light_cone",
        "light_cone_level",
        "HP",
        "ATK",
        "DEF",
        "SPD",
        "CRIT Rate",
        "CRIT DMG",
    ];

    pub fn stat(&self, stat: CoreStat) -> DisplayValue {
        match stat {
            CoreStat::Hp => DisplayValue::Flat(self.hp),
            CoreStat::Atk => DisplayValue::Flat(self.atk),
            CoreStat::Def => DisplayValue::Flat(self.def),
            CoreStat::Spd => DisplayValue::Flat(self.spd),
            CoreStat::CritRate => DisplayValue::Percent(self.crit_rate),
            CoreStat::CritDmg => DisplayValue::Percent(self.crit_dmg),
        }
    }
}

/// 副属性槽位；补齐用的空槽三个字段都为 `None`。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SubstatSlot {
    pub name: Option<String>,
    pub value: DisplayValue,
    pub is_percent: Option<bool>,
}

impl SubstatSlot {
    pub fn is_padding(&self) -> bool {
        self.name.is_none() && self.value.is_absent() && self.is_percent.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelicRow {
    pub uid: i64,
    pub character_name: String,
    pub slot: Option<String>,
    pub set_name: Option<String>,
    pub rarity: Option<i64>,
    pub main_stat_name: Option<String>,
    pub main_stat_value: DisplayValue,
    pub main_stat_is_percent: bool,
    pub substats: [SubstatSlot; SUBSTAT_SLOTS],
    /// 原始副属性数量（截断前），可能大于槽位数
    pub num_substats: usize,
}

impl RelicRow {
    pub const COLUMNS: [&'static str; 21] = [
        "uid",
        "character_name",
        "slot",
        "set_name",
        "rarity",
        "main_stat_name",
        "main_stat_value",
        "main_stat_is_percent",
        "substat1_name",
        "substat1_value",
        "substat1_is_percent",
        "substat2_name",
        "substat2_value",
        "substat2_is_percent",
        "substat3_name",
        "substat3_value",
        "substat3_is_percent",
        "substat4_name",
        "substat4_value",
        "substat4_is_percent",
        "num_substats",
    ];

    pub fn populated_substats(&self) -> impl Iterator<Item = &SubstatSlot> {
        self.substats.iter().filter(|s| !s.is_padding())
    }
}

/// 单次转换的完整产出；两个行集合都在内存中构建完成后才会落盘。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NormalizedProfile {
    pub characters: Vec<CharacterRow>,
    pub relics: Vec<RelicRow>,
}

impl NormalizedProfile {
    /// 展示层按角色名过滤遗器
    pub fn relics_for<'a>(&'a self, character_name: &'a str) -> impl Iterator<Item = &'a RelicRow> {
        self.relics
            .iter()
            .filter(move |r| r.character_name == character_name)
    }
}
