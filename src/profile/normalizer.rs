use super::raw::{
    RawCharacter, RawList, RawNumber, RawPlayer, RawProfile, RawRelic, RawStatBlock, RawSubstat,
};
use super::rows::{CharacterRow, NormalizedProfile, RelicRow, SubstatSlot, SUBSTAT_SLOTS};
use super::stat::CoreStat;
use super::unit::{resolve, DisplayValue, Unit};
use log::{info, warn};
use std::collections::HashSet;
use std::fmt;

/// 单条记录上被就地吸收的问题，不会中断整批转换。
#[derive(Debug, Clone, PartialEq)]
pub enum RecordIssue {
    /// 角色没有对应的属性块
    MissingStats { character: String },
    /// 属性块里缺少某项核心属性
    MissingStat { character: String, stat: &'static str },
    /// 角色没有任何遗器
    NoRelics { character: String },
    /// 属性块的角色名不在角色列表中
    OrphanStats { character: Option<String> },
    /// 遗器的角色名不在角色列表中
    OrphanRelic { character: Option<String> },
    /// 数值存在但不是合法数字
    MalformedNumeric { context: String, field: String },
    /// 列表中无法识别的元素，已跳过
    SkippedEntry { context: String, index: usize },
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIssue::MissingStats { character } => {
                write!(f, "角色 {} 未找到属性数据，使用默认值", character)
            }
            RecordIssue::MissingStat { character, stat } => {
                write!(f, "角色 {} 缺少属性 {}，使用默认值", character, stat)
            }
            RecordIssue::NoRelics { character } => write!(f, "角色 {} 没有遗器", character),
            RecordIssue::OrphanStats { character } => write!(
                f,
                "属性块 {} 没有匹配的角色，已忽略",
                character.as_deref().unwrap_or("<无名>")
            ),
            RecordIssue::OrphanRelic { character } => write!(
                f,
                "遗器所属角色 {} 不在角色列表中",
                character.as_deref().unwrap_or("<无名>")
            ),
            RecordIssue::MalformedNumeric { context, field } => {
                write!(f, "{} 的 {} 不是合法数值，按缺失处理", context, field)
            }
            RecordIssue::SkippedEntry { context, index } => {
                write!(f, "{} 的第 {} 项无法识别，已跳过", context, index)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NormalizeOutcome {
    pub profile: NormalizedProfile,
    pub issues: Vec<RecordIssue>,
}

/// 将原始文档展开为角色行与遗器行。纯函数：同一输入总是得到同一输出。
pub fn normalize(raw: &RawProfile) -> NormalizeOutcome {
    let mut issues = Vec::new();
    check_list(&raw.characters, "characters", &mut issues);
    check_list(&raw.stats, "stats", &mut issues);
    check_list(&raw.relics, "relics", &mut issues);

    let characters: Vec<CharacterRow> = raw
        .characters
        .iter()
        .map(|c| build_character_row(&raw.player, c, &raw.stats, &mut issues))
        .collect();

    let relics: Vec<RelicRow> = raw
        .relics
        .iter()
        .map(|r| build_relic_row(raw.player.uid, r, &mut issues))
        .collect();

    check_joins(raw, &mut issues);

    for issue in &issues {
        warn!("uid={} {}", raw.player.uid, issue);
    }
    info!(
        "uid={} 转换完成: 角色 {} 行, 遗器 {} 行, 问题 {} 条",
        raw.player.uid,
        characters.len(),
        relics.len(),
        issues.len()
    );

    NormalizeOutcome {
        profile: NormalizedProfile { characters, relics },
        issues,
    }
}

/// 按角色名精确匹配属性块，重复时取第一个；无名角色永不匹配。
fn find_stats<'a>(stats: &'a [RawStatBlock], name: Option<&str>) -> Option<&'a RawStatBlock> {
    let name = name?;
    stats
        .iter()
        .find(|s| s.character_name.as_deref() == Some(name))
}

fn build_character_row(
    player: &RawPlayer,
    character: &RawCharacter,
    stats: &[RawStatBlock],
    issues: &mut Vec<RecordIssue>,
) -> CharacterRow {
    let name = character.name.as_deref();
    let label = name.unwrap_or("<无名>").to_string();
    let block = find_stats(stats, name);

    if block.is_none() {
        issues.push(RecordIssue::MissingStats {
            character: label.clone(),
        });
    }

    let mut stat_value = |stat: CoreStat| -> DisplayValue {
        let raw = block.map(|b| b.get(stat.key())).unwrap_or_default();
        if block.is_some() && raw == RawNumber::Absent {
            issues.push(RecordIssue::MissingStat {
                character: label.clone(),
                stat: stat.key(),
            });
        }
        resolve_checked(raw, stat.unit(), &label, stat.key(), issues)
    };

    let hp = stat_value(CoreStat::Hp);
    let atk = stat_value(CoreStat::Atk);
    let def = stat_value(CoreStat::Def);
    let spd = stat_value(CoreStat::Spd);
    let crit_rate = stat_value(CoreStat::CritRate);
    let crit_dmg = stat_value(CoreStat::CritDmg);

    CharacterRow {
        uid: player.uid,
        nickname: player.nickname.clone().into_inner(),
        level: flat(player.level, "player", "level", issues),
        character_id: character.character_id.clone().into_inner(),
        character_name: name.unwrap_or_default().to_string(),
        character_level: flat(character.level, &label, "level", issues),
        element: character.element.clone().into_inner(),
        light_cone: character.light_cone.clone().into_inner(),
        light_cone_level: flat(character.light_cone_level, &label, "light_cone_level", issues),
        hp: hp.as_i64().unwrap_or(0),
        atk: atk.as_i64().unwrap_or(0),
        def: def.as_i64().unwrap_or(0),
        spd: spd.as_i64().unwrap_or(0),
        crit_rate: crit_rate.as_f64().unwrap_or(0.0),
        crit_dmg: crit_dmg.as_f64().unwrap_or(0.0),
    }
}

fn build_relic_row(uid: i64, relic: &RawRelic, issues: &mut Vec<RecordIssue>) -> RelicRow {
    let owner = relic.character_name.as_deref().unwrap_or_default().to_string();
    let context = format!(
        "{} 的遗器 {}",
        if owner.is_empty() { "<无名>" } else { owner.as_str() },
        relic.slot.as_deref().unwrap_or("?")
    );

    let main_unit = Unit::from_flag(relic.main_stat_is_percent);
    let main_stat_value = resolve_checked(
        relic.main_stat_value,
        main_unit,
        &context,
        "main_stat_value",
        issues,
    );

    check_list(&relic.substats, &format!("{} substats", context), issues);
    let mut substats: [SubstatSlot; SUBSTAT_SLOTS] = Default::default();
    for (slot, sub) in substats.iter_mut().zip(relic.substats.iter()) {
        *slot = build_substat(sub, &context, issues);
    }

    RelicRow {
        uid,
        character_name: owner,
        slot: relic.slot.clone().into_inner(),
        set_name: relic.set_name.clone().into_inner(),
        rarity: flat(relic.rarity, &context, "rarity", issues),
        main_stat_name: relic.main_stat_name.clone().into_inner(),
        main_stat_value,
        main_stat_is_percent: main_unit == Unit::Percent,
        substats,
        num_substats: relic.substats.len(),
    }
}

fn build_substat(sub: &RawSubstat, context: &str, issues: &mut Vec<RecordIssue>) -> SubstatSlot {
    let unit = Unit::from_flag(sub.is_percent);
    let field = format!("substat {}", sub.name.as_deref().unwrap_or("?"));
    SubstatSlot {
        name: sub.name.clone().into_inner(),
        value: resolve_checked(sub.value, unit, context, &field, issues),
        is_percent: Some(unit == Unit::Percent),
    }
}

fn resolve_checked(
    value: RawNumber,
    unit: Unit,
    context: &str,
    field: &str,
    issues: &mut Vec<RecordIssue>,
) -> DisplayValue {
    if value == RawNumber::Malformed {
        issues.push(RecordIssue::MalformedNumeric {
            context: context.to_string(),
            field: field.to_string(),
        });
    }
    resolve(value, unit)
}

fn flat(value: RawNumber, context: &str, field: &str, issues: &mut Vec<RecordIssue>) -> Option<i64> {
    resolve_checked(value, Unit::Flat, context, field, issues).as_i64()
}

fn check_list<T>(list: &RawList<T>, context: &str, issues: &mut Vec<RecordIssue>) {
    for &index in &list.rejected {
        issues.push(RecordIssue::SkippedEntry {
            context: context.to_string(),
            index,
        });
    }
}

fn check_joins(raw: &RawProfile, issues: &mut Vec<RecordIssue>) {
    let names: HashSet<&str> = raw
        .characters
        .iter()
        .filter_map(|c| c.name.as_deref())
        .collect();

    for block in raw.stats.iter() {
        if !block
            .character_name
            .as_deref()
            .is_some_and(|n| names.contains(n))
        {
            issues.push(RecordIssue::OrphanStats {
                character: block.character_name.clone().into_inner(),
            });
        }
    }

    for relic in raw.relics.iter() {
        if !relic
            .character_name
            .as_deref()
            .is_some_and(|n| names.contains(n))
        {
            issues.push(RecordIssue::OrphanRelic {
                character: relic.character_name.clone().into_inner(),
            });
        }
    }

    let owners: HashSet<&str> = raw
        .relics
        .iter()
        .filter_map(|r| r.character_name.as_deref())
        .collect();
    let mut reported = HashSet::new();
    for name in raw.characters.iter().filter_map(|c| c.name.as_deref()) {
        if !owners.contains(name) && reported.insert(name) {
            issues.push(RecordIssue::NoRelics {
                character: name.to_string(),
            });
        }
    }
}
