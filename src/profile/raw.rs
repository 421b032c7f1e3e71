use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::ops::Deref;

/// 原始文档中的数值字段。
///
/// 缺失、`null` 与类型错误在这里统一打标签，由 Unit Resolver 和行构建器共同处理，
/// 不在各个调用点各自兜底。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RawNumber {
    Value(f64),
    #[default]
    Absent,
    Malformed,
}

/// 原始文档中的文本字段，数字会被转成字符串。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawText(pub Option<String>);

/// 原始文档中的布尔标记（`is_percent` 等）。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawFlag(pub Option<bool>);

/// 统一的 get-or-default 访问器。
pub trait Lenient: Sized + Default {
    fn from_json(value: &Value) -> Self;

    fn lookup(map: &Map<String, Value>, key: &str) -> Self {
        map.get(key).map(Self::from_json).unwrap_or_default()
    }
}

impl Lenient for RawNumber {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => RawNumber::Absent,
            Value::Number(n) => n.as_f64().map(RawNumber::Value).unwrap_or(RawNumber::Malformed),
            _ => RawNumber::Malformed,
        }
    }
}

impl Lenient for RawText {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => RawText(Some(s.clone())),
            Value::Number(n) => RawText(Some(n.to_string())),
            _ => RawText(None),
        }
    }
}

impl Lenient for RawFlag {
    fn from_json(value: &Value) -> Self {
        RawFlag(value.as_bool())
    }
}

macro_rules! lenient_deserialize {
    ($($ty:ty),*) => {
        $(
            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let value = Value::deserialize(deserializer)?;
                    Ok(<$ty as Lenient>::from_json(&value))
                }
            }
        )*
    };
}

lenient_deserialize!(RawNumber, RawText, RawFlag);

impl RawText {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl RawFlag {
    /// 缺失的标记一律按 false 处理，不根据数值大小推断。
    pub fn resolved(self) -> bool {
        self.0.unwrap_or(false)
    }
}

/// 逐元素解析的列表：无法识别的元素被跳过并记下下标，不影响其余元素。
#[derive(Debug, Clone, PartialEq)]
pub struct RawList<T> {
    pub items: Vec<T>,
    /// 被跳过的元素在源列表中的下标
    pub rejected: Vec<usize>,
    /// 字段存在但不是列表
    pub malformed: bool,
}

impl<T> Default for RawList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            rejected: Vec::new(),
            malformed: false,
        }
    }
}

impl<T> Deref for RawList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: DeserializeOwned> Lenient for RawList<T> {
    fn from_json(value: &Value) -> Self {
        let mut list = RawList::default();
        match value {
            Value::Null => {}
            Value::Array(elements) => {
                for (index, element) in elements.iter().enumerate() {
                    match serde_json::from_value::<T>(element.clone()) {
                        Ok(item) => list.items.push(item),
                        Err(_) => list.rejected.push(index),
                    }
                }
            }
            _ => list.malformed = true,
        }
        list
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for RawList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(RawList::from_json(&value))
    }
}

/// 集合字段必须是列表（`null` 视为空），否则整份文档不合法
fn strict_list<'de, D, T>(deserializer: D) -> Result<RawList<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let list = RawList::<T>::deserialize(deserializer)?;
    if list.malformed {
        return Err(D::Error::custom("expected a list"));
    }
    Ok(list)
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    pub player: RawPlayer,
    #[serde(default, deserialize_with = "strict_list")]
    pub characters: RawList<RawCharacter>,
    #[serde(default, deserialize_with = "strict_list")]
    pub stats: RawList<RawStatBlock>,
    #[serde(default, deserialize_with = "strict_list")]
    pub relics: RawList<RawRelic>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPlayer {
    pub uid: i64,
    #[serde(default)]
    pub nickname: RawText,
    #[serde(default)]
    pub level: RawNumber,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCharacter {
    #[serde(default)]
    pub character_id: RawText,
    #[serde(default)]
    pub name: RawText,
    #[serde(default)]
    pub level: RawNumber,
    #[serde(default)]
    pub element: RawText,
    #[serde(default)]
    pub light_cone: RawText,
    #[serde(default)]
    pub light_cone_level: RawNumber,
}

/// 单个角色的属性块；属性名到数值的映射保持原样，按名取值。
#[derive(Debug, Clone, Deserialize)]
pub struct RawStatBlock {
    #[serde(default)]
    pub character_name: RawText,
    #[serde(flatten)]
    pub values: Map<String, Value>,
}

impl RawStatBlock {
    pub fn get(&self, key: &str) -> RawNumber {
        RawNumber::lookup(&self.values, key)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRelic {
    #[serde(default)]
    pub character_name: RawText,
    #[serde(default)]
    pub slot: RawText,
    #[serde(default)]
    pub set_name: RawText,
    #[serde(default)]
    pub rarity: RawNumber,
    #[serde(default)]
    pub main_stat_name: RawText,
    #[serde(default)]
    pub main_stat_value: RawNumber,
    #[serde(default)]
    pub main_stat_is_percent: RawFlag,
    #[serde(default, deserialize_with = "strict_list")]
    pub substats: RawList<RawSubstat>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSubstat {
    #[serde(default)]
    pub name: RawText,
    #[serde(default)]
    pub value: RawNumber,
    #[serde(default)]
    pub is_percent: RawFlag,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_are_tagged() {
        assert_eq!(RawNumber::from_json(&json!(1.5)), RawNumber::Value(1.5));
        assert_eq!(RawNumber::from_json(&json!(null)), RawNumber::Absent);
        assert_eq!(RawNumber::from_json(&json!("12")), RawNumber::Malformed);
        assert_eq!(RawNumber::from_json(&json!(true)), RawNumber::Malformed);
    }

    #[test]
    fn missing_key_is_absent() {
        let map = json!({ "HP": 1000 });
        let map = map.as_object().unwrap();
        assert_eq!(RawNumber::lookup(map, "HP"), RawNumber::Value(1000.0));
        assert_eq!(RawNumber::lookup(map, "ATK"), RawNumber::Absent);
    }

    #[test]
    fn text_accepts_numbers() {
        assert_eq!(RawText::from_json(&json!(1005)).as_deref(), Some("1005"));
        assert_eq!(RawText::from_json(&json!("Kafka")).as_deref(), Some("Kafka"));
        assert_eq!(RawText::from_json(&json!({})).as_deref(), None);
    }

    #[test]
    fn absent_flag_resolves_false() {
        assert!(!RawFlag(None).resolved());
        assert!(!RawFlag::from_json(&json!("yes")).resolved());
        assert!(RawFlag::from_json(&json!(true)).resolved());
    }

    #[test]
    fn partial_relic_deserializes() {
        let relic: RawRelic = serde_json::from_value(json!({
            "character_name": "Kafka",
            "main_stat_value": "oops",
            "substats": [{ "name": "SPD", "value": 2.3 }]
        }))
        .unwrap();
        assert_eq!(relic.main_stat_value, RawNumber::Malformed);
        assert_eq!(relic.main_stat_is_percent, RawFlag(None));
        assert_eq!(relic.substats.len(), 1);
        assert_eq!(relic.substats[0].is_percent, RawFlag(None));
    }

    #[test]
    fn stat_block_keeps_all_keys() {
        let block: RawStatBlock = serde_json::from_value(json!({
            "character_name": "Kafka",
            "HP": 3000,
            "CRIT Rate": 0.05
        }))
        .unwrap();
        assert_eq!(block.character_name.as_deref(), Some("Kafka"));
        assert_eq!(block.get("CRIT Rate"), RawNumber::Value(0.05));
        assert_eq!(block.get("SPD"), RawNumber::Absent);
    }

    #[test]
    fn list_keeps_good_entries() {
        let profile: RawProfile = serde_json::from_value(json!({
            "player": { "uid": 1 },
            "characters": [{ "name": "A" }, 3, null],
            "stats": null,
            "relics": [{ "character_name": "A", "substats": [null, { "name": "SPD" }] }]
        }))
        .unwrap();
        assert_eq!(profile.characters.len(), 1);
        assert_eq!(profile.characters.rejected, vec![1, 2]);
        assert!(profile.stats.is_empty());
        assert!(!profile.stats.malformed);
        assert_eq!(profile.relics[0].substats.len(), 1);
        assert_eq!(profile.relics[0].substats.rejected, vec![0]);
    }

    #[test]
    fn null_substats_is_empty_but_non_list_is_rejected() {
        let relic: RawRelic = serde_json::from_value(json!({
            "character_name": "A",
            "substats": null
        }))
        .unwrap();
        assert!(relic.substats.is_empty());

        let res = serde_json::from_value::<RawRelic>(json!({
            "character_name": "A",
            "substats": "none"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn non_list_characters_is_rejected() {
        let res = serde_json::from_value::<RawProfile>(json!({
            "player": { "uid": 1 },
            "characters": { "name": "Kafka" }
        }));
        assert!(res.is_err());
    }
}
