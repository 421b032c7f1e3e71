use super::unit::Unit;

/// 角色行必须输出的六项核心属性。单位是属性名的固有属性，不按记录推断。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreStat {
    Hp,
    Atk,
    Def,
    Spd,
    CritRate,
    CritDmg,
}

impl CoreStat {
    pub const ALL: [CoreStat; 6] = [
        CoreStat::Hp,
        CoreStat::Atk,
        CoreStat::Def,
        CoreStat::Spd,
        CoreStat::CritRate,
        CoreStat::CritDmg,
    ];

    /// 原始属性块中的键名，同时也是输出表的列名
    pub fn key(self) -> &'static str {
        match self {
            CoreStat::Hp => "HP",
            CoreStat::Atk => "ATK",
            CoreStat::Def => "DEF",
            CoreStat::Spd => "SPD",
            CoreStat::CritRate => "CRIT Rate",
            CoreStat::CritDmg => "CRIT DMG",
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            CoreStat::Hp | CoreStat::Atk | CoreStat::Def | CoreStat::Spd => Unit::Flat,
            CoreStat::CritRate | CoreStat::CritDmg => Unit::Percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crit_stats_are_percent() {
        let percent: Vec<&str> = CoreStat::ALL
            .iter()
            .filter(|s| s.unit() == Unit::Percent)
            .map(|s| s.key())
            .collect();
        assert_eq!(percent, vec!["CRIT Rate", "CRIT DMG"]);
    }
}
