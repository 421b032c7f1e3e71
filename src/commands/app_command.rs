use std::str::FromStr;

pub const USAGE: &str = "用法: hsrprofile <uid> | transform <uid> | show <uid> | help";

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Transform { uid: i64 },
    Show { uid: i64 },
    Help,
    Unknown(String),
}

impl FromStr for AppCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(AppCommand::Unknown(USAGE.to_string()));
        }

        match parts[0] {
            "transform" | "t" => match parts.get(1).map(|s| parse_uid(s)) {
                Some(Ok(uid)) => Ok(AppCommand::Transform { uid }),
                Some(Err(msg)) => Ok(AppCommand::Unknown(msg)),
                None => Ok(AppCommand::Unknown("用法: transform <uid>".to_string())),
            },
            "show" | "view" => match parts.get(1).map(|s| parse_uid(s)) {
                Some(Ok(uid)) => Ok(AppCommand::Show { uid }),
                Some(Err(msg)) => Ok(AppCommand::Unknown(msg)),
                None => Ok(AppCommand::Unknown("用法: show <uid>".to_string())),
            },
            "help" | "h" | "-h" | "--help" => Ok(AppCommand::Help),
            // 只给 UID 时等同于 transform
            first if parts.len() == 1 && first.chars().all(|c| c.is_ascii_digit()) => {
                match parse_uid(first) {
                    Ok(uid) => Ok(AppCommand::Transform { uid }),
                    Err(msg) => Ok(AppCommand::Unknown(msg)),
                }
            }
            other => Ok(AppCommand::Unknown(format!("未知命令: {}", other))),
        }
    }
}

fn parse_uid(s: &str) -> Result<i64, String> {
    match s.trim().parse::<i64>() {
        Ok(uid) if uid > 0 => Ok(uid),
        _ => Err(format!("非法的 UID: {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> AppCommand {
        AppCommand::from_str(s).unwrap()
    }

    #[test]
    fn bare_uid_is_transform() {
        assert_eq!(parse("700712292"), AppCommand::Transform { uid: 700712292 });
    }

    #[test]
    fn subcommands() {
        assert_eq!(parse("transform 42"), AppCommand::Transform { uid: 42 });
        assert_eq!(parse("show 42"), AppCommand::Show { uid: 42 });
        assert_eq!(parse("help"), AppCommand::Help);
    }

    #[test]
    fn bad_input_is_unknown() {
        assert!(matches!(parse(""), AppCommand::Unknown(_)));
        assert!(matches!(parse("transform"), AppCommand::Unknown(_)));
        assert!(matches!(parse("transform abc"), AppCommand::Unknown(_)));
        assert!(matches!(parse("show -5"), AppCommand::Unknown(_)));
        assert!(matches!(parse("fetch 42"), AppCommand::Unknown(_)));
        assert!(matches!(parse("99999999999999999999"), AppCommand::Unknown(_)));
    }
}
