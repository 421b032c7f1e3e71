use crate::error::ProfileError;
use crate::profile::RawProfile;
use log::info;
use std::path::{Path, PathBuf};

/// 原始展示数据的来源（抓取端写出的 JSON 文档）。
pub trait ProfileSource {
    fn load_raw_profile(&self, uid: i64) -> Result<RawProfile, ProfileError>;
}

pub fn raw_profile_path(raw_dir: &Path, uid: i64) -> PathBuf {
    raw_dir.join(format!("hsr_{}.json", uid))
}

pub fn parse_raw_profile(uid: i64, text: &str) -> Result<RawProfile, ProfileError> {
    serde_json::from_str(text).map_err(|e| ProfileError::SchemaViolation {
        uid,
        message: e.to_string(),
    })
}

/// 目录中按 `hsr_{uid}.json` 命名的原始文档
pub struct FsProfileSource {
    raw_dir: PathBuf,
}

impl FsProfileSource {
    pub fn new(raw_dir: impl Into<PathBuf>) -> Self {
        Self {
            raw_dir: raw_dir.into(),
        }
    }
}

impl ProfileSource for FsProfileSource {
    fn load_raw_profile(&self, uid: i64) -> Result<RawProfile, ProfileError> {
        let path = raw_profile_path(&self.raw_dir, uid);
        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ProfileError::SourceNotFound { uid, path });
            }
            Err(e) => return Err(ProfileError::Io(e)),
        };
        info!("读取原始数据: {}", path.display());
        parse_raw_profile(uid, &text)
    }
}

/// 内存中的原始文档，按 UID 索引
#[cfg(test)]
#[derive(Default)]
pub struct MemoryProfileSource {
    docs: std::collections::HashMap<i64, String>,
}

#[cfg(test)]
impl MemoryProfileSource {
    pub fn insert(&mut self, uid: i64, doc: impl Into<String>) {
        self.docs.insert(uid, doc.into());
    }
}

#[cfg(test)]
impl ProfileSource for MemoryProfileSource {
    fn load_raw_profile(&self, uid: i64) -> Result<RawProfile, ProfileError> {
        match self.docs.get(&uid) {
            Some(text) => parse_raw_profile(uid, text),
            None => Err(ProfileError::SourceNotFound {
                uid,
                path: PathBuf::from(format!("memory://{}", uid)),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsProfileSource::new(dir.path());
        assert_matches!(
            source.load_raw_profile(42),
            Err(ProfileError::SourceNotFound { uid: 42, .. })
        );
    }

    #[test]
    fn reads_document_by_uid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            raw_profile_path(dir.path(), 7),
            r#"{"player": {"uid": 7, "nickname": "P", "level": 10}, "characters": []}"#,
        )
        .unwrap();
        let raw = FsProfileSource::new(dir.path()).load_raw_profile(7).unwrap();
        assert_eq!(raw.player.uid, 7);
        assert!(raw.characters.is_empty());
    }

    #[test]
    fn bad_shape_is_schema_violation() {
        let mut source = MemoryProfileSource::default();
        source.insert(1, r#"{"player": {"uid": 1}, "relics": "none"}"#);
        source.insert(2, "not json");
        source.insert(3, r#"{"characters": []}"#);
        for uid in [1, 2, 3] {
            assert_matches!(
                source.load_raw_profile(uid),
                Err(ProfileError::SchemaViolation { .. })
            );
        }
    }
}
