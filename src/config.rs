use std::path::PathBuf;

/// 运行配置，显式传入原始数据源与结果存储，不依赖全局目录常量。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub raw_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let dir = |key: &str, default: &str| {
            std::env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };
        Self {
            raw_dir: dir("HSR_RAW_DIR", "data/raw"),
            processed_dir: dir("HSR_PROCESSED_DIR", "data/processed"),
            log_dir: dir("HSR_LOG_DIR", "logs"),
        }
    }
}
