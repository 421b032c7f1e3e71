use crate::config::AppConfig;
use crate::error::ProfileError;
use crate::profile::{normalize, NormalizeOutcome, NormalizedProfile};
use crate::storage::repository::ProfileRepository;
use crate::storage::{open_profile_store, processed_db_path, FsProfileSource, ProfileSource};
use log::{info, warn};
use sea_orm::DatabaseConnection;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TransformSummary {
    pub uid: i64,
    pub output: PathBuf,
    pub characters: usize,
    pub relics: usize,
    pub issues: usize,
}

/// 读取并转换，不产生任何写入
pub fn prepare(source: &dyn ProfileSource, uid: i64) -> Result<NormalizeOutcome, ProfileError> {
    let raw = source.load_raw_profile(uid)?;
    // 结果库按请求的 UID 命名，文档里的 UID 必须一致
    if raw.player.uid != uid {
        return Err(ProfileError::SchemaViolation {
            uid,
            message: format!("文档中的 player.uid 为 {}", raw.player.uid),
        });
    }
    Ok(normalize(&raw))
}

pub async fn persist(
    db: &DatabaseConnection,
    profile: &NormalizedProfile,
) -> Result<(), ProfileError> {
    ProfileRepository::replace_all(db, profile).await?;
    Ok(())
}

/// 完整的转换流程：两组行都在内存中构建完成后才打开并写入结果库。
pub async fn run_transform(config: &AppConfig, uid: i64) -> Result<TransformSummary, ProfileError> {
    let source = FsProfileSource::new(&config.raw_dir);
    let outcome = prepare(&source, uid)?;

    let output = processed_db_path(&config.processed_dir, uid);
    let fresh = !output.exists();
    let db = open_profile_store(&config.processed_dir, uid).await?;
    if let Err(e) = persist(&db, &outcome.profile).await {
        // 首次写入失败时不留下只有表结构的空库
        if fresh {
            discard_store(db, &output).await;
        }
        return Err(e);
    }

    info!("UID {} 处理结果已保存到 {}", uid, output.display());

    Ok(TransformSummary {
        uid,
        output,
        characters: outcome.profile.characters.len(),
        relics: outcome.profile.relics.len(),
        issues: outcome.issues.len(),
    })
}

async fn discard_store(db: DatabaseConnection, path: &Path) {
    if let Err(e) = db.close().await {
        warn!("关闭结果库失败: {}", e);
    }
    if let Err(e) = std::fs::remove_file(path) {
        warn!("删除未完成的结果库失败 {}: {}", path.display(), e);
    }
}

/// 展示层读取接口
pub async fn load_processed(
    config: &AppConfig,
    uid: i64,
) -> Result<NormalizedProfile, ProfileError> {
    let path = processed_db_path(&config.processed_dir, uid);
    if !path.exists() {
        return Err(ProfileError::ProcessedNotFound { uid, path });
    }
    let db = open_profile_store(&config.processed_dir, uid).await?;
    Ok(ProfileRepository::load(&db).await?)
}
