use crate::error::ProfileError;
use crate::storage::entity::{character_row, relic_row};
use log::info;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub fn processed_db_path(processed_dir: &Path, uid: i64) -> PathBuf {
    processed_dir.join(format!("profile_{}.db", uid))
}

pub fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}?mode=rwc", path.display())
}

pub async fn establish_connection(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    // 单次转换只需要一个连接；内存库也必须复用同一连接
    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;

    // 创建表（如果不存在）
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Characters table
    let stmt = builder.build(
        schema
            .create_table_from_entity(character_row::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    // Relics table
    let stmt = builder.build(
        schema
            .create_table_from_entity(relic_row::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    info!("Profile store ready: {}", db_url);

    Ok(db)
}

/// 打开（或创建）某个 UID 的结果库
pub async fn open_profile_store(
    processed_dir: &Path,
    uid: i64,
) -> Result<DatabaseConnection, ProfileError> {
    std::fs::create_dir_all(processed_dir)?;
    let db = establish_connection(&sqlite_url(&processed_db_path(processed_dir, uid))).await?;
    Ok(db)
}
