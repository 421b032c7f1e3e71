use std::path::PathBuf;

/// 文档级错误：出现时整份 UID 的转换中止，不写入任何输出。
#[derive(thiserror::Error, Debug)]
pub enum ProfileError {
    #[error("未找到 UID {uid} 的原始数据: {}", .path.display())]
    SourceNotFound { uid: i64, path: PathBuf },
    #[error("UID {uid} 的原始数据结构不合法: {message}")]
    SchemaViolation { uid: i64, message: String },
    #[error("未找到 UID {uid} 的处理结果，请先执行 transform: {}", .path.display())]
    ProcessedNotFound { uid: i64, path: PathBuf },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database error: {0}")]
    Storage(#[from] sea_orm::DbErr),
}

impl ProfileError {
    /// 进程退出码
    pub fn exit_code(&self) -> u8 {
        match self {
            ProfileError::SourceNotFound { .. } | ProfileError::ProcessedNotFound { .. } => 3,
            ProfileError::SchemaViolation { .. } => 4,
            ProfileError::Io(_) | ProfileError::Storage(_) => 1,
        }
    }
}
