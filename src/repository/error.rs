// ==========================================
// 销售数据访问层 - 仓储层错误类型
// ==========================================
// 所有变体都是"存储错误"，只对原因做分类；调用方可统一处理
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 连接错误 =====
    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    // ===== 执行错误 =====
    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    #[error("未影响任何记录: {entity} with id={id}")]
    NoRowsAffected { entity: String, id: String },

    // ===== 约束错误 =====
    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("外键约束违反: {0}")]
    ForeignKeyViolation(String),

    #[error("非空约束违反: {0}")]
    NotNullViolation(String),

    // ===== 调用方错误 =====
    #[error("缺少主键: {entity} ({operation})")]
    MissingId { entity: String, operation: String },

    // ===== 配置错误 =====
    #[error("配置错误: {0}")]
    ConfigError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    pub(crate) fn no_rows_affected(entity: &str, id: i64) -> Self {
        RepositoryError::NoRowsAffected {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn missing_id(entity: &str, operation: &str) -> Self {
        RepositoryError::MissingId {
            entity: entity.to_string(),
            operation: operation.to_string(),
        }
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else if msg.contains("NOT NULL") {
                    RepositoryError::NotNullViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::SqliteFailure(code, None)
                if code.code == rusqlite::ErrorCode::CannotOpen =>
            {
                RepositoryError::DatabaseConnectionError(code.to_string())
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
