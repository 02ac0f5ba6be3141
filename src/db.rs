// ==========================================
// 销售数据访问层 - SQLite 连接提供者
// ==========================================
// 目标:
// - 统一所有连接的 PRAGMA 行为（外键必须逐连接开启）
// - 单连接共享给多个 DAO，生命周期由 ConnectionProvider 管理
// ==========================================

use crate::config::DbConfig;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 开发库 schema（department / seller）
pub const SCHEMA_SQL: &str = include_str!("../scripts/dev_db/schema.sql");

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    configure_sqlite_connection_with(conn, DEFAULT_BUSY_TIMEOUT_MS)
}

/// 同上，busy_timeout 由调用方指定
pub fn configure_sqlite_connection_with(
    conn: &Connection,
    busy_timeout_ms: u64,
) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(
    db_path: &str,
    busy_timeout_ms: u64,
) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection_with(&conn, busy_timeout_ms)?;
    Ok(conn)
}

/// 重置数据库文件：已存在的文件改名为 `<path>.bak`
///
/// # 返回
/// - Ok(Some(path)): 备份文件路径
/// - Ok(None): 原文件不存在或为内存数据库，无需备份
pub fn reset_database_file(config: &DbConfig) -> RepositoryResult<Option<PathBuf>> {
    if config.is_in_memory() {
        return Ok(None);
    }
    config.ensure_parent_dir()?;

    let path = PathBuf::from(config.database_path());
    if !path.exists() {
        return Ok(None);
    }

    let mut backup = path.clone().into_os_string();
    backup.push(".bak");
    let backup = PathBuf::from(backup);
    std::fs::rename(&path, &backup).map_err(|e| {
        RepositoryError::DatabaseConnectionError(format!(
            "无法备份数据库 {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::info!("数据库已备份到 {}", backup.display());
    Ok(Some(backup))
}

/// 建表（CREATE TABLE IF NOT EXISTS，可重复执行）
///
/// 仅用于开发库/测试库初始化，不做版本管理。
pub fn apply_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}

// ==========================================
// ConnectionProvider - 连接提供者
// ==========================================
pub struct ConnectionProvider {
    db_url: String,
    conn: Option<Arc<Mutex<Connection>>>,
}

impl ConnectionProvider {
    /// 按配置打开连接
    pub fn open(config: &DbConfig) -> RepositoryResult<Self> {
        let path = config.database_path();
        tracing::info!("打开数据库连接: {}", path);

        config.ensure_parent_dir()?;
        let conn = open_sqlite_connection(&path, config.busy_timeout_ms).map_err(|e| {
            RepositoryError::DatabaseConnectionError(format!("无法打开数据库 {}: {}", path, e))
        })?;

        Ok(Self {
            db_url: config.db_url.clone(),
            conn: Some(Arc::new(Mutex::new(conn))),
        })
    }

    /// 打开内存数据库（测试/演示）
    pub fn open_in_memory() -> RepositoryResult<Self> {
        Self::open(&DbConfig::in_memory())
    }

    /// 获取共享连接句柄
    ///
    /// # 返回
    /// - Err(DatabaseConnectionError): 连接已关闭
    pub fn get_connection(&self) -> RepositoryResult<Arc<Mutex<Connection>>> {
        self.conn.clone().ok_or_else(|| {
            RepositoryError::DatabaseConnectionError(format!("连接已关闭: {}", self.db_url))
        })
    }

    /// 是否仍持有连接
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// 在当前连接上建表
    pub fn apply_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_connection()?;
        let guard = conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;
        apply_schema(&guard)?;
        Ok(())
    }

    /// 释放提供者持有的连接（重复调用无副作用）
    ///
    /// 若仍有 DAO 共享该连接，则在最后一个持有者释放时关闭。
    pub fn close_connection(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };

        match Arc::try_unwrap(conn) {
            Ok(mutex) => {
                let conn = match mutex.into_inner() {
                    Ok(conn) => conn,
                    Err(poisoned) => poisoned.into_inner(),
                };
                if let Err((_, e)) = conn.close() {
                    tracing::warn!("关闭数据库连接失败: {}", e);
                } else {
                    tracing::info!("数据库连接已关闭: {}", self.db_url);
                }
            }
            Err(_) => {
                tracing::debug!("连接仍被 DAO 共享，延后到最后一个持有者释放时关闭");
            }
        }
    }
}

impl Drop for ConnectionProvider {
    fn drop(&mut self) {
        self.close_connection();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_keys_enabled() {
        let provider = ConnectionProvider::open_in_memory().unwrap();
        let conn = provider.get_connection().unwrap();
        let guard = conn.lock().unwrap();

        let fk: i64 = guard
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_apply_schema_is_idempotent() {
        let provider = ConnectionProvider::open_in_memory().unwrap();
        provider.apply_schema().unwrap();
        provider.apply_schema().unwrap();

        let conn = provider.get_connection().unwrap();
        let guard = conn.lock().unwrap();
        let tables: i64 = guard
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('department', 'seller')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_close_connection_twice() {
        let mut provider = ConnectionProvider::open_in_memory().unwrap();
        assert!(provider.is_open());

        provider.close_connection();
        provider.close_connection();

        assert!(!provider.is_open());
        assert!(matches!(
            provider.get_connection(),
            Err(RepositoryError::DatabaseConnectionError(_))
        ));
    }

    #[test]
    fn test_open_creates_missing_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("sales.db");
        let config = DbConfig::with_url(format!("sqlite:{}", db_path.display()));

        let provider = ConnectionProvider::open(&config).unwrap();
        provider.apply_schema().unwrap();

        assert!(db_path.exists());
    }

    #[test]
    fn test_reset_database_file_strips_url_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("seed.db");
        let config = DbConfig::with_url(format!("sqlite://{}", db_path.display()));

        // 第一次：文件不存在，无需备份
        assert_eq!(reset_database_file(&config).unwrap(), None);

        let mut provider = ConnectionProvider::open(&config).unwrap();
        provider.apply_schema().unwrap();
        provider.close_connection();
        assert!(db_path.exists());

        // 第二次：按去掉前缀后的真实路径备份
        let backup = reset_database_file(&config).unwrap().unwrap();
        assert_eq!(backup, dir.path().join("seed.db.bak"));
        assert!(backup.exists());
        assert!(!db_path.exists());
    }

    #[test]
    fn test_reset_in_memory_is_noop() {
        assert_eq!(reset_database_file(&DbConfig::in_memory()).unwrap(), None);
    }

    #[test]
    fn test_shared_handle_survives_provider_close() {
        let mut provider = ConnectionProvider::open_in_memory().unwrap();
        let shared = provider.get_connection().unwrap();
        provider.close_connection();

        let guard = shared.lock().unwrap();
        let one: i64 = guard.query_row("SELECT 1", [], |row| row.get(0)).unwrap();
        assert_eq!(one, 1);
    }
}
