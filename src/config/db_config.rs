// ==========================================
// 销售数据访问层 - 连接配置
// ==========================================
// 来源优先级: 配置文件 (JSON) → 环境变量 SALES_DAO_DB_URL → 用户数据目录默认路径
// ==========================================

use crate::db::DEFAULT_BUSY_TIMEOUT_MS;
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 覆盖数据库地址的环境变量
pub const DB_URL_ENV: &str = "SALES_DAO_DB_URL";

/// 内存数据库地址
pub const IN_MEMORY_URL: &str = ":memory:";

// ==========================================
// DbConfig - 数据库连接配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    /// 数据库地址：文件路径、`sqlite:` 前缀路径或 `:memory:`
    pub db_url: String,
    /// busy_timeout（毫秒）
    pub busy_timeout_ms: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            db_url: default_db_path(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl DbConfig {
    /// 指向给定地址的配置
    pub fn with_url(db_url: impl Into<String>) -> Self {
        Self {
            db_url: db_url.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// 内存数据库配置
    pub fn in_memory() -> Self {
        Self::with_url(IN_MEMORY_URL)
    }

    /// 从 JSON 文件读取配置，缺失字段使用默认值
    ///
    /// # 示例
    /// ```json
    /// { "db_url": "sqlite://./sales.db", "busy_timeout_ms": 2000 }
    /// ```
    pub fn from_file(path: &Path) -> RepositoryResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RepositoryError::ConfigError(format!("无法读取配置文件 {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// 从 JSON 字符串解析配置
    pub fn from_json(raw: &str) -> RepositoryResult<Self> {
        let config: DbConfig = serde_json::from_str(raw)
            .map_err(|e| RepositoryError::ConfigError(format!("配置格式错误: {}", e)))?;

        if config.db_url.trim().is_empty() {
            return Err(RepositoryError::ConfigError("db_url 不能为空".to_string()));
        }
        Ok(config)
    }

    /// 按优先级加载配置
    ///
    /// 1. `path` 指定的配置文件（若提供）
    /// 2. 环境变量 `SALES_DAO_DB_URL` 覆盖 db_url
    /// 3. 否则使用默认路径
    pub fn load(path: Option<&Path>) -> RepositoryResult<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };

        if let Some(url) = env_db_url() {
            tracing::debug!("使用环境变量 {} 覆盖 db_url", DB_URL_ENV);
            config.db_url = url;
        }

        config.ensure_parent_dir()?;
        Ok(config)
    }

    /// 去掉 `sqlite:` / `sqlite://` 前缀后的实际路径
    pub fn database_path(&self) -> String {
        let url = self.db_url.trim();
        url.strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url)
            .to_string()
    }

    /// 是否为内存数据库
    pub fn is_in_memory(&self) -> bool {
        self.database_path() == IN_MEMORY_URL
    }

    /// 确保文件数据库的父目录存在（内存数据库直接返回）
    pub fn ensure_parent_dir(&self) -> RepositoryResult<()> {
        if self.is_in_memory() {
            return Ok(());
        }
        let path = PathBuf::from(self.database_path());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                RepositoryError::ConfigError(format!("无法创建目录 {}: {}", parent.display(), e))
            })?;
        }
        Ok(())
    }
}

fn env_db_url() -> Option<String> {
    std::env::var(DB_URL_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 默认数据库路径（用户数据目录下，拿不到时回退到当前目录）
pub fn default_db_path() -> String {
    dirs::data_dir()
        .map(|dir| dir.join("sales-dao").join("sales_dao.db"))
        .unwrap_or_else(|| PathBuf::from("./sales_dao.db"))
        .to_string_lossy()
        .to_string()
}
