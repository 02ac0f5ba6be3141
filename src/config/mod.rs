// ==========================================
// 销售数据访问层 - 配置层
// ==========================================
// 职责: 数据库连接配置的加载（文件 / 环境变量 / 默认路径）
// ==========================================

pub mod db_config;

pub use db_config::{default_db_path, DbConfig, DB_URL_ENV, IN_MEMORY_URL};
