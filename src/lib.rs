// ==========================================
// 销售数据访问层 - 核心库
// ==========================================
// 技术栈: Rust + SQLite (rusqlite)
// 实体: Department 1 ─── N Seller
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体
pub mod domain;

// 数据仓储层 - DAO 接口 / 实现 / 工厂
pub mod repository;

// 配置层 - 连接配置
pub mod config;

// 数据库基础设施（连接提供者/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::DbConfig;
pub use db::ConnectionProvider;
pub use domain::{Department, Seller};
pub use repository::{
    DaoFactory, DepartmentRepository, RepositoryError, RepositoryResult, SellerRepository,
};

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
