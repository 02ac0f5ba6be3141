// ==========================================
// 销售数据访问层 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod dao_factory;
pub mod department_repo;
pub mod department_repo_impl;
pub mod error;
pub mod seller_repo;
pub mod seller_repo_impl;

// 重导出核心仓储
pub use dao_factory::DaoFactory;
pub use department_repo::DepartmentRepository;
pub use department_repo_impl::DepartmentRepositoryImpl;
pub use error::{RepositoryError, RepositoryResult};
pub use seller_repo::SellerRepository;
pub use seller_repo_impl::SellerRepositoryImpl;
