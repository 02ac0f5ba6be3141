// ==========================================
// 销售数据访问层 - 领域模型层
// ==========================================
// 职责: 定义 Department / Seller 实体
// 红线: 不含数据访问逻辑
// ==========================================

pub mod department;
pub mod seller;

// 重导出核心实体
pub use department::Department;
pub use seller::Seller;
