// ==========================================
// 销售数据访问层 - 销售员 Repository Trait
// ==========================================
// 职责: 定义 seller 表的 CRUD 接口（不绑定具体存储技术）
// 实现者: SellerRepositoryImpl（使用 rusqlite）
// 约束: 查询结果中的 department 必须完整填充 (id + name)
// ==========================================

use crate::domain::{Department, Seller};
use crate::repository::error::RepositoryResult;

// ==========================================
// SellerRepository Trait
// ==========================================
pub trait SellerRepository: Send + Sync {
    /// 插入销售员，并将数据库分配的主键回写到 `seller.id`
    ///
    /// 所属部门必须已存在，由外键约束校验，不做本地预检。
    fn insert(&self, seller: &mut Seller) -> RepositoryResult<i64>;

    /// 按主键更新销售员全部字段
    ///
    /// # 返回
    /// - Err(MissingId): `seller.id` 或部门主键未设置
    /// - Err(NoRowsAffected): 主键不存在
    /// - Err(ForeignKeyViolation): 目标部门不存在
    fn update(&self, seller: &Seller) -> RepositoryResult<()>;

    /// 按主键删除销售员
    fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;

    /// 按主键查询（关联部门）
    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Seller>>;

    /// 查询全部销售员（关联部门），按主键升序
    fn find_all(&self) -> RepositoryResult<Vec<Seller>>;

    /// 查询指定部门下的销售员，按姓名升序
    ///
    /// 只使用 `department.id` 过滤，忽略 `department.name`；
    /// 部门主键未设置时返回空列表。
    fn find_by_department(&self, department: &Department) -> RepositoryResult<Vec<Seller>>;
}
