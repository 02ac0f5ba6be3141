// ==========================================
// 销售数据访问层 - 部门 Repository Trait
// ==========================================
// 职责: 定义 department 表的 CRUD 接口（不绑定具体存储技术）
// 实现者: DepartmentRepositoryImpl（使用 rusqlite）
// ==========================================

use crate::domain::Department;
use crate::repository::error::RepositoryResult;

// ==========================================
// DepartmentRepository Trait
// ==========================================
pub trait DepartmentRepository: Send + Sync {
    /// 插入部门，并将数据库分配的主键回写到 `department.id`
    ///
    /// # 返回
    /// - Ok(id): 新分配的主键
    /// - Err: 数据库错误（包括未插入任何记录）
    fn insert(&self, department: &mut Department) -> RepositoryResult<i64>;

    /// 按主键更新部门名称
    ///
    /// # 返回
    /// - Err(MissingId): `department.id` 未设置
    /// - Err(NoRowsAffected): 主键不存在
    fn update(&self, department: &Department) -> RepositoryResult<()>;

    /// 按主键删除部门
    ///
    /// # 返回
    /// - Err(NoRowsAffected): 主键不存在
    /// - Err(ForeignKeyViolation): 仍有销售员引用该部门
    fn delete_by_id(&self, id: i64) -> RepositoryResult<()>;

    /// 按主键查询
    ///
    /// # 返回
    /// - Ok(Some(Department)): 找到
    /// - Ok(None): 未找到（不是错误）
    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Department>>;

    /// 查询全部部门，按主键升序
    fn find_all(&self) -> RepositoryResult<Vec<Department>>;
}
