// ==========================================
// 销售数据访问层 - 销售员 Repository 实现
// ==========================================
// 职责: 使用 rusqlite 实现 SellerRepository
// 约束: 查询统一 INNER JOIN department，返回完整的部门信息
// 约束: 语句/游标随作用域释放（含错误路径）
// ==========================================

mod mapping;


use crate::domain::{Department, Seller};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::seller_repo::SellerRepository;
use mapping::{map_seller_row, map_seller_rows, DepartmentCache, SELLER_WITH_DEPARTMENT_COLUMNS};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

const ENTITY: &str = "seller";

// ==========================================
// SellerRepositoryImpl
// ==========================================
pub struct SellerRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl SellerRepositoryImpl {
    /// 从共享连接创建仓储实例（连接生命周期由外部管理）
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

/// 读取所属部门主键（未持久化的部门不能被引用）
fn require_department_id(seller: &Seller, operation: &str) -> RepositoryResult<i64> {
    seller
        .department_id()
        .ok_or_else(|| RepositoryError::missing_id("seller.department", operation))
}

impl SellerRepository for SellerRepositoryImpl {
    fn insert(&self, seller: &mut Seller) -> RepositoryResult<i64> {
        let department_id = require_department_id(seller, "insert")?;

        let conn = self.get_conn()?;
        let id: Option<i64> = conn
            .query_row(
                r#"
                INSERT INTO seller
                    (Name, Email, BirthDate, BaseSalary, DepartmentId)
                VALUES
                    (?1, ?2, ?3, ?4, ?5)
                RETURNING Id
                "#,
                params![
                    seller.name,
                    seller.email,
                    seller.birth_date,
                    seller.base_salary,
                    department_id,
                ],
                |row| row.get(0),
            )
            .optional()?;

        let id = id.ok_or_else(|| {
            RepositoryError::DatabaseQueryError("插入 seller 未影响任何记录".to_string())
        })?;

        seller.id = Some(id);
        tracing::info!(id, department_id, "seller 插入完成");
        Ok(id)
    }

    fn update(&self, seller: &Seller) -> RepositoryResult<()> {
        let id = seller
            .id
            .ok_or_else(|| RepositoryError::missing_id(ENTITY, "update"))?;
        let department_id = require_department_id(seller, "update")?;

        let conn = self.get_conn()?;
        let rows = conn.execute(
            r#"
            UPDATE seller
            SET Name = ?1, Email = ?2, BirthDate = ?3, BaseSalary = ?4, DepartmentId = ?5
            WHERE Id = ?6
            "#,
            params![
                seller.name,
                seller.email,
                seller.birth_date,
                seller.base_salary,
                department_id,
                id,
            ],
        )?;

        if rows == 0 {
            tracing::warn!(id, "seller 更新未影响任何记录");
            return Err(RepositoryError::no_rows_affected(ENTITY, id));
        }

        tracing::info!(id, rows, "seller 更新完成");
        Ok(())
    }

    fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM seller WHERE Id = ?1", params![id])?;

        if rows == 0 {
            tracing::warn!(id, "seller 删除未影响任何记录");
            return Err(RepositoryError::no_rows_affected(ENTITY, id));
        }

        tracing::info!(id, "seller 删除完成");
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Seller>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {}
            FROM seller
            INNER JOIN department ON seller.DepartmentId = department.Id
            WHERE seller.Id = ?1
            "#,
            SELLER_WITH_DEPARTMENT_COLUMNS
        ))?;

        // 单行查询同样走映射缓存，保持与列表查询一致的构造路径
        let mut cache = DepartmentCache::new();
        let seller = stmt
            .query_row(params![id], |row| map_seller_row(row, &mut cache))
            .optional()?;

        tracing::debug!(id, found = seller.is_some(), "seller find_by_id");
        Ok(seller)
    }

    fn find_all(&self) -> RepositoryResult<Vec<Seller>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {}
            FROM seller
            INNER JOIN department ON seller.DepartmentId = department.Id
            ORDER BY seller.Id
            "#,
            SELLER_WITH_DEPARTMENT_COLUMNS
        ))?;

        let mut rows = stmt.query([])?;
        let mut cache = DepartmentCache::new();
        let sellers = map_seller_rows(&mut rows, &mut cache)?;

        tracing::debug!(
            count = sellers.len(),
            departments = cache.len(),
            "seller find_all"
        );
        Ok(sellers)
    }

    fn find_by_department(&self, department: &Department) -> RepositoryResult<Vec<Seller>> {
        let Some(department_id) = department.id else {
            tracing::debug!("find_by_department: 部门未持久化，返回空列表");
            return Ok(Vec::new());
        };

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {}
            FROM seller
            INNER JOIN department ON seller.DepartmentId = department.Id
            WHERE seller.DepartmentId = ?1
            ORDER BY seller.Name, seller.Id
            "#,
            SELLER_WITH_DEPARTMENT_COLUMNS
        ))?;

        let mut rows = stmt.query(params![department_id])?;
        let mut cache = DepartmentCache::new();
        let sellers = map_seller_rows(&mut rows, &mut cache)?;

        tracing::debug!(department_id, count = sellers.len(), "seller find_by_department");
        Ok(sellers)
    }
}
