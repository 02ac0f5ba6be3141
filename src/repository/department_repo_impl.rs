// ==========================================
// 销售数据访问层 - 部门 Repository 实现
// ==========================================
// 职责: 使用 rusqlite 实现 DepartmentRepository
// 约束: 所有语句参数化；语句/游标随作用域释放（含错误路径）
// ==========================================

use crate::domain::Department;
use crate::repository::department_repo::DepartmentRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex, MutexGuard};


const ENTITY: &str = "department";

// ==========================================
// DepartmentRepositoryImpl
// ==========================================
pub struct DepartmentRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl DepartmentRepositoryImpl {
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

impl DepartmentRepository for DepartmentRepositoryImpl {
    fn insert(&self, department: &mut Department) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        // RETURNING: 插入与取回自增主键在同一次执行中完成
        let id: Option<i64> = conn
            .query_row(
                r#"
                INSERT INTO department (Name)
                VALUES (?1)
                RETURNING Id
                "#,
                params![department.name],
                |row| row.get(0),
            )
            .optional()?;

        let id = id.ok_or_else(|| {
            RepositoryError::DatabaseQueryError("插入 department 未影响任何记录".to_string())
        })?;

        department.id = Some(id);
        tracing::info!(id, name = %department.name, "department 插入完成");
        Ok(id)
    }

    fn update(&self, department: &Department) -> RepositoryResult<()> {
        let id = department
            .id
            .ok_or_else(|| RepositoryError::missing_id(ENTITY, "update"))?;

        let conn = self.get_conn()?;
        let rows = conn.execute(
            r#"
            UPDATE department
            SET Name = ?1
            WHERE Id = ?2
            "#,
            params![department.name, id],
        )?;

        if rows == 0 {
            tracing::warn!(id, "department 更新未影响任何记录");
            return Err(RepositoryError::no_rows_affected(ENTITY, id));
        }

        tracing::info!(id, rows, "department 更新完成");
        Ok(())
    }

    fn delete_by_id(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let rows = conn.execute("DELETE FROM department WHERE Id = ?1", params![id])?;

        if rows == 0 {
            tracing::warn!(id, "department 删除未影响任何记录");
            return Err(RepositoryError::no_rows_affected(ENTITY, id));
        }

        tracing::info!(id, "department 删除完成");
        Ok(())
    }

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Department>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT Id, Name
            FROM department
            WHERE Id = ?1
            "#,
        )?;

        let department = stmt.query_row(params![id], map_department).optional()?;
        tracing::debug!(id, found = department.is_some(), "department find_by_id");
        Ok(department)
    }

    fn find_all(&self) -> RepositoryResult<Vec<Department>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT Id, Name
            FROM department
            ORDER BY Id
            "#,
        )?;

        let departments = stmt
            .query_map([], map_department)?
            .collect::<SqliteResult<Vec<_>>>()?;

        tracing::debug!(count = departments.len(), "department find_all");
        Ok(departments)
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// department 行 → Department
fn map_department(row: &Row<'_>) -> SqliteResult<Department> {
    Ok(Department {
        id: Some(row.get("Id")?),
        name: row.get("Name")?,
    })
}
