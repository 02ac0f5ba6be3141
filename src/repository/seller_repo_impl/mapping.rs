// ==========================================
// Seller 行映射（JOIN 结果 → 实体）
// ==========================================
// 同一次结果遍历内，每个部门主键只构造一次 Department，
// 其余引用该部门的 Seller 共享同一个 Arc；缓存不跨调用。
// ==========================================

use crate::domain::{Department, Seller};
use rusqlite::{Result as SqliteResult, Row, Rows};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

/// seller JOIN department 的统一列清单
pub(super) const SELLER_WITH_DEPARTMENT_COLUMNS: &str = "seller.Id, seller.Name, seller.Email, \
     seller.BirthDate, seller.BaseSalary, seller.DepartmentId, department.Name AS DepName";

/// 单次结果遍历内的部门查找表（键: 部门主键）
pub(super) type DepartmentCache = HashMap<i64, Arc<Department>>;

/// 遍历游标，逐行映射为 Seller
pub(super) fn map_seller_rows(
    rows: &mut Rows<'_>,
    cache: &mut DepartmentCache,
) -> SqliteResult<Vec<Seller>> {
    let mut sellers = Vec::new();
    while let Some(row) = rows.next()? {
        sellers.push(map_seller_row(row, cache)?);
    }
    Ok(sellers)
}

/// 映射单行：先解析（或复用）部门，再构造销售员
pub(super) fn map_seller_row(row: &Row<'_>, cache: &mut DepartmentCache) -> SqliteResult<Seller> {
    let department_id: i64 = row.get("DepartmentId")?;

    let department = match cache.entry(department_id) {
        Entry::Occupied(entry) => Arc::clone(entry.get()),
        Entry::Vacant(entry) => {
            let department = Arc::new(instantiate_department(row, department_id)?);
            Arc::clone(entry.insert(department))
        }
    };

    instantiate_seller(row, department)
}

fn instantiate_department(row: &Row<'_>, department_id: i64) -> SqliteResult<Department> {
    Ok(Department {
        id: Some(department_id),
        name: row.get("DepName")?,
    })
}

fn instantiate_seller(row: &Row<'_>, department: Arc<Department>) -> SqliteResult<Seller> {
    Ok(Seller {
        id: Some(row.get("Id")?),
        name: row.get("Name")?,
        email: row.get("Email")?,
        birth_date: row.get("BirthDate")?,
        base_salary: row.get("BaseSalary")?,
        department,
    })
}
