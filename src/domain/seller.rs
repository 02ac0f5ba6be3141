// ==========================================
// 销售数据访问层 - 销售员领域模型
// ==========================================
// 对齐: schema.sql seller 表
// 关系: 多个 Seller 引用同一个 Department (多对一，无反向集合)
// ==========================================

use crate::domain::department::Department;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

// ==========================================
// Seller - 销售员
// ==========================================
// department 使用共享句柄：同一次查询结果中，相同部门只构造一次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    // ===== 主键 =====
    pub id: Option<i64>, // None 表示尚未持久化

    // ===== 基本信息 =====
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub base_salary: f64,

    // ===== 所属部门 =====
    pub department: Arc<Department>,
}

impl Seller {
    /// 创建尚未持久化的销售员
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
        base_salary: f64,
        department: Arc<Department>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            birth_date,
            base_salary,
            department,
        }
    }

    /// 是否已持久化
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// 所属部门主键（部门未持久化时为 None）
    pub fn department_id(&self) -> Option<i64> {
        self.department.id
    }
}

impl fmt::Display for Seller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .id
            .map(|v| v.to_string())
            .unwrap_or_else(|| "null".to_string());
        write!(
            f,
            "Seller [id={}, name={}, email={}, birthDate={}, baseSalary={:.2}, department={}]",
            id, self.name, self.email, self.birth_date, self.base_salary, self.department
        )
    }
}
