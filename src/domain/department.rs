// ==========================================
// 销售数据访问层 - 部门领域模型
// ==========================================
// 对齐: schema.sql department 表
// 红线: 纯数据载体，不含数据访问逻辑
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Department - 部门
// ==========================================
// id: None 表示尚未持久化，插入成功后由数据库分配并回写
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Department {
    pub id: Option<i64>, // 主键 (自增)
    pub name: String,    // 部门名称
}

impl Department {
    /// 创建尚未持久化的部门
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// 以已知主键构造部门（用于引用已存在的记录）
    pub fn with_id(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// 是否已持久化
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Department [id={}, name={}]", id, self.name),
            None => write!(f, "Department [id=null, name={}]", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transient() {
        let dep = Department::new("Food");
        assert_eq!(dep.id, None);
        assert!(!dep.is_persisted());
        assert_eq!(dep.to_string(), "Department [id=null, name=Food]");
    }

    #[test]
    fn test_with_id_is_persisted() {
        let dep = Department::with_id(3, "Fashion");
        assert!(dep.is_persisted());
        assert_eq!(dep.to_string(), "Department [id=3, name=Fashion]");
    }
}
