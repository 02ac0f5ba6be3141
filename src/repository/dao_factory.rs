// ==========================================
// 销售数据访问层 - DAO 工厂
// ==========================================
// 职责: 将连接提供者的共享连接注入具体 DAO 实现，以 trait 对象返回
// 约束: 每次调用都返回新实例，不缓存；连接只共享不拥有
// ==========================================

use crate::db::ConnectionProvider;
use crate::repository::department_repo::DepartmentRepository;
use crate::repository::department_repo_impl::DepartmentRepositoryImpl;
use crate::repository::error::RepositoryResult;
use crate::repository::seller_repo::SellerRepository;
use crate::repository::seller_repo_impl::SellerRepositoryImpl;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub struct DaoFactory;

impl DaoFactory {
    /// 创建 SellerRepository（rusqlite 实现）
    ///
    /// # 返回
    /// - Err(DatabaseConnectionError): 连接已关闭
    pub fn create_seller_dao(
        provider: &ConnectionProvider,
    ) -> RepositoryResult<Box<dyn SellerRepository>> {
        Ok(Self::seller_dao_from_connection(provider.get_connection()?))
    }

    /// 创建 DepartmentRepository（rusqlite 实现）
    pub fn create_department_dao(
        provider: &ConnectionProvider,
    ) -> RepositoryResult<Box<dyn DepartmentRepository>> {
        Ok(Self::department_dao_from_connection(provider.get_connection()?))
    }

    /// 从已有连接创建 SellerRepository
    pub fn seller_dao_from_connection(conn: Arc<Mutex<Connection>>) -> Box<dyn SellerRepository> {
        Box::new(SellerRepositoryImpl::new(conn))
    }

    /// 从已有连接创建 DepartmentRepository
    pub fn department_dao_from_connection(
        conn: Arc<Mutex<Connection>>,
    ) -> Box<dyn DepartmentRepository> {
        Box::new(DepartmentRepositoryImpl::new(conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, Seller};
    use chrono::NaiveDate;

    #[test]
    fn test_factory_daos_share_one_connection() {
        let provider = ConnectionProvider::open_in_memory().unwrap();
        provider.apply_schema().unwrap();

        let department_dao = DaoFactory::create_department_dao(&provider).unwrap();
        let seller_dao = DaoFactory::create_seller_dao(&provider).unwrap();

        let mut dep = Department::new("Food");
        department_dao.insert(&mut dep).unwrap();

        let mut seller = Seller::new(
            "Greg",
            "greg@example.com",
            NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
            4000.0,
            Arc::new(dep),
        );
        let id = seller_dao.insert(&mut seller).unwrap();

        let found = seller_dao.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.department.name, "Food");
    }

    #[test]
    fn test_factory_after_close_is_error() {
        let mut provider = ConnectionProvider::open_in_memory().unwrap();
        provider.close_connection();

        assert!(DaoFactory::create_department_dao(&provider).is_err());
        assert!(DaoFactory::create_seller_dao(&provider).is_err());
    }
}
