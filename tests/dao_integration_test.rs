// ==========================================
// DAO 层集成测试
// ==========================================
// 测试目标: 通过 DaoFactory 获取 DAO，在文件数据库上验证 CRUD 与映射行为
// ==========================================


use chrono::NaiveDate;
use sales_dao::logging;
use sales_dao::{DaoFactory, Department, RepositoryError, Seller};
use std::sync::Arc;
use test_helpers::{create_test_db, make_test_seller};

#[test]
fn test_department_insert_then_find() {
    logging::init_test();

    let (_temp_file, provider) = create_test_db().expect("Failed to create test db");
    let dao = DaoFactory::create_department_dao(&provider).unwrap();

    let mut dep = Department::new("Food");
    assert_eq!(dep.id, None);
    dao.insert(&mut dep).unwrap();

    assert!(dep.id.is_some());
    assert_eq!(dao.find_by_id(dep.id.unwrap()).unwrap(), Some(dep));
}

#[test]
fn test_missing_ids_return_none_for_both_entities() {
    logging::init_test();

    let (_temp_file, provider) = create_test_db().expect("Failed to create test db");
    let department_dao = DaoFactory::create_department_dao(&provider).unwrap();
    let seller_dao = DaoFactory::create_seller_dao(&provider).unwrap();

    assert_eq!(department_dao.find_by_id(4242).unwrap(), None);
    assert_eq!(seller_dao.find_by_id(4242).unwrap(), None);
    assert!(department_dao.find_all().unwrap().is_empty());
    assert!(seller_dao.find_all().unwrap().is_empty());
}

#[test]
fn test_food_scenario() {
    logging::init_test();

    let (_temp_file, provider) = create_test_db().expect("Failed to create test db");
    let department_dao = DaoFactory::create_department_dao(&provider).unwrap();
    let seller_dao = DaoFactory::create_seller_dao(&provider).unwrap();

    // 先占用 1..=4，使 Food 分配到 5
    for name in ["Computers", "Electronics", "Fashion", "Books"] {
        department_dao.insert(&mut Department::new(name)).unwrap();
    }
    let mut food = Department::new("Food");
    let food_id = department_dao.insert(&mut food).unwrap();
    assert_eq!(food_id, 5);

    let mut greg = Seller::new(
        "Greg",
        "greg@example.com",
        NaiveDate::from_ymd_opt(1985, 6, 15).unwrap(),
        4000.0,
        Arc::new(Department::with_id(5, "")),
    );
    let seller_id = seller_dao.insert(&mut greg).unwrap();
    assert_eq!(greg.id, Some(seller_id));

    let found = seller_dao.find_by_id(seller_id).unwrap().unwrap();
    assert_eq!(found.department.name, "Food");
    assert_eq!(found.department.id, Some(5));
    assert_eq!(found.base_salary, 4000.0);
}

#[test]
fn test_delete_department_with_sellers_keeps_row() {
    logging::init_test();

    let (_temp_file, provider) = create_test_db().expect("Failed to create test db");
    let department_dao = DaoFactory::create_department_dao(&provider).unwrap();
    let seller_dao = DaoFactory::create_seller_dao(&provider).unwrap();

    let mut dep = Department::new("Electronics");
    let dep_id = department_dao.insert(&mut dep).unwrap();
    let dep = Arc::new(dep);
    seller_dao
        .insert(&mut make_test_seller("Maria", &dep))
        .unwrap();

    let result = department_dao.delete_by_id(dep_id);
    assert!(matches!(result, Err(RepositoryError::ForeignKeyViolation(_))));
    assert!(department_dao.find_by_id(dep_id).unwrap().is_some());
}

#[test]
fn test_find_by_department_sorted_by_name_and_unknown_is_empty() {
    logging::init_test();

    let (_temp_file, provider) = create_test_db().expect("Failed to create test db");
    let department_dao = DaoFactory::create_department_dao(&provider).unwrap();
    let seller_dao = DaoFactory::create_seller_dao(&provider).unwrap();

    let mut computers = Department::new("Computers");
    let mut fashion = Department::new("Fashion");
    department_dao.insert(&mut computers).unwrap();
    department_dao.insert(&mut fashion).unwrap();
    let computers = Arc::new(computers);
    let fashion = Arc::new(fashion);

    for (name, dep) in [
        ("Donald", &computers),
        ("Alex", &fashion),
        ("Bob", &computers),
        ("Carl", &computers),
    ] {
        seller_dao.insert(&mut make_test_seller(name, dep)).unwrap();
    }

    let sellers = seller_dao.find_by_department(&computers).unwrap();
    let names: Vec<&str> = sellers.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Bob", "Carl", "Donald"]);
    assert!(sellers.iter().all(|s| s.department.id == computers.id));

    let none = seller_dao
        .find_by_department(&Department::with_id(999, "Nowhere"))
        .unwrap();
    assert!(none.is_empty());

    let all = seller_dao.find_all().unwrap();
    assert_eq!(all.len(), 4);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_provider_reopen_sees_persisted_rows() {
    logging::init_test();

    let (temp_file, mut provider) = create_test_db().expect("Failed to create test db");
    let dao = DaoFactory::create_department_dao(&provider).unwrap();

    let mut dep = Department::new("Books");
    let id = dao.insert(&mut dep).unwrap();
    drop(dao);
    provider.close_connection();

    let path = temp_file.path().to_str().unwrap().to_string();
    let reopened = sales_dao::ConnectionProvider::open(&sales_dao::DbConfig::with_url(path)).unwrap();
    let dao = DaoFactory::create_department_dao(&reopened).unwrap();

    assert_eq!(dao.find_by_id(id).unwrap().map(|d| d.name), Some("Books".to_string()));
}

#[test]
fn test_reset_prefixed_url_starts_from_empty_db() {
    logging::init_test();

    let dir = tempfile::tempdir().unwrap();
    let config = sales_dao::DbConfig::with_url(format!(
        "sqlite:{}",
        dir.path().join("nested").join("seed.db").display()
    ));

    for round in 0..2 {
        let backup = sales_dao::db::reset_database_file(&config).unwrap();
        assert_eq!(backup.is_some(), round > 0);

        let provider = sales_dao::ConnectionProvider::open(&config).unwrap();
        provider.apply_schema().unwrap();
        let dao = DaoFactory::create_department_dao(&provider).unwrap();

        // 每轮都从空库开始，而不是叠加在上一轮数据上
        assert!(dao.find_all().unwrap().is_empty());
        for name in ["Computers", "Electronics"] {
            dao.insert(&mut Department::new(name)).unwrap();
        }
        assert_eq!(dao.find_all().unwrap().len(), 2);
    }
}
