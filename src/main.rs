// ==========================================
// 销售数据访问层 - 手工演示入口
// ==========================================
// 用法:
//   sales-dao seller [db_url]
//   sales-dao department [db_url]
//   sales-dao --config <file.json> <seller|department>
//
// 逐个调用 DAO 方法并打印结果；删除演示从标准输入读取 id。
// ==========================================

use anyhow::{bail, Context};
use chrono::NaiveDate;
use sales_dao::{
    logging, ConnectionProvider, DaoFactory, DbConfig, Department, DepartmentRepository, Seller,
    SellerRepository,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

enum Demo {
    Seller,
    Department,
}

/// 设置后以 JSON 行格式输出日志
const LOG_JSON_ENV: &str = "SALES_DAO_LOG_JSON";

fn main() -> anyhow::Result<()> {
    if std::env::var_os(LOG_JSON_ENV).is_some() {
        logging::init_json();
    } else {
        logging::init();
    }

    let (demo, config) = parse_args(std::env::args().skip(1).collect())?;
    tracing::info!("sales-dao {} - 使用数据库: {}", sales_dao::VERSION, config.db_url);

    let mut provider = ConnectionProvider::open(&config)?;
    provider.apply_schema()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();

    match demo {
        Demo::Seller => {
            let dao = DaoFactory::create_seller_dao(&provider)?;
            run_seller_demo(dao.as_ref(), &mut input)?;
        }
        Demo::Department => {
            let dao = DaoFactory::create_department_dao(&provider)?;
            run_department_demo(dao.as_ref(), &mut input)?;
        }
    }

    provider.close_connection();
    Ok(())
}

fn parse_args(args: Vec<String>) -> anyhow::Result<(Demo, DbConfig)> {
    let mut config_path: Option<PathBuf> = None;
    let mut positional = Vec::new();

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().context("--config 需要一个文件路径")?;
            config_path = Some(PathBuf::from(path));
        } else {
            positional.push(arg);
        }
    }

    let demo = match positional.first().map(String::as_str) {
        Some("seller") | None => Demo::Seller,
        Some("department") => Demo::Department,
        Some(other) => bail!("未知的演示: {} (可选: seller | department)", other),
    };

    let config = match positional.get(1) {
        Some(url) => DbConfig::with_url(url.clone()),
        None => DbConfig::load(config_path.as_deref())?,
    };

    Ok((demo, config))
}

fn prompt_id(input: &mut impl BufRead, prompt: &str) -> anyhow::Result<i64> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    line.trim()
        .parse::<i64>()
        .with_context(|| format!("无效的 id: {:?}", line.trim()))
}

fn run_seller_demo(dao: &dyn SellerRepository, input: &mut impl BufRead) -> anyhow::Result<()> {
    println!("\n________Test 1: seller findById________");
    match dao.find_by_id(3)? {
        Some(seller) => println!("{}", seller),
        None => println!("seller 3 不存在"),
    }

    println!("\n________Test 2: seller findByDepartment________");
    let department = Department::with_id(2, "");
    for seller in dao.find_by_department(&department)? {
        println!("{}", seller);
    }

    println!("\n________Test 3: seller findAll________");
    let all = dao.find_all()?;
    for seller in &all {
        println!("{}", seller);
    }

    println!("\n________Test 4: seller insert________");
    match all.first() {
        Some(existing) => {
            let mut greg = Seller::new(
                "Greg",
                "greg@gmail.com",
                NaiveDate::from_ymd_opt(1985, 6, 15).context("无效日期")?,
                4000.0,
                Arc::clone(&existing.department),
            );
            let id = dao.insert(&mut greg)?;
            println!("Inserted! New id = {}", id);
        }
        None => println!("没有可引用的部门，跳过插入（先运行 seed_sales_db）"),
    }

    println!("\n________Test 5: seller update________");
    match dao.find_by_id(1)? {
        Some(mut seller) => {
            seller.name = "Martha Waine".to_string();
            dao.update(&seller)?;
            println!("Update completed");
        }
        None => println!("seller 1 不存在，跳过更新"),
    }

    println!("\n________Test 6: seller delete________");
    let id = prompt_id(input, "Enter id for delete test: ")?;
    dao.delete_by_id(id)?;
    println!("Delete completed");

    Ok(())
}

fn run_department_demo(
    dao: &dyn DepartmentRepository,
    input: &mut impl BufRead,
) -> anyhow::Result<()> {
    println!("\n________Test 1: department findById________");
    match dao.find_by_id(2)? {
        Some(department) => println!("{}", department),
        None => println!("department 2 不存在"),
    }

    println!("\n________Test 2: department insert________");
    let mut food = Department::new("Food");
    let id = dao.insert(&mut food)?;
    println!("Inserted! New id = {}", id);

    println!("\n________Test 3: department update________");
    match dao.find_by_id(1)? {
        Some(mut department) => {
            department.name = "Computer".to_string();
            dao.update(&department)?;
            println!("Update completed");
        }
        None => println!("department 1 不存在，跳过更新"),
    }

    println!("\n________Test 4: department delete________");
    let id = prompt_id(input, "Enter id for delete test: ")?;
    dao.delete_by_id(id)?;
    println!("Delete completed");

    println!("\n________Test 5: department findAll________");
    for department in dao.find_all()? {
        println!("{}", department);
    }

    Ok(())
}
