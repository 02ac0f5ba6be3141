// Dev utility: reset a database file and seed the demo departments/sellers.
//
// Usage:
//   cargo run --bin seed_sales_db -- [db_path]
//
// `db_path` may carry a `sqlite:` / `sqlite://` prefix. An existing file is
// renamed to `<path>.bak` before the reset.

use chrono::NaiveDate;
use sales_dao::config::default_db_path;
use sales_dao::db::reset_database_file;
use sales_dao::{logging, ConnectionProvider, DaoFactory, DbConfig, Department, Seller};
use std::error::Error;
use std::sync::Arc;

const DEPARTMENTS: [&str; 4] = ["Computers", "Electronics", "Fashion", "Books"];

// (name, email, birth date, base salary, index into DEPARTMENTS)
const SELLERS: [(&str, &str, (i32, u32, u32), f64, usize); 6] = [
    ("Bob Brown", "bob@gmail.com", (1998, 4, 21), 1000.0, 0),
    ("Maria Green", "maria@gmail.com", (1979, 12, 31), 3500.0, 1),
    ("Alex Grey", "alex@gmail.com", (1988, 1, 15), 2200.0, 0),
    ("Martha Red", "martha@gmail.com", (1993, 11, 30), 3000.0, 3),
    ("Donald Blue", "donald@gmail.com", (2000, 1, 9), 4000.0, 2),
    ("Alex Pink", "bob@gmail.com", (1997, 3, 4), 3000.0, 1),
];

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let db_url = std::env::args().nth(1).unwrap_or_else(default_db_path);
    let config = DbConfig::with_url(db_url);

    if let Some(backup) = reset_database_file(&config)? {
        println!("existing database moved to {}", backup.display());
    }

    let provider = ConnectionProvider::open(&config)?;
    provider.apply_schema()?;

    let department_dao = DaoFactory::create_department_dao(&provider)?;
    let seller_dao = DaoFactory::create_seller_dao(&provider)?;

    let mut departments = Vec::with_capacity(DEPARTMENTS.len());
    for name in DEPARTMENTS {
        let mut department = Department::new(name);
        department_dao.insert(&mut department)?;
        departments.push(Arc::new(department));
    }

    for (name, email, (y, m, d), salary, dep_idx) in SELLERS {
        let birth_date = NaiveDate::from_ymd_opt(y, m, d).ok_or("invalid birth date")?;
        let mut seller = Seller::new(
            name,
            email,
            birth_date,
            salary,
            Arc::clone(&departments[dep_idx]),
        );
        seller_dao.insert(&mut seller)?;
    }

    println!(
        "seeded {}: departments={}, sellers={}",
        config.database_path(),
        department_dao.find_all()?.len(),
        seller_dao.find_all()?.len()
    );
    Ok(())
}
