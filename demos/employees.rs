//! Employees demo
//!
//! Maps `Employee` onto the `employees` table of the configured database and
//! runs a few queries against it.
//!
//! Configuration comes from `ENTITYHAUS_CONFIG` (environment or `.env`) or
//! `./entityhaus.toml`:
//!
//! ```toml
//! [database]
//! host = "localhost"
//! port = 3306
//! database = "soft_uni_simple"
//! username = "root"
//! password = "1234"
//! ```
//!
//! Run with `cargo run --example employees`. Set `RUST_LOG=entityhaus=debug`
//! (and build with `--features debug-logging`) to see the generated statements.

use anyhow::Context;
use entityhaus::prelude::*;
use std::fmt;

#[model]
#[table(name = "employees")]
pub struct Employee {
    #[primary_key]
    pub id: i64,

    #[column(name = "first_name")]
    pub first_name: String,

    #[column(name = "last_name")]
    pub last_name: String,
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} {}", self.id, self.first_name, self.last_name)
    }
}

fn print_all(employees: &[Employee]) {
    for employee in employees {
        println!("{}", employee);
    }
    println!("==========");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("loading database configuration")?;
    let mut haus = EntityHaus::new(config.database)
        .await
        .context("connecting to MySQL")?;
    haus.health_check().await?;

    {
        let mut employees = haus.context::<Employee>().await?;
        println!("Table sync: {:?}", employees.sync_report().action);

        print_all(&employees.find_where("first_name LIKE 'P%'").await?);
        print_all(&employees.find().await?);

        match employees.find_first().await {
            Ok(first) => println!("First: {}", first),
            Err(e) if e.is_not_found() => println!("The table is empty"),
            Err(e) => return Err(e.into()),
        }
        println!("==========");

        match employees.find_first_where("first_name LIKE 'M%'").await {
            Ok(first) => println!("First M: {}", first),
            Err(e) if e.is_not_found() => println!("Nobody's name starts with M"),
            Err(e) => return Err(e.into()),
        }

        match employees.find_by_id(1).await {
            Ok(employee) => println!("By id 1: {}", employee),
            Err(e) if e.is_not_found() => println!("No employee with id 1"),
            Err(e) => return Err(e.into()),
        }

        let mut newcomer = Employee {
            first_name: "Stamatka".to_string(),
            last_name: "Peshova".to_string(),
            ..Employee::default()
        };
        employees.persist(&mut newcomer).await?;
        println!("Persisted {}", newcomer);

        let removed = employees
            .delete(Predicate::equals("id", newcomer.id))
            .await?;
        println!("Removed {} row(s)", removed);
    }

    haus.close().await?;
    Ok(())
}
