//! CLI entry point for the employee roster.
//!
//! # Responsibility
//! - Wire `roster_core` service, repository and storage for manual use.
//! - Print results as JSON on stdout and failures on stderr.

mod cli;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use cli::{Cli, Command, EmployeeFields};
use log::debug;
use roster_core::db::open_db;
use roster_core::{
    default_log_level, init_logging, Employee, EmployeeService, EmployeeServiceError,
    SqliteEmployeeRepository,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    if let Command::Ping = cli.command {
        println!("roster_core ping={}", roster_core::ping());
        println!("roster_core version={}", roster_core::core_version());
        return Ok(ExitCode::SUCCESS);
    }

    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database `{}`", cli.db.display()))?;
    let repo = SqliteEmployeeRepository::try_new(&conn)?;
    let service = EmployeeService::new(repo);
    debug!("event=cli_command module=cli status=start");

    match cli.command {
        Command::Ping => {}
        Command::Create(fields) => {
            let employee = fields.into_employee()?;
            let saved = service.save_employee(&employee).map_err(describe)?;
            print_json(&saved)?;
        }
        Command::List => {
            print_json(&service.get_all_employees()?)?;
        }
        Command::Get { id } => match service.get_employee_by_id(id)? {
            Some(employee) => print_json(&employee)?,
            None => {
                eprintln!("employee {id} not found");
                return Ok(ExitCode::FAILURE);
            }
        },
        Command::Update { id, fields } => {
            let employee = fields.into_employee()?.with_id(id)?;
            let updated = service.update_employee(&employee).map_err(describe)?;
            print_json(&updated)?;
        }
        Command::Delete { id } => {
            service.delete_employee(id)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

impl EmployeeFields {
    fn into_employee(self) -> Result<Employee> {
        Employee::new(self.first_name, self.last_name, self.email).context("invalid employee")
    }
}

fn describe(err: EmployeeServiceError) -> anyhow::Error {
    match err {
        EmployeeServiceError::Conflict { .. } => anyhow!("conflict: {err}"),
        other => anyhow::Error::new(other),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
