//! RosterDB CLI Client
//!
//! Command-line interface for interacting with RosterDB.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rosterdb::model::parse_date;
use rosterdb::network::Client;
use rosterdb::{Employee, EmployeeId, Result};
use serde::Serialize;

/// RosterDB CLI
#[derive(Parser, Debug)]
#[command(name = "rosterdb-cli")]
#[command(about = "CLI for the RosterDB employee record store")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List active employees sorted by surname
    Active,

    /// Show an employee and the names of their direct reports
    Get {
        /// Employee id
        id: EmployeeId,
    },

    /// List employees hired between two dates (MM/dd/yyyy, inclusive)
    HiredBetween {
        /// First hire date
        start: String,

        /// Last hire date
        end: String,
    },

    /// Add a new employee
    Add {
        /// Employee id
        id: EmployeeId,

        /// Full name, e.g. "Jane Doe"
        name: String,

        /// Job title
        position: String,

        /// Hire date (MM/dd/yyyy)
        hire_date: String,

        /// Comma-separated ids of direct reports
        #[arg(short, long, value_delimiter = ',')]
        reports: Vec<EmployeeId>,

        /// Create the employee as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Deactivate an employee
    Deactivate {
        /// Employee id
        id: EmployeeId,
    },

    /// Ping the server
    Ping,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let mut client = Client::connect(&args.server)?;

    match args.command {
        Commands::Active => print_json(&client.list_active()?)?,
        Commands::Get { id } => match client.get(id)? {
            Some(view) => print_json(&view)?,
            None => return Ok(not_found(id)),
        },
        Commands::HiredBetween { start, end } => {
            let (start, end) = (parse_date(&start)?, parse_date(&end)?);
            print_json(&client.hired_between(start, end)?)?;
        }
        Commands::Add {
            id,
            name,
            position,
            hire_date,
            reports,
            inactive,
        } => {
            let employee = Employee::new(id, name, position, parse_date(&hire_date)?)
                .with_direct_reports(reports)
                .with_active(!inactive);
            print_json(&client.insert(employee)?)?;
        }
        Commands::Deactivate { id } => match client.deactivate(id)? {
            Some(updated) => print_json(&updated)?,
            None => return Ok(not_found(id)),
        },
        Commands::Ping => {
            client.ping()?;
            println!("PONG");
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn not_found(id: EmployeeId) -> ExitCode {
    eprintln!("employee {} not found", id);
    ExitCode::from(2)
}
