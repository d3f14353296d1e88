use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use design_patterns_lab::sql::{format_row, DatabaseHandle, Record, SqlCommand};
use design_patterns_lab::{logging, Command, CommandQueue, LabConfig, Result};

#[derive(Debug, Parser)]
#[command(name = "lab_13_q3_sql_commands", about = "Command pattern over SQLite")]
struct Cli {
    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// SQLite database file (overrides config)
    #[arg(long, value_name = "FILE")]
    db: Option<String>,

    /// Table to create and fill (overrides config)
    #[arg(long)]
    table: Option<String>,

    /// Delete 'Atik' without asking
    #[arg(long, conflicts_with = "no")]
    yes: bool,

    /// Keep 'Atik' without asking
    #[arg(long)]
    no: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => LabConfig::from_file(path)?,
        None => LabConfig::default(),
    };
    config.override_database(cli.db, cli.table)?;
    if cli.yes {
        config.demo.confirm_delete = Some(true);
    } else if cli.no {
        config.demo.confirm_delete = Some(false);
    }

    logging::init(&config.logging.level)?;

    let database = Arc::new(DatabaseHandle::open(&config.database.path)?);
    let table = config.database.table.as_str();
    let mut invoker = CommandQueue::new();

    SqlCommand::drop_table_if_exists(&database, table).execute()?;
    SqlCommand::create_table(
        &database,
        table,
        [("id", "INTEGER PRIMARY KEY"), ("name", "TEXT")],
    )
    .execute()?;

    section("Inserting users list:");
    let users_to_insert = vec![
        Record::new().with("name", "Md Maniruzzaman"),
        Record::new().with("name", "Atik"),
        Record::new().with("name", "Suman"),
    ];
    for user in &users_to_insert {
        println!("Inserted user into row: {user}");
    }
    invoker.enqueue(SqlCommand::insert(&database, table, users_to_insert));

    section("\nDisplay user list after insert:");
    invoker.enqueue(SqlCommand::select(&database, table, ""));
    invoker.run()?;

    section("\nUpdating 'Suman' to 'Suman Das'");
    let update = Record::new().with("name", "Suman Das");
    println!("Updated users name with {update} where, previous name = 'Suman'");
    invoker.enqueue(SqlCommand::update(
        &database,
        table,
        vec![update],
        "name = 'Suman'",
    ));

    section("\nDisplay user list after update:");
    invoker.enqueue(SqlCommand::select(&database, table, ""));
    invoker.run()?;

    let confirmed = match config.demo.confirm_delete {
        Some(answer) => answer,
        None => ask_yes_no(
            "\nDo you want to delete 'Atik'? (y/n): ",
            &mut io::stdin().lock(),
            &mut io::stdout(),
        )?,
    };
    if confirmed {
        invoker.enqueue(SqlCommand::delete(&database, table, "name = 'Atik'"));
        invoker.run()?;
    }

    section("\nDisplay user list after deleted user:");
    for row in database.execute(&format!("SELECT * FROM {table}"), &[])? {
        println!("{}", format_row(&row));
    }

    database.close()
}

fn section(title: &str) {
    println!("{}", title.bold());
}

/// Print `question`, read one line, and treat "y" (any case) as yes.
fn ask_yes_no<R: BufRead, W: Write>(question: &str, input: &mut R, out: &mut W) -> Result<bool> {
    write!(out, "{question}")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
