use std::io;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use design_patterns_lab::template::{process_order, OrderKind};
use design_patterns_lab::LabError;

#[derive(Debug, Parser)]
#[command(name = "lab_13_q4_order_template", about = "Template Method: restaurant orders")]
struct Cli {
    /// Order types to process: dine-in, take-out
    #[arg(value_name = "ORDER_TYPE", default_values = ["dine-in", "take-out"])]
    orders: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut status = ExitCode::SUCCESS;

    for order in &cli.orders {
        let kind = match order.parse::<OrderKind>() {
            Ok(kind) => kind,
            Err(LabError::UnknownOrderType(_)) => {
                println!("Unknown order type.");
                status = ExitCode::FAILURE;
                continue;
            }
            Err(err) => {
                eprintln!("{}", err.to_string().red());
                return ExitCode::FAILURE;
            }
        };

        let title = format!("Processing a {kind} Order:");
        println!("\n{}\n{}", title.bold(), "-".repeat(title.len()));
        if let Err(err) = process_order(kind, &mut io::stdout()) {
            eprintln!("{}", err.to_string().red());
            return ExitCode::FAILURE;
        }
    }

    status
}
