//! Shared output formatting for data commands.

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::{FormatArgs, OutputFormat};

pub fn resolve_format(args: &FormatArgs) -> OutputFormat {
    if args.json {
        OutputFormat::Json
    } else if args.quiet {
        OutputFormat::Quiet
    } else {
        args.output
    }
}

/// Print any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print rows as a rounded table, or `empty` when there are none.
pub fn print_table<T: Tabled>(rows: &[T], empty: &str) {
    if rows.is_empty() {
        println!("{empty}");
        return;
    }
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}
