mod commands;
mod config;
mod error;
mod grammar;
mod info;
mod locator;
mod python;
mod renderer;
mod resolver;
mod selection;
mod structural;
mod tokenizer;
mod types;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "copyref", about = "Reference labels for code selections")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve `path:line label` references for a selection in a file
    Label {
        /// Source file to resolve against
        file: String,
        /// Selection as `line:col` or `line:col-line:col` (1-based)
        #[arg(long)]
        select: Option<String>,
        /// Emit entries as pretty-printed JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-indent an HTML document (or a selected range of one)
    Fmt {
        /// HTML file to format
        file: String,
        /// Only re-render this range, splicing it back into the document
        #[arg(long)]
        select: Option<String>,
        /// Write the result back to the file instead of stdout
        #[arg(long)]
        write: bool,
    },
    /// Show the reference document for this tool
    Info {
        /// Emit the document as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Label { file, select, json } => commands::label(&file, select.as_deref(), json),
        Commands::Fmt { file, select, write } => commands::fmt(&file, select.as_deref(), write),
        Commands::Info { json } => {
            info::run(json);
            Ok(())
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}
