mod convert;
mod debug;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use crate::convert::run_convert_command;
use crate::debug::run_debug_command;
use stringsheet_cli::{
    load_input,
    stats::print_stats,
    validation::{validate_input_path, validate_separator},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a resource folder into a table file, or back with --reverse.
    Convert {
        /// The `res` folder holding values*/strings.xml
        res_folder: String,
        /// The table file
        table_file: String,
        /// Column separator, a single ASCII character (default: tab)
        #[arg(short, long)]
        separator: Option<String>,
        /// Write the resource folder from the table file
        #[arg(short, long)]
        reverse: bool,
    },

    /// Print the loaded table as JSON.
    Debug {
        /// A resource folder or a table file
        input: String,
        /// Column separator of a table file input
        #[arg(short, long)]
        separator: Option<String>,
        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show translation coverage per language.
    Stats {
        /// A resource folder or a table file
        input: String,
        /// Column separator of a table file input
        #[arg(short, long)]
        separator: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(commands: Commands) -> Result<(), String> {
    match commands {
        Commands::Convert {
            res_folder,
            table_file,
            separator,
            reverse,
        } => {
            let options = validate_separator(separator.as_deref())?;
            run_convert_command(res_folder, table_file, options, reverse)
        }
        Commands::Debug {
            input,
            separator,
            output,
        } => {
            validate_input_path(&input)?;
            let options = validate_separator(separator.as_deref())?;
            run_debug_command(input, options, output)
        }
        Commands::Stats {
            input,
            separator,
            json,
        } => {
            validate_input_path(&input)?;
            let options = validate_separator(separator.as_deref())?;
            let codec = load_input(&input, options).map_err(|e| e.to_string())?;
            print_stats(&codec.table, json);
            Ok(())
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args.commands) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
