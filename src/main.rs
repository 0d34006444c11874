//! medicion
//!
//! Command-line front end for the RF/telecom unit converter.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use medicion::build_info;
use medicion::config::Config;
use medicion::session::Session;
use medicion::tools;
use medicion::units::Unit;

#[derive(Parser)]
#[command(name = "medicion")]
#[command(version, about = "Convert between power, rate, voltage, frequency and gain units", long_about = None)]
struct Cli {
    /// Config file (TOML); defaults to $MEDICION_CONFIG
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value between two units
    Convert {
        /// Value to convert
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Source unit (e.g. "dbm", "Watts")
        from: String,

        /// Target unit
        to: String,

        /// Maximum fractional digits in the result
        #[arg(short, long)]
        decimals: Option<usize>,

        /// Allow conversion between units of different categories
        #[arg(long)]
        allow_cross_category: bool,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the supported units
    Units {
        /// Only list units of this category (e.g. "power", "frequency")
        #[arg(short = 't', long)]
        category: Option<String>,

        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read values and commands from stdin, keeping a conversion history
    Interactive,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so results on stdout stay pipeable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("medicion=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Convert {
            value,
            from,
            to,
            decimals,
            allow_cross_category,
            json,
        } => {
            let decimals = decimals.unwrap_or(config.decimal_places);
            let strict = config.strict_categories && !allow_cross_category;
            let response = tools::convert::convert_value(value, &from, &to, decimals, strict)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", response.display);
            }
        }
        Commands::Units { category, json } => {
            let response = tools::units::list_units(category.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                for unit in &response.units {
                    println!(
                        "{:<12} {:<11} {:<12} {}",
                        unit.name, unit.label, unit.category, unit.scale
                    );
                }
            }
        }
        Commands::Interactive => {
            build_info::print_startup_banner();
            let stdin = io::stdin();
            let stdout = io::stdout();
            run_interactive(&config, stdin.lock(), stdout.lock())?;
        }
    }

    Ok(())
}

/// Line-oriented session: numbers set the input, words are commands
fn run_interactive<R: BufRead, W: Write>(
    config: &Config,
    input: R,
    mut out: W,
) -> io::Result<()> {
    let mut session = Session::new(config);
    writeln!(
        out,
        "from {} to {} (type 'help' for commands)",
        session.from_unit(),
        session.to_unit()
    )?;

    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("convert");
        let arg = words.next();

        match (command, arg) {
            ("quit", _) | ("exit", _) => break,
            ("help", _) => {
                writeln!(out, "<number>       set the input value")?;
                writeln!(out, "from <unit>    select the input unit")?;
                writeln!(out, "to <unit>      select the output unit")?;
                writeln!(out, "decimals <n>   set fractional digits")?;
                writeln!(out, "convert        convert the input (or press enter)")?;
                writeln!(out, "history        show past conversions")?;
                writeln!(out, "clear          clear input and result")?;
                writeln!(out, "quit")?;
            }
            ("from", Some(name)) | ("to", Some(name)) => match Unit::from_str(name) {
                Some(unit) => {
                    if command == "from" {
                        session.set_from(unit);
                    } else {
                        session.set_to(unit);
                    }
                    writeln!(out, "from {} to {}", session.from_unit(), session.to_unit())?;
                }
                None => writeln!(out, "Unknown unit: {}", name)?,
            },
            ("from", None) | ("to", None) | ("decimals", None) => {
                writeln!(out, "'{}' needs an argument", command)?
            }
            ("decimals", Some(n)) => match n.parse() {
                Ok(places) => session.set_decimal_places(places),
                Err(_) => writeln!(out, "Invalid number of decimals: {}", n)?,
            },
            ("history", _) => {
                for entry in session.history() {
                    writeln!(out, "{}", entry.line)?;
                }
            }
            ("clear", _) => session.clear(),
            ("convert", _) => convert_and_report(&mut session, &mut out)?,
            (value, None) => {
                session.set_input(value);
                convert_and_report(&mut session, &mut out)?;
            }
            (other, Some(_)) => writeln!(out, "Unknown command: {}", other)?,
        }
    }

    Ok(())
}

/// Convert the session input and print the result line
fn convert_and_report<W: Write>(session: &mut Session, out: &mut W) -> io::Result<()> {
    match session.convert() {
        Ok(entry) => tracing::debug!("recorded: {}", entry.line),
        // The session output line already carries the failure
        Err(e) => tracing::debug!("conversion failed: {}", e),
    }
    writeln!(out, "Result: {}", session.output())
}
