use clap::{Parser, Subcommand};
use royalbit_nomina::cli;
use royalbit_nomina::error::NominaResult;
use royalbit_nomina::roster::TEMPLATE_FILE_NAME;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nomina")]
#[command(about = "Student roster (nómina) importer for clinical rotation requests.")]
#[command(long_about = "Nómina - student roster importer for clinical rotation requests
Excel roster → validated students | RUT check digits | Template generation

COMMANDS:
  import    - Parse a roster spreadsheet (.xls/.xlsx)
  template  - Write the blank roster template
  rut       - Normalize and validate RUTs

EXAMPLES:
  nomina import nomina.xlsx                     # Summary of valid students
  nomina import nomina.xlsx -o estudiantes.json # Save parsed students
  nomina template                               # plantilla_nomina_estudiantes.xlsx
  nomina rut 12.345.678-5 10000013-K")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Parse a roster spreadsheet.

Reads the first sheet of an Excel file laid out in the 27-column roster
format (A: N° through AA: Observaciones). A header row is detected when
column B of the first row contains \"apellido\".

Rows with neither last name nor first name are ignored. Rows missing the
last name, first name or RUT are skipped and reported.

OUTPUT:
  Without --output a summary is printed.
  With --output the students are written as JSON, or YAML for .yaml/.yml.

Use --strict-rut to also skip rows whose RUT check digit is wrong.")]
    /// Parse a roster spreadsheet (.xls/.xlsx)
    Import {
        /// Path to the roster spreadsheet
        input: PathBuf,

        /// Write parsed students to this file (.json, .yaml)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip rows whose RUT has an invalid check digit
        #[arg(long)]
        strict_rut: bool,

        /// List every student and show progress
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the blank roster template (.xlsx)
    Template {
        /// Output path
        #[arg(default_value = TEMPLATE_FILE_NAME)]
        output: PathBuf,
    },

    /// Normalize and validate one or more RUTs
    Rut {
        /// RUTs, with or without dots and hyphen
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

fn main() -> NominaResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "royalbit_nomina=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import {
            input,
            output,
            strict_rut,
            verbose,
        } => cli::import(input, output, strict_rut, verbose),

        Commands::Template { output } => cli::template(output),

        Commands::Rut { ids } => cli::rut(ids),
    }
}
