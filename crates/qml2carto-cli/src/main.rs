use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use qml2carto::{document_name, translate_input, Diagnostic, Input, Options, SymbolLookup};

#[derive(Debug, Parser)]
#[command(
    name = "qml2carto",
    version,
    about = "Translate a QGIS .qml layer style into CartoCSS"
)]
struct Args {
    /// Style file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Outer selector name (defaults to the input file stem)
    #[arg(short, long)]
    name: Option<String>,
    /// Fail when a category's symbol name matches several symbols
    #[arg(long)]
    strict_symbols: bool,
    /// Write diagnostics into the stylesheet as comments
    #[arg(long)]
    annotate: bool,
    /// Emit the stylesheet and diagnostics as JSON
    #[arg(long)]
    json: bool,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Report<'a> {
    name: &'a str,
    stylesheet: String,
    diagnostics: &'a [Diagnostic],
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: Args) -> Result<()> {
    let name = match (&args.name, &args.input) {
        (Some(name), _) => name.clone(),
        (None, Some(path)) => document_name(path)
            .with_context(|| format!("cannot derive a stylesheet name from {}", path.display()))?
            .to_string(),
        (None, None) => bail!("reading from stdin requires --name"),
    };

    let source = read_input(&args.input)?;
    match &args.input {
        Some(path) => info!("processing file: {}", path.display()),
        None => info!("processing stdin"),
    }

    let options = Options {
        symbol_lookup: if args.strict_symbols {
            SymbolLookup::Strict
        } else {
            SymbolLookup::FirstMatch
        },
        annotate: args.annotate,
        ..Options::default()
    };

    let translation = translate_input(Input::from_bytes(&source).with_name(&name), &options)
        .with_context(|| match &args.input {
            Some(path) => format!("failed to translate {}", path.display()),
            None => "failed to translate stdin".to_string(),
        })?;

    if !translation.diagnostics.is_empty() {
        warn!(
            "{} diagnostic(s) for {name}; review lines marked XXX",
            translation.diagnostics.len()
        );
    }

    let output = if args.json {
        let report = Report {
            name: &name,
            stylesheet: translation.text(),
            diagnostics: &translation.diagnostics,
        };
        let mut json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        json.push('\n');
        json
    } else {
        translation.text()
    };

    write_output(&args.output, output.as_bytes())
}

fn read_input(path: &Option<PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.iter().all(u8::is_ascii_whitespace) {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
