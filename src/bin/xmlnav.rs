//! Command-line front end: parse markup files, print them back, dump their
//! structure, or run a path query against them.

use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, Level};

use xmlnav::parser::ParseOptions;
use xmlnav::serial::debug::format_debug_tree;
use xmlnav::serial::{serialize_with_options, QuoteStyle, SerializeOptions};
use xmlnav::xpath;
use xmlnav::Document;

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// xmlnav -- parse, print, and query XML-like files.
#[derive(Parser, Debug)]
#[command(name = "xmlnav", version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Files to process (use `-` for stdin).
    #[arg(required = true)]
    files: Vec<String>,

    /// Log parse and query progress to stderr.
    #[arg(long)]
    verbose: bool,

    // -- Parsing options ---------------------------------------------------
    /// Drop whitespace-only text between tags.
    #[arg(long)]
    trim_whitespace: bool,

    // -- Path query --------------------------------------------------------
    /// Evaluate a path (e.g. `//Option`) from the document node and print
    /// each match.
    #[arg(long, value_name = "EXPR")]
    xpath: Option<String>,

    // -- Output options ----------------------------------------------------
    /// Pretty-print (indent) the output.
    #[arg(long)]
    format: bool,

    /// Quote attribute values with `'` instead of `"`.
    #[arg(long)]
    single_quotes: bool,

    /// Do not output the result tree.
    #[arg(long)]
    noout: bool,

    /// Print a debug representation of the document tree.
    #[arg(long)]
    debug: bool,
}

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

const EXIT_SUCCESS: u8 = 0;
const EXIT_PARSE_ERROR: u8 = 1;
const EXIT_PATH_ERROR: u8 = 2;
const EXIT_IO_ERROR: u8 = 3;

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .init();

    let mut worst_exit: u8 = EXIT_SUCCESS;
    for file in &cli.files {
        let exit = process_file(&cli, file);
        if exit > worst_exit {
            worst_exit = exit;
        }
    }

    ExitCode::from(worst_exit)
}

/// Processes a single input file and returns an exit code.
fn process_file(cli: &Cli, filename: &str) -> u8 {
    let input = match read_input(filename) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("{filename}: failed to read: {e}");
            return EXIT_IO_ERROR;
        }
    };

    let parse_options = ParseOptions::default().trim_whitespace(cli.trim_whitespace);
    let doc = match Document::parse_str_with_options(&input, &parse_options) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{filename}: {e}");
            return EXIT_PARSE_ERROR;
        }
    };
    debug!(file = filename, nodes = doc.node_count(), "parsed");

    let serialize_options = SerializeOptions::default()
        .indent(cli.format)
        .quote(if cli.single_quotes {
            QuoteStyle::Single
        } else {
            QuoteStyle::Double
        });

    let mut output = String::new();

    if cli.debug {
        output.push_str(&format_debug_tree(&doc));
    }

    if let Some(ref expr) = cli.xpath {
        match xpath::render_with_options(&doc, doc.root(), expr, &serialize_options) {
            Ok(rendered) => output.push_str(&rendered),
            Err(e) => {
                eprintln!("{filename}: {e}");
                return EXIT_PATH_ERROR;
            }
        }
    } else if !cli.noout && !cli.debug {
        output.push_str(&serialize_with_options(&doc, &serialize_options));
        if !output.ends_with('\n') {
            output.push('\n');
        }
    }

    match write_output(&output) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("{filename}: failed to write output: {e}");
            EXIT_IO_ERROR
        }
    }
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

/// Reads input from a file or stdin (when filename is `-`).
fn read_input(filename: &str) -> io::Result<String> {
    if filename == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(filename)
    }
}

fn write_output(output: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()
}
