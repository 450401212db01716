use std::fs::File;
use std::io::{self, Read, Write};
use std::process::exit;
use std::time::Duration;

use docopt::Docopt;
use failure::Fallible;
use serde::Deserialize;

use covgen::{run, EngineConfig};
use covgen_ir::{FormModel, Question};

const USAGE: &str = "
covgen: synthesize a minimal coverage-complete test plan for a conditional form.

Usage:
  covgen --form=PATH [--deadline-ms=N] [--verbose]
  covgen (-h | --help)

Options:
  --help            Show this screen.
  --form=PATH       Path to a JSON form document.
  --deadline-ms=N   Per-form solver time budget, in milliseconds.
  --verbose         Emit tracing output (phase entry/exit, warnings) to stderr.
";

#[derive(Debug, Deserialize)]
struct Args {
    flag_form: String,
    flag_deadline_ms: Option<u64>,
    flag_verbose: bool,
}

/// The on-disk shape of a form: a bare array of questions, or an object
/// wrapping one under `questions`. Parsing and validating this document is
/// the JSON-ingestion collaborator's job everywhere except here, where we
/// need just enough structure to hand `FormModel::new` its input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FormDocument {
    Bare(Vec<Question>),
    Wrapped { questions: Vec<Question> },
}

impl FormDocument {
    fn into_questions(self) -> Vec<Question> {
        match self {
            FormDocument::Bare(questions) => questions,
            FormDocument::Wrapped { questions } => questions,
        }
    }
}

fn load_form(path: &str) -> Fallible<FormModel> {
    let mut text = String::new();
    File::open(path)?.read_to_string(&mut text)?;
    let document: FormDocument = serde_json::from_str(&text)?;
    Ok(FormModel::new(document.into_questions())?)
}

fn run_cli(args: &Args) -> Fallible<()> {
    let form = load_form(&args.flag_form)?;

    let config = match args.flag_deadline_ms {
        Some(ms) => EngineConfig::with_deadline(Duration::from_millis(ms)),
        None => EngineConfig::default(),
    };

    let plan = run(&form, &config)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer_pretty(&mut handle, &plan)?;
    writeln!(handle)?;

    Ok(())
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if args.flag_verbose {
        tracing_subscriber::fmt::init();
    }

    if let Err(e) = run_cli(&args) {
        eprintln!("error: {}", e);
        exit(1);
    }
}
