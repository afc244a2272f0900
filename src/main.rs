//! evjson CLI.
//!
//! Thin front end over the library: supplies a byte cursor and sink,
//! runs one pipeline and maps the outcome to an exit status.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use evjson::conformance::{ConformanceError, CorpusRunner, TestResult};
use evjson::{
    Document, ErrorCode, FileReadStream, FileWriteStream, Handler, Limits, Reader,
    StringWriteStream, Writer,
};

#[derive(Parser)]
#[command(name = "evjson")]
#[command(about = "Event-driven JSON codec", long_about = None)]
#[command(version)]
struct Cli {
    /// Maximum nesting depth of arrays and objects.
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<usize>,

    /// Do not bound nesting depth.
    #[arg(long, global = true, conflicts_with = "max_depth")]
    unbounded: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse into a tree and print it as compact JSON
    Format {
        /// Input file (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Validate input and report the number of parse events
    Check {
        /// Input file (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Stream parse events straight into the writer
    Echo {
        /// Input file (stdin if omitted)
        file: Option<PathBuf>,
    },

    /// Run a conformance corpus
    Corpus {
        /// Corpus JSON file
        file: PathBuf,
    },
}

impl Cli {
    fn limits(&self) -> Limits {
        match (self.unbounded, self.max_depth) {
            (true, _) => Limits::unbounded(),
            (false, Some(depth)) => Limits::with_max_depth(depth),
            (false, None) => Limits::default(),
        }
    }
}

/// Outcome of a subcommand that did not succeed.
enum Failure {
    Parse(ErrorCode),
    Io(io::Error),
    /// The corpus file was readable but not a valid corpus.
    BadCorpus(ConformanceError),
    /// Some vectors did not pass; details are already on stdout.
    CorpusFailed,
}

impl From<ErrorCode> for Failure {
    fn from(err: ErrorCode) -> Self {
        Failure::Parse(err)
    }
}

impl From<io::Error> for Failure {
    fn from(err: io::Error) -> Self {
        Failure::Io(err)
    }
}

impl From<ConformanceError> for Failure {
    fn from(err: ConformanceError) -> Self {
        match err {
            ConformanceError::Io(err) => Failure::Io(err),
            other => Failure::BadCorpus(other),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let limits = cli.limits();

    let result = match cli.command {
        Commands::Format { file } => format(file.as_deref(), limits),
        Commands::Check { file } => check(file.as_deref(), limits),
        Commands::Echo { file } => echo(file.as_deref(), limits),
        Commands::Corpus { file } => corpus(&file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Parse(err)) => {
            eprintln!("{err}");
            ExitCode::from(1)
        }
        Err(Failure::BadCorpus(err)) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
        Err(Failure::CorpusFailed) => ExitCode::from(1),
        Err(Failure::Io(err)) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn open_input(file: Option<&Path>) -> io::Result<FileReadStream> {
    match file {
        Some(path) => FileReadStream::new(File::open(path)?),
        None => FileReadStream::new(io::stdin().lock()),
    }
}

fn format(file: Option<&Path>, limits: Limits) -> Result<(), Failure> {
    let mut is = open_input(file)?;
    let mut doc = Document::new();
    doc.parse_with_limits(&mut is, limits)?;

    let stdout = io::stdout();
    let mut writer = Writer::new(FileWriteStream::new(stdout.lock()));
    doc.write_to(&mut writer);
    let mut out = writer.into_inner().finish()?;
    writeln!(out)?;
    Ok(())
}

/// Counts events without building anything.
#[derive(Default)]
struct EventCounter {
    events: usize,
}

impl EventCounter {
    fn tick(&mut self) -> bool {
        self.events += 1;
        true
    }
}

impl Handler for EventCounter {
    fn null(&mut self) -> bool {
        self.tick()
    }
    fn bool(&mut self, _: bool) -> bool {
        self.tick()
    }
    fn int32(&mut self, _: i32) -> bool {
        self.tick()
    }
    fn int64(&mut self, _: i64) -> bool {
        self.tick()
    }
    fn double(&mut self, _: f64) -> bool {
        self.tick()
    }
    fn string(&mut self, _: &str) -> bool {
        self.tick()
    }
    fn start_object(&mut self) -> bool {
        self.tick()
    }
    fn key(&mut self, _: &str) -> bool {
        self.tick()
    }
    fn end_object(&mut self) -> bool {
        self.tick()
    }
    fn start_array(&mut self) -> bool {
        self.tick()
    }
    fn end_array(&mut self) -> bool {
        self.tick()
    }
}

fn check(file: Option<&Path>, limits: Limits) -> Result<(), Failure> {
    let mut is = open_input(file)?;
    let mut counter = EventCounter::default();
    Reader::parse_with_limits(&mut is, &mut counter, limits)?;
    println!("ok: {} events", counter.events);
    Ok(())
}

fn echo(file: Option<&Path>, limits: Limits) -> Result<(), Failure> {
    let mut is = open_input(file)?;
    // Buffered so that a failed parse prints nothing on stdout.
    let mut writer = Writer::new(StringWriteStream::new());
    Reader::parse_with_limits(&mut is, &mut writer, limits)?;
    println!("{}", writer.into_inner().as_str());
    Ok(())
}

fn corpus(file: &Path) -> Result<(), Failure> {
    let runner = CorpusRunner::load(file)?;
    let results = runner.run_all();

    for (id, result) in results.failures() {
        match result {
            TestResult::Fail { expected, actual } => {
                println!("FAIL {id}: expected {expected}, actual {actual}");
            }
            TestResult::Error { message } => println!("ERROR {id}: {message}"),
            TestResult::Pass => {}
        }
    }
    println!("{}", results.summary());

    if results.all_passed() {
        Ok(())
    } else {
        Err(Failure::CorpusFailed)
    }
}
