mod options;

use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use log::{debug, error};
use options::Options;
use treko::{scan, Diagnostics};

const EXIT_DATA_ERROR: u8 = 65;
const EXIT_NO_INPUT: u8 = 66;
const EXIT_IO_ERROR: u8 = 74;

fn init_logger(opts: &Options) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(filter) = &opts.log_filter {
        builder.parse_filters(filter);
    }
    builder.init();
}

fn run(source: &str, opts: &Options, diagnostics: &mut Diagnostics) {
    let tokens = scan(source, diagnostics);
    debug!("Scanned {} tokens, {} errors", tokens.len(), diagnostics.len());

    if !opts.quiet {
        for token in &tokens {
            println!("{}", token);
        }
    }
    for diagnostic in diagnostics.entries() {
        error!("{}", diagnostic);
    }
}

fn run_file(path: &str, opts: &Options) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            error!("Failed to read file '{}': {}", path, err);
            return ExitCode::from(EXIT_NO_INPUT);
        }
    };
    debug!("Scanning file: {}", path);

    let mut diagnostics = Diagnostics::new();
    run(&source, opts, &mut diagnostics);

    if diagnostics.had_error() {
        return ExitCode::from(EXIT_DATA_ERROR);
    }
    ExitCode::SUCCESS
}

fn run_prompt(opts: &Options) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut diagnostics = Diagnostics::new();
    let mut line = String::new();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }

        run(line.trim_end_matches(|c: char| c == '\n' || c == '\r'), opts, &mut diagnostics);
        // Errors on one line do not carry over to the next
        diagnostics.clear();
    }
}

fn main() -> ExitCode {
    let opts = Options::parse();
    init_logger(&opts);

    match &opts.script {
        Some(path) => run_file(path, &opts),
        None => match run_prompt(&opts) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!("Failed to read from stdin: {}", err);
                ExitCode::from(EXIT_IO_ERROR)
            }
        },
    }
}
