use std::{path::PathBuf, process};

use clap::Parser;
use log::{LevelFilter, debug};
use marmoset::{
    Session,
    error::{InterpreterError, ParseError},
    interpreter::object::Object,
};
use rustyline::{DefaultEditor, error::ReadlineError};

const PROMPT: &str = ">> ";

/// marmoset runs programs written in a small dynamically typed language with
/// closures, hashes, loops and macros.
///
/// Without arguments, an interactive prompt is started.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Runs the program stored in this file.
    #[arg(short, long, value_name = "PATH", conflicts_with = "source")]
    file: Option<PathBuf>,

    /// Logs each stage of the interpreter to standard error.
    #[arg(short, long)]
    verbose: bool,

    /// Runs this source text instead of a file.
    source: Option<String>,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new().filter_level(level)
                              .parse_default_env()
                              .init();

    let session = Session::new();
    let outcome = match (&args.file, &args.source) {
        (Some(path), _) => session.run_file(path),
        (None, Some(source)) => session.run(source),
        (None, None) => {
            repl(&session);
            return;
        },
    };

    if !report(&outcome) {
        process::exit(1);
    }
}

/// Prints the outcome of a whole-program run. Returns `false` on failure.
fn report(outcome: &Result<Option<Object>, InterpreterError>) -> bool {
    match outcome {
        Ok(Some(Object::Null) | None) => true,
        Ok(Some(value)) => {
            println!("{}", value.inspect());
            true
        },
        Err(InterpreterError::Parse(errors)) => {
            print_parse_errors(errors);
            false
        },
        Err(error) => {
            eprintln!("{error}");
            false
        },
    }
}

fn print_parse_errors(errors: &[ParseError]) {
    eprintln!("parser errors:");
    for error in errors {
        eprintln!("\tLine {}: {}", error.line, error.message);
    }
}

/// Reads lines until end of input or interrupt, running each one in
/// `session`.
fn repl(session: &Session) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(error) => {
            eprintln!("Could not start the prompt: {error}");
            process::exit(1);
        },
    };

    println!("marmoset {}", env!("CARGO_PKG_VERSION"));
    println!("Press Ctrl+D or Ctrl+C to exit.");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                match session.run(&line) {
                    Ok(Some(value)) => println!("{}", value.inspect()),
                    Ok(None) => {},
                    Err(InterpreterError::Parse(errors)) => print_parse_errors(&errors),
                    Err(InterpreterError::Runtime(error)) => println!("ERROR: {}", error.message()),
                    Err(error) => eprintln!("{error}"),
                }
            },
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                debug!("leaving the prompt");
                break;
            },
            Err(error) => {
                eprintln!("Error: {error}");
                break;
            },
        }
    }
}
