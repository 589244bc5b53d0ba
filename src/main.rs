use std::{ffi::OsStr, fs, io, path::{Path, PathBuf}, process};

use clap::{Parser, ValueEnum};
use sprig::{
    interpreter::{environment::Environment, evaluator::Evaluator, lexer::Lexer, parser},
    repl,
};

/// File extension accepted by the script runner.
const SOURCE_EXTENSION: &str = "sp";

/// Sprig is a small, dynamically typed scripting language with first-class
/// functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a `.sp` script. Starts an interactive REPL when omitted.
    script: Option<PathBuf>,

    /// Selects the interpreter back-end.
    #[arg(long, value_enum, default_value = "treewalk")]
    mode: Mode,
}

/// The available interpreter back-ends.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// The tree-walking interpreter.
    Treewalk,
    /// A bytecode virtual machine. Not built into this binary.
    Vm,
}

fn main() {
    let args = Args::parse();

    if args.mode == Mode::Vm {
        eprintln!("error: the 'vm' back-end is not built into this binary (use --mode=treewalk)");
        process::exit(1);
    }

    match args.script {
        Some(path) => run_file(&path),
        None => start_repl(),
    }
}

/// Greets the user and hands control to the line loop on standard input.
fn start_repl() {
    println!("This is the Sprig programming language!");
    println!("Feel free to type in commands");

    let stdin = io::stdin();
    let stdout = io::stdout();

    if let Err(error) = repl::start(&mut stdin.lock(), &mut stdout.lock()) {
        eprintln!("{error}");
        process::exit(1);
    }
}

/// Loads and runs a script file.
///
/// Only the `.sp` extension is accepted. Parser diagnostics print in the
/// `parser errors:` block format; a runtime failure prints as
/// `ERROR: <message>`. All failures exit non-zero.
fn run_file(path: &Path) {
    let extension = path.extension().and_then(OsStr::to_str).unwrap_or_default();
    if extension != SOURCE_EXTENSION {
        eprintln!("error: invalid file extension '.{extension}' (expected .sp)");
        process::exit(1);
    }

    let source = fs::read_to_string(path).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  path.display());
        process::exit(1);
    });

    let mut parser = parser::Parser::new(Lexer::new(&source));
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        eprintln!("parser errors:");
        for error in parser.errors() {
            eprintln!("\t{error}");
        }
        process::exit(1);
    }

    let env = Environment::new().into_ref();
    let mut stdout = io::stdout();

    if let Err(error) = Evaluator::new(&mut stdout).eval_program(&program, &env) {
        eprintln!("ERROR: {error}");
        process::exit(1);
    }
}
