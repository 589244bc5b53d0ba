use std::io::{self, BufRead, Write};

use crate::interpreter::{
    environment::Environment,
    evaluator::Evaluator,
    lexer::Lexer,
    parser::Parser,
};

/// The interactive prompt.
pub const PROMPT: &str = ">>";

/// Runs the read-evaluate-print loop until `input` is exhausted.
///
/// One environment persists across lines, so bindings and functions defined
/// earlier stay visible. Each line is parsed on its own; lines with parser
/// diagnostics print them in the `parser errors:` block format and are not
/// evaluated. Results print their textual representation on a line of their
/// own, declarations print nothing, and runtime errors print as
/// `ERROR: <message>`.
///
/// # Errors
/// Returns an error only when reading from `input` or writing to `out`
/// fails.
pub fn start(input: &mut dyn BufRead, out: &mut dyn Write) -> io::Result<()> {
    let env = Environment::new().into_ref();
    let mut line = String::new();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }

        let mut parser = Parser::new(Lexer::new(&line));
        let program = parser.parse_program();

        if !parser.errors().is_empty() {
            writeln!(out, "parser errors:")?;
            for error in parser.errors() {
                writeln!(out, "\t{error}")?;
            }
            continue;
        }

        let result = Evaluator::new(out).eval_program(&program, &env);
        match result {
            Ok(Some(value)) => writeln!(out, "{value}")?,
            Ok(None) => {},
            Err(error) => writeln!(out, "ERROR: {error}")?,
        }
    }
}
