/// Parsing diagnostics.
///
/// Defines the diagnostic types the parser records while building the AST.
/// Parse diagnostics include missing prefix parse functions, unexpected
/// tokens, and invalid numeric literals, plus the `Diagnostics` wrapper that
/// renders an accumulated batch of them.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include type mismatches, unknown operators, unresolved identifiers,
/// and invalid built-in function calls.
pub mod runtime_error;

pub use parse_error::{Diagnostics, ParseError};
pub use runtime_error::RuntimeError;
