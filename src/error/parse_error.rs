#[derive(Debug)]
/// Represents all diagnostics the parser can record while building the AST.
///
/// The parser never fails outright; it records diagnostics on a cumulative
/// list and keeps going where possible. A program that produced any
/// diagnostics must not be evaluated.
pub enum ParseError {
    /// The token at expression head position cannot start an expression.
    NoPrefixParseFn {
        /// The kind of the offending token.
        token: String,
    },
    /// The upcoming token did not match the kind a production requires.
    UnexpectedToken {
        /// The kind that was expected.
        expected: String,
        /// The kind that was actually found.
        got:      String,
    },
    /// A numeric literal could not be converted into a 64-bit float.
    InvalidNumberLiteral {
        /// The raw lexeme of the literal.
        literal: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPrefixParseFn { token } => {
                write!(f, "no prefix parse function for {token}")
            },

            Self::UnexpectedToken { expected, got } => {
                write!(f, "expected next token to be {expected}, got {got} instead")
            },

            Self::InvalidNumberLiteral { literal } => {
                write!(f, "could not parse {literal:?} as number")
            },
        }
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug)]
/// A batch of parser diagnostics collected from one parse run.
///
/// Renders in the interactive format: a `parser errors:` header followed by
/// one tab-indented message per diagnostic.
pub struct Diagnostics {
    errors: Vec<ParseError>,
}

impl Diagnostics {
    /// Wraps the diagnostics accumulated by a parser.
    #[must_use]
    pub fn new(errors: Vec<ParseError>) -> Self {
        Self { errors }
    }

    /// Returns the individual diagnostics, in the order they were recorded.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }
}

impl std::fmt::Display for Diagnostics {
    /// ## Example
    /// ```
    /// use sprig::error::{Diagnostics, ParseError};
    ///
    /// let diagnostics = Diagnostics::new(vec![ParseError::NoPrefixParseFn { token:
    ///                                             "ILLEGAL".to_string(), }]);
    ///
    /// assert_eq!(diagnostics.to_string(),
    ///            "parser errors:\n\tno prefix parse function for ILLEGAL");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parser errors:")?;
        for error in &self.errors {
            write!(f, "\n\t{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}
