use std::fmt;

use logos::Logos;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n\r]*")]
pub enum Token {
    /// Numeric literal tokens, such as `42`, `3.14` or `2.1e-10`.
    ///
    /// The raw lexeme is kept; the parser converts it into a 64-bit float and
    /// records a diagnostic when the conversion fails.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),
    /// String literal tokens, such as `"hello"`. The surrounding quotes are
    /// stripped; there are no escape sequences.
    #[regex(r#""[^"]*""#, |lex| { let s = lex.slice(); s[1..s.len() - 1].to_string() })]
    Str(String),
    /// Boolean literal tokens, `true` or `false`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `let`
    #[token("let")]
    Let,
    /// `fn`
    #[token("fn")]
    Function,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
    /// `**`
    #[token("**")]
    Power,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `!`
    #[token("!")]
    Bang,
    /// `&&`
    #[token("&&")]
    DoubleAmp,
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,

    /// A character the lexer does not recognize. The parser surfaces it as a
    /// missing-prefix diagnostic.
    #[regex(r".", |lex| lex.slice().to_string(), priority = 0)]
    Illegal(String),
    /// End-of-stream marker, produced repeatedly by [`Lexer::next_token`] once
    /// the source is exhausted.
    #[token("\0")]
    Eof,
}

/// Operator binding strength, weakest to strongest.
///
/// The parser compares the precedence of the upcoming token against the level
/// it is currently parsing at to decide whether the current sub-expression
/// should be extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// The entry level for full expressions.
    Lowest,
    /// `&&` and `||`
    Logical,
    /// `==` and `!=`
    Equals,
    /// `<`, `>`, `<=` and `>=`
    LessGreater,
    /// `+` and binary `-`
    Sum,
    /// `*`, `/`, `%` and `**`
    Product,
    /// `!` and unary `-`
    Unary,
    /// A call argument list opened by `(`
    Call,
    /// An index subscript opened by `[`
    Index,
}

impl Token {
    /// Returns the infix binding strength of this token kind.
    ///
    /// Token kinds that cannot appear in infix position bind at
    /// [`Precedence::Lowest`], which stops the Pratt loop.
    ///
    /// ## Example
    /// ```
    /// use sprig::interpreter::lexer::{Precedence, Token};
    ///
    /// assert_eq!(Token::Plus.precedence(), Precedence::Sum);
    /// assert!(Token::Star.precedence() > Token::Plus.precedence());
    /// assert_eq!(Token::Semicolon.precedence(), Precedence::Lowest);
    /// ```
    #[must_use]
    pub const fn precedence(&self) -> Precedence {
        match self {
            Self::DoubleAmp | Self::DoublePipe => Precedence::Logical,
            Self::EqualEqual | Self::BangEqual => Precedence::Equals,
            Self::Less | Self::Greater | Self::LessEqual | Self::GreaterEqual => {
                Precedence::LessGreater
            },
            Self::Plus | Self::Minus => Precedence::Sum,
            Self::Star | Self::Slash | Self::Percent | Self::Power => Precedence::Product,
            Self::LParen => Precedence::Call,
            Self::LBracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

impl fmt::Display for Token {
    /// Writes the token kind the way parser diagnostics name it: literal
    /// classes and keywords as upper-case words, punctuation as itself.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Number(_) => "NUMBER",
            Self::Str(_) => "STRING",
            Self::Bool(true) => "TRUE",
            Self::Bool(false) => "FALSE",
            Self::Let => "LET",
            Self::Function => "FUNCTION",
            Self::Return => "RETURN",
            Self::If => "IF",
            Self::Else => "ELSE",
            Self::Ident(_) => "IDENT",
            Self::Power => "**",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Equals => "=",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Bang => "!",
            Self::DoubleAmp => "&&",
            Self::DoublePipe => "||",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::Illegal(_) => "ILLEGAL",
            Self::Eof => "EOF",
        };
        write!(f, "{kind}")
    }
}

/// Produces the token stream consumed by the parser.
///
/// Wraps the generated scanner behind the one operation the parser relies on:
/// [`Lexer::next_token`], a finite sequence terminated by [`Token::Eof`],
/// which repeats once the source is exhausted.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self { inner: Token::lexer(source) }
    }

    /// Returns the next token, or [`Token::Eof`] forever after exhaustion.
    ///
    /// ## Example
    /// ```
    /// use sprig::interpreter::lexer::{Lexer, Token};
    ///
    /// let mut lexer = Lexer::new("let x = 5");
    /// assert_eq!(lexer.next_token(), Token::Let);
    /// assert_eq!(lexer.next_token(), Token::Ident("x".to_string()));
    /// assert_eq!(lexer.next_token(), Token::Equals);
    /// assert_eq!(lexer.next_token(), Token::Number("5".to_string()));
    /// assert_eq!(lexer.next_token(), Token::Eof);
    /// assert_eq!(lexer.next_token(), Token::Eof);
    /// ```
    pub fn next_token(&mut self) -> Token {
        match self.inner.next() {
            Some(Ok(token)) => token,
            Some(Err(())) => Token::Illegal(self.inner.slice().to_string()),
            None => Token::Eof,
        }
    }
}
