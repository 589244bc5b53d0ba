use std::mem;

use crate::{
    ast::{BinaryOperator, Block, Expr, Program, Statement, UnaryOperator},
    error::ParseError,
    interpreter::lexer::{Lexer, Precedence, Token},
};

/// A Pratt parser turning the token stream into a [`Program`].
///
/// The parser keeps two lookahead slots, `curr` and `peek`, and advances by
/// shifting `peek` into `curr` while pulling a fresh token from the lexer. It
/// dispatches on the kind of `curr` to a prefix production, then extends the
/// parsed expression with infix productions for as long as the upcoming
/// token binds tighter than the level it was entered at.
///
/// Syntax mistakes never abort the parse. The affected production returns
/// nothing, a human-readable diagnostic is recorded, and outer productions
/// skip the hole. Callers must inspect [`Parser::errors`] before evaluating:
/// a non-empty list means the AST is untrusted.
pub struct Parser<'a> {
    lexer: Lexer<'a>,

    curr: Token,
    peek: Token,

    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Creates a parser and primes both lookahead slots from `lexer`.
    #[must_use]
    pub fn new(lexer: Lexer<'a>) -> Self {
        let mut parser = Self { lexer,
                                curr: Token::Eof,
                                peek: Token::Eof,
                                errors: Vec::new() };
        parser.advance();
        parser.advance();

        parser
    }

    /// Parses the whole token stream into a program.
    ///
    /// Statements that fail to parse are skipped; their diagnostics are
    /// available through [`Parser::errors`] afterwards.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while self.curr != Token::Eof {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.advance();
        }

        program
    }

    /// Returns the diagnostics recorded so far, in source order.
    #[must_use]
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Consumes the parser and returns its diagnostics.
    #[must_use]
    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Dispatches on the current token to a statement production.
    ///
    /// `fn` followed by an identifier is a function declaration; `fn`
    /// followed by `(` falls through to expression parsing as a function
    /// literal.
    fn parse_statement(&mut self) -> Option<Statement> {
        match self.curr {
            Token::Let => self.parse_let_statement(),
            Token::Return => self.parse_return_statement(),
            Token::Function if matches!(self.peek, Token::Ident(_)) => {
                self.parse_function_statement()
            },
            _ => self.parse_expression_statement(),
        }
    }

    /// Parses `let <identifier> = <expression>` with an optional trailing
    /// `;`.
    fn parse_let_statement(&mut self) -> Option<Statement> {
        let name = self.expect_ident()?;

        if !self.expect_peek(&Token::Equals) {
            return None;
        }

        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Some(Statement::Let { name, value })
    }

    /// Parses `return <expression>` with an optional trailing `;`.
    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Some(Statement::Return { value })
    }

    /// Parses `fn <name>(<params>) { <body> }` with an optional trailing
    /// `;`.
    fn parse_function_statement(&mut self) -> Option<Statement> {
        let name = self.expect_ident()?;

        if !self.expect_peek(&Token::LParen) {
            return None;
        }

        let params = self.parse_function_parameters()?;

        if !self.expect_peek(&Token::LBrace) {
            return None;
        }

        let body = self.parse_block();
        self.skip_optional_semicolon();

        Some(Statement::Function { name, params, body })
    }

    /// Parses a bare expression used as a statement, with an optional
    /// trailing `;`.
    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Some(Statement::Expression { expr })
    }

    /// The Pratt core: parses an expression at the given minimum binding
    /// strength.
    ///
    /// A prefix production for `curr` yields the left-hand side; the loop
    /// then folds in infix productions for as long as the upcoming token
    /// binds tighter than `precedence` and is not a `;`.
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while self.peek != Token::Semicolon && precedence < self.peek.precedence() {
            if let Some(op) = binary_operator(&self.peek) {
                self.advance();
                left = self.parse_binary_expression(left, op)?;
            } else if self.peek == Token::LParen {
                self.advance();
                left = self.parse_call_expression(left)?;
            } else if self.peek == Token::LBracket {
                self.advance();
                left = self.parse_index_expression(left)?;
            } else {
                return Some(left);
            }
        }

        Some(left)
    }

    /// Dispatches on the current token to a prefix production.
    ///
    /// Records a diagnostic and yields nothing when no prefix production
    /// exists for the token kind.
    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.curr.clone() {
            Token::Ident(name) => Some(Expr::Identifier { name }),
            Token::Number(literal) => self.parse_number_literal(&literal),
            Token::Str(value) => Some(Expr::StringLiteral { value }),
            Token::Bool(value) => Some(Expr::BooleanLiteral { value }),
            Token::Bang => self.parse_unary_expression(UnaryOperator::Not),
            Token::Minus => self.parse_unary_expression(UnaryOperator::Negate),
            Token::LParen => self.parse_grouped_expression(),
            Token::If => self.parse_if_expression(),
            Token::Function => self.parse_function_literal(),
            Token::LBracket => self.parse_array_literal(),
            Token::LBrace => self.parse_hash_literal(),
            token => {
                self.errors
                    .push(ParseError::NoPrefixParseFn { token: token.to_string() });
                None
            },
        }
    }

    /// Converts a numeric lexeme into a literal node, recording a diagnostic
    /// when the lexeme is not a valid 64-bit float.
    fn parse_number_literal(&mut self, literal: &str) -> Option<Expr> {
        match literal.parse::<f64>() {
            Ok(value) => Some(Expr::NumberLiteral { value }),
            Err(_) => {
                self.errors
                    .push(ParseError::InvalidNumberLiteral { literal: literal.to_string() });
                None
            },
        }
    }

    /// Parses `!` or unary `-` applied to an operand parsed at unary
    /// strength.
    fn parse_unary_expression(&mut self, op: UnaryOperator) -> Option<Expr> {
        self.advance();

        let right = self.parse_expression(Precedence::Unary)?;

        Some(Expr::Unary { op,
                           right: Box::new(right) })
    }

    /// Parses `( <expression> )`.
    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        self.advance();

        let expr = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(&Token::RParen) {
            return None;
        }

        Some(expr)
    }

    /// Parses `if (<condition>) { <consequence> }` with an optional
    /// `else { <alternative> }`. The braces are required; `else if` without
    /// them is not part of the grammar.
    fn parse_if_expression(&mut self) -> Option<Expr> {
        if !self.expect_peek(&Token::LParen) {
            return None;
        }

        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(&Token::RParen) {
            return None;
        }
        if !self.expect_peek(&Token::LBrace) {
            return None;
        }

        let consequence = self.parse_block();

        let alternative = if self.peek == Token::Else {
            self.advance();

            if !self.expect_peek(&Token::LBrace) {
                return None;
            }

            Some(self.parse_block())
        } else {
            None
        };

        Some(Expr::If { condition: Box::new(condition),
                        consequence,
                        alternative })
    }

    /// Parses statements up to the matching `}` or end of stream. Entered
    /// with `curr` on the opening `{`.
    fn parse_block(&mut self) -> Block {
        let mut block = Block { statements: Vec::new() };

        self.advance();

        while self.curr != Token::RBrace && self.curr != Token::Eof {
            if let Some(statement) = self.parse_statement() {
                block.statements.push(statement);
            }
            self.advance();
        }

        block
    }

    /// Parses `fn (<params>) { <body> }`.
    fn parse_function_literal(&mut self) -> Option<Expr> {
        if !self.expect_peek(&Token::LParen) {
            return None;
        }

        let params = self.parse_function_parameters()?;

        if !self.expect_peek(&Token::LBrace) {
            return None;
        }

        let body = self.parse_block();

        Some(Expr::FunctionLiteral { params, body })
    }

    /// Parses a comma-separated list of parameter names up to `)`. An
    /// immediately encountered `)` produces an empty list.
    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut params = Vec::new();

        if self.peek == Token::RParen {
            self.advance();
            return Some(params);
        }

        params.push(self.expect_ident()?);

        while self.peek == Token::Comma {
            self.advance();
            params.push(self.expect_ident()?);
        }

        if !self.expect_peek(&Token::RParen) {
            return None;
        }

        Some(params)
    }

    /// Parses the argument list of a call. Entered with `curr` on the `(`
    /// that follows the callee.
    fn parse_call_expression(&mut self, callee: Expr) -> Option<Expr> {
        let args = self.parse_expression_list(&Token::RParen)?;

        Some(Expr::Call { callee: Box::new(callee),
                          args })
    }

    /// Parses `[ <elements> ]`.
    fn parse_array_literal(&mut self) -> Option<Expr> {
        let elements = self.parse_expression_list(&Token::RBracket)?;

        Some(Expr::ArrayLiteral { elements })
    }

    /// Parses a comma-separated list of expressions until the closing token.
    ///
    /// Shared by array literals and call argument lists.
    fn parse_expression_list(&mut self, end: &Token) -> Option<Vec<Expr>> {
        let mut list = Vec::new();

        if self.peek == *end {
            self.advance();
            return Some(list);
        }

        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek == Token::Comma {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    /// Parses `[ <index> ]` applied to a collection expression. Entered with
    /// `curr` on the `[`.
    fn parse_index_expression(&mut self, collection: Expr) -> Option<Expr> {
        self.advance();

        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(&Token::RBracket) {
            return None;
        }

        Some(Expr::Index { collection: Box::new(collection),
                           index:      Box::new(index), })
    }

    /// Parses `{ <key> : <value>, ... }`. Keys are arbitrary expressions;
    /// whether they are actually hashable is checked at evaluation time.
    fn parse_hash_literal(&mut self) -> Option<Expr> {
        let mut pairs = Vec::new();

        while self.peek != Token::RBrace {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(&Token::Colon) {
                return None;
            }

            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if self.peek != Token::RBrace && !self.expect_peek(&Token::Comma) {
                return None;
            }
        }

        if !self.expect_peek(&Token::RBrace) {
            return None;
        }

        Some(Expr::HashLiteral { pairs })
    }

    /// Parses the right-hand side of an infix operator. Entered with `curr`
    /// on the operator; the right operand is parsed at the operator's own
    /// strength, making every binary operator left-associative.
    fn parse_binary_expression(&mut self, left: Expr, op: BinaryOperator) -> Option<Expr> {
        let precedence = self.curr.precedence();
        self.advance();

        let right = self.parse_expression(precedence)?;

        Some(Expr::Binary { left: Box::new(left),
                            op,
                            right: Box::new(right) })
    }

    /// Shifts `peek` into `curr` and pulls a fresh token.
    fn advance(&mut self) {
        self.curr = mem::replace(&mut self.peek, self.lexer.next_token());
    }

    /// Advances past the upcoming token when it is of the expected kind;
    /// otherwise records a diagnostic and leaves the position unchanged.
    fn expect_peek(&mut self, expected: &Token) -> bool {
        if mem::discriminant(&self.peek) == mem::discriminant(expected) {
            self.advance();
            true
        } else {
            self.peek_error(&expected.to_string());
            false
        }
    }

    /// Advances past the upcoming token when it is an identifier and returns
    /// its name; otherwise records a diagnostic.
    fn expect_ident(&mut self) -> Option<String> {
        if let Token::Ident(name) = &self.peek {
            let name = name.clone();
            self.advance();
            Some(name)
        } else {
            self.peek_error("IDENT");
            None
        }
    }

    /// Consumes a `;` after a statement when present. Semicolons are
    /// separators, not terminators, so they are never required.
    fn skip_optional_semicolon(&mut self) {
        if self.peek == Token::Semicolon {
            self.advance();
        }
    }

    /// Records an unexpected-token diagnostic against the upcoming token.
    fn peek_error(&mut self, expected: &str) {
        self.errors.push(ParseError::UnexpectedToken { expected: expected.to_string(),
                                                       got:      self.peek.to_string(), });
    }
}

/// Maps an infix-capable token to its binary operator.
const fn binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Power => Some(BinaryOperator::Pow),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::DoubleAmp => Some(BinaryOperator::And),
        Token::DoublePipe => Some(BinaryOperator::Or),
        _ => None,
    }
}
