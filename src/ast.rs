/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// `Expr` covers all types of expressions, from literals and identifiers to
/// unary and binary operations, conditionals, function literals, calls, and
/// collection literals with indexing. Each variant models a distinct
/// syntactic construct; nodes own their children, so the AST is a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to a binding by name.
    Identifier {
        /// Name of the binding.
        name: String,
    },
    /// A numeric literal. All numbers are 64-bit floats.
    NumberLiteral {
        /// The constant value.
        value: f64,
    },
    /// A string literal.
    StringLiteral {
        /// The characters between the quotes.
        value: String,
    },
    /// A boolean literal: `true` or `false`.
    BooleanLiteral {
        /// The constant value.
        value: bool,
    },
    /// Array literal expression, e.g. `[1, 2, 3]`.
    ArrayLiteral {
        /// Elements of the array, in source order.
        elements: Vec<Expr>,
    },
    /// Hash literal expression, e.g. `{"a": 1, true: 2}`.
    ///
    /// Keys are arbitrary expressions evaluated at runtime. Pairs keep their
    /// source order, so a duplicate key takes the value written last.
    HashLiteral {
        /// Key/value expression pairs, in source order.
        pairs: Vec<(Expr, Expr)>,
    },
    /// A unary operation, e.g. `!ok` or `-x`.
    Unary {
        /// The unary operator to apply.
        op:    UnaryOperator,
        /// The operand expression.
        right: Box<Expr>,
    },
    /// A binary operation, e.g. `a + b`.
    Binary {
        /// Left operand.
        left:  Box<Expr>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Expr>,
    },
    /// Conditional expression: `if (cond) { ... } else { ... }`.
    If {
        /// The condition expression.
        condition:   Box<Expr>,
        /// Block evaluated when the condition is truthy.
        consequence: Block,
        /// Optional block evaluated when the condition is falsy.
        alternative: Option<Block>,
    },
    /// Function literal expression: `fn(x, y) { ... }`.
    FunctionLiteral {
        /// Parameter names.
        params: Vec<String>,
        /// The function body.
        body:   Block,
    },
    /// Call expression, e.g. `add(1, 2)`. The callee is an arbitrary
    /// expression, so immediately-invoked literals like `fn(x) { x }(5)`
    /// work too.
    Call {
        /// The expression being called.
        callee: Box<Expr>,
        /// Argument expressions, in source order.
        args:   Vec<Expr>,
    },
    /// Index expression, e.g. `arr[0]` or `hash["key"]`.
    Index {
        /// The collection to index into.
        collection: Box<Expr>,
        /// The index or key expression.
        index:      Box<Expr>,
    },
}

/// A braced sequence of statements forming a single syntactic unit.
///
/// Blocks appear as `if`/`else` branches and function bodies. A `{` at
/// statement position parses as a hash literal instead, so blocks never occur
/// as standalone statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block, in source order.
    pub statements: Vec<Statement>,
}

/// Represents a single statement.
///
/// Statements are the units a [`Program`] is made of.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A binding introduced with `let`.
    Let {
        /// The name being bound.
        name:  String,
        /// The bound expression.
        value: Expr,
    },
    /// A `return` statement. Unwinds the enclosing function call.
    Return {
        /// The returned expression.
        value: Expr,
    },
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
    },
    /// A named function declaration: `fn name(params) { body }`.
    ///
    /// Semantically identical to `let name = fn(params) { body }`.
    Function {
        /// The name being bound.
        name:   String,
        /// Parameter names.
        params: Vec<String>,
        /// The function body.
        body:   Block,
    },
}

/// A parsed program: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// The top-level statements, in source order.
    pub statements: Vec<Statement>,
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons and logical connectives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`**`)
    Pow,
    /// Remainder (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

/// Represents a unary operator.
///
/// Unary operators include negation and logical NOT.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Pow => "**",
            Mod => "%",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Not => "!",
        };
        write!(f, "{operator}")
    }
}
