#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
///
/// A runtime error short-circuits every enclosing evaluation until it reaches
/// the top-level caller, which surfaces it as `ERROR: <message>`. The
/// `Display` output of each variant is part of the language's user-visible
/// contract, so the texts below are matched verbatim by the test suite.
pub enum RuntimeError {
    /// A binary operator was applied to operands of different types.
    TypeMismatch {
        /// Type name of the left operand.
        left:     String,
        /// The operator lexeme.
        operator: String,
        /// Type name of the right operand.
        right:    String,
    },
    /// A binary operator is not defined for the given operand types.
    UnknownBinaryOperator {
        /// Type name of the left operand.
        left:     String,
        /// The operator lexeme.
        operator: String,
        /// Type name of the right operand.
        right:    String,
    },
    /// A unary operator is not defined for the given operand type.
    UnknownUnaryOperator {
        /// The operator lexeme.
        operator: String,
        /// Type name of the operand.
        operand:  String,
    },
    /// An identifier resolved neither to a binding nor to a built-in.
    IdentifierNotFound {
        /// The unresolved name.
        name: String,
    },
    /// A call was attempted on a value that is not callable.
    NotAFunction {
        /// Type name of the called value.
        type_name: String,
    },
    /// A user-defined function was called with the wrong number of arguments.
    WrongParameterCount {
        /// The number of parameters the function declares.
        expected: usize,
        /// The number of arguments supplied.
        got:      usize,
    },
    /// A built-in function was called with the wrong number of arguments.
    WrongArgumentCount {
        /// The number of arguments supplied.
        got:  usize,
        /// The number of arguments the built-in requires.
        want: usize,
    },
    /// A built-in function does not support the given argument type.
    UnsupportedArgument {
        /// Name of the built-in.
        name:      String,
        /// Type name of the offending argument.
        type_name: String,
    },
    /// A built-in function requires an array argument.
    ArgumentMustBeArray {
        /// Name of the built-in.
        name:      String,
        /// Type name of the offending argument.
        type_name: String,
    },
    /// A value of a non-hashable type was used as a hash key.
    UnusableAsHashKey {
        /// Type name of the offending key.
        type_name: String,
    },
    /// The index operator was applied to a value that does not support it.
    IndexNotSupported {
        /// Type name of the indexed value.
        type_name: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { left, operator, right } => {
                write!(f, "type mismatch: {left} {operator} {right}")
            },

            Self::UnknownBinaryOperator { left, operator, right } => {
                write!(f, "unknown operator: {left} {operator} {right}")
            },

            Self::UnknownUnaryOperator { operator, operand } => {
                write!(f, "unknown operator: {operator}{operand}")
            },

            Self::IdentifierNotFound { name } => write!(f, "identifier not found: {name}"),

            Self::NotAFunction { type_name } => write!(f, "not a function: {type_name}"),

            Self::WrongParameterCount { expected, got } => {
                write!(f, "wrong number of arguments: expected {expected}, got {got}")
            },

            Self::WrongArgumentCount { got, want } => {
                write!(f, "wrong number of arguments. got={got}, want={want}")
            },

            Self::UnsupportedArgument { name, type_name } => {
                write!(f, "argument to `{name}` not supported, got {type_name}")
            },

            Self::ArgumentMustBeArray { name, type_name } => {
                write!(f, "argument to `{name}` must be ARRAY, got {type_name}")
            },

            Self::UnusableAsHashKey { type_name } => {
                write!(f, "unusable as hash key: {type_name}")
            },

            Self::IndexNotSupported { type_name } => {
                write!(f, "index operator not supported: {type_name}")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
