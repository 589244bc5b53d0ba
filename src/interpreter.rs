/// The built-in function table.
///
/// Defines the native callables available in every program: `len`, `first`,
/// `last`, `rest`, `push` and `print`. Built-ins resolve only when no user
/// binding shadows their name.
///
/// # Responsibilities
/// - Maps names to built-in callables.
/// - Checks arities and argument types with the contractual error messages.
/// - Keeps the value-semantic guarantees of the array helpers (`push` and
///   `rest` allocate fresh arrays).
pub mod builtins;
/// Lexically nested scopes.
///
/// Defines the `Environment`: a name-to-value mapping with an optional link
/// to the enclosing scope, shared by reference between closures and the
/// blocks that created them.
///
/// # Responsibilities
/// - Resolves names by walking the scope chain outward.
/// - Binds names in the innermost scope, making shadowing the only
///   observable update.
/// - Provides the shared `EnvRef` handle captured by function values.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator traverses the AST, evaluates expressions and statements,
/// applies operators and functions, manages scopes, and produces results. It
/// is the core execution engine of the interpreter.
///
/// # Responsibilities
/// - Evaluates AST nodes, performing all supported operations.
/// - Short-circuits runtime errors out of every enclosing evaluation.
/// - Carries `return` values through nested blocks to the enclosing call.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// numbers, identifiers, operators, delimiters, and keywords. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens.
/// - Handles numeric, string and boolean literals, identifiers, and
///   operators.
/// - Carries the operator precedence table keyed by token kind.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser processes the token stream produced by the lexer and
/// constructs an AST that represents the syntactic structure of expressions
/// and statements. This enables the evaluator to execute user code.
///
/// # Responsibilities
/// - Converts tokens into structured AST nodes (expressions, statements).
/// - Resolves operator precedence through Pratt-style dispatch.
/// - Records human-readable diagnostics and recovers where possible.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares all the value types used during interpretation, such
/// as numbers, booleans, strings, arrays, hashes and functions. It also
/// provides truthiness, hash-key derivation, and the user-visible textual
/// representation of values.
///
/// # Responsibilities
/// - Defines the `Value` enum and all supported value variants.
/// - Derives hash-key fingerprints for the hashable variants.
/// - Implements the display format shared by `print` and the REPL.
pub mod value;
