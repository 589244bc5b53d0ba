use std::{collections::HashMap, io::Write, rc::Rc};

use crate::{
    ast::{BinaryOperator, Block, Expr, Program, Statement, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        builtins::Builtin,
        environment::{EnvRef, Environment},
        value::{FunctionValue, HashPair, Value},
    },
    util::num::{truncate_index, truncated_rem},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure. An error short-circuits every
/// enclosing evaluation on its way to the top-level caller.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The tree-walking execution engine.
///
/// Holds the output sink the `print` built-in writes to; everything else
/// lives in the [`Environment`] threaded through the evaluation calls, so one
/// evaluator can serve many programs against the same environment.
///
/// ## Example
/// ```
/// use sprig::interpreter::{
///     environment::Environment,
///     evaluator::Evaluator,
///     lexer::Lexer,
///     parser::Parser,
/// };
///
/// let mut parser = Parser::new(Lexer::new("let double = fn(x) { x * 2 }; double(21)"));
/// let program = parser.parse_program();
/// assert!(parser.errors().is_empty());
///
/// let env = Environment::new().into_ref();
/// let mut out = Vec::new();
/// let result = Evaluator::new(&mut out).eval_program(&program, &env).unwrap();
///
/// assert_eq!(result.unwrap().to_string(), "42");
/// ```
pub struct Evaluator<'a> {
    out: &'a mut dyn Write,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator writing `print` output to `out`.
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out }
    }

    /// Evaluates a whole program against `env`.
    ///
    /// Statements run in order. A `return` at the top level stops the
    /// program and yields its unwrapped value; otherwise the result is the
    /// last statement's yield, which is `None` for declarations.
    pub fn eval_program(&mut self, program: &Program, env: &EnvRef) -> EvalResult<Option<Value>> {
        let mut result = None;

        for statement in &program.statements {
            result = self.eval_statement(statement, env)?;

            if let Some(Value::Return(value)) = result {
                return Ok(Some(*value));
            }
        }

        Ok(result)
    }

    /// Evaluates a single statement.
    ///
    /// Declarations (`let`, `fn name(...)`) bind into the current
    /// environment and yield `None`; expression and `return` statements
    /// yield `Some`.
    fn eval_statement(&mut self, statement: &Statement, env: &EnvRef) -> EvalResult<Option<Value>> {
        match statement {
            Statement::Let { name, value } => {
                let value = self.eval_expression(value, env)?;
                env.borrow_mut().set(name.clone(), value);
                Ok(None)
            },

            Statement::Function { name, params, body } => {
                let function = make_function(params, body, env);
                env.borrow_mut().set(name.clone(), function);
                Ok(None)
            },

            Statement::Return { value } => {
                let value = self.eval_expression(value, env)?;
                Ok(Some(Value::Return(Box::new(value))))
            },

            Statement::Expression { expr } => Ok(Some(self.eval_expression(expr, env)?)),
        }
    }

    /// Evaluates the statements of a block in order.
    ///
    /// A [`Value::Return`] stops the block and is handed back unopened, so
    /// the sentinel travels through nested blocks until the enclosing
    /// function-call boundary unwraps it exactly once.
    fn eval_block(&mut self, block: &Block, env: &EnvRef) -> EvalResult<Option<Value>> {
        let mut result = None;

        for statement in &block.statements {
            result = self.eval_statement(statement, env)?;

            if matches!(result, Some(Value::Return(_))) {
                return Ok(result);
            }
        }

        Ok(result)
    }

    /// Evaluates a single expression to a value.
    fn eval_expression(&mut self, expr: &Expr, env: &EnvRef) -> EvalResult<Value> {
        match expr {
            Expr::Identifier { name } => eval_identifier(name, env),
            Expr::NumberLiteral { value } => Ok((*value).into()),
            Expr::StringLiteral { value } => Ok(value.as_str().into()),
            Expr::BooleanLiteral { value } => Ok((*value).into()),

            Expr::ArrayLiteral { elements } => {
                let elements = self.eval_expressions(elements, env)?;
                Ok(elements.into())
            },

            Expr::HashLiteral { pairs } => self.eval_hash_literal(pairs, env),

            Expr::Unary { op, right } => {
                let right = self.eval_expression(right, env)?;
                eval_unary_expression(*op, &right)
            },

            Expr::Binary { left, op, right } => {
                let left = self.eval_expression(left, env)?;
                let right = self.eval_expression(right, env)?;
                eval_binary_expression(*op, left, right)
            },

            Expr::If { condition,
                       consequence,
                       alternative, } => {
                self.eval_if_expression(condition, consequence, alternative.as_ref(), env)
            },

            Expr::FunctionLiteral { params, body } => Ok(make_function(params, body, env)),

            Expr::Call { callee, args } => {
                let callee = self.eval_expression(callee, env)?;
                let args = self.eval_expressions(args, env)?;
                self.apply_function(callee, args)
            },

            Expr::Index { collection, index } => {
                let collection = self.eval_expression(collection, env)?;
                let index = self.eval_expression(index, env)?;
                eval_index_expression(&collection, &index)
            },
        }
    }

    /// Evaluates an `if` expression.
    ///
    /// The chosen block runs in the surrounding environment; blocks do not
    /// open a scope of their own. A falsy condition with no `else` yields
    /// `nil`.
    fn eval_if_expression(&mut self,
                          condition: &Expr,
                          consequence: &Block,
                          alternative: Option<&Block>,
                          env: &EnvRef)
                          -> EvalResult<Value> {
        let condition = self.eval_expression(condition, env)?;

        if condition.is_truthy() {
            Ok(self.eval_block(consequence, env)?.unwrap_or(Value::Nil))
        } else if let Some(alternative) = alternative {
            Ok(self.eval_block(alternative, env)?.unwrap_or(Value::Nil))
        } else {
            Ok(Value::Nil)
        }
    }

    /// Evaluates a list of expressions left to right. The first failure
    /// short-circuits the rest of the list.
    fn eval_expressions(&mut self, exprs: &[Expr], env: &EnvRef) -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(exprs.len());

        for expr in exprs {
            values.push(self.eval_expression(expr, env)?);
        }

        Ok(values)
    }

    /// Evaluates a hash literal.
    ///
    /// Keys must be hashable. Pairs are inserted in source order, so a
    /// duplicate key keeps the value written last.
    fn eval_hash_literal(&mut self, pairs: &[(Expr, Expr)], env: &EnvRef) -> EvalResult<Value> {
        let mut evaluated = HashMap::with_capacity(pairs.len());

        for (key_expr, value_expr) in pairs {
            let key = self.eval_expression(key_expr, env)?;
            let hash_key = key.hash_key()
                              .ok_or_else(|| RuntimeError::UnusableAsHashKey { type_name:
                                              key.type_name().to_string(), })?;

            let value = self.eval_expression(value_expr, env)?;
            evaluated.insert(hash_key, HashPair { key, value });
        }

        Ok(Value::Hash(Rc::new(evaluated)))
    }

    /// Applies a callable to already-evaluated arguments.
    ///
    /// User functions run their body in a fresh scope enclosing the captured
    /// environment, with parameters bound positionally; a `return` sentinel
    /// coming out of the body is unwrapped here. Built-ins are invoked
    /// directly.
    fn apply_function(&mut self, callee: Value, args: Vec<Value>) -> EvalResult<Value> {
        match callee {
            Value::Function(function) => {
                if args.len() != function.params.len() {
                    return Err(RuntimeError::WrongParameterCount { expected:
                                                                       function.params.len(),
                                                                   got: args.len(), });
                }

                let mut scope = Environment::enclosed(Rc::clone(&function.env));
                for (param, arg) in function.params.iter().zip(args) {
                    scope.set(param.clone(), arg);
                }

                let result = self.eval_block(&function.body, &scope.into_ref())?;

                Ok(match result {
                    Some(Value::Return(value)) => *value,
                    Some(value) => value,
                    None => Value::Nil,
                })
            },

            Value::Builtin(builtin) => builtin.apply(&args, &mut *self.out),

            other => Err(RuntimeError::NotAFunction { type_name: other.type_name().to_string() }),
        }
    }
}

/// Resolves an identifier: the environment chain first, the built-in table
/// as a fallback.
fn eval_identifier(name: &str, env: &EnvRef) -> EvalResult<Value> {
    if let Some(value) = env.borrow().get(name) {
        return Ok(value);
    }

    if let Some(builtin) = Builtin::lookup(name) {
        return Ok(Value::Builtin(builtin));
    }

    Err(RuntimeError::IdentifierNotFound { name: name.to_string() })
}

/// Captures a function literal together with the environment it was created
/// in.
fn make_function(params: &[String], body: &Block, env: &EnvRef) -> Value {
    Value::Function(Rc::new(FunctionValue { params: params.to_vec(),
                                            body:   body.clone(),
                                            env:    Rc::clone(env), }))
}

/// Evaluates a unary operator applied to a value.
fn eval_unary_expression(op: UnaryOperator, right: &Value) -> EvalResult<Value> {
    match op {
        UnaryOperator::Not => Ok(Value::Boolean(!right.is_truthy())),

        UnaryOperator::Negate => match right {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(RuntimeError::UnknownUnaryOperator { operator: op.to_string(),
                                                              operand:  other.type_name()
                                                                             .to_string(), }),
        },
    }
}

/// Evaluates a binary operator applied to two values.
///
/// `&&` and `||` combine the truthiness of both operands; both sides are
/// always evaluated before this function is reached. Numbers support the
/// full operator set, strings support `+` only, and for everything else
/// `==`/`!=` fall back to identity comparison.
fn eval_binary_expression(op: BinaryOperator, left: Value, right: Value) -> EvalResult<Value> {
    use BinaryOperator::{And, Equal, NotEqual, Or};

    match op {
        And => Ok(Value::Boolean(left.is_truthy() && right.is_truthy())),
        Or => Ok(Value::Boolean(left.is_truthy() || right.is_truthy())),

        _ => match (left, right) {
            (Value::Number(left), Value::Number(right)) => {
                Ok(eval_number_binary(op, left, right))
            },

            (Value::Str(left), Value::Str(right)) => eval_string_binary(op, &left, &right),

            (left, right) => match op {
                Equal => Ok(Value::Boolean(left.identity_eq(&right))),
                NotEqual => Ok(Value::Boolean(!left.identity_eq(&right))),

                _ if left.type_name() != right.type_name() => {
                    Err(RuntimeError::TypeMismatch { left:     left.type_name().to_string(),
                                                     operator: op.to_string(),
                                                     right:    right.type_name().to_string(), })
                },

                _ => Err(RuntimeError::UnknownBinaryOperator { left:     left.type_name()
                                                                             .to_string(),
                                                               operator: op.to_string(),
                                                               right:    right.type_name()
                                                                              .to_string(), }),
            },
        },
    }
}

/// Evaluates a binary operator on two numbers.
///
/// `%` takes the remainder of the i64-truncated operands; the other
/// arithmetic operators follow IEEE 754 double semantics.
fn eval_number_binary(op: BinaryOperator, left: f64, right: f64) -> Value {
    use BinaryOperator::{
        Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
        Pow, Sub,
    };

    match op {
        Add => Value::Number(left + right),
        Sub => Value::Number(left - right),
        Mul => Value::Number(left * right),
        Div => Value::Number(left / right),
        Pow => Value::Number(left.powf(right)),
        Mod => Value::Number(truncated_rem(left, right)),
        Less => Value::Boolean(left < right),
        Greater => Value::Boolean(left > right),
        LessEqual => Value::Boolean(left <= right),
        GreaterEqual => Value::Boolean(left >= right),
        Equal => Value::Boolean(left == right),
        NotEqual => Value::Boolean(left != right),
        And | Or => unreachable!("logical operators are handled before numeric dispatch"),
    }
}

/// Evaluates a binary operator on two strings. Only `+` (concatenation) is
/// supported.
fn eval_string_binary(op: BinaryOperator, left: &str, right: &str) -> EvalResult<Value> {
    if op == BinaryOperator::Add {
        return Ok(Value::Str(Rc::from(format!("{left}{right}"))));
    }

    Err(RuntimeError::UnknownBinaryOperator { left:     "STRING".to_string(),
                                              operator: op.to_string(),
                                              right:    "STRING".to_string(), })
}

/// Evaluates the index operator.
///
/// Arrays take numeric indices; hashes take any hashable key and yield `nil`
/// for absent keys.
fn eval_index_expression(collection: &Value, index: &Value) -> EvalResult<Value> {
    match (collection, index) {
        (Value::Array(elements), Value::Number(index)) => {
            Ok(eval_array_index(elements.as_slice(), *index))
        },

        (Value::Hash(pairs), index) => {
            let key = index.hash_key()
                           .ok_or_else(|| RuntimeError::UnusableAsHashKey { type_name:
                                           index.type_name().to_string(), })?;

            Ok(pairs.get(&key).map_or(Value::Nil, |pair| pair.value.clone()))
        },

        (other, _) => Err(RuntimeError::IndexNotSupported { type_name: other.type_name()
                                                                            .to_string(), }),
    }
}

/// Reads an array element by a numeric index truncated toward zero.
///
/// Out-of-range and non-finite indices yield `nil` rather than an error.
fn eval_array_index(elements: &[Value], index: f64) -> Value {
    truncate_index(index).and_then(|index| usize::try_from(index).ok())
                         .and_then(|index| elements.get(index))
                         .cloned()
                         .unwrap_or(Value::Nil)
}
