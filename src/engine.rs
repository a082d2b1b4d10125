use crate::arity::Lambda;
use crate::compile::Compiler;
use crate::error::{Error, Result};
use crate::partial::wrap;
use crate::value::Value;

thread_local! {
    /// The engine behind [`lambda`].
    static ENGINE: Engine = Engine::new();
}

/// Build a lambda with this thread's default engine.
///
/// See [`Engine::lambda`].
pub fn lambda(input: impl Into<Value>) -> Result<Lambda> {
    let input = input.into();
    ENGINE.with(|engine| engine.lambda(input))
}

/// Builds partially applicable lambdas from expression text and functions.
///
/// Each engine owns a [`Compiler`], so independent engines do not share
/// compiled expressions.
#[derive(Default)]
pub struct Engine {
    compiler: Compiler,
}

impl Engine {
    /// Create an engine with an empty compiler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a lambda.
    ///
    /// - Text is compiled, each `_` or `_k` becoming an argument position.
    /// - A function that is already a lambda is returned unchanged.
    /// - Any other function is wrapped as it is.
    ///
    /// Anything else is rejected with [`Error::Construction`].
    pub fn lambda(&self, input: impl Into<Value>) -> Result<Lambda> {
        match input.into() {
            Value::Str(text) => {
                let compiled = self.compiler.compile(&text)?;
                let source = compiled.to_string();
                Ok(wrap(compiled, source))
            }
            Value::Func(func) if func.is_wrapper() => Ok(func),
            Value::Func(func) => {
                let source = func.to_string();
                Ok(wrap(func, source))
            }
            other => Err(Error::Construction(other.type_name())),
        }
    }

    /// The engine's expression compiler.
    pub fn compiler(&self) -> &Compiler {
        &self.compiler
    }
}
