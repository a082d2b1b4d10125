use std::cell::RefCell;
use std::fmt::{self, Formatter};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::arity::{Callable, Lambda};
use crate::error::Result;
use crate::eval::eval;
use crate::syntax::{self, Expr};
use crate::value::{Arg, Value};

/// Compiles placeholder expressions into lambdas.
///
/// Every text is parsed once per compiler: compiling the same text again
/// returns the very same [`Lambda`]. Texts that fail to parse are not
/// remembered.
#[derive(Default)]
pub struct Compiler {
    /// Maps from source text to its compiled form.
    cache: RefCell<FxHashMap<Rc<str>, Lambda>>,
}

impl Compiler {
    /// Create a compiler with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile expression text into a plain callable whose arity is the
    /// number of argument positions its placeholders refer to.
    pub fn compile(&self, text: &str) -> Result<Lambda> {
        if let Some(compiled) = self.cache.borrow().get(text) {
            return Ok(compiled.clone());
        }

        let (body, arity) = syntax::parse(text)?;
        log::debug!("compiled {text:?} with arity {arity}");

        let source: Rc<str> = text.into();
        let compiled = Lambda::new(Compiled { source: source.clone(), arity, body });
        self.cache.borrow_mut().insert(source, compiled.clone());
        Ok(compiled)
    }

    /// The number of distinct texts compiled so far.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Whether nothing was compiled yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A compiled expression.
struct Compiled {
    source: Rc<str>,
    arity: usize,
    body: Expr,
}

impl Callable for Compiled {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, args: &[Arg]) -> Result<Value> {
        eval(&self.body, args)
    }

    fn describe(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "'{}'", self.source.replace('\'', "\\'"))
    }
}
