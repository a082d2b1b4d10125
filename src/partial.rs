use std::fmt::{self, Formatter};
use std::rc::Rc;

use crate::arity::{Callable, Lambda};
use crate::error::Result;
use crate::value::{Arg, Value};

/// Wrap a callable for partial application.
///
/// The wrapper collects arguments over any number of calls and runs `target`
/// once it has as many concrete arguments as `target` declares. `source` is
/// how the wrapper displays its origin.
pub fn wrap(target: Lambda, source: impl Into<Rc<str>>) -> Lambda {
    Partial::lambda(target, vec![], source.into())
}

/// A callable with some arguments already bound.
struct Partial {
    /// The callable that eventually runs.
    target: Lambda,
    /// Bound slots, possibly open. Never mutated after creation.
    bound: Vec<Arg>,
    /// What the wrapper was built from.
    source: Rc<str>,
    /// How many concrete arguments are still missing.
    arity: usize,
}

impl Partial {
    fn lambda(target: Lambda, bound: Vec<Arg>, source: Rc<str>) -> Lambda {
        let arity = missing(target.arity(), &bound);
        Lambda::new(Self { target, bound, source, arity })
    }
}

impl Callable for Partial {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, args: &[Arg]) -> Result<Value> {
        let filled = fill(&self.bound, args);
        let missing = missing(self.target.arity(), &filled);
        if missing > 0 {
            log::trace!("{} still misses {missing} of {filled:?}", self.source);
            return Ok(Value::Func(Self::lambda(
                self.target.clone(),
                filled,
                self.source.clone(),
            )));
        }

        self.target.call(&filled)
    }

    fn describe(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "wrap({})", self.source)?;
        for arg in &self.bound {
            write!(f, "({arg})")?;
        }
        Ok(())
    }

    fn is_wrapper(&self) -> bool {
        true
    }
}

/// How many of `arity` concrete arguments are not yet among `args`.
fn missing(arity: usize, args: &[Arg]) -> usize {
    let concrete = args.iter().filter(|arg| !arg.is_open()).count();
    arity.saturating_sub(concrete)
}

/// Fill the open slots of `bound` left to right with the concrete values of
/// `actuals` and append whatever `actuals` has left over.
///
/// Open slots among `actuals` are skipped while filling, so passing one
/// leaves the bound slot open.
fn fill(bound: &[Arg], actuals: &[Arg]) -> Vec<Arg> {
    let mut actuals = actuals.iter();
    let mut filled: Vec<Arg> = bound
        .iter()
        .map(|slot| {
            if !slot.is_open() {
                return slot.clone();
            }
            actuals
                .by_ref()
                .find(|actual| !actual.is_open())
                .unwrap_or(slot)
                .clone()
        })
        .collect();
    filled.extend(actuals.cloned());
    filled
}
