use std::fmt::{self, Debug, Display, Formatter};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::value::{Arg, Value};

/// Something that can be invoked with argument slots.
///
/// The declared arity is how many concrete arguments the callable wants
/// before it does its work. It is a plain number and need not match how many
/// arguments the underlying logic reads.
pub trait Callable {
    /// The declared number of arguments.
    fn arity(&self) -> usize;

    /// Invoke with the given slots.
    fn call(&self, args: &[Arg]) -> Result<Value>;

    /// Write how the callable was built.
    fn describe(&self, f: &mut Formatter) -> fmt::Result;

    /// Whether this is a partial-application wrapper.
    fn is_wrapper(&self) -> bool {
        false
    }
}

/// A shared handle to a callable.
///
/// Cloning is cheap and preserves identity, see [`ptr_eq`](Self::ptr_eq).
#[derive(Clone)]
pub struct Lambda(Rc<dyn Callable>);

impl Lambda {
    /// Wrap a callable into a handle.
    pub fn new(callable: impl Callable + 'static) -> Self {
        Self(Rc::new(callable))
    }

    /// Adapt a Rust closure into a callable with a declared arity.
    ///
    /// The closure receives every argument it is invoked with, open slots as
    /// `undefined`.
    pub fn native<F>(name: impl Into<Rc<str>>, arity: usize, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + 'static,
    {
        Self::new(Native { name: name.into(), arity, func })
    }

    /// The declared number of arguments.
    pub fn arity(&self) -> usize {
        self.0.arity()
    }

    /// Invoke the callable.
    pub fn call(&self, args: &[Arg]) -> Result<Value> {
        self.0.call(args)
    }

    /// Whether this is a partial-application wrapper.
    pub fn is_wrapper(&self) -> bool {
        self.0.is_wrapper()
    }

    /// Whether both handles point to the same callable.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl<T: Callable + 'static> From<Rc<T>> for Lambda {
    fn from(callable: Rc<T>) -> Self {
        Self(callable)
    }
}

impl Display for Lambda {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.describe(f)
    }
}

impl Debug for Lambda {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "Lambda({self}, arity: {})", self.arity())
    }
}

/// Give a callable a different declared arity.
///
/// The result forwards all arguments it receives, not just `arity` of them.
pub fn with_arity(arity: i64, target: Lambda) -> Result<Lambda> {
    let arity = usize::try_from(arity).map_err(|_| Error::Arity(arity))?;
    Ok(adapt(arity, target))
}

/// Infallible variant of [`with_arity`] for arities computed by the engine.
pub(crate) fn adapt(arity: usize, target: Lambda) -> Lambda {
    Lambda::new(Adapted { arity, target })
}

/// A callable with an overridden arity.
struct Adapted {
    arity: usize,
    target: Lambda,
}

impl Callable for Adapted {
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, args: &[Arg]) -> Result<Value> {
        self.target.call(args)
    }

    fn describe(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.target, f)
    }
}

/// A Rust closure with a declared arity.
struct Native<F> {
    name: Rc<str>,
    arity: usize,
    func: F,
}

impl<F> Callable for Native<F>
where
    F: Fn(&[Value]) -> Result<Value>,
{
    fn arity(&self) -> usize {
        self.arity
    }

    fn call(&self, args: &[Arg]) -> Result<Value> {
        let values: Vec<Value> = args.iter().map(|arg| arg.value().clone()).collect();
        (self.func)(&values)
    }

    fn describe(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The `i`th argument, `undefined` if there are fewer.
pub fn arg(args: &[Value], i: usize) -> Value {
    args.get(i).cloned().unwrap_or_default()
}
