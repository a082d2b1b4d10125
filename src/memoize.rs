use std::cell::RefCell;
use std::fmt::{self, Formatter};

use crate::arity::{Callable, Lambda};
use crate::cache::Table;
use crate::error::Result;
use crate::key::Key;
use crate::value::{Arg, Value};

/// Memoize a callable.
///
/// The result has the same arity as `target` and computes `target` at most
/// once for each distinct argument list. The results are kept for as long as
/// the returned lambda lives. Use [`Memoized`] directly to bound them.
pub fn memoize(target: Lambda) -> Lambda {
    Lambda::new(Memoized::new(target))
}

/// A callable whose results are remembered.
///
/// How arguments are matched depends on their shapes and is decided per call:
/// - a single text argument is looked up by the text,
/// - scalar arguments are looked up by an encoding of their types and text
///   forms,
/// - anything else is compared against earlier argument lists one by one,
///   requiring each position to be [identical](Value::identical).
///
/// Results are never dropped on their own. Keep the memoized callable behind
/// an `Rc` and call [`evict`](Self::evict) to bound the table:
///
/// ```
/// # use std::rc::Rc;
/// # use lambdas::{args, lambda, Lambda, Memoized};
/// let memoized = Rc::new(Memoized::new(lambda("_ * 2")?));
/// let double = Lambda::from(memoized.clone());
/// double.call(&args![21])?;
/// assert_eq!(memoized.len(), 1);
/// memoized.evict(0);
/// assert!(memoized.is_empty());
/// # Ok::<_, lambdas::Error>(())
/// ```
pub struct Memoized {
    target: Lambda,
    table: RefCell<Table>,
}

impl Memoized {
    /// Start memoizing a callable with an empty table.
    pub fn new(target: Lambda) -> Self {
        Self { target, table: RefCell::new(Table::default()) }
    }

    /// Evict the table.
    ///
    /// This removes all memoized results whose age is larger than `max_age`.
    /// The age of a result grows by one during each eviction and is reset to
    /// zero when the result produces a cache hit. Set `max_age` to zero to
    /// completely clear the table.
    pub fn evict(&self, max_age: usize) {
        let evicted = self.table.borrow_mut().evict(max_age);
        log::debug!("evicted {evicted} results of memoize({})", self.target);
    }

    /// The number of memoized results.
    pub fn len(&self) -> usize {
        self.table.borrow().len()
    }

    /// Whether nothing is memoized.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Callable for Memoized {
    fn arity(&self) -> usize {
        self.target.arity()
    }

    fn call(&self, args: &[Arg]) -> Result<Value> {
        let values: Vec<Value> = args.iter().map(|arg| arg.value().clone()).collect();
        let key = Key::of(&values);

        // Check if there is a cached output.
        if let Some(output) = self.table.borrow_mut().lookup(&key, &values) {
            log::trace!("memoize({}) hit for {values:?}", self.target);
            #[cfg(feature = "testing")]
            crate::testing::register(true);
            return Ok(output);
        }

        // The table is not borrowed while the target runs, so the target may
        // call back into this memoized callable.
        let output = self.target.call(args)?;
        log::trace!("memoize({}) miss for {values:?}", self.target);

        self.table.borrow_mut().insert(key, values, output.clone());

        #[cfg(feature = "testing")]
        crate::testing::register(false);

        Ok(output)
    }

    fn describe(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "memoize({})", self.target)
    }
}
