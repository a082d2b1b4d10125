//! Partial application with placeholders.
//!
//! A [`Lambda`] collects arguments over any number of calls and runs once it
//! has as many concrete arguments as it declares. Open slots, written `_` in
//! [`args!`], defer their position to a later call:
//!
//! ```
//! # use lambdas::{Value, args, lambda};
//! let sub = lambda("_ - _")?;
//! assert_eq!(sub.call(&args![10, 3])?, Value::from(7));
//!
//! let from_ten = sub.call(&args![10])?;
//! assert_eq!(from_ten.call(&args![3])?, Value::from(7));
//!
//! let minus_three = sub.call(&args![_, 3])?;
//! assert_eq!(minus_three.call(&args![10])?, Value::from(7));
//! # Ok::<_, lambdas::Error>(())
//! ```
//!
//! Lambdas are built from expression text, where `_` stands for the next
//! argument and `_1`, `_2`, ... for a specific one, or from any other
//! callable. Expressions are compiled once per [`Engine`], and [`memoize`]
//! remembers a callable's results.

mod arity;
mod cache;
mod compile;
mod engine;
mod error;
mod eval;
mod key;
mod memoize;
mod partial;
mod syntax;
#[cfg(feature = "testing")]
mod testing;
mod value;

pub mod ops;

pub use crate::arity::{Callable, Lambda, with_arity};
pub use crate::compile::Compiler;
pub use crate::engine::{Engine, lambda};
pub use crate::error::{Error, Result, SyntaxError};
pub use crate::memoize::{Memoized, memoize};
pub use crate::partial::wrap;
pub use crate::value::{Arg, Value};

#[cfg(feature = "macros")]
pub use lambdas_macros::native;

/// These are implementation details. Do not rely on them!
#[doc(hidden)]
pub mod internal {
    pub use crate::arity::arg;

    #[cfg(feature = "testing")]
    pub use crate::testing::last_was_hit;
}

/// Build an array of argument slots.
///
/// `_` is an open slot, any other expression is converted with
/// [`Arg::from`].
///
/// ```
/// # use lambdas::{Arg, args};
/// let n = 2;
/// let slots = args![1, _, n * 3, "two"];
/// assert!(slots[1].is_open());
/// assert_eq!(slots[2], Arg::from(6));
/// ```
#[macro_export]
macro_rules! args {
    (@[$($done:expr),*]) => { [$($done),*] };
    (@[$($done:expr),*] _ $(, $($rest:tt)*)?) => {
        $crate::args!(@[$($done,)* $crate::Arg::Open] $($($rest)*)?)
    };
    (@[$($done:expr),*] $next:expr $(, $($rest:tt)*)?) => {
        $crate::args!(@[$($done,)* $crate::Arg::from($next)] $($($rest)*)?)
    };
    ($($args:tt)*) => { $crate::args!(@[] $($args)*) };
}
