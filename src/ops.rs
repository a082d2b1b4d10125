//! Ready-made lambdas.
//!
//! Every constructor builds its lambda through this thread's default engine,
//! so operators written as expressions share their compiled forms. All of
//! them are partially applicable:
//!
//! ```
//! # use lambdas::{Value, args, ops};
//! let halve = ops::div()?.call(&args![_, 2])?;
//! assert_eq!(halve.call(&args![9])?, Value::from(4.5));
//! # Ok::<_, lambdas::Error>(())
//! ```

use crate::arity::{Lambda, arg};
use crate::engine::lambda;
use crate::error::{Error, Result};
use crate::value::{Arg, Value};

macro_rules! expressions {
    ($($(#[$attr:meta])* $name:ident => $text:literal;)*) => {$(
        $(#[$attr])*
        pub fn $name() -> Result<Lambda> {
            lambda($text)
        }
    )*};
}

expressions! {
    /// Logical negation.
    not => "!_";
    /// Yields the first falsy operand, or the second.
    and => "_ && _";
    /// Yields the first truthy operand, or the second.
    or => "_ || _";
    /// Exactly one of two values is truthy.
    xor => "(_1 || _2) && !(_1 && _2)";
    /// Adds one.
    inc => "++_";
    /// Subtracts one.
    dec => "--_";
    /// Addition, or concatenation if either side is text.
    add => "_ + _";
    sub => "_ - _";
    mul => "_ * _";
    div => "_ / _";
    /// The remainder of a division, signed like the dividend.
    rem => "_ % _";
    /// Bitwise complement, as a 32-bit integer.
    bit_not => "~_";
    bit_or => "_ | _";
    bit_and => "_ & _";
    bit_xor => "_ ^ _";
    lshift => "_ << _";
    /// Right shift that keeps the sign.
    rshift => "_ >> _";
    /// Right shift that fills with zeros.
    zshift => "_ >>> _";
    /// Loose equality.
    eq => "_ == _";
    ne => "_ != _";
    gt => "_ > _";
    lt => "_ < _";
    ge => "_ >= _";
    le => "_ <= _";
    /// Strict identity.
    identical => "_ === _";
    unidentical => "_ !== _";
    even => "_ % 2 == 0";
    /// Reads `value[key]`.
    get => "_[_]";
    /// Whether a record has an entry.
    has => "_.hasOwnProperty(_)";
    /// The name of a value's type as `typeof` reports it.
    type_of => "typeof _";
    /// Picks the second or third argument depending on the first.
    if_else => "_ ? _ : _";
    last => "_1[_1.length - 1]";
    /// Everything but the last item.
    lead => "_.slice(0, -1)";
    /// Everything but the first item.
    tail => "_.slice(1)";
    /// The first `n` items.
    take => "_.slice(0, _)";
    /// Everything after the first `n` items.
    drop => "_.slice(_)";
    /// Appends items, flattening list arguments by one level.
    concat => "_.concat(_)";
    /// The position of an identical item, or -1.
    index_of => "_.indexOf(_)";
    join => "_.join(_)";
    reverse => "_.reverse()";
    /// Items from `start` up to `end`. Negative bounds count from the end.
    slice => "_.slice(_, _)";
    value_of => "_.valueOf()";
    len => "_.length";
    empty => "_.length == 0";
    str => "_.toString()";
}

/// Returns its argument.
pub fn id() -> Result<Lambda> {
    lambda(Lambda::native("id", 1, |args| Ok(arg(args, 0))))
}

/// Does nothing.
pub fn noop() -> Result<Lambda> {
    lambda(Lambda::native("noop", 0, |_| Ok(Value::Undefined)))
}

pub fn odd() -> Result<Lambda> {
    lambda(composition(vec![not()?, even()?]))
}

/// Raises the first argument to the power of the second.
pub fn power() -> Result<Lambda> {
    lambda(Lambda::native("power", 2, |args| {
        Ok(Value::Number(arg(args, 0).to_number().powf(arg(args, 1).to_number())))
    }))
}

pub fn square() -> Result<Lambda> {
    partial(power(), &[Arg::Open, Arg::from(2)])
}

pub fn cube() -> Result<Lambda> {
    partial(power(), &[Arg::Open, Arg::from(3)])
}

pub fn first() -> Result<Lambda> {
    partial(get(), &[Arg::Open, Arg::from(0)])
}

pub fn second() -> Result<Lambda> {
    partial(get(), &[Arg::Open, Arg::from(1)])
}

pub fn third() -> Result<Lambda> {
    partial(get(), &[Arg::Open, Arg::from(2)])
}

/// Fixes the first argument of a function: `bind(f, x)(y)` is `f(x, y)`.
pub fn bind() -> Result<Lambda> {
    lambda(Lambda::native("bind", 2, |args| {
        let func = function(&arg(args, 0))?;
        let context = arg(args, 1);
        let arity = func.arity().saturating_sub(1);
        let name = format!("bind({func})");
        Ok(Value::Func(Lambda::native(name, arity, move |args| {
            let mut all = vec![Arg::Bound(context.clone())];
            all.extend(Arg::bind_all(args));
            func.call(&all)
        })))
    }))
}

/// Swaps the first two arguments of a function.
pub fn flip() -> Result<Lambda> {
    lambda(Lambda::native("flip", 1, |args| {
        let func = function(&arg(args, 0))?;
        let name = format!("flip({func})");
        Ok(Value::Func(Lambda::native(name, 2, move |args| {
            let mut args = Arg::bind_all(args);
            if args.len() < 2 {
                args.resize(2, Arg::Open);
            }
            args.swap(0, 1);
            func.call(&args)
        })))
    }))
}

/// Binds leading arguments eagerly: `curry(f, a, b)` expects the rest of
/// `f`'s arguments.
pub fn curry() -> Result<Lambda> {
    lambda(Lambda::native("curry", 0, |args| {
        let Some((func, bound)) = args.split_first() else {
            return Err(Error::type_error("curry expects a function"));
        };

        let func = function(func)?;
        let bound = bound.to_vec();
        let arity = func.arity().saturating_sub(bound.len());
        let name = format!("curry({func})");
        Ok(Value::Func(Lambda::native(name, arity, move |args| {
            let all: Vec<Arg> = bound.iter().chain(args).cloned().map(Arg::Bound).collect();
            func.call(&all)
        })))
    }))
}

/// Chains functions right to left: `compose(f, g)(x)` is `f(g(x))`.
pub fn compose() -> Result<Lambda> {
    lambda(Lambda::native("compose", 0, |fns| {
        Ok(Value::Func(lambda(composition(functions(fns)?))?))
    }))
}

/// Calls a function with the items of a list.
pub fn apply() -> Result<Lambda> {
    lambda(Lambda::native("apply", 2, |args| {
        let func = function(&arg(args, 0))?;
        func.call(&Arg::bind_all(arg(args, 1).as_list()?))
    }))
}

/// Calls several functions with the same arguments and lists their results.
pub fn fanout() -> Result<Lambda> {
    lambda(Lambda::native("fanout", 0, |fns| {
        Ok(Value::Func(lambda(fan(functions(fns)?))?))
    }))
}

/// Splits a list in two after `n` items.
pub fn part() -> Result<Lambda> {
    lambda(fan(vec![take()?, drop()?]))
}

/// Memoizes a function, see [`crate::memoize()`]. Only complete calls are
/// remembered, partial ones are collected in front of the table.
pub fn memoize() -> Result<Lambda> {
    lambda(Lambda::native("memoize", 1, |args| {
        let memoized = crate::memoize::memoize(function(&arg(args, 0))?);
        Ok(Value::Func(lambda(memoized)?))
    }))
}

/// Applies a function to every item of a list. The function also receives
/// the index.
pub fn map() -> Result<Lambda> {
    lambda(Lambda::native("map", 2, |args| {
        let func = function(&arg(args, 1))?;
        let items = results(&arg(args, 0), &func)?;
        Ok(Value::from(items))
    }))
}

/// Folds a list from the left. Without an initial value, the first item is
/// used.
pub fn fold() -> Result<Lambda> {
    lambda(Lambda::native("fold", 2, |args| {
        let list = arg(args, 0);
        let mut items = list.as_list()?.iter().cloned();
        let func = function(&arg(args, 1))?;
        let mut acc = match arg(args, 2) {
            Value::Undefined => items.next().unwrap_or_default(),
            initial => initial,
        };
        for item in items {
            acc = func.call(&[Arg::Bound(acc), Arg::Bound(item)])?;
        }
        Ok(acc)
    }))
}

/// How many items satisfy a predicate.
pub fn count() -> Result<Lambda> {
    predicate("count", |hits| Value::from(hits.iter().filter(|hit| **hit).count()))
}

/// Whether every item satisfies a predicate.
pub fn all() -> Result<Lambda> {
    predicate("all", |hits| Value::Bool(hits.iter().all(|hit| *hit)))
}

/// Whether some item satisfies a predicate.
pub fn any() -> Result<Lambda> {
    predicate("any", |hits| Value::Bool(hits.iter().any(|hit| *hit)))
}

/// Whether no item satisfies a predicate.
pub fn none() -> Result<Lambda> {
    predicate("none", |hits| Value::Bool(!hits.iter().any(|hit| *hit)))
}

/// Whether exactly one item satisfies a predicate.
pub fn one() -> Result<Lambda> {
    predicate("one", |hits| Value::Bool(hits.iter().filter(|hit| **hit).count() == 1))
}

/// Calls a function with every item and its index until it returns
/// something other than undefined, and yields that.
pub fn each() -> Result<Lambda> {
    lambda(Lambda::native("each", 2, |args| {
        let list = arg(args, 0);
        let func = function(&arg(args, 1))?;
        for (i, item) in list.as_list()?.iter().enumerate() {
            match func.call(&[item.clone().into(), i.into()])? {
                Value::Undefined => {}
                found => return Ok(found),
            }
        }
        Ok(Value::Undefined)
    }))
}

/// Reads the same key from every item of a list.
pub fn pluck() -> Result<Lambda> {
    lambda(Lambda::native("pluck", 2, |args| {
        let key = arg(args, 1);
        let items = arg(args, 0)
            .as_list()?
            .iter()
            .map(|item| item.index(&key))
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::from(items))
    }))
}

/// The first item satisfying a predicate, or undefined.
pub fn find() -> Result<Lambda> {
    lambda(Lambda::native("find", 2, |args| {
        let list = arg(args, 0);
        let func = function(&arg(args, 1))?;
        for (i, item) in list.as_list()?.iter().enumerate() {
            if func.call(&[item.clone().into(), i.into()])?.truthy() {
                return Ok(item.clone());
            }
        }
        Ok(Value::Undefined)
    }))
}

/// Pairs up the items of several lists. Shorter lists are padded with
/// undefined.
pub fn zip() -> Result<Lambda> {
    lambda(Lambda::native("zip", 0, |lists| {
        let lists = lists.iter().map(Value::as_list).collect::<Result<Vec<_>>>()?;
        let len = lists.iter().map(|list| list.len()).max().unwrap_or(0);
        Ok(Value::list((0..len).map(|i| {
            Value::list(lists.iter().map(|list| list.get(i).cloned().unwrap_or_default()))
        })))
    }))
}

/// Apply `func` partially and return the resulting lambda.
fn partial(func: Result<Lambda>, args: &[Arg]) -> Result<Lambda> {
    match func?.call(args)? {
        Value::Func(partial) => Ok(partial),
        other => Err(Error::type_error(format!(
            "expected a partial application, found {}",
            other.type_name()
        ))),
    }
}

fn function(value: &Value) -> Result<Lambda> {
    value.as_lambda().cloned()
}

fn functions(values: &[Value]) -> Result<Vec<Lambda>> {
    values.iter().map(function).collect()
}

fn names(fns: &[Lambda]) -> String {
    fns.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// `f(g(...))` for `[f, g]`. The arity is the innermost function's.
fn composition(fns: Vec<Lambda>) -> Lambda {
    let arity = fns.last().map_or(1, Lambda::arity);
    let name = format!("compose({})", names(&fns));
    Lambda::native(name, arity, move |args| {
        let mut fns = fns.iter().rev();
        let mut value = match fns.next() {
            Some(innermost) => innermost.call(&Arg::bind_all(args))?,
            None => arg(args, 0),
        };
        for func in fns {
            value = func.call(&[Arg::Bound(value)])?;
        }
        Ok(value)
    })
}

/// Calls each function with the same arguments. The arity is the largest
/// among them.
fn fan(fns: Vec<Lambda>) -> Lambda {
    let arity = fns.iter().map(Lambda::arity).max().unwrap_or(0);
    let name = format!("fanout({})", names(&fns));
    Lambda::native(name, arity, move |args| {
        let args = Arg::bind_all(args);
        Ok(Value::List(fns.iter().map(|func| func.call(&args)).collect::<Result<_>>()?))
    })
}

/// Calls `func` with every item and its index.
fn results(list: &Value, func: &Lambda) -> Result<Vec<Value>> {
    list.as_list()?
        .iter()
        .enumerate()
        .map(|(i, item)| func.call(&[item.clone().into(), i.into()]))
        .collect()
}

/// A lambda over a list and a predicate that summarizes which items passed.
fn predicate(name: &'static str, summarize: fn(&[bool]) -> Value) -> Result<Lambda> {
    lambda(Lambda::native(name, 2, move |args| {
        let func = function(&arg(args, 1))?;
        let hits: Vec<bool> = results(&arg(args, 0), &func)?.iter().map(Value::truthy).collect();
        Ok(summarize(&hits))
    }))
}
