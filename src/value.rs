use std::collections::BTreeMap;
use std::fmt::{self, Debug, Display, Formatter, Write};
use std::rc::Rc;

use crate::arity::Lambda;
use crate::error::{Error, Result};

/// What an open slot reads as.
pub(crate) const UNDEFINED: &Value = &Value::Undefined;

/// A dynamically typed value flowing through lambdas.
///
/// Compound values are reference counted and immutable. Cloning a value never
/// copies its contents, which keeps [`identical`](Self::identical) meaningful
/// across clones.
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Undefined,
    /// An explicit empty value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// A piece of text.
    Str(Rc<str>),
    /// An ordered sequence of values.
    List(Rc<[Value]>),
    /// Named entries.
    Record(Rc<BTreeMap<Rc<str>, Value>>),
    /// A callable.
    Func(Lambda),
}

impl Value {
    /// Build a list from anything convertible to values.
    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a record from key-value pairs.
    pub fn record<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Rc<str>>,
        V: Into<Value>,
    {
        Self::Record(Rc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }

    /// The name of this value's type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Record(_) => "record",
            Self::Func(_) => "function",
        }
    }

    /// The type name reported by the `typeof` operator.
    pub fn type_of(&self) -> &'static str {
        match self {
            Self::Null | Self::List(_) | Self::Record(_) => "object",
            other => other.type_name(),
        }
    }

    /// Whether this is `undefined` or `null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Whether this value is a primitive: undefined, null, a boolean, a number
    /// or text.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Record(_) | Self::Func(_))
    }

    /// Whether the value counts as true in a condition.
    pub fn truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
            Self::List(_) | Self::Record(_) | Self::Func(_) => true,
        }
    }

    /// Convert to a number the way arithmetic operators do.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Undefined => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::Str(s) => parse_number(s),
            Self::List(_) | Self::Record(_) | Self::Func(_) => {
                parse_number(&self.to_string())
            }
        }
    }

    /// Compound values collapse to their text form, scalars stay as they are.
    pub fn to_primitive(&self) -> Value {
        if self.is_scalar() { self.clone() } else { Value::from(self.to_string()) }
    }

    /// Strict identity: scalars compare by value, compound values by
    /// reference.
    pub fn identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => Rc::ptr_eq(a, b),
            (Self::Record(a), Self::Record(b)) => Rc::ptr_eq(a, b),
            (Self::Func(a), Self::Func(b)) => a.ptr_eq(b),
            (Self::List(_) | Self::Record(_) | Self::Func(_), _) => false,
            _ => self == other,
        }
    }

    /// Loose equality as performed by `==`.
    pub fn loosely_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (a, b) if a.is_nullish() || b.is_nullish() => a.is_nullish() && b.is_nullish(),
            (Self::Str(a), Self::Str(b)) => a == b,
            (a, b) if !a.is_scalar() && !b.is_scalar() => a.identical(b),
            (a, b) if !a.is_scalar() => a.to_primitive().loosely_equals(b),
            (a, b) if !b.is_scalar() => a.loosely_equals(&b.to_primitive()),
            (a, b) => a.to_number() == b.to_number(),
        }
    }

    /// The lambda inside, or a type error.
    pub fn as_lambda(&self) -> Result<&Lambda> {
        match self {
            Self::Func(lambda) => Ok(lambda),
            other => Err(Error::type_error(format!("{} is not a function", other.type_name()))),
        }
    }

    /// The list's items, or a type error.
    pub fn as_list(&self) -> Result<&[Value]> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(Error::type_error(format!("{} is not a list", other.type_name()))),
        }
    }

    /// Invoke the value if it is a function.
    pub fn call(&self, args: &[Arg]) -> Result<Value> {
        self.as_lambda()?.call(args)
    }

    /// Read a named property, as `value.name` does.
    pub fn property(&self, name: &str) -> Result<Value> {
        self.index(&Value::from(name))
    }

    /// Read an entry by key, as `value[key]` does.
    pub fn index(&self, key: &Value) -> Result<Value> {
        Ok(match self {
            Self::Undefined | Self::Null => {
                return Err(Error::type_error(format!(
                    "cannot read properties of {self} (reading '{key}')"
                )));
            }
            Self::List(items) => match position(key) {
                Some(i) => items.get(i).cloned().unwrap_or_default(),
                None if is_length(key) => Value::from(items.len()),
                None => Value::Undefined,
            },
            Self::Str(text) => match position(key) {
                Some(i) => text
                    .chars()
                    .nth(i)
                    .map_or(Value::Undefined, |c| Value::from(c.to_string())),
                None if is_length(key) => Value::from(text.chars().count()),
                None => Value::Undefined,
            },
            Self::Record(entries) => {
                entries.get(key.to_string().as_str()).cloned().unwrap_or_default()
            }
            Self::Func(lambda) if is_length(key) => Value::from(lambda.arity()),
            _ => Value::Undefined,
        })
    }

    /// Invoke a built-in method on the value.
    pub fn method(&self, name: &str, args: &[Value]) -> Result<Value> {
        let arg = |i: usize| args.get(i).unwrap_or(UNDEFINED);
        Ok(match (self, name) {
            (Self::Undefined | Self::Null, _) => {
                return Err(Error::type_error(format!(
                    "cannot read properties of {self} (reading '{name}')"
                )));
            }
            (_, "toString") => Value::from(self.to_string()),
            (_, "valueOf") => self.clone(),

            (Self::List(items), "slice") => {
                let (start, end) = range(arg(0), arg(1), items.len());
                Value::List(items[start..end].into())
            }
            (Self::List(items), "concat") => {
                let mut out = items.to_vec();
                for arg in args {
                    match arg {
                        Value::List(more) => out.extend(more.iter().cloned()),
                        other => out.push(other.clone()),
                    }
                }
                Value::from(out)
            }
            (Self::List(items), "indexOf") => Value::from(
                items
                    .iter()
                    .position(|item| item.identical(arg(0)))
                    .map_or(-1.0, |i| i as f64),
            ),
            (Self::List(items), "includes") => {
                Value::Bool(items.iter().any(|item| item.identical(arg(0))))
            }
            (Self::List(items), "join") => {
                let separator = match arg(0) {
                    Value::Undefined => ",".to_string(),
                    other => other.to_string(),
                };
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| if item.is_nullish() { String::new() } else { item.to_string() })
                    .collect();
                Value::from(parts.join(&separator))
            }
            (Self::List(items), "reverse") => Value::List(items.iter().rev().cloned().collect()),

            (Self::Str(text), "slice") => {
                let chars: Vec<char> = text.chars().collect();
                let (start, end) = range(arg(0), arg(1), chars.len());
                Value::from(chars[start..end].iter().collect::<String>())
            }
            (Self::Str(text), "concat") => {
                let mut out = text.to_string();
                for arg in args {
                    write!(out, "{arg}").ok();
                }
                Value::from(out)
            }
            (Self::Str(text), "indexOf") => {
                let needle = arg(0).to_string();
                Value::from(
                    text.find(&needle)
                        .map_or(-1.0, |byte| text[..byte].chars().count() as f64),
                )
            }
            (Self::Str(text), "includes") => Value::Bool(text.contains(&arg(0).to_string())),
            (Self::Str(text), "toUpperCase") => Value::from(text.to_uppercase()),
            (Self::Str(text), "toLowerCase") => Value::from(text.to_lowercase()),
            (Self::Str(text), "trim") => Value::from(text.trim()),
            (Self::Str(text), "split") => match arg(0) {
                Value::Undefined => Value::list([self.clone()]),
                separator => {
                    let separator = separator.to_string();
                    if separator.is_empty() {
                        Value::list(text.chars().map(String::from))
                    } else {
                        Value::list(text.split(separator.as_str()))
                    }
                }
            },

            (Self::Record(entries), "hasOwnProperty") => {
                Value::Bool(entries.contains_key(arg(0).to_string().as_str()))
            }
            (Self::Record(entries), _) => match entries.get(name) {
                Some(Value::Func(lambda)) => return lambda.call(&Arg::bind_all(args)),
                _ => return Err(not_a_function(self, name)),
            },

            (Self::Number(n), "toFixed") => {
                let digits = arg(0).to_number();
                let digits = if digits.is_nan() { 0 } else { digits.clamp(0.0, 100.0) as usize };
                Value::from(format!("{n:.digits$}"))
            }

            (Self::Func(lambda), "call") => return lambda.call(&Arg::bind_all(args)),

            _ => return Err(not_a_function(self, name)),
        })
    }
}

fn not_a_function(value: &Value, name: &str) -> Error {
    Error::type_error(format!("{}.{name} is not a function", value.type_name()))
}

/// Parse text into a number, yielding NaN for anything that isn't one.
fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    match text {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) =>
        {
            text.parse().unwrap_or(f64::NAN)
        }
        _ => f64::NAN,
    }
}

/// A non-negative integral index.
fn position(key: &Value) -> Option<usize> {
    match key {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => Some(*n as usize),
        Value::Str(s) => s.parse().ok(),
        _ => None,
    }
}

fn is_length(key: &Value) -> bool {
    matches!(key, Value::Str(s) if &**s == "length")
}

/// Resolve `slice`-style bounds. Negative bounds count from the end.
fn range(start: &Value, end: &Value, len: usize) -> (usize, usize) {
    let resolve = |value: &Value, default: usize| match value {
        Value::Undefined => default,
        value => {
            let n = value.to_number();
            let n = if n.is_nan() { 0.0 } else { n.trunc() };
            if n < 0.0 {
                (len as f64 + n).max(0.0) as usize
            } else {
                n.min(len as f64) as usize
            }
        }
    };

    let start = resolve(start, 0);
    let end = resolve(end, len);
    (start, end.max(start))
}

/// Write a number the way it reads in expression text.
fn format_number(n: f64, f: &mut Formatter) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        f.write_str("0")
    } else {
        write!(f, "{n}")
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => format_number(*n, f),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    if !item.is_nullish() {
                        Display::fmt(item, f)?;
                    }
                }
                Ok(())
            }
            Self::Record(_) => f.write_str("[object Object]"),
            Self::Func(lambda) => Display::fmt(lambda, f),
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Str(s) => Debug::fmt(&**s, f),
            Self::List(items) => f.debug_list().entries(items.iter()).finish(),
            Self::Record(entries) => f.debug_map().entries(entries.iter()).finish(),
            Self::Func(lambda) => Debug::fmt(lambda, f),
            other => Display::fmt(other, f),
        }
    }
}

/// Structural equality. Functions still compare by reference.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Func(a), Self::Func(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

/// One argument slot of a call.
///
/// An open slot defers its position to a later call. A bound `undefined`
/// is treated exactly like an open slot.
#[derive(Clone, Default, PartialEq)]
pub enum Arg {
    /// Nothing supplied yet.
    #[default]
    Open,
    /// A supplied value.
    Bound(Value),
}

impl Arg {
    /// Whether the slot still waits for a value.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open | Self::Bound(Value::Undefined))
    }

    /// The slot's value, `undefined` if it is open.
    pub fn value(&self) -> &Value {
        match self {
            Self::Open => UNDEFINED,
            Self::Bound(value) => value,
        }
    }

    /// Turn the slot into its value, `undefined` if it is open.
    pub fn into_value(self) -> Value {
        match self {
            Self::Open => Value::Undefined,
            Self::Bound(value) => value,
        }
    }

    /// Bind each of the values to a slot.
    pub fn bind_all(values: &[Value]) -> Vec<Arg> {
        values.iter().cloned().map(Self::Bound).collect()
    }
}

impl Debug for Arg {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Open => f.pad("_"),
            Self::Bound(value) => Debug::fmt(value, f),
        }
    }
}

impl Display for Arg {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.is_open() { f.pad("_") } else { Display::fmt(self.value(), f) }
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Self::Bound(value)
    }
}

macro_rules! conversions {
    ($($ty:ty => |$v:ident| $e:expr),* $(,)?) => {$(
        impl From<$ty> for Value {
            fn from($v: $ty) -> Self {
                $e
            }
        }

        impl From<$ty> for Arg {
            fn from(value: $ty) -> Self {
                Self::Bound(value.into())
            }
        }
    )*};
}

conversions! {
    bool => |v| Value::Bool(v),
    f64 => |v| Value::Number(v),
    i32 => |v| Value::Number(v.into()),
    u32 => |v| Value::Number(v.into()),
    i64 => |v| Value::Number(v as f64),
    usize => |v| Value::Number(v as f64),
    char => |v| Value::Str(v.to_string().into()),
    &str => |v| Value::Str(v.into()),
    String => |v| Value::Str(v.into()),
    Rc<str> => |v| Value::Str(v),
    Vec<Value> => |v| Value::List(v.into()),
    Lambda => |v| Value::Func(v),
}
