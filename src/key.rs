use std::fmt::Write;
use std::rc::Rc;

use crate::value::Value;

/// How a memoized call's arguments are looked up, chosen per call from the
/// shapes of the arguments.
pub enum Key {
    /// A single text argument, used as is.
    Text(Rc<str>),
    /// Only scalar arguments, encoded into one string.
    Scalars(String),
    /// Anything else. Found by comparing argument lists by identity.
    General,
}

impl Key {
    /// Pick the key for an argument list.
    pub fn of(args: &[Value]) -> Self {
        match args {
            [Value::Str(text)] => Self::Text(text.clone()),
            _ if args.iter().all(Value::is_scalar) => Self::Scalars(encode(args)),
            _ => Self::General,
        }
    }
}

/// Encode scalars as `<tag><length>:<text>;` each. The length keeps texts
/// containing delimiters from running into their neighbours.
fn encode(args: &[Value]) -> String {
    let mut key = String::new();
    for arg in args {
        let tag = match arg {
            Value::Undefined => 'u',
            Value::Null => 'n',
            Value::Bool(_) => 'b',
            Value::Number(_) => 'd',
            Value::Str(_) => 's',
            Value::List(_) | Value::Record(_) | Value::Func(_) => '?',
        };
        let text = arg.to_string();
        write!(key, "{tag}{}:{text};", text.len()).ok();
    }
    key
}
