use std::cmp::Ordering;

use crate::error::Result;
use crate::syntax::{BinOp, Expr, UnOp};
use crate::value::{Arg, Value};

/// Evaluate an expression with the given argument slots bound to its
/// positions. Positions without a slot read as `undefined`.
pub fn eval(expr: &Expr, args: &[Arg]) -> Result<Value> {
    Ok(match expr {
        Expr::Literal(value) => value.clone(),
        Expr::Arg(position) => args.get(*position).map_or(Value::Undefined, |arg| arg.value().clone()),
        Expr::List(items) => Value::List(all(items, args)?.into()),
        Expr::Unary(op, operand) => unary(*op, &eval(operand, args)?),
        Expr::Binary(BinOp::And, lhs, rhs) => {
            let lhs = eval(lhs, args)?;
            if lhs.truthy() { eval(rhs, args)? } else { lhs }
        }
        Expr::Binary(BinOp::Or, lhs, rhs) => {
            let lhs = eval(lhs, args)?;
            if lhs.truthy() { lhs } else { eval(rhs, args)? }
        }
        Expr::Binary(op, lhs, rhs) => binary(*op, &eval(lhs, args)?, &eval(rhs, args)?),
        Expr::Conditional(condition, then, otherwise) => {
            if eval(condition, args)?.truthy() {
                eval(then, args)?
            } else {
                eval(otherwise, args)?
            }
        }
        Expr::Member(target, name) => eval(target, args)?.property(name)?,
        Expr::Index(target, key) => eval(target, args)?.index(&eval(key, args)?)?,
        Expr::Call(callee, items) => {
            let callee = eval(callee, args)?;
            callee.call(&Arg::bind_all(&all(items, args)?))?
        }
        Expr::Method(target, name, items) => {
            let target = eval(target, args)?;
            target.method(name, &all(items, args)?)?
        }
    })
}

/// Evaluate expressions left to right.
fn all(exprs: &[Expr], args: &[Arg]) -> Result<Vec<Value>> {
    exprs.iter().map(|expr| eval(expr, args)).collect()
}

fn unary(op: UnOp, value: &Value) -> Value {
    match op {
        UnOp::Not => Value::Bool(!value.truthy()),
        UnOp::BitNot => Value::from(!to_int32(value.to_number())),
        UnOp::Neg => Value::Number(-value.to_number()),
        UnOp::Pos => Value::Number(value.to_number()),
        UnOp::Inc => Value::Number(value.to_number() + 1.0),
        UnOp::Dec => Value::Number(value.to_number() - 1.0),
        UnOp::TypeOf => Value::from(value.type_of()),
    }
}

fn binary(op: BinOp, lhs: &Value, rhs: &Value) -> Value {
    let numeric = |f: fn(f64, f64) -> f64| Value::Number(f(lhs.to_number(), rhs.to_number()));
    let integral = |f: fn(i32, i32) -> i32| {
        Value::from(f(to_int32(lhs.to_number()), to_int32(rhs.to_number())))
    };
    let shift = || to_uint32(rhs.to_number()) & 31;

    match op {
        BinOp::Add => {
            let (lhs, rhs) = (lhs.to_primitive(), rhs.to_primitive());
            if matches!(lhs, Value::Str(_)) || matches!(rhs, Value::Str(_)) {
                Value::from(format!("{lhs}{rhs}"))
            } else {
                Value::Number(lhs.to_number() + rhs.to_number())
            }
        }
        BinOp::Sub => numeric(|a, b| a - b),
        BinOp::Mul => numeric(|a, b| a * b),
        BinOp::Div => numeric(|a, b| a / b),
        BinOp::Rem => numeric(|a, b| a % b),
        BinOp::Eq => Value::Bool(lhs.loosely_equals(rhs)),
        BinOp::Ne => Value::Bool(!lhs.loosely_equals(rhs)),
        BinOp::StrictEq => Value::Bool(lhs.identical(rhs)),
        BinOp::StrictNe => Value::Bool(!lhs.identical(rhs)),
        BinOp::Lt => Value::Bool(compare(lhs, rhs).is_some_and(Ordering::is_lt)),
        BinOp::Gt => Value::Bool(compare(lhs, rhs).is_some_and(Ordering::is_gt)),
        BinOp::Le => Value::Bool(compare(lhs, rhs).is_some_and(Ordering::is_le)),
        BinOp::Ge => Value::Bool(compare(lhs, rhs).is_some_and(Ordering::is_ge)),
        BinOp::BitAnd => integral(|a, b| a & b),
        BinOp::BitOr => integral(|a, b| a | b),
        BinOp::BitXor => integral(|a, b| a ^ b),
        BinOp::Shl => Value::from(to_int32(lhs.to_number()).wrapping_shl(shift())),
        BinOp::Shr => Value::from(to_int32(lhs.to_number()) >> shift()),
        BinOp::UShr => Value::from(to_uint32(lhs.to_number()) >> shift()),
        BinOp::And => if lhs.truthy() { rhs.clone() } else { lhs.clone() },
        BinOp::Or => if lhs.truthy() { lhs.clone() } else { rhs.clone() },
    }
}

/// Order two values. Text compares lexicographically, everything else
/// numerically. `None` if either side is NaN.
fn compare(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs.to_primitive(), rhs.to_primitive()) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(&b)),
        (a, b) => a.to_number().partial_cmp(&b.to_number()),
    }
}

/// Wrap a number into 32 unsigned bits.
fn to_uint32(n: f64) -> u32 {
    if n.is_finite() { n.trunc().rem_euclid(4_294_967_296.0) as u32 } else { 0 }
}

/// Wrap a number into 32 signed bits.
fn to_int32(n: f64) -> i32 {
    to_uint32(n) as i32
}
