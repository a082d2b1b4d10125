use lambdas::{Arg, Error, Lambda, Value, args, lambda, with_arity, wrap};

/// A native function whose result depends on every argument and its
/// position.
fn weigh(arity: usize) -> Lambda {
    lambda(Lambda::native("weigh", arity, |args| {
        let sum = args
            .iter()
            .enumerate()
            .map(|(i, value)| (i as f64 + 1.0) * value.to_number())
            .sum::<f64>();
        Ok(Value::from(sum))
    }))
    .unwrap()
}

#[quickcheck_macros::quickcheck]
fn test_split_quickcheck(values: Vec<i16>, cuts: Vec<u8>) -> bool {
    let values: Vec<Value> = values.into_iter().take(8).map(|v| i32::from(v).into()).collect();
    let target = weigh(values.len());
    let direct = target.call(&Arg::bind_all(&values)).unwrap();

    let mut current = Value::Func(target);
    let mut rest = values.as_slice();
    let mut cuts = cuts.into_iter();
    loop {
        let n = match cuts.next() {
            Some(cut) if !rest.is_empty() => 1 + usize::from(cut) % rest.len(),
            _ => rest.len(),
        };

        let (chunk, tail) = rest.split_at(n);
        current = current.call(&Arg::bind_all(chunk)).unwrap();
        rest = tail;
        if rest.is_empty() {
            break;
        }

        if !matches!(current, Value::Func(_)) {
            return false;
        }
    }

    current == direct
}

#[test]
fn test_expressions() {
    let add = lambda("_ + _").unwrap();
    assert_eq!(add.call(&args![1, 2]).unwrap(), Value::from(3));
    assert_eq!(add.call(&args![1]).unwrap().call(&args![2]).unwrap(), Value::from(3));
    assert_eq!(lambda("++_").unwrap().call(&args![3]).unwrap(), Value::from(4));
}

#[test]
fn test_open_slots() {
    let sub = lambda("_ - _").unwrap();
    assert_eq!(sub.call(&args![_, 1]).unwrap().call(&args![10]).unwrap(), Value::from(9));

    let open = sub.call(&args![_, _]).unwrap();
    let first = open.call(&args![10]).unwrap();
    assert_eq!(first.call(&args![1]).unwrap(), Value::from(9));

    // A bound undefined leaves its slot open.
    let undefined = sub.call(&[Value::Undefined.into(), 1.into()]).unwrap();
    assert_eq!(undefined.call(&args![10]).unwrap(), Value::from(9));

    // Open actuals do not fill open slots.
    let still = sub.call(&args![_, 1]).unwrap().call(&args![_]).unwrap();
    assert!(matches!(still, Value::Func(ref f) if f.arity() == 1));
    assert_eq!(still.call(&args![10]).unwrap(), Value::from(9));
}

#[test]
fn test_bound_slots_are_shared() {
    let add = lambda("_ + _").unwrap();
    let inc = add.call(&args![1]).unwrap();
    assert_eq!(inc.call(&args![2]).unwrap(), Value::from(3));
    assert_eq!(inc.call(&args![5]).unwrap(), Value::from(6));
    assert_eq!(inc.call(&args!["a"]).unwrap(), Value::from("1a"));
}

#[test]
fn test_arity() {
    let add = lambda("_ + _ + _").unwrap();
    assert_eq!(add.arity(), 3);
    let Value::Func(partial) = add.call(&args![1, _, 3]).unwrap() else { panic!() };
    assert_eq!(partial.arity(), 1);

    // Surplus arguments are passed along.
    assert_eq!(lambda("_ + _").unwrap().call(&args![1, 2, 3]).unwrap(), Value::from(3));

    // Without placeholders, a call without arguments runs at once.
    assert_eq!(lambda("6 * 7").unwrap().call(&args![]).unwrap(), Value::from(42));
}

#[test]
fn test_with_arity() {
    let sum = Lambda::native("sum", 0, |args| {
        Ok(Value::from(args.iter().map(Value::to_number).sum::<f64>()))
    });

    let three = lambda(with_arity(3, sum.clone()).unwrap()).unwrap();
    assert_eq!(three.arity(), 3);
    let one = three.call(&args![1]).unwrap();
    let two = one.call(&args![2]).unwrap();
    assert_eq!(two.call(&args![3]).unwrap(), Value::from(6));
    assert_eq!(three.to_string(), "wrap(sum)");

    assert_eq!(with_arity(0, sum.clone()).unwrap().arity(), 0);
    assert!(matches!(with_arity(-1, sum), Err(Error::Arity(-1))));
}

#[test]
fn test_wrapping_is_idempotent() {
    let add = lambda("_ + _").unwrap();
    assert!(lambda(add.clone()).unwrap().ptr_eq(&add));

    let Value::Func(partial) = add.call(&args![1]).unwrap() else { panic!() };
    assert!(lambda(partial.clone()).unwrap().ptr_eq(&partial));
}

#[test]
fn test_wrap() {
    let pair = Lambda::native("pair", 2, |args| Ok(Value::list(args.iter().cloned())));
    let wrapped = wrap(pair, "pair of two");
    assert!(wrapped.is_wrapper());
    assert_eq!(wrapped.to_string(), "wrap(pair of two)");

    let half = wrapped.call(&args!["x"]).unwrap();
    assert_eq!(half.to_string(), "wrap(pair of two)(x)");
    assert_eq!(half.call(&args!["y"]).unwrap(), Value::list(["x", "y"]));
}

#[test]
fn test_display() {
    let add = lambda("_ + _").unwrap();
    assert_eq!(add.to_string(), "wrap('_ + _')");
    assert_eq!(add.call(&args![1]).unwrap().to_string(), "wrap('_ + _')(1)");
    assert_eq!(add.call(&args![_, 2]).unwrap().to_string(), "wrap('_ + _')(_)(2)");
    assert_eq!(format!("{add:?}"), "Lambda(wrap('_ + _'), arity: 2)");
}

#[test]
fn test_construction_error() {
    let err = lambda(42).unwrap_err();
    assert!(matches!(err, Error::Construction("number")));
    assert_eq!(
        err.to_string(),
        "invalid function for lambda: expected text or a function, found number"
    );
    assert!(matches!(lambda(Value::Null), Err(Error::Construction("null"))));
    assert!(matches!(lambda(Value::list([1])), Err(Error::Construction("list"))));
}

#[test]
fn test_errors_propagate() {
    let method = lambda("_.nope()").unwrap();
    let err = method.call(&args![1]).unwrap_err();
    assert_eq!(err.to_string(), "type error: number.nope is not a function");

    let thrower = lambda(Lambda::native("thrower", 1, |args| {
        Err(Error::Thrown(args[0].clone()))
    }))
    .unwrap();
    let err = thrower.call(&args!["oops"]).unwrap_err();
    assert!(matches!(err, Error::Thrown(Value::Str(ref s)) if &**s == "oops"));

    // The wrapper stays usable after a failure.
    let div = lambda("_ / _").unwrap();
    let halve = div.call(&args![_, 2]).unwrap();
    assert!(lambda("_.a").unwrap().call(&[Value::Null.into()]).is_err());
    assert_eq!(halve.call(&args![9]).unwrap(), Value::from(4.5));
}
