use lambdas::{Arg, Lambda, Result, Value, args, lambda, ops};

fn call(func: Result<Lambda>, args: &[Arg]) -> Value {
    func.unwrap().call(args).unwrap()
}

fn list() -> Value {
    Value::list([5, 1, 6, 4, 2, 3])
}

fn record() -> Value {
    Value::record([("a", 42), ("b", 66), ("c", 84)])
}

#[test]
fn test_values() {
    assert_eq!(call(ops::id(), &args![42]), Value::from(42));
    assert_eq!(call(ops::id(), &args![]).call(&args![42]).unwrap(), Value::from(42));
    assert_eq!(call(ops::noop(), &args![]), Value::Undefined);
}

#[test]
fn test_properties() {
    assert_eq!(call(ops::has(), &args![record(), "a"]), Value::from(true));
    assert_eq!(call(ops::has(), &args![record(), "d"]), Value::from(false));
    assert_eq!(call(ops::get(), &args![record()]).call(&args!["b"]).unwrap(), Value::from(66));
    assert_eq!(call(ops::get(), &args![record(), "b"]), Value::from(66));
    assert_eq!(call(ops::get(), &args![record(), "d"]), Value::Undefined);
}

#[test]
fn test_bind() {
    let sub = || Arg::from(lambda("_1.a - _2").unwrap());
    let seven = |value: Value| value.call(&args![7]).unwrap();

    assert_eq!(seven(call(ops::bind(), &[sub(), record().into()])), Value::from(35));

    let bound = call(ops::bind(), &[sub()]);
    assert_eq!(seven(bound.call(&[record().into()]).unwrap()), Value::from(35));

    let bound = call(ops::bind(), &[sub(), Arg::Open]);
    assert_eq!(seven(bound.call(&[record().into()]).unwrap()), Value::from(35));

    let bound = call(ops::bind(), &[sub()]).call(&args![]).unwrap();
    assert_eq!(seven(bound.call(&[record().into()]).unwrap()), Value::from(35));

    let bound = call(ops::bind(), &args![]).call(&[sub(), record().into()]).unwrap();
    assert_eq!(seven(bound), Value::from(35));

    let flipped = call(ops::flip(), &args![ops::bind().unwrap()]);
    assert_eq!(seven(flipped.call(&[record().into(), sub()]).unwrap()), Value::from(35));
}

#[test]
fn test_curry() {
    let div = || Arg::from(lambda("_ / _").unwrap());
    assert_eq!(call(ops::curry(), &[div()]).call(&args![6, 2]).unwrap(), Value::from(3));
    assert_eq!(call(ops::curry(), &[div(), 6.into()]).call(&args![2]).unwrap(), Value::from(3));
    assert_eq!(
        call(ops::curry(), &[div(), 6.into(), 2.into()]).call(&args![]).unwrap(),
        Value::from(3)
    );
    assert!(ops::curry().unwrap().call(&args![]).is_err());
}

#[test]
fn test_arrows() {
    let mul = Arg::from(lambda("_ * _").unwrap());
    let div = Arg::from(lambda("_ / _").unwrap());
    let fanned = call(ops::fanout(), &[mul, div]);
    assert_eq!(fanned.call(&args![10, 5]).unwrap(), Value::list([50, 2]));

    let inc = Arg::from(ops::inc().unwrap());
    let square = Arg::from(ops::square().unwrap());
    let composed = call(ops::compose(), &[inc, square]);
    assert_eq!(composed.call(&args![3]).unwrap(), Value::from(10));

    let identity = call(ops::compose(), &args![]);
    assert_eq!(identity.call(&args!["same"]).unwrap(), Value::from("same"));

    let add = ops::add().unwrap();
    assert_eq!(call(ops::apply(), &args![add, Value::list([1, 2])]), Value::from(3));
}

#[test]
fn test_math() {
    assert_eq!(call(ops::square(), &args![4]), Value::from(16));
    assert_eq!(call(ops::cube(), &args![6]), Value::from(216));
    assert_eq!(call(ops::power(), &args![2, 10]), Value::from(1024));
    assert_eq!(call(ops::inc(), &args![3]), Value::from(4));
    assert_eq!(call(ops::dec(), &args![3]), Value::from(2));
    assert_eq!(call(ops::rem(), &args![-7, 3]), Value::from(-1));
    assert_eq!(call(ops::sub(), &args![_, 1]).call(&args![10]).unwrap(), Value::from(9));
    assert_eq!(call(ops::add(), &args!["a", 1]), Value::from("a1"));
    assert_eq!(call(ops::add(), &args![Value::list([1, 2]), 3]), Value::from("1,23"));
    assert!(call(ops::div(), &args![1, 0]).to_number().is_infinite());
}

#[test]
fn test_bitwise() {
    assert_eq!(call(ops::bit_not(), &args![5]), Value::from(-6));
    assert_eq!(call(ops::bit_or(), &args![6, 3]), Value::from(7));
    assert_eq!(call(ops::bit_and(), &args![6, 3]), Value::from(2));
    assert_eq!(call(ops::bit_xor(), &args![6, 3]), Value::from(5));
    assert_eq!(call(ops::lshift(), &args![1, 4]), Value::from(16));
    assert_eq!(call(ops::rshift(), &args![-16, 2]), Value::from(-4));
    assert_eq!(call(ops::zshift(), &args![-16, 28]), Value::from(15));
    assert_eq!(call(ops::lshift(), &args![_, 1]).call(&args![5]).unwrap(), Value::from(10));
}

#[test]
fn test_parity() {
    assert_eq!(call(ops::even(), &args![42]), Value::from(true));
    assert_eq!(call(ops::even(), &args![43]), Value::from(false));
    assert_eq!(call(ops::odd(), &args![84]), Value::from(false));
    assert_eq!(call(ops::odd(), &args![85]), Value::from(true));
}

#[test]
fn test_logic() {
    assert_eq!(call(ops::not(), &args![0]), Value::from(true));
    assert_eq!(call(ops::and(), &args![1, "x"]), Value::from("x"));
    assert_eq!(call(ops::and(), &args![false, "x"]), Value::from(false));
    assert_eq!(call(ops::or(), &args![Value::Null, "x"]), Value::from("x"));
    assert_eq!(call(ops::xor(), &args![true, false]), Value::from(true));
    assert_eq!(call(ops::xor(), &args![true, true]), Value::from(false));
    assert_eq!(call(ops::if_else(), &args![true, "yes", "no"]), Value::from("yes"));
    assert_eq!(call(ops::if_else(), &args![0, "yes", "no"]), Value::from("no"));
}

#[test]
fn test_comparisons() {
    assert_eq!(call(ops::eq(), &args!["1", 1]), Value::from(true));
    assert_eq!(call(ops::ne(), &args![Value::Null, Value::Null]), Value::from(false));
    assert_eq!(call(ops::gt(), &args![2, 1]), Value::from(true));
    assert_eq!(call(ops::lt(), &args!["a", "b"]), Value::from(true));
    assert_eq!(call(ops::ge(), &args![1, 1]), Value::from(true));
    assert_eq!(call(ops::le(), &args![2, 1]), Value::from(false));

    let list = list();
    assert_eq!(call(ops::identical(), &args![list.clone(), list.clone()]), Value::from(true));
    assert_eq!(call(ops::identical(), &args![list, self::list()]), Value::from(false));
    assert_eq!(call(ops::identical(), &args!["1", 1]), Value::from(false));

    let list = self::list();
    assert_eq!(call(ops::unidentical(), &args!["1", 1]), Value::from(true));
    assert_eq!(call(ops::unidentical(), &args![list.clone(), list]), Value::from(false));
}

#[test]
fn test_type_of() {
    assert_eq!(call(ops::type_of(), &args![list()]), Value::from("object"));
    assert_eq!(call(ops::type_of(), &args!["a"]), Value::from("string"));
    assert_eq!(call(ops::type_of(), &args![ops::id().unwrap()]), Value::from("function"));
    assert_eq!(call(ops::type_of(), &args![Value::Null]), Value::from("object"));
}

#[test]
fn test_lists() {
    assert_eq!(call(ops::first(), &args![list()]), Value::from(5));
    assert_eq!(call(ops::second(), &args![list()]), Value::from(1));
    assert_eq!(call(ops::third(), &args![list()]), Value::from(6));
    assert_eq!(call(ops::last(), &args![list()]), Value::from(3));

    assert_eq!(call(ops::lead(), &args![list()]), Value::list([5, 1, 6, 4, 2]));
    assert_eq!(call(ops::tail(), &args![list()]), Value::list([1, 6, 4, 2, 3]));
    assert_eq!(call(ops::take(), &args![list(), 2]), Value::list([5, 1]));
    assert_eq!(call(ops::drop(), &args![list(), 3]), Value::list([4, 2, 3]));
    assert_eq!(
        call(ops::part(), &args![list(), 4]),
        Value::list([Value::list([5, 1, 6, 4]), Value::list([2, 3])])
    );
}

#[test]
fn test_list_methods() {
    let longer = Value::list([5, 1, 6, 4, 2, 3, 7]);
    assert_eq!(call(ops::concat(), &args![list(), Value::list([7])]), longer);
    assert_eq!(call(ops::concat(), &args![list(), 7]), longer);
    assert_eq!(call(ops::index_of(), &args![list(), 6]), Value::from(2));
    assert_eq!(call(ops::index_of(), &args![list(), 9]), Value::from(-1));
    assert_eq!(call(ops::join(), &args![list(), "-"]), Value::from("5-1-6-4-2-3"));
    assert_eq!(call(ops::reverse(), &args![list()]), Value::list([3, 2, 4, 6, 1, 5]));
    assert_eq!(call(ops::slice(), &args![list(), 1, 3]), Value::list([1, 6]));
    assert_eq!(call(ops::slice(), &args![list(), 1, -1]), Value::list([1, 6, 4, 2]));
    assert_eq!(call(ops::slice(), &args!["abcd", _, 3]).call(&args![1]).unwrap(), Value::from("bc"));
    assert_eq!(call(ops::value_of(), &args![42]), Value::from(42));
    assert_eq!(call(ops::value_of(), &args!["a"]), Value::from("a"));

    // The list itself is left alone.
    let items = list();
    call(ops::reverse(), &args![items.clone()]);
    assert_eq!(items, list());
}

#[test]
fn test_part_agrees_with_take_and_drop() {
    for n in 0..8 {
        let parts = call(ops::part(), &args![list(), n]);
        let taken = call(ops::take(), &args![list(), n]);
        let dropped = call(ops::drop(), &args![list(), n]);
        assert_eq!(parts, Value::list([taken, dropped]));
    }
}

#[test]
fn test_iteration() {
    let double = lambda("_ * 2").unwrap();
    assert_eq!(
        call(ops::map(), &args![list(), double]),
        Value::list([10, 2, 12, 8, 4, 6])
    );

    let index = lambda("_2").unwrap();
    assert_eq!(call(ops::map(), &args![Value::list(["a", "b"]), index]), Value::list([0, 1]));

    let add = ops::add().unwrap();
    assert_eq!(call(ops::fold(), &args![list(), add.clone()]), Value::from(21));
    assert_eq!(call(ops::fold(), &args![list(), add.clone(), 10]), Value::from(31));
    assert_eq!(call(ops::fold(), &args![Value::list(Vec::<Value>::new()), add]), Value::Undefined);

    let even = ops::even().unwrap();
    assert_eq!(call(ops::count(), &args![list(), even.clone()]), Value::from(3));
    assert_eq!(call(ops::find(), &args![list(), even.clone()]), Value::from(6));
    assert_eq!(call(ops::all(), &args![list(), even.clone()]), Value::from(false));
    assert_eq!(call(ops::any(), &args![list(), even]), Value::from(true));

    let positive = lambda("_ > 0").unwrap();
    assert_eq!(call(ops::all(), &args![list(), positive]), Value::from(true));

    let huge = lambda("_ > 100").unwrap();
    assert_eq!(call(ops::find(), &args![list(), huge.clone()]), Value::Undefined);

    let even = ops::even().unwrap();
    assert_eq!(call(ops::none(), &args![list(), even.clone()]), Value::from(false));
    assert_eq!(call(ops::none(), &args![list(), huge]), Value::from(true));
    assert_eq!(call(ops::one(), &args![list(), even]), Value::from(false));
    assert_eq!(call(ops::one(), &args![list(), lambda("_ > 5").unwrap()]), Value::from(true));
}

#[test]
fn test_each() {
    let scaled = lambda("_1 > 5 ? _1 * 10 : undefined").unwrap();
    assert_eq!(call(ops::each(), &args![list(), scaled]), Value::from(60));

    let fourth = lambda("_2 == 3 ? _1 : undefined").unwrap();
    assert_eq!(call(ops::each(), &args![list(), fourth]), Value::from(4));

    let nothing = lambda("_1 > 100 ? _1 : undefined").unwrap();
    assert_eq!(call(ops::each(), &args![list(), nothing]), Value::Undefined);

    // A falsy result other than undefined still stops the walk.
    let zero = lambda("_1 == 6 ? 0 : undefined").unwrap();
    assert_eq!(call(ops::each(), &args![list(), zero]), Value::from(0));
}

#[test]
fn test_pluck() {
    let records = Value::list([record(), Value::record([("a", 1)])]);
    assert_eq!(call(ops::pluck(), &args![records, "a"]), Value::list([42, 1]));

    let lists = Value::list([list(), Value::list([9])]);
    assert_eq!(call(ops::pluck(), &args![lists.clone(), 0]), Value::list([5, 9]));
    assert_eq!(call(ops::pluck(), &args![lists, "length"]), Value::list([6, 1]));
    assert!(ops::pluck().unwrap().call(&args![Value::list([Value::Null]), "a"]).is_err());
}

#[test]
fn test_zip() {
    let letters = Value::list(["a", "ab", "abc"]);
    let zipped = call(ops::zip(), &args![list(), letters]);
    let pair = |a: Value, b: Value| Value::list([a, b]);
    assert_eq!(
        zipped,
        Value::list([
            pair(5.into(), "a".into()),
            pair(1.into(), "ab".into()),
            pair(6.into(), "abc".into()),
            pair(4.into(), Value::Undefined),
            pair(2.into(), Value::Undefined),
            pair(3.into(), Value::Undefined),
        ])
    );
    assert_eq!(call(ops::zip(), &args![]), Value::list(Vec::<Value>::new()));
    assert!(ops::zip().unwrap().call(&args![1]).is_err());
}

#[test]
fn test_miscellaneous() {
    let none = || Value::list(Vec::<Value>::new());
    assert_eq!(call(ops::empty(), &args![none()]), Value::from(true));
    assert_eq!(call(ops::empty(), &args![list()]), Value::from(false));
    assert_eq!(call(ops::len(), &args![none()]), Value::from(0));
    assert_eq!(call(ops::len(), &args![list()]), Value::from(6));
    assert_eq!(call(ops::str(), &args![none()]), Value::from(""));
    assert_eq!(call(ops::str(), &args![list()]), Value::from("5,1,6,4,2,3"));
}

#[test]
fn test_ops_display() {
    assert_eq!(ops::add().unwrap().to_string(), "wrap('_ + _')");
    assert_eq!(ops::id().unwrap().to_string(), "wrap(id)");
    assert_eq!(ops::square().unwrap().to_string(), "wrap(power)(_)(2)");
    assert_eq!(ops::odd().unwrap().arity(), 1);
    assert_eq!(ops::part().unwrap().arity(), 2);
}
