extern crate proc_macro;

macro_rules! bail {
    ($item:expr, $fmt:literal $($tts:tt)*) => {
        return Err(Error::new_spanned(
            &$item,
            format!(concat!("lambdas: ", $fmt) $($tts)*)
        ))
    }
}

mod native;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Error, Result, parse_quote};

/// Turn a function into a native lambda.
///
/// The function becomes a constructor without parameters that returns a
/// `Lambda` whose arity is the number of `Value` parameters. A trailing
/// `&[Value]` parameter receives every argument after those.
///
/// ```ignore
/// use lambdas::{Result, Value, native};
///
/// /// Join all arguments with a separator.
/// #[native(name = "join")]
/// fn join(separator: Value, parts: &[Value]) -> Result<Value> {
///     let parts: Vec<String> = parts.iter().map(ToString::to_string).collect();
///     Ok(Value::from(parts.join(&separator.to_string())))
/// }
///
/// assert_eq!(join().arity(), 1);
/// ```
#[proc_macro_attribute]
pub fn native(stream: TokenStream, item: TokenStream) -> TokenStream {
    let meta = syn::parse_macro_input!(stream as native::Meta);
    let func = syn::parse_macro_input!(item as syn::ItemFn);
    native::expand(&meta, func)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
