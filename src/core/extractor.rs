//! Context extractors
//!
//! An extractor turns a [`Context`] into one tag of the log line prefix.
//! Extractors run on the logging thread for every call, in binding order.
//! A panicking extractor is not shielded: the panic reaches the caller of
//! the logging operation and no line is written.

use super::context::Context;
use std::borrow::Cow;
use std::sync::Arc;

/// Shared extractor function
pub type Extractor = Arc<dyn Fn(&Context) -> String + Send + Sync>;

/// Wrap a closure as an [`Extractor`]
///
/// # Example
///
/// ```
/// use context_logger::{extractor, Context};
///
/// let tenant = extractor(|ctx: &Context| ctx.get_str("tenant").unwrap_or("-").to_string());
/// assert_eq!(tenant(&Context::background()), "-");
/// ```
pub fn extractor<F>(f: F) -> Extractor
where
    F: Fn(&Context) -> String + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Render the string value bound to `key`, or an empty tag when absent
pub fn value_or_empty(key: impl Into<Cow<'static, str>>) -> Extractor {
    let key = key.into();
    Arc::new(move |ctx: &Context| ctx.get_str(&key).unwrap_or_default().to_string())
}

/// Render the string value bound to `key`, panicking when it is absent
///
/// Use this when a missing key means the context was built wrong.
pub fn required_value(key: impl Into<Cow<'static, str>>) -> Extractor {
    let key = key.into();
    Arc::new(move |ctx: &Context| match ctx.get_str(&key) {
        Some(value) => value.to_string(),
        None => panic!("context value '{}' is missing or not a string", key),
    })
}

/// Render the string value bound to the marker type `K`, or an empty tag
pub fn typed_or_empty<K: 'static>() -> Extractor {
    Arc::new(|ctx: &Context| ctx.typed_str::<K>().unwrap_or_default().to_string())
}

/// Always render `value`
pub fn constant(value: impl Into<String>) -> Extractor {
    let value = value.into();
    Arc::new(move |_: &Context| value.clone())
}
