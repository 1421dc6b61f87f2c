//! Request-scoped context carried through every log call
//!
//! This module provides:
//! - `Context`: an immutable, cheaply cloneable chain of key/value bindings
//! - `ContextKey`: string keys or marker-type keys
//!
//! Binding a value never mutates a context; it returns a child that shares
//! its parent's bindings. Lookups walk from the newest binding to the root,
//! so a child binding shadows an older one with the same key.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type Value = dyn Any + Send + Sync;

/// Key identifying a context binding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextKey {
    /// Plain string key, e.g. `"request_id"`
    Named(Cow<'static, str>),
    /// Key derived from a marker type, private to whoever defines the type
    Typed { id: TypeId, name: &'static str },
}

impl ContextKey {
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        ContextKey::Named(name.into())
    }

    pub fn of<K: 'static>() -> Self {
        ContextKey::Typed {
            id: TypeId::of::<K>(),
            name: std::any::type_name::<K>(),
        }
    }

    fn is_named(&self, key: &str) -> bool {
        matches!(self, ContextKey::Named(name) if name == key)
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKey::Named(name) => f.write_str(name),
            ContextKey::Typed { name, .. } => write!(f, "<{}>", name),
        }
    }
}

struct Binding {
    key: ContextKey,
    value: Arc<Value>,
    parent: Option<Arc<Binding>>,
}

/// Opaque key/value carrier handed to every extractor
///
/// Thread-safe: values are `Send + Sync`, so a context can be moved to or
/// shared with other threads.
///
/// # Example
///
/// ```
/// use context_logger::Context;
///
/// struct RequestId;
///
/// let ctx = Context::background()
///     .with_value("user", "alice")
///     .with_typed::<RequestId, _>(String::from("req-42"));
///
/// assert_eq!(ctx.get_str("user"), Some("alice"));
/// assert_eq!(ctx.typed_str::<RequestId>(), Some("req-42"));
/// assert_eq!(ctx.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Binding>>,
}

impl Context {
    /// The empty root context
    pub fn background() -> Self {
        Self::default()
    }

    /// Return a child context with `key` bound to `value`
    #[must_use]
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Any + Send + Sync,
    {
        self.bind(ContextKey::Named(key.into()), Arc::new(value))
    }

    /// Return a child context with the marker type `K` bound to `value`
    #[must_use]
    pub fn with_typed<K, V>(&self, value: V) -> Self
    where
        K: 'static,
        V: Any + Send + Sync,
    {
        self.bind(ContextKey::of::<K>(), Arc::new(value))
    }

    fn bind(&self, key: ContextKey, value: Arc<Value>) -> Self {
        Self {
            head: Some(Arc::new(Binding {
                key,
                value,
                parent: self.head.clone(),
            })),
        }
    }

    fn find(&self, matches: impl Fn(&ContextKey) -> bool) -> Option<&Value> {
        let mut node = self.head.as_deref();
        while let Some(binding) = node {
            if matches(&binding.key) {
                return Some(binding.value.as_ref());
            }
            node = binding.parent.as_deref();
        }
        None
    }

    /// Look up the nearest binding for `key` and downcast it to `V`
    ///
    /// Returns `None` if the key is unbound or the nearest binding holds a
    /// different type.
    pub fn value<V: Any>(&self, key: &str) -> Option<&V> {
        self.find(|k| k.is_named(key))?.downcast_ref::<V>()
    }

    /// Look up the nearest binding for the marker type `K`
    pub fn typed_value<K: 'static, V: Any>(&self) -> Option<&V> {
        let key = ContextKey::of::<K>();
        self.find(|k| *k == key)?.downcast_ref::<V>()
    }

    /// String view of a binding stored as `String` or `&'static str`
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.find(|k| k.is_named(key)).and_then(as_str)
    }

    /// String view of a marker-type binding stored as `String` or `&'static str`
    pub fn typed_str<K: 'static>(&self) -> Option<&str> {
        let key = ContextKey::of::<K>();
        self.find(|k| *k == key).and_then(as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(|k| k.is_named(key)).is_some()
    }

    /// Keys of every binding, newest first (shadowed keys included)
    pub fn keys(&self) -> Vec<&ContextKey> {
        let mut keys = Vec::new();
        let mut node = self.head.as_deref();
        while let Some(binding) = node {
            keys.push(&binding.key);
            node = binding.parent.as_deref();
        }
        keys
    }

    /// Number of bindings in the chain
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut node = self.head.as_deref();
        while let Some(binding) = node {
            count += 1;
            node = binding.parent.as_deref();
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

fn as_str(value: &Value) -> Option<&str> {
    value
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| value.downcast_ref::<&'static str>().copied())
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field(
                "keys",
                &self.keys().iter().map(|k| k.to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RequestId;
    struct TraceId;

    #[test]
    fn test_background_is_empty() {
        let ctx = Context::background();
        assert!(ctx.is_empty());
        assert_eq!(ctx.len(), 0);
        assert_eq!(ctx.get_str("anything"), None);
    }

    #[test]
    fn test_with_value_does_not_mutate_parent() {
        let parent = Context::background().with_value("user", "alice");
        let child = parent.with_value("tenant", String::from("acme"));

        assert_eq!(parent.len(), 1);
        assert!(!parent.contains_key("tenant"));
        assert_eq!(child.get_str("tenant"), Some("acme"));
        assert_eq!(child.get_str("user"), Some("alice"));
    }

    #[test]
    fn test_newest_binding_shadows() {
        let ctx = Context::background()
            .with_value("stage", "outer")
            .with_value("stage", "inner");

        assert_eq!(ctx.get_str("stage"), Some("inner"));
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_typed_keys_are_distinct() {
        let ctx = Context::background()
            .with_typed::<RequestId, _>(String::from("req-1"))
            .with_typed::<TraceId, _>("trace-9");

        assert_eq!(ctx.typed_str::<RequestId>(), Some("req-1"));
        assert_eq!(ctx.typed_str::<TraceId>(), Some("trace-9"));
        assert_eq!(ctx.get_str("RequestId"), None);
    }

    #[test]
    fn test_typed_value_lookup() {
        let ctx = Context::background()
            .with_typed::<RequestId, _>(7_u64)
            .with_typed::<TraceId, _>(String::from("trace-1"))
            .with_typed::<RequestId, _>(8_u64);

        assert_eq!(ctx.typed_value::<RequestId, u64>(), Some(&8));
        assert_eq!(ctx.typed_value::<RequestId, u32>(), None);
        assert_eq!(ctx.typed_value::<TraceId, String>().map(String::as_str), Some("trace-1"));
        assert_eq!(ctx.typed_str::<RequestId>(), None);
    }

    #[test]
    fn test_wrong_type_lookup_is_none() {
        let ctx = Context::background().with_value("attempt", 3_u32);

        assert_eq!(ctx.value::<u32>("attempt"), Some(&3));
        assert_eq!(ctx.value::<i64>("attempt"), None);
        assert_eq!(ctx.get_str("attempt"), None);
        assert!(ctx.contains_key("attempt"));
    }

    #[test]
    fn test_context_crosses_threads() {
        let ctx = Context::background().with_value("request_id", "abc");
        let handle = std::thread::spawn(move || ctx.get_str("request_id").map(str::to_string));
        assert_eq!(handle.join().unwrap(), Some("abc".to_string()));
    }

    #[test]
    fn test_debug_lists_keys() {
        let ctx = Context::background()
            .with_value("a", 1_i32)
            .with_typed::<RequestId, _>("r");
        let rendered = format!("{:?}", ctx);
        assert!(rendered.contains("\"a\""));
        assert!(rendered.contains("RequestId"));
    }
}
