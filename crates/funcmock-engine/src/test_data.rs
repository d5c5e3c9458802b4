//! Free-form scratch storage attached to a mock.

use funcmock_core::{IntoValue, Slot, Value};
use rustc_hash::FxHashMap;

/// String-keyed values a test can stash on a mock.
#[derive(Debug, Clone, Default)]
pub struct TestData {
    entries: FxHashMap<String, Value>,
}

impl TestData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, returning the previous one under `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl IntoValue) -> Option<Value> {
        self.entries.insert(key.into(), value.into_boxed_value())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get a value converted to `T`; `None` if missing or of another type.
    pub fn get_as<T: Slot>(&self, key: &str) -> Option<T> {
        self.entries.get(key).and_then(|v| T::from_value(v).ok())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut data = TestData::new();
        assert!(data.is_empty());

        assert!(data.set("name", "alice").is_none());
        data.set("count", 3u32);

        assert_eq!(data.len(), 2);
        assert_eq!(data.get_as::<String>("name").as_deref(), Some("alice"));
        assert_eq!(data.get_as::<u32>("count"), Some(3));
        assert_eq!(data.get_as::<bool>("count"), None);
        assert_eq!(data.get_as::<u32>("missing"), None);

        let previous = data.set("count", 4u32);
        assert_eq!(previous, Some(Value::UInt(3)));

        assert_eq!(data.remove("name"), Some(Value::String("alice".into())));
        assert!(!data.contains_key("name"));
    }
}
