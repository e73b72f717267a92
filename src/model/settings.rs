//! Presentation toggles shared with descendant views.

use serde_json::{Map, Value};

/// Key of the toggle views set while they show a header image.
pub const HAS_IMAGE: &str = "has_image";

/// Key of the compact row layout toggle.
pub const COMPACT: &str = "compact";

/// Open record of presentation toggles.
///
/// Not a schema: any key may be merged in and no value is validated.
/// The shell starts from [`LayoutSettings::default`] and only ever
/// shallow-merges partial records into it.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings(Map<String, Value>);

impl Default for LayoutSettings {
    fn default() -> Self {
        let mut map = Map::new();
        map.insert(HAS_IMAGE.to_string(), Value::Bool(false));
        Self(map)
    }
}

impl LayoutSettings {
    /// A record with no keys, used to build partial merges.
    pub fn empty() -> Self {
        Self(Map::new())
    }

    /// Builder: set `key` to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up a toggle.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a boolean toggle. Non-boolean values read as `None`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Shallow merge: every key in `partial` overwrites the key here.
    /// Keys absent from `partial` are left untouched.
    pub fn merge(&mut self, partial: LayoutSettings) {
        for (key, value) in partial.0 {
            self.0.insert(key, value);
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no keys.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for LayoutSettings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
