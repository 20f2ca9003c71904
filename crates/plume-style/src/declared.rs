//! Declared (author) style.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An element's declared style: camelCase property names mapped to raw
/// values, in declaration order.
///
/// Later declarations override earlier ones, so a longhand written after its
/// shorthand wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclaredStyle(Map<String, Value>);

impl DeclaredStyle {
    /// An empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, mainly for tests and programmatic trees.
    #[must_use]
    pub fn with(mut self, property: &str, value: impl Into<Value>) -> Self {
        let _ = self.0.insert(property.to_string(), value.into());
        self
    }

    /// The declared value of `property`, if any.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.0.get(property)
    }

    /// Iterate declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for DeclaredStyle {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
