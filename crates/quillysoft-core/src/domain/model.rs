//! Render model.
//!
//! Templates are rendered against a [`Model`]: an ordered list of named
//! [`Value`]s. Anything that can describe itself as a model implements
//! [`Renderable`]; the engine never inspects a caller's types directly.
//!
//! ## Field order matters
//!
//! Variable substitution walks fields in model order, and a substituted value
//! that itself contains `{{Marker}}` text is eligible for replacement by a
//! later field. [`Model`] therefore keeps insertion order instead of sorting.
//!
//! ## Text and truthiness
//!
//! | Value       | Text              | Truthy         |
//! |-------------|-------------------|----------------|
//! | `Null`      | `""`              | no             |
//! | `Bool(b)`   | `"true"`/`"false"`| `b`            |
//! | `Integer`   | decimal           | yes            |
//! | `Float`     | `Display`         | yes            |
//! | `Text(s)`   | `s`               | `!s.is_empty()`|
//! | `List(_)`   | `""`              | yes            |

use std::fmt;

/// A dynamically typed model value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Ordered items for `{{#each}}` regions.
    List(Vec<Model>),
}

impl Value {
    /// Textual representation used by variable substitution.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null | Self::List(_) => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Guard evaluation for `{{#if}}` regions.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Text(s) => !s.is_empty(),
            Self::Integer(_) | Self::Float(_) | Self::List(_) => true,
        }
    }

    /// Items of a list value, `None` for anything else.
    pub fn as_list(&self) -> Option<&[Model]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Vec<Model>> for Value {
    fn from(items: Vec<Model>) -> Self {
        Self::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Ordered field name → value mapping.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    fields: Vec<(String, Value)>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Model::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field. An existing field keeps its position; a new one is appended.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Overlay `other` on top of this model; `other` wins on conflicts.
    pub fn merge(&mut self, other: Model) {
        for (name, value) in other.fields {
            self.set(name, value);
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Model
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut model = Model::new();
        for (k, v) in iter {
            model.set(k, v);
        }
        model
    }
}

/// Anything that can be rendered into a template.
///
/// Implementors declare their fields explicitly, in the order they should be
/// substituted.
pub trait Renderable {
    fn to_model(&self) -> Model;
}

impl Renderable for Model {
    fn to_model(&self) -> Model {
        self.clone()
    }
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_model(&self) -> Model {
        (**self).to_model()
    }
}

impl Renderable for serde_json::Map<String, serde_json::Value> {
    fn to_model(&self) -> Model {
        self.iter().map(|(k, v)| (k.as_str(), json_value(v))).collect()
    }
}

/// Objects expose their keys; any other JSON value is an empty model.
impl Renderable for serde_json::Value {
    fn to_model(&self) -> Model {
        match self {
            serde_json::Value::Object(map) => map.to_model(),
            _ => Model::new(),
        }
    }
}

fn json_value(v: &serde_json::Value) -> Value {
    use serde_json::Value as J;

    match v {
        J::Null => Value::Null,
        J::Bool(b) => Value::Bool(*b),
        J::Number(n) => n
            .as_i64()
            .map(Value::Integer)
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or_else(|| Value::Text(n.to_string())),
        J::String(s) => Value::Text(s.clone()),
        // Non-object items still produce one (empty) repetition each.
        J::Array(items) => Value::List(items.iter().map(Renderable::to_model).collect()),
        J::Object(_) => Value::Text(v.to_string()),
    }
}
