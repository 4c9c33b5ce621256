use serde_json::Value;

/// The runtime type of a JSON value, as far as validation is concerned.
///
/// Numbers are split into `Integer` (an integer literal) and `Double` (a
/// literal with a fraction or exponent). `Display` renders the phrase used in
/// type mismatch messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Double,
    String,
    Object,
    Array,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_f64() => Self::Double,
            Value::Number(_) => Self::Integer,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => write!(f, "a null value"),
            Self::Bool => write!(f, "a boolean value"),
            Self::Integer => write!(f, "an integer value"),
            Self::Double => write!(f, "a double value"),
            Self::String => write!(f, "a string value"),
            Self::Object => write!(f, "a JSON object"),
            Self::Array => write!(f, "a JSON array"),
        }
    }
}

/// Read-only view of one position in a parsed document.
///
/// A node borrows from the document it was taken from and never outlives it.
/// The type predicates are exact: `is_int` holds only for integer literals,
/// while `is_double` holds for every number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node<'doc> {
    value: &'doc Value,
}

impl<'doc> Node<'doc> {
    pub fn new(value: &'doc Value) -> Self {
        Self { value }
    }

    /// The underlying JSON value.
    pub fn value(&self) -> &'doc Value {
        self.value
    }

    pub fn kind(&self) -> ValueKind {
        ValueKind::of(self.value)
    }

    /// Whether this node is an object with a member called `name`.
    pub fn has_field(&self, name: &str) -> bool {
        self.value
            .as_object()
            .is_some_and(|map| map.contains_key(name))
    }

    /// The member called `name`, if this node is an object that has one.
    pub fn field(&self, name: &str) -> Option<Node<'doc>> {
        self.value.as_object()?.get(name).map(Node::new)
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn is_string(&self) -> bool {
        self.value.is_string()
    }

    pub fn is_int(&self) -> bool {
        self.value.is_i64() || self.value.is_u64()
    }

    pub fn is_double(&self) -> bool {
        self.value.is_number()
    }

    pub fn is_bool(&self) -> bool {
        self.value.is_boolean()
    }

    pub fn is_object(&self) -> bool {
        self.value.is_object()
    }

    pub fn is_array(&self) -> bool {
        self.value.is_array()
    }

    pub fn as_str(&self) -> Option<&'doc str> {
        self.value.as_str()
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.value.as_i64()
    }

    pub fn as_u64(&self) -> Option<u64> {
        self.value.as_u64()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.value.as_f64()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.value.as_bool()
    }

    /// Number of elements of an array or members of an object; zero otherwise.
    pub fn len(&self) -> usize {
        match self.value {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements of an array node in document order. Empty for any other node.
    pub fn elements(&self) -> impl Iterator<Item = Node<'doc>> + use<'doc> {
        self.value
            .as_array()
            .into_iter()
            .flatten()
            .map(Node::new)
    }

    /// Members of an object node. Empty for any other node.
    pub fn fields(&self) -> impl Iterator<Item = (&'doc str, Node<'doc>)> + use<'doc> {
        self.value
            .as_object()
            .into_iter()
            .flatten()
            .map(|(name, value)| (name.as_str(), Node::new(value)))
    }
}
