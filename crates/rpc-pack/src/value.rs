//! [`Value`]: the dynamically-typed RPC value the packer serializes.

use std::fmt;

/// Category of every [`Value`], numbered the way the RPC layer numbers them.
///
/// Handle categories start at [`EXT_OBJECT_TYPE_SHIFT`]; their MessagePack
/// extension type is the category minus that shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ObjectType {
    Nil = 0,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Dict,
    Callback,
    Buffer,
    Window,
    Tabpage,
}

/// First handle category; extension types count from here.
pub const EXT_OBJECT_TYPE_SHIFT: u8 = ObjectType::Buffer as u8;

/// Kind of remote object a [`Value::Handle`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Buffer,
    Window,
    Tabpage,
}

impl HandleKind {
    pub const ALL: [HandleKind; 3] = [HandleKind::Buffer, HandleKind::Window, HandleKind::Tabpage];

    pub fn object_type(self) -> ObjectType {
        match self {
            HandleKind::Buffer => ObjectType::Buffer,
            HandleKind::Window => ObjectType::Window,
            HandleKind::Tabpage => ObjectType::Tabpage,
        }
    }

    /// MessagePack extension type byte for this kind.
    pub fn ext_type(self) -> i8 {
        (self.object_type() as u8 - EXT_OBJECT_TYPE_SHIFT) as i8
    }

    pub fn from_ext_type(ext_type: i8) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.ext_type() == ext_type)
    }
}

/// Single-owner reference to a callback living on the other side of the
/// RPC boundary.
///
/// The release hook runs exactly once: on [`CallbackRef::release`], or when
/// the reference is dropped unreleased. Packing a [`Value::Callback`] moves
/// the reference out of the tree and releases it.
pub struct CallbackRef {
    id: i32,
    release: Option<Box<dyn FnOnce(i32) + Send>>,
}

impl CallbackRef {
    pub fn new(id: i32, release: impl FnOnce(i32) + Send + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    /// A reference with nothing to release.
    pub fn detached(id: i32) -> Self {
        Self { id, release: None }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.id);
        }
    }
}

impl Drop for CallbackRef {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for CallbackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRef")
            .field("id", &self.id)
            .field("released", &self.release.is_none())
            .finish()
    }
}

impl PartialEq for CallbackRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Dynamically-typed RPC value.
///
/// Arrays and dicts nest arbitrarily deep; the tree is assumed acyclic,
/// which ownership already guarantees. Strings and dict keys are raw byte
/// sequences, not necessarily UTF-8.
#[derive(Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Nil,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(Vec<u8>),
    Array(Vec<Value>),
    Dict(Vec<(Vec<u8>, Value)>),
    Handle(HandleKind, i64),
    Callback(CallbackRef),
}

impl Value {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Value::Nil => ObjectType::Nil,
            Value::Boolean(_) => ObjectType::Boolean,
            Value::Integer(_) => ObjectType::Integer,
            Value::Float(_) => ObjectType::Float,
            Value::String(_) => ObjectType::String,
            Value::Array(_) => ObjectType::Array,
            Value::Dict(_) => ObjectType::Dict,
            Value::Handle(kind, _) => kind.object_type(),
            Value::Callback(_) => ObjectType::Callback,
        }
    }

    pub fn string(s: impl Into<Vec<u8>>) -> Self {
        Value::String(s.into())
    }

    /// Builds a dict from `(key, value)` pairs, keeping their order.
    pub fn dict<K: Into<Vec<u8>>>(pairs: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Dict(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into_bytes())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<CallbackRef> for Value {
    fn from(callback: CallbackRef) -> Self {
        Value::Callback(callback)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Boolean(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s.into_bytes()),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Dict(
                obj.into_iter()
                    .map(|(k, v)| (k.into_bytes(), Value::from(v)))
                    .collect(),
            ),
        }
    }
}
