//! Runtime values for the Kiln runtime.
//!
//! # Heap Enforcement
//!
//! Heap-backed variants can only be built through factory methods on
//! `Value`. Both `Heap<T>` and `SharedList` have `pub(super)` constructors,
//! so external code cannot wrap storage directly.
//!
//! ```text
//! let s = Value::string("hello");                  // OK
//! let list = Value::list(vec![Value::int(1)]);     // OK
//! let s = Value::Str(Heap::new(...));              // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Sharing
//!
//! Strings and tuples are immutable and shared through `Arc`. Lists are
//! mutable and reference-shared: cloning a list value clones the handle,
//! so every holder observes mutations made through any other holder.

mod heap;
mod list;

use std::fmt;

pub use heap::Heap;
pub use list::SharedList;

/// Discriminant of a `Value`, used as the dispatch key for receivers and
/// parameter type predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueTag {
    Nothing,
    Bool,
    Int,
    String,
    List,
    Tuple,
}

impl ValueTag {
    /// Every tag, in declaration order.
    pub const ALL: [ValueTag; 6] = [
        ValueTag::Nothing,
        ValueTag::Bool,
        ValueTag::Int,
        ValueTag::String,
        ValueTag::List,
        ValueTag::Tuple,
    ];

    /// The spelling used for this tag in signature text.
    pub const fn name(self) -> &'static str {
        match self {
            ValueTag::Nothing => "Nothing",
            ValueTag::Bool => "Bool",
            ValueTag::Int => "Int",
            ValueTag::String => "String",
            ValueTag::List => "List",
            ValueTag::Tuple => "Tuple",
        }
    }

    /// Look up a tag by its signature spelling. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime value in the Kiln runtime.
#[derive(Clone)]
pub enum Value {
    /// The unit value.
    Nothing,
    /// Boolean value.
    Bool(bool),
    /// Signed machine-width integer.
    Int(i64),
    /// Immutable text.
    Str(Heap<String>),
    /// Mutable, reference-shared sequence.
    List(SharedList),
    /// Fixed-arity sequence. Packs call arguments and multi-field results.
    Tuple(Heap<Vec<Value>>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    /// Create an integer value.
    #[inline]
    pub const fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Create a string value.
    ///
    /// ```text
    /// let s = Value::string("hello");
    /// let s2 = Value::string(format!("{left}{right}"));
    /// ```
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a new list with its own backing storage.
    ///
    /// Clones of the returned value alias that storage.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(SharedList::new(items))
    }

    /// Create a tuple value.
    ///
    /// ```text
    /// let packed = Value::tuple(vec![receiver, Value::int(1)]);
    /// ```
    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }
}

// Value Methods

impl Value {
    /// The variant tag of this value.
    #[inline]
    pub const fn tag(&self) -> ValueTag {
        match self {
            Value::Nothing => ValueTag::Nothing,
            Value::Bool(_) => ValueTag::Bool,
            Value::Int(_) => ValueTag::Int,
            Value::Str(_) => ValueTag::String,
            Value::List(_) => ValueTag::List,
            Value::Tuple(_) => ValueTag::Tuple,
        }
    }

    /// Get the type name for error messages.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.tag().name()
    }

    /// Check if this is the `Nothing` value.
    #[inline]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    /// Try to convert to an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to convert to a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to convert to a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get the list handle.
    pub fn as_list(&self) -> Option<&SharedList> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Try to get the tuple fields.
    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    /// Get a tuple field by position.
    ///
    /// Returns `None` for non-tuples and out-of-range positions.
    pub fn field(&self, index: usize) -> Option<&Value> {
        self.as_tuple().and_then(|fields| fields.get(index))
    }

    /// Check whether two values are the same list (identity, not contents).
    pub fn same_list(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Check structural equality with another value.
    ///
    /// Lists compare by contents. A list that contains itself does not
    /// terminate.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nothing, Value::Nothing) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                let (left, right) = (a.snapshot(), b.snapshot());
                left.len() == right.len() && left.iter().zip(&right).all(|(x, y)| x.equals(y))
            }
            (Value::Tuple(a), Value::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            _ => false,
        }
    }

    /// Display value for user output (strings without quotes).
    pub fn display_value(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            other => other.to_string(),
        }
    }
}

// Trait Implementations

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => write!(f, "Nothing"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(list) => write!(f, "List({:?})", list.snapshot()),
            Value::Tuple(fields) => write!(f, "Tuple({:?})", &**fields),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => write!(f, "nothing"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "\"{}\"", &**s),
            Value::List(list) => write_seq(f, "[", &list.snapshot(), "]"),
            Value::Tuple(fields) => write_seq(f, "(", fields, ")"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}
