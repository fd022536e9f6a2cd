//! Option values for declared constraints and associations.
//!
//! Every descriptor carries an [`Options`] map: the configuration it was
//! declared with, such as `{in: [true, false]}` for an inclusion rule,
//! `{maximum: 100}` for a length rule or `{as: :likeable}` for a polymorphic
//! association. Values are compared structurally; the only special case is
//! [`Pattern`], which compares by source text.

use crate::{ValueError, ValueResult};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

/// Configuration attached to a descriptor, keyed by option name.
///
/// Ordered so that rendered options read the same on every run.
pub type Options = BTreeMap<String, Value>;

/// A value that can appear in descriptor options.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null/missing value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Interned name, distinct from a string with the same text.
    Symbol(String),
    /// Inclusive integer range.
    Range(i64, i64),
    /// Compiled regular expression.
    Pattern(Pattern),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested options.
    Map(Options),
}

impl Value {
    /// Create a symbol value.
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    /// Compile `source` into a pattern value.
    pub fn pattern(source: impl AsRef<str>) -> ValueResult<Self> {
        Pattern::new(source).map(Value::Pattern)
    }

    /// Create an inclusive range value.
    pub fn range(start: i64, end: i64) -> ValueResult<Self> {
        if start > end {
            return Err(ValueError::InvalidRange { start, end });
        }
        Ok(Value::Range(start, end))
    }

    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as boolean if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer if this is an Int value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as string reference if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the name if this is a Symbol value.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Get the text of a String or Symbol value.
    pub fn as_name(&self) -> Option<&str> {
        self.as_str().or_else(|| self.as_symbol())
    }

    /// Get as pattern if this is a Pattern value.
    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Value::Pattern(p) => Some(p),
            _ => None,
        }
    }

    /// Get the nested options if this is a Map value.
    pub fn as_map(&self) -> Option<&Options> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Symbol(s) => write!(f, ":{}", s),
            Value::Range(start, end) => write!(f, "{}..={}", start, end),
            Value::Pattern(p) => write!(f, "{}", p),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(map) => write!(f, "{}", DisplayOptions(map)),
        }
    }
}

/// Display adapter rendering an options map as `{key: value, ...}`.
pub struct DisplayOptions<'a>(pub &'a Options);

impl fmt::Display for DisplayOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{{}}");
        }
        write!(f, "{{")?;
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", key, value)?;
        }
        write!(f, " }}")
    }
}

/// A compiled regular expression used as an option value.
///
/// Two patterns are equal when their source text is identical; equivalent
/// but differently written expressions are not.
#[derive(Clone)]
pub struct Pattern {
    regex: regex_lite::Regex,
}

impl Pattern {
    /// Compile a pattern from its source text.
    pub fn new(source: impl AsRef<str>) -> ValueResult<Self> {
        let source = source.as_ref();
        regex_lite::Regex::new(source)
            .map(|regex| Self { regex })
            .map_err(|e| ValueError::invalid_pattern(source, e.to_string()))
    }

    /// The source text the pattern was compiled from.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Test whether the pattern matches `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

// Convenient From implementations
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::Pattern(p)
    }
}

impl From<RangeInclusive<i64>> for Value {
    fn from(range: RangeInclusive<i64>) -> Self {
        Value::Range(*range.start(), *range.end())
    }
}

impl From<Options> for Value {
    fn from(map: Options) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// Helper macro to create option maps.
///
/// ```
/// use modelspec_core::{options, Value};
///
/// let opts = options! { "in" => vec![true, false], "allow_nil" => true };
/// assert_eq!(opts.get("allow_nil"), Some(&Value::Bool(true)));
/// ```
#[macro_export]
macro_rules! options {
    () => {
        $crate::Options::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut map = $crate::Options::new();
            $(
                map.insert($key.to_string(), $crate::Value::from($value));
            )+
            map
        }
    };
}
