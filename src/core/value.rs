//! Values accepted as log messages and parameters
//!
//! A call site hands the logger an arbitrary message plus trailing
//! parameters. Each one is resolved once, at the call boundary, into a
//! [`LogValue`]: either a JSON value (primitive or structured) or an
//! [`ErrorValue`] projection of an error.

use serde_json::{Map, Value};
use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

/// A message or parameter passed to a log call
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    /// Primitive (null, bool, number, string) or structured (array, object) value
    Json(Value),
    /// Error-like value, rendered through its name/message/stack projection
    Error(ErrorValue),
}

impl LogValue {
    /// Project any error into a log value
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        LogValue::Error(ErrorValue::from_error(err))
    }

    /// True for arrays and objects
    pub fn is_structured(&self) -> bool {
        matches!(self, LogValue::Json(Value::Array(_) | Value::Object(_)))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LogValue::Error(_))
    }

    /// Plain string content, if this value is a JSON string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LogValue::Json(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Render as a single-line string.
    ///
    /// Strings are returned verbatim, other primitives in their JSON form
    /// (`null`, `true`, `42`), structured values as compact JSON and errors
    /// as `name: message`.
    pub fn stringify(&self) -> String {
        match self {
            LogValue::Json(Value::String(s)) => s.clone(),
            LogValue::Json(v) => v.to_string(),
            LogValue::Error(e) => e.to_string(),
        }
    }

    /// Structural form used by the JSON renderer
    pub fn to_json_value(&self) -> Value {
        match self {
            LogValue::Json(v) => v.clone(),
            LogValue::Error(e) => e.to_json_value(),
        }
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl From<Value> for LogValue {
    fn from(v: Value) -> Self {
        LogValue::Json(v)
    }
}

impl From<Map<String, Value>> for LogValue {
    fn from(m: Map<String, Value>) -> Self {
        LogValue::Json(Value::Object(m))
    }
}

impl From<ErrorValue> for LogValue {
    fn from(e: ErrorValue) -> Self {
        LogValue::Error(e)
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Json(Value::String(s))
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Json(Value::String(s.to_string()))
    }
}

impl From<&String> for LogValue {
    fn from(s: &String) -> Self {
        LogValue::Json(Value::String(s.clone()))
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Json(Value::Bool(b))
    }
}

impl From<f64> for LogValue {
    /// Non-finite floats have no JSON form and become `null`
    fn from(f: f64) -> Self {
        LogValue::Json(
            serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        )
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for LogValue {
                fn from(i: $t) -> Self {
                    LogValue::Json(Value::from(i))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(LogValue::Json(Value::Null))
    }
}

/// Name/message/stack projection of an error
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    pub name: String,
    pub message: String,
    /// Stack trace, one entry per line. Never empty: the first line is
    /// always `name: message`.
    pub stack: Vec<String>,
    pub cause: Option<Box<ErrorValue>>,
}

impl ErrorValue {
    /// Create an error projection with a one-line stack
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        let name = name.into();
        let message = message.into();
        let stack = vec![header_line(&name, &message)];
        Self {
            name,
            message,
            stack,
            cause: None,
        }
    }

    /// Project a Rust error, capturing the current backtrace as its stack
    /// and walking `source()` into `cause`.
    pub fn from_error<E: StdError + ?Sized>(err: &E) -> Self {
        let name = short_type_name(std::any::type_name::<E>());
        let mut value = Self::new(name, err.to_string());
        let trace = Backtrace::force_capture().to_string();
        value.stack.extend(
            trace
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
        value.cause = err.source().map(|source| Box::new(Self::from_source(source)));
        value
    }

    /// Causes carry no backtrace of their own
    fn from_source(err: &(dyn StdError + 'static)) -> Self {
        let mut value = Self::new("Error", err.to_string());
        value.cause = err.source().map(|source| Box::new(Self::from_source(source)));
        value
    }

    /// Replace the stack with the lines of `stack`
    #[must_use]
    pub fn with_stack(mut self, stack: &str) -> Self {
        let lines: Vec<String> = stack
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(String::from)
            .collect();
        if !lines.is_empty() {
            self.stack = lines;
        }
        self
    }

    #[must_use]
    pub fn with_cause(mut self, cause: ErrorValue) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// `{ name, message, stack, cause? }`
    pub fn to_json_value(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("name".to_string(), Value::String(self.name.clone()));
        obj.insert("message".to_string(), Value::String(self.message.clone()));
        obj.insert(
            "stack".to_string(),
            Value::Array(self.stack.iter().cloned().map(Value::String).collect()),
        );
        if let Some(ref cause) = self.cause {
            obj.insert("cause".to_string(), cause.to_json_value());
        }
        Value::Object(obj)
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&header_line(&self.name, &self.message))
    }
}

fn header_line(name: &str, message: &str) -> String {
    if message.is_empty() {
        name.to_string()
    } else {
        format!("{}: {}", name, message)
    }
}

/// `std::io::error::Error` -> `Error`, `dyn core::error::Error` -> `Error`
fn short_type_name(full: &str) -> String {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
        .trim_start_matches("dyn ")
        .to_string()
}
