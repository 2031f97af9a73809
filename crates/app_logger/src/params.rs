//! Normalization of heterogeneous log-call arguments into one flat payload.

use serde_json::Value;

/// One argument to a log call.
///
/// Arguments are either plain values or error-like values carrying trace
/// text; the two render differently (see [`serialize_params`]).
#[derive(Clone, Debug, PartialEq)]
pub enum LogParam {
    /// An error-like value; holds the full trace text.
    Trace(String),

    /// Any other value.
    Value(Value),
}

impl LogParam {
    /// Captures an error and its `source()` chain as trace text.
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut trace = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            trace.push_str("\ncaused by: ");
            trace.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Trace(trace)
    }

    /// The null argument; contributes an empty segment to the payload.
    pub const fn null() -> Self {
        Self::Value(Value::Null)
    }

    fn render(&self) -> String {
        match self {
            // Bracketed by newlines so multi-line traces survive in full.
            Self::Trace(trace) => format!("\n{trace}\n"),
            Self::Value(value) => render_value(value),
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(truthy) => {
            if *truthy {
                "true".to_string()
            } else {
                String::new()
            }
        }
        Value::Number(number) => {
            if number.as_f64().is_some_and(|n| n == 0.0 || n.is_nan()) {
                String::new()
            } else {
                number.to_string()
            }
        }
        Value::String(text) => text.clone(),
        composite => serde_json::to_string(composite).unwrap_or_else(|error| error.to_string()),
    }
}

/// Collapses an argument list into a single trimmed payload string.
///
/// Rendered segments are space-joined left to right: trace arguments keep
/// their full multi-line text, composite values render as compact JSON,
/// truthy scalars render as plain text, and falsy scalars (null, `false`,
/// zero, NaN, the empty string) contribute empty segments. With
/// `flatten_newlines` enabled, embedded newlines in the result are replaced
/// with `".\t"` so the payload stays single-line-safe for line-oriented
/// files.
pub fn serialize_params(params: &[LogParam], flatten_newlines: bool) -> String {
    let joined = params
        .iter()
        .map(LogParam::render)
        .collect::<Vec<_>>()
        .join(" ");
    let trimmed = joined.trim();
    if flatten_newlines {
        flatten(trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Replaces embedded newlines with the `".\t"` marker.
pub(crate) fn flatten(payload: &str) -> String {
    payload.replace('\n', ".\t")
}

impl From<Value> for LogParam {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for LogParam {
    fn from(value: &str) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<String> for LogParam {
    fn from(value: String) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<bool> for LogParam {
    fn from(value: bool) -> Self {
        Self::Value(Value::from(value))
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for LogParam {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

impl<T: Into<LogParam>> From<Option<T>> for LogParam {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Value(Value::Null), Into::into)
    }
}

/// Builds an array of [`LogParam`] values from heterogeneous arguments.
///
/// ```
/// use app_logger::params;
///
/// let args = params!["disk low", serde_json::json!({"pct": 91})];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    ($($arg:expr),* $(,)?) => {
        [$($crate::LogParam::from($arg)),*]
    };
}
