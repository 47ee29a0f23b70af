//! Script literals and calls

use std::fmt;

/// A literal argument in a script call
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    /// Double-quoted string
    String(String),
    /// Floating point number
    Number(f64),
    /// `true` / `false`
    Boolean(bool),
    /// `null`
    Null,
}

impl ScriptValue {
    /// String literal
    pub fn string(value: impl Into<String>) -> Self {
        ScriptValue::String(value.into())
    }

    /// Numeric literal
    pub fn number(value: f64) -> Self {
        ScriptValue::Number(value)
    }

    /// Returns the string content, if this is a string literal
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a numeric literal
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScriptValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Short type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::String(_) => "string",
            ScriptValue::Number(_) => "number",
            ScriptValue::Boolean(_) => "boolean",
            ScriptValue::Null => "null",
        }
    }
}

// NaN literals compare equal so that parsed calls match the originals
fn same_number(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::String(s) => write!(f, "\"{}\"", escape_string(s)),
            ScriptValue::Number(n) => f.write_str(&format_number(*n)),
            ScriptValue::Boolean(b) => write!(f, "{b}"),
            ScriptValue::Null => f.write_str("null"),
        }
    }
}

/// A call expression: `function(arg, arg, ...)`
#[derive(Debug, Clone)]
pub struct ScriptCall {
    /// Function name
    pub function: String,
    /// Positional arguments
    pub arguments: Vec<ScriptValue>,
}

impl ScriptCall {
    /// Creates a call with no arguments
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            arguments: Vec::new(),
        }
    }

    /// Appends an argument
    pub fn arg(mut self, value: ScriptValue) -> Self {
        self.arguments.push(value);
        self
    }
}

impl PartialEq for ScriptCall {
    fn eq(&self, other: &Self) -> bool {
        self.function == other.function
            && self.arguments.len() == other.arguments.len()
            && self
                .arguments
                .iter()
                .zip(&other.arguments)
                .all(|(a, b)| match (a, b) {
                    (ScriptValue::Number(x), ScriptValue::Number(y)) => same_number(*x, *y),
                    _ => a == b,
                })
    }
}

impl fmt::Display for ScriptCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// Escapes `value` for embedding between double quotes
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => {
                escaped.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => escaped.push(c),
        }
    }
    escaped
}

/// Formats a number so that integral values keep a decimal point
///
/// `4` renders as `4.0`, `0.25` as `0.25`; non-finite values use the
/// `NaN`, `Infinity` and `-Infinity` keywords.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
