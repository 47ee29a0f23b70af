//! Workflow script encoding
//!
//! Workflow steps are recorded as script expressions such as
//! `exportTMAData("/data/out", 4.0)`. This module is the serialization
//! contract for those expressions:
//!
//! - [`ScriptValue`] and [`ScriptCall`] render literals with escaping that
//!   survives any file path (backslashes, quotes, control characters)
//! - [`parse_call`] and [`parse_script`] read expressions back
//!
//! Rendering then parsing a call yields the original call.
//!
//! # Example
//!
//! ```rust
//! use tma_export::core::script::{parse_call, ScriptCall, ScriptValue};
//!
//! let call = ScriptCall::new("exportTMAData")
//!     .arg(ScriptValue::string(r#"C:\data\"block 1""#))
//!     .arg(ScriptValue::number(4.0));
//!
//! let text = call.to_string();
//! assert_eq!(text, r#"exportTMAData("C:\\data\\\"block 1\"", 4.0)"#);
//! assert_eq!(parse_call(&text).unwrap(), call);
//! ```

pub mod lexer;
pub mod parser;
pub mod value;

pub use parser::{parse_call, parse_script};
pub use value::{escape_string, format_number, ScriptCall, ScriptValue};
