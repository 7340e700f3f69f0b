//! Output and clock natives

use super::Output;
use crate::span::Span;
use crate::value::{RuntimeError, Value};
use chrono::Local;

/// izpisi(...values) -> null
///
/// Writes the display form of each argument with no separator, then a newline.
pub fn izpisi(output: &Output, args: &[Value], span: Span) -> Result<Value, RuntimeError> {
    let line: String = args.iter().map(|v| v.to_string()).collect();
    output.write_line(&line).map_err(|e| RuntimeError::Output {
        msg: e.to_string(),
        span,
    })?;
    Ok(Value::Null)
}

/// cas() -> string, e.g. `09:05:03 :: 7.3.2024`
pub fn cas() -> Value {
    Value::string(Local::now().format("%H:%M:%S :: %-d.%-m.%Y").to_string())
}
