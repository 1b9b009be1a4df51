//! Named-placeholder interpolation for phrase templates.
//!
//! Templates use `{name}` placeholders; `{{` and `}}` produce literal braces.

use thiserror::Error;

/// A named argument substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageArg {
    pub key: &'static str,
    pub value: String,
}

impl MessageArg {
    pub fn new(key: &'static str, value: impl ToString) -> Self {
        Self {
            key,
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolationError {
    #[error("No value supplied for placeholder '{0}'")]
    MissingArgument(String),

    #[error("Unclosed placeholder starting at byte {0}")]
    Unclosed(usize),
}

/// Substitutes every placeholder in `template` from `args`.
pub fn interpolate(template: &str, args: &[MessageArg]) -> Result<String, InterpolationError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template.char_indices().peekable();

    while let Some((pos, c)) = rest.next() {
        match c {
            '{' if matches!(rest.peek(), Some((_, '{'))) => {
                rest.next();
                out.push('{');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for (_, n) in rest.by_ref() {
                    if n == '}' {
                        closed = true;
                        break;
                    }
                    name.push(n);
                }
                if !closed {
                    return Err(InterpolationError::Unclosed(pos));
                }
                let name = name.trim();
                let value = args
                    .iter()
                    .find(|a| a.key == name)
                    .ok_or_else(|| InterpolationError::MissingArgument(name.to_string()))?;
                out.push_str(&value.value);
            }
            '}' if matches!(rest.peek(), Some((_, '}'))) => {
                rest.next();
                out.push('}');
            }
            other => out.push(other),
        }
    }
    Ok(out)
}
