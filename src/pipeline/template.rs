//! Placeholder substitution for the fixed instruction templates.
//!
//! Templates use `{name}` placeholders; `{{` and `}}` are literal braces,
//! so a JSON example can live inside a template unescaped in the output.
//! Rendering is pure string work — it never touches the completion service.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("no value provided for placeholder `{{{0}}}`")]
    MissingValue(String),

    #[error("unterminated placeholder at byte {0}")]
    Unterminated(usize),
}

/// Substitute every `{name}` in `template` with its value.
///
/// Fails when a placeholder names a value the caller did not supply.
/// Values that name no placeholder are ignored.
pub fn render(template: &str, values: &BTreeMap<&str, String>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((at, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }
                if !closed {
                    return Err(TemplateError::Unterminated(at));
                }
                match values.get(name.as_str()) {
                    Some(value) => out.push_str(value),
                    None => return Err(TemplateError::MissingValue(name)),
                }
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

/// Render a list as newline-separated `- item` bullet lines.
///
/// An empty list renders as the fallback line verbatim, so prompts always
/// show an explicit "Not specified" / "None known" rather than a blank.
pub fn bullet_list(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        return fallback.to_string();
    }
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
