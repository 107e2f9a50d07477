//! Minimal text templates with `{placeholder}` fields.
//!
//! Templates are parsed once into a list of segments and then rendered any
//! number of times.  Values are pulled from a caller-supplied lookup
//! callback, which may itself render other templates; both the parse step
//! and the callback report failures as a [`RenderError`], so a broken
//! template surfaces as an ordinary error at the top-level call instead of
//! aborting half-way through the output.
//!
//! ```text
//! {name} {usage}
//!     {summary}
//! ```
//!
//! `{{` and `}}` produce literal braces.  Field names are ASCII letters,
//! digits and `_`.

use thiserror::Error;

// ─── Errors ───────────────────────────────────────────────────────────────────

/// Everything that can go wrong while parsing or rendering help text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// A `{` was never closed.
    #[error("template '{template}': unclosed field starting at byte {offset}")]
    Unclosed { template: &'static str, offset: usize },

    /// A `}` appeared outside a field.
    #[error("template '{template}': stray '}}' at byte {offset}")]
    StrayBrace { template: &'static str, offset: usize },

    /// A field name was empty or contained an illegal character.
    #[error("template '{template}': invalid field name '{field}'")]
    InvalidField { template: &'static str, field: String },

    /// The lookup callback had no value for a field.
    #[error("template '{template}': no value for field '{field}'")]
    MissingValue { template: &'static str, field: String },
}

// ─── Template ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Field(String),
}

/// A parsed template.
#[derive(Debug, Clone)]
pub struct Template {
    name: &'static str,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source`.  `name` only appears in error messages.
    pub fn parse(name: &'static str, source: &str) -> Result<Self, RenderError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|&(_, n)| n) == Some('{') => {
                    chars.next();
                    text.push('{');
                },
                '}' if chars.peek().map(|&(_, n)| n) == Some('}') => {
                    chars.next();
                    text.push('}');
                },
                '{' => {
                    let mut field = String::new();
                    let mut closed = false;
                    for (_, n) in chars.by_ref() {
                        if n == '}' {
                            closed = true;
                            break;
                        }
                        field.push(n);
                    }
                    if !closed {
                        return Err(RenderError::Unclosed {
                            template: name,
                            offset,
                        });
                    }
                    if field.is_empty()
                        || !field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                    {
                        return Err(RenderError::InvalidField {
                            template: name,
                            field,
                        });
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Field(field));
                },
                '}' => {
                    return Err(RenderError::StrayBrace {
                        template: name,
                        offset,
                    });
                },
                _ => text.push(c),
            }
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self { name, segments })
    }

    /// Template name as given to [`Template::parse`].
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Render into a new `String`.
    ///
    /// `lookup` is called once per field occurrence.  `Ok(None)` means the
    /// field is unknown and becomes [`RenderError::MissingValue`].
    pub fn render<F>(&self, mut lookup: F) -> Result<String, RenderError>
    where
        F: FnMut(&str) -> Result<Option<String>, RenderError>,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(t) => out.push_str(t),
                Segment::Field(f) => {
                    let value = lookup(f.as_str())?.ok_or_else(|| RenderError::MissingValue {
                        template: self.name,
                        field: f.clone(),
                    })?;
                    out.push_str(&value);
                },
            }
        }
        Ok(out)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(
        pairs: &'a [(&'a str, &'a str)],
    ) -> impl FnMut(&str) -> Result<Option<String>, RenderError> + 'a {
        move |key| {
            Ok(pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_owned()))
        }
    }

    #[test]
    fn substitutes_fields() {
        let t = Template::parse("t", "{name} {usage}\n\t{summary}").unwrap();
        let out = t
            .render(vars(&[("name", "backup"), ("usage", "DEST"), ("summary", "Save.")]))
            .unwrap();
        assert_eq!(out, "backup DEST\n\tSave.");
    }

    #[test]
    fn repeated_field_is_looked_up_each_time() {
        let t = Template::parse("t", "{x}-{x}").unwrap();
        let mut calls = 0;
        let out = t
            .render(|_| {
                calls += 1;
                Ok(Some(calls.to_string()))
            })
            .unwrap();
        assert_eq!(out, "1-2");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let t = Template::parse("t", "{{{name}}}").unwrap();
        assert_eq!(t.render(vars(&[("name", "x")])).unwrap(), "{x}");
    }

    #[test]
    fn values_are_not_reparsed() {
        let t = Template::parse("t", "{help}").unwrap();
        let out = t.render(vars(&[("help", "use {braces} freely")])).unwrap();
        assert_eq!(out, "use {braces} freely");
    }

    #[test]
    fn unclosed_field_is_a_parse_error() {
        let err = Template::parse("broken", "abc {name").unwrap_err();
        assert_eq!(err, RenderError::Unclosed {
            template: "broken",
            offset: 4,
        });
    }

    #[test]
    fn stray_close_brace_is_a_parse_error() {
        let err = Template::parse("broken", "a } b").unwrap_err();
        assert!(matches!(err, RenderError::StrayBrace { offset: 2, .. }));
    }

    #[test]
    fn invalid_field_names_are_rejected() {
        assert!(matches!(
            Template::parse("t", "{}").unwrap_err(),
            RenderError::InvalidField { .. }
        ));
        assert!(matches!(
            Template::parse("t", "{na me}").unwrap_err(),
            RenderError::InvalidField { .. }
        ));
    }

    #[test]
    fn missing_value_is_a_render_error() {
        let t = Template::parse("t", "{nope}").unwrap();
        let err = t.render(vars(&[])).unwrap_err();
        assert_eq!(err.to_string(), "template 't': no value for field 'nope'");
    }

    #[test]
    fn lookup_errors_propagate() {
        let t = Template::parse("outer", "a{inner}b").unwrap();
        let err = t
            .render(|_| {
                Err(RenderError::MissingValue {
                    template: "inner",
                    field: "x".into(),
                })
            })
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingValue { template: "inner", .. }));
    }
}
