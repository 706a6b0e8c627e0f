//! Jupyter notebook (`.ipynb`) to markdown.
//!
//! Cells are emitted in document order. Markdown cells pass through
//! verbatim, code cells become fenced blocks tagged with the cell's language,
//! and text outputs follow their code block. Cell types and outputs with no
//! text form are skipped and recorded in [`Conversion::skipped`], and so are
//! malformed cells: one bad cell never hides the rest of the notebook.

use super::{Conversion, ConvertError, ConvertOptions, Skipped};
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::debug;

/// Body returned for a notebook with nothing to show.
pub const EMPTY_NOTEBOOK: &str = "# Empty Notebook\n\nThis notebook has no content yet.";

/// Kind recorded for a cell or output that does not have the expected shape.
pub const INVALID_KIND: &str = "<invalid>";

/// Parsed notebook document. Only the fields needed for rendering are kept.
///
/// Cells stay as raw JSON until rendering so each one is checked on its
/// own. A `cells` value that is not an array counts as no cells.
#[derive(Debug, Deserialize)]
pub struct Notebook {
    #[serde(default)]
    pub cells: Value,
    #[serde(default)]
    pub metadata: Value,
}

impl Notebook {
    fn cells(&self) -> &[Value] {
        self.cells.as_array().map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub cell_type: String,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub outputs: Value,
}

impl Cell {
    fn outputs(&self) -> &[Value] {
        self.outputs.as_array().map(Vec::as_slice).unwrap_or_default()
    }
}

/// Cell text, stored either whole or as line fragments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Source {
    Text(String),
    Lines(Vec<String>),
}

impl Default for Source {
    fn default() -> Self {
        Source::Text(String::new())
    }
}

impl Source {
    /// The full text; fragments are concatenated with no separator.
    pub fn joined(&self) -> Cow<'_, str> {
        match self {
            Source::Text(text) => Cow::Borrowed(text),
            Source::Lines(lines) => Cow::Owned(lines.concat()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub output_type: String,
    #[serde(default)]
    pub text: Option<Source>,
    #[serde(default)]
    pub data: HashMap<String, Value>,
}

impl Output {
    fn plain_text(&self) -> Option<String> {
        let value = self.data.get("text/plain")?;
        serde_json::from_value::<Source>(value.clone())
            .ok()
            .map(|source| source.joined().into_owned())
    }
}

/// Parse notebook JSON.
pub fn parse(raw: &str) -> Result<Notebook, ConvertError> {
    Ok(serde_json::from_str(raw)?)
}

/// Render a parsed notebook as markdown.
///
/// Never returns an empty body: a notebook that produces no output renders
/// as [`EMPTY_NOTEBOOK`].
pub fn render(notebook: &Notebook, options: &ConvertOptions) -> Conversion {
    let mut markdown = String::new();
    let mut skipped = Vec::new();

    // Notebook-level kernel language, used when a cell declares none
    let fallback = notebook
        .metadata
        .pointer("/language_info/name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(options.default_language.as_str());

    for (index, value) in notebook.cells().iter().enumerate() {
        let cell = match Cell::deserialize(value) {
            Ok(cell) => cell,
            Err(err) => {
                debug!(cell = index, error = %err, "skipping malformed notebook cell");
                skipped.push(Skipped::Cell {
                    index,
                    kind: INVALID_KIND.to_string(),
                });
                continue;
            }
        };

        match cell.cell_type.as_str() {
            "markdown" => {
                markdown.push_str(&cell.source.joined());
                markdown.push_str("\n\n");
            }
            "code" => {
                let language = cell
                    .metadata
                    .get("language")
                    .and_then(Value::as_str)
                    .filter(|name| !name.is_empty())
                    .unwrap_or(fallback);
                markdown.push_str(&format!(
                    "```{language}\n{}\n```\n\n",
                    cell.source.joined()
                ));

                if options.render_outputs {
                    render_outputs(index, &cell, &mut markdown, &mut skipped);
                }
            }
            other => {
                debug!(cell = index, cell_type = other, "skipping notebook cell");
                skipped.push(Skipped::Cell {
                    index,
                    kind: other.to_string(),
                });
            }
        }
    }

    if markdown.is_empty() {
        markdown = EMPTY_NOTEBOOK.to_string();
    }

    Conversion { markdown, skipped }
}

fn render_outputs(index: usize, cell: &Cell, markdown: &mut String, skipped: &mut Vec<Skipped>) {
    for value in cell.outputs() {
        let Ok(output) = Output::deserialize(value) else {
            debug!(cell = index, "skipping malformed notebook output");
            skipped.push(Skipped::Output {
                cell: index,
                kind: INVALID_KIND.to_string(),
            });
            continue;
        };

        let rendered = match output.output_type.as_str() {
            "stream" => output
                .text
                .as_ref()
                .map(|text| ("Output", text.joined().into_owned())),
            "execute_result" | "display_data" => {
                output.plain_text().map(|text| ("Result", text))
            }
            _ => None,
        };

        match rendered {
            Some((label, text)) => {
                markdown.push_str(&format!("**{label}:**\n```\n{text}\n```\n\n"));
            }
            None => {
                debug!(
                    cell = index,
                    output_type = %output.output_type,
                    "skipping notebook output"
                );
                skipped.push(Skipped::Output {
                    cell: index,
                    kind: output.output_type.clone(),
                });
            }
        }
    }
}

/// Body shown in place of a notebook that failed to parse.
pub fn parse_failure_body(error: &ConvertError) -> String {
    format!("# Error Parsing Notebook\n\nFailed to parse Jupyter notebook: {error}")
}

/// Convert notebook JSON to markdown, rendering parse failures as a short
/// error document instead of returning an error.
pub fn notebook_to_markdown(raw: &str, options: &ConvertOptions) -> Conversion {
    match parse(raw) {
        Ok(notebook) => render(&notebook, options),
        Err(error) => Conversion::text(parse_failure_body(&error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn convert(value: Value) -> Conversion {
        notebook_to_markdown(&value.to_string(), &ConvertOptions::default())
    }

    #[test]
    fn test_cell_order_preserved() {
        let out = convert(json!({
            "cells": [
                {"cell_type": "markdown", "source": "# A"},
                {"cell_type": "code", "source": "print(1)"},
                {"cell_type": "markdown", "source": "# B"}
            ]
        }));

        let a = out.markdown.find("# A").unwrap();
        let code = out.markdown.find("```python\nprint(1)\n```").unwrap();
        let b = out.markdown.find("# B").unwrap();
        assert!(a < code && code < b);
        assert_eq!(
            out.markdown,
            "# A\n\n```python\nprint(1)\n```\n\n# B\n\n"
        );
    }

    #[test]
    fn test_source_fragments_concatenated() {
        let out = convert(json!({
            "cells": [{"cell_type": "markdown", "source": ["# Title\n", "body ", "text"]}]
        }));
        assert_eq!(out.markdown, "# Title\nbody text\n\n");
    }

    #[test]
    fn test_language_precedence() {
        let out = convert(json!({
            "metadata": {"language_info": {"name": "javascript"}},
            "cells": [
                {"cell_type": "code", "source": "a", "metadata": {"language": "rust"}},
                {"cell_type": "code", "source": "b", "metadata": {}}
            ]
        }));
        assert!(out.markdown.contains("```rust\na\n```"));
        assert!(out.markdown.contains("```javascript\nb\n```"));
    }

    #[test]
    fn test_configured_default_language() {
        let options = ConvertOptions {
            default_language: "julia".to_string(),
            ..ConvertOptions::default()
        };
        let raw = json!({"cells": [{"cell_type": "code", "source": "x = 1"}]}).to_string();
        let out = notebook_to_markdown(&raw, &options);
        assert!(out.markdown.starts_with("```julia\n"));
    }

    #[test]
    fn test_empty_notebook_placeholder() {
        assert_eq!(convert(json!({"cells": []})).markdown, EMPTY_NOTEBOOK);
        assert_eq!(convert(json!({})).markdown, EMPTY_NOTEBOOK);
        assert_eq!(convert(json!({"cells": null})).markdown, EMPTY_NOTEBOOK);
        assert_eq!(convert(json!({"cells": {}})).markdown, EMPTY_NOTEBOOK);
        assert_eq!(convert(json!({"cells": "nope"})).markdown, EMPTY_NOTEBOOK);
    }

    #[test]
    fn test_malformed_cell_does_not_hide_others() {
        let out = convert(json!({
            "cells": [
                {"cell_type": "markdown", "source": "# Kept"},
                {"cell_type": null, "source": "x"},
                {"cell_type": "markdown", "source": null},
                "not a cell",
                {"cell_type": "code", "source": "print(2)"}
            ]
        }));

        assert_eq!(out.markdown, "# Kept\n\n```python\nprint(2)\n```\n\n");
        let invalid: Vec<usize> = out
            .skipped
            .iter()
            .filter_map(|item| match item {
                Skipped::Cell { index, kind } if kind == INVALID_KIND => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(invalid, vec![1, 2, 3]);
    }

    #[test]
    fn test_malformed_output_skipped() {
        let out = convert(json!({
            "cells": [{
                "cell_type": "code",
                "source": "1",
                "outputs": [
                    {"output_type": 7},
                    {"output_type": "stream", "text": "ok"}
                ]
            }]
        }));

        assert!(out.markdown.contains("**Output:**\n```\nok\n```"));
        assert_eq!(
            out.skipped,
            vec![Skipped::Output {
                cell: 0,
                kind: INVALID_KIND.to_string()
            }]
        );
    }

    #[test]
    fn test_unknown_cells_skipped_and_recorded() {
        let out = convert(json!({
            "cells": [
                {"cell_type": "raw", "source": "ignored"},
                {"cell_type": "markdown", "source": "kept"}
            ]
        }));
        assert_eq!(out.markdown, "kept\n\n");
        assert_eq!(
            out.skipped,
            vec![Skipped::Cell {
                index: 0,
                kind: "raw".to_string()
            }]
        );
    }

    #[test]
    fn test_only_unknown_cells_yields_placeholder() {
        let out = convert(json!({"cells": [{"cell_type": "raw", "source": "x"}]}));
        assert_eq!(out.markdown, EMPTY_NOTEBOOK);
        assert_eq!(out.skipped.len(), 1);
    }

    #[test]
    fn test_outputs_rendered() {
        let out = convert(json!({
            "cells": [{
                "cell_type": "code",
                "source": "print('hi')\n1 + 1",
                "outputs": [
                    {"output_type": "stream", "name": "stdout", "text": ["hi\n"]},
                    {"output_type": "execute_result", "data": {"text/plain": "2"}},
                    {"output_type": "display_data", "data": {"image/png": "iVBOR"}},
                    {"output_type": "error", "ename": "ValueError"}
                ]
            }]
        }));

        assert!(out.markdown.contains("**Output:**\n```\nhi\n\n```"));
        assert!(out.markdown.contains("**Result:**\n```\n2\n```"));
        assert_eq!(
            out.skipped,
            vec![
                Skipped::Output {
                    cell: 0,
                    kind: "display_data".to_string()
                },
                Skipped::Output {
                    cell: 0,
                    kind: "error".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_outputs_can_be_disabled() {
        let options = ConvertOptions {
            render_outputs: false,
            ..ConvertOptions::default()
        };
        let raw = json!({
            "cells": [{
                "cell_type": "code",
                "source": "1",
                "outputs": [{"output_type": "execute_result", "data": {"text/plain": "1"}}]
            }]
        })
        .to_string();
        let out = notebook_to_markdown(&raw, &options);
        assert_eq!(out.markdown, "```python\n1\n```\n\n");
    }

    #[test]
    fn test_parse_failure_body() {
        let out = notebook_to_markdown("{ nope", &ConvertOptions::default());
        assert!(out.markdown.starts_with("# Error Parsing Notebook"));
        assert!(out.skipped.is_empty());
    }
}
