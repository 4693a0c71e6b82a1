//! Template inputs: the serialized AST and the text it was parsed from

use crate::ast::{SourceLocation, Template};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error loading a template AST
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid template AST in {file}: {message}")]
    Json { file: String, message: String },
}

/// The original template text, used to quote offending nodes
#[derive(Debug, Clone, Default)]
pub struct TemplateSource {
    lines: Vec<String>,
}

impl TemplateSource {
    pub fn new(content: &str) -> Self {
        Self {
            lines: content.lines().map(String::from).collect(),
        }
    }

    /// A source with no text; every slice is empty
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Verbatim text covered by `loc`
    ///
    /// Lines are 1-based and columns 0-based character offsets, matching the
    /// Glimmer parser. Locations outside the text produce an empty string.
    pub fn slice(&self, loc: &SourceLocation) -> String {
        let (start, end) = (loc.start, loc.end);
        if !loc.is_known() || end.line < start.line || end.line > self.lines.len() {
            return String::new();
        }

        let first = &self.lines[start.line - 1];
        if start.line == end.line {
            return char_range(first, start.column, Some(end.column));
        }

        let mut out = char_range(first, start.column, None);
        for line in &self.lines[start.line..end.line - 1] {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out.push_str(&char_range(&self.lines[end.line - 1], 0, Some(end.column)));
        out
    }
}

fn char_range(line: &str, from: usize, to: Option<usize>) -> String {
    let chars = line.chars().skip(from);
    match to {
        Some(to) => chars.take(to.saturating_sub(from)).collect(),
        None => chars.collect(),
    }
}

/// Template text that sits next to a serialized AST
///
/// `index.hbs.json` pairs with `index.hbs`; `index.json` pairs with
/// `index.hbs`.
pub fn sibling_source_path(ast_path: &Path) -> Option<PathBuf> {
    let stem = ast_path.file_stem()?;
    let parent = ast_path.parent().unwrap_or(Path::new(""));

    let direct = parent.join(stem);
    if direct.extension().is_some_and(|ext| ext == "hbs") && direct.is_file() {
        return Some(direct);
    }

    let hbs = ast_path.with_extension("hbs");
    hbs.is_file().then_some(hbs)
}

/// Whether a file found under a directory argument holds a template AST
///
/// Matches `*.hbs.json`, and any other `*.json` with a template next to it.
pub fn is_template_ast_path(path: &Path) -> bool {
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let names_template = path
        .file_stem()
        .is_some_and(|stem| Path::new(stem).extension().is_some_and(|ext| ext == "hbs"));
    is_json && (names_template || sibling_source_path(path).is_some())
}

/// Read a JSON-serialized template AST plus its template text, if present
///
/// The root must be a `Template` node; any other JSON document is rejected.
pub fn load(path: &Path) -> Result<(Template, TemplateSource), LoadError> {
    let content = std::fs::read_to_string(path)?;
    let json_error = |message: String| LoadError::Json {
        file: path.display().to_string(),
        message,
    };

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| json_error(e.to_string()))?;
    match value.get("type").and_then(|kind| kind.as_str()) {
        Some("Template") => {}
        Some(other) => return Err(json_error(format!("root node is {}, not Template", other))),
        None => return Err(json_error("root node has no Template type".to_string())),
    }
    let template: Template =
        serde_json::from_value(value).map_err(|e| json_error(e.to_string()))?;

    let source = match sibling_source_path(path) {
        Some(hbs) => {
            log::debug!("using {} as source for {}", hbs.display(), path.display());
            TemplateSource::new(&std::fs::read_to_string(hbs)?)
        }
        None => TemplateSource::empty(),
    };

    Ok((template, source))
}
