//! Rule contract between the engine and individual lint rules

use crate::ast::{BlockStatement, ElementNode, MustacheStatement, SourceLocation, SubExpression};
use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::source::TemplateSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Rule category for grouping related rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    /// Code that is definitely wrong or useless
    #[default]
    Correctness,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleCategory::Correctness => write!(f, "correctness"),
        }
    }
}

/// Descriptive metadata of a rule, used by `--list-rules` and `--explain`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMeta {
    /// Unique rule identifier (e.g., "header-main")
    pub id: String,

    /// Detailed description
    #[serde(default)]
    pub description: Option<String>,

    /// Default severity level
    #[serde(default)]
    pub severity: Severity,

    #[serde(default)]
    pub category: RuleCategory,

    /// Example of code that violates this rule
    #[serde(default)]
    pub example_bad: Option<String>,

    /// Example of correct code
    #[serde(default)]
    pub example_good: Option<String>,

    /// Known deviations between the rule's wording and behavior
    #[serde(default)]
    pub notes: Vec<String>,
}

impl RuleMeta {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            description: None,
            severity: Severity::Error,
            category: RuleCategory::default(),
            example_bad: None,
            example_good: None,
            notes: Vec::new(),
        }
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_category(mut self, category: RuleCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_example_bad(mut self, example: &str) -> Self {
        self.example_bad = Some(example.to_string());
        self
    }

    pub fn with_example_good(mut self, example: &str) -> Self {
        self.example_good = Some(example.to_string());
        self
    }

    pub fn with_note(mut self, note: &str) -> Self {
        self.notes.push(note.to_string());
        self
    }
}

/// The node kinds a rule is handed during traversal
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Element(&'a ElementNode),
    Mustache(&'a MustacheStatement),
    Block(&'a BlockStatement),
    SubExpression(&'a SubExpression),
}

impl NodeRef<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeRef::Element(_) => "ElementNode",
            NodeRef::Mustache(_) => "MustacheStatement",
            NodeRef::Block(_) => "BlockStatement",
            NodeRef::SubExpression(_) => "SubExpression",
        }
    }
}

/// A visited node together with the nearest enclosing visited node
#[derive(Debug, Clone, Copy)]
pub struct NodePath<'a> {
    pub node: NodeRef<'a>,
    pub parent: Option<NodeRef<'a>>,
}

impl<'a> NodePath<'a> {
    pub fn new(node: NodeRef<'a>, parent: Option<NodeRef<'a>>) -> Self {
        Self { node, parent }
    }
}

/// Receives diagnostics as rules log them
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// One finding, before it is bound to a rule and file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub source: String,
}

/// Per-file, per-rule state handed to [`Rule::visit`]
pub struct RuleContext<'a> {
    rule_id: &'a str,
    severity: Severity,
    file: &'a Path,
    source: &'a TemplateSource,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        rule_id: &'a str,
        severity: Severity,
        file: &'a Path,
        source: &'a TemplateSource,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        Self {
            rule_id,
            severity,
            file,
            source,
            sink,
        }
    }

    /// Original template text of a node
    pub fn source_for(&self, loc: &SourceLocation) -> String {
        self.source.slice(loc)
    }

    pub fn log(&mut self, entry: LogEntry) {
        let location = Location::new(self.file.to_path_buf(), entry.line, entry.column);
        let diagnostic = Diagnostic::new(self.rule_id, self.severity, &entry.message, location)
            .with_source(&entry.source);
        self.sink.report(diagnostic);
    }
}

/// A lint rule
///
/// Rules are shared across threads and must not keep per-file state; every
/// finding goes through the [`RuleContext`] of the current visit.
pub trait Rule: Send + Sync {
    fn meta(&self) -> &RuleMeta;

    fn id(&self) -> &str {
        &self.meta().id
    }

    /// Whether the rule was switched on by its configuration
    fn is_enabled(&self) -> bool {
        true
    }

    fn visit(&self, path: &NodePath<'_>, ctx: &mut RuleContext<'_>);
}
