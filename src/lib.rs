//! header-lint - header component linter for Glimmer templates
//!
//! Checks how templates use the application's header components: the main
//! header must receive actions rather than bare strings for its `back`,
//! `close`, `edit` and `menu` arguments, and each header operation component
//! must be given at least one of its mandatory arguments.
//!
//! # Architecture
//!
//! ```text
//! CLI -> Engine -> traverse -> Rule::visit -> RuleContext -> Diagnostic
//! ```
//!
//! Templates arrive as the JSON AST `@glimmer/syntax` produces. The engine
//! walks every element, mustache, block and sub-expression and hands each to
//! the enabled rules; the `.hbs` file next to the AST supplies the source
//! snippets quoted in diagnostics.
//!
//! # Example
//!
//! ```yaml
//! # .template-lintrc.yaml
//! rules:
//!   header-main: true
//! ```

pub mod ast;
pub mod attrs;
pub mod classify;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod output;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod source;
pub mod traverse;
pub mod view;

#[cfg(test)]
mod testing;

// Re-export main types
pub use config::{Config, ConfigError};
pub use diagnostic::{Diagnostic, Location, Severity};
pub use engine::{Engine, LintResult};
pub use output::{CompactFormatter, JsonFormatter, OutputFormatter, TextFormatter};
pub use rule::{Rule, RuleCategory, RuleContext, RuleMeta};
pub use rules::HeaderMain;
pub use source::TemplateSource;
