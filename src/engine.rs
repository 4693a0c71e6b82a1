//! Core linter engine

use crate::ast::Template;
use crate::config::{Config, ConfigError};
use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::rule::{Rule, RuleContext};
use crate::rules::builtin_rules;
use crate::source::{self, LoadError, TemplateSource};
use crate::traverse::walk;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of linting operation
#[derive(Debug, Default)]
pub struct LintResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,

    /// Files processed
    pub files_processed: usize,

    /// Files with errors
    pub files_with_errors: usize,

    /// Files with warnings
    pub files_with_warnings: usize,

    /// Total errors
    pub error_count: usize,

    /// Total warnings
    pub warning_count: usize,

    /// Total info messages
    pub info_count: usize,

    /// Processing duration
    pub duration: Duration,
}

impl LintResult {
    /// Result for one file carrying `diagnostics`
    pub fn for_file(diagnostics: Vec<Diagnostic>) -> Self {
        let mut result = LintResult {
            files_processed: 1,
            ..LintResult::default()
        };

        for diag in &diagnostics {
            match diag.severity {
                Severity::Error => result.error_count += 1,
                Severity::Warning => result.warning_count += 1,
                Severity::Info => result.info_count += 1,
            }
        }

        if result.error_count > 0 {
            result.files_with_errors = 1;
        }
        if result.warning_count > 0 {
            result.files_with_warnings = 1;
        }

        result.diagnostics = diagnostics;
        result
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }

    /// Check if result is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        self.error_count == 0 && self.warning_count == 0
    }

    /// Get exit code (0 = success, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    /// Merge another result into this one
    pub fn merge(&mut self, other: LintResult) {
        self.diagnostics.extend(other.diagnostics);
        self.files_processed += other.files_processed;
        self.files_with_errors += other.files_with_errors;
        self.files_with_warnings += other.files_with_warnings;
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.info_count += other.info_count;
    }
}

/// The main linter engine
pub struct Engine {
    config: Config,
    rules: Vec<Arc<dyn Rule>>,
}

impl Engine {
    /// Create an engine running the built-in rules as `config` sets them up
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let rules = builtin_rules(&config)?;
        Ok(Self { config, rules })
    }

    /// Replace the rule set
    pub fn with_rules(mut self, rules: Vec<Arc<dyn Rule>>) -> Self {
        self.rules = rules;
        self
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lint multiple files
    pub fn lint(&self, files: &[PathBuf]) -> LintResult {
        let start = Instant::now();

        let results: Vec<LintResult> = match self.thread_pool() {
            Some(pool) => pool.install(|| files.par_iter().map(|f| self.lint_file(f)).collect()),
            None => files.iter().map(|f| self.lint_file(f)).collect(),
        };

        let mut combined = LintResult::default();
        for result in results {
            combined.merge(result);
        }

        combined.duration = start.elapsed();
        log::debug!(
            "linted {} file(s) in {:?}",
            combined.files_processed,
            combined.duration
        );
        combined
    }

    fn thread_pool(&self) -> Option<rayon::ThreadPool> {
        if !self.config.engine.parallel {
            return None;
        }

        let threads = if self.config.engine.jobs > 0 {
            self.config.engine.jobs
        } else {
            num_cpus::get()
        };

        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => Some(pool),
            Err(e) => {
                log::warn!("falling back to sequential linting: {}", e);
                None
            }
        }
    }

    /// Lint a single serialized template AST
    pub fn lint_file(&self, path: &Path) -> LintResult {
        log::trace!("linting {}", path.display());

        match source::load(path) {
            Ok((template, text)) => LintResult::for_file(self.lint_template(&template, &text, path)),
            Err(LoadError::Io(e)) => LintResult::for_file(vec![Diagnostic::new(
                "file-read-error",
                Severity::Error,
                &format!("Failed to read file: {}", e),
                Location::new(path.to_path_buf(), 0, 0),
            )]),
            Err(e @ LoadError::Json { .. }) => LintResult::for_file(vec![Diagnostic::new(
                "parse-error",
                Severity::Error,
                &format!("Parse error: {}", e),
                Location::new(path.to_path_buf(), 0, 0),
            )]),
        }
    }

    /// Run every enabled rule over one template
    ///
    /// Diagnostics come out in traversal order; for a node several rules
    /// report on, in rule order.
    pub fn lint_template(
        &self,
        template: &Template,
        source: &TemplateSource,
        file: &Path,
    ) -> Vec<Diagnostic> {
        let active: Vec<(&dyn Rule, Severity)> = self
            .rules
            .iter()
            .map(|rule| rule.as_ref())
            .filter(|rule| rule.is_enabled())
            .filter(|rule| !self.config.should_ignore_rule_for_file(rule.id(), file))
            .map(|rule| {
                let severity = self
                    .config
                    .get_severity_override(rule.id())
                    .unwrap_or(rule.meta().severity);
                (rule, severity)
            })
            .collect();

        if active.is_empty() {
            return Vec::new();
        }

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        walk(template, |path| {
            for (rule, severity) in &active {
                let mut ctx = RuleContext::new(rule.id(), *severity, file, source, &mut diagnostics);
                rule.visit(&path, &mut ctx);
            }
        });

        for diag in &mut diagnostics {
            let help = active
                .iter()
                .find(|(rule, _)| rule.id() == diag.rule_id)
                .and_then(|(rule, _)| rule.meta().description.as_deref());
            if let Some(help) = help {
                diag.help = Some(help.to_string());
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, HashPair, MustacheStatement, Position, SourceLocation, Statement};
    use serde_json::json;
    use tempfile::TempDir;

    fn enabled_config() -> Config {
        let mut config = Config::new();
        config.rules.insert("header-main".to_string(), json!(true));
        config
    }

    fn header_template() -> (Template, &'static str) {
        let src = r#"{{wrapper.header close="close"}}"#;
        let pair = HashPair::new("close", Expression::string("close")).at(SourceLocation::new(
            Position::new(1, 17),
            Position::new(1, 30),
        ));
        let mustache = MustacheStatement::new(Expression::path("wrapper.header"))
            .with_pair(pair)
            .at(SourceLocation::new(Position::new(1, 0), Position::new(1, 32)));
        let template = Template {
            body: vec![Statement::MustacheStatement(mustache)],
            loc: SourceLocation::default(),
        };
        (template, src)
    }

    fn write_fixture(dir: &TempDir, name: &str, template: &Template, hbs: Option<&str>) -> PathBuf {
        let path = dir.path().join(format!("{}.hbs.json", name));
        let mut ast = serde_json::to_value(template).unwrap();
        ast["type"] = json!("Template");
        std::fs::write(&path, ast.to_string()).unwrap();
        if let Some(hbs) = hbs {
            std::fs::write(dir.path().join(format!("{}.hbs", name)), hbs).unwrap();
        }
        path
    }

    #[test]
    fn test_lint_result_exit_code() {
        let mut result = LintResult::default();
        assert_eq!(result.exit_code(), 0);

        result.warning_count = 1;
        assert_eq!(result.exit_code(), 1);

        result.error_count = 1;
        assert_eq!(result.exit_code(), 2);
    }

    #[test]
    fn test_lint_result_is_clean() {
        let mut result = LintResult::default();
        assert!(result.is_clean());

        result.warning_count = 1;
        assert!(!result.is_clean());
        assert!(result.has_warnings());
        assert!(!result.has_errors());
    }

    #[test]
    fn test_lint_result_merge() {
        let mut result1 = LintResult {
            files_processed: 1,
            error_count: 2,
            ..LintResult::default()
        };
        let result2 = LintResult {
            files_processed: 1,
            warning_count: 3,
            ..LintResult::default()
        };

        result1.merge(result2);
        assert_eq!(result1.files_processed, 2);
        assert_eq!(result1.error_count, 2);
        assert_eq!(result1.warning_count, 3);
    }

    #[test]
    fn test_invalid_rule_value_fails_fast() {
        let mut config = Config::new();
        config.rules.insert("header-main".to_string(), json!("yes"));
        assert!(matches!(
            Engine::new(config),
            Err(ConfigError::InvalidRuleValue { .. })
        ));
    }

    #[test]
    fn test_disabled_rule_reports_nothing() {
        let engine = Engine::new(Config::new()).unwrap();
        let (template, src) = header_template();
        let diagnostics =
            engine.lint_template(&template, &TemplateSource::new(src), Path::new("a.hbs"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_lint_template_reports_with_help() {
        let engine = Engine::new(enabled_config()).unwrap();
        let (template, src) = header_template();
        let diagnostics =
            engine.lint_template(&template, &TemplateSource::new(src), Path::new("a.hbs"));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, "header-main");
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].source, r#"close="close""#);
        assert!(diagnostics[0].help.is_some());
    }

    #[test]
    fn test_severity_override_and_ignore() {
        let (template, src) = header_template();
        let source = TemplateSource::new(src);

        let mut config = enabled_config();
        config
            .severity
            .insert("header-main".to_string(), Severity::Warning);
        config
            .ignore
            .insert("legacy/**".to_string(), vec!["header-main".to_string()]);
        let engine = Engine::new(config).unwrap();

        let diagnostics = engine.lint_template(&template, &source, Path::new("app/a.hbs"));
        assert_eq!(diagnostics[0].severity, Severity::Warning);

        let diagnostics = engine.lint_template(&template, &source, Path::new("legacy/a.hbs"));
        assert!(diagnostics.is_empty());
    }

    struct EveryMustache(crate::rule::RuleMeta);

    impl Rule for EveryMustache {
        fn meta(&self) -> &crate::rule::RuleMeta {
            &self.0
        }

        fn visit(&self, path: &crate::rule::NodePath<'_>, ctx: &mut RuleContext<'_>) {
            if let crate::rule::NodeRef::Mustache(node) = path.node {
                let source = ctx.source_for(&node.loc);
                ctx.log(crate::rule::LogEntry {
                    message: "mustache".to_string(),
                    line: node.loc.start.line,
                    column: node.loc.start.column,
                    source,
                });
            }
        }
    }

    #[test]
    fn test_with_rules_replaces_builtin_rules() {
        let (template, src) = header_template();
        let rule: Arc<dyn Rule> = Arc::new(EveryMustache(
            crate::rule::RuleMeta::new("every-mustache").with_severity(Severity::Info),
        ));
        let engine = Engine::new(enabled_config()).unwrap().with_rules(vec![rule]);

        let diagnostics =
            engine.lint_template(&template, &TemplateSource::new(src), Path::new("a.hbs"));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, "every-mustache");
        assert_eq!(diagnostics[0].severity, Severity::Info);
        assert_eq!(diagnostics[0].source, src);
        assert!(diagnostics[0].help.is_none());

        let result = LintResult::for_file(diagnostics);
        assert_eq!(result.info_count, 1);
        assert!(result.is_clean());
    }

    #[test]
    fn test_lint_file_reads_sibling_source() {
        let dir = TempDir::new().unwrap();
        let (template, src) = header_template();
        let with_source = write_fixture(&dir, "with", &template, Some(src));
        let without_source = write_fixture(&dir, "without", &template, None);

        let engine = Engine::new(enabled_config()).unwrap();

        let result = engine.lint_file(&with_source);
        assert_eq!(result.error_count, 1);
        assert_eq!(result.files_with_errors, 1);
        assert_eq!(
            result.diagnostics[0].message,
            r#"Use of actions as Strings should be avoided. You used close="close"."#
        );

        let result = engine.lint_file(&without_source);
        assert_eq!(
            result.diagnostics[0].message,
            "Use of actions as Strings should be avoided. You used ."
        );
    }

    #[test]
    fn test_lint_file_errors_become_diagnostics() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("broken.hbs.json");
        std::fs::write(&broken, "{ not json").unwrap();

        let engine = Engine::new(enabled_config()).unwrap();

        let result = engine.lint_file(&broken);
        assert_eq!(result.diagnostics[0].rule_id, "parse-error");
        assert!(result.has_errors());

        let result = engine.lint_file(&dir.path().join("missing.hbs.json"));
        assert_eq!(result.diagnostics[0].rule_id, "file-read-error");
    }

    #[test]
    fn test_non_template_json_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let package = dir.path().join("package.json");
        std::fs::write(&package, r#"{"name": "app", "version": "1.0.0"}"#).unwrap();

        let engine = Engine::new(enabled_config()).unwrap();
        let result = engine.lint_file(&package);

        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].rule_id, "parse-error");
        assert_eq!(result.exit_code(), 2);
    }

    #[test]
    fn test_lint_many_files_sequential_and_parallel() {
        let dir = TempDir::new().unwrap();
        let (template, src) = header_template();
        let files: Vec<PathBuf> = (0..4)
            .map(|i| write_fixture(&dir, &format!("t{}", i), &template, Some(src)))
            .collect();

        let mut config = enabled_config();
        config.engine.jobs = 2;
        let parallel = Engine::new(config.clone()).unwrap().lint(&files);

        config.engine.parallel = false;
        let sequential = Engine::new(config).unwrap().lint(&files);

        assert_eq!(parallel.files_processed, 4);
        assert_eq!(parallel.error_count, 4);
        assert_eq!(parallel.exit_code(), 2);
        assert_eq!(parallel.diagnostics, sequential.diagnostics);
    }
}
