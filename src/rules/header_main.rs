//! `header-main`: string actions and missing arguments on header components
//!
//! Good:
//!
//! ```hbs
//! <HeaderMain @close={{this.close}} />
//! ```
//!
//! Bad:
//!
//! ```hbs
//! <HeaderMain @close="close" />
//! {{wrapper.headerOperationIndex}}
//! ```

use crate::ast::{Expression, SubExpression};
use crate::attrs::RawAttribute;
use crate::classify::{is_dynamic_component, is_header_family_member, is_primary_header};
use crate::config::{Config, ConfigError};
use crate::diagnostic::Severity;
use crate::registry::{is_forbidden_string_attr, mandatory_attrs};
use crate::rule::{LogEntry, NodePath, NodeRef, Rule, RuleCategory, RuleContext, RuleMeta};
use crate::view::InvocationView;
use serde_json::Value;

pub const RULE_ID: &str = "header-main";

/// Activation setting of the rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleConfig {
    pub enabled: bool,
}

impl RuleConfig {
    /// Accepts a boolean or nothing; anything else is rejected
    pub fn parse(value: Option<&Value>) -> Result<Self, ConfigError> {
        match value {
            None => Ok(Self { enabled: false }),
            Some(Value::Bool(enabled)) => Ok(Self { enabled: *enabled }),
            Some(other) => Err(ConfigError::invalid_rule_value(RULE_ID, other)),
        }
    }
}

pub struct HeaderMain {
    config: RuleConfig,
    meta: RuleMeta,
}

impl HeaderMain {
    pub fn new(config: RuleConfig) -> Self {
        Self {
            config,
            meta: meta(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        RuleConfig::parse(config.rule_value(RULE_ID)).map(Self::new)
    }

    pub fn config(&self) -> RuleConfig {
        self.config
    }

    fn handle_view(&self, view: &InvocationView<'_>, ctx: &mut RuleContext<'_>) {
        if is_primary_header(view) {
            self.check_attrs(view, ctx);
        }

        if is_header_family_member(view) {
            self.check_mandatory_attrs(view, ctx);
        }
    }

    /// Treat every `component` argument as a direct call carrying the view's attributes
    fn handle_paths<'a>(
        &self,
        view: &InvocationView<'a>,
        params: &'a [Expression],
        ctx: &mut RuleContext<'_>,
    ) {
        for param in params {
            if let Some(identifier) = param.original() {
                self.handle_view(&view.derive(identifier), ctx);
            }
        }
    }

    fn check_attrs(&self, view: &InvocationView<'_>, ctx: &mut RuleContext<'_>) {
        for entry in view.entries() {
            let forbidden = entry.name().is_some_and(is_forbidden_string_attr);
            if forbidden && entry.is_literal_string() {
                let source = ctx.source_for(&entry.loc);
                ctx.log(LogEntry {
                    message: format!(
                        "Use of actions as Strings should be avoided. You used {}.",
                        source
                    ),
                    line: entry.loc.start.line,
                    column: entry.loc.start.column,
                    source,
                });
            }
        }
    }

    // A single listed attribute is enough, despite the "all attrs" wording.
    fn check_mandatory_attrs(&self, view: &InvocationView<'_>, ctx: &mut RuleContext<'_>) {
        let name = view.component_name();
        let Some(mandatory) = mandatory_attrs(name) else {
            return;
        };

        let has_mandatory_attrs = view
            .entries()
            .iter()
            .any(|entry| entry.name().is_some_and(|n| mandatory.contains(&n)));

        if !has_mandatory_attrs {
            let source = ctx.source_for(&view.loc);
            ctx.log(LogEntry {
                message: format!(
                    "Component \"{}\" must implement all attrs: {}.",
                    name,
                    mandatory.join(", ")
                ),
                line: view.loc.start.line,
                column: view.loc.start.column,
                source,
            });
        }
    }
}

impl Rule for HeaderMain {
    fn meta(&self) -> &RuleMeta {
        &self.meta
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn visit(&self, path: &NodePath<'_>, ctx: &mut RuleContext<'_>) {
        match path.node {
            // <HeaderMain @close={{this.close}} />
            NodeRef::Element(node) => {
                self.handle_view(&InvocationView::from_element(node), ctx);
            }

            // {{#wrapper.headerOperationIndex}}{{/wrapper.headerOperationIndex}}
            NodeRef::Block(node) => {
                if let Some(view) = InvocationView::from_block(node) {
                    self.handle_view(&view, ctx);
                }
            }

            // {{wrapper.header}} and {{component 'wrapper.header'}}
            NodeRef::Mustache(node) => {
                if let Some(view) = InvocationView::from_mustache(node) {
                    self.handle_view(&view, ctx);

                    if is_dynamic_component(view.identifier) {
                        self.handle_paths(&view, &node.params, ctx);
                    }
                }
            }

            // {{foo a=(component 'wrapper.header')}} and {{foo (component 'wrapper.header')}}
            NodeRef::SubExpression(node) => {
                if let Some(view) = InvocationView::from_sub_expression(node) {
                    if is_dynamic_component(view.identifier) {
                        let view = view.with_inherited(enclosing_pairs(node, path.parent));
                        self.handle_paths(&view, &node.params, ctx);
                    }
                }
            }
        }
    }
}

/// Named arguments of the call `sub` is passed to, minus the one holding `sub`
///
/// Empty unless `sub` is a direct positional or named argument of a mustache,
/// block or sub-expression call.
fn enclosing_pairs<'a>(sub: &SubExpression, parent: Option<NodeRef<'a>>) -> Vec<RawAttribute<'a>> {
    let (params, hash) = match parent {
        Some(NodeRef::Mustache(node)) => (&node.params, &node.hash),
        Some(NodeRef::Block(node)) => (&node.params, &node.hash),
        Some(NodeRef::SubExpression(node)) => (&node.params, &node.hash),
        Some(NodeRef::Element(_)) | None => return Vec::new(),
    };

    let holds_sub =
        |expr: &Expression| matches!(expr, Expression::SubExpression(s) if std::ptr::eq(s, sub));

    let is_argument =
        params.iter().any(holds_sub) || hash.pairs.iter().any(|pair| holds_sub(&pair.value));
    if !is_argument {
        return Vec::new();
    }

    hash.pairs
        .iter()
        .filter(|pair| !holds_sub(&pair.value))
        .map(RawAttribute::HashPair)
        .collect()
}

pub fn meta() -> RuleMeta {
    RuleMeta::new(RULE_ID)
        .with_description(
            "Disallow string actions on the main header and require the mandatory \
             arguments of header operation components",
        )
        .with_severity(Severity::Error)
        .with_category(RuleCategory::Correctness)
        .with_example_bad("<HeaderMain @close=\"close\" />\n{{wrapper.headerOperationIndex}}")
        .with_example_good(
            "<HeaderMain @close={{this.close}} />\n{{wrapper.headerOperationIndex close=this.close}}",
        )
        .with_note(
            "Header operation components pass when any one of their listed \
             attributes is present, although the message asks for all of them.",
        )
}
