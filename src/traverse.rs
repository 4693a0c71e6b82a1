//! Depth-first walk over a template
//!
//! Calls back for every element, mustache, block and sub-expression, parents
//! before children, in source order. Each callback receives the nearest
//! enclosing visited node as well, so a sub-expression can tell which call it
//! is an argument of.

use crate::ast::{AttrValue, Expression, Hash, Statement, Template};
use crate::rule::{NodePath, NodeRef};

/// Walk `template`, calling `visit` for every invocation-shaped node
pub fn walk<'a, F>(template: &'a Template, mut visit: F)
where
    F: FnMut(NodePath<'a>),
{
    let mut walker = Walker { visit: &mut visit };
    walker.statements(&template.body, None);
}

struct Walker<'f, F> {
    visit: &'f mut F,
}

impl<'a, F> Walker<'_, F>
where
    F: FnMut(NodePath<'a>),
{
    fn statements(&mut self, body: &'a [Statement], parent: Option<NodeRef<'a>>) {
        for statement in body {
            self.statement(statement, parent);
        }
    }

    fn statement(&mut self, statement: &'a Statement, parent: Option<NodeRef<'a>>) {
        match statement {
            Statement::ElementNode(element) => {
                let node = NodeRef::Element(element);
                (self.visit)(NodePath::new(node, parent));

                for attr in &element.attributes {
                    self.attr_value(&attr.value, node);
                }
                for modifier in &element.modifiers {
                    self.expression(&modifier.path, node);
                    self.call_arguments(&modifier.params, &modifier.hash, node);
                }
                self.statements(&element.children, Some(node));
            }
            Statement::MustacheStatement(mustache) => {
                let node = NodeRef::Mustache(mustache);
                (self.visit)(NodePath::new(node, parent));

                self.expression(&mustache.path, node);
                self.call_arguments(&mustache.params, &mustache.hash, node);
            }
            Statement::BlockStatement(block) => {
                let node = NodeRef::Block(block);
                (self.visit)(NodePath::new(node, parent));

                self.expression(&block.path, node);
                self.call_arguments(&block.params, &block.hash, node);
                self.statements(&block.program.body, Some(node));
                if let Some(inverse) = &block.inverse {
                    self.statements(&inverse.body, Some(node));
                }
            }
            Statement::TextNode(_)
            | Statement::CommentStatement(_)
            | Statement::MustacheCommentStatement(_)
            | Statement::Unknown => {}
        }
    }

    fn attr_value(&mut self, value: &'a AttrValue, parent: NodeRef<'a>) {
        match value {
            AttrValue::MustacheStatement(mustache) => {
                let node = NodeRef::Mustache(mustache);
                (self.visit)(NodePath::new(node, Some(parent)));

                self.expression(&mustache.path, node);
                self.call_arguments(&mustache.params, &mustache.hash, node);
            }
            AttrValue::ConcatStatement(concat) => {
                for part in &concat.parts {
                    self.attr_value(part, parent);
                }
            }
            AttrValue::TextNode(_) | AttrValue::Unknown => {}
        }
    }

    fn call_arguments(&mut self, params: &'a [Expression], hash: &'a Hash, parent: NodeRef<'a>) {
        for param in params {
            self.expression(param, parent);
        }
        for pair in &hash.pairs {
            self.expression(&pair.value, parent);
        }
    }

    fn expression(&mut self, expression: &'a Expression, parent: NodeRef<'a>) {
        if let Expression::SubExpression(sub) = expression {
            let node = NodeRef::SubExpression(sub);
            (self.visit)(NodePath::new(node, Some(parent)));

            self.expression(&sub.path, node);
            self.call_arguments(&sub.params, &sub.hash, node);
        }
    }
}
