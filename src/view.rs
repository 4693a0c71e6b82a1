//! Canonical view of a component invocation
//!
//! A component can be invoked as an element, a mustache, a block, or through
//! the `component` helper. Each shape is adapted into an [`InvocationView`]
//! so validation runs on one representation.

use crate::ast::{BlockStatement, ElementNode, MustacheStatement, SourceLocation, SubExpression};
use crate::attrs::{normalize_all, AttributeEntry, RawAttribute};

/// Which syntax family produced the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Mustache, block and sub-expression calls, identified by `path.original`
    Call,
    /// Angle-bracket elements, identified by `tag`
    Element,
}

/// Shape-independent invocation: identifier, attributes, location
#[derive(Debug, Clone)]
pub struct InvocationView<'a> {
    pub identifier: &'a str,
    pub shape: Shape,
    pub attributes: Vec<RawAttribute<'a>>,
    pub loc: SourceLocation,
}

impl<'a> InvocationView<'a> {
    pub fn from_element(node: &'a ElementNode) -> Self {
        Self {
            identifier: &node.tag,
            shape: Shape::Element,
            attributes: RawAttribute::from_attributes(&node.attributes),
            loc: node.loc,
        }
    }

    /// `None` when the callee is not a path or string (e.g. `{{(helper)}}`)
    pub fn from_mustache(node: &'a MustacheStatement) -> Option<Self> {
        Some(Self {
            identifier: node.path.original()?,
            shape: Shape::Call,
            attributes: RawAttribute::from_pairs(&node.hash.pairs),
            loc: node.loc,
        })
    }

    pub fn from_block(node: &'a BlockStatement) -> Option<Self> {
        Some(Self {
            identifier: node.path.original()?,
            shape: Shape::Call,
            attributes: RawAttribute::from_pairs(&node.hash.pairs),
            loc: node.loc,
        })
    }

    pub fn from_sub_expression(node: &'a SubExpression) -> Option<Self> {
        Some(Self {
            identifier: node.path.original()?,
            shape: Shape::Call,
            attributes: RawAttribute::from_pairs(&node.hash.pairs),
            loc: node.loc,
        })
    }

    /// Same attributes and location under another identifier
    ///
    /// Used for `(component 'name')`: the helper's arguments belong to the
    /// component it resolves to. The AST is left untouched.
    pub fn derive(&self, identifier: &'a str) -> Self {
        Self {
            identifier,
            shape: Shape::Call,
            attributes: self.attributes.clone(),
            loc: self.loc,
        }
    }

    /// Append attributes supplied by an enclosing call
    pub fn with_inherited(mut self, inherited: impl IntoIterator<Item = RawAttribute<'a>>) -> Self {
        self.attributes.extend(inherited);
        self
    }

    pub fn entries(&self) -> Vec<AttributeEntry<'a>> {
        normalize_all(&self.attributes)
    }

    /// Last `.` segment of the identifier: `wrapper.headerOperationIndex` -> `headerOperationIndex`
    pub fn component_name(&self) -> &'a str {
        self.identifier
            .rsplit('.')
            .next()
            .unwrap_or(self.identifier)
    }
}
