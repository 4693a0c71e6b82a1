//! Attribute normalization
//!
//! The same argument is spelled two ways depending on invocation syntax:
//!
//! ```text
//! {{wrapper.header close="close"}}   HashPair { key: "close", value: StringLiteral }
//! <HeaderMain @close="close" />      AttrNode { name: "@close", value: TextNode }
//! ```
//!
//! Both collapse into an [`AttributeEntry`] so the checks never care which
//! syntax produced them.

use crate::ast::{AttrNode, AttrValue, Expression, HashPair, SourceLocation};
use std::borrow::Cow;

/// Marks an element attribute as a component argument
pub const ARGUMENT_SIGIL: char = '@';

/// A raw attribute borrowed from the AST
#[derive(Debug, Clone, Copy)]
pub enum RawAttribute<'a> {
    /// `key=value` in mustache, block and sub-expression calls
    HashPair(&'a HashPair),
    /// `name=value` on an element
    Element(&'a AttrNode),
}

impl<'a> RawAttribute<'a> {
    pub fn from_pairs(pairs: &'a [HashPair]) -> Vec<Self> {
        pairs.iter().map(RawAttribute::HashPair).collect()
    }

    pub fn from_attributes(attrs: &'a [AttrNode]) -> Vec<Self> {
        attrs.iter().map(RawAttribute::Element).collect()
    }
}

/// What kind of value an attribute carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A string literal in call syntax: `close="close"`
    BareString,
    /// Plain text in element syntax: `@close="close"`
    TextTemplate,
    /// Anything bound or computed
    Other,
}

impl ValueKind {
    pub fn is_literal_string(self) -> bool {
        matches!(self, ValueKind::BareString | ValueKind::TextTemplate)
    }
}

/// Syntax-independent view of one attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeEntry<'a> {
    /// Argument name without its sigil
    ///
    /// `None` for element attributes without `@` (plain HTML attributes),
    /// which have no argument name.
    pub name: Option<Cow<'a, str>>,
    pub value_kind: ValueKind,
    pub loc: SourceLocation,
}

impl AttributeEntry<'_> {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_literal_string(&self) -> bool {
        self.value_kind.is_literal_string()
    }
}

/// Normalize one attribute
///
/// A name containing the sigil is element syntax: the first sigil is
/// stripped and only a text value counts as a literal. Everything else is
/// read as a hash pair, where only a string literal counts.
pub fn normalize(raw: RawAttribute<'_>) -> AttributeEntry<'_> {
    match raw {
        RawAttribute::Element(attr) if attr.name.contains(ARGUMENT_SIGIL) => AttributeEntry {
            name: Some(strip_sigil(&attr.name)),
            value_kind: match attr.value {
                AttrValue::TextNode(_) => ValueKind::TextTemplate,
                _ => ValueKind::Other,
            },
            loc: attr.loc,
        },
        RawAttribute::Element(attr) => AttributeEntry {
            name: None,
            value_kind: ValueKind::Other,
            loc: attr.loc,
        },
        RawAttribute::HashPair(pair) => AttributeEntry {
            name: Some(Cow::Borrowed(pair.key.as_str())),
            value_kind: match pair.value {
                Expression::StringLiteral(_) => ValueKind::BareString,
                _ => ValueKind::Other,
            },
            loc: pair.loc,
        },
    }
}

/// Normalize a whole attribute list, preserving order
pub fn normalize_all<'a>(attrs: &[RawAttribute<'a>]) -> Vec<AttributeEntry<'a>> {
    attrs.iter().map(|raw| normalize(*raw)).collect()
}

fn strip_sigil(name: &str) -> Cow<'_, str> {
    match name.strip_prefix(ARGUMENT_SIGIL) {
        Some(rest) => Cow::Borrowed(rest),
        None => Cow::Owned(name.replacen(ARGUMENT_SIGIL, "", 1)),
    }
}
