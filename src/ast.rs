//! Glimmer template AST
//!
//! Serde models of the tree `@glimmer/syntax` produces, in its JSON shape.
//! Every node is tagged by its `type` field; node kinds the linter does not
//! care about collapse into an inert `Unknown` variant so newer parser
//! output still loads.

use serde::{Deserialize, Serialize};

/// A point in the template source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-based)
    #[serde(default)]
    pub line: usize,
    /// Column number (0-based, in characters)
    #[serde(default)]
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Span of a node in the template source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(default)]
    pub start: Position,
    #[serde(default)]
    pub end: Position,
}

impl SourceLocation {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Whether the parser supplied a position at all
    pub fn is_known(&self) -> bool {
        self.start.line > 0
    }
}

/// Root of a parsed template
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub body: Vec<Statement>,
    #[serde(default)]
    pub loc: SourceLocation,
}

/// Body of a block statement (`program` / `inverse`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub body: Vec<Statement>,
    #[serde(default)]
    pub loc: SourceLocation,
}

/// Top-level and child nodes of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Statement {
    ElementNode(ElementNode),
    MustacheStatement(MustacheStatement),
    BlockStatement(BlockStatement),
    TextNode(TextNode),
    CommentStatement(CommentStatement),
    MustacheCommentStatement(CommentStatement),
    #[serde(other)]
    Unknown,
}

/// Expressions: paths, literals and sub-expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    PathExpression(PathExpression),
    SubExpression(SubExpression),
    StringLiteral(StringLiteral),
    BooleanLiteral(Literal),
    NumberLiteral(Literal),
    NullLiteral(Literal),
    UndefinedLiteral(Literal),
    #[serde(other)]
    Unknown,
}

impl Expression {
    /// The `original` text of a path or string literal
    ///
    /// This is what the dynamic `component` helper resolves against, so
    /// `(component 'wrapper.header')` and `(component wrapper.header)` both
    /// yield `wrapper.header`.
    pub fn original(&self) -> Option<&str> {
        match self {
            Expression::PathExpression(path) => Some(&path.original),
            Expression::StringLiteral(lit) => Some(&lit.value),
            _ => None,
        }
    }

    /// Shorthand for a path expression
    pub fn path(original: &str) -> Self {
        Expression::PathExpression(PathExpression {
            original: original.to_string(),
            loc: SourceLocation::default(),
        })
    }

    /// Shorthand for a string literal
    pub fn string(value: &str) -> Self {
        Expression::StringLiteral(StringLiteral {
            value: value.to_string(),
            loc: SourceLocation::default(),
        })
    }
}

/// Attribute values on an element, and the parts of a concat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AttrValue {
    TextNode(TextNode),
    MustacheStatement(MustacheStatement),
    ConcatStatement(ConcatStatement),
    #[serde(other)]
    Unknown,
}

impl AttrValue {
    pub fn text(chars: &str) -> Self {
        AttrValue::TextNode(TextNode {
            chars: chars.to_string(),
            loc: SourceLocation::default(),
        })
    }
}

/// `<Tag ...>...</Tag>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub tag: String,
    #[serde(default)]
    pub attributes: Vec<AttrNode>,
    #[serde(default)]
    pub modifiers: Vec<ElementModifierStatement>,
    #[serde(default)]
    pub children: Vec<Statement>,
    #[serde(default)]
    pub loc: SourceLocation,
}

impl ElementNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            modifiers: Vec::new(),
            children: Vec::new(),
            loc: SourceLocation::default(),
        }
    }

    pub fn with_attr(mut self, attr: AttrNode) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn at(mut self, loc: SourceLocation) -> Self {
        self.loc = loc;
        self
    }
}

/// `name=value` on an element; `name` keeps its `@` sigil for arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttrNode {
    pub name: String,
    pub value: AttrValue,
    #[serde(default)]
    pub loc: SourceLocation,
}

impl AttrNode {
    pub fn new(name: &str, value: AttrValue) -> Self {
        Self {
            name: name.to_string(),
            value,
            loc: SourceLocation::default(),
        }
    }

    pub fn at(mut self, loc: SourceLocation) -> Self {
        self.loc = loc;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    #[serde(default)]
    pub chars: String,
    #[serde(default)]
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentStatement {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub loc: SourceLocation,
}

/// `{{path param key=value}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MustacheStatement {
    pub path: Expression,
    #[serde(default)]
    pub params: Vec<Expression>,
    #[serde(default)]
    pub hash: Hash,
    #[serde(default)]
    pub loc: SourceLocation,
}

impl MustacheStatement {
    pub fn new(path: Expression) -> Self {
        Self {
            path,
            params: Vec::new(),
            hash: Hash::default(),
            loc: SourceLocation::default(),
        }
    }

    pub fn with_param(mut self, param: Expression) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_pair(mut self, pair: HashPair) -> Self {
        self.hash.pairs.push(pair);
        self
    }

    pub fn at(mut self, loc: SourceLocation) -> Self {
        self.loc = loc;
        self
    }
}

/// `{{#path param key=value}}...{{else}}...{{/path}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockStatement {
    pub path: Expression,
    #[serde(default)]
    pub params: Vec<Expression>,
    #[serde(default)]
    pub hash: Hash,
    #[serde(default)]
    pub program: Block,
    #[serde(default)]
    pub inverse: Option<Block>,
    #[serde(default)]
    pub loc: SourceLocation,
}

impl BlockStatement {
    pub fn new(path: Expression) -> Self {
        Self {
            path,
            params: Vec::new(),
            hash: Hash::default(),
            program: Block::default(),
            inverse: None,
            loc: SourceLocation::default(),
        }
    }

    pub fn with_pair(mut self, pair: HashPair) -> Self {
        self.hash.pairs.push(pair);
        self
    }

    pub fn at(mut self, loc: SourceLocation) -> Self {
        self.loc = loc;
        self
    }
}

/// `(path param key=value)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubExpression {
    pub path: Box<Expression>,
    #[serde(default)]
    pub params: Vec<Expression>,
    #[serde(default)]
    pub hash: Hash,
    #[serde(default)]
    pub loc: SourceLocation,
}

impl SubExpression {
    pub fn new(path: Expression) -> Self {
        Self {
            path: Box::new(path),
            params: Vec::new(),
            hash: Hash::default(),
            loc: SourceLocation::default(),
        }
    }

    pub fn with_param(mut self, param: Expression) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_pair(mut self, pair: HashPair) -> Self {
        self.hash.pairs.push(pair);
        self
    }

    pub fn at(mut self, loc: SourceLocation) -> Self {
        self.loc = loc;
        self
    }
}

/// `{{modifier param key=value}}` inside an element's opening tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementModifierStatement {
    pub path: Expression,
    #[serde(default)]
    pub params: Vec<Expression>,
    #[serde(default)]
    pub hash: Hash,
    #[serde(default)]
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcatStatement {
    #[serde(default)]
    pub parts: Vec<AttrValue>,
    #[serde(default)]
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathExpression {
    pub original: String,
    #[serde(default)]
    pub loc: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringLiteral {
    pub value: String,
    #[serde(default)]
    pub loc: SourceLocation,
}

/// Boolean, number, null and undefined literals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub loc: SourceLocation,
}

/// Named arguments of a call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hash {
    #[serde(default)]
    pub pairs: Vec<HashPair>,
    #[serde(default)]
    pub loc: SourceLocation,
}

/// `key=value` inside a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashPair {
    pub key: String,
    pub value: Expression,
    #[serde(default)]
    pub loc: SourceLocation,
}

impl HashPair {
    pub fn new(key: &str, value: Expression) -> Self {
        Self {
            key: key.to_string(),
            value,
            loc: SourceLocation::default(),
        }
    }

    pub fn at(mut self, loc: SourceLocation) -> Self {
        self.loc = loc;
        self
    }
}
