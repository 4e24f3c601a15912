//! Core data model for parsed templates.
//!
//! The template adapter produces an ordered tree of [`TagNode`]s. Only two
//! variants carry meaning for dependency analysis:
//! - [`Assign`]: binds a variable to a value expression.
//! - [`Conditional`]: guarded branches (plus optional else) holding nested tags.
//!
//! Everything else (loops, captures, output, literal text) is folded into
//! [`OtherTag`] and is opaque to the analysis layer.

use serde::{Deserialize, Serialize};

use crate::template::is_literal;

/// A single node in the parsed tag tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TagNode {
    Assign(Assign),
    Conditional(Conditional),
    Other(OtherTag),
}

impl TagNode {
    /// Short name used in logs and listings.
    pub fn kind_name(&self) -> &str {
        match self {
            TagNode::Assign(_) => "assign",
            TagNode::Conditional(c) => &c.tag,
            TagNode::Other(o) => &o.name,
        }
    }
}

/// `assign <defined> = <value>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assign {
    pub defined: String,
    pub value: ValueExpression,
    /// 1-based line of the tag in the source text.
    pub line: usize,
}

/// One guarded branch of a conditional tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Raw condition text. Never inspected for identifiers.
    pub condition: String,
    pub body: Vec<TagNode>,
}

/// `if`/`elsif`/`else` style tag (also `unless` and `case` when enabled).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conditional {
    /// Opening tag name (`if`, `unless`, `case`).
    pub tag: String,
    pub branches: Vec<Branch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub else_body: Option<Vec<TagNode>>,
}

/// Any tag or text segment not relevant to dependency analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherTag {
    /// Tag name, or `text` / `output` for non-tag segments.
    pub name: String,
    pub line: usize,
}

impl OtherTag {
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self { name: name.into(), line }
    }
}

/// Operand plus a (possibly empty) chain of filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueExpression {
    pub initial: Token,
    #[serde(default)]
    pub filters: Vec<FilterCall>,
}

/// `| name: arg, arg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCall {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Token>,
}

/// A value token, classified as literal or identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    Identifier(String),
    Literal(String),
}

impl Token {
    /// Classify raw token text with the adapter's literal rules.
    pub fn classify(text: &str) -> Self {
        if is_literal(text) {
            Token::Literal(text.to_string())
        } else {
            Token::Identifier(text.to_string())
        }
    }

    /// Identifier name, or `None` for literals.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Token::Identifier(name) => Some(name),
            Token::Literal(_) => None,
        }
    }
}
