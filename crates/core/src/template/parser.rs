//! Builds the tag tree from lexer segments.
//!
//! Open blocks are tracked on an explicit stack, so nesting depth is bounded
//! by heap memory rather than the call stack.

use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::{ParseError, ParseResult};
use crate::model::{Assign, Branch, Conditional, OtherTag, TagNode};
use crate::template::lexer::{tokenize, RawTag, Segment};
use crate::template::value::{is_plain_name, parse_value};

/// Tags that open a block closed by `end<name>`.
const BLOCK_TAGS: &[&str] =
    &["if", "unless", "case", "for", "tablerow", "capture", "raw", "comment"];

/// Standard single tags; only consulted in strict mode.
const LEAF_TAGS: &[&str] = &[
    "assign",
    "break",
    "continue",
    "cycle",
    "decrement",
    "echo",
    "include",
    "increment",
    "layout",
    "render",
];

/// Parse `source` with the default configuration.
pub fn parse_template(source: &str) -> ParseResult<Vec<TagNode>> {
    parse_template_with(source, &AnalyzerConfig::default())
}

/// Parse `source` into an ordered tag tree.
pub fn parse_template_with(source: &str, config: &AnalyzerConfig) -> ParseResult<Vec<TagNode>> {
    let segments = tokenize(source)?;
    let mut root = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for segment in segments {
        match segment {
            Segment::Text { line } => current_body(&mut stack, &mut root)
                .push(TagNode::Other(OtherTag::new("text", line))),
            Segment::Output { line } => current_body(&mut stack, &mut root)
                .push(TagNode::Other(OtherTag::new("output", line))),
            Segment::Tag(tag) => handle_tag(tag, config, &mut stack, &mut root)?,
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(ParseError::UnclosedBlock { name: frame.tag, line: frame.line });
    }

    debug!(nodes = root.len(), "parsed template");
    Ok(root)
}

/// Which part of a block the parser is currently filling.
#[derive(Debug)]
enum Section {
    /// Before the first `when` of a `case`.
    Preamble,
    Branch(String),
    Else,
}

#[derive(Debug)]
struct Frame {
    tag: String,
    line: usize,
    conditional: bool,
    section: Section,
    body: Vec<TagNode>,
    branches: Vec<Branch>,
    else_body: Option<Vec<TagNode>>,
}

impl Frame {
    fn open(tag: RawTag, conditional: bool) -> Self {
        let section =
            if tag.name == "case" { Section::Preamble } else { Section::Branch(tag.args) };
        Self {
            tag: tag.name,
            line: tag.line,
            conditional,
            section,
            body: Vec::new(),
            branches: Vec::new(),
            else_body: None,
        }
    }

    fn close_section(&mut self, next: Section) {
        let body = std::mem::take(&mut self.body);
        match std::mem::replace(&mut self.section, next) {
            Section::Preamble => {}
            Section::Branch(condition) => self.branches.push(Branch { condition, body }),
            Section::Else => self.else_body = Some(body),
        }
    }

    fn into_node(mut self) -> TagNode {
        self.close_section(Section::Preamble);
        if self.conditional {
            TagNode::Conditional(Conditional {
                tag: self.tag,
                branches: self.branches,
                else_body: self.else_body,
            })
        } else {
            TagNode::Other(OtherTag::new(self.tag, self.line))
        }
    }
}

fn current_body<'s>(stack: &'s mut [Frame], root: &'s mut Vec<TagNode>) -> &'s mut Vec<TagNode> {
    match stack.last_mut() {
        Some(frame) => &mut frame.body,
        None => root,
    }
}

fn unexpected(tag: &RawTag) -> ParseError {
    ParseError::UnexpectedTag { name: tag.name.clone(), line: tag.line }
}

/// Innermost open block, if it is one of `owners`.
fn owning_frame<'s>(
    stack: &'s mut [Frame],
    tag: &RawTag,
    owners: &[&str],
) -> ParseResult<&'s mut Frame> {
    match stack.last_mut() {
        Some(frame) if owners.contains(&frame.tag.as_str()) => Ok(frame),
        _ => Err(unexpected(tag)),
    }
}

fn handle_tag(
    tag: RawTag,
    config: &AnalyzerConfig,
    stack: &mut Vec<Frame>,
    root: &mut Vec<TagNode>,
) -> ParseResult<()> {
    let name = tag.name.clone();
    match name.as_str() {
        "assign" => {
            let assign = parse_assign(&tag)?;
            current_body(stack, root).push(TagNode::Assign(assign));
        }
        "elsif" => {
            let frame = owning_frame(stack, &tag, &["if", "unless"])?;
            if !matches!(frame.section, Section::Branch(_)) {
                return Err(unexpected(&tag));
            }
            frame.close_section(Section::Branch(tag.args));
        }
        "when" => {
            let frame = owning_frame(stack, &tag, &["case"])?;
            if matches!(frame.section, Section::Else) {
                return Err(unexpected(&tag));
            }
            frame.close_section(Section::Branch(tag.args));
        }
        "else" => {
            let frame = owning_frame(stack, &tag, &["if", "unless", "case", "for"])?;
            if matches!(frame.section, Section::Else) {
                return Err(unexpected(&tag));
            }
            frame.close_section(Section::Else);
        }
        name if BLOCK_TAGS.contains(&name) => {
            let conditional = config.is_conditional(name);
            if !conditional {
                debug!(tag = name, line = tag.line, "treating block as opaque");
            }
            stack.push(Frame::open(tag, conditional));
        }
        name if name.strip_prefix("end").is_some_and(|opened| BLOCK_TAGS.contains(&opened)) => {
            let closes_top = stack.last().is_some_and(|frame| frame.tag == name[3..]);
            let frame = match stack.pop() {
                Some(frame) if closes_top => frame,
                _ => return Err(unexpected(&tag)),
            };
            let node = frame.into_node();
            current_body(stack, root).push(node);
        }
        name => {
            if config.strict_tags && !LEAF_TAGS.contains(&name) {
                return Err(ParseError::UnknownTag { name: tag.name, line: tag.line });
            }
            debug!(tag = name, line = tag.line, "skipping tag");
            current_body(stack, root).push(TagNode::Other(OtherTag::new(tag.name, tag.line)));
        }
    }
    Ok(())
}

/// `assign <name> = <value-expression>`.
fn parse_assign(tag: &RawTag) -> ParseResult<Assign> {
    let invalid = |reason: String| ParseError::InvalidAssign { line: tag.line, reason };

    let (name, value) =
        tag.args.split_once('=').ok_or_else(|| invalid("missing `=`".to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid("missing variable name".to_string()));
    }
    if !is_plain_name(name) {
        return Err(invalid(format!("invalid variable name `{name}`")));
    }
    if value.trim().is_empty() {
        return Err(invalid(format!("missing value for `{name}`")));
    }

    Ok(Assign {
        defined: name.to_string(),
        value: parse_value(value.trim(), tag.line)?,
        line: tag.line,
    })
}
