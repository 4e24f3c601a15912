//! Splits template source into text, output and tag tokens.

use crate::error::{ParseError, ParseResult};

/// A lexical segment of the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text { line: usize },
    Output { line: usize },
    Tag(RawTag),
}

/// A `{% name args %}` tag with delimiters and whitespace control stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub name: String,
    pub args: String,
    pub line: usize,
}

/// Tags whose body is skipped verbatim up to the matching end tag.
const VERBATIM_TAGS: &[&str] = &["raw", "comment"];

/// Tokenize `source` into segments in document order.
pub fn tokenize(source: &str) -> ParseResult<Vec<Segment>> {
    let mut lexer = Lexer { source, pos: 0, line: 1, segments: Vec::new() };
    lexer.run()?;
    Ok(lexer.segments)
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    segments: Vec<Segment>,
}

impl<'a> Lexer<'a> {
    fn run(&mut self) -> ParseResult<()> {
        while self.pos < self.source.len() {
            let rest = &self.source[self.pos..];
            let next_open = match (rest.find("{%"), rest.find("{{")) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            };
            match next_open {
                Some(0) => {
                    if rest.starts_with("{%") {
                        self.lex_tag()?;
                    } else {
                        self.lex_output()?;
                    }
                }
                Some(offset) => self.push_text(offset),
                None => self.push_text(rest.len()),
            }
        }
        Ok(())
    }

    fn push_text(&mut self, len: usize) {
        self.segments.push(Segment::Text { line: self.line });
        self.advance(len);
    }

    fn advance(&mut self, len: usize) {
        let consumed = &self.source[self.pos..self.pos + len];
        self.line += consumed.matches('\n').count();
        self.pos += len;
    }

    fn lex_output(&mut self) -> ParseResult<()> {
        let line = self.line;
        let rest = &self.source[self.pos..];
        let close = rest.find("}}").ok_or(ParseError::UnclosedOutput { line })?;
        self.segments.push(Segment::Output { line });
        self.advance(close + 2);
        Ok(())
    }

    fn lex_tag(&mut self) -> ParseResult<()> {
        let line = self.line;
        let rest = &self.source[self.pos..];
        let close = rest.find("%}").ok_or(ParseError::UnclosedTag { line })?;
        let raw_inner = &rest[2..close];
        self.advance(close + 2);

        let inner = strip_whitespace_control(raw_inner);
        // `{% # note %}` is an inline comment.
        if inner.starts_with('#') {
            return Ok(());
        }

        let (name, args) = split_name(inner);
        if name.is_empty() {
            return Err(ParseError::MissingTagName { line });
        }

        if name == "liquid" {
            self.push_liquid_lines(raw_inner, line);
            return Ok(());
        }

        self.segments.push(Segment::Tag(RawTag {
            name: name.to_string(),
            args: args.to_string(),
            line,
        }));

        if VERBATIM_TAGS.contains(&name) {
            self.skip_verbatim(name, line)?;
        }
        Ok(())
    }

    /// Each line of a `{% liquid %}` body is a tag without delimiters.
    fn push_liquid_lines(&mut self, raw_inner: &str, line: usize) {
        let Some(start) = raw_inner.find("liquid") else {
            return;
        };
        let line = line + raw_inner[..start].matches('\n').count();
        let body = raw_inner[start + "liquid".len()..].trim_end_matches('-');
        for (index, text) in body.lines().enumerate() {
            let text = text.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let (name, args) = split_name(text);
            self.segments.push(Segment::Tag(RawTag {
                name: name.to_string(),
                args: args.to_string(),
                line: line + index,
            }));
        }
    }

    /// Skip to the `end<name>` tag, emitting it so the parser sees a closed block.
    fn skip_verbatim(&mut self, name: &str, line: usize) -> ParseResult<()> {
        let end_name = format!("end{name}");
        loop {
            let rest = &self.source[self.pos..];
            let Some(open) = rest.find("{%") else {
                return Err(ParseError::UnclosedBlock { name: name.to_string(), line });
            };
            let Some(close) = rest[open..].find("%}") else {
                return Err(ParseError::UnclosedBlock { name: name.to_string(), line });
            };
            let inner = strip_whitespace_control(&rest[open + 2..open + close]);
            let (candidate, _) = split_name(inner);
            self.advance(open);
            let end_line = self.line;
            self.advance(close + 2);
            if candidate == end_name {
                self.segments.push(Segment::Tag(RawTag {
                    name: end_name,
                    args: String::new(),
                    line: end_line,
                }));
                return Ok(());
            }
        }
    }
}

fn strip_whitespace_control(inner: &str) -> &str {
    let inner = inner.strip_prefix('-').unwrap_or(inner);
    let inner = inner.strip_suffix('-').unwrap_or(inner);
    inner.trim()
}

fn split_name(inner: &str) -> (&str, &str) {
    match inner.find(char::is_whitespace) {
        Some(idx) => (&inner[..idx], inner[idx..].trim()),
        None => (inner, ""),
    }
}
