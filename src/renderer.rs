//! Nested delimiter rendering
//!
//! Delimiters are classified from their surroundings and paired on a stack of open frames.
//! Each frame owns the output written since its opener; a matching closer wraps that output
//! in the tag and hands it to the enclosing frame. Frames still open when the input ends are
//! written back as literal delimiter text, so unbalanced HTML is never produced.
//!
//! The stack is explicit rather than recursive, so deeply nested input cannot exhaust the
//! call stack.

use crate::automaton::{DelimiterAutomaton, Scan, Token};
use crate::config::Config;
use crate::error::EngineError;
use crate::html::{HtmlSink, HtmlWriter};
use crate::tags::{Tag, TagKind, TagTable};

/// Delimiter-to-HTML engine.
///
/// Built once from a [`TagTable`]; afterwards it is read-only and can be shared between
/// threads. Every call to [`render`](Self::render) owns its own pairing stack.
#[derive(Debug, Clone)]
pub struct Renderer {
    table: TagTable,
    automaton: DelimiterAutomaton<String>,
}

impl Renderer {
    pub fn new(table: TagTable) -> Result<Self, EngineError> {
        let mut automaton = DelimiterAutomaton::new();
        for (delimiter, name) in table.iter() {
            automaton.add(delimiter, name.to_string())?;
        }
        automaton.build();

        log::debug!(
            "Renderer ready with {} delimiters, {} nesting rules",
            automaton.pattern_count(),
            table.nesting_rules().len()
        );
        Ok(Self { table, automaton })
    }

    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        Self::new(TagTable::from_config(config)?)
    }

    /// Raw token stream for `text`
    pub fn tokens<'a>(&'a self, text: &'a str) -> Result<Scan<'a, String>, EngineError> {
        self.automaton.scan(text)
    }

    /// Render `markdown` to HTML.
    ///
    /// Text without delimiters comes back unchanged.
    pub fn render(&self, markdown: &str) -> Result<String, EngineError> {
        self.render_with::<HtmlWriter>(markdown)
    }

    /// Render into sinks of type `S`.
    pub fn render_with<S: HtmlSink>(&self, markdown: &str) -> Result<String, EngineError> {
        let mut pass = Pass::<S>::new(markdown, &self.table);

        for token in self.automaton.scan(markdown)? {
            match token {
                Token::Literal { ch, .. } => pass.out().write_char(ch),
                Token::Pattern {
                    pattern,
                    value,
                    position,
                } => pass.place(Tag::classify(markdown, pattern, value, position)),
            }
        }

        Ok(pass.finish())
    }

    /// Human-readable token listing, one line per literal run or delimiter.
    ///
    /// Used by the `tokens` command for inspecting how input is classified.
    pub fn describe_tokens(&self, text: &str) -> Result<String, EngineError> {
        let mut lines = Vec::new();
        let mut run = String::new();
        let mut run_start = 0;

        for token in self.tokens(text)? {
            match token {
                Token::Literal { ch, position } => {
                    if run.is_empty() {
                        run_start = position;
                    }
                    run.push(ch);
                }
                Token::Pattern {
                    pattern,
                    value,
                    position,
                } => {
                    if !run.is_empty() {
                        lines.push(format!("{} text {:?}", run_start, run));
                        run.clear();
                    }
                    let tag = Tag::classify(text, pattern, value, position);
                    let escaped = if tag.is_escaped(text) { " escaped" } else { "" };
                    lines.push(format!(
                        "{} delimiter {:?} {} {}{}",
                        position,
                        pattern,
                        value,
                        tag.kind.as_str(),
                        escaped
                    ));
                }
            }
        }
        if !run.is_empty() {
            lines.push(format!("{} text {:?}", run_start, run));
        }

        Ok(lines.join("\n"))
    }
}

/// An opener waiting for its closer, with the output produced since it
struct Frame<'a, S> {
    opener: Tag<'a>,
    out: S,
}

/// State of a single render call
struct Pass<'a, S> {
    text: &'a str,
    table: &'a TagTable,
    root: S,
    stack: Vec<Frame<'a, S>>,
}

impl<'a, S: HtmlSink> Pass<'a, S> {
    fn new(text: &'a str, table: &'a TagTable) -> Self {
        Self {
            text,
            table,
            root: S::default(),
            stack: Vec::new(),
        }
    }

    /// Sink of the innermost open frame
    fn out(&mut self) -> &mut S {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.out,
            None => &mut self.root,
        }
    }

    fn place(&mut self, tag: Tag<'a>) {
        let literal = tag.is_escaped(self.text)
            || !self
                .table
                .permits(&tag, self.stack.iter().map(|frame| &frame.opener));
        let kind = if literal { TagKind::Fake } else { tag.kind };

        match kind {
            TagKind::Opening => {
                log::trace!("Open {} at {}", tag.name, tag.position);
                self.stack.push(Frame {
                    opener: tag,
                    out: S::default(),
                });
            }
            TagKind::Closing if self.closes_innermost(&tag) => self.close(),
            _ => {
                log::trace!(
                    "Literal {:?} ({}) at {}",
                    tag.definition,
                    kind.as_str(),
                    tag.position
                );
                self.out().write_text(tag.definition);
            }
        }
    }

    fn closes_innermost(&self, tag: &Tag<'_>) -> bool {
        self.stack
            .last()
            .is_some_and(|frame| tag.is_pair_to(&frame.opener))
    }

    fn close(&mut self) {
        if let Some(frame) = self.stack.pop() {
            log::trace!("Close {} opened at {}", frame.opener.name, frame.opener.position);
            let content = frame.out.finish();
            self.out().write_tag(frame.opener.name, &content);
        }
    }

    fn finish(mut self) -> String {
        while let Some(frame) = self.stack.pop() {
            log::trace!(
                "Unpaired {:?} at {} left literal",
                frame.opener.definition,
                frame.opener.position
            );
            let content = frame.out.finish();
            let out = self.out();
            out.write_text(frame.opener.definition);
            out.write_text(&content);
        }
        self.root.finish()
    }
}
