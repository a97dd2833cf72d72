//! Multi-pattern delimiter matcher (Aho-Corasick trie with failure links)
//!
//! The automaton splits text into literal characters and delimiter occurrences in a single
//! left-to-right pass. When several delimiters start at the same position the longest one
//! wins, so with `_` and `__` registered the text `__x` yields one `__` occurrence rather
//! than two `_` occurrences.
//!
//! Nodes live in an arena and refer to each other by index. Parent and failure links are
//! plain indices, so the failure graph (which converges on the root) needs no shared
//! ownership.

use std::collections::{BTreeMap, VecDeque};

use crate::error::EngineError;

type NodeId = usize;

const ROOT: NodeId = 0;

/// A registered delimiter stored on the node that completes it
#[derive(Debug, Clone)]
struct Terminal<V> {
    pattern: String,
    value: V,
}

#[derive(Debug, Clone)]
struct Node<V> {
    symbol: char,
    parent: NodeId,
    depth: usize, // byte length of the path from the root
    children: BTreeMap<char, NodeId>,
    fail: NodeId,
    terminal: Option<Terminal<V>>,
}

impl<V> Node<V> {
    fn new(symbol: char, parent: NodeId, depth: usize) -> Self {
        Self {
            symbol,
            parent,
            depth,
            children: BTreeMap::new(),
            fail: ROOT,
            terminal: None,
        }
    }
}

/// One step of a scan: either a plain character or a delimiter occurrence.
///
/// Positions are byte offsets into the scanned text. For a delimiter the position is that
/// of its first character.
#[derive(Debug, PartialEq, Eq)]
pub enum Token<'a, V> {
    Literal {
        ch: char,
        position: usize,
    },
    Pattern {
        pattern: &'a str,
        value: &'a V,
        position: usize,
    },
}

impl<V> Clone for Token<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Token<'_, V> {}

impl<V> Token<'_, V> {
    pub fn position(&self) -> usize {
        match self {
            Token::Literal { position, .. } | Token::Pattern { position, .. } => *position,
        }
    }
}

/// Trie of delimiter strings with failure links.
///
/// Patterns are registered with [`add`](Self::add); [`build`](Self::build) must run before
/// [`scan`](Self::scan), and again after any later `add`.
#[derive(Debug, Clone)]
pub struct DelimiterAutomaton<V> {
    nodes: Vec<Node<V>>,
    patterns: usize,
    built: bool,
}

impl<V> Default for DelimiterAutomaton<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> DelimiterAutomaton<V> {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new('\0', ROOT, 0)],
            patterns: 0,
            built: false,
        }
    }

    /// Register `pattern`, associating it with `value`.
    ///
    /// Registering the same pattern twice replaces its value. Any previous build is
    /// invalidated.
    pub fn add(&mut self, pattern: &str, value: V) -> Result<(), EngineError> {
        if pattern.is_empty() {
            return Err(EngineError::InvalidArgument(
                "delimiter pattern must not be empty".to_string(),
            ));
        }

        let mut node = ROOT;
        for ch in pattern.chars() {
            node = match self.child(node, ch) {
                Some(child) => child,
                None => {
                    let id = self.nodes.len();
                    let depth = self.nodes[node].depth + ch.len_utf8();
                    self.nodes.push(Node::new(ch, node, depth));
                    self.nodes[node].children.insert(ch, id);
                    id
                }
            };
        }

        let previous = self.nodes[node].terminal.replace(Terminal {
            pattern: pattern.to_string(),
            value,
        });
        if previous.is_none() {
            self.patterns += 1;
        }
        self.built = false;
        Ok(())
    }

    /// Compute failure links breadth-first.
    ///
    /// A node's failure link points at the longest proper suffix of its path that is also a
    /// path from the root. Safe to run repeatedly.
    pub fn build(&mut self) {
        let mut queue = VecDeque::from([ROOT]);

        while let Some(id) = queue.pop_front() {
            queue.extend(self.nodes[id].children.values().copied());

            if id == ROOT {
                self.nodes[ROOT].fail = ROOT;
                continue;
            }

            let symbol = self.nodes[id].symbol;
            let parent = self.nodes[id].parent;
            let mut fail = self.nodes[parent].fail;
            while fail != ROOT && self.child(fail, symbol).is_none() {
                fail = self.nodes[fail].fail;
            }

            self.nodes[id].fail = self
                .child(fail, symbol)
                .filter(|&target| target != id)
                .unwrap_or(ROOT);
        }

        self.built = true;
        log::debug!(
            "Built delimiter automaton: {} patterns, {} nodes",
            self.patterns,
            self.nodes.len()
        );
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Number of distinct registered patterns
    pub fn pattern_count(&self) -> usize {
        self.patterns
    }

    /// Lazily tokenize `text`.
    pub fn scan<'a>(&'a self, text: &'a str) -> Result<Scan<'a, V>, EngineError> {
        if !self.built {
            return Err(EngineError::UnbuiltAutomaton);
        }

        Ok(Scan {
            automaton: self,
            text,
            pos: 0,
            state: ROOT,
            resuming: false,
        })
    }

    fn child(&self, node: NodeId, ch: char) -> Option<NodeId> {
        self.nodes[node].children.get(&ch).copied()
    }

    /// Classic goto: follow failure links until a transition on `ch` exists.
    fn goto(&self, mut node: NodeId, ch: char) -> NodeId {
        while node != ROOT && self.child(node, ch).is_none() {
            node = self.nodes[node].fail;
        }
        self.child(node, ch).unwrap_or(ROOT)
    }

    /// Deepest node on the path to `node` (inclusive) that completes a pattern
    fn longest_terminal_prefix(&self, mut node: NodeId) -> Option<NodeId> {
        while node != ROOT {
            if self.nodes[node].terminal.is_some() {
                return Some(node);
            }
            node = self.nodes[node].parent;
        }
        None
    }

    /// Node on the failure chain of `node` whose path is exactly `depth` bytes long
    fn suffix_state(&self, node: NodeId, depth: usize) -> Option<NodeId> {
        let mut current = self.nodes[node].fail;
        while self.nodes[current].depth > depth {
            current = self.nodes[current].fail;
        }
        (self.nodes[current].depth == depth).then_some(current)
    }
}

/// Single-pass token producer returned by [`DelimiterAutomaton::scan`].
///
/// Holds its own cursor and state, so independent scans over one automaton never interfere.
#[derive(Debug)]
pub struct Scan<'a, V> {
    automaton: &'a DelimiterAutomaton<V>,
    text: &'a str,
    pos: usize,
    state: NodeId,
    // The state was restored from a failure link and has not been resolved yet
    resuming: bool,
}

impl<'a, V> Scan<'a, V> {
    /// Emit the token for the partial match ending at `self.pos` and reposition the scan.
    fn emit(&mut self) -> Option<Token<'a, V>> {
        let automaton = self.automaton;
        let node = self.state;
        let depth = automaton.nodes[node].depth;
        let start = self.pos - depth;

        let (token, consumed) = match automaton.longest_terminal_prefix(node) {
            Some(id) => {
                let terminal = automaton.nodes[id].terminal.as_ref()?;
                let token = Token::Pattern {
                    pattern: terminal.pattern.as_str(),
                    value: &terminal.value,
                    position: start,
                };
                (token, automaton.nodes[id].depth)
            }
            None => {
                // A prefix of some delimiter that the text never completes
                let ch = self.text[start..].chars().next()?;
                (Token::Literal { ch, position: start }, ch.len_utf8())
            }
        };

        // Whatever follows the emitted token may already be a valid state; otherwise
        // rescan it from the root.
        match automaton.suffix_state(node, depth - consumed) {
            Some(resume) => {
                self.state = resume;
                self.resuming = resume != ROOT;
            }
            None => {
                self.state = ROOT;
                self.pos = start + consumed;
            }
        }

        Some(token)
    }
}

impl<'a, V> Iterator for Scan<'a, V> {
    type Item = Token<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.resuming {
                self.resuming = false;
            } else {
                let at = self.pos;
                let ch = self.text[at..].chars().next()?;
                self.pos += ch.len_utf8();

                self.state = self.automaton.goto(self.state, ch);
                if self.state == ROOT {
                    return Some(Token::Literal { ch, position: at });
                }
            }

            // Hold while the next character could extend a longer delimiter
            let extends = self.text[self.pos..]
                .chars()
                .next()
                .is_some_and(|next| self.automaton.child(self.state, next).is_some());
            if extends {
                continue;
            }

            return self.emit();
        }
    }
}
