//! Errors surfaced by the delimiter engine.

/// Errors raised while building or driving the engine.
///
/// Unpaired or fake delimiters are not errors: they are rendered as literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A caller supplied a pattern, tag name, or table that cannot be used
    InvalidArgument(String),
    /// The automaton was scanned before `build` ran (or after a later `add`)
    UnbuiltAutomaton,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Self::UnbuiltAutomaton => write!(f, "automaton scanned before it was built"),
        }
    }
}

impl std::error::Error for EngineError {}
