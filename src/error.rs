/// Errors raised while building a grammar or an automaton. The normalization
/// passes themselves never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A rule refers to a symbol outside the declared alphabets.
    MalformedGrammar { symbol: String, reason: String },
    /// A transition, initial or final state refers to something undeclared.
    MalformedAutomaton { item: String, reason: String },
    /// The textual grammar could not be read.
    Parse { line: usize, message: String },
}

impl Error {
    pub(crate) fn grammar(symbol: &str, reason: impl Into<String>) -> Self {
        Error::MalformedGrammar {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn automaton(item: &str, reason: impl Into<String>) -> Self {
        Error::MalformedAutomaton {
            item: item.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedGrammar { symbol, reason } => {
                write!(f, "malformed grammar: {} ({})", reason, symbol)
            }
            Error::MalformedAutomaton { item, reason } => {
                write!(f, "malformed automaton: {} ({})", reason, item)
            }
            Error::Parse { line, message } => write!(f, "Line {}: {}", line, message),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Renders any error as the `{"error": "..."}` object returned across wasm.
pub(crate) fn error_json(e: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}
