pub const EPSILON: &str = "ε";

/// Returns true for every spelling accepted as the empty string.
pub fn is_epsilon_name(name: &str) -> bool {
    name == EPSILON || name == "epsilon"
}

/// A grammar or automaton symbol. Whether a symbol is a terminal is part of
/// its type, so a production can never silently refer to the wrong alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Epsilon,
    Terminal(String),
    NonTerminal(String),
}

impl Symbol {
    pub fn terminal(name: &str) -> Self {
        Symbol::Terminal(name.to_string())
    }

    pub fn non_terminal(name: &str) -> Self {
        Symbol::NonTerminal(name.to_string())
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Epsilon => EPSILON,
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => name.as_str(),
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_non_terminal(&self) -> bool {
        matches!(self, Symbol::NonTerminal(_))
    }

    /// The non-terminal name, if this is one.
    pub fn as_non_terminal(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
