use indexmap::{IndexMap, IndexSet};

use crate::error::{Error, Result};
use crate::symbol::{is_epsilon_name, Symbol};

pub type Production = Vec<Symbol>;

/// A context-free grammar. The key order of `rules` is the order of the
/// non-terminals; every non-terminal has an entry, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    pub(crate) terminals: IndexSet<String>,
    pub(crate) rules: IndexMap<String, Vec<Production>>,
    pub(crate) start_symbol: String,
}

impl Grammar {
    /// Builds a grammar from an explicit rule table.
    ///
    /// Each production is a string. It is split on whitespace; a token naming a
    /// declared symbol (or `ε`) is taken whole, any other token is read one
    /// character at a time, so `"ABab"` and `"A B a b"` are the same production.
    /// The start symbol defaults to the first non-terminal.
    pub fn new<'a, R>(
        non_terminals: &[&str],
        terminals: &[&str],
        rules: R,
        start_symbol: Option<&str>,
    ) -> Result<Self>
    where
        R: IntoIterator<Item = (&'a str, Vec<&'a str>)>,
    {
        let start_symbol = match start_symbol.or_else(|| non_terminals.first().copied()) {
            Some(s) => s.to_string(),
            None => return Err(Error::grammar("", "a grammar needs a start symbol")),
        };

        let mut g = Self {
            terminals: terminals.iter().map(|t| t.to_string()).collect(),
            rules: non_terminals
                .iter()
                .map(|nt| (nt.to_string(), Vec::new()))
                .collect(),
            start_symbol,
        };
        g.check_alphabets()?;

        for (left, productions) in rules {
            if !g.rules.contains_key(left) {
                return Err(Error::grammar(left, "rule for an undeclared non-terminal"));
            }
            for text in productions {
                let production = g.split_production(text)?;
                g.add_production(left, production);
            }
        }

        Ok(g)
    }

    /// Assembles a grammar from parts that are already classified and checks it.
    pub(crate) fn from_parts(
        terminals: IndexSet<String>,
        rules: IndexMap<String, Vec<Production>>,
        start_symbol: String,
    ) -> Result<Self> {
        let g = Self {
            terminals,
            rules,
            start_symbol,
        };
        g.check_alphabets()?;
        g.check_productions()?;
        Ok(g)
    }

    fn check_alphabets(&self) -> Result<()> {
        if !self.rules.contains_key(&self.start_symbol) {
            return Err(Error::grammar(
                &self.start_symbol,
                "start symbol is not a declared non-terminal",
            ));
        }
        for name in self.terminals.iter().chain(self.rules.keys()) {
            if name.is_empty() || is_epsilon_name(name) {
                return Err(Error::grammar(name, "the empty string cannot be declared"));
            }
        }
        if let Some(both) = self.terminals.iter().find(|t| self.rules.contains_key(*t)) {
            return Err(Error::grammar(both, "declared as both terminal and non-terminal"));
        }
        Ok(())
    }

    /// Re-checks that every right-hand side symbol is declared.
    pub(crate) fn check_productions(&self) -> Result<()> {
        for (left, productions) in &self.rules {
            for production in productions {
                if production.is_empty() {
                    return Err(Error::grammar(left, "empty production"));
                }
                if production.len() > 1 && production.contains(&Symbol::Epsilon) {
                    return Err(Error::grammar(left, "ε must stand alone"));
                }
                for symbol in production {
                    let known = match symbol {
                        Symbol::Epsilon => true,
                        Symbol::Terminal(t) => self.terminals.contains(t),
                        Symbol::NonTerminal(nt) => self.rules.contains_key(nt),
                    };
                    if !known {
                        return Err(Error::grammar(symbol.name(), "symbol is not declared"));
                    }
                }
            }
        }
        Ok(())
    }

    fn classify(&self, name: &str) -> Option<Symbol> {
        if is_epsilon_name(name) {
            Some(Symbol::Epsilon)
        } else if self.terminals.contains(name) {
            Some(Symbol::Terminal(name.to_string()))
        } else if self.rules.contains_key(name) {
            Some(Symbol::NonTerminal(name.to_string()))
        } else {
            None
        }
    }

    fn split_production(&self, text: &str) -> Result<Production> {
        let mut production = Vec::new();
        for token in text.split_whitespace() {
            if let Some(symbol) = self.classify(token) {
                production.push(symbol);
                continue;
            }
            for c in token.chars() {
                let name = c.to_string();
                let symbol = self
                    .classify(&name)
                    .ok_or_else(|| Error::grammar(&name, "symbol is not declared"))?;
                production.push(symbol);
            }
        }

        if production.is_empty() {
            return Err(Error::grammar(text, "empty production, write ε instead"));
        }
        if production.len() > 1 && production.contains(&Symbol::Epsilon) {
            return Err(Error::grammar(text, "ε must stand alone"));
        }
        Ok(production)
    }

    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(|s| s.as_str())
    }

    pub fn terminals(&self) -> impl Iterator<Item = &str> {
        self.terminals.iter().map(|s| s.as_str())
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, &[Production])> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Productions of `non_terminal`, empty if it is unknown.
    pub fn productions(&self, non_terminal: &str) -> &[Production] {
        self.rules
            .get(non_terminal)
            .map(|p| p.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains_non_terminal(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub(crate) fn add_non_terminal(&mut self, name: &str) {
        self.rules.entry(name.to_string()).or_default();
    }

    /// Appends a production unless the non-terminal already has it.
    pub(crate) fn add_production(&mut self, left: &str, production: Production) {
        let productions = self.rules.entry(left.to_string()).or_default();
        if !productions.contains(&production) {
            productions.push(production);
        }
    }

    pub(crate) fn occurs_on_right(&self, name: &str) -> bool {
        self.rules
            .values()
            .flatten()
            .flatten()
            .any(|s| s.as_non_terminal() == Some(name))
    }

    /// Appends primes to `name` until it clashes with no declared symbol.
    pub fn get_symbol_prime_name(&self, mut name: String) -> String {
        while self.rules.contains_key(&name)
            || self.terminals.contains(&name)
            || is_epsilon_name(&name)
        {
            name.push('\'');
        }
        name
    }
}
