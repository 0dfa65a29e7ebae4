use indexmap::{IndexMap, IndexSet};

use super::Production;
use crate::error::{Error, Result};
use crate::symbol::{is_epsilon_name, Symbol};
use crate::Grammar;

impl Grammar {
    /// Reads a grammar written as `S -> A b | ε`, one left side per line,
    /// with `| ...` lines continuing the previous rule.
    ///
    /// Left sides are the non-terminals, the first one is the start symbol;
    /// every other right-hand token is a terminal.
    pub fn parse(grammar: &str) -> Result<Self> {
        let mut rules: IndexMap<String, Vec<Production>> = IndexMap::new();
        let mut raw_productions: Vec<(String, &str)> = Vec::new();

        let mut previous_left: Option<String> = None;
        for (i, line) in grammar.lines().enumerate() {
            if line.chars().all(|c| c.is_whitespace()) {
                continue;
            }
            let parts: Vec<&str> = line.split("->").collect();
            if parts.len() > 2 {
                return Err(Error::parse(i + 1, "too many \"->\""));
            }
            let (left, rights) = if parts.len() == 2 {
                let left_str = parts[0].trim();
                if left_str.is_empty() {
                    return Err(Error::parse(i + 1, "empty left side"));
                } else if left_str.split_whitespace().count() != 1 {
                    return Err(Error::parse(i + 1, "left side contains whitespace"));
                } else if is_epsilon_name(left_str) {
                    return Err(Error::parse(i + 1, "ε cannot be a left side"));
                }
                rules.entry(left_str.to_string()).or_default();
                (left_str.to_string(), parts[1].trim())
            } else {
                let continued = parts[0].trim();
                match (&previous_left, continued.strip_prefix('|')) {
                    (Some(left), Some(rest)) => (left.clone(), rest.trim()),
                    _ => return Err(Error::parse(i + 1, "cannot find left side")),
                }
            };

            previous_left = Some(left.clone());
            raw_productions.push((left, rights));
        }

        let start_symbol = match rules.keys().next() {
            Some(start) => start.clone(),
            None => return Err(Error::parse(0, "empty grammar")),
        };

        let mut terminals: IndexSet<String> = IndexSet::new();
        for (left, rights) in raw_productions {
            for right in rights.split('|') {
                let production: Production = right
                    .split_whitespace()
                    .map(|s| {
                        if is_epsilon_name(s) {
                            Symbol::Epsilon
                        } else if rules.contains_key(s) {
                            Symbol::NonTerminal(s.to_string())
                        } else {
                            terminals.insert(s.to_string());
                            Symbol::Terminal(s.to_string())
                        }
                    })
                    .collect();
                if production.is_empty() {
                    continue;
                }
                let productions = rules.entry(left.clone()).or_default();
                if !productions.contains(&production) {
                    productions.push(production);
                }
            }
        }

        Grammar::from_parts(terminals, rules, start_symbol)
    }
}
