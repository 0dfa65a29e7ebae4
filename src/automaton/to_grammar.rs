use indexmap::{IndexMap, IndexSet};

use super::FiniteAutomaton;
use crate::error::{Error, Result};
use crate::grammar::{Grammar, Production};
use crate::symbol::Symbol;

impl FiniteAutomaton {
    /// The right-linear grammar of this automaton: states become
    /// non-terminals, `q -a-> p` gives `q -> a p`, `q -ε-> p` gives `q -> p`,
    /// and every final state gets `q -> ε`. The initial state is the start.
    pub fn to_grammar(&self) -> Result<Grammar> {
        if let Some(clash) = self.states.iter().find(|s| self.alphabet.contains(*s)) {
            return Err(Error::grammar(clash, "state has the name of an alphabet symbol"));
        }

        let mut rules: IndexMap<String, Vec<Production>> = IndexMap::new();
        rules.insert(self.initial_state.clone(), Vec::new());
        for state in &self.states {
            rules.entry(state.clone()).or_default();
        }

        for (from, symbol, to) in self.transitions() {
            let production = match symbol {
                Symbol::Epsilon => vec![Symbol::non_terminal(to)],
                other => vec![other.clone(), Symbol::non_terminal(to)],
            };
            let productions = rules.entry(from.to_string()).or_default();
            if !productions.contains(&production) {
                productions.push(production);
            }
        }
        for state in &self.final_states {
            rules
                .entry(state.clone())
                .or_default()
                .push(vec![Symbol::Epsilon]);
        }

        let terminals: IndexSet<String> = self.alphabet.iter().cloned().collect();
        Grammar::from_parts(terminals, rules, self.initial_state.clone())
    }
}
