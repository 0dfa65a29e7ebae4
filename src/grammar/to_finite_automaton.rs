use std::collections::BTreeMap;

use log::trace;

use super::Grammar;
use crate::automaton::{FiniteAutomaton, StateSet};
use crate::error::{Error, Result};
use crate::symbol::Symbol;

impl Grammar {
    /// The automaton of a right-linear grammar. Non-terminals become states
    /// and the start symbol the initial state. `A -> a B` is a transition,
    /// `A -> B` an epsilon transition, `A -> a` leads to a fresh final state
    /// and `A -> ε` makes `A` final. Any other production is rejected.
    pub fn to_finite_automaton(&self) -> Result<FiniteAutomaton> {
        let accepting = self.get_symbol_prime_name("final".to_string());
        let mut uses_accepting = false;
        let mut transitions: BTreeMap<String, BTreeMap<Symbol, StateSet>> = BTreeMap::new();
        let mut final_states = StateSet::new();

        for (left, productions) in &self.rules {
            for production in productions {
                let (label, to) = match production.as_slice() {
                    [Symbol::Epsilon] => {
                        final_states.insert(left.clone());
                        continue;
                    }
                    [terminal @ Symbol::Terminal(_)] => {
                        uses_accepting = true;
                        (terminal.clone(), accepting.clone())
                    }
                    [Symbol::NonTerminal(to)] => (Symbol::Epsilon, to.clone()),
                    [terminal @ Symbol::Terminal(_), Symbol::NonTerminal(to)] => {
                        (terminal.clone(), to.clone())
                    }
                    _ => return Err(Error::grammar(left, "production is not right-linear")),
                };
                transitions
                    .entry(left.clone())
                    .or_default()
                    .entry(label)
                    .or_default()
                    .insert(to);
            }
        }

        let mut states: StateSet = self.rules.keys().cloned().collect();
        if uses_accepting {
            trace!("introducing final state {}", accepting);
            states.insert(accepting.clone());
            final_states.insert(accepting);
        }

        Ok(FiniteAutomaton {
            states,
            alphabet: self.terminals.iter().cloned().collect(),
            transitions,
            initial_state: self.start_symbol.clone(),
            final_states,
        })
    }
}
