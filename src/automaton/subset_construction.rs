//! Subset construction algorithm for converting an ε-NFA to a DFA.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::trace;

use super::finite_automaton::{FiniteAutomaton, StateSet};
use crate::symbol::Symbol;

/// Canonical name of a DFA state: its NFA states, sorted and joined with `,`.
/// A `\` or `,` inside a state name is escaped with a backslash, so two
/// different sets never get the same name.
pub fn state_key(states: &StateSet) -> String {
    states
        .iter()
        .map(|s| s.replace('\\', "\\\\").replace(',', "\\,"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Converts `nfa` into an equivalent DFA using the powerset construction.
///
/// Also returns, in discovery order, the NFA states behind each DFA state.
pub fn subset_construction(
    nfa: &FiniteAutomaton,
) -> (FiniteAutomaton, IndexMap<String, StateSet>) {
    let mut registry: IndexMap<String, StateSet> = IndexMap::new();
    let mut transitions: BTreeMap<String, BTreeMap<Symbol, StateSet>> = BTreeMap::new();

    let initial_set = nfa.epsilon_closure(&StateSet::from([nfa.initial_state.clone()]));
    let initial_key = state_key(&initial_set);
    registry.insert(initial_key.clone(), initial_set.clone());

    let mut worklist: Vec<StateSet> = vec![initial_set];

    while let Some(current) = worklist.pop() {
        let current_key = state_key(&current);

        for symbol in &nfa.alphabet {
            let next = nfa.epsilon_closure(&nfa.move_on_symbol(&current, symbol));
            if next.is_empty() {
                // partial DFA: no transition on this symbol
                continue;
            }

            let next_key = state_key(&next);
            if !registry.contains_key(&next_key) {
                trace!("discovered DFA state {{{}}}", next_key);
                registry.insert(next_key.clone(), next.clone());
                worklist.push(next);
            }

            transitions
                .entry(current_key.clone())
                .or_default()
                .insert(Symbol::terminal(symbol), StateSet::from([next_key]));
        }
    }

    let final_states = registry
        .iter()
        .filter(|(_, members)| members.iter().any(|s| nfa.final_states.contains(s)))
        .map(|(key, _)| key.clone())
        .collect();

    let dfa = FiniteAutomaton {
        states: registry.keys().cloned().collect(),
        alphabet: nfa.alphabet.clone(),
        transitions,
        initial_state: initial_key,
        final_states,
    };
    (dfa, registry)
}

/// Determinizes `nfa`. A DFA converts to itself up to renaming of states.
pub fn nfa_to_dfa(nfa: &FiniteAutomaton) -> FiniteAutomaton {
    subset_construction(nfa).0
}
