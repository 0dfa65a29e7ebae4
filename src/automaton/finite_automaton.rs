//! Finite automata with possibly nondeterministic and epsilon transitions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{error_json, Error, Result};
use crate::symbol::{is_epsilon_name, Symbol};

pub type StateSet = BTreeSet<String>;

/// Transition labels: the empty string and every spelling of ε mean epsilon.
fn is_epsilon_label(label: &str) -> bool {
    label.is_empty() || is_epsilon_name(label)
}

/// A finite automaton over named states.
///
/// Transitions are keyed by source state, then label. A label is either a
/// `Symbol::Terminal` from the alphabet or `Symbol::Epsilon`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiniteAutomaton {
    pub(crate) states: StateSet,
    pub(crate) alphabet: BTreeSet<String>,
    pub(crate) transitions: BTreeMap<String, BTreeMap<Symbol, StateSet>>,
    pub(crate) initial_state: String,
    pub(crate) final_states: StateSet,
}

/// Plain description of an automaton, as read from and written to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDescription {
    pub states: Vec<String>,
    pub alphabet: Vec<String>,
    pub transitions: Vec<(String, String, Vec<String>)>,
    pub initial_state: String,
    pub final_states: Vec<String>,
}

impl FiniteAutomaton {
    /// Builds an automaton, rejecting any reference to an undeclared state or
    /// to a label outside the alphabet. Entries for the same state and label
    /// are merged.
    pub fn new<'a, T>(
        states: &[&str],
        alphabet: &[&str],
        transitions: T,
        initial_state: &str,
        final_states: &[&str],
    ) -> Result<Self>
    where
        T: IntoIterator<Item = (&'a str, &'a str, Vec<&'a str>)>,
    {
        let mut fa = Self {
            states: states.iter().map(|s| s.to_string()).collect(),
            alphabet: alphabet.iter().map(|s| s.to_string()).collect(),
            transitions: BTreeMap::new(),
            initial_state: initial_state.to_string(),
            final_states: StateSet::new(),
        };

        if let Some(symbol) = fa.alphabet.iter().find(|s| is_epsilon_label(s)) {
            return Err(Error::automaton(symbol, "ε cannot be part of the alphabet"));
        }
        if !fa.states.contains(initial_state) {
            return Err(Error::automaton(initial_state, "initial state is not declared"));
        }
        for state in final_states {
            fa.check_state(state)?;
            fa.final_states.insert(state.to_string());
        }
        for (from, label, to) in transitions {
            fa.check_state(from)?;
            let symbol = if is_epsilon_label(label) {
                Symbol::Epsilon
            } else if fa.alphabet.contains(label) {
                Symbol::terminal(label)
            } else {
                return Err(Error::automaton(label, "symbol is not in the alphabet"));
            };
            for state in &to {
                fa.check_state(state)?;
            }
            fa.transitions
                .entry(from.to_string())
                .or_default()
                .entry(symbol)
                .or_default()
                .extend(to.iter().map(|s| s.to_string()));
        }

        Ok(fa)
    }

    pub fn from_description(description: &AutomatonDescription) -> Result<Self> {
        let states: Vec<&str> = description.states.iter().map(|s| s.as_str()).collect();
        let alphabet: Vec<&str> = description.alphabet.iter().map(|s| s.as_str()).collect();
        let final_states: Vec<&str> = description
            .final_states
            .iter()
            .map(|s| s.as_str())
            .collect();
        let transitions = description.transitions.iter().map(|(from, label, to)| {
            (
                from.as_str(),
                label.as_str(),
                to.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
            )
        });
        Self::new(
            &states,
            &alphabet,
            transitions,
            &description.initial_state,
            &final_states,
        )
    }

    pub fn to_description(&self) -> AutomatonDescription {
        AutomatonDescription {
            states: self.states.iter().cloned().collect(),
            alphabet: self.alphabet.iter().cloned().collect(),
            transitions: self
                .transitions
                .iter()
                .flat_map(|(from, row)| {
                    row.iter().map(move |(symbol, to)| {
                        let label = match symbol {
                            Symbol::Epsilon => String::new(),
                            other => other.name().to_string(),
                        };
                        (from.clone(), label, to.iter().cloned().collect())
                    })
                })
                .collect(),
            initial_state: self.initial_state.clone(),
            final_states: self.final_states.iter().cloned().collect(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.to_description()).unwrap_or_else(error_json)
    }

    fn check_state(&self, state: &str) -> Result<()> {
        if self.states.contains(state) {
            Ok(())
        } else {
            Err(Error::automaton(state, "state is not declared"))
        }
    }

    pub fn states(&self) -> &StateSet {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<String> {
        &self.alphabet
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Destinations of `state` on `symbol`, if any are defined.
    pub fn transition(&self, state: &str, symbol: &Symbol) -> Option<&StateSet> {
        self.transitions
            .get(state)
            .and_then(|row| row.get(symbol))
            .filter(|to| !to.is_empty())
    }

    /// All `(from, label, to)` triples.
    pub fn transitions(&self) -> impl Iterator<Item = (&str, &Symbol, &str)> + '_ {
        self.transitions.iter().flat_map(|(from, row)| {
            row.iter().flat_map(move |(symbol, to)| {
                to.iter().map(move |dst| (from.as_str(), symbol, dst.as_str()))
            })
        })
    }

    /// The smallest superset of `states` closed under epsilon transitions.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        let mut closure = StateSet::new();
        let mut stack: Vec<&str> = states.iter().map(|s| s.as_str()).collect();

        while let Some(s) = stack.pop() {
            if !closure.insert(s.to_string()) {
                continue;
            }
            if let Some(destinations) = self.transition(s, &Symbol::Epsilon) {
                for dest in destinations {
                    if !closure.contains(dest) {
                        stack.push(dest);
                    }
                }
            }
        }

        closure
    }

    /// Union of the transitions on `symbol` from every member of `states`,
    /// without any epsilon moves.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: &str) -> StateSet {
        let symbol = Symbol::terminal(symbol);
        let mut reached = StateSet::new();
        for state in states {
            if let Some(destinations) = self.transition(state, &symbol) {
                reached.extend(destinations.iter().cloned());
            }
        }
        reached
    }

    /// Walks `input` from the initial state. Symbols outside the alphabet and
    /// missing transitions reject at once.
    ///
    /// The walk tracks the set of current states, closed under epsilon moves.
    /// For a DFA that set is always a single state.
    pub fn accepts<I, S>(&self, input: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = self.epsilon_closure(&StateSet::from([self.initial_state.clone()]));
        for symbol in input {
            let symbol = symbol.as_ref();
            if !self.alphabet.contains(symbol) {
                return false;
            }
            current = self.epsilon_closure(&self.move_on_symbol(&current, symbol));
            if current.is_empty() {
                return false;
            }
        }
        current.iter().any(|s| self.final_states.contains(s))
    }

    /// True iff no state has an epsilon transition and every defined
    /// transition has exactly one destination.
    pub fn is_deterministic(&self) -> bool {
        self.transitions.values().all(|row| {
            row.iter().all(|(symbol, to)| {
                if symbol.is_epsilon() {
                    to.is_empty()
                } else {
                    to.len() <= 1
                }
            })
        })
    }
}
