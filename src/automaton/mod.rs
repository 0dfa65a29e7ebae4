pub mod finite_automaton;
pub mod subset_construction;
pub mod to_grammar;

pub use finite_automaton::{AutomatonDescription, FiniteAutomaton, StateSet};
pub use subset_construction::{nfa_to_dfa, subset_construction};
