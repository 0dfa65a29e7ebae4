pub mod cnf;
pub mod eliminate_epsilon;
pub mod eliminate_renaming;
pub mod eliminate_useless;
pub mod grammar;
pub mod parse;
pub mod pretty_print;
pub mod to_finite_automaton;
pub use grammar::{Grammar, Production};
