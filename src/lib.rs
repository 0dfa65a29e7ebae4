extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod automaton;
pub mod error;
pub mod grammar;
pub mod symbol;

pub use automaton::{nfa_to_dfa, subset_construction, AutomatonDescription, FiniteAutomaton};
use error::error_json;
pub use error::{Error, Result};
pub use grammar::{Grammar, Production};
pub use symbol::{Symbol, EPSILON};

#[wasm_bindgen]
pub fn grammar_to_cnf_json(grammar: &str) -> String {
    match crate::Grammar::parse(grammar) {
        Ok(g) => g.to_cnf().to_production_output_vec().to_json(),
        Err(e) => error_json(e),
    }
}

#[wasm_bindgen]
pub fn automaton_to_dfa_json(automaton: &str) -> String {
    let description: AutomatonDescription = match serde_json::from_str(automaton) {
        Ok(d) => d,
        Err(e) => return error_json(e),
    };
    match FiniteAutomaton::from_description(&description) {
        Ok(nfa) => nfa_to_dfa(&nfa).to_json(),
        Err(e) => error_json(e),
    }
}

#[cfg(test)]
mod cnf_tests {
    use crate::{Error, Grammar, Symbol};

    // variant 15 grammar
    fn variant() -> Grammar {
        Grammar::new(
            &["S", "A", "B", "C", "D"],
            &["a", "b"],
            vec![
                ("S", vec!["AC", "bA", "B", "aA"]),
                ("A", vec!["ε", "aS", "ABab"]),
                ("B", vec!["a", "bS"]),
                ("C", vec!["abC"]),
                ("D", vec!["AB"]),
            ],
            None,
        )
        .unwrap()
    }

    fn is_renaming(p: &[Symbol]) -> bool {
        p.len() == 1 && p[0].is_non_terminal()
    }

    #[test]
    fn initial_grammar() {
        let g = variant();
        assert_eq!(
            g.non_terminals().collect::<Vec<_>>(),
            vec!["S", "A", "B", "C", "D"]
        );
        assert_eq!(g.terminals().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(g.start_symbol(), "S");
        assert_eq!(g.productions("A").len(), 3);
    }

    #[test]
    fn epsilon_productions() {
        let g = variant().eliminate_epsilon_productions();
        assert!(!g.productions("D").contains(&vec![Symbol::Epsilon]));
        assert_eq!(g.productions("D").len(), 2);
        for nt in g.non_terminals() {
            if nt != g.start_symbol() {
                assert!(!g.productions(nt).contains(&vec![Symbol::Epsilon]));
            }
        }
    }

    #[test]
    fn renaming_productions() {
        let g = variant().eliminate_epsilon_productions().eliminate_renaming();
        for (_, productions) in g.rules() {
            assert!(productions.iter().all(|p| !is_renaming(p)));
        }
    }

    #[test]
    fn inaccessible_symbols() {
        let g = variant()
            .eliminate_epsilon_productions()
            .eliminate_renaming()
            .eliminate_inaccessible_symbols();
        assert!(!g.contains_non_terminal("D"));
        let accessible = g.accessible_symbols();
        for nt in g.non_terminals() {
            assert!(accessible.contains(nt));
        }
    }

    #[test]
    fn non_productive_symbols() {
        let g = variant()
            .eliminate_epsilon_productions()
            .eliminate_renaming()
            .eliminate_inaccessible_symbols()
            .eliminate_non_productive_symbols();
        assert!(!g.contains_non_terminal("C"));
        let productive = g.productive_symbols();
        for nt in g.non_terminals() {
            assert!(productive.contains(nt));
        }
        for (_, productions) in g.rules() {
            for p in productions {
                assert!(p
                    .iter()
                    .all(|s| s.is_terminal() || g.contains_non_terminal(s.name())));
            }
        }
    }

    #[test]
    fn is_cnf() {
        let g = variant();
        assert!(!g.is_cnf());
        let cnf = g.to_cnf();
        assert!(cnf.is_cnf());
        assert_eq!(cnf.to_cnf(), cnf);
    }

    #[test]
    fn to_cnf_shapes() {
        let g = variant().to_cnf();
        for (_, productions) in g.rules() {
            for p in productions {
                assert!(p.len() <= 2);
                if p.len() == 2 {
                    assert!(p.iter().all(|s| s.is_non_terminal()));
                } else {
                    assert!(p[0].is_terminal());
                }
            }
        }
        assert_eq!(g.productions("B").len(), 2);
        assert!(g.productions("B").contains(&vec![Symbol::terminal("a")]));
    }

    #[test]
    fn malformed_grammar() {
        let e = Grammar::new(&["S"], &["a"], vec![("S", vec!["aZ"])], None).unwrap_err();
        assert!(matches!(e, Error::MalformedGrammar { ref symbol, .. } if symbol == "Z"));
    }

    #[test]
    fn wasm_entry_point() {
        let out = crate::grammar_to_cnf_json("S -> a S b | ε");
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["start"], "S'");

        let err: serde_json::Value =
            serde_json::from_str(&crate::grammar_to_cnf_json("-> a")).unwrap();
        assert!(err["error"].as_str().unwrap().contains("empty left side"));
    }
}
