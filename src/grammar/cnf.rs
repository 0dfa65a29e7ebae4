use indexmap::IndexMap;
use log::{debug, trace};

use super::Grammar;
use crate::symbol::Symbol;

/// Fresh non-terminals introduced by one shaping run.
struct FreshNames {
    wrappers: IndexMap<String, String>,
    counter: usize,
}

impl FreshNames {
    fn new() -> Self {
        Self {
            wrappers: IndexMap::new(),
            counter: 0,
        }
    }

    /// The non-terminal `T_a -> a` standing in for terminal `a`, shared by all uses.
    fn wrapper(&mut self, g: &mut Grammar, terminal: &str) -> String {
        if let Some(name) = self.wrappers.get(terminal) {
            return name.clone();
        }
        let name = g.get_symbol_prime_name(format!("T_{}", terminal));
        trace!("introducing {} -> {}", name, terminal);
        g.add_non_terminal(&name);
        g.add_production(&name, vec![Symbol::terminal(terminal)]);
        self.wrappers.insert(terminal.to_string(), name.clone());
        name
    }

    fn link(&mut self, g: &mut Grammar, left: &str) -> String {
        self.counter += 1;
        let name = g.get_symbol_prime_name(format!("{}_{}", left, self.counter));
        g.add_non_terminal(&name);
        name
    }
}

impl Grammar {
    /// Brings every production into CNF shape: terminals inside longer
    /// productions are replaced by wrapper non-terminals, and productions
    /// longer than two are right-folded, `A -> X1 A_1`, `A_1 -> X2 A_2`, ...
    pub fn shape_cnf(&self) -> Grammar {
        let mut g = self.clone();
        let mut fresh = FreshNames::new();
        let lefts: Vec<String> = g.rules.keys().cloned().collect();

        for left in lefts {
            let productions = match g.rules.get_mut(&left) {
                Some(productions) => std::mem::take(productions),
                None => continue,
            };

            for production in productions {
                if production.len() < 2 {
                    g.add_production(&left, production);
                    continue;
                }

                let mut rest: Vec<Symbol> = Vec::with_capacity(production.len());
                for symbol in production {
                    rest.push(match symbol {
                        Symbol::Terminal(t) => Symbol::NonTerminal(fresh.wrapper(&mut g, &t)),
                        other => other,
                    });
                }

                let mut current = left.clone();
                while rest.len() > 2 {
                    let next = fresh.link(&mut g, &left);
                    let head = rest.remove(0);
                    g.add_production(&current, vec![head, Symbol::NonTerminal(next.clone())]);
                    current = next;
                }
                g.add_production(&current, rest);
            }
        }

        debug_assert!(g.check_productions().is_ok());
        g
    }

    /// Runs the whole normalization pipeline and returns a grammar in CNF.
    pub fn to_cnf(&self) -> Grammar {
        let g = self.eliminate_epsilon_productions();
        debug!("after epsilon elimination:\n{}", g);
        let g = g.eliminate_renaming();
        debug!("after renaming elimination:\n{}", g);
        let g = g.eliminate_inaccessible_symbols();
        debug!("after inaccessible elimination:\n{}", g);
        let g = g.eliminate_non_productive_symbols();
        debug!("after non-productive elimination:\n{}", g);
        // dropping non-productive productions can strand symbols
        let g = g.eliminate_inaccessible_symbols();
        let g = g.shape_cnf();
        debug!("in CNF:\n{}", g);
        g
    }

    /// Every production is a terminal or two non-terminals; `S -> ε` is only
    /// allowed on a start symbol that occurs on no right-hand side.
    pub fn is_cnf(&self) -> bool {
        self.rules.iter().all(|(left, productions)| {
            productions.iter().all(|production| match production.as_slice() {
                [Symbol::Terminal(_)] => true,
                [Symbol::NonTerminal(_), Symbol::NonTerminal(_)] => true,
                [Symbol::Epsilon] => {
                    *left == self.start_symbol && !self.occurs_on_right(&self.start_symbol)
                }
                _ => false,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(g: &Grammar, left: &str) -> Vec<String> {
        g.productions(left)
            .iter()
            .map(|p| p.iter().map(|s| s.name()).collect::<Vec<_>>().join(" "))
            .collect()
    }

    #[test]
    fn long_production_is_right_folded() {
        let g = Grammar::new(
            &["S", "A", "B", "C"],
            &["a"],
            vec![
                ("S", vec!["ABCA"]),
                ("A", vec!["a"]),
                ("B", vec!["a"]),
                ("C", vec!["a"]),
            ],
            None,
        )
        .unwrap();
        assert!(!g.is_cnf());

        let g = g.shape_cnf();
        assert_eq!(names(&g, "S"), vec!["A S_1"]);
        assert_eq!(names(&g, "S_1"), vec!["B S_2"]);
        assert_eq!(names(&g, "S_2"), vec!["C A"]);
        assert!(g.is_cnf());
    }

    #[test]
    fn terminals_get_shared_wrappers() {
        let g = Grammar::new(
            &["S", "T_a"],
            &["a", "b"],
            vec![("S", vec!["aS", "ab", "a"]), ("T_a", vec!["b"])],
            None,
        )
        .unwrap()
        .shape_cnf();

        assert_eq!(names(&g, "S"), vec!["T_a' S", "T_a' T_b", "a"]);
        assert_eq!(names(&g, "T_a'"), vec!["a"]);
        assert_eq!(names(&g, "T_b"), vec!["b"]);
        assert_eq!(names(&g, "T_a"), vec!["b"]);
        assert!(g.is_cnf());
    }

    #[test]
    fn epsilon_only_on_a_start_off_the_right_side() {
        let ok = Grammar::new(&["S"], &["a"], vec![("S", vec!["a", "ε"])], None).unwrap();
        assert!(ok.is_cnf());
        let mid = Grammar::new(
            &["S", "A"],
            &["a"],
            vec![("S", vec!["AA"]), ("A", vec!["ε", "a"])],
            None,
        )
        .unwrap();
        assert!(!mid.is_cnf());
        let recursive =
            Grammar::new(&["S"], &["a"], vec![("S", vec!["SS", "a", "ε"])], None).unwrap();
        assert!(!recursive.is_cnf());
    }

    #[test]
    fn to_cnf_keeps_empty_string() {
        let g = Grammar::new(&["S"], &["a", "b"], vec![("S", vec!["ε", "aSb"])], None)
            .unwrap()
            .to_cnf();
        assert!(g.is_cnf());
        assert_eq!(g.start_symbol(), "S'");
        assert!(g.productions("S'").contains(&vec![Symbol::Epsilon]));
    }

    #[test]
    fn to_cnf_is_a_fixpoint() {
        let g = Grammar::new(
            &["E", "T", "F"],
            &["+", "*", "(", ")", "x"],
            vec![
                ("E", vec!["E + T", "T"]),
                ("T", vec!["T * F", "F"]),
                ("F", vec!["( E )", "x"]),
            ],
            None,
        )
        .unwrap();
        assert!(!g.is_cnf());

        let once = g.to_cnf();
        assert!(once.is_cnf());
        assert_eq!(once.to_cnf(), once);
    }

    #[test]
    fn to_cnf_is_a_fixpoint_with_leading_epsilon() {
        let g = Grammar::new(
            &["S"],
            &["a", "b"],
            vec![("S", vec!["ε", "SS", "aSb"])],
            None,
        )
        .unwrap();
        let once = g.to_cnf();
        assert!(once.is_cnf());
        assert_eq!(once.start_symbol(), "S'");
        assert_eq!(names(&once, "S'")[0], "ε");
        assert_eq!(once.to_cnf(), once);
        assert_eq!(once.eliminate_epsilon_productions(), once);
    }

    #[test]
    fn to_cnf_is_a_fixpoint_with_nullable_renaming_cycle() {
        let g = Grammar::new(
            &["S", "A", "B"],
            &["a", "b"],
            vec![
                ("S", vec!["A", "B"]),
                ("A", vec!["B", "ε"]),
                ("B", vec!["A", "ab"]),
            ],
            None,
        )
        .unwrap();
        let once = g.to_cnf();
        assert!(once.is_cnf());
        assert_eq!(names(&once, "S"), vec!["ε", "T_a T_b"]);
        assert_eq!(once.to_cnf(), once);
    }
}
