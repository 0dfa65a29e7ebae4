use std::collections::VecDeque;

use indexmap::IndexSet;
use log::trace;

use super::Grammar;
use crate::symbol::Symbol;

impl Grammar {
    /// Non-terminals reachable from the start symbol, in discovery order.
    pub fn accessible_symbols(&self) -> IndexSet<String> {
        let mut accessible: IndexSet<String> = IndexSet::new();
        let mut q: VecDeque<&str> = VecDeque::new();
        accessible.insert(self.start_symbol.clone());
        q.push_back(&self.start_symbol);

        while let Some(current) = q.pop_front() {
            for symbol in self.productions(current).iter().flatten() {
                if let Some(next) = symbol.as_non_terminal() {
                    if accessible.insert(next.to_string()) {
                        q.push_back(next);
                    }
                }
            }
        }

        accessible
    }

    pub fn eliminate_inaccessible_symbols(&self) -> Grammar {
        let accessible = self.accessible_symbols();
        let mut g = self.clone();
        g.rules.retain(|left, _| {
            let keep = accessible.contains(left);
            if !keep {
                trace!("{} is inaccessible", left);
            }
            keep
        });

        debug_assert!(g.check_productions().is_ok());
        g
    }

    /// Non-terminals that derive at least one string of terminals.
    pub fn productive_symbols(&self) -> IndexSet<String> {
        let mut productive: IndexSet<String> = IndexSet::new();
        let mut changed = true;
        while changed {
            changed = false;
            for (left, productions) in &self.rules {
                if productive.contains(left) {
                    continue;
                }
                let is_productive = productions.iter().any(|production| {
                    production.iter().all(|s| match s {
                        Symbol::Epsilon | Symbol::Terminal(_) => true,
                        Symbol::NonTerminal(nt) => productive.contains(nt),
                    })
                });
                if is_productive {
                    productive.insert(left.clone());
                    changed = true;
                }
            }
        }
        productive
    }

    /// Drops non-productive non-terminals and every production using one.
    /// The start symbol is always kept; if it is not productive the language
    /// is empty and it is left without productions.
    pub fn eliminate_non_productive_symbols(&self) -> Grammar {
        let productive = self.productive_symbols();
        let mut g = self.clone();
        let start = g.start_symbol.clone();

        g.rules.retain(|left, _| {
            let keep = productive.contains(left) || *left == start;
            if !keep {
                trace!("{} is non-productive", left);
            }
            keep
        });
        for productions in g.rules.values_mut() {
            productions.retain(|production| {
                production.iter().all(|s| match s.as_non_terminal() {
                    Some(nt) => productive.contains(nt),
                    None => true,
                })
            });
        }

        debug_assert!(g.check_productions().is_ok());
        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn g() -> Grammar {
        Grammar::new(
            &["S", "A", "B", "C", "D"],
            &["a", "b"],
            vec![
                ("S", vec!["aA", "bC"]),
                ("A", vec!["a", "aA"]),
                ("B", vec!["b"]),
                ("C", vec!["aC"]),
                ("D", vec!["C"]),
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn inaccessible_symbols_are_removed() {
        let g = g().eliminate_inaccessible_symbols();
        let nts: Vec<&str> = g.non_terminals().collect();
        assert_eq!(nts, vec!["S", "A", "C"]);
        for nt in g.non_terminals() {
            assert!(g.accessible_symbols().contains(nt));
        }
    }

    #[test]
    fn non_productive_symbols_are_removed() {
        let g = g().eliminate_non_productive_symbols();
        let nts: Vec<&str> = g.non_terminals().collect();
        assert_eq!(nts, vec!["S", "A", "B"]);
        assert_eq!(g.productions("S").len(), 1);
        assert_eq!(g.productive_symbols().len(), 3);
    }

    #[test]
    fn empty_language_keeps_start() {
        let g = Grammar::new(&["S"], &["a"], vec![("S", vec!["aS"])], None)
            .unwrap()
            .eliminate_non_productive_symbols();
        assert_eq!(g.start_symbol(), "S");
        assert!(g.productions("S").is_empty());
    }
}
