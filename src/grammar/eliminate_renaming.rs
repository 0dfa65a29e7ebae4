use std::collections::VecDeque;

use indexmap::IndexSet;
use log::trace;

use super::Grammar;

impl Grammar {
    /// Non-terminals reachable from `from` through unit productions only,
    /// `from` itself first.
    pub fn unit_closure(&self, from: &str) -> IndexSet<String> {
        let mut visited: IndexSet<String> = IndexSet::new();
        let mut q: VecDeque<&str> = VecDeque::new();
        visited.insert(from.to_string());
        q.push_back(from);

        while let Some(current) = q.pop_front() {
            for production in self.productions(current) {
                if let [symbol] = production.as_slice() {
                    if let Some(next) = symbol.as_non_terminal() {
                        if visited.insert(next.to_string()) {
                            q.push_back(next);
                        }
                    }
                }
            }
        }

        visited
    }

    /// Replaces every renaming `A -> B` by the non-renaming productions of
    /// everything `A` renames to, cycles included.
    pub fn eliminate_renaming(&self) -> Grammar {
        let mut g = self.clone();

        for (left, productions) in g.rules.iter_mut() {
            let closure = self.unit_closure(left);
            if closure.len() > 1 {
                trace!("{} renames to {:?}", left, closure);
            }

            productions.clear();
            for member in &closure {
                for production in self.productions(member) {
                    let is_renaming = production.len() == 1 && production[0].is_non_terminal();
                    if !is_renaming && !productions.contains(production) {
                        productions.push(production.clone());
                    }
                }
            }
        }

        debug_assert!(g.check_productions().is_ok());
        g
    }
}
