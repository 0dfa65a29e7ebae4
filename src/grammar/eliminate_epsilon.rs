use indexmap::{IndexMap, IndexSet};
use log::trace;

use super::{Grammar, Production};
use crate::symbol::Symbol;

impl Grammar {
    /// Non-terminals that derive the empty string.
    pub fn nullable_symbols(&self) -> IndexSet<String> {
        let mut nullable: IndexSet<String> = IndexSet::new();
        let mut changed = true;
        while changed {
            changed = false;
            for (left, productions) in &self.rules {
                if nullable.contains(left) {
                    continue;
                }
                let is_nullable = productions.iter().any(|production| {
                    production.iter().all(|s| match s {
                        Symbol::Epsilon => true,
                        Symbol::Terminal(_) => false,
                        Symbol::NonTerminal(nt) => nullable.contains(nt),
                    })
                });
                if is_nullable {
                    trace!("{} is nullable", left);
                    nullable.insert(left.clone());
                    changed = true;
                }
            }
        }
        nullable
    }

    /// Removes every `A -> ε` and compensates by adding each production with
    /// any subset of its nullable symbols left out.
    ///
    /// If the start symbol is nullable it keeps `S -> ε`. When the start symbol
    /// also occurs on a right-hand side a fresh start `S' -> S | ε` is added
    /// in front, so ε stays derivable only from the start. An `S -> ε` that is
    /// already written out keeps its position.
    pub fn eliminate_epsilon_productions(&self) -> Grammar {
        let nullable = self.nullable_symbols();
        let start_keeps_epsilon =
            nullable.contains(&self.start_symbol) && !self.occurs_on_right(&self.start_symbol);
        let mut g = self.clone();

        for (left, productions) in g.rules.iter_mut() {
            let keeps_epsilon = start_keeps_epsilon && *left == self.start_symbol;
            let old = std::mem::take(productions);
            for production in &old {
                if production.as_slice() == [Symbol::Epsilon] {
                    if keeps_epsilon && !productions.contains(production) {
                        productions.push(production.clone());
                    }
                    continue;
                }
                for expanded in expand_nullable(production, &nullable) {
                    if !expanded.is_empty() && !productions.contains(&expanded) {
                        productions.push(expanded);
                    }
                }
            }
        }

        if start_keeps_epsilon {
            // no-op when `S -> ε` was already written out
            let start = g.start_symbol.clone();
            g.add_production(&start, vec![Symbol::Epsilon]);
        } else if nullable.contains(&g.start_symbol) {
            let new_start = g.get_symbol_prime_name(g.start_symbol.clone());
            trace!("introducing start symbol {}", new_start);
            let mut rules = IndexMap::new();
            rules.insert(
                new_start.clone(),
                vec![
                    vec![Symbol::NonTerminal(g.start_symbol.clone())],
                    vec![Symbol::Epsilon],
                ],
            );
            rules.extend(g.rules);
            g.rules = rules;
            g.start_symbol = new_start;
        }

        debug_assert!(g.check_productions().is_ok());
        g
    }
}

/// Every version of `production` with nullable symbols independently kept or
/// dropped, the original first.
fn expand_nullable(production: &Production, nullable: &IndexSet<String>) -> Vec<Production> {
    let mut expanded: Vec<Production> = vec![Vec::new()];
    for symbol in production {
        let optional = symbol
            .as_non_terminal()
            .map_or(false, |nt| nullable.contains(nt));
        if optional {
            let without = expanded.clone();
            for p in expanded.iter_mut() {
                p.push(symbol.clone());
            }
            expanded.extend(without);
        } else {
            for p in expanded.iter_mut() {
                p.push(symbol.clone());
            }
        }
    }
    expanded
}
