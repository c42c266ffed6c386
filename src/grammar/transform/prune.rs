// Copyright 2018 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Transforms that remove useless nonterminals from a grammar.
//!
//! The set of terminals is never changed by pruning, even if some terminal is
//! no longer used by any production.

use {
  crate::grammar::{
    passes::{productive::Productive, reachable::Reachable, PassContext},
    Body, Grammar, NonTerminal,
  },
  im::{OrdMap, OrdSet},
};

/// Removes every nonterminal that cannot be reached from the start symbol,
/// along with its productions.
pub fn prune_unreachable(g: &Grammar) -> Grammar {
  let pass_map = PassContext::new(g);
  let reachable = pass_map.get_pass::<Reachable>();

  let nonterms: OrdSet<NonTerminal> =
    reachable.reachable_set().iter().cloned().collect();
  let rule_set: OrdMap<NonTerminal, OrdSet<Body>> = g
    .rule_set()
    .iter()
    .filter(|(head, _)| reachable.is_reachable(head))
    .map(|(head, bodies)| (head.clone(), bodies.clone()))
    .collect();

  log::trace!(
    "Dropping unreachable nonterminals: {:?}",
    g.nonterminals().clone().relative_complement(nonterms.clone())
  );

  g.with_rules(nonterms, rule_set)
}

/// Removes every nonterminal that derives no terminal string, along with
/// every production that mentions one.
///
/// The start symbol is always kept. If it is itself unproductive, the result
/// has no productions for it, and describes the empty language.
pub fn prune_unproductive(g: &Grammar) -> Grammar {
  let pass_map = PassContext::new(g);
  let productive = pass_map.get_pass::<Productive>();

  let mut nonterms: OrdSet<NonTerminal> =
    productive.productive_set().iter().cloned().collect();
  nonterms.insert(g.start_nt().clone());

  let mut rule_set = OrdMap::new();
  for (head, bodies) in g.rule_set().iter() {
    if !productive.is_productive(head) {
      continue;
    }

    let kept: OrdSet<Body> = bodies
      .iter()
      .filter(|body| productive.is_body_productive(body))
      .cloned()
      .collect();
    rule_set.insert(head.clone(), kept);
  }

  log::trace!(
    "Dropping unproductive nonterminals: {:?}",
    g.nonterminals().clone().relative_complement(nonterms.clone())
  );

  g.with_rules(nonterms, rule_set)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::{
    examples::{self, language::sentences},
    transform::{eliminate_unit_rules, transform_to_nonnull},
  };

  fn nonterm_names(g: &Grammar) -> Vec<String> {
    g.nonterminals().iter().map(|nt| nt.to_string()).collect()
  }

  #[test]
  fn test_unreachable_lab_grammar() {
    let before = eliminate_unit_rules(&transform_to_nonnull(
      &examples::make_lab_grammar(),
    ));
    let g = prune_unreachable(&before);
    assert_eq!(nonterm_names(&g), vec!["A", "B", "C", "S"]);
    assert!(g.bodies(&NonTerminal::new("D")).next().is_none());
    assert_eq!(g.terminals(), before.terminals());
  }

  #[test]
  fn test_unproductive_lab_grammar() {
    let before = prune_unreachable(&eliminate_unit_rules(
      &transform_to_nonnull(&examples::make_lab_grammar()),
    ));
    let g = prune_unproductive(&before);
    assert_eq!(nonterm_names(&g), vec!["A", "B", "S"]);

    // S -> A C is gone with C, and no other production mentions C.
    assert!(g
      .prods()
      .all(|prod| prod.body().nonterms().all(|nt| g.is_nonterminal(nt))));
    assert_eq!(sentences(&g, 4), sentences(&before, 4));
  }

  #[test]
  fn test_unproductive_leaves_unreachable() {
    let g = prune_unproductive(&examples::make_unproductive_branch());
    assert_eq!(nonterm_names(&g), vec!["A", "S"]);
    assert_eq!(g.num_prods(), 2);

    let g = prune_unreachable(&g);
    assert_eq!(nonterm_names(&g), vec!["S"]);
    assert_eq!(g.num_prods(), 1);
  }

  #[test]
  fn test_unproductive_start_is_kept() {
    let g = prune_unreachable(&prune_unproductive(
      &examples::make_empty_language(),
    ));
    assert_eq!(nonterm_names(&g), vec!["S"]);
    assert_eq!(g.num_prods(), 0);
    assert_eq!(g.terminals().len(), 1);
    assert_eq!(g.to_pretty(80), "");
  }

  #[test]
  fn test_useful_grammar_is_unchanged() {
    let g = examples::make_long_bodies();
    assert_eq!(prune_unreachable(&g), g);
    assert_eq!(prune_unproductive(&g), g);
  }
}
