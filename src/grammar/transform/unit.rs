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

//! A Grammar transform that removes unit productions (`A -> B`).
//!
//! Each nonterminal keeps its own non-unit productions and inherits the
//! non-unit productions of every nonterminal it reaches through a chain of
//! unit productions. Chains through cycles and self loops (`A -> A`) resolve
//! to the same result, since the closure only collects nonterminals.

use {
  crate::grammar::{
    passes::{unit_closure::UnitClosure, PassContext},
    Body, Grammar,
  },
  im::{OrdMap, OrdSet},
};

pub fn eliminate_unit_rules(g: &Grammar) -> Grammar {
  let pass_map = PassContext::new(g);
  let closure = pass_map.get_pass::<UnitClosure>();

  let mut rule_set = OrdMap::new();
  for nt in g.nonterminals().iter() {
    let mut new_bodies: OrdSet<Body> = OrdSet::new();
    for source in closure.closure_of(nt).into_iter().flatten() {
      for body in g.bodies(source).filter(|body| body.as_unit().is_none()) {
        // Only the start symbol may keep an empty production.
        if body.is_empty() && nt != g.start_nt() {
          continue;
        }
        new_bodies.insert(body.clone());
      }
    }
    log::trace!(
      "Unit closure of {:?} is {:?}.",
      nt,
      closure.closure_of(nt)
    );
    rule_set.insert(nt.clone(), new_bodies);
  }

  g.with_rules(g.nonterminals().clone(), rule_set)
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::{
    examples::{self, language::sentences},
    transform::transform_to_nonnull,
    NonTerminal,
  };

  fn has_unit_rules(g: &Grammar) -> bool {
    g.prods().any(|prod| prod.body().as_unit().is_some())
  }

  #[test]
  fn test_lab_grammar() {
    let g = eliminate_unit_rules(&transform_to_nonnull(
      &examples::make_lab_grammar(),
    ));
    assert!(!has_unit_rules(&g));

    // S -> B is replaced by B's own productions.
    let b_bodies = g.bodies(&NonTerminal::new("B")).collect::<Vec<_>>();
    assert_eq!(b_bodies.len(), 2);
    for body in b_bodies {
      assert!(g.bodies(g.start_nt()).any(|s_body| s_body == body));
    }

    // D -> B is replaced as well.
    assert_eq!(g.bodies(&NonTerminal::new("D")).count(), 3);
  }

  #[test]
  fn test_cycle_terminates() {
    let before = examples::make_unit_cycle();
    let g = eliminate_unit_rules(&before);
    assert!(!has_unit_rules(&g));
    for nt in g.nonterminals().iter() {
      assert_eq!(g.bodies(nt).count(), 3, "{:?}", nt);
    }
    assert_eq!(sentences(&g, 3), sentences(&before, 3));
  }

  #[test]
  fn test_without_unit_rules_is_identity() {
    let g = examples::make_long_bodies();
    assert_eq!(eliminate_unit_rules(&g), g);
  }

  #[test]
  fn test_empty_start_is_not_inherited() {
    let before =
      transform_to_nonnull(&examples::make_unit_to_nullable_start());
    let g = eliminate_unit_rules(&before);
    assert!(!has_unit_rules(&g));
    assert!(g.has_empty_start());
    assert!(g
      .prods()
      .all(|prod| !prod.body().is_empty() || prod.head() == g.start_nt()));
    assert_eq!(g.bodies(&NonTerminal::new("A")).count(), 3);
    assert_eq!(sentences(&g, 4), sentences(&before, 4));
  }

  #[test]
  fn test_unit_rule_to_ruleless_nonterminal() {
    let g = crate::grammar::build("S", |gb| {
      gb.declare_term("a")
        .declare_nonterm("B")
        .add_rule("S", |rb| {
          rb.add_prod(|pb| {
            pb.add_nonterm("B");
          })
          .add_prod(|pb| {
            pb.add_term("a");
          });
        });
    })
    .unwrap();

    let g = eliminate_unit_rules(&g);
    assert_eq!(g.num_prods(), 1);
    assert!(g.is_nonterminal(&NonTerminal::new("B")));
  }
}
