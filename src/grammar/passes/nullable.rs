// Copyright 2019 Google LLC
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

//! Calculate the nullable set of a grammar.
//!
//! The nullable set of a grammar is the set of non-terminals in that grammar
//! that can derive the empty terminal sequence, either through an empty
//! production or through a production made only of nullable non-terminals.

use {
  super::{Pass, PassContext},
  crate::{
    grammar::{Body, Elem, NonTerminal},
    utils::{change_iter, change_loop, WasChanged},
  },
  std::collections::BTreeSet,
};

#[derive(Clone, Debug)]
pub struct Nullable(BTreeSet<NonTerminal>);

impl Nullable {
  pub fn is_nullable(&self, nt: &NonTerminal) -> bool {
    self.0.contains(nt)
  }

  pub fn nullable_set(&self) -> &BTreeSet<NonTerminal> {
    &self.0
  }

  /// Returns true if every element of the body is nullable. The empty body
  /// is nullable.
  pub fn is_body_nullable(&self, body: &Body) -> bool {
    is_body_nullable(&self.0, body)
  }
}

fn is_body_nullable(nullables: &BTreeSet<NonTerminal>, body: &Body) -> bool {
  body.elems().iter().all(|elem| match elem {
    Elem::Term(_) => false,
    Elem::NonTerm(nt) => nullables.contains(nt),
  })
}

impl Pass for Nullable {
  fn run_pass(pass_map: &PassContext) -> Self {
    let g = pass_map.grammar();
    let mut nullables = BTreeSet::new();

    let rounds = change_loop(|| {
      change_iter(g.prods(), |prod| {
        if nullables.contains(prod.head()) {
          return WasChanged::Unchanged;
        }

        if is_body_nullable(&nullables, prod.body()) {
          nullables.insert(prod.head().clone());
          WasChanged::Changed
        } else {
          WasChanged::Unchanged
        }
      })
    });

    log::trace!(
      "Nullable set {:?} reached after {} rounds.",
      nullables,
      rounds
    );
    Nullable(nullables)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::{build, examples};

  fn nullable_names(g: &crate::grammar::Grammar) -> Vec<String> {
    let pass_map = PassContext::new(g);
    let nullable = pass_map.get_pass::<Nullable>();
    nullable
      .nullable_set()
      .iter()
      .map(|nt| nt.to_string())
      .collect()
  }

  #[test]
  fn test_lab_grammar() {
    assert_eq!(nullable_names(&examples::make_lab_grammar()), vec!["A"]);
  }

  #[test]
  fn test_transitive_nullable() {
    // S -> A B, A -> B | ε, B -> A A | b
    let g = build("S", |gb| {
      gb.declare_term("b")
        .add_rule("S", |rb| {
          rb.add_prod(|pb| {
            pb.add_nonterm("A").add_nonterm("B");
          });
        })
        .add_rule("A", |rb| {
          rb.add_prod(|pb| {
            pb.add_nonterm("B");
          })
          .add_empty_prod();
        })
        .add_rule("B", |rb| {
          rb.add_prod(|pb| {
            pb.add_nonterm("A").add_nonterm("A");
          })
          .add_prod(|pb| {
            pb.add_term("b");
          });
        });
    })
    .unwrap();

    assert_eq!(nullable_names(&g), vec!["A", "B", "S"]);
  }

  #[test]
  fn test_terminal_blocks_nullability() {
    assert!(nullable_names(&examples::make_long_bodies()).is_empty());
  }

  #[test]
  fn test_body_nullable() {
    let g = examples::make_nullable_start();
    let pass_map = PassContext::new(&g);
    let nullable = pass_map.get_pass::<Nullable>();
    assert!(nullable.is_nullable(g.start_nt()));
    assert!(nullable.is_body_nullable(&Body::empty()));
    for body in g.bodies(g.start_nt()) {
      if body.terms().next().is_some() {
        assert!(!nullable.is_body_nullable(body));
      }
    }
  }
}
