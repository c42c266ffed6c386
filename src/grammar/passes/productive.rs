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

use {
  super::{Pass, PassContext},
  crate::{
    grammar::{Body, Elem, NonTerminal},
    utils::{change_iter, change_loop, WasChanged},
  },
  std::collections::BTreeSet,
};

/// The nonterminals that derive at least one finite terminal string.
///
/// A nonterminal is productive if one of its productions consists only of
/// terminals and productive nonterminals. The empty production qualifies.
#[derive(Clone, Debug)]
pub struct Productive(BTreeSet<NonTerminal>);

impl Productive {
  pub fn is_productive(&self, nt: &NonTerminal) -> bool {
    self.0.contains(nt)
  }

  pub fn productive_set(&self) -> &BTreeSet<NonTerminal> {
    &self.0
  }

  /// Returns true if every nonterminal of the body is productive.
  pub fn is_body_productive(&self, body: &Body) -> bool {
    is_body_productive(&self.0, body)
  }
}

fn is_body_productive(productive: &BTreeSet<NonTerminal>, body: &Body) -> bool {
  body.elems().iter().all(|elem| match elem {
    Elem::Term(_) => true,
    Elem::NonTerm(nt) => productive.contains(nt),
  })
}

impl Pass for Productive {
  fn run_pass(pass_map: &PassContext) -> Self {
    let g = pass_map.grammar();

    // Seeded by the all-terminal productions on the first round.
    let mut productive = BTreeSet::new();
    change_loop(|| {
      change_iter(g.prods(), |prod| {
        if productive.contains(prod.head())
          || !is_body_productive(&productive, prod.body())
        {
          return WasChanged::Unchanged;
        }

        productive.insert(prod.head().clone());
        WasChanged::Changed
      })
    });

    Productive(productive)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::examples;

  #[test]
  fn test_lab_grammar() {
    let g = examples::make_lab_grammar();
    let pass_map = PassContext::new(&g);
    let productive = pass_map.get_pass::<Productive>();
    for name in &["S", "A", "B", "D"] {
      assert!(productive.is_productive(&NonTerminal::new(name)), "{}", name);
    }
    assert!(!productive.is_productive(&NonTerminal::new("C")));
  }

  #[test]
  fn test_empty_language() {
    let g = examples::make_empty_language();
    let pass_map = PassContext::new(&g);
    let productive = pass_map.get_pass::<Productive>();
    assert!(!productive.is_productive(g.start_nt()));
    assert!(productive.is_productive(&NonTerminal::new("A")));
  }

  #[test]
  fn test_empty_body_is_productive() {
    let g = examples::make_balanced();
    let pass_map = PassContext::new(&g);
    let productive = pass_map.get_pass::<Productive>();
    assert!(productive.is_productive(g.start_nt()));
    assert!(productive.is_body_productive(&Body::empty()));
  }
}
