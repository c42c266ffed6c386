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
  crate::{grammar::NonTerminal, utils::breadth_first_search},
  std::collections::BTreeSet,
};

/// The nonterminals reachable from the start symbol, where `B` is reachable
/// from `A` if some production of `A` mentions `B`.
#[derive(Clone, Debug)]
pub struct Reachable(BTreeSet<NonTerminal>);

impl Reachable {
  pub fn is_reachable(&self, nt: &NonTerminal) -> bool {
    self.0.contains(nt)
  }

  pub fn reachable_set(&self) -> &BTreeSet<NonTerminal> {
    &self.0
  }
}

impl Pass for Reachable {
  fn run_pass(pass_map: &PassContext) -> Self {
    let g = pass_map.grammar();
    Reachable(breadth_first_search(
      std::iter::once(g.start_nt().clone()),
      |nt| {
        g.bodies(nt)
          .flat_map(|body| body.nonterms())
          .cloned()
          .collect::<BTreeSet<_>>()
      },
    ))
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
    let reachable = pass_map.get_pass::<Reachable>();
    for name in &["S", "A", "B", "C"] {
      assert!(reachable.is_reachable(&NonTerminal::new(name)), "{}", name);
    }
    assert!(!reachable.is_reachable(&NonTerminal::new("D")));
  }

  #[test]
  fn test_start_is_reachable_without_rules() {
    let g = examples::make_empty_language();
    let pass_map = PassContext::new(&g);
    let reachable = pass_map.get_pass::<Reachable>();
    assert_eq!(reachable.reachable_set().len(), 2);
  }
}
