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
  std::collections::{BTreeMap, BTreeSet},
};

/// For every nonterminal `A`, the nonterminals `X` such that `A` derives `X`
/// through a chain of zero or more unit productions (`A -> B`, `B -> X`).
/// Every nonterminal is in its own closure.
#[derive(Clone, Debug)]
pub struct UnitClosure(BTreeMap<NonTerminal, BTreeSet<NonTerminal>>);

impl UnitClosure {
  /// Returns the unit closure of `nt`.
  pub fn closure_of(&self, nt: &NonTerminal) -> Option<&BTreeSet<NonTerminal>> {
    self.0.get(nt)
  }
}

impl Pass for UnitClosure {
  fn run_pass(pass_map: &PassContext) -> Self {
    let g = pass_map.grammar();
    let unit_targets = |nt: &NonTerminal| {
      g.bodies(nt)
        .filter_map(|body| body.as_unit())
        .cloned()
        .collect::<Vec<_>>()
    };

    UnitClosure(
      g.nonterminals()
        .iter()
        .map(|nt| {
          (
            nt.clone(),
            breadth_first_search(std::iter::once(nt.clone()), unit_targets),
          )
        })
        .collect(),
    )
  }
}
