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

//! A Grammar transform that removes all empty productions.
//!
//! Each production is replaced with a set of productions where, for each
//! possible assignment from {Null, NonNull} to each nullable non-terminal in
//! that production, there exists a production with all Null-assigned
//! non-terminals removed. A production that is empty after this is excluded,
//! as are the original empty productions. If the start symbol was nullable, a
//! single empty production is added back to it, so the language is unchanged.
//!
//! Example: For the grammar:
//!
//! ```text
//! S -> A a A
//! A -> b | ε
//! ```
//!
//! This is transformed into:
//!
//! ```text
//! S -> A a A | a A | A a | a
//! A -> b
//! ```

use {
  crate::grammar::{
    passes::{nullable::Nullable, PassContext},
    Body, Elem, Grammar,
  },
  im::{OrdMap, OrdSet},
};

pub fn transform_to_nonnull(g: &Grammar) -> Grammar {
  let pass_map = PassContext::new(g);
  let nullable = pass_map.get_pass::<Nullable>();

  let mut rule_set = OrdMap::new();
  for (head, bodies) in g.rule_set().iter() {
    let mut new_bodies = OrdSet::new();
    for body in bodies.iter().filter(|body| !body.is_empty()) {
      let expanded = build_nonnull_bodies(&nullable, body);
      log::trace!("Expanded {:?} -> {:?} into {:?}.", head, body, expanded);
      for new_body in expanded.into_iter().filter(|b| !b.is_empty()) {
        new_bodies.insert(new_body);
      }
    }
    rule_set.insert(head.clone(), new_bodies);
  }

  let start = g.start_nt();
  if nullable.is_nullable(start) {
    let mut start_bodies: OrdSet<Body> =
      rule_set.get(start).cloned().unwrap_or_default();
    start_bodies.insert(Body::empty());
    rule_set.insert(start.clone(), start_bodies);
  }

  g.with_rules(g.nonterminals().clone(), rule_set)
}

/// Returns the body once for every subset of its nullable positions, with
/// the elements at those positions removed. Bodies with `k` nullable
/// positions produce `2^k` results, some of which may be equal or empty.
fn build_nonnull_bodies(nullable: &Nullable, body: &Body) -> Vec<Body> {
  let mut curr_build_states: Vec<Vec<Elem>> = vec![Vec::new()];

  for elem in body.elems() {
    match elem {
      Elem::NonTerm(nt) if nullable.is_nullable(nt) => {
        // Every state so far splits into one that keeps the element and one
        // that drops it.
        let mut dropped_states = curr_build_states.clone();
        for curr_build_state in &mut curr_build_states {
          curr_build_state.push(elem.clone());
        }
        curr_build_states.append(&mut dropped_states);
      }
      _ => {
        for curr_build_state in &mut curr_build_states {
          curr_build_state.push(elem.clone());
        }
      }
    }
  }

  curr_build_states.into_iter().map(Body::new).collect()
}
