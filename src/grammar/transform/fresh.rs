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
  crate::{
    grammar::{Grammar, NonTerminal},
    utils::Name,
  },
  std::collections::BTreeSet,
};

/// A generated nonterminal name was already used by the grammar.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("generated nonterminal name {0} is already used by the grammar")]
pub struct NameCollision(pub NonTerminal);

/// Hands out fresh nonterminal names of the form `<prefix><counter>`.
///
/// One counter is shared by every prefix, so two names handed out by the same
/// allocator never share a counter value. An allocator belongs to a single
/// pipeline run.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct NameAllocator {
  next_index: usize,
  #[derivative(Debug = "ignore")]
  taken: BTreeSet<Name>,
}

impl NameAllocator {
  pub fn new(taken: impl IntoIterator<Item = Name>) -> Self {
    NameAllocator {
      next_index: 0,
      taken: taken.into_iter().collect(),
    }
  }

  /// Creates an allocator that treats every symbol name of `g` as taken.
  pub fn for_grammar(g: &Grammar) -> Self {
    Self::new(
      g.nonterminals()
        .iter()
        .map(|nt| nt.name().clone())
        .chain(g.terminals().iter().map(|t| t.name().clone())),
    )
  }

  /// Returns the next name with the given prefix. The counter advances even
  /// if the name is rejected.
  pub fn fresh(&mut self, prefix: &Name) -> Result<NonTerminal, NameCollision> {
    let name = Name::new(&format!("{}{}", prefix, self.next_index));
    self.next_index += 1;

    let nt = NonTerminal::from(name.clone());
    if !self.taken.insert(name) {
      return Err(NameCollision(nt));
    }

    log::trace!("Allocated fresh nonterminal {:?}.", nt);
    Ok(nt)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::examples;

  #[test]
  fn test_counter_is_shared() {
    let mut alloc = NameAllocator::new(vec![]);
    let t = Name::new("T");
    let n = Name::new("N");
    assert_eq!(alloc.fresh(&t).unwrap(), NonTerminal::new("T0"));
    assert_eq!(alloc.fresh(&n).unwrap(), NonTerminal::new("N1"));
    assert_eq!(alloc.fresh(&t).unwrap(), NonTerminal::new("T2"));
  }

  #[test]
  fn test_collision_with_existing_nonterminal() {
    let g = examples::make_reserved_names();
    let mut alloc = NameAllocator::for_grammar(&g);
    assert_eq!(
      alloc.fresh(&Name::new("T")),
      Err(NameCollision(NonTerminal::new("T0")))
    );
    assert_eq!(alloc.fresh(&Name::new("T")), Ok(NonTerminal::new("T1")));
  }

  #[test]
  fn test_collision_with_existing_terminal() {
    let mut alloc = NameAllocator::new(vec![Name::new("x0")]);
    assert!(alloc.fresh(&Name::new("x")).is_err());
  }

  #[test]
  fn test_error_message() {
    let err = NameCollision(NonTerminal::new("N3"));
    assert_eq!(
      err.to_string(),
      "generated nonterminal name N3 is already used by the grammar"
    );
  }
}
