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

//! A Grammar transform that brings every production into the two-symbol
//! shape of Chomsky Normal Form.
//!
//! This runs in two steps:
//!
//! 1. Terminal isolation: every terminal that appears in a body of two or
//!    more symbols gets a proxy nonterminal `T -> t`, and each such
//!    occurrence is replaced by the proxy.
//! 2. Binary splitting: every body longer than two symbols has its first two
//!    symbols replaced by a proxy for that pair, `N -> X Y`. This is repeated
//!    until no body is longer than two symbols.
//!
//! Proxies are shared: a terminal, or an ordered pair of symbols, gets at
//! most one proxy per run. The input is expected to be free of unit rules
//! and of empty productions other than on the start symbol.

use {
  super::fresh::{NameAllocator, NameCollision},
  crate::{
    grammar::{Body, Elem, Grammar, NonTerminal, Terminal},
    normalize::NormalizeConfig,
    utils::{Name, WasChanged},
  },
  im::{OrdMap, OrdSet},
  std::collections::BTreeMap,
};

type RuleSet = OrdMap<NonTerminal, OrdSet<Body>>;

pub fn binarize(
  g: &Grammar,
  config: &NormalizeConfig,
  names: &mut NameAllocator,
) -> Result<Grammar, NameCollision> {
  let mut nonterms = g.nonterminals().clone();

  let mut rule_set = isolate_terminals(
    g.rule_set(),
    &config.terminal_proxy_prefix,
    names,
    &mut nonterms,
  )?;
  split_long_bodies(
    &mut rule_set,
    &config.pair_proxy_prefix,
    names,
    &mut nonterms,
  )?;

  Ok(g.with_rules(nonterms, rule_set))
}

/// Returns the proxy for `key`, allocating one if this is the first time the
/// key is seen.
fn get_or_alloc_proxy<K: Ord + Clone>(
  proxies: &mut BTreeMap<K, NonTerminal>,
  key: &K,
  prefix: &Name,
  names: &mut NameAllocator,
) -> Result<NonTerminal, NameCollision> {
  if let Some(proxy) = proxies.get(key) {
    return Ok(proxy.clone());
  }

  let proxy = names.fresh(prefix)?;
  proxies.insert(key.clone(), proxy.clone());
  Ok(proxy)
}

fn isolate_terminals(
  rule_set: &RuleSet,
  prefix: &Name,
  names: &mut NameAllocator,
  nonterms: &mut OrdSet<NonTerminal>,
) -> Result<RuleSet, NameCollision> {
  let mut proxies: BTreeMap<Terminal, NonTerminal> = BTreeMap::new();

  let mut new_rule_set = OrdMap::new();
  for (head, bodies) in rule_set.iter() {
    let mut new_bodies = OrdSet::new();
    for body in bodies.iter() {
      if body.len() < 2 {
        new_bodies.insert(body.clone());
        continue;
      }

      let mut elems = Vec::with_capacity(body.len());
      for elem in body.elems() {
        match elem {
          Elem::Term(t) => {
            let proxy = get_or_alloc_proxy(&mut proxies, t, prefix, names)?;
            elems.push(Elem::NonTerm(proxy));
          }
          Elem::NonTerm(_) => elems.push(elem.clone()),
        }
      }
      new_bodies.insert(Body::new(elems));
    }
    new_rule_set.insert(head.clone(), new_bodies);
  }

  for (t, proxy) in proxies {
    log::trace!("Terminal proxy {:?} -> {:?}.", proxy, t);
    nonterms.insert(proxy.clone());
    new_rule_set.insert(proxy, OrdSet::unit(Body::new(vec![Elem::Term(t)])));
  }

  Ok(new_rule_set)
}

fn split_long_bodies(
  rule_set: &mut RuleSet,
  prefix: &Name,
  names: &mut NameAllocator,
  nonterms: &mut OrdSet<NonTerminal>,
) -> Result<(), NameCollision> {
  let mut proxies: BTreeMap<(Elem, Elem), NonTerminal> = BTreeMap::new();

  loop {
    let mut changed = WasChanged::Unchanged;
    let mut new_proxies = Vec::new();

    let mut next_rule_set = OrdMap::new();
    for (head, bodies) in rule_set.iter() {
      let mut new_bodies = OrdSet::new();
      for body in bodies.iter() {
        match body.elems() {
          [first, second, rest @ ..] if !rest.is_empty() => {
            let key = (first.clone(), second.clone());
            let known = proxies.contains_key(&key);
            let proxy = get_or_alloc_proxy(&mut proxies, &key, prefix, names)?;
            if !known {
              new_proxies.push((proxy.clone(), key));
            }

            let new_body = std::iter::once(Elem::NonTerm(proxy))
              .chain(rest.iter().cloned())
              .collect::<Body>();
            log::trace!("Split {:?} -> {:?} into {:?}.", head, body, new_body);
            new_bodies.insert(new_body);
            changed.merge(WasChanged::Changed);
          }
          _ => {
            new_bodies.insert(body.clone());
          }
        }
      }
      next_rule_set.insert(head.clone(), new_bodies);
    }

    for (proxy, (first, second)) in new_proxies {
      nonterms.insert(proxy.clone());
      next_rule_set.insert(proxy, OrdSet::unit(Body::new(vec![first, second])));
    }
    *rule_set = next_rule_set;

    if let WasChanged::Unchanged = changed {
      return Ok(());
    }
  }
}
