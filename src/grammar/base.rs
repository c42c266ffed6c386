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

pub mod builder;
mod element_types;

use {
  crate::utils::{Name, ToDoc},
  im::{OrdMap, OrdSet},
  std::collections::{BTreeMap, BTreeSet},
};

pub use element_types::{NonTerminal, Terminal};

/// A single element (terminal or non-terminal).
#[derive(Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Elem {
  Term(Terminal),
  NonTerm(NonTerminal),
}

impl Elem {
  /// If this element is a terminal, returns a `Some` value containing a
  /// terminal datum. Returns `None` otherwise.
  pub fn as_term(&self) -> Option<&Terminal> {
    match self {
      Elem::NonTerm(_) => None,
      Elem::Term(t) => Some(t),
    }
  }

  /// Gets an element as a nonterm. Returns a `None` value otherwise.
  pub fn as_nonterm(&self) -> Option<&NonTerminal> {
    match self {
      Elem::NonTerm(nt) => Some(nt),
      Elem::Term(_) => None,
    }
  }

  pub fn name(&self) -> &Name {
    match self {
      Elem::NonTerm(nt) => nt.name(),
      Elem::Term(t) => t.name(),
    }
  }
}

impl ToDoc for Elem {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    match self {
      Elem::NonTerm(nt) => nt.to_doc(da),
      Elem::Term(t) => t.to_doc(da),
    }
  }
}

impl std::fmt::Debug for Elem {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    match self {
      Elem::Term(term) => std::fmt::Debug::fmt(term, fmt),
      Elem::NonTerm(nt) => std::fmt::Debug::fmt(nt, fmt),
    }
  }
}

impl From<Terminal> for Elem {
  fn from(t: Terminal) -> Self {
    Elem::Term(t)
  }
}

impl From<NonTerminal> for Elem {
  fn from(nt: NonTerminal) -> Self {
    Elem::NonTerm(nt)
  }
}

/// The right-hand side of a production. An empty body is the ε-production.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Body(Vec<Elem>);

impl Body {
  pub fn new(elems: Vec<Elem>) -> Self {
    Body(elems)
  }

  /// The ε body.
  pub fn empty() -> Self {
    Body(Vec::new())
  }

  pub fn elems(&self) -> &[Elem] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Returns the nonterminal if this body is exactly one nonterminal.
  pub fn as_unit(&self) -> Option<&NonTerminal> {
    match self.0.as_slice() {
      [Elem::NonTerm(nt)] => Some(nt),
      _ => None,
    }
  }

  pub fn nonterms(&self) -> impl Iterator<Item = &NonTerminal> {
    self.0.iter().filter_map(|e| e.as_nonterm())
  }

  pub fn terms(&self) -> impl Iterator<Item = &Terminal> {
    self.0.iter().filter_map(|e| e.as_term())
  }
}

impl std::iter::FromIterator<Elem> for Body {
  fn from_iter<I: IntoIterator<Item = Elem>>(iter: I) -> Self {
    Body(iter.into_iter().collect())
  }
}

impl ToDoc for Body {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    if self.0.is_empty() {
      da.text("ε")
    } else {
      da.intersperse(self.0.iter().map(|e| e.to_doc(da)), da.text(" "))
    }
  }
}

impl std::fmt::Debug for Body {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    if self.0.is_empty() {
      return fmt.write_str("ε");
    }
    let mut list = fmt.debug_list();
    list.entries(self.0.iter());
    list.finish()
  }
}

/// A single production in a grammar: a head nonterminal and one of its
/// bodies, borrowed from the grammar it came from.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Prod<'a> {
  head: &'a NonTerminal,
  body: &'a Body,
}

impl<'a> Prod<'a> {
  fn new(head: &'a NonTerminal, body: &'a Body) -> Self {
    Prod { head, body }
  }

  /// Returns the head of this production.
  pub fn head(&self) -> &'a NonTerminal {
    self.head
  }

  /// Returns the body of this production.
  pub fn body(&self) -> &'a Body {
    self.body
  }

  /// Returns an iterator over the elements of this production.
  pub fn elements(&self) -> impl Iterator<Item = &'a Elem> + Clone {
    self.body.0.iter()
  }
}

impl std::fmt::Debug for Prod<'_> {
  fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
    let mut dbg_struct = fmt.debug_struct("Prod");
    dbg_struct.field("head", self.head);
    dbg_struct.field("body", self.body);
    dbg_struct.finish()
  }
}

/// A context-free grammar.
///
/// This consists of
///
/// - A set of nonterminals (`Vn`)
/// - A set of terminals (`Vt`), disjoint by name from `Vn`
/// - A start nonterminal, which is a member of `Vn`
/// - A rule set mapping each nonterminal to the set of its production bodies.
///   Duplicate bodies for the same nonterminal collapse.
///
/// Grammars are immutable. Every transformation builds a new grammar, sharing
/// structure with its input where possible.
#[derive(Clone, PartialEq, Eq)]
pub struct Grammar {
  start_symbol: NonTerminal,
  nonterms: OrdSet<NonTerminal>,
  terms: OrdSet<Terminal>,
  rule_set: OrdMap<NonTerminal, OrdSet<Body>>,
}

impl Grammar {
  /// Creates a grammar from its components, checking that every symbol used
  /// by a rule has been declared.
  pub fn new(
    start: NonTerminal,
    nonterms: impl IntoIterator<Item = NonTerminal>,
    terms: impl IntoIterator<Item = Terminal>,
    prods: impl IntoIterator<Item = (NonTerminal, Body)>,
  ) -> Result<Self, GrammarErrors> {
    let mut rule_set: BTreeMap<NonTerminal, BTreeSet<Body>> = BTreeMap::new();
    for (head, body) in prods {
      rule_set.entry(head).or_default().insert(body);
    }

    let g = Grammar {
      start_symbol: start,
      nonterms: nonterms.into_iter().collect(),
      terms: terms.into_iter().collect(),
      rule_set: rule_set
        .into_iter()
        .map(|(head, bodies)| {
          (head, bodies.into_iter().collect::<OrdSet<Body>>())
        })
        .collect(),
    };

    g.check_grammar().map(|_| g)
  }

  /// Returns a grammar with the same start symbol and terminals as this one,
  /// but with the given nonterminals and rules. Nonterminals whose body set is
  /// empty are dropped from the rule set.
  pub(crate) fn with_rules(
    &self,
    nonterms: OrdSet<NonTerminal>,
    rule_set: OrdMap<NonTerminal, OrdSet<Body>>,
  ) -> Self {
    let g = Grammar {
      start_symbol: self.start_symbol.clone(),
      nonterms,
      terms: self.terms.clone(),
      rule_set: rule_set
        .into_iter()
        .filter(|(_, bodies)| !bodies.is_empty())
        .collect(),
    };
    debug_assert!(
      g.check_grammar().is_ok(),
      "transformation produced a malformed grammar: {:?}",
      g.check_grammar()
    );
    g
  }

  /// Returns the start nonterminal for this grammar.
  pub fn start_nt(&self) -> &NonTerminal {
    &self.start_symbol
  }

  pub fn nonterminals(&self) -> &OrdSet<NonTerminal> {
    &self.nonterms
  }

  pub fn terminals(&self) -> &OrdSet<Terminal> {
    &self.terms
  }

  pub fn is_nonterminal(&self, nt: &NonTerminal) -> bool {
    self.nonterms.contains(nt)
  }

  pub fn is_terminal(&self, t: &Terminal) -> bool {
    self.terms.contains(t)
  }

  /// Returns the rule set, keyed by head nonterminal.
  pub fn rule_set(&self) -> &OrdMap<NonTerminal, OrdSet<Body>> {
    &self.rule_set
  }

  /// Returns the bodies of the rules with the given head. Nonterminals
  /// without rules yield nothing.
  pub fn bodies<'a>(
    &'a self,
    nt: &NonTerminal,
  ) -> impl Iterator<Item = &'a Body> + 'a {
    self.rule_set.get(nt).into_iter().flat_map(|bodies| bodies.iter())
  }

  /// Gets an iterator over all productions in the grammar, ordered by head
  /// and then by body.
  pub fn prods(&self) -> impl Iterator<Item = Prod<'_>> {
    self.rule_set.iter().flat_map(|(head, bodies)| {
      bodies.iter().map(move |body| Prod::new(head, body))
    })
  }

  pub fn num_prods(&self) -> usize {
    self.rule_set.values().map(|bodies| bodies.len()).sum()
  }

  /// Returns true if the start symbol has an ε-production.
  pub fn has_empty_start(&self) -> bool {
    self
      .rule_set
      .get(&self.start_symbol)
      .map_or(false, |bodies| bodies.contains(&Body::empty()))
  }

  /// Returns true if every production has the form `X -> a` or `X -> Y Z`,
  /// apart from an optional `S -> ε` on the start symbol.
  pub fn is_cnf(&self) -> bool {
    self.prods().all(|prod| match prod.body().elems() {
      [] => prod.head() == &self.start_symbol,
      [Elem::Term(_)] => true,
      [Elem::NonTerm(_), Elem::NonTerm(_)] => true,
      _ => false,
    })
  }

  pub(crate) fn check_grammar(&self) -> Result<(), GrammarErrors> {
    let mut errors = GrammarErrors::default();

    if !self.nonterms.contains(&self.start_symbol) {
      errors.missing_start = Some(self.start_symbol.clone());
    }

    for prod in self.prods() {
      if !self.nonterms.contains(prod.head()) {
        errors.undeclared_heads.insert(prod.head().clone());
      }

      for elem in prod.elements() {
        match elem {
          Elem::Term(t) if !self.terms.contains(t) => {
            errors.undeclared_terms.insert(t.clone());
          }
          Elem::NonTerm(nt) if !self.nonterms.contains(nt) => {
            errors.undeclared_nonterms.insert(nt.clone());
          }
          _ => {}
        }
      }
    }

    let nonterm_names = self
      .nonterms
      .iter()
      .map(|nt| nt.name())
      .collect::<BTreeSet<_>>();
    errors.ambiguous_names = self
      .terms
      .iter()
      .map(|t| t.name())
      .filter(|name| nonterm_names.contains(name))
      .cloned()
      .collect();

    errors.into_result()
  }

  /// Renders the grammar as `S->A b|ε, A->a, ...`, starting with the rules
  /// of the start symbol.
  pub fn to_pretty(&self, width: usize) -> String {
    let arena = pretty::Arena::new();
    format!("{}", self.to_doc(&arena).into_doc().pretty(width))
  }
}

impl ToDoc for Grammar {
  fn to_doc<'a, DA: pretty::DocAllocator<'a>>(
    &self,
    da: &'a DA,
  ) -> pretty::DocBuilder<'a, DA>
  where
    DA::Doc: Clone,
  {
    let heads = std::iter::once(&self.start_symbol)
      .filter(|nt| self.rule_set.contains_key(*nt))
      .chain(self.rule_set.keys().filter(|nt| **nt != self.start_symbol));

    da.intersperse(
      heads.map(|head| {
        head.to_doc(da).append(da.text("->")).append(da.intersperse(
          self.bodies(head).map(|body| body.to_doc(da)),
          da.text("|"),
        ))
      }),
      da.text(",").append(da.softline()),
    )
    .group()
  }
}

impl std::fmt::Display for Grammar {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    f.write_str(&self.to_pretty(80))
  }
}

impl std::fmt::Debug for Grammar {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    let mut dbg_struct = f.debug_struct("Grammar");
    dbg_struct.field("Start", &self.start_symbol);
    dbg_struct.field("Terms", &self.terms.iter().collect::<Vec<_>>());
    dbg_struct.field("NonTerms", &self.nonterms.iter().collect::<Vec<_>>());
    dbg_struct.field("Prods", &self.prods().collect::<Vec<_>>());
    dbg_struct.finish()
  }
}

/// The structural problems found in a grammar. A grammar is only constructed
/// if this is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, thiserror::Error)]
#[error("malformed grammar: {}", self.describe())]
pub struct GrammarErrors {
  missing_start: Option<NonTerminal>,
  undeclared_heads: BTreeSet<NonTerminal>,
  undeclared_nonterms: BTreeSet<NonTerminal>,
  undeclared_terms: BTreeSet<Terminal>,
  ambiguous_names: BTreeSet<Name>,
}

impl GrammarErrors {
  fn into_result(self) -> Result<(), Self> {
    if self.missing_start.is_none()
      && self.undeclared_heads.is_empty()
      && self.undeclared_nonterms.is_empty()
      && self.undeclared_terms.is_empty()
      && self.ambiguous_names.is_empty()
    {
      Ok(())
    } else {
      Err(self)
    }
  }

  /// The start symbol, if it is not one of the grammar's nonterminals.
  pub fn missing_start(&self) -> Option<&NonTerminal> {
    self.missing_start.as_ref()
  }

  /// Rule heads that are not among the grammar's nonterminals.
  pub fn undeclared_heads(&self) -> &BTreeSet<NonTerminal> {
    &self.undeclared_heads
  }

  /// Nonterminals used in rule bodies but not declared.
  pub fn undeclared_nonterms(&self) -> &BTreeSet<NonTerminal> {
    &self.undeclared_nonterms
  }

  /// Terminals used in rule bodies but not declared.
  pub fn undeclared_terms(&self) -> &BTreeSet<Terminal> {
    &self.undeclared_terms
  }

  /// Names declared both as a terminal and as a nonterminal.
  pub fn ambiguous_names(&self) -> &BTreeSet<Name> {
    &self.ambiguous_names
  }
}

fn join_names<'a, I, D>(items: I) -> String
where
  I: IntoIterator<Item = &'a D>,
  D: std::fmt::Display + 'a,
{
  items
    .into_iter()
    .map(|item| item.to_string())
    .collect::<Vec<_>>()
    .join(", ")
}

impl GrammarErrors {
  fn describe(&self) -> String {
    let mut problems = Vec::new();
    if let Some(start) = &self.missing_start {
      problems.push(format!("start symbol {} is not a nonterminal", start));
    }
    if !self.undeclared_heads.is_empty() {
      problems.push(format!(
        "rule heads not declared as nonterminals: {}",
        join_names(&self.undeclared_heads)
      ));
    }
    if !self.undeclared_nonterms.is_empty() {
      problems.push(format!(
        "undeclared nonterminals in rule bodies: {}",
        join_names(&self.undeclared_nonterms)
      ));
    }
    if !self.undeclared_terms.is_empty() {
      problems.push(format!(
        "undeclared terminals in rule bodies: {}",
        join_names(&self.undeclared_terms)
      ));
    }
    if !self.ambiguous_names.is_empty() {
      problems.push(format!(
        "names declared as both terminal and nonterminal: {}",
        join_names(&self.ambiguous_names)
      ));
    }
    problems.join("; ")
  }
}
