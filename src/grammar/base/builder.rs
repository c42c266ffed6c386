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

use super::{Body, Elem, Grammar, GrammarErrors, NonTerminal, Terminal};

/// A helper trait to allow builder methods to either take a type `T`, a
/// reference to `T` if it is clonable, or a plain string for symbols.
pub trait BuilderInto<T> {
  /// Consumes self and produces a value of type `T`.
  fn builder_into(self) -> T;
}

impl<T> BuilderInto<T> for T {
  fn builder_into(self) -> T {
    self
  }
}

impl<'a, T> BuilderInto<T> for &'a T
where
  T: Clone,
{
  fn builder_into(self) -> T {
    self.clone()
  }
}

impl BuilderInto<Terminal> for &'_ str {
  fn builder_into(self) -> Terminal {
    Terminal::new(self)
  }
}

impl BuilderInto<NonTerminal> for &'_ str {
  fn builder_into(self) -> NonTerminal {
    NonTerminal::new(self)
  }
}

pub struct ProductionBuilder {
  elems: Vec<Elem>,
}

impl ProductionBuilder {
  fn new() -> Self {
    ProductionBuilder { elems: Vec::new() }
  }

  fn build(self) -> Body {
    Body::new(self.elems)
  }

  pub fn add_term(&mut self, term: impl BuilderInto<Terminal>) -> &mut Self {
    self.elems.push(Elem::Term(term.builder_into()));
    self
  }

  pub fn add_nonterm(
    &mut self,
    nonterm: impl BuilderInto<NonTerminal>,
  ) -> &mut Self {
    self.elems.push(Elem::NonTerm(nonterm.builder_into()));
    self
  }

  pub fn add_elem(&mut self, elem: impl BuilderInto<Elem>) -> &mut Self {
    self.elems.push(elem.builder_into());
    self
  }
}

// ----------------

pub struct RuleBuilder {
  head: NonTerminal,
  bodies: Vec<Body>,
}

impl RuleBuilder {
  fn new(head: NonTerminal) -> Self {
    RuleBuilder {
      head,
      bodies: Vec::new(),
    }
  }

  fn build(self) -> impl Iterator<Item = (NonTerminal, Body)> {
    let RuleBuilder { head, bodies } = self;
    bodies.into_iter().map(move |body| (head.clone(), body))
  }

  pub fn add_prod(
    &mut self,
    build_fn: impl FnOnce(&mut ProductionBuilder),
  ) -> &mut Self {
    let mut builder = ProductionBuilder::new();
    build_fn(&mut builder);
    self.bodies.push(builder.build());
    self
  }

  pub fn add_prod_with_elems(
    &mut self,
    elems: impl BuilderInto<Vec<Elem>>,
  ) -> &mut Self {
    self.bodies.push(Body::new(elems.builder_into()));
    self
  }

  /// Adds an ε-production.
  pub fn add_empty_prod(&mut self) -> &mut Self {
    self.bodies.push(Body::empty());
    self
  }
}

// ----------------

pub struct GrammarBuilder {
  start: NonTerminal,
  nonterms: Vec<NonTerminal>,
  terms: Vec<Terminal>,
  prods: Vec<(NonTerminal, Body)>,
}

impl GrammarBuilder {
  fn new(start: NonTerminal) -> Self {
    GrammarBuilder {
      start,
      nonterms: Vec::new(),
      terms: Vec::new(),
      prods: Vec::new(),
    }
  }

  fn build(self) -> Result<Grammar, GrammarErrors> {
    let GrammarBuilder {
      start,
      nonterms,
      terms,
      prods,
    } = self;
    Grammar::new(start, nonterms, terms, prods)
  }

  /// Adds a terminal to the grammar's alphabet.
  pub fn declare_term(&mut self, term: impl BuilderInto<Terminal>) -> &mut Self {
    self.terms.push(term.builder_into());
    self
  }

  /// Adds a nonterminal to the grammar. Heads passed to `add_rule` are
  /// declared automatically.
  pub fn declare_nonterm(
    &mut self,
    nonterm: impl BuilderInto<NonTerminal>,
  ) -> &mut Self {
    self.nonterms.push(nonterm.builder_into());
    self
  }

  pub fn add_rule<F>(
    &mut self,
    head: impl BuilderInto<NonTerminal>,
    build_fn: F,
  ) -> &mut Self
  where
    F: FnOnce(&mut RuleBuilder),
  {
    let head = head.builder_into();
    self.nonterms.push(head.clone());
    let mut rule_builder = RuleBuilder::new(head);
    build_fn(&mut rule_builder);
    self.prods.extend(rule_builder.build());
    self
  }
}

/// Builds a grammar using a builder function.
///
/// Example:
///
/// ```rust
/// # use chomsky::grammar::{Terminal, NonTerminal, Grammar};
/// let t_a = Terminal::new("a");
/// let nt_x = NonTerminal::new("X");
/// let g: Grammar = chomsky::grammar::build(&nt_x, |gb| {
///   gb.declare_term(&t_a).add_rule(&nt_x, |rb| {
///     rb.add_prod(|pb| {
///       pb.add_term(&t_a).add_nonterm(&nt_x).add_term(&t_a);
///     })
///     .add_empty_prod();
///   });
/// })
/// .unwrap();
/// assert_eq!(g.num_prods(), 2);
/// ```
///
/// Symbols used in a production must be declared, either with
/// `declare_term`/`declare_nonterm` or as the head of some rule. Otherwise
/// building fails with the collected `GrammarErrors`.
pub fn build(
  start: impl BuilderInto<NonTerminal>,
  build_fn: impl FnOnce(&mut GrammarBuilder),
) -> Result<Grammar, GrammarErrors> {
  let mut builder = GrammarBuilder::new(start.builder_into());
  build_fn(&mut builder);
  builder.build()
}
