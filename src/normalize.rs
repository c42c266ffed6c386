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

//! The full normalization pipeline.
//!
//! Stages run in a fixed order, each consuming the previous stage's grammar:
//! epsilon elimination, unit rule elimination, unreachable pruning,
//! unproductive pruning (followed by a second unreachable sweep, since
//! dropping unproductive rules can strand nonterminals), and binarization.

use crate::{
  grammar::{
    transform::{
      binarize, eliminate_unit_rules, prune_unproductive, prune_unreachable,
      transform_to_nonnull, NameAllocator, NameCollision,
    },
    Grammar, GrammarErrors,
  },
  utils::Name,
};

/// Settings for a pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizeConfig {
  /// Prefix of the nonterminals that stand in for a single terminal.
  pub terminal_proxy_prefix: Name,
  /// Prefix of the nonterminals that stand in for a pair of symbols.
  pub pair_proxy_prefix: Name,
}

impl Default for NormalizeConfig {
  fn default() -> Self {
    NormalizeConfig {
      terminal_proxy_prefix: Name::new("T"),
      pair_proxy_prefix: Name::new("N"),
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
  #[error(transparent)]
  Malformed(#[from] GrammarErrors),
  #[error(transparent)]
  NameCollision(#[from] NameCollision),
}

/// The grammar after each stage of the pipeline.
#[derive(Clone, Debug)]
pub struct Stages {
  pub epsilon_free: Grammar,
  pub unit_free: Grammar,
  pub reachable: Grammar,
  pub productive: Grammar,
  pub cnf: Grammar,
}

/// Runs every stage of the pipeline on `g`, keeping each intermediate
/// grammar.
pub fn run_stages(
  g: &Grammar,
  config: &NormalizeConfig,
) -> Result<Stages, NormalizeError> {
  g.check_grammar()?;
  log::debug!("Normalizing: {}", g);

  let epsilon_free = transform_to_nonnull(g);
  log::debug!("Epsilon free: {}", epsilon_free);

  let unit_free = eliminate_unit_rules(&epsilon_free);
  log::debug!("Unit free: {}", unit_free);

  let reachable = prune_unreachable(&unit_free);
  log::debug!("Reachable: {}", reachable);

  let productive = prune_unreachable(&prune_unproductive(&reachable));
  log::debug!("Productive: {}", productive);

  let mut names = NameAllocator::for_grammar(&productive);
  let cnf = binarize(&productive, config, &mut names)?;
  log::debug!("CNF: {}", cnf);

  Ok(Stages {
    epsilon_free,
    unit_free,
    reachable,
    productive,
    cnf,
  })
}

pub fn to_cnf_with_config(
  g: &Grammar,
  config: &NormalizeConfig,
) -> Result<Grammar, NormalizeError> {
  run_stages(g, config).map(|stages| stages.cnf)
}

/// Converts `g` into an equivalent grammar in Chomsky Normal Form, using the
/// default proxy prefixes.
pub fn to_cnf(g: &Grammar) -> Result<Grammar, NormalizeError> {
  to_cnf_with_config(g, &NormalizeConfig::default())
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::grammar::{
    examples::{self, language::sentences},
    passes::{
      nullable::Nullable, productive::Productive, reachable::Reachable,
      PassContext,
    },
    Body, Elem, NonTerminal, Terminal,
  };

  fn all_examples() -> Vec<Grammar> {
    vec![
      examples::make_lab_grammar(),
      examples::make_nullable_start(),
      examples::make_balanced(),
      examples::make_unit_cycle(),
      examples::make_unit_to_nullable_start(),
      examples::make_long_bodies(),
      examples::make_unproductive_branch(),
      examples::make_empty_language(),
    ]
  }

  fn nt(s: &str) -> NonTerminal {
    NonTerminal::new(s)
  }

  fn body(elems: Vec<Elem>) -> Body {
    Body::new(elems)
  }

  #[test]
  fn test_lab_grammar_stages() {
    let g = examples::make_lab_grammar();

    let pass_map = PassContext::new(&g);
    let nullable = pass_map.get_pass::<Nullable>();
    assert_eq!(
      nullable.nullable_set().iter().collect::<Vec<_>>(),
      vec![&nt("A")]
    );

    let stages = run_stages(&g, &NormalizeConfig::default()).unwrap();

    // A is not the start symbol, so its empty production is dropped, and
    // S -> b A gains the variant S -> b.
    let eps = &stages.epsilon_free;
    assert!(eps.bodies(&nt("A")).all(|body| !body.is_empty()));
    assert!(!eps.has_empty_start());
    let b = Elem::Term(Terminal::new("b"));
    assert!(eps.bodies(&nt("S")).any(|s| *s == body(vec![b.clone()])));

    // S -> B is replaced by B -> a | b S.
    let unit_free = &stages.unit_free;
    let a_body = body(vec![Elem::Term(Terminal::new("a"))]);
    let bs_body = body(vec![b, Elem::NonTerm(nt("S"))]);
    assert!(unit_free.bodies(&nt("S")).any(|s| *s == a_body));
    assert!(unit_free.bodies(&nt("S")).any(|s| *s == bs_body));
    assert!(unit_free.prods().all(|prod| prod.body().as_unit().is_none()));

    assert!(unit_free.is_nonterminal(&nt("D")));
    assert!(!stages.reachable.is_nonterminal(&nt("D")));
    assert!(!stages.productive.is_nonterminal(&nt("C")));

    let cnf = &stages.cnf;
    assert!(cnf.is_cnf());
    assert!(cnf.prods().all(|prod| prod.body().len() <= 2));
    assert!(cnf.prods().all(|prod| {
      prod.body().len() < 2 || prod.body().terms().next().is_none()
    }));
  }

  #[test]
  fn test_lab_grammar_output() {
    let cnf = to_cnf(&examples::make_lab_grammar()).unwrap();
    assert_eq!(
      cnf.to_pretty(200),
      "S->a|b|T0 A|T1 A|T1 S, A->N3 T1|N4 T1|T0 S, B->a|T1 S, N2->A B, \
       N3->B T0, N4->N2 T0, T0->a, T1->b"
    );
  }

  #[test]
  fn test_cnf_shape() {
    for g in all_examples() {
      let cnf = to_cnf(&g).unwrap();
      assert!(cnf.is_cnf(), "{}", cnf);
    }
  }

  #[test]
  fn test_no_unit_rules_after_elimination() {
    for g in all_examples() {
      let stages = run_stages(&g, &NormalizeConfig::default()).unwrap();
      for stage in &[
        &stages.unit_free,
        &stages.reachable,
        &stages.productive,
        &stages.cnf,
      ] {
        assert!(stage.prods().all(|prod| prod.body().as_unit().is_none()));
      }
    }
  }

  #[test]
  fn test_only_start_has_empty_rule() {
    for g in all_examples() {
      let stages = run_stages(&g, &NormalizeConfig::default()).unwrap();
      for stage in &[
        &stages.epsilon_free,
        &stages.unit_free,
        &stages.reachable,
        &stages.productive,
        &stages.cnf,
      ] {
        assert!(
          stage.prods().all(|prod| {
            !prod.body().is_empty() || prod.head() == stage.start_nt()
          }),
          "{}",
          stage
        );
      }
    }
  }

  #[test]
  fn test_unit_rule_to_nullable_start() {
    let g = examples::make_unit_to_nullable_start();
    let cnf = to_cnf(&g).unwrap();
    assert!(cnf.is_cnf(), "{}", cnf);
    assert_eq!(cnf.to_pretty(80), "S->ε|a|T0 A, A->a|b|T0 A, T0->a");
    assert_eq!(sentences(&cnf, 5), sentences(&g, 5));
  }

  #[test]
  fn test_every_nonterminal_is_useful() {
    for g in all_examples() {
      let cnf = to_cnf(&g).unwrap();
      let pass_map = PassContext::new(&cnf);
      let reachable = pass_map.get_pass::<Reachable>();
      let productive = pass_map.get_pass::<Productive>();
      for nt in cnf.nonterminals().iter() {
        assert!(reachable.is_reachable(nt), "{:?} in {}", nt, cnf);
        if nt != cnf.start_nt() {
          assert!(productive.is_productive(nt), "{:?} in {}", nt, cnf);
        }
      }
    }
  }

  #[test]
  fn test_language_is_preserved() {
    for g in all_examples() {
      let cnf = to_cnf(&g).unwrap();
      assert_eq!(sentences(&cnf, 5), sentences(&g, 5), "{}", g);
    }
  }

  #[test]
  fn test_idempotent() {
    for g in all_examples() {
      let once = to_cnf(&g).unwrap();
      let twice = to_cnf(&once).unwrap();
      assert!(twice.is_cnf());
      assert_eq!(sentences(&twice, 5), sentences(&once, 5));

      // A nullable start symbol that also appears in bodies yields new
      // variants of those bodies on the second run.
      if !once.has_empty_start() {
        assert_eq!(twice, once);
      }
    }
  }

  #[test]
  fn test_nullable_start() {
    let cnf = to_cnf(&examples::make_nullable_start()).unwrap();
    assert!(cnf.has_empty_start());
    assert!(cnf
      .prods()
      .all(|prod| !prod.body().is_empty() || prod.head() == cnf.start_nt()));
  }

  #[test]
  fn test_empty_language() {
    let g = examples::make_empty_language();
    let cnf = to_cnf(&g).unwrap();
    assert_eq!(cnf.num_prods(), 0);
    assert!(cnf.is_nonterminal(g.start_nt()));
    assert_eq!(cnf.terminals(), g.terminals());
  }

  #[test]
  fn test_fresh_names_are_disjoint() {
    for g in all_examples() {
      let stages = run_stages(&g, &NormalizeConfig::default()).unwrap();
      for nt in stages.cnf.nonterminals().iter() {
        if !stages.productive.is_nonterminal(nt) {
          assert!(!g.is_nonterminal(nt));
          assert!(g.terminals().iter().all(|t| t.name() != nt.name()));
        }
      }
    }
  }

  #[test]
  fn test_name_collision() {
    let g = examples::make_reserved_names();
    match to_cnf(&g) {
      Err(NormalizeError::NameCollision(err)) => {
        assert_eq!(err, NameCollision(nt("T0")));
      }
      other => panic!("expected a name collision, got {:?}", other),
    }

    let config = NormalizeConfig {
      terminal_proxy_prefix: Name::new("Lit"),
      ..NormalizeConfig::default()
    };
    let cnf = to_cnf_with_config(&g, &config).unwrap();
    assert!(cnf.is_cnf());
    assert!(cnf.is_nonterminal(&nt("Lit0")));
  }

  #[test]
  fn test_malformed_grammar() {
    fn normalize_parts(
      start: &str,
      prods: Vec<(NonTerminal, Body)>,
    ) -> Result<Grammar, NormalizeError> {
      let g = Grammar::new(nt(start), vec![nt("S")], vec![], prods)?;
      to_cnf(&g)
    }

    let result = normalize_parts(
      "S",
      vec![(nt("S"), body(vec![Elem::NonTerm(nt("X"))]))],
    );
    match result {
      Err(NormalizeError::Malformed(errors)) => {
        assert!(errors.undeclared_nonterms().contains(&nt("X")));
      }
      other => panic!("expected a malformed grammar, got {:?}", other),
    }
  }
}
