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

//! Small grammars used by tests and demos.
//!
//! Rules are written in a compact notation local to this module: each
//! alternative is a string of single-character symbols, where upper-case
//! letters are nonterminals and everything else is a terminal. The alternative
//! `"ε"` is the empty production.

use crate::grammar::{build, Grammar, GrammarBuilder};

fn add_compact_rule(
  gb: &mut GrammarBuilder,
  head: &str,
  alternatives: &[&str],
) {
  gb.add_rule(head, |rb| {
    for alt in alternatives {
      if *alt == "ε" {
        rb.add_empty_prod();
        continue;
      }

      rb.add_prod(|pb| {
        for c in alt.chars() {
          let name = c.to_string();
          if c.is_uppercase() {
            pb.add_nonterm(name.as_str());
          } else {
            pb.add_term(name.as_str());
          }
        }
      });
    }
  });
}

fn compact_grammar(terms: &[&str], rules: &[(&str, &[&str])]) -> Grammar {
  let start = rules.first().map(|(head, _)| *head).unwrap_or("S");
  build(start, |gb| {
    for t in terms {
      gb.declare_term(*t);
    }
    for (head, alternatives) in rules {
      add_compact_rule(gb, head, alternatives);
    }
  })
  .expect("example grammars are well formed")
}

/// `S->AC|bA|B|aA, A->ε|aS|ABab, B->a|bS, C->abC, D->AB`.
///
/// `A` is nullable, `S -> B` is a unit rule, `D` is unreachable and `C` is
/// unproductive.
pub fn make_lab_grammar() -> Grammar {
  compact_grammar(
    &["a", "b"],
    &[
      ("S", &["AC", "bA", "B", "aA"]),
      ("A", &["ε", "aS", "ABab"]),
      ("B", &["a", "bS"]),
      ("C", &["abC"]),
      ("D", &["AB"]),
    ],
  )
}

/// `S->AB|aB, A->a|ε, B->b|ε`: the start symbol is nullable through `A B`.
pub fn make_nullable_start() -> Grammar {
  compact_grammar(
    &["a", "b"],
    &[("S", &["AB", "aB"]), ("A", &["a", "ε"]), ("B", &["b", "ε"])],
  )
}

/// `S->ε|aSb`: the start symbol is only nullable through its explicit empty
/// production.
pub fn make_balanced() -> Grammar {
  compact_grammar(&["a", "b"], &[("S", &["ε", "aSb"])])
}

/// `S->A|a, A->A|B|b, B->S|A|c`: unit rules forming cycles, including a
/// self loop on `A`.
pub fn make_unit_cycle() -> Grammar {
  compact_grammar(
    &["a", "b", "c"],
    &[("S", &["A", "a"]), ("A", &["A", "B", "b"]), ("B", &["S", "A", "c"])],
  )
}

/// `S->ε|aA, A->S|b`: a unit production targets the nullable start symbol.
pub fn make_unit_to_nullable_start() -> Grammar {
  compact_grammar(&["a", "b"], &[("S", &["ε", "aA"]), ("A", &["S", "b"])])
}

/// `S->aABC|ABC|ab|ABD, A->a, B->b, C->c, D->d`: bodies longer than two
/// symbols that share leading pairs.
pub fn make_long_bodies() -> Grammar {
  compact_grammar(
    &["a", "b", "c", "d"],
    &[
      ("S", &["aABC", "ABC", "ab", "ABD"]),
      ("A", &["a"]),
      ("B", &["b"]),
      ("C", &["c"]),
      ("D", &["d"]),
    ],
  )
}

/// `S->AB|a, A->a, B->Bb`: `B` is unproductive, and `A` is only reachable
/// through the production that mentions `B`.
pub fn make_unproductive_branch() -> Grammar {
  compact_grammar(
    &["a", "b"],
    &[("S", &["AB", "a"]), ("A", &["a"]), ("B", &["Bb"])],
  )
}

/// `S->AS, A->a`: the language is empty.
pub fn make_empty_language() -> Grammar {
  compact_grammar(&["a"], &[("S", &["AS"]), ("A", &["a"])])
}

/// `S->x Y|T0 Y, T0->x, Y->y`. The nonterminal `T0` has the name the first
/// terminal proxy would get under the default configuration.
pub fn make_reserved_names() -> Grammar {
  build("S", |gb| {
    gb.declare_term("x")
      .declare_term("y")
      .add_rule("S", |rb| {
        rb.add_prod(|pb| {
          pb.add_term("x").add_nonterm("Y");
        })
        .add_prod(|pb| {
          pb.add_nonterm("T0").add_nonterm("Y");
        });
      })
      .add_rule("T0", |rb| {
        rb.add_prod(|pb| {
          pb.add_term("x");
        });
      })
      .add_rule("Y", |rb| {
        rb.add_prod(|pb| {
          pb.add_term("y");
        });
      });
  })
  .expect("example grammars are well formed")
}
