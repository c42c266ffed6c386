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

//! Normalization of context-free grammars into Chomsky Normal Form.
//!
//! A [`grammar::Grammar`] is an immutable value. Every transformation in
//! [`grammar::transform`] takes a grammar by reference and returns a new one,
//! and the analyses those transformations depend on live in
//! [`grammar::passes`]. The [`normalize`] module chains the transformations
//! into the full pipeline:
//!
//! 1. epsilon elimination,
//! 2. unit rule elimination,
//! 3. pruning of unreachable nonterminals,
//! 4. pruning of unproductive nonterminals,
//! 5. terminal isolation and binarization.
//!
//! ```rust
//! # use chomsky::grammar::{build, NonTerminal, Terminal};
//! let s = NonTerminal::new("S");
//! let a = Terminal::new("a");
//! let g = build(&s, |gb| {
//!   gb.declare_term(&a).add_rule(&s, |rb| {
//!     rb.add_prod(|pb| {
//!       pb.add_term(&a).add_nonterm(&s).add_term(&a);
//!     })
//!     .add_prod(|pb| {
//!       pb.add_term(&a);
//!     });
//!   });
//! })
//! .unwrap();
//!
//! let cnf = chomsky::normalize::to_cnf(&g).unwrap();
//! assert!(cnf.is_cnf());
//! ```

#[macro_use]
extern crate derivative;

pub mod grammar;
pub mod normalize;
pub mod utils;

pub use normalize::{to_cnf, NormalizeConfig, NormalizeError};
