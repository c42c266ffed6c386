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

//! Grammar-to-grammar rewrites. Each transform takes a grammar by reference
//! and builds a new one.

pub mod binarize;
pub mod fresh;
pub mod nonnull;
pub mod prune;
pub mod unit;

pub use binarize::binarize;
pub use fresh::{NameAllocator, NameCollision};
pub use nonnull::transform_to_nonnull;
pub use prune::{prune_unproductive, prune_unreachable};
pub use unit::eliminate_unit_rules;
