//! A pass is a type of query over the grammar that may be depended on by other passes.
//! This allows us to build each different type of pass in isolation, and then combine them
//! with automatic dependency resolution.

pub mod nullable;
pub mod productive;
pub mod reachable;
pub mod unit_closure;

use std::{
  any::{Any, TypeId},
  cell::RefCell,
  collections::BTreeMap,
  rc::Rc,
};

use super::Grammar;

/// A unique placeholder type to represent the value of a pass that hasn't completed.
///
/// This helps us avoid accidental infinite recursion in the case where a pass depends on itself (directly or indirectly).
struct NoCurrentValue;

/// A query over a single grammar. The result of a pass is computed at most
/// once per `PassContext`.
pub trait Pass: Any + Sized + 'static {
  fn run_pass(pass_map: &PassContext) -> Self;
}

/// A map from passes to their associated results.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct PassContext<'a> {
  grammar: &'a Grammar,
  #[derivative(Debug = "ignore")]
  passes: RefCell<BTreeMap<TypeId, Rc<dyn Any + 'static>>>,
}

impl<'a> PassContext<'a> {
  // Create a new pass map, where passes derive from the given grammar and other passes.
  pub fn new(grammar: &'a Grammar) -> Self {
    PassContext {
      grammar,
      passes: RefCell::new(BTreeMap::new()),
    }
  }

  /// Returns the underlying grammar.
  pub fn grammar(&self) -> &'a Grammar {
    self.grammar
  }

  /// Returns the result of the given pass. Computes it if it hasn't been computed yet. Passes can
  /// depend on other passes.
  ///
  /// Panics if passes depend on each other in a cycle. The set of passes is
  /// fixed at compile time, so a cycle is a programming error rather than a
  /// property of the grammar.
  pub fn get_pass<P>(&self) -> Rc<P>
  where
    P: Pass,
  {
    let pass_type = TypeId::of::<P>();

    let cached = {
      let guard = self.passes.borrow();
      guard.get(&pass_type).cloned()
    };

    let any_pass_ref = match cached {
      Some(pass) => {
        if pass.downcast_ref::<NoCurrentValue>().is_some() {
          panic!("Detected recursive loop in pass dependencies.")
        }
        pass
      }
      None => {
        {
          // Insert a NoCurrentValue as the current value to mark it as in process. This
          // helps us avoid infinite recursion.
          let mut guard = self.passes.borrow_mut();
          guard.insert(pass_type, Rc::new(NoCurrentValue));
        }
        let value: Rc<dyn Any> = Rc::new(P::run_pass(self));
        let mut guard = self.passes.borrow_mut();
        guard.insert(pass_type, value.clone());
        value
      }
    };

    match any_pass_ref.downcast::<P>() {
      Ok(pass) => pass,
      Err(_) => unreachable!("passes are keyed by their own TypeId"),
    }
  }
}
