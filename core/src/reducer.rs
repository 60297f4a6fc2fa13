//! The reducer trait: business logic as a pure state transition.

use crate::effect::Effect;
use smallvec::SmallVec;

/// Effects returned from a single reduce call.
///
/// Most actions produce zero or one effect; the inline capacity avoids
/// allocating for those cases.
pub type Effects<A> = SmallVec<[Effect<A>; 4]>;

/// The core abstraction for interactive state: `(State, Action,
/// Environment) → (State, Effects)`.
///
/// A reducer validates the action, updates state in place, and returns
/// descriptions of any side effects. It performs no I/O itself: all
/// external dependencies come in through the `Environment` and all
/// asynchrony goes out as [`Effect`]s for the runtime to execute.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer processes.
    type Action;

    /// The environment type with injected dependencies.
    type Environment;

    /// Reduce an action into state changes and effects.
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action>;
}
