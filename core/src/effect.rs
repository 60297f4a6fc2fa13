//! Side effect descriptions returned by reducers.

use std::future::Future;
use std::pin::Pin;

/// A side effect to be executed by the store runtime.
///
/// Effects are NOT executed where they are created. They are descriptions
/// of what should happen, returned from reducers and executed by the
/// `Store` in the runtime crate.
///
/// # Type Parameters
///
/// - `Action`: the action type effects can produce (feedback loop)
pub enum Effect<Action> {
    /// No-op effect.
    None,

    /// Arbitrary async computation.
    ///
    /// Returns `Option<Action>`; if `Some`, the action is fed back into
    /// the reducer.
    Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
}

impl<Action> Effect<Action> {
    /// Wrap an async computation as an effect.
    pub fn future<F>(fut: F) -> Self
    where
        F: Future<Output = Option<Action>> + Send + 'static,
    {
        Self::Future(Box::pin(fut))
    }
}

// Manual Debug implementation since Future doesn't implement Debug
impl<Action> std::fmt::Debug for Effect<Action> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "Effect::None"),
            Self::Future(_) => write!(f, "Effect::Future(<future>)"),
        }
    }
}
