//! The `Reducer` trait: pure fold of actions into state.

/// The Reducer trait - core abstraction for state transitions.
///
/// A reducer is a pure, synchronous fold: given the current state and
/// an action, it updates the state in place. It performs no I/O and
/// holds no hidden state, so the same action sequence always produces
/// the same final state.
///
/// # Example
///
/// ```
/// use careflow_core::reducer::Reducer;
///
/// #[derive(Default)]
/// struct Counter { value: i64 }
///
/// enum CounterAction { Increment, Decrement }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = Counter;
///     type Action = CounterAction;
///
///     fn reduce(&self, state: &mut Counter, action: &CounterAction) {
///         match action {
///             CounterAction::Increment => state.value += 1,
///             CounterAction::Decrement => state.value -= 1,
///         }
///     }
/// }
/// ```
pub trait Reducer {
    /// The state type this reducer operates on.
    type State;

    /// The action type this reducer processes.
    type Action;

    /// Fold one action into the state.
    ///
    /// Must be deterministic: no I/O, no clocks, no randomness.
    fn reduce(&self, state: &mut Self::State, action: &Self::Action);
}
