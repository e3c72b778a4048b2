//! Interactive widget trait extending ratatui's `StatefulWidget`.

use ratatui::widgets::StatefulWidget;

/// Extension trait for `StatefulWidget` that adds state updates and event
/// handling.
///
/// # Example
///
/// ```ignore
/// impl InteractiveStatefulWidget for PillBar<'_> {
///     type Input = Vec<SelectorOption>;
///     type Event = KeyMouseEvent;
///
///     fn update_state(state: &mut Self::State, input: Self::Input) {
///         state.bar.set_options(input);
///     }
/// }
/// ```
pub trait InteractiveStatefulWidget: StatefulWidget {
    /// Input data type for updating state.
    type Input;
    /// Event type for handling (use `()` for non-interactive widgets).
    type Event;

    /// Update the widget's state with new input data.
    fn update_state(state: &mut Self::State, input: Self::Input);

    /// Handle an event. Returns true if the event was consumed.
    fn handle_event(_state: &mut Self::State, _event: Self::Event) -> bool {
        false
    }
}
