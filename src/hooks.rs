use crate::config::{REMOVAL_DELAY_MS, TICK_INTERVAL_MS};
use crate::utils::parse_point_count;
use gloo_timers::callback::{Interval, Timeout};
use log::debug;
use number_sprint::state::{GameAction, GameState};
use number_sprint::{RemovalTicket, RoundId};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Drive the clock of the current round.
///
/// The interval handle lives inside the effect keyed on `(round, active)`, so it
/// is created when a round becomes active and dropped (cleared) as soon as the
/// round ends, a new round replaces it, or the component unmounts.
///
/// Each tick carries its round id and `GameState` drops ticks for any other
/// round or a finished one; that guard is what the native tests cover, since
/// the interval itself only exists in the browser.
#[hook]
pub fn use_round_clock(round: RoundId, active: bool, dispatcher: UseReducerDispatcher<GameState>) {
    use_effect_with((round, active), move |&(round, active)| {
        let clock = active.then(|| {
            debug!("Clock started for round {}", round);
            Interval::new(TICK_INTERVAL_MS, move || {
                dispatcher.dispatch(GameAction::Tick(round));
            })
        });

        move || {
            if let Some(clock) = clock {
                drop(clock);
                debug!("Clock stopped for round {}", round);
            }
        }
    });
}

/// Redeem the pending removal ticket after the highlight delay.
///
/// One timeout per ticket; a changed ticket (removal done, round failed or
/// restarted) or unmount cancels the outstanding timeout.
///
/// A timeout that still fires late is harmless: `Round::complete_removal`
/// rejects tickets from other rounds, and the native tests cover that path.
#[hook]
pub fn use_removal_scheduler(
    pending: Option<RemovalTicket>,
    dispatcher: UseReducerDispatcher<GameState>,
) {
    use_effect_with(pending, move |&pending| {
        let timeout = pending.map(|ticket| {
            Timeout::new(REMOVAL_DELAY_MS, move || {
                dispatcher.dispatch(GameAction::Remove(ticket));
            })
        });

        move || drop(timeout)
    });
}

/// Holds the state and callbacks for the points field.
#[derive(Clone)]
pub struct CountInput {
    /// The current text content of the input field.
    pub text: String,
    /// The last committed, clamped count.
    pub value: u32,
    /// An optional error message if the last commit failed to parse.
    pub error: Option<String>,
    /// Callback for the input's `oninput` event. Updates the text state only.
    pub on_text_input: Callback<InputEvent>,
    /// Parse and clamp the current text, replacing it with the canonical value.
    pub on_commit: Callback<()>,
}

impl CountInput {
    /// The count a round started right now should use.
    ///
    /// Uncommitted text wins when it parses; otherwise the last committed value.
    pub fn resolve(&self) -> u32 {
        parse_point_count(&self.text).unwrap_or(self.value)
    }
}

/// Custom hook to manage the points field.
#[hook]
pub fn use_count_input(initial_value: u32) -> CountInput {
    let value_handle = use_state(|| initial_value);
    let text_handle = use_state(|| initial_value.to_string());
    let error_handle = use_state(|| None::<String>);

    let on_text_input = {
        let text_setter = text_handle.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text_setter.set(input.value());
        })
    };

    let on_commit = {
        let text_handle = text_handle.clone();
        let value_setter = value_handle.clone();
        let error_setter = error_handle.clone();

        Callback::from(move |_: ()| match parse_point_count(&text_handle) {
            Ok(count) => {
                value_setter.set(count);
                text_handle.set(count.to_string()); // canonical, clamped form
                error_setter.set(None);
            }
            Err(err) => {
                error_setter.set(Some(err.to_string()));
            }
        })
    };

    CountInput {
        text: (*text_handle).clone(),
        value: *value_handle,
        error: (*error_handle).clone(),
        on_text_input,
        on_commit,
    }
}
