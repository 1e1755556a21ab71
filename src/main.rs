//! Main module for the Number Sprint application using Yew.
//! Wires the game reducer, timer hooks and view components.

use log::info;
use number_sprint::defaults::DEFAULT_POINT_COUNT;
use number_sprint::state::{GameAction, GameState};
use number_sprint::RoundConfig;
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod utils;

use components::{GameBoard, GameInfo, StatusBanner};
use hooks::{use_count_input, use_removal_scheduler, use_round_clock};

/// Primary application component: one board, one clock, one round at a time.
#[function_component(App)]
fn app() -> Html {
    let game = use_reducer(GameState::default);
    let count = use_count_input(DEFAULT_POINT_COUNT);
    let round = game.round();

    use_round_clock(round.id(), round.is_active(), game.dispatcher());
    use_removal_scheduler(round.pending_removal(), game.dispatcher());

    let on_start = {
        let dispatcher = game.dispatcher();
        let count = count.clone();
        Callback::from(move |_: ()| {
            let requested = count.resolve();
            count.on_commit.emit(());
            info!("Starting round with {} points", requested);
            dispatcher.dispatch(GameAction::Start(RoundConfig::new(requested as i64)));
        })
    };

    let on_number_click = {
        let dispatcher = game.dispatcher();
        Callback::from(move |value: u32| dispatcher.dispatch(GameAction::Click(value)))
    };

    html! {
        <div class="game-container">
            <StatusBanner status={round.status()} />
            <GameInfo
                count_text={count.text.clone()}
                count_error={count.error.clone()}
                elapsed_tenths={round.elapsed_tenths()}
                has_started={game.has_started()}
                on_count_input={count.on_text_input.clone()}
                on_count_commit={count.on_commit.clone()}
                {on_start}
            />
            <GameBoard
                tiles={round.tiles().collect::<Vec<_>>()}
                clicked={round.pending()}
                visible={!round.status().is_terminal()}
                on_click={on_number_click}
            />
        </div>
    }
}

/// Entry point: installs the panic hook and logger, then renders `App`.
fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    yew::Renderer::<App>::new().render();
}
