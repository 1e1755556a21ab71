//! Pure Yew view components for the Number Sprint UI.
//!
//! Stateless components that render based on props; all state lives in the
//! reducer and hooks owned by `App`.

use crate::config::{PLAY_LABEL, POINTS_LABEL, RESTART_LABEL};
use number_sprint::{defaults, format_elapsed, Position, RoundStatus};
use yew::prelude::*;

/// CSS modifier for the banner, matching the round outcome.
fn banner_class(status: RoundStatus) -> Classes {
    match status {
        RoundStatus::Cleared => classes!("status-message", "all-cleared"),
        RoundStatus::Failed => classes!("status-message", "game-over"),
        RoundStatus::NotStarted | RoundStatus::Active => classes!("status-message"),
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusBannerProps {
    pub status: RoundStatus,
}

#[function_component(StatusBanner)]
pub fn status_banner(props: &StatusBannerProps) -> Html {
    html! {
        <h1 class={banner_class(props.status)}>{ props.status.title() }</h1>
    }
}

/// Points field, clock readout and the start/restart button.
#[derive(Properties, PartialEq)]
pub struct GameInfoProps {
    pub count_text: String,
    pub count_error: Option<String>,
    pub elapsed_tenths: u32,
    pub has_started: bool,
    pub on_count_input: Callback<InputEvent>,
    pub on_count_commit: Callback<()>,
    pub on_start: Callback<()>,
}

#[function_component(GameInfo)]
pub fn game_info(props: &GameInfoProps) -> Html {
    let onchange = {
        let commit = props.on_count_commit.clone();
        Callback::from(move |_: Event| commit.emit(()))
    };
    let onclick = {
        let start = props.on_start.clone();
        Callback::from(move |_: MouseEvent| start.emit(()))
    };
    let label = if props.has_started {
        RESTART_LABEL
    } else {
        PLAY_LABEL
    };

    html! {
        <div class="game-info">
            <label for="points">{ POINTS_LABEL }</label>
            <input id="points"
                type="number"
                min={defaults::MIN_POINT_COUNT.to_string()}
                max={defaults::MAX_POINT_COUNT.to_string()}
                value={props.count_text.clone()}
                oninput={props.on_count_input.clone()}
                {onchange}
            />
            if let Some(err) = &props.count_error {
                <span class="input-error">{ err }</span>
            }
            <p>{ format!("Time: {}s", format_elapsed(props.elapsed_tenths)) }</p>
            <button {onclick}>{ label }</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NumberTileProps {
    pub value: u32,
    pub position: Position,
    pub clicked: bool,
    pub on_click: Callback<u32>,
}

#[function_component(NumberTile)]
pub fn number_tile(props: &NumberTileProps) -> Html {
    let onclick = {
        let on_click = props.on_click.clone();
        let value = props.value;
        Callback::from(move |_: MouseEvent| on_click.emit(value))
    };

    html! {
        <div class={classes!("number", props.clicked.then_some("clicked"))}
            style={props.position.to_css()}
            {onclick}
        >
            { props.value }
        </div>
    }
}

/// The play area. Hidden entirely once the round has ended.
#[derive(Properties, PartialEq)]
pub struct GameBoardProps {
    pub tiles: Vec<(u32, Position)>,
    pub clicked: Option<u32>,
    pub visible: bool,
    pub on_click: Callback<u32>,
}

#[function_component(GameBoard)]
pub fn game_board(props: &GameBoardProps) -> Html {
    html! {
        <div class="game-board">
            if props.visible {
                { props.tiles.iter().map(|&(value, position)| html! {
                    <NumberTile key={value}
                        {value}
                        {position}
                        clicked={props.clicked == Some(value)}
                        on_click={props.on_click.clone()}
                    />
                }).collect::<Html>() }
            }
        </div>
    }
}
