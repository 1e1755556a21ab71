//! Reducer state shared by the whole game view.
//!
//! All transitions go through [`GameAction`] so that timers and clicks only
//! ever describe *what happened*; the reducer decides whether it still applies
//! to the current round.

use crate::{ClickOutcome, RemovalOutcome, RemovalTicket, Round, RoundConfig, RoundId};
use log::{debug, info, warn};
use std::rc::Rc;
use yew::Reducible;

#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    /// Start (or restart) a round with the given config.
    Start(RoundConfig),
    /// One clock interval elapsed for the given round.
    Tick(RoundId),
    /// The player clicked a number.
    Click(u32),
    /// The highlight delay for an accepted number has passed.
    Remove(RemovalTicket),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    round: Round,
    last_round_id: RoundId,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            round: Round::not_started(),
            last_round_id: 0,
        }
    }
}

impl GameState {
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Whether any round has been started yet (drives the Play/Restart label).
    pub fn has_started(&self) -> bool {
        self.last_round_id > 0
    }

    fn log_summary(&self) {
        match serde_json::to_string(&self.round.summary()) {
            Ok(json) => info!("Round finished: {}", json),
            Err(e) => warn!("Could not serialise round summary: {}", e),
        }
    }
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            GameAction::Start(config) => {
                let id = self.last_round_id.wrapping_add(1);
                let round = Round::start(id, config, &mut rand::rng());
                Rc::new(GameState {
                    round,
                    last_round_id: id,
                })
            }
            GameAction::Tick(id) => {
                if id != self.round.id() || !self.round.is_active() {
                    debug!("Dropping tick for round {}", id);
                    return self;
                }
                let mut new = (*self).clone();
                new.round.tick();
                Rc::new(new)
            }
            GameAction::Click(value) => {
                let mut new = (*self).clone();
                match new.round.click(value) {
                    ClickOutcome::Ignored => self,
                    ClickOutcome::Accepted(_) => Rc::new(new),
                    ClickOutcome::Rejected { .. } => {
                        new.log_summary();
                        Rc::new(new)
                    }
                }
            }
            GameAction::Remove(ticket) => {
                let mut new = (*self).clone();
                match new.round.complete_removal(ticket) {
                    RemovalOutcome::Stale => {
                        warn!(
                            "Discarding stale removal of {} from round {}",
                            ticket.value, ticket.round
                        );
                        self
                    }
                    RemovalOutcome::Removed { remaining } => {
                        debug!("Round {}: {} numbers left", ticket.round, remaining);
                        Rc::new(new)
                    }
                    RemovalOutcome::Cleared => {
                        new.log_summary();
                        Rc::new(new)
                    }
                }
            }
        }
    }
}
