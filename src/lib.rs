use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default game rules
pub mod defaults {
    pub const DEFAULT_POINT_COUNT: u32 = 3;
    pub const MIN_POINT_COUNT: u32 = 1;
    pub const MAX_POINT_COUNT: u32 = 1000;
    /// Elapsed time is kept in tenths of a second; each clock tick adds this much.
    pub const TICK_QUANTUM_TENTHS: u32 = 1;
    /// Upper bound (exclusive) for both placement axes, keeping tiles off the board edge.
    pub const POSITION_MAX_PERCENT: f64 = 90.0;
}

/// Identity of a single play-through. Every started round gets a fresh one.
pub type RoundId = u64;

/// How many numbers the next round will contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    count: u32,
}

impl RoundConfig {
    /// Build a config from any requested count, clamped to the playable range.
    pub fn new(requested: i64) -> Self {
        let count = requested.clamp(
            defaults::MIN_POINT_COUNT as i64,
            defaults::MAX_POINT_COUNT as i64,
        ) as u32;
        Self { count }
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            count: defaults::DEFAULT_POINT_COUNT,
        }
    }
}

/// Placement of one number on the board, in percent of the board size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

impl Position {
    /// Inline CSS used to place a tile absolutely inside the board.
    pub fn to_css(&self) -> String {
        format!("top: {:.2}%; left: {:.2}%;", self.top, self.left)
    }
}

/// Generate `count` independent positions inside `[0, POSITION_MAX_PERCENT)` on both axes.
///
/// Positions may overlap; no collision avoidance is attempted.
pub fn generate_positions<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Position> {
    (0..count)
        .map(|_| Position {
            top: rng.random_range(0.0..defaults::POSITION_MAX_PERCENT),
            left: rng.random_range(0.0..defaults::POSITION_MAX_PERCENT),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    NotStarted,
    Active,
    Cleared,
    Failed,
}

impl RoundStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundStatus::Cleared | RoundStatus::Failed)
    }

    /// Banner text shown above the board.
    pub fn title(&self) -> &'static str {
        match self {
            RoundStatus::NotStarted | RoundStatus::Active => "LET'S PLAY",
            RoundStatus::Cleared => "ALL CLEARED",
            RoundStatus::Failed => "GAME OVER",
        }
    }
}

/// Permission to remove an accepted number once its highlight delay has passed.
///
/// Bound to the round that issued it; presenting it to any other round is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemovalTicket {
    pub round: RoundId,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The head was clicked; it stays on the board until the ticket is redeemed.
    Accepted(RemovalTicket),
    /// Wrong number. The round is now failed.
    Rejected { expected: Option<u32>, clicked: u32 },
    /// The round is not accepting clicks, or the number is already pending removal.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed { remaining: usize },
    Cleared,
    /// The ticket belongs to another round or no longer matches the pending number.
    Stale,
}

/// Machine-readable record of a finished round, written to the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: RoundId,
    pub count: u32,
    pub status: RoundStatus,
    pub cleared: u32,
    pub elapsed: String,
}

/// One play-through: the remaining sequence, its positions and the clock reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    id: RoundId,
    config: RoundConfig,
    status: RoundStatus,
    sequence: VecDeque<u32>,
    positions: VecDeque<Position>,
    elapsed_tenths: u32,
    pending: Option<u32>,
}

impl Round {
    /// The empty placeholder shown before the first round.
    pub fn not_started() -> Self {
        Self {
            id: 0,
            config: RoundConfig::default(),
            status: RoundStatus::NotStarted,
            sequence: VecDeque::new(),
            positions: VecDeque::new(),
            elapsed_tenths: 0,
            pending: None,
        }
    }

    /// Build a fresh active round: sequence `1..=N`, `N` new positions, clock at zero.
    pub fn start<R: Rng + ?Sized>(id: RoundId, config: RoundConfig, rng: &mut R) -> Self {
        let count = config.count();
        let sequence: VecDeque<u32> = (1..=count).collect();
        let positions: VecDeque<Position> = generate_positions(count as usize, rng).into();
        info!("Round {} started with {} numbers", id, count);

        Self {
            id,
            config,
            status: RoundStatus::Active,
            sequence,
            positions,
            elapsed_tenths: 0,
            pending: None,
        }
    }

    pub fn id(&self) -> RoundId {
        self.id
    }

    pub fn config(&self) -> RoundConfig {
        self.config
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == RoundStatus::Active
    }

    pub fn elapsed_tenths(&self) -> u32 {
        self.elapsed_tenths
    }

    /// The next number the player must click.
    pub fn head(&self) -> Option<u32> {
        self.sequence.front().copied()
    }

    pub fn remaining(&self) -> usize {
        self.sequence.len()
    }

    /// The accepted number currently highlighted and awaiting removal.
    pub fn pending(&self) -> Option<u32> {
        self.pending
    }

    /// The ticket for the pending removal, if any.
    pub fn pending_removal(&self) -> Option<RemovalTicket> {
        self.pending.map(|value| RemovalTicket {
            round: self.id,
            value,
        })
    }

    /// Remaining numbers paired with their board positions, head first.
    pub fn tiles(&self) -> impl Iterator<Item = (u32, Position)> + '_ {
        self.sequence
            .iter()
            .copied()
            .zip(self.positions.iter().copied())
    }

    /// Advance the clock by one quantum. Returns false when the round is not running.
    pub fn tick(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.elapsed_tenths = self
            .elapsed_tenths
            .saturating_add(defaults::TICK_QUANTUM_TENTHS);
        true
    }

    /// Judge a click on `value`.
    pub fn click(&mut self, value: u32) -> ClickOutcome {
        if !self.is_active() || self.pending == Some(value) {
            return ClickOutcome::Ignored;
        }

        let expected = self.head();
        if self.pending.is_none() && expected == Some(value) {
            self.pending = Some(value);
            debug!("Round {}: accepted {}", self.id, value);
            return ClickOutcome::Accepted(RemovalTicket {
                round: self.id,
                value,
            });
        }

        self.status = RoundStatus::Failed;
        self.pending = None;
        info!(
            "Round {} failed: clicked {} while expecting {:?}",
            self.id, value, expected
        );
        ClickOutcome::Rejected {
            expected,
            clicked: value,
        }
    }

    /// Redeem a removal ticket, dropping the head and its position.
    pub fn complete_removal(&mut self, ticket: RemovalTicket) -> RemovalOutcome {
        if ticket.round != self.id || !self.is_active() || self.pending != Some(ticket.value) {
            return RemovalOutcome::Stale;
        }

        self.sequence.pop_front();
        self.positions.pop_front();
        self.pending = None;

        if self.sequence.is_empty() {
            self.status = RoundStatus::Cleared;
            info!(
                "Round {} cleared in {}s",
                self.id,
                format_elapsed(self.elapsed_tenths)
            );
            RemovalOutcome::Cleared
        } else {
            RemovalOutcome::Removed {
                remaining: self.sequence.len(),
            }
        }
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            round: self.id,
            count: self.config().count(),
            status: self.status,
            cleared: self.config().count() - self.sequence.len() as u32,
            elapsed: format_elapsed(self.elapsed_tenths),
        }
    }
}

/// Format tenths of a second with one decimal, e.g. `34` -> `"3.4"`.
pub fn format_elapsed(tenths: u32) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}

pub mod state;

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn active(count: i64) -> Round {
        Round::start(1, RoundConfig::new(count), &mut rng())
    }

    fn clear_head(round: &mut Round) -> RemovalOutcome {
        let head = round.head().unwrap();
        match round.click(head) {
            ClickOutcome::Accepted(ticket) => round.complete_removal(ticket),
            other => panic!("head click not accepted: {:?}", other),
        }
    }

    #[test]
    fn config_clamps_requested_count() {
        assert_eq!(RoundConfig::new(0).count(), 1);
        assert_eq!(RoundConfig::new(-20).count(), 1);
        assert_eq!(RoundConfig::new(1).count(), 1);
        assert_eq!(RoundConfig::new(250).count(), 250);
        assert_eq!(RoundConfig::new(1000).count(), 1000);
        assert_eq!(RoundConfig::new(5000).count(), 1000);
        assert_eq!(RoundConfig::default().count(), 3);
    }

    #[test]
    fn start_builds_full_sequence_and_positions() {
        let mut rng = rng();
        for n in [1, 2, 3, 17, 500, 1000] {
            let round = Round::start(9, RoundConfig::new(n), &mut rng);
            let tiles: Vec<_> = round.tiles().collect();
            assert_eq!(tiles.len(), n as usize);
            assert_eq!(round.positions.len(), n as usize);
            let values: Vec<u32> = tiles.iter().map(|(v, _)| *v).collect();
            assert_eq!(values, (1..=n as u32).collect::<Vec<_>>());
            assert_eq!(round.config().count(), n as u32);
            assert_eq!(round.status(), RoundStatus::Active);
            assert_eq!(round.elapsed_tenths(), 0);
            assert_eq!(round.pending(), None);
        }
    }

    #[test]
    fn positions_stay_inside_bounds() {
        let positions = generate_positions(1000, &mut rng());
        assert_eq!(positions.len(), 1000);
        for p in positions {
            assert!((0.0..defaults::POSITION_MAX_PERCENT).contains(&p.top));
            assert!((0.0..defaults::POSITION_MAX_PERCENT).contains(&p.left));
        }
    }

    #[test]
    fn clicking_in_order_clears_round() {
        let mut round = active(3);
        assert_eq!(clear_head(&mut round), RemovalOutcome::Removed { remaining: 2 });
        assert_eq!(clear_head(&mut round), RemovalOutcome::Removed { remaining: 1 });
        assert_eq!(clear_head(&mut round), RemovalOutcome::Cleared);
        assert_eq!(round.status(), RoundStatus::Cleared);
        assert_eq!(round.remaining(), 0);
        assert_eq!(round.tiles().count(), 0);
    }

    #[test]
    fn accepted_number_stays_until_removed() {
        let mut round = active(3);
        let ticket = match round.click(1) {
            ClickOutcome::Accepted(t) => t,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(ticket, RemovalTicket { round: 1, value: 1 });
        assert_eq!(round.remaining(), 3);
        assert_eq!(round.pending(), Some(1));
        assert_eq!(round.pending_removal(), Some(ticket));

        round.complete_removal(ticket);
        assert_eq!(round.head(), Some(2));
        assert_eq!(round.pending(), None);
    }

    #[test]
    fn removal_drops_matching_position() {
        let mut round = active(4);
        let second = round.tiles().nth(1).unwrap();
        clear_head(&mut round);
        assert_eq!(round.tiles().next(), Some(second));
    }

    #[test]
    fn wrong_click_fails_immediately() {
        let mut round = active(3);
        round.tick();
        let outcome = round.click(2);
        assert_eq!(
            outcome,
            ClickOutcome::Rejected {
                expected: Some(1),
                clicked: 2
            }
        );
        assert_eq!(round.status(), RoundStatus::Failed);
        assert_eq!(round.remaining(), 3);
    }

    #[test]
    fn clicking_next_number_before_removal_fails() {
        let mut round = active(3);
        assert!(matches!(round.click(1), ClickOutcome::Accepted(_)));
        assert!(matches!(round.click(2), ClickOutcome::Rejected { .. }));
        assert_eq!(round.status(), RoundStatus::Failed);
        assert_eq!(round.pending(), None);
    }

    #[test]
    fn repeated_click_on_pending_head_is_ignored() {
        let mut round = active(3);
        let ticket = match round.click(1) {
            ClickOutcome::Accepted(t) => t,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(round.click(1), ClickOutcome::Ignored);
        assert_eq!(round.status(), RoundStatus::Active);

        assert_eq!(round.complete_removal(ticket), RemovalOutcome::Removed { remaining: 2 });
        // redeeming the same ticket twice must not remove 2
        assert_eq!(round.complete_removal(ticket), RemovalOutcome::Stale);
        assert_eq!(round.head(), Some(2));
    }

    #[test]
    fn ticket_from_previous_round_is_stale() {
        let mut old = Round::start(1, RoundConfig::new(3), &mut rng());
        let ticket = match old.click(1) {
            ClickOutcome::Accepted(t) => t,
            other => panic!("unexpected {:?}", other),
        };

        let mut fresh = Round::start(2, RoundConfig::new(3), &mut rng());
        assert!(matches!(fresh.click(1), ClickOutcome::Accepted(_)));
        assert_eq!(fresh.complete_removal(ticket), RemovalOutcome::Stale);
        assert_eq!(fresh.remaining(), 3);
        assert_eq!(fresh.pending(), Some(1));
    }

    #[test]
    fn clock_runs_only_while_active() {
        let mut idle = Round::not_started();
        assert!(!idle.tick());
        assert_eq!(idle.elapsed_tenths(), 0);

        let mut round = active(2);
        let mut last = 0;
        for _ in 0..25 {
            assert!(round.tick());
            assert!(round.elapsed_tenths() >= last);
            last = round.elapsed_tenths();
        }
        assert_eq!(round.elapsed_tenths(), 25);

        round.click(2);
        assert!(!round.tick());
        assert_eq!(round.elapsed_tenths(), 25);
    }

    #[test]
    fn clock_frozen_after_clear() {
        let mut round = active(1);
        round.tick();
        round.tick();
        assert_eq!(clear_head(&mut round), RemovalOutcome::Cleared);
        assert!(!round.tick());
        assert_eq!(round.elapsed_tenths(), 2);
    }

    #[test]
    fn terminal_round_ignores_clicks() {
        let mut round = active(3);
        round.click(3);
        assert_eq!(round.click(1), ClickOutcome::Ignored);
        assert_eq!(Round::not_started().click(1), ClickOutcome::Ignored);
    }

    #[test]
    fn summary_reports_progress() {
        let mut round = active(3);
        for _ in 0..34 {
            round.tick();
        }
        clear_head(&mut round);
        round.click(3);
        let summary = round.summary();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.cleared, 1);
        assert_eq!(summary.status, RoundStatus::Failed);
        assert_eq!(summary.elapsed, "3.4");

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"status\":\"Failed\""));
    }

    #[test]
    fn status_titles() {
        assert_eq!(RoundStatus::NotStarted.title(), "LET'S PLAY");
        assert_eq!(RoundStatus::Active.title(), "LET'S PLAY");
        assert_eq!(RoundStatus::Cleared.title(), "ALL CLEARED");
        assert_eq!(RoundStatus::Failed.title(), "GAME OVER");
        assert!(RoundStatus::Failed.is_terminal());
        assert!(!RoundStatus::Active.is_terminal());
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(0), "0.0");
        assert_eq!(format_elapsed(7), "0.7");
        assert_eq!(format_elapsed(34), "3.4");
        assert_eq!(format_elapsed(1200), "120.0");
    }
}
