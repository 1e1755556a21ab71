//! Application-level configuration constants.

// Timers
pub const TICK_INTERVAL_MS: u32 = 100;
pub const REMOVAL_DELAY_MS: u32 = 1_000;

// Labels
pub const PLAY_LABEL: &str = "Play";
pub const RESTART_LABEL: &str = "Restart";
pub const POINTS_LABEL: &str = "Points:";
