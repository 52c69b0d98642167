pub type Score = i32;

pub const SCORE_INFINITY: Score = 1_000_000;
pub const DEFAULT_DEPTH: u8 = 5;
pub const DEFAULT_HASH_MB: usize = 64;
pub const DEFAULT_TIME_BUDGET_MS: u64 = 3000;
pub const DEFAULT_PHASE_PLY_THRESHOLD: u32 = 30;

/// Slots of per-ply best-move memory kept by a decision.
pub const PLY_MEMORY: usize = 10;

/// Centipawn piece values, indexed pawn..king.
pub const DEFAULT_PIECE_VALUES: [Score; 6] = [100, 300, 300, 500, 900, 10_000];

/// Knobs for one decision. Everything the search treats as a constant lives
/// here rather than being hardcoded.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Per-move wall-clock budget in milliseconds. `None` searches until
    /// `max_depth` with no time cutoff.
    pub time_budget_ms: Option<u64>,
    /// Ceiling for iterative deepening.
    pub max_depth: u8,
    /// Transposition table memory budget in megabytes.
    pub hash_mb: usize,
    pub piece_values: [Score; 6],
    /// Game ply below which the middlegame tables are used; endgame tables
    /// from there on. A hard threshold, not material-based phase detection.
    pub phase_ply_threshold: u32,
    /// Extend by one ply when a capture lands on the last ply before the
    /// depth limit. Unbounded along capture chains.
    pub capture_extension: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: Some(DEFAULT_TIME_BUDGET_MS),
            max_depth: DEFAULT_DEPTH,
            hash_mb: DEFAULT_HASH_MB,
            piece_values: DEFAULT_PIECE_VALUES,
            phase_ply_threshold: DEFAULT_PHASE_PLY_THRESHOLD,
            capture_extension: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_depth, DEFAULT_DEPTH);
        assert_eq!(config.hash_mb, DEFAULT_HASH_MB);
        assert_eq!(config.piece_values[0], 100);
        assert_eq!(config.piece_values[5], 10_000);
        assert!(config.capture_extension);
    }
}
