use std::time::Instant;

use shakmaty::Move;
use thiserror::Error;
use tracing::debug;

use crate::evaluation::evaluate;
use crate::ordering::order_moves;
use crate::position::Position;
use crate::tt::TranspositionTable;
use crate::types::{EngineConfig, Score, PLY_MEMORY, SCORE_INFINITY};

/// Check the clock every this many nodes.
const TIME_CHECK_INTERVAL: u64 = 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecisionError {
    /// `decide` was called on a position with no legal moves. Terminal
    /// positions are the caller's responsibility to detect.
    #[error("no legal moves in the current position")]
    NoLegalMoves,
}

/// The search deadline passed. Propagated with `?` so every frame unwinds
/// immediately; partial scores from a cancelled branch are never compared
/// against siblings.
#[derive(Debug)]
struct Cancelled;

/// Per-decision search state: the transposition table, the per-ply best-move
/// memory, and the clock. One decision at a time; the table stays warm across
/// decisions, everything else resets per call.
pub struct Searcher {
    config: EngineConfig,
    tt: TranspositionTable,
    best_by_ply: [Option<Move>; PLY_MEMORY],
    nodes: u64,
    start: Instant,
}

impl Searcher {
    pub fn new(config: EngineConfig) -> Self {
        let tt = TranspositionTable::new(config.hash_mb);
        Self {
            config,
            tt,
            best_by_ply: std::array::from_fn(|_| None),
            nodes: 0,
            start: Instant::now(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Pick a move for the side to move, searching until the time budget or
    /// the configured depth ceiling is reached.
    ///
    /// Iterative deepening: depth 1, 2, 3... each completed iteration's move
    /// replaces the current best. An iteration interrupted by the deadline is
    /// discarded entirely, however far along it was. If not even depth 1
    /// completed, the first legal move in generation order is returned.
    pub fn decide(&mut self, pos: &mut Position) -> Result<Move, DecisionError> {
        let legal = pos.legal_moves();
        if legal.is_empty() {
            return Err(DecisionError::NoLegalMoves);
        }

        self.start = Instant::now();
        self.nodes = 0;
        self.best_by_ply = std::array::from_fn(|_| None);

        let mut chosen: Option<Move> = None;

        for depth in 1..=self.config.max_depth {
            match self.search_root(pos, depth) {
                Ok((mv, score)) => {
                    let elapsed_ms = self.start.elapsed().as_millis() as u64;
                    debug!(depth, score, nodes = self.nodes, elapsed_ms, best = ?mv, "iteration complete");
                    chosen = Some(mv);
                }
                Err(Cancelled) => break,
            }
        }

        Ok(chosen.unwrap_or_else(|| legal[0].clone()))
    }

    /// One full-depth root iteration. Scans every root move itself rather
    /// than trusting the table, with a fresh full window per move.
    fn search_root(&mut self, pos: &mut Position, depth: u8) -> Result<(Move, Score), Cancelled> {
        self.check_time()?;

        let maximizing = pos.white_to_move();
        let moves = order_moves(&pos.legal_moves(), self.best_by_ply[0].as_ref());
        let mut best: Option<(Move, Score)> = None;

        for mv in &moves {
            let score = {
                let mut child = pos.apply(mv);
                self.minimax(
                    &mut child,
                    next_depth(depth, mv, &self.config),
                    -SCORE_INFINITY,
                    SCORE_INFINITY,
                    !maximizing,
                    1,
                )?
            };

            let improved = match &best {
                None => true,
                Some((_, prev)) => {
                    if maximizing {
                        score > *prev
                    } else {
                        score < *prev
                    }
                }
            };
            if improved {
                self.best_by_ply[0] = Some(mv.clone());
                best = Some((mv.clone(), score));
            }
        }

        best.ok_or(Cancelled)
    }

    /// Alpha-beta minimax over the shared board. Scores are always from
    /// White's perspective; the two sides maximize and minimize explicitly
    /// instead of negating recursively.
    fn minimax(
        &mut self,
        pos: &mut Position,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        ply: usize,
    ) -> Result<Score, Cancelled> {
        self.nodes += 1;
        if self.nodes % TIME_CHECK_INTERVAL == 0 {
            self.check_time()?;
        }

        if depth == 0 || pos.is_terminal() {
            return Ok(evaluate(pos, &self.config));
        }

        let hash = pos.hash();
        if let Some(entry) = self.tt.probe(hash) {
            if entry.depth >= depth {
                return Ok(entry.score);
            }
        }

        let remembered = self.best_by_ply.get(ply).cloned().flatten();
        let moves = order_moves(&pos.legal_moves(), remembered.as_ref());

        let mut best = if maximizing {
            -SCORE_INFINITY
        } else {
            SCORE_INFINITY
        };

        for mv in &moves {
            let score = {
                // The guard reverts the move on every exit path, including
                // the `?` on cancellation
                let mut child = pos.apply(mv);
                self.minimax(
                    &mut child,
                    next_depth(depth, mv, &self.config),
                    alpha,
                    beta,
                    !maximizing,
                    ply + 1,
                )?
            };

            if maximizing {
                if score > best {
                    best = score;
                    self.remember(ply, mv);
                }
                alpha = alpha.max(score);
            } else {
                if score < best {
                    best = score;
                    self.remember(ply, mv);
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        // Only completed nodes are cached; a cancelled node never gets here
        self.tt.store(hash, depth, best, maximizing);

        Ok(best)
    }

    fn remember(&mut self, ply: usize, mv: &Move) {
        if let Some(slot) = self.best_by_ply.get_mut(ply) {
            *slot = Some(mv.clone());
        }
    }

    fn check_time(&self) -> Result<(), Cancelled> {
        match self.config.time_budget_ms {
            Some(budget) if self.start.elapsed().as_millis() as u64 >= budget => Err(Cancelled),
            _ => Ok(()),
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

/// A capture played on the last ply before exhaustion keeps the remaining
/// depth at 1, extending the line one extra ply. Chains of captures extend
/// without bound; the only backstop is the clock.
fn next_depth(depth: u8, mv: &Move, config: &EngineConfig) -> u8 {
    if depth == 1 && config.capture_extension && mv.is_capture() {
        1
    } else {
        depth - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::Square;

    fn untimed(max_depth: u8) -> EngineConfig {
        EngineConfig {
            time_budget_ms: None,
            max_depth,
            hash_mb: 1,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn finds_a_move_from_startpos() {
        let mut pos = Position::new();
        let mut searcher = Searcher::new(untimed(3));
        let mv = searcher.decide(&mut pos).unwrap();
        assert!(pos.legal_moves().contains(&mv));
    }

    #[test]
    fn finds_mate_in_one() {
        // Scholar's mate is available: Qxf7#
        let mut pos = Position::from_fen(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        )
        .unwrap();
        let mut searcher = Searcher::new(untimed(3));
        let mv = searcher.decide(&mut pos).unwrap();
        assert_eq!(mv.from(), Some(Square::H5), "expected Qxf7#, got {:?}", mv);
        assert_eq!(mv.to(), Square::F7, "expected Qxf7#, got {:?}", mv);
    }

    #[test]
    fn rejects_position_without_moves() {
        // Fool's mate: white is already checkmated
        let mut pos = Position::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        let mut searcher = Searcher::default();
        assert_eq!(searcher.decide(&mut pos), Err(DecisionError::NoLegalMoves));
    }

    #[test]
    fn zero_budget_falls_back_to_first_legal_move() {
        let mut pos = Position::new();
        let first = pos.legal_moves()[0].clone();
        let mut searcher = Searcher::new(EngineConfig {
            time_budget_ms: Some(0),
            ..EngineConfig::default()
        });
        let mv = searcher.decide(&mut pos).unwrap();
        assert_eq!(mv, first);
    }

    #[test]
    fn cancellation_leaves_board_untouched() {
        let mut pos = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        let before = pos.hash();
        let mut searcher = Searcher::new(EngineConfig {
            time_budget_ms: Some(1),
            max_depth: 30,
            ..EngineConfig::default()
        });
        let mv = searcher.decide(&mut pos).unwrap();
        assert_eq!(pos.hash(), before, "apply/revert must balance on timeout");
        assert!(pos.legal_moves().contains(&mv));
    }

    #[test]
    fn search_is_deterministic() {
        let run = || {
            let mut pos = Position::new();
            let mut searcher = Searcher::new(untimed(3));
            let mv = searcher.decide(&mut pos).unwrap();
            (mv, searcher.nodes)
        };
        let (mv_a, nodes_a) = run();
        let (mv_b, nodes_b) = run();
        assert_eq!(mv_a, mv_b);
        assert_eq!(nodes_a, nodes_b);
    }

    #[test]
    fn root_score_matches_side_to_move() {
        // Black to move, up a queen: a completed depth-2 root search should
        // score well below zero (white perspective)
        let mut pos = Position::from_fen(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR b KQkq - 0 1",
        )
        .unwrap();
        let mut searcher = Searcher::new(untimed(2));
        let (_, score) = searcher.search_root(&mut pos, 2).unwrap();
        assert!(score < -800, "black up a queen scored {}", score);
    }

    #[test]
    fn capture_extension_searches_deeper() {
        // A depth-1 root search with the extension recurses through capture
        // chains; without it, strictly fewer nodes
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";

        let mut pos = Position::from_fen(fen).unwrap();
        let mut with = Searcher::new(untimed(1));
        with.decide(&mut pos).unwrap();

        let mut pos = Position::from_fen(fen).unwrap();
        let mut without = Searcher::new(EngineConfig {
            capture_extension: false,
            ..untimed(1)
        });
        without.decide(&mut pos).unwrap();

        assert!(with.nodes > without.nodes);
    }

    #[test]
    fn completed_iterations_survive_later_timeouts() {
        // Budget generous enough for depth 1 but far too small for the rest;
        // the returned move must come from a completed iteration
        let mut pos = Position::new();
        let mut searcher = Searcher::new(EngineConfig {
            time_budget_ms: Some(40),
            max_depth: 60,
            ..EngineConfig::default()
        });
        let mv = searcher.decide(&mut pos).unwrap();
        assert!(pos.legal_moves().contains(&mv));
        assert_eq!(pos.hash(), Position::new().hash());
    }
}

// Iterative deepening: search depth 1->2->3... The per-ply best-move memory
// carries ordering hints from one iteration into the next, and stopping at
// any point leaves a complete shallower answer to fall back on.

// Minimax here is the explicit two-sided form: White maximizes, Black
// minimizes, and every score stays in White's frame. No negamax negation.

// Alpha-beta: once one side has a reply that refutes this line, the rest of
// the moves at the node cannot change the result and are skipped.
