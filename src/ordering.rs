use std::cmp::Reverse;

use arrayvec::ArrayVec;
use shakmaty::{Move, MoveList};

struct ScoredMove {
    mv: Move,
    priority: u8,
}

/// Orders legal moves for the search, highest priority first:
/// (1) the move remembered as best at this ply, (2) tactical moves
/// (capture / castle / en passant / promotion), (3) everything else.
/// The sort is stable, so generation order is preserved within a tier.
pub fn order_moves(moves: &MoveList, remembered: Option<&Move>) -> MoveList {
    let mut scored: ArrayVec<ScoredMove, 256> = moves
        .iter()
        .map(|mv| ScoredMove {
            priority: priority(mv, remembered),
            mv: mv.clone(),
        })
        .collect();

    scored.sort_by_key(|sm| Reverse(sm.priority));
    scored.into_iter().map(|sm| sm.mv).collect()
}

fn priority(mv: &Move, remembered: Option<&Move>) -> u8 {
    if Some(mv) == remembered {
        2
    } else if mv.is_capture() || mv.is_castle() || mv.is_en_passant() || mv.is_promotion() {
        1
    } else {
        0
    }
}
