use shakmaty::{Color, Role};

use crate::position::Position;
use crate::pst;
use crate::types::{EngineConfig, Score};

const ALL_ROLES: [Role; 6] = [
    Role::Pawn,
    Role::Knight,
    Role::Bishop,
    Role::Rook,
    Role::Queen,
    Role::King,
];

/// Maps a Role to the table/value index (0-5)
fn piece_index(role: Role) -> usize {
    match role {
        Role::Pawn => pst::PAWN,
        Role::Knight => pst::KNIGHT,
        Role::Bishop => pst::BISHOP,
        Role::Rook => pst::ROOK,
        Role::Queen => pst::QUEEN,
        Role::King => pst::KING,
    }
}

/// Static score of the current board, material plus piece placement, always
/// from White's perspective (positive favors White). Purely a function of the
/// board state, no search.
///
/// Checkmated and stalemated positions get no special score: they evaluate to
/// whatever their material and placement say. The search inherits that gap.
pub fn evaluate(pos: &Position, config: &EngineConfig) -> Score {
    material(pos, config) + positional(pos, config)
}

fn material(pos: &Position, config: &EngineConfig) -> Score {
    let board = pos.board();
    let mut score = 0;

    for color in [Color::White, Color::Black] {
        let sign: Score = if color == Color::White { 1 } else { -1 };
        for role in ALL_ROLES {
            let count = (board.by_color(color) & board.by_role(role)).count() as Score;
            score += sign * config.piece_values[piece_index(role)] * count;
        }
    }

    score
}

/// The tables are authored from White's visual orientation: row 0 is the rank
/// furthest from White. A White piece therefore mirrors its row (`7 - row`);
/// a Black piece reads its row directly.
fn positional(pos: &Position, config: &EngineConfig) -> Score {
    let board = pos.board();
    let tables = if pos.ply() < config.phase_ply_threshold {
        &pst::MG_TABLES
    } else {
        &pst::EG_TABLES
    };
    let mut score = 0;

    for color in [Color::White, Color::Black] {
        let sign: Score = if color == Color::White { 1 } else { -1 };
        for role in ALL_ROLES {
            let table = &tables[piece_index(role)];
            for sq in board.by_color(color) & board.by_role(role) {
                let row = sq.rank() as usize;
                let col = sq.file() as usize;
                let lookup_row = if color == Color::White { 7 - row } else { row };
                score += sign * Score::from(table[lookup_row * 8 + col]);
            }
        }
    }

    score
}
