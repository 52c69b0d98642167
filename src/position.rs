use std::ops::{Deref, DerefMut};

use shakmaty::fen::Fen;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Board, CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Position as _};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid or illegal FEN")]
pub struct InvalidFen;

/// The single shared board a decision searches on. Moves are applied and
/// reverted in place; the search never copies the position itself.
///
/// shakmaty has no unmake, so reverting is backed by an internal undo stack.
/// That stack is an implementation detail: callers only ever see the current
/// state.
pub struct Position {
    current: Chess,
    undo: Vec<Chess>,
    seen: Vec<u64>,
}

impl Position {
    /// Standard starting position.
    pub fn new() -> Self {
        Self {
            current: Chess::default(),
            undo: Vec::new(),
            seen: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, InvalidFen> {
        let setup: Fen = fen.parse().map_err(|_| InvalidFen)?;
        let current: Chess = setup
            .into_position(CastlingMode::Standard)
            .map_err(|_| InvalidFen)?;
        Ok(Self {
            current,
            undo: Vec::new(),
            seen: Vec::new(),
        })
    }

    pub fn legal_moves(&self) -> MoveList {
        self.current.legal_moves()
    }

    pub fn white_to_move(&self) -> bool {
        self.current.turn() == Color::White
    }

    /// Half-moves played since the start of the game.
    pub fn ply(&self) -> u32 {
        (self.current.fullmoves().get() - 1) * 2 + u32::from(self.current.turn() == Color::Black)
    }

    /// Zobrist fingerprint of the current state, stable across move orders
    /// that reach the same position.
    pub fn hash(&self) -> u64 {
        self.current
            .zobrist_hash::<Zobrist64>(EnPassantMode::Legal)
            .0
    }

    /// Checkmate, stalemate, or a rules draw (insufficient material,
    /// fifty-move rule, repetition of an earlier position in the line
    /// applied on this board).
    pub fn is_terminal(&self) -> bool {
        self.current.is_checkmate()
            || self.current.is_stalemate()
            || self.current.is_insufficient_material()
            || self.current.halfmoves() >= 100
            || self.is_repetition()
    }

    /// The current position already occurred earlier in the applied line.
    /// A single recurrence counts: in-search, repeating a position can only
    /// be heading for the threefold draw.
    pub fn is_repetition(&self) -> bool {
        let hash = self.hash();
        self.seen.iter().any(|&h| h == hash)
    }

    pub fn board(&self) -> &Board {
        self.current.board()
    }

    /// Play `mv` on the shared board. The returned guard reverts the move
    /// when dropped, on every exit path.
    pub fn apply(&mut self, mv: &Move) -> Applied<'_> {
        self.seen.push(self.hash());
        self.undo.push(self.current.clone());
        self.current.play_unchecked(mv);
        Applied { pos: self }
    }

    fn revert(&mut self) {
        if let Some(prev) = self.undo.pop() {
            self.current = prev;
            self.seen.pop();
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped move application: holds the board with one extra move played and
/// takes it back on drop.
pub struct Applied<'a> {
    pos: &'a mut Position,
}

impl Deref for Applied<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.pos
    }
}

impl DerefMut for Applied<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.pos
    }
}

impl Drop for Applied<'_> {
    fn drop(&mut self) {
        self.pos.revert();
    }
}
