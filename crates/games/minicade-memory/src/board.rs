use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Number of distinct card faces.
pub const SYMBOL_COUNT: usize = 8;

/// Cards on the board: every symbol appears exactly twice.
pub const BOARD_SIZE: usize = SYMBOL_COUNT * 2;

/// Opaque tokens the renderer draws on card faces.
const SYMBOL_TOKENS: [&str; SYMBOL_COUNT] = ["🎮", "🚀", "⚽", "🎨", "🎵", "🍕", "🌟", "💎"];

/// A card face, `0..SYMBOL_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u8);

impl Symbol {
    pub fn token(self) -> &'static str {
        SYMBOL_TOKENS[self.0 as usize % SYMBOL_COUNT]
    }
}

/// Deal a fresh board: each symbol twice, shuffled.
pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Vec<Symbol> {
    let mut board: Vec<Symbol> = (0..SYMBOL_COUNT as u8)
        .flat_map(|s| [Symbol(s), Symbol(s)])
        .collect();
    board.shuffle(rng);
    board
}

/// What the renderer shows for one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    FaceUp(Symbol),
    Matched(Symbol),
}
