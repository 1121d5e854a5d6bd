pub mod board;

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use minicade_core::catalog::GameVariant;
use minicade_core::config::MemoryConfig;
use minicade_core::game_trait::{GameEvent, GameInput, GameMetadata, MiniGame};
use minicade_core::minigame_boilerplate;
use minicade_core::time::Millis;
use minicade_core::timer::{TimerHandle, Timers};

use board::{BOARD_SIZE, CardFace, Symbol, deal};

/// A game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRound {
    /// Layout dealt at start. Matches are always checked against it.
    pub board: Vec<Symbol>,
    /// Cards currently face up, at most two.
    pub face_up: Vec<usize>,
    pub matched: BTreeSet<usize>,
    pub moves: u32,
    /// Pending check of the two face-up cards.
    pub settle: Option<TimerHandle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryState {
    NotStarted,
    Playing(MemoryRound),
    Won { board: Vec<Symbol>, moves: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemoryTimer {
    Settle,
}

/// The memory matching game: flip two cards, keep them if they match.
pub struct MemoryMatch {
    state: MemoryState,
    timers: Timers<MemoryTimer>,
    rng: StdRng,
    config: MemoryConfig,
}

impl MemoryMatch {
    pub fn new() -> Self {
        Self::with_rng(MemoryConfig::default(), StdRng::from_os_rng())
    }

    pub fn with_rng(config: MemoryConfig, rng: StdRng) -> Self {
        Self {
            state: MemoryState::NotStarted,
            timers: Timers::new(),
            rng,
            config,
        }
    }

    pub fn state(&self) -> &MemoryState {
        &self.state
    }

    pub fn moves(&self) -> u32 {
        match &self.state {
            MemoryState::NotStarted => 0,
            MemoryState::Playing(round) => round.moves,
            MemoryState::Won { moves, .. } => *moves,
        }
    }

    /// The dealt layout, once a game has started.
    pub fn board(&self) -> Option<&[Symbol]> {
        match &self.state {
            MemoryState::NotStarted => None,
            MemoryState::Playing(round) => Some(&round.board),
            MemoryState::Won { board, .. } => Some(board),
        }
    }

    /// Per-card view for the renderer. Empty before the first start.
    pub fn cards(&self) -> Vec<CardFace> {
        match &self.state {
            MemoryState::NotStarted => Vec::new(),
            MemoryState::Playing(round) => round
                .board
                .iter()
                .enumerate()
                .map(|(i, &symbol)| {
                    if round.matched.contains(&i) {
                        CardFace::Matched(symbol)
                    } else if round.face_up.contains(&i) {
                        CardFace::FaceUp(symbol)
                    } else {
                        CardFace::Hidden
                    }
                })
                .collect(),
            MemoryState::Won { board, .. } => board.iter().map(|&s| CardFace::Matched(s)).collect(),
        }
    }

    fn start(&mut self) -> Vec<GameEvent> {
        self.timers.cancel_all();
        self.state = MemoryState::Playing(MemoryRound {
            board: deal(&mut self.rng),
            face_up: Vec::with_capacity(2),
            matched: BTreeSet::new(),
            moves: 0,
            settle: None,
        });
        tracing::debug!("memory: new board dealt");
        vec![GameEvent::Started]
    }

    fn reveal(&mut self, index: usize, now: Millis) -> Vec<GameEvent> {
        let MemoryState::Playing(round) = &mut self.state else {
            return Vec::new();
        };
        if index >= BOARD_SIZE
            || round.face_up.len() == 2
            || round.face_up.contains(&index)
            || round.matched.contains(&index)
        {
            return Vec::new();
        }

        round.face_up.push(index);
        if round.face_up.len() == 2 {
            round.moves += 1;
            let due = now.saturating_add(self.config.settle_delay_ms);
            round.settle = Some(self.timers.schedule(due, MemoryTimer::Settle));
        }
        vec![GameEvent::CardRevealed { index }]
    }

    /// Compare the two face-up cards once the settle delay has elapsed.
    fn settle(&mut self, handle: TimerHandle) -> Vec<GameEvent> {
        let MemoryState::Playing(round) = &mut self.state else {
            return Vec::new();
        };
        if round.settle != Some(handle) {
            tracing::debug!("memory: ignoring stale settle timer");
            return Vec::new();
        }
        round.settle = None;

        let [first, second] = round.face_up[..] else {
            round.face_up.clear();
            return Vec::new();
        };
        round.face_up.clear();

        if round.board[first] != round.board[second] {
            return vec![GameEvent::PairHidden { first, second }];
        }

        round.matched.insert(first);
        round.matched.insert(second);
        let mut events = vec![GameEvent::PairMatched { first, second }];

        if round.matched.len() == BOARD_SIZE {
            let moves = round.moves;
            let board = std::mem::take(&mut round.board);
            self.state = MemoryState::Won { board, moves };
            tracing::debug!(moves, "memory: board cleared");
            events.push(GameEvent::BoardCleared { moves });
        }
        events
    }
}

impl Default for MemoryMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for MemoryMatch {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Memory Game".to_string(),
            description: "Find all the matching card pairs!".to_string(),
            variant: GameVariant::Memory,
        }
    }

    fn apply_input(&mut self, input: &GameInput, now: Millis) -> Vec<GameEvent> {
        match input {
            GameInput::Start => self.start(),
            GameInput::Reveal { index } => self.reveal(*index, now),
            GameInput::Click | GameInput::Guess { .. } => Vec::new(),
        }
    }

    fn on_timer(&mut self, now: Millis) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.kind {
                MemoryTimer::Settle => events.extend(self.settle(fired.handle)),
            }
        }
        events
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.state = MemoryState::NotStarted;
    }

    fn is_finished(&self) -> bool {
        matches!(self.state, MemoryState::Won { .. })
    }

    minigame_boilerplate!();
}
