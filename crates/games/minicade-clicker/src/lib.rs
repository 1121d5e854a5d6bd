use serde::{Deserialize, Serialize};

use minicade_core::catalog::GameVariant;
use minicade_core::config::ClickerConfig;
use minicade_core::game_trait::{GameEvent, GameInput, GameMetadata, MiniGame};
use minicade_core::minigame_boilerplate;
use minicade_core::time::Millis;
use minicade_core::timer::{TimerHandle, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickerPhase {
    Idle,
    Running {
        clicks: u32,
        remaining_secs: u32,
        /// Next countdown tick.
        tick: TimerHandle,
    },
    Finished { clicks: u32 },
}

/// Serializable state for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickerState {
    pub phase: ClickerPhase,
    /// Highest click count across finished rounds.
    pub best_score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickerTimer {
    Countdown,
}

/// Click as many times as possible before the countdown runs out.
pub struct SpeedClicker {
    state: ClickerState,
    timers: Timers<ClickerTimer>,
    config: ClickerConfig,
}

impl SpeedClicker {
    pub fn new() -> Self {
        Self::with_config(ClickerConfig::default())
    }

    pub fn with_config(config: ClickerConfig) -> Self {
        Self {
            state: ClickerState {
                phase: ClickerPhase::Idle,
                best_score: 0,
            },
            timers: Timers::new(),
            config,
        }
    }

    pub fn state(&self) -> &ClickerState {
        &self.state
    }

    pub fn phase(&self) -> ClickerPhase {
        self.state.phase
    }

    pub fn best_score(&self) -> u32 {
        self.state.best_score
    }

    /// Clicks in the current or last round.
    pub fn clicks(&self) -> u32 {
        match self.state.phase {
            ClickerPhase::Idle => 0,
            ClickerPhase::Running { clicks, .. } | ClickerPhase::Finished { clicks } => clicks,
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        match self.state.phase {
            ClickerPhase::Idle => self.config.duration_secs,
            ClickerPhase::Running { remaining_secs, .. } => remaining_secs,
            ClickerPhase::Finished { .. } => 0,
        }
    }

    fn start(&mut self, now: Millis) -> Vec<GameEvent> {
        self.timers.cancel_all();
        let tick = self.timers.schedule(
            now.saturating_add(self.config.tick_ms),
            ClickerTimer::Countdown,
        );
        self.state.phase = ClickerPhase::Running {
            clicks: 0,
            remaining_secs: self.config.duration_secs,
            tick,
        };
        tracing::debug!(duration = self.config.duration_secs, "clicker: started");
        vec![GameEvent::Started]
    }

    fn click(&mut self) -> Vec<GameEvent> {
        match &mut self.state.phase {
            ClickerPhase::Running { clicks, .. } => {
                *clicks += 1;
                vec![GameEvent::Clicked { clicks: *clicks }]
            },
            _ => Vec::new(),
        }
    }

    fn countdown(&mut self, handle: TimerHandle, due: Millis) -> Vec<GameEvent> {
        let ClickerPhase::Running {
            clicks,
            remaining_secs,
            tick,
        } = self.state.phase
        else {
            return Vec::new();
        };
        if tick != handle {
            tracing::debug!("clicker: ignoring stale countdown tick");
            return Vec::new();
        }

        let remaining_secs = remaining_secs.saturating_sub(1);
        if remaining_secs == 0 {
            let best = self.state.best_score.max(clicks);
            self.state.best_score = best;
            self.state.phase = ClickerPhase::Finished { clicks };
            tracing::debug!(clicks, best, "clicker: time up");
            return vec![GameEvent::TimeUp { clicks, best }];
        }

        // Chain from the due time so a late event loop doesn't drift.
        let tick = self.timers.schedule(
            due.saturating_add(self.config.tick_ms),
            ClickerTimer::Countdown,
        );
        self.state.phase = ClickerPhase::Running {
            clicks,
            remaining_secs,
            tick,
        };
        vec![GameEvent::CountdownTick { remaining_secs }]
    }
}

impl Default for SpeedClicker {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for SpeedClicker {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Clicker".to_string(),
            description: format!(
                "Make as many clicks as you can in {} seconds!",
                self.config.duration_secs
            ),
            variant: GameVariant::Clicker,
        }
    }

    fn apply_input(&mut self, input: &GameInput, now: Millis) -> Vec<GameEvent> {
        match input {
            GameInput::Start => self.start(now),
            GameInput::Click => self.click(),
            GameInput::Reveal { .. } | GameInput::Guess { .. } => Vec::new(),
        }
    }

    fn on_timer(&mut self, now: Millis) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.kind {
                ClickerTimer::Countdown => events.extend(self.countdown(fired.handle, fired.due)),
            }
        }
        events
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.state.phase = ClickerPhase::Idle;
    }

    fn is_finished(&self) -> bool {
        matches!(self.state.phase, ClickerPhase::Finished { .. })
    }

    minigame_boilerplate!();
}
