pub mod tier;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use minicade_core::catalog::GameVariant;
use minicade_core::config::ReactionConfig;
use minicade_core::game_trait::{GameEvent, GameInput, GameMetadata, MiniGame};
use minicade_core::minigame_boilerplate;
use minicade_core::time::Millis;
use minicade_core::timer::{TimerHandle, Timers};

pub use tier::ReactionTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionPhase {
    /// Waiting for the player to begin.
    Idle,
    /// Red screen; "go" is scheduled at `go_at`.
    Armed { go_timer: TimerHandle, go_at: Millis },
    /// Green screen since `entered_at`.
    Go { entered_at: Millis },
    /// Showing the last measurement.
    Result { reaction_ms: u64 },
}

/// Serializable state for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionState {
    pub phase: ReactionPhase,
    pub last_reaction_ms: Option<u64>,
    /// Fastest reaction this session. Only ever decreases.
    pub best_reaction_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReactionTimer {
    Go,
}

/// The reaction-time test: wait for green, then click as fast as possible.
pub struct ReactionTest {
    state: ReactionState,
    timers: Timers<ReactionTimer>,
    rng: StdRng,
    config: ReactionConfig,
}

impl ReactionTest {
    pub fn new() -> Self {
        Self::with_rng(ReactionConfig::default(), StdRng::from_os_rng())
    }

    pub fn with_rng(config: ReactionConfig, rng: StdRng) -> Self {
        Self {
            state: ReactionState {
                phase: ReactionPhase::Idle,
                last_reaction_ms: None,
                best_reaction_ms: None,
            },
            timers: Timers::new(),
            rng,
            config,
        }
    }

    pub fn state(&self) -> &ReactionState {
        &self.state
    }

    pub fn phase(&self) -> ReactionPhase {
        self.state.phase
    }

    pub fn last_reaction_ms(&self) -> Option<u64> {
        self.state.last_reaction_ms
    }

    pub fn best_reaction_ms(&self) -> Option<u64> {
        self.state.best_reaction_ms
    }

    /// Verdict for the last measurement.
    pub fn tier(&self) -> Option<ReactionTier> {
        self.state.last_reaction_ms.map(ReactionTier::from_ms)
    }

    /// Arm the test. Only valid from Idle or Result.
    fn start(&mut self, now: Millis) -> Vec<GameEvent> {
        if !matches!(
            self.state.phase,
            ReactionPhase::Idle | ReactionPhase::Result { .. }
        ) {
            return Vec::new();
        }

        let delay = self.arming_delay();
        let go_at = now.saturating_add(delay);
        let go_timer = self.timers.schedule(go_at, ReactionTimer::Go);
        self.state.phase = ReactionPhase::Armed { go_timer, go_at };
        tracing::debug!(delay, "reaction: armed");
        vec![GameEvent::Started, GameEvent::Armed { go_at }]
    }

    /// Uniform in `[min_delay_ms, max_delay_ms)`. A window that is empty or
    /// inverted collapses to a fixed `min_delay_ms`.
    fn arming_delay(&mut self) -> Millis {
        let (min, max) = (self.config.min_delay_ms, self.config.max_delay_ms);
        if min < max {
            self.rng.random_range(min..max)
        } else {
            min
        }
    }

    fn click(&mut self, now: Millis) -> Vec<GameEvent> {
        match self.state.phase {
            ReactionPhase::Idle => self.start(now),
            ReactionPhase::Armed { go_timer, .. } => {
                self.timers.cancel(go_timer);
                self.state.phase = ReactionPhase::Idle;
                self.state.last_reaction_ms = None;
                tracing::debug!("reaction: false start");
                vec![GameEvent::FalseStart]
            },
            ReactionPhase::Go { entered_at } => {
                let reaction_ms = now.saturating_sub(entered_at);
                let best_ms = match self.state.best_reaction_ms {
                    Some(best) if best <= reaction_ms => best,
                    _ => reaction_ms,
                };
                self.state.last_reaction_ms = Some(reaction_ms);
                self.state.best_reaction_ms = Some(best_ms);
                self.state.phase = ReactionPhase::Result { reaction_ms };
                tracing::debug!(reaction_ms, best_ms, "reaction: recorded");
                vec![GameEvent::ReactionRecorded {
                    reaction_ms,
                    best_ms,
                }]
            },
            ReactionPhase::Result { .. } => Vec::new(),
        }
    }

    /// Green is measured from the scheduled time, not from when the event
    /// loop got around to delivering the timer.
    fn go(&mut self, handle: TimerHandle, due: Millis) -> Vec<GameEvent> {
        match self.state.phase {
            ReactionPhase::Armed { go_timer, .. } if go_timer == handle => {
                self.state.phase = ReactionPhase::Go { entered_at: due };
                vec![GameEvent::Go]
            },
            _ => {
                tracing::debug!("reaction: ignoring stale go timer");
                Vec::new()
            },
        }
    }
}

impl Default for ReactionTest {
    fn default() -> Self {
        Self::new()
    }
}

impl MiniGame for ReactionTest {
    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            name: "Reaction Test".to_string(),
            description: "Click as fast as you can when the screen turns green!".to_string(),
            variant: GameVariant::Reaction,
        }
    }

    fn apply_input(&mut self, input: &GameInput, now: Millis) -> Vec<GameEvent> {
        match input {
            GameInput::Start => self.start(now),
            GameInput::Click => self.click(now),
            GameInput::Reveal { .. } | GameInput::Guess { .. } => Vec::new(),
        }
    }

    fn on_timer(&mut self, now: Millis) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.kind {
                ReactionTimer::Go => events.extend(self.go(fired.handle, fired.due)),
            }
        }
        events
    }

    fn reset(&mut self) {
        self.timers.cancel_all();
        self.state.phase = ReactionPhase::Idle;
        self.state.last_reaction_ms = None;
    }

    fn is_finished(&self) -> bool {
        matches!(self.state.phase, ReactionPhase::Result { .. })
    }

    minigame_boilerplate!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use minicade_core::test_helpers::{run_timers_until, seeded_rng};

    fn game(seed: u64) -> ReactionTest {
        ReactionTest::with_rng(ReactionConfig::default(), seeded_rng(seed))
    }

    /// Start at `now` and return the scheduled go time.
    fn arm(game: &mut ReactionTest, now: Millis) -> Millis {
        game.apply_input(&GameInput::Start, now);
        match game.phase() {
            ReactionPhase::Armed { go_at, .. } => go_at,
            other => panic!("expected Armed, got {other:?}"),
        }
    }

    /// Play one full round and click `reaction` ms after green.
    fn play_round(game: &mut ReactionTest, now: Millis, reaction: u64) -> Millis {
        let go_at = arm(game, now);
        run_timers_until(game, go_at);
        game.apply_input(&GameInput::Click, go_at + reaction);
        go_at + reaction
    }

    #[test]
    fn start_arms_within_delay_window() {
        for seed in 0..50 {
            let mut game = game(seed);
            let go_at = arm(&mut game, 1_000);
            assert!(
                (3_000..6_000).contains(&go_at),
                "go_at {go_at} outside [2000, 5000) after start"
            );
            assert_eq!(game.next_deadline(), Some(go_at));
        }
    }

    #[test]
    fn timer_moves_armed_to_go() {
        let mut game = game(1);
        let go_at = arm(&mut game, 0);
        assert!(game.on_timer(go_at - 1).is_empty());
        assert_eq!(game.on_timer(go_at), vec![GameEvent::Go]);
        assert_eq!(game.phase(), ReactionPhase::Go { entered_at: go_at });
    }

    #[test]
    fn late_timer_measures_from_scheduled_go() {
        let mut game = game(2);
        let go_at = arm(&mut game, 0);
        game.on_timer(go_at + 40);
        assert_eq!(game.phase(), ReactionPhase::Go { entered_at: go_at });

        // Timer and click delivered together still score the full wait.
        let events = game.apply_input(&GameInput::Click, go_at + 300);
        assert_eq!(
            events,
            vec![GameEvent::ReactionRecorded {
                reaction_ms: 300,
                best_ms: 300
            }]
        );
    }

    #[test]
    fn late_delivery_does_not_pin_best_to_zero() {
        let mut game = game(5);
        let go_at = arm(&mut game, 0);
        game.on_timer(go_at + 300);
        game.apply_input(&GameInput::Click, go_at + 300);
        assert_eq!(game.best_reaction_ms(), Some(300));

        play_round(&mut game, go_at + 300, 180);
        assert_eq!(game.last_reaction_ms(), Some(180));
        assert_eq!(game.best_reaction_ms(), Some(180));
    }

    #[test]
    fn collapsed_delay_window_arms_at_min() {
        let config = ReactionConfig {
            min_delay_ms: 3_000,
            max_delay_ms: 3_000,
        };
        let mut game = ReactionTest::with_rng(config, seeded_rng(0));
        assert_eq!(arm(&mut game, 100), 3_100);

        let config = ReactionConfig {
            min_delay_ms: 4_000,
            max_delay_ms: 1_000,
        };
        let mut game = ReactionTest::with_rng(config, seeded_rng(0));
        assert_eq!(arm(&mut game, 0), 4_000);
    }

    #[test]
    fn click_while_armed_is_false_start() {
        let mut game = game(3);
        play_round(&mut game, 0, 250);
        let go_at = arm(&mut game, 10_000);

        let events = game.apply_input(&GameInput::Click, go_at - 1);
        assert_eq!(events, vec![GameEvent::FalseStart]);
        assert_eq!(game.phase(), ReactionPhase::Idle);
        assert_eq!(game.last_reaction_ms(), None);
        assert_eq!(game.best_reaction_ms(), Some(250), "best survives false start");

        // The cancelled go timer never fires.
        assert_eq!(game.next_deadline(), None);
        assert!(game.on_timer(Millis::MAX).is_empty());
        assert_eq!(game.phase(), ReactionPhase::Idle);
    }

    #[test]
    fn click_during_go_records_reaction() {
        let mut game = game(4);
        let go_at = arm(&mut game, 0);
        run_timers_until(&mut game, go_at);
        let events = game.apply_input(&GameInput::Click, go_at + 180);
        assert_eq!(
            events,
            vec![GameEvent::ReactionRecorded {
                reaction_ms: 180,
                best_ms: 180
            }]
        );
        assert_eq!(game.phase(), ReactionPhase::Result { reaction_ms: 180 });
        assert_eq!(game.tier(), Some(ReactionTier::Incredible));
        assert!(game.is_finished());
    }

    #[test]
    fn best_only_improves() {
        let mut game = game(5);
        let mut now = play_round(&mut game, 0, 300);
        assert_eq!(game.best_reaction_ms(), Some(300));

        now = play_round(&mut game, now, 420);
        assert_eq!(game.last_reaction_ms(), Some(420));
        assert_eq!(game.best_reaction_ms(), Some(300));

        play_round(&mut game, now, 210);
        assert_eq!(game.best_reaction_ms(), Some(210));
    }

    #[test]
    fn idle_click_starts_round() {
        let mut game = game(6);
        let events = game.apply_input(&GameInput::Click, 0);
        assert!(events.contains(&GameEvent::Started));
        assert!(matches!(game.phase(), ReactionPhase::Armed { .. }));
    }

    #[test]
    fn result_click_is_noop_and_start_retries() {
        let mut game = game(7);
        let now = play_round(&mut game, 0, 200);
        assert!(game.apply_input(&GameInput::Click, now + 10).is_empty());
        assert!(game.is_finished());

        game.apply_input(&GameInput::Start, now + 20);
        assert!(matches!(game.phase(), ReactionPhase::Armed { .. }));
    }

    #[test]
    fn start_while_armed_is_ignored() {
        let mut game = game(8);
        let go_at = arm(&mut game, 0);
        assert!(game.apply_input(&GameInput::Start, 100).is_empty());
        assert_eq!(game.next_deadline(), Some(go_at));
    }

    #[test]
    fn reset_before_go_prevents_stale_transition() {
        let mut game = game(9);
        let go_at = arm(&mut game, 0);
        game.reset();
        assert!(game.on_timer(go_at).is_empty());
        assert_eq!(game.phase(), ReactionPhase::Idle);
    }

    #[test]
    fn contract_metadata_matches() {
        minicade_core::test_helpers::contract_metadata_matches(
            &ReactionTest::new(),
            GameVariant::Reaction,
        );
    }

    #[test]
    fn contract_start_changes_state() {
        minicade_core::test_helpers::contract_start_changes_state(&mut game(10));
    }

    #[test]
    fn contract_reset_cancels_timers() {
        minicade_core::test_helpers::contract_reset_cancels_timers(
            &mut game(11),
            &[GameInput::Start],
        );
    }

    #[test]
    fn contract_foreign_input_is_noop() {
        let mut game = game(12);
        minicade_core::test_helpers::contract_foreign_input_is_noop(
            &mut game,
            &GameInput::Reveal { index: 3 },
        );
        minicade_core::test_helpers::contract_foreign_input_is_noop(
            &mut game,
            &GameInput::Guess {
                text: "50".to_string(),
            },
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn best_is_running_minimum(
                seed in 0u64..1000,
                reactions in proptest::collection::vec(0u64..2_000, 1..12)
            ) {
                let mut game = game(seed);
                let mut now = 0;
                let mut previous_best = u64::MAX;
                for &reaction in &reactions {
                    now = play_round(&mut game, now, reaction);
                    let best = game.best_reaction_ms().unwrap();
                    prop_assert!(best <= previous_best, "best must never increase");
                    prop_assert_eq!(game.last_reaction_ms(), Some(reaction));
                    previous_best = best;
                }
                prop_assert_eq!(previous_best, *reactions.iter().min().unwrap());
            }

            #[test]
            fn false_start_never_records(
                seed in 0u64..1000,
                early in 0u64..2_000
            ) {
                let mut game = game(seed);
                let go_at = arm(&mut game, 0);
                let click_at = early.min(go_at - 1);
                game.apply_input(&GameInput::Click, click_at);
                prop_assert_eq!(game.phase(), ReactionPhase::Idle);
                prop_assert_eq!(game.last_reaction_ms(), None);
                prop_assert_eq!(game.best_reaction_ms(), None);
            }
        }
    }
}
