//! The per-frame state machine.
//!
//! [`Game::step`] consumes one frame's worth of input events plus the
//! current monotonic time and advances the world. It never touches the
//! filesystem or the terminal; instead it reports in [`StepOutcome`] which
//! records the caller has to persist.

use std::mem;

use rand::Rng;

use crate::collision;
use crate::config::GameConfig;
use crate::leaderboard::{self, Leaderboard, MAX_NAME_LEN, PlayerName};
use crate::obstacle::{self, Pipe};
use crate::physics::{self, Bird};

/// Discrete input delivered by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Quit,
    Jump,
    Text(char),
    Backspace,
    Confirm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCause {
    Ground,
    Pipe,
}

/// Everything that belongs to a single run. Replaced wholesale when a new
/// run starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// The next pipe spawns on the first frame strictly after this time.
    pub next_spawn_ms: u64,
    pub end_cause: Option<EndCause>,
}

impl Round {
    pub fn new(config: &GameConfig, now_ms: u64) -> Self {
        Self {
            bird: Bird::spawn(config),
            pipes: Vec::new(),
            score: 0,
            next_spawn_ms: now_ms + config.first_pipe_delay_ms,
            end_cause: None,
        }
    }

    /// One frame of physics, spawning, collision and scoring. Returns why
    /// the run ended, if it did.
    fn advance<R: Rng>(&mut self, config: &GameConfig, now_ms: u64, rng: &mut R) -> Option<EndCause> {
        self.bird = physics::advance_bird(self.bird, config.gravity);
        if collision::hits_ground(&self.bird, config.screen_height) {
            return Some(EndCause::Ground);
        }

        if now_ms > self.next_spawn_ms {
            self.pipes.push(obstacle::spawn_pipe(config, rng));
            self.next_spawn_ms = now_ms + config.pipe_frequency_ms;
        }

        let bird = self.bird;
        let mut crashed = false;
        for pipe in &mut self.pipes {
            // a crash freezes this pipe and everything behind it
            if collision::collides(pipe, &bird, config.screen_height) {
                crashed = true;
                break;
            }
            *pipe = physics::advance_pipe(*pipe, config.pipe_speed);
            if !pipe.passed && bird.center_x() > pipe.right() {
                pipe.passed = true;
                self.score += 1;
            }
        }
        self.pipes.retain(|p| !p.is_offscreen());

        crashed.then_some(EndCause::Pipe)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Title screen, nothing simulated.
    Idle,
    Running(Round),
    /// The run has ended; the next jump decides whether a name is needed.
    GameOver(Round),
    NameEntry { round: Round, name: String },
    /// The run is over and nothing more is owed to the leaderboard.
    Finalized(Round),
}

impl Phase {
    pub fn round(&self) -> Option<&Round> {
        match self {
            Phase::Idle => None,
            Phase::Running(round)
            | Phase::GameOver(round)
            | Phase::NameEntry { round, .. }
            | Phase::Finalized(round) => Some(round),
        }
    }

    pub fn name_buffer(&self) -> Option<&str> {
        match self {
            Phase::NameEntry { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running(_))
    }
}

/// What the caller must do after a frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub save_high_score: bool,
    pub save_leaderboard: bool,
    pub quit: bool,
}

impl StepOutcome {
    /// Folds a later outcome of the same frame into this one.
    pub fn absorb(&mut self, other: StepOutcome) {
        self.save_high_score |= other.save_high_score;
        self.save_leaderboard |= other.save_leaderboard;
        self.quit |= other.quit;
    }
}

/// Owns the current phase plus the process-wide high score and leaderboard.
/// Single-threaded: the frame loop is its only user.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    phase: Phase,
    high_score: u32,
    leaderboard: Leaderboard,
}

impl Game {
    pub fn new(config: GameConfig, high_score: u32, leaderboard: Leaderboard) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            high_score,
            leaderboard,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn score(&self) -> u32 {
        self.phase.round().map_or(0, |r| r.score)
    }

    /// Whether keyboard input should be read as text this frame.
    pub fn accepts_text(&self) -> bool {
        matches!(self.phase, Phase::NameEntry { .. })
    }

    /// Handles the frame's events in order, then advances the world once.
    /// A `Quit` drops the remaining events and skips the advance.
    pub fn step<R: Rng>(&mut self, events: &[Event], now_ms: u64, rng: &mut R) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        for &event in events {
            outcome.absorb(self.handle(event, now_ms));
            if outcome.quit {
                return outcome;
            }
        }
        outcome.absorb(self.tick(now_ms, rng));
        outcome
    }

    /// Applies one input event without moving the world. Callers that read
    /// keys one at a time use this so each key sees the phase the previous
    /// one left behind.
    pub fn handle(&mut self, event: Event, now_ms: u64) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        match event {
            Event::Quit => outcome.quit = true,
            Event::Jump => self.on_jump(now_ms),
            Event::Text(ch) => self.on_text(ch),
            Event::Backspace => {
                if let Phase::NameEntry { name, .. } = &mut self.phase {
                    name.pop();
                }
            }
            Event::Confirm => self.on_confirm(&mut outcome),
        }
        outcome
    }

    /// Advances a running world by one frame; other phases are static.
    pub fn tick<R: Rng>(&mut self, now_ms: u64, rng: &mut R) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if let Phase::Running(round) = &mut self.phase {
            if let Some(cause) = round.advance(&self.config, now_ms, rng) {
                round.end_cause = Some(cause);
                let score = round.score;
                log::info!("run over ({cause:?}) with score {score}");
                self.phase = match mem::replace(&mut self.phase, Phase::Idle) {
                    Phase::Running(round) => Phase::GameOver(round),
                    other => other,
                };
                if self.record_high_score(score) {
                    outcome.save_high_score = true;
                }
            }
        }
        outcome
    }

    fn start_round(&self, now_ms: u64) -> Phase {
        log::info!("run started");
        Phase::Running(Round::new(&self.config, now_ms))
    }

    fn on_jump(&mut self, now_ms: u64) {
        self.phase = match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Running(mut round) => {
                round.bird = physics::jump(round.bird, self.config.jump_velocity);
                Phase::Running(round)
            }
            Phase::Idle | Phase::Finalized(_) => self.start_round(now_ms),
            Phase::GameOver(round) if self.leaderboard.qualifies(round.score) => {
                log::info!("score {} qualifies for the leaderboard", round.score);
                Phase::NameEntry {
                    round,
                    name: String::new(),
                }
            }
            Phase::GameOver(_) => self.start_round(now_ms),
            entry @ Phase::NameEntry { .. } => entry,
        };
    }

    fn on_text(&mut self, ch: char) {
        if let Phase::NameEntry { name, .. } = &mut self.phase {
            if name.chars().count() < MAX_NAME_LEN && leaderboard::is_printable(ch) {
                name.push(ch);
            }
        }
    }

    fn on_confirm(&mut self, outcome: &mut StepOutcome) {
        self.phase = match mem::replace(&mut self.phase, Phase::Idle) {
            Phase::NameEntry { round, name } => match PlayerName::parse(&name) {
                Ok(player) => {
                    log::info!("{} enters the leaderboard with {}", player.as_str(), round.score);
                    self.leaderboard.admit(player, round.score);
                    outcome.save_leaderboard = true;
                    Phase::Finalized(round)
                }
                Err(err) => {
                    log::info!("name rejected: {err}");
                    Phase::NameEntry { round, name }
                }
            },
            other => other,
        };
    }

    /// Raises the high score if `score` beats it.
    fn record_high_score(&mut self, score: u32) -> bool {
        if score > self.high_score {
            log::info!("new high score {score} (was {})", self.high_score);
            self.high_score = score;
            true
        } else {
            false
        }
    }
}
