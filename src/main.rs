use crossterm::{
    cursor,
    event::{self, Event as TermEvent},
    execute, terminal,
};
use flappy_leaderboard::{
    config::{GameConfig, StoragePaths},
    game::{Game, StepOutcome},
    input, logging,
    render::{self, PixelBuf},
    storage::{HighScoreFile, LeaderboardFile},
};
use std::io::{self, Write, stdout};
use std::time::{Duration, Instant};

struct Records {
    high_score: HighScoreFile,
    leaderboard: LeaderboardFile,
}

fn main() -> io::Result<()> {
    let paths = StoragePaths::default();
    let config = GameConfig::default();

    if let Err(e) = logging::init(&paths.log) {
        eprintln!("logging disabled: cannot open {}: {e}", paths.log.display());
    }

    let records = Records {
        high_score: HighScoreFile::new(&paths.high_score),
        leaderboard: LeaderboardFile::new(&paths.leaderboard, config.leaderboard_capacity),
    };
    let high_score = records.high_score.load();
    let leaderboard = records.leaderboard.load();
    log::info!(
        "starting with high score {high_score} and {} leaderboard entries",
        leaderboard.len()
    );
    let mut game = Game::new(config, high_score, leaderboard);

    let guard = TerminalGuard::enter()?;
    let result = run(&mut stdout(), &mut game, &records);
    let restored = guard.restore();
    result.and(restored)
}

/// Raw mode plus the alternate screen. Dropping the guard without calling
/// [`TerminalGuard::restore`] still puts the terminal back, so early returns
/// and panics do not leave the shell in raw mode.
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard { active: true };
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap
        )?;
        Ok(guard)
    }

    fn restore(mut self) -> io::Result<()> {
        self.active = false;
        restore_terminal()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = restore_terminal() {
                log::warn!("could not restore the terminal: {e}");
            }
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    // both steps run even when the first fails
    first_error([
        execute!(
            stdout(),
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap
        ),
        terminal::disable_raw_mode(),
    ])
}

fn first_error(results: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    results.into_iter().fold(Ok(()), |acc, r| acc.and(r))
}

fn run(out: &mut impl Write, game: &mut Game, records: &Records) -> io::Result<()> {
    let (mut cols, mut rows) = terminal::size()?;
    let mut buf = PixelBuf::new(cols as usize, rows as usize * 2);
    let mut rng = rand::thread_rng();

    let clock = Instant::now();
    let frame_dur = game.config().frame_duration();

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.elapsed().as_millis() as u64;

        // Input: each key is applied before the next is translated, so a
        // jump that opens name entry turns the following keys into text.
        let mut outcome = StepOutcome::default();
        while !outcome.quit && event::poll(Duration::ZERO)? {
            match event::read()? {
                TermEvent::Key(key) => {
                    if let Some(ev) = input::translate(key, game.accepts_text()) {
                        outcome.absorb(game.handle(ev, now_ms));
                    }
                }
                TermEvent::Resize(c, r) => {
                    cols = c;
                    rows = r;
                    buf.resize(c as usize, r as usize * 2);
                }
                _ => {}
            }
        }

        // Update
        if !outcome.quit {
            outcome.absorb(game.tick(now_ms, &mut rng));
        }
        if outcome.save_high_score {
            if let Err(e) = records.high_score.save(game.high_score()) {
                log::warn!("{e}; high score kept in memory only");
            }
        }
        if outcome.save_leaderboard {
            if let Err(e) = records.leaderboard.save(game.leaderboard()) {
                log::warn!("{e}; leaderboard kept in memory only");
            }
        }
        if outcome.quit {
            log::info!("quit");
            return Ok(());
        }

        // Render
        render::draw(game, now_ms, &mut buf);
        render::present(out, &buf, &render::text_lines(game, now_ms, rows), cols)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}
