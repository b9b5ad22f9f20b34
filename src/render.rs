//! Terminal presentation: a half-block pixel buffer for the world and plain
//! text rows on top of it for menus and the leaderboard.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};

use crate::collision::Rect;
use crate::config::GameConfig;
use crate::game::{Game, Phase};
use crate::obstacle::Pipe;
use crate::physics::Bird;

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    const fn halved(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }

    fn term(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

const LETTERBOX: Rgb = Rgb(0, 0, 0);
const SKY_TOP: Rgb = Rgb(70, 120, 230);
const SKY_BOT: Rgb = Rgb(120, 170, 255);
const PIPE_L: Rgb = Rgb(0, 120, 0);
const PIPE_M: Rgb = Rgb(0, 180, 0);
const PIPE_R: Rgb = Rgb(0, 200, 0);
const PIPE_HI: Rgb = Rgb(0, 220, 0);
const CAP_DARK: Rgb = Rgb(0, 90, 0);
const BIRD_Y: Rgb = Rgb(255, 200, 0);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(255, 100, 0);
const WHITE: Rgb = Rgb(255, 255, 255);
const RED: Rgb = Rgb(255, 60, 60);
const GOLD: Rgb = Rgb(255, 215, 90);
const SHADOW: Rgb = Rgb(30, 30, 30);

// ── Pixel buffer with half-block rendering ──────────────────────────────────

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![LETTERBOX; w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, LETTERBOX);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn fill(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Queues the whole buffer; the caller flushes.
    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let rows = self.h / 2;
        if rows == 0 || self.w == 0 {
            return Ok(());
        }
        queue!(out, cursor::MoveTo(0, 0))?;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(top.term()))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(top.term()))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(bot.term()))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row < rows - 1 {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }
        queue!(out, style::ResetColor)
    }
}

// ── World to pixels ─────────────────────────────────────────────────────────

/// Uniform scale of the world into the buffer, centred with black bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn fit(pw: usize, ph: usize, config: &GameConfig) -> Self {
        let scale = (pw as f64 / config.screen_width).min(ph as f64 / config.screen_height);
        let width = config.screen_width * scale;
        let height = config.screen_height * scale;
        Self {
            scale,
            left: ((pw as f64 - width) / 2.0).floor(),
            top: ((ph as f64 - height) / 2.0).floor(),
            width,
            height,
        }
    }

    pub fn x(&self, wx: f64) -> i32 {
        (self.left + wx * self.scale).floor() as i32
    }

    pub fn y(&self, wy: f64) -> i32 {
        (self.top + wy * self.scale).floor() as i32
    }

    /// Pixel rectangle covering a world rectangle; never thinner than one
    /// pixel unless the world rectangle is empty.
    pub fn rect(&self, r: Rect) -> (i32, i32, i32, i32) {
        let x0 = self.x(r.x);
        let y0 = self.y(r.y);
        let x1 = self.x(r.x + r.w);
        let y1 = self.y(r.y + r.h);
        let min = |a: i32, b: i32, len: f64| if len > 0.0 { (b - a).max(1) } else { 0 };
        (x0, y0, min(x0, x1, r.w), min(y0, y1, r.h))
    }

    fn px(&self, world_len: f64) -> i32 {
        ((world_len * self.scale).round() as i32).max(1)
    }
}

// ── 3x5 bitmap digits ──────────────────────────────────────────────────────

#[rustfmt::skip]
const DIGITS: [[u8; 15]; 10] = [
    [1,1,1, 1,0,1, 1,0,1, 1,0,1, 1,1,1], // 0
    [0,1,0, 1,1,0, 0,1,0, 0,1,0, 1,1,1], // 1
    [1,1,1, 0,0,1, 1,1,1, 1,0,0, 1,1,1], // 2
    [1,1,1, 0,0,1, 0,1,1, 0,0,1, 1,1,1], // 3
    [1,0,1, 1,0,1, 1,1,1, 0,0,1, 0,0,1], // 4
    [1,1,1, 1,0,0, 1,1,1, 0,0,1, 1,1,1], // 5
    [1,1,1, 1,0,0, 1,1,1, 1,0,1, 1,1,1], // 6
    [1,1,1, 0,0,1, 0,1,0, 0,1,0, 0,1,0], // 7
    [1,1,1, 1,0,1, 1,1,1, 1,0,1, 1,1,1], // 8
    [1,1,1, 1,0,1, 1,1,1, 0,0,1, 1,1,1], // 9
];

fn draw_digit(buf: &mut PixelBuf, x: i32, y: i32, d: u8, fg: Rgb) {
    let glyph = &DIGITS[d as usize];
    for row in 0..5 {
        for col in 0..3 {
            if glyph[row * 3 + col] == 1 {
                let px = x + col as i32;
                let py = y + row as i32;
                buf.set(px + 1, py + 1, SHADOW);
                buf.set(px, py, fg);
            }
        }
    }
}

fn draw_number(buf: &mut PixelBuf, cx: i32, y: i32, n: u32, fg: Rgb) {
    let s = n.to_string();
    let total_w = s.len() as i32 * 4 - 1; // 3px per digit + 1px spacing
    let start_x = cx - total_w / 2;
    for (i, d) in s.bytes().enumerate() {
        draw_digit(buf, start_x + i as i32 * 4, y, d - b'0', fg);
    }
}

// ── Scene ───────────────────────────────────────────────────────────────────

/// Paints the world for the current phase into `buf`.
pub fn draw(game: &Game, now_ms: u64, buf: &mut PixelBuf) {
    let config = game.config();
    let view = Viewport::fit(buf.width(), buf.height(), config);

    buf.fill(LETTERBOX);
    draw_sky(buf, &view);

    match game.phase() {
        Phase::Idle => {
            let mut bird = Bird::spawn(config);
            bird.y += 20.0 * (now_ms as f64 * 0.005).sin();
            draw_bird(buf, &view, &bird, now_ms);
        }
        Phase::Running(round) => {
            for pipe in &round.pipes {
                draw_pipe(buf, &view, pipe, config.screen_height);
            }
            draw_bird(buf, &view, &round.bird, now_ms);
            let cx = view.x(config.screen_width / 2.0);
            draw_number(buf, cx, view.y(0.0) + 2, round.score, WHITE);
        }
        Phase::GameOver(round) | Phase::NameEntry { round, .. } | Phase::Finalized(round) => {
            for pipe in &round.pipes {
                draw_pipe(buf, &view, pipe, config.screen_height);
            }
            draw_bird(buf, &view, &round.bird, 0);
            darken(buf);
        }
    }
}

fn draw_sky(buf: &mut PixelBuf, view: &Viewport) {
    let (x, y, w, h) = (
        view.left as i32,
        view.top as i32,
        view.width.round() as i32,
        view.height.round() as i32,
    );
    for dy in 0..h {
        let t = (dy as u32 * 256 / h.max(1) as u32) as u16;
        buf.fill_rect(x, y + dy, w, 1, Rgb::lerp(SKY_TOP, SKY_BOT, t));
    }
}

fn draw_pipe(buf: &mut PixelBuf, view: &Viewport, pipe: &Pipe, screen_height: f64) {
    let cap = view.px(10.0);
    let lip = view.px(2.0);
    for (segment, cap_at_bottom) in [
        (pipe.top_segment(), true),
        (pipe.bottom_segment(screen_height), false),
    ] {
        let (x, y, w, h) = view.rect(segment);
        if w == 0 || h == 0 {
            continue;
        }
        for dx in 0..w {
            buf.fill_rect(x + dx, y, 1, h, pipe_shade(dx, w));
        }
        let cap_y = if cap_at_bottom { y + h - cap } else { y };
        for dx in -lip..(w + lip) {
            buf.fill_rect(x + dx, cap_y, 1, cap, pipe_shade(dx + lip, w + lip * 2));
        }
        buf.fill_rect(x - lip, if cap_at_bottom { y + h - 1 } else { y }, w + lip * 2, 1, CAP_DARK);
    }
}

fn draw_bird(buf: &mut PixelBuf, view: &Viewport, bird: &Bird, now_ms: u64) {
    let (x, y, w, h) = view.rect(bird.bounds());
    buf.fill_rect(x, y, w, h, BIRD_Y);
    buf.fill_rect(x + 1, y, w - 2, 1, BIRD_HI);

    // Wing beats while flying
    let wing_y = if (now_ms / 120) % 2 == 0 { y + h / 2 } else { y + h / 2 - 1 };
    buf.fill_rect(x, wing_y, (w / 2).max(1), (h / 3).max(1), BIRD_WING);

    // Eye
    let ex = x + w - (w / 3).max(1) - 1;
    let ey = y + (h / 4).max(1) - 1;
    buf.set(ex, ey, BIRD_EYE);
    buf.set(ex + 1, ey, BIRD_PUPIL);

    // Beak
    let beak = view.px(10.0);
    buf.fill_rect(x + w, y + h / 2 - 1, beak, 2, BIRD_BEAK);
}

fn darken(buf: &mut PixelBuf) {
    for p in buf.px.iter_mut() {
        *p = p.halved();
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

// ── Text ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub row: u16,
    pub text: String,
    pub fg: Rgb,
}

/// The menu text for the current phase, centred vertically in `rows`
/// terminal rows. Each line is centred horizontally by [`present`].
pub fn text_lines(game: &Game, now_ms: u64, rows: u16) -> Vec<TextLine> {
    let lines: Vec<(String, Rgb)> = match game.phase() {
        Phase::Idle => vec![
            ("FLAPPY".to_string(), GOLD),
            (String::new(), WHITE),
            (String::new(), WHITE),
            (String::new(), WHITE),
            (String::new(), WHITE),
            ("Press SPACE to start".to_string(), WHITE),
            (format!("Best: {}", game.high_score()), WHITE),
        ],
        Phase::Running(_) => Vec::new(),
        Phase::NameEntry { name, .. } => {
            let cursor = if now_ms % 1000 < 500 { "_" } else { " " };
            vec![
                ("You made the leaderboard!".to_string(), GOLD),
                ("Enter your name:".to_string(), WHITE),
                (String::new(), WHITE),
                (format!("[ {name}{cursor} ]"), WHITE),
                (String::new(), WHITE),
                ("Press ENTER to confirm".to_string(), WHITE),
            ]
        }
        Phase::GameOver(round) | Phase::Finalized(round) => {
            let mut lines = vec![
                ("GAME OVER".to_string(), RED),
                (format!("Score: {}", round.score), WHITE),
                (format!("Best: {}", game.high_score()), WHITE),
                (String::new(), WHITE),
                ("LEADERBOARD".to_string(), GOLD),
            ];
            let board = game.leaderboard();
            if board.is_empty() {
                lines.push(("No records yet".to_string(), WHITE));
            }
            for (i, entry) in board.entries().iter().enumerate() {
                lines.push((format!("{}. {} : {}", i + 1, entry.name, entry.score), WHITE));
            }
            lines.push((String::new(), WHITE));
            lines.push(("Press SPACE to continue".to_string(), WHITE));
            lines
        }
    };

    let first = rows.saturating_sub(lines.len() as u16) / 2;
    lines
        .into_iter()
        .enumerate()
        .filter(|(_, (text, _))| !text.is_empty())
        .map(|(i, (text, fg))| TextLine {
            row: first + i as u16,
            text,
            fg,
        })
        .filter(|line| line.row < rows)
        .collect()
}

/// Draws the buffer, then the text on top, then flushes.
pub fn present(out: &mut impl Write, buf: &PixelBuf, lines: &[TextLine], cols: u16) -> io::Result<()> {
    buf.render(out)?;
    for line in lines {
        let width = line.text.chars().count() as u16;
        let col = cols.saturating_sub(width) / 2;
        queue!(
            out,
            cursor::MoveTo(col, line.row),
            style::SetForegroundColor(line.fg.term()),
            style::SetBackgroundColor(SHADOW.term()),
            style::Print(&line.text),
            style::ResetColor,
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::{Leaderboard, LeaderboardEntry};
    use pretty_assertions::assert_eq;

    fn texts(lines: &[TextLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_viewport_letterboxes_wide_buffer() {
        let view = Viewport::fit(100, 60, &GameConfig::default());
        // 60 / 600 limits the scale; 40px of world centred in 100
        assert_eq!(view.x(0.0), 30);
        assert_eq!(view.x(400.0), 70);
        assert_eq!(view.y(0.0), 0);
        assert_eq!(view.y(600.0), 60);
    }

    #[test]
    fn test_viewport_rect_never_vanishes() {
        let view = Viewport::fit(40, 60, &GameConfig::default());
        let (_, _, w, h) = view.rect(Rect::new(100.0, 100.0, 2.0, 2.0));
        assert_eq!((w, h), (1, 1));
        let (_, _, w, _) = view.rect(Rect::new(100.0, 100.0, 0.0, 2.0));
        assert_eq!(w, 0);
    }

    #[test]
    fn test_draw_fills_letterbox_and_sky() {
        let game = Game::new(GameConfig::default(), 0, Leaderboard::default());
        let mut buf = PixelBuf::new(100, 60);
        draw(&game, 0, &mut buf);
        assert_eq!(buf.get(0, 0), LETTERBOX);
        assert_ne!(buf.get(50, 2), LETTERBOX);
    }

    #[test]
    fn test_draw_tolerates_tiny_buffer() {
        let game = Game::new(GameConfig::default(), 0, Leaderboard::default());
        let mut buf = PixelBuf::new(1, 1);
        draw(&game, 0, &mut buf);
        let mut out = Vec::new();
        present(&mut out, &buf, &[], 1).unwrap();
    }

    #[test]
    fn test_idle_text() {
        let game = Game::new(GameConfig::default(), 12, Leaderboard::default());
        let lines = text_lines(&game, 0, 24);
        assert_eq!(texts(&lines), vec!["FLAPPY", "Press SPACE to start", "Best: 12"]);
    }

    #[test]
    fn test_game_over_text_lists_board() {
        use crate::game::Event;
        use rand::SeedableRng;

        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
        let mut game = Game::new(GameConfig::default(), 0, Leaderboard::default());
        game.step(&[Event::Jump], 0, &mut rng);
        for _ in 0..100 {
            if !game.phase().is_running() {
                break;
            }
            game.step(&[], 0, &mut rng);
        }
        let lines = text_lines(&game, 0, 24);
        assert_eq!(
            texts(&lines),
            vec![
                "GAME OVER",
                "Score: 0",
                "Best: 0",
                "LEADERBOARD",
                "No records yet",
                "Press SPACE to continue"
            ]
        );
    }

    #[test]
    fn test_lines_stay_inside_screen() {
        let game = Game::new(GameConfig::default(), 0, Leaderboard::default());
        assert!(text_lines(&game, 0, 3).iter().all(|l| l.row < 3));
    }

    #[test]
    fn test_present_writes_text() {
        let board = Leaderboard::from_entries(
            vec![LeaderboardEntry {
                name: "小鸟".to_string(),
                score: 3,
            }],
            5,
        );
        let game = Game::new(GameConfig::default(), 3, board);
        let buf = PixelBuf::new(20, 10);
        let mut out = Vec::new();
        present(&mut out, &buf, &text_lines(&game, 0, 24), 30).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("Press SPACE to start"));
    }
}
