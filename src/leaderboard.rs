//! Top-N table of named scores.

use serde::{Deserialize, Serialize};
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::error::NameError;

pub const DEFAULT_CAPACITY: usize = 5;
pub const MAX_NAME_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

/// A confirmed player name: trimmed, non-empty, at most [`MAX_NAME_LEN`]
/// printable characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NameError::Empty);
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(NameError::TooLong);
        }
        if !trimmed.chars().all(is_printable) {
            return Err(NameError::NotPrintable);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Whether `ch` shows up as a glyph. Plain space is the only separator that
/// counts; control, format, private-use and unassigned code points do not.
pub fn is_printable(ch: char) -> bool {
    match get_general_category(ch) {
        GeneralCategory::SpaceSeparator => ch == ' ',
        GeneralCategory::Control
        | GeneralCategory::Format
        | GeneralCategory::PrivateUse
        | GeneralCategory::Unassigned
        | GeneralCategory::LineSeparator
        | GeneralCategory::ParagraphSeparator => false,
        _ => true,
    }
}

/// Entries ordered by score, highest first. Equal scores keep the order in
/// which they were admitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
    capacity: usize,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Leaderboard {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Builds a table from arbitrary entries, sorting and truncating them.
    pub fn from_entries(entries: Vec<LeaderboardEntry>, capacity: usize) -> Self {
        let mut board = Self { entries, capacity };
        board.normalize();
        board
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn min_score(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.score).min()
    }

    /// Whether a finished run deserves a name prompt. Ties with the lowest
    /// entry of a full table do not qualify.
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        match self.min_score() {
            _ if self.entries.len() < self.capacity => true,
            Some(min) => score > min,
            None => false,
        }
    }

    /// Inserts the entry, re-sorts and drops whatever falls off the end.
    pub fn admit(&mut self, name: PlayerName, score: u32) {
        self.entries.push(LeaderboardEntry {
            name: name.into_string(),
            score,
        });
        self.normalize();
    }

    fn normalize(&mut self) {
        // stable: ties keep insertion order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(name: &str, score: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score,
        }
    }

    fn name(s: &str) -> PlayerName {
        PlayerName::parse(s).unwrap()
    }

    fn full_board() -> Leaderboard {
        Leaderboard::from_entries(
            vec![
                entry("A", 50),
                entry("B", 40),
                entry("C", 30),
                entry("D", 20),
                entry("E", 10),
            ],
            5,
        )
    }

    #[test]
    fn test_admission_drops_lowest_when_full() {
        let mut board = full_board();
        board.admit(name("F"), 35);
        assert_eq!(
            board.entries(),
            &[
                entry("A", 50),
                entry("B", 40),
                entry("F", 35),
                entry("C", 30),
                entry("D", 20),
            ]
        );
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut board = Leaderboard::new(5);
        board.admit(name("first"), 20);
        board.admit(name("second"), 20);
        board.admit(name("top"), 30);
        let names: Vec<&str> = board.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["top", "first", "second"]);
    }

    #[test]
    fn test_size_and_order_hold_after_many_admissions() {
        let mut board = Leaderboard::new(5);
        for (i, score) in [3, 9, 1, 9, 4, 7, 2, 8, 8, 5].into_iter().enumerate() {
            board.admit(name(&format!("p{i}")), score);
            assert!(board.len() <= 5);
            assert!(board.entries().windows(2).all(|w| w[0].score >= w[1].score));
        }
        assert_eq!(board.min_score(), Some(7));
    }

    #[test]
    fn test_qualifies_rules() {
        let empty = Leaderboard::new(5);
        assert!(!empty.qualifies(0));
        assert!(empty.qualifies(1));

        let full = full_board();
        assert!(!full.qualifies(10));
        assert!(full.qualifies(11));
        assert!(!full.qualifies(0));
    }

    #[test]
    fn test_qualifies_when_not_full_regardless_of_min() {
        let board = Leaderboard::from_entries(vec![entry("A", 50)], 5);
        assert!(board.qualifies(1));
    }

    #[test]
    fn test_from_entries_sorts_and_truncates() {
        let board = Leaderboard::from_entries(
            vec![entry("low", 1), entry("high", 9), entry("mid", 5)],
            2,
        );
        assert_eq!(board.entries(), &[entry("high", 9), entry("mid", 5)]);
    }

    #[test]
    fn test_player_name_is_trimmed() {
        assert_eq!(name("  bob ").as_str(), "bob");
        assert_eq!(name("小鸟飞飞").as_str(), "小鸟飞飞");
    }

    #[test]
    fn test_player_name_rejections() {
        assert_eq!(PlayerName::parse(""), Err(NameError::Empty));
        assert_eq!(PlayerName::parse("   "), Err(NameError::Empty));
        assert_eq!(PlayerName::parse("abcdefghijk"), Err(NameError::TooLong));
        assert_eq!(PlayerName::parse("a\tb"), Err(NameError::NotPrintable));
        assert!(PlayerName::parse("abcdefghij").is_ok());
    }

    #[test]
    fn test_invisible_names_are_rejected() {
        assert_eq!(PlayerName::parse("\u{200B}"), Err(NameError::NotPrintable));
        assert_eq!(PlayerName::parse("a\u{00A0}b"), Err(NameError::NotPrintable));
        assert_eq!(PlayerName::parse("a\u{2028}b"), Err(NameError::NotPrintable));
        // surrounding Unicode whitespace is trimmed like ASCII space
        assert_eq!(PlayerName::parse("\u{00A0}\u{3000}"), Err(NameError::Empty));
    }

    #[test]
    fn test_printable_characters() {
        for ch in ['a', 'Z', '7', ' ', '!', 'ë', '小', '鸟'] {
            assert!(is_printable(ch), "{ch:?}");
        }
        for ch in ['\t', '\u{7}', '\u{200B}', '\u{00A0}', '\u{3000}', '\u{2029}', '\u{FEFF}', '\u{E000}'] {
            assert!(!is_printable(ch), "{ch:?}");
        }
    }
}
