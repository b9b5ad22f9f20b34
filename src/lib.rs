//! A Flappy Bird clone for the terminal with a persisted high score and a
//! top-5 leaderboard.
//!
//! The simulation ([`game`], [`physics`], [`obstacle`], [`collision`],
//! [`leaderboard`]) is free of I/O. [`storage`] owns the on-disk records and
//! [`render`] turns a [`game::Game`] into terminal output.

pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod logging;
pub mod obstacle;
pub mod physics;
pub mod render;
pub mod storage;
