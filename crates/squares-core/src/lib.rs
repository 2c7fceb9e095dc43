#![deny(warnings)]
//! Card model and round rules for the square-sum trick game.
pub mod game;
pub mod model;
