use crate::model::side::Side;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Trick counts captured by each side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tally {
    pub a: u32,
    pub b: u32,
}

impl Tally {
    pub const fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    pub const fn tricks(&self, side: Side) -> u32 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    pub fn credit(&mut self, side: Side, tricks: u32) {
        match side {
            Side::A => self.a += tricks,
            Side::B => self.b += tricks,
        }
    }

    pub const fn gap(&self) -> u32 {
        self.a.abs_diff(self.b)
    }

    pub fn leader(&self) -> Option<Side> {
        match self.a.cmp(&self.b) {
            Ordering::Greater => Some(Side::A),
            Ordering::Less => Some(Side::B),
            Ordering::Equal => None,
        }
    }
}
