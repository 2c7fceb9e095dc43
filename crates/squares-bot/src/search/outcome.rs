use squares_core::model::score::Tally;
use squares_core::model::side::Side;

/// Result of a searched line, always expressed for side A unless flipped
/// with [`Outcome::relative_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Outcome {
    Loss = -1,
    Draw = 0,
    Win = 1,
}

impl Outcome {
    pub fn from_tally(tally: Tally) -> Self {
        match tally.leader() {
            Some(Side::A) => Outcome::Win,
            Some(Side::B) => Outcome::Loss,
            None => Outcome::Draw,
        }
    }

    pub const fn score(self) -> i32 {
        self as i8 as i32
    }

    pub const fn flip(self) -> Self {
        match self {
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
            Outcome::Win => Outcome::Loss,
        }
    }

    /// Re-expresses an A-relative outcome from the point of view of `side`.
    pub const fn relative_to(self, side: Side) -> Self {
        match side {
            Side::A => self,
            Side::B => self.flip(),
        }
    }

    pub const fn is_decisive(self) -> bool {
        !matches!(self, Outcome::Draw)
    }
}
