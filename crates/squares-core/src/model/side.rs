use core::fmt;
use serde::{Deserialize, Serialize};

/// One of the two partnerships at the table.
///
/// Side A plays the cards at even positions of the played sequence and is the
/// maximizing side for search; side B plays the odd positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Side {
    A = 0,
    B = 1,
}

impl Side {
    pub const LOOP: [Side; 2] = [Side::A, Side::B];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Side whose turn it is after `played` cards have hit the table.
    pub const fn to_move(played: usize) -> Side {
        if played % 2 == 0 { Side::A } else { Side::B }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::A => "A",
            Side::B => "B",
        };
        f.write_str(name)
    }
}
