use core::fmt;

/// Number of distinct ranks in the 40-card deck.
pub const RANK_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Ace = 9,
}

impl Rank {
    pub const ORDERED: [Rank; RANK_COUNT] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Ace,
    ];

    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Table value of the rank. The ace sits last in the ordering but counts
    /// as the lowest card, so it is pulled down to 1.
    pub const fn value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            other => other as u8 + 2,
        }
    }

    /// Zero-based bucket shared by every card of equal value.
    pub const fn bucket(self) -> usize {
        self.value() as usize - 1
    }

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rank::Ace),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            _ => None,
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "A" | "a" | "1" => Some(Rank::Ace),
            "10" | "T" | "t" => Some(Rank::Ten),
            other => other
                .parse::<u8>()
                .ok()
                .filter(|value| (2..=9).contains(value))
                .and_then(Rank::from_value),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Ace => "A",
        };
        f.write_str(text)
    }
}
