use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// One of the six faces of the cube, in URFDBL order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Face {
    U,
    R,
    F,
    D,
    B,
    L,
}

impl Face {
    /// Every face in traversal order. `Face::ALL[f as usize] == f`.
    pub const ALL: [Self; 6] = {
        use Face::*;
        let v = [U, R, F, D, B, L];

        let mut i = 0;
        while i < v.len() {
            assert!(i == v[i] as usize);
            i += 1;
        }

        v
    };

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::B => 'B',
            Face::L => 'L',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'U' => Some(Face::U),
            'R' => Some(Face::R),
            'F' => Some(Face::F),
            'D' => Some(Face::D),
            'B' => Some(Face::B),
            'L' => Some(Face::L),
            _ => None,
        }
    }

    /// The face on the other side of the cube.
    pub fn opposite(self) -> Self {
        match self {
            Face::U => Face::D,
            Face::R => Face::L,
            Face::F => Face::B,
            Face::D => Face::U,
            Face::B => Face::F,
            Face::L => Face::R,
        }
    }

    /// Outward unit normal in a right handed frame where +x is R, +y is U
    /// and +z is F.
    pub(crate) fn normal(self) -> [i8; 3] {
        match self {
            Face::U => [0, 1, 0],
            Face::R => [1, 0, 0],
            Face::F => [0, 0, 1],
            Face::D => [0, -1, 0],
            Face::B => [0, 0, -1],
            Face::L => [-1, 0, 0],
        }
    }

    pub(crate) fn from_normal(normal: [i8; 3]) -> Option<Self> {
        Face::ALL.into_iter().find(|face| face.normal() == normal)
    }
}

impl Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Face {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Face::from_letter(letter).ok_or(()),
            _ => Err(()),
        }
    }
}

/// A sticker color. Colors are only tied to faces through the current
/// position of the center stickers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Red,
    Green,
    Yellow,
    Blue,
    Orange,
}

impl Color {
    pub const ALL: [Self; 6] = [
        Color::White,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Orange,
    ];

    /// The color every sticker of `face` carries on a solved cube.
    pub fn solved_on(face: Face) -> Self {
        match face {
            Face::U => Color::White,
            Face::R => Color::Red,
            Face::F => Color::Green,
            Face::D => Color::Yellow,
            Face::B => Color::Blue,
            Face::L => Color::Orange,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::White => "white",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Orange => "orange",
        };
        f.write_str(name)
    }
}
