//! Face-turn tokens and formulas: parsing, printing, random generation and
//! simplification.

use std::{fmt::Display, str::FromStr};

use fastrand::Rng;
use itertools::Itertools;

use crate::{Error, face::Face};

/// How far a face is turned, viewed from outside that face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Turn {
    /// 90° clockwise, written without a suffix.
    Clockwise,
    /// 180°, written `2`.
    Double,
    /// 90° counter-clockwise, written `'`.
    CounterClockwise,
}

impl Turn {
    pub const ALL: [Self; 3] = [Turn::Clockwise, Turn::CounterClockwise, Turn::Double];

    pub fn quarter_turns(self) -> u8 {
        match self {
            Turn::Clockwise => 1,
            Turn::Double => 2,
            Turn::CounterClockwise => 3,
        }
    }

    /// `None` for a multiple of four quarter turns.
    pub fn from_quarter_turns(quarter_turns: u8) -> Option<Self> {
        match quarter_turns % 4 {
            1 => Some(Turn::Clockwise),
            2 => Some(Turn::Double),
            3 => Some(Turn::CounterClockwise),
            _ => None,
        }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::Double => Turn::Double,
            Turn::CounterClockwise => Turn::Clockwise,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::Double => "2",
            Turn::CounterClockwise => "'",
        }
    }
}

/// A single face-turn token such as `R`, `U'` or `F2`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    pub fn new(face: Face, turn: Turn) -> Move {
        Move { face, turn }
    }

    /// All 18 legal tokens.
    pub fn all() -> impl Iterator<Item = Move> {
        Face::ALL
            .into_iter()
            .cartesian_product(Turn::ALL)
            .map(|(face, turn)| Move { face, turn })
    }

    #[must_use]
    pub fn inverse(self) -> Move {
        Move {
            face: self.face,
            turn: self.turn.inverse(),
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.face, self.turn.suffix())
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMoveToken(s.to_owned());

        let mut chars = s.chars();
        let face = chars.next().and_then(Face::from_letter).ok_or_else(invalid)?;
        let turn = match (chars.next(), chars.next()) {
            (None, _) => Turn::Clockwise,
            (Some('\''), None) => Turn::CounterClockwise,
            (Some('2'), None) => Turn::Double,
            _ => return Err(invalid()),
        };

        Ok(Move { face, turn })
    }
}

/// An ordered sequence of moves. The empty formula is the identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Formula(Vec<Move>);

impl Formula {
    pub fn new(moves: Vec<Move>) -> Formula {
        Formula(moves)
    }

    pub fn identity() -> Formula {
        Formula(Vec::new())
    }

    pub fn moves(&self) -> &[Move] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `length` tokens drawn uniformly and independently from the 18 legal
    /// tokens. Consecutive turns of the same face are kept.
    pub fn random(rng: &mut Rng, length: usize) -> Formula {
        let all = Move::all().collect_vec();
        Formula((0..length).map(|_| all[rng.usize(..all.len())]).collect())
    }

    /// Merge runs of adjacent turns of the same face, dropping those that
    /// cancel out. The result never has two adjacent turns of one face.
    #[must_use]
    pub fn optimize(&self) -> Formula {
        let mut out: Vec<Move> = Vec::with_capacity(self.0.len());

        for &next in &self.0 {
            match out.last() {
                Some(&last) if last.face == next.face => {
                    out.pop();
                    let sum = last.turn.quarter_turns() + next.turn.quarter_turns();
                    if let Some(turn) = Turn::from_quarter_turns(sum) {
                        out.push(Move::new(next.face, turn));
                    }
                }
                _ => out.push(next),
            }
        }

        Formula(out)
    }

    /// The formula that undoes this one.
    #[must_use]
    pub fn inverse(&self) -> Formula {
        Formula(self.0.iter().rev().map(|mv| mv.inverse()).collect())
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

impl FromStr for Formula {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace().map(str::parse).collect()
    }
}

impl FromIterator<Move> for Formula {
    fn from_iter<T: IntoIterator<Item = Move>>(iter: T) -> Self {
        Formula(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Formula {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formula(s: &str) -> Formula {
        s.parse().unwrap()
    }

    #[test]
    fn parse_and_print() {
        let f = formula("R U R' U' F2");
        assert_eq!(f.len(), 5);
        assert_eq!(f.moves()[2], Move::new(Face::R, Turn::CounterClockwise));
        assert_eq!(f.to_string(), "R U R' U' F2");
        assert_eq!(formula("  U\tD2\n").to_string(), "U D2");
    }

    #[test]
    fn empty_is_identity() {
        assert_eq!(formula(""), Formula::identity());
        assert_eq!(formula("   ").to_string(), "");
    }

    #[test]
    fn rejects_bad_tokens() {
        for bad in ["X", "u", "R3", "R'2", "R2'", "RU", "'"] {
            assert_eq!(
                bad.parse::<Move>(),
                Err(Error::InvalidMoveToken(bad.to_owned())),
                "{bad}"
            );
        }
        assert_eq!(
            "R U X".parse::<Formula>(),
            Err(Error::InvalidMoveToken("X".to_owned()))
        );
    }

    #[test]
    fn eighteen_tokens() {
        let all = Move::all().collect_vec();
        assert_eq!(all.len(), 18);
        assert_eq!(all.iter().unique().count(), 18);
    }

    #[test]
    fn optimize_merges_same_face_runs() {
        assert_eq!(formula("U U").optimize(), formula("U2"));
        assert_eq!(formula("U U'").optimize(), Formula::identity());
        assert_eq!(formula("U2 U'").optimize(), formula("U"));
        assert_eq!(formula("U U U").optimize(), formula("U'"));
        assert_eq!(formula("R U U' R").optimize(), formula("R2"));
        assert_eq!(formula("R U D U'").optimize(), formula("R U D U'"));
        assert_eq!(formula("F R R2 R F'").optimize(), Formula::identity());
    }

    #[test]
    fn optimize_is_idempotent() {
        let mut rng = Rng::with_seed(7);
        for length in 0..40 {
            let f = Formula::random(&mut rng, length);
            let once = f.optimize();
            assert!(once.len() <= f.len());
            assert_eq!(once.optimize(), once);
            assert!(
                once.moves()
                    .iter()
                    .tuple_windows()
                    .all(|(a, b)| a.face != b.face)
            );
        }
    }

    #[test]
    fn inverse_reverses_and_inverts() {
        assert_eq!(formula("R U F2 L'").inverse(), formula("L F2 U' R'"));
        assert_eq!(Formula::identity().inverse(), Formula::identity());
    }

    #[test]
    fn random_has_requested_length() {
        let mut rng = Rng::with_seed(1);
        assert_eq!(Formula::random(&mut rng, 0), Formula::identity());
        assert_eq!(Formula::random(&mut rng, 25).len(), 25);
    }
}
