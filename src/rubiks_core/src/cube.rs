use std::sync::LazyLock;

use crate::{
    Error,
    face::{Color, Face},
    formula::{Formula, Move},
    topology::{self, CUBIE_COUNT, CUBIE_FACES, CubieId, CubieKind, FACELET_COUNT},
};

/// One colored facet of a cubie. The face never changes for a given cubie
/// slot, only the color does.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Sticker {
    pub face: Face,
    pub color: Color,
}

/// A physical piece, with its stickers in the order given by
/// [`topology::cubie_faces`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Cubie {
    Center([Sticker; 1]),
    Edge([Sticker; 2]),
    Corner([Sticker; 3]),
}

impl Cubie {
    fn from_faces(faces: &[Face], mut color_of: impl FnMut(Face) -> Color) -> Cubie {
        let sticker = |i: usize| Sticker {
            face: faces[i],
            color: color_of(faces[i]),
        };

        match faces.len() {
            1 => Cubie::Center(std::array::from_fn(sticker)),
            2 => Cubie::Edge(std::array::from_fn(sticker)),
            _ => Cubie::Corner(std::array::from_fn(sticker)),
        }
    }

    pub fn stickers(&self) -> &[Sticker] {
        match self {
            Cubie::Center(stickers) => stickers,
            Cubie::Edge(stickers) => stickers,
            Cubie::Corner(stickers) => stickers,
        }
    }

    pub fn kind(&self) -> CubieKind {
        match self {
            Cubie::Center(_) => CubieKind::Center,
            Cubie::Edge(_) => CubieKind::Edge,
            Cubie::Corner(_) => CubieKind::Corner,
        }
    }

    /// The color of the sticker facing `face`, if this cubie touches it.
    pub fn color_on(&self, face: Face) -> Option<Color> {
        self.stickers()
            .iter()
            .find(|sticker| sticker.face == face)
            .map(|sticker| sticker.color)
    }
}

/// For every face, where each sticker slot ends up after one clockwise
/// quarter turn of that face.
static QUARTER_TURNS: LazyLock<[[usize; FACELET_COUNT]; 6]> =
    LazyLock::new(|| Face::ALL.map(quarter_turn));

fn dot(a: [i8; 3], b: [i8; 3]) -> i8 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Rotate `v` a quarter turn clockwise as seen looking down `axis` from
/// outside the cube: `axis (axis · v) - axis × v`.
fn rotate(v: [i8; 3], axis: [i8; 3]) -> [i8; 3] {
    let [ax, ay, az] = axis;
    let [vx, vy, vz] = v;
    let along = dot(axis, v);
    let cross = [ay * vz - az * vy, az * vx - ax * vz, ax * vy - ay * vx];

    [
        ax * along - cross[0],
        ay * along - cross[1],
        az * along - cross[2],
    ]
}

fn quarter_turn(turning: Face) -> [usize; FACELET_COUNT] {
    let axis = turning.normal();

    std::array::from_fn(|index| {
        let (position, facing) = topology::facelet_geometry(index);
        if dot(position, axis) != 1 {
            return index;
        }

        let facing = Face::from_normal(rotate(facing.normal(), axis))
            .expect("a quarter turn maps face normals onto face normals");
        topology::facelet_index(rotate(position, axis), facing)
    })
}

/// The full state of the puzzle: the color currently on every sticker slot.
///
/// Cubies are derived from the slots through the static topology, so two
/// states are equal exactly when every cubie carries the same colors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubeState {
    facelets: [Color; FACELET_COUNT],
}

impl Default for CubeState {
    fn default() -> Self {
        CubeState::solved()
    }
}

impl CubeState {
    /// Every sticker carries the solved color of its face.
    pub fn solved() -> CubeState {
        CubeState {
            facelets: std::array::from_fn(|index| Color::solved_on(Face::ALL[index / 9])),
        }
    }

    pub(crate) fn from_facelets(facelets: [Color; FACELET_COUNT]) -> CubeState {
        CubeState { facelets }
    }

    pub(crate) fn facelets(&self) -> &[Color; FACELET_COUNT] {
        &self.facelets
    }

    /// The nine colors of `face`, row-major.
    pub fn face(&self, face: Face) -> [Color; 9] {
        let start = face as usize * 9;
        std::array::from_fn(|i| self.facelets[start + i])
    }

    /// # Errors
    ///
    /// `InvalidTopologyIndex` if `index` is not below nine.
    pub fn color_at(&self, face: Face, index: usize) -> Result<Color, Error> {
        if index >= 9 {
            return Err(Error::InvalidTopologyIndex { index, bound: 9 });
        }

        Ok(self.facelets[face as usize * 9 + index])
    }

    /// # Errors
    ///
    /// `InvalidTopologyIndex` if `id` is not a cubie.
    pub fn cubie(&self, id: CubieId) -> Result<Cubie, Error> {
        let faces = topology::cubie_faces(id)?;
        Ok(Cubie::from_faces(faces, |face| {
            self.facelets[topology::slot_of(id, face)]
        }))
    }

    pub fn cubies(&self) -> [Cubie; CUBIE_COUNT] {
        std::array::from_fn(|id| {
            Cubie::from_faces(CUBIE_FACES[id], |face| {
                self.facelets[topology::slot_of(id, face)]
            })
        })
    }

    /// The face whose center currently carries `color`. Looked up from the
    /// live centers on every call.
    ///
    /// # Errors
    ///
    /// `ColorNotFound` if no center carries `color`.
    pub fn which_face_of_color(&self, color: Color) -> Result<Face, Error> {
        Face::ALL
            .into_iter()
            .find(|&face| self.facelets[face as usize * 9 + 4] == color)
            .ok_or(Error::ColorNotFound(color))
    }

    pub fn apply_move(&mut self, mv: Move) {
        let permutation = &QUARTER_TURNS[mv.face as usize];

        for _ in 0..mv.turn.quarter_turns() {
            let before = self.facelets;
            for (from, &to) in permutation.iter().enumerate() {
                self.facelets[to] = before[from];
            }
        }
    }

    pub fn apply(&mut self, formula: &Formula) {
        for &mv in formula {
            self.apply_move(mv);
        }
    }

    /// Parse and apply `formula` one token at a time. On an invalid token
    /// every token before it stays applied.
    ///
    /// # Errors
    ///
    /// `InvalidMoveToken` for the first token outside the move grammar.
    pub fn apply_str(&mut self, formula: &str) -> Result<(), Error> {
        for token in formula.split_whitespace() {
            self.apply_move(token.parse()?);
        }

        Ok(())
    }

    /// Every face shows a single color. Physical reachability is not
    /// checked.
    pub fn is_solved(&self) -> bool {
        Face::ALL.into_iter().all(|face| {
            let [first, rest @ ..] = self.face(face);
            rest.iter().all(|&color| color == first)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrambled(formula: &str) -> CubeState {
        let mut cube = CubeState::solved();
        cube.apply_str(formula).unwrap();
        cube
    }

    #[test]
    fn solved_is_solved() {
        let cube = CubeState::solved();
        assert!(cube.is_solved());
        for face in Face::ALL {
            assert_eq!(cube.face(face), [Color::solved_on(face); 9]);
            assert_eq!(cube.which_face_of_color(Color::solved_on(face)), Ok(face));
        }
    }

    #[test]
    fn quarter_turns_are_permutations() {
        for permutation in QUARTER_TURNS.iter() {
            let mut seen = [false; FACELET_COUNT];
            for &to in permutation {
                assert!(!seen[to]);
                seen[to] = true;
            }
            // 8 on the face plus 12 around it
            let moved = permutation
                .iter()
                .enumerate()
                .filter(|(from, to)| from != *to)
                .count();
            assert_eq!(moved, 20);
        }
    }

    #[test]
    fn u_moves_front_row_to_left() {
        let cube = scrambled("U");
        assert_eq!(&cube.face(Face::L)[..3], &[Color::Green; 3]);
        assert_eq!(&cube.face(Face::F)[..3], &[Color::Red; 3]);
        assert_eq!(&cube.face(Face::R)[..3], &[Color::Blue; 3]);
        assert_eq!(&cube.face(Face::B)[..3], &[Color::Orange; 3]);
        assert_eq!(&cube.face(Face::F)[3..], &[Color::Green; 6]);
        assert_eq!(cube.face(Face::U), [Color::White; 9]);
    }

    #[test]
    fn r_moves_front_column_up() {
        let cube = scrambled("R");
        for row in 0..3 {
            assert_eq!(cube.color_at(Face::U, row * 3 + 2), Ok(Color::Green));
            assert_eq!(cube.color_at(Face::F, row * 3 + 2), Ok(Color::Yellow));
            assert_eq!(cube.color_at(Face::B, row * 3), Ok(Color::White));
            assert_eq!(cube.color_at(Face::D, row * 3 + 2), Ok(Color::Blue));
        }
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        for face in Face::ALL {
            let mut cube = scrambled("R U F");
            let before = cube.clone();
            for _ in 0..4 {
                cube.apply_move(Move::new(face, crate::Turn::Clockwise));
            }
            assert_eq!(cube, before);
        }
    }

    #[test]
    fn single_turn_unsolves() {
        for mv in Move::all() {
            let mut cube = CubeState::solved();
            cube.apply_move(mv);
            assert!(!cube.is_solved(), "{mv}");
        }
    }

    #[test]
    fn sexy_move_has_order_six() {
        let mut cube = CubeState::solved();
        for i in 1..=6 {
            cube.apply_str("R U R' U'").unwrap();
            assert_eq!(cube.is_solved(), i == 6);
        }
    }

    #[test]
    fn centers_never_move() {
        let cube = scrambled("R U F' D2 B L' U2 F R'");
        for face in Face::ALL {
            assert_eq!(cube.face(face)[4], Color::solved_on(face));
        }
    }

    #[test]
    fn partial_application_keeps_prefix() {
        let mut cube = CubeState::solved();
        assert_eq!(
            cube.apply_str("R U Q F"),
            Err(Error::InvalidMoveToken("Q".to_owned()))
        );
        assert_eq!(cube, scrambled("R U"));
    }

    #[test]
    fn cubies_follow_topology() {
        let cube = scrambled("F R2 D'");
        let cubies = cube.cubies();
        for (id, cubie) in cubies.iter().enumerate() {
            assert_eq!(Ok(*cubie), cube.cubie(id));
            assert_eq!(Ok(cubie.kind()), topology::cubie_kind(id));
        }
        assert_eq!(
            CubeState::solved().cubie(18).unwrap(),
            Cubie::Corner([
                Sticker {
                    face: Face::U,
                    color: Color::White
                },
                Sticker {
                    face: Face::R,
                    color: Color::Red
                },
                Sticker {
                    face: Face::F,
                    color: Color::Green
                },
            ])
        );
        assert!(cube.cubie(26).is_err());
    }

    #[test]
    fn color_on_follows_turns() {
        // After F the UF slot holds the old FL edge
        let cube = scrambled("F");
        let uf = cube.cubie(7).unwrap();
        assert_eq!(uf.color_on(Face::U), Some(Color::Orange));
        assert_eq!(uf.color_on(Face::F), Some(Color::Green));
        assert_eq!(uf.color_on(Face::D), None);
        assert_eq!(cube.cubie(2).unwrap().color_on(Face::F), Some(Color::Green));
    }

    #[test]
    fn missing_center_color() {
        let mut facelets = *CubeState::solved().facelets();
        facelets[4] = Color::Red;
        let cube = CubeState::from_facelets(facelets);
        assert_eq!(
            cube.which_face_of_color(Color::White),
            Err(Error::ColorNotFound(Color::White))
        );
        assert_eq!(cube.which_face_of_color(Color::Red), Ok(Face::U));
    }
}
