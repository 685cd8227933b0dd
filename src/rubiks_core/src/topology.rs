//! Static structure of the cube: which cubie owns each of the 54 sticker
//! slots and which faces every cubie touches.
//!
//! Sticker slots are numbered `face * 9 + row * 3 + col` with faces in
//! URFDBL order. Each face is read row-major as seen from outside the cube:
//! U with B at the top, D with F at the top, and the four side faces with U
//! at the top.

use crate::{Error, face::Face};

pub type CubieId = usize;

pub const CUBIE_COUNT: usize = 26;
pub const FACELET_COUNT: usize = 54;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CubieKind {
    Center,
    Edge,
    Corner,
}

/// Faces touched by every cubie. Centers occupy ids 0..6, edges 6..18 and
/// corners 18..26.
pub(crate) const CUBIE_FACES: [&[Face]; CUBIE_COUNT] = {
    use Face::*;
    [
        &[U],
        &[R],
        &[F],
        &[D],
        &[B],
        &[L],
        &[U, R],
        &[U, F],
        &[U, L],
        &[U, B],
        &[D, R],
        &[D, F],
        &[D, L],
        &[D, B],
        &[F, R],
        &[F, L],
        &[B, L],
        &[B, R],
        &[U, R, F],
        &[U, F, L],
        &[U, L, B],
        &[U, B, R],
        &[D, F, R],
        &[D, L, F],
        &[D, B, L],
        &[D, R, B],
    ]
};

const CUBIE_NAMES: [&str; CUBIE_COUNT] = [
    "U", "R", "F", "D", "B", "L", "UR", "UF", "UL", "UB", "DR", "DF", "DL", "DB", "FR", "FL", "BL",
    "BR", "URF", "UFL", "ULB", "UBR", "DFR", "DLF", "DBL", "DRB",
];

/// The cubie owning each sticker slot.
#[rustfmt::skip]
const FACELET_CUBIE: [u8; FACELET_COUNT] = [
    // U
    20, 9, 21,
    8, 0, 6,
    19, 7, 18,
    // R
    18, 6, 21,
    14, 1, 17,
    22, 10, 25,
    // F
    19, 7, 18,
    15, 2, 14,
    23, 11, 22,
    // D
    23, 11, 22,
    12, 3, 10,
    24, 13, 25,
    // B
    21, 9, 20,
    17, 4, 16,
    25, 13, 24,
    // L
    20, 8, 19,
    16, 5, 15,
    24, 12, 23,
];

fn check_cubie(id: CubieId) -> Result<(), Error> {
    if id < CUBIE_COUNT {
        Ok(())
    } else {
        Err(Error::InvalidTopologyIndex {
            index: id,
            bound: CUBIE_COUNT,
        })
    }
}

/// The faces touched by a cubie, in the order its stickers are stored.
///
/// # Errors
///
/// `InvalidTopologyIndex` if `id` is not below [`CUBIE_COUNT`].
pub fn cubie_faces(id: CubieId) -> Result<&'static [Face], Error> {
    check_cubie(id)?;
    Ok(CUBIE_FACES[id])
}

/// # Errors
///
/// `InvalidTopologyIndex` if `id` is not below [`CUBIE_COUNT`].
pub fn cubie_kind(id: CubieId) -> Result<CubieKind, Error> {
    Ok(match cubie_faces(id)?.len() {
        1 => CubieKind::Center,
        2 => CubieKind::Edge,
        _ => CubieKind::Corner,
    })
}

/// # Errors
///
/// `InvalidTopologyIndex` if `id` is not below [`CUBIE_COUNT`].
pub fn cubie_name(id: CubieId) -> Result<&'static str, Error> {
    check_cubie(id)?;
    Ok(CUBIE_NAMES[id])
}

/// The center cubie sitting on `face`.
pub fn center_of(face: Face) -> CubieId {
    face as usize
}

/// The cubies owning the nine stickers of `face`, row-major.
pub fn stickers_of_face(face: Face) -> [CubieId; 9] {
    let start = face as usize * 9;
    std::array::from_fn(|i| CubieId::from(FACELET_CUBIE[start + i]))
}

/// The (cubie, face) pair a sticker slot belongs to.
///
/// # Errors
///
/// `InvalidTopologyIndex` if `index` is not below [`FACELET_COUNT`].
pub fn sticker_slot(index: usize) -> Result<(CubieId, Face), Error> {
    if index >= FACELET_COUNT {
        return Err(Error::InvalidTopologyIndex {
            index,
            bound: FACELET_COUNT,
        });
    }

    Ok((CubieId::from(FACELET_CUBIE[index]), Face::ALL[index / 9]))
}

/// Where a cubie sits: the sum of the normals of the faces it touches.
fn cubie_position(id: CubieId) -> [i8; 3] {
    let mut position = [0; 3];
    for touching in CUBIE_FACES[id] {
        for (p, n) in position.iter_mut().zip(touching.normal()) {
            *p += n;
        }
    }
    position
}

/// The sticker slot holding the `face` sticker of cubie `id`.
pub(crate) fn slot_of(id: CubieId, face: Face) -> usize {
    facelet_index(cubie_position(id), face)
}

/// Position of the cubie owning sticker slot `index`, in the same frame as
/// [`Face::normal`], together with the face the sticker points out of.
pub(crate) fn facelet_geometry(index: usize) -> ([i8; 3], Face) {
    let face = Face::ALL[index / 9];
    // Both are below 3
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let (row, col) = ((index % 9 / 3) as i8, (index % 3) as i8);

    let position = match face {
        Face::U => [col - 1, 1, row - 1],
        Face::D => [col - 1, -1, 1 - row],
        Face::F => [col - 1, 1 - row, 1],
        Face::B => [1 - col, 1 - row, -1],
        Face::R => [1, 1 - row, 1 - col],
        Face::L => [-1, 1 - row, col - 1],
    };

    (position, face)
}

/// Inverse of [`facelet_geometry`].
pub(crate) fn facelet_index(position: [i8; 3], face: Face) -> usize {
    let [x, y, z] = position;

    let (row, col) = match face {
        Face::U => (z + 1, x + 1),
        Face::D => (1 - z, x + 1),
        Face::F => (1 - y, x + 1),
        Face::B => (1 - y, 1 - x),
        Face::R => (1 - y, 1 - z),
        Face::L => (1 - y, z + 1),
    };

    #[allow(clippy::cast_sign_loss)]
    let (row, col) = (row as usize, col as usize);

    face as usize * 9 + row * 3 + col
}
