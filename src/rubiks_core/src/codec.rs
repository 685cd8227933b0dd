//! The canonical 54-character config string.
//!
//! Every character names a sticker's color by the face whose center
//! currently carries that color, so the string does not depend on how the
//! colors happen to be assigned to faces.

use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use log::trace;

use crate::{
    Error,
    cube::CubeState,
    face::{Color, Face},
    topology::{self, CUBIE_COUNT, CubieKind, FACELET_COUNT},
};

/// A well formed config string, URFDBL faces of nine labels each.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigString(String);

impl ConfigString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ConfigString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConfigString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ConfigString {
    type Err = Error;

    /// Validates by decoding, and strips any whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        encode(&decode(s)?)
    }
}

/// # Errors
///
/// `ColorNotFound` if a sticker carries a color no center carries, which
/// cannot happen for states built by [`decode`] or by moving a solved cube.
pub fn encode(state: &CubeState) -> Result<ConfigString, Error> {
    let config = state
        .facelets()
        .iter()
        .map(|&color| state.which_face_of_color(color).map(Face::letter))
        .collect::<Result<String, Error>>()?;

    Ok(ConfigString(config))
}

/// The color each label stands for, read off a solved reference cube.
fn label_colors() -> Result<[Color; 6], Error> {
    let reference = CubeState::solved();
    let mut colors = [Color::White; 6];

    for color in Color::ALL {
        colors[reference.which_face_of_color(color)? as usize] = color;
    }

    Ok(colors)
}

fn parse_labels(config: &str) -> Result<[Face; FACELET_COUNT], Error> {
    let chars = config.chars().filter(|c| !c.is_whitespace()).collect_vec();

    let chars: [char; FACELET_COUNT] =
        chars
            .try_into()
            .map_err(|chars: Vec<char>| Error::MalformedConfigLength {
                expected: FACELET_COUNT,
                actual: chars.len(),
            })?;

    let mut labels = [Face::U; FACELET_COUNT];
    for (position, (label, found)) in labels.iter_mut().zip(chars).enumerate() {
        *label = Face::from_letter(found).ok_or(Error::MalformedConfigChar { position, found })?;
    }

    Ok(labels)
}

/// `a · (b × c)` of the face normals: positive when the three faces run
/// counter-clockwise around their shared corner, negative when clockwise.
fn handedness(a: Face, b: Face, c: Face) -> i8 {
    let [ax, ay, az] = a.normal();
    let [bx, by, bz] = b.normal();
    let [cx, cy, cz] = c.normal();

    ax * (by * cz - bz * cy) + ay * (bz * cx - bx * cz) + az * (bx * cy - by * cx)
}

/// Reject label combinations no real cubie can show: a center labelled
/// with another face, an edge or corner with a repeated label or with
/// labels of opposite faces, or a corner whose labels run the wrong way
/// around it.
fn check_cubie_labels(labels: &[Face; FACELET_COUNT]) -> Result<(), Error> {
    for id in 0..CUBIE_COUNT {
        let faces = topology::cubie_faces(id)?;
        let cubie_labels = faces
            .iter()
            .map(|&face| labels[topology::slot_of(id, face)])
            .collect_vec();

        let legal = match topology::cubie_kind(id)? {
            CubieKind::Center => cubie_labels[0] == faces[0],
            kind => {
                let distinct = cubie_labels
                    .iter()
                    .tuple_combinations()
                    .all(|(&a, &b)| a != b && a != b.opposite());

                // Twisting a corner keeps the cyclic order of its stickers
                distinct
                    && (kind == CubieKind::Edge
                        || handedness(cubie_labels[0], cubie_labels[1], cubie_labels[2])
                            == handedness(faces[0], faces[1], faces[2]))
            }
        };

        if !legal {
            return Err(Error::MalformedCubieColors {
                cubie: topology::cubie_name(id)?,
                labels: cubie_labels.iter().join(""),
            });
        }
    }

    Ok(())
}

/// Rebuild a cube from a config string. Whitespace is ignored.
///
/// # Errors
///
/// `MalformedConfigLength`, `MalformedConfigChar` or `MalformedCubieColors`
/// for the first violation found; nothing is coerced.
pub fn decode(config: &str) -> Result<CubeState, Error> {
    let labels = parse_labels(config)?;
    check_cubie_labels(&labels)?;

    let colors = label_colors()?;
    trace!(target: "codec", "Label colors: {colors:?}");

    Ok(CubeState::from_facelets(
        labels.map(|label| colors[label as usize]),
    ))
}
