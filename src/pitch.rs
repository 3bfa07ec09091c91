//! Pitch
//!
//! Spelled pitches: a note name from the enharmonic spelling wheel, its
//! pitch class (0-11), its natural letter, and an optional octave. An
//! octave-less pitch behaves as an abstract pitch class.

use std::fmt::Display;
use thiserror::Error;

/// The seven natural letters in pitch-class order starting from C.
pub const LETTERS: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];

/// The enharmonic spelling wheel: every supported spelling and its pitch
/// class. Ordered naturals and single accidentals first, double accidentals
/// last, so spelling searches prefer the simpler name.
pub const WHEEL: &[(&str, u8)] = &[
    ("C", 0),
    ("B#", 0),
    ("C#", 1),
    ("Db", 1),
    ("D", 2),
    ("D#", 3),
    ("Eb", 3),
    ("E", 4),
    ("Fb", 4),
    ("E#", 5),
    ("F", 5),
    ("F#", 6),
    ("Gb", 6),
    ("G", 7),
    ("G#", 8),
    ("Ab", 8),
    ("A", 9),
    ("A#", 10),
    ("Bb", 10),
    ("B", 11),
    ("Cb", 11),
    ("C##", 2),
    ("Dbb", 0),
    ("D##", 4),
    ("Ebb", 1),
    ("E##", 6),
    ("Fbb", 3),
    ("F##", 7),
    ("Gbb", 5),
    ("G##", 9),
    ("Abb", 7),
    ("A##", 11),
    ("Bbb", 9),
    ("B##", 1),
    ("Cbb", 10),
];

/// Errors when constructing pitches.
#[derive(Debug, Error)]
pub enum PitchError {
    /// The spelling is not present in the wheel.
    #[error("invalid pitch name: {0}")]
    InvalidName(String),
}

/// Look up a spelling in the wheel, returning its pitch class.
pub fn wheel_pitch_class(name: &str) -> Option<u8> {
    WHEEL.iter().find(|(n, _)| *n == name).map(|&(_, pc)| pc)
}

/// Index of a natural letter within [`LETTERS`].
pub(crate) fn letter_index(letter: char) -> usize {
    LETTERS.iter().position(|&l| l == letter).unwrap_or(0)
}

/// A spelled pitch, optionally fixed to an octave.
#[derive(Debug, Clone)]
pub struct Pitch {
    name: String,
    pitch_class: u8,
    letter: char,
    octave: Option<i32>,
}

impl Pitch {
    /// Create an octave-less (abstract) pitch from a spelling in the wheel.
    pub fn new(name: &str) -> Result<Self, PitchError> {
        let pitch_class =
            wheel_pitch_class(name).ok_or_else(|| PitchError::InvalidName(name.to_string()))?;
        let letter = name.chars().next().unwrap_or('C');
        Ok(Pitch {
            name: name.to_string(),
            pitch_class,
            letter,
            octave: None,
        })
    }

    /// Create a pitch fixed to an octave.
    pub fn with_octave(name: &str, octave: i32) -> Result<Self, PitchError> {
        let mut pitch = Pitch::new(name)?;
        pitch.octave = Some(octave);
        Ok(pitch)
    }

    /// The spelled name, without octave.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pitch class, 0-11.
    pub fn pitch_class(&self) -> u8 {
        self.pitch_class
    }

    /// The natural letter the spelling is built on.
    pub fn letter(&self) -> char {
        self.letter
    }

    /// The octave, if this pitch is fixed to one.
    pub fn octave(&self) -> Option<i32> {
        self.octave
    }

    /// Absolute semitone position, treating a missing octave as octave 0.
    pub(crate) fn position(&self) -> i32 {
        i32::from(self.pitch_class) + 12 * self.octave.unwrap_or(0)
    }

    /// Absolute semitone distance to `other`, octaves included.
    pub fn semitone_distance(&self, other: &Pitch) -> u32 {
        (self.position() - other.position()).unsigned_abs()
    }

    /// Letter steps from `self` up to `other`, mod 7.
    pub fn letter_distance(&self, other: &Pitch) -> u8 {
        let from = letter_index(self.letter) as i32;
        let to = letter_index(other.letter) as i32;
        (to - from).rem_euclid(7) as u8
    }
}

/// Pitch-class equality; octaves only compared when both are present.
impl PartialEq for Pitch {
    fn eq(&self, other: &Self) -> bool {
        if self.pitch_class != other.pitch_class {
            return false;
        }
        match (self.octave, other.octave) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

impl Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.octave {
            Some(octave) => write!(f, "{}{}", self.name, octave),
            None => write!(f, "{}", self.name),
        }
    }
}
