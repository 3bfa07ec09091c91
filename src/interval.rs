//! Interval
//!
//! Qualified intervals between two spelled pitches, and interval
//! application (transposition with key-aware respelling).

use std::collections::HashMap;
use std::fmt::Display;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::key::{Key, KeyError};
use crate::pitch::{letter_index, Pitch, PitchError, LETTERS};

/// Quality names keyed by `(semitones, letter_steps)`. Spans two octaves so
/// compound intervals between octave-fixed pitches resolve by absolute
/// distance; octave-less intervals look up `(semitones % 12, steps)`.
const QUALITY_TABLE: &[((i32, u8), &str)] = &[
    ((0, 0), "U"),
    ((0, 1), "d2"),
    ((1, 0), "AU"),
    ((1, 1), "m2"),
    ((2, 1), "M2"),
    ((2, 2), "d3"),
    ((3, 1), "A2"),
    ((3, 2), "m3"),
    ((3, 3), "m3"),
    ((4, 2), "M3"),
    ((4, 3), "d4"),
    ((5, 2), "A3"),
    ((5, 3), "P4"),
    ((5, 4), "d5"),
    ((6, 3), "A4"),
    ((6, 4), "d5"),
    ((7, 4), "P5"),
    ((7, 5), "d6"),
    ((8, 4), "A5"),
    ((8, 5), "m6"),
    ((9, 5), "M6"),
    ((9, 6), "d7"),
    ((10, 5), "A6"),
    ((10, 6), "m7"),
    ((11, 6), "M7"),
    ((11, 0), "d8"),
    ((12, 0), "P8"),
    ((12, 6), "A7"),
    ((13, 0), "A8"),
    ((13, 1), "m9"),
    ((14, 1), "M9"),
    ((14, 2), "d10"),
    ((15, 1), "A9"),
    ((15, 2), "m10"),
    ((16, 2), "M10"),
    ((16, 3), "d11"),
    ((17, 2), "A10"),
    ((17, 3), "P11"),
    ((18, 3), "d12"),
    ((18, 4), "A11"),
    ((19, 4), "P12"),
    ((19, 5), "m13"),
    ((20, 4), "M13"),
    ((20, 5), "d14"),
    ((21, 5), "M13"),
    ((21, 6), "A12"),
    ((23, 6), "M14"),
    ((24, 0), "P15"),
];

static QUALITIES: Lazy<HashMap<(i32, u8), &'static str>> =
    Lazy::new(|| QUALITY_TABLE.iter().copied().collect());

/// Semitone counts for every interval name `apply_interval` accepts.
const SEMITONE_TABLE: &[(&str, i32)] = &[
    ("P1", 0),
    ("A1", 1),
    ("d2", 0),
    ("m2", 1),
    ("M2", 2),
    ("A2", 3),
    ("d3", 2),
    ("m3", 3),
    ("M3", 4),
    ("A3", 5),
    ("d4", 4),
    ("P4", 5),
    ("A4", 6),
    ("d5", 6),
    ("P5", 7),
    ("A5", 8),
    ("d6", 7),
    ("m6", 8),
    ("M6", 9),
    ("A6", 10),
    ("d7", 9),
    ("m7", 10),
    ("M7", 11),
    ("A7", 12),
    ("d8", 11),
    ("P8", 12),
    ("A8", 13),
    ("m9", 13),
    ("M9", 14),
    ("A9", 15),
    ("m10", 15),
    ("M10", 16),
    ("P11", 17),
    ("A11", 18),
    ("P12", 19),
    ("m13", 20),
    ("M13", 21),
    ("M14", 23),
    ("P15", 24),
];

static INTERVAL_SEMITONES: Lazy<HashMap<&'static str, i32>> =
    Lazy::new(|| SEMITONE_TABLE.iter().copied().collect());

/// Errors from interval naming and application.
#[derive(Debug, Error)]
pub enum IntervalError {
    /// The interval name is not in the semitone table.
    #[error("unsupported interval: {0}")]
    UnsupportedInterval(String),

    /// Spelling resolution failed for the transposed pitch.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// The resolved spelling was not a valid pitch name.
    #[error(transparent)]
    Pitch(#[from] PitchError),
}

/// A qualified interval between an ordered pair of pitches.
///
/// Construction swaps the endpoints if needed so `low` sits at or below
/// `high` by absolute semitone position. Unresolvable `(semitones,
/// letter_steps)` pairs fall back to a plain "`<n> semitones`" label.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    low: Pitch,
    high: Pitch,
    semitones: i32,
    letter_steps: u8,
    name: String,
}

impl Interval {
    /// Build the interval spanning `a` and `b`.
    pub fn new(a: Pitch, b: Pitch) -> Self {
        let (low, high) = if b.position() >= a.position() {
            (a, b)
        } else {
            (b, a)
        };

        let semitones = high.position() - low.position();
        let low_idx = letter_index(low.letter()) as i32;
        let high_idx = letter_index(high.letter()) as i32;
        let letter_steps = (high_idx - low_idx).rem_euclid(7) as u8;

        let name = qualify(&low, &high, semitones, letter_steps);
        Interval {
            low,
            high,
            semitones,
            letter_steps,
            name,
        }
    }

    /// The lower endpoint.
    pub fn low(&self) -> &Pitch {
        &self.low
    }

    /// The upper endpoint.
    pub fn high(&self) -> &Pitch {
        &self.high
    }

    /// Absolute semitone span, octaves included.
    pub fn semitones(&self) -> i32 {
        self.semitones
    }

    /// Letter steps from low to high, mod 7.
    pub fn letter_steps(&self) -> u8 {
        self.letter_steps
    }

    /// The resolved quality name, e.g. "M3", "d5", or "13 semitones" when
    /// no table entry covers the pair.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn qualify(low: &Pitch, high: &Pitch, semitones: i32, letter_steps: u8) -> String {
    // A top note spelled on the seventh letter but sounding an octave up
    // (e.g. C4 to B#5's pitch class) is an augmented seventh, not an
    // octave respelled as a second.
    if high.name() == "B#"
        && high.octave().unwrap_or(0) > low.octave().unwrap_or(0)
        && semitones == 12
        && letter_steps % 7 == 6
    {
        return "A7".to_string();
    }

    let key = if low.octave().is_none() && high.octave().is_none() {
        (semitones.rem_euclid(12), letter_steps % 7)
    } else {
        (semitones, letter_steps % 7)
    };
    match QUALITIES.get(&key) {
        Some(name) => (*name).to_string(),
        None => format!("{semitones} semitones"),
    }
}

/// Transpose `pitch` up by the named interval, spelling the result through
/// `key`.
///
/// The interval's numeric suffix fixes the number of letters to advance
/// (`M2` is one letter, `M3` two, and so on, mod 7); the key's spelling
/// resolver then picks the wheel name matching both the target pitch class
/// and the target letter.
pub fn apply_interval(pitch: &Pitch, key: &Key, interval: &str) -> Result<Pitch, IntervalError> {
    let semitones = *INTERVAL_SEMITONES
        .get(interval)
        .ok_or_else(|| IntervalError::UnsupportedInterval(interval.to_string()))?;

    let digits: String = interval.chars().filter(char::is_ascii_digit).collect();
    let number: i32 = digits
        .parse()
        .map_err(|_| IntervalError::UnsupportedInterval(interval.to_string()))?;
    let letter_steps = (number - 1).rem_euclid(7) as usize;

    let start = letter_index(pitch.letter());
    let new_letter = LETTERS[(start + letter_steps) % 7];
    let new_pc = (i32::from(pitch.pitch_class()) + semitones).rem_euclid(12) as u8;

    let name = key.find_spelling(new_pc, new_letter)?;
    match pitch.octave() {
        Some(_) => {
            let new_octave = (pitch.position() + semitones).div_euclid(12);
            Ok(Pitch::with_octave(name, new_octave)?)
        }
        None => Ok(Pitch::new(name)?),
    }
}
