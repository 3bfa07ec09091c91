//! Key
//!
//! Keys and scale generation: a normalized tonic, a mode from the fixed
//! pattern catalog, and the scale walked from the mode's semitone steps
//! with one letter advance per degree.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::pitch::{letter_index, Pitch, PitchError, LETTERS, WHEEL};

/// Preferred enharmonic respellings for ambiguous tonics (e.g. Gb is kept
/// as F# major/minor).
const TONIC_NORMALIZATION: &[(&str, &str)] = &[
    ("Cb", "B"),
    ("B#", "C"),
    ("Fb", "E"),
    ("E#", "F"),
    ("Gb", "F#"),
    ("F##", "G"),
    ("Ab", "G#"),
    ("G##", "A"),
    ("Bb", "A#"),
    ("A##", "B"),
    ("Db", "C#"),
    ("C##", "D"),
    ("Eb", "D#"),
    ("D##", "E"),
];

/// Errors when constructing keys or resolving spellings.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The mode name is not in the pattern catalog.
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    /// No wheel entry matches the requested pitch class and letter. Only
    /// reachable when a scale walk drifts past double accidentals; a table
    /// inconsistency rather than bad user input.
    #[error("no valid spelling for pitch class {pitch_class} on letter {letter}")]
    NoValidSpelling {
        /// The pitch class that needed a spelling.
        pitch_class: u8,
        /// The letter the spelling had to start with.
        letter: char,
    },

    /// The tonic spelling was not a valid pitch name.
    #[error(transparent)]
    Pitch(#[from] PitchError),
}

/// The fixed catalog of scale shapes.
///
/// `Minor`, `Aeolian`, and `NaturalMinor` share a pattern but stay
/// distinct: key equality compares modes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Ionian.
    Major,
    /// Dorian.
    Dorian,
    /// Phrygian.
    Phrygian,
    /// Lydian.
    Lydian,
    /// Mixolydian.
    Mixolydian,
    /// Aeolian, under its common name.
    Minor,
    /// Aeolian, under its modal name.
    Aeolian,
    /// Locrian.
    Locrian,
    /// Alternating half/whole diminished scale.
    Diminished,
    /// Alternating whole/half augmented scale.
    Augmented,
    /// Six whole steps.
    WholeTone,
    /// Twelve half steps.
    Chromatic,
    /// Six-note blues scale.
    Blues,
    /// Major pentatonic.
    Pentatonic,
    /// Natural minor, spelled out.
    NaturalMinor,
    /// Harmonic minor.
    HarmonicMinor,
    /// Melodic minor, ascending.
    MelodicMinor,
}

impl Mode {
    /// Semitone steps from the tonic, one letter advance per step.
    pub fn pattern(self) -> &'static [u8] {
        match self {
            Mode::Major => &[2, 2, 1, 2, 2, 2, 1],
            Mode::Dorian => &[2, 1, 2, 2, 2, 1, 2],
            Mode::Phrygian => &[1, 2, 2, 2, 1, 2, 2],
            Mode::Lydian => &[2, 2, 2, 1, 2, 2, 1],
            Mode::Mixolydian => &[2, 2, 1, 2, 2, 1, 2],
            Mode::Minor | Mode::Aeolian | Mode::NaturalMinor => &[2, 1, 2, 2, 1, 2, 2],
            Mode::Locrian => &[1, 2, 2, 1, 2, 2, 2],
            Mode::Diminished => &[1, 2, 1, 2, 1, 2, 1],
            Mode::Augmented => &[2, 1, 2, 1, 2, 1, 2],
            Mode::WholeTone => &[2, 2, 2, 2, 2, 2],
            Mode::Chromatic => &[1; 12],
            Mode::Blues => &[3, 2, 1, 1, 3, 2],
            Mode::Pentatonic => &[2, 2, 3, 2, 3],
            Mode::HarmonicMinor => &[2, 1, 2, 2, 1, 3, 1],
            Mode::MelodicMinor => &[2, 1, 2, 2, 2, 2, 1],
        }
    }

    /// The catalog name, as accepted by [`Mode::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Minor => "minor",
            Mode::Aeolian => "aeolian",
            Mode::Locrian => "locrian",
            Mode::Diminished => "diminished",
            Mode::Augmented => "augmented",
            Mode::WholeTone => "whole_tone",
            Mode::Chromatic => "chromatic",
            Mode::Blues => "blues",
            Mode::Pentatonic => "pentatonic",
            Mode::NaturalMinor => "natural_minor",
            Mode::HarmonicMinor => "harmonic_minor",
            Mode::MelodicMinor => "melodic_minor",
        }
    }
}

impl FromStr for Mode {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" | "ionian" => Ok(Mode::Major),
            "dorian" => Ok(Mode::Dorian),
            "phrygian" => Ok(Mode::Phrygian),
            "lydian" => Ok(Mode::Lydian),
            "mixolydian" => Ok(Mode::Mixolydian),
            "minor" => Ok(Mode::Minor),
            "aeolian" => Ok(Mode::Aeolian),
            "locrian" => Ok(Mode::Locrian),
            "diminished" => Ok(Mode::Diminished),
            "augmented" => Ok(Mode::Augmented),
            "whole_tone" => Ok(Mode::WholeTone),
            "chromatic" => Ok(Mode::Chromatic),
            "blues" => Ok(Mode::Blues),
            "pentatonic" => Ok(Mode::Pentatonic),
            "natural_minor" => Ok(Mode::NaturalMinor),
            "harmonic_minor" => Ok(Mode::HarmonicMinor),
            "melodic_minor" => Ok(Mode::MelodicMinor),
            other => Err(KeyError::UnsupportedMode(other.to_string())),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A key: normalized tonic, mode, and the generated scale.
///
/// The scale starts and ends on the tonic an octave apart (for heptatonic
/// modes), each degree landing on the next letter.
#[derive(Debug, Clone)]
pub struct Key {
    tonic: String,
    mode: Mode,
    scale: Vec<Pitch>,
}

impl Key {
    /// Build a key from a tonic spelling and mode. The tonic is first
    /// normalized through the enharmonic-preference table.
    pub fn new(tonic: &str, mode: Mode) -> Result<Self, KeyError> {
        let tonic = normalize_tonic(tonic).to_string();
        let scale = generate_scale(&tonic, mode)?;
        Ok(Key { tonic, mode, scale })
    }

    /// The normalized tonic spelling.
    pub fn tonic(&self) -> &str {
        &self.tonic
    }

    /// The key's mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The generated scale, tonic first.
    pub fn scale(&self) -> &[Pitch] {
        &self.scale
    }

    /// Pick the wheel spelling with the given pitch class built on the
    /// given letter. Scans the wheel in order, so single-accidental names
    /// win over double-accidental ones.
    pub fn find_spelling(&self, pitch_class: u8, letter: char) -> Result<&'static str, KeyError> {
        find_spelling(pitch_class, letter)
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.tonic == other.tonic && self.mode == other.mode
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode)
    }
}

fn normalize_tonic(tonic: &str) -> &str {
    TONIC_NORMALIZATION
        .iter()
        .find(|(from, _)| *from == tonic)
        .map(|&(_, to)| to)
        .unwrap_or(tonic)
}

pub(crate) fn find_spelling(pitch_class: u8, letter: char) -> Result<&'static str, KeyError> {
    WHEEL
        .iter()
        .find(|&&(name, pc)| pc == pitch_class && name.starts_with(letter))
        .map(|&(name, _)| name)
        .ok_or(KeyError::NoValidSpelling {
            pitch_class,
            letter,
        })
}

fn generate_scale(tonic: &str, mode: Mode) -> Result<Vec<Pitch>, KeyError> {
    let start = Pitch::new(tonic)?;
    let mut pitch_class = start.pitch_class();
    let mut letter_idx = letter_index(start.letter());

    let mut scale = Vec::with_capacity(mode.pattern().len() + 1);
    scale.push(start);
    for &step in mode.pattern() {
        pitch_class = (pitch_class + step) % 12;
        letter_idx = (letter_idx + 1) % 7;
        let name = find_spelling(pitch_class, LETTERS[letter_idx])?;
        scale.push(Pitch::new(name)?);
    }
    Ok(scale)
}
