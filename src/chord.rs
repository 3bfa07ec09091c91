//! Chord
//!
//! Chords over a closed category set (triad / seventh / ninth / custom).
//! Each templated category owns a quality-to-interval table; note
//! generation applies those intervals to the root through the chord's key.

use std::fmt::Display;

use thiserror::Error;

use crate::interval::{apply_interval, IntervalError};
use crate::key::{Key, KeyError, Mode};
use crate::pitch::Pitch;

/// Triad qualities: root, third, fifth.
const TRIAD_QUALITIES: &[(&str, &[&str])] = &[
    ("major", &["M3", "P5"]),
    ("minor", &["m3", "P5"]),
    ("diminished", &["m3", "d5"]),
    ("augmented", &["M3", "A5"]),
    ("suspended2", &["M2", "P5"]),
    ("suspended4", &["P4", "P5"]),
];

/// Seventh-chord qualities: root, third, fifth, seventh.
const SEVENTH_QUALITIES: &[(&str, &[&str])] = &[
    ("major7", &["M3", "P5", "M7"]),
    ("dominant7", &["M3", "P5", "m7"]),
    ("minor7", &["m3", "P5", "m7"]),
    ("diminished7", &["m3", "d5", "d7"]),
    ("half-diminished7", &["m3", "d5", "m7"]),
    ("minor-major7", &["m3", "P5", "M7"]),
    ("augmented7", &["M3", "A5", "m7"]),
];

/// Ninth-chord qualities: root, third, fifth, seventh, ninth (add9 omits
/// the seventh).
const NINTH_QUALITIES: &[(&str, &[&str])] = &[
    ("major9", &["M3", "P5", "M7", "M9"]),
    ("dominant9", &["M3", "P5", "m7", "M9"]),
    ("minor9", &["m3", "P5", "m7", "M9"]),
    ("add9", &["M3", "P5", "M9"]),
    ("diminished9", &["m3", "d5", "d7", "m9"]),
    ("half-diminished9", &["m3", "d5", "m7", "M9"]),
    ("minor-major9", &["m3", "P5", "M7", "M9"]),
    ("augmented9", &["M3", "A5", "m7", "M9"]),
];

/// Errors when constructing or transposing chords.
#[derive(Debug, Error)]
pub enum ChordError {
    /// The quality is not in the category's table.
    #[error("unsupported {kind} quality: {quality}")]
    UnsupportedQuality {
        /// The chord category that rejected the quality.
        kind: ChordKind,
        /// The offending quality tag.
        quality: String,
    },

    /// A custom chord needs at least one note.
    #[error("notes list cannot be empty")]
    EmptyNotes,

    /// Interval application failed while generating notes.
    #[error(transparent)]
    Interval(#[from] IntervalError),

    /// Key construction failed for the chord's context.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// An invalid root spelling was supplied.
    #[error(transparent)]
    Pitch(#[from] crate::pitch::PitchError),
}

/// The closed set of chord categories.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChordKind {
    /// Three-note chord: root, third, fifth.
    Triad,
    /// Four-note chord adding a seventh.
    Seventh,
    /// Five-note chord adding a ninth.
    Ninth,
    /// Arbitrary note list with no template; never regenerated.
    Custom,
}

impl ChordKind {
    /// The interval list for a quality in this category, if cataloged.
    /// Always `None` for [`ChordKind::Custom`].
    pub fn quality_intervals(self, quality: &str) -> Option<&'static [&'static str]> {
        let table = match self {
            ChordKind::Triad => TRIAD_QUALITIES,
            ChordKind::Seventh => SEVENTH_QUALITIES,
            ChordKind::Ninth => NINTH_QUALITIES,
            ChordKind::Custom => return None,
        };
        table
            .iter()
            .find(|(name, _)| *name == quality)
            .map(|&(_, intervals)| intervals)
    }

    /// All cataloged qualities for this category, in table order.
    pub fn qualities(self) -> &'static [(&'static str, &'static [&'static str])] {
        match self {
            ChordKind::Triad => TRIAD_QUALITIES,
            ChordKind::Seventh => SEVENTH_QUALITIES,
            ChordKind::Ninth => NINTH_QUALITIES,
            ChordKind::Custom => &[],
        }
    }

    /// The category label used by the signature dictionary.
    pub fn label(self) -> &'static str {
        match self {
            ChordKind::Triad => "triad",
            ChordKind::Seventh => "seventh",
            ChordKind::Ninth => "ninth",
            ChordKind::Custom => "custom",
        }
    }

    /// Parse a dictionary category label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "triad" => Some(ChordKind::Triad),
            "seventh" => Some(ChordKind::Seventh),
            "ninth" => Some(ChordKind::Ninth),
            "custom" => Some(ChordKind::Custom),
            _ => None,
        }
    }
}

impl Display for ChordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A chord: category, root, quality tag, key context, and notes.
///
/// For templated categories the notes are deterministically regenerable
/// from `(root, quality, key)`; custom chords keep exactly the notes they
/// were given.
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    kind: ChordKind,
    root: Pitch,
    quality: String,
    key: Key,
    notes: Vec<Pitch>,
}

impl Chord {
    /// Build a templated chord. With no explicit key, a major key on the
    /// root's spelling is used as context.
    pub fn new(
        kind: ChordKind,
        root: Pitch,
        quality: &str,
        key: Option<Key>,
    ) -> Result<Self, ChordError> {
        let key = match key {
            Some(key) => key,
            None => Key::new(root.name(), Mode::Major)?,
        };
        let notes = generate_notes(kind, &root, quality, &key)?;
        Ok(Chord {
            kind,
            root,
            quality: quality.to_string(),
            key,
            notes,
        })
    }

    /// Build a custom chord from an arbitrary non-empty note list. The
    /// first note becomes the root and the quality tag is "custom".
    pub fn custom(notes: Vec<Pitch>, key: Option<Key>) -> Result<Self, ChordError> {
        let root = notes.first().cloned().ok_or(ChordError::EmptyNotes)?;
        let key = match key {
            Some(key) => key,
            None => Key::new(root.name(), Mode::Major)?,
        };
        Ok(Chord {
            kind: ChordKind::Custom,
            root,
            quality: "custom".to_string(),
            key,
            notes,
        })
    }

    /// The chord category.
    pub fn kind(&self) -> ChordKind {
        self.kind
    }

    /// The root pitch.
    pub fn root(&self) -> &Pitch {
        &self.root
    }

    /// The quality tag.
    pub fn quality(&self) -> &str {
        &self.quality
    }

    /// The key context used to resolve spellings.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// The chord's notes, root first.
    pub fn notes(&self) -> &[Pitch] {
        &self.notes
    }

    /// Sorted, deduplicated semitone offsets of the notes relative to the
    /// root, mod 12. This is the chord's voicing-independent fingerprint.
    pub fn signature(&self) -> Vec<u8> {
        let root_pc = i32::from(self.root.pitch_class());
        let mut offsets: Vec<u8> = self
            .notes
            .iter()
            .map(|n| (i32::from(n.pitch_class()) - root_pc).rem_euclid(12) as u8)
            .collect();
        offsets.sort_unstable();
        offsets.dedup();
        offsets
    }

    /// Transpose the chord by a named interval: the root and key move, and
    /// templated notes regenerate. Custom chords keep their note list.
    pub fn transpose(&mut self, interval: &str) -> Result<(), ChordError> {
        let new_root = apply_interval(&self.root, &self.key, interval)?;
        self.key = Key::new(new_root.name(), self.key.mode())?;
        if self.kind != ChordKind::Custom {
            self.notes = generate_notes(self.kind, &new_root, &self.quality, &self.key)?;
        }
        self.root = new_root;
        Ok(())
    }

    /// Append a note unless an equal one is already present. Does not
    /// regenerate; this is a caller-driven edit such as adding a color
    /// tone.
    pub fn add_note(&mut self, note: Pitch) {
        if !self.notes.contains(&note) {
            self.notes.push(note);
        }
    }

    /// Append several notes, skipping ones already present.
    pub fn add_notes(&mut self, notes: impl IntoIterator<Item = Pitch>) {
        for note in notes {
            self.add_note(note);
        }
    }

    /// Remove the first note equal to `note`, if any.
    pub fn remove_note(&mut self, note: &Pitch) {
        if let Some(idx) = self.notes.iter().position(|n| n == note) {
            self.notes.remove(idx);
        }
    }

    /// Remove the first occurrence of each given note.
    pub fn remove_notes<'a>(&mut self, notes: impl IntoIterator<Item = &'a Pitch>) {
        for note in notes {
            self.remove_note(note);
        }
    }
}

impl Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let notes = self
            .notes
            .iter()
            .map(Pitch::to_string)
            .collect::<Vec<_>>()
            .join("-");
        write!(f, "{}{}: {}", self.root, self.quality, notes)
    }
}

fn generate_notes(
    kind: ChordKind,
    root: &Pitch,
    quality: &str,
    key: &Key,
) -> Result<Vec<Pitch>, ChordError> {
    let intervals =
        kind.quality_intervals(quality)
            .ok_or_else(|| ChordError::UnsupportedQuality {
                kind,
                quality: quality.to_string(),
            })?;
    let mut notes = Vec::with_capacity(intervals.len() + 1);
    notes.push(root.clone());
    for interval in intervals {
        notes.push(apply_interval(root, key, interval)?);
    }
    Ok(notes)
}
