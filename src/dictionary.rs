//! Dictionary
//!
//! The precomputed chord-signature dictionary: for every chord category,
//! canonical root spelling, and quality, the spelled notes and the sorted
//! semitone-offset signature. Generated once, then consumed read-only by
//! the finder; the JSON form is the persisted artifact shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::chord::{Chord, ChordKind};
use crate::key::{Key, Mode};
use crate::pitch::Pitch;

/// The 17 canonical root spellings: naturals plus single sharps and flats.
pub const CANONICAL_ROOTS: [&str; 17] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B",
];

/// The categories the dictionary is generated over.
const GENERATED_KINDS: [ChordKind; 3] = [ChordKind::Triad, ChordKind::Seventh, ChordKind::Ninth];

/// One dictionary record: a chord's spelled notes and its signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    /// Spelled note names, root first.
    pub notes: Vec<String>,
    /// Sorted semitone offsets from the root, mod 12.
    pub semitones: Vec<u8>,
}

/// Nested signature lookup keyed by category label, then root spelling,
/// then quality. `BTreeMap`s keep enumeration and serialization order
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChordDictionary {
    categories: BTreeMap<String, BTreeMap<String, BTreeMap<String, SignatureEntry>>>,
}

impl ChordDictionary {
    /// Generate the dictionary across every (category, quality, canonical
    /// root) combination, each against a major key on its root.
    ///
    /// Combinations that fail to generate are logged and skipped; the
    /// finder treats their absence as "signature unknown".
    pub fn generate() -> Self {
        let mut dictionary = ChordDictionary::default();
        for kind in GENERATED_KINDS {
            for &(quality, _) in kind.qualities() {
                for root_name in CANONICAL_ROOTS {
                    match build_entry(kind, root_name, quality) {
                        Ok(entry) => dictionary.insert(kind.label(), root_name, quality, entry),
                        Err(err) => {
                            log::warn!(
                                "skipping {kind} {quality} on {root_name}: {err}"
                            );
                        }
                    }
                }
            }
        }
        dictionary
    }

    /// Look up the entry for a category, root spelling, and quality.
    pub fn lookup(&self, kind: ChordKind, root: &str, quality: &str) -> Option<&SignatureEntry> {
        self.categories
            .get(kind.label())?
            .get(root)?
            .get(quality)
    }

    /// Iterate every `(category, root, quality, entry)` in deterministic
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &str, &SignatureEntry)> {
        self.categories.iter().flat_map(|(category, roots)| {
            roots.iter().flat_map(move |(root, qualities)| {
                qualities.iter().map(move |(quality, entry)| {
                    (category.as_str(), root.as_str(), quality.as_str(), entry)
                })
            })
        })
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.categories
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    /// Whether the dictionary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Serialize to the persisted JSON artifact shape.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a dictionary from its JSON artifact.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn insert(&mut self, category: &str, root: &str, quality: &str, entry: SignatureEntry) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .entry(root.to_string())
            .or_default()
            .insert(quality.to_string(), entry);
    }
}

fn build_entry(
    kind: ChordKind,
    root_name: &str,
    quality: &str,
) -> Result<SignatureEntry, crate::chord::ChordError> {
    let root = Pitch::new(root_name)?;
    let key = Key::new(root_name, Mode::Major)?;
    let chord = Chord::new(kind, root, quality, Some(key))?;
    Ok(SignatureEntry {
        notes: chord.notes().iter().map(Pitch::to_string).collect(),
        semitones: chord.signature(),
    })
}
