//! Finder
//!
//! Chord identification: given an unordered set of pitches, search the
//! signature dictionary for the best-matching (root, quality, category).
//!
//! The search is deliberately brute force: every permutation's first
//! element is tried as the root and its offset set compared against every
//! dictionary entry. That stays viable only because real chords carry 3-6
//! notes and the dictionary is bounded; do not swap in a heuristic, it
//! would change matching results.

use itertools::Itertools;

use crate::chord::{Chord, ChordError, ChordKind};
use crate::dictionary::ChordDictionary;
use crate::key::{Key, Mode};
use crate::pitch::{Pitch, WHEEL};

/// Builder for a [`ChordFinder`].
pub struct ChordFinderBuilder {
    dictionary: Option<ChordDictionary>,
    fuzzy: bool,
}

impl ChordFinderBuilder {
    /// Start with a generated dictionary and fuzzy matching disabled.
    pub fn new() -> Self {
        ChordFinderBuilder {
            dictionary: None,
            fuzzy: false,
        }
    }

    /// Use a preloaded dictionary instead of generating one.
    pub fn dictionary(mut self, dictionary: ChordDictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Enable or disable the fuzzy fallback (accepts a match missing at
    /// most one signature tone).
    pub fn fuzzy(mut self, enabled: bool) -> Self {
        self.fuzzy = enabled;
        self
    }

    /// Build the `ChordFinder`.
    pub fn build(self) -> ChordFinder {
        ChordFinder {
            dictionary: self.dictionary.unwrap_or_else(ChordDictionary::generate),
            fuzzy: self.fuzzy,
        }
    }
}

impl Default for ChordFinderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies chords against a read-only signature dictionary.
pub struct ChordFinder {
    dictionary: ChordDictionary,
    fuzzy: bool,
}

impl ChordFinder {
    /// Return a builder to customize the dictionary and fuzzy matching.
    pub fn builder() -> ChordFinderBuilder {
        ChordFinderBuilder::new()
    }

    /// Create a finder with a freshly generated dictionary and fuzzy
    /// matching disabled.
    pub fn new() -> Self {
        ChordFinderBuilder::new().build()
    }

    /// The dictionary this finder searches.
    pub fn dictionary(&self) -> &ChordDictionary {
        &self.dictionary
    }

    /// Identify the chord formed by `notes`.
    ///
    /// Order, duplicates, and octaves are irrelevant to matching; only
    /// pitch classes matter. An exact signature match returns immediately
    /// as the matching category's chord, rooted on the candidate's actual
    /// spelled pitch with a fresh major key on that root. With fuzzy
    /// matching enabled, the first candidate overlapping all but at most
    /// one signature tone is kept as a fallback; it is consulted only
    /// after every permutation and entry has been tried exactly. Anything
    /// still unmatched comes back as a custom chord wrapping the input
    /// notes in their given order.
    ///
    /// A candidate root whose spelling cannot key a major scale (double
    /// accidentals sit outside the tonic-normalization table) counts as a
    /// non-match; the custom fallback respells such a root's key context
    /// through the wheel instead.
    ///
    /// The only error is an empty input; absence of a match is not an
    /// error.
    pub fn identify(&self, notes: &[Pitch]) -> Result<Chord, ChordError> {
        if notes.is_empty() {
            return Err(ChordError::EmptyNotes);
        }

        let pitch_classes: Vec<u8> = notes.iter().map(Pitch::pitch_class).collect();
        let mut fuzzy_match: Option<(Pitch, ChordKind, String)> = None;

        for perm in notes.iter().permutations(notes.len()) {
            let root = perm[0];
            let candidate = normalize_offsets(root.pitch_class(), &pitch_classes);

            for (category, _, quality, entry) in self.dictionary.iter() {
                let Some(kind) = ChordKind::from_label(category) else {
                    continue;
                };
                if kind == ChordKind::Custom {
                    continue;
                }

                let mut target = entry.semitones.clone();
                target.sort_unstable();
                target.dedup();

                if candidate == target {
                    // A root the normalization table cannot key (e.g. Dbb)
                    // is a non-match, not an identification failure.
                    match materialize(kind, root, quality) {
                        Some(chord) => return Ok(chord),
                        None => continue,
                    }
                }

                // One signature tone may be missing, but the input may not
                // bring more distinct tones than the signature holds.
                if self.fuzzy
                    && fuzzy_match.is_none()
                    && candidate.len() <= target.len()
                    && overlap(&candidate, &target) + 1 >= target.len()
                {
                    fuzzy_match = Some((root.clone(), kind, quality.to_string()));
                }
            }
        }

        if let Some((root, kind, quality)) = fuzzy_match {
            if let Some(chord) = materialize(kind, &root, &quality) {
                log::debug!("fuzzy match: {kind} {quality} rooted on {root}");
                return Ok(chord);
            }
        }

        log::debug!("no cataloged signature matched; wrapping as custom chord");
        match Chord::custom(notes.to_vec(), None) {
            Ok(chord) => Ok(chord),
            // The first note's spelling cannot key a major scale; respell
            // the key context through the wheel so the fallback still
            // wraps the notes as given.
            Err(_) => {
                let key = Key::new(plain_spelling(notes[0].pitch_class()), Mode::Major)?;
                Chord::custom(notes.to_vec(), Some(key))
            }
        }
    }
}

impl Default for ChordFinder {
    fn default() -> Self {
        ChordFinder::new()
    }
}

/// Build the matched chord on the candidate root with a fresh major key.
/// `None` when that root's spelling cannot be keyed or generated; the
/// caller treats that as a non-match.
fn materialize(kind: ChordKind, root: &Pitch, quality: &str) -> Option<Chord> {
    let key = Key::new(root.name(), Mode::Major).ok()?;
    Chord::new(kind, root.clone(), quality, Some(key)).ok()
}

/// The first wheel spelling of a pitch class; wheel order puts naturals
/// and single accidentals before double ones, and every pitch class has
/// a spelling that keys a major scale.
fn plain_spelling(pitch_class: u8) -> &'static str {
    WHEEL
        .iter()
        .find(|&&(_, pc)| pc == pitch_class)
        .map(|&(name, _)| name)
        .unwrap_or("C")
}

/// Sorted, deduplicated offsets of `pitch_classes` relative to `root_pc`.
fn normalize_offsets(root_pc: u8, pitch_classes: &[u8]) -> Vec<u8> {
    let mut offsets: Vec<u8> = pitch_classes
        .iter()
        .map(|&pc| (i32::from(pc) - i32::from(root_pc)).rem_euclid(12) as u8)
        .collect();
    offsets.sort_unstable();
    offsets.dedup();
    offsets
}

/// Intersection size of two sorted, deduplicated offset sets.
fn overlap(candidate: &[u8], target: &[u8]) -> usize {
    candidate
        .iter()
        .filter(|offset| target.binary_search(offset).is_ok())
        .count()
}
