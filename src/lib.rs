//! # chord_theory
//!
//! A Western tonal-music theory engine: correctly spelled pitches,
//! qualified intervals, keys and scales, chord generation, and chord
//! identification from arbitrary note sets.
//!
//! ## Example
//! ```rust
//! use chord_theory::{ChordFinder, ChordKind, Pitch};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1) Build a finder (generates the signature dictionary once)
//!     let finder = ChordFinder::builder()
//!         .fuzzy(true)
//!         .build();
//!
//!     // 2) Identify an unordered note set
//!     let notes = vec![Pitch::new("G")?, Pitch::new("C")?, Pitch::new("E")?];
//!     let chord = finder.identify(&notes)?;
//!     assert_eq!(chord.kind(), ChordKind::Triad);
//!     assert_eq!(chord.quality(), "major");
//!     assert_eq!(chord.root().name(), "C");
//!
//!     Ok(())
//! }
//! # run().unwrap();
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// Spelled pitches and the enharmonic spelling wheel.
pub use pitch::{Pitch, PitchError, LETTERS, WHEEL};

/// Qualified intervals and interval application.
pub use interval::{apply_interval, Interval, IntervalError};

/// Keys, modes, and scale generation.
pub use key::{Key, KeyError, Mode};

/// Chords and the closed chord-category set.
pub use chord::{Chord, ChordError, ChordKind};

/// The precomputed chord-signature dictionary.
pub use dictionary::{ChordDictionary, SignatureEntry, CANONICAL_ROOTS};

/// Chord identification over the signature dictionary.
pub use finder::{ChordFinder, ChordFinderBuilder};

/// Pitch representation module.
pub mod pitch;

/// Interval computation module.
pub mod interval;

/// Key and scale generation module.
pub mod key;

/// Chord generation module.
pub mod chord;

/// Signature-dictionary module.
pub mod dictionary;

/// Chord identification module.
pub mod finder;
