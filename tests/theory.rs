//! Integration tests for pitch, interval, key, and chord arithmetic.

use chord_theory::{
    apply_interval, Chord, ChordError, ChordKind, Interval, Key, KeyError, Mode, Pitch,
};

fn pitch(name: &str) -> Pitch {
    Pitch::new(name).expect("valid pitch name")
}

fn names(pitches: &[Pitch]) -> Vec<&str> {
    pitches.iter().map(Pitch::name).collect()
}

#[test]
fn pitch_construction_and_accessors() {
    let c4 = Pitch::with_octave("C", 4).unwrap();
    assert_eq!(c4.name(), "C");
    assert_eq!(c4.octave(), Some(4));
    assert_eq!(c4.pitch_class(), 0);
    assert_eq!(c4.letter(), 'C');

    let err = Pitch::new("Invalid").unwrap_err();
    assert_eq!(err.to_string(), "invalid pitch name: Invalid");
}

#[test]
fn pitch_equality_is_abstract_without_octaves() {
    // Octave-less pitches compare by pitch class alone.
    assert_eq!(pitch("C#"), pitch("Db"));
    assert_eq!(pitch("C"), Pitch::with_octave("C", 4).unwrap());
    assert_ne!(
        Pitch::with_octave("C", 4).unwrap(),
        Pitch::with_octave("C", 5).unwrap()
    );
    assert_ne!(pitch("C"), pitch("D"));
}

#[test]
fn pitch_distances() {
    let c4 = Pitch::with_octave("C", 4).unwrap();
    let e4 = Pitch::with_octave("E", 4).unwrap();
    let c5 = Pitch::with_octave("C", 5).unwrap();

    assert_eq!(c4.semitone_distance(&e4), 4);
    assert_eq!(e4.semitone_distance(&c4), 4);
    assert_eq!(c4.semitone_distance(&c5), 12);

    assert_eq!(pitch("C").letter_distance(&pitch("E")), 2);
    assert_eq!(pitch("E").letter_distance(&pitch("C")), 5);
}

#[test]
fn c_major_scale() {
    let key = Key::new("C", Mode::Major).unwrap();
    assert_eq!(key.tonic(), "C");
    assert_eq!(key.mode(), Mode::Major);
    assert_eq!(
        names(key.scale()),
        ["C", "D", "E", "F", "G", "A", "B", "C"]
    );
}

#[test]
fn db_minor_normalizes_to_c_sharp() {
    let key = Key::new("Db", Mode::Minor).unwrap();
    assert_eq!(key.tonic(), "C#");
    assert_eq!(
        names(key.scale()),
        ["C#", "D#", "E", "F#", "G#", "A", "B", "C#"]
    );
}

#[test]
fn sharp_side_scale_uses_double_accidentals() {
    let key = Key::new("D#", Mode::Major).unwrap();
    assert_eq!(
        names(key.scale()),
        ["D#", "E#", "F##", "G#", "A#", "B#", "C##", "D#"]
    );
}

#[test]
fn non_heptatonic_modes() {
    let whole_tone = Key::new("C", Mode::WholeTone).unwrap();
    assert_eq!(
        names(whole_tone.scale()),
        ["C", "D", "E", "F#", "G#", "A#", "B#"]
    );

    // The letter-per-step walk cannot spell a chromatic scale from C; this
    // surfaces as the spelling-resolution invariant error.
    let err = Key::new("C", Mode::Chromatic).unwrap_err();
    assert!(matches!(err, KeyError::NoValidSpelling { .. }));
}

#[test]
fn unsupported_mode_is_rejected() {
    let err = "invalid_mode".parse::<Mode>().unwrap_err();
    assert_eq!(err.to_string(), "unsupported mode: invalid_mode");
    assert_eq!("Major".parse::<Mode>().unwrap(), Mode::Major);
    assert_eq!("ionian".parse::<Mode>().unwrap(), Mode::Major);
}

#[test]
fn interval_names_within_an_octave() {
    let c5 = Pitch::with_octave("C", 5).unwrap();
    let cases = [
        ("C", "U"),
        ("C#", "AU"),
        ("Db", "m2"),
        ("D", "M2"),
        ("D#", "A2"),
        ("Eb", "m3"),
        ("E", "M3"),
        ("Fb", "d4"),
        ("E#", "A3"),
        ("F", "P4"),
        ("F#", "A4"),
        ("Gb", "d5"),
        ("G", "P5"),
        ("G#", "A5"),
        ("Ab", "m6"),
        ("A", "M6"),
        ("A#", "A6"),
        ("Bb", "m7"),
        ("B", "M7"),
        ("Cb", "d8"),
    ];
    for (name, expected) in cases {
        let high = Pitch::with_octave(name, 5).unwrap();
        let interval = Interval::new(c5.clone(), high);
        assert_eq!(interval.name(), expected, "C5 to {name}5");
    }
}

#[test]
fn interval_order_is_normalized() {
    let interval = Interval::new(pitch("B"), pitch("C"));
    assert_eq!(interval.low().name(), "C");
    assert_eq!(interval.high().name(), "B");
    assert_eq!(interval.name(), "M7");
}

#[test]
fn augmented_seventh_enharmonic_override() {
    let low = Pitch::with_octave("C", 4).unwrap();
    let high = Pitch::with_octave("B#", 5).unwrap();
    let interval = Interval::new(low, high);
    assert_eq!(interval.semitones(), 12);
    assert_eq!(interval.name(), "A7");
}

#[test]
fn unresolvable_interval_falls_back_to_semitone_label() {
    // C5 up to B#5 spans zero semitones across six letters; the table has
    // no entry for that pair.
    let interval = Interval::new(
        Pitch::with_octave("C", 5).unwrap(),
        Pitch::with_octave("B#", 5).unwrap(),
    );
    assert_eq!(interval.name(), "0 semitones");
}

#[test]
fn apply_interval_respects_key_spelling() {
    let key = Key::new("C", Mode::Major).unwrap();
    // A diminished fifth from C lands on the letter G, so the spelling must
    // be Gb, never F#.
    let result = apply_interval(&pitch("C"), &key, "d5").unwrap();
    assert_eq!(result.name(), "Gb");
}

#[test]
fn apply_interval_carries_octaves() {
    let key = Key::new("C", Mode::Major).unwrap();
    let b4 = Pitch::with_octave("B", 4).unwrap();
    let result = apply_interval(&b4, &key, "M2").unwrap();
    assert_eq!(result.name(), "C#");
    assert_eq!(result.octave(), Some(5));
}

#[test]
fn apply_interval_round_trips_on_pitch_class() {
    let key = Key::new("C", Mode::Major).unwrap();
    let start = Pitch::with_octave("C", 4).unwrap();
    let up = apply_interval(&start, &key, "P5").unwrap();
    assert_eq!(up.name(), "G");
    let back = apply_interval(&up, &key, "P4").unwrap();
    assert_eq!(back.pitch_class(), start.pitch_class());
}

#[test]
fn unsupported_interval_is_rejected() {
    let key = Key::new("C", Mode::Major).unwrap();
    let err = apply_interval(&pitch("C"), &key, "X9").unwrap_err();
    assert_eq!(err.to_string(), "unsupported interval: X9");
}

#[test]
fn e_diminished_triad() {
    let key = Key::new("E", Mode::Diminished).unwrap();
    let chord = Chord::new(ChordKind::Triad, pitch("E"), "diminished", Some(key)).unwrap();
    assert_eq!(names(chord.notes()), ["E", "G", "Bb"]);
    assert_eq!(chord.signature(), [0, 3, 6]);
}

#[test]
fn seventh_and_ninth_generation() {
    let g7 = Chord::new(ChordKind::Seventh, pitch("G"), "dominant7", None).unwrap();
    assert_eq!(names(g7.notes()), ["G", "B", "D", "F"]);

    let c9 = Chord::new(ChordKind::Ninth, pitch("C"), "dominant9", None).unwrap();
    assert_eq!(names(c9.notes()), ["C", "E", "G", "Bb", "D"]);
    assert_eq!(c9.signature(), [0, 2, 4, 7, 10]);
}

#[test]
fn unsupported_quality_is_category_specific() {
    let err = Chord::new(ChordKind::Triad, pitch("C"), "major7", None).unwrap_err();
    assert_eq!(err.to_string(), "unsupported triad quality: major7");

    let err = Chord::new(ChordKind::Seventh, pitch("C"), "major", None).unwrap_err();
    assert_eq!(err.to_string(), "unsupported seventh quality: major");
}

#[test]
fn transpose_regenerates_notes() {
    let mut chord = Chord::new(ChordKind::Triad, pitch("C"), "major", None).unwrap();
    chord.transpose("M2").unwrap();
    assert_eq!(chord.root().name(), "D");
    assert_eq!(chord.key().tonic(), "D");
    assert_eq!(chord.quality(), "major");
    assert_eq!(names(chord.notes()), ["D", "F#", "A"]);
}

#[test]
fn custom_chord_keeps_its_notes() {
    let notes = vec![pitch("C"), pitch("E"), pitch("G")];
    let mut chord = Chord::custom(notes, None).unwrap();
    assert_eq!(chord.kind(), ChordKind::Custom);
    assert_eq!(chord.quality(), "custom");
    assert_eq!(chord.root().name(), "C");

    chord.transpose("M2").unwrap();
    assert_eq!(chord.root().name(), "D");
    // the note list is caller-owned and never regenerated
    assert_eq!(names(chord.notes()), ["C", "E", "G"]);

    let err = Chord::custom(Vec::new(), None).unwrap_err();
    assert!(matches!(err, ChordError::EmptyNotes));
}

#[test]
fn note_edits_do_not_regenerate() {
    let mut chord = Chord::new(ChordKind::Triad, pitch("C"), "major", None).unwrap();
    chord.add_note(pitch("Bb"));
    assert_eq!(names(chord.notes()), ["C", "E", "G", "Bb"]);

    // adding an enharmonic equal is a no-op
    chord.add_note(pitch("A#"));
    assert_eq!(chord.notes().len(), 4);

    chord.remove_note(&pitch("Bb"));
    assert_eq!(names(chord.notes()), ["C", "E", "G"]);

    chord.add_notes([pitch("A"), pitch("B")]);
    chord.remove_notes([&pitch("A"), &pitch("B")]);
    assert_eq!(names(chord.notes()), ["C", "E", "G"]);
}
