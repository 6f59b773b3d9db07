//! # Note Names
//!
//! The fixed vocabulary of Arab-Ottoman-Persian note names, laid out as five octave
//! tables of 37 positions each. Position 36 of every table is the "nīm" pickup leading
//! into the next table's position 0.
//!
//! Tuning systems name their pitch values with entries from the base octave table
//! ([`OCTAVE_ONE`]) or the one above it ([`OCTAVE_TWO`]); the lattice then reads the
//! same position out of the neighbouring tables to name the other octaves.
//!
//! A pitch class without a name carries [`NONE`].

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Marker for an unnamed pitch class.
pub const NONE: &str = "none";

/// Positions per octave table.
pub const OCTAVE_SIZE: usize = 37;

/// Number of octave tables.
pub const OCTAVE_TABLES: usize = 5;

/// Lowest octave, one below the tuning system's base octave.
pub static OCTAVE_ZERO: [&str; OCTAVE_SIZE] = [
    "qarār yegāh",
    "qarār qarār nīm ḥiṣār",
    "qarār shūrī",
    "qarār qarār ḥiṣār",
    "qarār qarār tīk ḥiṣār/shūrī",
    "qarār nīm ʿushayrān",
    "qarār ʿushayrān",
    "qarār nīm ʿajam ʿushayrān",
    "qarār ʿajam ʿushayrān",
    "qarār nairūz",
    "qarār tīk ʿajam ʿushayrān",
    "qarār ʿirāq",
    "qarār rahāwī",
    "qarār nīm kawasht/rahāwī",
    "qarār kawasht",
    "qarār tīk kawasht",
    "qarār rāst",
    "qarār tīk rāst",
    "qarār nīm zīrgūleh",
    "qarār zīrgūleh",
    "qarār tīk zīrgūleh",
    "qarār dūgāh",
    "qarār nīm kurdī/nahāwand",
    "qarār nahāwand",
    "qarār kurdī",
    "qarār tīk kūrdī",
    "qarār segāh",
    "qarār nīm būselīk",
    "qarār būselīk/ʿushshāq",
    "qarār tīk būselīk",
    "qarār chahārgāh",
    "qarār tīk chahārgāh",
    "qarār nīm ḥijāz",
    "qarār ṣabā",
    "qarār ḥijāz",
    "qarār tīk ḥijāz/ṣabā",
    "nīm yegāh",
];

/// Base octave: yegāh to nīm nawā.
pub static OCTAVE_ONE: [&str; OCTAVE_SIZE] = [
    "yegāh",
    "qarār nīm ḥiṣār",
    "shūrī",
    "qarār ḥiṣār",
    "qarār tīk ḥiṣār/shūrī",
    "nīm ʿushayrān",
    "ʿushayrān",
    "nīm ʿajam ʿushayrān",
    "ʿajam ʿushayrān",
    "nairūz",
    "tīk ʿajam ʿushayrān",
    "ʿirāq",
    "rahāwī",
    "nīm kawasht",
    "kawasht",
    "tīk kawasht",
    "rāst",
    "tīk rāst",
    "nīm zīrgūleh",
    "zīrgūleh",
    "tīk zīrgūleh",
    "dūgāh",
    "nīm kurdī/nahāwand",
    "nahāwand",
    "kurdī",
    "tīk kūrdī",
    "segāh",
    "nīm būselīk",
    "būselīk/ʿushshāq",
    "tīk būselīk",
    "chahārgāh",
    "tīk chahārgāh",
    "nīm ḥijāz",
    "ṣabā",
    "ḥijāz",
    "tīk ḥijāz/ṣabā",
    "nīm nawā",
];

/// nawā to nīm saham/ramal tūtī.
pub static OCTAVE_TWO: [&str; OCTAVE_SIZE] = [
    "nawā",
    "nīm ḥiṣār",
    "jawāb shūrī",
    "ḥiṣār",
    "tīk ḥiṣār",
    "nīm ḥusaynī",
    "ḥusaynī",
    "nīm ʿajam",
    "ʿajam",
    "jawāb nairūz",
    "tīk ʿajam",
    "awj",
    "jawāb rahāwī",
    "nīm māhūr",
    "māhūr",
    "tīk māhūr",
    "kurdān",
    "tīk kurdān",
    "nīm shahnāz",
    "shahnāz",
    "jawāb tīk zīrgūleh",
    "muḥayyar",
    "nīm sunbuleh",
    "jawāb nahāwand",
    "sunbuleh/zawāl",
    "jawāb tīk kūrdī",
    "buzurk",
    "jawāb nīm būselīk",
    "jawāb būselīk",
    "jawāb tīk būselīk",
    "māhūrān",
    "tīk māhūrān",
    "jawāb nīm ḥijāz",
    "jawāb ṣabā",
    "jawāb ḥijāz",
    "jawāb tīk ḥijāz",
    "nīm saham/ramal tūtī",
];

/// saham/ramal tūtī to jawāb saham/ramal tūtī.
pub static OCTAVE_THREE: [&str; OCTAVE_SIZE] = [
    "saham/ramal tūtī",
    "jawāb nīm ḥiṣār",
    "jawāb jawāb shūrī",
    "jawāb ḥiṣār",
    "jawāb tīk ḥiṣār",
    "jawāb nīm ḥusaynī",
    "jawāb ḥusaynī",
    "jawāb nīm ʿajam",
    "jawāb ʿajam",
    "jawāb jawāb nairūz",
    "jawāb tīk ʿajam",
    "jawāb awj",
    "jawāb jawāb rahāwī",
    "jawāb nīm māhūr",
    "jawāb māhūr",
    "jawāb tīk māhūr",
    "jawāb kurdān",
    "jawāb tīk kurdān",
    "jawāb nīm shahnāz",
    "jawāb shahnāz",
    "jawāb jawāb tīk zīrgūleh",
    "jawāb muḥayyar",
    "jawāb nīm sunbuleh",
    "jawāb jawāb nahāwand",
    "jawāb sunbuleh/zawāl",
    "jawāb jawāb tīk kūrdī",
    "jawāb buzurk",
    "jawāb jawāb nīm būselīk",
    "jawāb jawāb būselīk",
    "jawāb jawāb tīk būselīk",
    "jawāb māhūrān",
    "jawāb tīk māhūrān",
    "jawāb jawāb nīm ḥijāz",
    "jawāb jawāb ṣabā",
    "jawāb jawāb ḥijāz",
    "jawāb jawāb tīk ḥijāz",
    "jawāb saham/ramal tūtī",
];

/// Highest octave.
pub static OCTAVE_FOUR: [&str; OCTAVE_SIZE] = [
    "jawāb saham/ramal tūtī",
    "jawāb jawāb nīm ḥiṣār",
    "jawāb jawāb jawāb shūrī",
    "jawāb jawāb ḥiṣār",
    "jawāb jawāb tīk ḥiṣār",
    "jawāb jawāb nīm ḥusaynī",
    "jawāb jawāb ḥusaynī",
    "jawāb jawāb nīm ʿajam",
    "jawāb jawāb ʿajam",
    "jawāb jawāb jawāb nairūz",
    "jawāb jawāb tīk ʿajam",
    "jawāb jawāb awj",
    "jawāb jawāb jawāb rahāwī",
    "jawāb jawāb nīm māhūr",
    "jawāb jawāb māhūr",
    "jawāb jawāb tīk māhūr",
    "jawāb jawāb kurdān",
    "jawāb jawāb tīk kurdān",
    "jawāb jawāb nīm shahnāz",
    "jawāb jawāb shahnāz",
    "jawāb jawāb jawāb tīk zīrgūleh",
    "jawāb jawāb muḥayyar",
    "jawāb jawāb nīm sunbuleh",
    "jawāb jawāb jawāb nahāwand",
    "jawāb jawāb sunbuleh/zawāl",
    "jawāb jawāb jawāb tīk kūrdī",
    "jawāb jawāb buzurk",
    "jawāb jawāb jawāb nīm būselīk",
    "jawāb jawāb jawāb būselīk",
    "jawāb jawāb jawāb tīk būselīk",
    "jawāb jawāb māhūrān",
    "jawāb jawāb tīk māhūrān",
    "jawāb jawāb jawāb nīm ḥijāz",
    "jawāb jawāb jawāb ṣabā",
    "jawāb jawāb jawāb ḥijāz",
    "jawāb jawāb jawāb tīk ḥijāz",
    "jawāb jawāb saham/ramal tūtī",
];

static TABLES: [&[&str; OCTAVE_SIZE]; OCTAVE_TABLES] =
    [&OCTAVE_ZERO, &OCTAVE_ONE, &OCTAVE_TWO, &OCTAVE_THREE, &OCTAVE_FOUR];

/// English spelling of each table position, with the octave the letter belongs to
/// relative to the table (C starts a new octave number).
static ENGLISH_SPELLINGS: [(&str, u8); OCTAVE_SIZE] = [
    ("G", 0),
    ("G-#", 0),
    ("Ab-", 0),
    ("Ab", 0),
    ("A-b", 0),
    ("A-", 0),
    ("A", 0),
    ("A-#", 0),
    ("Bb", 0),
    ("Bb+", 0),
    ("Bb++", 0),
    ("B-b", 0),
    ("B--", 0),
    ("B-", 0),
    ("B", 0),
    ("C-b", 1),
    ("C", 1),
    ("C+", 1),
    ("C-#", 1),
    ("C#", 1),
    ("D-b", 1),
    ("D", 1),
    ("D-#", 1),
    ("Eb-", 1),
    ("Eb", 1),
    ("Eb+", 1),
    ("E-b", 1),
    ("E-", 1),
    ("E", 1),
    ("F-b", 1),
    ("F", 1),
    ("F+", 1),
    ("F-#", 1),
    ("F#-", 1),
    ("F#", 1),
    ("G-b", 1),
    ("G-", 1),
];

/// Where a name sits in the octave tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotePosition {
    pub octave: usize,
    pub index: usize,
}

// Names appearing twice (the pickup at position 36 and the next table's position 0)
// resolve to the lower index.
static POSITIONS: Lazy<HashMap<&'static str, NotePosition>> = Lazy::new(|| {
    let mut positions: HashMap<&'static str, NotePosition> = HashMap::new();
    for (octave, table) in TABLES.iter().enumerate() {
        for (index, name) in table.iter().enumerate() {
            let candidate = NotePosition { octave, index };
            positions
                .entry(*name)
                .and_modify(|existing| {
                    if index < existing.index {
                        *existing = candidate;
                    }
                })
                .or_insert(candidate);
        }
    }
    positions
});

pub fn octave_table(octave: usize) -> Option<&'static [&'static str; OCTAVE_SIZE]> {
    TABLES.get(octave).copied()
}

pub fn position(name: &str) -> Option<NotePosition> {
    POSITIONS.get(name).copied()
}

pub fn is_named(name: &str) -> bool {
    name != NONE && position(name).is_some()
}

/// Name at a table position, or [`NONE`] when the position does not exist.
pub fn name_at(octave: usize, index: usize) -> &'static str {
    octave_table(octave)
        .and_then(|table| table.get(index))
        .copied()
        .unwrap_or(NONE)
}

/// The same position `octaves` tables up (or down).
pub fn shift_note_name(name: &str, octaves: i32) -> &'static str {
    let Some(NotePosition { octave, index }) = position(name) else {
        return NONE;
    };
    let target = octave as i64 + octaves as i64;
    if target < 0 {
        return NONE;
    }
    name_at(target as usize, index)
}

/// Column of a tuning-system note name across the lattice.
///
/// Base-octave names map to `0..37`, names from the octave above to `37..74`.
pub fn selection_index(name: &str) -> Option<usize> {
    if let Some(index) = OCTAVE_ONE.iter().position(|n| *n == name) {
        return Some(index);
    }
    OCTAVE_TWO
        .iter()
        .position(|n| *n == name)
        .map(|index| OCTAVE_SIZE + index)
}

/// Name of the pitch class at lattice `octave` (0..=3) in the column `selection`.
pub fn lattice_note_name(octave: usize, selection: Option<usize>) -> &'static str {
    match selection {
        Some(column) if column < OCTAVE_SIZE => name_at(octave, column),
        Some(column) => name_at(octave + 1, column - OCTAVE_SIZE),
        None => NONE,
    }
}

/// Scientific pitch spelling such as `"E-b3"`, or `"--"` for names outside the tables.
///
/// `yegāh` is G2 and `rāst` is C3.
pub fn english_name(name: &str) -> String {
    match position(name) {
        Some(NotePosition { octave, index }) => {
            let (spelling, offset) = ENGLISH_SPELLINGS[index];
            format!("{}{}", spelling, octave + 1 + offset as usize)
        }
        None => "--".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_complete() {
        for octave in 0..OCTAVE_TABLES {
            let table = octave_table(octave).unwrap();
            assert!(table.iter().all(|name| !name.is_empty()));
        }
        assert_eq!(name_at(4, 17), "jawāb jawāb tīk kurdān");
        assert_eq!(name_at(5, 0), NONE);
    }

    #[test]
    fn test_position_prefers_lower_index() {
        assert_eq!(position("rāst"), Some(NotePosition { octave: 1, index: 16 }));
        assert_eq!(
            position("jawāb saham/ramal tūtī"),
            Some(NotePosition { octave: 4, index: 0 })
        );
        assert_eq!(position("do"), None);
        assert!(!is_named(NONE));
    }

    #[test]
    fn test_shift_note_name() {
        assert_eq!(shift_note_name("rāst", 1), "kurdān");
        assert_eq!(shift_note_name("nawā", -1), "yegāh");
        assert_eq!(shift_note_name("qarār yegāh", -1), NONE);
        assert_eq!(shift_note_name("unknown", 1), NONE);
    }

    #[test]
    fn test_selection_and_lattice_names() {
        assert_eq!(selection_index("rāst"), Some(16));
        assert_eq!(selection_index("nawā"), Some(OCTAVE_SIZE));
        assert_eq!(lattice_note_name(0, Some(16)), "qarār rāst");
        assert_eq!(lattice_note_name(1, Some(OCTAVE_SIZE)), "nawā");
        assert_eq!(lattice_note_name(3, Some(OCTAVE_SIZE + 11)), "jawāb jawāb awj");
        assert_eq!(lattice_note_name(2, None), NONE);
    }

    #[test]
    fn test_english_names() {
        assert_eq!(english_name("yegāh"), "G2");
        assert_eq!(english_name("rāst"), "C3");
        assert_eq!(english_name("segāh"), "E-b3");
        assert_eq!(english_name("nawā"), "G3");
        assert_eq!(english_name("none"), "--");
    }
}
