//! The DNA5 alphabet shared by the index, the classifier and the word sink.

/// The sentinel that pads both ends of a text and separates records.
pub const BOUNDARY: u8 = 0;
pub const A: u8 = 1;
pub const C: u8 = 2;
pub const G: u8 = 3;
pub const T: u8 = 4;

/// Boundary plus four nucleotides.
pub const SIGMA: usize = 5;

/// The symbols a word may start or end with.
pub const NUCLEOTIDES: std::ops::RangeInclusive<usize> = 1..=4;

static ACGT: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// ```
/// use pmaw::libs::alphabet::*;
/// assert_eq!(encode(b'a'), A);
/// assert_eq!(encode(b'T'), T);
/// assert_eq!(encode(b'N'), BOUNDARY);
/// assert_eq!(encode(b'-'), BOUNDARY);
/// ```
pub fn encode(byte: u8) -> u8 {
    match byte {
        b'A' | b'a' => A,
        b'C' | b'c' => C,
        b'G' | b'g' => G,
        b'T' | b't' => T,
        _ => BOUNDARY,
    }
}

/// ```
/// use pmaw::libs::alphabet::*;
/// assert_eq!(to_ascii(G), b'G');
/// assert_eq!(to_ascii(BOUNDARY), b'#');
/// ```
pub fn to_ascii(sym: u8) -> u8 {
    match sym {
        1..=4 => ACGT[(sym - 1) as usize],
        _ => b'#',
    }
}

pub fn is_nucleotide(sym: u8) -> bool {
    (A..=T).contains(&sym)
}

/// Renders a symbol string, e.g. for debug output or tests.
pub fn decode(syms: &[u8]) -> String {
    syms.iter().map(|&s| to_ascii(s) as char).collect()
}
