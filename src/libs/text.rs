use crate::libs::alphabet::{encode, BOUNDARY};

/// An encoded text, padded with one boundary symbol on each side.
///
/// Several records are joined by a boundary, and every byte outside `ACGT`
/// becomes a boundary too, so no word ever spans a separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextIndex {
    padded: Vec<u8>,
}

impl TextIndex {
    /// ```
    /// use pmaw::libs::text::TextIndex;
    /// let text = TextIndex::from_ascii(b"ACgN");
    /// assert_eq!(text.len(), 4);
    /// assert_eq!(text.padded(), &[0, 1, 2, 3, 0, 0]);
    /// assert_eq!(text.correction_len(), 6);
    /// ```
    pub fn from_ascii(seq: &[u8]) -> Self {
        Self::from_records([seq])
    }

    /// ```
    /// use pmaw::libs::text::TextIndex;
    /// let text = TextIndex::from_records([&b"AC"[..], &b"T"[..]]);
    /// assert_eq!(text.padded(), &[0, 1, 2, 0, 4, 0]);
    /// ```
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut padded = vec![BOUNDARY];
        for (k, record) in records.into_iter().enumerate() {
            if k > 0 {
                padded.push(BOUNDARY);
            }
            padded.extend(record.iter().map(|&b| encode(b)));
        }
        padded.push(BOUNDARY);

        Self { padded }
    }

    /// Length of the text without the two outer boundaries.
    pub fn len(&self) -> usize {
        self.padded.len() - 2
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn padded(&self) -> &[u8] {
        &self.padded
    }

    /// `L` in the kernel's length correction.
    pub fn correction_len(&self) -> usize {
        self.len() + 2
    }
}
