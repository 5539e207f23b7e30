use crate::libs::alphabet::SIGMA;
use crate::libs::error::MawError;

/// Branching statistics of one node in one text.
///
/// Bit `i` of a mask is set when symbol `i` extends the node's word on that
/// side somewhere in the text. `freqs[i][j]` counts the occurrences of
/// `i·W·j`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionStats {
    pub n_left: u32,
    pub n_right: u32,
    pub left_mask: u8,
    pub right_mask: u8,
    pub freqs: [[u32; SIGMA]; SIGMA],
}

impl ExtensionStats {
    /// Builds the stats from a frequency matrix alone; masks and counts are derived.
    ///
    /// ```
    /// use pmaw::libs::stats::ExtensionStats;
    /// let mut freqs = [[0u32; 5]; 5];
    /// freqs[1][2] = 3;
    /// freqs[0][4] = 1;
    /// let ext = ExtensionStats::from_freqs(freqs);
    /// assert_eq!(ext.left_mask, 0b00011);
    /// assert_eq!(ext.right_mask, 0b10100);
    /// assert_eq!((ext.n_left, ext.n_right), (2, 2));
    /// assert!(ext.is_branching());
    /// ```
    pub fn from_freqs(freqs: [[u32; SIGMA]; SIGMA]) -> Self {
        let mut left_mask = 0u8;
        let mut right_mask = 0u8;
        for (i, row) in freqs.iter().enumerate() {
            for (j, &f) in row.iter().enumerate() {
                if f > 0 {
                    left_mask |= 1 << i;
                    right_mask |= 1 << j;
                }
            }
        }

        Self {
            n_left: left_mask.count_ones(),
            n_right: right_mask.count_ones(),
            left_mask,
            right_mask,
            freqs,
        }
    }

    pub fn has_left(&self, i: usize) -> bool {
        self.left_mask & (1 << i) != 0
    }

    pub fn has_right(&self, j: usize) -> bool {
        self.right_mask & (1 << j) != 0
    }

    /// Both `i·W` and `W·j` occur.
    pub fn extends(&self, i: usize, j: usize) -> bool {
        self.has_left(i) && self.has_right(j)
    }

    pub fn freq(&self, i: usize, j: usize) -> u32 {
        self.freqs[i][j]
    }

    /// At least two distinct symbols on each side.
    pub fn is_branching(&self) -> bool {
        self.n_left >= 2 && self.n_right >= 2
    }

    /// Occurrences of `i·W`, every right context included.
    pub fn left_flank(&self, i: usize) -> u64 {
        self.freqs[i].iter().map(|&f| f as u64).sum()
    }

    /// Occurrences of `W·j`, every left context included.
    pub fn right_flank(&self, j: usize) -> u64 {
        self.freqs.iter().map(|row| row[j] as u64).sum()
    }

    /// Occurrences of `W` itself.
    pub fn total(&self) -> u64 {
        self.freqs.iter().flatten().map(|&f| f as u64).sum()
    }
}

/// What the traversal driver hands to the classifier on every visit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub string_depth: usize,
    /// Symbol appended to the parent's word; meaningless at the root.
    pub last_char: u8,
    pub texts: [ExtensionStats; 2],
}

impl NodeStats {
    pub fn new(string_depth: usize, last_char: u8, text1: ExtensionStats, text2: ExtensionStats) -> Self {
        Self {
            string_depth,
            last_char,
            texts: [text1, text2],
        }
    }

    pub fn text1(&self) -> &ExtensionStats {
        &self.texts[0]
    }

    pub fn text2(&self) -> &ExtensionStats {
        &self.texts[1]
    }

    /// The node is a maximal repeat in at least one text and long enough
    /// for its extensions `i·W·j` to reach `minlen`.
    pub fn passes_gate(&self, minlen: usize) -> bool {
        self.string_depth + 2 >= minlen
            && (self.text1().is_branching() || self.text2().is_branching())
    }

    /// Rejects counts that are not backed by the extension masks.
    pub fn validate(&self) -> Result<(), MawError> {
        if self.string_depth > 0 && !crate::libs::alphabet::is_nucleotide(self.last_char) {
            return Err(MawError::BadSymbol(self.last_char));
        }
        for (t, ext) in self.texts.iter().enumerate() {
            for i in 0..SIGMA {
                for j in 0..SIGMA {
                    if ext.freqs[i][j] > 0 && !ext.extends(i, j) {
                        return Err(MawError::InconsistentStats {
                            text: t + 1,
                            left: i,
                            right: j,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
