//! Per-node enumeration of minimal absent words and relative words.
//!
//! A node `W` is examined only when it is a maximal repeat of at least one
//! text and `|W| + 2 >= minlen`. Candidate words are `i·W·j` with both
//! endpoints real nucleotides; the boundary symbol still counts towards
//! branching and flank totals.

use crate::libs::accumulator::Accumulator;
use crate::libs::alphabet::NUCLEOTIDES;
use crate::libs::error::MawError;
use crate::libs::stats::{ExtensionStats, NodeStats};
use itertools::iproduct;

/// `i·W·j` is a minimal absent word of the text: `i·W` and `W·j` occur, `i·W·j` does not.
pub fn is_maw(ext: &ExtensionStats, i: usize, j: usize) -> bool {
    ext.extends(i, j) && ext.freq(i, j) == 0
}

/// `i·W·j` occurs at most `f1` times although `i·W` and `W·j` occur at least `f2` times each.
pub fn is_rw(ext: &ExtensionStats, i: usize, j: usize, f1: u32, f2: u32) -> bool {
    ext.left_flank(i) >= f2 as u64 && ext.right_flank(j) >= f2 as u64 && ext.freq(i, j) <= f1
}

/// Strict MAWs, per text and shared, plus the weighted-length distance.
///
/// A word absent from one text adds `1/|w|^2`; a word absent from both
/// takes `2/|w|^2` back, so shared absences pull the distance down.
pub fn visit_absolute(node: &NodeStats, acc: &mut Accumulator) -> Result<(), MawError> {
    acc.enter(node)?;
    if !node.passes_gate(acc.minlen()) {
        return Ok(());
    }

    let len = (node.string_depth + 2) as f64;
    let weight = 1.0 / (len * len);
    let (t1, t2) = (node.text1(), node.text2());

    for (i, j) in iproduct!(NUCLEOTIDES, NUCLEOTIDES) {
        let (in1, in2) = (is_maw(t1, i, j), is_maw(t2, i, j));
        if in1 {
            acc.counts.text1 += 1;
            acc.weighted_length += weight;
        }
        if in2 {
            acc.counts.text2 += 1;
            acc.weighted_length += weight;
        }
        if in1 && in2 {
            acc.counts.both += 1;
            acc.weighted_length -= 2.0 * weight;
            acc.emit(i, j)?;
        }
    }
    Ok(())
}

/// Relative words: rare `i·W·j` with well-supported flanks.
pub fn visit_relative(
    node: &NodeStats,
    acc: &mut Accumulator,
    f1: u32,
    f2: u32,
) -> Result<(), MawError> {
    acc.enter(node)?;
    if !node.passes_gate(acc.minlen()) {
        return Ok(());
    }

    let (t1, t2) = (node.text1(), node.text2());
    for (i, j) in iproduct!(NUCLEOTIDES, NUCLEOTIDES) {
        let (in1, in2) = (is_rw(t1, i, j, f1, f2), is_rw(t2, i, j, f1, f2));
        if in1 {
            acc.counts.text1 += 1;
        }
        if in2 {
            acc.counts.text2 += 1;
        }
        if in1 && in2 {
            acc.counts.both += 1;
            acc.emit(i, j)?;
        }
    }
    Ok(())
}

/// MAWs of text 1 that do occur in text 2. Only the shared count is kept.
///
/// The gate is the shared one, so a node branching in text 2 alone is
/// still examined even though only text 1's extensions are tested.
pub fn visit_asymmetric(node: &NodeStats, acc: &mut Accumulator) -> Result<(), MawError> {
    acc.enter(node)?;
    if !node.passes_gate(acc.minlen()) {
        return Ok(());
    }

    let (t1, t2) = (node.text1(), node.text2());
    for (i, j) in iproduct!(NUCLEOTIDES, NUCLEOTIDES) {
        if is_maw(t1, i, j) && t2.freq(i, j) != 0 {
            acc.counts.both += 1;
            acc.emit(i, j)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::accumulator::WordCounts;
    use crate::libs::alphabet::*;
    use crate::libs::sink::SharedSink;
    use approx::assert_relative_eq;
    use tempfile::tempdir;

    fn ext(pairs: &[(u8, u8, u32)]) -> ExtensionStats {
        let mut freqs = [[0u32; SIGMA]; SIGMA];
        for &(i, j, f) in pairs {
            freqs[i as usize][j as usize] = f;
        }
        ExtensionStats::from_freqs(freqs)
    }

    // root of #ACGT# and #ACGA#
    fn root_acgt_acga() -> NodeStats {
        NodeStats::new(
            0,
            0,
            ext(&[(BOUNDARY, A, 1), (A, C, 1), (C, G, 1), (G, T, 1), (T, BOUNDARY, 1)]),
            ext(&[(BOUNDARY, A, 1), (A, C, 1), (C, G, 1), (G, A, 1), (A, BOUNDARY, 1)]),
        )
    }

    #[test]
    fn absolute_root_counts() {
        let mut acc = Accumulator::template(1, 8, 8, None);
        visit_absolute(&root_acgt_acga(), &mut acc).unwrap();

        assert_eq!(
            acc.counts(),
            WordCounts {
                both: 6,
                text1: 13,
                text2: 6
            }
        );
        assert_relative_eq!(acc.weighted_length(), (13.0 + 6.0 - 12.0) / 4.0);
    }

    #[test]
    fn terminal_pair_is_text1_only() {
        let node = root_acgt_acga();
        // A·T: A occurs on the left and T on the right in text 1 only
        assert!(is_maw(node.text1(), A as usize, T as usize));
        assert!(!is_maw(node.text2(), A as usize, T as usize));
    }

    #[test]
    fn joint_words_are_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let sink = SharedSink::append(&path).unwrap();

        let mut acc = Accumulator::template(0, 8, 8, Some(sink));
        visit_absolute(&root_acgt_acga(), &mut acc).unwrap();
        acc.combine(vec![]).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "AA\nAG\nCA\nCC\nGC\nGG\n"
        );
    }

    #[test]
    fn minlen_gate() {
        let mut acc = Accumulator::template(3, 8, 8, None);
        visit_absolute(&root_acgt_acga(), &mut acc).unwrap();
        assert_eq!(acc.counts(), WordCounts::default());
    }

    #[test]
    fn non_branching_node_is_skipped() {
        let mut acc = Accumulator::template(0, 8, 8, None);
        let node = NodeStats::new(0, 0, ext(&[(A, C, 2)]), ext(&[(G, T, 1)]));
        visit_absolute(&node, &mut acc).unwrap();
        visit_relative(&node, &mut acc, 5, 0).unwrap();
        visit_asymmetric(&node, &mut acc).unwrap();
        assert_eq!(acc.counts(), WordCounts::default());
    }

    #[test]
    fn boundary_endpoints_are_never_counted() {
        // #·W·# is absent but its endpoints are the sentinel
        let t = ext(&[(BOUNDARY, A, 1), (C, BOUNDARY, 1)]);
        let mut acc = Accumulator::template(0, 8, 8, None);
        visit_absolute(&NodeStats::new(0, 0, t.clone(), t), &mut acc).unwrap();

        // only C·A qualifies
        assert_eq!(
            acc.counts(),
            WordCounts {
                both: 1,
                text1: 1,
                text2: 1
            }
        );
    }

    #[test]
    fn relative_word_flank_threshold() {
        let t1 = ext(&[(A, C, 1), (A, G, 1), (C, T, 2), (G, T, 1)]);
        let node = NodeStats::new(2, T, t1, ExtensionStats::default());

        let mut acc = Accumulator::template(0, 8, 8, None);
        acc.rewind_path(&[G]);
        visit_relative(&node, &mut acc, 0, 2).unwrap();

        assert_eq!(
            acc.counts(),
            WordCounts {
                both: 0,
                text1: 1,
                text2: 0
            }
        );
    }

    #[test]
    fn relative_word_flanks_count_the_boundary() {
        // T·W is only ever followed by the boundary, yet its flank total is 1
        let t1 = ext(&[(T, BOUNDARY, 1), (A, C, 1), (A, G, 1)]);
        assert_eq!(t1.left_flank(T as usize), 1);

        let node = NodeStats::new(0, 0, t1, ExtensionStats::default());
        let mut acc = Accumulator::template(0, 8, 8, None);
        visit_relative(&node, &mut acc, 0, 1).unwrap();

        // T·C and T·G; A·C and A·G occur
        assert_eq!(acc.counts().text1, 2);
    }

    #[test]
    fn relative_words_with_zero_support_are_maws_and_more() {
        // f1 = 0, f2 = 1: every absent pair with present flanks
        let node = root_acgt_acga();
        let mut acc = Accumulator::template(0, 8, 8, None);
        visit_relative(&node, &mut acc, 0, 1).unwrap();
        assert_eq!(acc.counts().text1, 13);
        assert_eq!(acc.counts().text2, 6);
        assert_eq!(acc.counts().both, 6);
    }

    #[test]
    fn asymmetric_presence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let sink = SharedSink::append(&path).unwrap();

        let mut acc = Accumulator::template(0, 8, 8, Some(sink));
        visit_asymmetric(&root_acgt_acga(), &mut acc).unwrap();
        acc.combine(vec![]).unwrap();

        assert_eq!(
            acc.counts(),
            WordCounts {
                both: 1,
                text1: 0,
                text2: 0
            }
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "GA\n");
    }

    #[test]
    fn inconsistent_stats_are_rejected() {
        let mut bad = ext(&[(A, C, 1), (G, T, 1)]);
        bad.right_mask &= !(1 << T);
        let node = NodeStats::new(0, 0, bad, ExtensionStats::default());

        let mut acc = Accumulator::template(0, 8, 8, None);
        assert!(matches!(
            visit_absolute(&node, &mut acc),
            Err(MawError::InconsistentStats { text: 1, .. })
        ));
    }

    #[test]
    fn repeated_visits_are_deterministic() {
        let mut a = Accumulator::template(0, 8, 8, None);
        let mut b = Accumulator::template(0, 8, 8, None);
        for _ in 0..3 {
            visit_absolute(&root_acgt_acga(), &mut a).unwrap();
            visit_absolute(&root_acgt_acga(), &mut b).unwrap();
        }
        assert_eq!(a.counts(), b.counts());
        assert_eq!(a.weighted_length(), b.weighted_length());
        assert_eq!(a.counts().both, 18);
    }
}
