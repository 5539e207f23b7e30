//! Markovian string kernel between two texts.
//!
//! Every node contributes, for each pair of extension symbols, how far the
//! observed `i·W·j` frequency is from what the independence model predicts
//! from `i·W`, `W·j` and `W`. The three sums `N`, `D1`, `D2` are reduced
//! across workers and turned into `N / sqrt(D1 * D2)`.

use crate::libs::accumulator::Accumulator;
use crate::libs::alphabet::SIGMA;
use crate::libs::error::MawError;
use crate::libs::stats::{ExtensionStats, NodeStats};
use std::ops::AddAssign;

/// Finite-sample correction for words of length `y` in a text of length `L`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correction {
    len: usize,
}

impl Correction {
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// `g(y) = ((L-y+2)/(L-y+1)) * ((L-y+2)/(L-y+3))`, and exactly 1 for
    /// `y > L`: the text has no word that long, so it adds no excess.
    ///
    /// ```
    /// use pmaw::libs::kernel::Correction;
    /// let g = Correction::new(10);
    /// assert!((g.g(1) - 121.0 / 120.0).abs() < 1e-12);
    /// assert!((g.g(10) - 4.0 / 3.0).abs() < 1e-12);
    /// assert_eq!(g.g(11), 1.0);
    /// assert_eq!(g.excess(40), 0.0);
    /// ```
    pub fn g(&self, y: usize) -> f64 {
        if y > self.len {
            return 1.0;
        }
        let r = self.len as f64 - y as f64;
        (r + 2.0) / (r + 1.0) * (r + 2.0) / (r + 3.0)
    }

    pub fn excess(&self, y: usize) -> f64 {
        self.g(y) - 1.0
    }

    /// Dispersion of a text in which no extension is ever resolved:
    /// `sum_{i=1..L} sum_{y=1..i} (g(y)-1)^2`.
    pub fn baseline(&self) -> f64 {
        let mut prefix = 0.0;
        let mut total = 0.0;
        for y in 1..=self.len {
            prefix += self.excess(y) * self.excess(y);
            total += prefix;
        }
        total
    }
}

/// Prefix sums of `(g1-1)^2`, `(g2-1)^2` and `(g1-1)(g2-1)` indexed by word length.
///
/// Entries only depend on the two text lengths, so a table is extended on
/// demand and never rewritten. Index 0 is unused.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixTables {
    corr1: Correction,
    corr2: Correction,
    sum1: Vec<f64>,
    sum2: Vec<f64>,
    cross: Vec<f64>,
}

impl PrefixTables {
    pub fn new(len1: usize, len2: usize) -> Self {
        let corr1 = Correction::new(len1);
        let corr2 = Correction::new(len2);
        let (e1, e2) = (corr1.excess(1), corr2.excess(1));

        Self {
            corr1,
            corr2,
            sum1: vec![0.0, e1 * e1],
            sum2: vec![0.0, e2 * e2],
            cross: vec![0.0, e1 * e2],
        }
    }

    pub fn correction1(&self) -> Correction {
        self.corr1
    }

    pub fn correction2(&self) -> Correction {
        self.corr2
    }

    /// Highest word length with a prefix sum.
    pub fn depth(&self) -> usize {
        self.sum1.len() - 1
    }

    /// Appends terms until length `y` is covered.
    pub fn ensure(&mut self, y: usize) {
        while self.sum1.len() <= y {
            let k = self.sum1.len();
            let (e1, e2) = (self.corr1.excess(k), self.corr2.excess(k));
            self.sum1.push(self.sum1[k - 1] + e1 * e1);
            self.sum2.push(self.sum2[k - 1] + e2 * e2);
            self.cross.push(self.cross[k - 1] + e1 * e2);
        }
    }

    pub fn sum1(&self, y: usize) -> f64 {
        self.sum1[y]
    }

    pub fn sum2(&self, y: usize) -> f64 {
        self.sum2[y]
    }

    pub fn cross(&self, y: usize) -> f64 {
        self.cross[y]
    }
}

/// The reducible part of the kernel state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KernelSums {
    pub n: f64,
    pub d1: f64,
    pub d2: f64,
}

impl AddAssign for KernelSums {
    fn add_assign(&mut self, rhs: Self) {
        self.n += rhs.n;
        self.d1 += rhs.d1;
        self.d2 += rhs.d2;
    }
}

impl KernelSums {
    /// `N / sqrt(D1 * D2)`, or `None` when the normalization is not positive.
    ///
    /// Texts of different lengths stay defined: terms for words longer than
    /// the shorter text carry no excess for that text.
    ///
    /// ```
    /// use pmaw::libs::kernel::KernelSums;
    /// let sums = KernelSums { n: 2.0, d1: 4.0, d2: 1.0 };
    /// assert_eq!(sums.score(), Some(1.0));
    /// assert_eq!(KernelSums { n: 1.0, d1: 0.0, d2: 3.0 }.score(), None);
    /// ```
    pub fn score(&self) -> Option<f64> {
        let norm = self.d1 * self.d2;
        if norm > 0.0 && norm.is_finite() {
            Some(self.n / norm.sqrt())
        } else {
            None
        }
    }
}

/// Relative deviation of `i·W·j` from `f(iW) * f(Wj) / f(W)`, scaled by `g`.
fn deviation(ext: &ExtensionStats, i: usize, j: usize, g: f64) -> f64 {
    let fw = ext.total() as f64;
    let faw = ext.left_flank(i) as f64;
    let fwb = ext.right_flank(j) as f64;
    g * fw / faw * ext.freq(i, j) as f64 / fwb - 1.0
}

/// Adds the kernel contributions of one node.
///
/// Every node is examined, maximal or not: the bulk terms account for
/// extensions that are never resolved deeper in the tree.
///
/// The bulk adjustment (unresolved left extensions times the prefix sum at
/// `y - 1`) and the corrections carried from one pair to the next follow an
/// approximation whose statistical derivation has not been checked
/// independently. Both are kept as-is.
///
/// The bulk term counts unresolved *left* extensions, which matches a tree
/// whose children are left extensions of `W`. [`JointTraversal`] grows words
/// to the right, so `N`, `D1` and `D2` agree with a left-extension walk only
/// up to the bulk terms of nodes the two node sets do not share.
///
/// [`JointTraversal`]: crate::libs::driver::JointTraversal
pub fn visit_kernel(node: &NodeStats, acc: &mut Accumulator) -> Result<(), MawError> {
    acc.enter(node)?;

    let y = node.string_depth + 2;
    acc.tables.ensure(y);
    let tables = &acc.tables;
    let (t1, t2) = (node.text1(), node.text2());
    let (g1, g2) = (tables.correction1().g(y), tables.correction2().g(y));
    let (e1, e2) = (g1 - 1.0, g2 - 1.0);

    let mut unresolved1 = (t1.left_mask & 0x1f).count_ones() as i64;
    let mut unresolved2 = (t2.left_mask & 0x1f).count_ones() as i64;
    let mut unresolved_n = (t1.left_mask & t2.left_mask & 0x1f).count_ones() as i64;

    let mut c1 = tables.sum1(y);
    let mut c2 = tables.sum2(y);
    let mut delta = KernelSums::default();

    for i in 0..SIGMA {
        for j in 0..SIGMA {
            let inner = i != 0 && j != 0;

            if t1.extends(i, j) {
                if t1.freq(i, j) == 0 {
                    if inner {
                        c1 = -1.0;
                        delta.d1 += 1.0;
                    }
                } else {
                    unresolved1 -= 1;
                    if t1.is_branching() {
                        c1 = deviation(t1, i, j, g1);
                        delta.d1 += c1 * c1 - e1 * e1;
                    }
                }
            }

            if t2.extends(i, j) {
                if t2.freq(i, j) == 0 {
                    if inner {
                        c2 = -1.0;
                        delta.d2 += 1.0;
                    }
                } else {
                    unresolved2 -= 1;
                    if t2.is_branching() {
                        c2 = deviation(t2, i, j, g2);
                        delta.d2 += c2 * c2 - e2 * e2;
                    }
                }
            }

            if t1.extends(i, j) && t2.extends(i, j) {
                let (f1, f2) = (t1.freq(i, j), t2.freq(i, j));
                if f1 == 0 && f2 == 0 {
                    if inner {
                        delta.n += 1.0;
                    }
                } else {
                    delta.n += c1 * c2 - e1 * e2;
                }
                if f1 != 0 && f2 != 0 {
                    unresolved_n -= 1;
                }
            }
        }
    }

    delta.d1 += unresolved1 as f64 * tables.sum1(y - 1);
    delta.d2 += unresolved2 as f64 * tables.sum2(y - 1);
    delta.n += unresolved_n as f64 * tables.cross(y - 1);

    acc.kernel += delta;
    Ok(())
}
