//! A reference joint traversal over two texts.
//!
//! Nodes are words grown one symbol to the right, starting from the empty
//! word. A child `W·c` is kept only if it is left-branching in the union of
//! the two texts; that set is closed under prefixes and contains every
//! maximal repeat of either text, which is all the classifier looks at.
//!
//! The top of the tree (depth below the split depth) is visited with the
//! template accumulator. Subtrees at the split depth are dealt round-robin
//! to `cores` scoped threads, each with its own forked accumulator.

use crate::libs::accumulator::Accumulator;
use crate::libs::alphabet::SIGMA;
use crate::libs::error::MawError;
use crate::libs::stats::{ExtensionStats, NodeStats};
use crate::libs::strategy::NodeVisitor;
use crate::libs::text::TextIndex;

/// A node waiting on the stack: the positions in each padded text where its
/// word starts.
#[derive(Debug, Clone)]
struct Frame {
    depth: usize,
    last_char: u8,
    occ: [Vec<usize>; 2],
}

/// A subtree handed to a worker, with the symbols of its root's parent.
#[derive(Debug)]
struct Task {
    ancestors: Vec<u8>,
    frame: Frame,
}

pub struct JointTraversal<'a> {
    texts: [&'a TextIndex; 2],
    cores: usize,
}

impl<'a> JointTraversal<'a> {
    pub fn new(text1: &'a TextIndex, text2: &'a TextIndex, cores: usize) -> Self {
        Self {
            texts: [text1, text2],
            cores: cores.max(1),
        }
    }

    pub fn cores(&self) -> usize {
        self.cores
    }

    /// Shallowest depth with at least four subtrees per worker.
    ///
    /// ```
    /// use pmaw::libs::driver::JointTraversal;
    /// use pmaw::libs::text::TextIndex;
    /// let text = TextIndex::from_ascii(b"ACGT");
    /// assert_eq!(JointTraversal::new(&text, &text, 1).split_depth(), 1);
    /// assert_eq!(JointTraversal::new(&text, &text, 4).split_depth(), 2);
    /// assert_eq!(JointTraversal::new(&text, &text, 5).split_depth(), 3);
    /// ```
    pub fn split_depth(&self) -> usize {
        let mut depth = 1;
        let mut subtrees = 4;
        while subtrees < self.cores * 4 {
            depth += 1;
            subtrees *= 4;
        }
        depth
    }

    /// Visits every node once, then combines the workers into `template`
    /// and tears it down.
    pub fn run<V>(&self, visitor: &V, template: &mut Accumulator) -> Result<(), MawError>
    where
        V: NodeVisitor + ?Sized,
    {
        for text in self.texts {
            if text.len() >= u32::MAX as usize {
                return Err(MawError::TextTooLong(text.len()));
            }
        }

        let split = self.split_depth();
        let tasks = self.walk_top(visitor, template, split)?;
        log::debug!(
            "{} subtrees at depth {} for {} workers",
            tasks.len(),
            split,
            self.cores
        );

        let workers = self.run_workers(visitor, template, &tasks)?;
        visitor.combine(workers, template)?;
        visitor.teardown(template)
    }

    fn walk_top<V>(
        &self,
        visitor: &V,
        template: &mut Accumulator,
        split: usize,
    ) -> Result<Vec<Task>, MawError>
    where
        V: NodeVisitor + ?Sized,
    {
        let mut tasks = vec![];
        let mut stack = vec![(self.root(), Vec::new())];

        while let Some((frame, ancestors)) = stack.pop() {
            if frame.depth >= split {
                tasks.push(Task { ancestors, frame });
                continue;
            }

            visitor.visit(&self.stats(&frame), template)?;

            let mut path = ancestors;
            if frame.depth > 0 {
                path.push(frame.last_char);
            }
            for child in self.children(&frame).into_iter().rev() {
                stack.push((child, path.clone()));
            }
        }

        Ok(tasks)
    }

    fn run_workers<V>(
        &self,
        visitor: &V,
        template: &Accumulator,
        tasks: &[Task],
    ) -> Result<Vec<Accumulator>, MawError>
    where
        V: NodeVisitor + ?Sized,
    {
        let cores = self.cores;

        let joined = crossbeam::scope(|s| {
            let handles: Vec<_> = (0..cores)
                .map(|w| {
                    s.spawn(move |_| -> Result<Accumulator, MawError> {
                        let mut acc = visitor.fork(template, w);
                        for task in tasks.iter().skip(w).step_by(cores) {
                            acc.rewind_path(&task.ancestors);
                            self.walk(task.frame.clone(), visitor, &mut acc)?;
                        }
                        Ok(acc)
                    })
                })
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(w, h)| h.join().unwrap_or_else(|_| Err(MawError::WorkerPanicked(w))))
                .collect::<Vec<_>>()
        })
        .map_err(|_| MawError::WorkerPanicked(cores))?;

        joined.into_iter().collect()
    }

    /// Depth-first preorder over one subtree.
    fn walk<V>(&self, root: Frame, visitor: &V, acc: &mut Accumulator) -> Result<(), MawError>
    where
        V: NodeVisitor + ?Sized,
    {
        let mut stack = vec![root];
        while let Some(frame) = stack.pop() {
            visitor.visit(&self.stats(&frame), acc)?;
            stack.extend(self.children(&frame).into_iter().rev());
        }
        Ok(())
    }

    /// The empty word occurs between every two adjacent padded symbols.
    fn root(&self) -> Frame {
        let occ = [0usize, 1].map(|t| (1..=self.texts[t].len() + 1).collect());
        Frame {
            depth: 0,
            last_char: 0,
            occ,
        }
    }

    fn stats(&self, frame: &Frame) -> NodeStats {
        let texts = [0usize, 1].map(|t| {
            let s = self.texts[t].padded();
            let mut freqs = [[0u32; SIGMA]; SIGMA];
            for &p in &frame.occ[t] {
                freqs[s[p - 1] as usize][s[p + frame.depth] as usize] += 1;
            }
            ExtensionStats::from_freqs(freqs)
        });

        NodeStats {
            string_depth: frame.depth,
            last_char: frame.last_char,
            texts,
        }
    }

    fn children(&self, frame: &Frame) -> Vec<Frame> {
        let mut children = vec![];
        for c in 1..=4u8 {
            let occ = [0usize, 1].map(|t| {
                let s = self.texts[t].padded();
                frame.occ[t]
                    .iter()
                    .copied()
                    .filter(|&p| s[p + frame.depth] == c)
                    .collect::<Vec<usize>>()
            });

            let mut left = 0u8;
            for t in 0..2 {
                let s = self.texts[t].padded();
                for &p in &occ[t] {
                    left |= 1 << s[p - 1];
                }
            }

            if left.count_ones() >= 2 {
                children.push(Frame {
                    depth: frame.depth + 1,
                    last_char: c,
                    occ,
                });
            }
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::alphabet::*;

    #[test]
    fn root_stats_are_bigrams() {
        let (t1, t2) = (TextIndex::from_ascii(b"ACGT"), TextIndex::from_ascii(b"ACGA"));
        let traversal = JointTraversal::new(&t1, &t2, 1);
        let root = traversal.stats(&traversal.root());

        assert_eq!(root.string_depth, 0);
        assert_eq!(root.text1().total(), 5);
        assert_eq!(root.text1().freq(G as usize, T as usize), 1);
        assert_eq!(root.text1().freq(T as usize, BOUNDARY as usize), 1);
        assert_eq!(root.text2().freq(G as usize, A as usize), 1);
        assert_eq!((root.text2().n_left, root.text2().n_right), (4, 4));
    }

    #[test]
    fn root_occurs_between_every_two_symbols() {
        let (t1, t2) = (TextIndex::from_ascii(b"ACGT"), TextIndex::from_ascii(b"AC"));
        let root = JointTraversal::new(&t1, &t2, 1).root();

        assert_eq!(root.occ[0], vec![1usize, 2, 3, 4, 5]);
        assert_eq!(root.occ[1], vec![1usize, 2, 3]);
    }

    #[test]
    fn children_are_left_branching() {
        let (t1, t2) = (TextIndex::from_ascii(b"ACGT"), TextIndex::from_ascii(b"ACGA"));
        let traversal = JointTraversal::new(&t1, &t2, 1);
        let children = traversal.children(&traversal.root());

        // only A has two left contexts (# and G)
        assert_eq!(children.len(), 1);
        let a = &children[0];
        assert_eq!((a.depth, a.last_char), (1, A));

        let stats = traversal.stats(a);
        assert!(!stats.text1().is_branching());
        assert!(stats.text2().is_branching());
        assert!(traversal.children(a).is_empty());
    }

    #[test]
    fn separators_never_enter_words() {
        let t1 = TextIndex::from_records([&b"AAC"[..], &b"AAG"[..]]);
        let traversal = JointTraversal::new(&t1, &t1, 1);
        let root = traversal.root();
        for child in traversal.children(&root) {
            assert_ne!(child.last_char, BOUNDARY);
            for grandchild in traversal.children(&child) {
                assert_ne!(grandchild.last_char, BOUNDARY);
            }
        }
    }
}
