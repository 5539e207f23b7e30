use crate::libs::error::MawError;
use crate::libs::kernel::{Correction, KernelSums, PrefixTables};
use crate::libs::sink::{SharedSink, WordBuffer};
use crate::libs::stats::NodeStats;
use std::ops::AddAssign;

/// Words found absent (or rare) in text 1 only, text 2 only, and in both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordCounts {
    pub both: u64,
    pub text1: u64,
    pub text2: u64,
}

impl AddAssign for WordCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.both += rhs.both;
        self.text1 += rhs.text1;
        self.text2 += rhs.text2;
    }
}

/// Mutable state of one traversal, either the template or a worker's copy.
///
/// Lifecycle: `template` -> `fork` once per worker -> `combine` into the
/// template -> `teardown`.
#[derive(Debug)]
pub struct Accumulator {
    minlen: usize,
    worker: usize,
    /// Symbols from the root to the current node.
    path: Vec<u8>,
    pub(crate) counts: WordCounts,
    pub(crate) weighted_length: f64,
    pub(crate) kernel: KernelSums,
    pub(crate) tables: PrefixTables,
    buffer: Option<WordBuffer>,
    sink: Option<SharedSink>,
}

impl Accumulator {
    /// Builds the state the workers are forked from.
    ///
    /// `len1` and `len2` are the correction lengths of the two texts. The
    /// dispersion sums start at the baseline of a text where nothing is
    /// resolved. Words are materialized only when a sink is given.
    pub fn template(minlen: usize, len1: usize, len2: usize, sink: Option<SharedSink>) -> Self {
        let kernel = KernelSums {
            n: 0.0,
            d1: Correction::new(len1).baseline(),
            d2: Correction::new(len2).baseline(),
        };

        Self {
            minlen,
            worker: 0,
            path: Vec::with_capacity(4),
            counts: WordCounts::default(),
            weighted_length: 0.0,
            kernel,
            tables: PrefixTables::new(len1, len2),
            buffer: None,
            sink,
        }
    }

    /// A fresh worker: configuration, path and prefix tables are copied,
    /// counters start at zero, the word buffer is allocated on first use.
    pub fn fork(&self, worker: usize) -> Self {
        Self {
            minlen: self.minlen,
            worker,
            path: self.path.clone(),
            counts: WordCounts::default(),
            weighted_length: 0.0,
            kernel: KernelSums::default(),
            tables: self.tables.clone(),
            buffer: None,
            sink: self.sink.clone(),
        }
    }

    /// Folds every worker into `self`, flushes all pending words and closes
    /// the sink. Scalar sums do not depend on the order of `workers`.
    pub fn combine(&mut self, workers: Vec<Accumulator>) -> Result<(), MawError> {
        for mut other in workers {
            log::debug!(
                "worker {}: both={} text1={} text2={}",
                other.worker,
                other.counts.both,
                other.counts.text1,
                other.counts.text2
            );
            self.counts += other.counts;
            self.weighted_length += other.weighted_length;
            self.kernel += other.kernel;
            other.teardown()?;
        }

        self.teardown()?;
        if let Some(sink) = &self.sink {
            sink.close()?;
        }
        Ok(())
    }

    /// Hands any buffered words to the sink.
    pub fn teardown(&mut self) -> Result<(), MawError> {
        match (&mut self.buffer, &self.sink) {
            (Some(buffer), Some(sink)) => buffer.flush(sink),
            _ => Ok(()),
        }
    }

    /// Shared preamble of every node handler: rejects inconsistent stats
    /// and records the node's symbol on the path.
    pub(crate) fn enter(&mut self, node: &NodeStats) -> Result<(), MawError> {
        node.validate()?;

        let depth = node.string_depth;
        if depth == 0 {
            self.path.clear();
            return Ok(());
        }
        if self.path.len() < depth - 1 {
            return Err(MawError::PathOrder {
                depth,
                established: self.path.len(),
            });
        }
        self.path.truncate(depth - 1);
        self.path.push(node.last_char);
        Ok(())
    }

    /// Re-establishes the ancestors of a subtree a worker is about to walk.
    pub fn rewind_path(&mut self, ancestors: &[u8]) {
        self.path.clear();
        self.path.extend_from_slice(ancestors);
    }

    /// Writes `left · path · right` when materialization is on.
    pub(crate) fn emit(&mut self, left: usize, right: usize) -> Result<(), MawError> {
        let sink = match &self.sink {
            Some(sink) => sink,
            None => return Ok(()),
        };
        let buffer = self.buffer.get_or_insert_with(WordBuffer::default);
        buffer.push_word(sink, left as u8, &self.path, right as u8)
    }

    pub fn minlen(&self) -> usize {
        self.minlen
    }

    pub fn worker(&self) -> usize {
        self.worker
    }

    pub fn path(&self) -> &[u8] {
        &self.path
    }

    pub fn counts(&self) -> WordCounts {
        self.counts
    }

    pub fn weighted_length(&self) -> f64 {
        self.weighted_length
    }

    pub fn kernel(&self) -> &KernelSums {
        &self.kernel
    }

    pub fn tables(&self) -> &PrefixTables {
        &self.tables
    }

    pub fn materializes(&self) -> bool {
        self.sink.is_some()
    }

    pub fn buffered(&self) -> usize {
        self.buffer.as_ref().map_or(0, |b| b.len())
    }
}

impl Drop for Accumulator {
    fn drop(&mut self) {
        if self.buffered() > 0 {
            if let Err(e) = self.teardown() {
                log::warn!(
                    "worker {}: lost {} buffered bytes: {}",
                    self.worker,
                    self.buffered(),
                    e
                );
            }
        }
    }
}
