use crate::libs::accumulator::{Accumulator, WordCounts};
use crate::libs::driver::JointTraversal;
use crate::libs::error::MawError;
use crate::libs::kernel::KernelSums;
use crate::libs::sink::SharedSink;
use crate::libs::strategy::Strategy;
use crate::libs::text::TextIndex;

/// One comparison of two texts.
///
/// ```
/// use pmaw::libs::run::Run;
/// use pmaw::libs::strategy::Strategy;
/// use pmaw::libs::text::TextIndex;
///
/// let text1 = TextIndex::from_ascii(b"ACGT");
/// let text2 = TextIndex::from_ascii(b"ACGA");
/// let report = Run::new(&text1, &text2)
///     .minlen(1)
///     .execute(Strategy::AbsoluteMaw)
///     .unwrap();
/// assert_eq!(report.counts.both, 6);
/// assert_eq!(report.counts.text1, 13);
/// assert_eq!(report.counts.text2, 7);
/// ```
pub struct Run<'a> {
    text1: &'a TextIndex,
    text2: &'a TextIndex,
    minlen: usize,
    cores: usize,
    sink: Option<SharedSink>,
}

/// Final, fully reduced results of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub strategy: Strategy,
    pub counts: WordCounts,
    pub weighted_length: f64,
    pub kernel: KernelSums,
}

impl Report {
    pub fn kernel_score(&self) -> Option<f64> {
        self.kernel.score()
    }
}

impl<'a> Run<'a> {
    pub fn new(text1: &'a TextIndex, text2: &'a TextIndex) -> Self {
        Self {
            text1,
            text2,
            minlen: 0,
            cores: 1,
            sink: None,
        }
    }

    pub fn minlen(mut self, minlen: usize) -> Self {
        self.minlen = minlen;
        self
    }

    pub fn cores(mut self, cores: usize) -> Self {
        self.cores = cores;
        self
    }

    /// Materializes shared words into `sink`, which is closed at the end of the run.
    pub fn words(mut self, sink: SharedSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn execute(self, strategy: Strategy) -> Result<Report, MawError> {
        let mut template = Accumulator::template(
            self.minlen,
            self.text1.correction_len(),
            self.text2.correction_len(),
            self.sink,
        );

        let traversal = JointTraversal::new(self.text1, self.text2, self.cores);
        traversal.run(&strategy, &mut template)?;

        let report = Report {
            strategy,
            counts: template.counts(),
            weighted_length: template.weighted_length(),
            kernel: *template.kernel(),
        };
        log::info!(
            "{}: lengths {}/{}, {} workers, both={} text1={} text2={}",
            strategy,
            self.text1.len(),
            self.text2.len(),
            traversal.cores(),
            report.counts.both,
            report.counts.text1,
            report.counts.text2
        );

        Ok(report)
    }
}
