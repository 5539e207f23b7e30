use crate::libs::accumulator::Accumulator;
use crate::libs::classify;
use crate::libs::error::MawError;
use crate::libs::kernel;
use crate::libs::stats::NodeStats;

/// What a traversal driver needs from the statistics core.
///
/// `visit` is called once per node, on the worker that owns the node;
/// `fork` once per worker; `combine` once with every worker; `teardown`
/// once on the merged state.
pub trait NodeVisitor: Sync {
    fn visit(&self, node: &NodeStats, acc: &mut Accumulator) -> Result<(), MawError>;

    fn fork(&self, template: &Accumulator, worker: usize) -> Accumulator {
        template.fork(worker)
    }

    fn combine(&self, workers: Vec<Accumulator>, target: &mut Accumulator) -> Result<(), MawError> {
        target.combine(workers)
    }

    fn teardown(&self, acc: &mut Accumulator) -> Result<(), MawError> {
        acc.teardown()
    }
}

/// The enumeration a run performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Strict minimal absent words and the weighted-length distance.
    AbsoluteMaw,
    /// Words seen at most `f1` times whose flanks are seen at least `f2` times.
    RelativeWord { f1: u32, f2: u32 },
    /// MAWs of text 1 present in text 2.
    AsymmetricPresence,
    /// Markovian string kernel.
    Kernel,
}

impl NodeVisitor for Strategy {
    fn visit(&self, node: &NodeStats, acc: &mut Accumulator) -> Result<(), MawError> {
        match *self {
            Strategy::AbsoluteMaw => classify::visit_absolute(node, acc),
            Strategy::RelativeWord { f1, f2 } => classify::visit_relative(node, acc, f1, f2),
            Strategy::AsymmetricPresence => classify::visit_asymmetric(node, acc),
            Strategy::Kernel => kernel::visit_kernel(node, acc),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::AbsoluteMaw => write!(f, "maw"),
            Strategy::RelativeWord { f1, f2 } => write!(f, "rw(f1={}, f2={})", f1, f2),
            Strategy::AsymmetricPresence => write!(f, "present"),
            Strategy::Kernel => write!(f, "kernel"),
        }
    }
}
