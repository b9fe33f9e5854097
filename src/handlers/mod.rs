// Handler modules
pub mod check;
pub mod digests;
pub mod run;

pub use check::{format_updates, handle_check};
pub use digests::{generate_digests, handle_digests};
pub use run::{ChartStage, handle_run, update_charts};

use crate::charts::ChartUpdate;
use crate::publish::PublishOutcome;

/// How a run ended. Every variant is a successful exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No chart has a newer version; nothing was written
    UpToDate,
    /// Updates exist but `NO_WRITE` stopped the run before writing
    NotWritten(Vec<ChartUpdate>),
    ChartsUpdated {
        updates: Vec<ChartUpdate>,
        publish: PublishOutcome,
    },
    DigestsUpdated {
        images: usize,
        /// `None` when no images were found
        publish: Option<PublishOutcome>,
    },
}
