pub mod checker;
pub mod manifest;

pub use checker::{ChartUpdate, VersionSource, check_for_updates, compare_versions, parse_version};
pub use manifest::{ChartEntry, load_charts, parse_charts, render_charts, save_charts};
