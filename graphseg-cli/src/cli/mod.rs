//! Command-line interface orchestration for graphseg.
//!
//! `segment` loads a weighted edge list or an elevation grid, runs the
//! segmenter and optionally persists the resulting components. `inspect`
//! decodes a persisted component file.

mod commands;
mod input;

pub use commands::{
    Cli, CliError, Command, ConnectivityArg, EdgesArgs, ExecutionSummary, GridArgs, InspectArgs,
    SegmentCommand, SegmentSource, render_summary, run_cli,
};
pub use input::{InputError, parse_edge_list, parse_grid};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
