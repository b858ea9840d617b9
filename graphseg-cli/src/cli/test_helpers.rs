//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{
    Cli, CliError, Command, ConnectivityArg, EdgesArgs, ExecutionSummary, GridArgs,
    SegmentCommand, SegmentSource, run_cli,
};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn edges_cli(path: &Path, vertices: usize, granularity: f64) -> Cli {
    segment_cli(
        SegmentSource::Edges(EdgesArgs {
            path: path.to_path_buf(),
            vertices,
        }),
        granularity,
        None,
    )
}

pub(super) fn grid_cli(path: &Path, connectivity: ConnectivityArg, output: Option<PathBuf>) -> Cli {
    segment_cli(
        SegmentSource::Grid(GridArgs {
            path: path.to_path_buf(),
            connectivity,
        }),
        1.0,
        output,
    )
}

fn segment_cli(source: SegmentSource, granularity: f64, output: Option<PathBuf>) -> Cli {
    Cli {
        command: Command::Segment(SegmentCommand {
            granularity,
            min_size: 0,
            output,
            source,
        }),
    }
}

pub(super) fn labels_of(summary: &ExecutionSummary) -> Vec<usize> {
    match summary {
        ExecutionSummary::Segmented { segmentation, .. } => {
            segmentation.labels().iter().map(|id| id.get()).collect()
        }
        ExecutionSummary::Inspected { .. } => panic!("expected a segmentation summary"),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
