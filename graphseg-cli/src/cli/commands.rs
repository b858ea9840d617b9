//! Command implementations and argument parsing for the graphseg CLI.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use graphseg_core::{
    CodecError, Component, Connectivity, DEFAULT_GRANULARITY, ElevationGrid, GridError,
    SegmentError, Segmentation, Segmenter, SegmenterBuilder, ensure_exhausted, read_components,
    write_components,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::input::{InputError, parse_edge_list, parse_grid};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "graphseg", about = "Segment weighted graphs into components.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Segment a graph loaded from disk.
    Segment(SegmentCommand),
    /// Print the components stored in a file written by `segment --output`.
    Inspect(InspectArgs),
}

/// Options accepted by the `segment` command.
#[derive(Debug, Args, Clone)]
pub struct SegmentCommand {
    /// Granularity `k`; larger values favour larger segments.
    #[arg(long = "k", global = true, default_value_t = DEFAULT_GRANULARITY)]
    pub granularity: f64,

    /// Merge segments smaller than this into a neighbour after segmentation.
    #[arg(long = "min-size", global = true, default_value_t = 0)]
    pub min_size: usize,

    /// Persist the resulting components to this file.
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Graph source.
    #[command(subcommand)]
    pub source: SegmentSource,
}

/// Graph sources accepted by `segment`.
#[derive(Debug, Subcommand, Clone)]
pub enum SegmentSource {
    /// Read `source target weight` lines.
    Edges(EdgesArgs),
    /// Read rows of whitespace separated heights.
    Grid(GridArgs),
}

/// Edge list arguments.
#[derive(Debug, Args, Clone)]
pub struct EdgesArgs {
    /// Path to the edge list.
    pub path: PathBuf,

    /// Number of vertices in the graph.
    #[arg(long)]
    pub vertices: usize,
}

/// Elevation grid arguments.
#[derive(Debug, Args, Clone)]
pub struct GridArgs {
    /// Path to the grid file.
    pub path: PathBuf,

    /// Neighbourhood used to connect cells.
    #[arg(long, value_enum, default_value_t = ConnectivityArg::Four)]
    pub connectivity: ConnectivityArg,
}

/// Cell neighbourhoods selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConnectivityArg {
    /// Horizontal and vertical neighbours.
    Four,
    /// Horizontal, vertical and diagonal neighbours.
    Eight,
}

impl From<ConnectivityArg> for Connectivity {
    fn from(value: ConnectivityArg) -> Self {
        match value {
            ConnectivityArg::Four => Self::Four,
            ConnectivityArg::Eight => Self::Eight,
        }
    }
}

/// Arguments for `inspect`.
#[derive(Debug, Args, Clone)]
pub struct InspectArgs {
    /// Component file to decode.
    pub path: PathBuf,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening, reading or writing a file failed.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A textual input could not be parsed.
    #[error("failed to parse `{path}`: {source}")]
    Input {
        /// Input file.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: InputError,
    },
    /// A component file could not be decoded.
    #[error("failed to decode `{path}`: {source}")]
    Decode {
        /// Component file.
        path: PathBuf,
        /// Decoding failure.
        #[source]
        source: CodecError,
    },
    /// The grid file parsed but does not describe a valid grid.
    #[error("invalid grid in `{path}`: {source}")]
    Grid {
        /// Grid file.
        path: PathBuf,
        /// Validation failure.
        #[source]
        source: GridError,
    },
    /// Configuration or segmentation failed.
    #[error(transparent)]
    Segment(#[from] SegmentError),
}

impl CliError {
    /// Returns the stable code of the underlying library error, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Decode { source, .. } => Some(source.code().as_str()),
            Self::Grid { source, .. } => Some(source.code().as_str()),
            Self::Segment(err) => Some(err.code().as_str()),
            Self::Io { .. } | Self::Input { .. } => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// A graph was segmented.
    Segmented {
        /// Segmentation produced by the core library.
        segmentation: Segmentation,
        /// File the components were written to, when requested.
        output: Option<PathBuf>,
    },
    /// A component file was decoded.
    Inspected {
        /// Decoded components in file order.
        components: Vec<Component<usize, f64>>,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, segmenting or persisting fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use graphseg_cli::cli::{Cli, Command, EdgesArgs, ExecutionSummary, SegmentCommand,
/// #     SegmentSource, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0 1 2\n1 2 5\n")?;
/// let cli = Cli {
///     command: Command::Segment(SegmentCommand {
///         granularity: 10.0,
///         min_size: 0,
///         output: None,
///         source: SegmentSource::Edges(EdgesArgs {
///             path: file.path().to_path_buf(),
///             vertices: 3,
///         }),
///     }),
/// };
/// let ExecutionSummary::Segmented { segmentation, .. } = run_cli(cli)? else {
///     unreachable!("segment produces a segmentation");
/// };
/// assert_eq!(segmentation.segment_count(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Segment(segment) => {
            Span::current().record("command", field::display("segment"));
            run_segment(segment)
        }
        Command::Inspect(args) => {
            Span::current().record("command", field::display("inspect"));
            run_inspect(&args.path)
        }
    }
}

#[instrument(
    name = "cli.segment",
    err,
    skip(command),
    fields(granularity = command.granularity, min_size = command.min_size, source = field::Empty),
)]
pub(super) fn run_segment(command: SegmentCommand) -> Result<ExecutionSummary, CliError> {
    let segmenter = SegmenterBuilder::new()
        .with_granularity(command.granularity)
        .with_min_component_size(command.min_size)
        .build()?;

    let span = Span::current();
    let segmentation = match command.source {
        SegmentSource::Edges(args) => {
            span.record("source", field::display("edges"));
            segment_edges(&segmenter, &args)?
        }
        SegmentSource::Grid(args) => {
            span.record("source", field::display("grid"));
            segment_grid(&segmenter, &args)?
        }
    };

    if let Some(path) = &command.output {
        write_output(path, segmentation.segments())?;
    }

    info!(
        segments = segmentation.segment_count(),
        persisted = command.output.is_some(),
        "command completed"
    );
    Ok(ExecutionSummary::Segmented {
        segmentation,
        output: command.output,
    })
}

#[instrument(
    name = "cli.segment_edges",
    err,
    skip(segmenter, args),
    fields(path = %args.path.display(), vertices = args.vertices, edges = field::Empty),
)]
pub(super) fn segment_edges(
    segmenter: &Segmenter,
    args: &EdgesArgs,
) -> Result<Segmentation, CliError> {
    let reader = open_reader(&args.path)?;
    let edges = parse_edge_list(reader).map_err(|source| CliError::Input {
        path: args.path.clone(),
        source,
    })?;
    Span::current().record("edges", edges.len());
    Ok(segmenter.segment(args.vertices, &edges)?)
}

#[instrument(
    name = "cli.segment_grid",
    err,
    skip(segmenter, args),
    fields(path = %args.path.display(), connectivity = ?args.connectivity),
)]
pub(super) fn segment_grid(
    segmenter: &Segmenter,
    args: &GridArgs,
) -> Result<Segmentation, CliError> {
    let reader = open_reader(&args.path)?;
    let rows = parse_grid(reader).map_err(|source| CliError::Input {
        path: args.path.clone(),
        source,
    })?;
    let grid = ElevationGrid::from_rows(rows).map_err(|source| CliError::Grid {
        path: args.path.clone(),
        source,
    })?;
    Ok(grid.segment(segmenter, args.connectivity.into())?)
}

#[instrument(name = "cli.inspect", err, fields(path = %path.display()))]
pub(super) fn run_inspect(path: &Path) -> Result<ExecutionSummary, CliError> {
    let mut reader = open_reader(path)?;
    let decode_error = |source| CliError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let components = read_components(&mut reader).map_err(decode_error)?;
    ensure_exhausted(&mut reader).map_err(decode_error)?;
    info!(components = components.len(), "command completed");
    Ok(ExecutionSummary::Inspected { components })
}

pub(super) fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

#[instrument(name = "cli.write_output", err, skip(segments), fields(path = %path.display()))]
pub(super) fn write_output(
    path: &Path,
    segments: &[Component<usize, f64>],
) -> Result<(), CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    write_components(segments, &mut writer).map_err(io_error)?;
    writer.flush().map_err(io_error)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Segmentations print the segment count followed by one `vertex\tlabel`
/// line per vertex. Inspections print the component count followed by one
/// `index\tsize\tproperty` line per component.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use graphseg_cli::cli::{ExecutionSummary, render_summary};
/// # use graphseg_core::Component;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let mut component = Component::singleton_with_property(0_usize, 2.5);
/// component.insert_vertex(1);
/// let summary = ExecutionSummary::Inspected {
///     components: vec![component],
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "components: 1\n0\t2\t2.5\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Segmented { segmentation, .. } => {
            writeln!(writer, "segments: {}", segmentation.segment_count())?;
            for (vertex, label) in segmentation.labels().iter().enumerate() {
                writeln!(writer, "{vertex}\t{}", label.get())?;
            }
        }
        ExecutionSummary::Inspected { components } => {
            writeln!(writer, "components: {}", components.len())?;
            for (index, component) in components.iter().enumerate() {
                writeln!(
                    writer,
                    "{index}\t{}\t{}",
                    component.num_vertices(),
                    component.property()
                )?;
            }
        }
    }
    Ok(())
}
