//! Unit tests for the CLI commands and input parsers.

use super::test_helpers::{
    create_text_file, edges_cli, grid_cli, labels_of, run_cli_expecting_error, temp_dir,
};
use super::{
    Cli, CliError, Command, ConnectivityArg, ExecutionSummary, InputError, InspectArgs,
    SegmentSource, parse_edge_list, parse_grid, render_summary, run_cli,
};

use std::fs;

use clap::Parser;
use graphseg_core::{CodecError, GridError, SegmentError};
use rstest::rstest;
use tracing_subscriber::layer::SubscriberExt;

use graphseg_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
#[case::fine(1.0, vec![0, 1, 2])]
#[case::coarse(10.0, vec![0, 0, 0])]
fn segment_edges_success(#[case] granularity: f64, #[case] expected: Vec<usize>) -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "chain.txt", "# source target weight\n0 1 2\n1 2 5\n")?;
    let summary = run_cli(edges_cli(&path, 3, granularity))?;
    assert_eq!(labels_of(&summary), expected);
    Ok(())
}

#[rstest]
fn segment_edges_rejects_out_of_range_vertices() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "bad.txt", "0 7 1.0\n")?;
    let err = run_cli_expecting_error(edges_cli(&path, 3, 1.0), "vertex 7 must be rejected");
    assert!(matches!(
        err,
        CliError::Segment(SegmentError::InvalidVertex { vertex: 7, .. })
    ));
    assert_eq!(err.code(), Some("SEGMENT_INVALID_VERTEX"));
    Ok(())
}

#[rstest]
fn segment_edges_rejects_invalid_granularity() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "chain.txt", "0 1 1\n")?;
    let err = run_cli_expecting_error(edges_cli(&path, 2, -1.0), "k must be rejected");
    assert!(matches!(
        err,
        CliError::Segment(SegmentError::InvalidGranularity { .. })
    ));
    Ok(())
}

#[rstest]
fn segment_edges_reports_parse_errors_with_path() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "broken.txt", "0 1 1\n\n1 2\n")?;
    let err = run_cli_expecting_error(edges_cli(&path, 3, 1.0), "short line must fail");
    match err {
        CliError::Input {
            path: reported,
            source: InputError::FieldCount { line: 3, found: 2 },
        } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[rstest]
fn missing_input_is_an_io_error() {
    let dir = temp_dir();
    let path = dir.path().join("absent.txt");
    let err = run_cli_expecting_error(edges_cli(&path, 1, 1.0), "missing file must fail");
    assert!(matches!(err, CliError::Io { .. }));
    assert_eq!(err.code(), None);
}

#[rstest]
#[case::four(ConnectivityArg::Four, vec![0, 0, 1, 0, 0, 1])]
#[case::eight(ConnectivityArg::Eight, vec![0, 0, 1, 0, 0, 1])]
fn segment_grid_splits_along_the_ridge(
    #[case] connectivity: ConnectivityArg,
    #[case] expected: Vec<usize>,
) -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "grid.txt", "0 0 9\n0 0 9 # east cliff\n")?;
    let summary = run_cli(grid_cli(&path, connectivity, None))?;
    assert_eq!(labels_of(&summary), expected);
    Ok(())
}

#[rstest]
#[case::ragged("1 2\n3\n")]
#[case::empty("# nothing here\n")]
fn segment_grid_rejects_malformed_grids(#[case] contents: &str) -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "grid.txt", contents)?;
    let err = run_cli_expecting_error(
        grid_cli(&path, ConnectivityArg::Four, None),
        "malformed grid must fail",
    );
    match err {
        CliError::Grid {
            path: reported,
            source: GridError::RaggedRow { .. } | GridError::ZeroDimension { .. },
        } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[rstest]
fn grid_errors_name_the_file_and_keep_their_code() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "ragged.txt", "1 2
3
")?;
    let err = run_cli_expecting_error(
        grid_cli(&path, ConnectivityArg::Four, None),
        "ragged grid must fail",
    );
    assert_eq!(err.code(), Some("GRID_RAGGED_ROW"));
    assert!(err.to_string().contains(&path.display().to_string()));
    Ok(())
}

#[rstest]
fn segment_output_round_trips_through_inspect() -> TestResult {
    let dir = temp_dir();
    let grid = create_text_file(&dir, "grid.txt", "0 0 9\n0 0 9\n")?;
    let output = dir.path().join("segments.bin");

    let summary = run_cli(grid_cli(&grid, ConnectivityArg::Four, Some(output.clone())))?;
    let ExecutionSummary::Segmented { segmentation, .. } = summary else {
        panic!("expected a segmentation summary");
    };

    let inspected = run_cli(Cli {
        command: Command::Inspect(InspectArgs { path: output }),
    })?;
    let ExecutionSummary::Inspected { components } = &inspected else {
        panic!("expected an inspection summary");
    };
    assert_eq!(components.as_slice(), segmentation.segments());

    let mut rendered = Vec::new();
    render_summary(&inspected, &mut rendered)?;
    assert_eq!(String::from_utf8(rendered)?, "components: 2\n0\t4\t0\n1\t2\t0\n");
    Ok(())
}

#[rstest]
fn inspect_rejects_truncated_files() -> TestResult {
    let dir = temp_dir();
    let path = dir.path().join("short.bin");
    fs::write(&path, [1_u8, 0, 0])?;
    let err = run_cli_expecting_error(
        Cli {
            command: Command::Inspect(InspectArgs { path }),
        },
        "truncated file must fail",
    );
    assert!(matches!(
        err,
        CliError::Decode {
            source: CodecError::Truncated { .. },
            ..
        }
    ));
    assert_eq!(err.code(), Some("CODEC_TRUNCATED"));
    Ok(())
}

#[rstest]
fn inspect_rejects_data_after_the_last_component() -> TestResult {
    let dir = temp_dir();
    let grid = create_text_file(&dir, "grid.txt", "0 0 9\n0 0 9\n")?;
    let output = dir.path().join("segments.bin");
    run_cli(grid_cli(&grid, ConnectivityArg::Four, Some(output.clone())))?;

    let mut bytes = fs::read(&output)?;
    bytes.extend_from_slice(b"garbage");
    fs::write(&output, bytes)?;

    let err = run_cli_expecting_error(
        Cli {
            command: Command::Inspect(InspectArgs {
                path: output.clone(),
            }),
        },
        "appended data must fail",
    );
    match err {
        CliError::Decode {
            path,
            source: CodecError::TrailingBytes,
        } => assert_eq!(path, output),
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[rstest]
fn render_summary_lists_vertex_labels() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "chain.txt", "0 1 0.1\n2 3 0.1\n1 2 50\n")?;
    let summary = run_cli(edges_cli(&path, 4, 1.0))?;
    let mut rendered = Vec::new();
    render_summary(&summary, &mut rendered)?;
    assert_eq!(
        String::from_utf8(rendered)?,
        "segments: 2\n0\t0\n1\t0\n2\t1\n3\t1\n"
    );
    Ok(())
}

#[rstest]
fn run_cli_records_command_span() -> TestResult {
    let dir = temp_dir();
    let path = create_text_file(&dir, "chain.txt", "0 1 1\n")?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || run_cli(edges_cli(&path, 2, 1.0)))?;

    let run = layer.span("cli.run").ok_or("cli.run span missing")?;
    assert_eq!(run.fields.get("command").map(String::as_str), Some("segment"));
    let segment = layer.span("cli.segment").ok_or("cli.segment span missing")?;
    assert_eq!(segment.fields.get("source").map(String::as_str), Some("edges"));
    let edges = layer
        .span("cli.segment_edges")
        .ok_or("cli.segment_edges span missing")?;
    assert_eq!(edges.fields.get("edges").map(String::as_str), Some("1"));
    assert!(layer.span("core.segment").is_some());
    Ok(())
}

#[test]
fn global_options_parse_after_the_source() {
    let cli = Cli::try_parse_from([
        "graphseg", "segment", "grid", "dem.txt", "--connectivity", "eight", "--k", "2.5",
        "--min-size", "4", "--output", "out.bin",
    ])
    .expect("arguments must parse");
    let Command::Segment(command) = cli.command else {
        panic!("expected the segment command");
    };
    assert_eq!(command.granularity, 2.5);
    assert_eq!(command.min_size, 4);
    assert_eq!(command.output.as_deref(), Some(std::path::Path::new("out.bin")));
    assert!(matches!(
        command.source,
        SegmentSource::Grid(ref args) if args.connectivity == ConnectivityArg::Eight
    ));
}

#[test]
fn edges_requires_vertex_count() {
    let result = Cli::try_parse_from(["graphseg", "segment", "edges", "graph.txt"]);
    assert!(result.is_err());
}

#[test]
fn parse_edge_list_skips_comments_and_blank_lines() {
    let edges = parse_edge_list("# header\n\n 0 1 0.5 # note\n2\t3\t1e2\n".as_bytes())
        .expect("edge list must parse");
    let triples: Vec<_> = edges
        .iter()
        .map(|e| (e.source(), e.target(), e.weight()))
        .collect();
    assert_eq!(triples, vec![(0, 1, 0.5), (2, 3, 100.0)]);
}

#[rstest]
#[case::negative_vertex("-1 0 1\n", 1)]
#[case::fractional_vertex("# c\n0 1.5 1\n", 2)]
fn parse_edge_list_rejects_bad_vertices(#[case] input: &str, #[case] expected_line: usize) {
    let err = parse_edge_list(input.as_bytes()).expect_err("vertex must be rejected");
    assert!(matches!(err, InputError::InvalidVertex { line, .. } if line == expected_line));
}

#[test]
fn parse_edge_list_rejects_bad_weights() {
    let err = parse_edge_list("0 1 heavy\n".as_bytes()).expect_err("weight must be rejected");
    match err {
        InputError::InvalidNumber { line, value } => {
            assert_eq!(line, 1);
            assert_eq!(value, "heavy");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn parse_grid_keeps_row_shape() {
    let rows = parse_grid("1 2 3\n# skip\n4 5\n".as_bytes()).expect("grid must parse");
    assert_eq!(rows, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0]]);
}
