//! Plain-text readers for edge lists and elevation grids.
//!
//! Both formats are line based. Anything after `#` is a comment and blank
//! lines are skipped; line numbers in errors are 1-based and count every
//! physical line.

use std::io::{self, BufRead};

use graphseg_core::WeightedEdge;
use thiserror::Error;

/// Errors raised while parsing textual inputs.
#[derive(Debug, Error)]
pub enum InputError {
    /// The underlying reader failed.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// Line being read when the failure occurred.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// An edge line did not contain exactly three fields.
    #[error("line {line}: expected `source target weight` but found {found} fields")]
    FieldCount {
        /// Offending line.
        line: usize,
        /// Number of fields present.
        found: usize,
    },
    /// A vertex id was not a non-negative integer.
    #[error("line {line}: `{value}` is not a valid vertex id")]
    InvalidVertex {
        /// Offending line.
        line: usize,
        /// Raw token.
        value: String,
    },
    /// A weight or height was not a number.
    #[error("line {line}: `{value}` is not a number")]
    InvalidNumber {
        /// Offending line.
        line: usize,
        /// Raw token.
        value: String,
    },
}

/// Parses `source target weight` lines into edges.
///
/// # Errors
/// Returns [`InputError`] when a line cannot be read or parsed.
///
/// # Examples
/// ```
/// use graphseg_cli::cli::parse_edge_list;
///
/// let edges = parse_edge_list("# chain\n0 1 0.5\n\n1 2 4 # heavy\n".as_bytes())?;
/// assert_eq!(edges.len(), 2);
/// assert_eq!(edges[1].weight(), 4.0);
/// # Ok::<(), graphseg_cli::cli::InputError>(())
/// ```
pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<Vec<WeightedEdge>, InputError> {
    let mut edges = Vec::new();
    for (line, content) in significant_lines(reader) {
        let text = content?;
        let fields: Vec<&str> = text.split_whitespace().collect();
        let [source, target, weight] = fields.as_slice() else {
            return Err(InputError::FieldCount {
                line,
                found: fields.len(),
            });
        };
        edges.push(WeightedEdge::new(
            parse_vertex(line, source)?,
            parse_vertex(line, target)?,
            parse_number(line, weight)?,
        ));
    }
    Ok(edges)
}

/// Parses rows of whitespace separated heights.
///
/// Row lengths are not checked here; [`graphseg_core::ElevationGrid`]
/// reports ragged input.
///
/// # Errors
/// Returns [`InputError`] when a line cannot be read or a height is not a
/// number.
pub fn parse_grid<R: BufRead>(reader: R) -> Result<Vec<Vec<f64>>, InputError> {
    let mut rows = Vec::new();
    for (line, content) in significant_lines(reader) {
        let row = content?
            .split_whitespace()
            .map(|token| parse_number(line, token))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/// Yields `(line_number, content)` for every line that is not blank once
/// comments are removed.
fn significant_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = (usize, Result<String, InputError>)> {
    reader
        .lines()
        .zip(1_usize..)
        .filter_map(|(result, line)| match result {
            Err(source) => Some((line, Err(InputError::Read { line, source }))),
            Ok(raw) => {
                let content = raw.split_once('#').map_or(raw.as_str(), |(head, _)| head);
                let trimmed = content.trim();
                (!trimmed.is_empty()).then(|| (line, Ok(trimmed.to_owned())))
            }
        })
}

fn parse_vertex(line: usize, token: &str) -> Result<usize, InputError> {
    token.parse().map_err(|_| InputError::InvalidVertex {
        line,
        value: token.to_owned(),
    })
}

fn parse_number(line: usize, token: &str) -> Result<f64, InputError> {
    token.parse().map_err(|_| InputError::InvalidNumber {
        line,
        value: token.to_owned(),
    })
}
