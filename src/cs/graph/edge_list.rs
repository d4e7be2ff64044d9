use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Parses a whitespace separated edge list, one `u v` record per line.
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<Vec<(usize, usize)>> {
    let mut edges = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;
        let mut fields = line.split_whitespace();
        let Some(first) = fields.next() else {
            continue;
        };
        let second = fields.next().ok_or_else(|| Error::Parse {
            line: lineno,
            message: "expected two vertex ids, found one".to_string(),
        })?;
        if let Some(extra) = fields.next() {
            return Err(Error::Parse {
                line: lineno,
                message: format!("unexpected trailing field `{extra}`"),
            });
        }
        edges.push((vertex_id(first, lineno)?, vertex_id(second, lineno)?));
    }
    Ok(edges)
}

fn vertex_id(field: &str, line: usize) -> Result<usize> {
    field.parse().map_err(|_| Error::Parse {
        line,
        message: format!("`{field}` is not a non-negative integer vertex id"),
    })
}

/// Reads an edge list file. See [`parse_edge_list`] for the format.
pub fn read_edge_list<P: AsRef<Path>>(path: P) -> Result<Vec<(usize, usize)>> {
    let path = path.as_ref();
    let edges = parse_edge_list(BufReader::new(File::open(path)?))?;
    debug!("read {} edge records from {}", edges.len(), path.display());
    Ok(edges)
}
