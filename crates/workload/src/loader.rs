//! Loading operation streams from workload files.
//!
//! The format is a sequence of whitespace-separated tokens:
//!
//! ```text
//! read <index>
//! write <index> <value>
//! string            (snapshot; `snapshot` is accepted too)
//! ```
//!
//! Scanning is forgiving. Unknown keywords are skipped, and a `read`/`write`
//! whose numbers are missing or malformed is dropped, with scanning resuming
//! at the offending token.

use crate::writer::stream_path;
use crate::{WorkloadError, WorkloadShape};
use slotlock_types::{Operation, SNAPSHOT_TOKEN};
use std::iter::Peekable;
use std::path::Path;
use std::str::SplitWhitespace;
use tracing::{debug, info, warn};

/// Result of scanning a workload text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOperations {
    /// Operations in file order.
    pub operations: Vec<Operation>,
    /// Tokens or operations that were dropped.
    pub skipped: usize,
}

/// Scan workload text into operations.
pub fn parse_operations(input: &str) -> ParsedOperations {
    let mut parsed = ParsedOperations::default();
    let mut tokens = input.split_whitespace().peekable();

    while let Some(token) = tokens.next() {
        match token {
            "read" => match next_number(&mut tokens) {
                Some(index) => parsed.operations.push(Operation::Read(index)),
                None => {
                    warn!(
                        position = parsed.operations.len(),
                        "Dropping read with malformed index"
                    );
                    parsed.skipped += 1;
                }
            },
            "write" => {
                let index = next_number(&mut tokens);
                let value = index.and_then(|_| next_number(&mut tokens));
                match (index, value) {
                    (Some(index), Some(value)) => {
                        parsed.operations.push(Operation::Write(index, value))
                    }
                    _ => {
                        warn!(
                            position = parsed.operations.len(),
                            "Dropping write with malformed arguments"
                        );
                        parsed.skipped += 1;
                    }
                }
            }
            SNAPSHOT_TOKEN | "snapshot" => parsed.operations.push(Operation::Snapshot),
            other => {
                debug!(token = other, "Skipping unrecognized token");
                parsed.skipped += 1;
            }
        }
    }

    parsed
}

/// Consume the next token only if it is an integer.
fn next_number(tokens: &mut Peekable<SplitWhitespace<'_>>) -> Option<i64> {
    let number = tokens.peek()?.parse::<i64>().ok()?;
    tokens.next();
    Some(number)
}

/// Load one workload file fully into memory.
pub fn load_operations(path: &Path) -> Result<Vec<Operation>, WorkloadError> {
    let input = std::fs::read_to_string(path).map_err(|e| WorkloadError::io(path, e))?;
    let parsed = parse_operations(&input);

    if parsed.skipped > 0 {
        warn!(
            path = %path.display(),
            skipped = parsed.skipped,
            "Workload file contained unusable tokens"
        );
    }
    debug!(
        path = %path.display(),
        operations = parsed.operations.len(),
        "Loaded workload file"
    );

    Ok(parsed.operations)
}

/// Load the per-thread streams `<shape>_0.txt .. <shape>_{threads-1}.txt` from `dir`.
pub fn load_streams(
    dir: &Path,
    shape: WorkloadShape,
    threads: usize,
) -> Result<Vec<Vec<Operation>>, WorkloadError> {
    let streams = (0..threads)
        .map(|thread| load_operations(&stream_path(dir, shape, thread)))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        shape = %shape,
        threads,
        operations = streams.iter().map(Vec::len).sum::<usize>(),
        "Loaded operation streams"
    );

    Ok(streams)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_parse_all_kinds() {
        let parsed = parse_operations("write 0 5\nread 1\nstring\nsnapshot\nwrite -1 3\n");

        assert_eq!(
            parsed.operations,
            vec![
                Operation::Write(0, 5),
                Operation::Read(1),
                Operation::Snapshot,
                Operation::Snapshot,
                Operation::Write(-1, 3),
            ]
        );
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_tokens_need_not_be_line_separated() {
        let parsed = parse_operations("read 0 write 1 2   string");
        assert_eq!(
            parsed.operations,
            vec![Operation::Read(0), Operation::Write(1, 2), Operation::Snapshot]
        );
    }

    #[test]
    fn test_unknown_tokens_are_skipped() {
        let parsed = parse_operations("delete 3\nread 2\n");

        // "delete" and the orphaned "3" are both unknown.
        assert_eq!(parsed.operations, vec![Operation::Read(2)]);
        assert_eq!(parsed.skipped, 2);
    }

    #[traced_test]
    #[test]
    fn test_malformed_numbers_resume_at_offending_token() {
        let parsed = parse_operations("read x\nwrite 1\nread 0\nwrite 2 string\n");

        // "read x" is dropped and "x" is then skipped as unknown. Both writes
        // lack a value, so scanning resumes at "read" and "string".
        assert_eq!(
            parsed.operations,
            vec![Operation::Read(0), Operation::Snapshot]
        );
        assert_eq!(parsed.skipped, 4);
        assert!(logs_contain("Dropping read with malformed index"));
        assert!(logs_contain("Dropping write with malformed arguments"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_operations(""), ParsedOperations::default());
        assert_eq!(parse_operations("  \n\t ").operations, Vec::new());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = load_operations(&path).unwrap_err();
        assert!(matches!(err, WorkloadError::Io { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }
}
