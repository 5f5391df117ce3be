//! Writing workload files.

use crate::{WorkloadError, WorkloadModel, WorkloadShape};
use slotlock_types::Operation;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Path of thread `thread`'s stream for `shape`: `<dir>/<shape>_<thread>.txt`.
pub fn stream_path(dir: &Path, shape: WorkloadShape, thread: usize) -> PathBuf {
    dir.join(format!("{}_{}.txt", shape.name(), thread))
}

/// Write operations one per line, in the loader's format.
pub fn write_operations(path: &Path, operations: &[Operation]) -> Result<(), WorkloadError> {
    let file = File::create(path).map_err(|e| WorkloadError::io(path, e))?;
    let mut out = BufWriter::new(file);

    for operation in operations {
        writeln!(out, "{}", operation).map_err(|e| WorkloadError::io(path, e))?;
    }
    out.flush().map_err(|e| WorkloadError::io(path, e))?;

    Ok(())
}

/// Sample and write one file per thread for `shape`, `count` operations each.
///
/// Returns the written paths in thread order.
pub fn generate_files(
    dir: &Path,
    shape: WorkloadShape,
    threads: usize,
    count: usize,
    seed: u64,
) -> Result<Vec<PathBuf>, WorkloadError> {
    std::fs::create_dir_all(dir).map_err(|e| WorkloadError::io(dir, e))?;

    let model = WorkloadModel::from_shape(shape)?;
    let streams = model.generate_streams(threads, count, seed);

    let mut paths = Vec::with_capacity(threads);
    for (thread, operations) in streams.iter().enumerate() {
        let path = stream_path(dir, shape, thread);
        write_operations(&path, operations)?;
        paths.push(path);
    }

    info!(
        shape = %shape,
        threads,
        count,
        dir = %dir.display(),
        "Generated workload files"
    );

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_operations;
    use crate::load_streams;

    #[test]
    fn test_stream_path_naming() {
        let path = stream_path(Path::new("/tmp/w"), WorkloadShape::Skewed, 2);
        assert_eq!(path, PathBuf::from("/tmp/w/skewed_2.txt"));
    }

    #[test]
    fn test_written_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ops.txt");
        let operations = vec![
            Operation::Write(0, 1),
            Operation::Read(2),
            Operation::Snapshot,
        ];

        write_operations(&path, &operations).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "write 0 1\nread 2\nstring\n");
        assert_eq!(load_operations(&path).unwrap(), operations);
    }

    #[test]
    fn test_generate_files_per_thread() {
        let dir = tempfile::tempdir().unwrap();
        let workload_dir = dir.path().join("workloads");

        let paths = generate_files(&workload_dir, WorkloadShape::Variant, 3, 250, 7).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.exists()));

        let streams = load_streams(&workload_dir, WorkloadShape::Variant, 3).unwrap();
        assert!(streams.iter().all(|s| s.len() == 250));
        assert_eq!(
            streams,
            WorkloadModel::from_shape(WorkloadShape::Variant)
                .unwrap()
                .generate_streams(3, 250, 7)
        );
    }

    #[test]
    fn test_load_streams_fails_on_missing_thread() {
        let dir = tempfile::tempdir().unwrap();
        generate_files(dir.path(), WorkloadShape::Equal, 1, 10, 1).unwrap();

        assert!(load_streams(dir.path(), WorkloadShape::Equal, 2).is_err());
    }
}
