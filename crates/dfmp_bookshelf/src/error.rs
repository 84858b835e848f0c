//! Error types for reading and writing Bookshelf benchmarks.

use dfmp_model::ModelError;
use std::path::PathBuf;

/// Errors that can occur while loading or writing a benchmark.
#[derive(Debug, thiserror::Error)]
pub enum BookshelfError {
    /// A file could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed.
    #[error("{file}:{line}: {message}")]
    Parse {
        /// File name used in the message.
        file: String,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// The content was well-formed but violates a design invariant.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// A required file is missing from the benchmark directory.
    #[error("no .{extension} file found in {}", dir.display())]
    MissingFile {
        /// The benchmark directory.
        dir: PathBuf,
        /// The missing extension, without the dot.
        extension: &'static str,
    },

    /// A net lists a different number of pins than its `NetDegree` header.
    #[error("{file}: net '{net}' declares degree {declared} but lists {actual} pins")]
    DegreeMismatch {
        /// File name used in the message.
        file: String,
        /// Net name.
        net: String,
        /// Degree from the header.
        declared: usize,
        /// Pins actually listed.
        actual: usize,
    },
}

impl BookshelfError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BookshelfError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(file: &str, line: usize, message: impl Into<String>) -> Self {
        BookshelfError::Parse {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_parse() {
        let err = BookshelfError::parse("bench.nodes", 7, "expected width");
        assert_eq!(format!("{err}"), "bench.nodes:7: expected width");
    }

    #[test]
    fn display_missing_file() {
        let err = BookshelfError::MissingFile {
            dir: PathBuf::from("/tmp/bench"),
            extension: "nets",
        };
        assert_eq!(format!("{err}"), "no .nets file found in /tmp/bench");
    }

    #[test]
    fn display_degree_mismatch() {
        let err = BookshelfError::DegreeMismatch {
            file: "b.nets".into(),
            net: "n3".into(),
            declared: 3,
            actual: 2,
        };
        assert_eq!(
            format!("{err}"),
            "b.nets: net 'n3' declares degree 3 but lists 2 pins"
        );
    }

    #[test]
    fn model_error_is_transparent() {
        let err: BookshelfError = ModelError::UnknownMacro("m9".into()).into();
        assert_eq!(format!("{err}"), "unknown macro 'm9'");
    }
}
