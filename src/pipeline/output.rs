//! Output handling for rendered reports.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Target for output, either stdout or a file
#[derive(Debug, Clone)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p),
            None => OutputTarget::Stdout,
        }
    }
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            print!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!("report written to {}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_from_option() {
        assert!(matches!(OutputTarget::from_option(None), OutputTarget::Stdout));
        let path = PathBuf::from("/tmp/report.html");
        match OutputTarget::from_option(Some(path.clone())) {
            OutputTarget::File(p) => assert_eq!(p, path),
            OutputTarget::Stdout => panic!("expected File variant"),
        }
    }

    #[test]
    fn write_output_creates_the_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.txt");
        write_output("hello\n", &OutputTarget::File(path.clone())).expect("write");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "hello\n");
    }

    #[test]
    fn write_output_reports_the_failing_path() {
        let err = write_output("x", &OutputTarget::File(PathBuf::from("/nonexistent/dir/r.html")))
            .expect_err("should fail");
        assert!(format!("{err:#}").contains("/nonexistent/dir/r.html"));
    }
}
