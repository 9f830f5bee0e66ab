//! Error helpers for the command-line front end.
use std::fmt;
use std::io;
use std::path::Path;

/// Error reported by the command-line front end.
///
/// `msg` is already phrased for the user; `source` keeps the underlying I/O or
/// codec error for `-vv` style diagnostics.
#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let source = self.source.as_deref()?;
        Some(source)
    }
}

/// Errno for "no space left on device".
const ENOSPC: i32 = 28;

/// What the user can do about an I/O failure on a save block or its output.
fn io_suggestion(err: &io::Error) -> &'static str {
    use io::ErrorKind::*;
    match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "Check file permissions; save folders are often read-only while the game runs.",
        UnexpectedEof => "The save block looks truncated; extract it from the save file again.",
        WriteZero => "Disk may be full. Free up space and try again.",
        _ if err.raw_os_error() == Some(ENOSPC) => "Disk may be full. Free up space and try again.",
        _ => "Check the path and available disk space.",
    }
}

/// Format an I/O error on `path` with a suggestion for the user.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    format!(
        "Error {operation} '{}': {err}. {}",
        path.display(),
        io_suggestion(err)
    )
}

/// Convert an I/O error into a CLI error with context.
pub fn io_cli_error(operation: &str, path: &Path, err: io::Error) -> CliError {
    CliError {
        msg: format_io_error(operation, path, &err),
        source: Some(Box::new(err)),
    }
}

/// Convert a codec error into a CLI error with a hint.
pub fn lzss_cli_error(context: &str, err: crate::LzssError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for a codec error.
pub fn cli_hint(err: &crate::LzssError) -> String {
    use crate::LzssError::*;
    match err {
        UnexpectedEnd { .. } => format!("{err}. The block looks truncated; verify the file is intact."),
        LimitExceeded { .. } => format!("{err}. Raise --limit if the block is expected to be this large."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_error_carries_suggestion_and_source() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let cli = io_cli_error("reading input file", Path::new("save.bin"), err);
        assert!(cli.msg.contains("'save.bin'"));
        assert!(cli.msg.contains("Check that the file exists"));
        assert!(cli.source().is_some());
    }

    #[test]
    fn truncated_read_points_at_the_save_block() {
        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        let msg = format_io_error("reading input file", Path::new("slot2.lz"), &err);
        assert_eq!(
            msg,
            "Error reading input file 'slot2.lz': short read. \
             The save block looks truncated; extract it from the save file again."
        );
    }

    #[test]
    fn disk_full_by_errno() {
        let err = io::Error::from_raw_os_error(ENOSPC);
        let msg = format_io_error("writing output file", Path::new("out.raw"), &err);
        assert!(msg.ends_with("Disk may be full. Free up space and try again."));
    }

    #[test]
    fn codec_hint_mentions_truncation() {
        let cli = lzss_cli_error(
            "decompression failed",
            crate::LzssError::UnexpectedEnd { offset: 12 },
        );
        assert!(cli.to_string().starts_with("decompression failed: unexpected end of stream at byte 12"));
        assert!(cli.to_string().contains("verify the file is intact"));
    }
}
