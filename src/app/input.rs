//! Input line reading.

use std::borrow::Cow;
use std::path::PathBuf;

use log::{error, info, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Reads every raw input line from the given files, or from stdin when none are given.
///
/// A file that cannot be opened is reported and skipped; the remaining files
/// are still read. Lines are returned in input order and are not normalized.
pub async fn read_input_lines(files: &[PathBuf]) -> Vec<String> {
    let mut lines = Vec::new();
    if files.is_empty() {
        info!("Reading targets from stdin");
        collect_lines(BufReader::new(tokio::io::stdin()), "stdin", &mut lines).await;
        return lines;
    }

    for path in files {
        match tokio::fs::File::open(path).await {
            Ok(file) => {
                let source = path.display().to_string();
                collect_lines(BufReader::new(file), &source, &mut lines).await;
            }
            Err(e) => error!("Failed to open input file {}: {e}", path.display()),
        }
    }
    lines
}

/// Appends every line of `reader` to `out`.
///
/// Lines are split on `\n` with a trailing `\r` removed. Invalid UTF-8 is
/// replaced rather than rejected, so one bad line never hides the lines after it.
async fn collect_lines<R>(mut reader: R, source: &str, out: &mut Vec<String>)
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                }
                let line = String::from_utf8_lossy(&buf);
                if matches!(line, Cow::Owned(_)) {
                    warn!("Invalid UTF-8 in {source}, line kept with replacement characters");
                }
                out.push(line.into_owned());
            }
            Err(e) => {
                warn!("Failed to read line from {source}: {e}");
                break;
            }
        }
    }
}
