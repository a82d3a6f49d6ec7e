//! Report output duplicated to the terminal and a log file

use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

use tracing::debug;

/// Writer that forwards every write to two sinks
pub struct Tee<A: Write, B: Write> {
    first: A,
    second: B,
}

impl<A: Write, B: Write> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.first.write_all(buf)?;
        self.second.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.first.flush()?;
        self.second.flush()
    }
}

/// Session output: stdout plus a log file truncated when the session opens.
///
/// The log is flushed by [`SessionLog::close`], or on drop if close was never
/// called.
pub struct SessionLog {
    tee: Option<Tee<Stdout, BufWriter<File>>>,
}

impl SessionLog {
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        debug!(path = %path.display(), "session log opened");
        Ok(Self {
            tee: Some(Tee::new(io::stdout(), BufWriter::new(file))),
        })
    }

    /// Flush both sinks and release the log file
    pub fn close(mut self) -> io::Result<()> {
        match self.tee.take() {
            Some(mut tee) => {
                tee.flush()?;
                let (_, log) = tee.into_inner();
                log.into_inner().map_err(|e| e.into_error())?.sync_all()
            }
            None => Ok(()),
        }
    }
}

impl Write for SessionLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.tee.as_mut() {
            Some(tee) => tee.write(buf),
            None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "session log closed")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.tee.as_mut() {
            Some(tee) => tee.flush(),
            None => Ok(()),
        }
    }
}

impl Drop for SessionLog {
    fn drop(&mut self) {
        if let Some(tee) = self.tee.as_mut() {
            let _ = tee.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tee_writes_both_sinks() {
        let mut tee = Tee::new(Vec::new(), Vec::new());
        write!(tee, ">>> Dropped {} rows", 3).unwrap();
        writeln!(tee).unwrap();
        tee.flush().unwrap();

        let (first, second) = tee.into_inner();
        assert_eq!(first, b">>> Dropped 3 rows\n");
        assert_eq!(first, second);
    }

    #[test]
    fn test_session_log_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis_output.txt");
        std::fs::write(&path, "previous run output\n").unwrap();

        let mut log = SessionLog::create(&path).unwrap();
        writeln!(log, "fresh").unwrap();
        log.close().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_session_log_flushes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis_output.txt");
        {
            let mut log = SessionLog::create(&path).unwrap();
            write!(log, "partial").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "partial");
    }
}
