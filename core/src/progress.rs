//! Progress reporting surface

/// One progress report emitted before a file is scanned
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    /// Share of files already visited, 0.0 to 100.0
    pub percent: f64,
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(percent: f64, message: impl Into<String>) -> Self {
        Self {
            percent,
            message: message.into(),
        }
    }

    /// Progress before visiting the file at `index` (0-based) of `total`
    pub fn for_file(index: usize, total: usize, message: impl Into<String>) -> Self {
        let percent = if total == 0 {
            100.0
        } else {
            index as f64 * 100.0 / total as f64
        };
        Self::new(percent, message)
    }
}

/// Receives progress while a search runs
pub trait ProgressSink {
    /// Called once when scanning starts
    fn begin(&self, _title: &str, _total_files: usize) {}

    fn report(&self, update: ProgressUpdate);

    /// Called once when scanning ends, cancelled or not
    fn finish(&self) {}
}

/// Discards all progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _update: ProgressUpdate) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_for_file() {
        assert_eq!(ProgressUpdate::for_file(0, 4, "a").percent, 0.0);
        assert_eq!(ProgressUpdate::for_file(2, 4, "c").percent, 50.0);
        assert_eq!(ProgressUpdate::for_file(0, 0, "none").percent, 100.0);
    }
}
