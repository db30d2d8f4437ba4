//! Overlay file rendering and atomic persistence

use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

/// Default text placed in front of the countdown while the timer is paused
pub const DEFAULT_PAUSED_PREFIX: &str = "PAUSED - ";

/// Format a duration as zero-padded `HH:MM:SS`.
///
/// Hours are total hours (no day rollover), sub-second remainders are dropped.
pub fn format_hms(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Location and rendering rules of the overlay text file
#[derive(Debug, Clone)]
pub struct OverlayFile {
    path: PathBuf,
    paused_prefix: String,
}

impl OverlayFile {
    /// Create an overlay file description with the default paused prefix
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_paused_prefix(path, DEFAULT_PAUSED_PREFIX)
    }

    pub fn with_paused_prefix(path: impl Into<PathBuf>, paused_prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            paused_prefix: paused_prefix.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn paused_prefix(&self) -> &str {
        &self.paused_prefix
    }

    /// Render the display string for a remaining duration
    pub fn render(&self, remaining: Duration, paused: bool) -> String {
        if paused {
            format!("{}{}", self.paused_prefix, format_hms(remaining))
        } else {
            format_hms(remaining)
        }
    }

    /// Temporary sibling used for the write-then-rename cycle
    fn temp_path(&self) -> PathBuf {
        let mut temp: OsString = self.path.as_os_str().to_owned();
        temp.push(".tmp");
        PathBuf::from(temp)
    }

    /// Replace the file contents atomically.
    ///
    /// Readers either see the previous text or the new one, never a truncated
    /// file: the text goes to `<path>.tmp` first and is then renamed over the
    /// destination.
    pub fn write(&self, text: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp = self.temp_path();
        fs::write(&temp, text)?;
        fs::rename(&temp, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_hms(Duration::from_secs(3661)), "01:01:01");
        assert_eq!(format_hms(Duration::ZERO), "00:00:00");
        assert_eq!(format_hms(Duration::from_millis(59_999)), "00:00:59");
    }

    #[test]
    fn hours_are_not_wrapped_at_a_day() {
        assert_eq!(format_hms(Duration::from_secs(25 * 3600)), "25:00:00");
        assert_eq!(format_hms(Duration::from_secs(100 * 3600 + 5)), "100:00:05");
    }

    #[test]
    fn paused_rendering_uses_prefix() {
        let overlay = OverlayFile::with_paused_prefix("timer.txt", "PAUSADO - ");
        let remaining = Duration::from_secs(90 * 60);

        assert_eq!(overlay.render(remaining, false), "01:30:00");
        assert_eq!(overlay.render(remaining, true), "PAUSADO - 01:30:00");
    }

    #[test]
    fn write_creates_parent_and_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let overlay = OverlayFile::new(dir.path().join("output").join("overlay_timer.txt"));

        overlay.write("00:10:00").unwrap();
        overlay.write("00:09:59").unwrap();

        assert_eq!(fs::read_to_string(overlay.path()).unwrap(), "00:09:59");
        assert!(!overlay.temp_path().exists());
    }

    #[test]
    fn write_into_a_directory_fails() {
        let dir = tempdir().unwrap();
        let taken = dir.path().join("taken");
        fs::create_dir(&taken).unwrap();
        let overlay = OverlayFile::new(taken);

        assert!(overlay.write("00:00:01").is_err());
    }
}
