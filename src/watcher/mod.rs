//! Watching the suggestions file.
//!
//! The analysis service writes its response to disk; each debounced change
//! triggers a reload of the dynamic suggestion list.
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Debounce used by the event loop.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Result of draining pending file events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStatus {
    /// Nothing happened since the last settled change.
    Idle,
    /// The file changed but is still settling.
    Pending,
    /// The file has been quiet for the debounce period.
    Ready,
}

/// Watches one suggestions file through its parent directory.
///
/// Editors and services often replace a file instead of writing in place,
/// so the directory is watched and events are filtered by name.
pub struct SuggestionWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    dir: PathBuf,
    path: PathBuf,
    file_name: Option<OsString>,
    debounce: Duration,
    last_event: Option<Instant>,
}

impl SuggestionWatcher {
    /// Start watching `path`.
    ///
    /// # Errors
    /// Returns an error if the watcher cannot be created or the parent
    /// directory cannot be watched.
    pub fn new(path: impl AsRef<Path>, debounce: Duration) -> notify::Result<Self> {
        // Event paths are canonical, so compare against canonical paths.
        let path = path
            .as_ref()
            .canonicalize()
            .unwrap_or_else(|_| path.as_ref().to_path_buf());
        let file_name = path.file_name().map(std::ffi::OsStr::to_os_string);
        let dir = parent_dir(&path);

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %path.display(), "watching suggestions file");

        Ok(Self {
            _watcher: watcher,
            rx,
            dir,
            path,
            file_name,
            debounce,
            last_event: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain queued events and report whether a reload is due.
    pub fn poll(&mut self) -> WatchStatus {
        let mut relevant = 0u32;
        while let Ok(event) = self.rx.try_recv() {
            match event {
                Ok(ev) if self.is_relevant(&ev) => relevant += 1,
                Ok(ev) => tracing::trace!(kind = ?ev.kind, paths = ?ev.paths, "ignored file event"),
                Err(err) => tracing::warn!(%err, "file watcher error"),
            }
        }
        if relevant > 0 {
            crate::perf::log_event("watcher.change", format!("events={relevant}"));
            self.last_event = Some(Instant::now());
        }

        match self.last_event {
            None => WatchStatus::Idle,
            Some(at) if at.elapsed() >= self.debounce => {
                self.last_event = None;
                WatchStatus::Ready
            }
            Some(_) => WatchStatus::Pending,
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        event.paths.iter().any(|p| {
            p == &self.dir
                || p == &self.path
                || self
                    .file_name
                    .as_ref()
                    .is_some_and(|name| p.file_name() == Some(name.as_os_str()))
        })
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::EventKind;
    use tempfile::tempdir;

    fn event(paths: Vec<PathBuf>) -> Event {
        Event {
            kind: EventKind::Any,
            paths,
            attrs: notify::event::EventAttributes::new(),
        }
    }

    #[test]
    fn test_sibling_file_events_are_ignored() {
        let dir = tempdir().expect("tempdir");
        let canonical = dir.path().canonicalize().expect("canonicalize");
        let path = canonical.join("analysis.json");
        std::fs::write(&path, "[]").expect("write");
        let watcher = SuggestionWatcher::new(&path, Duration::from_millis(10)).expect("watcher");

        assert!(watcher.is_relevant(&event(vec![path.clone()])));
        assert!(watcher.is_relevant(&event(vec![canonical.clone()])));
        assert!(!watcher.is_relevant(&event(vec![canonical.join("draft.txt")])));
    }

    #[test]
    fn test_renamed_replacement_matches_by_name() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("analysis.json");
        std::fs::write(&path, "[]").expect("write");
        let watcher = SuggestionWatcher::new(&path, Duration::from_millis(10)).expect("watcher");
        assert!(watcher.is_relevant(&event(vec![PathBuf::from("/elsewhere/analysis.json")])));
    }

    #[test]
    fn test_parent_dir_of_bare_name_is_dot() {
        assert_eq!(parent_dir(Path::new("analysis.json")), PathBuf::from("."));
    }

    #[test]
    fn test_idle_without_events() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("analysis.json");
        std::fs::write(&path, "[]").expect("write");
        let mut watcher = SuggestionWatcher::new(&path, Duration::from_millis(10)).expect("watcher");
        assert_eq!(watcher.poll(), WatchStatus::Idle);
    }

    #[test]
    fn test_real_write_becomes_ready() {
        let dir = tempdir().expect("tempdir");
        let canonical = dir.path().canonicalize().expect("canonicalize");
        let path = canonical.join("analysis.json");
        std::fs::write(&path, "[]").expect("write");
        let mut watcher = SuggestionWatcher::new(&path, Duration::from_millis(50)).expect("watcher");

        // Give the backend time to register the watch.
        std::thread::sleep(Duration::from_millis(500));
        std::fs::write(&path, r#"[{"before":"teh","after":"the"}]"#).expect("write");

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut ready = false;
        while Instant::now() < deadline {
            if watcher.poll() == WatchStatus::Ready {
                ready = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        assert!(ready, "watcher should report the write within 5 seconds");
    }
}
