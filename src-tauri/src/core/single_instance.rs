//! One running instance per user. The first process to take the lock becomes
//! primary; later launches exit and ask the primary to bring its window up.

use crate::core::app_log;
use crate::core::window_manager::ManagedWindow;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

pub const INSTANCE_LOCK_FILE_NAME: &str = "ttth.lock";

const LOG_SCOPE: &str = "single_instance";

/// Process-singleton capability.
pub trait ProcessSingleton {
    /// Called once. `false` means another primary holds the lock.
    fn acquire_lock(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceState {
    Unstarted,
    LockAttempted,
    Primary,
    Secondary,
}

/// What a later launch passed us.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecondAttempt {
    pub argv: Vec<String>,
    pub cwd: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    Focused { restored: bool },
    /// The main window was already gone when the request was handled.
    NoWindow,
    /// This process is not the primary.
    Ignored,
}

type FocusListener = Box<dyn Fn(&SecondAttempt, FocusOutcome) + Send + Sync>;

pub struct SingleInstanceCoordinator<L> {
    lock: L,
    state: InstanceState,
    listeners: Vec<FocusListener>,
}

impl<L: ProcessSingleton> SingleInstanceCoordinator<L> {
    pub fn new(lock: L) -> Self {
        Self {
            lock,
            state: InstanceState::Unstarted,
            listeners: Vec::new(),
        }
    }

    /// Decides the role. The lock is attempted at most once per coordinator.
    pub fn start(&mut self) -> InstanceState {
        if self.state != InstanceState::Unstarted {
            return self.state;
        }
        self.state = InstanceState::LockAttempted;
        self.state = if self.lock.acquire_lock() {
            InstanceState::Primary
        } else {
            InstanceState::Secondary
        };
        self.state
    }

    pub fn state(&self) -> InstanceState {
        self.state
    }

    pub fn is_primary_instance(&self) -> bool {
        self.state == InstanceState::Primary
    }

    /// Listeners run after the focus decision, in registration order.
    pub fn on_focus_requested<F>(&mut self, listener: F)
    where
        F: Fn(&SecondAttempt, FocusOutcome) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// `window` is looked up by the caller at handling time, not when the
    /// notification was queued.
    pub fn handle_second_attempt<W: ManagedWindow>(
        &self,
        attempt: &SecondAttempt,
        window: Option<&W>,
    ) -> FocusOutcome {
        if !self.is_primary_instance() {
            return FocusOutcome::Ignored;
        }
        let outcome = focus_existing_window(window);
        for listener in &self.listeners {
            listener(attempt, outcome);
        }
        outcome
    }
}

/// Restore first: focusing a minimized window does nothing on some platforms.
pub fn focus_existing_window<W: ManagedWindow>(window: Option<&W>) -> FocusOutcome {
    let Some(window) = window else {
        return FocusOutcome::NoWindow;
    };

    let restored = window.is_minimized();
    if restored {
        if let Err(e) = window.restore() {
            app_log::warn(LOG_SCOPE, &e);
        }
    }
    if let Err(e) = window.focus() {
        app_log::warn(LOG_SCOPE, &e);
    }
    FocusOutcome::Focused { restored }
}

/// Exclusive advisory lock on a file in the app data dir, held until drop.
pub struct FileInstanceLock {
    path: PathBuf,
    file: Option<File>,
}

impl FileInstanceLock {
    pub fn new(path: PathBuf) -> Self {
        Self { path, file: None }
    }

    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(INSTANCE_LOCK_FILE_NAME))
    }

    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    fn open(&self) -> std::io::Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.path)
    }
}

impl ProcessSingleton for FileInstanceLock {
    fn acquire_lock(&mut self) -> bool {
        if self.file.is_some() {
            return true;
        }

        // Only a held lock means another primary. An unopenable file does not.
        let file = match self.open() {
            Ok(file) => file,
            Err(e) => {
                eprintln!(
                    "Failed to open instance lock {}: {}",
                    self.path.display(),
                    e
                );
                return true;
            }
        };

        if file.try_lock_exclusive().is_err() {
            return false;
        }
        self.file = Some(file);
        true
    }
}

impl Drop for FileInstanceLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = FileExt::unlock(&file);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::window_manager::testing::FakeWindow;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct FakeLock {
        grant: bool,
        attempts: Arc<Mutex<u32>>,
    }

    impl ProcessSingleton for FakeLock {
        fn acquire_lock(&mut self) -> bool {
            *self.attempts.lock() += 1;
            self.grant
        }
    }

    fn coordinator(grant: bool) -> (SingleInstanceCoordinator<FakeLock>, Arc<Mutex<u32>>) {
        let attempts = Arc::new(Mutex::new(0));
        let lock = FakeLock {
            grant,
            attempts: Arc::clone(&attempts),
        };
        (SingleInstanceCoordinator::new(lock), attempts)
    }

    #[test]
    fn starts_unstarted_and_resolves_role_once() {
        let (mut primary, attempts) = coordinator(true);
        assert_eq!(primary.state(), InstanceState::Unstarted);
        assert_eq!(primary.start(), InstanceState::Primary);
        assert_eq!(primary.start(), InstanceState::Primary);
        assert_eq!(*attempts.lock(), 1);
        assert!(primary.is_primary_instance());

        let (mut secondary, attempts) = coordinator(false);
        assert_eq!(secondary.start(), InstanceState::Secondary);
        assert_eq!(secondary.start(), InstanceState::Secondary);
        assert_eq!(*attempts.lock(), 1);
        assert!(!secondary.is_primary_instance());
    }

    #[test]
    fn file_lock_admits_exactly_one_primary() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut first = SingleInstanceCoordinator::new(FileInstanceLock::in_dir(dir.path()));
        let mut second = SingleInstanceCoordinator::new(FileInstanceLock::in_dir(dir.path()));

        assert_eq!(first.start(), InstanceState::Primary);
        assert_eq!(second.start(), InstanceState::Secondary);
    }

    #[test]
    fn file_lock_is_released_on_drop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut first = FileInstanceLock::in_dir(dir.path());
        assert!(first.acquire_lock());
        assert!(first.is_held());

        let mut contender = FileInstanceLock::in_dir(dir.path());
        assert!(!contender.acquire_lock());
        assert!(!contender.is_held());

        drop(first);
        assert!(contender.acquire_lock());
    }

    #[test]
    fn second_attempt_restores_minimized_window_before_focus() {
        let (mut coordinator, _) = coordinator(true);
        coordinator.start();
        let window = FakeWindow::minimized();

        let outcome = coordinator.handle_second_attempt(&SecondAttempt::default(), Some(&window));
        assert_eq!(outcome, FocusOutcome::Focused { restored: true });
        assert_eq!(window.calls(), vec!["restore", "focus"]);
    }

    #[test]
    fn second_attempt_only_focuses_a_normal_window() {
        let (mut coordinator, _) = coordinator(true);
        coordinator.start();
        let window = FakeWindow::default();

        let outcome = coordinator.handle_second_attempt(&SecondAttempt::default(), Some(&window));
        assert_eq!(outcome, FocusOutcome::Focused { restored: false });
        assert_eq!(window.calls(), vec!["focus"]);
    }

    #[test]
    fn second_attempt_without_window_is_a_no_op() {
        let (mut coordinator, _) = coordinator(true);
        coordinator.start();

        let outcome =
            coordinator.handle_second_attempt::<FakeWindow>(&SecondAttempt::default(), None);
        assert_eq!(outcome, FocusOutcome::NoWindow);
    }

    #[test]
    fn non_primary_ignores_second_attempts() {
        let (mut coordinator, _) = coordinator(false);
        coordinator.start();
        let window = FakeWindow::minimized();

        let outcome = coordinator.handle_second_attempt(&SecondAttempt::default(), Some(&window));
        assert_eq!(outcome, FocusOutcome::Ignored);
        assert!(window.calls().is_empty());
    }

    #[test]
    fn listeners_see_attempt_and_outcome() {
        let (mut coordinator, _) = coordinator(true);
        coordinator.start();
        let seen: Arc<Mutex<Vec<(Vec<String>, FocusOutcome)>>> = Arc::default();
        let sink = Arc::clone(&seen);
        coordinator.on_focus_requested(move |attempt, outcome| {
            sink.lock().push((attempt.argv.clone(), outcome));
        });

        let attempt = SecondAttempt {
            argv: vec!["ttth".to_string(), "verbose".to_string()],
            cwd: "/tmp".to_string(),
        };
        coordinator.handle_second_attempt::<FakeWindow>(&attempt, None);

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, attempt.argv);
        assert_eq!(seen[0].1, FocusOutcome::NoWindow);
    }
}
