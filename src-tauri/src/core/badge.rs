//! Dock/launcher badge. Only some desktops can show one.

#[cfg(target_os = "macos")]
pub fn supports_badge_count() -> bool {
    true
}

#[cfg(target_os = "linux")]
pub fn supports_badge_count() -> bool {
    is_unity_session(std::env::var("XDG_CURRENT_DESKTOP").ok().as_deref())
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
pub fn supports_badge_count() -> bool {
    false
}

/// `XDG_CURRENT_DESKTOP` is a colon separated list, e.g. `Unity:Unity7:ubuntu`.
#[cfg_attr(not(any(target_os = "linux", test)), allow(dead_code))]
fn is_unity_session(current_desktop: Option<&str>) -> bool {
    current_desktop
        .map(|desktops| {
            desktops
                .split(':')
                .any(|d| d.trim().eq_ignore_ascii_case("unity"))
        })
        .unwrap_or(false)
}

/// Remembers the last count the OS accepted so unchanged counts are skipped.
#[derive(Debug, Default)]
pub struct BadgeCounter {
    current: Option<i64>,
}

impl BadgeCounter {
    /// The value to hand to the OS, or `None` when it already shows `count`.
    /// Zero clears the badge. Nothing is recorded until [`Self::commit`].
    pub fn pending(&self, count: i64) -> Option<Option<i64>> {
        let count = count.max(0);
        if self.current == Some(count) {
            return None;
        }
        Some((count > 0).then_some(count))
    }

    /// Call only after the OS accepted `count`.
    pub fn commit(&mut self, count: i64) {
        self.current = Some(count.max(0));
    }
}
