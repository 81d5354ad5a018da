use std::cmp::Ordering;
use std::env;
use std::ffi::{CStr, CString};
use std::ptr;
use std::sync::{Mutex, MutexGuard, Once, OnceLock};

use colored::Colorize;
use libc::{setlocale, strcoll, LC_COLLATE};

/// Locales probed, in order, when the environment gives no usable answer.
const LOCALE_CANDIDATES: [&str; 5] = ["C.UTF-8", "en_US.UTF-8", "en_GB.UTF-8", "C", "POSIX"];

/// `setlocale` mutates process-global state and `strcoll` reads it, so every
/// acquisition serializes on this lock for the collator's whole lifetime.
static COLLATE_LOCK: Mutex<()> = Mutex::new(());

/// Detected system locale, cached for the process lifetime. Detection probes
/// the host collation subsystem and has a single correct answer per process.
static SYSTEM_LOCALE: OnceLock<Option<String>> = OnceLock::new();

static FALLBACK_WARNING: Once = Once::new();

/// A scoped binding of the process collation locale.
///
/// Acquiring a collator saves the current `LC_COLLATE` setting, binds the
/// requested (or auto-detected) locale, and holds the global collation lock.
/// Dropping it restores the saved setting on every exit path. When no locale
/// can be bound, the collator degrades to plain byte-order comparison and a
/// single warning is emitted for the process.
pub struct Collator {
    saved: Option<CString>,
    bound: bool,
    _guard: MutexGuard<'static, ()>,
}

impl Collator {
    /// Bind `requested`, or the auto-detected system locale when `None`.
    /// Never fails: an unbindable locale yields the byte-order fallback.
    pub fn acquire(requested: Option<&str>) -> Self {
        let guard = COLLATE_LOCK
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let mut saved = None;
        let mut bound = false;

        // Detection runs under the lock we already hold.
        let locale = match requested {
            Some(name) => Some(name.to_string()),
            None => SYSTEM_LOCALE.get_or_init(detect_system_locale).clone(),
        };

        if let Some(name) = locale {
            match bind_collate(&name) {
                Some(previous) => {
                    saved = Some(previous);
                    bound = true;
                }
                None => warn_unavailable(&name),
            }
        }

        Self {
            saved,
            bound,
            _guard: guard,
        }
    }

    /// Three-way comparison under the bound locale, or byte order when no
    /// locale is bound. Strings with interior NUL bytes cannot be handed to
    /// the host comparison and fall back to byte order as well.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if self.bound {
            if let (Ok(left), Ok(right)) = (CString::new(a), CString::new(b)) {
                // SAFETY: both pointers are valid NUL-terminated strings and
                // the collation lock is held for the collator's lifetime.
                let result = unsafe { strcoll(left.as_ptr(), right.as_ptr()) };
                return result.cmp(&0);
            }
        }
        a.cmp(b)
    }
}

impl Drop for Collator {
    fn drop(&mut self) {
        if let Some(previous) = self.saved.take() {
            // SAFETY: restoring the locale saved at acquisition, still under
            // the collation lock.
            unsafe {
                setlocale(LC_COLLATE, previous.as_ptr());
            }
        }
    }
}

/// Bind `LC_COLLATE` to `name`. Returns the previous locale on success so it
/// can be restored, or `None` when the host rejects the locale. Callers must
/// hold `COLLATE_LOCK`.
fn bind_collate(name: &str) -> Option<CString> {
    let c_name = CString::new(name).ok()?;

    // SAFETY: guarded by COLLATE_LOCK; the queried locale string is copied
    // out before the next setlocale call can invalidate it.
    unsafe {
        let current = setlocale(LC_COLLATE, ptr::null());
        let saved = if current.is_null() {
            CString::new("C").ok()?
        } else {
            CStr::from_ptr(current).to_owned()
        };

        if setlocale(LC_COLLATE, c_name.as_ptr()).is_null() {
            return None;
        }
        Some(saved)
    }
}

/// Probe whether a locale can be bound, restoring the prior setting
/// immediately. Callers must hold `COLLATE_LOCK`.
fn is_locale_available(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    match bind_collate(name) {
        Some(previous) => {
            // SAFETY: restoring the locale we just saved, under the lock.
            unsafe {
                setlocale(LC_COLLATE, previous.as_ptr());
            }
            true
        }
        None => false,
    }
}

/// Detect a usable system locale: environment signals first, then the fixed
/// candidate list. Returns `None` when the host has no bindable locale at
/// all, in which case sorting uses byte order.
fn detect_system_locale() -> Option<String> {
    for var in ["LC_ALL", "LC_COLLATE", "LANG"] {
        let Ok(value) = env::var(var) else { continue };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        if is_locale_available(value) {
            return Some(value.to_string());
        }
        // `LANG=en_US` style values usually only exist with an encoding.
        if !value.contains('.') {
            let with_utf8 = format!("{value}.UTF-8");
            if is_locale_available(&with_utf8) {
                return Some(with_utf8);
            }
        }
    }

    LOCALE_CANDIDATES
        .iter()
        .find(|candidate| is_locale_available(candidate))
        .map(|candidate| (*candidate).to_string())
}

fn warn_unavailable(name: &str) {
    FALLBACK_WARNING.call_once(|| {
        eprintln!(
            "{} locale '{name}' is not available, falling back to byte-order sorting",
            "Warning:".yellow().bold()
        );
    });
}
