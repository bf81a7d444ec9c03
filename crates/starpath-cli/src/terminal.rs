//! Terminal styling and capability detection.
//!
//! Provides the ANSI colour codes used by the plot renderer and the
//! environment checks that decide whether colour and Unicode glyphs are safe
//! to emit.

/// ANSI escape codes for plot elements.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Orange (256-color) for stars, matching the canvas palette.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Green for route lines and route stars.
    pub const GREEN: &str = "\x1b[32m";
    /// Bold reverse green for the start marker.
    pub const TAG_START: &str = "\x1b[1;7;32m";
    /// Bold reverse magenta for the goal marker.
    pub const TAG_GOAL: &str = "\x1b[1;7;35m";
    /// Gray for the frame.
    pub const GRAY: &str = "\x1b[90m";
    /// Bold white on red for the no-path banner.
    pub const BANNER: &str = "\x1b[1;97;41m";
}

/// Resolved colour codes, either ANSI sequences or empty strings when colour
/// is disabled.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub star: &'static str,
    pub route: &'static str,
    pub start: &'static str,
    pub goal: &'static str,
    pub frame: &'static str,
    pub banner: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            star: colors::ORANGE,
            route: colors::GREEN,
            start: colors::TAG_START,
            goal: colors::TAG_GOAL,
            frame: colors::GRAY,
            banner: colors::BANNER,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            star: "",
            route: "",
            start: "",
            goal: "",
            frame: "",
            banner: "",
        }
    }

    /// `colored()` when the terminal supports ANSI colours, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects `NO_COLOR` (https://no-color.org/) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}

/// Check for explicit Unicode support hints in `LANG` / `LC_ALL`.
#[must_use]
pub fn supports_unicode() -> bool {
    ["LC_ALL", "LANG"].iter().any(|key| {
        std::env::var(key)
            .map(|value| value.to_uppercase().contains("UTF"))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    /// Environment variables are process-global, so tests touching them must
    /// not run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_env_vars<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());

        let saved: Vec<_> = vars.iter().map(|(k, _)| (*k, env::var_os(k))).collect();
        for (key, value) in vars {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        let result = f();

        for (key, value) in saved {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }

        result
    }

    #[test]
    fn plain_palette_is_empty() {
        let p = ColorPalette::plain();
        assert!(p.reset.is_empty());
        assert!(p.star.is_empty());
        assert!(p.banner.is_empty());
    }

    #[test]
    fn colored_palette_has_codes() {
        let p = ColorPalette::colored();
        assert_eq!(p.reset, colors::RESET);
        assert!(!p.route.is_empty());
    }

    #[test]
    fn no_color_disables_colors() {
        with_env_vars(&[("NO_COLOR", Some("1")), ("TERM", None)], || {
            assert!(!supports_color());
        });
    }

    #[test]
    fn dumb_terminal_disables_colors() {
        with_env_vars(&[("NO_COLOR", None), ("TERM", Some("dumb"))], || {
            assert!(!supports_color());
        });
    }

    #[test]
    fn regular_terminal_supports_colors() {
        with_env_vars(
            &[("NO_COLOR", None), ("TERM", Some("xterm-256color"))],
            || {
                assert!(supports_color());
            },
        );
    }

    #[test]
    fn utf_locale_enables_unicode() {
        with_env_vars(&[("LANG", Some("en_US.UTF-8")), ("LC_ALL", None)], || {
            assert!(supports_unicode());
        });
        with_env_vars(&[("LANG", Some("C")), ("LC_ALL", None)], || {
            assert!(!supports_unicode());
        });
    }
}
