//! Engine configuration: policy flags, the settings dictionary, and per-call
//! overrides.

use std::collections::HashMap;

use bitflags::bitflags;

bitflags! {
    /// Policy switches controlling how a [`BBFormatter`][crate::BBFormatter]
    /// reacts to ambiguous or malformed input.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FormatFlags: u32 {
        /// Abort the whole call and return the input untouched as soon as any
        /// tag turns out invalid.
        const ALL_OR_NOTHING = 1;

        /// Repair overlapping tag ranges by closing and reopening every open
        /// tag that straddles a closing one. Only meaningful when
        /// [`ALL_OR_NOTHING`][Self::ALL_OR_NOTHING] is cleared.
        const HANDLE_OVERLAPPING = 1 << 1;

        /// Pass literal content through the enclosing tag's escape function.
        const ESCAPE_CONTENT = 1 << 2;
    }
}

impl Default for FormatFlags {
    fn default() -> Self {
        FormatFlags::ALL_OR_NOTHING | FormatFlags::ESCAPE_CONTENT
    }
}

/// A single settings value. Settings are consumed only by tag behaviors; the
/// engine itself never interprets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<i64> for SettingValue {
    fn from(v: i64) -> Self {
        SettingValue::Int(v)
    }
}

impl From<&str> for SettingValue {
    fn from(v: &str) -> Self {
        SettingValue::Str(v.to_owned())
    }
}

impl From<String> for SettingValue {
    fn from(v: String) -> Self {
        SettingValue::Str(v)
    }
}

/// String-keyed settings dictionary handed to every tag behavior call.
///
/// Immutable for the lifetime of an engine; a per-call overlay may shadow
/// individual keys without mutating the engine's copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: HashMap<String, SettingValue>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// String value of `key`, or `default` if absent or not a string.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.values.get(key) {
            Some(SettingValue::Str(s)) => s,
            _ => default,
        }
    }

    /// Integer value of `key`, tolerating numeric strings, or `default`.
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(SettingValue::Int(i)) => *i,
            Some(SettingValue::Str(s)) => s.parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Boolean value of `key`, or `default` if absent or not a boolean.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(SettingValue::Bool(b)) => *b,
            _ => default,
        }
    }

    /// Overlays `other` on top of `self`, last write winning.
    pub fn merge(&mut self, other: &Settings) {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
    }
}

/// Per-call overrides accepted by
/// [`BBFormatter::format_with`][crate::BBFormatter::format_with].
///
/// Everything left unset falls back to the engine's configuration. Overrides
/// are read-only snapshots taken at call entry; the engine is never mutated.
#[derive(Debug, Clone, Default)]
pub struct FormatOverrides {
    pub(crate) all_or_nothing: Option<bool>,
    pub(crate) handle_overlapping: Option<bool>,
    pub(crate) escape_content: Option<bool>,
    pub(crate) settings: Settings,
}

impl FormatOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all_or_nothing(mut self, enabled: bool) -> Self {
        self.all_or_nothing = Some(enabled);
        self
    }

    pub fn handle_overlapping(mut self, enabled: bool) -> Self {
        self.handle_overlapping = Some(enabled);
        self
    }

    pub fn escape_content(mut self, enabled: bool) -> Self {
        self.escape_content = Some(enabled);
        self
    }

    /// Shadows a single setting for this call only.
    pub fn setting(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.settings.set(key, value);
        self
    }

    pub(crate) fn apply(&self, mut flags: FormatFlags) -> FormatFlags {
        if let Some(b) = self.all_or_nothing {
            flags.set(FormatFlags::ALL_OR_NOTHING, b);
        }
        if let Some(b) = self.handle_overlapping {
            flags.set(FormatFlags::HANDLE_OVERLAPPING, b);
        }
        if let Some(b) = self.escape_content {
            flags.set(FormatFlags::ESCAPE_CONTENT, b);
        }
        flags
    }
}
