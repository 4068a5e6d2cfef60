//! The composition root: owns the tag registry and configuration and drives
//! tokenize → classify → resolve → render for each `format` call.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::{FormatFlags, FormatOverrides, Settings};
use crate::parser::resolve::{resolve, Resolution, ResolveContext};
use crate::parser::{
    classify, enclosing_valid_open, split_delimited, ClassifyContext, Token, TokenKind,
    TokenStatus,
};
use crate::tag::{TagBehavior, TagRegistry};

/// Construction-time misconfiguration, rejected eagerly by
/// [`BBFormatterBuilder::build`] rather than surfacing during `format`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("start and end delimiters must be non-empty and distinct")]
    InvalidDelimiters,
    #[error("tag display name may not be empty")]
    EmptyTagName,
    #[error("tag display name `{0}` may not start with the close marker `/`")]
    LeadingCloseMarker(String),
    #[error("tag display name `{0}` collides with the argument or delimiter syntax")]
    UnparsableTagName(String),
}

/// A BBCode formatter.
///
/// Registry and configuration are fixed at construction; `format` takes
/// `&self` and allocates all per-call state itself, so one engine may serve
/// concurrent calls from multiple threads.
pub struct BBFormatter {
    registry: TagRegistry,
    settings: Settings,
    flags: FormatFlags,
    /// `None` means every registered tag is allowed.
    allowed: Option<HashSet<String>>,
    start: String,
    end: String,
}

impl BBFormatter {
    /// An engine with the default HTML tag catalogue and settings.
    #[cfg(feature = "html")]
    pub fn new() -> Self {
        Self::builder()
            .build()
            .expect("default configuration is valid")
    }

    pub fn builder() -> BBFormatterBuilder {
        BBFormatterBuilder::default()
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Formats `input` with the engine's configuration.
    pub fn format(&self, input: &str) -> String {
        self.format_with(input, &FormatOverrides::default())
    }

    /// Formats `input`, with the policy flags and individual settings
    /// optionally overridden for this call only.
    pub fn format_with(&self, input: &str, overrides: &FormatOverrides) -> String {
        let flags = overrides.apply(self.flags);
        let escape = flags.contains(FormatFlags::ESCAPE_CONTENT);

        // Why bother parsing if there are no tags to find?
        let nothing_allowed = self.allowed.as_ref().map_or(false, |a| a.is_empty());
        if self.registry.is_empty() || nothing_allowed {
            return input.to_owned();
        }

        let merged;
        let settings = if overrides.settings.is_empty() {
            &self.settings
        } else {
            let mut s = self.settings.clone();
            s.merge(&overrides.settings);
            merged = s;
            &merged
        };

        // Fast path: without both delimiters present there is nothing to
        // parse, only (possibly) escaping to apply.
        if !input.contains(self.start.as_str()) || !input.contains(self.end.as_str()) {
            return if escape {
                self.registry.global().escape(settings, input).into_owned()
            } else {
                input.to_owned()
            };
        }

        let spans = split_delimited(input, &self.start, &self.end);
        let mut tokens = classify(
            spans,
            &ClassifyContext {
                registry: &self.registry,
                allowed: self.allowed.as_ref(),
                start: &self.start,
                end: &self.end,
            },
        );

        let rctx = ResolveContext {
            registry: &self.registry,
            settings,
            flags,
        };
        match resolve(&mut tokens, &rctx) {
            Resolution::Aborted => input.to_owned(),
            Resolution::Completed => self.render(&tokens, settings, flags),
        }
    }

    fn render(&self, tokens: &[Token<'_>], settings: &Settings, flags: FormatFlags) -> String {
        let escape = flags.contains(FormatFlags::ESCAPE_CONTENT);
        let overlapping = flags.contains(FormatFlags::HANDLE_OVERLAPPING);

        let mut out = String::with_capacity(tokens.iter().map(|t| t.span.len()).sum());
        // Open ranges in opening order; maintained only in overlapping mode.
        let mut open_stack: Vec<usize> = Vec::new();

        for (i, tk) in tokens.iter().enumerate() {
            match tk.kind {
                TokenKind::Content => {
                    if escape {
                        let tag = enclosing_valid_open(tokens, i)
                            .and_then(|p| self.registry.get(&tokens[p].name))
                            .unwrap_or_else(|| self.registry.global());
                        out.push_str(&tag.escape(settings, &tk.span));
                    } else {
                        out.push_str(&tk.span);
                    }
                }
                TokenKind::TagOpen => {
                    let tag = (tk.status == TokenStatus::Valid)
                        .then(|| self.registry.get(&tk.name))
                        .flatten();
                    let Some(tag) = tag else {
                        self.push_literal(&mut out, tk, settings, escape);
                        continue;
                    };
                    out.push_str(&tag.open(settings, tk.argument.as_deref(), None));
                    // Self-contained opens have no close to pair with and
                    // never participate in overlap repair.
                    if overlapping && tk.matched.is_some() {
                        open_stack.push(i);
                    }
                }
                TokenKind::TagClose => {
                    if tk.status != TokenStatus::Valid {
                        self.push_literal(&mut out, tk, settings, escape);
                        continue;
                    }
                    if overlapping {
                        self.render_overlapping_close(&mut out, tokens, tk, &mut open_stack, settings);
                    } else if let Some(tag) = self.registry.get(&tk.name) {
                        // A close renders with its pair's argument; close
                        // tokens rarely carry one of their own.
                        let argument = tk
                            .matched
                            .and_then(|m| tokens[m].argument.as_deref())
                            .or(tk.argument.as_deref());
                        out.push_str(&tag.close(settings, argument, None));
                    }
                }
            }
        }

        out
    }

    /// The overlapping-codes close protocol: close every open range from the
    /// innermost out, drop the range that is truly ending, then reopen the
    /// rest from the outermost in. Every behavior except the true match sees
    /// the ending tag's name as `forced_closer`, letting it suppress markup
    /// it would otherwise duplicate.
    fn render_overlapping_close(
        &self,
        out: &mut String,
        tokens: &[Token<'_>],
        close: &Token<'_>,
        open_stack: &mut Vec<usize>,
        settings: &Settings,
    ) {
        let closer = close.name.as_ref();

        for &j in open_stack.iter().rev() {
            let jt = &tokens[j];
            let Some(jtag) = self.registry.get(&jt.name) else {
                continue;
            };
            let forced = if Some(j) == close.matched {
                None
            } else {
                Some(closer)
            };
            out.push_str(&jtag.close(settings, jt.argument.as_deref(), forced));
        }

        if let Some(m) = close.matched {
            open_stack.retain(|&j| j != m);
        }

        for &j in open_stack.iter() {
            let jt = &tokens[j];
            let Some(jtag) = self.registry.get(&jt.name) else {
                continue;
            };
            out.push_str(&jtag.open(settings, jt.argument.as_deref(), Some(closer)));
        }
    }

    /// Unresolvable and invalid tags fall back to their source text. The text
    /// still travels through the global escape so a hostile "tag name" cannot
    /// smuggle raw markup into the output.
    fn push_literal(&self, out: &mut String, tk: &Token<'_>, settings: &Settings, escape: bool) {
        if escape {
            out.push_str(&self.registry.global().escape(settings, &tk.span));
        } else {
            out.push_str(&tk.span);
        }
    }
}

#[cfg(feature = "html")]
impl Default for BBFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a [`BBFormatter`].
///
/// Supplied behaviors supplement the built-in catalogue and override
/// same-named entries; [`replace_default_tags`][Self::replace_default_tags]
/// starts from an empty catalogue instead. A behavior registered under the
/// `GLOBAL` name replaces the top-level content handler.
pub struct BBFormatterBuilder {
    tags: Vec<Box<dyn TagBehavior>>,
    replace_defaults: bool,
    allowed: Option<HashSet<String>>,
    settings: Settings,
    flags: FormatFlags,
    start: String,
    end: String,
}

impl Default for BBFormatterBuilder {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            replace_defaults: false,
            allowed: None,
            settings: Settings::new(),
            flags: FormatFlags::default(),
            start: "[".to_owned(),
            end: "]".to_owned(),
        }
    }
}

impl BBFormatterBuilder {
    /// Registers a tag behavior, keyed by its display name.
    pub fn tag(mut self, tag: Box<dyn TagBehavior>) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn tags(mut self, tags: Vec<Box<dyn TagBehavior>>) -> Self {
        self.tags.extend(tags);
        self
    }

    /// Drops the built-in catalogue; only supplied behaviors are registered.
    pub fn replace_default_tags(mut self) -> Self {
        self.replace_defaults = true;
        self
    }

    /// Restricts formatting to the given display names. Unlisted registered
    /// tags render as literal text.
    pub fn allowed_tags<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides a single default setting.
    pub fn setting(
        mut self,
        key: impl Into<String>,
        value: impl Into<crate::config::SettingValue>,
    ) -> Self {
        self.settings.set(key, value);
        self
    }

    /// Overlays a whole settings dictionary, last write winning.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings.merge(&settings);
        self
    }

    pub fn all_or_nothing(mut self, enabled: bool) -> Self {
        self.flags.set(FormatFlags::ALL_OR_NOTHING, enabled);
        self
    }

    pub fn handle_overlapping(mut self, enabled: bool) -> Self {
        self.flags.set(FormatFlags::HANDLE_OVERLAPPING, enabled);
        self
    }

    pub fn escape_content(mut self, enabled: bool) -> Self {
        self.flags.set(FormatFlags::ESCAPE_CONTENT, enabled);
        self
    }

    /// Replaces the `[` / `]` delimiter pair. Both may be multi-character.
    pub fn delimiters(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = start.into();
        self.end = end.into();
        self
    }

    pub fn build(self) -> Result<BBFormatter, ConfigError> {
        if self.start.is_empty() || self.end.is_empty() || self.start == self.end {
            return Err(ConfigError::InvalidDelimiters);
        }

        let mut registry = TagRegistry::new();

        #[cfg(feature = "html")]
        if !self.replace_defaults {
            for tag in crate::html::default_tags() {
                registry.insert(tag);
            }
        }

        for tag in self.tags {
            validate_display_name(tag.display_name(), &self.start, &self.end)?;
            registry.insert(tag);
        }

        #[cfg(feature = "html")]
        let mut settings = crate::html::default_settings();
        #[cfg(not(feature = "html"))]
        let mut settings = Settings::new();
        settings.merge(&self.settings);

        Ok(BBFormatter {
            registry,
            settings,
            flags: self.flags,
            allowed: self.allowed,
            start: self.start,
            end: self.end,
        })
    }
}

fn validate_display_name(name: &str, start: &str, end: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::EmptyTagName);
    }
    if name.starts_with('/') {
        return Err(ConfigError::LeadingCloseMarker(name.to_owned()));
    }
    if name.contains('=') || name.contains(start) || name.contains(end) {
        return Err(ConfigError::UnparsableTagName(name.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use super::*;
    use crate::config::Settings;
    use crate::tag::GLOBAL_NAME;

    struct Wrap {
        display: &'static str,
        open: &'static str,
        close: &'static str,
    }

    impl TagBehavior for Wrap {
        fn name(&self) -> &str {
            self.display
        }

        fn display_name(&self) -> &str {
            self.display
        }

        fn open(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
            self.open.to_owned()
        }

        fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
            self.close.to_owned()
        }
    }

    struct Rule;

    impl TagBehavior for Rule {
        fn name(&self) -> &str {
            "Rule"
        }

        fn display_name(&self) -> &str {
            "hr"
        }

        fn needs_closing_tag(&self) -> bool {
            false
        }

        fn open(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
            "<hr>".to_owned()
        }
    }

    struct ShoutyGlobal;

    impl TagBehavior for ShoutyGlobal {
        fn name(&self) -> &str {
            GLOBAL_NAME
        }

        fn display_name(&self) -> &str {
            GLOBAL_NAME
        }

        fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
            Cow::Owned(content.to_uppercase())
        }
    }

    fn custom() -> BBFormatter {
        BBFormatter::builder()
            .replace_default_tags()
            .tag(Box::new(Wrap {
                display: "em",
                open: "<em>",
                close: "</em>",
            }))
            .tag(Box::new(Rule))
            .build()
            .unwrap()
    }

    #[test]
    fn custom_tags_format() {
        let fmt = custom();
        assert_eq!(fmt.format("[em]x[/em]"), "<em>x</em>");
    }

    #[test]
    fn no_registered_tags_returns_input() {
        let fmt = BBFormatter::builder()
            .replace_default_tags()
            .build()
            .unwrap();
        assert_eq!(fmt.format("[em]x[/em]"), "[em]x[/em]");
    }

    #[test]
    fn empty_allowed_set_returns_input() {
        let fmt = BBFormatter::builder()
            .replace_default_tags()
            .tag(Box::new(Rule))
            .allowed_tags(Vec::<String>::new())
            .build()
            .unwrap();
        assert_eq!(fmt.format("[hr] unparsed"), "[hr] unparsed");
    }

    #[test]
    fn self_contained_tag_and_stray_close() {
        let fmt = custom();
        assert_eq!(fmt.format("a[hr]b"), "a<hr>b");
        // The stray close is downgraded to literal content.
        assert_eq!(fmt.format("a[hr]b[/hr]c"), "a<hr>b[/hr]c");
    }

    #[test]
    fn replacing_the_global_handler_changes_escaping() {
        let fmt = BBFormatter::builder()
            .replace_default_tags()
            .tag(Box::new(Wrap {
                display: "em",
                open: "<em>",
                close: "</em>",
            }))
            .tag(Box::new(ShoutyGlobal))
            .build()
            .unwrap();
        assert_eq!(fmt.format("hi [em]there[/em]"), "HI <em>there</em>");
    }

    #[test]
    fn custom_delimiters() {
        let fmt = BBFormatter::builder()
            .replace_default_tags()
            .tag(Box::new(Wrap {
                display: "em",
                open: "<em>",
                close: "</em>",
            }))
            .delimiters("{{", "}}")
            .build()
            .unwrap();
        assert_eq!(fmt.format("{{em}}x{{/em}} [em]y[/em]"), "<em>x</em> [em]y[/em]");
    }

    #[test]
    fn builder_rejects_bad_display_names() {
        let bad = |name: &'static str| {
            BBFormatter::builder()
                .replace_default_tags()
                .tag(Box::new(Wrap {
                    display: name,
                    open: "",
                    close: "",
                }))
                .build()
        };
        assert!(matches!(bad(""), Err(ConfigError::EmptyTagName)));
        assert!(matches!(bad("/b"), Err(ConfigError::LeadingCloseMarker(_))));
        assert!(matches!(bad("a=b"), Err(ConfigError::UnparsableTagName(_))));
        assert!(matches!(bad("a]b"), Err(ConfigError::UnparsableTagName(_))));
    }

    #[test]
    fn builder_rejects_bad_delimiters() {
        assert!(matches!(
            BBFormatter::builder().delimiters("", "]").build(),
            Err(ConfigError::InvalidDelimiters)
        ));
        assert!(matches!(
            BBFormatter::builder().delimiters("|", "|").build(),
            Err(ConfigError::InvalidDelimiters)
        ));
    }

    #[test]
    fn overrides_do_not_mutate_the_engine() {
        let fmt = custom();
        let loose = FormatOverrides::new().all_or_nothing(false);
        assert_eq!(fmt.format_with("[em]x", &loose), "[em]x");
        // The engine default (all-or-nothing on) still applies afterwards.
        assert_eq!(fmt.format("[em]x"), "[em]x");
        assert_eq!(fmt.format("[em]x[/em]"), "<em>x</em>");
    }
}
