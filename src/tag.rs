//! The tag capability contract and the registry that maps display names to
//! behavior implementations.

use std::borrow::Cow;
use std::collections::HashMap;

use static_assertions::assert_obj_safe;

use crate::config::Settings;

/// Reserved display name of the pseudo-tag representing top-level content.
///
/// It is handed to [`TagBehavior::accepts_parent`] when a tag has no enclosing
/// valid tag, and its behavior supplies the escape function for content that
/// no tag encloses. It never matches bracket text in the input.
pub const GLOBAL_NAME: &str = "GLOBAL";

/// The contract every tag implements, including the `GLOBAL` fallback.
///
/// Behaviors are stateless: the same instance is consulted for every
/// occurrence of its tag in every call, with all per-call context arriving
/// through the `settings` arguments.
pub trait TagBehavior: Send + Sync {
    /// Human-readable name, ex: `Bold`.
    fn name(&self) -> &str;

    /// Name of the tag as written, ex: `b`. Must not start with `/`.
    fn display_name(&self) -> &str;

    /// Whether this tag is terminated by an explicit closing tag. Tags
    /// returning `false` are self-contained; stray close tags for them are
    /// downgraded to literal content.
    fn needs_closing_tag(&self) -> bool {
        true
    }

    /// Whether other tags may be nested inside this tag's range. `false`
    /// invalidates child tags, not this tag's own parsing.
    fn allows_nested_content(&self) -> bool {
        true
    }

    /// Whether an `=argument` is accepted on the opening tag. Tags returning
    /// `false` reject any supplied argument.
    fn accepts_argument(&self) -> bool {
        false
    }

    /// Whether an argument is mandatory. Argument-less tags return `false`.
    fn requires_argument(&self) -> bool {
        false
    }

    /// Semantic validation of the argument. Consulted whenever
    /// [`accepts_argument`][Self::accepts_argument] is `true`, including for
    /// an absent argument. Argument-less tags return `false` by convention.
    fn argument_is_valid(&self, settings: &Settings, argument: Option<&str>) -> bool {
        let _ = (settings, argument);
        false
    }

    /// Whether `parent` (the display name of the nearest enclosing valid tag,
    /// or [`GLOBAL_NAME`]) is an acceptable parent for this tag.
    fn accepts_parent(&self, settings: &Settings, parent: &str) -> bool {
        let _ = (settings, parent);
        true
    }

    /// Display name of a tag to implicitly close right before this tag opens,
    /// if one of that name is currently open. Used by list-item style tags to
    /// terminate the previous sibling.
    fn auto_close_on_open(&self) -> Option<&str> {
        None
    }

    /// Like [`auto_close_on_open`][Self::auto_close_on_open], applied right
    /// before this tag closes.
    fn auto_close_on_close(&self) -> Option<&str> {
        None
    }

    /// Transforms literal content destined for the output. The default is
    /// pass-through; HTML-targeting behaviors entity-escape here.
    fn escape<'t>(&self, settings: &Settings, content: &'t str) -> Cow<'t, str> {
        let _ = settings;
        Cow::Borrowed(content)
    }

    /// Emits the markup opening this tag's range. `forced_closer` is set only
    /// during overlapping-range repair and names the tag actually being
    /// closed, letting an implementation suppress markup it would otherwise
    /// duplicate when reopened.
    fn open(&self, settings: &Settings, argument: Option<&str>, forced_closer: Option<&str>)
        -> String {
        let _ = (settings, argument, forced_closer);
        String::new()
    }

    /// Emits the markup closing this tag's range. `forced_closer` is `None`
    /// when the tag is genuinely ending, and names the ending tag when this
    /// one is only being closed to untangle an overlap.
    fn close(&self, settings: &Settings, argument: Option<&str>, forced_closer: Option<&str>)
        -> String {
        let _ = (settings, argument, forced_closer);
        String::new()
    }
}

assert_obj_safe!(TagBehavior);

/// Fallback top-level handler: no escaping, no markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGlobalTag;

impl TagBehavior for DefaultGlobalTag {
    fn name(&self) -> &str {
        GLOBAL_NAME
    }

    fn display_name(&self) -> &str {
        GLOBAL_NAME
    }

    fn needs_closing_tag(&self) -> bool {
        false
    }
}

/// Immutable mapping from display name to tag behavior, plus the dedicated
/// `GLOBAL` slot.
///
/// Lookups are case-sensitive. Inserting a behavior whose display name is
/// [`GLOBAL_NAME`] replaces the top-level handler instead of registering a
/// matchable tag.
pub struct TagRegistry {
    global: Box<dyn TagBehavior>,
    tags: HashMap<String, Box<dyn TagBehavior>>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TagRegistry {
    pub fn new() -> Self {
        Self {
            global: Box::new(DefaultGlobalTag),
            tags: HashMap::new(),
        }
    }

    pub fn insert(&mut self, tag: Box<dyn TagBehavior>) {
        if tag.display_name() == GLOBAL_NAME {
            self.global = tag;
        } else {
            self.tags.insert(tag.display_name().to_owned(), tag);
        }
    }

    pub fn get(&self, display_name: &str) -> Option<&dyn TagBehavior> {
        self.tags.get(display_name).map(|t| t.as_ref())
    }

    pub fn contains(&self, display_name: &str) -> bool {
        self.tags.contains_key(display_name)
    }

    pub fn global(&self) -> &dyn TagBehavior {
        self.global.as_ref()
    }

    /// Number of matchable tags, the `GLOBAL` handler excluded.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(|k| k.as_str())
    }
}
