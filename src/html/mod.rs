//! The built-in HTML tag catalogue and its default settings.
//!
//! Everything here is data: each tag is a small [`TagBehavior`] whose open
//! and close bodies are string templates. The formatting pipeline itself
//! lives in the crate root modules and works with any catalogue.

use std::borrow::Cow;

use crate::config::Settings;
use crate::tag::TagBehavior;

pub mod builtins;


/// Entity-escapes text destined for an HTML text node.
pub(crate) fn escape_text(content: &str) -> Cow<'_, str> {
    html_escape::encode_text(content)
}

/// Entity-escapes a value interpolated into a double-quoted HTML attribute.
pub(crate) fn escape_attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// The default settings consumed by the built-in catalogue.
pub fn default_settings() -> Settings {
    let mut s = Settings::new();
    s.set("XHTML", false);
    s.set("FontSizeUnit", "px");
    // Set to a non-positive value to allow any font size.
    s.set("FontSizeMax", 48);
    // Whether the rgb[a]/hsl[a] color formats should be accepted.
    s.set("ColorAllowAdvFormats", false);
    s.set("QuoteTitleBackground", "#e4eaf2");
    s.set("QuoteBorder", "1px solid gray");
    s.set("QuoteBackground", "white");
    // {by} is the quote parameter, ex: [quote=Waldo] gives {by} = Waldo.
    s.set("QuoteCSSClassName", "quotebox-{by}");
    s.set("CodeTitleBackground", "#ffc29c");
    s.set("CodeBorder", "1px solid gray");
    s.set("CodeBackground", "white");
    // {lang} is the code parameter, ex: [code=rust] gives {lang} = rust.
    s.set("CodeCSSClassName", "codebox-{lang}");
    s.set("LinkUnderline", true);
    s.set("LinkColor", "blue");
    // Recognized when present: ImageMaxWidth, ImageMaxHeight,
    // UnorderedListDefaultType, OrderedListDefaultType, ListDefaultType.
    s
}

/// Every built-in tag behavior, the HTML-aware `GLOBAL` handler included.
pub fn default_tags() -> Vec<Box<dyn TagBehavior>> {
    use builtins::*;

    vec![
        Box::new(HtmlGlobalTag),
        Box::new(BoldTag),
        Box::new(ItalicTag),
        Box::new(UnderlineTag),
        Box::new(StrikeThroughTag),
        Box::new(FontTag),
        Box::new(FontSizeTag),
        Box::new(ColorTag),
        Box::new(LeftTag),
        Box::new(CenterTag),
        Box::new(RightTag),
        Box::new(QuoteTag),
        Box::new(CodeTag),
        Box::new(CodeBoxTag),
        Box::new(LinkTag),
        Box::new(ImageTag),
        Box::new(UnorderedListTag),
        Box::new(OrderedListTag),
        Box::new(ListItemTag),
        Box::new(ListTag),
        Box::new(StarTag),
    ]
}
