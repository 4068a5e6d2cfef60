//! Built-in implementations of the common BBCode tags, targeting HTML.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{escape_attr, escape_text};
use crate::config::Settings;
use crate::tag::{TagBehavior, GLOBAL_NAME};

/// Top-level content handler: entity-escapes, wraps nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlGlobalTag;

impl TagBehavior for HtmlGlobalTag {
    fn name(&self) -> &str {
        GLOBAL_NAME
    }

    fn display_name(&self) -> &str {
        GLOBAL_NAME
    }

    fn needs_closing_tag(&self) -> bool {
        false
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }
}

macro_rules! simple_tag {
    ($doc:expr, $ty:ident, $name:expr, $display:expr, $open:expr, $close:expr) => {
        #[doc = $doc]
        #[doc = "<br/>"]
        #[doc = "Matches the BBCode tag `"]
        #[doc = $display]
        #[doc = "` and takes no argument."]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl TagBehavior for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn display_name(&self) -> &str {
                $display
            }

            fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
                escape_text(content)
            }

            fn open(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
                $open.to_owned()
            }

            fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
                $close.to_owned()
            }
        }
    };
}

simple_tag! {
    "Bold text, converting directly to HTML5 `<b>`.",
    BoldTag, "Bold", "b", "<b>", "</b>"
}
simple_tag! {
    "Italic text, converting directly to HTML5 `<i>`.",
    ItalicTag, "Italic", "i", "<i>", "</i>"
}
simple_tag! {
    "Underlined text, converting directly to HTML5 `<u>`.",
    UnderlineTag, "Underline", "u", "<u>", "</u>"
}
simple_tag! {
    "Struck-through text, converting directly to HTML5 `<s>`.",
    StrikeThroughTag, "StrikeThrough", "s", "<s>", "</s>"
}
simple_tag! {
    "Left-aligned block.",
    LeftTag, "Left", "left",
    "<div style=\"display: block; text-align: left\">", "</div>"
}
simple_tag! {
    "Horizontally centered block.",
    CenterTag, "Center", "center",
    "<div style=\"display: block; text-align: center\">", "</div>"
}
simple_tag! {
    "Right-aligned block.",
    RightTag, "Right", "right",
    "<div style=\"display: block; text-align: right\">", "</div>"
}

/// Font-family override, `[font=Courier New]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontTag;

impl TagBehavior for FontTag {
    fn name(&self) -> &str {
        "Font"
    }

    fn display_name(&self) -> &str {
        "font"
    }

    fn accepts_argument(&self) -> bool {
        true
    }

    fn requires_argument(&self) -> bool {
        true
    }

    fn argument_is_valid(&self, _: &Settings, argument: Option<&str>) -> bool {
        argument.is_some()
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(&self, _: &Settings, argument: Option<&str>, _: Option<&str>) -> String {
        let Some(family) = argument else {
            return String::new();
        };
        format!("<span style=\"font-family: '{}'\">", escape_attr(family))
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "</span>".to_owned()
    }
}

/// Font-size override, `[size=16]`. The argument is a bare positive integer
/// bounded by the `FontSizeMax` setting; `FontSizeUnit` supplies the CSS
/// unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontSizeTag;

impl TagBehavior for FontSizeTag {
    fn name(&self) -> &str {
        "Font Size"
    }

    fn display_name(&self) -> &str {
        "size"
    }

    fn accepts_argument(&self) -> bool {
        true
    }

    fn requires_argument(&self) -> bool {
        true
    }

    fn argument_is_valid(&self, settings: &Settings, argument: Option<&str>) -> bool {
        let Some(size) = argument.and_then(|a| a.parse::<i64>().ok()) else {
            return false;
        };
        let max = settings.int_or("FontSizeMax", 0);
        size > 0 && (max <= 0 || size <= max)
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, _: Option<&str>) -> String {
        let Some(size) = argument.and_then(|a| a.parse::<i64>().ok()) else {
            return String::new();
        };
        let unit = settings.str_or("FontSizeUnit", "px");
        format!("<span style=\"font-size: {}{}\">", size, escape_attr(unit))
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "</span>".to_owned()
    }
}

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern compiles")
});

static ADV_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:rgb\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*\)|rgba\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*(?:0?\.\d+|1|0)\s*\)|hsl\(\s*\d{1,3}\s*,\s*\d{1,3}%\s*,\s*\d{1,3}%\s*\)|hsla\(\s*\d{1,3}\s*,\s*\d{1,3}%\s*,\s*\d{1,3}%\s*,\s*(?:0?\.\d+|1|0)\s*\))$",
    )
    .expect("advanced color pattern compiles")
});

/// Color names every browser resolves, accepted case-insensitively.
const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue", "darkcyan",
    "darkgoldenrod", "darkgray", "darkgreen", "darkkhaki", "darkmagenta", "darkolivegreen",
    "darkorange", "darkorchid", "darkred", "darksalmon", "darkseagreen", "darkslateblue",
    "darkslategray", "darkturquoise", "darkviolet", "deeppink", "deepskyblue", "dimgray",
    "dodgerblue", "firebrick", "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite",
    "gold", "goldenrod", "gray", "green", "greenyellow", "honeydew", "hotpink", "indianred",
    "indigo", "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon",
    "lightblue", "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta", "maroon",
    "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple", "mediumseagreen",
    "mediumslateblue", "mediumspringgreen", "mediumturquoise", "mediumvioletred", "midnightblue",
    "mintcream", "mistyrose", "moccasin", "navajowhite", "navy", "oldlace", "olive", "olivedrab",
    "orange", "orangered", "orchid", "palegoldenrod", "palegreen", "paleturquoise",
    "palevioletred", "papayawhip", "peachpuff", "peru", "pink", "plum", "powderblue", "purple",
    "red", "rosybrown", "royalblue", "saddlebrown", "salmon", "sandybrown", "seagreen",
    "seashell", "sienna", "silver", "skyblue", "slateblue", "slategray", "snow", "springgreen",
    "steelblue", "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

/// Text color, `[color=red]` or `[color=#ff0000]`. The `rgb[a]`/`hsl[a]`
/// function forms are accepted only with the `ColorAllowAdvFormats` setting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorTag;

impl TagBehavior for ColorTag {
    fn name(&self) -> &str {
        "Color"
    }

    fn display_name(&self) -> &str {
        "color"
    }

    fn accepts_argument(&self) -> bool {
        true
    }

    fn requires_argument(&self) -> bool {
        true
    }

    fn argument_is_valid(&self, settings: &Settings, argument: Option<&str>) -> bool {
        let Some(color) = argument else {
            return false;
        };
        if NAMED_COLORS.contains(&color.to_ascii_lowercase().as_str()) || HEX_COLOR.is_match(color)
        {
            return true;
        }
        settings.bool_or("ColorAllowAdvFormats", false) && ADV_COLOR.is_match(color)
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(&self, _: &Settings, argument: Option<&str>, _: Option<&str>) -> String {
        let Some(color) = argument else {
            return String::new();
        };
        format!("<span style=\"color: {}\">", escape_attr(color))
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "</span>".to_owned()
    }
}

/// Quote box with an optional author argument, `[quote=Waldo]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteTag;

impl TagBehavior for QuoteTag {
    fn name(&self) -> &str {
        "Quote"
    }

    fn display_name(&self) -> &str {
        "quote"
    }

    fn accepts_argument(&self) -> bool {
        true
    }

    fn argument_is_valid(&self, _: &Settings, _: Option<&str>) -> bool {
        true
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(
        &self,
        settings: &Settings,
        argument: Option<&str>,
        forced_closer: Option<&str>,
    ) -> String {
        let border = escape_attr(settings.str_or("QuoteBorder", "1px solid gray")).into_owned();
        let background = escape_attr(settings.str_or("QuoteBackground", "white")).into_owned();

        let mut out = String::from("<div ");
        if let Some(by) = argument {
            let class = settings
                .str_or("QuoteCSSClassName", "quotebox-{by}")
                .replace("{by}", by);
            out.push_str(&format!("class=\"{}\" ", escape_attr(&class)));
        }
        out.push_str(&format!(
            "style=\"display: block; margin-bottom: .5em; border: {}; background-color: {}\">",
            border, background
        ));

        // The title bar belongs to the quote itself; a close/reopen forced by
        // an overlapping tag must not duplicate it.
        if forced_closer.is_none() {
            out.push_str(&format!(
                "<div style=\"display: block; width: 100%; text-indent: .25em; \
                 border-bottom: {}; background-color: {}\">QUOTE",
                border,
                escape_attr(settings.str_or("QuoteTitleBackground", "#e4eaf2"))
            ));
            if let Some(by) = argument {
                out.push_str(&format!(" by {}", escape_text(by)));
            }
            out.push_str("</div>");
        }

        out.push_str("<div style=\"overflow-x: auto; padding: .25em\">");
        out
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "</div></div>".to_owned()
    }
}

fn code_box_open(
    settings: &Settings,
    argument: Option<&str>,
    forced_closer: Option<&str>,
    scrolling: bool,
) -> String {
    let border = escape_attr(settings.str_or("CodeBorder", "1px solid gray")).into_owned();
    let background = escape_attr(settings.str_or("CodeBackground", "white")).into_owned();

    let mut out = format!(
        "<div style=\"display: block; margin-bottom: .5em; border: {}; background-color: {}\">",
        border, background
    );

    if forced_closer.is_none() {
        out.push_str(&format!(
            "<div style=\"display: block; width: 100%; text-indent: .25em; \
             border-bottom: {}; background-color: {}\">CODE",
            border,
            escape_attr(settings.str_or("CodeTitleBackground", "#ffc29c"))
        ));
        if let Some(lang) = argument {
            out.push_str(&format!(" ({})", escape_text(lang)));
        }
        out.push_str("</div>");
    }

    out.push_str("<pre ");
    if let Some(lang) = argument {
        let class = settings
            .str_or("CodeCSSClassName", "codebox-{lang}")
            .replace("{lang}", lang);
        out.push_str(&format!("class=\"{}\" ", escape_attr(&class)));
    }
    if scrolling {
        out.push_str(
            "style=\"height: 29ex; overflow-y: auto; margin: 0; font-family: monospace; \
             white-space: pre-wrap; padding: .25em\">",
        );
    } else {
        out.push_str(
            "style=\"overflow-x: auto; margin: 0; font-family: monospace; \
             white-space: pre-wrap; padding: .25em\">",
        );
    }
    out
}

/// Code box with an optional language argument. Tags inside it stay literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeTag;

impl TagBehavior for CodeTag {
    fn name(&self) -> &str {
        "Code"
    }

    fn display_name(&self) -> &str {
        "code"
    }

    fn allows_nested_content(&self) -> bool {
        false
    }

    fn accepts_argument(&self) -> bool {
        true
    }

    fn argument_is_valid(&self, _: &Settings, _: Option<&str>) -> bool {
        true
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(
        &self,
        settings: &Settings,
        argument: Option<&str>,
        forced_closer: Option<&str>,
    ) -> String {
        code_box_open(settings, argument, forced_closer, false)
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "</pre></div>".to_owned()
    }
}

/// Fixed-height scrolling variant of [`CodeTag`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeBoxTag;

impl TagBehavior for CodeBoxTag {
    fn name(&self) -> &str {
        "Code Box"
    }

    fn display_name(&self) -> &str {
        "codebox"
    }

    fn allows_nested_content(&self) -> bool {
        false
    }

    fn accepts_argument(&self) -> bool {
        true
    }

    fn argument_is_valid(&self, _: &Settings, _: Option<&str>) -> bool {
        true
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(
        &self,
        settings: &Settings,
        argument: Option<&str>,
        forced_closer: Option<&str>,
    ) -> String {
        code_box_open(settings, argument, forced_closer, true)
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "</pre></div>".to_owned()
    }
}

/// Hyperlink, `[url=http://example.org]`. Styling comes from the
/// `LinkUnderline` and `LinkColor` settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkTag;

impl TagBehavior for LinkTag {
    fn name(&self) -> &str {
        "Link"
    }

    fn display_name(&self) -> &str {
        "url"
    }

    fn accepts_argument(&self) -> bool {
        true
    }

    fn requires_argument(&self) -> bool {
        true
    }

    fn argument_is_valid(&self, _: &Settings, argument: Option<&str>) -> bool {
        argument.is_some()
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, _: Option<&str>) -> String {
        let Some(href) = argument else {
            return String::new();
        };
        let decoration = if settings.bool_or("LinkUnderline", true) {
            "underline"
        } else {
            "none"
        };
        format!(
            "<a style=\"text-decoration: {}; color: {}\" href=\"{}\">",
            decoration,
            escape_attr(settings.str_or("LinkColor", "blue")),
            escape_attr(href)
        )
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "</a>".to_owned()
    }
}

/// Image embed: the tag's content is the source URL, the optional argument a
/// `WxH` pixel size, ex: `[img=640x480]http://example.org/pic.png[/img]`.
///
/// The open/close pair brackets the `src` attribute, so this tag opts out of
/// the overlap close/reopen protocol entirely; splitting an attribute in half
/// could only produce garbage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageTag;

fn image_dimensions(argument: &str) -> Option<(u32, u32)> {
    let (w, h) = argument.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

impl TagBehavior for ImageTag {
    fn name(&self) -> &str {
        "Image"
    }

    fn display_name(&self) -> &str {
        "img"
    }

    fn allows_nested_content(&self) -> bool {
        false
    }

    fn accepts_argument(&self) -> bool {
        true
    }

    fn argument_is_valid(&self, _: &Settings, argument: Option<&str>) -> bool {
        match argument {
            None => true,
            Some(arg) => image_dimensions(arg).is_some(),
        }
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        // The content lands inside the src attribute.
        escape_attr(content)
    }

    fn open(&self, _: &Settings, _: Option<&str>, forced_closer: Option<&str>) -> String {
        if forced_closer.is_some() {
            return String::new();
        }
        "<img src=\"".to_owned()
    }

    fn close(
        &self,
        settings: &Settings,
        argument: Option<&str>,
        forced_closer: Option<&str>,
    ) -> String {
        if forced_closer.is_some() {
            return String::new();
        }

        let terminator = if settings.bool_or("XHTML", false) {
            "/>"
        } else {
            ">"
        };

        if let Some((mut width, mut height)) = argument.and_then(image_dimensions) {
            let max_width = settings.int_or("ImageMaxWidth", 0);
            if max_width > 0 {
                width = width.min(max_width as u32);
            }
            let max_height = settings.int_or("ImageMaxHeight", 0);
            if max_height > 0 {
                height = height.min(max_height as u32);
            }
            return format!(
                "\" alt=\"image\" style=\"width: {}px; height: {}px\"{}",
                width, height, terminator
            );
        }

        format!("\" alt=\"image\"{}", terminator)
    }
}

fn ul_style(argument: &str) -> Option<&'static str> {
    match argument {
        "circle" => Some("circle"),
        // "disk" is a common misspelling of the CSS keyword; accept both.
        "disc" | "disk" => Some("disc"),
        "square" => Some("square"),
        _ => None,
    }
}

fn ol_style(argument: &str) -> Option<&'static str> {
    match argument {
        "1" => Some("decimal"),
        "a" => Some("lower-alpha"),
        "A" => Some("upper-alpha"),
        "i" => Some("lower-roman"),
        "I" => Some("upper-roman"),
        _ => None,
    }
}

/// Unordered list, `[ul]` or `[ul=square]`, with the
/// `UnorderedListDefaultType` setting as fallback type.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnorderedListTag;

impl TagBehavior for UnorderedListTag {
    fn name(&self) -> &str {
        "Unordered List"
    }

    fn display_name(&self) -> &str {
        "ul"
    }

    fn accepts_argument(&self) -> bool {
        true
    }

    fn argument_is_valid(&self, _: &Settings, argument: Option<&str>) -> bool {
        match argument {
            None => true,
            Some(arg) => ul_style(arg).is_some(),
        }
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, _: Option<&str>) -> String {
        let style = argument
            .and_then(ul_style)
            .or_else(|| ul_style(settings.str_or("UnorderedListDefaultType", "")))
            .unwrap_or("disc");
        format!("<ul style=\"list-style-type: {}\">", style)
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "</ul>".to_owned()
    }
}

/// Ordered list, `[ol]` or `[ol=i]`, with the `OrderedListDefaultType`
/// setting as fallback type.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedListTag;

impl TagBehavior for OrderedListTag {
    fn name(&self) -> &str {
        "Ordered List"
    }

    fn display_name(&self) -> &str {
        "ol"
    }

    fn accepts_argument(&self) -> bool {
        true
    }

    fn argument_is_valid(&self, _: &Settings, argument: Option<&str>) -> bool {
        match argument {
            None => true,
            Some(arg) => ol_style(arg).is_some(),
        }
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, _: Option<&str>) -> String {
        let style = argument
            .and_then(ol_style)
            .or_else(|| ol_style(settings.str_or("OrderedListDefaultType", "")))
            .unwrap_or("decimal");
        format!("<ol style=\"list-style-type: {}\">", style)
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "</ol>".to_owned()
    }
}

/// Explicit list item, valid only directly inside `[ul]` or `[ol]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListItemTag;

impl TagBehavior for ListItemTag {
    fn name(&self) -> &str {
        "List Item"
    }

    fn display_name(&self) -> &str {
        "li"
    }

    fn accepts_parent(&self, _: &Settings, parent: &str) -> bool {
        parent == "ul" || parent == "ol"
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "<li>".to_owned()
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "</li>".to_owned()
    }
}

/// Combined list, `[list]`/`[list=1]`: the argument picks between the
/// unordered and ordered type maps. Closing it auto-closes a dangling `[*]`.
///
/// Fallback policy when the argument resolves to no known type: the
/// `ListDefaultType` setting is consulted against the unordered map first,
/// then the ordered map, and an unordered `disc` list is the last resort.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListTag;

fn list_element(settings: &Settings, argument: Option<&str>) -> (&'static str, &'static str) {
    if let Some(arg) = argument {
        if let Some(style) = ul_style(arg) {
            return ("ul", style);
        }
        if let Some(style) = ol_style(arg) {
            return ("ol", style);
        }
    }
    let fallback = settings.str_or("ListDefaultType", "");
    if let Some(style) = ul_style(fallback) {
        return ("ul", style);
    }
    if let Some(style) = ol_style(fallback) {
        return ("ol", style);
    }
    ("ul", "disc")
}

impl TagBehavior for ListTag {
    fn name(&self) -> &str {
        "List"
    }

    fn display_name(&self) -> &str {
        "list"
    }

    fn accepts_argument(&self) -> bool {
        true
    }

    fn argument_is_valid(&self, _: &Settings, argument: Option<&str>) -> bool {
        match argument {
            None => true,
            Some(arg) => ul_style(arg).is_some() || ol_style(arg).is_some(),
        }
    }

    fn auto_close_on_close(&self) -> Option<&str> {
        Some("*")
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(&self, settings: &Settings, argument: Option<&str>, _: Option<&str>) -> String {
        let (element, style) = list_element(settings, argument);
        format!("<{} style=\"list-style-type: {}\">", element, style)
    }

    fn close(&self, settings: &Settings, argument: Option<&str>, _: Option<&str>) -> String {
        let (element, _) = list_element(settings, argument);
        format!("</{}>", element)
    }
}

/// Star list item, `[*]`: opening one auto-closes the previous one, so
/// `[*]foo [*]bar` needs no explicit `[/*]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StarTag;

impl TagBehavior for StarTag {
    fn name(&self) -> &str {
        "Star"
    }

    fn display_name(&self) -> &str {
        "*"
    }

    fn auto_close_on_open(&self) -> Option<&str> {
        Some("*")
    }

    fn escape<'t>(&self, _: &Settings, content: &'t str) -> Cow<'t, str> {
        escape_text(content)
    }

    fn open(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "<li>".to_owned()
    }

    fn close(&self, _: &Settings, _: Option<&str>, _: Option<&str>) -> String {
        "</li>".to_owned()
    }
}
