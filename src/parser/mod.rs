//! Token model, delimited tokenizer, and lexical classifier.
//!
//! One `format` call produces one token queue: an ordered `Vec<Token>` whose
//! index order is emission order. The tokenizer splits raw input into literal
//! spans and bracket bodies; the classifier turns bracket bodies into
//! open/close tokens, inserts auto-close tokens, and tags each token with its
//! initial resolvability status.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::tag::TagRegistry;

pub(crate) mod resolve;

#[cfg(test)]
mod tests;

/// What a token contributes to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal text between tags.
    Content,
    /// An opening tag, `[b]` or `[url=...]`.
    TagOpen,
    /// A closing tag, `[/b]`.
    TagClose,
}

/// Validity of a token, assigned by the classifier and resolution pass.
///
/// Within one call a status is monotonic: once a token goes `Invalid` it
/// never turns `Valid` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// Not yet resolved. Tag tokens start here.
    Undetermined,
    /// Participates in output generation. Content tokens start here.
    Valid,
    /// Unmatched, mismatched, or failing a tag constraint; renders literally.
    Invalid,
    /// The tag is registered but excluded by the allowed-name set.
    NotAllowed,
    /// No behavior is registered under the tag's name.
    NoImplementation,
}

/// One entry of the token queue.
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub status: TokenStatus,
    /// Exact source text of the token, delimiters included for tags.
    /// Synthesized auto-close tokens carry a reconstructed span.
    pub span: Cow<'a, str>,
    /// Bare tag display name, close marker stripped. Empty for content.
    pub name: Cow<'a, str>,
    /// Text after the first `=` in the bracket body, if any.
    pub argument: Option<Cow<'a, str>>,
    /// Index of the confirmed partner token; symmetric across a valid pair.
    pub matched: Option<usize>,
}

impl<'a> Token<'a> {
    fn content(span: &'a str) -> Self {
        Token {
            kind: TokenKind::Content,
            status: TokenStatus::Valid,
            span: Cow::Borrowed(span),
            name: Cow::Borrowed(""),
            argument: None,
            matched: None,
        }
    }

    pub fn is_content(&self) -> bool {
        self.kind == TokenKind::Content
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.kind == TokenKind::TagOpen && self.name == name
    }

    pub fn is_close(&self, name: &str) -> bool {
        self.kind == TokenKind::TagClose && self.name == name
    }
}

/// A raw span produced by the delimited tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawSpan<'a> {
    /// Literal text, emitted verbatim-modulo-escaping.
    Text(&'a str),
    /// A bracket span: the full source slice and the body between the
    /// delimiters.
    Tag { span: &'a str, body: &'a str },
}

/// Splits `input` into alternating literal and bracket spans.
///
/// Both delimiters may be multi-character. A start delimiter with no end
/// delimiter after it ends the scan with the remainder as literal text, and
/// an empty bracket body is literal text rather than a tag.
pub(crate) fn split_delimited<'a>(input: &'a str, start: &str, end: &str) -> Vec<RawSpan<'a>> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let Some(open_rel) = input[pos..].find(start) else {
            spans.push(RawSpan::Text(&input[pos..]));
            break;
        };
        let open_at = pos + open_rel;
        let body_at = open_at + start.len();

        let Some(close_rel) = input[body_at..].find(end) else {
            // Unmatched start delimiter: everything left is literal.
            spans.push(RawSpan::Text(&input[pos..]));
            break;
        };
        let close_at = body_at + close_rel;

        if open_at > pos {
            spans.push(RawSpan::Text(&input[pos..open_at]));
        }

        let body = &input[body_at..close_at];
        let span = &input[open_at..close_at + end.len()];
        if body.is_empty() {
            spans.push(RawSpan::Text(span));
        } else {
            spans.push(RawSpan::Tag { span, body });
        }

        pos = close_at + end.len();
    }

    spans
}

/// Classifier inputs that stay fixed across one call.
pub(crate) struct ClassifyContext<'e> {
    pub registry: &'e TagRegistry,
    pub allowed: Option<&'e HashSet<String>>,
    pub start: &'e str,
    pub end: &'e str,
}

impl<'e> ClassifyContext<'e> {
    fn is_allowed(&self, name: &str) -> bool {
        self.allowed.map_or(true, |set| set.contains(name))
    }

    fn status_of(&self, name: &str) -> TokenStatus {
        if !self.registry.contains(name) {
            TokenStatus::NoImplementation
        } else if !self.is_allowed(name) {
            TokenStatus::NotAllowed
        } else {
            TokenStatus::Undetermined
        }
    }
}

/// Turns raw spans into the token queue, inserting auto-close tokens.
pub(crate) fn classify<'a>(spans: Vec<RawSpan<'a>>, ctx: &ClassifyContext<'_>) -> Vec<Token<'a>> {
    let mut tokens = Vec::with_capacity(spans.len());
    // Names of currently open resolvable tags, innermost last. Call-scoped;
    // only consulted for auto-close insertion.
    let mut open_names: Vec<String> = Vec::new();

    for span in spans {
        let (span, body) = match span {
            RawSpan::Text(text) => {
                tokens.push(Token::content(text));
                continue;
            }
            RawSpan::Tag { span, body } => (span, body),
        };

        let (mut name, argument) = match body.split_once('=') {
            Some((name, argument)) => (name, Some(argument)),
            None => (body, None),
        };
        let closing = name.starts_with('/');
        if closing {
            name = &name["/".len()..];
        }

        let status = ctx.status_of(name);

        // Auto-close: a resolvable tag may demand that a still-open tag of a
        // designated name be closed before this token takes effect.
        if status == TokenStatus::Undetermined {
            if let Some(tag) = ctx.registry.get(name) {
                let target = if closing {
                    tag.auto_close_on_close()
                } else {
                    tag.auto_close_on_open()
                };
                if let Some(target) = target {
                    if let Some(at) = open_names.iter().rposition(|n| n == target) {
                        let target = open_names.remove(at);
                        tokens.push(Token {
                            kind: TokenKind::TagClose,
                            status: TokenStatus::Undetermined,
                            span: Cow::Owned(format!("{}/{}{}", ctx.start, target, ctx.end)),
                            name: Cow::Owned(target),
                            argument: None,
                            matched: None,
                        });
                    }
                }
            }
        }

        tokens.push(Token {
            kind: if closing {
                TokenKind::TagClose
            } else {
                TokenKind::TagOpen
            },
            status,
            span: Cow::Borrowed(span),
            name: Cow::Borrowed(name),
            argument: argument.map(Cow::Borrowed),
            matched: None,
        });

        if status == TokenStatus::Undetermined {
            if closing {
                if let Some(at) = open_names.iter().rposition(|n| n == name) {
                    open_names.remove(at);
                }
            } else {
                open_names.push(name.to_owned());
            }
        }
    }

    tokens
}

/// Index of the nearest valid open tag enclosing position `at`: it must open
/// before `at` and its matched close must lie beyond `at`.
pub(crate) fn enclosing_valid_open(tokens: &[Token<'_>], at: usize) -> Option<usize> {
    tokens[..at].iter().enumerate().rev().find_map(|(i, tk)| {
        let encloses = tk.kind == TokenKind::TagOpen
            && tk.status == TokenStatus::Valid
            && tk.matched.map_or(false, |m| m > at);
        encloses.then_some(i)
    })
}
