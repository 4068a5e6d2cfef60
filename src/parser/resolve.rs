//! Resolution pass: pairs open/close tokens and validates per-tag
//! constraints.
//!
//! Two forward sweeps. The matching sweep pairs closing tags with opening
//! tags and is where the strict-nesting / overlapping-range policies differ.
//! The constraint sweep runs once every pair is linked, so parent lookups see
//! the final matching; it applies argument cardinality, argument validity,
//! nested-content, and parent-acceptance rules. Under the all-or-nothing
//! policy either sweep aborts on the first token that turns invalid.

use crate::config::{FormatFlags, Settings};
use crate::parser::{enclosing_valid_open, Token, TokenKind, TokenStatus};
use crate::tag::{TagRegistry, GLOBAL_NAME};

/// Outcome of the resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Every token carries a final status; rendering may proceed.
    Completed,
    /// All-or-nothing tripped; the caller returns the input untouched.
    Aborted,
}

pub(crate) struct ResolveContext<'e> {
    pub registry: &'e TagRegistry,
    pub settings: &'e Settings,
    pub flags: FormatFlags,
}

pub(crate) fn resolve(tokens: &mut Vec<Token<'_>>, ctx: &ResolveContext<'_>) -> Resolution {
    if match_pairs(tokens, ctx) == Resolution::Aborted {
        return Resolution::Aborted;
    }
    check_constraints(tokens, ctx)
}

/// Nearest preceding undetermined open tag, optionally restricted to `name`.
fn find_open_candidate(tokens: &[Token<'_>], before: usize, name: Option<&str>) -> Option<usize> {
    tokens[..before].iter().enumerate().rev().find_map(|(i, tk)| {
        let hit = tk.kind == TokenKind::TagOpen
            && tk.status == TokenStatus::Undetermined
            && name.map_or(true, |n| tk.name == n);
        hit.then_some(i)
    })
}

fn match_pairs(tokens: &mut Vec<Token<'_>>, ctx: &ResolveContext<'_>) -> Resolution {
    let all_or_nothing = ctx.flags.contains(FormatFlags::ALL_OR_NOTHING);
    let overlapping = ctx.flags.contains(FormatFlags::HANDLE_OVERLAPPING);

    for i in 0..tokens.len() {
        match (tokens[i].kind, tokens[i].status) {
            (TokenKind::TagOpen | TokenKind::TagClose, TokenStatus::Undetermined) => {}
            _ => continue,
        }

        let Some(tag) = ctx.registry.get(&tokens[i].name) else {
            // Undetermined implies registered; treat a miss as unresolvable.
            tokens[i].status = TokenStatus::NoImplementation;
            continue;
        };

        if tokens[i].kind == TokenKind::TagOpen {
            // Self-contained opens are valid on sight. Everything else waits
            // for its closing tag.
            if !tag.needs_closing_tag() {
                tokens[i].status = TokenStatus::Valid;
            }
            continue;
        }

        if !tag.needs_closing_tag() {
            // A stray close for a self-contained tag is tolerated as literal
            // content rather than rejected.
            tokens[i].kind = TokenKind::Content;
            tokens[i].status = TokenStatus::Valid;
            continue;
        }

        // Strict mode targets the innermost unmatched open regardless of
        // name; a name mismatch is invalid, never silently repaired.
        // Overlapping mode skips differently-named opens instead.
        let candidate = if overlapping {
            find_open_candidate(tokens, i, Some(&tokens[i].name))
        } else {
            find_open_candidate(tokens, i, None)
        };

        match candidate {
            Some(at) if tokens[at].name == tokens[i].name => {
                tokens[at].status = TokenStatus::Valid;
                tokens[at].matched = Some(i);
                tokens[i].status = TokenStatus::Valid;
                tokens[i].matched = Some(at);
            }
            _ => tokens[i].status = TokenStatus::Invalid,
        }

        if all_or_nothing && tokens[i].status == TokenStatus::Invalid {
            return Resolution::Aborted;
        }
    }

    Resolution::Completed
}

fn check_constraints(tokens: &mut Vec<Token<'_>>, ctx: &ResolveContext<'_>) -> Resolution {
    let all_or_nothing = ctx.flags.contains(FormatFlags::ALL_OR_NOTHING);

    for i in 0..tokens.len() {
        if tokens[i].kind != TokenKind::TagOpen {
            continue;
        }
        match tokens[i].status {
            TokenStatus::Undetermined | TokenStatus::Valid => {}
            _ => continue,
        }
        let Some(tag) = ctx.registry.get(&tokens[i].name) else {
            continue;
        };

        let parent = enclosing_valid_open(tokens, i);
        let argument = tokens[i].argument.as_deref();

        // Argument checks run before parent checks.
        let mut invalid = (tokens[i].status == TokenStatus::Undetermined
            && tag.needs_closing_tag())
            || (tag.accepts_argument() && !tag.argument_is_valid(ctx.settings, argument))
            || (!tag.accepts_argument() && argument.is_some())
            || (tag.requires_argument() && argument.is_none());

        if !invalid {
            if let Some(p) = parent {
                let nested_ok = ctx
                    .registry
                    .get(&tokens[p].name)
                    .map_or(true, |pt| pt.allows_nested_content());
                invalid = !nested_ok;
            }
        }

        if !invalid && tokens[i].status == TokenStatus::Valid {
            let parent_name = match parent {
                Some(p) => tokens[p].name.clone().into_owned(),
                None => GLOBAL_NAME.to_owned(),
            };
            invalid = !tag.accepts_parent(ctx.settings, &parent_name);
        }

        if invalid {
            tokens[i].status = TokenStatus::Invalid;
            if let Some(m) = tokens[i].matched {
                tokens[m].status = TokenStatus::Invalid;
            }
            if all_or_nothing {
                return Resolution::Aborted;
            }
        }
    }

    Resolution::Completed
}
