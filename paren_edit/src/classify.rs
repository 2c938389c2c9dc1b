//! Form classification
//!
//! Decides which structural action applies at the cursor. The order is
//! fixed: the position-exact conditional probe wins over arity wrapping,
//! and the bare-word wrap is the universal fallback, so classification
//! never fails.

use arity_registry::{ArityResolver, MinArity};
use sexp_scan::{EditBuffer, Scanner, Span};

use crate::config::EditConfig;

/// Structural action selected for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Collapse the conditional form opening at `form_start` to its true
    /// branch
    UnwrapConditional { form_start: usize },
    /// Wrap `atom` and absorb `min_args` following sibling expressions
    WrapWithArity { atom: Span, min_args: MinArity },
    /// Wrap the bare word (or the empty point) at the cursor
    WrapBareWord,
}

/// Select the action for the cursor position `pos`
pub fn classify<R: ArityResolver>(
    scanner: &Scanner,
    buffer: &EditBuffer,
    resolver: &R,
    config: &EditConfig,
    pos: usize,
) -> EditAction {
    if conditional_opens_at(scanner, buffer, &config.conditional_marker, pos) {
        return EditAction::UnwrapConditional { form_start: pos };
    }

    if !scanner.is_inside_string(buffer, pos) {
        if let Some(atom) = scanner.atom_bounds_at(buffer, pos) {
            if let Some(min_args) = resolver.resolve(&buffer.slice(atom)) {
                return EditAction::WrapWithArity { atom, min_args };
            }
        }
    }

    EditAction::WrapBareWord
}

/// True when `pos` sits on the opening delimiter of a conditional form:
/// the marker atom starts immediately inside and is followed by whitespace
fn conditional_opens_at(scanner: &Scanner, buffer: &EditBuffer, marker: &str, pos: usize) -> bool {
    let inside = match scanner.descend_into(buffer, pos) {
        Ok(inside) => inside,
        Err(_) => return false,
    };
    let atom = match scanner.atom_bounds_at(buffer, inside) {
        Some(span) if span.start == inside => span,
        _ => return false,
    };
    if buffer.slice(atom) != marker {
        return false;
    }
    buffer.char_at(atom.end).map_or(false, |c| c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arity_registry::ArityRegistry;

    fn setup() -> (Scanner, ArityRegistry, EditConfig) {
        let mut registry = ArityRegistry::new();
        registry.register("concat", MinArity(2));
        registry.register("lambda", MinArity(2));
        (Scanner::new(), registry, EditConfig::default())
    }

    #[test]
    fn test_conditional_wins_at_open_delimiter() {
        let (scanner, registry, config) = setup();
        let buffer = EditBuffer::from_string("(if x a b)");
        assert_eq!(
            classify(&scanner, &buffer, &registry, &config, 0),
            EditAction::UnwrapConditional { form_start: 0 }
        );
    }

    #[test]
    fn test_open_delimiter_without_marker_is_bare_word() {
        let (scanner, registry, config) = setup();
        let buffer = EditBuffer::from_string("(iffy x)");
        assert_eq!(
            classify(&scanner, &buffer, &registry, &config, 0),
            EditAction::WrapBareWord
        );
    }

    #[test]
    fn test_marker_requires_whitespace_after() {
        let (scanner, registry, config) = setup();
        let buffer = EditBuffer::from_string("(if)");
        assert_eq!(
            classify(&scanner, &buffer, &registry, &config, 0),
            EditAction::WrapBareWord
        );
    }

    #[test]
    fn test_marker_must_open_immediately() {
        let (scanner, registry, config) = setup();
        let buffer = EditBuffer::from_string("( if x a)");
        assert_eq!(
            classify(&scanner, &buffer, &registry, &config, 0),
            EditAction::WrapBareWord
        );
    }

    #[test]
    fn test_resolvable_atom_selects_arity_wrap() {
        let (scanner, registry, config) = setup();
        let buffer = EditBuffer::from_string("concat a b");
        assert_eq!(
            classify(&scanner, &buffer, &registry, &config, 3),
            EditAction::WrapWithArity {
                atom: Span::new(0, 6),
                min_args: MinArity(2)
            }
        );
    }

    #[test]
    fn test_unresolvable_atom_falls_back() {
        let (scanner, registry, config) = setup();
        let buffer = EditBuffer::from_string("mystery a b");
        assert_eq!(
            classify(&scanner, &buffer, &registry, &config, 3),
            EditAction::WrapBareWord
        );
    }

    #[test]
    fn test_excluded_name_falls_back() {
        let (scanner, registry, config) = setup();
        // lambda is registered but excluded by default
        let buffer = EditBuffer::from_string("lambda (x) x");
        assert_eq!(
            classify(&scanner, &buffer, &registry, &config, 3),
            EditAction::WrapBareWord
        );
    }

    #[test]
    fn test_inside_string_never_arity_wraps() {
        let (scanner, registry, config) = setup();
        let buffer = EditBuffer::from_string("\"concat a b\"");
        assert_eq!(
            classify(&scanner, &buffer, &registry, &config, 4),
            EditAction::WrapBareWord
        );
    }

    #[test]
    fn test_custom_marker() {
        let (scanner, registry, _) = setup();
        let config = EditConfig {
            conditional_marker: "when".to_string(),
        };
        let buffer = EditBuffer::from_string("(when x a)");
        assert_eq!(
            classify(&scanner, &buffer, &registry, &config, 0),
            EditAction::UnwrapConditional { form_start: 0 }
        );
        let buffer = EditBuffer::from_string("(if x a b)");
        assert_eq!(
            classify(&scanner, &buffer, &registry, &config, 0),
            EditAction::WrapBareWord
        );
    }
}
