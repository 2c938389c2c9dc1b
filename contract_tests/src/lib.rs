//! # Contract Tests
//!
//! This crate provides "golden" tests for the public contracts of the
//! structural editing crates to ensure they don't drift accidentally over
//! time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: The guaranteed behaviors are written as
//!   code against the public API only
//! - **Testability first**: Contract tests fail when interfaces or
//!   guaranteed semantics change
//! - **Mechanism not policy**: Define what must be stable, not how to use
//!   it
//!
//! ## Structure
//!
//! Each crate has a module with contract tests that verify:
//! - Outcome and error variants
//! - Config serialization shape
//! - The guaranteed editing properties (toggle idempotence, balance,
//!   arity satisfaction and shortfall, conditional unwrap, exclusion
//!   bypass, string safety, scanner round-trip)

pub mod scanner;
pub mod wrap_command;

/// Common test helpers for contract validation
pub mod test_helpers {
    use arity_registry::{ArityRegistry, MinArity};
    use paren_edit::{EditResult, ParenEditor};
    use sexp_scan::EditBuffer;

    /// Creates an editor whose registry holds the given arities
    pub fn editor_with(entries: &[(&str, usize)]) -> ParenEditor<ArityRegistry> {
        let mut registry = ArityRegistry::new();
        for (name, arity) in entries {
            registry.register(*name, MinArity(*arity));
        }
        ParenEditor::new(registry)
    }

    /// Runs a single non-repeated invocation and returns the final text
    pub fn invoke_once(
        text: &str,
        cursor: usize,
        entries: &[(&str, usize)],
    ) -> (String, EditResult) {
        let mut editor = editor_with(entries);
        let mut buffer = EditBuffer::from_string(text);
        let result = editor.invoke(&mut buffer, cursor, false);
        (buffer.as_string(), result)
    }

    /// Verifies delimiter balance outside string literals
    pub fn assert_balanced(text: &str) {
        let mut depth = 0i64;
        let mut in_string = false;
        for ch in text.chars() {
            match ch {
                '"' => in_string = !in_string,
                '(' | '[' if !in_string => depth += 1,
                ')' | ']' if !in_string => depth -= 1,
                _ => {}
            }
            assert!(depth >= 0, "close before open in {:?}", text);
        }
        assert_eq!(depth, 0, "unbalanced delimiters in {:?}", text);
        assert!(!in_string, "unterminated string in {:?}", text);
    }
}
