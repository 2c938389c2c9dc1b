//! Scanner contract tests
//!
//! These tests define the stable contract for the lexical scanner: what
//! counts as one sub-expression, the round-trip property, and the string
//! safety query.

#[cfg(test)]
mod tests {
    use sexp_scan::{Direction, EditBuffer, ScanError, Scanner, Span};

    const ROUND_TRIP_SAMPLES: &[&str] = &[
        "foo bar baz",
        "(a (b c) d) e",
        "'(quoted list) atom",
        r#""a string" after"#,
        "[vec 1 2] tail",
        "#'function-ref x",
    ];

    #[test]
    fn test_one_unit_per_form_kind() {
        let scanner = Scanner::new();

        // Atom, string, list and prefixed form each cross as one unit
        let cases: &[(&str, usize)] = &[
            ("atom rest", 4),
            (r#""str" rest"#, 5),
            ("(a b) rest", 5),
            ("'(a b) rest", 6),
        ];
        for (text, expected_end) in cases {
            let buffer = EditBuffer::from_string(text);
            assert_eq!(
                scanner.skip_expressions(&buffer, 0, 1, Direction::Forward),
                Ok(*expected_end),
                "text {:?}",
                text
            );
        }
    }

    #[test]
    fn test_round_trip_contract() {
        let scanner = Scanner::new();
        for text in ROUND_TRIP_SAMPLES {
            let buffer = EditBuffer::from_string(text);
            for n in 1..=2 {
                let end = scanner
                    .skip_expressions(&buffer, 0, n, Direction::Forward)
                    .expect("forward");
                let back = scanner
                    .skip_expressions(&buffer, end, n, Direction::Backward)
                    .expect("backward");
                assert_eq!(back, 0, "round trip n={} over {:?}", n, text);
            }
        }
    }

    #[test]
    fn test_boundary_failures_are_reported() {
        let scanner = Scanner::new();
        let buffer = EditBuffer::from_string("(only)");
        // Forward out of the enclosing form
        assert_eq!(
            scanner.skip_expressions(&buffer, 5, 1, Direction::Forward),
            Err(ScanError::IncompleteExpression)
        );
        // Backward out of the enclosing form
        assert_eq!(
            scanner.skip_expressions(&buffer, 1, 1, Direction::Backward),
            Err(ScanError::IncompleteExpression)
        );
    }

    #[test]
    fn test_atom_bounds_contract() {
        let scanner = Scanner::new();
        let buffer = EditBuffer::from_string("one two");

        // Inside, at start, and just after a run all report the run
        assert_eq!(scanner.atom_bounds_at(&buffer, 0), Some(Span::new(0, 3)));
        assert_eq!(scanner.atom_bounds_at(&buffer, 1), Some(Span::new(0, 3)));
        assert_eq!(scanner.atom_bounds_at(&buffer, 3), Some(Span::new(0, 3)));
        assert_eq!(scanner.atom_bounds_at(&buffer, 4), Some(Span::new(4, 7)));
    }

    #[test]
    fn test_string_state_contract() {
        let scanner = Scanner::new();
        let buffer = EditBuffer::from_string(r#"(f "a b") g"#);
        assert!(scanner.is_inside_string(&buffer, 5));
        assert!(!scanner.is_inside_string(&buffer, 10));
    }

    #[test]
    fn test_descend_contract() {
        let scanner = Scanner::new();
        let buffer = EditBuffer::from_string("(x)");
        assert_eq!(scanner.descend_into(&buffer, 0), Ok(1));
        assert_eq!(
            scanner.descend_into(&buffer, 1),
            Err(ScanError::NotAList)
        );
    }
}
