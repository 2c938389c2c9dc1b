//! Wrap/unwrap command contract tests
//!
//! These tests define the stable contract for the exposed `invoke`
//! operation: the guaranteed editing properties and the serialized shape
//! of the configuration types.
