//! Property-based tests for form state invariants

mod form_invariants;
