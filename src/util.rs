/// Numeric conversion helpers.
///
/// This module provides the small float-to-integer routines the evaluator
/// needs for array indexing, the `%` operator, and collection lengths, with
/// the truncation and non-finite edge cases handled in one place.
pub mod num;
