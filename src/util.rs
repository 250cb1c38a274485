/// Numeric conversion helpers.
///
/// The language computes all arithmetic in `f64` and converts back to `i64`
/// when both operands were integers. These helpers keep those conversions in
/// one place so that truncation and range checks behave the same everywhere.
pub mod num;
