/// Value coercions.
///
/// Implements the reduction of values to their GCD type and the conversions
/// to integers, floats, strings and booleans used throughout evaluation.
/// Also provides element access for strings and arrays.
pub mod coerce;

/// Loose and strict equality and numeric ordering.
///
/// # Responsibilities
/// - Numeric comparison of anything that reduces to a number.
/// - Coercing equality (`==`) across integers, floats and strings.
/// - Tag-exact equality (`===`).
pub mod compare;

/// The `Value` type and its constructors.
pub mod core;
