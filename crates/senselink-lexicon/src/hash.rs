//! Content-hash id scheme for lexical entries.

/// Derives the stable content-hash id the core uses to key lexical lookups.
///
/// Not cryptographic: the reference engine uses MD5 over the case-folded
/// symbol purely for a short, stable, collision-resistant-enough key, and
/// this crate follows it directly rather than introducing a stronger (and
/// slower) hash the spec does not ask for.
///
/// Callers are expected to pass an already-lowercased symbol; `hash_id`
/// itself does not fold case so that store implementations can key on
/// exactly what they were given (tests rely on this when exercising
/// case-sensitive locales).
pub fn hash_id(symbol: &str) -> String {
    format!("{:x}", md5::compute(symbol.as_bytes()))
}
