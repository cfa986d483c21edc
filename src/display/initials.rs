//! Avatar initials

/// Placeholder shown when a reviewer has no usable name
pub const UNKNOWN_INITIALS: &str = "??";

/// Short avatar code for a reviewer name
///
/// - no words: `??`
/// - one word: its first two characters
/// - two or more words: first character of each of the first two words
///
/// The result is upper-cased. Works on characters, not bytes.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();

    let Some(first) = words.next() else {
        return UNKNOWN_INITIALS.to_string();
    };

    let code: String = match words.next() {
        Some(second) => first.chars().take(1).chain(second.chars().take(1)).collect(),
        None => first.chars().take(2).collect(),
    };

    code.to_uppercase()
}
