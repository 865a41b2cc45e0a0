/*
 * Responsibility
 * - SQLx access per table (users / profiles / recipes / comments)
 * - Handlers never build SQL themselves
 */
pub mod comment_repo;
pub mod error;
pub mod profile_repo;
pub mod recipe_repo;
pub mod user_repo;

/// Build a case-insensitive substring pattern for `ILIKE`.
///
/// `%`, `_` and `\` in user input match literally.
pub fn contains_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn wraps_plain_text() {
        assert_eq!(contains_pattern("pasta"), "%pasta%");
    }

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(contains_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
