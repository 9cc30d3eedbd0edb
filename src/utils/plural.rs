//! Pluralization for log messages.

/// Return "s" suffix for plural counts
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// `plural_count(1, "lab")` -> `"1 lab"`, `plural_count(3, "lab")` -> `"3 labs"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "lab"), "0 labs");
        assert_eq!(plural_count(1, "lab"), "1 lab");
        assert_eq!(plural_count(12, "file"), "12 files");
    }
}
