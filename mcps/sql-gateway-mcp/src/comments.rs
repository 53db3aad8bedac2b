//! SQL comment stripping
//!
//! Comments are removed before classification so that tokens hidden inside
//! them can't influence the verdict. The stripped text is never executed.

use std::sync::LazyLock;

use regex::Regex;

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("Invalid regex"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)--.*$").expect("Invalid regex"));

/// Remove `/* ... */` spans and `-- ...` line suffixes from raw SQL
///
/// Block comments go first so a `--` inside a block comment doesn't eat the
/// rest of the line after it. Comment openers inside string literals are
/// stripped too; there is no SQL lexer here.
pub fn strip_comments(sql: &str) -> String {
    let without_blocks = BLOCK_COMMENT.replace_all(sql, "");
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_block_comment() {
        assert_eq!(strip_comments("SELECT 1 /* DROP TABLE x */"), "SELECT 1 ");
    }

    #[test]
    fn test_strips_multiline_block_comment() {
        let sql = "SELECT a,\n/* first line\n   second line */ b FROM t";
        assert_eq!(strip_comments(sql), "SELECT a,\n b FROM t");
    }

    #[test]
    fn test_strips_line_comments_per_line() {
        let sql = "SELECT a -- pick a\nFROM t -- from t\nWHERE a > 1";
        assert_eq!(strip_comments(sql), "SELECT a \nFROM t \nWHERE a > 1");
    }

    #[test]
    fn test_non_greedy_block_removal() {
        let sql = "SELECT /* a */ x /* b */ FROM t";
        assert_eq!(strip_comments(sql), "SELECT  x  FROM t");
    }

    #[test]
    fn test_unterminated_block_comment_is_kept() {
        let sql = "SELECT 1 /* drop";
        assert_eq!(strip_comments(sql), sql);
    }

    #[test]
    fn test_line_comment_inside_block_comment() {
        assert_eq!(strip_comments("SELECT /* -- */ 1"), "SELECT  1");
    }

    #[test]
    fn test_plain_query_untouched() {
        let sql = "SELECT name, credits FROM students WHERE gpa > 3.5";
        assert_eq!(strip_comments(sql), sql);
    }
}
