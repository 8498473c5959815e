//! Branch-point counting over raw source text.
//!
//! This is the only place complexity is counted. Components, files and
//! scoring analyzers all call [`count_branch_points`], so the same text
//! always yields the same number.

use once_cell::sync::Lazy;
use regex::Regex;

/// Python's `elif`, `except`, `and` and `or` are its spellings of `else if`,
/// `catch`, `&&` and `||`
static BRANCH_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:if|elif|else|while|for|switch|case|catch|except|and|or)\b").unwrap()
});

/// `1 + Σ {if, else, while, for, switch, case, catch, ternary ?, &&, ||}`
///
/// Keywords are matched on word boundaries. A `?` counts as a ternary unless
/// it belongs to `?.`, `??` or an optional `?:` annotation.
pub fn count_branch_points(text: &str) -> u32 {
    let keywords = BRANCH_KEYWORD.find_iter(text).count();
    let logical = text.matches("&&").count() + text.matches("||").count();
    1 + (keywords + logical + count_ternaries(text)) as u32
}

fn count_ternaries(text: &str) -> usize {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|(i, b)| {
            if **b != b'?' {
                return false;
            }
            let prev = i.checked_sub(1).map(|p| bytes[p]);
            let next = bytes.get(i + 1).copied();
            prev != Some(b'?') && !matches!(next, Some(b'.') | Some(b'?') | Some(b':'))
        })
        .count()
}

/// Deepest brace nesting seen in `text`
pub fn max_brace_depth(text: &str) -> u32 {
    let mut depth: i64 = 0;
    let mut max = 0;
    for c in text.chars() {
        match c {
            '{' => {
                depth += 1;
                max = max.max(depth);
            }
            '}' => depth = (depth - 1).max(0),
            _ => {}
        }
    }
    max as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line_code_is_one() {
        assert_eq!(count_branch_points("const x = 1;"), 1);
        assert_eq!(count_branch_points(""), 1);
    }

    #[test]
    fn test_single_if() {
        let src = "export function Button(props){ if (props.disabled) return null; return <button/> }";
        assert_eq!(count_branch_points(src), 2);
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        assert_eq!(count_branch_points("const format = elsewhere + iffy;"), 1);
        assert_eq!(count_branch_points("for (;;) {} while (x) {}"), 3);
    }

    #[test]
    fn test_logical_operators_and_ternary() {
        assert_eq!(count_branch_points("a && b || c"), 3);
        assert_eq!(count_branch_points("x ? y : z"), 2);
    }

    #[test]
    fn test_optional_chaining_and_nullish_are_not_ternaries() {
        assert_eq!(count_branch_points("a?.b ?? c"), 1);
        assert_eq!(count_branch_points("function f(x?: string) {}"), 1);
    }

    #[test]
    fn test_switch_counts_each_case() {
        let src = "switch (k) { case 1: break; case 2: break; default: break; }";
        assert_eq!(count_branch_points(src), 4);
    }

    #[test]
    fn test_try_catch() {
        assert_eq!(count_branch_points("try { f() } catch (e) {}"), 2);
    }

    #[test]
    fn test_python_branch_keywords() {
        let src = "if a and b:\n    x()\nelif c or d:\n    y()\nelse:\n    z()\n";
        assert_eq!(count_branch_points(src), 6);
        assert_eq!(
            count_branch_points("try:\n    f()\nexcept ValueError:\n    pass\n"),
            2
        );
    }

    #[test]
    fn test_python_keywords_need_word_boundaries() {
        assert_eq!(count_branch_points("order = band + orbit + exception"), 1);
    }

    #[test]
    fn test_max_brace_depth() {
        assert_eq!(max_brace_depth("a"), 0);
        assert_eq!(max_brace_depth("{ { } { { } } }"), 3);
        assert_eq!(max_brace_depth("} } {"), 1);
    }
}
