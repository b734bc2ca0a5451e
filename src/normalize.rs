/// Default comment marker: everything from it to end of line is dropped.
pub const COMMENT: char = ';';

/// Strips the comment tail starting at the first `marker`, then removes
/// every literal space. Tabs and other whitespace are left in place.
pub fn normalize(line: &str, marker: char) -> String {
    let code = match line.find(marker) {
        Some(p) => &line[..p],
        None => line,
    };
    code.chars().filter(|&c| c != ' ').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comment_and_spaces() {
        assert_eq!(normalize("  ADD ; add two words", COMMENT), "ADD");
        assert_eq!(normalize("1 0 1", COMMENT), "101");
        assert_eq!(normalize("; only a comment", COMMENT), "");
        assert_eq!(normalize("", COMMENT), "");
        assert_eq!(normalize("NOT;;;", COMMENT), "NOT");
    }

    #[test]
    fn tabs_survive() {
        assert_eq!(normalize("\tINC ", COMMENT), "\tINC");
    }

    #[test]
    fn custom_marker() {
        assert_eq!(normalize("SUB # x ; y", '#'), "SUB");
    }

    #[test]
    fn idempotent() {
        for line in ["ADD ; c", "  1 1 ", "\t;", "X;Y;Z", ""] {
            let once = normalize(line, COMMENT);
            assert_eq!(normalize(&once, COMMENT), once);
        }
    }
}
