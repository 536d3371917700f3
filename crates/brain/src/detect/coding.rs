use super::contains_any;

const CODING: &[&str] = &[
    "code",
    "coding",
    "program",
    "programming",
    "python",
    "rust",
    "javascript",
    "typescript",
    "java",
    "golang",
    "c++",
    "function",
    "compile",
    "compiler",
    "bug",
    "debug",
    "stack trace",
    "traceback",
    "exception",
    "segfault",
    "regex",
    "sql",
    "api",
    "script",
    "git",
    "docker",
    "refactor",
    "unit test",
    "syntax",
    "json",
    "bash",
];

/// Coding-domain signal. A router hint may only switch a turn to the coding
/// expert when this fires on the utterance.
pub fn is_coding_query(lower: &str) -> bool {
    contains_any(lower, CODING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technical_phrasing_fires() {
        assert!(is_coding_query("why does my python script crash"));
        assert!(is_coding_query("write a sql query for last week's orders"));
        assert!(is_coding_query("my c++ build fails"));
    }

    #[test]
    fn everyday_phrasing_does_not_fire() {
        assert!(!is_coding_query("what should i cook for dinner"));
        assert!(!is_coding_query("the rusty gate squeaks"));
    }
}
