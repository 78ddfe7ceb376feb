//! Line classification for C source splitting.
//!
//! Each line is looked at in isolation and tagged with a [`Category`].
//! No tokenization happens here: function and struct starts are recognized
//! only by what the first column of the line looks like.

use regex::Regex;
use std::sync::LazyLock;

/// `name(` or `name,(` at column 0.
static RE_FUNCTION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9][a-zA-Z0-9_]*),?\(").unwrap());

/// `struct name {` or `typedef struct name {` at column 0.
static RE_STRUCT_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:typedef )?struct ([a-zA-Z0-9][a-zA-Z0-9_]*) \{").unwrap()
});

/// Macros that look like function definitions at column 0 but are not.
pub const MACRO_DENYLIST: &[&str] = &[
    "MOCK_IMPL",
    "MOCK_DECL",
    "HT_GENERATE",
    "HT_GENERATE2",
    "HT_PROTOTYPE",
    "DISABLE_GCC_WARNING",
    "ENABLE_GCC_WARNING",
    "DECLARE_CTYPE_FN",
];

/// What a single source line means to the chunker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category<'a> {
    /// Line opens a `/**` documentation comment.
    DocComment,
    /// Line starts a function definition with the given name.
    FunctionStart(&'a str),
    /// Line starts a (possibly typedef'd) struct with the given name.
    StructStart(&'a str),
    /// Closing brace at column 0.
    BlockEnd,
    /// Anything else, blank lines included.
    Plain,
}

impl Category<'_> {
    /// True if `line` (classified as `self`) is a place where loose text
    /// in front of the next definition may be peeled off.
    pub fn is_break(&self, line: &str) -> bool {
        match self {
            Category::DocComment => true,
            Category::Plain => line.trim().is_empty(),
            _ => false,
        }
    }
}

/// Classify one line. Rules are tried in priority order; the first match wins.
pub fn classify(line: &str) -> Category<'_> {
    if line.starts_with("/**") {
        return Category::DocComment;
    }

    if let Some(caps) = RE_FUNCTION_START.captures(line) {
        let name = caps.get(1).map_or("", |m| m.as_str());
        // Prototypes and declarations end in `;` on the same line
        if !MACRO_DENYLIST.contains(&name) && !line.contains(';') {
            return Category::FunctionStart(name);
        }
    }

    if let Some(name) = RE_STRUCT_START.captures(line).and_then(|caps| caps.get(1)) {
        return Category::StructStart(name.as_str());
    }

    if line.starts_with('}') {
        Category::BlockEnd
    } else {
        Category::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_comment() {
        assert_eq!(classify("/** Computes bar. */\n"), Category::DocComment);
        assert_eq!(classify("/**\n"), Category::DocComment);
    }

    #[test]
    fn doc_comment_wins_over_everything() {
        assert_eq!(classify("/**foo(x) {\n"), Category::DocComment);
    }

    #[test]
    fn plain_comments_are_plain() {
        assert_eq!(classify("/* not doxygen */\n"), Category::Plain);
        assert_eq!(classify(" /** indented */\n"), Category::Plain);
    }

    #[test]
    fn function_start() {
        assert_eq!(classify("bar(int x)\n"), Category::FunctionStart("bar"));
        assert_eq!(
            classify("connection_free_all(void)\n"),
            Category::FunctionStart("connection_free_all")
        );
    }

    #[test]
    fn function_start_with_comma() {
        assert_eq!(classify("foo,(a, b)\n"), Category::FunctionStart("foo"));
    }

    #[test]
    fn function_start_needs_column_zero() {
        assert_eq!(classify("  bar(int x)\n"), Category::Plain);
        assert_eq!(classify("_private(void)\n"), Category::Plain);
    }

    #[test]
    fn return_type_on_same_line_is_not_a_start() {
        // The project style puts the return type on its own line
        assert_eq!(classify("int bar(int x) {\n"), Category::Plain);
    }

    #[test]
    fn denylisted_macro_is_not_a_function() {
        assert_eq!(classify("MOCK_IMPL(Foo) {\n"), Category::Plain);
        assert_eq!(classify("HT_GENERATE2(map, ent)\n"), Category::Plain);
        assert_eq!(classify("DISABLE_GCC_WARNING(\"-Wfoo\")\n"), Category::Plain);
    }

    #[test]
    fn declaration_is_not_a_function() {
        assert_eq!(classify("foo(int x);\n"), Category::Plain);
        assert_eq!(classify("int foo(int x);\n"), Category::Plain);
    }

    #[test]
    fn struct_start() {
        assert_eq!(classify("struct point_t {\n"), Category::StructStart("point_t"));
        assert_eq!(
            classify("typedef struct Point {\n"),
            Category::StructStart("Point")
        );
    }

    #[test]
    fn struct_without_brace_is_plain() {
        assert_eq!(classify("struct point_t;\n"), Category::Plain);
        assert_eq!(classify("struct point_t\n"), Category::Plain);
        assert_eq!(classify("static struct point_t {\n"), Category::Plain);
    }

    #[test]
    fn block_end() {
        assert_eq!(classify("}\n"), Category::BlockEnd);
        assert_eq!(classify("} Point;\n"), Category::BlockEnd);
        assert_eq!(classify("  }\n"), Category::Plain);
    }

    #[test]
    fn plain() {
        assert_eq!(classify("\n"), Category::Plain);
        assert_eq!(classify("#include <stdio.h>\n"), Category::Plain);
        assert_eq!(classify("  return x;\n"), Category::Plain);
    }

    #[test]
    fn classification_is_stable() {
        let lines = [
            "/** doc */\n",
            "bar(int x)\n",
            "typedef struct Point {\n",
            "}\n",
            "int y;\n",
            "\n",
        ];
        for line in lines {
            assert_eq!(classify(line), classify(line), "line: {line:?}");
        }
    }

    #[test]
    fn break_lines() {
        assert!(Category::DocComment.is_break("/** x */\n"));
        assert!(Category::Plain.is_break("\n"));
        assert!(Category::Plain.is_break("  \t\r\n"));
        assert!(!Category::Plain.is_break("int x;\n"));
        assert!(!Category::BlockEnd.is_break("}\n"));
        assert!(!Category::FunctionStart("f").is_break("f(void)\n"));
    }
}
