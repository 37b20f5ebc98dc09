//! Penn Treebank word tokenization
//!
//! The regex cascade used to tokenize the Penn Treebank: quotes become `` and '', clitics
//! split off (`do n't`, `he 's`), punctuation and brackets are padded with spaces, and a
//! final period is separated from the last word. Each stage is a list of substitutions
//! applied in order over the whole text; the result is split on whitespace.

use once_cell::sync::Lazy;
use regex::Regex;

struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rules(table: &[(&str, &'static str)]) -> Vec<Rule> {
    table
        .iter()
        .map(|(pattern, replacement)| Rule {
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        })
        .collect()
}

static STARTING_QUOTES: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r#"^""#, "``"),
        (r"(``)", " $1 "),
        (r#"([ (\[{<])""#, "$1 `` "),
    ])
});

static PUNCTUATION: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r"([:,])([^\d])", " $1 $2"),
        (r"([:,])$", " $1 "),
        (r"\.\.\.", " ... "),
        (r"[;@#$%&]", " $0 "),
        (r#"([^.])(\.)([\])}>"']*)\s*$"#, "$1 $2$3 "),
        (r"[?!]", " $0 "),
        (r"([^'])' ", "$1 ' "),
    ])
});

static PARENS_BRACKETS: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[(r"[\]\[(){}<>]", " $0 "), (r"--", " -- ")])
});

static ENDING_QUOTES: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r#"""#, " '' "),
        (r"(\S)('')", "$1 $2 "),
        (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "$1 $2 "),
        (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "$1 $2 "),
    ])
});

static CONTRACTIONS: Lazy<Vec<Rule>> = Lazy::new(|| {
    rules(&[
        (r"(?i)\b(can)(not)\b", " $1 $2 "),
        (r"(?i)\b(d)('ye)\b", " $1 $2 "),
        (r"(?i)\b(gim)(me)\b", " $1 $2 "),
        (r"(?i)\b(gon)(na)\b", " $1 $2 "),
        (r"(?i)\b(got)(ta)\b", " $1 $2 "),
        (r"(?i)\b(lem)(me)\b", " $1 $2 "),
        (r"(?i)\b(mor)('n)\b", " $1 $2 "),
        (r"(?i)\b(wan)(na) ", " $1 $2 "),
        (r"(?i) ('t)(is)\b", " $1 $2 "),
        (r"(?i) ('t)(was)\b", " $1 $2 "),
    ])
});

fn apply(rules: &[Rule], text: String) -> String {
    rules.iter().fold(text, |text, rule| {
        rule.pattern
            .replace_all(&text, rule.replacement)
            .into_owned()
    })
}

/// Split `text` into Treebank tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let text = apply(&STARTING_QUOTES, text.to_string());
    let text = apply(&PUNCTUATION, text);
    let text = apply(&PARENS_BRACKETS, text);
    let text = format!(" {} ", text);
    let text = apply(&ENDING_QUOTES, text);
    let text = apply(&CONTRACTIONS, text);
    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined(text: &str) -> String {
        tokenize(text).join(" ")
    }

    #[test]
    fn test_final_period_and_commas() {
        assert_eq!(
            joined("the storm, which hit monday, killed 12 people."),
            "the storm , which hit monday , killed 12 people ."
        );
    }

    #[test]
    fn test_numbers_keep_commas() {
        assert_eq!(joined("about 1,200 homes"), "about 1,200 homes");
    }

    #[test]
    fn test_clitics() {
        assert_eq!(joined("they don't know"), "they do n't know");
        assert_eq!(joined("the president's plan"), "the president 's plan");
        assert_eq!(joined("we cannot go"), "we can not go");
    }

    #[test]
    fn test_quotes() {
        assert_eq!(joined("\"no comment,\" he said."), "`` no comment , '' he said .");
    }

    #[test]
    fn test_brackets_and_dashes() {
        assert_eq!(joined("the u.n. (united nations)"), "the u.n. ( united nations )");
        assert_eq!(joined("rain--lots of it"), "rain -- lots of it");
    }

    #[test]
    fn test_question_and_symbols() {
        assert_eq!(joined("why $5?"), "why $ 5 ?");
    }
}
