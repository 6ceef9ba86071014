//! Deterministic text normalization shared by every scoring component

use unicode_normalization::UnicodeNormalization;

/// Canonicalize free text into a lowercase, ASCII, token-friendly form.
///
/// Accented characters are NFKD-decomposed and the non-ASCII remnants
/// dropped; anything outside `[a-z0-9#+ ]` becomes a space; whitespace
/// runs collapse to a single space with trimmed ends. Empty input yields
/// the empty string, and normalizing an already-normalized string
/// returns it unchanged.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let folded: String = text
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_lowercase();

    let mapped: String = folded
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '#' | '+' => c,
            _ => ' ',
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n  "), "");
    }

    #[test]
    fn test_accent_folding() {
        assert_eq!(normalize("Programação avançada"), "programacao avancada");
        assert_eq!(normalize("Experiência em São Paulo"), "experiencia em sao paulo");
    }

    #[test]
    fn test_keeps_hash_and_plus() {
        assert_eq!(normalize("C# e C++ são ótimos!"), "c# e c++ sao otimos");
    }

    #[test]
    fn test_collapses_whitespace_and_punctuation() {
        assert_eq!(
            normalize("Python,   SQL;AWS -- Docker."),
            "python sql aws docker"
        );
    }

    #[test]
    fn test_idempotence() {
        let samples = [
            "Procuramos Python, SQL e AWS",
            "3 anos com Python e AWS; Docker básico",
            "Árvore çedilha ÀÉÎÕÜ",
            "",
            "já normalizado 123 c# c++",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_output_charset() {
        let out = normalize("Olá!! @user #rust ++ <b>HTML</b> 100%");
        assert!(out
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '#' || c == '+' || c == ' '));
        assert!(!out.starts_with(' '));
        assert!(!out.ends_with(' '));
        assert!(!out.contains("  "));
    }
}
