// src/common/text.rs

// Métricas de texto dos roteiros. A estimativa de duração assume uma fala
// média de 150 palavras por minuto e precisa ser determinística: o mesmo
// texto sempre produz a mesma duração.

const WORDS_PER_MINUTE: f64 = 150.0;

/// Conta palavras separadas por espaço em branco. Texto vazio ou só de
/// espaços conta zero.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estima a duração falada em segundos a partir do texto.
pub fn estimate_duration(text: &str) -> i32 {
    let words = word_count(text) as f64;
    (words / WORDS_PER_MINUTE * 60.0).round() as i32
}

/// Formata segundos como `~30 sec` ou `~2:05`.
pub fn format_duration(seconds: i32) -> String {
    if seconds < 60 {
        return format!("~{} sec", seconds);
    }
    let minutes = seconds / 60;
    let remaining = seconds % 60;
    format!("~{}:{:02}", minutes, remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_empty_is_zero() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \n\t  "), 0);
    }

    #[test]
    fn word_count_splits_on_any_whitespace() {
        assert_eq!(word_count("one two\nthree\tfour"), 4);
        assert_eq!(word_count("  leading and trailing  "), 3);
    }

    #[test]
    fn duration_empty_is_zero() {
        assert_eq!(estimate_duration(""), 0);
    }

    #[test]
    fn duration_150_words_is_one_minute() {
        let text = vec!["word"; 150].join(" ");
        assert_eq!(estimate_duration(&text), 60);
    }

    #[test]
    fn duration_grows_with_word_count() {
        let short = vec!["word"; 40].join(" ");
        let long = vec!["word"; 120].join(" ");
        assert!(estimate_duration(&short) < estimate_duration(&long));
        assert_eq!(estimate_duration(&short), 16);
        assert_eq!(estimate_duration(&long), 48);
    }

    #[test]
    fn format_short_durations_in_seconds() {
        assert_eq!(format_duration(0), "~0 sec");
        assert_eq!(format_duration(45), "~45 sec");
    }

    #[test]
    fn format_long_durations_as_minutes() {
        assert_eq!(format_duration(60), "~1:00");
        assert_eq!(format_duration(125), "~2:05");
    }
}
