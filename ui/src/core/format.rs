//! Formatting helpers for presenting observations.

use time::{macros::format_description, Date};

/// `Mar 1, 2024`.
pub fn format_date(date: Date) -> String {
    date.format(&format_description!(
        "[month repr:short] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| "—".to_string())
}

/// `1 observation`, `2 observations`.
pub fn observation_count(count: usize) -> String {
    if count == 1 {
        "1 observation".to_string()
    } else {
        format!("{count} observations")
    }
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn dates_use_short_month_and_unpadded_day() {
        assert_eq!(format_date(date!(2024 - 03 - 01)), "Mar 1, 2024");
        assert_eq!(format_date(date!(2023 - 12 - 25)), "Dec 25, 2023");
    }

    #[test]
    fn counts_pluralize() {
        assert_eq!(observation_count(1), "1 observation");
        assert_eq!(observation_count(0), "0 observations");
        assert_eq!(observation_count(12), "12 observations");
    }

    #[test]
    fn capitalize_handles_empty_and_unicode() {
        assert_eq!(capitalize("positive"), "Positive");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script> & 'y'"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; &#39;y&#39;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }
}
