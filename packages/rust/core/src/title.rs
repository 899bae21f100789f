//! Page-title resolution for the current-page crumb.

/// Separator between the page name and the site name in most `<title>`s.
pub const DEFAULT_TITLE_SEPARATOR: &str = " - ";

/// Extract the page name from a document title.
///
/// With `separator` present, returns the trimmed text before its first
/// occurrence; otherwise the whole trimmed title. An empty result means "no
/// usable title" and the path-derived label is kept.
pub fn resolve_title(title: &str, separator: &str) -> String {
    let head = if separator.is_empty() {
        title
    } else {
        title.split_once(separator).map_or(title, |(head, _)| head)
    };
    head.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_text_before_first_separator() {
        assert_eq!(resolve_title("Page - Site Name", DEFAULT_TITLE_SEPARATOR), "Page");
        assert_eq!(resolve_title("A - B - C", DEFAULT_TITLE_SEPARATOR), "A");
    }

    #[test]
    fn whole_title_without_separator() {
        assert_eq!(resolve_title("Page", DEFAULT_TITLE_SEPARATOR), "Page");
        assert_eq!(resolve_title("  Spaced  ", DEFAULT_TITLE_SEPARATOR), "Spaced");
        // A bare hyphen without surrounding spaces is not the separator.
        assert_eq!(resolve_title("Built-in Types", DEFAULT_TITLE_SEPARATOR), "Built-in Types");
    }

    #[test]
    fn empty_results() {
        assert_eq!(resolve_title("", DEFAULT_TITLE_SEPARATOR), "");
        assert_eq!(resolve_title("   ", DEFAULT_TITLE_SEPARATOR), "");
        assert_eq!(resolve_title(" - Site", DEFAULT_TITLE_SEPARATOR), "");
    }

    #[test]
    fn custom_separator() {
        assert_eq!(resolve_title("Guide | Docs", " | "), "Guide");
        assert_eq!(resolve_title("Guide - Docs", " | "), "Guide - Docs");
    }
}
