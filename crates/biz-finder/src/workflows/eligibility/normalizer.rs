/// Canonical form for free-text labels coming from forms and CSV exports:
/// lowercase, invisible characters stripped, separators collapsed to `_`.
pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned
        .split(|c: char| c.is_whitespace() || matches!(c, '/' | '-' | '_'))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::normalize_label;

    #[test]
    fn collapses_separators_and_case() {
        assert_eq!(normalize_label("\u{feff}IT / SW"), "it_sw");
        assert_eq!(normalize_label("Working  Capital"), "working_capital");
        assert_eq!(normalize_label("wholesale-retail"), "wholesale_retail");
    }

    #[test]
    fn leaves_hangul_untouched() {
        assert_eq!(normalize_label(" 제조업 "), "제조업");
    }
}
