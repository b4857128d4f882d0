use super::error::ElementsError;

/// The two data lines of one named TLE entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementsPair {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

/// Finds the entry whose header line starts with `name` and returns the two
/// lines that follow it, trimmed.
pub fn find_elements(feed: &str, name: &str) -> Result<ElementsPair, ElementsError> {
    let lines: Vec<&str> = feed.lines().collect();

    let header = lines
        .iter()
        .position(|line| line.trim().starts_with(name))
        .ok_or_else(|| ElementsError::NotFound(name.to_string()))?;

    let (line1, line2) = match (lines.get(header + 1), lines.get(header + 2)) {
        (Some(line1), Some(line2)) => (line1.trim(), line2.trim()),
        _ => return Err(ElementsError::Truncated(name.to_string())),
    };

    if !line1.starts_with("1 ") || !line2.starts_with("2 ") {
        return Err(ElementsError::InvalidFormat {
            name: name.to_string(),
            message: "expected TLE lines 1 and 2 after the header".to_string(),
        });
    }

    Ok(ElementsPair {
        name: lines[header].trim().to_string(),
        line1: line1.to_string(),
        line2: line2.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub const STATIONS: &str = "\
ISS (ZARYA)             \r
1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992  \r
2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008  \r
CSS (TIANHE)            \r
1 48274U 21035A   24112.50462963  .00025611  00000+0  29020-3 0  9998\r
2 48274  41.4674 243.1453 0005466 326.6212 112.6384 15.61736545167891\r
";

    #[test]
    fn returns_the_two_lines_after_the_header_trimmed() {
        let pair = find_elements(STATIONS, "ISS (ZARYA)").unwrap();

        assert_eq!(
            pair,
            ElementsPair {
                name: "ISS (ZARYA)".to_string(),
                line1: "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992"
                    .to_string(),
                line2: "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008"
                    .to_string(),
            }
        );
    }

    #[test]
    fn finds_entries_further_down_the_feed() {
        let pair = find_elements(STATIONS, "CSS (TIANHE)").unwrap();
        assert!(pair.line1.starts_with("1 48274U"));
        assert!(pair.line2.starts_with("2 48274 "));
    }

    #[test]
    fn missing_header_is_not_found() {
        let err = find_elements(STATIONS, "HUBBLE").unwrap_err();
        assert!(matches!(err, ElementsError::NotFound(name) if name == "HUBBLE"));
    }

    #[test]
    fn header_at_end_of_feed_is_truncated() {
        let err = find_elements("ISS (ZARYA)\n1 25544U", "ISS (ZARYA)").unwrap_err();
        assert!(matches!(err, ElementsError::Truncated(_)));
    }

    #[test]
    fn header_followed_by_garbage_is_invalid() {
        let err = find_elements("ISS (ZARYA)\nfoo\nbar\n", "ISS (ZARYA)").unwrap_err();
        assert!(matches!(err, ElementsError::InvalidFormat { .. }));
    }
}
