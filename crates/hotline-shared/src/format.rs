//! Text helpers shared by the call screen and the contact lists.

/// Render an elapsed call duration as `MM:SS`.
///
/// Minutes are not capped, so an hour-long call renders as `60:00` and
/// beyond, matching the call screen's badge.
pub fn format_duration(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Uppercased first letters of the first two whitespace-separated tokens of
/// a display name, for avatar fallbacks.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|token| token.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_pads_both_fields() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(5), "00:05");
        assert_eq!(format_duration(125), "02:05");
        assert_eq!(format_duration(60), "01:00");
    }

    #[test]
    fn duration_does_not_cap_minutes() {
        assert_eq!(format_duration(3600), "60:00");
        assert_eq!(format_duration(3725), "62:05");
    }

    #[test]
    fn initials_take_first_two_tokens() {
        assert_eq!(initials("Anna Petrova"), "AP");
        assert_eq!(initials("X"), "X");
        assert_eq!(initials("one two three"), "OT");
    }

    #[test]
    fn initials_ignore_extra_whitespace() {
        assert_eq!(initials("  anna   petrova  "), "AP");
        assert_eq!(initials(""), "");
    }
}
