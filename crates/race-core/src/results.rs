//! Standings text: race-time formatting and ordinal placement labels.

use crate::color::Color;
use crate::race::FinishRecord;

/// Formats an elapsed race time as `MM:SS.mmm`.
///
/// Every field truncates, never rounds. Minutes widen past two digits for
/// absurdly long races instead of wrapping.
pub fn format_race_time(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = (seconds / 60.0).floor() as u64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let secs = (seconds % 60.0).floor() as u64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let millis = ((seconds % 1.0) * 1000.0).floor() as u64;
    format!("{minutes:02}:{secs:02}.{millis:03}")
}

/// Formats a 1-based placement as ordinal text, e.g. `"2nd Place"`.
///
/// `None` means the marble never finished and reads as `"Last Place"`.
///
/// The st/nd/rd suffixes apply only to single-digit places (after the usual
/// 11th/12th/13th exception); 21 renders as `"21th Place"`. This matches the
/// shipped behavior and is covered by a test so it does not get "fixed" into
/// natural-language ordinals by accident.
pub fn place_text(place: Option<usize>) -> String {
    let Some(place) = place else {
        return "Last Place".to_string();
    };

    let last_two = place % 100;
    if (11..=13).contains(&last_two) {
        return format!("{place}th Place");
    }

    let suffix = match place % 10 {
        1 if place < 10 => "st",
        2 if place < 10 => "nd",
        3 if place < 10 => "rd",
        _ => "th",
    };
    format!("{place}{suffix} Place")
}

/// Formats the live standings, one line per finisher in finish order.
///
/// Placement is the 1-based index in the collaborator-supplied ordering.
/// An empty finish list produces an empty display.
pub fn standings_lines(finished: &[FinishRecord]) -> Vec<String> {
    let palette = Color::palette();
    finished
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let name = palette
                .get(record.color_index)
                .map_or("Unknown", |(_, name)| *name);
            format!(
                "{}. {} ({})",
                index + 1,
                name,
                format_race_time(record.elapsed_seconds)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_race_time() {
        assert_eq!(format_race_time(0.0), "00:00.000");
        assert_eq!(format_race_time(8.031), "00:08.031");
        assert_eq!(format_race_time(65.5), "01:05.500");
        assert_eq!(format_race_time(123.456), "02:03.456");
    }

    #[test]
    fn test_format_race_time_truncates() {
        // 0.9996 s is 999 ms, not a rounded-up second.
        assert_eq!(format_race_time(0.9996), "00:00.999");
    }

    #[test]
    fn test_format_race_time_widens_past_an_hour() {
        assert_eq!(format_race_time(3600.0), "60:00.000");
        assert_eq!(format_race_time(6000.25), "100:00.250");
    }

    #[test]
    fn test_place_text_single_digits() {
        assert_eq!(place_text(Some(1)), "1st Place");
        assert_eq!(place_text(Some(2)), "2nd Place");
        assert_eq!(place_text(Some(3)), "3rd Place");
        assert_eq!(place_text(Some(4)), "4th Place");
        assert_eq!(place_text(Some(8)), "8th Place");
    }

    #[test]
    fn test_place_text_teens() {
        assert_eq!(place_text(Some(11)), "11th Place");
        assert_eq!(place_text(Some(12)), "12th Place");
        assert_eq!(place_text(Some(13)), "13th Place");
        assert_eq!(place_text(Some(111)), "111th Place");
    }

    #[test]
    fn test_place_text_keeps_shipped_double_digit_behavior() {
        // Deliberate: digit suffixes are gated to place < 10, so 21/22/23
        // read "th". Do not change without a product decision.
        assert_eq!(place_text(Some(21)), "21th Place");
        assert_eq!(place_text(Some(22)), "22th Place");
        assert_eq!(place_text(Some(23)), "23th Place");
        assert_eq!(place_text(Some(20)), "20th Place");
        assert_eq!(place_text(Some(101)), "101th Place");
    }

    #[test]
    fn test_place_text_unfinished_is_last_place() {
        assert_eq!(place_text(None), "Last Place");
    }

    #[test]
    fn test_standings_lines() {
        let records = vec![
            FinishRecord {
                marble_id: 3,
                color_index: 3,
                elapsed_seconds: 8.031,
            },
            FinishRecord {
                marble_id: 0,
                color_index: 0,
                elapsed_seconds: 9.5,
            },
        ];
        assert_eq!(
            standings_lines(&records),
            vec!["1. Yellow (00:08.031)", "2. Red (00:09.500)"]
        );
    }

    #[test]
    fn test_standings_lines_empty() {
        assert!(standings_lines(&[]).is_empty());
    }
}
