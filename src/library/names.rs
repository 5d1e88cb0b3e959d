//! Field extraction from folder and file names.
//!
//! Everything here is a pure string transform: a name that does not have the
//! expected shape falls back to "no date" and "whole name is the title".

use std::path::Path;

use super::model::SummaryRecord;

/// Delimiter between the date and the rest of a folder name.
pub const FOLDER_DELIMITER: char = '_';
/// Delimiter between the date and the title of a live recording.
pub const LIVE_DELIMITER: char = '-';

/// Structural date check: exactly ten characters, exactly two dots.
///
/// No calendar validation is attempted.
pub fn is_date_candidate(candidate: &str) -> bool {
    candidate.chars().count() == 10 && candidate.matches('.').count() == 2
}

/// Split `s` on the first `delimiter` and accept the left side as a date.
///
/// Returns `(date, remainder)`. When there is no delimiter or the left side is
/// not date shaped, returns an empty date and `s` unchanged.
pub fn parse_date_prefix(s: &str, delimiter: char) -> (String, String) {
    match s.split_once(delimiter) {
        Some((candidate, rest)) if is_date_candidate(candidate) => {
            (candidate.to_string(), rest.to_string())
        }
        _ => (String::new(), s.to_string()),
    }
}

/// Extract `(date, album title)` from an album or EP folder name.
///
/// The date is the first `_` segment (the whole name when there is none).
/// The title is whatever follows the last `_`, cut at the first `[` and
/// trimmed, so `2021.05.14_XYZ_Album_Sunrise[FLAC]` gives `Sunrise`.
pub fn parse_album_folder_name(folder_name: &str) -> (String, String) {
    let candidate = folder_name
        .split(FOLDER_DELIMITER)
        .next()
        .unwrap_or_default();
    let date = if is_date_candidate(candidate) {
        candidate.to_string()
    } else {
        String::new()
    };

    let tail = match folder_name.rfind(FOLDER_DELIMITER) {
        Some(idx) => &folder_name[idx + FOLDER_DELIMITER.len_utf8()..],
        None => folder_name,
    };
    let title = match tail.find('[') {
        Some(idx) => &tail[..idx],
        None => tail,
    };

    (date, title.trim().to_string())
}

/// Split a track file stem into `(track number, track title)` on the first `.`.
pub fn parse_track_file_name(stem: &str) -> (String, String) {
    match stem.split_once('.') {
        Some((no, title)) => (no.trim().to_string(), title.trim().to_string()),
        None => (String::new(), stem.trim().to_string()),
    }
}

/// Date that tags every track inside a single's container folder.
pub fn parse_single_folder_name(folder_name: &str) -> String {
    parse_date_prefix(folder_name, FOLDER_DELIMITER).0
}

/// Extract `(date, performance title)` from a live recording file stem.
pub fn parse_live_file_name(stem: &str) -> (String, String) {
    let (date, title) = parse_date_prefix(stem, LIVE_DELIMITER);
    (date, title.trim().to_string())
}

/// Parse a summary file stem shaped `Singer-TrackName_Source`.
///
/// The singer ends at the first `-`, the source starts after the last `_`.
/// Returns `None` when either delimiter is missing from the stem.
pub fn parse_summary_file_name(stem: &str) -> Option<SummaryRecord> {
    let (singer, rest) = stem.split_once('-')?;
    let (name, from) = rest.rsplit_once('_')?;
    Some(SummaryRecord {
        singer: singer.trim().to_string(),
        name: name.trim().to_string(),
        from: from.trim().to_string(),
    })
}

/// Case-insensitive extension check against an allow-list given without dots.
pub fn has_extension(path: &Path, allowed: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            allowed
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_lowercase())
                .any(|e| !e.is_empty() && e == ext)
        })
        .unwrap_or(false)
}

/// Whether a file stem carries the exclusion marker (covers, artwork, extras).
pub fn is_excluded(stem: &str, marker: &str) -> bool {
    !marker.is_empty() && stem.to_lowercase().contains(&marker.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_prefix_accepts_ten_chars_with_two_dots() {
        assert_eq!(
            parse_date_prefix("2021.05.14_rest_of_it", '_'),
            ("2021.05.14".to_string(), "rest_of_it".to_string())
        );
        // Shape only, no calendar check.
        assert_eq!(
            parse_date_prefix("9999.99.99-Tour", '-'),
            ("9999.99.99".to_string(), "Tour".to_string())
        );
    }

    #[test]
    fn date_prefix_rejects_wrong_shapes_and_keeps_original() {
        for s in [
            "2021.5.14_Title",
            "2021-05-14_Title",
            "2021.05.14.1_Title",
            "20210514xx_Title",
            "no delimiter here",
            "",
        ] {
            assert_eq!(parse_date_prefix(s, '_'), (String::new(), s.to_string()), "{s}");
        }
    }

    #[test]
    fn date_prefix_counts_characters_not_bytes() {
        // Nine characters even though it is far longer than ten bytes.
        let (date, rest) = parse_date_prefix("二〇二一.五.十四_x", '_');
        assert_eq!(date, "");
        assert_eq!(rest, "二〇二一.五.十四_x");

        let (date, _) = parse_date_prefix("二〇二一.〇五.十四_x", '_');
        assert_eq!(date, "二〇二一.〇五.十四");
    }

    #[test]
    fn album_folder_takes_title_after_last_underscore() {
        assert_eq!(
            parse_album_folder_name("2021.05.14_XYZ_Album_Sunrise[FLAC]"),
            ("2021.05.14".to_string(), "Sunrise".to_string())
        );
        assert_eq!(
            parse_album_folder_name("2019.01.02_Label_EP_ Night Drive  [24bit][Hi-Res]"),
            ("2019.01.02".to_string(), "Night Drive".to_string())
        );
        assert_eq!(
            parse_album_folder_name("2018.11.30_meta_with_many_parts_Title"),
            ("2018.11.30".to_string(), "Title".to_string())
        );
    }

    #[test]
    fn album_folder_without_anchors_falls_back() {
        assert_eq!(
            parse_album_folder_name("Greatest Hits [MP3]"),
            (String::new(), "Greatest Hits".to_string())
        );
        assert_eq!(
            parse_album_folder_name("Demo_Tapes"),
            (String::new(), "Tapes".to_string())
        );
        assert_eq!(
            parse_album_folder_name("2020.02.02"),
            ("2020.02.02".to_string(), "2020.02.02".to_string())
        );
    }

    #[test]
    fn track_file_splits_on_first_dot() {
        assert_eq!(
            parse_track_file_name("01.First Light"),
            ("01".to_string(), "First Light".to_string())
        );
        assert_eq!(
            parse_track_file_name(" 3 . Mr. Blue Sky "),
            ("3".to_string(), "Mr. Blue Sky".to_string())
        );
        assert_eq!(
            parse_track_file_name("  Untitled  "),
            (String::new(), "Untitled".to_string())
        );
    }

    #[test]
    fn single_folder_date_needs_delimiter() {
        assert_eq!(parse_single_folder_name("2022.07.01_Summer"), "2022.07.01");
        assert_eq!(parse_single_folder_name("2022.07.01"), "");
        assert_eq!(parse_single_folder_name("Summer_2022.07.01"), "");
    }

    #[test]
    fn live_file_takes_date_before_first_dash() {
        assert_eq!(
            parse_live_file_name("2019.08.10-Summer Tour"),
            ("2019.08.10".to_string(), "Summer Tour".to_string())
        );
        assert_eq!(
            parse_live_file_name("2019.08.10- Tour - Night 2 "),
            ("2019.08.10".to_string(), "Tour - Night 2".to_string())
        );
        assert_eq!(
            parse_live_file_name("Unknown Show"),
            (String::new(), "Unknown Show".to_string())
        );
        assert_eq!(
            parse_live_file_name("Budokan-2019.08.10"),
            (String::new(), "Budokan-2019.08.10".to_string())
        );
    }

    #[test]
    fn summary_file_splits_singer_name_and_source() {
        assert_eq!(
            parse_summary_file_name("Milet-Inside You_OST"),
            Some(SummaryRecord {
                singer: "Milet".into(),
                name: "Inside You".into(),
                from: "OST".into(),
            })
        );
        let r = parse_summary_file_name("A-B-C_under_score_Source").unwrap();
        assert_eq!(r.singer, "A");
        assert_eq!(r.name, "B-C_under_score");
        assert_eq!(r.from, "Source");

        assert_eq!(parse_summary_file_name("NoDelimiter"), None);
        assert_eq!(parse_summary_file_name("Only-Dash"), None);
        assert_eq!(parse_summary_file_name("Only_Underscore"), None);
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let allowed = vec!["flac".to_string(), ".MP3".to_string(), "wav".to_string()];
        assert!(has_extension(Path::new("/m/a.FLAC"), &allowed));
        assert!(has_extension(Path::new("/m/a.mp3"), &allowed));
        assert!(has_extension(Path::new("a.Wav"), &allowed));
        assert!(!has_extension(Path::new("a.ogg"), &allowed));
        assert!(!has_extension(Path::new("flac"), &allowed));
        assert!(!has_extension(Path::new(".flac"), &allowed));
    }

    #[test]
    fn exclusion_marker_is_case_insensitive_substring() {
        assert!(is_excluded("02.Cover", "cover"));
        assert!(is_excluded("FRONT_COVER_art", "cover"));
        assert!(is_excluded("discovery", "cover"));
        assert!(!is_excluded("01.First Light", "cover"));
        assert!(!is_excluded("anything", ""));
    }
}
