use std::collections::BTreeMap;

use crate::library::{ReleaseKind, TrackRecord, date_column};

use super::join_blocks;

/// Left-pad `s` with zeros to `width` characters, keeping a leading sign first.
pub(super) fn zero_pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let zeros = "0".repeat(width - len);
    match s.chars().next() {
        Some(sign @ ('+' | '-')) => format!("{sign}{zeros}{}", &s[1..]),
        _ => format!("{zeros}{s}"),
    }
}

/// Render one artist's catalog.
///
/// Albums are grouped under `(date, album)` headers with tracks ordered by
/// their zero-padded number; singles and lives are listed by date. Sorting is
/// stable, so ties keep table order.
pub fn render_artist(artist: &str, records: &[TrackRecord]) -> String {
    let mut albums: BTreeMap<(&str, &str), Vec<(String, &str)>> = BTreeMap::new();
    let mut singles: Vec<(&str, &str)> = Vec::new();
    let mut lives: Vec<(&str, &str)> = Vec::new();

    for r in records {
        let date = date_column::shown(&r.date);
        match r.kind {
            ReleaseKind::Album => albums
                .entry((date, r.album.as_str()))
                .or_default()
                .push((zero_pad(&r.no, 3), r.name.as_str())),
            ReleaseKind::Single => singles.push((date, r.name.as_str())),
            ReleaseKind::Live => lives.push((date, r.name.as_str())),
        }
    }

    let mut blocks = vec![vec![format!("# 🎵 {artist} Track List")]];

    if !albums.is_empty() {
        blocks.push(vec!["## 📀 Albums".to_string()]);
        for ((date, album), mut tracks) in albums {
            tracks.sort_by(|a, b| a.0.cmp(&b.0));
            blocks.push(vec![format!("### 📁 ({date}) {album}")]);
            blocks.push(
                tracks
                    .into_iter()
                    .map(|(no, name)| format!("- **[{no}]** {name}"))
                    .collect(),
            );
        }
    }

    for (title, mut items) in [("## 🎵 Singles", singles), ("## 🎤 Lives", lives)] {
        if items.is_empty() {
            continue;
        }
        items.sort_by(|a, b| a.0.cmp(b.0));
        blocks.push(vec![title.to_string()]);
        blocks.push(
            items
                .into_iter()
                .map(|(date, name)| format!("- **[{date}]** {name}"))
                .collect(),
        );
    }

    join_blocks(blocks)
}
