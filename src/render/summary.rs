use std::collections::BTreeMap;

use crate::library::SummaryRecord;

use super::{join_blocks, track_count};

fn is_anchor_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// GitHub-style heading anchor: lowercase, every run of other characters
/// collapsed to one `-`, no leading or trailing `-`.
pub fn heading_anchor(title: &str) -> String {
    let mut anchor = String::new();
    let mut pending_dash = false;
    for c in title.trim().to_lowercase().chars() {
        if is_anchor_char(c) {
            if pending_dash && !anchor.is_empty() {
                anchor.push('-');
            }
            pending_dash = false;
            anchor.push(c);
        } else {
            pending_dash = true;
        }
    }
    anchor
}

/// Render the cross-artist summary: a linked table of contents with per-singer
/// counts and a total, then one section per singer with tracks sorted by name.
pub fn render_summary(records: &[SummaryRecord]) -> String {
    let mut by_singer: BTreeMap<&str, Vec<&SummaryRecord>> = BTreeMap::new();
    for r in records {
        by_singer.entry(r.singer.as_str()).or_default().push(r);
    }

    let mut contents = Vec::new();
    let mut sections = Vec::new();
    for (singer, mut tracks) in by_singer {
        let heading = format!("{singer} ({})", track_count(tracks.len()));
        contents.push(format!(
            "- [{singer}](#{}) : {}",
            heading_anchor(&heading),
            track_count(tracks.len())
        ));

        tracks.sort_by(|a, b| a.name.cmp(&b.name));
        sections.push(vec![format!("## {heading}")]);
        sections.push(
            tracks
                .into_iter()
                .map(|r| format!("- {} ({})", r.name, r.from))
                .collect(),
        );
    }

    let mut blocks = vec![
        vec!["# 🎶 Singer Summary".to_string()],
        vec!["## Singers".to_string()],
        contents,
        vec![format!("**Total: {}**", track_count(records.len()))],
    ];
    blocks.extend(sections);
    join_blocks(blocks)
}
