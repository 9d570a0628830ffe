//! Word count roll-ups for the manuscript sidebar

use crate::models::Outline;
use serde::Serialize;

/// Word total of one part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartWordCount {
    pub part_id: String,
    pub title: String,
    pub chapter_count: usize,
    pub word_count: usize,
}

/// Manuscript-wide word totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCountSummary {
    pub total: usize,
    pub chapter_count: usize,
    /// Parts in outline order
    pub parts: Vec<PartWordCount>,
}

/// Sum chapter word counts for the whole outline and for each part.
///
/// Collapse state does not matter: hidden chapters still count.
pub fn word_count_summary(outline: &Outline) -> WordCountSummary {
    let chapters = || outline.iter().filter(|node| node.is_chapter());

    let parts = outline
        .children_of(None)
        .into_iter()
        .filter(|node| node.is_part())
        .map(|part| {
            let (chapter_count, word_count) = chapters()
                .filter(|chapter| chapter.is_child_of(Some(part.id.as_str())))
                .fold((0, 0), |(count, words), chapter| {
                    (count + 1, words + chapter.word_count)
                });
            PartWordCount {
                part_id: part.id.clone(),
                title: part.title.clone(),
                chapter_count,
                word_count,
            }
        })
        .collect();

    WordCountSummary {
        total: chapters().map(|chapter| chapter.word_count).sum(),
        chapter_count: chapters().count(),
        parts,
    }
}
