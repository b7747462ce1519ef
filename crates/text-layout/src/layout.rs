//! Row clustering and reading order

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Axis-aligned box in image pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn center_y(&self) -> i32 {
        (self.top + self.bottom) / 2
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// A recognized block of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub bounding_box: Option<Rect>,
    pub confidence: f32,
    /// Position in reading order
    pub index: usize,
    pub language: Option<String>,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, bounding_box: Option<Rect>) -> Self {
        Self {
            text: text.into(),
            bounding_box,
            confidence: 1.0,
            index: 0,
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Clustering thresholds (pixels unless noted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub min_block_height: i32,
    /// Fraction of the smaller height two boxes must share vertically
    pub vertical_overlap_ratio: f32,
    /// Maximum distance between vertical centers
    pub vertical_grouping: i32,
    /// Horizontal gap must be strictly below this
    pub horizontal_gap: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_block_height: 15,
            vertical_overlap_ratio: 0.5,
            vertical_grouping: 55,
            horizontal_gap: 80,
        }
    }
}

/// Filter, cluster into rows, merge, and index blocks in reading order
pub fn order_blocks(blocks: Vec<TextBlock>, config: &LayoutConfig) -> Vec<TextBlock> {
    let mut valid: Vec<(Rect, TextBlock)> = blocks
        .into_iter()
        .filter_map(|mut block| {
            let rect = block.bounding_box?;
            let trimmed = block.text.trim();
            if trimmed.is_empty()
                || rect.height() < config.min_block_height
                || rect.top < 0
                || rect.left < 0
            {
                return None;
            }
            block.text = trimmed.to_string();
            Some((rect, block))
        })
        .collect();

    valid.sort_by_key(|(rect, _)| rect.top);

    let mut rows: Vec<Vec<(Rect, TextBlock)>> = Vec::new();
    for (rect, block) in valid {
        match rows.iter_mut().find(|row| same_row(&row[0].0, &rect, config)) {
            Some(row) => row.push((rect, block)),
            None => rows.push(vec![(rect, block)]),
        }
    }
    debug!("Text rows identified: {}", rows.len());

    let mut merged: Vec<TextBlock> = rows.into_iter().map(merge_row).collect();
    merged.sort_by_key(|block| {
        block
            .bounding_box
            .map(|rect| (rect.top, rect.left))
            .unwrap_or((i32::MAX, i32::MAX))
    });

    for (index, block) in merged.iter_mut().enumerate() {
        block.index = index;
    }
    merged
}

/// Whether `candidate` belongs on the row started by `reference`
fn same_row(reference: &Rect, candidate: &Rect, config: &LayoutConfig) -> bool {
    let gap_ok = (candidate.left - reference.right).abs() < config.horizontal_gap;

    let overlap =
        (reference.bottom.min(candidate.bottom) - reference.top.max(candidate.top)).max(0);
    let min_height = reference.height().min(candidate.height());
    if min_height > 0 && overlap as f32 / min_height as f32 >= config.vertical_overlap_ratio {
        return gap_ok;
    }

    if (reference.center_y() - candidate.center_y()).abs() <= config.vertical_grouping {
        return gap_ok;
    }

    false
}

fn merge_row(mut row: Vec<(Rect, TextBlock)>) -> TextBlock {
    row.sort_by_key(|(rect, _)| rect.left);
    if row.len() == 1 {
        return row.remove(0).1;
    }

    let text = row
        .iter()
        .map(|(_, block)| block.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let bounding_box = row
        .iter()
        .map(|(rect, _)| *rect)
        .reduce(|acc, rect| acc.union(&rect));
    let confidence = row.iter().map(|(_, block)| block.confidence).sum::<f32>() / row.len() as f32;
    let language = row[0].1.language.clone();

    TextBlock {
        text,
        bounding_box,
        confidence,
        index: 0,
        language,
    }
}

/// All block texts, one per line
pub fn join_text(blocks: &[TextBlock]) -> String {
    blocks
        .iter()
        .map(|block| block.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(text: &str, left: i32, top: i32, right: i32, bottom: i32) -> TextBlock {
        TextBlock::new(text, Some(Rect::new(left, top, right, bottom)))
    }

    #[test]
    fn test_invalid_blocks_discarded() {
        let blocks = vec![
            TextBlock::new("no box", None),
            block("   ", 0, 0, 100, 30),
            block("short", 0, 0, 100, 10),
            block("offscreen", -5, 0, 100, 30),
            block("  kept  ", 0, 0, 100, 30),
        ];
        let ordered = order_blocks(blocks, &LayoutConfig::default());
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].text, "kept");
    }

    #[test]
    fn test_same_line_merged_left_to_right() {
        let blocks = vec![
            block("world", 150, 12, 250, 40).with_language("en"),
            block("Hello", 0, 10, 100, 40).with_language("it"),
        ];
        let ordered = order_blocks(blocks, &LayoutConfig::default());
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].text, "Hello world");
        assert_eq!(ordered[0].bounding_box, Some(Rect::new(0, 10, 250, 40)));
        // language of the leftmost block
        assert_eq!(ordered[0].language.as_deref(), Some("it"));
    }

    #[test]
    fn test_wide_gap_splits_row() {
        let blocks = vec![block("left", 0, 10, 100, 40), block("right", 300, 10, 400, 40)];
        let ordered = order_blocks(blocks, &LayoutConfig::default());
        assert_eq!(ordered.len(), 2);
        assert_eq!(ordered[0].text, "left");
        assert_eq!(ordered[1].index, 1);
    }

    #[test]
    fn test_center_distance_fallback() {
        // no overlap, centers 50px apart
        let blocks = vec![block("a", 0, 0, 100, 20), block("b", 120, 50, 200, 70)];
        let ordered = order_blocks(blocks, &LayoutConfig::default());
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].text, "a b");
    }

    #[test]
    fn test_rows_read_top_to_bottom() {
        let blocks = vec![
            block("third", 0, 300, 200, 330),
            block("first", 0, 0, 200, 30),
            block("second", 0, 150, 200, 180),
        ];
        let ordered = order_blocks(blocks, &LayoutConfig::default());
        assert_eq!(join_text(&ordered), "first\nsecond\nthird");
        assert_eq!(ordered.iter().map(|b| b.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    proptest! {
        #[test]
        fn prop_words_preserved(tops in proptest::collection::vec(0i32..1000, 1..12)) {
            let blocks: Vec<TextBlock> = tops
                .iter()
                .enumerate()
                .map(|(i, &top)| {
                    let left = (i as i32) * 40;
                    block(&format!("w{}", i), left, top, left + 30, top + 20)
                })
                .collect();
            let ordered = order_blocks(blocks, &LayoutConfig::default());
            let words: usize = ordered.iter().map(|b| b.text.split(' ').count()).sum();
            prop_assert_eq!(words, tops.len());
            for (i, b) in ordered.iter().enumerate() {
                prop_assert_eq!(b.index, i);
            }
        }
    }
}
