//! Font statistics over layout spans: size distribution, likely headers, fonts.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::layout::LayoutSpan;

pub const DEFAULT_HEADER_SIZE_RATIO: f32 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeCount {
    pub size: f32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureSummary {
    /// Distinct sizes (rounded to 0.1), largest first
    pub size_distribution: Vec<SizeCount>,
    pub average_size: f32,
    /// Spans noticeably larger than the average, in page order
    pub headers: Vec<LayoutSpan>,
    /// Sorted, de-duplicated font names
    pub fonts: Vec<String>,
}

/// Summarise spans with the default header ratio
pub fn analyze_document_structure(spans: &[LayoutSpan]) -> Option<StructureSummary> {
    analyze_structure_with_ratio(spans, DEFAULT_HEADER_SIZE_RATIO)
}

/// Summarise spans; `None` when there are no spans
pub fn analyze_structure_with_ratio(spans: &[LayoutSpan], header_ratio: f32) -> Option<StructureSummary> {
    if spans.is_empty() {
        return None;
    }

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for span in spans {
        *counts.entry((span.size * 10.0).round() as i64).or_default() += 1;
    }
    let size_distribution = counts
        .into_iter()
        .rev()
        .map(|(tenths, count)| SizeCount {
            size: tenths as f32 / 10.0,
            count,
        })
        .collect();

    let average_size = spans.iter().map(|s| s.size).sum::<f32>() / spans.len() as f32;
    let headers: Vec<LayoutSpan> = spans
        .iter()
        .filter(|s| s.size > average_size * header_ratio)
        .cloned()
        .collect();
    let fonts: Vec<String> = spans
        .iter()
        .map(|s| s.font.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    log::debug!(
        "Structure: average size {:.1}, {} headers, {} fonts",
        average_size,
        headers.len(),
        fonts.len()
    );

    Some(StructureSummary {
        size_distribution,
        average_size,
        headers,
        fonts,
    })
}
