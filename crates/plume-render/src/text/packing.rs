//! Greedy line packing.

/// The measured width of one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentWidth {
    /// Collapsible whitespace; charged only between two words on one line.
    Space(f32),
    /// A word, grapheme or image that must be placed.
    Content(f32),
}

/// Where a content segment landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedSegment {
    /// Offset from the container's left edge, before alignment.
    pub x: f32,
    /// Offset from the container's top edge.
    pub y: f32,
    /// Advance width.
    pub width: f32,
    /// Zero-based line number.
    pub line: usize,
    /// Rank of the segment within its line.
    pub line_index: usize,
}

/// The result of packing segments into lines at one width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinePacking {
    /// One entry per segment; `None` for whitespace.
    pub placements: Vec<Option<PlacedSegment>>,
    /// Used width of each line.
    pub line_widths: Vec<f32>,
    /// Number of content segments on each line.
    pub line_segments: Vec<usize>,
    /// Container width: the widest line, or the whole available width once
    /// the text wraps.
    pub width: f32,
    /// Container height: line count times line height.
    pub height: f32,
}

impl LinePacking {
    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_widths.len()
    }
}

/// Pack `segments` left to right into lines no wider than `available`
/// (`None` means unconstrained).
///
/// A gap is charged only when the word after it stays on the same line, so
/// lines never pay for leading or trailing whitespace. A word wider than the
/// available width on an empty line stays on that line.
#[must_use]
pub fn pack_lines(segments: &[SegmentWidth], available: Option<f32>, line_height: f32) -> LinePacking {
    let limit = available.unwrap_or(f32::INFINITY);

    let mut placements = Vec::with_capacity(segments.len());
    let mut line_widths = Vec::new();
    let mut line_segments = vec![0];
    let mut pending_gap = 0.0;
    let mut current_width = 0.0;
    let mut max_width: f32 = 0.0;
    let mut line_has_content = false;
    let mut line_index = 0;

    for segment in segments {
        let width = match *segment {
            SegmentWidth::Space(width) => {
                pending_gap += width;
                placements.push(None);
                continue;
            }
            SegmentWidth::Content(width) => width,
        };

        if !line_has_content {
            pending_gap = 0.0;
        }

        if line_has_content && current_width + pending_gap + width > limit {
            line_widths.push(current_width);
            line_segments.push(1);
            current_width = width;
            line_index = 0;
        } else {
            current_width += pending_gap + width;
            if let Some(count) = line_segments.last_mut() {
                *count += 1;
            }
            if line_has_content {
                line_index += 1;
            }
        }
        pending_gap = 0.0;
        line_has_content = true;
        max_width = max_width.max(current_width);

        placements.push(Some(PlacedSegment {
            x: current_width - width,
            y: line_widths.len() as f32 * line_height,
            width,
            line: line_widths.len(),
            line_index,
        }));
    }
    if line_has_content {
        line_widths.push(current_width);
    } else {
        line_segments.clear();
    }

    let width = match available {
        Some(available) if line_widths.len() > 1 => available,
        _ => max_width,
    };
    LinePacking {
        placements,
        height: line_widths.len() as f32 * line_height,
        line_widths,
        line_segments,
        width,
    }
}
