//! Flex Layout Algorithm (single line).
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! This module implements the subset of CSS Flexbox that document-like
//! trees need:
//! - all four `flex-direction` values
//! - `flex-grow` / `flex-shrink` distribution (§ 9.7) with min/max clamping
//! - `flex-basis` (definite length or auto)
//! - `justify-content` (6 keywords) and `align-items` / `align-self`
//! - row and column gaps
//! - absolutely positioned children placed against the padding box
//!
//! Not implemented: `flex-wrap`, `align-content`, `order`, auto margins,
//! percentage margins and padding.

use crate::geometry::{Available, ComputedLayout, Size};
use crate::style::{AlignItems, BoxDisplay, BoxStyle, Dimension, JustifyContent, Position};
use crate::tree::{FlexTree, NodeId};

/// Per-item data collected during flex layout.
///
/// [§ 9.2 Line Length Determination](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
struct FlexItem {
    id: NodeId,
    /// [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    /// The flex base size.
    base_size: f32,
    /// [§ 9.2 step 3E](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
    /// The flex base size clamped by the used min and max main sizes.
    hypothetical_size: f32,
    grow: f32,
    shrink: f32,
    min_main: f32,
    max_main: f32,
    /// The resolved target main size after § 9.7.
    target_size: f32,
    /// Whether this item is frozen during the § 9.7 loop.
    frozen: bool,
    /// Sum of the main-axis margins.
    outer_main: f32,
    /// Sum of the cross-axis margins.
    outer_cross: f32,
    /// Used cross size (border box).
    cross_size: f32,
    align: AlignItems,
    stretch: bool,
}

/// A child box resolved by one flex pass, relative to the container's border box.
struct PlacedItem {
    id: NodeId,
    layout: ComputedLayout,
}

/// Result of a flex pass: the used content size and the placed children.
struct FlexLine {
    content: Size,
    placed: Vec<PlacedItem>,
}

fn clamp_size(value: f32, min: Dimension, max: Dimension, base: Option<f32>, floor: f32) -> f32 {
    let mut value = value;
    if let Some(max) = max.resolve(base) {
        value = value.min(max);
    }
    if let Some(min) = min.resolve(base) {
        value = value.max(min);
    }
    value.max(floor)
}

impl FlexTree {
    /// Determine the border-box size `id` would take.
    ///
    /// `known_width` forces the border-box width (a resolved flex main size
    /// or a stretched cross size). `avail_width` is the border-box width the
    /// owner offers; auto widths shrink-to-fit inside it.
    pub(crate) fn measure_node(
        &self,
        id: NodeId,
        known_width: Option<f32>,
        avail_width: Option<f32>,
        base: Available,
    ) -> Size {
        let node = self.node(id);
        let style = &node.style;
        if style.display == BoxDisplay::None {
            return Size::default();
        }
        let frame = style.frame();

        let width = known_width.or_else(|| style.width.resolve(base.width)).map(|w| {
            clamp_size(w, style.min_width, style.max_width, base.width, frame.horizontal())
        });
        let height = style.height.resolve(base.height).map(|h| {
            clamp_size(h, style.min_height, style.max_height, base.height, frame.vertical())
        });
        if let (Some(width), Some(height)) = (width, height) {
            return Size::new(width, height);
        }

        let content_width = width.map(|w| (w - frame.horizontal()).max(0.0));
        let content_height = height.map(|h| (h - frame.vertical()).max(0.0));
        let avail_content =
            content_width.or_else(|| avail_width.map(|w| (w - frame.horizontal()).max(0.0)));

        let content = if let Some(measure) = &node.measure {
            let measured = measure(avail_content);
            Size::new(
                content_width.unwrap_or(measured.width),
                content_height.unwrap_or(measured.height),
            )
        } else {
            self.flex_pass(id, content_width, content_height, avail_content)
                .content
        };

        Size::new(
            width.unwrap_or_else(|| {
                clamp_size(
                    content.width + frame.horizontal(),
                    style.min_width,
                    style.max_width,
                    base.width,
                    frame.horizontal(),
                )
            }),
            height.unwrap_or_else(|| {
                clamp_size(
                    content.height + frame.vertical(),
                    style.min_height,
                    style.max_height,
                    base.height,
                    frame.vertical(),
                )
            }),
        )
    }

    /// Lay out the children of `id` inside its already-resolved box and
    /// recurse into them.
    pub(crate) fn arrange(&mut self, id: NodeId) {
        if self.nodes[id.0].measure.is_some() {
            return;
        }
        let layout = self.nodes[id.0].layout;
        let style = self.nodes[id.0].style.clone();
        let frame = style.frame();
        let content_width = (layout.width - frame.horizontal()).max(0.0);
        let content_height = (layout.height - frame.vertical()).max(0.0);

        let line = self.flex_pass(
            id,
            Some(content_width),
            Some(content_height),
            Some(content_width),
        );
        for placed in line.placed {
            self.nodes[placed.id.0].layout = placed.layout;
            self.arrange(placed.id);
        }

        // [§ 4.1 Absolutely-Positioned Flex Children](https://www.w3.org/TR/css-flexbox-1/#abspos-items)
        //
        // "An absolutely-positioned child of a flex container does not
        // participate in flex layout." They are positioned after flex
        // layout completes.
        let children = self.nodes[id.0].children.clone();
        for child in children {
            let child_style = &self.nodes[child.0].style;
            if child_style.display == BoxDisplay::None {
                self.nodes[child.0].layout = ComputedLayout::default();
            } else if child_style.is_absolute() {
                let placed = self.place_absolute(child, &style, layout);
                self.nodes[child.0].layout = placed;
                self.arrange(child);
            }
        }
    }

    /// Run the flex algorithm over the in-flow children of `id`.
    ///
    /// `content_width`/`content_height` are the container's definite content
    /// sizes, if known; `avail_content` is the content width on offer when the
    /// container's own width is still being determined.
    fn flex_pass(
        &self,
        id: NodeId,
        content_width: Option<f32>,
        content_height: Option<f32>,
        avail_content: Option<f32>,
    ) -> FlexLine {
        let node = self.node(id);
        let style = &node.style;
        let direction = style.flex_direction;
        let row = direction.is_row();
        let frame = style.frame();
        let base = Available {
            width: content_width,
            height: content_height,
        };

        let main_definite = if row { content_width } else { content_height };
        let cross_definite = if row { content_height } else { content_width };
        let main_avail = if row {
            content_width.or(avail_content)
        } else {
            content_height
        };
        let cross_avail = if row {
            content_height
        } else {
            content_width.or(avail_content)
        };
        let gap = if row { style.column_gap } else { style.row_gap };

        // STEP 1: Collect in-flow items.
        //
        // [§ 4 Flex Items](https://www.w3.org/TR/css-flexbox-1/#flex-items)
        let mut items: Vec<FlexItem> = node
            .children
            .iter()
            .filter_map(|&child| {
                let cs = &self.node(child).style;
                if cs.display == BoxDisplay::None || cs.is_absolute() {
                    return None;
                }
                let margin = cs.margin;
                let (outer_main, outer_cross) = if row {
                    (margin.horizontal(), margin.vertical())
                } else {
                    (margin.vertical(), margin.horizontal())
                };
                let align = cs.align_self.unwrap_or(style.align_items);
                let cross_dim = if row { cs.height } else { cs.width };
                let (min_main, max_main) = if row {
                    (cs.min_width, cs.max_width)
                } else {
                    (cs.min_height, cs.max_height)
                };
                let child_frame = cs.frame();
                let main_floor = if row {
                    child_frame.horizontal()
                } else {
                    child_frame.vertical()
                };
                Some(FlexItem {
                    id: child,
                    base_size: 0.0,
                    hypothetical_size: 0.0,
                    grow: cs.flex_grow,
                    shrink: cs.flex_shrink,
                    min_main: min_main.resolve(main_definite).unwrap_or(0.0).max(main_floor),
                    max_main: max_main.resolve(main_definite).unwrap_or(f32::INFINITY),
                    target_size: 0.0,
                    frozen: false,
                    outer_main,
                    outer_cross,
                    cross_size: 0.0,
                    align,
                    stretch: align == AlignItems::Stretch && cross_dim.is_auto(),
                })
            })
            .collect();

        let gaps = gap * items.len().saturating_sub(1) as f32;

        // STEP 2 (column only): cross sizes come first, since an item's
        // height depends on the width it is laid out at.
        let mut line_cross = 0.0_f32;
        if !row {
            for item in &mut items {
                let cs = &self.node(item.id).style;
                item.cross_size = cs.width.resolve(base.width).unwrap_or_else(|| {
                    if item.stretch
                        && let Some(cross) = cross_definite
                    {
                        (cross - item.outer_cross).max(0.0)
                    } else {
                        self.measure_node(
                            item.id,
                            None,
                            cross_avail.map(|a| (a - item.outer_cross).max(0.0)),
                            base,
                        )
                        .width
                    }
                });
            }
            line_cross = cross_definite.unwrap_or_else(|| {
                items
                    .iter()
                    .map(|item| item.cross_size + item.outer_cross)
                    .fold(0.0, f32::max)
            });
            for item in items.iter_mut().filter(|item| item.stretch) {
                item.cross_size = (line_cross - item.outer_cross).max(0.0);
            }
        }

        // STEP 3: Determine flex base sizes.
        //
        // [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
        //
        //   A. If flex-basis is a definite length, use it.
        //   B. If flex-basis is auto and the item has a definite main size, use that.
        //   C. Otherwise, size the item from its content.
        for item in &mut items {
            let cs = &self.node(item.id).style;
            let main_dim = if row { cs.width } else { cs.height };
            let definite = cs
                .flex_basis
                .resolve(main_definite)
                .or_else(|| main_dim.resolve(main_definite));
            item.base_size = definite.unwrap_or_else(|| {
                if row {
                    self.measure_node(
                        item.id,
                        None,
                        main_avail.map(|a| (a - item.outer_main).max(0.0)),
                        base,
                    )
                    .width
                } else {
                    self.measure_node(item.id, Some(item.cross_size), None, base)
                        .height
                }
            });
            item.hypothetical_size = item.base_size.clamp(item.min_main, item.max_main.max(item.min_main));
            item.target_size = item.hypothetical_size;
        }

        // STEP 4: Resolve flexible lengths.
        //
        // A container whose main size is still being determined only shrinks
        // its items when they overflow the space on offer; it never grows them.
        if let Some(avail) = main_avail {
            let free_total = avail - gaps;
            let sum_outer_hypo: f32 = items
                .iter()
                .map(|item| item.hypothetical_size + item.outer_main)
                .sum();
            if main_definite.is_some() || sum_outer_hypo > free_total {
                resolve_flexible_lengths(&mut items, free_total);
            }
        }

        // STEP 5 (row only): cross sizes at the resolved main sizes.
        //
        // [§ 9.4 Cross Size Determination](https://www.w3.org/TR/css-flexbox-1/#algo-cross-item)
        if row {
            for item in &mut items {
                let cs = &self.node(item.id).style;
                item.cross_size = cs.height.resolve(base.height).unwrap_or_else(|| {
                    if item.stretch
                        && let Some(cross) = cross_definite
                    {
                        (cross - item.outer_cross).max(0.0)
                    } else {
                        self.measure_node(item.id, Some(item.target_size), None, base)
                            .height
                    }
                });
            }
            line_cross = cross_definite.unwrap_or_else(|| {
                items
                    .iter()
                    .map(|item| item.cross_size + item.outer_cross)
                    .fold(0.0, f32::max)
            });
            for item in items.iter_mut().filter(|item| item.stretch) {
                item.cross_size = (line_cross - item.outer_cross).max(0.0);
            }
        }

        // STEP 6: Used content size.
        //
        // [§ 9.9 Cross Size Determination](https://www.w3.org/TR/css-flexbox-1/#algo-cross-container)
        //
        // "If the cross size property is a definite size, use that; otherwise,
        // use the largest of the flex lines' cross sizes."
        let total_main: f32 = items
            .iter()
            .map(|item| item.target_size + item.outer_main)
            .sum::<f32>()
            + gaps;
        let main_used = main_definite.unwrap_or(total_main);
        let cross_used = cross_definite.unwrap_or(line_cross);

        // STEP 7: Main-axis and cross-axis alignment.
        //
        // [§ 9.5 Main-Axis Alignment](https://www.w3.org/TR/css-flexbox-1/#main-alignment)
        let free_space = (main_used - total_main).max(0.0);
        let (initial_offset, spacing) =
            compute_justify_offsets(style.justify_content, free_space, items.len());

        let mut cursor = initial_offset;
        let mut placed = Vec::with_capacity(items.len());
        for item in &items {
            let cs = &self.node(item.id).style;
            let margin = cs.margin;
            let (margin_main_start, margin_cross_start) = if row {
                (margin.left, margin.top)
            } else {
                (margin.top, margin.left)
            };

            let outer_size = item.target_size + item.outer_main;
            let main_pos = if direction.is_reverse() {
                main_used - cursor - outer_size + margin_main_start
            } else {
                cursor + margin_main_start
            };
            cursor += outer_size + gap + spacing;

            let cross_free = cross_used - item.cross_size - item.outer_cross;
            let cross_pos = margin_cross_start
                + match item.align {
                    AlignItems::Center => cross_free / 2.0,
                    AlignItems::FlexEnd => cross_free,
                    AlignItems::Stretch | AlignItems::FlexStart | AlignItems::Baseline => 0.0,
                };

            let (mut left, mut top, width, height) = if row {
                (main_pos, cross_pos, item.target_size, item.cross_size)
            } else {
                (cross_pos, main_pos, item.cross_size, item.target_size)
            };
            left += frame.left;
            top += frame.top;

            // [§ 3.4 Relative positioning](https://www.w3.org/TR/css-position-3/#relpos-insets)
            if cs.position == Position::Relative {
                let (dx, dy) = relative_offset(cs, content_width, content_height);
                left += dx;
                top += dy;
            }

            placed.push(PlacedItem {
                id: item.id,
                layout: ComputedLayout {
                    left,
                    top,
                    width,
                    height,
                },
            });
        }

        let content = if row {
            Size::new(main_used, cross_used)
        } else {
            Size::new(cross_used, main_used)
        };
        FlexLine { content, placed }
    }

    /// [§ 4 Absolute Positioning Layout Model](https://www.w3.org/TR/css-position-3/#abspos-layout)
    ///
    /// Place an out-of-flow child against the padding box of its parent.
    fn place_absolute(
        &self,
        child: NodeId,
        parent_style: &BoxStyle,
        parent_layout: ComputedLayout,
    ) -> ComputedLayout {
        let border = parent_style.border;
        let pad_width = (parent_layout.width - border.horizontal()).max(0.0);
        let pad_height = (parent_layout.height - border.vertical()).max(0.0);
        let base = Available::definite(pad_width, pad_height);

        let cs = &self.node(child).style;
        let margin = cs.margin;
        let left = cs.inset.left.resolve(Some(pad_width));
        let right = cs.inset.right.resolve(Some(pad_width));
        let top = cs.inset.top.resolve(Some(pad_height));
        let bottom = cs.inset.bottom.resolve(Some(pad_height));

        let width = match (cs.width.resolve(Some(pad_width)), left, right) {
            (Some(width), _, _) => width,
            (None, Some(left), Some(right)) => {
                (pad_width - left - right - margin.horizontal()).max(0.0)
            }
            _ => {
                let avail = pad_width - left.or(right).unwrap_or(0.0) - margin.horizontal();
                self.measure_node(child, None, Some(avail.max(0.0)), base).width
            }
        };
        let height = match (cs.height.resolve(Some(pad_height)), top, bottom) {
            (Some(height), _, _) => height,
            (None, Some(top), Some(bottom)) => {
                (pad_height - top - bottom - margin.vertical()).max(0.0)
            }
            _ => self.measure_node(child, Some(width), None, base).height,
        };

        let frame = parent_style.frame();
        let x = match (left, right) {
            (Some(left), _) => border.left + left + margin.left,
            (None, Some(right)) => border.left + pad_width - right - margin.right - width,
            (None, None) => frame.left + margin.left,
        };
        let y = match (top, bottom) {
            (Some(top), _) => border.top + top + margin.top,
            (None, Some(bottom)) => border.top + pad_height - bottom - margin.bottom - height,
            (None, None) => frame.top + margin.top,
        };

        ComputedLayout {
            left: x,
            top: y,
            width,
            height,
        }
    }
}

/// Offset applied to a relatively positioned box after flex placement.
fn relative_offset(style: &BoxStyle, base_width: Option<f32>, base_height: Option<f32>) -> (f32, f32) {
    let inset = style.inset;
    let dx = inset
        .left
        .resolve(base_width)
        .or_else(|| inset.right.resolve(base_width).map(|r| -r))
        .unwrap_or(0.0);
    let dy = inset
        .top
        .resolve(base_height)
        .or_else(|| inset.bottom.resolve(base_height).map(|b| -b))
        .unwrap_or(0.0);
    (dx, dy)
}

/// [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
///
/// Full iterative freeze-loop algorithm.
fn resolve_flexible_lengths(items: &mut [FlexItem], available_main: f32) {
    if items.is_empty() {
        return;
    }

    // STEP 1: "Determine the used flex factor."
    //
    // "If the sum of the outer hypothetical main sizes of all items on the
    // line is less than the flex container's inner main size, use the flex
    // grow factor for the rest of this algorithm; otherwise, use the flex
    // shrink factor."
    let sum_outer_hypo: f32 = items
        .iter()
        .map(|item| item.hypothetical_size + item.outer_main)
        .sum();
    let growing = sum_outer_hypo < available_main;

    // STEP 2: "Size inflexible items."
    for item in items.iter_mut() {
        let factor = if growing { item.grow } else { item.shrink };
        let freeze = factor == 0.0
            || (growing && item.base_size > item.hypothetical_size)
            || (!growing && item.base_size < item.hypothetical_size);
        item.target_size = item.hypothetical_size;
        if freeze {
            item.frozen = true;
        }
    }

    // STEP 3: "Calculate initial free space."
    let occupied = |items: &[FlexItem]| -> f32 {
        items
            .iter()
            .map(|item| {
                if item.frozen {
                    item.target_size + item.outer_main
                } else {
                    item.base_size + item.outer_main
                }
            })
            .sum()
    };
    let initial_free_space = available_main - occupied(items);

    // STEP 4: Loop until all items are frozen.
    loop {
        if items.iter().all(|item| item.frozen) {
            break;
        }

        let remaining_free = available_main - occupied(items);

        // "If the sum of the unfrozen flex factors is less than one,
        // multiply the initial free space by this sum."
        let unfrozen_factor_sum: f32 = items
            .iter()
            .filter(|item| !item.frozen)
            .map(|item| if growing { item.grow } else { item.shrink })
            .sum();

        let free_space = if unfrozen_factor_sum < 1.0 && unfrozen_factor_sum > 0.0 {
            let scaled = initial_free_space * unfrozen_factor_sum;
            if scaled.abs() < remaining_free.abs() {
                scaled
            } else {
                remaining_free
            }
        } else {
            remaining_free
        };

        // Distribute free space.
        if growing {
            let grow_sum: f32 = items
                .iter()
                .filter(|item| !item.frozen)
                .map(|item| item.grow)
                .sum();
            if grow_sum > 0.0 {
                for item in items.iter_mut().filter(|item| !item.frozen) {
                    let ratio = item.grow / grow_sum;
                    item.target_size = free_space.mul_add(ratio, item.base_size);
                }
            }
        } else {
            // "For every unfrozen item on the line, multiply its flex shrink
            // factor by its inner flex base size, and note this as its scaled
            // flex shrink factor."
            let scaled_shrink_sum: f32 = items
                .iter()
                .filter(|item| !item.frozen)
                .map(|item| item.shrink * item.base_size)
                .sum();
            if scaled_shrink_sum > 0.0 {
                for item in items.iter_mut().filter(|item| !item.frozen) {
                    let ratio = item.shrink * item.base_size / scaled_shrink_sum;
                    item.target_size = free_space.abs().mul_add(-ratio, item.base_size);
                }
            }
        }

        // Fix min/max violations and determine total violation.
        let mut total_violation = 0.0_f32;
        for item in items.iter_mut().filter(|item| !item.frozen) {
            let clamped = item
                .target_size
                .min(item.max_main)
                .max(item.min_main);
            total_violation += clamped - item.target_size;
            item.target_size = clamped;
        }

        // "If the total violation is:
        //   - Zero: freeze all items.
        //   - Positive: freeze all items with min violations.
        //   - Negative: freeze all items with max violations."
        if total_violation.abs() < 0.01 {
            for item in items.iter_mut() {
                item.frozen = true;
            }
        } else if total_violation > 0.0 {
            for item in items.iter_mut().filter(|item| !item.frozen) {
                if item.target_size <= item.min_main + 0.01 {
                    item.frozen = true;
                }
            }
        } else {
            for item in items.iter_mut().filter(|item| !item.frozen) {
                if item.target_size >= item.max_main - 0.01 {
                    item.frozen = true;
                }
            }
        }
    }
}

/// Compute justify-content alignment offsets.
///
/// [§ 8.2 Axis Alignment: the justify-content property](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
///
/// Returns `(initial_offset, extra_space_between_items)`.
fn compute_justify_offsets(keyword: JustifyContent, free_space: f32, item_count: usize) -> (f32, f32) {
    if item_count == 0 || free_space <= 0.0 {
        return (0.0, 0.0);
    }

    match keyword {
        JustifyContent::FlexStart => (0.0, 0.0),
        JustifyContent::FlexEnd => (free_space, 0.0),
        JustifyContent::Center => (free_space / 2.0, 0.0),
        // "If the leftover free-space is negative or there is only a single
        // flex item on the line, this value is identical to flex-start."
        JustifyContent::SpaceBetween => {
            if item_count <= 1 {
                (0.0, 0.0)
            } else {
                (0.0, free_space / (item_count - 1) as f32)
            }
        }
        JustifyContent::SpaceAround => {
            let gap = free_space / item_count as f32;
            (gap / 2.0, gap)
        }
        JustifyContent::SpaceEvenly => {
            let gap = free_space / (item_count + 1) as f32;
            (gap, gap)
        }
    }
}
