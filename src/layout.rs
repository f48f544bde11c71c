//! Content geometry: flattened rows, section extents, visibility.
//!
//! The catalog is flattened once into a list of renderable rows with a
//! recorded extent per section. From the extents plus the current scroll
//! offset the layout derives the visibility observations the scroll spy
//! consumes, playing the role a platform intersection observer would.
//! Geometry is width independent; rendering truncates long lines.

use crate::catalog::Catalog;
use crate::scrollspy::{Observation, RootMargin, ScrollPort};

/// One renderable content row
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Blank,
    SectionTitle(String),
    Description(String),
    SubsectionTitle(String),
    /// Top frame of a code block, carrying the language tag and optional title
    CodeTop {
        language: String,
        title: Option<String>,
    },
    CodeLine(String),
    CodeBottom,
    TipHeader,
    Tip(String),
    WarningHeader,
    Warning(String),
}

/// Vertical span of one section in content rows
#[derive(Debug, Clone)]
pub struct SectionExtent {
    pub id: String,
    pub top: i32,
    pub height: i32,
}

/// Flattened content with per-section extents
#[derive(Debug)]
pub struct ContentLayout {
    pub rows: Vec<Row>,
    extents: Vec<SectionExtent>,
}

impl ContentLayout {
    pub fn build(catalog: &Catalog) -> Self {
        let mut rows = Vec::new();
        let mut extents = Vec::new();

        for section in &catalog.sections {
            let top = rows.len() as i32;

            rows.push(Row::SectionTitle(section.title.clone()));
            if !section.description.is_empty() {
                rows.push(Row::Description(section.description.clone()));
            }
            rows.push(Row::Blank);

            for sub in &section.subsections {
                rows.push(Row::SubsectionTitle(sub.title.clone()));
                if !sub.description.is_empty() {
                    rows.push(Row::Description(sub.description.clone()));
                }
                for example in &sub.examples {
                    rows.push(Row::CodeTop {
                        language: example.language.clone(),
                        title: example.title.clone(),
                    });
                    for line in example.code.lines() {
                        rows.push(Row::CodeLine(line.to_string()));
                    }
                    rows.push(Row::CodeBottom);
                }
                if !sub.tips.is_empty() {
                    rows.push(Row::TipHeader);
                    for tip in &sub.tips {
                        rows.push(Row::Tip(tip.clone()));
                    }
                }
                if !sub.warnings.is_empty() {
                    rows.push(Row::WarningHeader);
                    for warning in &sub.warnings {
                        rows.push(Row::Warning(warning.clone()));
                    }
                }
                rows.push(Row::Blank);
            }

            extents.push(SectionExtent {
                id: section.id.clone(),
                top,
                height: rows.len() as i32 - top,
            });
        }

        Self { rows, extents }
    }

    /// Total content height in rows
    pub fn total_rows(&self) -> i32 {
        self.rows.len() as i32
    }

    /// Absolute content row of a section's first line
    pub fn section_top(&self, id: &str) -> Option<i32> {
        self.extents.iter().find(|e| e.id == id).map(|e| e.top)
    }

    pub fn extents(&self) -> &[SectionExtent] {
        &self.extents
    }

    /// Produce the visibility batch for the current frame. The viewport is
    /// inset by the root-margin fractions to a reading band; each section's
    /// ratio is the fraction of its rows inside that band.
    pub fn observe(
        &self,
        scroll_offset: i32,
        viewport_height: i32,
        margin: &RootMargin,
        threshold: f64,
    ) -> Vec<Observation> {
        let band_top = (viewport_height as f64 * margin.top).round() as i32;
        let band_bottom = viewport_height - (viewport_height as f64 * margin.bottom).round() as i32;

        self.extents
            .iter()
            .map(|extent| {
                let top = extent.top - scroll_offset;
                let bottom = top + extent.height;
                let visible = (bottom.min(band_bottom) - top.max(band_top)).max(0);
                let ratio = if extent.height > 0 {
                    visible as f64 / extent.height as f64
                } else {
                    0.0
                };
                Observation {
                    id: extent.id.clone(),
                    is_intersecting: visible > 0 && ratio >= threshold,
                    ratio,
                    top,
                }
            })
            .collect()
    }
}

/// Scroll position with a fire-and-forget smooth animation toward an
/// optional target. Manual scrolling cancels the animation.
#[derive(Debug, Default)]
pub struct ScrollState {
    offset: f64,
    target: Option<f64>,
    max: f64,
}

impl ScrollState {
    /// Update the scrollable range for the current content and viewport
    pub fn set_bounds(&mut self, total_rows: i32, viewport_height: i32) {
        self.max = (total_rows - viewport_height).max(0) as f64;
        self.offset = self.offset.clamp(0.0, self.max);
        if let Some(target) = self.target {
            self.target = Some(target.clamp(0.0, self.max));
        }
    }

    /// Current offset as a whole row
    pub fn row_offset(&self) -> i32 {
        self.offset.round() as i32
    }

    /// Step the offset by a row delta, cancelling any smooth scroll
    pub fn scroll_by(&mut self, delta: i32) {
        self.target = None;
        self.offset = (self.offset + delta as f64).clamp(0.0, self.max);
    }

    /// Jump instantly, cancelling any smooth scroll
    pub fn jump_to(&mut self, row: i32) {
        self.target = None;
        self.offset = (row as f64).clamp(0.0, self.max);
    }

    pub fn jump_to_bottom(&mut self) {
        self.target = None;
        self.offset = self.max;
    }

    /// Begin a smooth scroll toward the given row
    pub fn smooth_scroll_to(&mut self, row: i32) {
        self.target = Some((row as f64).clamp(0.0, self.max));
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Advance the animation one frame: a quarter of the remaining
    /// distance, at least one row, snapping at the end.
    pub fn tick(&mut self) {
        let Some(target) = self.target else {
            return;
        };
        let distance = target - self.offset;
        if distance.abs() <= 0.5 {
            self.offset = target;
            self.target = None;
            return;
        }
        let step = (distance * 0.25).abs().max(1.0).min(distance.abs());
        self.offset += step.copysign(distance);
    }

    /// Scroll progress for the status line, 0 to 100
    pub fn percent(&self) -> u16 {
        if self.max <= 0.0 {
            return 100;
        }
        ((self.offset / self.max) * 100.0).round() as u16
    }
}

/// Borrowed pair of layout and scroll state, implementing the scroll
/// port the spy navigates through
pub struct LayoutPort<'a> {
    pub layout: &'a ContentLayout,
    pub scroll: &'a mut ScrollState,
}

impl ScrollPort for LayoutPort<'_> {
    fn section_top(&self, id: &str) -> Option<i32> {
        self.layout.section_top(id)
    }

    fn scroll_to(&mut self, row: i32) {
        self.scroll.smooth_scroll_to(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CodeExample, Section, Subsection};

    fn sample_catalog() -> Catalog {
        Catalog {
            sections: vec![
                Section {
                    id: "first".to_string(),
                    title: "First".to_string(),
                    description: "One".to_string(),
                    subsections: vec![Subsection {
                        id: "first-sub".to_string(),
                        title: "Sub".to_string(),
                        description: String::new(),
                        examples: vec![CodeExample {
                            title: None,
                            language: "rust".to_string(),
                            code: "let x = 1;\nlet y = 2;".to_string(),
                        }],
                        tips: vec!["use let".to_string()],
                        warnings: vec![],
                    }],
                },
                Section {
                    id: "second".to_string(),
                    title: "Second".to_string(),
                    description: String::new(),
                    subsections: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_extents_are_contiguous_and_ordered() {
        let layout = ContentLayout::build(&sample_catalog());
        let extents = layout.extents();
        assert_eq!(extents.len(), 2);
        assert_eq!(extents[0].top, 0);
        assert_eq!(extents[0].top + extents[0].height, extents[1].top);
        assert_eq!(
            extents[1].top + extents[1].height,
            layout.total_rows()
        );
        assert_eq!(layout.section_top("second"), Some(extents[1].top));
        assert_eq!(layout.section_top("missing"), None);
    }

    #[test]
    fn test_code_lines_flattened() {
        let layout = ContentLayout::build(&sample_catalog());
        let code_lines: Vec<&Row> = layout
            .rows
            .iter()
            .filter(|r| matches!(r, Row::CodeLine(_)))
            .collect();
        assert_eq!(code_lines.len(), 2);
    }

    #[test]
    fn test_observe_full_visibility_inside_band() {
        let layout = ContentLayout::build(&sample_catalog());
        let margin = RootMargin { top: 0.0, bottom: 0.0 };
        // Viewport tall enough to hold everything
        let batch = layout.observe(0, layout.total_rows() + 10, &margin, 0.1);
        assert!(batch.iter().all(|o| o.is_intersecting));
        assert!((batch[0].ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(batch[0].top, 0);
    }

    #[test]
    fn test_observe_scrolled_out_section_not_intersecting() {
        let layout = ContentLayout::build(&sample_catalog());
        let margin = RootMargin { top: 0.0, bottom: 0.0 };
        let first_height = layout.extents()[0].height;
        // Scroll the whole first section above the viewport
        let batch = layout.observe(first_height, 10, &margin, 0.1);
        let first = &batch[0];
        assert!(!first.is_intersecting);
        assert_eq!(first.ratio, 0.0);
        assert_eq!(first.top, -first_height);
    }

    #[test]
    fn test_observe_root_margin_shrinks_band() {
        let layout = ContentLayout::build(&sample_catalog());
        let wide = RootMargin { top: 0.0, bottom: 0.0 };
        let narrow = RootMargin { top: 0.2, bottom: 0.35 };
        let viewport = 10;
        let open = layout.observe(0, viewport, &wide, 0.0);
        let inset = layout.observe(0, viewport, &narrow, 0.0);
        assert!(inset[0].ratio <= open[0].ratio);
    }

    #[test]
    fn test_observe_threshold_gates_intersection() {
        let layout = ContentLayout::build(&sample_catalog());
        let margin = RootMargin { top: 0.0, bottom: 0.0 };
        // Only one row of the first section visible
        let scroll = layout.extents()[0].height - 1;
        let low = layout.observe(scroll, 40, &margin, 0.0);
        let high = layout.observe(scroll, 40, &margin, 0.9);
        assert!(low[0].is_intersecting);
        assert!(!high[0].is_intersecting);
    }

    #[test]
    fn test_smooth_scroll_converges_and_stops() {
        let mut scroll = ScrollState::default();
        scroll.set_bounds(200, 20);
        scroll.smooth_scroll_to(100);
        assert!(scroll.is_animating());
        for _ in 0..200 {
            scroll.tick();
        }
        assert_eq!(scroll.row_offset(), 100);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_manual_scroll_cancels_animation() {
        let mut scroll = ScrollState::default();
        scroll.set_bounds(200, 20);
        scroll.smooth_scroll_to(100);
        scroll.scroll_by(1);
        assert!(!scroll.is_animating());
        assert_eq!(scroll.row_offset(), 1);
    }

    #[test]
    fn test_scroll_clamped_to_bounds() {
        let mut scroll = ScrollState::default();
        scroll.set_bounds(30, 20);
        scroll.scroll_by(-5);
        assert_eq!(scroll.row_offset(), 0);
        scroll.scroll_by(500);
        assert_eq!(scroll.row_offset(), 10);
        scroll.jump_to_bottom();
        assert_eq!(scroll.row_offset(), 10);
        assert_eq!(scroll.percent(), 100);
    }
}
