//! Deterministic page layout for the results report.
//!
//! Turns the static dimension texts and the current score matrix into
//! pages of abstract drawing instructions. Both report sinks consume
//! this output: the PDF renderer draws the instructions onto A4 pages,
//! tests assert on them directly. Nothing here reads the clock or any
//! randomness; identical inputs yield identical pages.

use crate::survey::contact::ContactRecord;
use crate::survey::domain::{Dimension, Role};
use crate::survey::scoring::ScoreMatrix;

const TITLE_SIZE: f64 = 22.0;
const STAMP_SIZE: f64 = 9.0;
const CONTACT_SIZE: f64 = 10.0;
const HEADING_SIZE: f64 = 14.0;
const HEADING_ADVANCE: f64 = 20.0;
const BODY_SIZE: f64 = 11.0;
const LINE_HEIGHT: f64 = 16.0;
const CONDENSED_HEADER_SIZE: f64 = 9.0;
const LABEL_SIZE: f64 = 10.0;
const BAR_HEIGHT: f64 = 8.0;
/// Label baseline drop plus bar and trailing gap for one role row.
const ROLE_ROW_ADVANCE: f64 = 26.0;
const SECTION_GAP: f64 = 18.0;
const CARD_PADDING: f64 = 12.0;
const FIRST_LABEL_DROP: f64 = 10.0;
/// Joined contact line longer than this is split into two lines.
const CONTACT_SPLIT_LIMIT: usize = 110;
const CONTACT_SEPARATOR: &str = "   |   ";

/// Page size and margins in points. Matches the document sink's A4
/// geometry; tests shrink it to force pagination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Lowest cursor position before a page break is taken.
    pub bottom_limit: f64,
}

impl PageGeometry {
    pub const A4: Self = Self {
        width: 595.28,
        height: 841.89,
        margin: 50.0,
        bottom_limit: 50.0,
    };

    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    fn top_start(&self) -> f64 {
        self.height - 60.0
    }
}

/// Knobs covering the behaviors that drifted between report revisions.
/// Defaults follow the refined profile: stamped, forced break before
/// the last dimension, card centered against its text block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub left_fraction: f64,
    pub gutter: f64,
    /// Wrap width of a full-width column; the left column wraps at
    /// `max(min_wrap_width, round(base_wrap_width × left_fraction))`.
    pub base_wrap_width: usize,
    pub min_wrap_width: usize,
    pub stamp_generated_at: bool,
    pub force_break_before_last: bool,
    pub center_card: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            left_fraction: 0.68,
            gutter: 12.0,
            base_wrap_width: 95,
            min_wrap_width: 40,
            stamp_generated_at: true,
            force_break_before_last: true,
            center_card: true,
        }
    }
}

impl LayoutConfig {
    pub fn wrap_width(&self) -> usize {
        let scaled = (self.base_wrap_width as f64 * self.left_fraction).round() as usize;
        scaled.max(self.min_wrap_width)
    }
}

/// Abstract color slot; each sink maps it to its own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Page,
    Ink,
    BarTrack,
    CardBorder,
    Bar(Role),
}

/// One drawing instruction. Coordinates are points with the origin at
/// the lower-left page corner; text y is the baseline, rect y the
/// bottom edge.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
        text: String,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        tint: Tint,
        filled: bool,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOps {
    pub ops: Vec<DrawOp>,
}

/// Laid-out document: drawing instructions per page plus the page each
/// dimension section starts on (in fixed dimension order).
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub pages: Vec<PageOps>,
    pub section_start_pages: [usize; 3],
}

/// Everything the layout consumes. The generation label is stamped
/// as-is and never feeds back into layout decisions.
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub title: &'a str,
    pub contact: &'a ContactRecord,
    pub matrix: &'a ScoreMatrix,
    pub generated_label: Option<&'a str>,
}

/// Width of the progress bar fill. A zero maximum yields a zero-width
/// fill rather than a division error.
pub fn bar_fill_width(value: u32, max_score: u32, bar_width: f64) -> f64 {
    if max_score == 0 {
        0.0
    } else {
        bar_width * (f64::from(value) / f64::from(max_score))
    }
}

/// Helvetica-ish advance estimate used only for right-aligning the
/// generation stamp; layout decisions never depend on it.
fn approx_text_width(text: &str, size: f64) -> f64 {
    0.5 * size * text.chars().count() as f64
}

pub fn lay_out(
    inputs: &ReportInputs<'_>,
    geometry: PageGeometry,
    config: LayoutConfig,
) -> DocumentLayout {
    let mut composer = Composer::new(inputs.title, geometry, config);

    composer.draw_masthead(inputs.generated_label);
    composer.draw_contact_block(inputs.contact);

    let dimensions = Dimension::ordered();
    let mut section_start_pages = [0usize; 3];
    for (position, dimension) in dimensions.iter().enumerate() {
        let is_last = position + 1 == dimensions.len();
        if config.force_break_before_last && is_last && !composer.at_page_top {
            composer.start_page();
        }
        section_start_pages[position] = composer.draw_section(*dimension, inputs.matrix);
    }

    DocumentLayout {
        pages: composer.pages,
        section_start_pages,
    }
}

struct Composer<'a> {
    title: &'a str,
    geometry: PageGeometry,
    config: LayoutConfig,
    pages: Vec<PageOps>,
    y: f64,
    at_page_top: bool,
}

impl<'a> Composer<'a> {
    fn new(title: &'a str, geometry: PageGeometry, config: LayoutConfig) -> Self {
        let mut composer = Self {
            title,
            geometry,
            config,
            pages: Vec::new(),
            y: geometry.top_start(),
            at_page_top: true,
        };
        composer.pages.push(PageOps::default());
        composer.paint_background();
        composer
    }

    fn page_index(&self) -> usize {
        self.pages.len() - 1
    }

    fn push(&mut self, op: DrawOp) {
        self.pages.last_mut().expect("at least one page").ops.push(op);
    }

    fn text(&mut self, x: f64, y: f64, size: f64, bold: bool, text: impl Into<String>) {
        self.push(DrawOp::Text {
            x,
            y,
            size,
            bold,
            text: text.into(),
        });
    }

    fn paint_background(&mut self) {
        let geometry = self.geometry;
        self.push(DrawOp::Rect {
            x: 0.0,
            y: 0.0,
            width: geometry.width,
            height: geometry.height,
            tint: Tint::Page,
            filled: true,
        });
    }

    /// Opens a continuation page: fresh background, condensed header
    /// (title only, small font), cursor back at the top margin.
    fn start_page(&mut self) {
        self.pages.push(PageOps::default());
        self.paint_background();
        let x = self.geometry.margin;
        let y = self.geometry.height - 40.0;
        let title = self.title.to_string();
        self.text(x, y, CONDENSED_HEADER_SIZE, false, title);
        self.y = self.geometry.top_start();
        self.at_page_top = true;
    }

    /// Breaks the page if fewer than `needed` points remain above the
    /// bottom limit.
    fn ensure(&mut self, needed: f64) {
        if self.y - needed < self.geometry.bottom_limit {
            self.start_page();
        }
    }

    fn draw_masthead(&mut self, generated_label: Option<&str>) {
        let margin = self.geometry.margin;
        let title = self.title.to_string();
        self.text(margin, self.y, TITLE_SIZE, true, title);
        if self.config.stamp_generated_at {
            if let Some(label) = generated_label {
                let x = self.geometry.width - margin - approx_text_width(label, STAMP_SIZE);
                self.text(x, self.y + 4.0, STAMP_SIZE, false, label);
            }
        }
        self.y -= 28.0;
        self.at_page_top = false;
    }

    /// Contact block under the masthead: one joined line, split in two
    /// when it would run past the width threshold.
    fn draw_contact_block(&mut self, contact: &ContactRecord) {
        let margin = self.geometry.margin;
        self.text(margin, self.y, CONTACT_SIZE, true, "Kontaktuppgifter");
        self.y -= 14.0;

        let fields = contact.summary_fields();
        let joined = fields.join(CONTACT_SEPARATOR);
        if joined.chars().count() > CONTACT_SPLIT_LIMIT {
            let mid = fields.len() / 2;
            let first = fields[..mid].join(CONTACT_SEPARATOR);
            let second = fields[mid..].join(CONTACT_SEPARATOR);
            self.text(margin, self.y, CONTACT_SIZE, false, first);
            self.y -= 14.0;
            self.text(margin, self.y, CONTACT_SIZE, false, second);
            self.y -= 8.0;
        } else {
            self.text(margin, self.y, CONTACT_SIZE, false, joined);
            self.y -= 14.0;
        }
    }

    fn card_width(&self) -> f64 {
        self.geometry.content_width() * (1.0 - self.config.left_fraction) - self.config.gutter
    }

    fn card_x(&self) -> f64 {
        self.geometry.margin
            + self.geometry.content_width() * self.config.left_fraction
            + self.config.gutter
    }

    fn card_height(&self) -> f64 {
        2.0 * CARD_PADDING + FIRST_LABEL_DROP + 3.0 * ROLE_ROW_ADVANCE
    }

    /// Lays out one dimension: wrapped body text in the left column,
    /// results card in the right. Returns the page the section starts
    /// on.
    ///
    /// Card page-split policy: the card is pinned to the page where the
    /// body text begins and centered against the portion of the text on
    /// that page; `ensure` below guarantees room for the whole card, so
    /// it never crosses a page boundary.
    fn draw_section(&mut self, dimension: Dimension, matrix: &ScoreMatrix) -> usize {
        let margin = self.geometry.margin;
        let wrap_width = self.config.wrap_width();
        let lines: Vec<String> = dimension
            .body_text()
            .split("\n\n")
            .flat_map(|paragraph| textwrap::wrap(paragraph, wrap_width))
            .map(|line| line.into_owned())
            .collect();

        self.ensure(HEADING_ADVANCE + self.card_height());
        let start_page = self.page_index();
        let title = dimension.title().to_string();
        self.text(margin, self.y, HEADING_SIZE, true, title);
        self.y -= HEADING_ADVANCE;
        self.at_page_top = false;

        let text_top = self.y;
        let capacity =
            (((text_top - self.geometry.bottom_limit) / LINE_HEIGHT).floor()).max(0.0) as usize;
        let lines_on_first_page = lines.len().min(capacity);
        let first_block_height = lines_on_first_page as f64 * LINE_HEIGHT;

        let card_top = if self.config.center_card {
            // Midpoints of card and first-page text block aligned.
            (text_top - (first_block_height - self.card_height()) / 2.0).min(text_top)
        } else {
            text_top
        };
        let card_end = card_top - self.card_height();
        self.draw_card(dimension, matrix, card_top);

        for line in lines {
            self.ensure(LINE_HEIGHT);
            self.text(margin, self.y, BODY_SIZE, false, line);
            self.y -= LINE_HEIGHT;
        }

        // Next section starts below whichever column reaches lower,
        // unless the text ran onto a later page than the card.
        if self.page_index() == start_page {
            self.y = self.y.min(card_end);
        }
        self.y -= SECTION_GAP;
        start_page
    }

    fn draw_card(&mut self, dimension: Dimension, matrix: &ScoreMatrix, card_top: f64) {
        let card_x = self.card_x();
        let card_width = self.card_width();
        let card_height = self.card_height();
        let bar_width = card_width - 2.0 * CARD_PADDING;
        let max_score = dimension.max_score();

        self.push(DrawOp::Rect {
            x: card_x,
            y: card_top - card_height,
            width: card_width,
            height: card_height,
            tint: Tint::CardBorder,
            filled: false,
        });

        let inner_x = card_x + CARD_PADDING;
        let mut cursor = card_top - CARD_PADDING - FIRST_LABEL_DROP;
        for role in Role::ordered() {
            let value = matrix.score_or_zero(dimension, role);
            let label = format!("{}: {} poäng", role.label(), value);
            self.text(inner_x, cursor, LABEL_SIZE, true, label);
            cursor -= 12.0;
            self.push(DrawOp::Rect {
                x: inner_x,
                y: cursor,
                width: bar_width,
                height: BAR_HEIGHT,
                tint: Tint::BarTrack,
                filled: true,
            });
            let fill = bar_fill_width(value, max_score, bar_width);
            if fill > 0.0 {
                self.push(DrawOp::Rect {
                    x: inner_x,
                    y: cursor,
                    width: fill,
                    height: BAR_HEIGHT,
                    tint: Tint::Bar(role),
                    filled: true,
                });
            }
            cursor -= 14.0;
        }
        let max_label = format!("Max: {} poäng", max_score);
        self.text(inner_x, cursor, LABEL_SIZE, true, max_label);
    }
}
