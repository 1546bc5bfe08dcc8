//! Greedy, receipt-style pagination.
//!
//! One line per item, top to bottom at a fixed pitch. When the cursor falls
//! below the bottom margin the next line opens a new page at the top margin.
//! There is no reflow and no widow/orphan control.

/// A4 in points.
pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;

pub const MARGIN_LEFT: f32 = 50.0;
pub const MARGIN_TOP: f32 = 50.0;
pub const MARGIN_BOTTOM: f32 = 50.0;

pub const LINE_PITCH: f32 = 20.0;
pub const BODY_FONT_SIZE: f32 = 11.0;

pub const TITLE: &str = "Shopping List";
pub const TITLE_FONT_SIZE: f32 = 16.0;
/// Space between the title baseline and the first item.
pub const TITLE_GAP: f32 = 30.0;

/// A line of text at an absolute position (PDF coordinates, origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Lay out `lines` below a title on the first page.
///
/// Always returns at least one page (holding the title).
pub fn paginate<I>(lines: I) -> Vec<Page>
where
    I: IntoIterator<Item = String>,
{
    let top = PAGE_HEIGHT - MARGIN_TOP;
    let mut pages = Vec::new();
    let mut current = Page::default();

    current.lines.push(PlacedLine {
        x: MARGIN_LEFT,
        y: top,
        font_size: TITLE_FONT_SIZE,
        text: TITLE.to_string(),
    });
    let mut y = top - TITLE_GAP;

    for text in lines {
        if y < MARGIN_BOTTOM {
            pages.push(std::mem::take(&mut current));
            y = top;
        }
        current.lines.push(PlacedLine {
            x: MARGIN_LEFT,
            y,
            font_size: BODY_FONT_SIZE,
            text,
        });
        y -= LINE_PITCH;
    }

    pages.push(current);
    pages
}
