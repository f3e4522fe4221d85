//! Places panel pane: renders panel content fragments into the terminal.
//!
//! Geometry is computed by pure functions shared with the hit map, so the
//! rectangles the renderer draws into are exactly the rectangles mouse
//! clicks are resolved against.

use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use placedeck_core::{CardFragment, DetailFragment, GalleryFragment, ImageSlot, PanelContent};

use crate::theme::{Icons, Theme};

/// Header line plus spacer above the first card.
pub const GALLERY_HEADER_ROWS: u16 = 2;
/// Rows used by a card's image strip (bordered frame).
pub const CARD_IMAGE_ROWS: u16 = 3;
/// Blank rows between cards.
pub const CARD_GAP_ROWS: u16 = 1;

/// Content area inside the panel border.
#[must_use]
pub fn panel_inner(area: Rect) -> Rect {
    area.inner(Margin::new(1, 1))
}

/// Geometry of one rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardBox {
    pub place_id: String,
    pub card: Rect,
    pub image: Rect,
    pub body: Rect,
    pub tags_line: Option<Rect>,
    pub rating_line: Option<Rect>,
}

/// Lay out the visible cards of a gallery, top to bottom in result order.
///
/// `scroll` skips leading cards; a card that would not fit fully is not
/// laid out at all. Card heights vary with the optional tags and rating
/// lines.
#[must_use]
pub fn gallery_boxes(gallery: &GalleryFragment, inner: Rect, scroll: usize) -> Vec<CardBox> {
    let mut boxes = Vec::new();
    let mut y = inner.y + GALLERY_HEADER_ROWS;
    let bottom = inner.y + inner.height;

    for card in gallery.cards.iter().skip(scroll) {
        let extra = u16::from(card.tags.is_some()) + u16::from(card.rating.is_some());
        let body_rows = 2 + extra;
        let height = CARD_IMAGE_ROWS + body_rows;
        if y + height > bottom {
            break;
        }

        let body_y = y + CARD_IMAGE_ROWS;
        let tags_line = card
            .tags
            .is_some()
            .then(|| Rect::new(inner.x, body_y + 2, inner.width, 1));
        let rating_line = card
            .rating
            .is_some()
            .then(|| Rect::new(inner.x, body_y + 2 + u16::from(card.tags.is_some()), inner.width, 1));

        boxes.push(CardBox {
            place_id: card.place_id.clone(),
            card: Rect::new(inner.x, y, inner.width, height),
            image: Rect::new(inner.x, y, inner.width, CARD_IMAGE_ROWS),
            body: Rect::new(inner.x, body_y, inner.width, body_rows),
            tags_line,
            rating_line,
        });
        y += height + CARD_GAP_ROWS;
    }

    boxes
}

/// Truncate a string to a display width, ellipsizing when it does not fit.
fn fit_to_width(text: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let total: usize = text.chars().map(|ch| ch.width().unwrap_or(0)).sum();
    if total <= max {
        return text.to_string();
    }

    let budget = max - 1;
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Last path segment of an image source, for the compact card frame.
fn source_label(slot: &ImageSlot) -> &str {
    slot.src().rsplit('/').next().unwrap_or("")
}

/// The places panel.
pub struct PanelPane<'a> {
    content: &'a PanelContent,
    theme: &'a Theme,
    icons: Icons,
    selected: usize,
    scroll: usize,
}

impl<'a> PanelPane<'a> {
    pub fn new(content: &'a PanelContent, theme: &'a Theme) -> Self {
        Self {
            content,
            theme,
            icons: Icons::default(),
            selected: 0,
            scroll: 0,
        }
    }

    /// Set ASCII mode for plain terminals.
    #[must_use]
    pub fn icons(mut self, icons: Icons) -> Self {
        self.icons = icons;
        self
    }

    /// Index of the selected card (gallery mode).
    #[must_use]
    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    /// Number of leading cards scrolled out of view.
    #[must_use]
    pub fn scroll(mut self, scroll: usize) -> Self {
        self.scroll = scroll;
        self
    }

    fn title(&self) -> &'static str {
        match self.content {
            PanelContent::Detail(_) => " Place ",
            _ => " Places ",
        }
    }

    fn render_image_frame(&self, slot: &ImageSlot, area: Rect, buf: &mut Buffer) {
        let frame = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.muted));
        let inner = frame.inner(area);
        frame.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let label = fit_to_width(source_label(slot), inner.width as usize);
        let style = if slot.fallback_armed() {
            Style::default().fg(self.theme.subtext)
        } else {
            // The one-shot fallback has fired; make the degradation visible.
            Style::default().fg(self.theme.warning)
        };
        Paragraph::new(Line::from(Span::styled(label, style)))
            .centered()
            .render(Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1), buf);
    }

    fn render_empty(&self, inner: Rect, buf: &mut Buffer) {
        if inner.height < 2 {
            return;
        }
        Paragraph::new(Line::from(Span::styled(
            "No places yet",
            Style::default().fg(self.theme.muted),
        )))
        .centered()
        .render(Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1), buf);
    }

    fn render_detail(&self, detail: &DetailFragment, inner: Rect, buf: &mut Buffer) {
        if inner.height < 3 {
            return;
        }
        self.render_image_frame(&detail.image, inner, buf);

        // Caption overlays the bottom row inside the image frame.
        let caption_area = Rect::new(inner.x + 1, inner.y + inner.height - 2, inner.width.saturating_sub(2), 1);
        let caption = fit_to_width(&detail.caption, caption_area.width as usize);
        Paragraph::new(Line::from(Span::styled(
            caption,
            Style::default()
                .fg(self.theme.text)
                .add_modifier(Modifier::BOLD),
        )))
        .centered()
        .render(caption_area, buf);
    }

    fn render_card(&self, card: &CardFragment, cbox: &CardBox, selected: bool, buf: &mut Buffer) {
        self.render_image_frame(&card.image, cbox.image, buf);

        let width = cbox.body.width as usize;
        let title_style = if selected {
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.text)
        };

        let marker = if selected {
            format!("{} ", self.icons.selected())
        } else {
            "  ".to_string()
        };
        let title = fit_to_width(&format!("{marker}{}", card.title), width);
        buf.set_string(cbox.body.x, cbox.body.y, title, title_style);

        let city = fit_to_width(
            &format!("  {} {}", self.icons.city(), card.city),
            width,
        );
        buf.set_string(
            cbox.body.x,
            cbox.body.y + 1,
            city,
            Style::default().fg(self.theme.subtext),
        );

        if let (Some(tags), Some(line)) = (&card.tags, cbox.tags_line) {
            let text = fit_to_width(&format!("  {} {tags}", self.icons.tags()), width);
            buf.set_string(line.x, line.y, text, Style::default().fg(self.theme.muted));
        }

        if let (Some(rating), Some(line)) = (card.rating, cbox.rating_line) {
            let text = fit_to_width(&format!("  {} {rating}", self.icons.rating()), width);
            buf.set_string(line.x, line.y, text, Style::default().fg(self.theme.success));
        }
    }

    fn render_gallery(&self, gallery: &GalleryFragment, inner: Rect, buf: &mut Buffer) {
        if inner.height < GALLERY_HEADER_ROWS {
            return;
        }
        let header = fit_to_width(&gallery.header, inner.width as usize);
        buf.set_string(
            inner.x,
            inner.y,
            header,
            Style::default()
                .fg(self.theme.primary)
                .add_modifier(Modifier::BOLD),
        );

        for (offset, cbox) in gallery_boxes(gallery, inner, self.scroll).iter().enumerate() {
            let index = self.scroll + offset;
            self.render_card(&gallery.cards[index], cbox, index == self.selected, buf);
        }
    }
}

impl Widget for PanelPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title())
            .title_style(Style::default().fg(self.theme.primary))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));
        let inner = block.inner(area);
        block.render(area, buf);

        match self.content {
            PanelContent::Empty => self.render_empty(inner, buf),
            PanelContent::Detail(detail) => self.render_detail(detail, inner, buf),
            PanelContent::Gallery(gallery) => self.render_gallery(gallery, inner, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::render_widget_to_string;
    use placedeck_core::{render_content, Assets, Place, ResultSet};

    fn gallery_content() -> PanelContent {
        let mut paris = Place::with_id("p1");
        paris.name = Some("Paris".into());
        let mut tokyo = Place::with_id("p2");
        tokyo.name = Some("Tokyo".into());
        tokyo.rating = Some(4.5);
        render_content(
            &ResultSet::Many(vec![paris, tokyo]),
            &Assets::default(),
        )
    }

    #[test]
    fn test_gallery_renders_cards_in_order() {
        let content = gallery_content();
        let theme = Theme::default();
        let rendered = render_widget_to_string(PanelPane::new(&content, &theme), 40, 24);

        assert!(rendered.contains("Places"));
        let paris = rendered.find("Paris").unwrap();
        let tokyo = rendered.find("Tokyo").unwrap();
        assert!(paris < tokyo);
    }

    #[test]
    fn test_rating_line_only_where_rated() {
        let content = gallery_content();
        let theme = Theme::default();
        let rendered = render_widget_to_string(
            PanelPane::new(&content, &theme).icons(Icons::new(true)),
            40,
            24,
        );

        assert!(rendered.contains("* 4.5"));
        assert_eq!(rendered.matches("* 4").count(), 1);
    }

    #[test]
    fn test_detail_shows_caption_and_source() {
        let mut place = Place::with_id("p1");
        place.name = Some("Paris".into());
        place.filename = Some("https://x/paris.jpg".into());
        let content = render_content(&ResultSet::Single(place), &Assets::default());
        let theme = Theme::default();
        let rendered = render_widget_to_string(PanelPane::new(&content, &theme), 40, 16);

        assert!(rendered.contains("Place"));
        assert!(rendered.contains("Paris"));
        assert!(rendered.contains("paris.jpg"));
    }

    #[test]
    fn test_empty_panel_placeholder() {
        let theme = Theme::default();
        let rendered =
            render_widget_to_string(PanelPane::new(&PanelContent::Empty, &theme), 30, 10);
        assert!(rendered.contains("No places yet"));
    }

    #[test]
    fn test_gallery_boxes_track_optional_lines() {
        let PanelContent::Gallery(gallery) = gallery_content() else {
            panic!("expected gallery");
        };
        let inner = Rect::new(1, 1, 38, 30);
        let boxes = gallery_boxes(&gallery, inner, 0);

        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].place_id, "p1");
        assert!(boxes[0].rating_line.is_none());
        // Tokyo has a rating, so its card is one row taller.
        assert_eq!(boxes[1].card.height, boxes[0].card.height + 1);
        assert!(boxes[1].rating_line.is_some());
    }

    #[test]
    fn test_gallery_boxes_stop_at_the_bottom() {
        let PanelContent::Gallery(gallery) = gallery_content() else {
            panic!("expected gallery");
        };
        // Room for the header and one card only.
        let inner = Rect::new(0, 0, 38, 8);
        let boxes = gallery_boxes(&gallery, inner, 0);
        assert_eq!(boxes.len(), 1);

        // Scrolling brings the second card into the single slot.
        let boxes = gallery_boxes(&gallery, inner, 1);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].place_id, "p2");
    }

    #[test]
    fn test_fit_to_width() {
        assert_eq!(fit_to_width("short", 10), "short");
        let fitted = fit_to_width("a very long place name", 10);
        assert!(fitted.ends_with('…'));
        assert!(fitted.chars().count() <= 10);
    }
}
