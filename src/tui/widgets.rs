use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::browse::Preview;
use crate::catalog::PaletteCategory;
use crate::color::Color as AppColor;

const SWATCH_WIDTH: u16 = 6;
const SWATCH_GAP: u16 = 1;

pub const LOADING_MESSAGE: &str = "Loading palettes…";
pub const EMPTY_PALETTE_MESSAGE: &str = "This palette has no colors";

fn to_color(c: &AppColor) -> Color {
    let (r, g, b) = c.to_rgb8();
    Color::Rgb(r, g, b)
}

/// Choose black or white for markers drawn on top of a swatch.
fn marker_fg(c: &AppColor) -> Color {
    if c.relative_luminance() > 0.4 {
        Color::Black
    } else {
        Color::White
    }
}

/// The sample text area: background fill plus one line per sample, each in
/// its selected foreground. Without a preview it shows a placeholder
/// message, [`LOADING_MESSAGE`] unless another one is set.
pub struct PreviewWidget<'a> {
    preview: Option<&'a Preview>,
    text: &'a str,
    placeholder: &'a str,
}

impl<'a> PreviewWidget<'a> {
    pub fn new(preview: Option<&'a Preview>, text: &'a str) -> Self {
        Self {
            preview,
            text,
            placeholder: LOADING_MESSAGE,
        }
    }

    pub fn placeholder(mut self, message: &'a str) -> Self {
        self.placeholder = message;
        self
    }
}

impl Widget for PreviewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(preview) = self.preview else {
            let placeholder = Paragraph::new(self.placeholder)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            placeholder.render(centered_rows(area, 1), buf);
            return;
        };

        let bg = to_color(&preview.background);
        buf.set_style(area, Style::default().bg(bg));

        let lines: Vec<Line> = match &preview.foregrounds {
            Ok(_) => (0..preview.text_count)
                .filter_map(|i| preview.line_color(i))
                .map(|fg| {
                    Line::styled(
                        self.text.to_string(),
                        Style::default().fg(to_color(&fg)).add_modifier(Modifier::BOLD),
                    )
                })
                .collect(),
            Err(err) => vec![Line::styled(
                err.to_string(),
                Style::default().fg(marker_fg(&preview.background)),
            )],
        };

        let rows = centered_rows(area, lines.len() as u16);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(bg))
            .render(rows, buf);
    }
}

/// A horizontally centered band of `height` rows in the middle of `area`.
fn centered_rows(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let top = area.y + (area.height - height) / 2;
    Rect::new(area.x, top, area.width, height)
}

/// Every palette of a category as a column of stacked swatches. The
/// selected palette is marked below its column and its background color is
/// marked inside the swatch.
pub struct PaletteStripWidget<'a> {
    category: &'a PaletteCategory,
    selected_palette: usize,
    selected_color: usize,
}

impl<'a> PaletteStripWidget<'a> {
    pub fn new(category: &'a PaletteCategory, selected_palette: usize, selected_color: usize) -> Self {
        Self {
            category,
            selected_palette,
            selected_color,
        }
    }
}

impl Widget for PaletteStripWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(self.category.name.as_str());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 || inner.width < SWATCH_WIDTH {
            return;
        }

        let swatch_rows = inner.height - 1;
        let visible = ((inner.width + SWATCH_GAP) / (SWATCH_WIDTH + SWATCH_GAP)).max(1) as usize;
        // Scroll so the selected palette stays on screen
        let first = (self.selected_palette + 1).saturating_sub(visible);

        for (column, (index, palette)) in self
            .category
            .palettes
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .enumerate()
        {
            let x = inner.x + column as u16 * (SWATCH_WIDTH + SWATCH_GAP);
            let colors = palette.decoded();
            let selected = index == self.selected_palette;

            if !colors.is_empty() {
                let mut marked = false;
                for row in 0..swatch_rows {
                    let color_index = row as usize * colors.len() / swatch_rows as usize;
                    let color = &colors[color_index];
                    let swatch = Rect::new(x, inner.y + row, SWATCH_WIDTH, 1);
                    buf.set_style(swatch, Style::default().bg(to_color(color)));

                    if selected && color_index == self.selected_color && !marked {
                        buf.set_string(
                            x + SWATCH_WIDTH / 2 - 1,
                            inner.y + row,
                            "●",
                            Style::default().fg(marker_fg(color)),
                        );
                        marked = true;
                    }
                }
            }

            if selected {
                buf.set_string(
                    x + SWATCH_WIDTH / 2 - 1,
                    inner.y + swatch_rows,
                    "▲",
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                );
            }
        }
    }
}

/// Status line: palette name, background, and each foreground with its
/// contrast ratio.
pub fn info_line(preview: &Preview) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(
        " {}  bg {} ",
        preview.palette, preview.background
    ))];
    match &preview.foregrounds {
        Ok(colors) => {
            for color in colors {
                let ratio = AppColor::contrast_ratio(color, &preview.background);
                spans.push(Span::styled(
                    "  ",
                    Style::default().bg(to_color(color)),
                ));
                spans.push(Span::raw(format!(" {color} {ratio:.1}:1 ")));
            }
        }
        Err(err) => spans.push(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        )),
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NamedPalette;
    use crate::color::{BLACK, WHITE};
    use crate::pipeline::select::SelectError;

    fn preview() -> Preview {
        Preview {
            category: "Bold".to_string(),
            palette: "Primary".to_string(),
            background: BLACK,
            text_count: 3,
            foregrounds: Ok(vec![WHITE, AppColor::from_rgb8(255, 0, 0)]),
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.x + buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn preview_fills_background_and_colors_lines() {
        let preview = preview();
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(Some(&preview), "Hi").render(area, &mut buf);

        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 0));
        // Three lines centered vertically in five rows: y = 1, 2, 3
        assert!(row_text(&buf, 1).contains("Hi"));
        assert!(row_text(&buf, 3).contains("Hi"));

        let first = row_text(&buf, 1).find("Hi").unwrap() as u16;
        assert_eq!(buf[(first, 1)].fg, Color::Rgb(255, 255, 255));
        assert_eq!(buf[(first, 2)].fg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(first, 3)].fg, Color::Rgb(255, 255, 255));
    }

    #[test]
    fn preview_shows_selection_error() {
        let mut preview = preview();
        preview.foregrounds = Err(SelectError::NoLegibleColor {
            background: "#000000".to_string(),
            min_contrast: 30.0,
            attempts: 20,
        });
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(Some(&preview), "Hi").render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("no legible color"));
    }

    #[test]
    fn missing_preview_shows_placeholder() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(None, "Hi").render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("Loading palettes"));
    }

    #[test]
    fn placeholder_message_can_be_replaced() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        PreviewWidget::new(None, "Hi")
            .placeholder(EMPTY_PALETTE_MESSAGE)
            .render(area, &mut buf);
        assert!(row_text(&buf, 1).contains("no colors"));
        assert!(!row_text(&buf, 1).contains("Loading"));
    }

    #[test]
    fn strip_marks_selected_palette_and_color() {
        let category = PaletteCategory {
            name: "Test".to_string(),
            palettes: vec![
                NamedPalette {
                    name: "One".to_string(),
                    colors: vec!["#ff0000".into(), "#0000ff".into()],
                },
                NamedPalette {
                    name: "Two".to_string(),
                    colors: vec!["#00ff00".into()],
                },
            ],
        };
        // Inner area: 20 x 4, three swatch rows plus the marker row
        let area = Rect::new(0, 0, 22, 6);
        let mut buf = Buffer::empty(area);
        PaletteStripWidget::new(&category, 1, 0).render(area, &mut buf);

        // First column: red on top, blue at the bottom
        assert_eq!(buf[(1, 1)].bg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(1, 3)].bg, Color::Rgb(0, 0, 255));
        // Second column starts after one swatch and a gap
        let second = 1 + SWATCH_WIDTH + SWATCH_GAP;
        assert_eq!(buf[(second, 1)].bg, Color::Rgb(0, 255, 0));
        assert_eq!(buf[(second + SWATCH_WIDTH / 2 - 1, 1)].symbol(), "●");
        assert_eq!(buf[(second + SWATCH_WIDTH / 2 - 1, 4)].symbol(), "▲");
        assert_eq!(buf[(1 + SWATCH_WIDTH / 2 - 1, 4)].symbol(), " ");
    }

    #[test]
    fn strip_scrolls_to_selected_palette() {
        let palettes = (0..6)
            .map(|i| NamedPalette {
                name: format!("P{i}"),
                colors: vec!["#ffffff".into()],
            })
            .collect();
        let category = PaletteCategory {
            name: "Many".to_string(),
            palettes,
        };
        // Room for two columns only
        let area = Rect::new(0, 0, 15, 4);
        let mut buf = Buffer::empty(area);
        PaletteStripWidget::new(&category, 5, 0).render(area, &mut buf);
        let second = 1 + SWATCH_WIDTH + SWATCH_GAP;
        assert_eq!(buf[(second + SWATCH_WIDTH / 2 - 1, 2)].symbol(), "▲");
    }

    #[test]
    fn info_line_lists_ratios() {
        let text: String = info_line(&preview())
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert!(text.contains("Primary"));
        assert!(text.contains("bg #000000"));
        assert!(text.contains("#ffffff 21.0:1"));
        assert!(text.contains("#ff0000 5.3:1"));
    }
}
