use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, StatefulWidget, Widget};

use crate::panel::TreePanelState;
use crate::tree::TreeView;

/// Row glyphs for the panel.
#[derive(Clone, Copy)]
pub struct PanelGlyphs<'a> {
    pub indent: &'a str,
    pub leaf: &'a str,
    pub expanded: &'a str,
    pub collapsed: &'a str,
}

impl PanelGlyphs<'static> {
    pub const fn unicode() -> Self {
        Self {
            indent: "  ",
            leaf: "•",
            expanded: "▼",
            collapsed: "▶",
        }
    }

    pub const fn ascii() -> Self {
        Self {
            indent: "  ",
            leaf: "*",
            expanded: "v",
            collapsed: ">",
        }
    }
}

/// Visual settings for the panel widget.
#[derive(Clone)]
pub struct PanelStyle<'a> {
    pub title: Option<Line<'a>>,
    pub base: Style,
    pub border_style: Style,
    /// Border style while navigation mode is on (the visible mode marker).
    pub active_border_style: Style,
    pub highlight_style: Style,
    pub highlight_symbol: &'a str,
    pub borders: Borders,
}

impl Default for PanelStyle<'_> {
    fn default() -> Self {
        Self {
            title: None,
            base: Style::default(),
            border_style: Style::default(),
            active_border_style: Style::default(),
            highlight_style: Style::default(),
            highlight_symbol: "> ",
            borders: Borders::ALL,
        }
    }
}

/// Tree side panel widget.
///
/// Renders the visible rows of a [`TreePanelState`] with depth indentation
/// and expand/collapse glyphs, applies the highlight style to the row the
/// navigation session has marked, and records the viewport height the state
/// needs for its scrolling math.
pub struct TreePanel<'a> {
    style: PanelStyle<'a>,
    glyphs: PanelGlyphs<'a>,
    nav_active: bool,
}

impl<'a> TreePanel<'a> {
    pub const fn new(style: PanelStyle<'a>) -> Self {
        Self {
            style,
            glyphs: PanelGlyphs::unicode(),
            nav_active: false,
        }
    }

    pub const fn glyphs(mut self, glyphs: PanelGlyphs<'a>) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Marks the panel as being under modal navigation.
    pub const fn nav_active(mut self, active: bool) -> Self {
        self.nav_active = active;
        self
    }
}

impl StatefulWidget for TreePanel<'_> {
    type State = TreePanelState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if self.nav_active {
            self.style.active_border_style
        } else {
            self.style.border_style
        };
        let mut block = Block::default()
            .borders(self.style.borders)
            .style(self.style.base)
            .border_style(border_style);
        if let Some(title) = self.style.title.clone() {
            block = block.title(title);
        }
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let rows = state.visible_rows();
        state.set_viewport_rows(inner.height as usize);
        state.clamp_offset(rows.len());

        let symbol_pad = " ".repeat(self.style.highlight_symbol.chars().count());
        for (line_no, row) in rows
            .iter()
            .skip(state.offset())
            .take(inner.height as usize)
            .enumerate()
        {
            let model = state.model();
            let highlighted = state.highlighted() == Some(row.id);
            let glyph = if model.is_folder(row.id) {
                if state.is_collapsed(row.id) {
                    self.glyphs.collapsed
                } else {
                    self.glyphs.expanded
                }
            } else {
                self.glyphs.leaf
            };

            let mut spans = Vec::with_capacity(row.level as usize + 4);
            spans.push(Span::raw(if highlighted {
                self.style.highlight_symbol
            } else {
                symbol_pad.as_str()
            }));
            for _ in 0..row.level {
                spans.push(Span::raw(self.glyphs.indent));
            }
            spans.push(Span::raw(glyph));
            spans.push(Span::raw(" "));
            spans.push(Span::raw(model.name(row.id)));

            let y = inner.y + line_no as u16;
            buf.set_line(inner.x, y, &Line::from(spans), inner.width);
            if highlighted {
                buf.set_style(
                    Rect {
                        x: inner.x,
                        y,
                        width: inner.width,
                        height: 1,
                    },
                    self.style.highlight_style,
                );
            }
        }
    }
}
