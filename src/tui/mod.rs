pub mod widgets;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::rngs::StdRng;
use ratatui::prelude::*;
use ratatui::widgets::Tabs;
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::browse::{random_text_count, BrowseState};
use crate::catalog::Catalog;
use crate::pipeline::select::ForegroundSelector;

use widgets::{info_line, PaletteStripWidget, PreviewWidget, EMPTY_PALETTE_MESSAGE};

/// User intents, decoupled from the keys that trigger them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NextCategory,
    PreviousCategory,
    NextPalette,
    PreviousPalette,
    CycleColor,
    Quit,
}

/// Map a key press to an action.
pub fn action_for(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Tab => Some(Action::NextCategory),
        KeyCode::BackTab => Some(Action::PreviousCategory),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::NextPalette),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PreviousPalette),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::CycleColor),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// State for the interactive preview.
pub struct App {
    pub catalog: Catalog,
    pub state: BrowseState,
    pub selector: ForegroundSelector,
    pub text: String,
    pub should_quit: bool,
    rng: StdRng,
}

impl App {
    pub fn new(
        catalog: Catalog,
        state: BrowseState,
        selector: ForegroundSelector,
        text: String,
        rng: StdRng,
    ) -> Self {
        Self {
            catalog,
            state,
            selector,
            text,
            should_quit: false,
            rng,
        }
    }

    pub fn apply(&mut self, action: Action) {
        let catalog = &self.catalog;
        self.state = match action {
            Action::NextCategory => self.state.next_category(catalog),
            Action::PreviousCategory => self.state.previous_category(catalog),
            Action::NextPalette => {
                let text_count = random_text_count(&mut self.rng);
                self.state.next_palette(catalog, text_count)
            }
            Action::PreviousPalette => {
                let text_count = random_text_count(&mut self.rng);
                self.state.previous_palette(catalog, text_count)
            }
            Action::CycleColor => self.state.cycle_color(catalog),
            Action::Quit => {
                self.should_quit = true;
                self.state
            }
        };
        debug!(?action, state = ?self.state, "browse transition");
    }

    /// Render one frame.
    pub fn draw(&self, frame: &mut Frame) {
        let [preview_area, info_area, tabs_area, strip_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(8),
        ])
        .areas(frame.area());

        if self.catalog.is_empty() {
            frame.render_widget(PreviewWidget::new(None, &self.text), preview_area);
            return;
        }

        // A loaded catalog can still select a palette without colors
        let preview = self.state.preview(&self.catalog, &self.selector);
        frame.render_widget(
            PreviewWidget::new(preview.as_ref(), &self.text).placeholder(EMPTY_PALETTE_MESSAGE),
            preview_area,
        );
        if let Some(preview) = &preview {
            frame.render_widget(info_line(preview), info_area);
        }

        let titles: Vec<String> = self
            .catalog
            .categories
            .iter()
            .map(|category| category.name.clone())
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.state.category)
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, tabs_area);

        if let Some(category) = self.catalog.category(self.state.category) {
            frame.render_widget(
                PaletteStripWidget::new(category, self.state.palette, self.state.color_index),
                strip_area,
            );
        }
    }
}

/// Launch the interactive preview and block until the user quits.
pub fn run(mut app: App) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut app);
    ratatui::restore();
    result
}

fn event_loop(terminal: &mut DefaultTerminal, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| app.draw(frame))?;
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = action_for(key.code) {
                app.apply(action);
            }
        }
    }
    Ok(())
}
