use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};
use starfield_background::{Animation, PixelCanvas, StarfieldEngine, StarfieldView};
use starfield_config::Config;
use starfield_core::Size;
use tracing::{debug, info};

use crate::host::TerminalHost;

mod host;
mod logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    logging::init(&config.logging)?;
    let terminal = ratatui::init();
    let result = App::new(config).and_then(|app| app.run(terminal));
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Show the key help line.
    show_help: bool,
    /// The starfield bound to its raster.
    animation: Animation<PixelCanvas>,
    /// Frame and resize source.
    host: TerminalHost,
}

impl App {
    /// Construct a new instance of [`App`] sized to the current terminal.
    pub fn new(config: Config) -> color_eyre::Result<Self> {
        let (columns, rows) = crossterm::terminal::size()?;
        let host = TerminalHost::new(
            columns,
            rows,
            config.display.pixel_scale,
            config.display.fps,
        );
        let canvas = PixelCanvas::new(Size::ZERO, host.pixel_scale());
        Ok(Self {
            running: false,
            show_help: config.display.show_help,
            animation: Animation::new(StarfieldEngine::new(config.starfield), canvas),
            host,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.animation.mount(&mut self.host);
        while self.running {
            self.handle_crossterm_events()?;
            if let Some(id) = self.host.due_frame(Instant::now())
                && self.animation.on_frame(&mut self.host, id)
            {
                terminal.draw(|frame| self.render(frame))?;
            }
        }
        self.animation.unmount(&mut self.host);
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(StarfieldView::new(self.animation.surface()), area);

        if self.show_help {
            let [_, help_area] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
            let key = Color::Rgb(150, 170, 230);
            let help = Line::from(vec![
                "q".bold().fg(key),
                " quit  ".dark_gray(),
                "r".bold().fg(key),
                " reseed  ".dark_gray(),
                "h".bold().fg(key),
                " hide help".dark_gray(),
            ])
            .centered();
            frame.render_widget(help, help_area);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Blocks at most until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self.host.time_until_frame(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(columns, rows) => self.on_resize(columns, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r')) => self.reseed(),
            (_, KeyCode::Char('h')) => self.toggle_help(),
            _ => {}
        }
    }

    /// Forward a terminal resize to the animation.
    fn on_resize(&mut self, columns: u16, rows: u16) {
        self.host.set_terminal_size(columns, rows);
        debug!(columns, rows, "terminal resized");
        if self.host.has_resize_listeners() {
            self.animation.on_resize(&mut self.host);
        }
    }

    /// Replace the star field without resizing.
    fn reseed(&mut self) {
        self.animation.engine_mut().reseed();
        info!("star field reseeded");
    }

    /// Show or hide the key help line.
    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
