// File-explorer demo: a side panel over a real directory snapshot with
// modal navigation. Ctrl+Shift+E toggles navigation mode, Ctrl+Shift+B
// toggles the panel itself, `q` quits.
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use tracing::Level;

use tui_sidenav::{
    GlobalChord, HostShell, NavController, NavEvent, NavKey, PanelModel, PanelStyle, TreePanel,
    TreePanelState, decode_global, decode_nav,
};

struct DemoArgs {
    root: PathBuf,
    max_depth: usize,
}

impl DemoArgs {
    fn usage() {
        eprintln!("Usage: demo [PATH] [-d DEPTH]");
        eprintln!("  PATH    directory to browse (default: current dir)");
        eprintln!("  DEPTH   how deep to scan (default: 3)");
    }

    fn parse() -> Self {
        let mut path: Option<PathBuf> = None;
        let mut depth: Option<usize> = None;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    Self::usage();
                    std::process::exit(0);
                }
                "-d" | "--depth" => {
                    if let Some(value) = args.next() {
                        depth = value.parse().ok();
                    }
                }
                _ => {
                    if path.is_none() {
                        path = Some(PathBuf::from(arg));
                    }
                }
            }
        }

        let root =
            path.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        Self {
            root,
            max_depth: depth.unwrap_or(3),
        }
    }
}

struct DemoHost {
    panel_open: bool,
    opened: Option<PathBuf>,
}

impl HostShell for DemoHost {
    fn expand_panel(&mut self) {
        self.panel_open = true;
    }

    fn collapse_panel(&mut self) {
        self.panel_open = false;
    }

    fn panel_collapsed(&self) -> bool {
        !self.panel_open
    }

    fn active_document(&self) -> Option<PathBuf> {
        self.opened.clone()
    }

    fn open_document(&mut self, path: &Path) -> bool {
        self.opened = Some(path.to_path_buf());
        true
    }

    fn set_mode_marker(&mut self, _active: bool) {
        // The marker is drawn from `NavController::is_active` each frame.
    }
}

fn build_model(root: &Path, max_depth: usize) -> PanelModel {
    let mut model = PanelModel::new();
    build_children(&mut model, None, root, 0, max_depth);
    model
}

fn build_children(
    model: &mut PanelModel,
    parent: Option<usize>,
    path: &Path,
    depth: usize,
    max_depth: usize,
) {
    if depth >= max_depth {
        return;
    }

    let Ok(read_dir) = fs::read_dir(path) else {
        return;
    };
    let mut entries: Vec<(String, PathBuf, bool)> = read_dir
        .filter_map(Result::ok)
        .map(|entry| {
            let is_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            (
                entry.file_name().to_string_lossy().to_string(),
                entry.path(),
                is_dir,
            )
        })
        .collect();

    entries.sort_by(|a, b| {
        if a.2 == b.2 {
            a.0.cmp(&b.0)
        } else if a.2 {
            std::cmp::Ordering::Less
        } else {
            std::cmp::Ordering::Greater
        }
    });

    for (name, entry_path, is_dir) in entries {
        if is_dir {
            let id = model.add_folder(parent, &name);
            build_children(model, Some(id), &entry_path, depth + 1, max_depth);
        } else {
            model.add_file(parent, &name);
        }
    }
}

fn panel_style(title: String) -> PanelStyle<'static> {
    PanelStyle {
        title: Some(Line::from(title)),
        base: Style::default()
            .fg(Color::Rgb(221, 227, 235))
            .bg(Color::Rgb(24, 28, 36)),
        border_style: Style::default().fg(Color::Rgb(92, 110, 140)),
        active_border_style: Style::default()
            .fg(Color::Rgb(136, 192, 208))
            .add_modifier(Modifier::BOLD),
        highlight_style: Style::default()
            .fg(Color::Rgb(255, 255, 255))
            .bg(Color::Rgb(52, 66, 96))
            .add_modifier(Modifier::BOLD),
        highlight_symbol: "> ",
        borders: Borders::ALL,
    }
}

fn render(
    frame: &mut Frame,
    panel: &mut TreePanelState,
    style: &PanelStyle<'static>,
    host: &DemoHost,
    nav: &NavController<usize>,
) {
    let area = frame.area();
    let main = if host.panel_open {
        let [panel_area, main_area] =
            Layout::horizontal([Constraint::Length(34), Constraint::Min(1)]).areas(area);
        let widget = TreePanel::new(style.clone()).nav_active(nav.is_active());
        frame.render_stateful_widget(widget, panel_area, panel);
        main_area
    } else {
        area
    };

    render_main(frame, main, host, nav);
}

fn render_main(frame: &mut Frame, area: Rect, host: &DemoHost, nav: &NavController<usize>) {
    let mode = if nav.is_active() {
        "NAV  j/k move · l/Enter open · h up · gg top · G bottom · zM fold all · Esc leave"
    } else {
        "Ctrl+Shift+E navigate the panel · Ctrl+Shift+B toggle panel · q quit"
    };
    let opened = host
        .opened
        .as_ref()
        .map_or_else(|| "nothing opened yet".to_string(), |p| p.display().to_string());

    let text = vec![
        Line::from(format!("opened: {opened}")),
        Line::from(""),
        Line::from(mode),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title("tui-sidenav demo");
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn run_app(mut terminal: DefaultTerminal, mut panel: TreePanelState, title: String) -> io::Result<()> {
    let style = panel_style(title);
    let mut host = DemoHost {
        panel_open: true,
        opened: None,
    };
    let mut nav: NavController<usize> = NavController::new();

    loop {
        terminal.draw(|frame| render(frame, &mut panel, &style, &host, &nav))?;
        nav.tick(&mut panel, &mut host, Instant::now());

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let now = Instant::now();
                if let Some(chord) = decode_global(key) {
                    match chord {
                        GlobalChord::ToggleNavigation => {
                            nav.toggle_mode(&mut panel, &mut host, now);
                        }
                        GlobalChord::TogglePanel => {
                            host.panel_open = !host.panel_open;
                            nav.on_panel_toggle(now);
                        }
                    }
                    continue;
                }
                let Some(nav_key) = decode_nav(key) else {
                    continue;
                };
                if nav.handle_key(&mut panel, &mut host, nav_key, now) == NavEvent::Handled {
                    continue;
                }
                if nav_key == NavKey::Char('q') && !nav.is_active() {
                    break;
                }
            }
            Event::Resize(_, _) => nav.on_resize(&mut panel, &mut host),
            _ => {}
        }
    }

    nav.teardown(&mut panel, &mut host);
    Ok(())
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(io::stderr)
        .init();

    let args = DemoArgs::parse();
    if !args.root.is_dir() {
        eprintln!("Path is not a directory: {}", args.root.display());
        return Ok(());
    }

    let model = build_model(&args.root, args.max_depth);
    let panel = TreePanelState::new(model);
    let title = args.root.display().to_string();

    let terminal = ratatui::init();
    let result = run_app(terminal, panel, title);
    ratatui::restore();
    result
}
