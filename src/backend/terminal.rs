//! The crossterm terminal session: raw mode, event translation, rendering.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    queue,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};

use cellbrush::canvas::{CellBuffer, Color};
use cellbrush::config::Config;
use cellbrush::input::{Buttons, Key, Modifiers, MouseButton, Painter};
use cellbrush::session;
use cellbrush::ui;
use cellbrush::util::{self, Pos};

/// Second click within this window on the same cell counts as a
/// double-click (terminals report no native one).
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Rows below the canvas reserved for the status bar and the prompt or
/// message line.
const RESERVED_ROWS: u16 = 2;

/// Runs the interactive painting session until the user quits.
pub fn run(config: Config, open: Option<PathBuf>) -> Result<()> {
    let (term_cols, term_rows) = terminal::size().context("Failed to query terminal size")?;
    let width = config
        .canvas
        .width
        .unwrap_or((term_cols as i32).max(4));
    let height = config
        .canvas
        .height
        .unwrap_or((term_rows.saturating_sub(RESERVED_ROWS) as i32).max(4));

    let mut buffer = CellBuffer::new(width, height);
    if let Some(path) = &open {
        load_into(&mut buffer, path)?;
    }

    let fg = util::parse_color(&config.drawing.default_color).unwrap_or(Color::default());
    let action_map = config
        .keybindings
        .build_action_map()
        .map_err(|err| anyhow::anyhow!("Invalid keybindings: {err}"))?;

    let mut painter = Painter::with_defaults(
        buffer,
        fg,
        config.drawing.default_resolution,
        config.ui.show_status_bar,
        config.export.clone(),
        action_map,
    );
    painter.show_help = config.ui.show_help_on_start;

    let session = TerminalSession::enter().context("Failed to initialize the terminal")?;
    let result = event_loop(&mut painter);

    // Park the cursor at the bottom-right of the canvas before restoring
    // the terminal.
    let park = Pos::new(painter.buffer.width() - 1, painter.buffer.height() - 1);
    session.leave(park);
    result
}

/// Restores a snapshot into the session canvas as one undo group.
fn load_into(buffer: &mut CellBuffer, path: &Path) -> Result<()> {
    let loaded = session::snapshot::load(path)?;
    buffer.undo_group_start();
    buffer.blit(Pos::new(0, 0), &loaded);
    buffer.undo_group_end();
    info!(
        "Loaded {} into a {}x{} canvas",
        path.display(),
        buffer.width(),
        buffer.height()
    );
    Ok(())
}

/// RAII guard for the native terminal state.
struct TerminalSession;

impl TerminalSession {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        queue!(out, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        out.flush()?;
        Ok(Self)
    }

    fn leave(self, park: Pos) {
        let mut out = io::stdout();
        // Best-effort restore; failures here have nowhere to go.
        let _ = queue!(
            out,
            cursor::MoveTo(park.x.max(0) as u16, park.y.max(0) as u16),
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = out.flush();
        let _ = terminal::disable_raw_mode();
    }
}

fn event_loop(painter: &mut Painter) -> Result<()> {
    let mut out = io::stdout();
    let mut last_click: Option<(Pos, Instant)> = None;

    render(&mut out, painter)?;
    painter.needs_redraw = false;

    loop {
        match event::read().context("Failed to read terminal event")? {
            Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                let (key, mods) = map_key(key_event);
                painter.on_key_press(key, mods);
            }
            Event::Mouse(mouse) => dispatch_mouse(painter, mouse, &mut last_click),
            Event::Resize(_, _) => painter.needs_redraw = true,
            _ => {}
        }

        if painter.should_exit {
            debug!("exit requested");
            return Ok(());
        }
        if painter.needs_redraw {
            render(&mut out, painter)?;
            painter.needs_redraw = false;
        }
    }
}

fn dispatch_mouse(
    painter: &mut Painter,
    mouse: MouseEvent,
    last_click: &mut Option<(Pos, Instant)>,
) {
    let cell = Pos::new(mouse.column as i32, mouse.row as i32);
    match mouse.kind {
        MouseEventKind::Down(button) => {
            let button = map_button(button);
            if button == MouseButton::Left {
                let now = Instant::now();
                let is_double = matches!(
                    *last_click,
                    Some((pos, at)) if pos == cell && now.duration_since(at) < DOUBLE_CLICK_WINDOW
                );
                if is_double {
                    *last_click = None;
                    painter.on_mouse_double_click(cell);
                    return;
                }
                *last_click = Some((cell, now));
            }
            painter.on_mouse_press(button, cell);
        }
        MouseEventKind::Up(button) => painter.on_mouse_release(map_button(button), cell),
        MouseEventKind::Drag(button) => {
            painter.on_mouse_motion(cell, Buttons::from(map_button(button)));
        }
        MouseEventKind::Moved => painter.on_mouse_motion(cell, Buttons::empty()),
        _ => {}
    }
}

fn map_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Left,
        event::MouseButton::Right => MouseButton::Right,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}

fn map_key(key: KeyEvent) -> (Key, Modifiers) {
    let mods = Modifiers {
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        shift: key.modifiers.contains(KeyModifiers::SHIFT),
        alt: key.modifiers.contains(KeyModifiers::ALT),
    };
    let key = match key.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Return,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::F(10) => Key::F10,
        KeyCode::F(12) => Key::F12,
        _ => Key::Unknown,
    };
    (key, mods)
}

fn to_term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Draws the canvas, the reversed cursor cell, the status bar and any
/// prompt or message line, then the help overlay on top.
fn render(out: &mut impl Write, painter: &Painter) -> Result<()> {
    let cursor_cell = painter.cell_position();

    for (y, row) in painter.buffer.rows().enumerate() {
        queue!(out, cursor::MoveTo(0, y as u16))?;
        for (x, cell) in row.iter().enumerate() {
            let under_cursor = cursor_cell == Pos::new(x as i32, y as i32);
            if under_cursor {
                queue!(out, SetAttribute(Attribute::Reverse))?;
            }
            queue!(out, SetForegroundColor(to_term_color(cell.fg)), Print(cell.ch))?;
            if under_cursor {
                queue!(out, SetAttribute(Attribute::NoReverse))?;
            }
        }
    }
    queue!(out, ResetColor)?;

    let status_row = painter.buffer.height() as u16;
    queue!(out, cursor::MoveTo(0, status_row), Clear(ClearType::CurrentLine))?;
    if painter.show_status_bar {
        queue!(out, Print(ui::status_line(painter)))?;
    }

    let info_row = status_row + 1;
    queue!(out, cursor::MoveTo(0, info_row), Clear(ClearType::CurrentLine))?;
    if let Some(line) = ui::prompt_line(painter) {
        queue!(out, Print(line))?;
    } else if let Some(message) = ui::message_line(painter) {
        queue!(out, Print(message))?;
    }

    if painter.show_help {
        for (i, line) in ui::help_lines().iter().enumerate() {
            queue!(
                out,
                cursor::MoveTo(2, 1 + i as u16),
                Print(format!(" {line} "))
            )?;
        }
    }

    out.flush()?;
    Ok(())
}
