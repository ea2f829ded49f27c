use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::info;

use crate::config::GameConfig;
use crate::constants::OBSTACLE_LIP_HEIGHT;
use crate::state::{EXIT_BUTTON, GameState, Mode, START_BUTTON};
use crate::types::{Rect, Vector2D};

// --- Draw request: what to show this frame, in world units ---

/// Semantic paint role. Backends pick the actual glyph and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Background,
    Ground,
    Obstacle,
    ObstacleLip,
    Avatar,
    Beak,
    Button,
    ButtonMuted,
    ButtonHover,
    PrimaryText,
    WarningText,
    HighlightText,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub y: f64, // Top of the line; text is centred horizontally
    pub role: Role,
}

impl TextLine {
    fn new(text: impl Into<String>, y: f64, role: Role) -> Self {
        TextLine { text: text.into(), y, role }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub rect: Rect,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub mode: Mode,
    pub avatar: Option<(Vector2D, f64)>,
    pub obstacles: Vec<[Rect; 2]>, // [upper, lower]
    pub ground: Option<Rect>,
    pub buttons: Vec<Button>,
    pub text: Vec<TextLine>,
    pub banner: Option<TextLine>,
}

pub fn build_frame(state: &GameState) -> Frame {
    let config = &state.config;
    let mid = config.world_height / 2.0;
    let mut frame = Frame {
        mode: state.mode,
        avatar: None,
        obstacles: Vec::new(),
        ground: None,
        buttons: Vec::new(),
        text: Vec::new(),
        banner: None,
    };

    match state.mode {
        Mode::Menu => {
            frame.text.push(TextLine::new("Flappy Bird", 150.0, Role::PrimaryText));
            let hovered = |rect: &Rect| state.pointer.is_some_and(|p| rect.contains(p));
            frame.buttons.push(Button {
                label: "Start",
                rect: START_BUTTON,
                role: if hovered(&START_BUTTON) { Role::ButtonHover } else { Role::Button },
            });
            frame.buttons.push(Button {
                label: "Exit",
                rect: EXIT_BUTTON,
                role: if hovered(&EXIT_BUTTON) { Role::ButtonHover } else { Role::ButtonMuted },
            });
        }
        Mode::Playing => {
            frame.avatar = Some((state.avatar.position, state.avatar.radius));
            frame.obstacles = state.obstacles.iter().map(|pair| pair.rects()).collect();
            frame.ground = Some(ground_rect(config));
            frame.text.push(TextLine::new(
                format!("Level: {}  Score: {}", state.scoreboard.level, state.scoreboard.score),
                20.0,
                Role::PrimaryText,
            ));
            if state.scoreboard.banner_active() {
                frame.banner = Some(TextLine::new("LEVEL UP!", mid - 60.0, Role::HighlightText));
            }
        }
        Mode::GameOver => {
            frame.banner = Some(TextLine::new("GAME OVER", mid - 60.0, Role::WarningText));
            frame.text.push(TextLine::new(
                format!("Level Reached: {}", state.scoreboard.level),
                mid - 10.0,
                Role::PrimaryText,
            ));
            frame.text.push(TextLine::new(
                format!("Score: {}", state.scoreboard.score),
                mid + 15.0,
                Role::PrimaryText,
            ));
            frame.text.push(TextLine::new("Press SPACE to Restart", mid + 40.0, Role::PrimaryText));
            frame.text.push(TextLine::new("Press ESC for Menu", mid + 70.0, Role::PrimaryText));
        }
    }
    frame
}

fn ground_rect(config: &GameConfig) -> Rect {
    Rect::new(0.0, config.floor_y(), config.world_width, config.ground_height)
}

/// Decorative bands on the gap side of each rect. Not collidable.
fn obstacle_lips(upper: &Rect, lower: &Rect) -> [Rect; 2] {
    [
        Rect::new(upper.x, upper.bottom(), upper.width, OBSTACLE_LIP_HEIGHT),
        Rect::new(lower.x, lower.top() - OBSTACLE_LIP_HEIGHT, lower.width, OBSTACLE_LIP_HEIGHT),
    ]
}

// --- Viewport: world units to terminal cells and back ---
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub columns: u16,
    pub rows: u16,
    pub world_width: f64,
    pub world_height: f64,
}

impl Viewport {
    pub fn new(columns: u16, rows: u16, config: &GameConfig) -> Self {
        Viewport {
            columns: columns.max(1),
            rows: rows.max(1),
            world_width: config.world_width,
            world_height: config.world_height,
        }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns.max(1);
        self.rows = rows.max(1);
        info!("Viewport resized to {}x{}", self.columns, self.rows);
    }

    fn cell_width(&self) -> f64 {
        self.world_width / self.columns as f64
    }

    fn cell_height(&self) -> f64 {
        self.world_height / self.rows as f64
    }

    /// World position at the centre of a cell.
    pub fn to_world(&self, column: u16, row: u16) -> Vector2D {
        Vector2D::new(
            (column as f64 + 0.5) * self.cell_width(),
            (row as f64 + 0.5) * self.cell_height(),
        )
    }

    /// Cell containing a world position, if it lies on screen.
    pub fn to_cell(&self, position: Vector2D) -> Option<(u16, u16)> {
        let column = (position.x / self.cell_width()).floor();
        let row = (position.y / self.cell_height()).floor();
        if column < 0.0 || row < 0.0 || column >= self.columns as f64 || row >= self.rows as f64 {
            return None;
        }
        Some((column as u16, row as u16))
    }
}

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    cursor_x: u16,
    cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn clear(&mut self) {
        self.buffer = vec![vec![' '; self.width as usize]; self.height as usize];
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn row_text(&self, y: u16) -> String {
        self.buffer
            .get(y as usize)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    /// Styling and terminal-mode commands. The screen buffer has no use for them.
    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }

    pub fn queue_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

// --- GameGrid: frame rasterized to terminal cells ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: char,
    pub role: Role,
}

const BLANK: Cell = Cell { glyph: ' ', role: Role::Background };

pub struct GameGrid {
    pub grid: Vec<Vec<Cell>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![BLANK; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, glyph: char, role: Role) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = Cell { glyph, role };
        }
    }

    pub fn char_at(&self, x: u16, y: u16) -> Option<char> {
        self.grid.get(y as usize)?.get(x as usize).map(|cell| cell.glyph)
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![BLANK; self.width as usize]; self.height as usize];
    }

    fn fill_rect(&mut self, viewport: &Viewport, rect: &Rect, role: Role) {
        for y in 0..self.height {
            for x in 0..self.width {
                if rect.contains(viewport.to_world(x, y)) {
                    self.set_char(x, y, glyph_for(role), role);
                }
            }
        }
    }

    fn fill_circle(&mut self, viewport: &Viewport, center: Vector2D, radius: f64, role: Role) {
        let mut drawn = false;
        for y in 0..self.height {
            for x in 0..self.width {
                let p = viewport.to_world(x, y);
                if (p.x - center.x).powi(2) + (p.y - center.y).powi(2) <= radius * radius {
                    self.set_char(x, y, glyph_for(role), role);
                    drawn = true;
                }
            }
        }
        // Small terminals can have cells larger than the avatar
        if !drawn {
            if let Some((x, y)) = viewport.to_cell(center) {
                self.set_char(x, y, glyph_for(role), role);
            }
        }
    }

    fn write_centered(&mut self, viewport: &Viewport, line: &TextLine) {
        let row = match viewport.to_cell(Vector2D::new(0.0, line.y)) {
            Some((_, row)) => row,
            None => return,
        };
        let len = line.text.chars().count() as u16;
        let start = self.width.saturating_sub(len) / 2;
        for (i, c) in line.text.chars().enumerate() {
            self.set_char(start.saturating_add(i as u16), row, c, line.role);
        }
    }

    fn write_label(&mut self, viewport: &Viewport, button: &Button) {
        if let Some((_, row)) = viewport.to_cell(button.rect.center()) {
            let len = button.label.chars().count() as u16;
            let start = self.width.saturating_sub(len) / 2;
            for (i, c) in button.label.chars().enumerate() {
                self.set_char(start.saturating_add(i as u16), row, c, Role::PrimaryText);
            }
        }
    }

    pub fn draw_frame(&mut self, viewport: &Viewport, frame: &Frame) {
        self.clear();
        for [upper, lower] in &frame.obstacles {
            self.fill_rect(viewport, upper, Role::Obstacle);
            self.fill_rect(viewport, lower, Role::Obstacle);
            for lip in obstacle_lips(upper, lower) {
                self.fill_rect(viewport, &lip, Role::ObstacleLip);
            }
        }
        if let Some(ground) = &frame.ground {
            self.fill_rect(viewport, ground, Role::Ground);
        }
        if let Some((center, radius)) = frame.avatar {
            self.fill_circle(viewport, center, radius, Role::Avatar);
            let beak = center.add(Vector2D::new(radius + 4.0, 0.0));
            if let Some((x, y)) = viewport.to_cell(beak) {
                self.set_char(x, y, glyph_for(Role::Beak), Role::Beak);
            }
        }
        for button in &frame.buttons {
            self.fill_rect(viewport, &button.rect, button.role);
            self.write_label(viewport, button);
        }
        for line in &frame.text {
            self.write_centered(viewport, line);
        }
        if let Some(banner) = &frame.banner {
            self.write_centered(viewport, banner);
        }
    }

    /// Writes the grid row by row, switching colour only between runs of different roles.
    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            let row = &self.grid[y as usize];
            let mut start = 0;
            while start < row.len() {
                let role = row[start].role;
                let end = row[start..]
                    .iter()
                    .position(|cell| cell.role != role)
                    .map_or(row.len(), |offset| start + offset);
                let run: String = row[start..end].iter().map(|cell| cell.glyph).collect();
                stdout.queue_other_command(SetForegroundColor(color_for(role)))?;
                write!(stdout, "{}", run)?;
                start = end;
            }
        }
        stdout.queue_other_command(ResetColor)?;
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget, terminal_width: u16, terminal_height: u16) -> io::Result<()> {
        for y in 0..terminal_height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(terminal_width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

fn glyph_for(role: Role) -> char {
    match role {
        Role::Background => ' ',
        Role::Ground => '▒',
        Role::Obstacle => '█',
        Role::ObstacleLip => '▓',
        Role::Avatar => '@',
        Role::Beak => '>',
        Role::Button | Role::ButtonMuted | Role::ButtonHover => '░',
        Role::PrimaryText | Role::WarningText | Role::HighlightText => ' ',
    }
}

fn color_for(role: Role) -> Color {
    match role {
        Role::Background => Color::Reset,
        Role::Ground => Color::Rgb { r: 220, g: 30, b: 30 },
        Role::Obstacle => Color::Rgb { r: 0, g: 180, b: 0 },
        Role::ObstacleLip => Color::Rgb { r: 139, g: 69, b: 19 },
        Role::Avatar => Color::Rgb { r: 255, g: 230, b: 0 },
        Role::Beak => Color::Rgb { r: 255, g: 165, b: 0 },
        Role::Button => Color::Rgb { r: 255, g: 165, b: 0 },
        Role::ButtonMuted => Color::Rgb { r: 60, g: 60, b: 60 },
        Role::ButtonHover => Color::Rgb { r: 220, g: 30, b: 30 },
        Role::PrimaryText => Color::White,
        Role::WarningText => Color::Rgb { r: 220, g: 30, b: 30 },
        Role::HighlightText => Color::Rgb { r: 255, g: 230, b: 0 },
    }
}
