use std::{collections::HashMap, time::Duration};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::StdRng;
use ratatui::{widgets::ListState, Terminal};
use tracing::debug;

use crate::{
    category::Category,
    config::{KeyAction, Theme},
    plant::PlantRecord,
    session::{Intent, PhaseKind, Session},
    ui::ui,
};

#[derive(Debug)]
pub struct App {
    pub plants: Vec<PlantRecord>,
    pub session: Session,
    pub rng: StdRng,
    pub theme: Theme,
    pub keymap: HashMap<char, KeyAction>,
    // Setup 界面的光标，指向 Category::ALL
    pub cursor: ListState,
    pub status: Option<String>,
}

impl App {
    pub fn new(
        plants: Vec<PlantRecord>,
        session: Session,
        rng: StdRng,
        theme: Theme,
        keymap: HashMap<char, KeyAction>,
    ) -> Self {
        let mut cursor = ListState::default();
        cursor.select(Some(0));
        Self {
            plants,
            session,
            rng,
            theme,
            keymap,
            cursor,
            status: None,
        }
    }

    /// 会话只在这里被替换
    pub fn dispatch(&mut self, intent: Intent) {
        let session = std::mem::take(&mut self.session);
        self.session = session.apply(intent, &self.plants, &mut self.rng);
    }

    pub fn cursor_category(&self) -> Category {
        let i = self.cursor.selected().unwrap_or(0);
        Category::ALL[i.min(Category::ALL.len() - 1)]
    }

    fn move_cursor(&mut self, delta: isize) {
        let n = Category::ALL.len() as isize;
        let cur = self.cursor.selected().unwrap_or(0) as isize;
        self.cursor.select(Some((cur + delta).clamp(0, n - 1) as usize));
    }

    fn phase(&self) -> PhaseKind {
        self.session.phase().kind()
    }
}

pub fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;
        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(k) = event::read()? {
                // Windows 下按下/松开各有一次事件
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key(app, k) {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// 返回 true 表示退出
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    app.status = None;
    match key.code {
        KeyCode::Up => apply_action(app, KeyAction::CursorUp),
        KeyCode::Down => apply_action(app, KeyAction::CursorDown),
        KeyCode::Right => apply_action(app, KeyAction::Next),
        KeyCode::Enter => apply_action(app, KeyAction::Start),
        KeyCode::Esc => apply_action(app, KeyAction::Reset),
        KeyCode::Char(ch) => match app.keymap.get(&ch).copied() {
            Some(action) => apply_action(app, action),
            None => false,
        },
        _ => false,
    }
}

/// 返回 true 表示退出
pub fn apply_action(app: &mut App, action: KeyAction) -> bool {
    debug!(?action, "key action");
    match action {
        KeyAction::Quit => return true,
        KeyAction::CursorUp => {
            if app.phase() == PhaseKind::Setup {
                app.move_cursor(-1);
            }
        }
        KeyAction::CursorDown => {
            if app.phase() == PhaseKind::Setup {
                app.move_cursor(1);
            }
        }
        KeyAction::ToggleCursorCategory => {
            let c = app.cursor_category();
            app.dispatch(Intent::ToggleCategory(c));
        }
        KeyAction::ToggleCategory(c) => {
            if app.phase() == PhaseKind::Setup {
                if let Some(i) = Category::ALL.iter().position(|x| *x == c) {
                    app.cursor.select(Some(i));
                }
            }
            app.dispatch(Intent::ToggleCategory(c));
        }
        KeyAction::ToggleShuffle => app.dispatch(Intent::ToggleShuffle),
        KeyAction::Start => {
            let startable = matches!(app.phase(), PhaseKind::Setup | PhaseKind::Complete);
            if startable && !app.session.can_start(&app.plants) {
                app.status = Some("No cards for the current selection".into());
            }
            app.dispatch(Intent::Start);
        }
        KeyAction::Flip => app.dispatch(Intent::Flip),
        KeyAction::Missed => app.dispatch(Intent::MarkMissed),
        KeyAction::Next => app.dispatch(Intent::Next),
        KeyAction::Reset => app.dispatch(Intent::Reset),
    }
    false
}
