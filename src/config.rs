// ---------------- 配置：数据路径 / 按键 / 主题 ----------------

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::ValueEnum;
use ratatui::style::Color;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::category::Category;

pub const DATA_ENV: &str = "PLANTCARDS_DATA";
pub const DEFAULT_DATA_PATH: &str = "data/plants.json";
pub const KEYMAP_FILE: &str = "keymap.toml";

/// 优先级：--file > PLANTCARDS_DATA > 当前目录及其上级的 data/plants.json
pub fn default_data_path(file: Option<&Path>) -> PathBuf {
    resolve_data_path(
        file,
        std::env::var(DATA_ENV).ok(),
        std::env::current_dir().ok(),
    )
}

pub fn resolve_data_path(
    file: Option<&Path>,
    env_value: Option<String>,
    cwd: Option<PathBuf>,
) -> PathBuf {
    if let Some(p) = file {
        return p.to_path_buf();
    }
    if let Some(envp) = env_value.filter(|s| !s.trim().is_empty()) {
        return PathBuf::from(envp);
    }
    if let Some(cwd) = cwd {
        for anc in cwd.ancestors() {
            let c = anc.join(DEFAULT_DATA_PATH);
            if c.exists() {
                return c;
            }
        }
    }
    // 可能不存在，load 时给出提示
    PathBuf::from(DEFAULT_DATA_PATH)
}

// ---------------- Keymap ----------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    CursorUp,
    CursorDown,
    ToggleCursorCategory,
    ToggleCategory(Category),
    ToggleShuffle,
    Start,
    Flip,
    Missed,
    Next,
    Reset,
    Quit,
}

#[derive(Deserialize)]
struct KeyMapToml {
    keys: HashMap<String, String>,
}

/// 依次查找 ./keymap.toml 与数据文件同目录的 keymap.toml
pub fn load_keymap(data_path: &Path) -> Result<HashMap<char, KeyAction>> {
    let mut paths = vec![PathBuf::from(KEYMAP_FILE)];
    if let Some(dir) = data_path.parent() {
        paths.push(dir.join(KEYMAP_FILE));
    }
    for p in paths {
        if p.exists() {
            let content = fs::read_to_string(&p)
                .with_context(|| format!("failed to read keymap: {}", p.display()))?;
            let km = parse_keymap_toml(&content)
                .with_context(|| format!("failed to parse keymap: {}", p.display()))?;
            debug!(path = %p.display(), "keymap loaded");
            return Ok(km);
        }
    }
    Err(anyhow::anyhow!("keymap.toml not found"))
}

pub fn parse_keymap_toml(content: &str) -> Result<HashMap<char, KeyAction>> {
    let km: KeyMapToml = toml::from_str(content)?;
    Ok(parse_keymap(km.keys))
}

/// 在默认按键上覆盖；非单字符的键和无法识别的动作忽略
pub fn parse_keymap(map: HashMap<String, String>) -> HashMap<char, KeyAction> {
    let mut out = default_keymap();
    for (k, v) in map {
        let mut chars = k.chars();
        match (chars.next(), chars.next(), action_from_str(&v)) {
            (Some(ch), None, Some(act)) => {
                out.insert(ch, act);
            }
            _ => warn!(key = %k, action = %v, "ignoring keymap entry"),
        }
    }
    out
}

pub fn action_from_str(s: &str) -> Option<KeyAction> {
    use KeyAction::*;
    if let Some(key) = s.strip_prefix("toggle:") {
        return Category::from_key(key).map(ToggleCategory);
    }
    Some(match s {
        "cursor_up" => CursorUp,
        "cursor_down" => CursorDown,
        "toggle_category" => ToggleCursorCategory,
        "toggle_shuffle" => ToggleShuffle,
        "start" => Start,
        "flip" => Flip,
        "missed" => Missed,
        "next" => Next,
        "reset" => Reset,
        "quit" => Quit,
        _ => return None,
    })
}

pub fn default_keymap() -> HashMap<char, KeyAction> {
    use KeyAction::*;
    let mut m = HashMap::new();
    m.insert('k', CursorUp);
    m.insert('j', CursorDown);
    m.insert(' ', ToggleCursorCategory);
    for (i, c) in Category::ALL.into_iter().enumerate() {
        if let Some(ch) = char::from_digit(i as u32 + 1, 10) {
            m.insert(ch, ToggleCategory(c));
        }
    }
    m.insert('s', ToggleShuffle);
    m.insert('f', Flip);
    m.insert('m', Missed);
    m.insert('n', Next);
    m.insert('r', Reset);
    m.insert('q', Quit);
    m
}

// ---------------- 主题与样式 ----------------
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeKind {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub bar_bg: Color,
    pub selection_bg: Color,
    pub good: Color,
    pub warn: Color,
    pub info: Color,
}

pub fn theme_of(kind: ThemeKind) -> Theme {
    match kind {
        ThemeKind::Dark => Theme {
            fg: Color::Rgb(220, 220, 220),
            muted: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(120, 200, 130),
            bar_bg: Color::Rgb(35, 40, 46),
            selection_bg: Color::Rgb(60, 65, 72),
            good: Color::Rgb(130, 200, 120),
            warn: Color::Rgb(255, 200, 110),
            info: Color::Rgb(120, 170, 255),
        },
        ThemeKind::Light => Theme {
            fg: Color::Rgb(30, 30, 30),
            muted: Color::Rgb(120, 120, 120),
            accent: Color::Rgb(46, 125, 50),
            bar_bg: Color::Rgb(235, 240, 235),
            selection_bg: Color::Rgb(210, 228, 210),
            good: Color::Rgb(38, 166, 91),
            warn: Color::Rgb(255, 160, 0),
            info: Color::Rgb(0, 122, 255),
        },
    }
}
