// 基于 ratatui + crossterm 的植物求生知识闪卡 TUI
// 功能：
// - 从 data/plants.json 载入卡片（--file / PLANTCARDS_DATA 可覆盖）
// - 勾选分类，按勾选顺序逐个分类学习，可打乱
// - 标记不会的卡片，所有分类结束后统一复习一轮
// - `plantcards import` 把表格导出的 CSV 转成 plants.json

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plantcards::{
    app::{run_app, App},
    category::Category,
    config::{default_data_path, default_keymap, load_keymap, theme_of, ThemeKind, DEFAULT_DATA_PATH},
    import::{run_import, DEFAULT_HEADER_ROW},
    plant::load_dataset,
    session::Session,
};

const LOG_ENV: &str = "PLANTCARDS_LOG";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "plantcards",
    about = "Plant survival flashcards in the terminal",
    version,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// 数据文件路径，默认读取 PLANTCARDS_DATA 或向上查找 data/plants.json
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    /// 初始勾选的分类（可多选，按给出顺序学习），默认 friction-fire
    #[arg(long = "category", short = 'c', value_enum, action = ArgAction::Append)]
    categories: Vec<Category>,

    /// 启动时关闭打乱
    #[arg(long = "no-shuffle", action = ArgAction::SetTrue)]
    no_shuffle: bool,

    /// 固定随机种子，便于复现打乱顺序
    #[arg(long)]
    seed: Option<u64>,

    /// 主题（外观）：dark | light
    #[arg(long = "theme", value_enum, default_value_t = ThemeKind::Dark)]
    theme: ThemeKind,

    /// 日志写入文件（TUI 占用终端，不指定则不输出日志）
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// CSV → plants.json 一次性转换
    Import {
        #[arg(long, short = 'i', default_value = "data/import/plants_import.csv")]
        input: PathBuf,

        #[arg(long, short = 'o', default_value = DEFAULT_DATA_PATH)]
        output: PathBuf,

        /// 表头所在行（从 0 开始）
        #[arg(long = "header-row", default_value_t = DEFAULT_HEADER_ROW)]
        header_row: usize,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_tracing_file(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file: {}", path.display()))?;
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn init_tracing_stderr() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.clone() {
        Some(Command::Import {
            input,
            output,
            header_row,
        }) => import(&input, &output, header_row),
        None => study(&cli),
    }
}

fn import(input: &Path, output: &Path, header_row: usize) -> Result<()> {
    init_tracing_stderr();
    let n = run_import(input, output, header_row)
        .with_context(|| format!("import failed: {}", input.display()))?;
    println!("Imported {} plants → {}", n, output.display());
    Ok(())
}

fn study(cli: &Cli) -> Result<()> {
    if let Some(p) = &cli.log_file {
        init_tracing_file(p)?;
    }
    let data_path = default_data_path(cli.file.as_deref());
    let plants = load_dataset(&data_path)?;
    let keymap = load_keymap(&data_path).unwrap_or_else(|e| {
        debug!("using default keymap: {e:#}");
        default_keymap()
    });
    let selected = if cli.categories.is_empty() {
        vec![Category::FrictionFire]
    } else {
        cli.categories.clone()
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut app = App::new(
        plants,
        Session::new(selected, !cli.no_shuffle),
        rng,
        theme_of(cli.theme),
        keymap,
    );

    // TUI 初始化；此后任何一步出错（或 panic）都会先还原终端
    enable_raw_mode()?;
    let _restore = OnDrop(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let res = run_app(&mut terminal, &mut app);
    info!(missed = app.session.missed().len(), "exit");
    res
}

/// 离开作用域时执行
struct OnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

// 每一步都要执行，失败只记日志
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!("failed to disable raw mode: {e}");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        warn!("failed to leave alternate screen: {e}");
    }
}
