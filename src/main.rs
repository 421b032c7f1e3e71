mod app_service;
mod app_state;
mod commands;
mod config;
mod error;
mod profile;
mod storage;
mod ui;

use anyhow::Context;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::process::ExitCode;
use std::str::FromStr;

use crate::app_state::App;
use crate::commands::{AppCommand, USAGE};
use crate::config::AppConfig;
use crate::error::ProfileError;
use crate::ui::draw;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 加载 .env（不存在时直接使用系统环境变量）
    let _ = dotenv::dotenv();
    let config = AppConfig::from_env();

    if let Err(e) = init_logging(&config) {
        eprintln!("无法初始化日志: {:#}", e);
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = AppCommand::from_str(&args.join(" "))
        .unwrap_or_else(|_| AppCommand::Unknown(USAGE.to_string()));

    let res = match command {
        AppCommand::Transform { uid } => transform(&config, uid).await,
        AppCommand::Show { uid } => show(&config, uid).await,
        AppCommand::Help => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        AppCommand::Unknown(msg) => {
            eprintln!("{}", msg);
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("✗ {:#}", e);
            let code = e
                .downcast_ref::<ProfileError>()
                .map(|pe| pe.exit_code())
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn init_logging(config: &AppConfig) -> anyhow::Result<()> {
    let ts = Local::now().format("%Y%m%d-%H%M%S").to_string();
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("创建日志目录失败: {}", config.log_dir.display()))?;
    let log_path = config.log_dir.join(format!("app-{}.log", ts));
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("创建日志文件失败: {}", log_path.display()))?;
    env_logger::Builder::new()
        .target(env_logger::Target::Pipe(Box::new(log_file))) // 输出到文件，避免干扰终端界面
        .filter_level(log::LevelFilter::Warn)
        .filter_module("hsrprofile", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .parse_default_env()
        .try_init()?;
    Ok(())
}

async fn transform(config: &AppConfig, uid: i64) -> anyhow::Result<()> {
    let summary = app_service::run_transform(config, uid).await?;
    println!(
        "✓ UID {} 处理完成: 角色 {} 行, 遗器 {} 行",
        summary.uid, summary.characters, summary.relics
    );
    if summary.issues > 0 {
        println!("⚠ {} 条记录使用了默认值，详见日志", summary.issues);
    }
    println!("  已保存到 {}", summary.output.display());
    Ok(())
}

async fn show(config: &AppConfig, uid: i64) -> anyhow::Result<()> {
    let profile = app_service::load_processed(config, uid).await?;
    let mut app = App::new(uid, profile);

    // TUI 初始化
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app_loop(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("界面运行出错")
}

fn run_app_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key_event(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
