mod app;
mod cli;
mod dialogs;
mod drag_state;
mod error;
mod event;
mod model;
mod operations;
mod remote;
mod storage;
mod tasks_state;
mod teams_state;
mod theme;
mod ui;
mod ui_state;
mod update;

use std::io::{self, Write};
use std::panic;
use std::time::Instant;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use app::App;
use cli::{Cli, Commands};

/// Auto-refresh interval in seconds
const AUTO_REFRESH_INTERVAL_SECS: u64 = 30;

/// 启动 TUI 界面
fn run_tui() -> io::Result<()> {
    // 初始化终端
    let mut terminal = ratatui::init();
    execute!(io::stdout(), EnableMouseCapture)?;

    // 创建应用
    let mut app = App::new();

    // 运行主循环
    let result = run(&mut terminal, &mut app);

    // 恢复终端
    execute!(io::stdout(), DisableMouseCapture)?;
    ratatui::restore();

    // 清除终端 tab 标题（恢复默认）
    print!("\x1b]0;\x07");
    let _ = io::stdout().flush();

    result
}

fn main() -> io::Result<()> {
    // Enable backtraces by default so panics show call stacks
    if std::env::var("RUST_BACKTRACE").is_err() {
        // SAFETY: called at the very start of main, before any other threads
        unsafe {
            std::env::set_var("RUST_BACKTRACE", "1");
        }
    }

    #[cfg(feature = "trace")]
    init_tracing();

    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal state
        let _ = execute!(io::stdout(), DisableMouseCapture);
        ratatui::restore();
        // Call the original panic hook
        original_hook(panic_info);
    }));

    // 解析命令行参数
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            run_tui()?;
        }
        Commands::Login { email } => {
            cli::login::execute(email);
        }
        Commands::Logout => {
            cli::logout::execute();
        }
        Commands::Whoami => {
            cli::whoami::execute();
        }
    }

    Ok(())
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    let mut last_refresh = Instant::now();

    loop {
        // 定时自动刷新（登录后才有数据可刷）
        if app.signed_in() && last_refresh.elapsed().as_secs() >= AUTO_REFRESH_INTERVAL_SECS {
            app.refresh();
            last_refresh = Instant::now();
        }

        // 应用后台线程送回的结果（乐观写回执、拉取、变更操作）
        app.poll_background();

        // 渲染界面
        app.ui.click_areas.reset();
        terminal.draw(|frame| {
            if !app.signed_in() {
                ui::signin::render(frame, app);
            } else {
                match app.mode {
                    app::AppMode::Board => ui::board::render(frame, app),
                    app::AppMode::History => ui::history::render(frame, app),
                    app::AppMode::Members => ui::members::render(frame, app),
                }
            }
        })?;

        // 处理事件
        if !event::handle_events(app)? {
            break;
        }
    }

    Ok(())
}

/// 把 remote 请求日志写到 stderr（配合 `huddle 2>huddle.log` 使用）
#[cfg(feature = "trace")]
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
