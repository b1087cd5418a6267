//! `huddle login` - 密码登录并持久化会话

use std::io::{self, Write};

use crate::remote::Client;
use crate::storage;

/// 执行登录流程
pub fn execute(email: Option<String>) {
    let config = storage::config::load_config();

    let email = match email {
        Some(email) => email,
        None => match prompt_line("Email: ") {
            Some(email) => email,
            None => {
                eprintln!("Aborted.");
                std::process::exit(1);
            }
        },
    };
    let email = email.trim().to_string();
    if email.is_empty() {
        eprintln!("Email cannot be empty.");
        std::process::exit(1);
    }

    let password = match rpassword::prompt_password("Password: ") {
        Ok(p) if !p.is_empty() => p,
        _ => {
            eprintln!("Password cannot be empty.");
            std::process::exit(1);
        }
    };

    let client = match Client::new(&config.server, None) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Check the [server] section in ~/.huddle/config.toml");
            std::process::exit(1);
        }
    };

    // 保留上次选中的团队，换账号登录则丢弃
    let previous = storage::session::load_session();
    match client.sign_in(&email, &password) {
        Ok(mut session) => {
            if let Some(prev) = previous {
                if prev.user_id == session.user_id {
                    session.selected_team_id = prev.selected_team_id;
                }
            }
            if let Err(e) = storage::session::save_session(&session) {
                eprintln!("Signed in, but failed to store the session: {}", e);
                std::process::exit(1);
            }
            println!("Signed in as {}.", session.email);
            println!("Run `huddle` to open the board.");
        }
        Err(e) => {
            eprintln!("Sign-in failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// 从标准输入读一行
fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line).ok()?;
    let line = line.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
