//! `huddle whoami` - 显示当前登录身份

use crate::storage;

/// 打印会话信息
pub fn execute() {
    let Some(session) = storage::session::load_session() else {
        println!("Not signed in. Run `huddle login` first.");
        std::process::exit(1);
    };

    println!("Email:     {}", session.email);
    println!("User id:   {}", session.user_id);
    match session.selected_team_id {
        Some(team_id) => println!("Workspace: {}", team_id),
        None => println!("Workspace: (none selected)"),
    }
    if session.is_expired() {
        println!("Session:   expired - run `huddle login` again");
    } else if let Some(expires_at) = session.expires_at {
        println!("Session:   valid until {}", expires_at.to_rfc3339());
    } else {
        println!("Session:   valid");
    }
}
