//! `huddle logout` - 注销并清除本地会话

use crate::remote::Client;
use crate::storage;

/// 执行登出流程
pub fn execute() {
    let Some(session) = storage::session::load_session() else {
        println!("Not signed in.");
        return;
    };

    // 尽力撤销远端 token；失败不阻塞本地登出
    let config = storage::config::load_config();
    if let Ok(client) = Client::new(&config.server, Some(&session)) {
        if let Err(e) = client.sign_out() {
            eprintln!("Warning: could not revoke the remote token: {}", e);
        }
    }

    match storage::session::clear_session() {
        Ok(()) => println!("Signed out {}.", session.email),
        Err(e) => {
            eprintln!("Failed to clear the session: {}", e);
            std::process::exit(1);
        }
    }
}
