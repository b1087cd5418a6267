//! 登录会话持久化
//!
//! 保存在 ~/.huddle/session.toml：access token、用户身份和当前选中的
//! 团队。登出即删除该文件。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use uuid::Uuid;

use super::{ensure_huddle_dir, huddle_dir, load_toml, save_toml};

/// 登录会话
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token（JWT）
    pub access_token: String,
    /// 用户 ID
    pub user_id: Uuid,
    /// 登录邮箱
    pub email: String,
    /// token 过期时间（从 JWT payload 解出，解不出则为 None）
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// 当前选中的团队（跨启动记忆）
    #[serde(default)]
    pub selected_team_id: Option<Uuid>,
}

impl Session {
    /// token 是否已过期（无过期信息视为未过期，交给后端拒绝）
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(t) => Utc::now() >= t,
            None => false,
        }
    }
}

/// 获取会话文件路径
fn session_path() -> PathBuf {
    huddle_dir().join("session.toml")
}

/// 加载会话（不存在或损坏则返回 None）
pub fn load_session() -> Option<Session> {
    load_toml(&session_path()).ok()
}

/// 保存会话
pub fn save_session(session: &Session) -> io::Result<()> {
    ensure_huddle_dir()?;
    save_toml(&session_path(), session)
}

/// 删除会话（登出）
pub fn clear_session() -> io::Result<()> {
    let path = session_path();
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_session() -> Session {
        Session {
            access_token: "tok".to_string(),
            user_id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            expires_at: None,
            selected_team_id: None,
        }
    }

    #[test]
    fn test_session_toml_roundtrip() {
        let session = sample_session();
        let content = toml::to_string_pretty(&session).unwrap();
        let back: Session = toml::from_str(&content).unwrap();
        assert_eq!(back.access_token, session.access_token);
        assert_eq!(back.user_id, session.user_id);
        assert_eq!(back.selected_team_id, None);
    }

    #[test]
    fn test_is_expired() {
        let mut session = sample_session();
        assert!(!session.is_expired());

        session.expires_at = Some(Utc::now() - Duration::minutes(1));
        assert!(session.is_expired());

        session.expires_at = Some(Utc::now() + Duration::hours(1));
        assert!(!session.is_expired());
    }
}
