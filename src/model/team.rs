use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Profile;

/// 团队（workspace），teams 表的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    /// 创建者
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// 团队成员，team_members 表的一行 + 关联的 profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    /// 成员资料（两步查询后由客户端拼接，后端缺行时为 None）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl TeamMember {
    /// 成员显示名：优先 username，其次 full_name，最后截断的 user_id
    pub fn display_name(&self) -> String {
        if let Some(profile) = &self.profile {
            if let Some(username) = profile.username.as_deref().filter(|s| !s.is_empty()) {
                return username.to_string();
            }
            if let Some(full_name) = profile.full_name.as_deref().filter(|s| !s.is_empty()) {
                return full_name.to_string();
            }
        }
        let id = self.user_id.to_string();
        format!("user-{}", &id[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_with(username: Option<&str>, full_name: Option<&str>) -> TeamMember {
        TeamMember {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            profile: Some(Profile {
                id: Uuid::new_v4(),
                username: username.map(String::from),
                full_name: full_name.map(String::from),
                avatar_url: None,
            }),
        }
    }

    #[test]
    fn test_display_name_prefers_username() {
        let m = member_with(Some("ada"), Some("Ada Lovelace"));
        assert_eq!(m.display_name(), "ada");
    }

    #[test]
    fn test_display_name_falls_back_to_full_name() {
        let m = member_with(None, Some("Ada Lovelace"));
        assert_eq!(m.display_name(), "Ada Lovelace");

        let m = member_with(Some(""), Some("Ada Lovelace"));
        assert_eq!(m.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_without_profile() {
        let mut m = member_with(None, None);
        m.profile = None;
        assert!(m.display_name().starts_with("user-"));
    }
}
