use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 用户资料，profiles 表的一行（id 与 auth 用户 id 相同）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Profile {
    /// 资料显示名：优先 full_name，其次 username
    pub fn display_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.username.as_deref().filter(|s| !s.is_empty()))
    }
}
