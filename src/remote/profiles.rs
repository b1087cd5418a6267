//! Profile lookup and editing.

use uuid::Uuid;

use super::{eq_filter, in_filter, Client};
use crate::error::Result;
use crate::model::Profile;

impl Client {
    /// Profile for one user id, if a row exists.
    pub fn get_profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        let req = self
            .rest("GET", "profiles")
            .query("select", "*")
            .query("id", &eq_filter(user_id));
        let rows: Vec<Profile> = Self::call_json(req)?;
        Ok(rows.into_iter().next())
    }

    /// Profiles for a set of user ids (members page join).
    pub fn profiles_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Profile>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let req = self
            .rest("GET", "profiles")
            .query("select", "*")
            .query("id", &in_filter(ids));
        Self::call_json(req)
    }

    /// All profiles with the exact username. More than one row means the
    /// backend has drifted; callers treat that as ambiguous.
    pub fn find_profiles_by_username(&self, username: &str) -> Result<Vec<Profile>> {
        let req = self
            .rest("GET", "profiles")
            .query("select", "id,username,full_name,avatar_url")
            .query("username", &eq_filter(username.trim()));
        Self::call_json(req)
    }

    /// Update the caller's profile row.
    pub fn update_profile(&self, profile: &Profile) -> Result<()> {
        let req = self
            .rest("PATCH", "profiles")
            .query("id", &eq_filter(profile.id));
        Self::send_json_no_body(
            req,
            serde_json::json!({
                "username": profile.username,
                "full_name": profile.full_name,
                "avatar_url": profile.avatar_url,
            }),
        )
    }
}
