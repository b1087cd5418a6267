//! Team and membership CRUD.
//!
//! `team_members` is the source of truth for which workspaces a user can
//! see: listing teams is a two-step fetch (membership rows, then teams by
//! id), and creating a team inserts the owner's own membership row.

use serde::Deserialize;
use uuid::Uuid;

use super::{eq_filter, in_filter, Client};
use crate::error::Result;
use crate::model::Team;

/// Bare membership row, before profiles are joined in
#[derive(Debug, Clone, Deserialize)]
pub struct MembershipRow {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
}

impl Client {
    /// Teams the user belongs to (via team_members), oldest first.
    pub fn list_teams(&self, user_id: Uuid) -> Result<Vec<Team>> {
        let memberships = self.list_memberships(user_id)?;
        if memberships.is_empty() {
            return Ok(Vec::new());
        }

        let team_ids: Vec<Uuid> = memberships.iter().map(|m| m.team_id).collect();
        let req = self
            .rest("GET", "teams")
            .query("select", "*")
            .query("id", &in_filter(&team_ids))
            .query("order", "created_at");
        Self::call_json(req)
    }

    /// Membership rows for one user.
    pub fn list_memberships(&self, user_id: Uuid) -> Result<Vec<MembershipRow>> {
        let req = self
            .rest("GET", "team_members")
            .query("select", "id,team_id,user_id")
            .query("user_id", &eq_filter(user_id));
        Self::call_json(req)
    }

    /// Membership rows for one team.
    pub fn list_team_members(&self, team_id: Uuid) -> Result<Vec<MembershipRow>> {
        let req = self
            .rest("GET", "team_members")
            .query("select", "id,team_id,user_id")
            .query("team_id", &eq_filter(team_id));
        Self::call_json(req)
    }

    /// Create a team and return the row. The owner membership row is
    /// inserted alongside so the two-step listing sees the new team.
    pub fn create_team(&self, name: &str, owner_id: Uuid) -> Result<Team> {
        let req = self
            .rest("POST", "teams")
            .set("Prefer", "return=representation")
            .set("Accept", "application/vnd.pgrst.object+json");
        let team: Team =
            Self::send_json(req, serde_json::json!({ "name": name, "owner_id": owner_id }))?;

        self.add_member(team.id, owner_id)?;
        Ok(team)
    }

    /// Delete a team. Membership and task rows cascade server-side.
    pub fn delete_team(&self, team_id: Uuid) -> Result<()> {
        let req = self.rest("DELETE", "teams").query("id", &eq_filter(team_id));
        Self::call_no_body(req)
    }

    /// Insert a membership row. A duplicate insert surfaces as a 409 which
    /// callers map to "already a member".
    pub fn add_member(&self, team_id: Uuid, user_id: Uuid) -> Result<()> {
        let req = self.rest("POST", "team_members");
        Self::send_json_no_body(
            req,
            serde_json::json!({ "team_id": team_id, "user_id": user_id }),
        )
    }

    /// Remove a membership row by its id.
    pub fn remove_member(&self, member_id: Uuid) -> Result<()> {
        let req = self
            .rest("DELETE", "team_members")
            .query("id", &eq_filter(member_id));
        Self::call_no_body(req)
    }
}
