//! Team operations: listing, membership join, invitations.

use uuid::Uuid;

use crate::error::{HuddleError, Result};
use crate::model::{Team, TeamMember};
use crate::remote::Client;

/// Load the members of a team with their profiles attached.
///
/// # Steps
///
/// 1. Fetch membership rows for the team
/// 2. Fetch profiles for the member user ids in one `id=in.(...)` query
/// 3. Attach each profile to its membership row (missing profile rows are
///    tolerated; the member renders with a fallback name)
pub fn load_members(client: &Client, team_id: Uuid) -> Result<Vec<TeamMember>> {
    let rows = client.list_team_members(team_id)?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let user_ids: Vec<Uuid> = rows.iter().map(|r| r.user_id).collect();
    let profiles = client.profiles_by_ids(&user_ids).unwrap_or_default();

    Ok(rows
        .into_iter()
        .map(|row| {
            let profile = profiles.iter().find(|p| p.id == row.user_id).cloned();
            TeamMember {
                id: row.id,
                team_id: row.team_id,
                user_id: row.user_id,
                profile,
            }
        })
        .collect())
}

/// Create a workspace owned by `owner_id`.
pub fn create_team(client: &Client, name: &str, owner_id: Uuid) -> Result<Team> {
    let name = name.trim();
    if name.is_empty() {
        return Err(HuddleError::invalid_data("Workspace name cannot be empty"));
    }
    client.create_team(name, owner_id)
}

/// Delete a workspace. Only the owner may delete it.
pub fn delete_team(client: &Client, team: &Team, user_id: Uuid) -> Result<()> {
    if team.owner_id != user_id {
        return Err(HuddleError::invalid_data(
            "Only the workspace owner can delete it",
        ));
    }
    client.delete_team(team.id)
}

/// Invite a user to a team by username.
///
/// # Steps
///
/// 1. Resolve the username to a profile (no row → not found; more than one
///    row → ambiguous, refuse)
/// 2. Reject self-invites
/// 3. Insert the membership row; a duplicate insert (409) maps to
///    "already a member"
///
/// # Returns
///
/// A confirmation message naming the invitee.
pub fn invite_member(
    client: &Client,
    team_id: Uuid,
    inviter_id: Uuid,
    username: &str,
) -> Result<String> {
    let username = username.trim();
    if username.is_empty() {
        return Err(HuddleError::invalid_data("Username cannot be empty"));
    }

    // 1. Resolve username
    let mut profiles = client.find_profiles_by_username(username)?;
    let invitee = match profiles.len() {
        0 => {
            return Err(HuddleError::not_found(
                "User with that username was not found",
            ))
        }
        1 => profiles.remove(0),
        _ => {
            return Err(HuddleError::invalid_data(
                "Multiple users found with that username",
            ))
        }
    };

    // 2. Reject self-invite
    if invitee.id == inviter_id {
        return Err(HuddleError::invalid_data(
            "You cannot invite yourself to a workspace",
        ));
    }

    // 3. Insert membership
    match client.add_member(team_id, invitee.id) {
        Ok(()) => Ok(format!("Invited {} to the workspace", username)),
        Err(HuddleError::Api { status: 409, .. }) => Err(HuddleError::invalid_data(format!(
            "{} is already a member of this workspace",
            username
        ))),
        Err(e) => Err(e),
    }
}

/// Remove a member from a team. Only the owner may remove members, and the
/// owner's own membership row is not removable (delete the team instead).
pub fn remove_member(
    client: &Client,
    team: &Team,
    acting_user: Uuid,
    member: &TeamMember,
) -> Result<String> {
    if team.owner_id != acting_user {
        return Err(HuddleError::invalid_data(
            "Only the workspace owner can remove members",
        ));
    }
    if member.user_id == team.owner_id {
        return Err(HuddleError::invalid_data(
            "The owner cannot be removed from the workspace",
        ));
    }

    client.remove_member(member.id)?;
    Ok(format!("Removed {}", member.display_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::config::ServerConfig;
    use chrono::Utc;

    fn offline_client() -> Client {
        Client::new(&ServerConfig::default(), None).unwrap()
    }

    fn team_owned_by(owner_id: Uuid) -> Team {
        Team {
            id: Uuid::new_v4(),
            name: "alpha".to_string(),
            owner_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_team_rejects_blank_name() {
        let err = create_team(&offline_client(), "   ", Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, HuddleError::InvalidData(_)));
    }

    #[test]
    fn test_delete_team_requires_owner() {
        let team = team_owned_by(Uuid::new_v4());
        let err = delete_team(&offline_client(), &team, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, HuddleError::InvalidData(_)));
    }

    #[test]
    fn test_invite_rejects_blank_username() {
        let err = invite_member(&offline_client(), Uuid::new_v4(), Uuid::new_v4(), "  ")
            .unwrap_err();
        assert!(matches!(err, HuddleError::InvalidData(_)));
    }

    #[test]
    fn test_remove_member_guards() {
        let owner = Uuid::new_v4();
        let team = team_owned_by(owner);
        let owner_row = TeamMember {
            id: Uuid::new_v4(),
            team_id: team.id,
            user_id: owner,
            profile: None,
        };

        // Non-owner cannot remove
        let err =
            remove_member(&offline_client(), &team, Uuid::new_v4(), &owner_row).unwrap_err();
        assert!(matches!(err, HuddleError::InvalidData(_)));

        // Owner cannot remove their own row
        let err = remove_member(&offline_client(), &team, owner, &owner_row).unwrap_err();
        assert!(matches!(err, HuddleError::InvalidData(_)));
    }
}
