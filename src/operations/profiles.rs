//! Profile operations behind the edit-profile dialog.

use uuid::Uuid;

use crate::error::{HuddleError, Result};
use crate::model::Profile;
use crate::remote::Client;

/// Save profile edits.
///
/// # Steps
///
/// 1. When the username changed, check it is not taken by another user
/// 2. Patch the profile row
pub fn save_profile(
    client: &Client,
    current: &Profile,
    username: &str,
    full_name: &str,
    avatar_url: &str,
) -> Result<String> {
    let username = username.trim();

    if !username.is_empty() && Some(username) != current.username.as_deref() {
        match username_taken(client, current.id, username) {
            Ok(true) => {
                return Err(HuddleError::invalid_data(format!(
                    "Username '{}' is already taken",
                    username
                )))
            }
            Ok(false) => {}
            // The availability probe is advisory; the row constraint still
            // protects us if it was unreachable.
            Err(_) => {}
        }
    }

    let updated = Profile {
        id: current.id,
        username: non_empty(username),
        full_name: non_empty(full_name.trim()),
        avatar_url: non_empty(avatar_url.trim()),
    };
    client.update_profile(&updated)?;
    Ok("Profile updated".to_string())
}

/// Whether another user already holds this username.
pub fn username_taken(client: &Client, own_id: Uuid, username: &str) -> Result<bool> {
    let rows = client.find_profiles_by_username(username)?;
    Ok(rows.iter().any(|p| p.id != own_id))
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("ada"), Some("ada".to_string()));
    }
}
