use serde::{Deserialize, Serialize};

/// Relationship counters for a profile (`GET /seguidor/conta/{id}`)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowCounters {
    #[serde(rename = "seguidores", default)]
    pub followers: u32,
    #[serde(rename = "seguindo", default)]
    pub following: u32,
    /// Whether the current user follows this profile
    #[serde(rename = "estaSeguindo", default)]
    pub is_following: bool,
}

impl FollowCounters {
    /// Apply a successful follow (`true`) or unfollow (`false`).
    pub fn apply_follow(&mut self, follow: bool) {
        if self.is_following == follow {
            return;
        }
        self.is_following = follow;
        if follow {
            self.followers += 1;
        } else {
            self.followers = self.followers.saturating_sub(1);
        }
    }
}
