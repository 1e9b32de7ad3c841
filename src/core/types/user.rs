//! User profile returned by gateway lookups.

use serde::{Deserialize, Serialize};

/// Profile of the user that authored a message; used to attribute forwarded
/// notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub real_name: String,
    /// Avatar URL shown as the attachment author icon.
    pub image_url: String,
}
