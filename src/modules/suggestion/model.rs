use serde::Serialize;

use crate::modules::user::model::PublicProfile;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    #[serde(flatten)]
    pub profile: PublicProfile,
    pub mutual_friends: usize,
}
