use serde::{Deserialize, Serialize};

use nbj_core::services::OnboardingLink;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingResponse {
    pub account_id: String,
    pub onboarding_url: String,
}

impl From<OnboardingLink> for OnboardingResponse {
    fn from(link: OnboardingLink) -> Self {
        Self {
            account_id: link.account_id,
            onboarding_url: link.onboarding_url,
        }
    }
}
