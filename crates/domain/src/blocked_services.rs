use crate::{DomainError, WeeklySchedule};
use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Services that can be blocked per client. Kept sorted for binary search.
pub const SERVICE_CATALOG: &[&str] = &[
    "9gag",
    "amazon",
    "bilibili",
    "cloudflare",
    "dailymotion",
    "discord",
    "disneyplus",
    "ebay",
    "epic_games",
    "facebook",
    "hulu",
    "imgur",
    "instagram",
    "mail_ru",
    "netflix",
    "ok",
    "origin",
    "pinterest",
    "qq",
    "reddit",
    "skype",
    "snapchat",
    "spotify",
    "steam",
    "telegram",
    "tiktok",
    "tinder",
    "twitch",
    "twitter",
    "viber",
    "vimeo",
    "vk",
    "wechat",
    "weibo",
    "whatsapp",
    "youtube",
];

pub fn is_known_service(id: &str) -> bool {
    SERVICE_CATALOG.binary_search(&id).is_ok()
}

/// Checks a blocked-service list against the catalog.
///
/// The list order is left untouched so it can be displayed as entered.
pub fn validate_service_ids(ids: &[String]) -> Result<(), DomainError> {
    let mut seen = FxHashSet::default();
    for id in ids {
        if !is_known_service(id) {
            return Err(DomainError::UnknownService(id.clone()));
        }
        if !seen.insert(id.as_str()) {
            return Err(DomainError::DuplicateService(id.clone()));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockedServicesConfig {
    #[serde(default)]
    pub schedule: WeeklySchedule,

    #[serde(default)]
    pub ids: Vec<String>,
}

impl BlockedServicesConfig {
    pub fn new(schedule: WeeklySchedule, ids: Vec<String>) -> Result<Self, DomainError> {
        validate_service_ids(&ids)?;
        Ok(Self { schedule, ids })
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_service_ids(&self.ids)
    }

    /// Whether `service` is listed and the schedule blocks at `now`.
    pub fn blocks(&self, service: &str, now: DateTime<Utc>) -> bool {
        self.ids.iter().any(|id| id == service) && self.schedule.is_blocked_at(now)
    }
}
