//! Localized text lookup.
//!
//! Keys have the form `area/alias`. Built-in English defaults are overlaid
//! with any `[localization.texts]` entries from the config file.

use std::collections::HashMap;

use crate::config::LocalizationConfig;

/// Key of the header shown after a member group is saved.
pub const MEMBER_GROUP_SAVED_HEADER: &str = "speechBubbles/memberGroupSavedHeader";

const DEFAULT_TEXTS: &[(&str, &str)] = &[
    (MEMBER_GROUP_SAVED_HEADER, "Member group saved"),
    ("speechBubbles/operationFailedHeader", "Failed"),
    ("general/memberGroup", "Member group"),
];

/// Immutable text catalog for one culture.
#[derive(Debug, Clone)]
pub struct TextCatalog {
    culture: String,
    texts: HashMap<String, String>,
}

impl TextCatalog {
    pub fn from_config(config: &LocalizationConfig) -> Self {
        let mut texts: HashMap<String, String> = DEFAULT_TEXTS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        texts.extend(config.texts.iter().map(|(k, v)| (k.clone(), v.clone())));

        Self {
            culture: config.culture.clone(),
            texts,
        }
    }

    pub fn culture(&self) -> &str {
        &self.culture
    }

    /// Text for `key`, or `[key]` when the catalog has no entry.
    pub fn localize(&self, key: &str) -> String {
        match self.texts.get(key) {
            Some(text) => text.clone(),
            None => {
                tracing::debug!(key, culture = %self.culture, "Missing localized text");
                format!("[{}]", key)
            }
        }
    }
}

impl Default for TextCatalog {
    fn default() -> Self {
        Self::from_config(&LocalizationConfig::default())
    }
}
