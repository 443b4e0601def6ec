//! Persona domain model.
//!
//! Represents the reasoning personas a conversation turn can be routed through.
//! Built-in personas ship with the application; custom personas are created by
//! the user at runtime and stored in the persisted aggregate.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Category used to group personas in listings.
#[derive(
    Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString,
)]
pub enum PersonaCategory {
    Classic,
    Modern,
    Eastern,
    Political,
    Experimental,
    Scientific,
    Theological,
    Economic,
    Biological,
    Fringe,
    Arts,
    /// User-created personas
    Custom,
}

/// Represents the source of a persona (system-provided or user-created).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersonaSource {
    /// Personas compiled into the registry
    #[default]
    System,
    /// User-created custom personas
    User,
}

/// A fully resolved persona, ready for prompt assembly.
///
/// `id` is the string stored in `Conversation::persona` and in the
/// `persona` tag of multi-persona assistant messages. For built-ins it is the
/// registry key (e.g. `"Stoic"`); for custom personas it is the persona name.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PersonaConfig {
    /// Identifier used for lookups and message attribution
    pub id: String,
    /// One-line description for listings
    pub description: String,
    /// Immutable base system-prompt fragment
    pub base_instruction: String,
    /// Listing category
    pub category: PersonaCategory,
    /// Key themes the persona gravitates towards
    #[serde(default)]
    pub focus: Vec<String>,
    /// Source of the persona (System or User)
    #[serde(default)]
    pub source: PersonaSource,
}

/// A runtime-created persona.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomPersona {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Display name, also used as the persona id in conversations
    pub name: String,
    pub description: String,
    /// Base system-prompt fragment
    pub instruction: String,
    /// Display color hint for front-ends
    #[serde(default)]
    pub color: String,
    /// Creation time, milliseconds since the Unix epoch
    pub created_at: i64,
}

impl CustomPersona {
    /// Converts this custom persona into a prompt-ready config.
    pub fn to_config(&self) -> PersonaConfig {
        PersonaConfig {
            id: self.name.clone(),
            description: self.description.clone(),
            base_instruction: self.instruction.clone(),
            category: PersonaCategory::Custom,
            focus: Vec::new(),
            source: PersonaSource::User,
        }
    }
}

/// Outcome of a persona lookup.
///
/// Resolution never fails; callers that care whether the requested id was
/// actually known can match on the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonaResolution {
    /// The requested id resolved to a built-in or custom persona
    Found(PersonaConfig),
    /// The requested id was unknown and the default persona was used
    UsingFallback(PersonaConfig),
}

impl PersonaResolution {
    /// Returns the resolved config regardless of how it was obtained.
    pub fn config(&self) -> &PersonaConfig {
        match self {
            Self::Found(config) | Self::UsingFallback(config) => config,
        }
    }

    /// Consumes the resolution and returns the config.
    pub fn into_config(self) -> PersonaConfig {
        match self {
            Self::Found(config) | Self::UsingFallback(config) => config,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::UsingFallback(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_round_trips_through_strings() {
        assert_eq!(PersonaCategory::Theological.to_string(), "Theological");
        assert_eq!(
            PersonaCategory::from_str("Fringe").unwrap(),
            PersonaCategory::Fringe
        );
    }

    #[test]
    fn test_custom_persona_uses_name_as_id() {
        let custom = CustomPersona {
            id: "7d1c".to_string(),
            name: "Devil's Advocate".to_string(),
            description: "Argues the other side".to_string(),
            instruction: "Always take the opposing view.".to_string(),
            color: String::new(),
            created_at: 0,
        };

        let config = custom.to_config();
        assert_eq!(config.id, "Devil's Advocate");
        assert_eq!(config.base_instruction, "Always take the opposing view.");
        assert_eq!(config.category, PersonaCategory::Custom);
        assert_eq!(config.source, PersonaSource::User);
    }

    #[test]
    fn test_custom_persona_serializes_camel_case() {
        let custom = CustomPersona {
            id: "1".to_string(),
            name: "N".to_string(),
            description: "D".to_string(),
            instruction: "I".to_string(),
            color: "amber".to_string(),
            created_at: 42,
        };
        let json = serde_json::to_value(&custom).unwrap();
        assert_eq!(json["createdAt"], 42);
    }
}
