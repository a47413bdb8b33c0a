use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownVariant;

macro_rules! wire_enum {
    ($name:ident, $kind:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
                match normalized.as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(UnknownVariant::new($kind, raw)),
                }
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    Keto,
    Paleo,
    Halal,
    Kosher,
    GlutenFree,
    DairyFree,
}

wire_enum!(DietaryRestriction, "dietary restriction", {
    Vegetarian => "vegetarian",
    Vegan => "vegan",
    Keto => "keto",
    Paleo => "paleo",
    Halal => "halal",
    Kosher => "kosher",
    GlutenFree => "gluten_free",
    DairyFree => "dairy_free",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookingSkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

wire_enum!(CookingSkillLevel, "cooking skill level", {
    Beginner => "beginner",
    Intermediate => "intermediate",
    Advanced => "advanced",
});
