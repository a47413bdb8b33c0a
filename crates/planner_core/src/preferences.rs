//! Raw, user-entered meal planning preferences.
//!
//! Text and number inputs are held exactly as typed; turning them into a
//! request payload is the job of [`crate::normalizer`].

use std::collections::BTreeSet;

use shared::domain::{CookingSkillLevel, DietaryRestriction};

/// Nutrition target inputs, one raw string per macro. Empty means no target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NutritionTargetsInput {
    pub protein_g: String,
    pub carbs_g: String,
    pub fat_g: String,
    pub calories: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceModel {
    pub(crate) dietary_restrictions: BTreeSet<DietaryRestriction>,
    pub(crate) allergies: String,
    pub(crate) dislikes: String,
    pub(crate) preferred_cuisines: String,
    pub(crate) targets: NutritionTargetsInput,
    pub(crate) cooking_skill_level: CookingSkillLevel,
    pub(crate) max_cooking_time_min: String,
    pub(crate) weekly_budget: String,
    pub(crate) max_repeats_per_week: String,
}

impl Default for PreferenceModel {
    fn default() -> Self {
        Self {
            dietary_restrictions: BTreeSet::new(),
            allergies: String::new(),
            dislikes: String::new(),
            preferred_cuisines: String::new(),
            targets: NutritionTargetsInput::default(),
            cooking_skill_level: CookingSkillLevel::default(),
            max_cooking_time_min: "60".into(),
            weekly_budget: "100".into(),
            max_repeats_per_week: "2".into(),
        }
    }
}

impl PreferenceModel {
    /// Flips a restriction tag; returns whether it is now selected.
    pub fn toggle_dietary_restriction(&mut self, restriction: DietaryRestriction) -> bool {
        if self.dietary_restrictions.remove(&restriction) {
            false
        } else {
            self.dietary_restrictions.insert(restriction);
            true
        }
    }

    pub fn set_dietary_restriction(&mut self, restriction: DietaryRestriction, selected: bool) {
        if selected {
            self.dietary_restrictions.insert(restriction);
        } else {
            self.dietary_restrictions.remove(&restriction);
        }
    }

    /// Comma separated allergy and dislike lists.
    pub fn set_avoidances(&mut self, allergies: impl Into<String>, dislikes: impl Into<String>) {
        self.allergies = allergies.into();
        self.dislikes = dislikes.into();
    }

    pub fn set_preferred_cuisines(&mut self, cuisines: impl Into<String>) {
        self.preferred_cuisines = cuisines.into();
    }

    pub fn set_nutrition_targets(&mut self, targets: NutritionTargetsInput) {
        self.targets = targets;
    }

    pub fn set_cooking(
        &mut self,
        skill_level: CookingSkillLevel,
        max_cooking_time_min: impl Into<String>,
    ) {
        self.cooking_skill_level = skill_level;
        self.max_cooking_time_min = max_cooking_time_min.into();
    }

    pub fn set_budget(
        &mut self,
        weekly_budget: impl Into<String>,
        max_repeats_per_week: impl Into<String>,
    ) {
        self.weekly_budget = weekly_budget.into();
        self.max_repeats_per_week = max_repeats_per_week.into();
    }

    pub fn dietary_restrictions(&self) -> impl Iterator<Item = DietaryRestriction> + '_ {
        self.dietary_restrictions.iter().copied()
    }

    pub fn cooking_skill_level(&self) -> CookingSkillLevel {
        self.cooking_skill_level
    }
}
