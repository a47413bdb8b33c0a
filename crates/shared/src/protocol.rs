use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{CookingSkillLevel, DietaryRestriction};

/// Normalized preference payload posted to `/generate-meal-plan`.
///
/// Absent nutrition targets are sent as explicit `null`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestPayload {
    pub dietary_restrictions: Vec<DietaryRestriction>,
    pub allergies: Vec<String>,
    pub dislikes: Vec<String>,
    pub target_protein_g: Option<u32>,
    pub target_carbs_g: Option<u32>,
    pub target_fat_g: Option<u32>,
    pub target_calories: Option<u32>,
    pub preferred_cuisines: Vec<String>,
    pub cooking_skill_level: CookingSkillLevel,
    pub max_cooking_time_min: u32,
    pub weekly_budget: f64,
    pub max_repeats_per_week: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanResponse {
    pub week_start_date: NaiveDate,
    #[serde(default)]
    pub daily_meals: Vec<DailyMeals>,
    pub total_cost: f64,
    #[serde(default)]
    pub nutritional_summary: NutritionalSummary,
    #[serde(default)]
    pub grocery_list: GroceryList,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMeals {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    /// Weekday name assigned by the service, e.g. "Monday".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    pub meal_type: String,
    #[serde(default)]
    pub recipe: Option<Recipe>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionalSummary {
    #[serde(default)]
    pub total_protein_g: f64,
    #[serde(default)]
    pub total_carbs_g: f64,
    #[serde(default)]
    pub total_fat_g: f64,
    #[serde(default)]
    pub total_calories: f64,
}

/// Grocery list as assembled by the service's store optimizer.
///
/// `items_by_section` keeps the section order of the response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroceryList {
    #[serde(default)]
    pub items_by_section: IndexMap<String, Vec<GroceryItem>>,
    #[serde(default)]
    pub single_store_mode: Option<bool>,
    #[serde(default)]
    pub selected_store: Option<Store>,
    #[serde(default)]
    pub stores_used: Vec<StoreRef>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default)]
    pub cost_savings: Option<f64>,
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroceryItem {
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
}

/// Entry of `stores_used`: a full store in single-store mode, a bare store
/// id when the optimizer split the list across stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoreRef {
    Store(Store),
    Id(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Substitution {
    pub original_item: String,
    pub alternative_store: String,
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub alternative_price: f64,
    #[serde(default)]
    pub savings_per_unit: f64,
    #[serde(default)]
    pub estimated_savings: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub cooking_time_min: u32,
    #[serde(default)]
    pub difficulty_level: String,
    #[serde(default)]
    pub cuisine_type: String,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default)]
    pub total_calories: f64,
    #[serde(default)]
    pub total_protein_g: f64,
    #[serde(default)]
    pub total_carbs_g: f64,
    #[serde(default)]
    pub total_fat_g: f64,
    #[serde(default)]
    pub total_cost: f64,
}

/// Ingredient with per-unit pricing and macros.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub cost_per_unit: f64,
    #[serde(default)]
    pub calories_per_unit: f64,
    #[serde(default)]
    pub protein_per_unit: f64,
    #[serde(default)]
    pub carbs_per_unit: f64,
    #[serde(default)]
    pub fat_per_unit: f64,
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceBanner {
    pub message: String,
}
