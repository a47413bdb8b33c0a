//! Presentation model derived from a [`MealPlanResponse`].
//!
//! Everything here keeps the order the service chose: days, meals, grocery
//! sections and the items inside them are never re-sorted or merged.

use chrono::NaiveDate;
use shared::protocol::{
    DailyMeals, GroceryItem, GroceryList, Meal, MealPlanResponse, Store, StoreRef,
};

const MISSING_RECIPE: &str = "No recipe assigned";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub week_heading: String,
    pub days: Vec<DayView>,
    pub nutrition: NutritionView,
    pub total_cost: String,
    pub grocery: GroceryView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayView {
    pub label: String,
    pub meals: Vec<MealView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealView {
    pub meal_type: String,
    pub recipe_name: String,
    /// Cooking time and calories, when a recipe is assigned.
    pub details: Option<String>,
}

/// Weekly totals, one decimal place each.
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionView {
    pub protein_g: String,
    pub carbs_g: String,
    pub fat_g: String,
    pub calories: String,
}

/// Optimizer extras are `None`/empty when the response omits them.
#[derive(Debug, Clone, PartialEq)]
pub struct GroceryView {
    pub store: Option<String>,
    pub single_store_mode: Option<bool>,
    pub stores_used: Vec<String>,
    /// Two decimals.
    pub total_cost: Option<String>,
    pub cost_savings: Option<String>,
    pub sections: Vec<SectionView>,
    pub substitutions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub name: String,
    pub items: Vec<GroceryLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroceryLine {
    pub name: String,
    /// Quantity to one decimal followed by the unit, e.g. `2.0 bunch`.
    pub amount: String,
}

pub fn aggregate(response: &MealPlanResponse) -> RenderModel {
    RenderModel {
        week_heading: format!("Week of {}", response.week_start_date.format("%B %-d, %Y")),
        days: response
            .daily_meals
            .iter()
            .enumerate()
            .map(|(index, day)| day_view(index, day))
            .collect(),
        nutrition: NutritionView {
            protein_g: one_decimal(response.nutritional_summary.total_protein_g),
            carbs_g: one_decimal(response.nutritional_summary.total_carbs_g),
            fat_g: one_decimal(response.nutritional_summary.total_fat_g),
            calories: one_decimal(response.nutritional_summary.total_calories),
        },
        total_cost: two_decimals(response.total_cost),
        grocery: grocery_view(&response.grocery_list),
    }
}

pub fn day_label(index: usize, date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%A, %b %-d").to_string(),
        None => format!("Day {}", index + 1),
    }
}

fn day_view(index: usize, day: &DailyMeals) -> DayView {
    DayView {
        label: day_label(index, day.date),
        meals: day.meals.iter().map(meal_view).collect(),
    }
}

fn meal_view(meal: &Meal) -> MealView {
    match &meal.recipe {
        Some(recipe) => MealView {
            meal_type: title_case(&meal.meal_type),
            recipe_name: recipe.name.clone(),
            details: Some(format!(
                "{} min, {:.0} kcal",
                recipe.cooking_time_min, recipe.total_calories
            )),
        },
        None => MealView {
            meal_type: title_case(&meal.meal_type),
            recipe_name: MISSING_RECIPE.to_string(),
            details: None,
        },
    }
}

fn grocery_view(list: &GroceryList) -> GroceryView {
    GroceryView {
        store: list.selected_store.as_ref().map(store_label),
        single_store_mode: list.single_store_mode,
        stores_used: list
            .stores_used
            .iter()
            .map(|entry| match entry {
                StoreRef::Store(store) => store_label(store),
                StoreRef::Id(id) => id.clone(),
            })
            .collect(),
        total_cost: list.total_cost.map(two_decimals),
        cost_savings: list.cost_savings.map(two_decimals),
        sections: list
            .items_by_section
            .iter()
            .map(|(name, items)| SectionView {
                name: name.clone(),
                items: items.iter().map(grocery_line).collect(),
            })
            .collect(),
        substitutions: list
            .substitutions
            .iter()
            .map(|sub| {
                format!(
                    "{}: {} saves ${:.2}",
                    sub.original_item, sub.alternative_store, sub.estimated_savings
                )
            })
            .collect(),
    }
}

fn store_label(store: &Store) -> String {
    match &store.location {
        Some(location) if !location.is_empty() => format!("{} ({location})", store.name),
        _ => store.name.clone(),
    }
}

pub fn grocery_line(item: &GroceryItem) -> GroceryLine {
    let quantity = one_decimal(item.quantity);
    GroceryLine {
        name: item.name.clone(),
        amount: if item.unit.is_empty() {
            quantity
        } else {
            format!("{quantity} {}", item.unit)
        },
    }
}

fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

fn two_decimals(value: f64) -> String {
    format!("{value:.2}")
}

fn title_case(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "tests/aggregator_tests.rs"]
mod tests;
