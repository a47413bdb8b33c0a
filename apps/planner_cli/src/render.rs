//! Terminal rendering of plans, reference data and failures.

use std::fmt;

use planner_core::{aggregator::RenderModel, ClientError, PlanError};
use shared::protocol::{Ingredient, Recipe};

pub struct PlanReport<'a>(pub &'a RenderModel);

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(f, "{}", view.week_heading)?;
        writeln!(f)?;

        for day in &view.days {
            writeln!(f, "{}", day.label)?;
            if day.meals.is_empty() {
                writeln!(f, "  (no meals planned)")?;
            }
            for meal in &day.meals {
                match &meal.details {
                    Some(details) => {
                        writeln!(f, "  {:<10} {} ({details})", meal.meal_type, meal.recipe_name)?
                    }
                    None => writeln!(f, "  {:<10} {}", meal.meal_type, meal.recipe_name)?,
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "Weekly nutrition")?;
        writeln!(f, "  Protein:  {} g", view.nutrition.protein_g)?;
        writeln!(f, "  Carbs:    {} g", view.nutrition.carbs_g)?;
        writeln!(f, "  Fat:      {} g", view.nutrition.fat_g)?;
        writeln!(f, "  Calories: {}", view.nutrition.calories)?;
        writeln!(f, "Total cost: ${}", view.total_cost)?;

        writeln!(f)?;
        match &view.grocery.store {
            Some(store) => writeln!(f, "Grocery list ({store})")?,
            None => writeln!(f, "Grocery list")?,
        }
        if view.grocery.single_store_mode == Some(false) && !view.grocery.stores_used.is_empty() {
            writeln!(f, "  Stores: {}", view.grocery.stores_used.join(", "))?;
        }
        for section in &view.grocery.sections {
            writeln!(f, "  {}", section.name)?;
            for line in &section.items {
                writeln!(f, "    {:<24} {}", line.name, line.amount)?;
            }
        }
        if let Some(total) = &view.grocery.total_cost {
            writeln!(f, "  Grocery total: ${total}")?;
        }
        if let Some(savings) = &view.grocery.cost_savings {
            writeln!(f, "  Optimizer savings: ${savings}")?;
        }
        if !view.grocery.substitutions.is_empty() {
            writeln!(f, "Savings")?;
            for substitution in &view.grocery.substitutions {
                writeln!(f, "  {substitution}")?;
            }
        }
        Ok(())
    }
}

pub fn recipe_lines(recipes: &[Recipe]) -> Vec<String> {
    recipes
        .iter()
        .map(|recipe| {
            format!(
                "{:<8} {} [{}, {} min, ${:.2}]",
                recipe.id, recipe.name, recipe.cuisine_type, recipe.cooking_time_min, recipe.total_cost
            )
        })
        .collect()
}

pub fn ingredient_lines(ingredients: &[Ingredient]) -> Vec<String> {
    ingredients
        .iter()
        .map(|ingredient| {
            format!(
                "{} ({:.1} {}) ${:.3}/{}",
                ingredient.name,
                ingredient.amount,
                ingredient.unit,
                ingredient.cost_per_unit,
                ingredient.unit
            )
        })
        .collect()
}

/// User-facing text for a failed submission; each error kind gets its own.
pub fn describe_failure(err: &PlanError) -> String {
    match err {
        PlanError::Validation(err) => format!("Please check {}: {err}", err.field()),
        PlanError::InFlight => {
            "A meal plan is already being generated; wait for it to finish.".to_string()
        }
        PlanError::Client(err) => describe_client_failure(err),
    }
}

pub fn describe_client_failure(err: &ClientError) -> String {
    match err {
        ClientError::Transport { .. } => {
            format!("Planning service unreachable; check the API URL and retry. ({err})")
        }
        ClientError::Service { error, .. } => {
            format!("Planning service error: {}", error.message())
        }
        ClientError::Parse { .. } => {
            format!("Planning service sent a response that could not be read. ({err})")
        }
        ClientError::Cancelled { .. } => "Request cancelled.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::{
        aggregator::{DayView, GroceryLine, GroceryView, MealView, NutritionView, SectionView},
        ServiceError, ValidationError,
    };

    fn view() -> RenderModel {
        RenderModel {
            week_heading: "Week of January 6, 2025".into(),
            days: vec![
                DayView {
                    label: "Monday, Jan 6".into(),
                    meals: vec![MealView {
                        meal_type: "Breakfast".into(),
                        recipe_name: "Spinach Omelette".into(),
                        details: Some("25 min, 420 kcal".into()),
                    }],
                },
                DayView {
                    label: "Day 2".into(),
                    meals: Vec::new(),
                },
            ],
            nutrition: NutritionView {
                protein_g: "120.0".into(),
                carbs_g: "300.5".into(),
                fat_g: "80.0".into(),
                calories: "2400.0".into(),
            },
            total_cost: "42.50".into(),
            grocery: GroceryView {
                store: Some("ValueGrocer (Uptown)".into()),
                single_store_mode: Some(true),
                stores_used: vec!["ValueGrocer (Uptown)".into()],
                total_cost: Some("41.75".into()),
                cost_savings: Some("1.05".into()),
                sections: vec![SectionView {
                    name: "Produce".into(),
                    items: vec![GroceryLine {
                        name: "Spinach".into(),
                        amount: "2.0 bunch".into(),
                    }],
                }],
                substitutions: vec!["Broccoli: FreshMart saves $1.05".into()],
            },
        }
    }

    #[test]
    fn report_lists_days_nutrition_and_groceries() {
        let text = PlanReport(&view()).to_string();

        assert!(text.starts_with("Week of January 6, 2025\n"));
        assert!(text.contains("Monday, Jan 6\n  Breakfast  Spinach Omelette (25 min, 420 kcal)"));
        assert!(text.contains("Day 2\n  (no meals planned)"));
        assert!(text.contains("Total cost: $42.50"));
        assert!(text.contains("Grocery list (ValueGrocer (Uptown))"));
        assert!(text.contains("Spinach"));
        assert!(text.contains("2.0 bunch"));
        assert!(text.contains("Broccoli: FreshMart saves $1.05"));
        assert!(text.contains("Grocery total: $41.75"));
        assert!(text.contains("Optimizer savings: $1.05"));
        assert!(!text.contains("Stores:"));
    }

    #[test]
    fn multi_store_report_lists_every_store() {
        let mut model = view();
        model.grocery.store = None;
        model.grocery.single_store_mode = Some(false);
        model.grocery.stores_used = vec!["store_1".into(), "store_3".into()];
        model.grocery.cost_savings = None;

        let text = PlanReport(&model).to_string();
        assert!(text.contains("Grocery list\n  Stores: store_1, store_3\n"));
        assert!(!text.contains("Optimizer savings"));
    }

    #[test]
    fn failures_are_described_per_kind() {
        let validation = PlanError::Validation(ValidationError::NotANumber {
            field: "target_calories",
            value: "abc".into(),
        });
        assert!(describe_failure(&validation).contains("target_calories"));

        let service = PlanError::Client(ClientError::Service {
            endpoint: "/generate-meal-plan",
            error: ServiceError::new(500, None),
        });
        assert_eq!(
            describe_failure(&service),
            "Planning service error: HTTP error, status=500"
        );

        let cancelled = PlanError::Client(ClientError::Cancelled {
            endpoint: "/generate-meal-plan",
        });
        assert_eq!(describe_failure(&cancelled), "Request cancelled.");
        assert!(describe_failure(&PlanError::InFlight).contains("already"));
    }
}
