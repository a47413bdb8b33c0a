use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use planner_core::{
    load_settings, settings::normalize_base_url, CancellationToken, NutritionTargetsInput,
    PlanServiceClient, PlannerSession, PreferenceModel,
};
use shared::domain::{CookingSkillLevel, DietaryRestriction};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

use render::{describe_client_failure, describe_failure, PlanReport};

#[derive(Parser, Debug)]
#[command(name = "meal-planner", about = "Weekly meal plans and grocery lists")]
struct Cli {
    /// Planning service URL; overrides planner.toml and the environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a weekly plan from the given preferences.
    Plan(PlanArgs),
    /// List accepted --restriction and --skill values.
    Options,
    Recipes,
    Ingredients,
    /// Fetch recipes and ingredients concurrently.
    Catalog,
    Ping,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[arg(long = "restriction", value_name = "TAG")]
    restrictions: Vec<DietaryRestriction>,
    /// Comma separated.
    #[arg(long, default_value = "")]
    allergies: String,
    /// Comma separated.
    #[arg(long, default_value = "")]
    dislikes: String,
    /// Comma separated.
    #[arg(long, default_value = "")]
    cuisines: String,
    #[arg(long, default_value = "")]
    protein: String,
    #[arg(long, default_value = "")]
    carbs: String,
    #[arg(long, default_value = "")]
    fat: String,
    #[arg(long, default_value = "")]
    calories: String,
    #[arg(long, default_value_t = CookingSkillLevel::Intermediate)]
    skill: CookingSkillLevel,
    #[arg(long, default_value = "60")]
    max_cooking_time: String,
    #[arg(long, default_value = "100")]
    budget: String,
    #[arg(long, default_value = "2")]
    max_repeats: String,
    /// Print the raw service response instead of the report.
    #[arg(long)]
    json: bool,
}

impl PlanArgs {
    fn preferences(&self) -> PreferenceModel {
        let mut prefs = PreferenceModel::default();
        for restriction in &self.restrictions {
            prefs.set_dietary_restriction(*restriction, true);
        }
        prefs.set_avoidances(self.allergies.as_str(), self.dislikes.as_str());
        prefs.set_preferred_cuisines(self.cuisines.as_str());
        prefs.set_nutrition_targets(NutritionTargetsInput {
            protein_g: self.protein.clone(),
            carbs_g: self.carbs.clone(),
            fat_g: self.fat.clone(),
            calories: self.calories.clone(),
        });
        prefs.set_cooking(self.skill, self.max_cooking_time.as_str());
        prefs.set_budget(self.budget.as_str(), self.max_repeats.as_str());
        prefs
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings().context("failed to load planner settings")?;
    if let Some(api_url) = cli.api_url.as_deref() {
        settings.api_base_url = normalize_base_url(api_url)?;
    }
    let client = PlanServiceClient::from_settings(&settings)?;
    info!(api_base_url = %client.base_url(), "planner: using planning service");

    match cli.command {
        Command::Plan(args) => run_plan(client, args).await,
        Command::Options => {
            println!("Dietary restrictions:");
            for restriction in DietaryRestriction::ALL {
                println!("  {restriction}");
            }
            println!("Cooking skill levels:");
            for level in CookingSkillLevel::ALL {
                println!("  {level}");
            }
            Ok(())
        }
        Command::Recipes => {
            let recipes = client
                .get_recipes()
                .await
                .map_err(|err| anyhow!(describe_client_failure(&err)))?;
            for line in render::recipe_lines(&recipes) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Ingredients => {
            let ingredients = client
                .get_ingredients()
                .await
                .map_err(|err| anyhow!(describe_client_failure(&err)))?;
            for line in render::ingredient_lines(&ingredients) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Catalog => {
            let (recipes, ingredients) =
                futures::future::join(client.get_recipes(), client.get_ingredients()).await;
            match recipes {
                Ok(recipes) => {
                    println!("Recipes ({})", recipes.len());
                    for line in render::recipe_lines(&recipes) {
                        println!("  {line}");
                    }
                }
                Err(err) => eprintln!("Recipes unavailable: {}", describe_client_failure(&err)),
            }
            match ingredients {
                Ok(ingredients) => {
                    println!("Ingredients ({})", ingredients.len());
                    for line in render::ingredient_lines(&ingredients) {
                        println!("  {line}");
                    }
                }
                Err(err) => {
                    eprintln!("Ingredients unavailable: {}", describe_client_failure(&err))
                }
            }
            Ok(())
        }
        Command::Ping => {
            let banner = client
                .health()
                .await
                .map_err(|err| anyhow!(describe_client_failure(&err)))?;
            println!("{}", banner.message);
            Ok(())
        }
    }
}

async fn run_plan(client: PlanServiceClient, args: PlanArgs) -> Result<()> {
    let session = PlannerSession::with_preferences(client, args.preferences());
    let prefs = session.preferences();
    let restrictions: Vec<&str> = prefs.dietary_restrictions().map(|r| r.as_str()).collect();
    info!(
        restrictions = ?restrictions,
        skill = %prefs.cooking_skill_level(),
        "planner: generating meal plan"
    );

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let submitted = session
        .submit(&cancel)
        .await
        .map_err(|err| anyhow!(describe_failure(&err)))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&submitted.plan)?);
    } else {
        print!("{}", PlanReport(&submitted.view));
    }
    Ok(())
}
