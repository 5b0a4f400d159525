use crate::config;
use crate::container::AppContainer;
use crate::food::FoodSearchResult;
use crate::nutrition::{self, macros, MacroPlan, Sex};
use crate::session::SearchSession;
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coach-potato")]
#[command(about = "Food search and nutrition calculator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: <config dir>/coach-potato/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Search foods, falling back to the secondary provider on failure
    Search {
        query: Vec<String>,

        /// Number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Print the final session state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Split a calorie target into macro grams
    Plan {
        #[arg(long)]
        calories: f64,
        #[arg(long, default_value_t = 0.3)]
        protein: f64,
        #[arg(long, default_value_t = 0.4)]
        carbs: f64,
        #[arg(long, default_value_t = 0.3)]
        fat: f64,
    },
    /// Basal metabolic rate (Mifflin-St Jeor), optionally with TDEE
    Bmr {
        #[arg(long, value_enum)]
        sex: SexArg,
        #[arg(long)]
        weight_kg: f64,
        #[arg(long)]
        height_cm: f64,
        #[arg(long)]
        age: u32,
        /// Activity multiplier for total daily energy expenditure
        #[arg(long)]
        activity: Option<f64>,
    },
    /// Print the config file location
    ConfigPath,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SexArg {
    Male,
    Female,
}

impl From<SexArg> for Sex {
    fn from(value: SexArg) -> Self {
        match value {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_file = match &cli.config {
        Some(path) => path.clone(),
        None => config::config_path()?,
    };

    match cli.command {
        Command::Search { query, pages, json } => {
            let loaded = config::load_or_create_config_at(&config_file)?;
            if loaded.created {
                eprintln!("Created default config at: {}", config_file.display());
            }
            let config = loaded.config;

            let log_guard = crate::logging::init(&config)?;
            if let Some(guard) = &log_guard {
                eprintln!("Debug log: {}", guard.path().display());
            }
            let container = AppContainer::from_config(&config)?;
            let mut session = container.new_session();
            session.set_query(query.join(" "));
            run_search(&mut session, pages).await;

            if json {
                let text = serde_json::to_string_pretty(&session.snapshot())
                    .context("Failed to serialize session")?;
                println!("{text}");
            } else {
                print_session(&session);
            }
        }
        Command::Plan {
            calories,
            protein,
            carbs,
            fat,
        } => {
            let plan = MacroPlan::new(calories, protein, carbs, fat)?;
            println!("Calories: {:.0} kcal", plan.calories);
            println!("Protein:  {:.1} g", plan.protein);
            println!("Carbs:    {:.1} g", plan.carbs);
            println!("Fat:      {:.1} g", plan.fat);
        }
        Command::Bmr {
            sex,
            weight_kg,
            height_cm,
            age,
            activity,
        } => {
            if weight_kg <= 0.0 || height_cm <= 0.0 {
                bail!("weight and height must be positive");
            }
            let bmr = macros::bmr(sex.into(), weight_kg, height_cm, age);
            println!("BMR:  {bmr:.0} kcal/day");
            if let Some(multiplier) = activity {
                println!("TDEE: {:.0} kcal/day", macros::tdee(bmr, multiplier));
            }
        }
        Command::ConfigPath => println!("{}", config_file.display()),
    }

    Ok(())
}

/// Run the first page and then load more until `pages` pages are in or the
/// session stops offering more.
async fn run_search(session: &mut SearchSession, pages: u32) {
    session.perform_search().await;
    for _ in 1..pages {
        if !session.can_load_more() {
            break;
        }
        session.load_more().await;
    }
}

fn print_session(session: &SearchSession) {
    if let Some(err) = session.error_message() {
        eprintln!("Error: {err}");
    }
    if session.results().is_empty() {
        if session.error_message().is_none() {
            println!("No results.");
        }
        return;
    }

    for item in session.results() {
        println!("{}", format_result(item));
    }
    println!(
        "\n{} result(s), page {}{}",
        session.results().len(),
        session.current_page(),
        if session.can_load_more() { ", more available" } else { "" }
    );
}

fn format_result(item: &FoodSearchResult) -> String {
    let fmt = |v: Option<f64>| v.map_or_else(|| "?".to_string(), |v| format!("{v:.1}"));

    let mut line = format!("[{}] {}", item.source, item.name);
    if let Some(brand) = &item.brand {
        line.push_str(&format!(" ({brand})"));
    }
    line.push_str(&format!(
        " - {} kcal, P {} / C {} / F {} per 100 g",
        fmt(item.calories_per_100g),
        fmt(item.protein_per_100g),
        fmt(item.carbs_per_100g),
        fmt(item.fat_per_100g),
    ));

    if let (Some(p), Some(c), Some(f)) =
        (item.protein_per_100g, item.carbs_per_100g, item.fat_per_100g)
    {
        let split = nutrition::macro_percentages(p, c, f);
        line.push_str(&format!(
            " [{:.0}/{:.0}/{:.0}%]",
            split.protein * 100.0,
            split.carbs * 100.0,
            split.fat * 100.0
        ));
    }
    line
}
