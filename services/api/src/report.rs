use crate::infra::{load_tables, read_request};
use chrono::NaiveDate;
use clap::Args;
use moving_quote::config::PricingConfig;
use moving_quote::error::AppError;
use moving_quote::quote::{
    format_amount, format_total, DateFlags, LoadTotals, QuoteEngine, QuoteRequest, QuoteResult,
    VehicleRecommendation,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct PricingArgs {
    /// JSON price book replacing the built-in tables
    #[arg(long)]
    pub(crate) tables: Option<PathBuf>,
    /// Item catalog CSV (item,volume_cbm,weight_kg)
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

impl PricingArgs {
    fn into_config(self) -> PricingConfig {
        PricingConfig {
            tables_path: self.tables,
            catalog_csv: self.catalog_csv,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Quote request JSON file
    #[arg(long)]
    pub(crate) request: PathBuf,
    /// Move date (YYYY-MM-DD); weekend and month-end surcharges are derived from it
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) move_date: Option<NaiveDate>,
    /// Also print the vehicle recommendation for the request's inventory
    #[arg(long)]
    pub(crate) with_recommendation: bool,
    #[command(flatten)]
    pub(crate) pricing: PricingArgs,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Quote request JSON file
    #[arg(long)]
    pub(crate) request: PathBuf,
    #[command(flatten)]
    pub(crate) pricing: PricingArgs,
}

fn build_engine(pricing: PricingArgs) -> Result<QuoteEngine, AppError> {
    let tables = load_tables(&pricing.into_config())?;
    Ok(QuoteEngine::new(Arc::new(tables)))
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs {
        request,
        move_date,
        with_recommendation,
        pricing,
    } = args;

    let engine = build_engine(pricing)?;
    let mut request = read_request(&request)?;
    if let Some(date) = move_date {
        request.dates = DateFlags::from_move_date(date).merge(request.dates);
    }

    if with_recommendation {
        let load = engine.aggregate(&request);
        let recommendation = engine.recommend(&load, request.move_type);
        render_recommendation(&load, &recommendation);
        println!();
    }

    let result = engine.quote(&request);
    render_quote(&request, &result);
    Ok(())
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs { request, pricing } = args;

    let engine = build_engine(pricing)?;
    let request = read_request(&request)?;
    let load = engine.aggregate(&request);
    let recommendation = engine.recommend(&load, request.move_type);
    render_recommendation(&load, &recommendation);
    Ok(())
}

fn render_recommendation(load: &LoadTotals, recommendation: &VehicleRecommendation) {
    println!("Inventory load");
    println!(
        "- {:.2} CBM | {:.2} kg",
        load.total_volume, load.total_weight
    );

    match recommendation {
        VehicleRecommendation::NotNeeded => println!("Vehicle: none needed (no items selected)"),
        VehicleRecommendation::NoCandidates => {
            println!("Vehicle: no priced vehicles for this move type")
        }
        VehicleRecommendation::Fits { .. } | VehicleRecommendation::Overflow { .. } => println!(
            "Vehicle: {} ({:.1}% space remaining)",
            recommendation.label().unwrap_or_default(),
            recommendation.remaining_space_percent()
        ),
    }
}

fn render_quote(request: &QuoteRequest, result: &QuoteResult) {
    println!("Moving quote ({})", request.move_type.label());
    println!(
        "Vehicle: {}",
        request.selected_vehicle().unwrap_or("not selected")
    );

    println!("\nCost breakdown");
    for line in &result.lines {
        if line.note.is_empty() {
            println!("- {}: {}", line.label, won(format_amount(line.amount)));
        } else {
            println!(
                "- {}: {} ({})",
                line.label,
                won(format_amount(line.amount)),
                line.note
            );
        }
    }
    println!("\nTotal: {}", won(format_total(result.total_cost)));

    match &result.personnel {
        Some(crew) => {
            println!("\nCrew");
            println!(
                "- base {} men / {} women, added {} men / {} women",
                crew.base_men, crew.base_women, crew.added_men, crew.added_women
            );
            let removed = if crew.base_female_removed {
                " (base women excluded)"
            } else {
                ""
            };
            println!(
                "- final {} men / {} women{}",
                crew.final_men, crew.final_women, removed
            );
        }
        None => println!("\nCrew: not determined"),
    }
}

fn won(grouped: String) -> String {
    format!("{grouped} KRW")
}
