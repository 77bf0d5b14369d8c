use crate::infra::parse_entity_id;
use clap::Args;
use std::path::PathBuf;
use study_planner::budget::MonthlyBudget;
use study_planner::catalog::{CatalogImporter, CostCategory, EntityCatalog, EntityId};
use study_planner::comparison::{AggregateView, ComparisonWorkspace, SelectionEvent};
use study_planner::config::{AppConfig, PlannerConfig};
use study_planner::currency::{convert, CurrencyTable};
use study_planner::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Comma-separated city ids, in selection order (e.g. london,berlin)
    #[arg(long, value_delimiter = ',', value_parser = parse_entity_id)]
    pub(crate) cities: Vec<EntityId>,
    /// Free-text filter applied to the catalog listing
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// List every match instead of the first few
    #[arg(long)]
    pub(crate) show_all: bool,
    /// Optional CSV export replacing the built-in catalog
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ConvertArgs {
    #[arg(long)]
    pub(crate) amount: f64,
    #[arg(long, default_value = "USD")]
    pub(crate) from: String,
    #[arg(long, default_value = "EUR")]
    pub(crate) to: String,
    /// Swap the currencies before converting
    #[arg(long)]
    pub(crate) swap: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BudgetArgs {
    #[arg(long, default_value = "USD")]
    pub(crate) currency: String,
    #[arg(long)]
    pub(crate) accommodation: Option<String>,
    #[arg(long)]
    pub(crate) food: Option<String>,
    #[arg(long)]
    pub(crate) transportation: Option<String>,
    #[arg(long)]
    pub(crate) utilities: Option<String>,
    #[arg(long)]
    pub(crate) entertainment: Option<String>,
    #[arg(long)]
    pub(crate) education: Option<String>,
}

pub(crate) fn load_catalog(path: Option<PathBuf>) -> Result<EntityCatalog, AppError> {
    match path {
        Some(path) => CatalogImporter::from_path(path).map_err(AppError::from),
        None => Ok(EntityCatalog::standard()),
    }
}

fn planner_config() -> Result<PlannerConfig, AppError> {
    Ok(AppConfig::load()?.planner)
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let CompareArgs {
        cities,
        query,
        show_all,
        catalog,
    } = args;

    let config = planner_config()?;
    // Imported catalogs are priced in whatever the export used.
    if catalog.is_none() {
        config.ensure_reporting_currency(EntityCatalog::STANDARD_PRICING_CURRENCY)?;
    }
    let catalog = load_catalog(catalog)?;
    let mut workspace = ComparisonWorkspace::new(&catalog, &config);
    workspace.set_show_all(show_all);
    if let Some(query) = query {
        workspace.set_query(query);
    }

    let page = workspace.visible();
    println!(
        "Catalog matches for '{}': {} of {}",
        workspace.query(),
        page.visible.len(),
        page.total_matches
    );
    for entity in &page.visible {
        println!(
            "  - {} ({}): {} {}/month",
            entity.name,
            entity.id,
            entity.monthly_total(),
            config.reporting_currency
        );
    }
    if page.has_more() {
        println!("  ... {} more (use --show-all)", page.hidden);
    }

    for id in cities {
        if let SelectionEvent::Replaced { evicted, .. } = workspace.toggle(id) {
            println!(
                "Selection full ({} max); dropped {}",
                config.selection_capacity, evicted
            );
        }
    }

    match workspace.aggregate() {
        Some(view) => render_comparison(&view, &config.reporting_currency),
        None => println!("\nSelect cities with --cities to compare them."),
    }

    Ok(())
}

fn render_comparison(view: &AggregateView, currency: &str) {
    println!("\nCost comparison ({currency})");
    for row in &view.categories {
        let period = if row.annual { "/year" } else { "/month" };
        println!("{}{}", row.label, period);
        for cell in &row.cells {
            println!(
                "  {:<14} {:>8}{}",
                cell.entity_name,
                cell.value,
                highlight_marker(cell.is_max, cell.is_min)
            );
        }
    }

    println!("Total monthly (excluding tuition)");
    for cell in &view.monthly_totals {
        println!(
            "  {:<14} {:>8}{}",
            cell.entity_name,
            cell.value,
            highlight_marker(cell.is_max, cell.is_min)
        );
    }

    for row in &view.quality {
        println!("{} (0-10)", row.label);
        for cell in &row.cells {
            let best = if cell.is_best { "  <- best" } else { "" };
            println!("  {:<14} {:>8.1}{}", cell.entity_id, cell.rating, best);
        }
    }
}

fn highlight_marker(is_max: bool, is_min: bool) -> &'static str {
    match (is_max, is_min) {
        (true, true) => "  (highest, lowest)",
        (true, false) => "  (highest)",
        (false, true) => "  (lowest)",
        (false, false) => "",
    }
}

pub(crate) fn run_convert(args: ConvertArgs) -> Result<(), AppError> {
    let ConvertArgs {
        amount,
        from,
        to,
        swap,
    } = args;
    let (from, to) = if swap {
        study_planner::currency::swap(from, to)
    } else {
        (from, to)
    };

    let table = CurrencyTable::standard();
    let conversion = convert(amount, &from, &to, &table)?;
    println!(
        "{:.2} {} = {:.2} {} (rate {:.4})",
        conversion.amount,
        conversion.from,
        conversion.display_amount(),
        conversion.to,
        conversion.rate
    );
    Ok(())
}

pub(crate) fn run_budget(args: BudgetArgs) -> Result<(), AppError> {
    let mut budget = MonthlyBudget::starter(args.currency.as_str());
    let overrides = [
        (CostCategory::Accommodation, args.accommodation),
        (CostCategory::Food, args.food),
        (CostCategory::Transportation, args.transportation),
        (CostCategory::Utilities, args.utilities),
        (CostCategory::Entertainment, args.entertainment),
        (CostCategory::Education, args.education),
    ];
    for (category, raw) in overrides {
        if let Some(raw) = raw {
            budget.set_amount(category, &raw);
        }
    }

    let summary = budget.summary();
    println!("Monthly budget ({})", summary.currency);
    for share in &summary.shares {
        println!(
            "  {:<24} {:>8} {:>6.1}%",
            share.label, share.amount, share.percentage
        );
    }
    println!("Monthly total: {}", summary.total_monthly);
    println!("Yearly total: {}", summary.total_yearly);
    println!(
        "Accommodation is {}% of your budget. Consider university housing or shared apartments to reduce costs.",
        summary.accommodation_share_pct
    );

    match summary.donut() {
        Ok(chart) => {
            println!("Spending chart:");
            for arc in &chart.arcs {
                println!("  {:<24} {:>5.1}%", arc.label, arc.percentage());
            }
        }
        Err(err) => println!("Spending chart unavailable: {err}"),
    }

    Ok(())
}
