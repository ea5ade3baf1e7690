//! CLI command implementations.

use std::io::{self, Write};

use chrono::{Datelike, Local, NaiveDate, Utc};

use fleet::{
    month_view, parse_month, parse_search, run_bulk, Asset, AssetFilter, AssetStatus, BulkAction,
    BulkOutcome, Config, Error, MaintenanceWorkflow, Result, SearchController, Selection,
    SpecialFilter, Store, UrlState,
};

/// Parse a `YYYY-MM-DD` date.
fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidInput(format!("invalid date '{}': {}", s, e)))
}

/// The `--today` override, or the local date.
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

fn open_store() -> Result<Store> {
    Store::open(Config::load()?)
}

fn find_asset(asset_id: &str) -> Result<&'static Asset> {
    fleet::mock::find_asset(asset_id)
        .ok_or_else(|| Error::NotFound(format!("asset {}", asset_id)))
}

/// Assets matching a search, without touching recent searches.
fn matching_assets(query: &str, today: NaiveDate) -> Result<Vec<&'static Asset>> {
    let config = Config::load()?;
    let filter = AssetFilter::new(&config, today);
    Ok(filter.apply(fleet::mock::assets(), &parse_search(query), None))
}

fn print_assets(assets: &[&Asset]) {
    println!(
        "{:<8} {:<22} {:<15} {:<18} {:<28} {}",
        "ID", "NAME", "TYPE", "STATUS", "LOCATION", "NEXT"
    );
    for asset in assets {
        let location = format!("{} / {}", asset.location.facility, asset.location.area);
        let next = asset
            .next_maintenance
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:<22} {:<15} {:<18} {:<28} {}",
            asset.id, asset.name, asset.equipment_type, asset.status, location, next
        );
    }
}

/// Search assets, committing the term through the search controller.
pub fn search(
    query: &str,
    filter: Option<&str>,
    format: &str,
    record: bool,
    today: NaiveDate,
) -> Result<()> {
    let config = Config::load()?;

    let mut url = UrlState::default();
    if let Some(name) = filter {
        url.set_filter(Some(name.parse::<SpecialFilter>()?));
    }

    let mut controller = SearchController::new(&config, url);
    if record {
        controller = controller.with_store(Store::open(config.clone())?);
    }
    controller.set_search_term(query, std::time::Instant::now());
    controller.flush()?;

    let special = controller.special_filter()?;
    let matched = AssetFilter::new(&config, today).apply(
        fleet::mock::assets(),
        controller.parsed(),
        special,
    );

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&matched)?;
            println!("{}", json);
        }
        "csv" => {
            fleet::export_assets_csv(matched.iter().copied(), io::stdout().lock())?;
        }
        "table" => {
            print_assets(&matched);
            let query_string = controller.url_state().to_query_string();
            if !query_string.is_empty() {
                eprintln!("?{}", query_string);
            }
        }
        other => {
            return Err(Error::InvalidInput(format!(
                "unknown format '{}' (expected table, json or csv)",
                other
            )))
        }
    }

    Ok(())
}

/// Print the parsed form of a search string as JSON.
pub fn parse(query: &str) -> Result<()> {
    let parsed = parse_search(query);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

pub fn recent(clear: bool) -> Result<()> {
    let store = open_store()?;
    if clear {
        let count = store.clear_recent_searches()?;
        println!("Cleared {} recent search(es)", count);
        return Ok(());
    }

    for term in store.recent_searches()? {
        println!("{}", term);
    }
    Ok(())
}

pub fn calendar(month: Option<&str>, today: NaiveDate) -> Result<()> {
    let (year, month) = match month {
        Some(m) => parse_month(m)?,
        None => (today.year(), today.month()),
    };
    let view = month_view(year, month, fleet::mock::assets())?;

    println!("{}-{:02}", view.year, view.month);
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in &view.weeks {
        let line: Vec<String> = week
            .iter()
            .map(|day| {
                let marker = if day.asset_ids.is_empty() { ' ' } else { '*' };
                if day.in_month {
                    format!("{:>3}{}", day.date.day(), marker)
                } else {
                    "    ".to_string()
                }
            })
            .collect();
        println!("{}", line.join("").trim_end());
    }

    for day in view.scheduled_days() {
        println!("{}  {}", day.date, day.asset_ids.join(", "));
    }
    Ok(())
}

pub fn reschedule(asset_id: &str, date: &str, today: NaiveDate) -> Result<()> {
    let asset = find_asset(asset_id)?;
    let updated = fleet::reschedule(asset, parse_date(date)?, today)?;
    println!(
        "{} next maintenance: {} -> {}",
        updated.id,
        asset
            .next_maintenance
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string()),
        date
    );
    Ok(())
}

/// Run the maintenance workflow non-interactively and record the result.
pub fn complete(
    asset_id: &str,
    technician: &str,
    signature: Option<&str>,
    notes: &str,
    parts: &[String],
) -> Result<()> {
    let asset = find_asset(asset_id)?;
    let mut workflow = MaintenanceWorkflow::new(asset);

    workflow.set_technician(technician);
    workflow.advance()?;
    workflow.check_all();
    workflow.advance()?;
    for part in parts {
        workflow.add_part(part);
    }
    workflow.advance()?;
    workflow.set_notes(notes);
    workflow.sign(signature.unwrap_or(technician));
    let record = workflow.finish(Utc::now())?;

    open_store()?.record_maintenance(&record)?;
    println!("Recorded maintenance {} for {}", record.id, record.asset_id);
    Ok(())
}

pub fn history(limit: usize, asset: Option<&str>) -> Result<()> {
    let store = open_store()?;
    let records = match asset {
        Some(id) => store.asset_history(id)?,
        None => store.maintenance_history()?,
    };

    let mut stdout = io::stdout().lock();
    for record in records.iter().take(limit) {
        writeln!(
            stdout,
            "{}  {:<8} {:<22} {:<16} parts={}",
            record.completed_at.format("%Y-%m-%d %H:%M"),
            record.asset_id,
            record.asset_name,
            record.technician,
            record.parts_used.len()
        )?;
    }
    Ok(())
}

fn run_bulk_on_query(action: BulkAction, query: &str, today: NaiveDate) -> Result<BulkOutcome> {
    let matched = matching_assets(query, today)?;
    let mut selection = Selection::new();
    selection.select_all(matched.iter().map(|a| a.id.as_str()));

    run_bulk(&action, fleet::mock::assets(), &selection, today, |p| {
        log::debug!("bulk progress {}% ({})", p.percent(), p.asset_id);
    })
}

fn report_outcome(outcome: &BulkOutcome) {
    for asset in &outcome.updated {
        let next = asset
            .next_maintenance
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<8} {:<18} {}", asset.id, asset.status, next);
    }
    for (id, reason) in &outcome.failed {
        eprintln!("{}: {}", id, reason);
    }
    println!(
        "{} updated, {} failed",
        outcome.succeeded.len(),
        outcome.failed.len()
    );
}

pub fn bulk_status(status: &str, query: &str, today: NaiveDate) -> Result<()> {
    let status: AssetStatus = status.parse()?;
    let outcome = run_bulk_on_query(BulkAction::UpdateStatus(status), query, today)?;
    report_outcome(&outcome);
    Ok(())
}

pub fn bulk_schedule(date: &str, query: &str, today: NaiveDate) -> Result<()> {
    let date = parse_date(date)?;
    let outcome = run_bulk_on_query(BulkAction::ScheduleMaintenance(date), query, today)?;
    report_outcome(&outcome);
    Ok(())
}

pub fn bulk_export(query: &str, today: NaiveDate) -> Result<()> {
    let outcome = run_bulk_on_query(BulkAction::Export, query, today)?;
    print!("{}", outcome.csv.unwrap_or_default());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let config = Config::load()?;
    println!("root = {}", config.root.display());
    println!("config_file = {}", config.config_path().display());
    println!("debounce_ms = {}", config.debounce_ms);
    println!("recent_search_limit = {}", config.recent_search_limit);
    println!(
        "maintenance_due_window_days = {}",
        config.maintenance_due_window_days
    );
    println!(
        "parts_activity_window_days = {}",
        config.parts_activity_window_days
    );
    println!("history_limit = {}", config.history_limit);
    Ok(())
}
