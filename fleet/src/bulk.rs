//! Bulk actions over a selection of assets.
//!
//! Each selected id is processed in selection order. A failure on one asset
//! (unknown id, invalid date) is recorded and the run continues.

use chrono::NaiveDate;

use crate::calendar;
use crate::export;
use crate::schema::{Asset, AssetStatus};
use crate::selection::Selection;
use crate::Result;

/// What to do to each selected asset.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkAction {
    UpdateStatus(AssetStatus),
    ScheduleMaintenance(NaiveDate),
    Export,
}

/// Progress after each processed asset.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkProgress {
    pub completed: usize,
    pub total: usize,
    pub asset_id: String,
}

impl BulkProgress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed * 100) / self.total) as u8
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkOutcome {
    /// Updated copies of the assets that succeeded (empty for exports).
    pub updated: Vec<Asset>,
    pub succeeded: Vec<String>,
    /// (asset id, reason)
    pub failed: Vec<(String, String)>,
    /// CSV document, for exports.
    pub csv: Option<String>,
}

/// Apply `action` to every selected asset, reporting progress after each one.
pub fn run_bulk(
    action: &BulkAction,
    assets: &[Asset],
    selection: &Selection,
    today: NaiveDate,
    mut on_progress: impl FnMut(&BulkProgress),
) -> Result<BulkOutcome> {
    let total = selection.len();
    let mut outcome = BulkOutcome::default();
    let mut exported: Vec<&Asset> = Vec::new();

    for (i, id) in selection.ids().iter().enumerate() {
        match assets.iter().find(|a| &a.id == id) {
            None => outcome
                .failed
                .push((id.clone(), "asset not found".to_string())),
            Some(asset) => match apply(action, asset, today) {
                Ok(Some(updated)) => {
                    outcome.updated.push(updated);
                    outcome.succeeded.push(id.clone());
                }
                Ok(None) => {
                    exported.push(asset);
                    outcome.succeeded.push(id.clone());
                }
                Err(e) => outcome.failed.push((id.clone(), e.to_string())),
            },
        }

        on_progress(&BulkProgress {
            completed: i + 1,
            total,
            asset_id: id.clone(),
        });
    }

    if *action == BulkAction::Export {
        outcome.csv = Some(export::assets_to_csv(exported)?);
    }

    log::info!(
        "bulk {:?}: {} succeeded, {} failed",
        action,
        outcome.succeeded.len(),
        outcome.failed.len()
    );
    Ok(outcome)
}

/// Returns the updated asset, or `None` for actions that don't modify it.
fn apply(action: &BulkAction, asset: &Asset, today: NaiveDate) -> Result<Option<Asset>> {
    match action {
        BulkAction::UpdateStatus(status) => {
            let mut updated = asset.clone();
            updated.status = *status;
            Ok(Some(updated))
        }
        BulkAction::ScheduleMaintenance(date) => {
            calendar::reschedule(asset, *date, today).map(Some)
        }
        BulkAction::Export => Ok(None),
    }
}
