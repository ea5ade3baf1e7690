//! Maintenance history storage.

use super::{Store, MAINTENANCE_HISTORY_KEY};
use crate::schema::MaintenanceRecord;
use crate::Result;

impl Store {
    /// Completed maintenance, most recent first.
    pub fn maintenance_history(&self) -> Result<Vec<MaintenanceRecord>> {
        Ok(self.get(MAINTENANCE_HISTORY_KEY)?.unwrap_or_default())
    }

    /// History entries for one asset, most recent first.
    pub fn asset_history(&self, asset_id: &str) -> Result<Vec<MaintenanceRecord>> {
        Ok(self
            .maintenance_history()?
            .into_iter()
            .filter(|r| r.asset_id == asset_id)
            .collect())
    }

    /// Prepend a completed maintenance record, trimming to the configured limit.
    pub fn record_maintenance(&self, record: &MaintenanceRecord) -> Result<()> {
        let mut history = self.maintenance_history()?;
        history.insert(0, record.clone());
        history.truncate(self.config.history_limit);
        self.set(MAINTENANCE_HISTORY_KEY, &history)?;

        log::info!(
            "recorded maintenance {} on {} by {}",
            record.id,
            record.asset_id,
            record.technician
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;
    use uuid::Uuid;

    fn record(asset_id: &str, minute: u32) -> MaintenanceRecord {
        MaintenanceRecord {
            id: Uuid::now_v7(),
            asset_id: asset_id.to_string(),
            asset_name: format!("Asset {}", asset_id),
            technician: "R. Okafor".to_string(),
            completed_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, minute, 0).unwrap(),
            notes: String::new(),
            parts_used: vec![],
            checklist_items: 4,
        }
    }

    #[test]
    fn test_history_prepends() {
        let tmp = TempDir::new().unwrap();
        let store = Store::open(Config::with_root(tmp.path())).unwrap();

        store.record_maintenance(&record("AST-001", 0)).unwrap();
        store.record_maintenance(&record("AST-002", 5)).unwrap();
        store.record_maintenance(&record("AST-001", 10)).unwrap();

        let history = store.maintenance_history().unwrap();
        let assets: Vec<&str> = history.iter().map(|r| r.asset_id.as_str()).collect();
        assert_eq!(assets, vec!["AST-001", "AST-002", "AST-001"]);
        assert!(history[0].completed_at > history[2].completed_at);

        assert_eq!(store.asset_history("AST-001").unwrap().len(), 2);
        assert!(store.asset_history("AST-009").unwrap().is_empty());
    }

    #[test]
    fn test_history_limit() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::with_root(tmp.path());
        config.history_limit = 2;
        let store = Store::open(config).unwrap();

        for minute in 0..4 {
            store.record_maintenance(&record("AST-004", minute)).unwrap();
        }

        let history = store.maintenance_history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].completed_at.format("%M").to_string(), "03");
    }
}
