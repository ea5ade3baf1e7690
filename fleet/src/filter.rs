//! Applying parsed searches and named filters to asset collections.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::query::{ParsedFilters, ParsedSearch};
use crate::schema::{Asset, OrderStatus, PartsOrder};
use crate::{mock, Config, Error};

/// A named filter selected outside the search box (the `filter` URL parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialFilter {
    /// No live parts order within the activity window.
    NoPartsActivity,
}

impl SpecialFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialFilter::NoPartsActivity => "no-parts-activity",
        }
    }
}

impl fmt::Display for SpecialFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpecialFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "no-parts-activity" => Ok(SpecialFilter::NoPartsActivity),
            other => Err(Error::InvalidInput(format!("unknown filter '{}'", other))),
        }
    }
}

/// Evaluates assets against parsed searches relative to a fixed "today".
pub struct AssetFilter<'a> {
    today: NaiveDate,
    due_window_days: i64,
    parts_window_days: i64,
    orders: &'a [PartsOrder],
}

impl<'a> AssetFilter<'a> {
    /// Filter using the configured windows and the built-in parts orders.
    pub fn new(config: &Config, today: NaiveDate) -> Self {
        Self {
            today,
            due_window_days: config.maintenance_due_window_days,
            parts_window_days: config.parts_activity_window_days,
            orders: mock::orders(),
        }
    }

    /// Use a different set of parts orders for `no-parts-activity`.
    pub fn with_orders(mut self, orders: &'a [PartsOrder]) -> Self {
        self.orders = orders;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Return the assets matching the search and optional named filter, in input order.
    pub fn apply<'b>(
        &self,
        assets: &'b [Asset],
        search: &ParsedSearch,
        special: Option<SpecialFilter>,
    ) -> Vec<&'b Asset> {
        let tokens: Vec<String> = search.tokens().map(str::to_lowercase).collect();
        let matched: Vec<&Asset> = assets
            .iter()
            .filter(|asset| self.matches_filters(asset, &search.filters))
            .filter(|asset| matches_tokens(asset, &tokens))
            .filter(|asset| special.map_or(true, |s| self.matches_special(asset, s)))
            .collect();

        log::debug!(
            "filter {:?} (special={:?}) matched {}/{} assets",
            search.original_term,
            special,
            matched.len(),
            assets.len()
        );
        matched
    }

    /// Every present field must hold; `status_or` takes precedence over `status`.
    pub fn matches_filters(&self, asset: &Asset, filters: &ParsedFilters) -> bool {
        if let Some(kind) = filters.equipment_type {
            if asset.equipment_type != kind {
                return false;
            }
        }

        if let Some(location) = &filters.location {
            if !matches_location(asset, location) {
                return false;
            }
        }

        if filters.maintenance_due && !asset.is_maintenance_due(self.today, self.due_window_days) {
            return false;
        }

        if filters.critical && !asset.is_critical() {
            return false;
        }

        if let Some(year) = filters.install_year {
            if asset.install_year() != year {
                return false;
            }
        }

        match (&filters.status_or, filters.status) {
            (Some(any_of), _) => any_of.contains(&asset.status),
            (None, Some(status)) => asset.status == status,
            (None, None) => true,
        }
    }

    pub fn matches_special(&self, asset: &Asset, special: SpecialFilter) -> bool {
        match special {
            SpecialFilter::NoPartsActivity => !self.has_recent_parts_activity(asset),
        }
    }

    fn has_recent_parts_activity(&self, asset: &Asset) -> bool {
        self.orders.iter().any(|order| {
            let age = (self.today - order.ordered_on).num_days();
            order.asset_id == asset.id
                && order.status != OrderStatus::Cancelled
                && (0..=self.parts_window_days).contains(&age)
        })
    }
}

fn matches_location(asset: &Asset, location: &str) -> bool {
    let location = location.to_lowercase();
    let facility = asset.location.facility.to_lowercase();
    let area = asset.location.area.to_lowercase();
    facility.contains(&location)
        || area.contains(&location)
        || format!("{} {}", facility, area).contains(&location)
}

/// Every token must occur in at least one searchable text field.
///
/// Tokens are expected lowercased.
pub fn matches_tokens<S: AsRef<str>>(asset: &Asset, tokens: &[S]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let fields: Vec<String> = asset
        .search_fields()
        .iter()
        .map(|f| f.to_lowercase())
        .collect();
    tokens
        .iter()
        .all(|token| fields.iter().any(|field| field.contains(token.as_ref())))
}
