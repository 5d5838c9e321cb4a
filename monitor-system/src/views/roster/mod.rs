//! Home roster. Loading happens in two phases: the roster itself (cached locally), then one
//! status fetch per trash can, each of which may fail on its own.

use std::fmt::Display;

use futures::future::join_all;
use local_store::{
    ROSTER_CACHE_KEY,
    json::{load_json, save_json},
    traits::KeyValueStore,
};
use remoove_api_caller::{
    errors::ApiError,
    json::{
        roster::RosterEntry,
        status::{FillLevels, TrashCanStatus, WasteCategory},
    },
    traits::RemooveApi,
};
use serde::{Deserialize, Serialize};
use utils::time::Time;

const FULL_THRESHOLD: f64 = 100.;
const ALMOST_FULL_THRESHOLD: f64 = 80.;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusLabel {
    Pending,
    Full,
    AlmostFull,
    Working,
    Error,
}

impl StatusLabel {
    #[must_use]
    pub fn from_fill_levels(fill_levels: &FillLevels) -> Self {
        let levels = WasteCategory::ALL.map(|c| fill_levels.get(c));
        if levels.iter().any(|&v| v >= FULL_THRESHOLD) {
            StatusLabel::Full
        } else if levels.iter().any(|&v| v >= ALMOST_FULL_THRESHOLD) {
            StatusLabel::AlmostFull
        } else {
            StatusLabel::Working
        }
    }
}

impl Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StatusLabel::Pending => "Pending",
            StatusLabel::Full => "Full",
            StatusLabel::AlmostFull => "Working, almost full",
            StatusLabel::Working => "Working",
            StatusLabel::Error => "Error",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderColor {
    Red,
    Yellow,
    Green,
    Gray,
}

impl Display for BorderColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BorderColor::Red => "red",
            BorderColor::Yellow => "yellow",
            BorderColor::Green => "green",
            BorderColor::Gray => "gray",
        };
        f.write_str(s)
    }
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashCanSummary {
    pub id: String,
    pub image: Option<String>,
    pub location: Option<String>,
    pub status: StatusLabel,
    pub fill_levels: FillLevels,
    pub last_updated: Option<String>,
}

impl TrashCanSummary {
    pub fn pending(entry: RosterEntry) -> Self {
        Self {
            id: entry.id,
            image: entry.image,
            location: entry.location,
            status: StatusLabel::Pending,
            fill_levels: FillLevels::zeroed(),
            last_updated: None,
        }
    }

    pub fn apply_status(&mut self, status: TrashCanStatus, now: Time) {
        self.status = StatusLabel::from_fill_levels(&status.fill_levels);
        self.fill_levels = status.fill_levels;
        self.last_updated = Some(now.as_local_display_string());
    }

    pub fn mark_failed(&mut self) {
        self.status = StatusLabel::Error;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        WasteCategory::ALL
            .into_iter()
            .all(|c| self.fill_levels.get(c) <= 0.)
    }

    #[must_use]
    pub fn border_color(&self) -> BorderColor {
        match self.status {
            StatusLabel::Full | StatusLabel::Error => BorderColor::Red,
            StatusLabel::Pending => BorderColor::Yellow,
            StatusLabel::AlmostFull | StatusLabel::Working if self.is_empty() => {
                BorderColor::Green
            }
            StatusLabel::AlmostFull | StatusLabel::Working => BorderColor::Gray,
        }
    }
}

impl Display for TrashCanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] Trash Can {}", self.border_color(), self.id)?;
        if let Some(location) = &self.location {
            write!(f, " ({location})")?;
        }
        write!(f, ": {}", self.status)?;
        for category in WasteCategory::ALL {
            write!(f, " | {category} {}%", self.fill_levels.get(category))?;
        }
        if let Some(last_updated) = &self.last_updated {
            write!(f, " | Last updated {last_updated}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterSource {
    Server,
    /// The roster could not be fetched; entries come from the last successful fetch
    Cache,
}

#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub struct RosterView {
    entries: Vec<TrashCanSummary>,
    source: RosterSource,
}

impl RosterView {
    /// First phase: fetch the roster and cache it. Falls back to the cached roster when the
    /// fetch fails; the error is returned only when there is nothing cached either.
    pub async fn load(
        api: &dyn RemooveApi,
        store: &dyn KeyValueStore,
    ) -> Result<Self, ApiError> {
        let fetch_error = match api.fetch_roster().await {
            Ok(roster) => {
                let entries = roster
                    .into_iter()
                    .map(TrashCanSummary::pending)
                    .collect::<Vec<_>>();

                if let Err(e) = save_json(store, ROSTER_CACHE_KEY, &entries).await {
                    tracing::error!("Failed to cache the roster: {e}");
                }

                return Ok(Self {
                    entries,
                    source: RosterSource::Server,
                });
            }
            Err(e) => e,
        };

        match load_json::<Vec<TrashCanSummary>>(store, ROSTER_CACHE_KEY).await {
            Ok(Some(entries)) => {
                tracing::warn!(
                    "Showing {} cached trash cans: {fetch_error}",
                    entries.len()
                );
                Ok(Self {
                    entries,
                    source: RosterSource::Cache,
                })
            }
            Ok(None) => Err(fetch_error),
            Err(e) => {
                tracing::error!("Failed to read the cached roster: {e}");
                Err(fetch_error)
            }
        }
    }

    /// Second phase, also used for refreshing: one concurrent status fetch per trash can
    pub async fn refresh_statuses(&mut self, api: &dyn RemooveApi, now: Time) {
        let results = join_all(self.entries.iter().map(|e| api.fetch_status(&e.id))).await;

        for (entry, result) in self.entries.iter_mut().zip(results) {
            match result {
                Ok(status) => entry.apply_status(status, now),
                Err(e) => {
                    tracing::error!("Status of trash can {} unavailable: {e}", entry.id);
                    entry.mark_failed();
                }
            }
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[TrashCanSummary] {
        &self.entries
    }

    #[must_use]
    pub fn source(&self) -> RosterSource {
        self.source
    }
}

impl Display for RosterView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.source == RosterSource::Cache {
            writeln!(f, "(offline: showing the last known trash cans)")?;
        }
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
