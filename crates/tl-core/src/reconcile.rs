//! Matching new allocations against previously built sectors and tracks.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::day::{DayLabeler, day_of};
use crate::sector::Sector;
use crate::track::Track;
use crate::types::SectorId;

/// Sectors addressed by ID, kept in insertion order.
#[derive(Debug, Default)]
pub struct SectorArena {
    sectors: Vec<Sector>,
    by_id: HashMap<SectorId, usize>,
}

impl SectorArena {
    /// Seeds the arena with previously built sectors, in their given order.
    pub fn from_existing(sectors: &[Sector]) -> Self {
        let mut arena = Self::default();
        for sector in sectors {
            arena.insert(sector.clone());
        }
        arena
    }

    /// Writes a sector, replacing any sector with the same ID in place.
    /// Returns its position.
    pub fn insert(&mut self, sector: Sector) -> usize {
        if let Some(&pos) = self.by_id.get(&sector.id) {
            self.sectors[pos] = sector;
            pos
        } else {
            let pos = self.sectors.len();
            self.by_id.insert(sector.id.clone(), pos);
            self.sectors.push(sector);
            pos
        }
    }

    pub fn get(&self, id: &SectorId) -> Option<&Sector> {
        self.by_id.get(id).map(|&pos| &self.sectors[pos])
    }

    /// Finds the sector for a day: exact ID first, then the first sector
    /// whose name contains `label`.
    pub fn find_for_day(&self, day: NaiveDate, label: &str) -> Option<&Sector> {
        self.get(&SectorId::for_day(day)).or_else(|| {
            self.sectors
                .iter()
                .find(|sector| sector.name.contains(label))
        })
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn into_sectors(self) -> Vec<Sector> {
        self.sectors
    }
}

/// Buckets previously built tracks by the day of their first member.
///
/// Tracks without members have no day and are left out.
pub fn bucket_existing_tracks(
    tracks: &[Track],
    now_secs: f64,
) -> BTreeMap<NaiveDate, Vec<&Track>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Track>> = BTreeMap::new();
    for track in tracks {
        let Some(first) = track.members.first() else {
            tracing::debug!(track_id = %track.id, "skipping existing track without members");
            continue;
        };
        days.entry(day_of(first.start_or(now_secs)))
            .or_default()
            .push(track);
    }
    days
}

/// Builds the working copy of a day's sector.
///
/// Starts from the matching known sector (or a fresh one) and merges in the
/// day's existing tracks by ID. Nothing is written to the arena.
pub fn reconcile_day(
    arena: &SectorArena,
    day: NaiveDate,
    existing_tracks: &[&Track],
    labeler: &dyn DayLabeler,
    locale: &str,
) -> Sector {
    let label = labeler.format_day(day, locale);
    let mut sector = if let Some(found) = arena.find_for_day(day, &label) {
        tracing::debug!(sector_id = %found.id, %day, "reusing sector");
        found.clone()
    } else {
        tracing::debug!(%day, "creating sector");
        Sector::for_day(day, labeler, locale)
    };

    for track in existing_tracks {
        sector.upsert_track((*track).clone());
    }
    sector
}
