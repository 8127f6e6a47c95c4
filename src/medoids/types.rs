//! Core data types for constrained k-medoids center selection.

use std::collections::HashMap;

use thiserror::Error;

use super::config::MedoidsConfig;
use crate::geo;

/// Stable external identity of a site.
pub type SiteId = u64;

/// A candidate/demand site, fully populated by the loading layer.
///
/// Sites are immutable for the duration of a solve. `elevation` is carried
/// for reporting only and does not enter the cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Site {
    /// Unique identity, stable across the solve.
    pub id: SiteId,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Non-negative demand weight applied to this site's travel distance.
    pub resource_weight: f64,
    /// Land classification label, matched exactly (case-sensitive) against
    /// the configured exclusions.
    pub land_type: String,
    /// Terrain slope, in the same unit as [`MedoidsConfig::max_slope`].
    pub slope: f64,
    /// Terrain elevation, informational only.
    pub elevation: f64,
}

/// Partial mapping from directed site-identity pairs to network distances
/// in meters.
///
/// The table does not have to be complete or symmetric; pairs without an
/// entry fall back to the great-circle distance between the sites'
/// coordinates. Lookup is O(1) expected on the native identity pair.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    entries: HashMap<(SiteId, SiteId), f64>,
}

impl DistanceTable {
    /// Creates an empty table (every query falls back to great-circle).
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the network distance in meters for the directed pair
    /// `(from, to)`, replacing any previous entry.
    pub fn insert(&mut self, from: SiteId, to: SiteId, meters: f64) {
        self.entries.insert((from, to), meters);
    }

    /// Looks up the directed pair `(from, to)`.
    pub fn get(&self, from: SiteId, to: SiteId) -> Option<f64> {
        self.entries.get(&(from, to)).copied()
    }

    /// Number of directed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(SiteId, SiteId, f64)> for DistanceTable {
    fn from_iter<I: IntoIterator<Item = (SiteId, SiteId, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (from, to, meters) in iter {
            table.insert(from, to, meters);
        }
        table
    }
}

/// Why a solve could not produce a full center set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Fewer admissible sites than requested centers after filtering.
    /// Reported before any search begins.
    #[error("{available} admissible candidate site(s) for {required} requested centers")]
    InsufficientCandidates { available: usize, required: usize },

    /// The initializer ran out of sites satisfying the minimum-separation
    /// constraint. Carries the partial center set so the caller can decide
    /// to proceed with it, or re-solve with another seed or looser
    /// constraints.
    #[error("could not place {required} centers under the minimum-separation constraint ({} placed)", .placed.len())]
    SeparationInfeasible { placed: Vec<SiteId>, required: usize },
}

/// A center-selection problem instance: the site population plus its
/// network-distance table.
///
/// Construction indexes sites by identity once; afterwards the problem is
/// read-only and can back any number of solver runs.
///
/// # Examples
///
/// ```
/// use u_locate::medoids::{DistanceTable, MedoidsProblem, Site};
///
/// let sites = vec![
///     Site { id: 1, lat: 37.1, lon: 127.0, resource_weight: 4.0,
///            land_type: "field".into(), slope: 3.5, elevation: 40.0 },
///     Site { id: 2, lat: 37.4, lon: 127.2, resource_weight: 1.5,
///            land_type: "forest".into(), slope: 18.0, elevation: 220.0 },
/// ];
/// let mut table = DistanceTable::new();
/// table.insert(1, 2, 41_000.0); // road distance, meters
///
/// let problem = MedoidsProblem::new(sites, table);
/// assert_eq!(problem.distance(1, 2), 41_000.0);   // table entry
/// assert!(problem.distance(2, 1) > 30_000.0);     // great-circle fallback
/// ```
#[derive(Debug, Clone)]
pub struct MedoidsProblem {
    sites: Vec<Site>,
    distances: DistanceTable,
    by_id: HashMap<SiteId, usize>,
}

impl MedoidsProblem {
    /// Builds a problem instance from the site population and its
    /// network-distance table.
    ///
    /// # Panics
    ///
    /// Panics if two sites share an identity.
    pub fn new(sites: Vec<Site>, distances: DistanceTable) -> Self {
        let mut by_id = HashMap::with_capacity(sites.len());
        for (idx, site) in sites.iter().enumerate() {
            if by_id.insert(site.id, idx).is_some() {
                panic!("duplicate site identity: {}", site.id);
            }
        }
        Self {
            sites,
            distances,
            by_id,
        }
    }

    /// The site population, in load order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Number of sites in the population.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the population is empty.
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Travel distance in meters from site `a` to site `b`: the table entry
    /// for the directed pair when present, otherwise the great-circle
    /// distance between the two sites' coordinates.
    ///
    /// # Panics
    ///
    /// Panics if either identity is not part of the population. Passing an
    /// unknown identity is a caller contract violation, not a recoverable
    /// condition.
    pub fn distance(&self, a: SiteId, b: SiteId) -> f64 {
        self.distance_idx(self.index_of(a), self.index_of(b))
    }

    pub(crate) fn distance_idx(&self, from: usize, to: usize) -> f64 {
        let (a, b) = (&self.sites[from], &self.sites[to]);
        match self.distances.get(a.id, b.id) {
            Some(meters) => meters,
            None => geo::haversine_m(a.lat, a.lon, b.lat, b.lon),
        }
    }

    fn index_of(&self, id: SiteId) -> usize {
        match self.by_id.get(&id) {
            Some(&idx) => idx,
            None => panic!("unknown site identity: {id}"),
        }
    }

    /// Indices of the sites admissible as centers under the configured
    /// land-classification exclusions and slope threshold.
    ///
    /// A site is excluded iff its land type is in the exclusion set (exact,
    /// case-sensitive match) or its slope strictly exceeds the threshold;
    /// slope equal to the threshold is admissible. Output preserves
    /// population order.
    pub fn admissible_candidates(&self, config: &MedoidsConfig) -> Vec<usize> {
        self.sites
            .iter()
            .enumerate()
            .filter(|(_, site)| {
                !config.excluded_land_types.contains(&site.land_type)
                    && site.slope <= config.max_slope
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// For each site in the population, the index within `centers` of its
    /// nearest center. Ties go to the lowest center index.
    ///
    /// This is the reporting entry point; the solver uses the same
    /// evaluation internally, so re-running it on a solver result reproduces
    /// the result's assignment vector exactly.
    ///
    /// # Panics
    ///
    /// Panics if `centers` is empty or contains an unknown identity.
    pub fn assignments(&self, centers: &[SiteId]) -> Vec<usize> {
        let indices: Vec<usize> = centers.iter().map(|&id| self.index_of(id)).collect();
        self.evaluate_indices(&indices).0
    }

    /// Total resource-weighted travel cost of the given center set:
    /// `Σ_site weight(site) · d(site, nearest center)`.
    ///
    /// # Panics
    ///
    /// Panics if `centers` is empty or contains an unknown identity.
    pub fn weighted_cost(&self, centers: &[SiteId]) -> f64 {
        let indices: Vec<usize> = centers.iter().map(|&id| self.index_of(id)).collect();
        self.evaluate_indices(&indices).1
    }

    /// Nearest-center assignment and aggregate weighted cost for a center
    /// set given as site indices. Every site is compared against every
    /// center on every call; nothing is cached across calls.
    pub(crate) fn evaluate_indices(&self, centers: &[usize]) -> (Vec<usize>, f64) {
        assert!(!centers.is_empty(), "center set must not be empty");

        let mut assignments = Vec::with_capacity(self.sites.len());
        let mut total_cost = 0.0;

        for (idx, site) in self.sites.iter().enumerate() {
            let mut best = 0;
            let mut best_dist = self.distance_idx(idx, centers[0]);
            for (pos, &center) in centers.iter().enumerate().skip(1) {
                let dist = self.distance_idx(idx, center);
                if dist < best_dist {
                    best_dist = dist;
                    best = pos;
                }
            }
            assignments.push(best);
            total_cost += best_dist * site.resource_weight;
        }

        (assignments, total_cost)
    }
}
