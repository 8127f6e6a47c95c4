//! Constrained k-medoids execution engine.
//!
//! # Algorithm
//!
//! 1. Filter the population down to admissible candidate sites
//! 2. Place k centers by randomized greedy selection, each at least the
//!    minimum separation from every already-placed center
//! 3. Swap pass: for each center position and each non-center candidate,
//!    replace the center with the candidate; reject the trial if any
//!    pairwise separation falls below the minimum, accept it immediately if
//!    it strictly lowers the weighted cost (first-improvement)
//! 4. Repeat passes until one accepts nothing, or the pass cap is hit
//!
//! # Reference
//!
//! Teitz, M. B. & Bart, P. (1968). "Heuristic methods for estimating the
//! generalized vertex median of a weighted graph", *Operations Research*
//! 16(5), 955-961.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, trace};

use super::config::MedoidsConfig;
use super::types::{MedoidsProblem, SiteId, SolveError};

/// Result of a center-selection solve.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MedoidsResult {
    /// Identities of the selected centers.
    pub centers: Vec<SiteId>,
    /// For each site in the population (in load order), the index within
    /// `centers` of its nearest center.
    pub assignments: Vec<usize>,
    /// Total resource-weighted travel cost of the final center set.
    pub total_cost: f64,
    /// Swap passes executed, including the final pass that accepted nothing.
    pub iterations: usize,
    /// Best cost after each swap pass.
    pub cost_history: Vec<f64>,
}

/// Constrained k-medoids runner.
pub struct MedoidsRunner;

impl MedoidsRunner {
    /// Solves a center-selection problem.
    ///
    /// Returns [`SolveError::InsufficientCandidates`] when filtering leaves
    /// fewer than `k` admissible sites, and
    /// [`SolveError::SeparationInfeasible`] (carrying the partial set) when
    /// initialization cannot place `k` centers at the configured minimum
    /// separation. Both are normal outcomes of tight constraints, not
    /// internal failures; a different seed may succeed where a given one
    /// ran out of room.
    ///
    /// The solve is deterministic for a fixed seed, whether or not
    /// `parallel` is set.
    ///
    /// # Panics
    ///
    /// Panics if `config.k` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_locate::medoids::{DistanceTable, MedoidsConfig, MedoidsProblem, MedoidsRunner, Site};
    ///
    /// // Two tight clusters, ~70 km apart.
    /// let sites: Vec<Site> = [(1u64, 36.00, 127.00), (2, 36.00, 127.01),
    ///                         (3, 36.50, 127.50), (4, 36.50, 127.51)]
    ///     .into_iter()
    ///     .map(|(id, lat, lon)| Site {
    ///         id, lat, lon,
    ///         resource_weight: 1.0,
    ///         land_type: "field".into(),
    ///         slope: 4.0,
    ///         elevation: 80.0,
    ///     })
    ///     .collect();
    /// let problem = MedoidsProblem::new(sites, DistanceTable::new());
    /// let config = MedoidsConfig::new(2).with_min_separation_m(5_000.0).with_seed(7);
    ///
    /// let result = MedoidsRunner::run(&problem, &config).expect("feasible");
    /// assert_eq!(result.centers.len(), 2);
    /// ```
    pub fn run(
        problem: &MedoidsProblem,
        config: &MedoidsConfig,
    ) -> Result<MedoidsResult, SolveError> {
        assert!(config.k > 0, "k must be at least 1");

        let candidates = problem.admissible_candidates(config);
        debug!(
            candidates = candidates.len(),
            population = problem.len(),
            "filtered candidate pool"
        );

        if candidates.len() < config.k {
            return Err(SolveError::InsufficientCandidates {
                available: candidates.len(),
                required: config.k,
            });
        }

        let mut rng = match config.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::seed_from_u64(42),
        };

        let mut centers = initialize(
            problem,
            &candidates,
            config.k,
            config.min_separation_m,
            &mut rng,
        );
        if centers.len() < config.k {
            return Err(SolveError::SeparationInfeasible {
                placed: site_ids(problem, &centers),
                required: config.k,
            });
        }

        let (_, mut best_cost) = problem.evaluate_indices(&centers);
        debug!(cost = best_cost, "initial center set");

        let mut cost_history = Vec::with_capacity(config.max_iterations);
        let mut iterations = 0;
        let mut improved = true;

        while improved && iterations < config.max_iterations {
            improved = false;
            iterations += 1;

            for position in 0..centers.len() {
                if improve_position(
                    problem,
                    config,
                    &candidates,
                    &mut centers,
                    &mut best_cost,
                    position,
                ) {
                    improved = true;
                }
            }

            cost_history.push(best_cost);
            trace!(pass = iterations, cost = best_cost, "swap pass complete");
        }

        debug!(iterations, cost = best_cost, "local search finished");

        let (assignments, total_cost) = problem.evaluate_indices(&centers);
        Ok(MedoidsResult {
            centers: site_ids(problem, &centers),
            assignments,
            total_cost,
            iterations,
            cost_history,
        })
    }
}

fn site_ids(problem: &MedoidsProblem, indices: &[usize]) -> Vec<SiteId> {
    indices.iter().map(|&i| problem.sites()[i].id).collect()
}

/// Randomized greedy initialization: the first center is uniform over the
/// candidates, each subsequent one uniform over the candidates at least
/// `min_separation_m` from every placed center. Stops early with a partial
/// set when no candidate qualifies.
fn initialize<R: Rng>(
    problem: &MedoidsProblem,
    candidates: &[usize],
    k: usize,
    min_separation_m: f64,
    rng: &mut R,
) -> Vec<usize> {
    let mut centers = Vec::with_capacity(k);
    if candidates.is_empty() {
        return centers;
    }
    centers.push(candidates[rng.random_range(0..candidates.len())]);

    while centers.len() < k {
        let feasible: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|idx| !centers.contains(idx))
            .filter(|&idx| {
                centers
                    .iter()
                    .all(|&center| problem.distance_idx(idx, center) >= min_separation_m)
            })
            .collect();

        if feasible.is_empty() {
            break;
        }
        centers.push(feasible[rng.random_range(0..feasible.len())]);
    }

    centers
}

fn pairwise_separated(problem: &MedoidsProblem, centers: &[usize], min_separation_m: f64) -> bool {
    for i in 0..centers.len() {
        for j in (i + 1)..centers.len() {
            if problem.distance_idx(centers[i], centers[j]) < min_separation_m {
                return false;
            }
        }
    }
    true
}

/// Cost of replacing `centers[position]` with `candidate`, or None when the
/// candidate already is a center or the trial set violates the separation
/// constraint.
fn trial_cost(
    problem: &MedoidsProblem,
    config: &MedoidsConfig,
    centers: &[usize],
    position: usize,
    candidate: usize,
) -> Option<f64> {
    if centers.contains(&candidate) {
        return None;
    }
    let mut trial = centers.to_vec();
    trial[position] = candidate;
    if !pairwise_separated(problem, &trial, config.min_separation_m) {
        return None;
    }
    Some(problem.evaluate_indices(&trial).1)
}

/// First-improvement scan of one center position over the candidate list.
///
/// Each accepted swap updates the center set in place, and the scan resumes
/// with the next candidate against the updated set. The parallel path
/// batch-evaluates the remaining candidates and applies only the first
/// qualifying one in candidate order, so the accepted swap sequence is
/// identical to the sequential path.
fn improve_position(
    problem: &MedoidsProblem,
    config: &MedoidsConfig,
    candidates: &[usize],
    centers: &mut [usize],
    best_cost: &mut f64,
    position: usize,
) -> bool {
    let mut improved = false;
    let mut start = 0;

    while start < candidates.len() {
        let window = &candidates[start..];
        let current: &[usize] = centers;
        let found = if config.parallel {
            let costs: Vec<Option<f64>> = window
                .par_iter()
                .map(|&candidate| trial_cost(problem, config, current, position, candidate))
                .collect();
            costs
                .into_iter()
                .enumerate()
                .find_map(|(offset, cost)| match cost {
                    Some(c) if c < *best_cost => Some((start + offset, c)),
                    _ => None,
                })
        } else {
            window.iter().enumerate().find_map(|(offset, &candidate)| {
                match trial_cost(problem, config, current, position, candidate) {
                    Some(c) if c < *best_cost => Some((start + offset, c)),
                    _ => None,
                }
            })
        };

        match found {
            Some((idx, cost)) => {
                centers[position] = candidates[idx];
                *best_cost = cost;
                improved = true;
                start = idx + 1;
            }
            None => break,
        }
    }

    improved
}
