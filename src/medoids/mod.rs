//! Constrained k-medoids center selection.
//!
//! A single-solution local-search method for the facility-location variant
//! where centers must be actual sites (medoids), filtered by terrain
//! admissibility, and pairwise separated by a minimum distance. The search
//! minimizes the total resource-weighted travel cost
//! `Σ_site w(site) · d(site, nearest center)`:
//!
//! 1. **Filter**: drop sites on excluded land classifications or steeper
//!    than the slope threshold.
//! 2. **Initialize**: randomized greedy — pick the first center uniformly at
//!    random, then repeatedly pick uniformly among the candidates far enough
//!    from every placed center.
//! 3. **Improve**: first-improvement swap local search; a single center is
//!    replaced by a non-center candidate whenever the swap keeps all pairwise
//!    separations intact and strictly lowers the cost, until a full pass
//!    accepts nothing or the pass cap is reached.
//!
//! # References
//!
//! - Kaufman, L. & Rousseeuw, P. J. (1990). *Finding Groups in Data: An
//!   Introduction to Cluster Analysis*, ch. 2 (PAM). Wiley.
//! - Teitz, M. B. & Bart, P. (1968). "Heuristic methods for estimating the
//!   generalized vertex median of a weighted graph", *Operations Research*
//!   16(5), 955-961.

mod config;
mod runner;
mod types;

pub use config::MedoidsConfig;
pub use runner::{MedoidsResult, MedoidsRunner};
pub use types::{DistanceTable, MedoidsProblem, Site, SiteId, SolveError};
