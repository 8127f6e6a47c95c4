//! Constrained facility-location solver.
//!
//! Selects k "collection center" locations from a larger set of candidate
//! sites so as to minimize the total resource-weighted travel cost, subject
//! to siting constraints:
//!
//! - **Candidate filtering**: sites on excluded land classifications or above
//!   a slope threshold are never eligible as centers.
//! - **Minimum separation**: every pair of selected centers must be at least
//!   a configured distance apart, at initialization and after every accepted
//!   move.
//! - **Network distances**: travel cost between sites is resolved from a
//!   precomputed (partial) network-distance table, falling back to the
//!   great-circle distance when the table has no entry.
//!
//! The solver itself is a k-medoids search: randomized greedy constrained
//! initialization followed by first-improvement swap local search. Centers
//! are always actual sites, never synthetic centroids, so a solution can be
//! acted on directly.
//!
//! # Architecture
//!
//! The crate is pure in-memory computation: the caller supplies fully-built
//! [`medoids::Site`] records and a [`medoids::DistanceTable`] and receives a
//! [`medoids::MedoidsResult`]. Data loading (CSV parsing, attribute merging)
//! and reporting (console, JSON, plots) are left to consumers at higher
//! layers and have no surface here.

pub mod geo;
pub mod medoids;
