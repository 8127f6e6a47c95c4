//! Constrained k-medoids configuration.

use std::collections::HashSet;

/// Configuration parameters for a center-selection solve.
///
/// # Examples
///
/// ```
/// use u_locate::medoids::MedoidsConfig;
///
/// let config = MedoidsConfig::new(5)
///     .with_min_separation_m(3_000.0)
///     .with_excluded_land_types(["wetland", "urban"])
///     .with_max_slope(25.0)
///     .with_seed(42);
/// assert_eq!(config.k, 5);
/// assert_eq!(config.min_separation_m, 3_000.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MedoidsConfig {
    /// Number of centers to select.
    pub k: usize,
    /// Minimum pairwise distance between centers, in meters.
    pub min_separation_m: f64,
    /// Land classifications never eligible as centers (exact,
    /// case-sensitive match against [`Site::land_type`]).
    ///
    /// [`Site::land_type`]: super::Site::land_type
    pub excluded_land_types: HashSet<String>,
    /// Maximum admissible slope, in the same unit as [`Site::slope`].
    /// Sites at exactly this value remain admissible.
    ///
    /// [`Site::slope`]: super::Site::slope
    pub max_slope: f64,
    /// Maximum number of full swap passes before the search stops.
    pub max_iterations: usize,
    /// Random seed (None for default seed).
    pub seed: Option<u64>,
    /// Whether to evaluate trial swaps in parallel using rayon. The
    /// accepted swap sequence is identical either way; this only trades
    /// wall-clock time for cores.
    pub parallel: bool,
}

impl Default for MedoidsConfig {
    fn default() -> Self {
        Self {
            k: 3,
            min_separation_m: 2_000.0,
            excluded_land_types: HashSet::new(),
            max_slope: 30.0,
            max_iterations: 50,
            seed: None,
            parallel: false,
        }
    }
}

impl MedoidsConfig {
    /// Creates a configuration for `k` centers with default constraints.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Sets the minimum pairwise center separation in meters.
    pub fn with_min_separation_m(mut self, meters: f64) -> Self {
        self.min_separation_m = meters;
        self
    }

    /// Sets the excluded land classifications.
    pub fn with_excluded_land_types<I, S>(mut self, land_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_land_types = land_types.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the maximum admissible slope.
    pub fn with_max_slope(mut self, max_slope: f64) -> Self {
        self.max_slope = max_slope;
        self
    }

    /// Sets the maximum number of swap passes.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel trial evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MedoidsConfig::default();
        assert_eq!(config.k, 3);
        assert_eq!(config.min_separation_m, 2_000.0);
        assert!(config.excluded_land_types.is_empty());
        assert_eq!(config.max_slope, 30.0);
        assert_eq!(config.max_iterations, 50);
        assert!(config.seed.is_none());
        assert!(!config.parallel);
    }

    #[test]
    fn test_config_builder() {
        let config = MedoidsConfig::new(7)
            .with_min_separation_m(500.0)
            .with_excluded_land_types(["wetland", "protected"])
            .with_max_slope(15.0)
            .with_max_iterations(10)
            .with_seed(123)
            .with_parallel(true);

        assert_eq!(config.k, 7);
        assert_eq!(config.min_separation_m, 500.0);
        assert!(config.excluded_land_types.contains("wetland"));
        assert!(config.excluded_land_types.contains("protected"));
        assert_eq!(config.max_slope, 15.0);
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.seed, Some(123));
        assert!(config.parallel);
    }
}
