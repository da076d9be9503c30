//! Mesh configuration and bootstrap validation.

/// Configuration for a relaxation mesh.
///
/// `q` is the mesh dimension (`q × q` worker nodes) and `m` the subgrid
/// dimension (each node owns an `m × m` interior plus a one-cell ghost halo).
/// The global grid is `n × n` with `n = q * m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshConfig {
    /// Mesh dimension: the node grid is `q × q`.
    pub q: usize,
    /// Subgrid dimension: each node's interior is `m × m`. Must be even.
    pub m: usize,
    /// Relaxation steps performed between snapshot emissions.
    pub steps_per_frame: usize,
}

impl MeshConfig {
    /// Create a configuration with the default of one relaxation step per
    /// emitted frame.
    pub fn new(q: usize, m: usize) -> Self {
        Self {
            q,
            m,
            steps_per_frame: 1,
        }
    }

    /// Set the number of relaxation steps between snapshot emissions.
    pub fn with_steps_per_frame(mut self, steps: usize) -> Self {
        self.steps_per_frame = steps;
        self
    }

    /// Global grid dimension `n = q * m`.
    pub fn n(&self) -> usize {
        self.q * self.m
    }

    /// Total number of worker nodes.
    pub fn node_count(&self) -> usize {
        self.q * self.q
    }

    /// Validate the configuration.
    ///
    /// `m` must be a positive even integer: the two exchange phases walk the
    /// interior indices `1..=m` in stride 2, and only an even `m` covers the
    /// range exactly once across both phases.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.q == 0 {
            return Err(ConfigError::MeshDimension);
        }
        if self.m == 0 || self.m % 2 != 0 {
            return Err(ConfigError::SubgridDimension(self.m));
        }
        if self.steps_per_frame == 0 {
            return Err(ConfigError::StepsPerFrame);
        }
        Ok(())
    }
}

/// Invalid configuration rejected at bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The mesh dimension `q` must be positive.
    #[error("mesh dimension q must be positive")]
    MeshDimension,

    /// The subgrid dimension `m` must be a positive even integer.
    #[error("subgrid dimension m must be a positive even integer, got {0}")]
    SubgridDimension(usize),

    /// At least one relaxation step must run between frames.
    #[error("steps per frame must be positive")]
    StepsPerFrame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert_eq!(MeshConfig::new(2, 4).validate(), Ok(()));
        assert_eq!(MeshConfig::new(1, 2).validate(), Ok(()));
    }

    #[test]
    fn test_zero_mesh_dimension_rejected() {
        assert_eq!(
            MeshConfig::new(0, 4).validate(),
            Err(ConfigError::MeshDimension)
        );
    }

    #[test]
    fn test_odd_subgrid_rejected() {
        assert_eq!(
            MeshConfig::new(2, 3).validate(),
            Err(ConfigError::SubgridDimension(3))
        );
        assert_eq!(
            MeshConfig::new(2, 0).validate(),
            Err(ConfigError::SubgridDimension(0))
        );
    }

    #[test]
    fn test_zero_steps_per_frame_rejected() {
        assert_eq!(
            MeshConfig::new(2, 4).with_steps_per_frame(0).validate(),
            Err(ConfigError::StepsPerFrame)
        );
    }

    #[test]
    fn test_derived_dimensions() {
        let config = MeshConfig::new(3, 4);
        assert_eq!(config.n(), 12);
        assert_eq!(config.node_count(), 9);
    }
}
