//! Planner configuration.

/// Configuration parameters for stop selection and station search.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Rated power, in kW, from which a station counts as a fast
    /// charger. Fast chargers are preferred over nearer slow ones.
    pub fast_charge_kw: f64,

    /// Page size for paginated station queries.
    pub page_size: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            fast_charge_kw: 50.0,
            page_size: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.fast_charge_kw, 50.0);
        assert_eq!(config.page_size, 100);
    }
}
