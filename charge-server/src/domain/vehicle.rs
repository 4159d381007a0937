//! Vehicle record and consumption derivation.

use super::DomainError;

/// An electric vehicle from the catalog.
///
/// Immutable once fetched; the planner only reads from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// Catalog identifier
    pub id: String,

    /// Manufacturer name
    pub make: String,

    /// Model name
    pub model: String,

    /// Maximum charging power the vehicle accepts, in kW
    pub max_power_kw: f64,

    /// Usable battery capacity in kWh
    pub battery_kwh: f64,

    /// Best-case range in km
    pub range_best_km: f64,

    /// Worst-case range in km
    pub range_worst_km: f64,
}

impl Vehicle {
    /// Average of best and worst range, in km.
    pub fn average_range_km(&self) -> f64 {
        (self.range_best_km + self.range_worst_km) / 2.0
    }

    /// SOC consumed per kilometer driven, in percent.
    ///
    /// Derived as `100 / average_range`. A zero or non-finite average
    /// range leaves the rate undefined and is rejected here, before the
    /// planning loop ever runs.
    pub fn soc_per_km(&self) -> Result<f64, DomainError> {
        let average_km = self.average_range_km();
        if !average_km.is_finite() || average_km <= 0.0 {
            return Err(DomainError::DegenerateRange { average_km });
        }
        Ok(100.0 / average_km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vehicle(best: f64, worst: f64) -> Vehicle {
        Vehicle {
            id: "v1".into(),
            make: "Example".into(),
            model: "EV".into(),
            max_power_kw: 150.0,
            battery_kwh: 60.0,
            range_best_km: best,
            range_worst_km: worst,
        }
    }

    #[test]
    fn soc_per_km_from_average_range() {
        // Average range 300 km -> 0.333 %/km
        let v = vehicle(350.0, 250.0);
        assert_relative_eq!(v.soc_per_km().unwrap(), 100.0 / 300.0, max_relative = 1e-12);
    }

    #[test]
    fn zero_average_range_is_rejected() {
        let v = vehicle(0.0, 0.0);
        assert!(matches!(
            v.soc_per_km(),
            Err(DomainError::DegenerateRange { .. })
        ));
    }

    #[test]
    fn negative_average_range_is_rejected() {
        let v = vehicle(-10.0, 5.0);
        assert!(v.soc_per_km().is_err());
    }

    #[test]
    fn non_finite_range_is_rejected() {
        let v = vehicle(f64::NAN, 300.0);
        assert!(v.soc_per_km().is_err());
    }
}
