//! Charging station types.

use std::fmt;

use super::{Coordinate, DomainError};

/// A charging station identifier from the station dataset.
///
/// Guaranteed non-blank by construction. Used as the deduplication key
/// when merging query results from overlapping corridor cells.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    /// Parse a station id, rejecting empty or whitespace-only strings.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidStationId("must not be blank"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated charging station record.
///
/// Populated once at ingestion from the loosely-typed provider payload;
/// everything downstream of the station client works with this type and
/// never looks up dynamic fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingStation {
    /// Dataset identifier, unique per physical station
    pub id: StationId,

    /// Station position
    pub position: Coordinate,

    /// Rated charging power in kW
    pub power_kw: f64,

    /// Operating company, when reported
    pub operator: Option<String>,

    /// Street address, when reported
    pub address: Option<String>,

    /// Connector type string, when reported (e.g. "T2")
    pub connector: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_id() {
        let id = StationId::parse("FR*SOD*S22*P1").unwrap();
        assert_eq!(id.as_str(), "FR*SOD*S22*P1");
    }

    #[test]
    fn parse_trims_whitespace() {
        let id = StationId::parse("  ABC123 ").unwrap();
        assert_eq!(id.as_str(), "ABC123");
    }

    #[test]
    fn reject_blank_ids() {
        assert!(StationId::parse("").is_err());
        assert!(StationId::parse("   ").is_err());
    }

    #[test]
    fn hash_consistent_with_eq() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(StationId::parse("A1").unwrap());
        assert!(set.contains(&StationId::parse("A1").unwrap()));
        assert!(!set.contains(&StationId::parse("A2").unwrap()));
    }
}
