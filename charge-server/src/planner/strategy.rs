//! Stop selection policy.
//!
//! The policy is an ordered list of tier predicates: the first tier with
//! any matching candidate wins, and within that tier the candidate
//! furthest along the route is chosen. Keeping the tiers as data makes
//! the "prefer fast chargers, else take what's there" rule testable and
//! easy to extend.

use super::referencer::LocatedStation;

type TierPredicate = Box<dyn Fn(&LocatedStation) -> bool + Send + Sync>;

/// Ordered candidate selection tiers.
pub struct SelectionPolicy {
    tiers: Vec<TierPredicate>,
}

impl SelectionPolicy {
    /// The default two-tier policy: stations rated at least
    /// `fast_charge_kw`, then any candidate.
    pub fn fast_then_any(fast_charge_kw: f64) -> Self {
        Self {
            tiers: vec![
                Box::new(move |s: &LocatedStation| s.station.power_kw >= fast_charge_kw),
                Box::new(|_| true),
            ],
        }
    }

    /// Pick the winning candidate.
    ///
    /// Within the first non-empty tier the winner maximizes distance
    /// along the route; ties break to the highest rated power, then to
    /// the earliest candidate in discovery order.
    pub fn pick<'a>(&self, candidates: &[&'a LocatedStation]) -> Option<&'a LocatedStation> {
        for tier in &self.tiers {
            let mut best: Option<&LocatedStation> = None;
            for candidate in candidates.iter().copied().filter(|s| tier(s)) {
                best = match best {
                    None => Some(candidate),
                    Some(current) => {
                        let further = candidate.distance_km > current.distance_km;
                        let stronger = candidate.distance_km == current.distance_km
                            && candidate.station.power_kw > current.station.power_kw;
                        if further || stronger {
                            Some(candidate)
                        } else {
                            Some(current)
                        }
                    }
                };
            }
            if best.is_some() {
                return best;
            }
        }
        None
    }
}
