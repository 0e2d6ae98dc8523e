//! The distance/filter/sort/paginate pipeline. Pure and deterministic:
//! identical input yields identical output, across runs and across ties.

use haulfinder_core::{Facility, LatLng};

use crate::error::SearchError;
use crate::geo::haversine_miles;

/// A candidate that survived the radius filter, with its full-precision
/// distance retained for ordering.
#[derive(Debug, Clone)]
pub struct Ranked {
    pub facility: Facility,
    pub distance_miles: f64,
}

/// Radius-filter and rank candidates around `center`.
///
/// Candidates missing either coordinate are dropped — they cannot be
/// distance-ranked (unlocated-facility policy). Surviving candidates are
/// sorted ascending by distance, ties broken by facility id ascending so
/// the order is total.
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] if `radius_miles` is not a
/// positive finite number.
pub fn rank_by_distance(
    center: LatLng,
    radius_miles: f64,
    candidates: Vec<Facility>,
) -> Result<Vec<Ranked>, SearchError> {
    if !radius_miles.is_finite() || radius_miles <= 0.0 {
        return Err(SearchError::InvalidQuery(format!(
            "radius must be a positive number of miles, got {radius_miles}"
        )));
    }

    let mut ranked: Vec<Ranked> = candidates
        .into_iter()
        .filter_map(|facility| {
            let point = facility.coordinates()?;
            let distance_miles = haversine_miles(center, point);
            (distance_miles <= radius_miles).then_some(Ranked {
                facility,
                distance_miles,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.distance_miles
            .total_cmp(&b.distance_miles)
            .then_with(|| a.facility.id.cmp(&b.facility.id))
    });
    Ok(ranked)
}

/// Compute the page window over `len` ranked results.
///
/// `limit` defaults to `max_page_size` and is clamped to it; an offset
/// past the end yields an empty window.
#[must_use]
pub fn page_window(
    len: usize,
    offset: usize,
    limit: Option<usize>,
    max_page_size: usize,
) -> std::ops::Range<usize> {
    let limit = limit.unwrap_or(max_page_size).min(max_page_size);
    let start = offset.min(len);
    let end = start.saturating_add(limit).min(len);
    start..end
}

#[cfg(test)]
mod tests {
    use haulfinder_core::{Address, LocationType};

    use super::*;

    const CENTER: LatLng = LatLng {
        latitude: 41.4993,
        longitude: -81.6944,
    };

    fn facility(id: &str, latitude: Option<f64>, longitude: Option<f64>) -> Facility {
        Facility {
            id: id.to_string(),
            name: format!("Facility {id}"),
            address: Address::default(),
            latitude,
            longitude,
            location_type: LocationType::Landfill,
            debris_types: vec![],
            payment_types: vec![],
            hours: vec![],
            is_active: true,
        }
    }

    #[test]
    fn nearby_candidate_included_distant_excluded() {
        // Scenario A: ~0.3 mi candidate inside a 10 mile radius, Detroit
        // (~90 mi) outside it.
        let candidates = vec![
            facility("near", Some(41.5), Some(-81.7)),
            facility("detroit", Some(42.3314), Some(-83.0458)),
        ];
        let ranked = rank_by_distance(CENTER, 10.0, candidates).expect("rank");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].facility.id, "near");
        assert!(ranked[0].distance_miles < 1.0);
    }

    #[test]
    fn zero_radius_is_rejected() {
        // Scenario B.
        let err = rank_by_distance(CENTER, 0.0, vec![]).unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));
    }

    #[test]
    fn negative_and_non_finite_radii_are_rejected() {
        for radius in [-5.0, f64::NAN, f64::INFINITY] {
            let err = rank_by_distance(CENTER, radius, vec![]).unwrap_err();
            assert!(matches!(err, SearchError::InvalidQuery(_)), "radius {radius}");
        }
    }

    #[test]
    fn empty_candidate_set_is_not_an_error() {
        let ranked = rank_by_distance(CENTER, 50.0, vec![]).expect("rank");
        assert!(ranked.is_empty());
    }

    #[test]
    fn unlocated_candidates_are_dropped() {
        let candidates = vec![
            facility("no-coords", None, None),
            facility("lat-only", Some(41.5), None),
            facility("lng-only", None, Some(-81.7)),
            facility("located", Some(41.5), Some(-81.7)),
        ];
        let ranked = rank_by_distance(CENTER, 50.0, candidates).expect("rank");
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].facility.id, "located");
    }

    #[test]
    fn ties_break_by_facility_id_ascending() {
        // Scenario E: identical coordinates, ids inserted out of order.
        let candidates = vec![
            facility("b", Some(41.51), Some(-81.71)),
            facility("a", Some(41.51), Some(-81.71)),
        ];
        let ranked = rank_by_distance(CENTER, 50.0, candidates).expect("rank");
        let ids: Vec<&str> = ranked.iter().map(|r| r.facility.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn smaller_radius_yields_subset_of_larger() {
        let candidates = vec![
            facility("close", Some(41.51), Some(-81.70)),
            facility("mid", Some(41.80), Some(-81.90)),
            facility("far", Some(42.33), Some(-83.05)),
        ];
        let small = rank_by_distance(CENTER, 25.0, candidates.clone()).expect("rank");
        let large = rank_by_distance(CENTER, 100.0, candidates).expect("rank");
        let large_ids: Vec<&str> = large.iter().map(|r| r.facility.id.as_str()).collect();
        for r in &small {
            assert!(large_ids.contains(&r.facility.id.as_str()));
        }
        assert!(small.len() <= large.len());
    }

    #[test]
    fn ranking_is_deterministic_across_runs() {
        let candidates = vec![
            facility("c", Some(41.52), Some(-81.72)),
            facility("a", Some(41.51), Some(-81.70)),
            facility("b", Some(41.52), Some(-81.72)),
        ];
        let first = rank_by_distance(CENTER, 50.0, candidates.clone()).expect("rank");
        let second = rank_by_distance(CENTER, 50.0, candidates).expect("rank");
        let order = |ranked: &[Ranked]| {
            ranked
                .iter()
                .map(|r| (r.facility.id.clone(), r.distance_miles))
                .collect::<Vec<_>>()
        };
        assert_eq!(order(&first), order(&second));
    }

    #[test]
    fn results_are_sorted_ascending_by_distance() {
        let candidates = vec![
            facility("far", Some(41.90), Some(-81.90)),
            facility("near", Some(41.50), Some(-81.70)),
            facility("mid", Some(41.60), Some(-81.80)),
        ];
        let ranked = rank_by_distance(CENTER, 100.0, candidates).expect("rank");
        let ids: Vec<&str> = ranked.iter().map(|r| r.facility.id.as_str()).collect();
        assert_eq!(ids, ["near", "mid", "far"]);
        assert!(ranked.windows(2).all(|w| w[0].distance_miles <= w[1].distance_miles));
    }

    #[test]
    fn page_window_defaults_to_max_page_size() {
        assert_eq!(page_window(120, 0, None, 50), 0..50);
    }

    #[test]
    fn page_window_clamps_oversized_limit() {
        assert_eq!(page_window(120, 0, Some(500), 50), 0..50);
    }

    #[test]
    fn page_window_honors_offset_and_small_limit() {
        assert_eq!(page_window(120, 10, Some(5), 50), 10..15);
    }

    #[test]
    fn page_window_past_end_is_empty() {
        assert_eq!(page_window(3, 10, Some(5), 50), 3..3);
    }
}
