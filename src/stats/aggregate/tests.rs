//! Unit tests for weighted aggregation and confidence scoring

use super::*;

#[cfg(test)]
mod aggregate_tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_mean_simple_ignores_missing() {
        assert_eq!(mean_simple(&[]), None);
        assert_eq!(mean_simple(&[None, None]), None);
        assert!(close(mean_simple(&[Some(2.0), None, Some(1.0)]).unwrap(), 1.5, 1e-12));
    }

    #[test]
    fn test_rank_weighted_scenario() {
        // rank 1 scored 2, rank 2 scored 1
        let values = [Some(2.0), Some(1.0)];
        let weights = [1.0, 0.5];

        assert!(close(mean_weighted(&values, &weights).unwrap(), 1.667, 1e-3));
        assert!(close(mean_simple(&values).unwrap(), 1.5, 1e-12));
    }

    #[test]
    fn test_unit_weights_match_simple_mean() {
        let values = [Some(3.0), Some(1.0), None, Some(5.0)];
        let weights = [1.0; 4];
        assert!(close(
            mean_weighted(&values, &weights).unwrap(),
            mean_simple(&values).unwrap(),
            1e-12
        ));
    }

    #[test]
    fn test_zero_weights_are_excluded() {
        let values = [Some(10.0), Some(2.0)];
        assert!(close(mean_weighted(&values, &[0.0, 1.0]).unwrap(), 2.0, 1e-12));
        assert_eq!(mean_weighted(&values, &[0.0, 0.0]), None);
        assert_eq!(variance_weighted(&values, &[0.0, -1.0]), None);
        assert_eq!(cv_percent(&values, &[0.0, 0.0]), None);
    }

    #[test]
    fn test_short_weight_slice_counts_as_zero() {
        let values = [Some(4.0), Some(8.0)];
        assert!(close(mean_weighted(&values, &[1.0]).unwrap(), 4.0, 1e-12));
    }

    #[test]
    fn test_variance_weighted_population() {
        let values = [Some(2.0), Some(1.0)];
        let weights = [1.0, 0.5];
        // mean 5/3; ((1/3)^2 * 1 + (2/3)^2 * 0.5) / 1.5
        assert!(close(variance_weighted(&values, &weights).unwrap(), 2.0 / 9.0, 1e-12));
        assert!(close(variance_weighted(&[Some(7.0)], &[1.0]).unwrap(), 0.0, 1e-12));
    }

    #[test]
    fn test_cv_percent() {
        let values = [Some(2.0), Some(1.0)];
        let weights = [1.0, 0.5];
        let cv = cv_percent(&values, &weights).unwrap();
        let expected = (2.0f64 / 9.0).sqrt() / (5.0 / 3.0) * 100.0;
        assert!(close(cv, expected, 1e-9));
        assert!(cv >= 0.0);
    }

    #[test]
    fn test_cv_percent_zero_mean() {
        assert_eq!(cv_percent(&[Some(0.0), Some(0.0)], &[1.0, 1.0]), Some(0.0));
        assert_eq!(
            cv_percent(&[Some(1.0), Some(-1.0)], &[1.0, 1.0]),
            Some(CV_SATURATION)
        );
    }

    #[test]
    fn test_confidence_from_cv_tiers() {
        let p = ConfidencePolicy::default();

        let c = confidence_from_cv(Some(0.0), &p);
        assert_eq!((c.percent, c.tier), (Some(100), Tier::Green));

        let c = confidence_from_cv(Some(35.0), &p);
        assert_eq!((c.percent, c.tier), (Some(71), Tier::Green));

        let c = confidence_from_cv(Some(60.0), &p);
        assert_eq!((c.percent, c.tier), (Some(50), Tier::Yellow));
        assert_eq!(c.label, "medium confidence");

        let c = confidence_from_cv(Some(60.5), &p);
        assert_eq!(c.tier, Tier::Red);

        let c = confidence_from_cv(Some(CV_SATURATION), &p);
        assert_eq!((c.percent, c.tier), (Some(0), Tier::Red));
        assert_eq!(c.label, "low confidence");
    }

    #[test]
    fn test_confidence_from_cv_no_data() {
        let p = ConfidencePolicy::default();
        for cv in [None, Some(f64::NAN), Some(f64::INFINITY)] {
            let c = confidence_from_cv(cv, &p);
            assert_eq!(c, Confidence::no_data());
            assert_eq!(c.label, "no data");
        }
    }

    #[test]
    fn test_confidence_monotone_non_increasing() {
        let p = ConfidencePolicy::default();
        let pct: Vec<u8> = (0..=240)
            .map(|i| confidence_from_cv(Some(i as f64 * 0.5), &p).percent.unwrap())
            .collect();
        assert!(pct.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(pct.last(), Some(&0));
    }

    #[test]
    fn test_confidence_custom_policy() {
        let p = ConfidencePolicy {
            cv_cap: 100.0,
            green_max: 10.0,
            yellow_max: 20.0,
        };
        let c = confidence_from_cv(Some(25.0), &p);
        assert_eq!((c.percent, c.tier), (Some(75), Tier::Red));
    }

    #[test]
    fn test_mean_of_two() {
        assert_eq!(mean_of_two(Some(10.0), Some(20.0)), Some(15.0));
        assert_eq!(mean_of_two(Some(10.0), None), Some(10.0));
        assert_eq!(mean_of_two(None, Some(4.0)), Some(4.0));
        assert_eq!(mean_of_two(None, None), None);
    }

    #[test]
    fn test_weighted_metric_from_values() {
        let p = ConfidencePolicy::default();
        let m = WeightedMetric::from_values(&[Some(2.0), Some(1.0)], &[1.0, 0.5], &p);
        assert!(close(m.simple_mean.unwrap(), 1.5, 1e-12));
        assert!(close(m.weighted_mean.unwrap(), 5.0 / 3.0, 1e-12));
        assert_eq!(m.confidence.tier, Tier::Green);
        assert_eq!(m.confidence.percent, Some(76));

        let empty = WeightedMetric::from_values(&[], &[], &p);
        assert_eq!(empty, WeightedMetric::empty());
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Gray).unwrap(), "\"gray\"");
        assert_eq!(Tier::Yellow.to_string(), "yellow");
    }
}
