use pacekeeper::performance::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_for_ten_km_in_fifty_minutes() {
        assert_eq!(
            pace_from_distance_time(10.0, 50.0).as_deref(),
            Some("5'00\"/km")
        );
    }

    #[test]
    fn test_pace_increases_with_time_and_falls_with_distance() {
        let distances = [1.0, 5.0, 10.0, 21.097, 42.195];
        let times = [4.0, 25.0, 50.0, 105.0, 240.0];

        for &d in &distances {
            let paces: Vec<f64> = times
                .iter()
                .map(|&t| pace_minutes_per_km(d, t).unwrap())
                .collect();
            assert!(paces.windows(2).all(|w| w[1] > w[0]), "distance {}", d);
        }
        for &t in &times {
            let paces: Vec<f64> = distances
                .iter()
                .map(|&d| pace_minutes_per_km(d, t).unwrap())
                .collect();
            assert!(paces.windows(2).all(|w| w[1] < w[0]), "time {}", t);
        }
    }

    #[test]
    fn test_five_k_predicts_ten_k() {
        let minutes = riegel_minutes(5.0, 25.0, 10.0).unwrap();
        assert!((minutes - 52.12).abs() < 0.01);
        assert_eq!(predict_race_time(5.0, 25.0, 10.0).as_deref(), Some("52:07"));
    }

    #[test]
    fn test_prediction_increases_with_target_distance() {
        let targets = [3.0, 5.0, 10.0, 15.0, 21.097, 30.0, 42.195];
        let minutes: Vec<f64> = targets
            .iter()
            .map(|&target| riegel_minutes(5.0, 22.5, target).unwrap())
            .collect();
        assert!(minutes.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_standard_predictions_are_ordered() {
        let predictions = predict_race_times(10.0, 45.0).unwrap();
        let labels: Vec<_> = predictions.iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["10K", "Half Marathon", "Marathon"]);
        assert_eq!(predictions[0].formatted, "45:00");
        assert!(predictions
            .windows(2)
            .all(|w| w[1].minutes > w[0].minutes));
        assert!(predict_race_times(10.0, 0.0).is_none());
    }

    #[test]
    fn test_zones_for_age_forty() {
        let zones = heart_rate_zones(40.0).unwrap();
        let lines: Vec<String> = zones.iter().map(|z| z.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "Z1 Recovery: 90-108 bpm",
                "Z2 Aerobic: 108-126 bpm",
                "Z3 Tempo: 126-144 bpm",
                "Z4 Threshold: 144-162 bpm",
                "Z5 VO2 Max: 162-180 bpm",
            ]
        );
    }

    #[test]
    fn test_zones_are_contiguous_and_cover_range() {
        for age in 12..=95 {
            let age = age as f64;
            let max_hr = max_heart_rate(age).unwrap();
            let zones = heart_rate_zones(age).unwrap();

            assert_eq!(zones[0].lower_bpm, (0.5 * max_hr).round() as u32);
            assert_eq!(zones[4].upper_bpm, max_hr.round() as u32);
            for zone in &zones {
                assert!(zone.lower_bpm < zone.upper_bpm, "age {}", age);
            }
            for pair in zones.windows(2) {
                assert_eq!(pair[0].upper_bpm, pair[1].lower_bpm, "age {}", age);
            }
        }
    }

    #[test]
    fn test_bmi_for_seventy_kg_at_175_cm() {
        let reading = bmi(70.0, 175.0).unwrap();
        assert_eq!(reading.value, 22.9);
        assert_eq!(reading.category.as_str(), "Normal");
    }

    #[test]
    fn test_bmi_boundaries_are_exact() {
        assert_eq!(BmiCategory::from_bmi(18.5).as_str(), "Normal");
        assert_eq!(BmiCategory::from_bmi(24.9).as_str(), "Overweight");
        assert_eq!(BmiCategory::from_bmi(29.9).as_str(), "Obese");
        assert_eq!(BmiCategory::from_bmi(18.49).as_str(), "Underweight");
    }

    #[test]
    fn test_hydration_for_one_hour_session() {
        let need = hydration_need(70.0, 60.0).unwrap();
        assert_eq!(need.millilitres, 3250.0);
        assert_eq!(need.to_string(), "3.25");
    }

    #[test]
    fn test_hydration_is_additively_separable() {
        let base = hydration_need(60.0, 30.0).unwrap().millilitres;
        let heavier = hydration_need(80.0, 30.0).unwrap().millilitres;
        let longer = hydration_need(60.0, 90.0).unwrap().millilitres;
        let both = hydration_need(80.0, 90.0).unwrap().millilitres;

        assert!(((both - base) - ((heavier - base) + (longer - base))).abs() < 1e-9);
        // Doubling a term doubles its share
        let weight_share = heavier - base;
        let doubled = hydration_need(100.0, 30.0).unwrap().millilitres - base;
        assert!((doubled - 2.0 * weight_share).abs() < 1e-9);
    }

    #[test]
    fn test_speed_to_pace_at_twelve_kmh() {
        assert_eq!(speed_to_pace(12.0).as_deref(), Some("5'00\""));
        assert_eq!(pace_to_speed(5.0), Some(12.0));
    }

    #[test]
    fn test_invalid_inputs_give_no_result() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(pace_from_distance_time(bad, 50.0).is_none());
            assert!(pace_from_distance_time(10.0, bad).is_none());
            assert!(predict_race_time(5.0, 25.0, bad).is_none());
            assert!(heart_rate_zones(bad).is_none());
            assert!(bmi(bad, 175.0).is_none());
            assert!(hydration_need(70.0, bad).is_none());
            assert!(speed_to_pace(bad).is_none());
        }
    }
}
