use matri_risk::assessment::{NORMAL_LIMITS_REASON, SIGNAL_POINTS};
use matri_risk::{assess, RiskTier, SignalError, SignalOutcome, VitalField, Vitals};
use proptest::prelude::*;

fn vitals() -> impl Strategy<Value = Vitals> {
    (
        0.0f64..=300.0,
        0.0f64..=200.0,
        0u8..=4,
        0.0f64..=300.0,
        proptest::option::of(0.0f64..=45.0),
        proptest::collection::btree_set("[a-z ]{1,12}", 0..4),
    )
        .prop_map(
            |(systolic, diastolic, proteinuria, fetal_heart_rate, gestational_weeks, symptoms)| {
                Vitals {
                    systolic,
                    diastolic,
                    proteinuria,
                    fetal_heart_rate,
                    gestational_weeks,
                    symptoms,
                }
            },
        )
}

fn signal() -> impl Strategy<Value = Option<f64>> {
    proptest::option::of(0.0f64..=1.0)
}

proptest! {
    #[test]
    fn severe_systolic_is_always_critical(v in vitals(), systolic in 160.0f64..=300.0, p in signal()) {
        let v = Vitals { systolic, ..v };
        let result = assess(&v, &SignalOutcome::from(p)).unwrap();
        prop_assert_eq!(result.tier(), RiskTier::Critical);
    }

    #[test]
    fn severe_diastolic_is_always_critical(v in vitals(), diastolic in 110.0f64..=200.0, p in signal()) {
        let v = Vitals { diastolic, ..v };
        let result = assess(&v, &SignalOutcome::from(p)).unwrap();
        prop_assert_eq!(result.tier(), RiskTier::Critical);
    }

    #[test]
    fn assessment_is_deterministic(v in vitals(), p in signal()) {
        let first = assess(&v, &SignalOutcome::from(p)).unwrap();
        let second = assess(&v, &SignalOutcome::from(p)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn failed_signal_equals_no_signal(v in vitals()) {
        let failed = SignalOutcome::Failed(SignalError::TimedOut(std::time::Duration::from_millis(1)));
        prop_assert_eq!(
            assess(&v, &failed).unwrap(),
            assess(&v, &SignalOutcome::Unavailable).unwrap()
        );
    }

    #[test]
    fn tier_color_and_reasons_follow_score(v in vitals(), p in signal()) {
        let result = assess(&v, &SignalOutcome::from(p)).unwrap();
        prop_assert_eq!(result.tier(), RiskTier::from_score(result.score()));
        prop_assert_eq!(result.color(), result.tier().color());
        prop_assert_eq!(result.action(), result.tier().action());
        if result.tier() == RiskTier::Low {
            prop_assert_eq!(result.reasons(), &[NORMAL_LIMITS_REASON.to_string()][..]);
        } else {
            prop_assert!(!result.reasons().is_empty());
            prop_assert!(result.reasons().len() <= 4);
        }
    }

    #[test]
    fn signal_never_lowers_the_score(v in vitals(), p in 0.0f64..=1.0) {
        let without = assess(&v, &SignalOutcome::Unavailable).unwrap();
        let with = assess(&v, &SignalOutcome::Value(p)).unwrap();
        prop_assert!(with.score() == without.score() || with.score() == without.score() + SIGNAL_POINTS);
        prop_assert!(with.tier() >= without.tier());
    }

    #[test]
    fn symptom_tags_do_not_change_the_result(v in vitals(), p in signal()) {
        let bare = Vitals { symptoms: Default::default(), ..v.clone() };
        prop_assert_eq!(
            assess(&v, &SignalOutcome::from(p)).unwrap(),
            assess(&bare, &SignalOutcome::from(p)).unwrap()
        );
    }

    #[test]
    fn negative_readings_are_rejected(v in vitals(), bad in -500.0f64..-0.001) {
        let v = Vitals { fetal_heart_rate: bad, ..v };
        let err = assess(&v, &SignalOutcome::Unavailable).unwrap_err();
        prop_assert_eq!(err.field(), VitalField::FetalHeartRate);
    }
}
