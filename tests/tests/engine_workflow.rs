use std::fs;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use matri_registry::register_patient;
use matri_risk::{
    assess, AssessmentResult, DisplayColor, EngineConfig, RiskEngine, RiskTier, SignalOutcome,
    Vitals, VitalsRecord,
};
use matri_signal::{LinearSignal, MockPredictiveSignal, SignalError};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn registration_to_assessment_workflow() {
    tests::init_test_logger();

    // 1. Register the patient and work out gestational age at the visit
    let lmp = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let visit = NaiveDate::from_ymd_opt(2026, 8, 3).unwrap();
    let patient = register_patient("Grace Mensah", 31, lmp, visit).unwrap();
    let weeks = patient.gestational_weeks_on(visit);
    assert_eq!(weeks, 30.0);

    // 2. Vitals arrive as JSON from the intake form
    let record: VitalsRecord = serde_json::from_str(
        r#"{"systolic": 148, "diastolic": 96, "proteinuria": 3,
            "fetal_heart_rate": 150, "symptoms": ["headache", "swelling"]}"#,
    )
    .unwrap();
    let vitals = Vitals::try_from(record).unwrap().with_gestational_weeks(weeks);

    // 3. Engine configured from TOML with a linear model on disk
    let tmp = tempfile::tempdir().unwrap();
    let model_path = tmp.path().join("model.json");
    let model = LinearSignal::new(vec![0.6, 0.6, 0.2, 0.0], -0.3, "bp-protein").unwrap();
    fs::write(&model_path, serde_json::to_string(&model).unwrap()).unwrap();
    let config = EngineConfig::from_toml_str(&format!(
        "[signal]\ntimeout_ms = 500\nmodel = {:?}\n",
        model_path.display().to_string()
    ))
    .unwrap();
    let engine = config.build_engine().unwrap();

    // 4. Assess: hypertension 20 + preeclampsia 40 + model 15
    let result = engine.assess(&vitals).await.unwrap();
    assert_eq!(result.score(), 75);
    assert_eq!(result.tier(), RiskTier::Critical);
    assert_eq!(result.color(), DisplayColor::Red);
    assert_eq!(result.action(), "Emergency transport now");
    assert_eq!(result.reasons().len(), 3);
    assert!(result.reasons()[2].starts_with("AI pattern match"));

    // 5. Persist for audit and read back unchanged
    let stored = serde_json::to_string(&result).unwrap();
    let restored: AssessmentResult = serde_json::from_str(&stored).unwrap();
    assert_eq!(restored, result);
}

#[tokio::test]
async fn engine_signal_failure_matches_rules_only() {
    tests::init_test_logger();
    let vitals = Vitals::new(150.0, 95.0, 0, 100.0);

    let mut mock = MockPredictiveSignal::new();
    mock.expect_predict()
        .times(1)
        .returning(|_| Err(SignalError::Inference("corrupt weights".into())));
    let failing = RiskEngine::new().with_provider(Arc::new(mock));

    let result = failing.assess(&vitals).await.unwrap();
    assert_eq!(result, assess(&vitals, &SignalOutcome::Unavailable).unwrap());
    assert_eq!(result.score(), 50);
}

#[tokio::test]
async fn slow_model_falls_back_within_timeout() {
    struct SlowModel;

    #[async_trait::async_trait]
    impl matri_signal::PredictiveSignal for SlowModel {
        async fn predict(&self, _vitals: &Vitals) -> Result<f64, SignalError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(0.99)
        }
    }

    let engine = RiskEngine::new()
        .with_provider(Arc::new(SlowModel))
        .with_timeout(Duration::from_millis(30));
    let vitals = Vitals::new(120.0, 80.0, 0, 140.0);

    let result = tokio::time::timeout(Duration::from_secs(5), engine.assess(&vitals))
        .await
        .expect("engine must not block on a slow model")
        .unwrap();
    assert_eq!(result.tier(), RiskTier::Low);
}

#[test]
fn documented_clinical_scenarios() {
    let none = SignalOutcome::Unavailable;

    let preeclampsia = assess(&Vitals::new(150.0, 95.0, 2, 140.0), &none).unwrap();
    assert_eq!(preeclampsia.tier(), RiskTier::Critical);
    assert!(preeclampsia.reasons().iter().any(|r| r.starts_with("Hypertension detected")));
    assert!(preeclampsia.reasons().iter().any(|r| r.starts_with("Preeclampsia")));

    let hypertension = assess(&Vitals::new(150.0, 95.0, 0, 140.0), &none).unwrap();
    assert_eq!(hypertension.tier(), RiskTier::High);
    assert!(!hypertension.reasons().iter().any(|r| r.starts_with("Preeclampsia")));

    let normal = assess(
        &Vitals::new(120.0, 80.0, 0, 140.0)
            .with_gestational_weeks(38.0)
            .with_symptom("back pain"),
        &none,
    )
    .unwrap();
    assert_eq!(normal.tier(), RiskTier::Low);
    assert_eq!(normal.reasons(), &["Vitals within normal limits".to_string()]);

    let distress = assess(&Vitals::new(120.0, 80.0, 0, 100.0), &none).unwrap();
    assert_eq!(distress.score(), 30);
    assert_eq!(distress.tier(), RiskTier::High);
    assert!(distress.reasons()[0].contains("100"));
}
