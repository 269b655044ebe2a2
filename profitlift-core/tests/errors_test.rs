use profitlift_core::errors::*;

#[test]
fn invalid_threshold_carries_name_and_value() {
    let err = MiningError::InvalidThreshold {
        name: "min_support",
        value: 1.5,
    };
    let msg = err.to_string();
    assert!(msg.contains("min_support"));
    assert!(msg.contains("1.5"));
    assert_eq!(err.error_code(), error_code::INVALID_THRESHOLD);
}

#[test]
fn not_fitted_has_stable_code() {
    let err = CausalError::NotFitted { model: "treatment" };
    assert!(err.to_string().contains("treatment"));
    assert_eq!(err.error_code(), "MODEL_NOT_FITTED");
}

#[test]
fn subsystem_errors_convert_into_top_level() {
    let err: ProfitLiftError = ConfigError::ValidationFailed {
        field: "mining.max_depth".into(),
        message: "must be 0, 1 or 2".into(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::CONFIG_ERROR);
    assert!(err.to_string().contains("mining.max_depth"));
}
