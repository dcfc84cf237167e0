// predict / discr / score: thresholding policy, shapes and errors.

use approx::assert_relative_eq;

use perceptron_nn::{Matrix, MlpConfig, MlpError, MultilayerPerceptron, Normalizer, Parameters};

/// A model whose output pre-activation is always zero, so every prediction
/// is exactly 0.5.
fn half_model() -> MultilayerPerceptron {
    let normalizer = Normalizer { mean: vec![0.0, 0.0], std: vec![1.0, 1.0] };
    let params = Parameters {
        w_hidden: Matrix::from_data(vec![vec![0.3, -0.2], vec![0.1, 0.4]]).unwrap(),
        w_output: Matrix::zeros(2, 1),
    };
    let config = MlpConfig::default().with_hidden_units(2);
    MultilayerPerceptron::from_parts(config, normalizer, params).unwrap()
}

/// Output pre-activation is `5 * (s(4x) - s(-4x))`, so predictions sit above
/// 0.5 exactly when `x > 0`.
fn sign_model() -> MultilayerPerceptron {
    let normalizer = Normalizer { mean: vec![0.0], std: vec![1.0] };
    let params = Parameters {
        w_hidden: Matrix::from_data(vec![vec![4.0, -4.0]]).unwrap(),
        w_output: Matrix::from_data(vec![vec![5.0], vec![-5.0]]).unwrap(),
    };
    let config = MlpConfig::default().with_hidden_units(2);
    MultilayerPerceptron::from_parts(config, normalizer, params).unwrap()
}

#[test]
fn test_exactly_half_classifies_as_zero() {
    let mlp = half_model();
    let x = Matrix::from_data(vec![vec![1.0, 2.0], vec![-3.0, 0.5]]).unwrap();

    let y = mlp.predict(&x).unwrap();
    assert!(y.data.iter().flatten().all(|&v| v == 0.5));
    assert!(mlp.discr(&x).unwrap().data.iter().flatten().all(|&v| v == 0.0));

    let score = mlp.score(&x, &Matrix::column(&[0.0, 1.0])).unwrap();
    assert_eq!(score.data, vec![vec![1.0], vec![0.0]]);
}

#[test]
fn test_score_marks_matches_per_unit() {
    let mlp = sign_model();
    let x = Matrix::from_data(vec![vec![-2.0], vec![-1.0], vec![1.0], vec![2.0]]).unwrap();
    let t = Matrix::column(&[0.0, 1.0, 1.0, 1.0]);

    assert_eq!(mlp.discr(&x).unwrap().data, vec![vec![0.0], vec![0.0], vec![1.0], vec![1.0]]);
    let score = mlp.score(&x, &t).unwrap();
    assert_eq!(score.data, vec![vec![1.0], vec![0.0], vec![1.0], vec![1.0]]);
    assert_relative_eq!(score.mean(), 0.75);
}

#[test]
fn test_predict_one_matches_predict_row() {
    let mlp = sign_model();
    let x = Matrix::from_data(vec![vec![0.7]]).unwrap();
    assert_eq!(mlp.predict_one(&[0.7]).unwrap(), mlp.predict(&x).unwrap().data[0]);
}

#[test]
fn test_mean_absolute_error() {
    let mlp = half_model();
    let x = Matrix::from_data(vec![vec![0.0, 0.0], vec![1.0, 1.0]]).unwrap();
    let t = Matrix::column(&[0.0, 1.0]);
    assert_relative_eq!(mlp.mean_absolute_error(&x, &t).unwrap(), 0.5);
}

#[test]
fn test_predict_rejects_wrong_feature_count() {
    let mlp = half_model();
    let x = Matrix::zeros(2, 3);
    assert!(matches!(
        mlp.predict(&x),
        Err(MlpError::DimensionMismatch { expected: 2, actual: 3, .. })
    ));
    assert!(mlp.predict_one(&[1.0]).is_err());
}

#[test]
fn test_ragged_rows_are_rejected_not_panicked_on() {
    let mlp = half_model();
    let x = Matrix { rows: 2, cols: 2, data: vec![vec![1.0, 2.0], vec![3.0]] };
    assert!(matches!(
        mlp.predict(&x),
        Err(MlpError::DimensionMismatch { expected: 2, actual: 1, .. })
    ));
    assert!(mlp.discr(&x).is_err());

    let x = Matrix::zeros(2, 2);
    let t = Matrix { rows: 2, cols: 1, data: vec![vec![1.0], vec![0.0, 1.0]] };
    assert!(matches!(mlp.score(&x, &t), Err(MlpError::DimensionMismatch { .. })));
    assert!(mlp.mean_absolute_error(&x, &t).is_err());
}

#[test]
fn test_score_rejects_mismatched_targets() {
    let mlp = half_model();
    let x = Matrix::zeros(2, 2);
    assert!(matches!(
        mlp.score(&x, &Matrix::zeros(3, 1)),
        Err(MlpError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        mlp.score(&x, &Matrix::zeros(2, 2)),
        Err(MlpError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_predict_before_fit_fails() {
    let mlp = MultilayerPerceptron::new(MlpConfig::default()).unwrap();
    assert!(matches!(mlp.predict(&Matrix::zeros(1, 1)), Err(MlpError::NotTrained)));
    assert!(matches!(mlp.predict_one(&[0.0]), Err(MlpError::NotTrained)));
    assert!(mlp.parameters().is_none());
}

#[test]
fn test_from_parts_checks_shapes() {
    let normalizer = Normalizer { mean: vec![0.0], std: vec![1.0] };
    let params = Parameters {
        w_hidden: Matrix::zeros(2, 3),
        w_output: Matrix::zeros(3, 1),
    };
    let config = MlpConfig::default().with_hidden_units(3);
    assert!(MultilayerPerceptron::from_parts(config.clone(), normalizer, params.clone()).is_err());

    let normalizer = Normalizer { mean: vec![0.0, 0.0], std: vec![1.0, 1.0] };
    assert!(MultilayerPerceptron::from_parts(config.with_hidden_units(4), normalizer, params).is_err());
}
