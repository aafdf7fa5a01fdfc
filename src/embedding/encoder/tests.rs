use super::*;
use crate::config::Config;
use crate::similarity::cosine_similarity;
use serial_test::serial;

const BACKEND_RESUME: &str = "Experienced Python backend developer with FastAPI and PostgreSQL";
const BACKEND_JD: &str = "Looking for a backend engineer skilled in Python and REST APIs";
const CHEF_RESUME: &str = "Professional chef specializing in French pastry";

fn stub_encoder() -> SentenceEncoder {
    SentenceEncoder::load(EncoderConfig::stub()).expect("stub encoder should load")
}

fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

// =============================================================================
// EncoderConfig
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = EncoderConfig::default();
    assert_eq!(config.embedding_dim, 384);
    assert_eq!(config.max_seq_len, 256);
    assert!(!config.testing_stub);
    assert!(config.model_dir.as_os_str().is_empty());
}

#[test]
fn test_config_new_derives_file_paths() {
    let config = EncoderConfig::new("/models/all-MiniLM-L6-v2");
    assert_eq!(
        config.config_path(),
        std::path::PathBuf::from("/models/all-MiniLM-L6-v2/config.json")
    );
    assert_eq!(
        config.weights_path(),
        std::path::PathBuf::from("/models/all-MiniLM-L6-v2/model.safetensors")
    );
    assert_eq!(
        config.tokenizer_path(),
        std::path::PathBuf::from("/models/all-MiniLM-L6-v2/tokenizer.json")
    );
}

#[test]
fn test_config_builders() {
    let config = EncoderConfig::stub().max_seq_len(64).embedding_dim(128);
    assert!(config.testing_stub);
    assert_eq!(config.max_seq_len, 64);
    assert_eq!(config.embedding_dim, 128);
}

fn with_encoder_env<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
    // SAFETY: Test code only; env-mutating tests are #[serial].
    unsafe {
        std::env::remove_var(Config::ENV_MODEL_PATH);
        std::env::remove_var(Config::ENV_MAX_SEQ_LEN);
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
    }

    let result = f();

    // SAFETY: see above.
    unsafe {
        for (key, _) in vars {
            std::env::remove_var(key);
        }
    }

    result
}

#[test]
#[serial]
fn test_from_env_without_model_path_is_stub() {
    let config = with_encoder_env(&[], EncoderConfig::from_env).unwrap();

    assert!(config.testing_stub);
    assert_eq!(config.max_seq_len, 256);
    assert!(SentenceEncoder::load(config).unwrap().is_stub());
}

#[test]
#[serial]
fn test_from_env_blank_model_path_is_stub() {
    let config =
        with_encoder_env(&[(Config::ENV_MODEL_PATH, "   ")], EncoderConfig::from_env).unwrap();
    assert!(config.testing_stub);
}

#[test]
#[serial]
fn test_from_env_with_model_path_and_seq_len() {
    let config = with_encoder_env(
        &[
            (Config::ENV_MODEL_PATH, "/models/all-MiniLM-L6-v2"),
            (Config::ENV_MAX_SEQ_LEN, "128"),
        ],
        EncoderConfig::from_env,
    )
    .unwrap();

    assert!(!config.testing_stub);
    assert_eq!(
        config.model_dir,
        std::path::PathBuf::from("/models/all-MiniLM-L6-v2")
    );
    assert_eq!(config.max_seq_len, 128);
}

#[test]
#[serial]
fn test_from_env_rejects_bad_seq_len() {
    let err = with_encoder_env(&[(Config::ENV_MAX_SEQ_LEN, "lots")], EncoderConfig::from_env)
        .unwrap_err();
    assert!(err.to_string().contains(Config::ENV_MAX_SEQ_LEN));
}

#[test]
fn test_validate_requires_model_dir_without_stub() {
    let err = EncoderConfig::default().validate().unwrap_err();
    assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
}

#[test]
fn test_validate_missing_model_dir() {
    let err = EncoderConfig::new("/nonexistent/minilm")
        .validate()
        .unwrap_err();
    assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
}

#[test]
fn test_validate_rejects_zero_dimension() {
    let err = EncoderConfig::stub().embedding_dim(0).validate().unwrap_err();
    assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
}

#[test]
fn test_load_incomplete_model_dir_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("config.json"), "{}").expect("write config");

    let config = EncoderConfig::new(dir.path());
    assert!(!config.model_available());

    let err = SentenceEncoder::load(config).unwrap_err();
    assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
}

#[test]
fn test_load_corrupt_model_dir_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    for file in ["config.json", "model.safetensors", "tokenizer.json"] {
        std::fs::write(dir.path().join(file), "not a model").expect("write file");
    }

    let config = EncoderConfig::new(dir.path());
    assert!(config.model_available());
    assert!(SentenceEncoder::load(config).is_err());
}

#[test]
fn test_sequence_budget_within_position_table() {
    assert!(check_sequence_budget(256, 512).is_ok());
    assert!(check_sequence_budget(512, 512).is_ok());
}

#[test]
fn test_sequence_budget_beyond_position_table_is_rejected() {
    let err = check_sequence_budget(1024, 512).unwrap_err();
    match err {
        EmbeddingError::InvalidConfig { reason } => {
            assert!(reason.contains("1024"));
            assert!(reason.contains("512"));
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
}

// =============================================================================
// Stub backend
// =============================================================================

#[test]
fn test_stub_flags() {
    let encoder = stub_encoder();
    assert!(encoder.is_stub());
    assert!(!encoder.has_model());
    assert_eq!(encoder.embedding_dim(), 384);
    assert!(format!("{encoder:?}").contains("Stub"));
}

#[test]
fn test_stub_embedding_shape_and_norm() {
    let encoder = stub_encoder();
    let embedding = encoder.embed(BACKEND_RESUME).unwrap();

    assert_eq!(embedding.len(), 384);
    assert!((norm(&embedding) - 1.0).abs() < 1e-5);
    assert!(embedding.iter().all(|x| x.is_finite() && *x >= 0.0));
}

#[test]
fn test_stub_is_deterministic() {
    let a = stub_encoder().embed(BACKEND_JD).unwrap();
    let b = stub_encoder().embed(BACKEND_JD).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_stub_ignores_case_and_punctuation() {
    let encoder = stub_encoder();
    let a = encoder.embed("Python, FastAPI; PostgreSQL.").unwrap();
    let b = encoder.embed("python fastapi postgresql").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_stub_filler_only_text_is_non_zero() {
    let encoder = stub_encoder();
    let embedding = encoder.embed("the and for").unwrap();
    assert!((norm(&embedding) - 1.0).abs() < 1e-5);

    let embedding = encoder.embed("!!!").unwrap();
    assert!((norm(&embedding) - 1.0).abs() < 1e-5);
}

#[test]
fn test_stub_custom_dimension() {
    let encoder =
        SentenceEncoder::load(EncoderConfig::stub().embedding_dim(64)).expect("stub loads");
    assert_eq!(encoder.embed(CHEF_RESUME).unwrap().len(), 64);
}

#[test]
fn test_stub_overlap_orders_similarity() {
    let encoder = stub_encoder();
    let jd = encoder.embed(BACKEND_JD).unwrap();
    let backend = encoder.embed(BACKEND_RESUME).unwrap();
    let chef = encoder.embed(CHEF_RESUME).unwrap();

    let related = cosine_similarity(&backend, &jd).unwrap();
    let unrelated = cosine_similarity(&chef, &jd).unwrap();

    assert!(
        related > unrelated,
        "related={related} unrelated={unrelated}"
    );
}

#[test]
fn test_text_encoder_trait_delegates() {
    let encoder = stub_encoder();
    let via_trait = TextEncoder::encode(&encoder, CHEF_RESUME).unwrap();
    assert_eq!(via_trait, encoder.embed(CHEF_RESUME).unwrap());
    assert_eq!(TextEncoder::embedding_dim(&encoder), 384);
    assert!(TextEncoder::is_stub(&encoder));
}
