#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::fs;

use neuroflap::simulation::error::EvolutionError;
use neuroflap::simulation::params::{CourseParams, Params};

#[test]
fn test_default_params_are_valid() {
    let params = Params::default();

    assert!(params.validate().is_ok());
    assert_eq!(params.compatibility_threshold, 0.5);
    assert_eq!(params.mutation_rate, 0.1);
    assert_eq!(params.mutation_magnitude, 0.5);
    assert_eq!(params.top_species, 3);
    assert_eq!(params.seed, None);
}

#[test]
fn test_invalid_params_are_rejected() {
    let cases = [
        Params {
            population_size: 0,
            ..Params::default()
        },
        Params {
            compatibility_threshold: 0.0,
            ..Params::default()
        },
        Params {
            compatibility_threshold: f32::NAN,
            ..Params::default()
        },
        Params {
            mutation_rate: 1.5,
            ..Params::default()
        },
        Params {
            mutation_magnitude: -0.1,
            ..Params::default()
        },
        Params {
            mutation_magnitude: f32::INFINITY,
            ..Params::default()
        },
        Params {
            mutation_magnitude: f32::MAX,
            ..Params::default()
        },
        Params {
            top_species: 0,
            ..Params::default()
        },
        Params {
            course: CourseParams {
                pipe_width: -10.0,
                ..CourseParams::default()
            },
            ..Params::default()
        },
        Params {
            course: CourseParams {
                pipe_width: 0.0,
                pipe_spacing: 1.0,
                ..CourseParams::default()
            },
            ..Params::default()
        },
        Params {
            course: CourseParams {
                height: f32::INFINITY,
                ..CourseParams::default()
            },
            ..Params::default()
        },
        Params {
            course: CourseParams {
                gap_margin: -5.0,
                ..CourseParams::default()
            },
            ..Params::default()
        },
        Params {
            course: CourseParams {
                gap_size: 10.0,
                ..CourseParams::default()
            },
            ..Params::default()
        },
        Params {
            course: CourseParams {
                gap_size: 700.0,
                ..CourseParams::default()
            },
            ..Params::default()
        },
        Params {
            course: CourseParams {
                bird_x: 600.0,
                ..CourseParams::default()
            },
            ..Params::default()
        },
    ];

    for params in cases {
        assert!(
            matches!(params.validate(), Err(EvolutionError::InvalidParams(_))),
            "accepted {params:?}"
        );
    }
}

#[test]
fn test_partial_json_uses_defaults() {
    let params: Params =
        serde_json::from_str(r#"{ "population_size": 12, "seed": 7, "course": { "gravity": 0.8 } }"#)
            .unwrap();

    assert_eq!(params.population_size, 12);
    assert_eq!(params.seed, Some(7));
    assert_eq!(params.course.gravity, 0.8);
    assert_eq!(params.course.width, CourseParams::default().width);
    assert_eq!(params.top_species, 3);
}

#[test]
fn test_save_and_load() {
    let params = Params {
        population_size: 33,
        seed: Some(5),
        max_generations: 7,
        ..Params::default()
    };
    let path = std::env::temp_dir().join("neuroflap_params_save_load.json");

    params.save_to_file(&path).expect("Failed to save params");
    let loaded = Params::load_from_file(&path).expect("Failed to load params");

    assert_eq!(loaded, params);

    fs::remove_file(&path).ok();
}

#[test]
fn test_load_rejects_invalid_file() {
    let path = std::env::temp_dir().join("neuroflap_params_invalid.json");
    fs::write(&path, r#"{ "population_size": 0 }"#).unwrap();

    let result = Params::load_from_file(&path);
    assert!(matches!(result, Err(EvolutionError::InvalidParams(_))));

    fs::remove_file(&path).ok();
}

#[test]
fn test_load_reports_missing_and_malformed_files() {
    let missing = std::env::temp_dir().join("neuroflap_params_does_not_exist.json");
    assert!(matches!(
        Params::load_from_file(&missing),
        Err(EvolutionError::Io(_))
    ));

    let malformed = std::env::temp_dir().join("neuroflap_params_malformed.json");
    fs::write(&malformed, "{ not json").unwrap();
    assert!(matches!(
        Params::load_from_file(&malformed),
        Err(EvolutionError::Json(_))
    ));

    fs::remove_file(&malformed).ok();
}

#[test]
fn test_huge_mutation_magnitude_in_json_is_rejected() {
    let path = std::env::temp_dir().join("neuroflap_params_huge_magnitude.json");
    fs::write(&path, r#"{ "mutation_magnitude": 3.4028235e38 }"#).unwrap();

    let result = Params::load_from_file(&path);
    assert!(matches!(result, Err(EvolutionError::InvalidParams(_))));

    fs::remove_file(&path).ok();
}
