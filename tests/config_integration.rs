//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use drift2d::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("DRIFT_PHYSICS__GRAVITY_Y", "2.5");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.physics.gravity_y, 2.5);
    std::env::remove_var("DRIFT_PHYSICS__GRAVITY_Y");
}

#[test]
#[serial]
fn test_env_override_boundary_policy() {
    std::env::set_var("DRIFT_PHYSICS__BOUNDARY", "revert");
    let config = AppConfig::load().unwrap();
    assert_eq!(
        config.physics.boundary,
        drift2d::BoundaryPolicy::Revert
    );
    std::env::remove_var("DRIFT_PHYSICS__BOUNDARY");
}

#[test]
#[serial]
fn test_default_file_loading() {
    // Remove env vars so the file layer is observed directly
    std::env::remove_var("DRIFT_PHYSICS__GRAVITY_Y");
    std::env::remove_var("DRIFT_PHYSICS__BOUNDARY");

    let config = AppConfig::load().unwrap();
    // config/default.toml pins the shipped defaults
    assert!(config.bounds.width > 0.0);
    assert!(config.bounds.height > 0.0);
    assert!(config.sim.frame_rate > 0);
}
