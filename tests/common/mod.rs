//! Shared fixtures for integration tests

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `content` to `name` inside a fresh temporary directory.
///
/// The directory is returned so it outlives the test body.
pub fn measurement_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    (dir, path)
}

/// A small motor/pump recording with `Group::Signal` headers.
pub const MOTOR_RUN: &str = "\
time;Motor::Speed;Motor::Fault;Pump::Pressure;Pump::Setpoint
0.00;1500.1;0;2.51;2.5
0.01;1503.4;0;2.49;2.5
0.02;1498.7;0;2.50;2.5
";
