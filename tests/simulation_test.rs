use std::process::{Command, Output};

fn run_headless(extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_city_sim"))
        .args(["--frames", "120", "--fps", "0", "--seed", "7"])
        .args(extra)
        .env("RUST_LOG", "warn,city_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the simulation runs in headless mode without crashing
#[test]
fn test_headless_simulation_runs() {
    let output = run_headless(&[]);

    assert!(
        output.status.success(),
        "Simulation failed to run in headless mode. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SIMULATION COMPLETE"),
        "Simulation did not complete properly. stderr: {}",
        stderr
    );
}

/// Test that simulation statistics are logged
#[test]
fn test_simulation_statistics_logged() {
    let output = run_headless(&[]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    for line in [
        "Frames simulated: 120",
        "Frames presented: 120",
        "Buildings:",
        "Trees: 336",
        "Cars: 8",
        "Draw calls per frame:",
        "Vertices per frame:",
    ] {
        assert!(stderr.contains(line), "Missing '{}' statistic", line);
    }
}

/// Test that the generation options reach the layout
#[test]
fn test_cli_city_options() {
    let output = run_headless(&["--cars", "3", "--buildings", "10"]);
    assert!(output.status.success(), "Simulation failed to run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cars: 3"), "stderr: {}", stderr);
    assert!(stderr.contains("/10 buildings"), "stderr: {}", stderr);
}
