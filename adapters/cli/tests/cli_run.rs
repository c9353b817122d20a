use std::{fs, process::Command};

fn meadow() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_meadow"));
    let _ = command.env_remove("RUST_LOG");
    command
}

#[test]
fn bounded_run_prints_every_turn_then_pauses() {
    let output = meadow()
        .args(["--width", "6", "--height", "4", "--seed", "3", "--turns", "2", "--delay-ms", "0"])
        .output()
        .expect("failed to launch meadow binary");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.starts_with("🚀 Simulation started!"));
    assert!(stdout.contains("====== TURN 1 ======"));
    assert!(stdout.contains("====== TURN 2 ======"));
    assert!(!stdout.contains("====== TURN 3 ======"));
    assert!(stdout.trim_end().ends_with("⏸️ Simulation paused"));
}

#[test]
fn identical_seeds_print_identical_runs() {
    let run = || {
        meadow()
            .args(["--width", "9", "--height", "7", "--seed", "77", "--turns", "4", "--delay-ms", "0"])
            .output()
            .expect("failed to launch meadow binary")
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn config_file_values_apply_and_flags_override_them() {
    let path = std::env::temp_dir().join(format!("meadow-cli-run-{}.toml", std::process::id()));
    fs::write(
        &path,
        "[world]\nwidth = 3\nheight = 2\n[population]\nherbivores = 0\npredators = 0\ngrass = 0\n[spawning]\ngrass_chance = 0.0\n[run]\nturns = 1\ndelay_ms = 0\n",
    )
    .expect("temp dir is writable");

    let output = meadow()
        .arg("--config")
        .arg(&path)
        .args(["--width", "4", "--seed", "1"])
        .output()
        .expect("failed to launch meadow binary");
    let _ = fs::remove_file(&path);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 stdout");
    assert!(stdout.contains("▫️▫️▫️▫️\n▫️▫️▫️▫️\n"));
    assert!(stdout.contains("📊 total: 0"));
}

#[test]
fn invalid_dimensions_fail_with_a_message() {
    let output = meadow()
        .args(["--width", "0", "--turns", "1"])
        .output()
        .expect("failed to launch meadow binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf-8 stderr");
    assert!(stderr.contains("world width must be positive"));
}
