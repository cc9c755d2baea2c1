use std::{fs, path::PathBuf};

use tempfile::tempdir;

use tessel_cli::{Args, run};

/// Demo scenes live at the workspace root.
fn demos_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .json files from a directory
fn collect_scene_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

fn args_for(input: &PathBuf, output: PathBuf, config: Option<String>) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let demos = collect_scene_files(demos_dir());

    assert!(!demos.is_empty(), "No demo scenes found in demos/");

    let mut failed = Vec::new();

    for demo_path in &demos {
        let output_path = temp_dir.path().join(format!(
            "{}.jsx",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args_for(demo_path, output_path.clone(), None)) {
            Ok(()) => {
                let code = fs::read_to_string(&output_path).expect("Output should exist");
                assert!(
                    code.starts_with("export default function Board() {"),
                    "{} produced unexpected output",
                    demo_path.display()
                );
            }
            Err(e) => failed.push((demo_path.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nDemo scenes that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} demo scene(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_scene_files(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error scenes found in demos/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "error_{}.jsx",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args_for(demo_path, output_path, None)).is_ok() {
            unexpectedly_succeeded.push(demo_path.clone());
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError scenes that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error scene(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
        [format]
        quote_style = "single"
        indent_width = 4

        [output]
        component_name = "Staircase"
        "#,
    )
    .expect("Failed to write config");

    let input = demos_dir().join("staircase.json");
    let output_path = temp_dir.path().join("staircase.jsx");
    run(&args_for(
        &input,
        output_path.clone(),
        Some(config_path.to_string_lossy().to_string()),
    ))
    .expect("Failed to run with config");

    let code = fs::read_to_string(&output_path).expect("Output should exist");
    assert!(code.starts_with("export default function Staircase() {\n    return (\n"));
    assert!(code.contains("'border-box'"));
    assert!(code.contains("data-id=\"step-3\""));
}

#[test]
fn e2e_missing_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_dir().join("staircase.json");

    let result = run(&args_for(
        &input,
        temp_dir.path().join("out.jsx"),
        Some("does/not/exist.toml".to_string()),
    ));
    assert!(result.is_err());
}
