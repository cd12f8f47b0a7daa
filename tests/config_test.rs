//! Layered settings loading from TOML files

use std::fs;
use std::path::PathBuf;

use guaxiang::application::ApplicationError;
use guaxiang::config::Settings;
use guaxiang::domain::ClassifyMode;
use guaxiang::infrastructure::emit::OutputFormat;
use guaxiang::util::testing;
use rstest::{fixture, rstest};
use serial_test::serial;
use tempfile::TempDir;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("guaxiang.toml");
    fs::write(&path, content).unwrap();
    path
}

#[rstest]
fn given_full_file_when_loading_then_all_fields_applied(temp_dir: TempDir) {
    let path = write_config(
        &temp_dir,
        r#"
endpoint = "https://gua.example.org"
timeout_secs = 5
format = "html"

[classify]
mode = "text"
"#,
    );

    let settings = Settings::load_file(&path).unwrap();

    assert_eq!(settings.endpoint, "https://gua.example.org");
    assert_eq!(settings.timeout_secs, 5);
    assert_eq!(settings.format, OutputFormat::Html);
    assert_eq!(settings.classify, ClassifyMode::Text);
}

#[rstest]
fn given_offset_only_when_loading_then_branch_mode_with_offset(temp_dir: TempDir) {
    let path = write_config(&temp_dir, "[classify]\noffset = 3\n");

    let settings = Settings::load_file(&path).unwrap();

    assert_eq!(settings.classify, ClassifyMode::Branch { offset: 3 });
    assert_eq!(settings.endpoint, Settings::default().endpoint);
}

#[rstest]
fn given_empty_file_when_loading_then_defaults(temp_dir: TempDir) {
    let path = write_config(&temp_dir, "");

    assert_eq!(Settings::load_file(&path).unwrap(), Settings::default());
}

#[rstest]
#[case("[classify]\nmode = \"colour\"\n")]
#[case("endpoint = \"ftp://gua.example.org\"\n")]
#[case("timeout_secs = 0\n")]
#[case("endpoint = [1, 2]\n")]
fn given_bad_value_when_loading_then_config_error(temp_dir: TempDir, #[case] content: &str) {
    let path = write_config(&temp_dir, content);

    let err = Settings::load_file(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }), "{err}");
}

/// Sets `GUA_*` variables for one test and removes them on drop.
struct EnvGuard {
    keys: Vec<&'static str>,
}

impl EnvGuard {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        Self {
            keys: vars.iter().map(|(key, _)| *key).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            std::env::remove_var(key);
        }
    }
}

#[rstest]
#[serial]
fn given_env_overrides_when_loading_then_env_beats_file(temp_dir: TempDir) {
    let path = write_config(
        &temp_dir,
        "endpoint = \"http://file.example.org\"\ntimeout_secs = 5\n",
    );
    let _env = EnvGuard::set(&[
        ("GUA_ENDPOINT", "https://env.example.org"),
        ("GUA_TIMEOUT_SECS", "12"),
        ("GUA_FORMAT", "JSON"),
        ("GUA_CLASSIFY__OFFSET", "3"),
    ]);

    let settings = Settings::load(Some(&path)).unwrap();

    assert_eq!(settings.endpoint, "https://env.example.org");
    assert_eq!(settings.timeout_secs, 12);
    assert_eq!(settings.format, OutputFormat::Json);
    assert_eq!(settings.classify, ClassifyMode::Branch { offset: 3 });
}

#[rstest]
#[serial]
fn given_env_text_mode_when_loading_then_text_classifier(temp_dir: TempDir) {
    let path = write_config(&temp_dir, "[classify]\noffset = 4\n");
    let _env = EnvGuard::set(&[("GUA_CLASSIFY__MODE", "text")]);

    let settings = Settings::load(Some(&path)).unwrap();

    assert_eq!(settings.classify, ClassifyMode::Text);
}

#[rstest]
#[case("GUA_TIMEOUT_SECS", "abc")]
#[case("GUA_CLASSIFY__OFFSET", "x")]
#[case("GUA_FORMAT", "pdf")]
#[case("GUA_CLASSIFY__MODE", "colour")]
#[serial]
fn given_unparsable_env_value_when_loading_then_config_error_names_variable(
    temp_dir: TempDir,
    #[case] key: &'static str,
    #[case] value: &str,
) {
    let path = write_config(&temp_dir, "");
    let _env = EnvGuard::set(&[(key, value)]);

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(matches!(err, ApplicationError::Config { .. }), "{err}");
    if key != "GUA_CLASSIFY__MODE" {
        assert!(err.to_string().contains(key), "{err}");
    }
}

#[rstest]
fn given_missing_explicit_file_when_loading_then_config_error(temp_dir: TempDir) {
    let path = temp_dir.path().join("absent.toml");

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("config file not found"), "{err}");
}

#[rstest]
fn given_template_when_loading_then_same_as_defaults(temp_dir: TempDir) {
    let path = write_config(&temp_dir, &Settings::template());

    assert_eq!(Settings::load_file(&path).unwrap(), Settings::default());
}

#[test]
fn given_settings_when_serialising_then_toml_reloads() {
    let settings = Settings {
        classify: ClassifyMode::Text,
        ..Settings::default()
    };
    let toml = settings.to_toml().unwrap();
    assert!(toml.contains("endpoint = \"http://127.0.0.1:8080\""));

    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, &toml);
    assert_eq!(Settings::load_file(&path).unwrap(), settings);
}
