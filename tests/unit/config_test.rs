use std::fs;
use std::path::{Path, PathBuf};

use rowset::cli::SourceArgs;
use rowset::config::load_from_source_args;
use rowset::{RowsetError, Value};

fn temp_dir(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir()
        .join("rowset_test_config")
        .join(test_name);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

fn make_source_args(overrides: impl FnOnce(&mut SourceArgs)) -> SourceArgs {
    let mut args = SourceArgs::default();
    overrides(&mut args);
    args
}

// --- Config file resolution ---

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = temp_dir("missing_config");
    let args = make_source_args(|a| a.path = Some(dir.join("data.csv")));
    let missing = dir.join("nope.toml");
    let err = load_from_source_args(&args, false, Some(missing.as_path())).unwrap_err();
    assert!(matches!(err, RowsetError::Config { .. }));
    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn invalid_toml_is_a_config_error() {
    let dir = temp_dir("invalid_toml");
    let config = write_config(&dir, "[defaults\n");
    let args = make_source_args(|a| a.path = Some(dir.join("data.csv")));
    assert!(matches!(
        load_from_source_args(&args, false, Some(config.as_path())),
        Err(RowsetError::Config { .. })
    ));
}

#[test]
fn no_path_and_no_profile_is_an_error() {
    let dir = temp_dir("no_path");
    let config = write_config(&dir, "");
    let err = load_from_source_args(&SourceArgs::default(), false, Some(config.as_path()))
        .unwrap_err();
    assert!(matches!(err, RowsetError::Config { .. }));
}

// --- Profiles ---

#[test]
fn unknown_profile_is_an_error() {
    let dir = temp_dir("unknown_profile");
    let config = write_config(&dir, "[sources.sales]\npath = \"sales.csv\"\n");
    let args = make_source_args(|a| a.profile = Some("inventory".to_string()));
    let err = load_from_source_args(&args, false, Some(config.as_path())).unwrap_err();
    assert!(matches!(err, RowsetError::Config { .. }));
    assert!(err.to_string().contains("inventory"));
}

#[test]
fn profile_supplies_path_type_and_reader_options() {
    let dir = temp_dir("profile_options");
    let config = write_config(
        &dir,
        r#"
[defaults]
delimiter = ","
null_values = ["", "NULL"]
verbose = true

[sources.sales]
path = "sales.txt"
type = "csv"
delimiter = ";"
infer_types = true
"#,
    );
    let args = make_source_args(|a| a.profile = Some("sales".to_string()));
    let app = load_from_source_args(&args, false, Some(config.as_path())).unwrap();

    assert_eq!(app.source.path, PathBuf::from("sales.txt"));
    assert_eq!(app.source.file_type.as_deref(), Some("csv"));
    assert_eq!(app.source.reader.delimiter, b';');
    assert!(app.source.reader.infer_types);
    assert!(app.source.reader.has_headers);
    assert_eq!(app.source.reader.null_values, vec!["", "NULL"]);
    assert!(app.verbose);
}

#[test]
fn cli_arguments_override_profile() {
    let dir = temp_dir("cli_override");
    let config = write_config(
        &dir,
        "[sources.sales]\npath = \"sales.csv\"\ntype = \"csv\"\n",
    );
    let args = make_source_args(|a| {
        a.profile = Some("sales".to_string());
        a.path = Some(PathBuf::from("other.json"));
        a.file_type = Some("json".to_string());
    });
    let app = load_from_source_args(&args, false, Some(config.as_path())).unwrap();
    assert_eq!(app.source.path, PathBuf::from("other.json"));
    assert_eq!(app.source.file_type.as_deref(), Some("json"));
}

#[test]
fn multi_character_delimiter_is_rejected() {
    let dir = temp_dir("bad_delimiter");
    let config = write_config(&dir, "[defaults]\ndelimiter = \"||\"\n");
    let args = make_source_args(|a| a.path = Some(dir.join("data.csv")));
    assert!(matches!(
        load_from_source_args(&args, false, Some(config.as_path())),
        Err(RowsetError::Config { .. })
    ));
}

// --- Opening the configured source ---

#[test]
fn default_file_type_backs_up_extension_detection() {
    let dir = temp_dir("fallback_type");
    let data = dir.join("export.dat");
    fs::write(&data, "a\tb\n1\t2\n").unwrap();
    let config = write_config(
        &dir,
        "[defaults]\nfile_type = \"tsv\"\ninfer_types = true\n",
    );

    let args = make_source_args(|a| a.path = Some(data.clone()));
    let app = load_from_source_args(&args, false, Some(config.as_path())).unwrap();
    let result = app.source.open().unwrap();
    assert_eq!(result.columns(), ["a", "b"]);
    assert_eq!(result.row(0).unwrap().value("b").unwrap(), &Value::Int(2));
}

#[test]
fn detected_extension_wins_over_default_file_type() {
    let dir = temp_dir("detected_wins");
    let data = dir.join("export.csv");
    fs::write(&data, "a,b\n1,2\n").unwrap();
    let config = write_config(&dir, "[defaults]\nfile_type = \"json\"\n");

    let args = make_source_args(|a| a.path = Some(data.clone()));
    let app = load_from_source_args(&args, false, Some(config.as_path())).unwrap();
    assert_eq!(app.source.open().unwrap().len(), 1);
}

#[test]
fn verbose_flag_is_kept_without_config_default() {
    let dir = temp_dir("verbose_flag");
    let config = write_config(&dir, "");
    let args = make_source_args(|a| a.path = Some(dir.join("data.csv")));
    assert!(load_from_source_args(&args, true, Some(config.as_path())).unwrap().verbose);
    assert!(!load_from_source_args(&args, false, Some(config.as_path())).unwrap().verbose);
}
