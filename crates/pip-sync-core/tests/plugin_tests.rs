//! Tests for the lifecycle hooks and their configuration

use pip_sync_core::{LISTING_DISABLED_MESSAGE, Plugin, PluginConfig};
use pip_sync_test_utils::{FakeEnvironment, RecordingReporter, TestProject};
use pretty_assertions::assert_eq;

#[test]
fn config_defaults_without_files() {
    let project = TestProject::new();

    let config = PluginConfig::load(project.root()).unwrap();

    assert!(config.is_empty());
    assert!(config.skip_listing());
    assert!(!config.hash_venv());
}

#[test]
fn config_reads_tox_ini() {
    let project = TestProject::new();
    project.write(
        "tox.ini",
        "[tox]\nenvlist = py312\n\n[tox_pip_sync]\nskip_listing = off\nhash_venv = yes\n",
    );

    let config = PluginConfig::load(project.root()).unwrap();

    assert!(!config.skip_listing());
    assert!(config.hash_venv());
}

#[test]
fn config_prefers_pyproject_over_tox_ini() {
    let project = TestProject::new();
    project.write("tox.ini", "[tox_pip_sync]\nskip_listing = false\nhash_venv = true\n");
    project.write(
        "pyproject.toml",
        "[project]\nname = \"demo\"\n\n[tool.tox.tox_pip_sync]\nskip_listing = true\n",
    );

    let config = PluginConfig::load(project.root()).unwrap();

    assert!(config.skip_listing());
    // Keys only set in tox.ini survive the overlay
    assert!(config.hash_venv());
}

#[test]
fn config_rejects_malformed_pyproject() {
    let project = TestProject::new();
    project.write("pyproject.toml", "[tool.tox.tox_pip_sync\nskip_listing = ");

    let err = PluginConfig::load(project.root()).unwrap_err();

    assert!(err.to_string().contains("pyproject.toml"));
}

#[test]
fn install_deps_syncs_and_claims_the_step() {
    let project = TestProject::new();
    let env = FakeEnvironment::new(&project, &["package"]).with_tools_installed();
    let reporter = RecordingReporter::new();
    let mut plugin = Plugin::configure(project.root()).unwrap();

    let handled = plugin.install_deps(&env, &reporter).unwrap();

    assert!(handled);
    assert!(plugin.is_synced(&env));
    assert_eq!(env.programs_run(), vec!["pip-compile", "pip-sync"]);
}

#[test]
fn before_tests_syncs_only_once_per_process() {
    let project = TestProject::new();
    let env = FakeEnvironment::new(&project, &["package"]).with_tools_installed();
    let reporter = RecordingReporter::new();
    let mut plugin = Plugin::default();

    plugin.before_tests(&env, &reporter).unwrap();
    assert_eq!(env.programs_run(), vec!["pip-compile", "pip-sync"]);

    env.clear_calls();
    plugin.before_tests(&env, &reporter).unwrap();
    assert!(env.calls().is_empty());
}

#[test]
fn before_tests_skips_environments_already_installed() {
    let project = TestProject::new();
    let env = FakeEnvironment::new(&project, &["package"]).with_tools_installed();
    let reporter = RecordingReporter::new();
    let mut plugin = Plugin::default();

    plugin.install_deps(&env, &reporter).unwrap();
    env.clear_calls();
    plugin.before_tests(&env, &reporter).unwrap();

    assert!(env.calls().is_empty());
}

#[test]
fn before_tests_in_a_new_process_checks_the_record() {
    let project = TestProject::new();
    let env = FakeEnvironment::new(&project, &["package"]).with_tools_installed();
    let reporter = RecordingReporter::new();

    Plugin::default().install_deps(&env, &reporter).unwrap();
    env.clear_calls();
    Plugin::default().before_tests(&env, &reporter).unwrap();

    // Synced before, so the fingerprint matches and nothing runs
    assert!(env.calls().is_empty());
}

#[test]
fn on_env_create_clears_generated_files() {
    let project = TestProject::new();
    project.write_env_file("tox-pip-sync_abc.in", "package");
    project.write_env_file("tox-pip-sync_abc.txt", "package==1.0");
    project.write_env_file("pyvenv.cfg", "");
    let env = FakeEnvironment::new(&project, &["package"]);

    Plugin::default().on_env_create(&env).unwrap();

    assert_eq!(project.env_files(), vec!["pyvenv.cfg"]);
}

#[test]
fn env_report_is_replaced_by_default() {
    let project = TestProject::new();
    let env = FakeEnvironment::new(&project, &[]);

    let report = Plugin::default().env_report(&env);

    assert_eq!(report, Some(vec![LISTING_DISABLED_MESSAGE.to_string()]));
}

#[test]
fn env_report_is_left_to_the_host_when_listing_enabled() {
    let project = TestProject::new();
    project.write("pyproject.toml", "[tool.tox.tox_pip_sync]\nskip_listing = false\n");
    let env = FakeEnvironment::new(&project, &[]);

    let plugin = Plugin::configure(project.root()).unwrap();

    assert_eq!(plugin.env_report(&env), None);
}
