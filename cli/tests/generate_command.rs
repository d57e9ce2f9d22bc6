use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn generate_scaffolds_registrations_for_a_package_layout() {
    let tmp = tempdir().expect("tempdir");
    let sources_dir = tmp.path().join("Sources").join("MyApp");
    fs::create_dir_all(&sources_dir).expect("create Sources/MyApp");
    fs::write(
        sources_dir.join("NetworkModule.swift"),
        r#"
        import Swinject
        import Foundation

        class NetworkModule: SingletonModule {
            var apiClient: APIClient {
                APIClient()
            }
        }
        "#,
    )
    .expect("write source file");

    cargo_bin_cmd!("diwire")
        .args([
            "generate",
            "--is-package",
            "--target-name",
            "MyApp",
            "--project-path",
            tmp.path().to_str().expect("utf-8 path"),
        ])
        .assert()
        .success();

    let output_path = tmp.path().join("dependencies.generated.swift");
    assert!(output_path.exists());

    let generated = fs::read_to_string(&output_path).expect("read generated file");
    assert!(generated.contains("import Swinject"));
    assert!(generated.contains("import Foundation"));
    assert!(generated.contains("extension Container {"));
    assert!(generated.contains("let networkModule = NetworkModule()"));
    assert!(generated.contains("self.register(APIClient.self, name: \"APIClient\", objectScope: .singleton)"));
}

#[test]
fn generate_requires_target_name_when_env_fallback_is_absent() {
    let tmp = tempdir().expect("tempdir");

    cargo_bin_cmd!("diwire")
        .env_remove("TARGET_NAME")
        .env_remove("PROJECT_DIR")
        .args(["generate", "--project-path", tmp.path().to_str().expect("utf-8 path")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Argument: --target-name is required."));
}

#[test]
fn generate_fails_with_missing_dependency_message_on_stderr() {
    let tmp = tempdir().expect("tempdir");
    let sources_dir = tmp.path().join("Sources").join("MyApp");
    fs::create_dir_all(&sources_dir).expect("create Sources/MyApp");
    fs::write(
        sources_dir.join("ServiceModule.swift"),
        r#"
        class ServiceModule: TransientModule {
            func provideUserService(apiClient: APIClient) -> UserService {
                UserService(apiClient: apiClient)
            }
        }
        "#,
    )
    .expect("write source file");

    cargo_bin_cmd!("diwire")
        .args([
            "generate",
            "--is-package",
            "--target-name",
            "MyApp",
            "--project-path",
            tmp.path().to_str().expect("utf-8 path"),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing dependencies: _:APIClient"));

    assert!(!tmp.path().join("dependencies.generated.swift").exists());
}
