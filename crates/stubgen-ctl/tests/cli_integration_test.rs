//! Integration tests for the `stubgen` binary.
//!
//! Each test runs the compiled binary inside a temp directory holding a
//! `.stubgen.toml`, with `HOME` pointed at the same directory so no user-global
//! config or tag list leaks in.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn stubgen_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_stubgen"))
}

fn command(work_dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(stubgen_bin());
    cmd.args(args)
        .current_dir(work_dir)
        .env("HOME", work_dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn run_stubgen(work_dir: &Path, args: &[&str]) -> Output {
    command(work_dir, args)
        .output()
        .expect("Failed to execute stubgen")
}

fn run_with_stdin(work_dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = command(work_dir, args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn stubgen");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".stubgen.toml"),
        "tags-file = \"tags.json\"\n",
    )
    .unwrap();
    dir
}

const STORE_CONTROLLER: &str = r#"
public function store(Request $request)
{
    $request->validate([
        'name' => 'required|string',
        'price' => 'required|numeric',
    ]);
    $product = Product::create([
        'name' => $request->name,
        'price' => $request->price,
    ]);
    return response()->json(['data' => $product], 201);
}
"#;

#[test]
fn test_structure_from_file() {
    let dir = workspace();
    fs::write(
        dir.path().join("body.json"),
        r#"{"data": [{"id": 1, "name": "Chair"}], "status": "success"}"#,
    )
    .unwrap();

    let output = run_stubgen(dir.path(), &["structure", "--json", "body.json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "assertJsonStructure([\n    'data' => [\n        '*' => [\n            'id',\n            'name'\n        ]\n    ],\n    'status'\n])\n"
    );
}

#[test]
fn test_structure_from_stdin() {
    let dir = workspace();
    let output = run_with_stdin(
        dir.path(),
        &["structure", "--json", "-"],
        r#"{"message": "ok"}"#,
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "assertJsonStructure([\n    'message'\n])\n");
}

#[test]
fn test_structure_rejects_invalid_json() {
    let dir = workspace();
    fs::write(dir.path().join("bad.json"), "{oops").unwrap();

    let output = run_stubgen(dir.path(), &["structure", "--json", "bad.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid JSON in 'bad.json'"));
}

#[test]
fn test_swagger_uses_tag_route_prefix() {
    let dir = workspace();
    fs::write(dir.path().join("controller.php"), STORE_CONTROLLER).unwrap();

    let output = run_stubgen(
        dir.path(),
        &[
            "swagger",
            "--controller",
            "controller.php",
            "--operation",
            "store",
            "--module",
            "products",
            "--tag",
            "Portal",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.starts_with("/**\n * @OA\\Post(\n"));
    assert!(out.contains(r#" *     tags={"Products Portal"},"#));
    assert!(out.contains(r#" *     path="/api/v1/portal/products","#));
    assert!(out.contains(r#" *              required={ "name", "price" },"#));
    assert!(out.contains(r#"@OA\Property(property="price", type="number", description="Price", example=1.5),"#));
    assert!(out.ends_with(" */\n"));
}

#[test]
fn test_swagger_writes_output_file() {
    let dir = workspace();
    fs::write(dir.path().join("controller.php"), STORE_CONTROLLER).unwrap();

    let output = run_stubgen(
        dir.path(),
        &[
            "swagger",
            "--controller",
            "controller.php",
            "--operation",
            "show",
            "--route-prefix",
            "/api/v3",
            "--output",
            "annotation.txt",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Wrote annotation to annotation.txt"));

    let written = fs::read_to_string(dir.path().join("annotation.txt")).unwrap();
    assert!(written.contains(r#"path="/api/v3/example/{id}/show","#));
    assert!(written.contains(" *        response=404,"));
}

#[test]
fn test_swagger_rejects_unknown_operation() {
    let dir = workspace();
    fs::write(dir.path().join("controller.php"), STORE_CONTROLLER).unwrap();

    let output = run_stubgen(
        dir.path(),
        &["swagger", "--controller", "controller.php", "--operation", "patch"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unknown operation 'patch'"));
}

#[test]
fn test_swagger_rejects_empty_controller() {
    let dir = workspace();
    fs::write(dir.path().join("empty.php"), "   \n").unwrap();

    let output = run_stubgen(
        dir.path(),
        &["swagger", "--controller", "empty.php", "--operation", "store"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Controller input is required."));
}

#[test]
fn test_tags_roundtrip() {
    let dir = workspace();

    let output = run_stubgen(dir.path(), &["tags", "add", "Mobile"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Added tag 'Mobile' (/api/v1/mobile)"));
    assert!(dir.path().join("tags.json").is_file());

    let output = run_stubgen(dir.path(), &["tags", "add", "Mobile"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Tag 'Mobile' already exists."));

    let output = run_stubgen(dir.path(), &["tags", "remove", "Portal"]);
    assert!(stdout(&output).contains("Removed tag 'Portal'"));

    let output = run_stubgen(dir.path(), &["tags", "list"]);
    let out = stdout(&output);
    assert!(out.contains("• Backoffice"));
    assert!(out.contains("• Mobile"));
    assert!(!out.contains("Portal"));
}

#[test]
fn test_curl_extract_get() {
    let dir = workspace();
    fs::write(
        dir.path().join("request.sh"),
        "curl --location 'https://shop.test/api/v1/products?search=chair' \\\n  --header 'Accept: application/json'\n",
    )
    .unwrap();
    fs::write(dir.path().join("response.json"), r#"{"data": []}"#).unwrap();

    let output = run_stubgen(
        dir.path(),
        &[
            "curl",
            "extract",
            "--command",
            "request.sh",
            "--response-json",
            "response.json",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.starts_with(
        "Request:\n$search = 'chair';\n\n$response = $this->get('/api/v1/products?search='.$search);\n"
    ));
    assert!(out.contains("public function test_list_api_v1_products_authenticated()"));
    assert!(out.contains("public function test_list_invalid_id_api_v1_products_authenticated()"));
    assert!(out.contains("            'data' => ['*']"));
}

#[test]
fn test_curl_extract_post_override() {
    let dir = workspace();
    fs::write(
        dir.path().join("request.sh"),
        "curl https://shop.test/api/v1/products -F 'name=Silla'",
    )
    .unwrap();

    let output = run_stubgen(
        dir.path(),
        &["curl", "extract", "--command", "request.sh", "--method", "post"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("$data = [\n    'name' => 'Silla'\n];"));
    assert!(out.contains("$response = $this->post('/api/v1/products', $data);"));
    assert!(out.contains("public function test_store_api_v1_products_authenticated()"));
    assert!(out.contains("$response->assertJsonStructure([]);"));
}

#[test]
fn test_curl_extract_rejects_non_curl() {
    let dir = workspace();
    let output = run_with_stdin(
        dir.path(),
        &["curl", "extract", "--command", "-"],
        "wget https://shop.test",
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Please enter a valid curl command."));
}

#[test]
fn test_config_overrides_test_options() {
    let dir = workspace();
    fs::write(
        dir.path().join(".stubgen.toml"),
        "tags-file = \"tags.json\"\n\n[tests]\nauth-email = \"qa@shop.test\"\nunauthenticated-status = 401\n",
    )
    .unwrap();

    let output = run_with_stdin(
        dir.path(),
        &["curl", "extract", "--command", "-"],
        "curl https://shop.test/api/v1/orders",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("User::where('email', 'qa@shop.test')"));
    assert!(out.contains("->assertStatus(401)"));
    assert!(out.contains("        $response = $this->get('/api/v1/orders');"));
}

#[test]
fn test_templates_dir_override() {
    let dir = workspace();
    let templates = dir.path().join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(
        templates.join("phpunit_tests.php.tera"),
        "// {{ action }} {{ path | snake_case }}\n",
    )
    .unwrap();
    fs::write(
        dir.path().join(".stubgen.toml"),
        "tags-file = \"tags.json\"\ntemplates-dir = \"templates\"\n",
    )
    .unwrap();

    let output = run_with_stdin(
        dir.path(),
        &["curl", "extract", "--command", "-"],
        "curl https://shop.test/api/v1/orders",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Tests:\n// list api_v1_orders\n"));
}

/// Put a stand-in `curl` first on `PATH` that answers like `curl -s -w '\n%{http_code}'`.
/// Any URL containing `unreachable` fails the way curl does on a DNS error.
#[cfg(unix)]
fn fake_curl_path(dir: &Path) -> String {
    use std::os::unix::fs::PermissionsExt;

    let bin = dir.join("bin");
    fs::create_dir_all(&bin).unwrap();
    let script = bin.join("curl");
    fs::write(
        &script,
        "#!/bin/sh\n\
         case \"$*\" in\n\
         *unreachable*) echo 'curl: (6) Could not resolve host' >&2; exit 6 ;;\n\
         esac\n\
         printf '%s\\n%s' '{\"data\":[{\"id\":1,\"name\":\"Chair\"}]}' 200\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    format!(
        "{}:{}",
        bin.display(),
        std::env::var("PATH").unwrap_or_default()
    )
}

#[cfg(unix)]
#[test]
fn test_curl_run_pretty() {
    let dir = workspace();
    let path = fake_curl_path(dir.path());
    fs::write(
        dir.path().join("request.sh"),
        "curl 'https://shop.test/api/v1/products?search=chair' \\\n  -H 'Accept: application/json' \\\n",
    )
    .unwrap();

    let output = command(
        dir.path(),
        &["curl", "run", "--command", "request.sh", "--pretty"],
    )
    .env("PATH", &path)
    .output()
    .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.starts_with("  Status Code: 200\nResponse:\n"), "got:\n{out}");
    assert!(out.contains(
        "{\n    \"data\": [\n        {\n            \"id\": 1,\n            \"name\": \"Chair\"\n        }\n    ]\n}\n"
    ));
    assert!(out.contains(
        "assertJsonStructure([\n    'data' => [\n        '*' => [\n            'id',\n            'name'\n        ]\n    ]\n])\n"
    ));
    assert!(out.contains("public function test_list_api_v1_products_authenticated()"));
    assert!(out.contains("        $search = 'chair';"));
    assert!(out.contains("public function test_list_invalid_id_api_v1_products_authenticated()"));
}

#[cfg(unix)]
#[test]
fn test_curl_run_show_raw_for_post() {
    let dir = workspace();
    let path = fake_curl_path(dir.path());

    let output = command(
        dir.path(),
        &["curl", "run", "--command", "-", "--show-raw"],
    )
    .env("PATH", &path)
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .and_then(|mut child| {
        child
            .stdin
            .take()
            .unwrap()
            .write_all(b"curl https://shop.test/api/v1/products -F 'name=Silla'")?;
        child.wait_with_output()
    })
    .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Response:\n{\"data\":[{\"id\":1,\"name\":\"Chair\"}]}\n"));
    assert!(out.contains("public function test_store_api_v1_products_authenticated()"));
    assert!(out.contains("$data = [\n            'name' => 'Silla'\n        ];"));
    assert!(out.contains("        $response->assertStatus(201);"));
    assert!(!out.contains("invalid"));
}

#[cfg(unix)]
#[test]
fn test_curl_run_reports_curl_failure() {
    let dir = workspace();
    let path = fake_curl_path(dir.path());
    fs::write(
        dir.path().join("request.sh"),
        "curl https://unreachable.test/api/v1/products",
    )
    .unwrap();

    let output = command(dir.path(), &["curl", "run", "--command", "request.sh"])
        .env("PATH", &path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("curl command failed with error: curl: (6) Could not resolve host"));
}

#[test]
fn test_rust_log_reaches_sdk_debug_events() {
    let dir = workspace();
    fs::write(
        dir.path().join("request.sh"),
        "curl https://shop.test/api/v1/orders",
    )
    .unwrap();

    let output = command(dir.path(), &["curl", "extract", "--command", "request.sh"])
        .env("RUST_LOG", "stubgen_sdk=debug")
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("parsed curl command"));

    // Without RUST_LOG the default level hides it
    let output = run_stubgen(dir.path(), &["curl", "extract", "--command", "request.sh"]);
    assert!(!stderr(&output).contains("parsed curl command"));
}

#[test]
fn test_broken_config_falls_back_to_defaults() {
    let dir = workspace();
    fs::write(dir.path().join(".stubgen.toml"), "tags-file = [oops").unwrap();

    let output = run_stubgen(dir.path(), &["tags", "list"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("using default config"));
    assert!(stdout(&output).contains("• Backoffice"));
}
