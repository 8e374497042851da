//! Process-level startup failures: the binary must exit non-zero.

use std::net::{Ipv6Addr, TcpListener};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}

fn run_server(cert: &Path, key: &Path, port: u16) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tls-server"))
        .arg("--cert")
        .arg(cert)
        .arg("--key")
        .arg(key)
        .arg("--port")
        .arg(port.to_string())
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn missing_cert_exits_non_zero() {
    let out = run_server(&fixture("missing.crt"), &fixture("server.key"), 0);
    assert!(!out.status.success(), "status: {:?}", out.status);

    let logs = String::from_utf8_lossy(&out.stdout);
    assert!(logs.contains("startup failed"), "logs: {logs}");
    assert!(logs.contains("missing.crt"), "logs: {logs}");
}

#[test]
fn missing_key_exits_non_zero() {
    let out = run_server(&fixture("server.crt"), &fixture("missing.key"), 0);
    assert!(!out.status.success(), "status: {:?}", out.status);
}

#[test]
fn occupied_port_exits_non_zero() {
    let occupied = TcpListener::bind((Ipv6Addr::UNSPECIFIED, 0)).unwrap();
    let port = occupied.local_addr().unwrap().port();

    let out = run_server(&fixture("server.crt"), &fixture("server.key"), port);
    assert!(!out.status.success(), "status: {:?}", out.status);

    let logs = String::from_utf8_lossy(&out.stdout);
    assert!(logs.contains("failed to bind"), "logs: {logs}");
}

#[test]
fn invalid_port_is_a_usage_error() {
    let out = Command::new(env!("CARGO_BIN_EXE_tls-server"))
        .args(["--port", "not-a-port"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}
