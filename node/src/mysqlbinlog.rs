// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! `mysqlbinlog` command line.

use crate::config::RollbackConfig;
use std::ffi::OsString;
use tokio::process::Command;

/// Arguments reading `files` from the server between the two positions,
/// with row events decoded to `### ` pseudo-SQL.
pub fn build_args(config: &RollbackConfig, files: &[String], start_position: u64, stop_position: u64) -> Vec<OsString> {
    let conn = &config.connection;
    let mut args: Vec<OsString> = vec!["--read-from-remote-server".into()];
    if config.verify_checksum {
        args.push("--verify-binlog-checksum".into());
    }
    let fixed: [OsString; 10] = [
        "--host".into(),
        conn.host.clone().into(),
        "--user".into(),
        conn.user.clone().into(),
        "--base64-output=DECODE-ROWS".into(),
        "-v".into(),
        "--start-position".into(),
        start_position.to_string().into(),
        "--stop-position".into(),
        stop_position.to_string().into(),
    ];
    args.extend(fixed);

    if let Some(port) = conn.port {
        args.push("--port".into());
        args.push(port.to_string().into());
    }
    // The tool does not accept `--password <pw>` as two tokens.
    if let Some(password) = &conn.password {
        args.push(format!("--password={password}").into());
    }

    let tls = [
        ("--ssl-ca", &conn.tls.ssl_ca),
        ("--ssl-cert", &conn.tls.ssl_cert),
        ("--ssl-key", &conn.tls.ssl_key),
    ];
    for (flag, path) in tls {
        if let Some(path) = path {
            args.push(flag.into());
            args.push(path.clone().into_os_string());
        }
    }

    args.extend(files.iter().map(OsString::from));
    args
}

/// Command for `build_args`, stdin closed.
pub fn command(config: &RollbackConfig, files: &[String], start_position: u64, stop_position: u64) -> Command {
    let mut cmd = Command::new(&config.mysqlbinlog_path);
    cmd.args(build_args(config, files, start_position, stop_position))
        .stdin(std::process::Stdio::null());
    cmd
}
