// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon specs: full job/result exchanges over a real TCP socket.

use std::time::Duration;

use fcc_core::{preprocess, CompileJob, CompileResult, Invocation, MachineId};
use fcc_wire::{read_result, write_job, write_message, ProtocolError};
use tokio::net::TcpStream;

use super::prelude::*;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Requester-side half of the exchange: preprocess, package, ship,
/// and collect the result.
async fn offload(project: &Project, inv: &Invocation, addr: std::net::SocketAddr) -> CompileResult {
    let (unit, exec) = preprocess(&project.compiler, inv, Some(&project.scratch))
        .await
        .unwrap();
    assert_eq!(exec.status, 0);

    let source = std::fs::read(unit.path()).unwrap();
    let job = CompileJob::new(inv, source, MachineId::from("aa:bb:cc:dd:ee:ff"));

    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut reader, mut writer) = stream.into_split();
    write_job(&mut writer, &job, TIMEOUT).await.unwrap();
    read_result(&mut reader, TIMEOUT).await.unwrap()
}

#[tokio::test]
async fn roundtrip_compiles_and_returns_the_object() {
    let project = Project::new();
    let src = project.file("main.c", HELLO_C);
    let out = project.path().join("main.o");

    let src_str = src.display().to_string();
    let out_str = out.display().to_string();
    let inv = Invocation::parse(["-c", src_str.as_str(), "-o", out_str.as_str()]).unwrap();

    let addr = project.spawn_daemon().await;
    let result = offload(&project, &inv, addr).await;

    assert_eq!(result.exec.status, 0);
    let object = result.object.unwrap();
    assert!(!object.is_empty());

    // The requester writes the returned bytes where the original
    // invocation expected its object.
    std::fs::write(&out, &object).unwrap();
    assert!(std::fs::metadata(&out).unwrap().len() > 0);

    // The expanded source travelled with the job, not via any shared
    // filesystem.
    let text = String::from_utf8_lossy(&object);
    assert!(text.contains("Hello, world!"), "object missing unit: {text}");
}

#[tokio::test]
async fn compile_errors_come_back_with_diagnostics_and_no_object() {
    let project = Project::new();
    let src = project.file("broken.c", "SYNTAX_ERROR\n");
    let src_str = src.display().to_string();
    let inv = Invocation::parse(["-c", src_str.as_str(), "-o", "broken.o"]).unwrap();

    let addr = project.spawn_daemon().await;
    let result = offload(&project, &inv, addr).await;

    assert_ne!(result.exec.status, 0);
    assert!(!result.exec.output.is_empty());
    assert!(result.exec.output_lossy().contains("error:"));
    assert!(result.object.is_none());
}

#[tokio::test]
async fn malformed_job_closes_the_connection_without_a_response() {
    let project = Project::new();
    let addr = project.spawn_daemon().await;

    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut reader, mut writer) = stream.into_split();
    write_message(&mut writer, b"definitely not a compile job")
        .await
        .unwrap();

    let err = read_result(&mut reader, TIMEOUT).await.unwrap_err();
    assert!(matches!(err, ProtocolError::ConnectionClosed));
}

#[tokio::test]
async fn concurrent_jobs_do_not_interfere() {
    let project = Project::new();
    let addr = project.spawn_daemon().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let body = format!("int value_{i}(void) {{ return {i}; }}\n");
        let src = project.file(&format!("unit_{i}.c"), &body);
        let src_str = src.display().to_string();
        let inv = Invocation::parse(["-c", src_str.as_str(), "-o", "ignored.o"]).unwrap();

        let compiler = project.compiler.clone();
        let scratch = project.scratch.clone();
        handles.push(tokio::spawn(async move {
            let (unit, _) = preprocess(&compiler, &inv, Some(&scratch)).await.unwrap();
            let source = std::fs::read(unit.path()).unwrap();
            let job = CompileJob::new(&inv, source, MachineId::from("aa:bb:cc:dd:ee:ff"));

            let stream = TcpStream::connect(addr).await.unwrap();
            let (mut reader, mut writer) = stream.into_split();
            write_job(&mut writer, &job, TIMEOUT).await.unwrap();
            let result = read_result(&mut reader, TIMEOUT).await.unwrap();

            (i, result)
        }));
    }

    for handle in handles {
        let (i, result) = handle.await.unwrap();
        assert_eq!(result.exec.status, 0);
        let text = String::from_utf8_lossy(&result.object.unwrap()).to_string();
        assert!(text.contains(&format!("value_{i}")), "job {i} got the wrong unit");
    }
}
