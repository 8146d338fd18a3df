// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline specs: the local preprocess/compile path end to end.

use fcc_core::{compile, preprocess, Invocation};

use super::prelude::*;

#[tokio::test]
async fn preprocess_then_compile_produces_an_object() {
    let project = Project::new();
    let src = project.file("main.c", HELLO_C);
    let src_str = src.display().to_string();
    let inv = Invocation::parse(["-c", src_str.as_str(), "-o", "main.o"]).unwrap();

    let (unit, exec) = preprocess(&project.compiler, &inv, Some(&project.scratch))
        .await
        .unwrap();
    assert_eq!(exec.status, 0);
    assert_eq!(unit.path().extension().unwrap(), "c");

    let (object, exec) = compile(&project.compiler, &inv, unit.path(), Some(&project.scratch))
        .await
        .unwrap();
    assert_eq!(exec.status, 0);
    assert_eq!(object.path().extension().unwrap(), "o");
    assert!(std::fs::metadata(object.path()).unwrap().len() > 0);
}

#[tokio::test]
async fn failed_preprocessing_keeps_the_job_local() {
    let project = Project::new();
    let src = project.file("broken.c", "PREP_ERROR\n");
    let src_str = src.display().to_string();
    let inv = Invocation::parse(["-c", src_str.as_str(), "-o", "broken.o"]).unwrap();

    let err = preprocess(&project.compiler, &inv, Some(&project.scratch))
        .await
        .unwrap_err();

    match err {
        fcc_core::Error::PreprocessFailed { exec } => {
            assert_ne!(exec.status, 0);
            assert!(!exec.output.is_empty());
        }
        other => panic!("expected PreprocessFailed, got {other:?}"),
    }
}
