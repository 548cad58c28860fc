//! Command handlers run against an in-memory console.

use crate::cli::commands::{join_all, run_copy, run_demo, run_scan};
use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use termout_core::config::ConsoleConfig;
use termout_core::{Captured, Console, Output};

fn captured_console() -> (Console, Captured) {
    let (output, captured) = Output::capture();
    let console = Console::new(output, &ConsoleConfig::default());
    console.start();
    (console, captured)
}

#[tokio::test]
async fn copy_copies_every_file_and_reports() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let a = src.path().join("a.bin");
    let b = src.path().join("b.bin");
    fs::write(&a, vec![1u8; 4096]).unwrap();
    fs::write(&b, vec![2u8; 1000]).unwrap();
    let out_dir = dest.path().join("nested");

    let (console, captured) = captured_console();
    run_copy(&console, &out_dir, &[a.clone(), b.clone()])
        .await
        .unwrap();
    console.shutdown();

    assert_eq!(fs::read(out_dir.join("a.bin")).unwrap(), vec![1u8; 4096]);
    assert_eq!(fs::read(out_dir.join("b.bin")).unwrap(), vec![2u8; 1000]);
    let out = captured.contents();
    assert!(out.contains(&format!("{} -> ", a.display())));
    assert!(out.contains(&format!("{} -> ", b.display())));
    assert!(out.ends_with("copied 2 of 2 file(s), 4.98 KiB\n"));
}

#[tokio::test]
async fn copy_rejects_directories_before_copying() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    let (console, captured) = captured_console();
    let err = run_copy(&console, dest.path(), &[src.path().to_path_buf()])
        .await
        .unwrap_err();
    console.shutdown();
    assert!(format!("{:#}", err).contains("not a regular file"));
    assert_eq!(captured.contents(), "");
}

#[tokio::test]
async fn copy_rejects_parent_component() {
    let dest = tempfile::tempdir().unwrap();
    let (console, _captured) = captured_console();
    let err = run_copy(&console, dest.path(), &["some/dir/..".into()])
        .await
        .unwrap_err();
    console.shutdown();
    assert!(format!("{:#}", err).contains("not a file name"));
}

#[tokio::test]
async fn copy_rejects_same_name_from_two_dirs() {
    let src = tempfile::tempdir().unwrap();
    let dest = tempfile::tempdir().unwrap();
    fs::create_dir_all(src.path().join("a")).unwrap();
    fs::create_dir_all(src.path().join("b")).unwrap();
    let a = src.path().join("a/x.bin");
    let b = src.path().join("b/x.bin");
    fs::write(&a, vec![1u8; 64 * 1024]).unwrap();
    fs::write(&b, vec![2u8; 1000]).unwrap();

    let (console, captured) = captured_console();
    let err = run_copy(&console, dest.path(), &[a, b]).await.unwrap_err();
    console.shutdown();

    assert!(format!("{:#}", err).contains("duplicate destination"));
    assert!(!dest.path().join("x.bin").exists());
    assert_eq!(captured.contents(), "");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn join_all_waits_for_slow_tasks_after_a_failure() {
    let finished = Arc::new(AtomicBool::new(false));
    let slow_done = Arc::clone(&finished);
    let tasks = vec![
        tokio::task::spawn_blocking(|| -> anyhow::Result<u32> { anyhow::bail!("walk failed") }),
        tokio::task::spawn_blocking(move || -> anyhow::Result<u32> {
            std::thread::sleep(Duration::from_millis(50));
            slow_done.store(true, Ordering::SeqCst);
            Ok(1)
        }),
    ];
    let err = join_all(tasks).await.unwrap_err();
    assert!(format!("{:#}", err).contains("walk failed"));
    assert!(finished.load(Ordering::SeqCst));
}

#[tokio::test]
async fn join_all_collects_in_task_order() {
    let tasks: Vec<_> = (0..4u32)
        .map(|i| tokio::task::spawn_blocking(move || Ok::<_, anyhow::Error>(i * 10)))
        .collect();
    assert_eq!(join_all(tasks).await.unwrap(), vec![0, 10, 20, 30]);
}

#[tokio::test]
async fn scan_lists_every_entry() {
    let root = tempfile::tempdir().unwrap();
    fs::create_dir_all(root.path().join("sub/deeper")).unwrap();
    fs::write(root.path().join("top.txt"), b"x").unwrap();
    fs::write(root.path().join("sub/inner.txt"), b"y").unwrap();
    fs::write(root.path().join("sub/deeper/leaf.txt"), b"z").unwrap();

    let (console, captured) = captured_console();
    let counts = run_scan(&console, root.path()).await.unwrap();
    console.shutdown();

    assert_eq!(counts.files, 3);
    assert_eq!(counts.dirs, 2);
    let out = captured.contents();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    let leaf = root.path().join("sub/deeper/leaf.txt");
    assert!(lines.contains(&leaf.display().to_string().as_str()));
    assert!(lines[5].starts_with("3 file(s), 2 dir(s) under "));
}

#[tokio::test]
async fn scan_rejects_missing_directory() {
    let root = tempfile::tempdir().unwrap();
    let (console, _captured) = captured_console();
    let err = run_scan(&console, &root.path().join("missing"))
        .await
        .unwrap_err();
    console.shutdown();
    assert!(format!("{:#}", err).contains("not a directory"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn demo_prints_start_and_done() {
    let (console, captured) = captured_console();
    run_demo(&console, 4, 5).await.unwrap();
    console.shutdown();
    assert_eq!(captured.contents(), "start\nstatus 1\nstatus 2\ndone\n");
}
