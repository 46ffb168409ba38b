// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};
use serde_json::json;

use super::StoreFolder;
use crate::store::{KeyValueStore, StoreError, WriteDurability};

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: std::path::PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!(
            "noema-{prefix}-{}-{nanos}-{counter}",
            std::process::id()
        ));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

struct FolderTestCtx {
    tmp: TempDir,
    folder: StoreFolder,
}

impl FolderTestCtx {
    fn new(prefix: &str) -> Self {
        let tmp = TempDir::new(prefix);
        let folder = StoreFolder::new(tmp.path().join("store"));
        Self { tmp, folder }
    }
}

#[fixture]
fn ctx() -> FolderTestCtx {
    FolderTestCtx::new("store-folder")
}

#[rstest]
fn set_writes_one_pretty_json_file_per_key(mut ctx: FolderTestCtx) {
    let tags = json!([{"id": "tag_1", "name": "Physics"}]);
    ctx.folder.set("knowledge_tags", &tags).unwrap();

    let text = std::fs::read_to_string(ctx.folder.root().join("knowledge_tags.json")).unwrap();
    assert_eq!(
        text,
        format!("{}\n", serde_json::to_string_pretty(&tags).unwrap())
    );
}

#[rstest]
fn get_returns_none_before_any_write(ctx: FolderTestCtx) {
    assert!(!ctx.folder.root().exists());
    assert_eq!(ctx.folder.get("knowledge_tags").unwrap(), None);
}

#[rstest]
fn overwrite_replaces_the_value_and_leaves_no_temp_files(mut ctx: FolderTestCtx) {
    ctx.folder
        .set("quick_save", &json!({"title": "First"}))
        .unwrap();
    ctx.folder
        .set("quick_save", &json!({"title": "Second"}))
        .unwrap();

    assert_eq!(
        ctx.folder.get("quick_save").unwrap(),
        Some(json!({"title": "Second"}))
    );

    let entries: Vec<String> = std::fs::read_dir(ctx.folder.root())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, ["quick_save.json"]);
}

#[rstest]
fn remove_deletes_the_file_and_tolerates_a_second_call(mut ctx: FolderTestCtx) {
    ctx.folder.set("knowledge_tags", &json!([])).unwrap();
    ctx.folder.remove("knowledge_tags").unwrap();

    assert_eq!(ctx.folder.get("knowledge_tags").unwrap(), None);
    assert!(!ctx.folder.root().join("knowledge_tags.json").exists());

    ctx.folder.remove("knowledge_tags").unwrap();
}

#[rstest]
fn corrupt_json_is_reported_with_the_path(ctx: FolderTestCtx) {
    std::fs::create_dir_all(ctx.folder.root()).unwrap();
    std::fs::write(ctx.folder.root().join("quick_save.json"), "not json").unwrap();

    let err = ctx.folder.get("quick_save").unwrap_err();
    match err {
        StoreError::Json { path, .. } => assert!(path.ends_with("quick_save.json")),
        other => panic!("expected Json, got: {other:?}"),
    }
}

#[rstest]
fn path_like_keys_are_refused(mut ctx: FolderTestCtx) {
    for key in ["../escape", ".hidden", "a/b"] {
        let err = ctx.folder.set(key, &json!(null)).unwrap_err();
        assert!(
            matches!(err, StoreError::InvalidKey { .. }),
            "key {key:?}: {err}"
        );
    }
    assert!(!ctx.folder.root().exists());
}

#[cfg(unix)]
#[rstest]
fn writes_refuse_a_symlinked_target(mut ctx: FolderTestCtx) {
    ctx.folder.set("knowledge_tags", &json!([])).unwrap();

    let outside = ctx.tmp.path().join("outside.json");
    std::fs::write(&outside, "{}").unwrap();
    let link = ctx.folder.root().join("quick_save.json");
    std::os::unix::fs::symlink(&outside, &link).unwrap();

    let err = ctx
        .folder
        .set("quick_save", &json!({"id": "quick_1"}))
        .unwrap_err();
    assert!(matches!(err, StoreError::SymlinkRefused { .. }), "{err}");
    assert_eq!(std::fs::read_to_string(&outside).unwrap(), "{}");
}

#[rstest]
fn durable_writes_round_trip_the_same_contents(ctx: FolderTestCtx) {
    let mut folder = StoreFolder::new(ctx.tmp.path().join("durable"))
        .with_durability(WriteDurability::Durable);
    assert_eq!(folder.durability(), WriteDurability::Durable);

    let value = json!({
        "id": "quick_1",
        "title": "Draft",
        "content": "Water expands when it freezes.",
        "timestamp": 1_700_000_000_000_u64
    });
    folder.set("quick_save", &value).unwrap();
    assert_eq!(folder.get("quick_save").unwrap(), Some(value));
}
