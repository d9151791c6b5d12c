use emberwiki_core::{
    CommunityMetadata, FsWikiRepository, StoreError, VersionOperation, WikiService,
    WikiServiceError,
};
use tempfile::TempDir;

fn service_for(root: &TempDir) -> WikiService<FsWikiRepository> {
    WikiService::new(FsWikiRepository::new(root.path()))
}

#[test]
fn create_list_rename_delete_roundtrip() {
    let root = TempDir::new().unwrap();
    let service = service_for(&root);

    service
        .create_community(&CommunityMetadata::new("alpha"))
        .unwrap();
    service
        .create_community(&CommunityMetadata::new("beta"))
        .unwrap();
    assert_eq!(
        service.list_communities().unwrap(),
        vec!["alpha".to_string(), "beta".to_string()]
    );

    service.rename_community("alpha", "gamma").unwrap();
    assert_eq!(
        service.list_communities().unwrap(),
        vec!["beta".to_string(), "gamma".to_string()]
    );
    // Metadata travels with the directory, untouched.
    assert_eq!(service.read_metadata("gamma").unwrap().name, "alpha");

    service.delete_community("beta").unwrap();
    assert_eq!(service.list_communities().unwrap(), vec!["gamma".to_string()]);
}

#[test]
fn community_layout_is_seeded_on_create() {
    let root = TempDir::new().unwrap();
    let service = service_for(&root);
    service
        .create_community(&CommunityMetadata::with_details(
            "seeded",
            Some("docs".to_string()),
            Some("test community".to_string()),
            None,
        ))
        .unwrap();

    let dir = root.path().join(".seeded");
    assert!(dir.join("_metadata.json").is_file());
    assert!(dir.join("_edit_macros.json").is_file());
    assert!(dir.join("_versions").is_dir());

    let raw = std::fs::read_to_string(dir.join("_metadata.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["Name"], "seeded");
    assert_eq!(doc["Genre"], "docs");
    assert_eq!(doc["Description"], "test community");
    assert_eq!(doc["AgeRestriction"], "");
}

#[test]
fn operations_on_a_missing_community_fail_semantically() {
    let root = TempDir::new().unwrap();
    let service = service_for(&root);

    let err = service.list_pages("ghost").unwrap_err();
    assert!(matches!(
        err,
        WikiServiceError::Store(StoreError::CommunityNotFound(_))
    ));
}

#[test]
fn bookkeeping_files_are_never_listed_as_pages() {
    let root = TempDir::new().unwrap();
    let service = service_for(&root);
    service
        .create_community(&CommunityMetadata::new("wiki"))
        .unwrap();
    service.edit_page("wiki", "visible", ["x", "---"]).unwrap();

    assert_eq!(
        service.list_pages("wiki").unwrap(),
        vec!["visible.md".to_string()]
    );
}

#[test]
fn rename_page_brackets_history_under_both_names() {
    let root = TempDir::new().unwrap();
    let service = service_for(&root);
    service
        .create_community(&CommunityMetadata::new("wiki"))
        .unwrap();
    service.edit_page("wiki", "old", ["body", "---"]).unwrap();

    let outcome = service.rename_page("wiki", "old", "new").unwrap();
    assert_eq!(outcome.old_page, "old.md");
    assert_eq!(outcome.new_page, "new.md");
    assert_eq!(outcome.rename_old.operation, VersionOperation::RenameOld);
    assert_eq!(outcome.rename_new.operation, VersionOperation::RenameNew);

    assert_eq!(service.read_page("wiki", "new").unwrap(), "body");
    assert!(service
        .list_versions("wiki", "old")
        .unwrap()
        .iter()
        .any(|r| r.operation == VersionOperation::RenameOld));
    assert!(service
        .list_versions("wiki", "new")
        .unwrap()
        .iter()
        .any(|r| r.operation == VersionOperation::RenameNew));
}

#[test]
fn page_info_reports_size_and_version_trail() {
    let root = TempDir::new().unwrap();
    let service = service_for(&root);
    service
        .create_community(&CommunityMetadata::new("wiki"))
        .unwrap();
    service.edit_page("wiki", "page", ["12345", "---"]).unwrap();

    let info = service.page_info("wiki", "page").unwrap();
    assert_eq!(info.name, "page.md");
    assert_eq!(info.size_bytes, 5);
    assert_eq!(info.version_count, 1);
    assert!(info.last_version.is_some());
}

#[test]
fn posix_export_writes_an_executable_script() {
    let root = TempDir::new().unwrap();
    let service = service_for(&root);
    service
        .create_community(&CommunityMetadata::new("wiki"))
        .unwrap();
    service.edit_page("wiki", "page", ["x", "---"]).unwrap();

    let path = service.export_posix("wiki").unwrap();
    assert_eq!(path, root.path().join("wiki.sh"));

    let script = std::fs::read_to_string(&path).unwrap();
    assert!(script.starts_with("#!/bin/sh\n"));
    assert!(script.contains("echo \"1. page.md\""));
    assert!(script.contains("cat .wiki/page.md"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111);
    }
}

#[test]
fn invalid_names_are_rejected_before_touching_storage() {
    let root = TempDir::new().unwrap();
    let service = service_for(&root);

    assert!(service
        .create_community(&CommunityMetadata::new(".hidden"))
        .is_err());

    service
        .create_community(&CommunityMetadata::new("wiki"))
        .unwrap();
    assert!(service.edit_page("wiki", "_meta", ["x", "---"]).is_err());
    assert!(service.read_page("wiki", "a/b").is_err());
}
