use emberwiki_core::{
    CommunityMetadata, CommunityRepository, FsWikiRepository, PageRepository, VersionOperation,
    VersionRepository, WikiService, WikiServiceError,
};
use tempfile::TempDir;

fn setup() -> (TempDir, WikiService<FsWikiRepository>) {
    let root = TempDir::new().unwrap();
    let repo = FsWikiRepository::new(root.path());
    repo.create_community(&CommunityMetadata::new("hist"))
        .unwrap();
    (root, WikiService::new(repo))
}

fn write_page(root: &TempDir, page: &str, content: &str) {
    let repo = FsWikiRepository::new(root.path());
    repo.write_page("hist", page, content).unwrap();
}

#[test]
fn history_grows_monotonically_across_operations() {
    let (root, service) = setup();
    write_page(&root, "notes.md", "v1");

    let mut last_len = 0;
    for content in ["v1", "v2", "v3"] {
        service
            .edit_page("hist", "notes", [content, "---"])
            .unwrap();
        let records = service.list_versions("hist", "notes").unwrap();
        assert!(records.len() > last_len);
        last_len = records.len();
    }

    service.restore_version("hist", "notes", 1).unwrap();
    assert!(service.list_versions("hist", "notes").unwrap().len() > last_len);
}

#[test]
fn list_is_oldest_first() {
    let (_root, service) = setup();
    service.edit_page("hist", "page", ["one", "---"]).unwrap();
    service.edit_page("hist", "page", ["two", "---"]).unwrap();

    let records = service.list_versions("hist", "page").unwrap();
    let operations: Vec<_> = records.iter().map(|r| r.operation).collect();
    assert_eq!(
        operations,
        vec![
            VersionOperation::EditPost,
            VersionOperation::EditPre,
            VersionOperation::EditPost,
        ]
    );
}

#[test]
fn restore_sets_content_and_appends_exactly_one_record() {
    let (_root, service) = setup();
    service.edit_page("hist", "page", ["first", "---"]).unwrap();
    service.edit_page("hist", "page", ["second", "---"]).unwrap();

    let before = service.list_versions("hist", "page").unwrap();
    // Newest-first selection: the oldest record sits at the last selector.
    let outcome = service
        .restore_version("hist", "page", before.len())
        .unwrap();

    assert_eq!(outcome.content, "first");
    assert_eq!(outcome.appended.operation, VersionOperation::Restored);
    assert_eq!(service.read_page("hist", "page").unwrap(), "first");

    let after = service.list_versions("hist", "page").unwrap();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(&after[..before.len()], &before[..]);
    assert_eq!(after.last().unwrap(), &outcome.appended);
}

#[test]
fn restore_selector_is_newest_first() {
    let (_root, service) = setup();
    service.edit_page("hist", "page", ["first", "---"]).unwrap();
    service.edit_page("hist", "page", ["second", "---"]).unwrap();

    // Selector 1 is the newest snapshot: the edit_post of "second".
    let outcome = service.restore_version("hist", "page", 1).unwrap();
    assert_eq!(outcome.content, "second");
    assert_eq!(
        outcome.restored_from.operation,
        VersionOperation::EditPost
    );
}

#[test]
fn out_of_range_selector_aborts_only_this_request() {
    let (_root, service) = setup();
    service.edit_page("hist", "page", ["only", "---"]).unwrap();

    let count = service.list_versions("hist", "page").unwrap().len();
    let err = service
        .restore_version("hist", "page", count + 1)
        .unwrap_err();
    assert!(matches!(
        err,
        WikiServiceError::InvalidSelection { available, .. } if available == count
    ));
    assert!(matches!(
        service.restore_version("hist", "page", 0).unwrap_err(),
        WikiServiceError::InvalidSelection { .. }
    ));

    // History untouched and the service still usable.
    assert_eq!(service.list_versions("hist", "page").unwrap().len(), count);
    service.restore_version("hist", "page", 1).unwrap();
}

#[test]
fn missing_artifact_is_reported_not_fatal() {
    let (root, service) = setup();
    service.edit_page("hist", "page", ["body", "---"]).unwrap();

    let records = service.list_versions("hist", "page").unwrap();
    let artifact = root
        .path()
        .join(".hist")
        .join("_versions")
        .join("page.md")
        .join(&records.last().unwrap().version_file);
    std::fs::remove_file(artifact).unwrap();

    let err = service.restore_version("hist", "page", 1).unwrap_err();
    assert!(matches!(
        err,
        WikiServiceError::Store(emberwiki_core::StoreError::ArtifactMissing { .. })
    ));
    // Content and history stay as they were.
    assert_eq!(service.read_page("hist", "page").unwrap(), "body");
    assert_eq!(
        service.list_versions("hist", "page").unwrap().len(),
        records.len()
    );
}

#[test]
fn version_log_document_keeps_wire_shape() {
    let (root, service) = setup();
    service.edit_page("hist", "page", ["body", "---"]).unwrap();

    let raw = std::fs::read_to_string(
        root.path().join(".hist").join("_versions").join("_version_log.json"),
    )
    .unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &doc["page.md"][0];
    assert!(entry["timestamp"].is_string());
    assert_eq!(entry["hash"].as_str().unwrap().len(), 8);
    assert_eq!(entry["operation"], "edit_post");
    assert!(entry["version_file"]
        .as_str()
        .unwrap()
        .ends_with("_edit_post.md"));
}

#[test]
fn artifact_content_matches_snapshot() {
    let (root, service) = setup();
    service
        .edit_page("hist", "page", ["# Title", "body", "---"])
        .unwrap();

    let repo = FsWikiRepository::new(root.path());
    let records = repo.list_versions("hist", "page.md").unwrap();
    let stored = repo
        .read_artifact("hist", "page.md", records.last().unwrap())
        .unwrap();
    assert_eq!(stored, "# Title\nbody");
}
