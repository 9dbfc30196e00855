/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers::{self, FakeLibrary};
    use gphotos::uploader::{AlbumUploader, FailureStage, scan_folder, upload_and_link};
    use gphotos::v1::GPhotosError;
    use std::path::Path;

    fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_str().unwrap().to_string()
    }

    #[test]
    fn scan_derives_hyphen_joined_titles() {
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(
            dir.path(),
            &["root.png", "a/b/c/deep.jpg", "a-b/flat.gif", "a/b/nested.jpeg"],
        );

        let scan = scan_folder(dir.path()).unwrap();
        assert!(scan.failures.is_empty());

        let mut found: Vec<(String, Option<String>)> = scan
            .jobs
            .iter()
            .map(|job| (file_name(&job.path), job.album_title.clone()))
            .collect();
        found.sort();
        assert_eq!(
            found,
            vec![
                ("deep.jpg".into(), Some("a-b-c".into())),
                ("flat.gif".into(), Some("a-b".into())),
                ("nested.jpeg".into(), Some("a-b".into())),
                ("root.png".into(), None),
            ]
        );
    }

    #[test]
    fn scan_keeps_images_and_skips_everything_else() {
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["c.png", "d.JPG", "e.txt", "sub/f.gif"]);

        let scan = scan_folder(dir.path()).unwrap();
        let mut found: Vec<String> = scan.jobs.iter().map(|job| file_name(&job.path)).collect();
        found.sort();
        // extension match is case-insensitive and the subdirectory is recursed
        assert_eq!(found, vec!["c.png", "d.JPG", "f.gif"]);
    }

    #[tokio::test]
    async fn uploads_folder_into_new_album() {
        let service = FakeLibrary::default();
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["2020/a.jpg", "2020/b.png"]);

        let report = AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        let state = service.state();
        assert_eq!(state.created, vec!["2020"]);
        assert_eq!(state.uploads.len(), 2);
        assert_eq!(state.links.len(), 2);
        for (album_id, _, _) in &state.links {
            assert_eq!(album_id.as_deref(), Some("album-1"));
        }
        assert_eq!(report.albums_created, 1);
        assert_eq!(report.uploaded, 2);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn existing_album_is_reused() {
        let service = FakeLibrary::default();
        service
            .state()
            .pages
            .insert(None, helpers::page(vec![helpers::album("existing-1", "2020")], None));
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["2020/a.jpg"]);

        let report = AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        let state = service.state();
        assert!(state.created.is_empty());
        assert_eq!(state.links[0].0.as_deref(), Some("existing-1"));
        assert_eq!(report.albums_created, 0);
    }

    #[tokio::test]
    async fn same_derived_title_creates_one_album() {
        let service = FakeLibrary::default();
        let dir = tempfile::tempdir().unwrap();
        // a nested a/b and a literal "a-b" directory derive the same title
        helpers::write_tree(dir.path(), &["a/b/x.jpg", "a-b/y.png"]);

        let report = AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        let state = service.state();
        assert_eq!(state.created, vec!["a-b"]);
        assert_eq!(state.links.len(), 2);
        assert_eq!(state.links[0].0, state.links[1].0);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn bootstrap_stops_on_repeated_page_token() {
        let service = FakeLibrary::default();
        {
            let mut state = service.state();
            state
                .pages
                .insert(None, helpers::page(vec![helpers::album("a1", "Alpha")], Some("t1")));
            // a misbehaving service that keeps handing out the same token
            state.pages.insert(
                Some("t1".into()),
                helpers::page(vec![helpers::album("a2", "Beta")], Some("t1")),
            );
        }
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["Alpha/x.png"]);

        let report = AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        let state = service.state();
        assert_eq!(state.list_calls, vec![None, Some("t1".into())]);
        assert!(state.created.is_empty());
        assert_eq!(state.links[0].0.as_deref(), Some("a1"));
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn bootstrap_follows_page_tokens_to_the_end() {
        let service = FakeLibrary::default();
        {
            let mut state = service.state();
            state
                .pages
                .insert(None, helpers::page(vec![helpers::album("a1", "Alpha")], Some("t1")));
            state.pages.insert(
                Some("t1".into()),
                helpers::page(vec![helpers::album("a2", "Beta")], None),
            );
        }
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["Beta/x.png"]);

        AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        let state = service.state();
        assert_eq!(state.list_calls, vec![None, Some("t1".into())]);
        // the album from the second page made it into the index
        assert!(state.created.is_empty());
        assert_eq!(state.links[0].0.as_deref(), Some("a2"));
    }

    #[tokio::test]
    async fn duplicate_titles_keep_the_last_album() {
        let service = FakeLibrary::default();
        service.state().pages.insert(
            None,
            helpers::page(
                vec![helpers::album("a1", "2020"), helpers::album("a2", "2020")],
                None,
            ),
        );
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["2020/a.jpg"]);

        AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        assert_eq!(service.state().links[0].0.as_deref(), Some("a2"));
    }

    #[tokio::test]
    async fn untitled_albums_are_not_indexed() {
        let service = FakeLibrary::default();
        service.state().pages.insert(
            None,
            helpers::page(
                vec![helpers::untitled_album("u1"), helpers::album("a9", "Kept")],
                None,
            ),
        );
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["Kept/x.png"]);

        let report = AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        let state = service.state();
        assert!(state.created.is_empty());
        assert_eq!(state.links[0].0.as_deref(), Some("a9"));
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn upload_failure_does_not_stop_the_run() {
        let service = FakeLibrary::default();
        service.state().fail_upload.insert("bad.jpg".into());
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["2020/bad.jpg", "2020/good.png"]);

        let report = AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        assert_eq!(report.uploaded, 1);
        assert_eq!(report.failures.len(), 1);
        let failure = &report.failures[0];
        assert_eq!(failure.stage, FailureStage::Upload);
        assert_eq!(file_name(&failure.path), "bad.jpg");
        assert_eq!(failure.album_title.as_deref(), Some("2020"));
        assert!(failure.orphaned_token.is_none());
    }

    #[tokio::test]
    async fn link_failure_reports_the_orphaned_token() {
        let service = FakeLibrary::default();
        service.state().fail_link.insert("a.jpg".into());
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["2020/a.jpg"]);

        let report = AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        assert_eq!(report.uploaded, 0);
        let failure = &report.failures[0];
        assert_eq!(failure.stage, FailureStage::Link);
        let token = failure.orphaned_token.as_ref().unwrap();
        assert_eq!(token.as_str(), "token-1-a.jpg");
    }

    #[tokio::test]
    async fn album_create_failure_only_skips_its_files() {
        let service = FakeLibrary::default();
        service.state().fail_create.insert("2020".into());
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["2020/a.jpg", "top.png"]);

        let report = AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        assert_eq!(report.uploaded, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].stage, FailureStage::Album);
        let state = service.state();
        assert_eq!(state.uploads, vec!["top.png"]);
    }

    #[tokio::test]
    async fn root_images_are_linked_without_an_album() {
        let service = FakeLibrary::default();
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["solo.jpg"]);

        let report = AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        let state = service.state();
        assert!(state.created.is_empty());
        assert_eq!(state.links[0].0, None);
        assert_eq!(report.uploaded, 1);
    }

    #[tokio::test]
    async fn folders_without_images_create_no_albums() {
        let service = FakeLibrary::default();
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("a/b")).unwrap();

        let report = AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap();

        assert!(service.state().created.is_empty());
        assert_eq!(report.uploaded, 0);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn listing_failure_aborts_the_run() {
        let service = FakeLibrary::default();
        service.state().fail_listing = true;
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["2020/a.jpg"]);

        let err = AlbumUploader::new(service.clone())
            .run(dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, GPhotosError::ApiResponse(..)));
        assert!(service.state().uploads.is_empty());
    }

    #[tokio::test]
    async fn unreadable_root_aborts_the_run() {
        let service = FakeLibrary::default();
        let dir = tempfile::tempdir().unwrap();

        let err = AlbumUploader::new(service.clone())
            .run(&dir.path().join("missing"))
            .await
            .unwrap_err();

        assert!(matches!(err, GPhotosError::Io(_)));
    }

    #[tokio::test]
    async fn upload_and_link_runs_upload_strictly_before_link() {
        let service = FakeLibrary::default();
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["a.jpg"]);

        upload_and_link(&service, Some("alb-1"), &dir.path().join("a.jpg"))
            .await
            .unwrap();

        let state = service.state();
        assert_eq!(state.calls, vec!["upload:a.jpg", "link:a.jpg"]);
        assert_eq!(
            state.links[0],
            (Some("alb-1".into()), "a.jpg".into(), "token-1-a.jpg".into())
        );
    }

    #[tokio::test]
    async fn upload_and_link_rejects_non_image_files() {
        let service = FakeLibrary::default();
        let dir = tempfile::tempdir().unwrap();
        helpers::write_tree(dir.path(), &["notes.txt"]);

        let err = upload_and_link(&service, None, &dir.path().join("notes.txt"))
            .await
            .unwrap_err();

        assert!(matches!(err, GPhotosError::UnsupportedImage(_)));
        assert!(service.state().calls.is_empty());
    }
}
