// src/services/library_service_tests.rs
//
// Library Service tests
//
// Real SQLite repositories over an in-memory pool; both catalogs mocked.

#[cfg(test)]
mod library_tests {
    use std::sync::Arc;

    use crate::db::{create_memory_pool, initialize_database};
    use crate::domain::{IsbnLookup, NewSeries};
    use crate::error::AppError;
    use crate::integrations::catalog::{MockBookCatalog, MockMangaCatalog};
    use crate::integrations::{CatalogEntry, CatalogManga};
    use crate::repositories::{SqliteSeriesRepository, SqliteVolumeRepository};
    use crate::services::{LibraryService, VolumeCountResolver};

    fn manga(title: &str, volumes: Option<i32>) -> CatalogManga {
        CatalogManga {
            source_id: "1".to_string(),
            title: title.to_string(),
            author: None,
            description: Some(format!("About {}", title)),
            status: None,
            year: None,
            cover_url: None,
            volumes,
            tags: Vec::new(),
        }
    }

    fn book_catalog(titles: &'static [&'static str]) -> MockBookCatalog {
        let mut catalog = MockBookCatalog::new();
        catalog
            .expect_search()
            .returning(move |_| Ok(titles.iter().map(|t| CatalogEntry::titled(*t)).collect()));
        catalog
    }

    fn service_with(books: MockBookCatalog, mangas: MockMangaCatalog) -> LibraryService {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();

        LibraryService::new(
            Arc::new(SqliteSeriesRepository::new(pool.clone())),
            Arc::new(SqliteVolumeRepository::new(pool)),
            Arc::new(mangas),
            Arc::new(VolumeCountResolver::new(Arc::new(books))),
        )
    }

    fn service() -> LibraryService {
        service_with(book_catalog(&[]), MockMangaCatalog::new())
    }

    fn scanned(series_title: &str, volume_number: Option<u32>) -> IsbnLookup {
        IsbnLookup {
            series_title: series_title.to_string(),
            volume_number,
            full_title: format!("{}, Vol. {}", series_title, volume_number.unwrap_or(0)),
            cover_url: Some("https://books.google.com/c?zoom=2".to_string()),
            authors: vec!["Yukinobu Tatsu".to_string()],
            description: None,
        }
    }

    // ========================================================================
    // ADDING
    // ========================================================================

    #[test]
    fn test_add_series_validates() {
        let service = service();

        let err = service.add_series(NewSeries::titled("  ")).unwrap_err();
        assert!(matches!(err, AppError::Domain(_)));

        let series = service
            .add_series(NewSeries::titled("Dandadan").with_total_volumes(Some(12)))
            .unwrap();
        assert_eq!(series.author, "Unknown");
        assert_eq!(series.total_volumes, Some(12));
    }

    #[tokio::test]
    async fn test_add_from_catalog_uses_authoritative_count() {
        let mut books = MockBookCatalog::new();
        books.expect_search().never();
        let service = service_with(books, MockMangaCatalog::new());

        let series = service
            .add_from_catalog(&manga("20th Century Boys", Some(22)))
            .await
            .unwrap();

        assert_eq!(series.total_volumes, Some(22));
        assert_eq!(series.status, "Unknown");
    }

    #[tokio::test]
    async fn test_add_from_catalog_falls_back_to_titles() {
        let service = service_with(
            book_catalog(&["Dandadan, Vol. 4", "Dandadan, Vol. 12"]),
            MockMangaCatalog::new(),
        );

        let series = service.add_from_catalog(&manga("Dandadan", None)).await.unwrap();

        assert_eq!(series.total_volumes, Some(12));
    }

    #[tokio::test]
    async fn test_scan_creates_series_then_reuses_it() {
        let service = service_with(book_catalog(&["Dandadan, Vol. 12"]), MockMangaCatalog::new());

        let first = service.add_from_scan(&scanned("Dandadan", Some(7))).await.unwrap();
        assert!(first.created);
        assert_eq!(first.volume, Some(7));

        let second = service.add_from_scan(&scanned("DANDADAN", Some(8))).await.unwrap();
        assert!(!second.created);
        assert_eq!(second.series_id, first.series_id);

        let detail = service.series_detail(first.series_id).unwrap();
        assert_eq!(detail.series.total_volumes, Some(12));
        assert_eq!(detail.series.author, "Yukinobu Tatsu");
        assert_eq!(detail.owned_count, 2);
    }

    #[tokio::test]
    async fn test_scan_without_volume_number_adds_series_only() {
        let service = service();

        let outcome = service.add_from_scan(&scanned("Akira", None)).await.unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.volume, None);
        let detail = service.series_detail(outcome.series_id).unwrap();
        assert!(detail.volumes.is_empty());
        assert_eq!(detail.series.total_volumes, None);
    }

    #[tokio::test]
    async fn test_scan_with_blank_title_is_rejected() {
        let service = service();
        let err = service.add_from_scan(&scanned("", Some(1))).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    // ========================================================================
    // OWNERSHIP
    // ========================================================================

    #[test]
    fn test_toggle_volume() {
        let service = service();
        let series = service.add_series(NewSeries::titled("Nana")).unwrap();

        service.toggle_volume(series.id, 3, true).unwrap();
        service.toggle_volume(series.id, 3, false).unwrap();
        service.toggle_volume(series.id, 4, true).unwrap();

        let detail = service.series_detail(series.id).unwrap();
        assert_eq!(detail.volumes.len(), 2);
        assert_eq!(detail.owned_count, 1);

        assert!(service.toggle_volume(series.id, 0, true).is_err());
        assert!(matches!(
            service.toggle_volume(9999, 1, true),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_mark_all_uses_total_or_default_grid() {
        let service = service();
        let known = service
            .add_series(NewSeries::titled("Monster").with_total_volumes(Some(18)))
            .unwrap();
        let unknown = service.add_series(NewSeries::titled("One Piece")).unwrap();

        assert_eq!(service.mark_all(known.id, true).unwrap(), 18);
        assert_eq!(service.mark_all(unknown.id, true).unwrap(), 20);
        assert_eq!(service.series_detail(unknown.id).unwrap().owned_count, 20);

        service.mark_all(known.id, false).unwrap();
        assert_eq!(service.series_detail(known.id).unwrap().owned_count, 0);
    }

    // ========================================================================
    // EDITING
    // ========================================================================

    #[test]
    fn test_update_total_volumes() {
        let service = service();
        let series = service.add_series(NewSeries::titled("Vagabond")).unwrap();

        service.update_total_volumes(series.id, 37).unwrap();
        assert_eq!(
            service.series_detail(series.id).unwrap().series.total_volumes,
            Some(37)
        );

        assert!(matches!(
            service.update_total_volumes(series.id, 0),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.update_total_volumes(424242, 5),
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_refresh_info_writes_count_and_description() {
        let mut mangas = MockMangaCatalog::new();
        mangas
            .expect_search_manga()
            .withf(|query: &str, limit: &u32| query == "Berserk" && *limit == 1)
            .times(1)
            .returning(|_, _| Ok(vec![manga("Berserk", Some(41))]));
        let service = service_with(book_catalog(&[]), mangas);
        let series = service.add_series(NewSeries::titled("Berserk")).unwrap();

        let refreshed = service.refresh_info(series.id).await.unwrap();

        assert_eq!(refreshed.total_volumes, Some(41));
        assert_eq!(refreshed.description.as_deref(), Some("About Berserk"));
    }

    #[tokio::test]
    async fn test_refresh_info_without_hit_is_not_found() {
        let mut mangas = MockMangaCatalog::new();
        mangas.expect_name().return_const("jikan");
        mangas.expect_search_manga().returning(|_, _| Ok(Vec::new()));
        let service = service_with(book_catalog(&[]), mangas);
        let series = service.add_series(NewSeries::titled("Obscure Title")).unwrap();

        let err = service.refresh_info(series.id).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound));
    }

    #[test]
    fn test_delete_series_cascades() {
        let service = service();
        let series = service.add_series(NewSeries::titled("Akira")).unwrap();
        service.toggle_volume(series.id, 1, true).unwrap();

        service.delete_series(series.id).unwrap();

        assert!(matches!(service.series_detail(series.id), Err(AppError::NotFound)));
        assert_eq!(service.library_stats().unwrap().total_owned_volumes, 0);
        assert!(matches!(service.delete_series(series.id), Err(AppError::NotFound)));
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    #[test]
    fn test_list_series_newest_first() {
        let service = service();
        service.add_series(NewSeries::titled("First")).unwrap();
        service.add_series(NewSeries::titled("Second")).unwrap();

        let titles: Vec<String> = service
            .list_series()
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();

        assert_eq!(titles, vec!["Second".to_string(), "First".to_string()]);
    }

    #[test]
    fn test_library_stats() {
        let service = service();
        let done = service
            .add_series(NewSeries::titled("Blame!").with_total_volumes(Some(2)))
            .unwrap();
        let partial = service
            .add_series(NewSeries::titled("Monster").with_total_volumes(Some(18)))
            .unwrap();
        service.add_series(NewSeries::titled("One Piece")).unwrap();

        service.mark_all(done.id, true).unwrap();
        service.toggle_volume(partial.id, 1, true).unwrap();

        let stats = service.library_stats().unwrap();
        assert_eq!(stats.total_series, 3);
        assert_eq!(stats.total_owned_volumes, 3);
        assert_eq!(stats.total_volumes, 20);
        assert_eq!(stats.completed_series, 1);
        assert_eq!(stats.completion_percent(), 15);
    }

    #[tokio::test]
    async fn test_volume_covers_bounded_by_total() {
        let service = service_with(
            book_catalog(&["Monster, Vol. 1", "Monster, Vol. 2", "Monster, Vol. 3"]),
            MockMangaCatalog::new(),
        );
        let series = service
            .add_series(NewSeries::titled("Monster").with_total_volumes(Some(2)))
            .unwrap();

        let covers = service.volume_covers(series.id).await.unwrap();

        let numbers: Vec<u32> = covers.iter().map(|c| c.volume_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }
}
