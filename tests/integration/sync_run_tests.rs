//! End-to-end synchronization runs
//!
//! A CSV fixture goes through `BatchOrchestrator::from_config` and the real
//! HTTP client into the mock catalog.

#[cfg(test)]
mod tests {
    use crate::common::{CsvFixture, MockCatalog};
    use crate::{assert_err, assert_ok};
    use catalog_price_sync::config::{PriceUnits, PricingMode};
    use catalog_price_sync::core::batch::{BatchOrchestrator, BatchPhase, write_report_json};
    use catalog_price_sync::utils::error::SyncError;
    use serde_json::json;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_direct_mode_run() {
        let catalog = MockCatalog::start().await;
        catalog.accept_all_prices().await;
        catalog
            .reject_price("2002", 400, json!({"message": "SKU is inactive"}))
            .await;
        let csv = CsvFixture::prices(&[
            ("1001", "$1,234.50"),
            ("2002", "20.00"),
            ("3003", "abc"),
            ("4004", "7"),
        ]);

        let mut orchestrator = assert_ok!(BatchOrchestrator::from_config(catalog.sync_config(csv.path())));
        let report = assert_ok!(orchestrator.run().await);

        assert_eq!(orchestrator.phase(), BatchPhase::Done);
        assert_eq!(report.success_count, 2);
        assert_eq!(report.failure_count, 1);
        assert_eq!(report.skipped_rows, 1);
        assert_eq!(report.failures[0].item_id, "2002");
        assert_eq!(report.failures[0].http_status, Some(400));
        assert_eq!(
            report.failures[0].error_detail,
            Some(json!({"message": "SKU is inactive"}))
        );

        let mut prices: Vec<(String, u64)> = catalog
            .price_bodies()
            .await
            .into_iter()
            .map(|b| {
                (
                    b["itemId"].as_str().unwrap_or_default().to_string(),
                    b["basePrice"].as_u64().unwrap_or_default(),
                )
            })
            .collect();
        prices.sort();
        assert_eq!(
            prices,
            vec![
                ("1001".to_string(), 123450),
                ("2002".to_string(), 2000),
                ("4004".to_string(), 700),
            ]
        );
    }

    #[tokio::test]
    async fn test_reference_lookup_run() {
        let catalog = MockCatalog::start().await;
        catalog.accept_all_prices().await;
        catalog.sku_for_reference("REF-A", 501).await;
        catalog.sku_for_reference("REF-C", 503).await;
        catalog.unknown_references_empty().await;
        let csv = CsvFixture::with_header(
            "RefId,Base Price",
            &[("REF-A", "10.005"), ("REF-B", "3.00"), ("REF-C", "0.99")],
        );

        let mut config = catalog.sync_config(csv.path());
        config.mode = PricingMode::ReferenceLookup;
        config.mirror_cost_price = true;
        let mut orchestrator = assert_ok!(BatchOrchestrator::from_config(config));
        let report = assert_ok!(orchestrator.run().await);

        assert_eq!(report.success_count, 2);
        assert_eq!(report.failure_count, 0);
        assert_eq!(report.unresolved.len(), 1);
        assert_eq!(report.unresolved[0].reference_code, "REF-B");

        let mut bodies = catalog.price_bodies().await;
        bodies.sort_by_key(|b| b["itemId"].as_str().unwrap_or_default().to_string());
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0]["itemId"], "501");
        assert_eq!(bodies[0]["basePrice"], 1001);
        assert_eq!(bodies[0]["costPrice"], 1001);
        assert_eq!(bodies[1]["itemId"], "503");
        assert_eq!(bodies[1]["basePrice"], 99);
    }

    #[tokio::test]
    async fn test_failed_lookup_is_not_reported_as_missing() {
        let catalog = MockCatalog::start().await;
        catalog.accept_all_prices().await;
        catalog.sku_for_reference("REF-A", 501).await;
        catalog.failing_lookups(500, json!({"error": "boom"})).await;
        let csv = CsvFixture::with_header("RefId,Base Price", &[("REF-A", "1.00"), ("REF-B", "2.00")]);

        let mut config = catalog.sync_config(csv.path());
        config.mode = PricingMode::ReferenceLookup;
        let report = assert_ok!(assert_ok!(BatchOrchestrator::from_config(config)).run().await);

        assert_eq!(report.success_count, 1);
        assert_eq!(report.failure_count, 0);
        assert_eq!(report.unresolved.len(), 1);
        let unresolved = &report.unresolved[0];
        assert_eq!(unresolved.reference_code, "REF-B");
        assert_ne!(unresolved.reason, "no catalog item matches the reference code");
        assert!(unresolved.reason.starts_with("lookup failed"));
        assert!(unresolved.reason.contains("500"));
        assert_eq!(catalog.price_bodies().await.len(), 1);
    }

    #[tokio::test]
    async fn test_legacy_units_run() {
        let catalog = MockCatalog::start().await;
        catalog.accept_all_prices().await;
        let csv = CsvFixture::prices(&[("1", "$12.99")]);

        let mut config = catalog.sync_config(csv.path());
        config.units = PriceUnits::MajorUnitInteger;
        let report = assert_ok!(assert_ok!(BatchOrchestrator::from_config(config)).run().await);

        assert_eq!(report.success_count, 1);
        assert_eq!(catalog.price_bodies().await[0]["basePrice"], 1299);
    }

    #[tokio::test]
    async fn test_no_valid_rows_makes_no_requests() {
        let catalog = MockCatalog::start().await;
        catalog.accept_all_prices().await;
        let csv = CsvFixture::prices(&[("1", "n/a"), ("", "5.00")]);

        let mut orchestrator = assert_ok!(BatchOrchestrator::from_config(catalog.sync_config(csv.path())));
        let report = assert_ok!(orchestrator.run().await);

        assert_eq!(report.success_count, 0);
        assert_eq!(report.failure_count, 0);
        assert!(report.failures.is_empty());
        assert_eq!(report.skipped_rows, 2);
        assert!(catalog.received().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_csv_is_fatal() {
        let catalog = MockCatalog::start().await;
        let config = catalog.sync_config(&PathBuf::from("/definitely/not/here.csv"));

        let mut orchestrator = assert_ok!(BatchOrchestrator::from_config(config));
        let err = assert_err!(orchestrator.run().await);

        assert!(matches!(err, SyncError::Source(_)));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(orchestrator.phase(), BatchPhase::Failed);
        assert!(catalog.received().await.is_empty());
    }

    #[tokio::test]
    async fn test_csv_without_price_column_is_fatal() {
        let catalog = MockCatalog::start().await;
        let csv = CsvFixture::raw("Parte,Descripcion\n1,Widget\n");

        let mut orchestrator = assert_ok!(BatchOrchestrator::from_config(catalog.sync_config(csv.path())));
        let err = assert_err!(orchestrator.run().await);

        assert!(err.to_string().contains("No base price column"));
        assert!(catalog.received().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_credentials_rejected_up_front() {
        let catalog = MockCatalog::start().await;
        let csv = CsvFixture::prices(&[("1", "1.00")]);
        let mut config = catalog.sync_config(csv.path());
        config.app_token.clear();

        let err = assert_err!(BatchOrchestrator::from_config(config).map(|_| ()));
        assert!(err.is_config());
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("app token"));
    }

    #[tokio::test]
    async fn test_report_json_written() {
        let catalog = MockCatalog::start().await;
        catalog.accept_all_prices().await;
        let csv = CsvFixture::prices(&[("1", "1.00"), ("2", "2.00")]);
        let dir = tempfile::tempdir().unwrap();
        let report_path = dir.path().join("report.json");

        let mut orchestrator = assert_ok!(BatchOrchestrator::from_config(catalog.sync_config(csv.path())));
        let report = assert_ok!(orchestrator.run().await);
        assert_ok!(write_report_json(&report, &report_path));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
        assert_eq!(written["successCount"], 2);
        assert_eq!(written["failureCount"], 0);
        assert_eq!(written["runId"], report.run_id.to_string());
    }
}
