// ==========================================
// 库存 API 集成测试
// ==========================================
// 测试目标: 单条新增（与批量导入相同的清洗与校验）、路径导入、单类导出
// ==========================================

mod helpers;

use helpers::mock_gateway::MockGateway;
use helpers::sheet_builder::xlsx_file;
use inventaris_gudang::api::{ApiError, InventoryApi};
use inventaris_gudang::domain::{GoodsKind, ImportSource, IncomingGoods, ListQuery, RawRow};
use inventaris_gudang::exporter::{ExportSource, ReportExporter};
use inventaris_gudang::gateway::{DashboardGateway, InventoryGateway};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn build_api(gateway: Arc<MockGateway>) -> (InventoryApi, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let inventory: Arc<dyn InventoryGateway> = gateway.clone();
    let dashboard: Arc<dyn DashboardGateway> = gateway;
    let exporter = ReportExporter::new(inventory.clone(), dir.path().to_path_buf(), 100);
    (InventoryApi::new(inventory, dashboard, exporter, 100), dir)
}

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_add_incoming_item_normalizes_fields() {
    let gateway = Arc::new(MockGateway::bulk_failing());
    let (api, _dir) = build_api(gateway.clone());

    let created = api
        .add_incoming_item(&row(&[
            ("Nama Barang", " trafo "),
            ("SN", "tr 01/a"),
            ("Kuantitas", "4 unit"),
            ("Status Aset", "Sewa"),
        ]))
        .await
        .unwrap();

    assert_eq!(created.id.as_deref(), Some("in-1"));
    assert_eq!(created.item_name, "TRAFO");
    assert_eq!(created.serial_number, "TR01A");
    assert_eq!(created.quantity, 4);
    assert_eq!(created.asset_status.as_str(), "Sewa");
}

#[tokio::test]
async fn test_add_item_rejects_missing_required_fields() {
    let gateway = Arc::new(MockGateway::bulk_failing());
    let (api, _dir) = build_api(gateway.clone());

    let err = api
        .add_outgoing_item(&row(&[("Nama Barang", "laptop"), ("SN", "  ")]))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::ValidationError(_)));
    assert!(gateway.created_outgoing().is_empty());
}

#[tokio::test]
async fn test_add_item_backend_error_surfaces() {
    let gateway = Arc::new(MockGateway::bulk_failing().with_failing_serials(&["SN-1"]));
    let (api, _dir) = build_api(gateway);

    let err = api
        .add_outgoing_item(&row(&[("item_name", "laptop"), ("serial_number", "sn-1")]))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::BackendError { status: 409, .. }));
}

#[tokio::test]
async fn test_import_from_path() {
    let gateway = Arc::new(MockGateway::bulk_failing());
    let (api, dir) = build_api(gateway.clone());

    let file = xlsx_file(
        "masuk.xlsx",
        &[&["item_name", "serial_number"], &["pompa", "SN-1"]],
    );
    let path = dir.path().join(&file.file_name);
    std::fs::write(&path, &file.bytes).unwrap();

    let outcome = api
        .import_goods_from_path(&path, GoodsKind::Incoming)
        .await
        .unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.count, 1);
    assert_eq!(outcome.source, ImportSource::Client);

    let missing = api
        .import_goods_from_path(Path::new("/tidak/ada/masuk.xlsx"), GoodsKind::Incoming)
        .await
        .unwrap_err();
    match missing {
        ApiError::ImportError(message) => assert!(message.contains("/tidak/ada/masuk.xlsx")),
        other => panic!("unexpected error: {:?}", other),
    }

    // 目录不可作为文件读取: 走 FileReadError
    let unreadable = api
        .import_goods_from_path(dir.path(), GoodsKind::Incoming)
        .await
        .unwrap_err();
    assert!(matches!(unreadable, ApiError::ImportError(_)));
}

#[tokio::test]
async fn test_export_goods_fetches_with_export_limit() {
    let records: Vec<IncomingGoods> = (1..=3)
        .map(|i| IncomingGoods {
            serial_number: format!("SN-{}", i),
            item_name: "POMPA".to_string(),
            ..Default::default()
        })
        .collect();
    let gateway = Arc::new(MockGateway::bulk_failing().with_records(records, Vec::new()));
    let (api, _dir) = build_api(gateway.clone());

    let artifact = api.export_goods(GoodsKind::Incoming).await.unwrap();

    assert_eq!(artifact.source, ExportSource::Client);
    assert!(artifact.file_name.starts_with("barang_masuk_"));
    assert_eq!(gateway.list_queries(), vec![ListQuery::all(100)]);
}

#[tokio::test]
async fn test_list_rejects_zero_page() {
    let (api, _dir) = build_api(Arc::new(MockGateway::bulk_failing()));
    let query = ListQuery {
        page: 0,
        ..Default::default()
    };
    assert!(matches!(
        api.list_incoming(&query).await,
        Err(ApiError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn test_dashboard_passthrough() {
    let (api, _dir) = build_api(Arc::new(MockGateway::bulk_failing()));
    assert_eq!(api.chart_data(3).await.unwrap().len(), 3);
    assert!(api.chart_data(0).await.is_err());
    assert_eq!(api.dashboard_stats().await.unwrap().total_incoming, 0);
}
