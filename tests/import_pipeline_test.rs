// ==========================================
// 批量导入管道集成测试
// ==========================================
// 测试目标: 两阶段导入策略（后端批量导入 → 客户端逐行回退）
// ==========================================

mod helpers;

use helpers::mock_gateway::MockGateway;
use helpers::sheet_builder::{csv_file, xlsx_file};
use inventaris_gudang::domain::{
    AssetStatus, GoodsKind, ImportSource, RowFailureKind, UploadFile,
};
use inventaris_gudang::i18n::t;
use inventaris_gudang::importer::{GoodsImporter, GoodsImporterImpl};
use inventaris_gudang::logging;
use std::sync::Arc;

fn importer(gateway: &Arc<MockGateway>) -> GoodsImporterImpl<MockGateway> {
    GoodsImporterImpl::new(gateway.clone())
}

const INCOMING_HEADER: &[&str] = &["Nama Barang", "Kuantitas", "Serial Number", "Status Aset"];

#[tokio::test]
async fn test_client_fallback_imports_all_valid_rows() {
    logging::init_test();

    let gateway = Arc::new(MockGateway::bulk_failing());
    let file = xlsx_file(
        "barang_masuk.xlsx",
        &[
            INCOMING_HEADER,
            &["pompa", "5", "sn 001", "Asset"],
            &["kabel", "12", "SN-002", "sewa"],
            &["saklar", "abc", "sn-003", ""],
        ],
    );

    let outcome = importer(&gateway).import(&file, GoodsKind::Incoming).await;

    assert!(outcome.success);
    assert_eq!(outcome.count, 3);
    assert_eq!(outcome.source, ImportSource::Client);
    assert!(outcome.error.is_none());
    assert!(outcome.failures.is_empty());
    assert_eq!(gateway.bulk_call_count(), 1);

    // 严格按行顺序逐行创建
    let created = gateway.created_incoming();
    let serials: Vec<&str> = created.iter().map(|r| r.serial_number.as_str()).collect();
    assert_eq!(serials, vec!["SN001", "SN-002", "SN-003"]);
    assert_eq!(created[0].item_name, "POMPA");
    assert_eq!(created[0].quantity, 5);
    assert_eq!(created[1].asset_status, AssetStatus::Sewa);
    assert_eq!(created[2].quantity, 0);
}

#[tokio::test]
async fn test_server_import_short_circuits() {
    logging::init_test();

    let gateway = Arc::new(MockGateway::bulk_succeeding(42));
    let file = xlsx_file(
        "barang_masuk.xlsx",
        &[INCOMING_HEADER, &["pompa", "5", "SN-1", ""]],
    );

    let outcome = importer(&gateway).import(&file, GoodsKind::Incoming).await;

    assert!(outcome.success);
    assert_eq!(outcome.count, 42);
    assert_eq!(outcome.source, ImportSource::Server);
    assert!(gateway.created_incoming().is_empty());
}

#[tokio::test]
async fn test_server_import_sends_any_bytes() {
    // 后端成功时客户端不解析文件
    let gateway = Arc::new(MockGateway::bulk_succeeding(3));
    let file = UploadFile::new("data.xlsx", b"bukan excel".to_vec());

    let outcome = importer(&gateway).import(&file, GoodsKind::Outgoing).await;

    assert!(outcome.success);
    assert_eq!(outcome.count, 3);
}

#[tokio::test]
async fn test_no_valid_rows_reports_failure() {
    logging::init_test();

    let gateway = Arc::new(MockGateway::bulk_failing());
    let file = xlsx_file(
        "barang_masuk.xlsx",
        &[
            INCOMING_HEADER,
            &["pompa", "5", "", ""],
            &["   ", "1", "SN-2", ""],
        ],
    );

    let outcome = importer(&gateway).import(&file, GoodsKind::Incoming).await;

    assert!(!outcome.success);
    assert_eq!(outcome.count, 0);
    assert_eq!(outcome.error, Some(t("import.no_valid_data")));
    assert!(gateway.created_incoming().is_empty());

    assert_eq!(outcome.failures.len(), 2);
    assert!(outcome
        .failures
        .iter()
        .all(|f| f.kind == RowFailureKind::MissingRequiredField));
}

#[tokio::test]
async fn test_header_only_sheet_has_no_valid_data() {
    let gateway = Arc::new(MockGateway::bulk_failing());
    let file = xlsx_file("kosong.xlsx", &[INCOMING_HEADER]);

    let outcome = importer(&gateway).import(&file, GoodsKind::Incoming).await;

    assert!(!outcome.success);
    assert_eq!(outcome.count, 0);
    assert!(outcome.failures.is_empty());
}

#[tokio::test]
async fn test_persistence_failure_does_not_abort_loop() {
    logging::init_test();

    let gateway = Arc::new(MockGateway::bulk_failing().with_failing_serials(&["SN-2"]));
    let file = xlsx_file(
        "barang_keluar.xlsx",
        &[
            &["Nama Barang", "Serial Number", "Nama Karyawan", "Status"],
            &["laptop", "SN-1", "budi", "pinjam"],
            &["monitor", "SN-2", "sari", ""],
            &["", "SN-3", "andi", ""],
            &["printer", "SN-4", "dewi", "rusak"],
        ],
    );

    let outcome = importer(&gateway).import(&file, GoodsKind::Outgoing).await;

    assert!(outcome.success);
    assert_eq!(outcome.count, 2);
    assert_eq!(outcome.source, ImportSource::Client);

    // 跳过与落库失败分别记录，按表格行号排序（表头为第 1 行）
    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.failures[0].row_number, 3);
    assert_eq!(outcome.failures[0].kind, RowFailureKind::PersistenceFailed);
    assert!(outcome.failures[0].reason.contains("SN-2"));
    assert_eq!(outcome.failures[1].row_number, 4);
    assert_eq!(outcome.failures[1].kind, RowFailureKind::MissingRequiredField);

    let created = gateway.created_outgoing();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0].status, "PINJAM");
    assert_eq!(created[0].quantity, 1);
    assert_eq!(created[1].serial_number, "SN-4");
}

#[tokio::test]
async fn test_failure_row_numbers_match_sheet_rows() {
    let gateway = Arc::new(MockGateway::bulk_failing());
    let file = xlsx_file(
        "barang_masuk.xlsx",
        &[
            INCOMING_HEADER,
            &["pompa", "5", "SN-1", ""],
            &["  ", "", "", ""],
            &["", "2", "SN-3", ""],
            &["kabel", "1", "SN-4", ""],
        ],
    );

    let outcome = importer(&gateway).import(&file, GoodsKind::Incoming).await;

    assert!(outcome.success);
    assert_eq!(outcome.count, 2);
    // 空白的第 3 行被跳过，缺少名称的行仍报告为第 4 行
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].row_number, 4);
    assert_eq!(outcome.failures[0].serial_number, "SN-3");
}

#[tokio::test]
async fn test_session_expiry_stops_row_creation() {
    logging::init_test();

    let gateway = Arc::new(MockGateway::bulk_failing().with_session_expiring_at("SN-2"));
    let file = xlsx_file(
        "barang_masuk.xlsx",
        &[
            INCOMING_HEADER,
            &["pompa", "1", "SN-1", ""],
            &["kabel", "1", "SN-2", ""],
            &["saklar", "1", "SN-3", ""],
            &["lampu", "1", "SN-4", ""],
        ],
    );

    let outcome = importer(&gateway).import(&file, GoodsKind::Incoming).await;

    assert!(outcome.success);
    assert_eq!(outcome.count, 1);
    // SN-2 触发 401 后不再发送请求
    assert_eq!(gateway.create_attempts(), 2);

    let rows: Vec<usize> = outcome.failures.iter().map(|f| f.row_number).collect();
    assert_eq!(rows, vec![3, 4, 5]);
    assert!(outcome
        .failures
        .iter()
        .all(|f| f.kind == RowFailureKind::PersistenceFailed));
    assert_eq!(outcome.failures[2].reason, t("auth.expired"));
}

#[tokio::test]
async fn test_undecodable_file_fails_without_creates() {
    logging::init_test();

    let gateway = Arc::new(MockGateway::bulk_failing());
    let file = UploadFile::new("rusak.xlsx", b"ini bukan file excel".to_vec());

    let outcome = importer(&gateway).import(&file, GoodsKind::Incoming).await;

    assert!(!outcome.success);
    assert_eq!(outcome.count, 0);
    assert_eq!(outcome.source, ImportSource::None);
    assert!(outcome.error.is_some());
    assert!(gateway.created_incoming().is_empty());
}

#[tokio::test]
async fn test_csv_fallback() {
    let gateway = Arc::new(MockGateway::bulk_failing());
    let file = csv_file(
        "barang_masuk.csv",
        &[
            &["item_name", "serial_number", "quantity", "unit"],
            &["kabel", "sn 9", "-4", "meter"],
        ],
    );

    let outcome = importer(&gateway).import(&file, GoodsKind::Incoming).await;

    assert!(outcome.success);
    assert_eq!(outcome.count, 1);

    let created = gateway.created_incoming();
    assert_eq!(created[0].serial_number, "SN9");
    assert_eq!(created[0].quantity, 0);
    assert_eq!(created[0].unit, "METER");
}
