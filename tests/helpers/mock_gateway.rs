// ==========================================
// Mock 网关实现 - 用于集成测试
// ==========================================
// 行为可配置: 批量导入成功/失败、指定序列号的创建失败、合并导出成功/失败
// 记录所有调用，便于断言调用顺序
// ==========================================

use async_trait::async_trait;
use inventaris_gudang::domain::{
    ChartDataPoint, DashboardStats, GoodsKind, IncomingGoods, ListQuery, OutgoingGoods,
    OwnershipDataPoint, Page, UploadFile,
};
use inventaris_gudang::gateway::{
    DashboardGateway, GatewayError, GatewayResult, InventoryGateway,
};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MockState {
    // 调用记录
    pub bulk_calls: Vec<(GoodsKind, String)>,
    pub created_incoming: Vec<IncomingGoods>,
    pub created_outgoing: Vec<OutgoingGoods>,
    pub list_queries: Vec<ListQuery>,
    pub export_calls: usize,
    pub create_attempts: usize,
    pub session_expired: bool,
}

pub struct MockGateway {
    // None = 批量导入接口失败
    pub bulk_result: Option<usize>,
    // 创建时返回错误的序列号
    pub failing_serials: HashSet<String>,
    // 创建到该序列号时返回 401（会话过期），此后所有创建均失败
    pub expire_at_serial: Option<String>,
    // None = 合并导出接口失败
    pub combined_export: Option<Vec<u8>>,
    pub incoming: Vec<IncomingGoods>,
    pub outgoing: Vec<OutgoingGoods>,
    pub state: Mutex<MockState>,
}

impl MockGateway {
    /// 批量导入失败、逐行创建全部成功
    pub fn bulk_failing() -> Self {
        Self {
            bulk_result: None,
            failing_serials: HashSet::new(),
            expire_at_serial: None,
            combined_export: None,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            state: Mutex::new(MockState::default()),
        }
    }

    pub fn bulk_succeeding(count: usize) -> Self {
        Self {
            bulk_result: Some(count),
            ..Self::bulk_failing()
        }
    }

    pub fn with_failing_serials(mut self, serials: &[&str]) -> Self {
        self.failing_serials = serials.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_session_expiring_at(mut self, serial: &str) -> Self {
        self.expire_at_serial = Some(serial.to_string());
        self
    }

    pub fn with_records(mut self, incoming: Vec<IncomingGoods>, outgoing: Vec<OutgoingGoods>) -> Self {
        self.incoming = incoming;
        self.outgoing = outgoing;
        self
    }

    pub fn with_combined_export(mut self, bytes: Vec<u8>) -> Self {
        self.combined_export = Some(bytes);
        self
    }

    pub fn created_incoming(&self) -> Vec<IncomingGoods> {
        self.state.lock().unwrap().created_incoming.clone()
    }

    pub fn created_outgoing(&self) -> Vec<OutgoingGoods> {
        self.state.lock().unwrap().created_outgoing.clone()
    }

    pub fn bulk_call_count(&self) -> usize {
        self.state.lock().unwrap().bulk_calls.len()
    }

    pub fn create_attempts(&self) -> usize {
        self.state.lock().unwrap().create_attempts
    }

    pub fn list_queries(&self) -> Vec<ListQuery> {
        self.state.lock().unwrap().list_queries.clone()
    }

    /// 记录一次创建调用，并按配置决定是否失败
    fn check_create(&self, serial: &str) -> GatewayResult<()> {
        let mut state = self.state.lock().unwrap();
        state.create_attempts += 1;

        if self.expire_at_serial.as_deref() == Some(serial) {
            state.session_expired = true;
        }
        if state.session_expired {
            return Err(GatewayError::AuthExpired);
        }
        if self.failing_serials.contains(serial) {
            return Err(GatewayError::Status {
                status: 409,
                message: format!("Serial number {} sudah terdaftar", serial),
            });
        }
        Ok(())
    }

    fn page<T: Clone>(data: &[T], query: &ListQuery) -> Page<T> {
        let data: Vec<T> = data.iter().take(query.limit as usize).cloned().collect();
        Page {
            total: data.len() as u64,
            data,
            page: query.page,
            limit: query.limit,
            total_pages: 1,
        }
    }
}

#[async_trait]
impl InventoryGateway for MockGateway {
    async fn bulk_import(&self, kind: GoodsKind, file: &UploadFile) -> GatewayResult<usize> {
        self.state
            .lock()
            .unwrap()
            .bulk_calls
            .push((kind, file.file_name.clone()));

        self.bulk_result
            .ok_or_else(|| GatewayError::Network("connection refused".to_string()))
    }

    async fn create_incoming(&self, record: &IncomingGoods) -> GatewayResult<IncomingGoods> {
        self.check_create(&record.serial_number)?;
        let mut state = self.state.lock().unwrap();
        let mut created = record.clone();
        created.id = Some(format!("in-{}", state.created_incoming.len() + 1));
        state.created_incoming.push(created.clone());
        Ok(created)
    }

    async fn create_outgoing(&self, record: &OutgoingGoods) -> GatewayResult<OutgoingGoods> {
        self.check_create(&record.serial_number)?;
        let mut state = self.state.lock().unwrap();
        let mut created = record.clone();
        created.id = Some(format!("out-{}", state.created_outgoing.len() + 1));
        state.created_outgoing.push(created.clone());
        Ok(created)
    }

    async fn list_incoming(&self, query: &ListQuery) -> GatewayResult<Page<IncomingGoods>> {
        self.state.lock().unwrap().list_queries.push(query.clone());
        Ok(Self::page(&self.incoming, query))
    }

    async fn list_outgoing(&self, query: &ListQuery) -> GatewayResult<Page<OutgoingGoods>> {
        self.state.lock().unwrap().list_queries.push(query.clone());
        Ok(Self::page(&self.outgoing, query))
    }

    async fn export_combined(&self) -> GatewayResult<Vec<u8>> {
        self.state.lock().unwrap().export_calls += 1;
        self.combined_export.clone().ok_or_else(|| GatewayError::Status {
            status: 500,
            message: "export service unavailable".to_string(),
        })
    }
}

#[async_trait]
impl DashboardGateway for MockGateway {
    async fn dashboard_stats(&self) -> GatewayResult<DashboardStats> {
        Ok(DashboardStats {
            total_incoming: self.incoming.len() as u64,
            total_outgoing: self.outgoing.len() as u64,
            ..Default::default()
        })
    }

    async fn chart_data(&self, months: u32) -> GatewayResult<Vec<ChartDataPoint>> {
        Ok((0..months)
            .map(|i| ChartDataPoint {
                name: format!("M{}", i + 1),
                masuk: 0,
                keluar: 0,
            })
            .collect())
    }

    async fn ownership_data(&self) -> GatewayResult<Vec<OwnershipDataPoint>> {
        Ok(Vec::new())
    }
}
