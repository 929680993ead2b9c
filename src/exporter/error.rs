// ==========================================
// 仓库库存登记系统 - 导出模块错误类型
// ==========================================

use crate::gateway::error::GatewayError;
use rust_xlsxwriter::XlsxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("工作簿生成失败: {0}")]
    Xlsx(#[from] XlsxError),

    #[error("报表写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("报表数据获取失败: {0}")]
    Gateway(#[from] GatewayError),
}

pub type ExportResult<T> = Result<T, ExportError>;
