// ==========================================
// 仓库库存登记系统 - 客户端配置读取 Trait
// ==========================================
// 职责: 定义应用层所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::repository::error::RepositoryResult;
use std::path::PathBuf;
use std::time::Duration;

// ==========================================
// ClientConfigReader Trait
// ==========================================
// 用途: 网关/导出器构建时读取配置
// 实现者: ConfigManager（从 config_kv 表读取）
pub trait ClientConfigReader: Send + Sync {
    /// 后端 API 基础地址
    ///
    /// # 默认值
    /// - http://localhost:8000/api/v1（环境变量 INVENTARIS_API_URL 优先）
    fn get_api_base_url(&self) -> RepositoryResult<String>;

    /// 请求超时
    ///
    /// # 默认值
    /// - 30 秒
    fn get_request_timeout(&self) -> RepositoryResult<Duration>;

    /// 导出回退时列表接口的大页尺寸（近似“全部”）
    ///
    /// # 默认值
    /// - 10000
    fn get_export_page_limit(&self) -> RepositoryResult<u32>;

    /// 报表保存目录
    ///
    /// # 默认值
    /// - 系统下载目录，缺失时为当前目录
    fn get_export_dir(&self) -> RepositoryResult<PathBuf>;

    /// 界面语言（"id" 或 "en"）
    ///
    /// # 默认值
    /// - id
    fn get_locale(&self) -> RepositoryResult<String>;
}
