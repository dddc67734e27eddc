use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 匯出結果的寫入目的地
pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn search_base_url(&self) -> &str;
    fn search_category_id(&self) -> &str;
    fn concurrent_requests(&self) -> usize;
    fn request_timeout(&self) -> Duration;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// 查詢前先捲動到頁底，讓延遲載入的內容出現
    pub scroll_to_bottom: bool,
}

/// 對網頁執行結構化查詢，回傳符合查詢形狀的 JSON 物件
#[async_trait]
pub trait PageQuery: Send + Sync {
    async fn query_data(
        &self,
        url: &str,
        query: &str,
        options: QueryOptions,
    ) -> Result<serde_json::Value>;
}
