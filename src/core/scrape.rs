use crate::core::queries::{
    MAX_LISTED_PRODUCTS, PRODUCT_DETAIL_QUERY, PRODUCT_INFO_QUERY, PRODUCT_LIST_QUERY,
};
use crate::domain::model::{ProductBase, ProductDetails, ProductSpecs};
use crate::domain::ports::{ConfigProvider, PageQuery, QueryOptions};
use crate::utils::error::Result;
use futures::stream::{self, StreamExt};
use reqwest::header::LOCATION;
use reqwest::{redirect, Client};
use std::sync::Arc;
use url::Url;

/// 商品爬取流程：列表 → 過濾已知商品 → 並發抓取詳細規格
pub struct ScrapeEngine {
    page_query: Arc<dyn PageQuery>,
    no_redirect_client: Client,
    search_base_url: String,
    search_category_id: String,
    concurrent_requests: usize,
}

impl ScrapeEngine {
    pub fn new<C: ConfigProvider>(page_query: Arc<dyn PageQuery>, config: &C) -> Result<Self> {
        // 檢查搜尋轉址時不能自動跟隨，才看得到 3xx
        let no_redirect_client = Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            page_query,
            no_redirect_client,
            search_base_url: config.search_base_url().to_string(),
            search_category_id: config.search_category_id().to_string(),
            concurrent_requests: config.concurrent_requests().max(1),
        })
    }

    /// 取得列表頁前 5 筆商品
    pub async fn get_product_names(&self, url: &str) -> Result<Vec<ProductBase>> {
        let options = QueryOptions {
            scroll_to_bottom: true,
        };

        let parsed: Result<Vec<ProductBase>> = async {
            let response = self
                .page_query
                .query_data(url, PRODUCT_LIST_QUERY, options)
                .await?;

            response
                .get("products")
                .and_then(|p| p.as_array())
                .map(|items| {
                    items
                        .iter()
                        .take(MAX_LISTED_PRODUCTS)
                        .map(ProductBase::from_page_data)
                        .collect::<Result<Vec<_>>>()
                })
                .unwrap_or_else(|| Ok(Vec::new()))
        }
        .await;

        match parsed {
            Ok(products) => {
                tracing::debug!("Listed {} products on {}", products.len(), url);
                Ok(products)
            }
            Err(e) => {
                tracing::error!("Error fetching products: {}", e);
                Err(e)
            }
        }
    }

    /// 抓取單一商品頁的規格；沒有傳入 `product` 時也從頁面讀取名稱等基本資訊。
    /// 任何失敗都只記錄並回傳 `None`。
    pub async fn fetch_product_details(
        &self,
        url: &str,
        product: Option<&ProductBase>,
    ) -> Option<ProductDetails> {
        match self.try_fetch_product_details(url, product).await {
            Ok(details) => Some(details),
            Err(e) => {
                let product_name = product.map(|p| p.name.as_str()).unwrap_or("Unknown");
                tracing::error!("Error fetching details for product {}: {}", product_name, e);
                None
            }
        }
    }

    async fn try_fetch_product_details(
        &self,
        url: &str,
        product: Option<&ProductBase>,
    ) -> Result<ProductDetails> {
        let options = QueryOptions {
            scroll_to_bottom: true,
        };

        let detail_response = self
            .page_query
            .query_data(url, PRODUCT_DETAIL_QUERY, options)
            .await?;

        let base = match product {
            Some(product) => product.clone(),
            None => {
                let info = self
                    .page_query
                    .query_data(url, PRODUCT_INFO_QUERY, options)
                    .await?;
                ProductBase::from_page_data(&info)?
            }
        };

        Ok(ProductDetails::new(
            base,
            ProductSpecs::from_page_data(&detail_response),
        ))
    }

    /// 列出商品、排除已知名稱，並發抓取其餘商品的詳細資料 (保持列表順序)
    pub async fn get_names_and_fetch(
        &self,
        url: &str,
        existing_product_names: &[String],
    ) -> Result<Vec<ProductDetails>> {
        let listed = self.get_product_names(url).await?;

        let new_products: Vec<ProductBase> = listed
            .into_iter()
            .filter(|p| !existing_product_names.contains(&p.name))
            .collect();

        tracing::info!(
            "🔍 {} new products to fetch from {} (concurrency {})",
            new_products.len(),
            url,
            self.concurrent_requests
        );

        // 每個 future 自己持有商品，才能在 axum handler 中保持 Send
        let fetched: Vec<Option<ProductDetails>> =
            stream::iter(new_products.into_iter().map(|product| async move {
                self.fetch_product_details(&product.link, Some(&product))
                    .await
            }))
            .buffered(self.concurrent_requests)
            .collect()
            .await;

        let products: Vec<ProductDetails> = fetched.into_iter().flatten().collect();
        tracing::info!("✅ Fetched details for {} products", products.len());
        Ok(products)
    }

    pub fn search_url(&self, search_keyword: &str) -> Result<Url> {
        let url = Url::parse_with_params(
            &self.search_base_url,
            &[
                ("route", "product/search"),
                ("search", search_keyword),
                ("category_id", self.search_category_id.as_str()),
            ],
        )?;
        Ok(url)
    }

    /// 搜尋關鍵字：若商店直接轉址到單一商品頁就只抓該商品，否則當作列表頁處理
    pub async fn search_and_scrape(
        &self,
        search_keyword: &str,
        existing_product_names: &[String],
    ) -> Result<Vec<ProductDetails>> {
        let search_url = self.search_url(search_keyword)?;
        tracing::info!("🔎 Searching for '{}': {}", search_keyword, search_url);

        match self.detect_redirect(&search_url).await? {
            Some(target) => {
                tracing::info!("↪️ Search redirected to product page {}", target);
                Ok(self
                    .fetch_product_details(target.as_str(), None)
                    .await
                    .into_iter()
                    .collect())
            }
            None => {
                self.get_names_and_fetch(search_url.as_str(), existing_product_names)
                    .await
            }
        }
    }

    /// 3xx 時回傳轉址目標；Location 為相對路徑時以搜尋網址為基準解析
    async fn detect_redirect(&self, search_url: &Url) -> Result<Option<Url>> {
        let response = self.no_redirect_client.get(search_url.clone()).send().await?;
        let status = response.status();
        tracing::debug!("Search redirect check status: {}", status);

        if !status.is_redirection() {
            return Ok(None);
        }

        let target = match response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
        {
            Some(location) => search_url.join(location)?,
            None => search_url.clone(),
        };

        Ok(Some(target))
    }
}
