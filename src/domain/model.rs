use crate::utils::error::{Result, ScrapeError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 商品列表上的基本資訊
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBase {
    pub name: String,
    pub link: String,
    pub img: String,
}

impl ProductBase {
    /// 從頁面查詢結果 (`product_name` / `product_link` / `product_img`) 建立
    pub fn from_page_data(data: &Value) -> Result<Self> {
        Ok(Self {
            name: required_text(data, "product_name")?,
            link: required_text(data, "product_link")?,
            img: required_text(data, "product_img")?,
        })
    }
}

/// 商品規格，所有欄位皆可能缺少
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpecs {
    #[serde(rename = "Battery")]
    pub battery: Option<String>,
    #[serde(rename = "Max_Puff")]
    pub max_puff: Option<String>,
    #[serde(rename = "Display")]
    pub display: Option<String>,
    #[serde(rename = "Nicotine")]
    pub nicotine: Option<String>,
    #[serde(rename = "E_liquid_Capacity")]
    pub e_liquid_capacity: Option<String>,
}

impl ProductSpecs {
    pub fn from_page_data(data: &Value) -> Self {
        Self {
            battery: optional_text(data, "Battery"),
            max_puff: optional_text(data, "Max_Puff"),
            display: optional_text(data, "Display"),
            nicotine: optional_text(data, "Nicotine"),
            e_liquid_capacity: optional_text(data, "E_liquid_Capacity"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub base: ProductBase,
    #[serde(flatten)]
    pub specs: ProductSpecs,
}

impl ProductDetails {
    pub fn new(base: ProductBase, specs: ProductSpecs) -> Self {
        Self { base, specs }
    }

    pub fn name(&self) -> &str {
        &self.base.name
    }
}

/// csv crate 不支援 `#[serde(flatten)]`，匯出時改用平面結構
#[derive(Debug, Serialize)]
pub struct ProductRow<'a> {
    pub name: &'a str,
    pub link: &'a str,
    pub img: &'a str,
    #[serde(rename = "Battery")]
    pub battery: Option<&'a str>,
    #[serde(rename = "Max_Puff")]
    pub max_puff: Option<&'a str>,
    #[serde(rename = "Display")]
    pub display: Option<&'a str>,
    #[serde(rename = "Nicotine")]
    pub nicotine: Option<&'a str>,
    #[serde(rename = "E_liquid_Capacity")]
    pub e_liquid_capacity: Option<&'a str>,
}

impl ProductRow<'_> {
    /// 與序列化欄位名稱一致的 CSV 標頭
    pub const HEADER: [&'static str; 8] = [
        "name",
        "link",
        "img",
        "Battery",
        "Max_Puff",
        "Display",
        "Nicotine",
        "E_liquid_Capacity",
    ];
}

impl<'a> From<&'a ProductDetails> for ProductRow<'a> {
    fn from(product: &'a ProductDetails) -> Self {
        Self {
            name: &product.base.name,
            link: &product.base.link,
            img: &product.base.img,
            battery: product.specs.battery.as_deref(),
            max_puff: product.specs.max_puff.as_deref(),
            display: product.specs.display.as_deref(),
            nicotine: product.specs.nicotine.as_deref(),
            e_liquid_capacity: product.specs.e_liquid_capacity.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub search_keyword: String,
    #[serde(default)]
    pub existing_product_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeParams {
    pub url: String,
}

/// 純量轉字串；null、物件、陣列視為缺少
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn optional_text(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(scalar_text)
}

fn required_text(data: &Value, key: &str) -> Result<String> {
    optional_text(data, key).ok_or_else(|| ScrapeError::ExtractionError {
        message: format!("field '{}' missing from page data", key),
    })
}
