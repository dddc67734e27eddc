use crate::domain::model::{ProductDetails, ProductRow};
use crate::utils::error::{Result, ScrapeError};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// 依副檔名判斷輸出格式
    pub fn from_path(path: &str) -> Result<Self> {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(ExportFormat::Json),
            Some("csv") => Ok(ExportFormat::Csv),
            _ => Err(ScrapeError::InvalidConfigValueError {
                field: "output".to_string(),
                value: path.to_string(),
                reason: "Unsupported file extension. Allowed extensions: json, csv".to_string(),
            }),
        }
    }
}

pub fn render_products(format: ExportFormat, products: &[ProductDetails]) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(products)?),
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            // 沒有資料列時 csv 不會自動寫出標頭
            if products.is_empty() {
                writer.write_record(ProductRow::HEADER)?;
            }
            for product in products {
                writer.serialize(ProductRow::from(product))?;
            }
            writer.into_inner().map_err(|e| ScrapeError::IoError(e.into_error()))
        }
    }
}
