/// 列表頁只取前幾筆商品
pub const MAX_LISTED_PRODUCTS: usize = 5;

pub const PRODUCT_LIST_QUERY: &str = r#"
{
    products(the first 5)[] {
        product_name
        product_link
        product_img
    }
}
"#;

pub const PRODUCT_DETAIL_QUERY: &str = r#"
{
    Battery
    Max_Puff
    Display
    Nicotine
    E_liquid_Capacity
}
"#;

pub const PRODUCT_INFO_QUERY: &str = r#"
{
    product_name
    product_link
    product_img
}
"#;
