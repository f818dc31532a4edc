use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub inventory_quantity: i32,
    pub img_url: Option<String>,
}
