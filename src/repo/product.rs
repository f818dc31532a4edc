// src/repo/product.rs
use sqlx::PgPool;

use crate::dtos::product::NewProduct;
use crate::models::product::Product;

pub async fn insert(pool: &PgPool, new: &NewProduct) -> Result<Product, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, description, price, inventory_quantity, img_url)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, name, description, price, inventory_quantity, img_url",
    )
    .bind(&new.name)
    .bind(&new.description)
    .bind(new.price)
    .bind(new.inventory_quantity)
    .bind(&new.img_url)
    .fetch_one(pool)
    .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, inventory_quantity, img_url
         FROM products ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price, inventory_quantity, img_url
         FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

// Full-row write of the mutable columns; None when the id is gone.
pub async fn update(pool: &PgPool, product: &Product) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as::<_, Product>(
        "UPDATE products SET
         name = $1,
         description = $2,
         price = $3,
         inventory_quantity = $4,
         img_url = $5
         WHERE id = $6
         RETURNING id, name, description, price, inventory_quantity, img_url",
    )
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.inventory_quantity)
    .bind(&product.img_url)
    .bind(product.id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
