//! PostgreSQL access for customers.

use sqlx::PgPool;
use tracing::info;

use crate::models::customer::{Customer, CustomerRow};

const CUSTOMER_COLUMNS: &str = "id, name, milestone, risk, blocker, consumption, velocity, updated_at";

pub async fn list_customers(pool: &PgPool) -> sqlx::Result<Vec<Customer>> {
    let rows = sqlx::query_as::<_, CustomerRow>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY name"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Customer::from).collect())
}

pub async fn get_customer(pool: &PgPool, id: &str) -> sqlx::Result<Option<Customer>> {
    let row = sqlx::query_as::<_, CustomerRow>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Customer::from))
}

/// Writes every mutable column of `customer`. Returns false when the row is gone.
pub async fn update_customer(pool: &PgPool, customer: &Customer) -> sqlx::Result<bool> {
    let result = sqlx::query(
        "UPDATE customers SET name = $2, milestone = $3, risk = $4, blocker = $5, \
         consumption = $6, velocity = $7, updated_at = now() WHERE id = $1",
    )
    .bind(&customer.id)
    .bind(&customer.name)
    .bind(customer.milestone.map(|m| m.as_str()))
    .bind(customer.risk.as_str())
    .bind(&customer.blocker)
    .bind(i16::from(customer.consumption.min(100)))
    .bind(customer.velocity.as_str())
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Replaces the whole customer table with `customers` in one transaction.
pub async fn replace_customers(pool: &PgPool, customers: &[Customer]) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM customers").execute(&mut *tx).await?;
    for customer in customers {
        sqlx::query(
            "INSERT INTO customers (id, name, milestone, risk, blocker, consumption, velocity) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&customer.id)
        .bind(&customer.name)
        .bind(customer.milestone.map(|m| m.as_str()))
        .bind(customer.risk.as_str())
        .bind(&customer.blocker)
        .bind(i16::from(customer.consumption.min(100)))
        .bind(customer.velocity.as_str())
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    info!("Seeded {} customers", customers.len());
    Ok(())
}
