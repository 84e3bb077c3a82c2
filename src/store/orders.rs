//! Customer orders.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{KeyValueStore, MemoryStore};
use crate::error::{Result, StoreError};

/// Order lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub carrier: String,
    pub tracking_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingInfo>,
    pub created_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Orders keyed by order id, visible only to their owner.
#[derive(Clone)]
pub struct OrderBook {
    store: Arc<dyn KeyValueStore<Order>>,
}

impl OrderBook {
    pub fn new(store: Arc<dyn KeyValueStore<Order>>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub async fn insert(&self, order: Order) -> Result<()> {
        let id = order.id.clone();
        self.store.set(&id, order).await
    }

    /// Orders owned by `user_id`, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .store
            .values()
            .await?
            .into_iter()
            .filter(|o| o.user_id == user_id)
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(orders)
    }

    /// One order, only if owned by `user_id`.
    ///
    /// Orders belonging to someone else are reported as missing so ids
    /// cannot be enumerated.
    pub async fn get_for_user(&self, user_id: &str, order_id: &str) -> Result<Order> {
        self.store
            .get(order_id)
            .await?
            .filter(|o| o.user_id == user_id)
            .ok_or_else(|| StoreError::NotFound(format!("Order not found: {}", order_id)).into())
    }

    /// Load orders from a JSON array file. Returns the number loaded.
    pub async fn load_json(&self, path: impl AsRef<Path>) -> Result<usize> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        let orders: Vec<Order> = serde_json::from_str(&content)?;
        let count = orders.len();
        for order in orders {
            self.insert(order).await?;
        }
        tracing::info!("Loaded {} orders from {}", count, path.as_ref().display());
        Ok(count)
    }

    /// Install a few sample orders for the demo accounts.
    pub async fn seed_demo_orders(&self) -> Result<()> {
        let now = Utc::now();
        let orders = vec![
            Order {
                id: "ORD-1001".to_string(),
                user_id: "demo1".to_string(),
                status: OrderStatus::Delivered,
                items: vec![OrderItem {
                    sku: "KB-204".to_string(),
                    name: "Mechanical Keyboard".to_string(),
                    quantity: 1,
                    unit_price: 89.99,
                }],
                total: 89.99,
                currency: default_currency(),
                shipping: Some(ShippingInfo {
                    carrier: "UPS".to_string(),
                    tracking_number: "1Z999AA10123456784".to_string(),
                    estimated_delivery: Some(now - Duration::days(10)),
                }),
                created_at: now - Duration::days(14),
            },
            Order {
                id: "ORD-1002".to_string(),
                user_id: "demo1".to_string(),
                status: OrderStatus::Shipped,
                items: vec![
                    OrderItem {
                        sku: "MS-310".to_string(),
                        name: "Wireless Mouse".to_string(),
                        quantity: 1,
                        unit_price: 29.5,
                    },
                    OrderItem {
                        sku: "PD-020".to_string(),
                        name: "Mouse Pad".to_string(),
                        quantity: 2,
                        unit_price: 7.25,
                    },
                ],
                total: 44.0,
                currency: default_currency(),
                shipping: Some(ShippingInfo {
                    carrier: "FedEx".to_string(),
                    tracking_number: "794644790138".to_string(),
                    estimated_delivery: Some(now + Duration::days(2)),
                }),
                created_at: now - Duration::days(2),
            },
            Order {
                id: "ORD-1003".to_string(),
                user_id: "demo1".to_string(),
                status: OrderStatus::Processing,
                items: vec![OrderItem {
                    sku: "MN-270".to_string(),
                    name: "27\" Monitor".to_string(),
                    quantity: 1,
                    unit_price: 249.0,
                }],
                total: 249.0,
                currency: default_currency(),
                shipping: None,
                created_at: now - Duration::hours(3),
            },
            Order {
                id: "ORD-2001".to_string(),
                user_id: "demo2".to_string(),
                status: OrderStatus::Pending,
                items: vec![OrderItem {
                    sku: "BK-CTFL".to_string(),
                    name: "CTFL Study Guide".to_string(),
                    quantity: 1,
                    unit_price: 39.0,
                }],
                total: 39.0,
                currency: default_currency(),
                shipping: None,
                created_at: now - Duration::days(1),
            },
        ];

        let count = orders.len();
        for order in orders {
            self.insert(order).await?;
        }
        tracing::debug!("Seeded {} demo orders", count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SupportError;
    use std::io::Write;

    #[tokio::test]
    async fn test_list_newest_first() {
        let book = OrderBook::in_memory();
        book.seed_demo_orders().await.unwrap();

        let ids: Vec<String> = book
            .list_for_user("demo1")
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["ORD-1003", "ORD-1002", "ORD-1001"]);
        assert!(book.list_for_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_requires_ownership() {
        let book = OrderBook::in_memory();
        book.seed_demo_orders().await.unwrap();

        let order = book.get_for_user("demo2", "ORD-2001").await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);

        let err = book.get_for_user("demo2", "ORD-1001").await.unwrap_err();
        assert!(matches!(err, SupportError::Store(StoreError::NotFound(_))));
        assert!(book.get_for_user("demo2", "ORD-9999").await.is_err());
    }

    #[tokio::test]
    async fn test_load_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{
                "id": "A-1",
                "userId": "u1",
                "status": "cancelled",
                "items": [{{"sku": "X", "name": "Thing", "quantity": 2, "unitPrice": 1.5}}],
                "total": 3.0,
                "createdAt": "2024-05-01T10:00:00Z"
            }}]"#
        )
        .unwrap();

        let book = OrderBook::in_memory();
        assert_eq!(book.load_json(file.path()).await.unwrap(), 1);

        let order = book.get_for_user("u1", "A-1").await.unwrap();
        assert_eq!(order.currency, "USD");
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(order.shipping.is_none());
    }

    #[tokio::test]
    async fn test_load_json_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let book = OrderBook::in_memory();
        let err = book.load_json(file.path()).await.unwrap_err();
        assert!(matches!(err, SupportError::Serialization(_)));
    }
}
