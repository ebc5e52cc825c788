//! Order book repository.

use uuid::Uuid;

use atelier_core::content::{ContentStores, JsonFileStore, Order};
use atelier_core::types::OrderStatus;

use super::RepositoryError;

/// Repository over the order book file.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    store: JsonFileStore<Vec<Order>>,
}

impl OrderRepository {
    /// Create a repository over the orders store.
    #[must_use]
    pub fn new(stores: &ContentStores) -> Self {
        Self {
            store: stores.orders(),
        }
    }

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` when the file cannot be read.
    pub fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.store.load_or_default()?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Orders with the given status, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` when the file cannot be read.
    pub fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = self.list()?;
        orders.retain(|o| o.status == status);
        Ok(orders)
    }

    /// A single order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when no order has that id.
    pub fn get(&self, id: Uuid) -> Result<Order, RepositoryError> {
        self.store
            .load_or_default()?
            .into_iter()
            .find(|o| o.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("order {id}")))
    }

    /// Move an order to a new status.
    ///
    /// Only forward transitions are allowed: a pending order can be paid or
    /// cancelled, a paid order shipped or cancelled. Anything else is
    /// rejected without touching the file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when no order has that id, or
    /// `RepositoryError::InvalidTransition` when the move is not allowed.
    pub fn set_status(&self, id: Uuid, status: OrderStatus) -> Result<Order, RepositoryError> {
        let mut orders = self.store.load_or_default()?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("order {id}")))?;

        if !order.status.can_transition_to(status) {
            return Err(RepositoryError::InvalidTransition {
                from: order.status,
                to: status,
            });
        }

        order.status = status;
        let updated = order.clone();
        self.store.save(&orders)?;
        Ok(updated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use rust_decimal::dec;

    use super::*;
    use atelier_core::cart::LineItem;
    use atelier_core::content::{Customer, PaymentDetails};
    use atelier_core::types::{Email, ProductId};

    fn order(number: &str) -> Order {
        let item = LineItem {
            product_id: ProductId::new("p1"),
            name: "Wool Coat".to_owned(),
            category: "Outerwear".to_owned(),
            unit_price: dec!(180.00),
            quantity: 1,
            image_url: "/static/images/coat.jpg".to_owned(),
            image_hint: "wool coat".to_owned(),
            size: "M".to_owned(),
            color: "Camel".to_owned(),
        };
        Order {
            id: Uuid::new_v4(),
            number: number.to_owned(),
            created_at: Utc::now(),
            customer: Customer {
                name: "Jo Bloggs".to_owned(),
                email: Email::parse("jo@example.com").unwrap(),
                phone: None,
                address_line1: "1 High St".to_owned(),
                address_line2: None,
                city: "Leeds".to_owned(),
                postal_code: "LS1 1AA".to_owned(),
                country: "UK".to_owned(),
            },
            items: vec![item],
            subtotal: dec!(180.00),
            shipping_fee: dec!(5.00),
            total: dec!(185.00),
            payment: PaymentDetails {
                method: "bank_transfer".to_owned(),
                reference: number.to_owned(),
            },
            status: OrderStatus::Pending,
        }
    }

    fn repo(dir: &std::path::Path) -> OrderRepository {
        OrderRepository::new(&ContentStores::new(dir))
    }

    #[test]
    fn test_set_status_follows_allowed_transitions() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(dir.path());
        let order = order("ATL-AAAAAA");
        let id = order.id;
        repo.store.save(&vec![order]).unwrap();

        let paid = repo.set_status(id, OrderStatus::Paid).unwrap();
        assert_eq!(paid.status, OrderStatus::Paid);
        let shipped = repo.set_status(id, OrderStatus::Shipped).unwrap();
        assert_eq!(shipped.status, OrderStatus::Shipped);
    }

    #[test]
    fn test_set_status_rejects_backwards_move() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(dir.path());
        let order = order("ATL-AAAAAA");
        let id = order.id;
        repo.store.save(&vec![order]).unwrap();

        repo.set_status(id, OrderStatus::Paid).unwrap();
        assert!(matches!(
            repo.set_status(id, OrderStatus::Pending),
            Err(RepositoryError::InvalidTransition { .. })
        ));
        // File unchanged by the rejected move.
        assert_eq!(repo.get(id).unwrap().status, OrderStatus::Paid);
    }

    #[test]
    fn test_get_missing_order() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo(dir.path());
        assert!(matches!(
            repo.get(Uuid::new_v4()),
            Err(RepositoryError::NotFound(_))
        ));
    }
}
