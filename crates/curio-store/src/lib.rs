//! # curio-store
//!
//! Transactional storefront state: product table, single-slot carts, the
//! order ledger, the platform wallet, and the checkout-intent table.
//!
//! Every table lives behind one `RwLock`, and the whole commit transaction
//! (consume intent, insert order, flip availability, clear cart, credit
//! wallet) runs inside a single write-lock acquisition. That gives the
//! storefront its core guarantees by construction:
//!
//! - the availability re-check happens under the same lock that clears it,
//!   so two confirmations for the same piece can never both commit;
//! - wallet credits are serialized, so concurrent commits never lose money;
//! - a failed commit mutates nothing — validation runs to completion before
//!   the first write.
//!
//! Gateway I/O never happens while a lock is held.

use curio_core::{
    AdminOrderView, CartView, CheckoutIntent, Order, OrderStatus, OrderView, Product,
    ProductCatalog, ShopError, ShopResult, User, UserRoster,
};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// All storefront tables. Access only through [`Store`].
#[derive(Debug, Default)]
struct Tables {
    /// Known users, keyed by id (seeded; registration is external)
    users: HashMap<String, User>,
    /// Product table, keyed by id
    products: HashMap<String, Product>,
    /// Single-slot carts: user id -> selected product id
    carts: HashMap<String, String>,
    /// Outstanding checkout intents, keyed by token
    intents: HashMap<String, CheckoutIntent>,
    /// The durable order ledger
    orders: Vec<Order>,
    /// Platform wallet balance in minor currency units
    wallet_balance: i64,
}

/// Shared, cloneable handle to the storefront state.
#[derive(Debug, Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Tables>>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock means a panic mid-mutation elsewhere; the data is
    // still the best copy we have, so recover the guard rather than unwind.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Insert or replace a product
    pub fn seed_product(&self, product: Product) {
        self.write().products.insert(product.id.clone(), product);
    }

    /// Insert or replace a user
    pub fn seed_user(&self, user: User) {
        self.write().users.insert(user.id.clone(), user);
    }

    /// Load a whole seed catalog
    pub fn load_catalog(&self, catalog: ProductCatalog) {
        let mut tables = self.write();
        for product in catalog.products {
            tables.products.insert(product.id.clone(), product);
        }
    }

    /// Load the seeded user roster
    pub fn load_roster(&self, roster: UserRoster) {
        let mut tables = self.write();
        for user in roster.users {
            tables.users.insert(user.id.clone(), user);
        }
    }

    // =========================================================================
    // Users & products (read side)
    // =========================================================================

    /// Look up a user by id
    pub fn user(&self, user_id: &str) -> Option<User> {
        self.read().users.get(user_id).cloned()
    }

    /// Look up a product by id
    pub fn product(&self, product_id: &str) -> Option<Product> {
        self.read().products.get(product_id).cloned()
    }

    /// All products, ordered by id for a stable listing
    pub fn products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self.read().products.values().cloned().collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));
        products
    }

    // =========================================================================
    // Cart store
    // =========================================================================

    /// Set the user's single cart slot to `product_id`, replacing whatever
    /// was there. Implemented as an upsert keyed on user id, so a concurrent
    /// reader never observes an empty cart mid-replacement.
    pub fn set_cart(&self, user_id: &str, product_id: &str) -> ShopResult<()> {
        let mut tables = self.write();

        if !tables.products.contains_key(product_id) {
            return Err(ShopError::ProductNotFound {
                product_id: product_id.to_string(),
            });
        }

        tables
            .carts
            .insert(user_id.to_string(), product_id.to_string());
        Ok(())
    }

    /// Remove the user's entry if it matches `product_id`. A no-op on an
    /// empty cart or a different selection.
    pub fn remove_cart(&self, user_id: &str, product_id: &str) {
        let mut tables = self.write();
        if tables.carts.get(user_id).map(String::as_str) == Some(product_id) {
            tables.carts.remove(user_id);
        }
    }

    /// The user's cart entry joined with current product data, or `None`
    pub fn get_cart(&self, user_id: &str) -> Option<CartView> {
        let tables = self.read();
        let product_id = tables.carts.get(user_id)?;
        let product = tables.products.get(product_id)?;

        Some(CartView {
            product_id: product.id.clone(),
            title: product.title.clone(),
            price: product.price.clone(),
            available: product.available,
            quantity: 1,
            image_url: product.image_url.clone(),
        })
    }

    // =========================================================================
    // Checkout intents
    // =========================================================================

    /// Mint and persist a single-use checkout intent for the user's selection
    pub fn mint_intent(&self, user_id: &str, product_id: &str) -> CheckoutIntent {
        let intent = CheckoutIntent::mint(user_id, product_id);
        self.write()
            .intents
            .insert(intent.token.clone(), intent.clone());
        debug!(user_id, product_id, "minted checkout intent");
        intent
    }

    /// Record the gateway session id on an outstanding intent
    pub fn bind_session(&self, token: &str, session_id: &str) -> ShopResult<()> {
        let mut tables = self.write();
        let intent = tables
            .intents
            .get_mut(token)
            .ok_or(ShopError::IntentNotFound)?;
        intent.session_id = Some(session_id.to_string());
        Ok(())
    }

    /// Discard an intent whose gateway session never materialized
    pub fn revoke_intent(&self, token: &str) {
        self.write().intents.remove(token);
    }

    // =========================================================================
    // Commit transaction
    // =========================================================================

    /// Convert a confirmed payment into a durable order.
    ///
    /// Runs entirely under one write lock: validation first, then, only if
    /// every check passes, the four writes in sequence — consume the intent,
    /// insert the order, mark the product unavailable, clear every cart entry
    /// for the buyer, credit the platform wallet. A failure at any check
    /// leaves the store untouched, including the intent itself.
    ///
    /// Replays fail with [`ShopError::IntentNotFound`] because the token is
    /// gone; a concurrent sale of the same piece fails with
    /// [`ShopError::ProductAlreadySold`] because availability is re-checked
    /// under the same lock that clears it.
    pub fn commit_order(
        &self,
        token: &str,
        claimed_product_id: &str,
        user_id: &str,
    ) -> ShopResult<Order> {
        let mut tables = self.write();

        // Validation. No writes until all of it passes.
        let intent = tables
            .intents
            .get(token)
            .cloned()
            .ok_or(ShopError::IntentNotFound)?;

        if intent.is_expired() {
            tables.intents.remove(token);
            warn!(token, "rejected expired checkout intent");
            return Err(ShopError::IntentNotFound);
        }

        // The token must have been minted for this user and this product;
        // the bare query-string pid is never trusted on its own.
        if intent.user_id != user_id || intent.product_id != claimed_product_id {
            warn!(token, user_id, claimed_product_id, "checkout intent mismatch");
            return Err(ShopError::IntentNotFound);
        }

        let product = tables
            .products
            .get(&intent.product_id)
            .cloned()
            .ok_or_else(|| ShopError::ProductNotFound {
                product_id: intent.product_id.clone(),
            })?;

        if !product.available {
            return Err(ShopError::ProductAlreadySold {
                product_id: product.id.clone(),
            });
        }

        // Commit. Total is captured from the current price, then the writes
        // land in order: intent, order, availability, cart, wallet.
        tables.intents.remove(token);

        let order = Order::new(&intent.user_id, &product.id, product.price.clone());
        tables.orders.push(order.clone());

        if let Some(p) = tables.products.get_mut(&product.id) {
            p.available = false;
        }
        tables.carts.remove(&intent.user_id);
        tables.wallet_balance += order.total.amount;

        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            product_id = %order.product_id,
            total = order.total.amount,
            "order committed"
        );

        Ok(order)
    }

    // =========================================================================
    // Order ledger (query/status surface)
    // =========================================================================

    /// The user's orders joined with product data, newest first
    pub fn orders_for_user(&self, user_id: &str) -> Vec<OrderView> {
        let tables = self.read();
        let mut views: Vec<OrderView> = tables
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .map(|o| {
                let product = tables.products.get(&o.product_id);
                OrderView {
                    id: o.id,
                    product_id: o.product_id.clone(),
                    product_title: product
                        .map(|p| p.title.clone())
                        .unwrap_or_else(|| "(removed product)".to_string()),
                    product_image: product.and_then(|p| p.image_url.clone()),
                    quantity: o.quantity,
                    total: o.total.clone(),
                    status: o.status,
                    created_at: o.created_at,
                }
            })
            .collect();
        views.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        views
    }

    /// All orders joined with customer and product data, newest first
    pub fn all_orders(&self) -> Vec<AdminOrderView> {
        let tables = self.read();
        let mut views: Vec<AdminOrderView> = tables
            .orders
            .iter()
            .map(|o| AdminOrderView {
                id: o.id,
                customer_name: tables
                    .users
                    .get(&o.user_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| o.user_id.clone()),
                product_title: tables
                    .products
                    .get(&o.product_id)
                    .map(|p| p.title.clone())
                    .unwrap_or_else(|| "(removed product)".to_string()),
                quantity: o.quantity,
                total: o.total.clone(),
                status: o.status,
                created_at: o.created_at,
            })
            .collect();
        views.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        views
    }

    /// Set an order's status. Any status may follow any other; only the
    /// status field changes.
    pub fn set_order_status(&self, order_id: Uuid, status: OrderStatus) -> ShopResult<Order> {
        let mut tables = self.write();
        let order = tables
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| ShopError::OrderNotFound {
                order_id: order_id.to_string(),
            })?;

        order.status = status;
        info!(order_id = %order_id, status = %status, "order status updated");
        Ok(order.clone())
    }

    // =========================================================================
    // Admin moderation & wallet
    // =========================================================================

    /// Flip a product's availability and return the new value.
    ///
    /// Against a concurrent commit for the same product this is
    /// last-write-wins: whichever write lands second under the lock decides
    /// the final flag.
    pub fn toggle_availability(&self, product_id: &str) -> ShopResult<bool> {
        let mut tables = self.write();
        let product =
            tables
                .products
                .get_mut(product_id)
                .ok_or_else(|| ShopError::ProductNotFound {
                    product_id: product_id.to_string(),
                })?;

        product.available = !product.available;
        info!(product_id, available = product.available, "availability toggled");
        Ok(product.available)
    }

    /// Platform wallet balance in minor currency units
    pub fn wallet_balance(&self) -> i64 {
        self.read().wallet_balance
    }
}
