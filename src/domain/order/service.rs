use std::sync::Arc;
use std::time::Instant;

use crate::domain::product::ProductQuantity;
use crate::error::{AppError, AppResult, Entity};
use crate::metrics::OrderMetrics;
use crate::repositories::{CustomersRepository, OrdersRepository, ProductsRepository};

use super::commands::CreateOrder;
use super::value_objects::{NewOrder, Order, OrderLine};

// ============================================================================
// Create Order Service
// ============================================================================
//
// Orchestrates: Customer lookup → Product lookup → Stock validation →
//               Inventory decrement → Order persistence
//
// Every check runs before the first write, so a rejected request leaves the
// store untouched. The stock write only applies to quantities that are still
// the ones validated against, and is undone if the order cannot be saved.
//
// ============================================================================

pub struct CreateOrderService<C, P, O> {
    customers: Arc<C>,
    products: Arc<P>,
    orders: Arc<O>,
    metrics: Arc<OrderMetrics>,
}

impl<C, P, O> CreateOrderService<C, P, O>
where
    C: CustomersRepository,
    P: ProductsRepository,
    O: OrdersRepository,
{
    pub fn new(customers: Arc<C>, products: Arc<P>, orders: Arc<O>, metrics: Arc<OrderMetrics>) -> Self {
        Self {
            customers,
            products,
            orders,
            metrics,
        }
    }

    /// Validate the request, take the stock and persist the order
    #[tracing::instrument(skip_all, fields(customer_id = %command.customer_id))]
    pub async fn execute(&self, command: CreateOrder) -> AppResult<Order> {
        let started = Instant::now();
        let result = self.create(&command).await;
        let elapsed = started.elapsed().as_secs_f64();

        match &result {
            Ok(order) => {
                let units: u64 = order.products.iter().map(|line| u64::from(line.quantity)).sum();
                self.metrics.record_order_created(units, elapsed);
            }
            Err(error) => {
                tracing::warn!(error = %error, reason = error.reason(), "Order rejected");
                self.metrics.record_order_failed(error.reason(), elapsed);
            }
        }

        result
    }

    async fn create(&self, command: &CreateOrder) -> AppResult<Order> {
        let requested = command.normalized_products()?;

        let customer = self
            .customers
            .find_by_id(command.customer_id)
            .await?
            .ok_or(AppError::NotFound(Entity::Customer))?;

        let found = self.products.find_all_by_id(&requested).await?;

        if found.len() != requested.len() {
            tracing::debug!(
                requested = requested.len(),
                found = found.len(),
                "Some requested products do not exist"
            );
            return Err(AppError::NotFound(Entity::Product));
        }

        // Slots follow request order so lines come out in the order asked for
        let mut slots: Vec<Option<(OrderLine, ProductQuantity)>> = vec![None; requested.len()];

        for product in &found {
            let position = requested
                .iter()
                .position(|entry| entry.id == product.id)
                .filter(|&position| slots[position].is_none())
                .ok_or_else(|| {
                    tracing::error!(product_id = %product.id, "Store returned a product that was not requested");
                    AppError::NotFound(Entity::Product)
                })?;
            let wanted = requested[position].quantity;

            let remaining = product.remaining_after(wanted).ok_or(AppError::InsufficientStock {
                product_id: product.id,
                requested: wanted,
                available: product.quantity,
            })?;

            slots[position] = Some((
                OrderLine {
                    product_id: product.id,
                    quantity: wanted,
                    price: product.price,
                },
                ProductQuantity {
                    id: product.id,
                    quantity: remaining,
                    expected: product.quantity,
                },
            ));
        }

        let (lines, updates): (Vec<OrderLine>, Vec<ProductQuantity>) = slots.into_iter().flatten().unzip();

        self.products.update_quantity(&updates).await?;

        let order = match self
            .orders
            .create(NewOrder {
                customer,
                products: lines,
            })
            .await
        {
            Ok(order) => order,
            Err(error) => {
                self.restore_stock(&updates).await;
                return Err(error.into());
            }
        };

        tracing::info!(
            order_id = %order.id,
            line_count = order.products.len(),
            total = %order.total(),
            "✅ Order created"
        );

        Ok(order)
    }

    /// Give back the stock taken for an order that could not be saved
    async fn restore_stock(&self, updates: &[ProductQuantity]) {
        let reverts: Vec<ProductQuantity> = updates.iter().map(ProductQuantity::reverted).collect();

        match self.products.update_quantity(&reverts).await {
            Ok(()) => tracing::warn!(product_count = reverts.len(), "Restored stock after failed order write"),
            Err(error) => tracing::error!(
                error = %error,
                product_count = reverts.len(),
                "Could not restore stock after failed order write"
            ),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
