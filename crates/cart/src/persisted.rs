//! The cart together with its persistence hook.
//!
//! [`Cart`] is the single owner of a [`CartAggregate`]. It hydrates once from
//! a [`KeyValueStore`] when constructed and writes the whole aggregate back to
//! the same key after every mutation.
//!
//! Neither direction surfaces errors to callers:
//!
//! - An absent, empty, unreadable or corrupt stored value hydrates as an empty
//!   cart.
//! - A failed write is logged and the in-memory mutation stands. Memory and
//!   storage can diverge until the next successful write.

use std::num::NonZeroU32;

use africlothing_core::{Price, Product, ProductId, ProductVariant, VariantId};
use tracing::{debug, error, warn};

use crate::action::CartAction;
use crate::aggregate::CartAggregate;
use crate::error::{HydrateError, PersistError};
use crate::line::CartLine;
use crate::store::KeyValueStore;

/// A cart aggregate bound to a storage key.
#[derive(Debug)]
pub struct Cart<S> {
    aggregate: CartAggregate,
    store: S,
    key: String,
    last_persist_failed: bool,
}

impl<S: KeyValueStore> Cart<S> {
    /// Hydrate the cart stored under `key`, or start empty.
    pub fn hydrate(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let aggregate = match load(&store, &key) {
            Ok(Some(aggregate)) => {
                debug!(
                    key = %key,
                    lines = aggregate.line_count(),
                    total = %aggregate.total(),
                    "Hydrated cart from storage"
                );
                aggregate
            }
            Ok(None) => {
                debug!(key = %key, "No stored cart, starting empty");
                CartAggregate::new()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to load cart from storage, starting empty");
                CartAggregate::new()
            }
        };

        Self {
            aggregate,
            store,
            key,
            last_persist_failed: false,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add units of a variant. See [`CartAggregate::add`].
    pub fn add(&mut self, product: Product, variant: ProductVariant, quantity: NonZeroU32) {
        self.dispatch(CartAction::Add {
            product,
            variant,
            quantity,
        });
    }

    /// Remove a line. See [`CartAggregate::remove`].
    pub fn remove(&mut self, product_id: ProductId, variant_id: &VariantId) {
        self.dispatch(CartAction::Remove {
            product_id,
            variant_id: variant_id.clone(),
        });
    }

    /// Set a line's quantity. See [`CartAggregate::set_quantity`].
    pub fn set_quantity(&mut self, product_id: ProductId, variant_id: &VariantId, quantity: i64) {
        self.dispatch(CartAction::SetQuantity {
            product_id,
            variant_id: variant_id.clone(),
            quantity,
        });
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// Apply an intent, then persist.
    pub fn dispatch(&mut self, action: CartAction) {
        log_transition(&action);
        self.aggregate.apply(action);
        self.persist();
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The current aggregate.
    #[must_use]
    pub const fn aggregate(&self) -> &CartAggregate {
        &self.aggregate
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.aggregate.lines()
    }

    /// Current total.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.aggregate.total()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.aggregate.line_count()
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the most recent write failed.
    ///
    /// Diagnostic only: when true, storage may hold an older cart than memory.
    #[must_use]
    pub const fn last_persist_failed(&self) -> bool {
        self.last_persist_failed
    }

    /// Take the aggregate and store apart.
    #[must_use]
    pub fn into_parts(self) -> (CartAggregate, S) {
        (self.aggregate, self.store)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn persist(&mut self) {
        match save(&mut self.store, &self.key, &self.aggregate) {
            Ok(()) => self.last_persist_failed = false,
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to save cart to storage");
                self.last_persist_failed = true;
            }
        }
    }
}

fn log_transition(action: &CartAction) {
    let name = action.name();
    match action {
        CartAction::Add {
            product,
            variant,
            quantity,
        } => debug!(
            action = name,
            product_id = %product.id,
            variant_id = %variant.id,
            quantity = quantity.get(),
            "Cart transition"
        ),
        CartAction::Remove {
            product_id,
            variant_id,
        } => debug!(
            action = name,
            product_id = %product_id,
            variant_id = %variant_id,
            "Cart transition"
        ),
        CartAction::SetQuantity {
            product_id,
            variant_id,
            quantity,
        } => debug!(
            action = name,
            product_id = %product_id,
            variant_id = %variant_id,
            quantity = *quantity,
            "Cart transition"
        ),
        CartAction::Clear => debug!(action = name, "Cart transition"),
    }
}

/// Read and parse the stored cart. Blank values count as absent.
fn load<S: KeyValueStore>(store: &S, key: &str) -> Result<Option<CartAggregate>, HydrateError> {
    let Some(raw) = store.get_item(key)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(CartAggregate::from_json(&raw)?))
}

fn save<S: KeyValueStore>(
    store: &mut S,
    key: &str,
    aggregate: &CartAggregate,
) -> Result<(), PersistError> {
    let json = aggregate.to_json()?;
    store.set_item(key, &json)?;
    Ok(())
}
