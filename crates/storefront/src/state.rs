//! Application context shared across consumers.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::config::{StorageBackend, StorefrontConfig};
use crate::error::Result;
use crate::notify::NotificationSink;
use crate::services::auth::SessionStore;
use crate::services::checkout::{self, CheckoutError, CheckoutSummary};
use crate::storage::{FileStore, KeyValueStore, MemoryStore, NoopStore, PersistentBinding, keys};
use crate::wishlist::WishlistStore;

/// Everything a storefront view needs: the cart, the wishlist, the
/// session, and where to send notifications.
///
/// Created once at start-up and handed to each consumer. Cloning is cheap
/// (`Arc`) and every clone sees the same stores.
#[derive(Clone)]
pub struct AppContext {
    inner: Arc<AppContextInner>,
}

struct AppContextInner {
    config: StorefrontConfig,
    kv: Arc<dyn KeyValueStore>,
    sink: Arc<dyn NotificationSink>,
    cart: CartStore,
    wishlist: WishlistStore,
    session: SessionStore,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.inner.config)
            .field("cart", &self.inner.cart)
            .field("wishlist", &self.inner.wishlist)
            .field("session", &self.inner.session)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Create the context over an already-opened storage backend.
    ///
    /// Each store is seeded from its mirror in `kv`.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        kv: Arc<dyn KeyValueStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let cart = CartStore::load(PersistentBinding::new(Arc::clone(&kv), keys::CART));
        let wishlist = WishlistStore::load(
            PersistentBinding::new(Arc::clone(&kv), keys::WISHLIST),
            Arc::clone(&sink),
        );
        let session = SessionStore::load(PersistentBinding::new(Arc::clone(&kv), keys::SESSION));

        tracing::debug!(
            storage = ?config.storage,
            cart_lines = cart.len(),
            wishlist_entries = wishlist.wishlist_count(),
            signed_in = session.is_authenticated(),
            "storefront context ready"
        );

        Self {
            inner: Arc::new(AppContextInner {
                config,
                kv,
                sink,
                cart,
                wishlist,
                session,
            }),
        }
    }

    /// Open the storage backend named in `config` and create the context.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the file backend's directory cannot
    /// be created.
    pub fn from_config(config: StorefrontConfig, sink: Arc<dyn NotificationSink>) -> Result<Self> {
        let kv: Arc<dyn KeyValueStore> = match config.storage {
            StorageBackend::File => Arc::new(FileStore::open(&config.data_dir)?),
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::None => Arc::new(NoopStore),
        };
        Ok(Self::new(config, kv, sink))
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &WishlistStore {
        &self.inner.wishlist
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Sink the stores report to.
    #[must_use]
    pub fn notifications(&self) -> &dyn NotificationSink {
        self.inner.sink.as_ref()
    }

    /// Storage backend holding the mirrors.
    #[must_use]
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.inner.kv.as_ref()
    }

    /// Start checkout for whoever is signed in.
    ///
    /// # Errors
    ///
    /// See [`checkout::begin_checkout`].
    pub fn begin_checkout(&self) -> std::result::Result<CheckoutSummary, CheckoutError> {
        let user = self.session().current();
        checkout::begin_checkout(user.as_ref(), self.cart(), self.notifications())
    }

    /// Move a saved product from the wishlist into the cart.
    ///
    /// Returns false if the product is not on the wishlist.
    pub fn move_to_cart(&self, product_id: &shopease_core::ProductId) -> bool {
        let Some(entry) = self.wishlist().get(product_id) else {
            return false;
        };
        self.cart().add_to_cart(entry.into_product());
        self.wishlist().remove_from_wishlist(product_id);
        true
    }
}
