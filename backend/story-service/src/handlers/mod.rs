/// HTTP request handlers
///
/// Handlers resolve the caller's session and capability, consult the view
/// cache, delegate to the services, and apply the invalidation table after
/// successful mutations.
pub mod comments;
pub mod likes;
pub mod stories;

pub use comments::*;
pub use likes::*;
pub use stories::*;

use crate::cache::ViewCache;
use crate::db::Store;
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub cache: ViewCache,
}
