use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use tracing::info;

use crate::{Router, RouterConfig};

/// A router that can be replaced atomically while requests are being matched.
///
/// Each request should `load` once and match against that snapshot. A stored router starts
/// with an empty cache, so swapping is also how a live route table gets changed.
pub struct SwappableRouter<C> {
    pub routers: Arc<ArcSwap<Router<C>>>,
}

impl<C> SwappableRouter<C> {
    pub fn new(router: Router<C>) -> Self {
        Self {
            routers: Arc::new(ArcSwap::from_pointee(router)),
        }
    }

    pub fn load(&self) -> Arc<Router<C>> {
        self.routers.load_full()
    }

    pub fn store(&self, router: Router<C>) {
        info!("router swapped: {} routes", router.len());
        self.routers.store(Arc::new(router));
    }
}

impl SwappableRouter<String> {
    pub fn try_new(config: RouterConfig) -> Result<Self> {
        Ok(Self::new(config.into_router()?))
    }

    pub fn swap(&self, config: RouterConfig) -> Result<()> {
        self.store(config.into_router()?);
        Ok(())
    }
}

impl<C> Clone for SwappableRouter<C> {
    fn clone(&self) -> Self {
        Self {
            routers: self.routers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_should_replace_routes_and_cache() -> Result<()> {
        let router = SwappableRouter::try_new(RouterConfig::load("fixtures/routes.yml")?)?;
        let handle = router.clone();

        let snapshot = router.load();
        assert_eq!(snapshot.match_route("/contact", "GET").status_code(), 404);
        assert_eq!(snapshot.cached_len(), 1);

        let config: RouterConfig = serde_yaml::from_str(
            r#"
name: blog-v2
routes:
  - pattern: /contact
    handler: contact
"#,
        )?;
        handle.swap(config)?;

        let fresh = router.load();
        assert_eq!(fresh.cached_len(), 0);
        assert_eq!(
            fresh.match_route("/contact", "GET").controller().map(String::as_str),
            Some("contact")
        );
        // old snapshot is untouched
        assert_eq!(snapshot.match_route("/contact", "GET").status_code(), 404);
        Ok(())
    }

    #[test]
    fn store_should_accept_any_controller() -> Result<()> {
        let mut first = Router::new();
        first.add_route("/a", 1u32, None)?;
        let router = SwappableRouter::new(first);
        assert_eq!(router.load().match_route("/a", "GET").controller(), Some(&1));

        let mut second = Router::new();
        second.add_route("/a", 2u32, None)?;
        router.store(second);
        assert_eq!(router.load().match_route("/a", "GET").controller(), Some(&2));
        Ok(())
    }
}
