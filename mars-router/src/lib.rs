//! Ordered URL-pattern routing with typed placeholders.
//!
//! ```
//! use mars_router::{ParamValue, Router};
//!
//! let mut router = Router::new();
//! router.add_route("/posts/id/{id:int}", "post_details", Some(&["GET"])).unwrap();
//!
//! let ret = router.match_route("/posts/id/123", "GET");
//! assert_eq!(ret.status_code(), 200);
//! assert_eq!(ret.params().unwrap()["id"], ParamValue::Int(123));
//! assert_eq!(router.match_route("/posts/id/abc", "GET").status_code(), 400);
//! ```

mod config;
mod error;
mod param;
mod route;
mod router;
mod swap;

pub use config::{ConfigRoute, ConfigRoutes, RouterConfig};
pub use error::{ConversionError, RouterError};
pub use param::{ParamType, ParamValue, Params};
pub use route::{DEFAULT_METHOD, Route, UrlMatch};
pub use router::{DEFAULT_CACHE_CAPACITY, ErrorKind, MatchResult, Router, RouterOptions};
pub use swap::SwappableRouter;
