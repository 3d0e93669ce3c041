use axum::Router;

/// A service module that contributes HTTP routes.
///
/// The binary entry point collects every module and merges their routers
/// into the application router.
pub trait Module: Send + Sync {
    /// Module name, used for startup logging.
    fn name(&self) -> &str;

    /// The module's routes, already bound to their state and prefixed.
    fn routes(&self) -> Router;
}
