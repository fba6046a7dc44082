mod context_injector;
mod intent_gatekeeper;
mod lock_guard;
mod scope_enforcer;

pub use context_injector::ContextInjector;
pub use intent_gatekeeper::IntentGatekeeper;
pub use lock_guard::LockGuard;
pub use scope_enforcer::ScopeEnforcer;
