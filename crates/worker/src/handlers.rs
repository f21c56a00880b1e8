use std::collections::HashMap;
use std::sync::Arc;

use clerk_core::{ClerkError, ClerkResult, JobHandler};
use clerk_dispatcher::{DynamicFamily, HandlerRef, JobTypeResolver};
use tracing::{info, warn};

/// Handler registry keyed by the routes the resolver can produce
///
/// Built once at startup; lookups are read-only afterwards.
#[derive(Clone, Default)]
pub struct HandlerSet {
    exact: HashMap<String, Arc<dyn JobHandler>>,
    families: HashMap<DynamicFamily, Arc<dyn JobHandler>>,
    balance: Option<Arc<dyn JobHandler>>,
    fallback: Option<Arc<dyn JobHandler>>,
}

impl HandlerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler behind an exact-table handler key
    pub fn register_exact(mut self, key: &str, handler: Arc<dyn JobHandler>) -> Self {
        info!("Registering handler '{}' for key '{}'", handler.name(), key);
        self.exact.insert(key.to_string(), handler);
        self
    }

    /// Register the shared discovered handler of a prefix family
    pub fn register_family(mut self, family: DynamicFamily, handler: Arc<dyn JobHandler>) -> Self {
        info!("Registering handler '{}' for family '{}_'", handler.name(), family);
        self.families.insert(family, handler);
        self
    }

    /// Register the shared handler for address currencies that are also balance currencies
    pub fn register_balance(mut self, handler: Arc<dyn JobHandler>) -> Self {
        info!("Registering balance handler '{}'", handler.name());
        self.balance = Some(handler);
        self
    }

    /// Handler used for any route without a dedicated registration
    pub fn with_fallback(mut self, handler: Arc<dyn JobHandler>) -> Self {
        info!("Registering fallback handler '{}'", handler.name());
        self.fallback = Some(handler);
        self
    }

    pub fn lookup(&self, route: &HandlerRef) -> Option<Arc<dyn JobHandler>> {
        let dedicated = match route {
            HandlerRef::Exact(key) => self.exact.get(*key),
            HandlerRef::Discovered { family, .. } => self.families.get(family),
            HandlerRef::BalanceDiscovered { .. } => self.balance.as_ref(),
        };

        dedicated.or(self.fallback.as_ref()).cloned()
    }

    /// Check that every route the resolver can produce has a handler
    pub fn validate(&self, resolver: &JobTypeResolver) -> ClerkResult<()> {
        if self.fallback.is_some() {
            return Ok(());
        }

        let mut missing: Vec<String> = resolver
            .exact_handler_keys()
            .into_iter()
            .filter(|key| !self.exact.contains_key(*key))
            .map(str::to_string)
            .collect();

        missing.extend(
            DynamicFamily::ALL
                .iter()
                .filter(|family| !self.families.contains_key(*family))
                .map(|family| format!("{family}_*")),
        );

        if self.balance.is_none() {
            missing.push("address balance".to_string());
        }

        if missing.is_empty() {
            return Ok(());
        }

        warn!("Missing handlers: {:?}", missing);
        Err(ClerkError::config_error(format!(
            "no handler registered for: {}",
            missing.join(", ")
        )))
    }

    pub fn len(&self) -> usize {
        self.exact.len()
            + self.families.len()
            + usize::from(self.balance.is_some())
            + usize::from(self.fallback.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use clerk_core::{HandlerFailure, JobContext};

    struct Named(&'static str);

    #[async_trait]
    impl JobHandler for Named {
        fn name(&self) -> &str {
            self.0
        }

        async fn execute(&self, _ctx: &mut JobContext<'_>) -> Result<(), HandlerFailure> {
            Ok(())
        }
    }

    fn route(key: &'static str) -> HandlerRef {
        HandlerRef::Exact(key)
    }

    #[test]
    fn test_lookup_prefers_dedicated_handler() {
        let set = HandlerSet::new()
            .register_exact("bitstamp", Arc::new(Named("bitstamp")))
            .with_fallback(Arc::new(Named("fallback")));

        assert_eq!(set.lookup(&route("bitstamp")).unwrap().name(), "bitstamp");
        assert_eq!(set.lookup(&route("kraken")).unwrap().name(), "fallback");
    }

    #[test]
    fn test_family_and_balance_lookup() {
        let set = HandlerSet::new()
            .register_family(DynamicFamily::Address, Arc::new(Named("address")))
            .register_balance(Arc::new(Named("balance")));

        let legacy = HandlerRef::Discovered {
            family: DynamicFamily::Address,
            target: "xpm".to_string(),
        };
        let balance = HandlerRef::BalanceDiscovered {
            currency: "btc".to_string(),
        };
        let ticker = HandlerRef::Discovered {
            family: DynamicFamily::Ticker,
            target: "kraken".to_string(),
        };

        assert_eq!(set.lookup(&legacy).unwrap().name(), "address");
        assert_eq!(set.lookup(&balance).unwrap().name(), "balance");
        assert!(set.lookup(&ticker).is_none());
    }

    #[test]
    fn test_validate_reports_missing_routes() {
        let resolver = JobTypeResolver::builtin();
        let set = HandlerSet::new().register_exact("bitstamp", Arc::new(Named("bitstamp")));
        assert!(set.validate(&resolver).is_err());

        let with_fallback = set.with_fallback(Arc::new(Named("fallback")));
        assert!(with_fallback.validate(&resolver).is_ok());
    }

    #[test]
    fn test_validate_complete_set() {
        let resolver = JobTypeResolver::builtin();
        let mut set = HandlerSet::new();
        for key in resolver.exact_handler_keys() {
            set = set.register_exact(key, Arc::new(Named("exact")));
        }
        for family in DynamicFamily::ALL {
            set = set.register_family(family, Arc::new(Named("family")));
        }
        set = set.register_balance(Arc::new(Named("balance")));

        assert!(set.validate(&resolver).is_ok());
    }
}
