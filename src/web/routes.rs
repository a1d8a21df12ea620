// [library] Axum web framework routing components
use axum::{
    extract::FromRef,     // [library] State extraction trait
    routing::get,         // [library] HTTP method routing builders
    Router,               // [library] HTTP request router for URL pattern matching
};
use std::sync::Arc;

// [business] Import application modules for dependency injection and routing
use crate::{
    db::Database,                  // [business] Graph database gateway
    generator::RecordGenerator,    // [business] Synthetic record source
    instance::InstanceId,          // [business] Host identity for diagnostics
    web::{
        countries_handler, create_record_handler, health_handler, list_records_handler,
        whoami_handler,
    },
};

// [business] Application state - everything a handler may need, built once at startup
// Axum clones it per request; every field is a cheap Arc clone
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub generator: Arc<dyn RecordGenerator>,
    pub instance: InstanceId,
}

impl AppState {
    pub fn new(db: Database, generator: Arc<dyn RecordGenerator>, instance: InstanceId) -> Self {
        Self {
            db,
            generator,
            instance,
        }
    }
}

// [library] FromRef impls let handlers extract only the piece of state they use
impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Arc<dyn RecordGenerator> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.generator.clone()
    }
}

impl FromRef<AppState> for InstanceId {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.instance.clone()
    }
}

// [business] Create the HTTP router with the data and diagnostic endpoints
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        // [business] Emissions records - list all, or create one synthetic record
        .route("/records", get(list_records_handler).post(create_record_handler))
        // [business] Read-only country nodes
        .route("/countries", get(countries_handler))
        // [business] Liveness with a database round trip
        .route("/health", get(health_handler))
        // [business] Which instance answered - for checking load balancer spread
        .route("/whoami", get(whoami_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryGateway;
    use crate::generator::RandomRecordGenerator;

    #[test]
    fn test_state_extractors_share_handles() {
        let db: Database = Arc::new(InMemoryGateway::new());
        let state = AppState::new(
            db.clone(),
            Arc::new(RandomRecordGenerator::new()),
            InstanceId::new("api-1"),
        );

        let extracted = Database::from_ref(&state);
        assert!(Arc::ptr_eq(&extracted, &db));
        assert_eq!(InstanceId::from_ref(&state).as_str(), "api-1");
    }
}
