//! Security catalog - identity resolution, registration, and search.

mod securities_model;
mod securities_service;
mod securities_traits;


pub use securities_model::{
    normalize_symbol, resolve_exchange, resolve_type, Exchange, NewSecurity, Security,
    SecurityType, SecurityUpdate,
};
pub use securities_service::SecurityService;
pub use securities_traits::{SecurityRepositoryTrait, SecurityServiceTrait};
