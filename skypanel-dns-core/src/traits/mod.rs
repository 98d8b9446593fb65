//! Storage layer abstraction trait definition

mod domain_repository;
mod subscription_repository;

pub use domain_repository::DomainRepository;
pub use subscription_repository::SubscriptionRepository;
