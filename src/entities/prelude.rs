pub use super::broker_profiles::Entity as BrokerProfiles;
pub use super::deposits::Entity as Deposits;
