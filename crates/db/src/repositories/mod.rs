//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod action_set_repo;
pub mod broadcast_repo;
pub mod campaign_event_repo;
pub mod campaign_repo;
pub mod channel_repo;
pub mod contact_field_value_repo;
pub mod contact_repo;
pub mod contact_urn_repo;
pub mod flow_label_repo;
pub mod flow_repo;
pub mod flow_run_repo;
pub mod flow_start_repo;
pub mod flow_step_repo;
pub mod group_repo;
pub mod label_repo;
pub mod migration_association_repo;
pub mod migration_repo;
pub mod msg_repo;
pub mod rule_set_repo;
pub mod run_value_repo;

pub use action_set_repo::ActionSetRepo;
pub use broadcast_repo::BroadcastRepo;
pub use campaign_event_repo::CampaignEventRepo;
pub use campaign_repo::CampaignRepo;
pub use channel_repo::ChannelRepo;
pub use contact_field_value_repo::ContactFieldValueRepo;
pub use contact_repo::ContactRepo;
pub use contact_urn_repo::ContactUrnRepo;
pub use flow_label_repo::FlowLabelRepo;
pub use flow_repo::FlowRepo;
pub use flow_run_repo::FlowRunRepo;
pub use flow_start_repo::FlowStartRepo;
pub use flow_step_repo::FlowStepRepo;
pub use group_repo::ContactGroupRepo;
pub use label_repo::LabelRepo;
pub use migration_association_repo::MigrationAssociationRepo;
pub use migration_repo::MigrationRepo;
pub use msg_repo::MsgRepo;
pub use rule_set_repo::RuleSetRepo;
pub use run_value_repo::RunValueRepo;
