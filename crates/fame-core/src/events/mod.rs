//! Domain events

mod domain_event;

pub use domain_event::{
    ApplicationDecidedEvent, ApplicationSubmittedEvent, DomainEvent, MemberCreatedEvent,
    MemberDeletedEvent, MemberUpdatedEvent, UserRegisteredEvent,
};
