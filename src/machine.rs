use std::sync::Arc;

use crate::{
    catalog::ServiceCatalog,
    commands::{cancel, location, select_service, start},
    dispatch::DispatchRequest,
    error::FlowError,
    keyboards::CANCEL_BUTTON,
    location::LocationPolicy,
    templates::Templates,
    types::{ConversationState, Event, EventKind, Outbound, Session},
};

/// Result of feeding one event to a session.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: Session,
    pub messages: Vec<Outbound>,
    pub dispatch: Option<DispatchRequest>,
    pub outcome: Result<(), FlowError>,
}

impl Transition {
    pub fn to(session: Session) -> Self {
        Transition {
            session,
            messages: vec![],
            dispatch: None,
            outcome: Ok(()),
        }
    }

    pub fn message(mut self, message: Outbound) -> Self {
        self.messages.push(message);
        self
    }

    pub fn dispatch(mut self, request: DispatchRequest) -> Self {
        self.dispatch = Some(request);
        self
    }

    pub fn failed(mut self, error: FlowError) -> Self {
        self.outcome = Err(error);
        self
    }
}

pub struct ConversationMachine {
    catalog: Arc<ServiceCatalog>,
    templates: Templates,
    policy: LocationPolicy,
}

impl ConversationMachine {
    pub fn new(catalog: Arc<ServiceCatalog>, templates: Templates, policy: LocationPolicy) -> Self {
        ConversationMachine {
            catalog,
            templates,
            policy,
        }
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    pub fn policy(&self) -> LocationPolicy {
        self.policy
    }

    /// Computes the next session and the replies for `event`. Never fails:
    /// bad input stays in the current state and reports a [`FlowError`].
    pub fn transition(&self, session: &Session, event: &Event) -> Transition {
        match (&session.state, &event.kind) {
            (_, EventKind::CancelCommand) => cancel::cancel_request(self, session),
            (ConversationState::Idle, EventKind::StartCommand) => {
                start::show_services(self, session, event)
            }
            (
                ConversationState::SelectingService | ConversationState::AwaitingLocation { .. },
                EventKind::ServiceSelection { id },
            ) => select_service::select_service(self, session, id),
            (ConversationState::AwaitingLocation { .. }, EventKind::TextInput { text })
                if text.trim() == CANCEL_BUTTON =>
            {
                cancel::cancel_request(self, session)
            }
            (ConversationState::AwaitingLocation { service_id }, EventKind::TextInput { text }) => {
                location::receive_area(self, session, service_id, text, event)
            }
            (
                ConversationState::AwaitingLocation { service_id },
                EventKind::GeoInput {
                    latitude,
                    longitude,
                },
            ) => location::receive_coordinates(
                self, session, service_id, *latitude, *longitude, event,
            ),
            (state, kind) => Transition::to(session.clone()).failed(FlowError::UnexpectedEvent {
                state: state.name(),
                event: kind.name(),
            }),
        }
    }
}
