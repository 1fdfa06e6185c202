use std::sync::Arc;

use crate::{
    dispatch::Dispatcher,
    error::FlowError,
    machine::ConversationMachine,
    storage::SessionStore,
    types::{Event, Outbound},
};

/// Runs events through the machine against stored sessions.
pub struct Flow {
    machine: ConversationMachine,
    store: SessionStore,
    dispatcher: Arc<dyn Dispatcher>,
}

impl Flow {
    pub fn new(
        machine: ConversationMachine,
        store: SessionStore,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Flow {
            machine,
            store,
            dispatcher,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Handles one event while holding its session's lock and returns the
    /// replies to send.
    pub async fn handle(&self, event: Event) -> Vec<Outbound> {
        let transition = {
            let mut session = self.store.lock(&event.session_id).await;
            let transition = self.machine.transition(&session, &event);
            *session = transition.session.clone();
            if let Some(request) = transition.dispatch.clone() {
                self.dispatcher.dispatch(request);
            }
            transition
        };
        self.store.release(&event.session_id);

        match &transition.outcome {
            Ok(()) => log::debug!(
                "Session {}: {} -> {}",
                event.session_id,
                event.kind.name(),
                transition.session.state.name()
            ),
            Err(err @ FlowError::UnexpectedEvent { .. }) => {
                log::warn!("Session {}: ignored, {}", event.session_id, err)
            }
            Err(err) => log::info!("Session {}: asked again, {}", event.session_id, err),
        }

        transition.messages
    }
}
