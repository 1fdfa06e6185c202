use tera::Context;

use crate::{
    error::FlowError,
    machine::{ConversationMachine, Transition},
    types::{ConversationState, Keyboard, Outbound, Session},
};

/// Stores the chosen service and asks for a location. Picking again while the
/// location is awaited replaces the earlier choice.
pub fn select_service(machine: &ConversationMachine, session: &Session, id: &str) -> Transition {
    let entry = match machine.catalog().resolve(id) {
        Ok(entry) => entry,
        Err(_) => return unknown_service(machine, session, id),
    };

    let policy = machine.policy();
    let mut context = Context::new();
    context.insert("label", &entry.label);
    context.insert("accepts_geo", &policy.accepts_geo());
    context.insert("accepts_text", &policy.accepts_text());
    let acknowledgement = machine.templates().render("service_selected.html", &context);
    let prompt = machine.templates().render("location_prompt.html", &context);

    let keyboard = if policy.accepts_geo() {
        Keyboard::LocationPrompt
    } else {
        Keyboard::None
    };

    Transition::to(Session::with_state(
        session.id.clone(),
        ConversationState::AwaitingLocation {
            service_id: entry.id.clone(),
        },
    ))
    .message(Outbound::html(session.id.clone(), acknowledgement).replacing_origin())
    .message(Outbound::html(session.id.clone(), prompt).keyboard(keyboard))
}

fn unknown_service(machine: &ConversationMachine, session: &Session, id: &str) -> Transition {
    let answer = machine
        .templates()
        .render("unknown_service.html", &Context::new());

    Transition::to(session.clone())
        .message(
            Outbound::html(session.id.clone(), answer)
                .keyboard(Keyboard::InlineOptions(machine.catalog().options())),
        )
        .failed(FlowError::InvalidSelection(id.to_string()))
}
