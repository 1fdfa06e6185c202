use tera::Context;

use crate::{
    machine::{ConversationMachine, Transition},
    types::{ConversationState, Event, Keyboard, Outbound, Session},
};

pub fn show_services(machine: &ConversationMachine, session: &Session, event: &Event) -> Transition {
    let labels = machine
        .catalog()
        .list()
        .iter()
        .map(|entry| entry.label.as_str())
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("name", &event.sender_display_name);
    context.insert("services", &labels);
    let answer = machine.templates().render("welcome.html", &context);

    Transition::to(Session::with_state(
        session.id.clone(),
        ConversationState::SelectingService,
    ))
    .message(
        Outbound::html(session.id.clone(), answer)
            .keyboard(Keyboard::InlineOptions(machine.catalog().options())),
    )
}
