use tera::Context;

use crate::{
    machine::{ConversationMachine, Transition},
    types::{Keyboard, Outbound, Session},
};

pub fn cancel_request(machine: &ConversationMachine, session: &Session) -> Transition {
    let answer = machine.templates().render("cancelled.html", &Context::new());
    Transition::to(Session::new(session.id.clone()))
        .message(Outbound::html(session.id.clone(), answer).keyboard(Keyboard::Dismiss))
}
