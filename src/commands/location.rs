use tera::Context;

use crate::{
    dispatch::DispatchRequest,
    error::FlowError,
    location::LocationInput,
    machine::{ConversationMachine, Transition},
    types::{Event, Keyboard, Outbound, Session},
};

pub fn receive_area(
    machine: &ConversationMachine,
    session: &Session,
    service_id: &str,
    text: &str,
    event: &Event,
) -> Transition {
    if !machine.policy().accepts_text() {
        return ask_again(
            machine,
            session,
            FlowError::MalformedLocation("typed areas are not accepted".to_string()),
        );
    }
    match LocationInput::free_text(text) {
        Ok(location) => confirm_request(machine, session, service_id, location, event),
        Err(err) => ask_again(machine, session, err),
    }
}

pub fn receive_coordinates(
    machine: &ConversationMachine,
    session: &Session,
    service_id: &str,
    latitude: f64,
    longitude: f64,
    event: &Event,
) -> Transition {
    if !machine.policy().accepts_geo() {
        return ask_again(
            machine,
            session,
            FlowError::MalformedLocation("shared locations are not accepted".to_string()),
        );
    }
    match LocationInput::geo(latitude, longitude) {
        Ok(location) => confirm_request(machine, session, service_id, location, event),
        Err(err) => ask_again(machine, session, err),
    }
}

fn confirm_request(
    machine: &ConversationMachine,
    session: &Session,
    service_id: &str,
    location: LocationInput,
    event: &Event,
) -> Transition {
    // The id was resolved when it was selected.
    let label = machine
        .catalog()
        .resolve(service_id)
        .map(|entry| entry.label.clone())
        .unwrap_or_else(|_| service_id.to_string());
    let summary = location.summary();
    let maps_link = location.maps_link();

    let mut context = Context::new();
    context.insert("label", &label);
    context.insert("summary", &summary);
    context.insert("maps_link", &maps_link);
    let answer = machine.templates().render("confirmation.html", &context);

    let mut confirmation = Outbound::html(session.id.clone(), answer).keyboard(Keyboard::Dismiss);
    if maps_link.is_some() {
        confirmation = confirmation.without_link_preview();
    }

    let request = DispatchRequest {
        session_id: session.id.clone(),
        service_id: service_id.to_string(),
        service_label: label,
        location_summary: summary,
        location,
        requested_by: event.sender_display_name.clone(),
        requested_at: event.received_at,
    };

    Transition::to(Session::new(session.id.clone()))
        .message(confirmation)
        .dispatch(request)
}

fn ask_again(machine: &ConversationMachine, session: &Session, error: FlowError) -> Transition {
    let policy = machine.policy();
    let mut context = Context::new();
    context.insert("accepts_geo", &policy.accepts_geo());
    context.insert("accepts_text", &policy.accepts_text());
    let answer = machine.templates().render("location_retry.html", &context);

    let keyboard = if policy.accepts_geo() {
        Keyboard::LocationPrompt
    } else {
        Keyboard::None
    };

    Transition::to(session.clone())
        .message(Outbound::html(session.id.clone(), answer).keyboard(keyboard))
        .failed(error)
}
