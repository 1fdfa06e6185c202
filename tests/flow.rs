use std::sync::Arc;

use city_services::{
    catalog::ServiceCatalog,
    dispatch::DispatchRequest,
    flow::Flow,
    keyboards::CANCEL_BUTTON,
    location::{LocationInput, LocationPolicy},
    machine::ConversationMachine,
    storage::SessionStore,
    templates::Templates,
    types::{ConversationState, Event, EventKind, Keyboard},
};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

fn flow(policy: LocationPolicy) -> (Flow, UnboundedReceiver<DispatchRequest>) {
    let (sender, receiver) = unbounded_channel();
    let machine = ConversationMachine::new(
        Arc::new(ServiceCatalog::city_services()),
        Templates::new().unwrap(),
        policy,
    );
    (
        Flow::new(machine, SessionStore::new(), Arc::new(sender)),
        receiver,
    )
}

fn select(id: &str) -> EventKind {
    EventKind::ServiceSelection { id: id.to_string() }
}

fn text(value: &str) -> EventKind {
    EventKind::TextInput {
        text: value.to_string(),
    }
}

#[tokio::test]
async fn geo_request_is_confirmed_and_dispatched() {
    let (flow, mut dispatched) = flow(LocationPolicy::Both);

    let welcome = flow
        .handle(Event::new("100", EventKind::StartCommand).with_sender("Ada"))
        .await;
    assert_eq!(welcome.len(), 1);
    assert!(welcome[0].text.contains("Welcome"));

    let prompts = flow.handle(Event::new("100", select("plumber"))).await;
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[1].keyboard, Keyboard::LocationPrompt);
    assert_eq!(
        flow.store().get("100").await.selected_service(),
        Some("plumber")
    );

    let confirmation = flow
        .handle(
            Event::new(
                "100",
                EventKind::GeoInput {
                    latitude: 40.0,
                    longitude: -75.0,
                },
            )
            .with_sender("Ada"),
        )
        .await;
    assert_eq!(confirmation.len(), 1);
    let text = &confirmation[0].text;
    assert!(text.contains("Request Confirmed"));
    assert!(text.contains("40.000000"));
    assert!(text.contains("-75.000000"));
    assert!(text.contains("https://www.google.com/maps?q=40.0,-75.0"));
    assert!(text.contains("🔧 Plumber"));

    assert!(flow.store().get("100").await.is_idle());
    assert!(flow.store().is_empty());

    let request = dispatched.try_recv().unwrap();
    assert_eq!(request.session_id, "100");
    assert_eq!(request.service_id, "plumber");
    assert_eq!(request.service_label, "🔧 Plumber");
    assert_eq!(request.requested_by.as_deref(), Some("Ada"));
    assert_eq!(
        request.location,
        LocationInput::GeoCoordinate {
            latitude: 40.0,
            longitude: -75.0
        }
    );
    assert!(dispatched.try_recv().is_err());
}

#[tokio::test]
async fn text_only_flow_accepts_area_after_blank_input() {
    let (flow, mut dispatched) = flow(LocationPolicy::TextOnly);
    flow.handle(Event::new("5", EventKind::StartCommand)).await;
    flow.handle(Event::new("5", select("construction"))).await;

    let retry = flow.handle(Event::new("5", text("   "))).await;
    assert_eq!(retry.len(), 1);
    assert!(!retry[0].text.contains("Request Confirmed"));
    assert_eq!(
        flow.store().get("5").await.state,
        ConversationState::AwaitingLocation {
            service_id: "construction".to_string()
        }
    );
    assert!(dispatched.try_recv().is_err());

    let confirmation = flow.handle(Event::new("5", text(" North Harbour "))).await;
    assert!(confirmation[0].text.contains("North Harbour"));
    assert!(confirmation[0].text.contains("🏗️ Construction Worker"));
    assert_eq!(
        dispatched.try_recv().unwrap().location_summary,
        "North Harbour"
    );
}

#[tokio::test]
async fn cancel_works_from_every_state() {
    let (flow, mut dispatched) = flow(LocationPolicy::Both);

    let idle = flow.handle(Event::new("1", EventKind::CancelCommand)).await;
    assert!(idle[0].text.contains("Request cancelled"));

    flow.handle(Event::new("2", EventKind::StartCommand)).await;
    flow.handle(Event::new("2", EventKind::CancelCommand)).await;

    flow.handle(Event::new("3", EventKind::StartCommand)).await;
    flow.handle(Event::new("3", select("electrician"))).await;
    flow.handle(Event::new("3", text(CANCEL_BUTTON))).await;

    for id in ["1", "2", "3"] {
        let session = flow.store().get(id).await;
        assert!(session.is_idle());
        assert_eq!(session.selected_service(), None);
    }
    assert!(dispatched.try_recv().is_err());
}

#[tokio::test]
async fn later_selection_wins() {
    let (flow, _dispatched) = flow(LocationPolicy::Both);
    flow.handle(Event::new("9", EventKind::StartCommand)).await;

    let first = flow.handle(Event::new("9", select("plumber"))).await;
    let second = flow.handle(Event::new("9", select("electrician"))).await;
    assert_eq!(first.len(), second.len());
    assert_eq!(
        flow.store().get("9").await.selected_service(),
        Some("electrician")
    );

    let unknown = flow.handle(Event::new("9", select("wizard"))).await;
    assert_eq!(unknown.len(), 1);
    assert_eq!(
        flow.store().get("9").await.selected_service(),
        Some("electrician")
    );
}

#[tokio::test]
async fn stale_buttons_are_ignored_after_completion() {
    let (flow, _dispatched) = flow(LocationPolicy::Both);
    flow.handle(Event::new("4", EventKind::StartCommand)).await;
    flow.handle(Event::new("4", select("plumber"))).await;
    flow.handle(Event::new("4", text("Market square"))).await;

    let replies = flow.handle(Event::new("4", select("plumber"))).await;
    assert!(replies.is_empty());
    assert!(flow.store().get("4").await.is_idle());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn distinct_sessions_do_not_interfere() {
    let (flow, mut dispatched) = flow(LocationPolicy::Both);
    let flow = Arc::new(flow);
    let services = ["electrician", "plumber", "construction"];

    let mut tasks = vec![];
    for user in 0..30 {
        let flow = flow.clone();
        let service = services[user % services.len()];
        tasks.push(tokio::spawn(async move {
            let id = user.to_string();
            flow.handle(Event::new(id.clone(), EventKind::StartCommand))
                .await;
            flow.handle(Event::new(id.clone(), select(service))).await;
            let selected = flow.store().get(&id).await;
            assert_eq!(selected.selected_service(), Some(service));
            flow.handle(Event::new(id.clone(), text(&format!("Block {}", user))))
                .await;
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let mut requests = vec![];
    while let Ok(request) = dispatched.try_recv() {
        requests.push(request);
    }
    assert_eq!(requests.len(), 30);
    for request in requests {
        let user: usize = request.session_id.parse().unwrap();
        assert_eq!(request.service_id, services[user % services.len()]);
        assert_eq!(request.location_summary, format!("Block {}", user));
    }
    assert!(flow.store().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_events_for_one_session_stay_consistent() {
    let (flow, _dispatched) = flow(LocationPolicy::Both);
    let flow = Arc::new(flow);
    flow.handle(Event::new("77", EventKind::StartCommand)).await;

    let mut tasks = vec![];
    for n in 0..20 {
        let flow = flow.clone();
        tasks.push(tokio::spawn(async move {
            let kind = if n % 2 == 0 {
                select("plumber")
            } else {
                EventKind::CancelCommand
            };
            flow.handle(Event::new("77", kind)).await;
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let session = flow.store().get("77").await;
    match session.state {
        ConversationState::AwaitingLocation { .. } => {
            assert_eq!(session.selected_service(), Some("plumber"))
        }
        _ => assert_eq!(session.selected_service(), None),
    }
}

#[tokio::test]
async fn oversized_area_is_not_dispatched() {
    let (flow, mut dispatched) = flow(LocationPolicy::Both);
    flow.handle(Event::new("12", EventKind::StartCommand)).await;
    flow.handle(Event::new("12", select("plumber"))).await;

    let retry = flow.handle(Event::new("12", text(&"a".repeat(4096)))).await;
    assert_eq!(retry.len(), 1);
    assert!(!retry[0].text.contains("Request Confirmed"));
    assert!(dispatched.try_recv().is_err());
    assert_eq!(
        flow.store().get("12").await.selected_service(),
        Some("plumber")
    );
}
