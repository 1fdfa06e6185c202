use chrono::{DateTime, Utc};

pub type SessionId = String;

/// Where a conversation currently is. The selected service only exists while
/// the location is awaited, so it lives inside that variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConversationState {
    #[default]
    Idle,
    SelectingService,
    AwaitingLocation {
        service_id: String,
    },
}

impl ConversationState {
    pub fn name(&self) -> &'static str {
        match self {
            ConversationState::Idle => "idle",
            ConversationState::SelectingService => "selecting service",
            ConversationState::AwaitingLocation { .. } => "awaiting location",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub state: ConversationState,
}

impl Session {
    pub fn new(id: impl Into<SessionId>) -> Self {
        Session {
            id: id.into(),
            state: ConversationState::Idle,
        }
    }

    pub fn with_state(id: impl Into<SessionId>, state: ConversationState) -> Self {
        Session {
            id: id.into(),
            state,
        }
    }

    pub fn selected_service(&self) -> Option<&str> {
        match &self.state {
            ConversationState::AwaitingLocation { service_id } => Some(service_id),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == ConversationState::Idle
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    StartCommand,
    CancelCommand,
    ServiceSelection { id: String },
    TextInput { text: String },
    GeoInput { latitude: f64, longitude: f64 },
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::StartCommand => "start command",
            EventKind::CancelCommand => "cancel command",
            EventKind::ServiceSelection { .. } => "service selection",
            EventKind::TextInput { .. } => "text input",
            EventKind::GeoInput { .. } => "geo input",
        }
    }
}

/// One inbound update, already stripped of transport details.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub session_id: SessionId,
    pub kind: EventKind,
    pub sender_display_name: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl Event {
    pub fn new(session_id: impl Into<SessionId>, kind: EventKind) -> Self {
        Event {
            session_id: session_id.into(),
            kind,
            sender_display_name: None,
            received_at: Utc::now(),
        }
    }

    pub fn with_sender(mut self, name: impl Into<String>) -> Self {
        self.sender_display_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Keyboard {
    #[default]
    None,
    InlineOptions(Vec<KeyboardOption>),
    /// Share-location and cancel buttons.
    LocationPrompt,
    /// Removes a previously shown location prompt.
    Dismiss,
}

/// A reply in Telegram HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub session_id: SessionId,
    pub text: String,
    pub keyboard: Keyboard,
    pub disable_link_preview: bool,
    /// Replaces the message whose button produced the event, when there is one.
    pub replaces_origin: bool,
}

impl Outbound {
    pub fn html(session_id: impl Into<SessionId>, text: impl Into<String>) -> Self {
        Outbound {
            session_id: session_id.into(),
            text: text.into(),
            keyboard: Keyboard::None,
            disable_link_preview: false,
            replaces_origin: false,
        }
    }

    pub fn keyboard(mut self, keyboard: Keyboard) -> Self {
        self.keyboard = keyboard;
        self
    }

    pub fn without_link_preview(mut self) -> Self {
        self.disable_link_preview = true;
        self
    }

    pub fn replacing_origin(mut self) -> Self {
        self.replaces_origin = true;
        self
    }
}
