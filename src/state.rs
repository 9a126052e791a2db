use serde::Serialize;

/// Styling of the upload result message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MessageKind {
    #[default]
    Success,
    Error,
}

/// State of the upload section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadState {
    pub loading: bool,
    pub result_message: String,
    pub message_kind: MessageKind,
    pub last_assigned_id: Option<String>,
}

impl UploadState {
    /// Clear previous results and show the loading indicator
    pub fn begin(&mut self) {
        *self = Self {
            loading: true,
            ..Self::default()
        };
    }

    pub fn succeed(&mut self, video_id: String, message: String) {
        self.loading = false;
        self.result_message = message;
        self.message_kind = MessageKind::Success;
        self.last_assigned_id = Some(video_id);
    }

    /// Show an error; an identifier from an earlier upload no longer applies
    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.result_message = message;
        self.message_kind = MessageKind::Error;
        self.last_assigned_id = None;
    }
}

/// State of the results section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PollState {
    pub loading: bool,
    pub result_message: String,
    pub rendered_html: String,

    /// Current value of the identifier field
    pub video_id_input: String,
}

impl PollState {
    pub fn begin(&mut self) {
        self.loading = true;
        self.result_message.clear();
        self.rendered_html.clear();
    }

    pub fn show_report(&mut self, html: String) {
        self.loading = false;
        self.result_message.clear();
        self.rendered_html = html;
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.result_message = message;
        self.rendered_html.clear();
    }
}

/// Identifies one user action within a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic counter deciding which in-flight response may update state
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    /// Issue a ticket, superseding every earlier one
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

/// Everything the renderer reads
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub upload: UploadState,
    pub poll: PollState,
    pub(crate) upload_requests: RequestSequence,
    pub(crate) poll_requests: RequestSequence,
}
