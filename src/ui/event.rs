// RustGamekit
// copyright rust_gamekit contributors 2016～2025

//! Notifications emitted by controls, and the per-call context a control
//! handler uses to talk back to its dialog.

/// Control notification, identified by the emitting control's id
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    Clicked { id: i32 },
    CheckChanged { id: i32, checked: bool },
    /// combo box selection
    SelectionChanged { id: i32, index: Option<usize> },
    ListBoxChanged { id: i32 },
    ItemDoubleClicked { id: i32, index: usize },
    SliderChanged { id: i32, value: i32 },
    ScrollChanged { id: i32, position: i32 },
    /// ids of the previous and the new focus holder
    FocusChanged { from: Option<i32>, to: Option<i32> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UiRequest {
    Focus,
    ClearRadioGroup(u32),
}

/// Collects what one handler call produced.
///
/// Requests are applied by the dialog after the handler returns, always on
/// behalf of the control that was called.
#[derive(Debug, Default)]
pub struct UiContext {
    events: Vec<ControlEvent>,
    requests: Vec<UiRequest>,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: ControlEvent) {
        self.events.push(event);
    }

    /// Ask the dialog to move input focus to the calling control
    pub fn request_focus(&mut self) {
        self.requests.push(UiRequest::Focus);
    }

    /// Ask the dialog to uncheck every radio button of `group` except the
    /// calling control
    pub fn clear_radio_group(&mut self, group: u32) {
        self.requests.push(UiRequest::ClearRadioGroup(group));
    }

    pub fn focus_requested(&self) -> bool {
        self.requests.contains(&UiRequest::Focus)
    }

    pub fn events(&self) -> &[ControlEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn take_requests(&mut self) -> Vec<UiRequest> {
        std::mem::take(&mut self.requests)
    }
}
