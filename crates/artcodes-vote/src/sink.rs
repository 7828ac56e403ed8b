use artcodes_core::MarkerCode;

/// Receiver of debounced marker codes.
///
/// Called synchronously from [`VoteEngine::observe_frame`](crate::VoteEngine::observe_frame),
/// at most once per frame. Implementations must return quickly: a slow sink
/// stalls frame processing.
pub trait CodeSink {
    fn on_marker_code_detected(&mut self, code: &MarkerCode);
}

impl<F> CodeSink for F
where
    F: FnMut(&MarkerCode),
{
    fn on_marker_code_detected(&mut self, code: &MarkerCode) {
        self(code)
    }
}

/// Sink that discards every code.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl CodeSink for NullSink {
    fn on_marker_code_detected(&mut self, _code: &MarkerCode) {}
}

/// Sink that keeps every emitted code in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingSink {
    pub codes: Vec<MarkerCode>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl CodeSink for RecordingSink {
    fn on_marker_code_detected(&mut self, code: &MarkerCode) {
        self.codes.push(code.clone());
    }
}
