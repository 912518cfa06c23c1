//! # Events Module
//!
//! Event-driven progress reporting for GUI-ready embedding.
//!
//! ## Design
//! The core library emits events through channels, allowing any UI
//! (CLI, GUI, web) to subscribe and display progress without the core
//! knowing who is listening.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! // In a separate thread, listen for events
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         match event {
//!             Event::PhaseChanged { phase } => println!("Phase: {}", phase),
//!             Event::Completed { summary } => {
//!                 println!("{} hidden characters", summary.hidden_characters)
//!             }
//!             _ => {}
//!         }
//!     }
//! });
//!
//! // Run the analyzer with the sender
//! analyzer.run_with_events(text, &sender);
//! ```

use crate::core::spacing::Likelihood;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

/// All events emitted by the analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Analysis has started
    Started { text_chars: usize },
    /// Moving to a new phase
    PhaseChanged { phase: AnalysisPhase },
    /// Analysis completed
    Completed { summary: AnalysisSummary },
}

/// Phases of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisPhase {
    /// Scanning for hidden characters
    Characters,
    /// Statistical spacing analysis
    Spacing,
    /// Assembling the merged report
    Reporting,
}

impl std::fmt::Display for AnalysisPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisPhase::Characters => write!(f, "Scanning characters"),
            AnalysisPhase::Spacing => write!(f, "Analyzing spacing"),
            AnalysisPhase::Reporting => write!(f, "Building report"),
        }
    }
}

/// Summary of one completed analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Total hidden character occurrences found
    pub hidden_characters: usize,
    /// Character-pipeline confidence, 0 to 100
    pub character_confidence: u32,
    /// Spacing verdict, absent when the text was too short to analyze
    pub spacing_likelihood: Option<Likelihood>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Sends events from the core library.
///
/// A thin wrapper around crossbeam's Sender that can be cloned and sent
/// across threads.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Create a new EventSender from a raw crossbeam sender.
    pub fn new(sender: Sender<Event>) -> Self {
        Self { inner: sender }
    }

    /// Send an event. Non-blocking if the channel isn't full.
    ///
    /// If the receiver is dropped, the event is silently discarded so
    /// that progress reporting stays optional.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receives events from the core library.
///
/// Used by UI layers to subscribe to progress updates.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event is received
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Returns an iterator over received events
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Factory for event channels between the core and UI layers.
pub struct EventChannel;

impl EventChannel {
    /// Create a new unbounded event channel.
    ///
    /// Use this for most cases; analysis events are small and few.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }

    /// Create a bounded event channel with the specified capacity.
    pub fn bounded(capacity: usize) -> (EventSender, EventReceiver) {
        let (sender, receiver) = bounded(capacity);
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// A no-op event sender for when you don't need progress reporting.
///
/// Useful for tests or for running without a UI.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}
