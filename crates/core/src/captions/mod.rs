//! Caption generation and regeneration

pub mod ports;
pub mod service;
pub mod session;

pub use ports::CaptionGenerator;
pub use service::{CaptionService, MediaCaptionRequest, RegenerateOutcome};
pub use session::{EditSessions, RequestTicket, SessionId};
