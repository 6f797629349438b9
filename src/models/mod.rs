pub mod event;
pub mod intent;
pub mod response;

pub use event::EventRecord;
pub use intent::{Intent, ParsedIntent};
pub use response::{BookingResult, ComposedResponse, HelpPayload};
