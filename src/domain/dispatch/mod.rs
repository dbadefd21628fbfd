pub mod dispatcher;
pub mod error;
pub mod model;
pub mod router;


pub use dispatcher::CallDispatcher;
pub use error::{AudioPreparationError, DispatchError};
pub use model::{
    CallAttempt, CallOutcome, DispatchState, DispatchStatus, DispatchSummary, RenderMode,
};
pub use router::{RenderDecision, VoiceProviderRouter};
