/// Business logic layer
///
/// Each service owns a `PgPool` clone and the queries for one resource group.
pub mod accounts;
pub mod committees;
pub mod messages;
pub mod resos;
pub mod speeches;
pub mod updates;

pub use accounts::AccountService;
pub use committees::CommitteeService;
pub use messages::MessageService;
pub use resos::{ResoService, SavedReso};
pub use speeches::SpeechService;
pub use updates::UpdateService;
