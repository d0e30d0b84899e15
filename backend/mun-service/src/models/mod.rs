/// Data models for mun-service
///
/// - `identity`: roles, the request identity extractor, navigation
/// - `message`: direct messages and conversation summaries
/// - `reso`: resolutions and delegate resolution permissions
/// - `speech`: personal speech repository
/// - `update`: live crisis bulletins
/// - `committee`: committees and admin-created accounts
/// - `glossary`: static procedure glossary
/// - `session`: login and `/me` payloads
pub mod committee;
pub mod glossary;
pub mod identity;
pub mod message;
pub mod reso;
pub mod session;
pub mod speech;
pub mod update;

pub use committee::{Committee, CreateAccountRequest, CreatedAccount};
pub use glossary::{glossary, GlossarySection, GlossaryTerm};
pub use identity::{navigation_for, quick_actions, Identity, NavItem, QuickAction, Role};
pub use message::{
    build_conversation_summaries, conversation_key, ConversationSummary, LastMessage, Message,
    Participant, SendMessageRequest, UnreadCount,
};
pub use reso::{
    authorize_reso_write, reso_text_len, DelegateWithPerms, EditorToggleResponse, Reso,
    ResoPerms, ResoTarget, SaveResoRequest, NO_RESO_ACCESS,
};
pub use session::{AccountCredentials, LoginRequest, MeResponse};
pub use speech::{next_speech_id, SaveSpeechRequest, Speech};
pub use update::{CreateUpdateRequest, Update};
