pub mod dispatcher;
pub mod handler;
pub mod registry;

use crate::conversation::Conversation;
pub use dispatcher::create_command_registry;

pub struct ChatState {
    pub conversation: Conversation,
    pub show_logic: bool,
    pub should_continue: bool,
}

impl ChatState {
    pub fn new(conversation: Conversation, show_logic: bool) -> Self {
        Self {
            conversation,
            show_logic,
            should_continue: true,
        }
    }
}
