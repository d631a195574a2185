use parlor_llm::ChatMessage;

use crate::error::Result;
use crate::store::ConversationStore;

/// Store one user message and the assistant's reply in the owner's active conversation
///
/// Creates the conversation on first use. Returns the conversation id.
pub async fn record_exchange(
    store: &dyn ConversationStore,
    owner_id: &str,
    user_text: &str,
    assistant_text: &str,
) -> Result<String> {
    let conversation = match store.find_active(owner_id).await? {
        Some(conversation) => conversation,
        None => store.create(owner_id).await?,
    };

    store
        .append_message(&conversation.id, ChatMessage::user(user_text))
        .await?;
    store
        .append_message(&conversation.id, ChatMessage::assistant(assistant_text))
        .await?;

    tracing::debug!(owner_id = %owner_id, conversation_id = %conversation.id, "Recorded exchange");
    Ok(conversation.id)
}
