use parlor_llm::{ChatMessage, Role};
use parlor_persist::{record_exchange, ConversationStore, InMemoryConversationStore, PersistError};

#[tokio::test]
async fn test_create_and_find_active() {
    let store = InMemoryConversationStore::new();

    assert!(store.find_active("u1").await.unwrap().is_none());

    let created = store.create("u1").await.unwrap();
    let found = store.find_active("u1").await.unwrap().unwrap();

    assert_eq!(found.id, created.id);
    assert!(store.find_active("u2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_append_message_moves_last_message_at() {
    let store = InMemoryConversationStore::new();
    let conversation = store.create("u1").await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    store
        .append_message(&conversation.id, ChatMessage::user("hello"))
        .await
        .unwrap();

    let stored = store.get(&conversation.id).await.unwrap();
    assert_eq!(stored.messages.len(), 1);
    assert!(stored.last_message_at > conversation.last_message_at);
}

#[tokio::test]
async fn test_append_to_unknown_conversation() {
    let store = InMemoryConversationStore::new();

    let err = store
        .append_message("missing", ChatMessage::user("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, PersistError::ConversationNotFound(_)));
}

#[tokio::test]
async fn test_record_exchange_reuses_active_conversation() {
    let store = InMemoryConversationStore::new();

    let first = record_exchange(&store, "u1", "hi", "Hello!").await.unwrap();
    let second = record_exchange(&store, "u1", "how are you?", "Fine.").await.unwrap();
    assert_eq!(first, second);

    let conversation = store.find_active("u1").await.unwrap().unwrap();
    let roles: Vec<Role> = conversation.messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
    );

    let history = conversation.provider_history();
    assert_eq!(history[1].content, "Hello!");
    assert_eq!(history[3].content, "Fine.");
}

#[tokio::test]
async fn test_ping() {
    let store = InMemoryConversationStore::new();
    assert!(store.ping().await.is_ok());
}
