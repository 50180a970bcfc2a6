use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::{sleep, Duration};

use textre::{
    message::repository::InMemoryMessageRepository, websockets::MessageHandler, MessageRepository,
    RelayReceiveHandler, RoomRegistry, SocketEvent,
};

use super::mocks::TestConnection;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub registry: RoomRegistry,
    pub repository: Arc<dyn MessageRepository + Send + Sync>,
    pub relay: RelayReceiveHandler,
    pub room_id: String,
    pub chatters: Vec<String>,
    connections: HashMap<String, TestConnection>,
}

impl TestSetup {
    pub fn connection(&self, name: &str) -> &TestConnection {
        self.connections
            .get(name)
            .unwrap_or_else(|| panic!("no chatter named {}", name))
    }
}

pub struct TestSetupBuilder {
    chatters: Vec<String>,
    room_id: String,
    repository: Option<Arc<dyn MessageRepository + Send + Sync>>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            chatters: vec![],
            room_id: "room-123".to_string(),
            repository: None,
        }
    }

    pub fn with_chatters(mut self, chatters: Vec<&str>) -> Self {
        self.chatters = chatters.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_chatters(self) -> Self {
        self.with_chatters(vec!["alice", "bob"])
    }

    pub fn with_three_chatters(self) -> Self {
        self.with_chatters(vec!["alice", "bob", "charlie"])
    }

    pub fn with_repository(mut self, repository: Arc<dyn MessageRepository + Send + Sync>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub async fn build(self) -> TestSetup {
        let registry = RoomRegistry::spawn();
        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryMessageRepository::new()));
        let relay = RelayReceiveHandler::new(registry.clone(), Arc::clone(&repository));

        // Each chatter connects and joins the shared room through the
        // relay, exactly as a real socket would
        let mut connections = HashMap::new();
        for name in &self.chatters {
            let connection = TestConnection::connect(&registry);
            let join =
                serde_json::to_string(&SocketEvent::join_room(self.room_id.clone())).unwrap();
            relay.handle_message(connection.connection_id, join).await;
            connections.insert(name.clone(), connection);
        }
        sleep(Duration::from_millis(10)).await;

        TestSetup {
            registry,
            repository,
            relay,
            room_id: self.room_id,
            chatters: self.chatters,
            connections,
        }
    }
}
