//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use chrono::{DateTime, Utc};

use textre::{EventType, ReceiveMessagePayload, SocketEvent};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct FrameAssertion<'a> {
    setup: &'a TestSetup,
    chatters: Vec<&'a str>,
}

impl<'a> FrameAssertion<'a> {
    /// Create an assertion for all chatters in the setup
    pub fn for_all_chatters(setup: &'a TestSetup) -> Self {
        let chatters = setup.chatters.iter().map(|s| s.as_str()).collect();
        Self { setup, chatters }
    }

    /// Create an assertion for specific chatters
    pub fn for_chatters(setup: &'a TestSetup, chatters: Vec<&'a str>) -> Self {
        Self { setup, chatters }
    }

    /// Assert every chatter received exactly one identical receive_message frame
    pub async fn received_single_message(self) -> FrameContent {
        let mut frames = vec![];

        for chatter in &self.chatters {
            let received = self.setup.connection(chatter).received_frames().await;
            assert_eq!(
                received.len(),
                1,
                "{} should have received exactly one frame, got {}",
                chatter,
                received.len()
            );
            frames.push(received[0].clone());
        }

        for (chatter, frame) in self.chatters.iter().zip(&frames).skip(1) {
            assert_eq!(
                frame, &frames[0],
                "{} saw a different frame than {}",
                chatter, self.chatters[0]
            );
        }

        FrameContent::parse(&frames[0])
    }

    /// Assert every chatter saw exactly these message bodies, in this order
    pub async fn received_messages_in_order(self, expected_bodies: Vec<&str>) {
        for chatter in &self.chatters {
            let received = self.setup.connection(chatter).received_frames().await;
            let bodies = received
                .iter()
                .map(|frame| FrameContent::parse(frame).payload.message)
                .collect::<Vec<_>>();

            assert_eq!(
                bodies, expected_bodies,
                "{} saw the wrong message sequence",
                chatter
            );
        }
    }

    /// Assert that chatters received no frames at all
    pub async fn received_no_frames(self) {
        for chatter in &self.chatters {
            let received = self.setup.connection(chatter).received_frames().await;
            assert!(
                received.is_empty(),
                "{} should not have received any frames, got {:?}",
                chatter,
                received
            );
        }
    }
}

// ============================================================================
// Frame Content Assertions
// ============================================================================

pub struct FrameContent {
    payload: ReceiveMessagePayload,
}

impl FrameContent {
    /// Parse a wire frame, asserting it is a receive_message event
    pub fn parse(frame: &str) -> Self {
        let event: SocketEvent = serde_json::from_str(frame)
            .unwrap_or_else(|e| panic!("frame is not a socket event: {} ({})", frame, e));
        assert_eq!(
            event.event_type,
            EventType::ReceiveMessage,
            "expected a receive_message frame"
        );
        let payload: ReceiveMessagePayload = serde_json::from_value(event.data).unwrap();
        Self { payload }
    }

    /// Assert the message came from a specific sender
    pub fn with_sender(self, expected_sender: &str) -> Self {
        assert_eq!(self.payload.sender, expected_sender);
        self
    }

    /// Assert the message body
    pub fn with_body(self, expected_body: &str) -> Self {
        assert_eq!(self.payload.message, expected_body);
        self
    }

    /// Assert the room the message belongs to
    pub fn with_room(self, expected_room: &str) -> Self {
        assert_eq!(self.payload.room_id, expected_room);
        self
    }

    /// The server-assigned timestamp carried by the frame
    pub fn created_at(&self) -> DateTime<Utc> {
        self.payload.created_at
    }
}
