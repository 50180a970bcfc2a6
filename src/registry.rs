use std::collections::{HashMap, HashSet};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use uuid::Uuid;

/// Commands accepted by the registry task
enum RegistryCommand {
    Connect {
        connection_id: Uuid,
        sender: mpsc::UnboundedSender<String>,
    },
    Join {
        connection_id: Uuid,
        room_id: String,
    },
    Disconnect {
        connection_id: Uuid,
    },
    Broadcast {
        room_id: String,
        frame: String,
    },
    MemberCount {
        room_id: String,
        reply: oneshot::Sender<usize>,
    },
}

/// Membership state owned exclusively by the registry task
#[derive(Default)]
struct RegistryState {
    /// connection_id -> outbound frame sender
    connections: HashMap<Uuid, mpsc::UnboundedSender<String>>,
    /// room_id -> member connection ids
    rooms: HashMap<String, HashSet<Uuid>>,
    /// connection_id -> rooms it joined, for disconnect cleanup
    memberships: HashMap<Uuid, HashSet<String>>,
}

impl RegistryState {
    fn apply(&mut self, command: RegistryCommand) {
        match command {
            RegistryCommand::Connect {
                connection_id,
                sender,
            } => {
                self.connections.insert(connection_id, sender);
                debug!(connection_id = %connection_id, "Connection registered");
            }
            RegistryCommand::Join {
                connection_id,
                room_id,
            } => {
                let members = self.rooms.entry(room_id.clone()).or_default();
                members.insert(connection_id);
                let member_count = members.len();
                self.memberships
                    .entry(connection_id)
                    .or_default()
                    .insert(room_id.clone());

                debug!(
                    connection_id = %connection_id,
                    room_id = %room_id,
                    members = member_count,
                    "Connection joined room"
                );
            }
            RegistryCommand::Disconnect { connection_id } => {
                self.connections.remove(&connection_id);

                if let Some(joined_rooms) = self.memberships.remove(&connection_id) {
                    for room_id in joined_rooms {
                        if let Some(members) = self.rooms.get_mut(&room_id) {
                            members.remove(&connection_id);
                            if members.is_empty() {
                                self.rooms.remove(&room_id);
                            }
                        }
                    }
                }

                debug!(connection_id = %connection_id, "Connection removed from registry");
            }
            RegistryCommand::Broadcast { room_id, frame } => {
                if let Some(members) = self.rooms.get(&room_id) {
                    for connection_id in members {
                        if let Some(sender) = self.connections.get(connection_id) {
                            let _ = sender.send(frame.clone());
                        }
                    }
                    debug!(
                        room_id = %room_id,
                        receivers = members.len(),
                        "Frame broadcast to room"
                    );
                } else {
                    debug!(room_id = %room_id, "Broadcast to room with no members dropped");
                }
            }
            RegistryCommand::MemberCount { room_id, reply } => {
                let count = self.rooms.get(&room_id).map(HashSet::len).unwrap_or(0);
                let _ = reply.send(count);
            }
        }
    }
}

/// Handle to the room registry task
///
/// All membership state lives inside a single spawned task; handles submit
/// commands over a channel, so membership changes and broadcasts from any
/// number of connections are serialized without shared locks. Commands from
/// one connection are processed in the order they were sent.
#[derive(Clone)]
pub struct RoomRegistry {
    commands: mpsc::UnboundedSender<RegistryCommand>,
}

impl RoomRegistry {
    /// Spawns the registry task and returns a handle to it
    pub fn spawn() -> Self {
        let (commands, mut receiver) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut state = RegistryState::default();
            while let Some(command) = receiver.recv().await {
                state.apply(command);
            }
            debug!("Room registry task stopped");
        });

        Self { commands }
    }

    /// Registers a connection's outbound channel, making it broadcastable
    pub fn connect(&self, connection_id: Uuid, sender: mpsc::UnboundedSender<String>) {
        self.send(RegistryCommand::Connect {
            connection_id,
            sender,
        });
    }

    /// Adds a connection to a room; joining twice is a no-op
    pub fn join_room(&self, connection_id: Uuid, room_id: &str) {
        self.send(RegistryCommand::Join {
            connection_id,
            room_id: room_id.to_string(),
        });
    }

    /// Removes a connection from the registry and every room it joined
    pub fn disconnect(&self, connection_id: Uuid) {
        self.send(RegistryCommand::Disconnect { connection_id });
    }

    /// Queues a frame for every current member of a room
    pub fn broadcast(&self, room_id: &str, frame: String) {
        self.send(RegistryCommand::Broadcast {
            room_id: room_id.to_string(),
            frame,
        });
    }

    /// Returns the number of connections currently in a room
    ///
    /// Commands are processed in submission order, so the answer reflects
    /// every command this handle sent before asking.
    pub async fn member_count(&self, room_id: &str) -> usize {
        let (reply, response) = oneshot::channel();
        self.send(RegistryCommand::MemberCount {
            room_id: room_id.to_string(),
            reply,
        });
        response.await.unwrap_or(0)
    }

    fn send(&self, command: RegistryCommand) {
        if self.commands.send(command).is_err() {
            warn!("Room registry task stopped, command dropped");
        }
    }
}
