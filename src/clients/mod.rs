pub mod generator_client;
pub mod scripted;

pub use generator_client::{GeneratorClient, TaskTransport};
pub use scripted::{ScriptedReply, ScriptedTransport};
