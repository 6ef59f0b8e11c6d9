pub mod fanout;
pub mod relay;
pub mod token_directory;

pub use fanout::{notify_recipients, relay_to_tokens};
pub use relay::PushRelay;
pub use token_directory::{InMemoryTokenDirectory, TokenDirectory};
