//! Requesting side: one request and one response per connection.

mod receiver;

pub use receiver::Download;
pub use receiver::ResponseReceiver;
pub use receiver::fetch;
