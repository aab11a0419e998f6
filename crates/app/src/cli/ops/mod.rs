pub mod category;
pub mod cover;
pub mod daemon;
pub mod health;
pub mod init;
pub mod post;
pub mod version;

pub use category::Category;
pub use cover::Cover;
pub use daemon::Daemon;
pub use health::Health;
pub use init::Init;
pub use post::Post;
pub use version::Version;
