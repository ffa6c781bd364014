pub mod errors;
pub mod events;
pub mod id;
pub mod notifications;
pub mod types;

pub use errors::{BindingError, ConfigError, KeycapError, PlatformError};
pub use events::{InputBus, InputEvent, KeyEventKind, RawKeyEvent, INPUT_BUS_CAPACITY};
pub use id::{new_binding_id, BindingId, PRIMARY_BINDING_ID};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use types::OsType;

pub type Result<T> = std::result::Result<T, KeycapError>;
