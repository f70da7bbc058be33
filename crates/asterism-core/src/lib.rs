pub mod camera;
pub mod catalog;
pub mod color;
pub mod constants;
pub mod drawing;
pub mod error;
pub mod geometry;
pub mod glow;
pub mod notify;
pub mod pick;
pub mod scene;
pub mod session;
pub mod store;
pub mod task;
pub mod tween;

pub use camera::Camera;
pub use catalog::{Catalog, StarLayer, StarRecord, StarRef};
pub use color::Color;
pub use constants::*;
pub use error::{CatalogError, SaveError, StorageError};
pub use geometry::{View, Viewport};
pub use notify::{Notifier, Severity};
pub use scene::{Handle, LineStyle, SceneBackend, Topology};
pub use session::{ClickOutcome, DisplayOutcome, Mode, Session};
pub use store::{Constellation, ConstellationStore, KeyValueStore, MemoryStore};
