//! Output builders: chat messages, line lists and item tooltips.

pub mod builder;
pub mod item;
pub mod list;
pub mod message;

pub use builder::{OutputBuilder, RenderOptions, LIST_SEPARATOR};
pub use item::{ItemBuilder, ItemDisplay, MaterialCatalog, DEFAULT_MATERIAL};
pub use list::ListMessageBuilder;
pub use message::{ClickAction, MessageBuilder, RenderedMessage, TitleDisplay};
