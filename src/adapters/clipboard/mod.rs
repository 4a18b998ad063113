//! Clipboard adapters. Implement ClipboardPort.

pub mod memory;
pub mod system;

pub use memory::MemoryClipboard;
pub use system::SystemClipboard;
