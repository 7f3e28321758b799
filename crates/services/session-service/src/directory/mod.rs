//! User directory: where accounts live.

mod memory_directory;
mod seed;

pub use memory_directory::{MemoryDirectory, UserDirectory};
pub use seed::demo_users;

#[cfg(any(test, feature = "test-utils"))]
pub use memory_directory::MockUserDirectory;
