//! Runtime adapters: OS threads for heavyweight mode, tokio for lightweight mode.

pub mod thread_spawner;
pub mod tokio_spawner;

pub use thread_spawner::ThreadSpawner;
pub use tokio_spawner::TokioSpawner;
