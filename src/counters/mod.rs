pub mod actor;
pub mod atomic;
pub mod blocking_semaphore;
pub mod dependency_chain;
pub mod futex_lock;
pub mod lock;
pub mod monitor;
pub mod pthread_mutex;
pub mod recursive_lock;
pub mod rw_lock;
pub mod semaphore;
pub mod serial_queue;
pub mod work_group;
pub mod work_pool;

pub use actor::ActorCounter;
pub use atomic::AtomicCounter;
pub use blocking_semaphore::BlockingSemaphoreCounter;
pub use dependency_chain::DependencyChainCounter;
pub use futex_lock::FutexLockCounter;
pub use lock::LockCounter;
pub use monitor::MonitorCounter;
pub use pthread_mutex::PthreadMutexCounter;
pub use recursive_lock::RecursiveLockCounter;
pub use rw_lock::RwLockCounter;
pub use semaphore::SemaphoreCounter;
pub use serial_queue::SerialQueueCounter;
pub use work_group::WorkGroupCounter;
pub use work_pool::WorkPoolCounter;
