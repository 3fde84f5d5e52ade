use strum_macros::{Display, EnumIter, EnumString};

use crate::counter::{AnyCounter, AsyncCounter, SyncCounter};
use crate::counters::{
    ActorCounter, AtomicCounter, BlockingSemaphoreCounter, DependencyChainCounter,
    FutexLockCounter, LockCounter, MonitorCounter, PthreadMutexCounter, RecursiveLockCounter,
    RwLockCounter, SemaphoreCounter, SerialQueueCounter, WorkGroupCounter, WorkPoolCounter,
};

/// Identifier for one synchronization strategy, the shape the presentation
/// layer hands to the harness. Parseable from its snake_case name and
/// iterable so callers can enumerate the whole catalogue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    Lock,
    RecursiveLock,
    FutexLock,
    PthreadMutex,
    Semaphore,
    BlockingSemaphore,
    SerialQueue,
    RwLock,
    Atomic,
    Actor,
    WorkPool,
    DependencyChain,
    WorkGroup,
    Monitor,
}

impl Strategy {
    /// Constructs a fresh counter for this strategy, value 0 and every
    /// synchronization handle ready. Each call returns an independent
    /// instance; nothing is shared across runs.
    pub fn build(self) -> AnyCounter {
        match self {
            Strategy::Lock => AnyCounter::from_sync(LockCounter::new()),
            Strategy::RecursiveLock => AnyCounter::from_sync(RecursiveLockCounter::new()),
            Strategy::FutexLock => AnyCounter::from_sync(FutexLockCounter::new()),
            Strategy::PthreadMutex => AnyCounter::from_sync(PthreadMutexCounter::new()),
            Strategy::Semaphore => AnyCounter::from_async(SemaphoreCounter::new()),
            Strategy::BlockingSemaphore => {
                AnyCounter::from_sync(BlockingSemaphoreCounter::new())
            }
            Strategy::SerialQueue => AnyCounter::from_sync(SerialQueueCounter::new()),
            Strategy::RwLock => AnyCounter::from_sync(RwLockCounter::new()),
            Strategy::Atomic => AnyCounter::from_sync(AtomicCounter::new()),
            Strategy::Actor => AnyCounter::from_async(ActorCounter::new()),
            Strategy::WorkPool => AnyCounter::from_sync(WorkPoolCounter::new()),
            Strategy::DependencyChain => AnyCounter::from_async(DependencyChainCounter::new()),
            Strategy::WorkGroup => AnyCounter::from_sync(WorkGroupCounter::new()),
            Strategy::Monitor => AnyCounter::from_sync(MonitorCounter::new()),
        }
    }
}
