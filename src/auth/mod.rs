pub mod identity;
pub mod local_storage;

pub use identity::IdentityService;
pub use local_storage::{
    clear_role, persist_role, restore_role, FileStorage, LocalStorage, MemoryStorage,
    USER_TYPE_KEY,
};

#[cfg(test)]
pub use identity::MockIdentityService;
