pub mod interface;
pub mod memory;
pub mod redis_store;
pub mod factory;

pub use interface::ToggleStore;
pub use memory::MemoryToggleStore;
pub use redis_store::RedisToggleStore;
pub use factory::ToggleStoreFactory;
