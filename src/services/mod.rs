pub mod memory;
pub mod repository;
pub mod stats;

pub use memory::InMemoryRepository;
pub use repository::HabitRepository;
pub use stats::StatsService;
