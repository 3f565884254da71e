pub mod repository;

pub use repository::AccountRepository;

pub mod mock;
pub use mock::InMemoryAccountRepository;
